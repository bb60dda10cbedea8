use std::process;

use clap::Parser;
use relmod_cli::{init_logging, run, Cli, EXIT_LOAD_ERROR};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            process::exit(outcome.exit_code);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(EXIT_LOAD_ERROR);
        }
    }
}
