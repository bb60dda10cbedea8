//! Line-oriented model scripts.
//!
//! ```text
//! -- comments start with two dashes
//! entity Engine cylinders:Int
//! entity Car engine:Engine
//! edge Car aggregation Engine one-to-one
//! resolve Base0 virtual-shared
//! remove Car
//! ```

use relmod_core::{DiamondResolution, FieldDecl, Multiplicity, RelationKind};

use crate::error::{ScriptError, ScriptResult};
use crate::model::Model;

/// One parsed script statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Entity {
        name: String,
        fields: Vec<FieldDecl>,
    },
    Edge {
        source: String,
        kind: RelationKind,
        target: String,
        multiplicity: Option<Multiplicity>,
    },
    Resolve {
        ancestor: String,
        resolution: DiamondResolution,
    },
    Remove {
        name: String,
    },
}

/// A parsed script: statements with their 1-based line numbers.
#[derive(Debug, Clone, Default)]
pub struct Script {
    statements: Vec<(usize, Statement)>,
}

impl Script {
    /// Parse a script from a string.
    pub fn parse(source: &str) -> ScriptResult<Self> {
        let mut statements = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }
            statements.push((line, parse_statement(line, trimmed)?));
        }
        Ok(Self { statements })
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter().map(|(_, stmt)| stmt)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Apply every statement in order, stopping at the first rejected one.
    ///
    /// Statements before the failing line stay applied.
    pub fn apply(&self, model: &mut Model) -> ScriptResult<()> {
        for (line, stmt) in &self.statements {
            apply_statement(model, stmt).map_err(|e| ScriptError::model(*line, e))?;
        }
        Ok(())
    }
}

fn apply_statement(model: &mut Model, stmt: &Statement) -> relmod_core::ModelResult<()> {
    match stmt {
        Statement::Entity { name, fields } => {
            model.declare(name.clone(), fields.clone())?;
        }
        Statement::Edge {
            source,
            kind,
            target,
            multiplicity,
        } => {
            model.add_edge(source, target, *kind, *multiplicity)?;
        }
        Statement::Resolve {
            ancestor,
            resolution,
        } => model.resolve_diamond(ancestor, *resolution)?,
        Statement::Remove { name } => {
            model.remove(name)?;
        }
    }
    Ok(())
}

fn parse_statement(line: usize, text: &str) -> ScriptResult<Statement> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (keyword, args) = match words.split_first() {
        Some((keyword, args)) => (keyword.to_lowercase(), args),
        None => return Err(ScriptError::syntax(line, "empty statement")),
    };

    match keyword.as_str() {
        "entity" => {
            let (name, field_words) = args
                .split_first()
                .ok_or_else(|| ScriptError::syntax(line, "entity needs a name"))?;
            let fields = field_words
                .iter()
                .map(|word| parse_field(line, word))
                .collect::<ScriptResult<Vec<_>>>()?;
            Ok(Statement::Entity {
                name: name.to_string(),
                fields,
            })
        }
        "edge" => {
            let [source, kind, target, rest @ ..] = args else {
                return Err(ScriptError::syntax(
                    line,
                    "expected: edge <Source> <kind> <Target> [multiplicity]",
                ));
            };
            let kind: RelationKind = kind.parse().map_err(|e| ScriptError::syntax(line, e))?;
            let multiplicity: Option<Multiplicity> = match rest {
                [] => None,
                [m] => Some(m.parse().map_err(|e| ScriptError::syntax(line, e))?),
                _ => return Err(ScriptError::syntax(line, "too many words after target")),
            };
            Ok(Statement::Edge {
                source: source.to_string(),
                kind,
                target: target.to_string(),
                multiplicity,
            })
        }
        "resolve" => {
            let [ancestor, resolution] = args else {
                return Err(ScriptError::syntax(
                    line,
                    "expected: resolve <Ancestor> <virtual-shared|duplicated>",
                ));
            };
            Ok(Statement::Resolve {
                ancestor: ancestor.to_string(),
                resolution: resolution
                    .parse()
                    .map_err(|e| ScriptError::syntax(line, e))?,
            })
        }
        "remove" => {
            let [name] = args else {
                return Err(ScriptError::syntax(line, "expected: remove <Name>"));
            };
            Ok(Statement::Remove {
                name: name.to_string(),
            })
        }
        other => Err(ScriptError::syntax(
            line,
            format!("unknown statement: {}", other),
        )),
    }
}

fn parse_field(line: usize, word: &str) -> ScriptResult<FieldDecl> {
    match word.split_once(':') {
        Some((name, tag)) if !name.is_empty() && !tag.is_empty() => Ok(FieldDecl::new(name, tag)),
        _ => Err(ScriptError::syntax(
            line,
            format!("field must look like name:Type, got {}", word),
        )),
    }
}

impl Model {
    /// Parse and apply a script to this model.
    pub fn apply_script(&mut self, source: &str) -> ScriptResult<()> {
        Script::parse(source)?.apply(self)
    }
}
