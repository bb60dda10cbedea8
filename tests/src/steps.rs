//! Loader for step files.
//!
//! A step file is a model script split by step markers (`--# step_name`).
//! Each step's body is applied to the model before its expectation runs.
//! A marker with no body is a pure check of the current model.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ScenarioError, ScenarioResult};

/// A parsed step file.
#[derive(Debug, Clone, Default)]
pub struct Steps {
    bodies: HashMap<String, String>,
    order: Vec<String>,
}

impl Steps {
    /// Parse a step file from a string.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        Self::parse_named("<inline>", source)
    }

    /// Load and parse a step file from disk.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))?;
        Self::parse_named(&path.display().to_string(), &source)
    }

    fn parse_named(origin: &str, source: &str) -> ScenarioResult<Self> {
        let mut steps = Steps::default();
        let mut current: Option<String> = None;
        let mut body = String::new();

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                if let Some(name) = current.take() {
                    steps.bodies.insert(name, body.trim().to_string());
                }

                let name = suffix.trim().to_string();
                if name.is_empty() {
                    return Err(ScenarioError::steps_parse(origin, "empty step name after --#"));
                }
                if steps.order.contains(&name) {
                    return Err(ScenarioError::steps_parse(
                        origin,
                        format!("step '{}' appears twice", name),
                    ));
                }
                steps.order.push(name.clone());
                current = Some(name);
                body.clear();
            } else if current.is_some() {
                body.push_str(line);
                body.push('\n');
            }
            // Lines before the first marker are file-level comments.
        }

        if let Some(name) = current {
            steps.bodies.insert(name, body.trim().to_string());
        }

        Ok(steps)
    }

    /// The script body of a step.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bodies.get(name).map(|s| s.as_str())
    }

    /// Step names in order of appearance.
    pub fn names(&self) -> &[String] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_steps() {
        let source = r#"
-- vehicles

--# declare
entity Engine
entity Car

--# link
edge Car aggregation Engine one-to-one

--# check
"#;

        let steps = Steps::parse(source).unwrap();

        assert_eq!(steps.names(), &["declare", "link", "check"]);
        assert_eq!(steps.get("declare"), Some("entity Engine\nentity Car"));
        assert!(steps.get("link").unwrap().starts_with("edge Car"));
        assert_eq!(steps.get("check"), Some(""));
        assert_eq!(steps.get("missing"), None);
    }

    #[test]
    fn test_parse_rejects_bad_markers() {
        assert!(matches!(
            Steps::parse("--#\nentity A\n"),
            Err(ScenarioError::StepsParse { .. })
        ));
        assert!(matches!(
            Steps::parse("--# a\n--# a\n"),
            Err(ScenarioError::StepsParse { .. })
        ));
    }
}
