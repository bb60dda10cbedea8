//! Expectations checked against the model after each step.

use relmod_lifecycle::Ownership;
use relmod_session::Model;
use relmod_validator::{FindingCode, ValidationReport};

use crate::error::{ScenarioError, ScenarioResult};

/// Everything a step can expect of the model it leaves behind.
#[derive(Default)]
pub struct Expectation {
    // Step outcome
    pub error: Option<String>,

    // Validation
    pub valid: Option<bool>,
    pub errors: Option<usize>,
    pub infos: Option<usize>,
    pub codes: Vec<FindingCode>,
    pub absent_codes: Vec<FindingCode>,
    pub findings: Vec<String>,

    // Ownership
    pub owns: Vec<(String, String)>,
    pub shares: Vec<(String, String)>,
    pub constructions: Vec<(String, Vec<String>)>,
    pub diamonds: Option<usize>,
    pub cascades: Vec<(String, Vec<String>)>,

    // Shape
    pub entities: Option<usize>,
    pub edges: Option<usize>,

    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Model) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expectation")
            .field("error", &self.error)
            .field("valid", &self.valid)
            .field("errors", &self.errors)
            .field("codes", &self.codes)
            .field("owns", &self.owns)
            .field("constructions", &self.constructions)
            .field("diamonds", &self.diamonds)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the expectation against a step's outcome and the model it left.
    pub fn verify(
        &self,
        step: &str,
        outcome: &Result<(), String>,
        model: &Model,
    ) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::expectation_failed(step, message));

        if let Some(ref expected) = self.error {
            return match outcome {
                Err(msg) if msg.contains(expected.as_str()) => Ok(()),
                Err(msg) => fail(format!(
                    "expected error containing '{}', got: {}",
                    expected, msg
                )),
                Ok(()) => fail(format!(
                    "expected error containing '{}', but step succeeded",
                    expected
                )),
            };
        }
        if let Err(msg) = outcome {
            return fail(format!("step was rejected: {}", msg));
        }

        let report = model.validate();
        self.verify_report(step, &report)?;

        let ownership = model.derive_ownership();
        self.verify_ownership(step, &ownership)?;

        for (name, expected) in &self.cascades {
            let actual = model
                .destruction_cascade(name)
                .map_err(|e| ScenarioError::expectation_failed(step, e.to_string()))?;
            if &actual != expected {
                return fail(format!(
                    "destroying {} expected to take {:?}, took {:?}",
                    name, expected, actual
                ));
            }
        }

        if let Some(expected) = self.entities {
            let actual = model.graph().entity_count();
            if actual != expected {
                return fail(format!("expected {} entities, found {}", expected, actual));
            }
        }
        if let Some(expected) = self.edges {
            let actual = model.graph().edge_count();
            if actual != expected {
                return fail(format!("expected {} edges, found {}", expected, actual));
            }
        }

        if let Some(ref check) = self.custom {
            if !check(model) {
                return fail("custom check returned false".to_string());
            }
        }

        Ok(())
    }

    fn verify_report(&self, step: &str, report: &ValidationReport) -> ScenarioResult<()> {
        let fail = |message: String| {
            Err(ScenarioError::expectation_failed(
                step,
                format!("{}\nreport:\n{}", message, report),
            ))
        };

        if let Some(expected) = self.valid {
            if report.is_valid() != expected {
                return fail(format!("expected valid = {}", expected));
            }
        }
        if let Some(expected) = self.errors {
            let actual = report.errors().count();
            if actual != expected {
                return fail(format!("expected {} errors, found {}", expected, actual));
            }
        }
        if let Some(expected) = self.infos {
            let actual = report.infos().count();
            if actual != expected {
                return fail(format!("expected {} infos, found {}", expected, actual));
            }
        }
        for code in &self.codes {
            if report.with_code(*code).next().is_none() {
                return fail(format!("expected a {} finding", code.as_str()));
            }
        }
        for code in &self.absent_codes {
            if report.with_code(*code).next().is_some() {
                return fail(format!("expected no {} finding", code.as_str()));
            }
        }
        for line in &self.findings {
            if !report.findings().iter().any(|f| &f.to_string() == line) {
                return fail(format!("expected finding '{}'", line));
            }
        }
        Ok(())
    }

    fn verify_ownership(&self, step: &str, ownership: &Ownership) -> ScenarioResult<()> {
        let fail = |message: String| Err(ScenarioError::expectation_failed(step, message));
        let has_record = |owner: &str, part: &str, owns: bool| {
            ownership
                .records
                .values()
                .any(|r| r.owner == owner && r.part == part && r.owns == owns)
        };

        for (owner, part) in &self.owns {
            if !has_record(owner, part, true) {
                return fail(format!("expected {} to own {}", owner, part));
            }
        }
        for (owner, part) in &self.shares {
            if !has_record(owner, part, false) {
                return fail(format!("expected {} to hold {} without owning it", owner, part));
            }
        }
        for (entity, expected) in &self.constructions {
            match ownership.construction_order(entity) {
                Some(order) if &order.construction == expected => {}
                Some(order) => {
                    return fail(format!(
                        "construction of {} expected {:?}, got {:?}",
                        entity, expected, order.construction
                    ))
                }
                None => return fail(format!("no construction order for {}", entity)),
            }
        }
        if let Some(expected) = self.diamonds {
            let actual = ownership.diamonds.len();
            if actual != expected {
                return fail(format!("expected {} diamonds, found {}", expected, actual));
            }
        }
        Ok(())
    }
}

/// Fluent builder for step expectations.
#[derive(Default)]
pub struct ExpectationBuilder {
    expectation: Expectation,
}

impl ExpectationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The step must be rejected with a message containing `substring`.
    pub fn error(mut self, substring: impl Into<String>) -> Self {
        self.expectation.error = Some(substring.into());
        self
    }

    /// Zero error findings.
    pub fn valid(mut self) -> Self {
        self.expectation.valid = Some(true);
        self
    }

    /// At least one error finding.
    pub fn invalid(mut self) -> Self {
        self.expectation.valid = Some(false);
        self
    }

    pub fn errors(mut self, count: usize) -> Self {
        self.expectation.errors = Some(count);
        self
    }

    pub fn infos(mut self, count: usize) -> Self {
        self.expectation.infos = Some(count);
        self
    }

    pub fn code(mut self, code: FindingCode) -> Self {
        self.expectation.codes.push(code);
        self
    }

    pub fn no_code(mut self, code: FindingCode) -> Self {
        self.expectation.absent_codes.push(code);
        self
    }

    /// A finding whose one-line rendering equals `line`.
    pub fn finding(mut self, line: impl Into<String>) -> Self {
        self.expectation.findings.push(line.into());
        self
    }

    pub fn owns(mut self, owner: impl Into<String>, part: impl Into<String>) -> Self {
        self.expectation.owns.push((owner.into(), part.into()));
        self
    }

    pub fn shares(mut self, owner: impl Into<String>, part: impl Into<String>) -> Self {
        self.expectation.shares.push((owner.into(), part.into()));
        self
    }

    pub fn constructs(mut self, entity: impl Into<String>, order: &[&str]) -> Self {
        self.expectation.constructions.push((
            entity.into(),
            order.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn diamonds(mut self, count: usize) -> Self {
        self.expectation.diamonds = Some(count);
        self
    }

    /// Destroying `entity` takes exactly `destroyed` with it, in order.
    pub fn cascade(mut self, entity: impl Into<String>, destroyed: &[&str]) -> Self {
        self.expectation.cascades.push((
            entity.into(),
            destroyed.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn entities(mut self, count: usize) -> Self {
        self.expectation.entities = Some(count);
        self
    }

    pub fn edges(mut self, count: usize) -> Self {
        self.expectation.edges = Some(count);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Model) -> bool + Send + Sync + 'static,
    {
        self.expectation.custom = Some(Box::new(check));
        self
    }

    pub fn build(self) -> Expectation {
        self.expectation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(script: &str) -> Model {
        let mut model = Model::new();
        model.apply_script(script).unwrap();
        model
    }

    #[test]
    fn test_error_expectation() {
        let exp = ExpectationBuilder::new().error("Unknown entity").build();
        let m = Model::new();

        assert!(exp
            .verify("s", &Err("Unknown entity: B".to_string()), &m)
            .is_ok());
        assert!(exp.verify("s", &Ok(()), &m).is_err());
        assert!(exp
            .verify("s", &Err("Duplicate entity: A".to_string()), &m)
            .is_err());
    }

    #[test]
    fn test_rejected_step_fails_plain_expectation() {
        let exp = ExpectationBuilder::new().valid().build();

        let err = exp
            .verify("s", &Err("line 1: boom".to_string()), &Model::new())
            .unwrap_err();

        assert!(err.to_string().contains("step was rejected"));
    }

    #[test]
    fn test_report_and_ownership_expectations() {
        let m = model("entity Heart\nentity Human\nedge Human composition Heart one-to-one\n");

        let ok = ExpectationBuilder::new()
            .valid()
            .errors(0)
            .owns("Human", "Heart")
            .cascade("Human", &["Heart"])
            .entities(2)
            .edges(1)
            .build();
        assert!(ok.verify("s", &Ok(()), &m).is_ok());

        let wrong = ExpectationBuilder::new().shares("Human", "Heart").build();
        assert!(wrong.verify("s", &Ok(()), &m).is_err());
    }

    #[test]
    fn test_code_expectations() {
        let m = model("entity A\nedge A aggregation A one-to-one\n");

        let exp = ExpectationBuilder::new()
            .invalid()
            .code(FindingCode::SelfAggregation)
            .no_code(FindingCode::CompositionCycle)
            .build();

        assert!(exp.verify("s", &Ok(()), &m).is_ok());
    }
}
