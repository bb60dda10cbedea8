//! Validation findings and reports.

use serde::Serialize;
use std::fmt;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The model is rejected.
    Error,
    /// Informational only; never affects acceptance.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Info => f.write_str("info"),
        }
    }
}

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FindingCode {
    CompositionCycle,
    SelfAggregation,
    FriendshipAsymmetric,
    UnresolvedDiamond,
    InheritanceCycle,
}

impl FindingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::CompositionCycle => "CompositionCycle",
            FindingCode::SelfAggregation => "SelfAggregation",
            FindingCode::FriendshipAsymmetric => "FriendshipAsymmetric",
            FindingCode::UnresolvedDiamond => "UnresolvedDiamond",
            FindingCode::InheritanceCycle => "InheritanceCycle",
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    /// Human-readable message describing the finding.
    pub message: String,
    /// Entities involved, in a meaningful order (e.g. around a cycle).
    pub entities: Vec<String>,
}

impl Finding {
    /// Create a new finding.
    pub fn new(
        severity: Severity,
        code: FindingCode,
        message: impl Into<String>,
        entities: Vec<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            entities,
        }
    }

    /// Create an error-level finding.
    pub fn error(code: FindingCode, message: impl Into<String>, entities: Vec<String>) -> Self {
        Self::new(Severity::Error, code, message, entities)
    }

    /// Create an info-level finding.
    pub fn info(code: FindingCode, message: impl Into<String>, entities: Vec<String>) -> Self {
        Self::new(Severity::Info, code, message, entities)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    pub fn is_info(&self) -> bool {
        matches!(self.severity, Severity::Info)
    }
}

/// `<severity>:<code>:<entities joined by "->">:<message>`
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.severity,
            self.code,
            self.entities.join("->"),
            self.message
        )
    }
}

/// Cumulative result of a validation pass.
///
/// Findings keep the order the checks ran in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Merge another report after this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }

    /// All findings in check order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    pub fn infos(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_info())
    }

    /// Findings with a given code.
    pub fn with_code(&self, code: FindingCode) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.code == code)
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.is_error())
    }

    /// True when there are zero Error findings. Info findings do not count.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Process exit code: 0 when valid, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_valid() {
            0
        } else {
            1
        }
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// One line per finding.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{}", finding)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationReport {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}
