//! Conformance report types: results, severity levels, and report aggregation.

/// Severity level of a conformance check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check identified a warning (non-blocking).
    Warning,
    /// The check failed (blocks conformance).
    Failure,
}

impl Severity {
    /// Fixed-width tag used in console output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        }
    }
}

/// A single conformance check result.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Short identifier of the validator that produced this result.
    pub validator: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl TestResult {
    /// Creates a passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Pass, Vec::new())
    }

    /// Creates a failure result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Failure, Vec::new())
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::new(validator, message, Severity::Failure, details)
    }

    /// Creates a warning result.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Warning, Vec::new())
    }

    /// Creates a warning result with additional detail lines.
    pub fn warn_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::new(validator, message, Severity::Warning, details)
    }

    fn new(
        validator: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }

    /// Returns true if this result represents a warning.
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Aggregated conformance report from all validators.
#[derive(Debug)]
pub struct ConformanceReport {
    /// All individual test results across all validators.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    /// Returns the count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Returns the count of warnings.
    pub fn warning_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_warning()).count()
    }

    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// Results produced by one validator.
    pub fn by_validator<'a>(&'a self, validator: &'a str) -> impl Iterator<Item = &'a TestResult> {
        self.results.iter().filter(move |r| r.validator == validator)
    }
}

impl Default for ConformanceReport {
    fn default() -> Self {
        Self::new()
    }
}
