//! Pass/fail accounting for one sanity-check run.

/// Marker printed in front of passing report lines.
pub const PASS_MARK: &str = "✅";

/// Marker printed in front of failing report lines.
pub const FAIL_MARK: &str = "❌";

/// Exit code when every check passed.
pub const EXIT_ALL_PASSED: i32 = 0;

/// Exit code when one or more checks failed.
pub const EXIT_CHECKS_FAILED: i32 = 1;

/// Exit code when stack identifiers could not be resolved; no checks run.
pub const EXIT_UNRESOLVED_STACK: i32 = 2;

/// Outcome of a single stack check, printed once and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Marker for the report line.
    pub fn mark(&self) -> &'static str {
        if self.ok {
            PASS_MARK
        } else {
            FAIL_MARK
        }
    }
}

/// Ordered results of one run, aggregated into the process exit code.
#[derive(Debug, Default)]
pub struct CheckReport {
    results: Vec<CheckResult>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|result| result.ok)
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            EXIT_ALL_PASSED
        } else {
            EXIT_CHECKS_FAILED
        }
    }
}
