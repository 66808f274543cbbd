//! Non-fatal findings about an experiment configuration.
//!
//! Hard constraint violations are [`crate::WindError::Configuration`] and
//! stop a run before sampling. Issues collected here are warnings: legal
//! but worth reporting, such as a reference sample that is larger than the
//! biggest checkpoint but not by an order of magnitude.
//!
//! # Example
//!
//! ```
//! use windmc_core::diagnostics::Diagnostics;
//!
//! let mut diag = Diagnostics::new();
//! diag.add_warning("reference", "reference sample is only 2x the largest checkpoint");
//! assert_eq!(diag.warning_count(), 1);
//! assert_eq!(diag.summary(), "1 warning");
//! ```

use serde::Serialize;

/// A single warning
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    /// Category for grouping (e.g. "reference", "schedule")
    pub category: String,
    pub message: String,
}

impl DiagnosticIssue {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[warning:{}] {}", self.category, self.message)
    }
}

/// Collection of diagnostic issues
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, category: &str, message: &str) {
        self.issues.push(DiagnosticIssue::new(category, message));
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        match self.warning_count() {
            0 => "No issues".to_string(),
            1 => "1 warning".to_string(),
            w => format!("{w} warnings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_summary() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.summary(), "No issues");
        assert!(!diag.has_issues());

        diag.add_warning("reference", "small reference");
        assert_eq!(diag.summary(), "1 warning");
        diag.add_warning("schedule", "single checkpoint");
        assert_eq!(diag.summary(), "2 warnings");
        assert_eq!(diag.warning_count(), 2);
        assert!(diag.has_issues());
    }

    #[test]
    fn test_display_format() {
        let issue = DiagnosticIssue::new("reference", "too small");
        assert_eq!(issue.to_string(), "[warning:reference] too small");
    }
}
