//! Consolidated error reports

use crate::taxonomy::{Category, ErrorRecord, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trellis_core::{ComponentId, Result};
use uuid::Uuid;

/// Counts over a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Remaining plus fixed
    pub total_errors: usize,
    pub fixed_errors: usize,
    pub remaining_errors: usize,
    /// Remaining errors per category
    pub errors_by_category: BTreeMap<Category, usize>,
    /// Remaining errors per severity
    pub errors_by_severity: BTreeMap<Severity, usize>,
}

/// Snapshot of everything a session has found and fixed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub timestamp: DateTime<Utc>,
    /// Session the records were collected in
    pub session_id: Uuid,
    /// Set when the report covers a single component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<ComponentId>,
    pub summary: ReportSummary,
    /// Remaining per-component errors followed by silent failures
    pub errors: Vec<ErrorRecord>,
    pub fixed_errors: Vec<ErrorRecord>,
    pub silent_failures: Vec<ErrorRecord>,
}

impl ErrorReport {
    pub fn new(
        session_id: Uuid,
        detected: Vec<ErrorRecord>,
        fixed: Vec<ErrorRecord>,
        silent_failures: Vec<ErrorRecord>,
    ) -> Self {
        let mut errors = detected;
        errors.extend(silent_failures.iter().cloned());

        let mut errors_by_category = BTreeMap::new();
        let mut errors_by_severity = BTreeMap::new();
        for error in &errors {
            *errors_by_category.entry(error.category).or_insert(0) += 1;
            *errors_by_severity.entry(error.severity).or_insert(0) += 1;
        }

        let summary = ReportSummary {
            total_errors: errors.len() + fixed.len(),
            fixed_errors: fixed.len(),
            remaining_errors: errors.len(),
            errors_by_category,
            errors_by_severity,
        };

        Self {
            timestamp: Utc::now(),
            session_id,
            component_id: None,
            summary,
            errors,
            fixed_errors: fixed,
            silent_failures,
        }
    }

    /// Mark the report as scoped to one component
    pub fn for_component(mut self, id: &ComponentId) -> Self {
        self.component_id = Some(id.clone());
        self
    }

    /// No remaining errors of any kind
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Most severe remaining error, if any
    pub fn highest_severity(&self) -> Option<Severity> {
        self.errors.iter().map(|e| e.severity).max()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.summary
            .errors_by_severity
            .get(&severity)
            .copied()
            .unwrap_or(0)
    }

    /// Get a human-readable summary
    pub fn summary_line(&self) -> String {
        if self.summary.total_errors == 0 {
            return "No errors found.".to_string();
        }

        format!(
            "{} error(s): {} remaining ({} critical, {} high, {} medium, {} low), {} fixed",
            self.summary.total_errors,
            self.summary.remaining_errors,
            self.count_by_severity(Severity::Critical),
            self.count_by_severity(Severity::High),
            self.count_by_severity(Severity::Medium),
            self.count_by_severity(Severity::Low),
            self.summary.fixed_errors,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Rule;

    #[test]
    fn test_empty_report() {
        let report = ErrorReport::new(Uuid::new_v4(), Vec::new(), Vec::new(), Vec::new());
        assert!(report.is_clean());
        assert_eq!(report.highest_severity(), None);
        assert_eq!(report.summary_line(), "No errors found.");
    }

    #[test]
    fn test_counts() {
        let detected = vec![
            ErrorRecord::new(Rule::Overlap, "overlap"),
            ErrorRecord::new(Rule::UnsafeUrl, "data url"),
        ];
        let fixed = vec![ErrorRecord::new(Rule::Bounds, "bounds")];
        let silent = vec![ErrorRecord::new(Rule::CircularDependency, "cycle")];

        let report = ErrorReport::new(Uuid::new_v4(), detected, fixed, silent);
        assert_eq!(report.summary.total_errors, 4);
        assert_eq!(report.summary.fixed_errors, 1);
        assert_eq!(report.summary.remaining_errors, 3);
        assert_eq!(report.summary.errors_by_category[&Category::Ui], 1);
        assert_eq!(report.summary.errors_by_category[&Category::Security], 1);
        assert_eq!(report.summary.errors_by_category[&Category::Logic], 1);
        assert_eq!(report.count_by_severity(Severity::Medium), 1);
        assert_eq!(report.count_by_severity(Severity::Low), 0);
        assert_eq!(report.highest_severity(), Some(Severity::Critical));
        assert_eq!(report.silent_failures.len(), 1);
        assert_eq!(report.errors.last().unwrap().subcategory, "circular-dependency");
    }

    #[test]
    fn test_json_shape() {
        let session = Uuid::new_v4();
        let report = ErrorReport::new(
            session,
            vec![ErrorRecord::new(Rule::Overlap, "overlap")],
            Vec::new(),
            Vec::new(),
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["summary"]["totalErrors"], 1);
        assert_eq!(json["summary"]["errorsByCategory"]["UI"], 1);
        assert_eq!(json["summary"]["errorsBySeverity"]["medium"], 1);
        assert!(json["fixedErrors"].as_array().unwrap().is_empty());
        assert!(json["timestamp"].is_string());
        assert_eq!(json["sessionId"], session.to_string());
        assert!(json.get("componentId").is_none());

        let scoped = report.for_component(&ComponentId::from("c1"));
        let json: serde_json::Value = serde_json::from_str(&scoped.to_json().unwrap()).unwrap();
        assert_eq!(json["componentId"], "c1");
    }
}
