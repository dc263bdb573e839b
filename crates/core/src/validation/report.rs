//! Report aggregation: severity partition, per-kind summary, recommendations.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::RowIndex;

use super::finding::{ErrorKind, Finding, Severity};

/// Examples retained per summary group.
pub const MAX_SUMMARY_EXAMPLES: usize = 3;

/// Outcome of one validation run.
///
/// `errors` holds exactly the critical findings and `warnings` the rest;
/// `is_valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub summary: ReportSummary,
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    /// Build a report from findings in pipeline order.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let (errors, warnings): (Vec<Finding>, Vec<Finding>) =
            findings.into_iter().partition(Finding::is_critical);
        let summary = ReportSummary::from_findings(errors.iter().chain(&warnings));
        let recommendations = generate_recommendations(errors.len(), warnings.len());

        Self {
            is_valid: errors.is_empty(),
            total_errors: errors.len(),
            total_warnings: warnings.len(),
            errors,
            warnings,
            summary,
            recommendations,
        }
    }

    /// Errors followed by warnings.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(&self.warnings)
    }

    /// Number of findings of `kind` across errors and warnings.
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.summary.get(kind).map_or(0, |entry| entry.count)
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Short reference to a finding inside a summary group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryExample {
    pub row: RowIndex,
    pub column: String,
    pub message: String,
}

/// Aggregate for one error kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub count: usize,
    pub severity: Severity,
    pub examples: Vec<SummaryExample>,
}

/// Findings grouped by kind, in order of first occurrence.
///
/// Serializes as a JSON object keyed by error type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    entries: Vec<(ErrorKind, SummaryEntry)>,
}

impl ReportSummary {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut summary = Self::default();
        for finding in findings {
            summary.record(finding);
        }
        summary
    }

    fn record(&mut self, finding: &Finding) {
        let idx = match self.entries.iter().position(|(k, _)| *k == finding.error_type) {
            Some(idx) => idx,
            None => {
                self.entries.push((
                    finding.error_type,
                    SummaryEntry {
                        count: 0,
                        severity: finding.severity,
                        examples: Vec::new(),
                    },
                ));
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx].1;
        entry.count += 1;
        if entry.examples.len() < MAX_SUMMARY_EXAMPLES {
            entry.examples.push(SummaryExample {
                row: finding.row_index,
                column: finding.column.clone(),
                message: finding.message.clone(),
            });
        }
    }

    pub fn get(&self, kind: ErrorKind) -> Option<&SummaryEntry> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, &SummaryEntry)> {
        self.entries.iter().map(|(k, e)| (*k, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ReportSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (kind, entry) in &self.entries {
            map.serialize_entry(kind.as_str(), entry)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// One line per non-empty finding class.
pub fn generate_recommendations(total_errors: usize, total_warnings: usize) -> Vec<String> {
    let mut recommendations = Vec::new();
    if total_errors > 0 {
        recommendations.push(format!(
            "🚨 Fix {total_errors} critical errors before proceeding"
        ));
    }
    if total_warnings > 0 {
        recommendations.push(format!(
            "⚠️ Review {total_warnings} warnings for data quality"
        ));
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn finding(kind: ErrorKind, row: RowIndex) -> Finding {
        Finding::new(kind, row, "Duration", format!("row {row}"))
    }

    #[test]
    fn partitions_by_severity() {
        let report = ValidationReport::from_findings(vec![
            finding(ErrorKind::SuspiciousValue, 0),
            finding(ErrorKind::OutOfRange, 1),
        ]);
        assert!(!report.is_valid);
        assert_eq!(report.total_errors, 1);
        assert_eq!(report.total_warnings, 1);
        assert!(report.errors.iter().all(|f| f.severity == Severity::Critical));
        assert!(report.warnings.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn summary_keeps_first_three_examples() {
        let findings: Vec<_> = (0..5).map(|row| finding(ErrorKind::OutOfRange, row)).collect();
        let report = ValidationReport::from_findings(findings);
        let entry = report.summary.get(ErrorKind::OutOfRange).unwrap();
        assert_eq!(entry.count, 5);
        let rows: Vec<_> = entry.examples.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn summary_lists_errors_before_warnings() {
        let report = ValidationReport::from_findings(vec![
            finding(ErrorKind::JsonFormat, 0),
            finding(ErrorKind::MissingValue, 3),
        ]);
        let kinds: Vec<_> = report.summary.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ErrorKind::MissingValue, ErrorKind::JsonFormat]);
    }

    #[test]
    fn summary_serializes_as_object() {
        let report = ValidationReport::from_findings(vec![finding(ErrorKind::JsonFormat, 4)]);
        assert_eq!(
            serde_json::to_value(&report.summary).unwrap(),
            json!({
                "json_format": {
                    "count": 1,
                    "severity": "warning",
                    "examples": [{"row": 4, "column": "Duration", "message": "row 4"}]
                }
            })
        );
    }

    #[test]
    fn recommendations_follow_counts() {
        assert!(generate_recommendations(0, 0).is_empty());
        assert_eq!(
            generate_recommendations(2, 0),
            vec!["🚨 Fix 2 critical errors before proceeding"]
        );
        assert_eq!(
            generate_recommendations(0, 3),
            vec!["⚠️ Review 3 warnings for data quality"]
        );
        assert_eq!(generate_recommendations(1, 1).len(), 2);
    }

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::from_findings(Vec::new());
        assert!(report.is_valid);
        assert!(report.summary.is_empty());
        assert!(report.recommendations.is_empty());
    }
}
