//! Data quality scoring derived from a validation report.

use crate::validation::ValidationReport;

/// Score with no findings at all.
pub const PERFECT_SCORE: f64 = 1.0;

/// Penalty per critical error.
pub const ERROR_PENALTY: f64 = 0.1;

/// Penalty per warning when there are no errors.
pub const WARNING_PENALTY: f64 = 0.05;

/// Warnings alone never push the score below this.
pub const WARNING_ONLY_FLOOR: f64 = 0.7;

/// Compute the data quality score in `[0.0, 1.0]`.
///
/// - errors present: `max(0, 1 - 0.1 * errors)`
/// - warnings only: `max(0.7, 1 - 0.05 * warnings)`
/// - otherwise `1.0`
pub fn compute_quality_score(total_errors: usize, total_warnings: usize) -> f64 {
    if total_errors > 0 {
        (PERFECT_SCORE - total_errors as f64 * ERROR_PENALTY).max(0.0)
    } else if total_warnings > 0 {
        (PERFECT_SCORE - total_warnings as f64 * WARNING_PENALTY).max(WARNING_ONLY_FLOOR)
    } else {
        PERFECT_SCORE
    }
}

pub fn quality_score(report: &ValidationReport) -> f64 {
    compute_quality_score(report.total_errors, report.total_warnings)
}
