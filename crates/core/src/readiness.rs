//! Readiness classification of a validated data set.
//!
//! Derived only from the error and warning counts of a report.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationReport;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_PRODUCTION_READY: &str = "production_ready";
pub const STATUS_READY_WITH_WARNINGS: &str = "ready_with_warnings";
pub const STATUS_NEEDS_FIXES: &str = "needs_fixes";

// ---------------------------------------------------------------------------
// ReadinessStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// No errors and no warnings.
    ProductionReady,
    /// No errors, at least one warning.
    ReadyWithWarnings,
    /// At least one critical error.
    NeedsFixes,
}

impl ReadinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductionReady => STATUS_PRODUCTION_READY,
            Self::ReadyWithWarnings => STATUS_READY_WITH_WARNINGS,
            Self::NeedsFixes => STATUS_NEEDS_FIXES,
        }
    }
}

/// Classify from raw counts.
pub fn classify_readiness(total_errors: usize, total_warnings: usize) -> ReadinessStatus {
    match (total_errors, total_warnings) {
        (0, 0) => ReadinessStatus::ProductionReady,
        (0, _) => ReadinessStatus::ReadyWithWarnings,
        _ => ReadinessStatus::NeedsFixes,
    }
}

pub fn assess_readiness(report: &ValidationReport) -> ReadinessStatus {
    classify_readiness(report.total_errors, report.total_warnings)
}
