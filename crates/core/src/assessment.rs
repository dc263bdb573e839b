//! Validation request and the combined assessment returned to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::auto_fix::{suggest_auto_fixes, AutoFix};
use crate::dataset::DatasetKind;
use crate::error::CoreError;
use crate::quality_gate::quality_score;
use crate::readiness::{assess_readiness, ReadinessStatus};
use crate::suggestions::{dataset_hints, generate_suggestions, Suggestion};
use crate::types::Record;
use crate::validation::{validate, ValidationReport};

/// The three datasets to validate. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    #[serde(default)]
    pub clients_data: Vec<Record>,
    #[serde(default)]
    pub workers_data: Vec<Record>,
    #[serde(default)]
    pub tasks_data: Vec<Record>,
}

impl ValidationRequest {
    pub fn from_json_str(s: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn total_rows(&self) -> usize {
        self.clients_data.len() + self.workers_data.len() + self.tasks_data.len()
    }

    pub fn assess(&self) -> DataAssessment {
        assess(&self.clients_data, &self.workers_data, &self.tasks_data)
    }
}

/// Report plus everything derived from it and from the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataAssessment {
    pub validation_result: ValidationReport,
    pub data_quality_score: f64,
    pub readiness_status: ReadinessStatus,
    pub auto_fixes: Vec<AutoFix>,
    pub suggestions: Vec<Suggestion>,
    pub column_hints: BTreeMap<DatasetKind, Vec<&'static str>>,
}

impl DataAssessment {
    /// Derive score, readiness and fixes from `report`. Data insights are
    /// left empty; [`assess`] fills them.
    pub fn from_report(report: ValidationReport) -> Self {
        Self {
            data_quality_score: quality_score(&report),
            readiness_status: assess_readiness(&report),
            auto_fixes: suggest_auto_fixes(&report),
            validation_result: report,
            suggestions: Vec::new(),
            column_hints: BTreeMap::new(),
        }
    }
}

/// Validate the datasets, derive score, readiness and fixes, and collect
/// data-insight suggestions and column hints.
pub fn assess(clients: &[Record], workers: &[Record], tasks: &[Record]) -> DataAssessment {
    DataAssessment {
        suggestions: generate_suggestions(clients, workers, tasks),
        column_hints: dataset_hints(clients, workers, tasks),
        ..DataAssessment::from_report(validate(clients, workers, tasks))
    }
}
