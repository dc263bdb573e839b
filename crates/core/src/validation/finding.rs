//! Finding, severity and error-kind types.

use serde::{Deserialize, Serialize};

use crate::types::RowIndex;
use crate::value::CellValue;

/// Whether a finding blocks `is_valid` or is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
        }
    }
}

/// Every condition the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingColumn,
    MissingValue,
    DuplicateId,
    NegativeValue,
    InvalidType,
    JsonFormat,
    JsonParseError,
    InvalidReference,
    InvalidTaskReference,
    OutOfRange,
    SuspiciousValue,
    InvalidPriority,
    OverloadWarning,
    CircularDependency,
}

impl ErrorKind {
    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingColumn => "missing_column",
            Self::MissingValue => "missing_value",
            Self::DuplicateId => "duplicate_id",
            Self::NegativeValue => "negative_value",
            Self::InvalidType => "invalid_type",
            Self::JsonFormat => "json_format",
            Self::JsonParseError => "json_parse_error",
            Self::InvalidReference => "invalid_reference",
            Self::InvalidTaskReference => "invalid_task_reference",
            Self::OutOfRange => "out_of_range",
            Self::SuspiciousValue => "suspicious_value",
            Self::InvalidPriority => "invalid_priority",
            Self::OverloadWarning => "overload_warning",
            Self::CircularDependency => "circular_dependency",
        }
    }

    /// Fixed severity of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            Self::JsonFormat
            | Self::JsonParseError
            | Self::SuspiciousValue
            | Self::OverloadWarning => Severity::Warning,
            _ => Severity::Critical,
        }
    }
}

/// One validation result tied to a row and column.
///
/// Built through [`Finding::new`], which derives `severity` from the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub row_index: RowIndex,
    pub column: String,
    pub error_type: ErrorKind,
    pub message: String,
    pub severity: Severity,
    pub suggested_fix: Option<String>,
    pub cell_value: Option<CellValue>,
}

impl Finding {
    pub fn new(
        kind: ErrorKind,
        row_index: RowIndex,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            column: column.into(),
            error_type: kind,
            message: message.into(),
            severity: kind.severity(),
            suggested_fix: None,
            cell_value: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    pub fn with_value(mut self, value: &CellValue) -> Self {
        self.cell_value = Some(value.clone());
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn warning_kinds() {
        let warnings = [
            ErrorKind::JsonFormat,
            ErrorKind::JsonParseError,
            ErrorKind::SuspiciousValue,
            ErrorKind::OverloadWarning,
        ];
        for kind in warnings {
            assert_eq!(kind.severity(), Severity::Warning, "{}", kind.as_str());
        }
        assert_eq!(ErrorKind::CircularDependency.severity(), Severity::Critical);
        assert_eq!(ErrorKind::InvalidTaskReference.severity(), Severity::Critical);
    }

    #[test]
    fn as_str_matches_serde() {
        let kind = ErrorKind::InvalidTaskReference;
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        assert_eq!(serde_json::to_value(Severity::Critical).unwrap(), json!("critical"));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let finding = Finding::new(ErrorKind::NegativeValue, 2, "MaxLoad", "MaxLoad cannot be negative: -1")
            .with_fix("Set MaxLoad to a positive number")
            .with_value(&CellValue::from(json!(-1)));
        assert_eq!(
            serde_json::to_value(&finding).unwrap(),
            json!({
                "row_index": 2,
                "column": "MaxLoad",
                "error_type": "negative_value",
                "message": "MaxLoad cannot be negative: -1",
                "severity": "critical",
                "suggested_fix": "Set MaxLoad to a positive number",
                "cell_value": -1
            })
        );
    }

    #[test]
    fn dataset_level_finding_has_null_cell_value() {
        let finding = Finding::new(ErrorKind::MissingColumn, -1, "Name", "missing");
        let v = serde_json::to_value(&finding).unwrap();
        assert!(v["cell_value"].is_null());
        assert!(v["suggested_fix"].is_null());
    }
}
