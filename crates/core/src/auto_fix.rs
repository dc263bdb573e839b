//! Automatic fix suggestions for common critical errors.

use serde::{Deserialize, Serialize};

use crate::validation::{ErrorKind, ValidationReport};

/// Confidence attached to auto-fill suggestions.
pub const AUTO_FILL_CONFIDENCE: f64 = 0.8;

/// Confidence attached to type-conversion suggestions.
pub const TYPE_CONVERSION_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoFixType {
    /// Fill an empty required cell with a default.
    AutoFill,
    /// Convert a cell to the expected type.
    TypeConversion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoFix {
    #[serde(rename = "type")]
    pub fix_type: AutoFixType,
    pub description: String,
    pub confidence: f64,
}

/// One suggestion per `missing_value` or `invalid_type` error, in error
/// order. Other kinds and all warnings yield nothing.
pub fn suggest_auto_fixes(report: &ValidationReport) -> Vec<AutoFix> {
    report
        .errors
        .iter()
        .filter_map(|error| match error.error_type {
            ErrorKind::MissingValue => Some(AutoFix {
                fix_type: AutoFixType::AutoFill,
                description: format!("Auto-fill empty {} with default value", error.column),
                confidence: AUTO_FILL_CONFIDENCE,
            }),
            ErrorKind::InvalidType => Some(AutoFix {
                fix_type: AutoFixType::TypeConversion,
                description: format!("Convert {} to correct data type", error.column),
                confidence: TYPE_CONVERSION_CONFIDENCE,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::Finding;

    #[test]
    fn suggests_only_for_fixable_errors() {
        let report = ValidationReport::from_findings(vec![
            Finding::new(ErrorKind::InvalidType, 0, "MaxLoad", "bad"),
            Finding::new(ErrorKind::DuplicateId, 1, "WorkerID", "dup"),
            Finding::new(ErrorKind::MissingValue, 2, "Name", "empty"),
            Finding::new(ErrorKind::JsonFormat, 3, "Skills", "not a list"),
        ]);
        let fixes = suggest_auto_fixes(&report);
        assert_eq!(
            fixes,
            vec![
                AutoFix {
                    fix_type: AutoFixType::TypeConversion,
                    description: "Convert MaxLoad to correct data type".into(),
                    confidence: 0.9,
                },
                AutoFix {
                    fix_type: AutoFixType::AutoFill,
                    description: "Auto-fill empty Name with default value".into(),
                    confidence: 0.8,
                },
            ]
        );
    }

    #[test]
    fn serializes_kind_as_type() {
        let fix = AutoFix {
            fix_type: AutoFixType::AutoFill,
            description: "d".into(),
            confidence: 0.8,
        };
        assert_eq!(
            serde_json::to_value(&fix).unwrap(),
            json!({"type": "auto_fill", "description": "d", "confidence": 0.8})
        );
    }
}
