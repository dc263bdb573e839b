//! Pipeline evaluator — pure logic, no I/O.
//!
//! Runs the checks in their fixed order over one input snapshot and folds
//! their findings into a [`ValidationReport`].

use crate::types::Record;

use super::checks::{
    check_business_rules, check_duplicate_ids, check_json_lists, check_numeric_fields,
    check_ranges, check_references, check_required_fields, ValidationInput,
};
use super::finding::Finding;
use super::report::ValidationReport;

/// Signature shared by every pipeline check.
pub type CheckFn = fn(&ValidationInput<'_>) -> Vec<Finding>;

/// A named pipeline stage.
pub struct Check {
    pub name: &'static str,
    pub run: CheckFn,
}

/// Checks in execution order. The order is observable in the report.
pub const PIPELINE: &[Check] = &[
    Check {
        name: "required_fields",
        run: check_required_fields,
    },
    Check {
        name: "duplicate_ids",
        run: check_duplicate_ids,
    },
    Check {
        name: "numeric_fields",
        run: check_numeric_fields,
    },
    Check {
        name: "json_lists",
        run: check_json_lists,
    },
    Check {
        name: "references",
        run: check_references,
    },
    Check {
        name: "ranges",
        run: check_ranges,
    },
    Check {
        name: "business_rules",
        run: check_business_rules,
    },
];

/// Validate the three datasets and build the report.
///
/// Row indices are positions within each supplied slice. Never fails:
/// malformed values become findings.
pub fn validate(clients: &[Record], workers: &[Record], tasks: &[Record]) -> ValidationReport {
    let input = ValidationInput::new(clients, workers, tasks);
    let report = ValidationReport::from_findings(run_pipeline(&input));

    tracing::info!(
        clients = clients.len(),
        workers = workers.len(),
        tasks = tasks.len(),
        errors = report.total_errors,
        warnings = report.total_warnings,
        "Validation complete"
    );

    report
}

/// Run every check in order and concatenate their findings.
pub fn run_pipeline(input: &ValidationInput<'_>) -> Vec<Finding> {
    PIPELINE.iter().fold(Vec::new(), |mut acc, check| {
        let found = (check.run)(input);
        tracing::debug!(check = check.name, findings = found.len(), "Check finished");
        acc.extend(found);
        acc
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::validation::finding::ErrorKind;

    fn rows(v: Value) -> Vec<Record> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn findings_follow_pipeline_order() {
        let tasks = rows(json!([
            {"TaskID": "T1", "ClientID": "C1", "Duration": 0, "Priority": "urgent", "Dependencies": "[\"T1\"]"},
            {"TaskID": "T1", "ClientID": "C1", "Duration": -4, "Priority": "low"}
        ]));
        let clients = rows(json!([{"ClientID": "C1", "Name": "Acme"}]));
        let input = ValidationInput::new(&clients, &[], &tasks);

        let kinds: Vec<_> = run_pipeline(&input).iter().map(|f| f.error_type).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::DuplicateId,
                ErrorKind::DuplicateId,
                ErrorKind::NegativeValue,
                ErrorKind::OutOfRange,
                ErrorKind::OutOfRange,
                ErrorKind::InvalidPriority,
                ErrorKind::CircularDependency,
            ]
        );
    }

    #[test]
    fn pipeline_has_seven_named_stages() {
        let names: Vec<_> = PIPELINE.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "required_fields",
                "duplicate_ids",
                "numeric_fields",
                "json_lists",
                "references",
                "ranges",
                "business_rules",
            ]
        );
    }

    #[test]
    fn empty_input_is_valid() {
        let report = validate(&[], &[], &[]);
        assert!(report.is_valid);
        assert_eq!(report.total_errors, 0);
        assert_eq!(report.total_warnings, 0);
    }
}
