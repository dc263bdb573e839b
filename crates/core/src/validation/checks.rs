//! The individual checks of the validation pipeline.
//!
//! Each check is a pure function of the [`ValidationInput`] and returns the
//! findings it produced, in dataset order (clients, workers, tasks) and then
//! row order. Checks never see each other's findings.

use std::collections::{HashMap, HashSet};

use crate::dataset::{
    cell, Dataset, DatasetKind, COL_CLIENT_ID, COL_CURRENT_LOAD, COL_DEPENDENCIES, COL_DURATION,
    COL_MAX_LOAD, COL_PRIORITY, COL_REQUESTED_TASK_IDS, COL_TASK_ID,
};
use crate::types::{Record, DATASET_LEVEL_ROW};
use crate::value::{parse_json_list, CoercionError, IdKey};

use super::finding::{ErrorKind, Finding};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest accepted task duration.
pub const DURATION_MIN: f64 = 1.0;

/// Durations above this are flagged as suspicious.
pub const DURATION_SUSPICIOUS_ABOVE: f64 = 100.0;

/// Accepted priority values, compared case-insensitively.
pub const VALID_PRIORITIES: &[&str] = &["high", "medium", "low", "1", "2", "3"];

const JSON_LIST_EXAMPLE: &str = r#"["item1", "item2"]"#;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Valid ID sets of the referenced datasets, built from the full datasets
/// before any row is checked.
#[derive(Debug, Default)]
pub struct IdIndex {
    pub clients: HashSet<IdKey>,
    pub tasks: HashSet<IdKey>,
}

/// Immutable snapshot every check reads from.
#[derive(Debug)]
pub struct ValidationInput<'a> {
    pub clients: Dataset<'a>,
    pub workers: Dataset<'a>,
    pub tasks: Dataset<'a>,
    pub ids: IdIndex,
}

impl<'a> ValidationInput<'a> {
    pub fn new(clients: &'a [Record], workers: &'a [Record], tasks: &'a [Record]) -> Self {
        let clients = Dataset::new(DatasetKind::Clients, clients);
        let workers = Dataset::new(DatasetKind::Workers, workers);
        let tasks = Dataset::new(DatasetKind::Tasks, tasks);
        let ids = IdIndex {
            clients: clients.id_set(),
            tasks: tasks.id_set(),
        };
        Self {
            clients,
            workers,
            tasks,
            ids,
        }
    }

    /// Datasets in pipeline visiting order.
    pub fn datasets(&self) -> [Dataset<'a>; 3] {
        [self.clients, self.workers, self.tasks]
    }
}

// ---------------------------------------------------------------------------
// 1. Required fields
// ---------------------------------------------------------------------------

/// Missing required columns, then empty required values column by column.
///
/// Datasets without rows are skipped entirely.
pub fn check_required_fields(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for ds in input.datasets() {
        if ds.is_empty() {
            continue;
        }
        let kind = ds.kind.as_str();
        let columns = ds.columns();
        let required = ds.schema().required;

        for &col in required.iter().filter(|c| !columns.contains(*c)) {
            findings.push(
                Finding::new(
                    ErrorKind::MissingColumn,
                    DATASET_LEVEL_ROW,
                    col,
                    format!("Required column '{col}' is missing from {kind}"),
                )
                .with_fix(format!("Add column '{col}' to your {kind} data")),
            );
        }

        for &col in required.iter().filter(|c| columns.contains(*c)) {
            for (row, value) in ds.column_cells(col).filter(|(_, v)| v.is_blank()) {
                findings.push(
                    Finding::new(
                        ErrorKind::MissingValue,
                        row,
                        col,
                        format!("Required field '{col}' is empty"),
                    )
                    .with_fix(format!("Add a value for {col}"))
                    .with_value(value),
                );
            }
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 2. Duplicate IDs
// ---------------------------------------------------------------------------

/// Every row whose ID is shared with another row. Null IDs are not grouped;
/// empty-string IDs are.
pub fn check_duplicate_ids(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for ds in input.datasets() {
        let id_col = ds.schema().id_column;

        let mut counts: HashMap<IdKey, usize> = HashMap::new();
        for key in ds.column_cells(id_col).filter_map(|(_, v)| v.id_key()) {
            *counts.entry(key).or_default() += 1;
        }

        for (row, value) in ds.column_cells(id_col) {
            let shared = value
                .id_key()
                .and_then(|key| counts.get(&key))
                .is_some_and(|&n| n > 1);
            if shared {
                findings.push(
                    Finding::new(
                        ErrorKind::DuplicateId,
                        row,
                        id_col,
                        format!("Duplicate {id_col}: '{value}'"),
                    )
                    .with_fix(format!("Make {id_col} unique"))
                    .with_value(value),
                );
            }
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 3. Numeric fields
// ---------------------------------------------------------------------------

/// Non-empty numeric-field values must coerce to a non-negative number.
pub fn check_numeric_fields(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for ds in input.datasets() {
        for &field in ds.schema().numeric {
            for (row, value) in ds.column_cells(field).filter(|(_, v)| !v.is_blank()) {
                match value.to_number() {
                    Ok(n) if n < 0.0 => findings.push(
                        Finding::new(
                            ErrorKind::NegativeValue,
                            row,
                            field,
                            format!("{field} cannot be negative: {value}"),
                        )
                        .with_fix(format!("Set {field} to a positive number"))
                        .with_value(value),
                    ),
                    Ok(_) => {}
                    Err(_) => findings.push(
                        Finding::new(
                            ErrorKind::InvalidType,
                            row,
                            field,
                            format!("'{value}' is not a valid number for {field}"),
                        )
                        .with_fix("Enter a numeric value")
                        .with_value(value),
                    ),
                }
            }
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 4. JSON-list fields
// ---------------------------------------------------------------------------

/// String values of JSON-list fields must parse as a JSON list.
///
/// Unparsable text is only flagged when it contains a comma; comma-free text
/// is treated as an opaque scalar.
pub fn check_json_lists(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for ds in input.datasets() {
        for &field in ds.schema().json_lists {
            for (row, value) in ds.column_cells(field) {
                let Some(raw) = value.as_str().filter(|s| !s.is_empty()) else {
                    continue;
                };
                match parse_json_list(raw) {
                    Ok(_) => {}
                    Err(CoercionError::NotAList) => findings.push(
                        Finding::new(
                            ErrorKind::JsonFormat,
                            row,
                            field,
                            format!("{field} should be a JSON list"),
                        )
                        .with_fix(format!("Format as JSON list: {JSON_LIST_EXAMPLE}"))
                        .with_value(value),
                    ),
                    Err(_) if raw.contains(',') => findings.push(
                        Finding::new(
                            ErrorKind::JsonParseError,
                            row,
                            field,
                            format!("Could not parse {field} as JSON: {raw}"),
                        )
                        .with_fix(format!("Use JSON format: {JSON_LIST_EXAMPLE} or fix syntax"))
                        .with_value(value),
                    ),
                    Err(_) => {}
                }
            }
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 5. Cross-references
// ---------------------------------------------------------------------------

/// Task references into the client and task ID sets.
///
/// A reference check is suppressed while its target ID set is empty.
/// Unparsable `RequestedTaskIDs` are skipped; the JSON check reports them.
pub fn check_references(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let tasks = input.tasks;

    if !input.ids.clients.is_empty() {
        for (row, value) in tasks.column_cells(COL_CLIENT_ID) {
            if value.is_null() {
                continue;
            }
            let known = value.id_key().is_some_and(|k| input.ids.clients.contains(&k));
            if !known {
                findings.push(
                    Finding::new(
                        ErrorKind::InvalidReference,
                        row,
                        COL_CLIENT_ID,
                        format!("ClientID '{value}' not found in clients data"),
                    )
                    .with_fix("Use a valid ClientID from clients data")
                    .with_value(value),
                );
            }
        }
    }

    if !input.ids.tasks.is_empty() {
        for (row, value) in tasks.column_cells(COL_REQUESTED_TASK_IDS) {
            if value.is_blank() {
                continue;
            }
            let Ok(requested) = value.to_list() else {
                continue;
            };
            for task_id in requested {
                let known = task_id.id_key().is_some_and(|k| input.ids.tasks.contains(&k));
                if !known {
                    findings.push(
                        Finding::new(
                            ErrorKind::InvalidTaskReference,
                            row,
                            COL_REQUESTED_TASK_IDS,
                            format!("Referenced TaskID '{task_id}' not found"),
                        )
                        .with_fix("Use valid TaskIDs from tasks data")
                        .with_value(value),
                    );
                }
            }
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 6. Ranges and domains
// ---------------------------------------------------------------------------

/// Task duration bounds, then task priority domain.
pub fn check_ranges(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let tasks = input.tasks;

    for (row, value) in tasks.column_cells(COL_DURATION) {
        if value.is_blank() {
            continue;
        }
        // Non-numeric durations were reported by the numeric check.
        let Ok(duration) = value.to_number() else {
            continue;
        };
        if duration < DURATION_MIN {
            findings.push(
                Finding::new(
                    ErrorKind::OutOfRange,
                    row,
                    COL_DURATION,
                    format!("Duration must be at least 1: {value}"),
                )
                .with_fix("Set duration to 1 or higher")
                .with_value(value),
            );
        } else if duration > DURATION_SUSPICIOUS_ABOVE {
            findings.push(
                Finding::new(
                    ErrorKind::SuspiciousValue,
                    row,
                    COL_DURATION,
                    format!("Duration seems very high: {value}"),
                )
                .with_fix("Verify if this duration is correct")
                .with_value(value),
            );
        }
    }

    for (row, value) in tasks.column_cells(COL_PRIORITY) {
        if value.is_null() {
            continue;
        }
        let normalized = value.to_string().to_lowercase();
        if !VALID_PRIORITIES.contains(&normalized.as_str()) {
            findings.push(
                Finding::new(
                    ErrorKind::InvalidPriority,
                    row,
                    COL_PRIORITY,
                    format!("Invalid priority value: {value}"),
                )
                .with_fix("Use: high, medium, low, or 1-3")
                .with_value(value),
            );
        }
    }

    findings
}

// ---------------------------------------------------------------------------
// 7. Business rules
// ---------------------------------------------------------------------------

/// Worker overload (warning) and task self-dependency (critical).
pub fn check_business_rules(input: &ValidationInput<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (row, record) in input.workers.rows() {
        let max_load = cell(record, COL_MAX_LOAD);
        let current_load = cell(record, COL_CURRENT_LOAD);
        if let (Ok(max), Ok(current)) = (max_load.to_number(), current_load.to_number()) {
            if current > max {
                findings.push(
                    Finding::new(
                        ErrorKind::OverloadWarning,
                        row,
                        COL_CURRENT_LOAD,
                        format!("Worker overloaded: {current_load}/{max_load}"),
                    )
                    .with_fix("Reduce CurrentLoad or increase MaxLoad")
                    .with_value(current_load),
                );
            }
        }
    }

    for (row, record) in input.tasks.rows() {
        let deps = cell(record, COL_DEPENDENCIES);
        if deps.is_blank() {
            continue;
        }
        let task_id = cell(record, COL_TASK_ID);
        let Some(own) = task_id.id_key() else {
            continue;
        };
        let Ok(dependencies) = deps.to_list() else {
            continue;
        };
        if dependencies.iter().any(|d| d.id_key().as_ref() == Some(&own)) {
            findings.push(
                Finding::new(
                    ErrorKind::CircularDependency,
                    row,
                    COL_DEPENDENCIES,
                    format!("Task {task_id} cannot depend on itself"),
                )
                .with_fix("Remove self-reference from dependencies")
                .with_value(deps),
            );
        }
    }

    findings
}
