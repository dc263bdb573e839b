//! Dataset kinds and their schemas.
//!
//! Each kind carries its schema as static data; checks look columns up here
//! instead of branching on dataset names.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{Record, RowIndex};
use crate::value::{CellValue, IdKey};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_CLIENT_ID: &str = "ClientID";
pub const COL_WORKER_ID: &str = "WorkerID";
pub const COL_TASK_ID: &str = "TaskID";
pub const COL_NAME: &str = "Name";
pub const COL_SKILLS: &str = "Skills";
pub const COL_MAX_LOAD: &str = "MaxLoad";
pub const COL_CURRENT_LOAD: &str = "CurrentLoad";
pub const COL_AVAILABILITY: &str = "Availability";
pub const COL_DURATION: &str = "Duration";
pub const COL_PRIORITY: &str = "Priority";
pub const COL_REQUESTED_TASK_IDS: &str = "RequestedTaskIDs";
pub const COL_DEPENDENCIES: &str = "Dependencies";

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Column roles for one dataset kind.
#[derive(Debug)]
pub struct DatasetSchema {
    /// Column that identifies a row; duplicates are reported.
    pub id_column: &'static str,
    /// Columns that must exist and hold a non-empty value in every row.
    pub required: &'static [&'static str],
    /// Columns whose values must coerce to non-negative numbers.
    pub numeric: &'static [&'static str],
    /// Columns expected to hold JSON-encoded lists.
    pub json_lists: &'static [&'static str],
}

pub const CLIENTS_SCHEMA: DatasetSchema = DatasetSchema {
    id_column: COL_CLIENT_ID,
    required: &[COL_CLIENT_ID, COL_NAME],
    numeric: &[],
    json_lists: &[],
};

pub const WORKERS_SCHEMA: DatasetSchema = DatasetSchema {
    id_column: COL_WORKER_ID,
    required: &[COL_WORKER_ID, COL_NAME, COL_SKILLS, COL_MAX_LOAD],
    numeric: &[COL_MAX_LOAD, COL_CURRENT_LOAD],
    json_lists: &[COL_SKILLS, COL_AVAILABILITY],
};

pub const TASKS_SCHEMA: DatasetSchema = DatasetSchema {
    id_column: COL_TASK_ID,
    required: &[COL_TASK_ID, COL_CLIENT_ID, COL_DURATION, COL_PRIORITY],
    numeric: &[COL_DURATION],
    json_lists: &[COL_REQUESTED_TASK_IDS, COL_DEPENDENCIES],
};

// ---------------------------------------------------------------------------
// DatasetKind
// ---------------------------------------------------------------------------

pub const KIND_CLIENTS: &str = "clients";
pub const KIND_WORKERS: &str = "workers";
pub const KIND_TASKS: &str = "tasks";

/// The three datasets the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Clients,
    Workers,
    Tasks,
}

impl DatasetKind {
    /// Pipeline visiting order.
    pub const ALL: [DatasetKind; 3] = [Self::Clients, Self::Workers, Self::Tasks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => KIND_CLIENTS,
            Self::Workers => KIND_WORKERS,
            Self::Tasks => KIND_TASKS,
        }
    }

    pub fn schema(&self) -> &'static DatasetSchema {
        match self {
            Self::Clients => &CLIENTS_SCHEMA,
            Self::Workers => &WORKERS_SCHEMA,
            Self::Tasks => &TASKS_SCHEMA,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset view
// ---------------------------------------------------------------------------

static NULL_CELL: CellValue = CellValue::Null;

/// Borrowed view of one dataset's rows together with its kind.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    pub kind: DatasetKind,
    pub records: &'a [Record],
}

impl<'a> Dataset<'a> {
    pub fn new(kind: DatasetKind, records: &'a [Record]) -> Self {
        Self { kind, records }
    }

    pub fn schema(&self) -> &'static DatasetSchema {
        self.kind.schema()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of the keys present in any row.
    pub fn columns(&self) -> BTreeSet<&'a str> {
        let records = self.records;
        records
            .iter()
            .flat_map(|r| r.keys().map(String::as_str))
            .collect()
    }

    /// Rows paired with their index. A row missing `column` reads as null.
    pub fn column_cells(
        &self,
        column: &'a str,
    ) -> impl Iterator<Item = (RowIndex, &'a CellValue)> + 'a {
        let records = self.records;
        records
            .iter()
            .enumerate()
            .map(move |(idx, record)| (idx as RowIndex, record.get(column).unwrap_or(&NULL_CELL)))
    }

    pub fn rows(&self) -> impl Iterator<Item = (RowIndex, &'a Record)> + 'a {
        let records = self.records;
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx as RowIndex, record))
    }

    /// Keys of every non-null value in the ID column.
    pub fn id_set(&self) -> HashSet<IdKey> {
        self.column_cells(self.schema().id_column)
            .filter_map(|(_, cell)| cell.id_key())
            .collect()
    }
}

/// Read a cell from a record, treating an absent key as null.
pub fn cell<'r>(record: &'r Record, column: &str) -> &'r CellValue {
    record.get(column).unwrap_or(&NULL_CELL)
}
