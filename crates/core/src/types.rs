use std::collections::BTreeMap;

use crate::value::CellValue;

/// Zero-based position of a row within its dataset. `-1` marks a
/// dataset-level finding.
pub type RowIndex = i64;

/// Row index used for findings that concern a whole dataset.
pub const DATASET_LEVEL_ROW: RowIndex = -1;

/// One row of a dataset: column name to cell value.
pub type Record = BTreeMap<String, CellValue>;
