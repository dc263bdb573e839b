//! Cell values and the coercion helpers the checks build on.
//!
//! Every coercion returns a `Result`; whether a failure becomes a finding or
//! is skipped is decided by the calling check.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a cell could not be read as the requested shape.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    #[error("value is missing")]
    Missing,

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON list")]
    NotAList,
}

// ---------------------------------------------------------------------------
// CellValue
// ---------------------------------------------------------------------------

/// A single dynamically-typed cell.
///
/// `List` holds cells that arrive already structured (a JSON array rather than
/// a JSON-encoded string). JSON objects are kept as their compact text.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<CellValue>),
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            obj @ Value::Object(_) => Self::String(obj.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null or the empty string. Whitespace-only strings are not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce the cell to a float.
    ///
    /// Numeric strings are accepted after trimming surrounding whitespace.
    /// Booleans coerce to `1.0` / `0.0`.
    pub fn to_number(&self) -> Result<f64, CoercionError> {
        match self {
            Self::Null => Err(CoercionError::Missing),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => n
                .as_f64()
                .ok_or_else(|| CoercionError::NotNumeric(n.to_string())),
            Self::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoercionError::NotNumeric(s.clone())),
            Self::List(_) => Err(CoercionError::NotNumeric(self.to_string())),
        }
    }

    /// Read the cell as a list of items.
    ///
    /// Strings are parsed as JSON; structured list cells are returned as-is.
    pub fn to_list(&self) -> Result<Vec<CellValue>, CoercionError> {
        match self {
            Self::Null => Err(CoercionError::Missing),
            Self::String(s) => parse_json_list(s),
            Self::List(items) => Ok(items.clone()),
            _ => Err(CoercionError::NotAList),
        }
    }

    /// Key used for ID-set membership and duplicate grouping.
    ///
    /// Integral floats share a key with the equivalent integer so `1` and
    /// `1.0` identify the same row. Null and list cells have no key.
    pub fn id_key(&self) -> Option<IdKey> {
        match self {
            Self::Null | Self::List(_) => None,
            Self::Bool(b) => Some(IdKey::Bool(*b)),
            Self::Number(n) => Some(IdKey::Number(canonical_number(n))),
            Self::String(s) => Some(IdKey::Text(s.clone())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                let json = Value::Array(items.iter().map(to_json).collect());
                write!(f, "{json}")
            }
        }
    }
}

fn to_json(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Number(n) => Value::Number(n.clone()),
        CellValue::String(s) => Value::String(s.clone()),
        CellValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
    }
}

// ---------------------------------------------------------------------------
// ID keys
// ---------------------------------------------------------------------------

/// Hashable identity of an ID cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdKey {
    Bool(bool),
    Number(String),
    Text(String),
}

fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON lists
// ---------------------------------------------------------------------------

/// Parse `raw` as a JSON document that must be a list.
///
/// Distinguishes text that is not JSON at all (`InvalidJson`) from valid JSON
/// of the wrong shape (`NotAList`).
pub fn parse_json_list(raw: &str) -> Result<Vec<CellValue>, CoercionError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok(items.into_iter().map(CellValue::from).collect()),
        _ => Err(CoercionError::NotAList),
    }
}
