//! CookSheet data validation engine.
//!
//! Validates client, worker and task datasets and derives a quality score,
//! readiness status and auto-fix suggestions from the resulting report, plus
//! data-insight suggestions from the datasets themselves.
//! Pure logic; callers handle parsing and transport.

pub mod assessment;
pub mod auto_fix;
pub mod dataset;
pub mod error;
pub mod quality_gate;
pub mod readiness;
pub mod suggestions;
pub mod types;
pub mod validation;
pub mod value;

pub use assessment::{assess, DataAssessment, ValidationRequest};
pub use error::CoreError;
pub use types::{Record, RowIndex};
pub use validation::{validate, ErrorKind, Finding, Severity, ValidationReport};
pub use value::CellValue;
