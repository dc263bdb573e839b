//! Data validation engine.
//!
//! Finding types, the individual checks, the ordered pipeline evaluator and
//! report aggregation. No I/O.

pub mod checks;
pub mod evaluator;
pub mod finding;
pub mod report;

pub use evaluator::validate;
pub use finding::{ErrorKind, Finding, Severity};
pub use report::ValidationReport;
