/// Library-level failures that are not validation findings.
///
/// Malformed cell values never produce a `CoreError`; they become findings.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}
