use anyhow::Context;
use tokio::io::AsyncReadExt;

use cooksheet_core::ValidationRequest;

use crate::config::InputSource;

/// Read and parse the validation request document.
pub async fn load_request(source: &InputSource) -> anyhow::Result<ValidationRequest> {
    let raw = match source {
        InputSource::Stdin => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read request from stdin")?;
            buf
        }
        InputSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
    };

    let request = ValidationRequest::from_json_str(&raw)
        .context("Request is not a valid validation document")?;
    tracing::debug!(
        clients = request.clients_data.len(),
        workers = request.workers_data.len(),
        tasks = request.tasks_data.len(),
        "Loaded validation request"
    );
    Ok(request)
}
