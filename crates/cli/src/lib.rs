//! Command-line runner for the CookSheet validation engine.
//!
//! Reads a validation request document, assesses it and renders the
//! assessment as JSON.

pub mod config;
pub mod input;
pub mod logging;

use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use cooksheet_core::readiness::ReadinessStatus;
use cooksheet_core::DataAssessment;

use config::RunnerConfig;

/// Exit status when `fail_on_errors` is set and the data needs fixes.
pub const EXIT_NEEDS_FIXES: u8 = 2;

/// Assessment stamped with run metadata.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub assessment: DataAssessment,
}

/// Result of one run: rendered output plus the exit status to use.
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub readiness: ReadinessStatus,
    pub exit_code: u8,
}

impl RunOutcome {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code)
    }
}

/// Load the request named by `config`, assess it and render the report.
pub async fn run(config: &RunnerConfig, run_id: Uuid) -> anyhow::Result<RunOutcome> {
    let request = input::load_request(&config.input).await?;
    tracing::info!(rows = request.total_rows(), "Assessing request");

    let report = RunReport {
        run_id,
        assessed_at: Utc::now(),
        assessment: request.assess(),
    };
    let readiness = report.assessment.readiness_status;

    tracing::info!(
        readiness = readiness.as_str(),
        score = report.assessment.data_quality_score,
        "Assessment complete"
    );

    let output = if config.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize assessment")?;

    let exit_code = if config.fail_on_errors && readiness == ReadinessStatus::NeedsFixes {
        EXIT_NEEDS_FIXES
    } else {
        0
    };

    Ok(RunOutcome {
        output,
        readiness,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;
    use crate::config::{InputSource, LogFormat};

    fn config_for(path: &std::path::Path, fail_on_errors: bool) -> RunnerConfig {
        RunnerConfig {
            input: InputSource::File(path.to_path_buf()),
            pretty: false,
            fail_on_errors,
            log_format: LogFormat::Text,
        }
    }

    fn request_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    const BAD_TASKS: &str =
        r#"{"tasks_data": [{"TaskID": "T1", "ClientID": "C1", "Duration": 0, "Priority": "low"}]}"#;

    #[tokio::test]
    async fn renders_flattened_assessment() {
        let file = request_file(BAD_TASKS);
        let run_id = Uuid::now_v7();
        let outcome = run(&config_for(file.path(), false), run_id).await.unwrap();

        let v: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(v["run_id"], run_id.to_string());
        assert!(v["assessed_at"].is_string());
        assert_eq!(v["readiness_status"], "needs_fixes");
        assert_eq!(v["validation_result"]["total_errors"], 1);
        assert_eq!(outcome.exit_code, 0);
    }

    #[tokio::test]
    async fn fail_on_errors_sets_exit_status() {
        let file = request_file(BAD_TASKS);
        let outcome = run(&config_for(file.path(), true), Uuid::now_v7()).await.unwrap();
        assert_matches!(outcome.readiness, ReadinessStatus::NeedsFixes);
        assert_eq!(outcome.exit_code, EXIT_NEEDS_FIXES);
    }

    #[tokio::test]
    async fn clean_request_exits_zero_even_when_strict() {
        let file = request_file(r#"{"clients_data": [{"ClientID": "C1", "Name": "Acme"}]}"#);
        let outcome = run(&config_for(file.path(), true), Uuid::now_v7()).await.unwrap();
        assert_eq!(outcome.readiness, ReadinessStatus::ProductionReady);
        assert_eq!(outcome.exit_code, 0);
    }
}
