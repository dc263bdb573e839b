use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

/// Where the validation request is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// `-` selects stdin; anything else is a path.
impl From<&str> for InputSource {
    fn from(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Runner configuration from command-line arguments, falling back to
/// environment variables.
///
/// | Argument             | Env Var                    | Default |
/// |----------------------|----------------------------|---------|
/// | `INPUT`              | `COOKSHEET_INPUT`          | `-`     |
/// | `--pretty`           | `COOKSHEET_PRETTY`         | `true`  |
/// | `--fail-on-errors`   | `COOKSHEET_FAIL_ON_ERRORS` | `false` |
/// | `--log-format`       | `LOG_FORMAT`               | `text`  |
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "cooksheet-validate", version)]
#[command(about = "Validate CookSheet clients, workers and tasks data")]
pub struct RunnerConfig {
    /// Request document to read; `-` reads stdin
    #[arg(value_name = "INPUT", env = "COOKSHEET_INPUT", default_value = "-")]
    pub input: InputSource,

    /// Pretty-print the output JSON
    #[arg(
        long,
        env = "COOKSHEET_PRETTY",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub pretty: bool,

    /// Exit with status 2 when the data needs fixes
    #[arg(
        long,
        env = "COOKSHEET_FAIL_ON_ERRORS",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub fail_on_errors: bool,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<RunnerConfig, clap::Error> {
        RunnerConfig::try_parse_from(std::iter::once("cooksheet-validate").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(
            config,
            RunnerConfig {
                input: InputSource::Stdin,
                pretty: true,
                fail_on_errors: false,
                log_format: LogFormat::Text,
            }
        );
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "data/request.json",
            "--pretty",
            "no",
            "--fail-on-errors",
            "TRUE",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.input, InputSource::File(PathBuf::from("data/request.json")));
        assert!(!config.pretty);
        assert!(config.fail_on_errors);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(parse(&["--pretty", "maybe"]).is_err());
        assert!(parse(&["--log-format", "xml"]).is_err());
    }

    #[test]
    fn every_option_falls_back_to_an_env_var() {
        let command = RunnerConfig::command();
        let envs: Vec<_> = command
            .get_arguments()
            .filter_map(|arg| Some((arg.get_id().as_str(), arg.get_env()?.to_str()?)))
            .collect();
        assert_eq!(
            envs,
            vec![
                ("input", "COOKSHEET_INPUT"),
                ("pretty", "COOKSHEET_PRETTY"),
                ("fail_on_errors", "COOKSHEET_FAIL_ON_ERRORS"),
                ("log_format", "LOG_FORMAT"),
            ]
        );
    }

    #[test]
    fn dash_reads_stdin() {
        assert_eq!(InputSource::from("-"), InputSource::Stdin);
        assert_eq!(InputSource::from("in.json"), InputSource::File(PathBuf::from("in.json")));
    }
}
