//! Error types for conda-cli

use serde_json::{Value, json};

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from conda-invoke
    #[error(transparent)]
    Invoke(#[from] conda_invoke::Error),

    /// Error from conda-packages
    #[error(transparent)]
    Packages(#[from] conda_packages::Error),

    /// Result serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Failure report for the orchestrator: `{"failed": true, "msg": ...}`
    /// plus whatever diagnostics the error carries.
    pub fn report(&self) -> Value {
        let mut report = json!({
            "failed": true,
            "msg": self.to_string(),
        });

        let CliError::Invoke(error) = self else {
            return report;
        };

        if let Some(name) = error.exception_name() {
            report["exception_name"] = json!(name);
        }

        use conda_invoke::Error;
        match error {
            Error::CommandExecution {
                command,
                exit_code,
                stdout,
                stderr,
            } => {
                report["cmd"] = json!(command);
                report["rc"] = json!(exit_code);
                report["stdout"] = json!(stdout);
                report["stderr"] = json!(stderr);
            }
            Error::MalformedOutput { stdout, stderr, .. }
            | Error::EnvironmentNotFound { stdout, stderr, .. } => {
                report["stdout"] = json!(stdout);
                report["stderr"] = json!(stderr);
            }
            _ => {}
        }

        report
    }
}
