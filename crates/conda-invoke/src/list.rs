//! `conda list` for a named environment

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::list_command;
use crate::discovery::find_executable;
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SystemRunner};

/// Parameters of a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Environment to list
    pub env_name: String,
    /// Only list packages matching this regular expression
    pub regex: Option<String>,
    /// Explicit conda executable
    pub executable: Option<PathBuf>,
}

impl ListRequest {
    pub fn new(env_name: impl Into<String>) -> Self {
        Self {
            env_name: env_name.into(),
            ..Self::default()
        }
    }

    pub fn regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }
}

/// One installed package as reported by `conda list --json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub channel: String,
    /// Remaining fields (`build_string`, `platform`, ...) kept as reported
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// List the packages of an environment by running conda as a child process.
pub fn list(request: &ListRequest) -> Result<Vec<PackageRecord>> {
    list_with(&SystemRunner, request)
}

/// List the packages of an environment through the given runner.
pub fn list_with<R: CommandRunner + ?Sized>(runner: &R, request: &ListRequest) -> Result<Vec<PackageRecord>> {
    let executable = find_executable(request.executable.as_deref())?;
    let command = list_command(executable, request);

    let raw = runner.run(&command)?;
    if !raw.success() {
        return Err(Error::CommandExecution {
            command: command.to_string(),
            exit_code: raw.exit_code,
            stdout: raw.stdout,
            stderr: raw.stderr,
        });
    }

    let output: Value = serde_json::from_str(&raw.stdout).map_err(|e| Error::MalformedOutput {
        message: e.to_string(),
        stdout: raw.stdout.clone(),
        stderr: raw.stderr.clone(),
    })?;

    // A missing environment yields an error record rather than a list
    let Value::Array(items) = output else {
        return Err(Error::EnvironmentNotFound {
            env: request.env_name.clone(),
            stdout: raw.stdout,
            stderr: raw.stderr,
        });
    };

    let records = items
        .into_iter()
        .map(serde_json::from_value::<PackageRecord>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::MalformedOutput {
            message: format!("unexpected package record: {}", e),
            stdout: raw.stdout.clone(),
            stderr: raw.stderr.clone(),
        })?;

    tracing::debug!(env = %request.env_name, count = records.len(), "listed packages");
    Ok(records)
}
