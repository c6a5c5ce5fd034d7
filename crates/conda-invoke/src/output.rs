//! Conda stdout cleaning and error classification
//!
//! Some conda versions (observed with 4.3.25) print line-delimited progress
//! records such as `{"fetch": ..., "progress": 0.5}` or `{"maxval": 10}` on
//! stdout ahead of the real `--json` payload. [`clean_stdout`] drops them.

use serde_json::Value;

use crate::command::CondaCommand;
use crate::error::{Error, Result};
use crate::runner::RawOutput;

/// Plain-text prefix mamba prints instead of JSON when the solve fails
pub const SOLVER_PROBLEMS_MARKER: &str = "Encountered problems while solving:";

/// Exception name attached to solver failures reported as plain text
pub const PACKAGES_NOT_FOUND_EXCEPTION: &str = "PackagesNotFoundError";

/// Exception name conda uses when `--name` points at no environment
pub const MISSING_ENVIRONMENT_EXCEPTION: &str = "EnvironmentLocationNotFound";

/// `message` conda reports when an install is a no-op
pub const ALREADY_INSTALLED_MESSAGE: &str = "All requested packages already installed.";

const PROGRESS_KEYS: [&str; 2] = ["progress", "maxval"];

/// Strip leading progress records from conda's stdout.
///
/// Lines are consumed from the top. The first line that parses as JSON and
/// is not a progress record is returned on its own. The first line that does
/// not parse stops the scan, and it is returned concatenated with everything
/// after it. If only progress records remain, the result is empty.
pub fn clean_stdout(stdout: &str) -> String {
    let mut lines = stdout.trim().split('\n').map(|line| line.replace('\0', ""));
    let mut skipped = 0usize;

    while let Some(line) = lines.next() {
        match serde_json::from_str::<Value>(&line) {
            Ok(value) if is_progress(&value) => skipped += 1,
            Ok(_) => {
                if skipped > 0 {
                    tracing::warn!(skipped, "discarded progress records from conda stdout");
                }
                return line;
            }
            Err(_) => {
                let mut rest = line;
                rest.extend(lines.by_ref());
                return rest;
            }
        }
    }

    String::new()
}

fn is_progress(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|record| PROGRESS_KEYS.iter().any(|key| record.contains_key(*key)))
}

/// Interpret the output of an install/create run.
///
/// Returns the parsed JSON payload on success, or the classified error.
pub fn interpret_install_output(command: &CondaCommand, raw: &RawOutput) -> Result<Value> {
    let stdout = clean_stdout(&raw.stdout);

    // https://github.com/mamba-org/mamba/issues/1802
    if stdout.starts_with(SOLVER_PROBLEMS_MARKER) {
        return Err(Error::KnownTool {
            message: stdout,
            exception_name: Some(PACKAGES_NOT_FOUND_EXCEPTION.to_string()),
        });
    }

    let command_error = |stdout: String| Error::CommandExecution {
        command: command.to_string(),
        exit_code: raw.exit_code,
        stdout,
        stderr: raw.stderr.clone(),
    };

    let output: Value = match serde_json::from_str(&stdout) {
        Ok(output) => output,
        Err(_) => return Err(command_error(stdout)),
    };

    if !raw.success() {
        if let Some(error) = output.get("error") {
            let message = text(error);
            let exception_name = output
                .get("exception_name")
                .and_then(Value::as_str)
                .map(str::to_string);

            if exception_name.as_deref() == Some(MISSING_ENVIRONMENT_EXCEPTION) {
                return Err(Error::MissingEnvironment { message });
            }
            return Err(Error::KnownTool {
                message,
                exception_name,
            });
        }
        return Err(command_error(stdout));
    }

    Ok(output)
}

/// `true` when a successful install payload says nothing was done
pub fn is_already_installed(output: &Value) -> bool {
    output.get("message").and_then(Value::as_str) == Some(ALREADY_INSTALLED_MESSAGE)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
