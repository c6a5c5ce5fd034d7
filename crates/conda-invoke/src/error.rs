//! Error types for conda invocations

/// Result type alias for conda operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating, running, or interpreting conda
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither the explicit executable nor a PATH lookup resolved
    #[error("Conda executable not found: {searched}")]
    ExecutableNotFound {
        /// The name(s) that were searched for
        searched: String,
    },

    /// `extra_args` could not be split into shell words
    #[error("Invalid extra arguments (unbalanced quotes?): {args}")]
    InvalidExtraArgs { args: String },

    /// The executable could not be spawned at all
    #[error("Failed to run '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but its output was unusable, or it failed without a
    /// structured error payload
    #[error("Error running command: {}", command_failure_message(.command, .stdout, .stderr))]
    CommandExecution {
        /// Full command line
        command: String,
        /// Exit code, if the process was not killed by a signal
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The target environment does not exist; install may be retried as create
    #[error("{message}")]
    MissingEnvironment { message: String },

    /// Conda reported a failure it classified itself
    #[error("{message}")]
    KnownTool {
        message: String,
        /// Conda's exception class name (e.g. `PackagesNotFoundError`)
        exception_name: Option<String>,
    },

    /// `conda list` printed something that is not JSON
    #[error("stdout not JSON: {message}")]
    MalformedOutput {
        message: String,
        stdout: String,
        stderr: String,
    },

    /// `conda list` returned an error record instead of a package list
    #[error("Environment not found: {env}")]
    EnvironmentNotFound {
        env: String,
        stdout: String,
        stderr: String,
    },
}

impl Error {
    /// Conda's exception class name, where one is known
    pub fn exception_name(&self) -> Option<&str> {
        match self {
            Error::KnownTool { exception_name, .. } => exception_name.as_deref(),
            Error::MissingEnvironment { .. } => Some(crate::output::MISSING_ENVIRONMENT_EXCEPTION),
            _ => None,
        }
    }
}

fn command_failure_message(command: &str, stdout: &str, stderr: &str) -> String {
    let mut msg = format!("'{}' ", command);
    if !stdout.trim().is_empty() {
        msg.push_str(&format!(", stdout: {}.", stdout));
    }
    if !stderr.trim().is_empty() {
        msg.push_str(&format!(", stderr: {}.", stderr));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_execution_message_omits_empty_streams() {
        let err = Error::CommandExecution {
            command: "conda install --yes --json numpy".to_string(),
            exit_code: Some(1),
            stdout: "  ".to_string(),
            stderr: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error running command: 'conda install --yes --json numpy' , stderr: boom."
        );
    }

    #[test]
    fn test_command_execution_message_with_both_streams() {
        let err = Error::CommandExecution {
            command: "conda list".to_string(),
            exit_code: None,
            stdout: "garbage".to_string(),
            stderr: "warn".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error running command: 'conda list' , stdout: garbage., stderr: warn."
        );
    }

    #[test]
    fn test_exception_name() {
        let err = Error::KnownTool {
            message: "nope".to_string(),
            exception_name: Some("PackagesNotFoundError".to_string()),
        };
        assert_eq!(err.exception_name(), Some("PackagesNotFoundError"));
        assert_eq!(
            Error::ExecutableNotFound {
                searched: "conda".to_string()
            }
            .exception_name(),
            None
        );
    }
}
