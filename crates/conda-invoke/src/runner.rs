//! Subprocess execution

use std::process::{Command, Stdio};

use crate::command::CondaCommand;
use crate::error::{Error, Result};

/// Captured result of one conda process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a conda command to completion and captures its output
pub trait CommandRunner {
    fn run(&self, command: &CondaCommand) -> Result<RawOutput>;
}

/// Runs commands as real child processes.
///
/// `Command::output` waits for the child and closes its pipes before
/// returning, on success and on error alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CondaCommand) -> Result<RawOutput> {
        tracing::debug!(command = %command, "running conda");

        let output = Command::new(&command.executable)
            .arg(command.verb.as_str())
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Io {
                command: command.to_string(),
                source,
            })?;

        let raw = RawOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(exit_code = ?raw.exit_code, "conda exited");
        Ok(raw)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &CondaCommand) -> Result<RawOutput> {
        (**self).run(command)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::command::Verb;

    #[test]
    fn test_system_runner_captures_streams() {
        // echo prints its argv back, verb first
        let command = CondaCommand::new("echo", Verb::List).arg("--json");
        let raw = SystemRunner.run(&command).unwrap();
        assert!(raw.success());
        assert_eq!(raw.stdout, "list --json\n");
        assert_eq!(raw.stderr, "");
    }

    #[test]
    fn test_system_runner_missing_executable() {
        let command = CondaCommand::new("/definitely/not/here/conda", Verb::List);
        let err = SystemRunner.run(&command).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
