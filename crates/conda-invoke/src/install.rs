//! `conda install`, with a single retry as `conda create`
//!
//! Installing into a named environment that does not exist yet fails with
//! `EnvironmentLocationNotFound`. In that case the same command is re-run
//! once with the `create` verb. Whatever the second run returns is final.

use std::path::PathBuf;

use serde_json::Value;

use crate::command::{CondaCommand, Verb, install_command};
use crate::discovery::find_executable;
use crate::error::{Error, Result};
use crate::output::{interpret_install_output, is_already_installed};
use crate::runner::{CommandRunner, SystemRunner};

/// Parameters of an install
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallRequest {
    /// Package specifiers, appended last on the command line
    pub packages: Vec<String>,
    /// Explicit conda executable
    pub executable: Option<PathBuf>,
    /// Extra channels, passed in order
    pub channels: Vec<String>,
    /// Target environment name
    pub env_name: Option<String>,
    /// Additional arguments in shell syntax
    pub extra_args: Option<String>,
    /// Pass `--dry-run`
    pub dry_run: bool,
}

impl InstallRequest {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channels.push(channel.into());
        self
    }

    pub fn env_name(mut self, env_name: impl Into<String>) -> Self {
        self.env_name = Some(env_name.into());
        self
    }

    pub fn extra_args(mut self, extra_args: impl Into<String>) -> Self {
        self.extra_args = Some(extra_args.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Parsed output of one successful install or create run
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    pub exit_code: Option<i32>,
    pub output: Value,
    pub stderr: String,
}

/// What an install did
#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    /// Everything requested was already present
    Unchanged,
    /// Packages were installed (or the environment was created)
    Changed { output: Value, stderr: String },
}

impl InstallOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, InstallOutcome::Changed { .. })
    }
}

/// Install packages by running conda as a child process.
pub fn install(request: &InstallRequest) -> Result<InstallOutcome> {
    install_with(&SystemRunner, request)
}

/// Install packages through the given runner.
pub fn install_with<R: CommandRunner + ?Sized>(runner: &R, request: &InstallRequest) -> Result<InstallOutcome> {
    let executable = find_executable(request.executable.as_deref())?;
    let command = install_command(executable, request)?;

    match run_install_command(runner, &command) {
        Ok(result) if is_already_installed(&result.output) => Ok(InstallOutcome::Unchanged),
        Ok(result) => Ok(InstallOutcome::Changed {
            output: result.output,
            stderr: result.stderr,
        }),
        Err(Error::MissingEnvironment { message }) => {
            tracing::info!(
                env = request.env_name.as_deref().unwrap_or_default(),
                %message,
                "environment missing, retrying as create"
            );
            let create = command.with_verb(Verb::Create);
            let result = run_install_command(runner, &create)?;
            Ok(InstallOutcome::Changed {
                output: result.output,
                stderr: result.stderr,
            })
        }
        Err(e) => Err(e),
    }
}

/// Run one install/create command and classify its output.
pub fn run_install_command<R: CommandRunner + ?Sized>(runner: &R, command: &CondaCommand) -> Result<CommandResult> {
    let raw = runner.run(command)?;
    let output = interpret_install_output(command, &raw)?;
    Ok(CommandResult {
        exit_code: raw.exit_code,
        output,
        stderr: raw.stderr,
    })
}
