//! Conda command lines
//!
//! A [`CondaCommand`] is the executable, the sub-command verb, and the
//! remaining arguments. Keeping the verb separate lets an install be re-run
//! as a create with every other argument untouched.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::install::InstallRequest;
use crate::list::ListRequest;

/// Conda sub-command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Install,
    Create,
    List,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Install => "install",
            Verb::Create => "create",
            Verb::List => "list",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built conda invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondaCommand {
    pub executable: PathBuf,
    pub verb: Verb,
    pub args: Vec<String>,
}

impl CondaCommand {
    pub fn new(executable: impl Into<PathBuf>, verb: Verb) -> Self {
        Self {
            executable: executable.into(),
            verb,
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The same command with a different verb
    pub fn with_verb(&self, verb: Verb) -> Self {
        Self {
            verb,
            ..self.clone()
        }
    }

    /// Full argument vector, executable first
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        argv.push(self.executable.display().to_string());
        argv.push(self.verb.as_str().to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for CondaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// `conda install --yes --json [--name ENV] [--dry-run] [--channel C]... [EXTRA]... PKG...`
pub fn install_command(executable: impl Into<PathBuf>, request: &InstallRequest) -> Result<CondaCommand> {
    let mut command = CondaCommand::new(executable, Verb::Install).args(["--yes", "--json"]);

    if let Some(env) = request.env_name.as_deref().filter(|e| !e.is_empty()) {
        command = command.args(["--name", env]);
    }

    if request.dry_run {
        command = command.arg("--dry-run");
    }

    for channel in &request.channels {
        command = command.args(["--channel", channel.as_str()]);
    }

    if let Some(extra) = request.extra_args.as_deref().filter(|e| !e.is_empty()) {
        let words = shlex::split(extra).ok_or_else(|| Error::InvalidExtraArgs {
            args: extra.to_string(),
        })?;
        command = command.args(words);
    }

    Ok(command.args(request.packages.iter().cloned()))
}

/// `conda list --json --name ENV [REGEX]`
pub fn list_command(executable: impl Into<PathBuf>, request: &ListRequest) -> CondaCommand {
    let command = CondaCommand::new(executable, Verb::List).args(["--json", "--name", request.env_name.as_str()]);

    match request.regex.as_deref().filter(|r| !r.is_empty()) {
        Some(regex) => command.arg(regex),
        None => command,
    }
}
