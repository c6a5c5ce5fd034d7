//! [`FakeConda`] builder: a `conda` shell script in a temporary directory.
//!
//! Each sub-command (`install`, `create`, `list`) gets a canned stdout,
//! stderr, and exit code. Every invocation appends its arguments to a log
//! so tests can assert on the exact command lines that were run.
//!
//! Unix only: the script relies on `/bin/sh` and the executable bit.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Canned answer for one sub-command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl Response {
    /// Exit 0 with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// Exit 1 with the given stdout
    pub fn fail(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: 1,
            ..Self::default()
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

/// A temporary directory holding an executable `conda` script.
///
/// # Example
///
/// ```rust,no_run
/// use conda_test_utils::{FakeConda, Response};
///
/// let conda = FakeConda::new()
///     .on("install", Response::ok(r#"{"success": true}"#))
///     .build();
/// assert!(conda.path().is_file());
/// ```
pub struct FakeConda {
    temp_dir: TempDir,
    responses: Vec<(String, Response)>,
}

impl Default for FakeConda {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeConda {
    /// Create an empty fake; unknown sub-commands exit with code 97.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            responses: Vec::new(),
        }
    }

    /// Answer `verb` with `response`.
    pub fn on(mut self, verb: &str, response: Response) -> Self {
        self.responses.retain(|(v, _)| v != verb);
        self.responses.push((verb.to_string(), response));
        self
    }

    /// Write the script and response files to disk.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn build(self) -> Self {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!(
            "printf '%s\\n' \"$*\" >> '{}'\n",
            self.log_path().display()
        ));
        script.push_str("case \"$1\" in\n");

        for (verb, response) in &self.responses {
            let stdout_path = self.dir().join(format!("{verb}.stdout"));
            let stderr_path = self.dir().join(format!("{verb}.stderr"));
            fs::write(&stdout_path, &response.stdout)
                .unwrap_or_else(|e| panic!("FakeConda: failed to write {verb} stdout: {e}"));
            fs::write(&stderr_path, &response.stderr)
                .unwrap_or_else(|e| panic!("FakeConda: failed to write {verb} stderr: {e}"));

            script.push_str(&format!(
                "  {verb})\n    cat '{}'\n    cat '{}' >&2\n    exit {}\n    ;;\n",
                stdout_path.display(),
                stderr_path.display(),
                response.exit_code
            ));
        }

        script.push_str("  *)\n    echo \"unexpected sub-command: $1\" >&2\n    exit 97\n    ;;\nesac\n");

        fs::write(self.path(), script)
            .unwrap_or_else(|e| panic!("FakeConda: failed to write script: {e}"));
        make_executable(&self.path());
        self
    }

    /// Directory containing the script; usable as a `PATH` entry
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the `conda` script
    pub fn path(&self) -> PathBuf {
        self.dir().join("conda")
    }

    fn log_path(&self) -> PathBuf {
        self.dir().join("calls.log")
    }

    /// Argument lines of every invocation so far, verb first
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("FakeConda: failed to chmod {}: {e}", path.display()));
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
