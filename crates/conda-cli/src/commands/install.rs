//! Install command implementation

use std::path::PathBuf;

use conda_invoke::{InstallOutcome, InstallRequest, install};
use serde_json::{Value, json};

use crate::error::Result;

/// Install `packages`, creating the environment if needed.
///
/// Reports `{"changed": false}` when everything was already installed, and
/// `{"changed": true, "output": ..., "stderr": ...}` otherwise.
pub fn run_install(
    packages: Vec<String>,
    executable: Option<PathBuf>,
    channels: Vec<String>,
    env: Option<String>,
    extra_args: Option<String>,
    check: bool,
) -> Result<Value> {
    let request = InstallRequest {
        packages,
        executable,
        channels,
        env_name: env,
        extra_args,
        dry_run: check,
    };

    tracing::debug!(packages = ?request.packages, env = ?request.env_name, "install");
    Ok(report(install(&request)?))
}

fn report(outcome: InstallOutcome) -> Value {
    match outcome {
        InstallOutcome::Unchanged => json!({"changed": false}),
        InstallOutcome::Changed { output, stderr } => json!({
            "changed": true,
            "output": output,
            "stderr": stderr,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_unchanged() {
        assert_eq!(report(InstallOutcome::Unchanged), json!({"changed": false}));
    }

    #[test]
    fn test_report_changed() {
        let value = report(InstallOutcome::Changed {
            output: json!({"success": true}),
            stderr: "warn".to_string(),
        });
        assert_eq!(
            value,
            json!({"changed": true, "output": {"success": true}, "stderr": "warn"})
        );
    }
}
