//! CLI end-to-end tests that invoke the compiled `conda-provision` binary
//! against a fake conda script.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn provision() -> Command {
    let mut cmd = Command::cargo_bin("conda-provision").unwrap();
    cmd.env_remove("CONDA_PROVISION_EXE");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

#[test]
fn test_help_exits_zero() {
    provision()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("packages"));
}

#[test]
fn test_packages_from_yaml_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("vars.yml");
    fs::write(
        &config,
        r#"
aiida_python_version: "3.9"
aiida_core_version: "2.1.2"
aiida_conda_code_plugins:
  quantumespresso:
    aiida_packages: [aiida-quantumespresso=4.1, qe=6.8]
extra_packages: [jupyterlab]
"#,
    )
    .unwrap();

    let output = provision()
        .args(["packages", "--config"])
        .arg(&config)
        .args(["--extra", "pip"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(
        report["packages"],
        serde_json::json!([
            "python=3.9",
            "aiida-core=2.1.2",
            "aiida-quantumespresso=4.1",
            "qe=6.8",
            "jupyterlab",
            "pip"
        ])
    );
}

#[test]
fn test_packages_invalid_config_fails_with_report() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("vars.yml");
    fs::write(
        &config,
        "python_version: '3.9'\naiida_core_version: '2.1'\ncode_plugins: not-a-mapping\n",
    )
    .unwrap();

    let output = provision()
        .args(["packages", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["failed"], Value::Bool(true));
    assert!(report["msg"].as_str().unwrap().contains("aiida_conda_code_plugins"));
}

#[cfg(unix)]
mod with_fake_conda {
    use super::*;
    use conda_test_utils::{FakeConda, Response, payloads};

    #[test]
    fn test_install_reports_changed() {
        let conda = FakeConda::new()
            .on("install", Response::ok(payloads::install_success()))
            .build();

        let output = provision()
            .args(["install", "-n", "aiida", "--executable"])
            .arg(conda.path())
            .args(["numpy"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let report = stdout_json(&output);
        assert_eq!(report["changed"], Value::Bool(true));
        assert_eq!(report["output"]["success"], Value::Bool(true));
    }

    #[test]
    fn test_install_unchanged_via_env_executable() {
        let conda = FakeConda::new()
            .on("install", Response::ok(payloads::already_installed()))
            .build();

        let output = provision()
            .env("CONDA_PROVISION_EXE", conda.path())
            .args(["install", "--check", "numpy"])
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(stdout_json(&output), serde_json::json!({"changed": false}));
        assert_eq!(conda.calls(), vec!["install --yes --json --dry-run numpy"]);
    }

    #[test]
    fn test_install_creates_missing_environment() {
        let conda = FakeConda::new()
            .on("install", Response::fail(payloads::missing_environment("aiida")))
            .on("create", Response::ok(payloads::install_success()))
            .build();

        let output = provision()
            .args(["install", "-n", "aiida", "--executable"])
            .arg(conda.path())
            .arg("python=3.9")
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(conda.calls().len(), 2);
    }

    #[test]
    fn test_install_known_error_fails() {
        let conda = FakeConda::new()
            .on("install", Response::fail(payloads::packages_not_found("foo")))
            .build();

        let output = provision()
            .args(["install", "--executable"])
            .arg(conda.path())
            .arg("foo")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let report = stdout_json(&output);
        assert_eq!(report["failed"], Value::Bool(true));
        assert_eq!(report["exception_name"], "PackagesNotFoundError");
    }

    #[test]
    fn test_list_reports_packages() {
        let conda = FakeConda::new()
            .on("list", Response::ok(payloads::list_output()))
            .build();

        let output = provision()
            .args(["list", "-n", "aiida", "--regex", "^python", "--executable"])
            .arg(conda.path())
            .output()
            .unwrap();

        assert!(output.status.success());
        let report = stdout_json(&output);
        assert_eq!(report["rc"], 0);
        assert_eq!(report["output"][0]["name"], "python");
        assert_eq!(report["output"][1]["channel"], "pypi");
        assert_eq!(conda.calls(), vec!["list --json --name aiida ^python"]);
    }

    #[test]
    fn test_list_missing_environment() {
        let conda = FakeConda::new()
            .on("list", Response::ok(payloads::missing_environment("ghost")))
            .build();

        let output = provision()
            .args(["list", "-n", "ghost", "--executable"])
            .arg(conda.path())
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let report = stdout_json(&output);
        assert_eq!(report["msg"], "Environment not found: ghost");
    }
}
