//! Canned conda `--json` payloads.

use serde_json::json;

/// Successful install that linked `numpy`
pub fn install_success() -> String {
    json!({
        "actions": {
            "LINK": [{"name": "numpy", "version": "1.24.3", "channel": "conda-forge"}],
            "PREFIX": "/opt/conda/envs/aiida"
        },
        "prefix": "/opt/conda/envs/aiida",
        "success": true
    })
    .to_string()
}

/// Install where nothing needed doing
pub fn already_installed() -> String {
    json!({
        "message": "All requested packages already installed.",
        "success": true
    })
    .to_string()
}

/// Error record for an install into a missing environment
pub fn missing_environment(env: &str) -> String {
    json!({
        "caused_by": "None",
        "error": format!("EnvironmentLocationNotFound: Not a conda environment: /opt/conda/envs/{env}"),
        "exception_name": "EnvironmentLocationNotFound",
        "exception_type": "<class 'conda.exceptions.EnvironmentLocationNotFound'>",
        "location": format!("/opt/conda/envs/{env}"),
        "message": format!("Not a conda environment: /opt/conda/envs/{env}")
    })
    .to_string()
}

/// Error record for unsatisfiable specs
pub fn packages_not_found(package: &str) -> String {
    json!({
        "error": format!("PackagesNotFoundError: The following packages are not available from current channels:\n\n  - {package}"),
        "exception_name": "PackagesNotFoundError",
        "packages": [package]
    })
    .to_string()
}

/// Progress records some conda versions print before the payload
pub fn progress_lines() -> String {
    [
        json!({"fetch": "numpy-1.24.3", "finished": false, "maxval": 1, "progress": 0.0}),
        json!({"fetch": "numpy-1.24.3", "finished": true, "maxval": 1, "progress": 1.0}),
    ]
    .iter()
    .map(|v| format!("{}\0\n", v))
    .collect()
}

/// `conda list --json` output with two packages
pub fn list_output() -> String {
    json!([
        {
            "base_url": "https://conda.anaconda.org/conda-forge",
            "build_number": 0,
            "build_string": "h12debd9_0",
            "channel": "conda-forge",
            "dist_name": "python-3.9.16-h12debd9_0",
            "name": "python",
            "platform": "linux-64",
            "version": "3.9.16"
        },
        {
            "base_url": "https://pypi.org/",
            "build_number": 0,
            "build_string": "pypi_0",
            "channel": "pypi",
            "dist_name": "aiida-core-2.1.2-pypi_0",
            "name": "aiida-core",
            "platform": "pypi",
            "version": "2.1.2"
        }
    ])
    .to_string()
}
