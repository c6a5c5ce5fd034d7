//! Packages command implementation

use std::path::Path;

use conda_packages::{PluginForm, load_config};
use serde_json::{Value, json};

use crate::error::Result;

/// Build the package list described by the config file at `config`.
pub fn run_packages(config: &Path, form: Option<PluginForm>, extra: &[String]) -> Result<Value> {
    let mut config = load_config(config)?;
    if let Some(form) = form {
        config.plugin_form = form;
    }

    let packages = config.packages(extra)?;
    tracing::debug!(count = packages.len(), form = %config.plugin_form, "built package list");

    Ok(json!({
        "changed": false,
        "packages": packages,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_packages_with_form_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.yml");
        fs::write(
            &path,
            "python_version: '3.9'\naiida_core_version: '2.1'\ncode_plugins:\n  - plugin_package: aiida-cp2k\n    plugin_version: '2.0'\n",
        )
        .unwrap();

        let report = run_packages(&path, Some(PluginForm::List), &["pip".to_string()]).unwrap();
        assert_eq!(
            report["packages"],
            json!(["python=3.9", "aiida-core=2.1", "aiida-cp2k=2.0", "pip"])
        );
    }

    #[test]
    fn test_run_packages_shape_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.yml");
        fs::write(
            &path,
            "python_version: '3.9'\naiida_core_version: '2.1'\ncode_plugins:\n  - plugin_package: aiida-cp2k\n    plugin_version: '2.0'\n",
        )
        .unwrap();

        let err = run_packages(&path, None, &[]).unwrap_err();
        assert!(err.to_string().contains("requires a mapping"));
    }
}
