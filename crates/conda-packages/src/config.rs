//! Packages configuration file loading
//!
//! A packages config carries everything [`crate::build`] needs:
//!
//! ```yaml
//! aiida_python_version: "3.9"
//! aiida_core_version: "2.1.2"
//! plugin_form: map
//! aiida_conda_code_plugins:
//!   quantumespresso:
//!     aiida_packages: [aiida-quantumespresso=4.1]
//! extra_packages: [jupyterlab]
//! ```
//!
//! YAML, TOML and JSON files are accepted. All three are read into a single
//! YAML value tree with mapping order intact, so map-form plugins keep the
//! order they were written in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::builder::build;
use crate::error::{Error, Result};
use crate::plugins::{PluginCollection, PluginForm};

/// Parsed packages configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackagesConfig {
    /// Python version pinned first in the list
    #[serde(alias = "aiida_python_version", deserialize_with = "scalar_string")]
    pub python_version: String,

    /// aiida-core version pinned second in the list
    #[serde(alias = "core_version", deserialize_with = "scalar_string")]
    pub aiida_core_version: String,

    /// Shape of `code_plugins`
    #[serde(default)]
    pub plugin_form: PluginForm,

    /// Raw plugin configuration, validated by [`PackagesConfig::plugins`].
    /// An explicit null is kept as `Some(Value::Null)` so it is rejected.
    #[serde(default, alias = "aiida_conda_code_plugins", deserialize_with = "present_value")]
    pub code_plugins: Option<Value>,

    /// Extra specifiers appended verbatim
    #[serde(default, alias = "add_packages")]
    pub extra_packages: Vec<String>,
}

impl PackagesConfig {
    /// Validate the raw plugin configuration against `plugin_form`.
    ///
    /// A missing `code_plugins` key means no plugins.
    pub fn plugins(&self) -> Result<PluginCollection> {
        match &self.code_plugins {
            Some(value) => PluginCollection::from_value(self.plugin_form, value),
            None => Ok(match self.plugin_form {
                PluginForm::Map => PluginCollection::Map(Vec::new()),
                PluginForm::List => PluginCollection::List(Vec::new()),
            }),
        }
    }

    /// Build the full package list, with `additional` appended after the
    /// configured extra packages.
    pub fn packages(&self, additional: &[String]) -> Result<Vec<String>> {
        let plugins = self.plugins()?;
        let mut extras = self.extra_packages.clone();
        extras.extend(additional.iter().cloned());
        Ok(build(
            &self.python_version,
            &self.aiida_core_version,
            &plugins,
            &extras,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(ConfigFormat::Yaml),
            Some("toml") => Some(ConfigFormat::Toml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Load a packages config from `path`, choosing the parser by extension.
pub fn load_config(path: &Path) -> Result<PackagesConfig> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| Error::UnsupportedConfigFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?format, "loading packages config");
    parse_config(&content, format, path)
}

fn parse_config(content: &str, format: ConfigFormat, path: &Path) -> Result<PackagesConfig> {
    let invalid = |message: String| Error::ConfigParse {
        path: PathBuf::from(path),
        message,
    };

    let value: Value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?,
        ConfigFormat::Toml => {
            let table: toml::Value = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
            serde_yaml::to_value(&table).map_err(|e| invalid(e.to_string()))?
        }
        ConfigFormat::Json => {
            let json: serde_json::Value =
                serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
            serde_yaml::to_value(&json).map_err(|e| invalid(e.to_string()))?
        }
    };

    serde_yaml::from_value(value).map_err(|e| invalid(e.to_string()))
}

/// Any value present under the key, null included
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Versions are often written unquoted (`python_version: 3.9`); accept numbers
/// and keep their textual form. Floats lose trailing zeros (`3.10` reads as
/// `3.1`), so quote such versions.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => {
            if n.is_f64() {
                tracing::warn!(version = %n, "unquoted float version, quote it to keep trailing zeros");
            }
            Ok(n.to_string())
        }
        other => Err(serde::de::Error::custom(format!(
            "expected a version string, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("vars.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("vars.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("vars.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("vars.ini")), None);
    }

    #[test]
    fn test_numeric_versions_accepted() {
        let config = parse_config(
            "python_version: 3.9\naiida_core_version: 2\n",
            ConfigFormat::Yaml,
            Path::new("vars.yaml"),
        )
        .unwrap();
        assert_eq!(config.python_version, "3.9");
        assert_eq!(config.aiida_core_version, "2");
    }

    #[test]
    fn test_missing_plugins_means_empty() {
        let config = parse_config(
            "python_version: '3.9'\naiida_core_version: '2.1'\nplugin_form: list\n",
            ConfigFormat::Yaml,
            Path::new("vars.yaml"),
        )
        .unwrap();
        assert_eq!(config.plugins().unwrap(), PluginCollection::List(Vec::new()));
    }

    #[test]
    fn test_null_plugins_kept_apart_from_missing() {
        let config = parse_config(
            "python_version: '3.9'\naiida_core_version: '2.1'\naiida_conda_code_plugins:\n",
            ConfigFormat::Yaml,
            Path::new("vars.yaml"),
        )
        .unwrap();
        assert_eq!(config.code_plugins, Some(Value::Null));
    }

    #[test]
    fn test_float_version_drops_trailing_zero() {
        let config = parse_config(
            "python_version: 3.10\naiida_core_version: '2.1'\n",
            ConfigFormat::Yaml,
            Path::new("vars.yaml"),
        )
        .unwrap();
        assert_eq!(config.python_version, "3.1");
    }

    #[test]
    fn test_missing_version_is_parse_error() {
        let err = parse_config(
            "aiida_core_version: '2.1'\n",
            ConfigFormat::Yaml,
            Path::new("vars.yaml"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
