//! Plugin descriptors and their validation
//!
//! Plugin configuration arrives as loosely typed data (an Ansible-style
//! variable, a YAML/TOML/JSON file). It is accepted in one of two shapes,
//! chosen per deployment by [`PluginForm`]:
//!
//! - **map**: `{ <name>: { aiida_packages: [<specifier>, ...] }, ... }`
//! - **list**: `[ { plugin_package: <name>, plugin_version: <version> }, ... ]`
//!
//! [`PluginCollection::from_value`] checks the shape once at the boundary and
//! produces a typed collection, so the builder itself never sees malformed
//! input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Name of the configuration variable the plugins come from, used in messages
pub const PLUGINS_VAR: &str = "aiida_conda_code_plugins";

const AIIDA_PACKAGES: &str = "aiida_packages";
const PLUGIN_PACKAGE: &str = "plugin_package";
const PLUGIN_VERSION: &str = "plugin_version";

/// Which plugin configuration shape a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginForm {
    /// Mapping of plugin name to `{aiida_packages: [...]}`
    #[default]
    Map,
    /// Sequence of `{plugin_package, plugin_version}` records
    List,
}

impl FromStr for PluginForm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "map" | "dict" | "mapping" => Ok(PluginForm::Map),
            "list" | "sequence" => Ok(PluginForm::List),
            _ => Err(format!("unknown plugin form '{}' (expected map or list)", s)),
        }
    }
}

impl fmt::Display for PluginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginForm::Map => write!(f, "map"),
            PluginForm::List => write!(f, "list"),
        }
    }
}

/// A plugin contributing a list of ready-made specifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPlugin {
    /// Plugin name (the mapping key)
    pub name: String,
    /// Specifiers to install for this plugin, in order
    pub aiida_packages: Vec<String>,
}

/// A plugin pinned to a single package version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPlugin {
    pub plugin_package: String,
    pub plugin_version: String,
}

impl ListPlugin {
    /// The `package=version` specifier for this plugin
    pub fn specifier(&self) -> String {
        format!("{}={}", self.plugin_package, self.plugin_version)
    }
}

/// Validated plugin configuration in one of the two accepted shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginCollection {
    Map(Vec<MapPlugin>),
    List(Vec<ListPlugin>),
}

impl Default for PluginCollection {
    fn default() -> Self {
        PluginCollection::Map(Vec::new())
    }
}

impl PluginCollection {
    /// Validate a raw configuration value against the given form.
    ///
    /// Fails on the first offending entry; nothing is returned for a
    /// partially valid collection.
    pub fn from_value(form: PluginForm, value: &Value) -> Result<Self> {
        match form {
            PluginForm::Map => parse_map_form(value).map(PluginCollection::Map),
            PluginForm::List => parse_list_form(value).map(PluginCollection::List),
        }
    }

    /// Which form this collection was built from
    pub fn form(&self) -> PluginForm {
        match self {
            PluginCollection::Map(_) => PluginForm::Map,
            PluginCollection::List(_) => PluginForm::List,
        }
    }

    /// Number of plugin entries
    pub fn len(&self) -> usize {
        match self {
            PluginCollection::Map(plugins) => plugins.len(),
            PluginCollection::List(plugins) => plugins.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Specifiers contributed by the plugins, in configuration order
    pub fn specifiers(&self) -> Vec<String> {
        match self {
            PluginCollection::Map(plugins) => plugins
                .iter()
                .flat_map(|p| p.aiida_packages.iter().cloned())
                .collect(),
            PluginCollection::List(plugins) => plugins.iter().map(ListPlugin::specifier).collect(),
        }
    }
}

fn parse_map_form(value: &Value) -> Result<Vec<MapPlugin>> {
    let Value::Mapping(mapping) = value else {
        return Err(Error::InvalidArgumentType {
            expected: "a mapping".to_string(),
            actual: describe(value),
            context: PLUGINS_VAR.to_string(),
        });
    };

    let mut plugins = Vec::with_capacity(mapping.len());
    for (key, plugin) in mapping {
        let name = scalar_to_string(key).unwrap_or_else(|| render(key));

        let Value::Mapping(record) = plugin else {
            return Err(Error::InvalidArgumentType {
                expected: "a mapping of mappings".to_string(),
                actual: format!("item {}: {}", name, render(plugin)),
                context: PLUGINS_VAR.to_string(),
            });
        };

        let Some(packages) = record.get(AIIDA_PACKAGES) else {
            return Err(Error::MissingRequiredField {
                field: AIIDA_PACKAGES.to_string(),
                entry: format!("{}: {}", name, render(plugin)),
                context: PLUGINS_VAR.to_string(),
            });
        };

        let Value::Sequence(items) = packages else {
            return Err(Error::InvalidArgumentType {
                expected: format!("key {} to be a list", AIIDA_PACKAGES),
                actual: format!("{} for {}", render(packages), name),
                context: PLUGINS_VAR.to_string(),
            });
        };

        let aiida_packages = items
            .iter()
            .map(|item| {
                scalar_to_string(item).ok_or_else(|| Error::InvalidArgumentType {
                    expected: format!("{} entries to be strings", AIIDA_PACKAGES),
                    actual: format!("{} for {}", render(item), name),
                    context: PLUGINS_VAR.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        plugins.push(MapPlugin {
            name,
            aiida_packages,
        });
    }

    tracing::debug!(count = plugins.len(), "validated map-form plugins");
    Ok(plugins)
}

fn parse_list_form(value: &Value) -> Result<Vec<ListPlugin>> {
    let Value::Sequence(items) = value else {
        return Err(Error::InvalidArgumentType {
            expected: "a list".to_string(),
            actual: describe(value),
            context: PLUGINS_VAR.to_string(),
        });
    };

    let mut plugins = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Mapping(record) = item else {
            return Err(Error::InvalidArgumentType {
                expected: "a list of mappings".to_string(),
                actual: format!("item {}: {}", index, render(item)),
                context: PLUGINS_VAR.to_string(),
            });
        };

        let field = |key: &str| -> Result<String> {
            let Some(raw) = record.get(key) else {
                return Err(Error::MissingRequiredField {
                    field: key.to_string(),
                    entry: format!("{}: {}", index, render(item)),
                    context: PLUGINS_VAR.to_string(),
                });
            };
            scalar_to_string(raw).ok_or_else(|| Error::InvalidArgumentType {
                expected: format!("key {} to be a string", key),
                actual: format!("{} for item {}", render(raw), index),
                context: PLUGINS_VAR.to_string(),
            })
        };

        plugins.push(ListPlugin {
            plugin_package: field(PLUGIN_PACKAGE)?,
            plugin_version: field(PLUGIN_VERSION)?,
        });
    }

    tracing::debug!(count = plugins.len(), "validated list-form plugins");
    Ok(plugins)
}

/// Strings and numbers are accepted where a specifier is expected; YAML
/// happily reads `plugin_version: 2.1` as a float. A float renders without
/// trailing zeros, so `4.10` becomes `4.1`; quote such versions.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if n.is_f64() {
                tracing::warn!(value = %n, "unquoted float in plugin config, quote it to keep trailing zeros");
            }
            Some(n.to_string())
        }
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn describe(value: &Value) -> String {
    format!("{} {}", kind(value), render(value))
}

/// Compact single-line rendering of a value for diagnostics
fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}
