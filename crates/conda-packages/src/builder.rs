//! Flat package list construction

use crate::plugins::PluginCollection;

/// Default name of the runtime package pinned first in every list
pub const DEFAULT_RUNTIME_PACKAGE: &str = "python";
/// Default name of the core package pinned second in every list
pub const DEFAULT_CORE_PACKAGE: &str = "aiida-core";

/// Package names used for the two leading pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub runtime_package: String,
    pub core_package: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
            core_package: DEFAULT_CORE_PACKAGE.to_string(),
        }
    }
}

/// Build the package list for the aiida environment with default package names.
///
/// The result is `python=<runtime_version>`, `aiida-core=<core_version>`, the
/// plugin specifiers in configuration order, then `extra_packages` as given.
pub fn build(
    runtime_version: &str,
    core_version: &str,
    plugins: &PluginCollection,
    extra_packages: &[String],
) -> Vec<String> {
    build_with(
        &BuildOptions::default(),
        runtime_version,
        core_version,
        plugins,
        extra_packages,
    )
}

/// Same as [`build`] with explicit runtime/core package names.
pub fn build_with(
    options: &BuildOptions,
    runtime_version: &str,
    core_version: &str,
    plugins: &PluginCollection,
    extra_packages: &[String],
) -> Vec<String> {
    let plugin_specifiers = plugins.specifiers();
    let mut output = Vec::with_capacity(2 + plugin_specifiers.len() + extra_packages.len());

    output.push(format!("{}={}", options.runtime_package, runtime_version));
    output.push(format!("{}={}", options.core_package, core_version));
    output.extend(plugin_specifiers);
    output.extend(extra_packages.iter().cloned());

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{ListPlugin, MapPlugin};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_without_plugins() {
        let packages = build("3.9", "2.1.2", &PluginCollection::default(), &[]);
        assert_eq!(packages, vec!["python=3.9", "aiida-core=2.1.2"]);
    }

    #[test]
    fn test_build_with_runtime_name() {
        let options = BuildOptions {
            runtime_package: "runtime".to_string(),
            ..BuildOptions::default()
        };
        let packages = build_with(&options, "1.0", "2.0", &PluginCollection::default(), &[]);
        assert_eq!(packages, vec!["runtime=1.0", "aiida-core=2.0"]);
    }

    #[test]
    fn test_build_extras_pass_through_unchanged() {
        let plugins = PluginCollection::List(vec![ListPlugin {
            plugin_package: "aiida-cp2k".to_string(),
            plugin_version: "2.0".to_string(),
        }]);
        let extras = vec!["  odd spec ".to_string(), "aiida-cp2k=1.0".to_string()];
        let packages = build("3.10", "2.4", &plugins, &extras);
        assert_eq!(
            packages,
            vec!["python=3.10", "aiida-core=2.4", "aiida-cp2k=2.0", "  odd spec ", "aiida-cp2k=1.0"]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let plugins = PluginCollection::Map(vec![MapPlugin {
            name: "qe".to_string(),
            aiida_packages: vec!["aiida-quantumespresso".to_string(), "qe=7.2".to_string()],
        }]);
        let extras = vec!["numpy".to_string()];
        let first = build("3.9", "2.1", &plugins, &extras);
        let second = build("3.9", "2.1", &plugins, &extras);
        assert_eq!(first, second);
    }
}
