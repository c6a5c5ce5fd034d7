//! Package list builder for conda-provision
//!
//! Turns a Python version, an aiida-core version, plugin descriptors and a
//! list of extra packages into the flat list of conda specifiers installed
//! into the `aiida` environment.
//!
//! Plugin configuration is validated once, at the boundary, by
//! [`PluginCollection::from_value`]; [`build`] itself is a pure function.

pub mod builder;
pub mod config;
pub mod error;
pub mod plugins;

pub use builder::{BuildOptions, build, build_with};
pub use config::{PackagesConfig, load_config};
pub use error::{Error, Result};
pub use plugins::{ListPlugin, MapPlugin, PluginCollection, PluginForm};
