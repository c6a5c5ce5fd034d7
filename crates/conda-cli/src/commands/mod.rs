//! Command implementations for conda-cli
//!
//! Each command returns the JSON report printed on stdout.

pub mod install;
pub mod list;
pub mod packages;

pub use install::run_install;
pub use list::run_list;
pub use packages::run_packages;
