//! Conda invocation for conda-provision
//!
//! This crate runs the external `conda` executable (or a compatible one such
//! as `mamba`) to install and list packages. It handles:
//!
//! - Discovery of the executable from an explicit path or `PATH`
//! - Building `install`/`create`/`list` command lines
//! - Cleaning progress noise off `--json` stdout
//! - Classifying failures conda reports, and retrying an install into a
//!   missing environment once as a create
//!
//! Every operation is synchronous and runs at most two child processes.

pub mod command;
pub mod discovery;
pub mod error;
pub mod install;
pub mod list;
pub mod output;
pub mod runner;

pub use command::{CondaCommand, Verb};
pub use discovery::{DEFAULT_EXECUTABLE, find_executable};
pub use error::{Error, Result};
pub use install::{CommandResult, InstallOutcome, InstallRequest, install, install_with};
pub use list::{ListRequest, PackageRecord, list, list_with};
pub use output::clean_stdout;
pub use runner::{CommandRunner, RawOutput, SystemRunner};
