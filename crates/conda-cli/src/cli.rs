//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use conda_packages::PluginForm;

/// conda-provision - Install and list conda packages for automation
#[derive(Parser, Debug)]
#[command(name = "conda-provision")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (logs go to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install packages into a conda environment
    ///
    /// The environment is created when it does not exist yet.
    ///
    /// Examples:
    ///   conda-provision install git=2 numpy
    ///   conda-provision install -n aiida -c conda-forge aiida-core=2.1
    ///   conda-provision install -n aiida --extra-args "--override-channels" numpy
    Install {
        /// Package specifiers (`name` or `name=version`)
        #[arg(required = true)]
        packages: Vec<String>,

        /// Full path to the conda executable
        #[arg(long, env = "CONDA_PROVISION_EXE")]
        executable: Option<PathBuf>,

        /// Extra channels to use, in order
        #[arg(short = 'c', long = "channel")]
        channels: Vec<String>,

        /// Name of the environment (created if it does not exist)
        #[arg(short = 'n', long = "env", alias = "name")]
        env: Option<String>,

        /// Extra arguments passed to conda, in shell syntax
        #[arg(long, allow_hyphen_values = true)]
        extra_args: Option<String>,

        /// Report what would change without changing anything
        #[arg(long, alias = "dry-run")]
        check: bool,
    },

    /// List packages installed in a conda environment
    ///
    /// Examples:
    ///   conda-provision list -n base
    ///   conda-provision list -n base --regex '^python-'
    List {
        /// Name of the environment
        #[arg(short = 'n', long = "env", alias = "name")]
        env: String,

        /// List only packages matching this regular expression
        #[arg(long)]
        regex: Option<String>,

        /// Full path to the conda executable
        #[arg(long, env = "CONDA_PROVISION_EXE")]
        executable: Option<PathBuf>,
    },

    /// Compute the aiida environment package list from a config file
    ///
    /// Examples:
    ///   conda-provision packages --config vars.yml
    ///   conda-provision packages --config vars.toml --form list --extra jupyterlab
    Packages {
        /// YAML, TOML or JSON packages config
        #[arg(long)]
        config: PathBuf,

        /// Plugin configuration shape (map or list), overriding the config file
        #[arg(long)]
        form: Option<PluginForm>,

        /// Additional packages appended after the configured ones
        #[arg(long = "extra")]
        extra: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_install() {
        let cli = Cli::try_parse_from([
            "conda-provision",
            "install",
            "-n",
            "aiida",
            "-c",
            "conda-forge",
            "--channel",
            "bioconda",
            "--extra-args",
            "--override-channels",
            "--check",
            "numpy",
            "git=2",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Install {
                packages: vec!["numpy".to_string(), "git=2".to_string()],
                executable: None,
                channels: vec!["conda-forge".to_string(), "bioconda".to_string()],
                env: Some("aiida".to_string()),
                extra_args: Some("--override-channels".to_string()),
                check: true,
            }
        );
    }

    #[test]
    fn test_install_requires_packages() {
        assert!(Cli::try_parse_from(["conda-provision", "install", "-n", "aiida"]).is_err());
    }

    #[test]
    fn test_list_requires_env() {
        assert!(Cli::try_parse_from(["conda-provision", "list"]).is_err());
    }

    #[test]
    fn test_parse_packages_form() {
        let cli = Cli::try_parse_from([
            "conda-provision",
            "packages",
            "--config",
            "vars.yml",
            "--form",
            "list",
        ])
        .unwrap();

        match cli.command {
            Commands::Packages { form, config, extra } => {
                assert_eq!(form, Some(PluginForm::List));
                assert_eq!(config, PathBuf::from("vars.yml"));
                assert!(extra.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
