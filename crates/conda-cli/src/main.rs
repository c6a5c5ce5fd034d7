//! conda-provision CLI
//!
//! Runs one conda operation per invocation and prints a single JSON report
//! on stdout for the calling automation. Diagnostics go to stderr.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();

    // Setup tracing if verbose; stdout is reserved for the JSON report
    if cli.verbose {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("Verbose mode enabled");
    }

    match execute_command(cli.command) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            println!("{}", e.report());
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn execute_command(cmd: Commands) -> Result<serde_json::Value> {
    match cmd {
        Commands::Install {
            packages,
            executable,
            channels,
            env,
            extra_args,
            check,
        } => commands::run_install(packages, executable, channels, env, extra_args, check),
        Commands::List {
            env,
            regex,
            executable,
        } => commands::run_list(env, regex, executable),
        Commands::Packages {
            config,
            form,
            extra,
        } => commands::run_packages(&config, form, &extra),
    }
}
