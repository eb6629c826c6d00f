//! opforge CLI — resolves which native kernel sources get compiled for the
//! current (or a pinned) environment.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "opforge", version, about = "Native kernel build resolution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the build descriptor for the inference core kernel set
    Resolve {
        /// Pinned environment facts (TOML); detected live if omitted
        #[arg(long)]
        facts: Option<PathBuf>,
        /// Requested target architecture generation (repeatable)
        #[arg(long = "arch")]
        archs: Vec<u32>,
        /// Working directory to resolve from (default: current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Prefix mode (auto, in-tree, packaging)
        #[arg(long, default_value = "auto")]
        mode: String,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check environment compatibility and print diagnostics
    Doctor {
        /// Pinned environment facts (TOML); detected live if omitted
        #[arg(long)]
        facts: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(compatible) => {
            if !compatible {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}

/// Returns whether the compatibility gate passed; warnings alone never fail.
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Resolve {
            facts,
            archs,
            cwd,
            mode,
            format,
        } => {
            let cwd = match cwd {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            commands::resolve::run(facts.as_deref(), &archs, &cwd, &mode, &format)
        }
        Commands::Doctor { facts } => {
            let cwd = std::env::current_dir()?;
            commands::doctor::run(facts.as_deref(), &cwd)?;
            Ok(true)
        }
    }
}
