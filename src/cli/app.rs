//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{list, shell, tui};
use crate::domain::ContactStore;
use crate::storage::{Config, Seed};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(author, version, about = "Add, filter and delete contacts in a terminal phonebook")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// JSON file with the initial contacts (replaces the built-in list)
    #[arg(long, global = true, env = "PHONEBOOK_SEED")]
    pub seed: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "PHONEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive phonebook (default)
    Tui,

    /// Read phonebook commands from stdin, one per line
    Shell,

    /// Print the initial contacts
    List {
        /// Show only names containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Phonebook starting");
    if let Some(path) = &cli.config {
        output.verbose_ctx("config", &format!("Loaded {}", path.display()));
    }

    let seed_path = cli.seed.as_deref().or(config.seed.as_deref());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run(&output, load_store(&output, seed_path)?, &config)?,
        Commands::Shell => shell::run(&output, load_store(&output, seed_path)?)?,
        Commands::List { filter } => {
            list::run(&output, load_store(&output, seed_path)?, filter.as_deref())?
        }
        Commands::Config => show_config(&output, &config, cli.config.as_deref())?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Seeds a fresh store from a file or the built-in contacts
fn load_store(output: &Output, seed_path: Option<&Path>) -> Result<ContactStore> {
    let seed = Seed::load(seed_path)?;
    output.verbose_ctx("seed", &format!("{} contacts from {}", seed.len(), seed.source()));
    Ok(seed.into_store())
}

/// Prints the effective configuration
fn show_config(output: &Output, config: &Config, explicit: Option<&Path>) -> Result<()> {
    let path = explicit.map(|p| p.to_path_buf()).or_else(Config::default_path);
    let path_str = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path_str,
            "config": config,
        }));
    } else {
        println!("# {}", path_str);
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
