//! CLI parser and config loading.

use std::path::PathBuf;

use anyhow::{Context, Result};
use card_plugin::AppConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "card-bot")]
#[command(about = "Website card bot: resolve a keyword and send its card through GeWe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Plugin config file (overrides CARD_CONFIG_PATH; created with defaults if missing).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send the card for one keyword, as if `card <keyword>` had been received.
    Send {
        /// Recipient wxid.
        #[arg(short, long)]
        to: Option<String>,
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },
    /// Read commands from stdin, one per line, and print replies.
    Repl {
        /// Recipient wxid for every card.
        #[arg(short, long)]
        to: Option<String>,
    },
    /// List configured sites with their resolved card fields.
    Sites,
    /// Print the plugin help page.
    HelpText,
}

/// Loads AppConfig from env and the plugin config file; `config` overrides CARD_CONFIG_PATH.
pub fn load_config(config: Option<PathBuf>) -> Result<AppConfig> {
    AppConfig::load(config).context("Load card plugin config (CARD_CONFIG_PATH / config.json)")
}
