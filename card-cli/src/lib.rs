//! # card-cli
//!
//! `card-bot` binary support: argument parsing, config loading and the [`CardBot`] runner that feeds
//! text commands through the handler chain.

pub mod cli;
pub mod logging_handler;
pub mod runner;

pub use card_plugin::AppConfig;
pub use cli::{load_config, Cli, Commands};
pub use logging_handler::LoggingHandler;
pub use runner::{run_repl, CardBot};
