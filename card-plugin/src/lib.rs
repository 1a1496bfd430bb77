//! # card-plugin
//!
//! Resolves a keyword to a configured website, compiles it into an appmsg card and delivers the
//! card through the GeWe gateway.
//!
//! ## Modules
//!
//! - [`site`] – SiteDescriptor, SiteEntry, SiteRegistry
//! - [`logo`] – built-in brand logo table and logo inference
//! - [`resolver`] – exact then first-match fuzzy keyword resolution
//! - [`appmsg`] – appmsg XML compiler
//! - [`gewe`] – delivery client for `/message/postAppMsg`
//! - [`command`] – `card <keyword>` / `卡片 <keyword>` parsing
//! - [`handler`] – CardHandler, the request orchestrator
//! - [`config`] – plugin config file and env layer

pub mod appmsg;
pub mod command;
pub mod config;
pub mod error;
pub mod gewe;
pub mod handler;
pub mod logo;
pub mod resolver;
pub mod site;

#[cfg(test)]
mod resolver_test;

pub use appmsg::{compile, escape_xml, CardPayload, CompileError};
pub use command::CardCommand;
pub use config::{ApiCredentials, AppConfig, PluginConfig};
pub use error::{PluginError, Result};
pub use gewe::{mask_token, CardSender, DeliveryResult, GeweClient};
pub use handler::{help_text, CardHandler, CardOutcome};
pub use logo::{extract_host, infer_logo, LOGO_TABLE};
pub use resolver::SiteResolver;
pub use site::{SiteDescriptor, SiteEntry, SiteRegistry};
