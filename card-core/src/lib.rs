//! # card-core
//!
//! Core types and traits for the card bot: [`Handler`], inbound [`Message`] / [`User`] / [`Chat`],
//! [`HandlerResponse`], the error taxonomy, and tracing initialization. Host-agnostic; used by
//! handler-chain and card-plugin.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{CardError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, MessageDirection, User};
