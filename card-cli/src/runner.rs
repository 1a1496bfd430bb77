//! [`CardBot`]: config, card handler and handler chain; plus a line-oriented REPL standing in for
//! the host event loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use card_core::{HandlerResponse, Message};
use card_plugin::{AppConfig, CardHandler};
use handler_chain::HandlerChain;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, instrument};

use crate::logging_handler::LoggingHandler;

/// Chat id used for messages fed in from the command line.
const CLI_CHAT_ID: &str = "cli";
const CLI_USER_ID: &str = "cli-user";

pub struct CardBot {
    pub config: AppConfig,
    handler: Arc<CardHandler>,
    handler_chain: HandlerChain,
}

impl CardBot {
    /// Validates `config` and builds the handler chain (logging, then card).
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate().context("Invalid card plugin config")?;
        let handler = Arc::new(CardHandler::from_config(&config)?);
        Ok(Self::with_handler(config, handler))
    }

    /// Uses a prebuilt handler (e.g. with an injected sender in tests).
    pub fn with_handler(config: AppConfig, handler: Arc<CardHandler>) -> Self {
        let handler_chain = HandlerChain::new()
            .add_handler(Arc::new(LoggingHandler))
            .add_handler(handler.clone());
        Self {
            config,
            handler,
            handler_chain,
        }
    }

    pub fn handler(&self) -> &CardHandler {
        &self.handler
    }

    pub fn help_text(&self) -> String {
        self.handler.help_text()
    }

    /// Feeds one text message through the chain. Returns the reply text, if the chain produced one.
    #[instrument(skip(self))]
    pub async fn handle_text(&self, receiver: Option<&str>, text: &str) -> Result<Option<String>> {
        let message = Message::text(
            CLI_USER_ID,
            receiver.unwrap_or(CLI_CHAT_ID),
            text,
            receiver.map(str::to_string),
        );
        let response = self.handler_chain.handle(&message).await?;
        Ok(match response {
            HandlerResponse::Reply(text) => Some(text),
            HandlerResponse::Continue | HandlerResponse::Stop | HandlerResponse::Ignore => None,
        })
    }
}

/// Reads lines from `reader` until EOF; each non-empty line goes through the bot and any reply is
/// written to `writer`, one per line. A failing line is logged and the loop continues.
pub async fn run_repl<R, W>(
    bot: &CardBot,
    receiver: Option<&str>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(receiver = ?receiver, "REPL started");
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match bot.handle_text(receiver, &line).await {
            Ok(Some(reply)) => {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, line = %line, "Handler chain failed"),
        }
    }
    info!("REPL finished");
    Ok(())
}
