//! Core types: user, chat, message, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message type of plain text content. Other types pass through text-only handlers.
pub const TEXT_MESSAGE_TYPE: &str = "text";

/// Sender identity as reported by the host (e.g. a wxid).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Conversation (group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub chat_type: String,
}

/// A single inbound message with user, chat, content, and the recipient id that replies and cards go to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    /// Recipient id supplied by the host context. `None` when the host could not determine one.
    pub receiver: Option<String>,
}

impl Message {
    /// Builds an incoming text message in `chat_id` from `user_id`, addressed back to `receiver`.
    pub fn text(
        user_id: impl Into<String>,
        chat_id: impl Into<String>,
        content: impl Into<String>,
        receiver: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: User {
                id: user_id.into(),
                username: None,
                display_name: None,
            },
            chat: Chat {
                id: chat_id.into(),
                chat_type: "private".to_string(),
            },
            content: content.into(),
            message_type: TEXT_MESSAGE_TYPE.to_string(),
            direction: MessageDirection::Incoming,
            created_at: Utc::now(),
            receiver,
        }
    }

    pub fn is_text(&self) -> bool {
        self.message_type == TEXT_MESSAGE_TYPE
    }
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text for the host to send back.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
