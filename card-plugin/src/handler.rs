//! [`CardHandler`]: routes `card <keyword>` commands through resolve → compile → deliver.
//!
//! Every path ends in a [`CardOutcome`]; errors from inner stages are logged and turned into a
//! reply, so `handle` never returns `Err`.

use std::sync::Arc;

use async_trait::async_trait;
use card_core::{Handler, HandlerResponse, Message, Result};
use tracing::{error, info, instrument};

use crate::appmsg::compile;
use crate::command::CardCommand;
use crate::config::AppConfig;
use crate::gewe::{CardSender, DeliveryResult, GeweClient};
use crate::resolver::SiteResolver;
use crate::site::SiteRegistry;

pub const PLUGIN_NAME: &str = "CardPlugin";
pub const PLUGIN_PRIORITY: i32 = 100;
pub const PLUGIN_DESC: &str = "生成卡片消息";
pub const PLUGIN_VERSION: &str = "1.0";

pub const USAGE_PROMPT: &str = "请指定要生成卡片的网站，例如：card b站";
pub const MISSING_RECIPIENT_PROMPT: &str = "无法获取接收人信息";
pub const DELIVERY_FAILED_PROMPT: &str = "发送卡片失败";

/// Terminal state of one card command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    /// `card ` without a keyword.
    Usage,
    NotFound { keyword: String },
    MissingRecipient,
    /// Card accepted by the gateway; no text reply.
    Delivered,
    /// Compile, transport or gateway failure.
    DeliveryFailed,
    /// Unexpected fault; carries the error text.
    Fault(String),
}

impl CardOutcome {
    /// Text sent back to the user, if any.
    pub fn reply_text(&self) -> Option<String> {
        match self {
            CardOutcome::Usage => Some(USAGE_PROMPT.to_string()),
            CardOutcome::NotFound { keyword } => Some(format!("未找到网站 {} 的配置", keyword)),
            CardOutcome::MissingRecipient => Some(MISSING_RECIPIENT_PROMPT.to_string()),
            CardOutcome::Delivered => None,
            CardOutcome::DeliveryFailed => Some(DELIVERY_FAILED_PROMPT.to_string()),
            CardOutcome::Fault(e) => Some(format!("处理消息失败：{}", e)),
        }
    }

    /// Every outcome ends the chain; only successful delivery does so silently.
    pub fn into_response(self) -> HandlerResponse {
        match self.reply_text() {
            Some(text) => HandlerResponse::Reply(text),
            None => HandlerResponse::Stop,
        }
    }
}

/// Card command handler. Holds the resolver and the sender; both are read-only after construction.
#[derive(Clone)]
pub struct CardHandler {
    resolver: SiteResolver,
    sender: Arc<dyn CardSender>,
}

impl CardHandler {
    pub fn new(resolver: SiteResolver, sender: Arc<dyn CardSender>) -> Self {
        Self { resolver, sender }
    }

    /// Builds the handler from loaded config with a [`GeweClient`] sender.
    pub fn from_config(config: &AppConfig) -> crate::error::Result<Self> {
        let resolver = SiteResolver::new(Arc::new(config.sites().clone()));
        let client = GeweClient::new(config.credentials().clone(), config.timeout())?;
        info!(
            plugin = PLUGIN_NAME,
            version = PLUGIN_VERSION,
            priority = PLUGIN_PRIORITY,
            desc = PLUGIN_DESC,
            sites = config.sites().len(),
            "[CardPlugin] inited"
        );
        Ok(Self::new(resolver, Arc::new(client)))
    }

    pub fn resolver(&self) -> &SiteResolver {
        &self.resolver
    }

    pub fn help_text(&self) -> String {
        help_text(self.resolver.registry())
    }

    /// Runs a card command carried by `message`. `None` when the message is not a card command.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn process(&self, message: &Message) -> Option<CardOutcome> {
        if !message.is_text() || message.content.is_empty() {
            return None;
        }
        let command = CardCommand::parse(&message.content)?;

        let outcome = match self.run(&command, message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, keyword = %command.keyword, "Error handling card command");
                CardOutcome::Fault(e.to_string())
            }
        };
        info!(keyword = %command.keyword, outcome = ?outcome, "Card command finished");
        Some(outcome)
    }

    async fn run(
        &self,
        command: &CardCommand,
        message: &Message,
    ) -> crate::error::Result<CardOutcome> {
        if !command.has_keyword() {
            info!(user_id = %message.user.id, "Card command without keyword");
            return Ok(CardOutcome::Usage);
        }

        let Some(descriptor) = self.resolver.resolve(&command.keyword) else {
            info!(keyword = %command.keyword, "No site matched");
            return Ok(CardOutcome::NotFound {
                keyword: command.keyword.clone(),
            });
        };

        let Some(recipient) = message.receiver.as_deref().filter(|r| !r.is_empty()) else {
            error!(message_id = %message.id, "No receiver in context");
            return Ok(CardOutcome::MissingRecipient);
        };

        let payload = match compile(&descriptor) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, url = %descriptor.url, "Failed to generate appmsg");
                return Ok(CardOutcome::DeliveryFailed);
            }
        };

        let outcome = match self.sender.deliver(recipient, &payload).await? {
            DeliveryResult::Success => CardOutcome::Delivered,
            DeliveryResult::ApplicationError { .. } | DeliveryResult::TransportError { .. } => {
                CardOutcome::DeliveryFailed
            }
        };
        Ok(outcome)
    }
}

#[async_trait]
impl Handler for CardHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        Ok(self
            .process(message)
            .await
            .map_or(HandlerResponse::Continue, CardOutcome::into_response))
    }
}

/// Help page listing the configured site names.
pub fn help_text(registry: &SiteRegistry) -> String {
    let available_sites = registry.names().collect::<Vec<_>>().join("、");
    format!(
        "【卡片生成器】

✨ 功能说明：
  生成精美的网站分享卡片，点击可直接访问对应网站。

📝 使用方法：
  card <网站名称>  或  卡片 <网站名称>

🌐 支持网站：
  {available_sites}

📱 示例：
  card b站
  卡片 知乎
  card 淘宝

💡 提示：
  支持模糊匹配，例如输入\"bili\"也可以匹配到\"b站\"。
"
    )
}
