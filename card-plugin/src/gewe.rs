//! GeWe gateway delivery client.
//!
//! Posts one compiled appmsg to `{base_url}/message/postAppMsg` and classifies the outcome. A single
//! attempt is made; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::appmsg::CardPayload;
use crate::config::ApiCredentials;
use crate::error::Result;

pub const POST_APP_MSG_PATH: &str = "/message/postAppMsg";
pub const TOKEN_HEADER: &str = "X-GEWE-TOKEN";
/// `ret` value the gateway embeds in the response body on success.
pub const SUCCESS_RET: i64 = 200;

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Success,
    /// HTTP 200, but the gateway reported a failure in the body.
    ApplicationError { ret: Option<i64>, message: String },
    /// Non-200 status, unreadable body, or the request never completed.
    TransportError { status: Option<u16>, body: String },
}

impl DeliveryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResult::Success)
    }
}

/// Delivers a compiled card to a recipient. `Err` is reserved for faults outside the delivery
/// taxonomy (e.g. a request that cannot be built from the configured base URL).
#[async_trait]
pub trait CardSender: Send + Sync {
    async fn deliver(&self, recipient: &str, payload: &CardPayload) -> Result<DeliveryResult>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostAppMsgRequest<'a> {
    app_id: &'a str,
    to_wxid: &'a str,
    appmsg: &'a str,
}

/// reqwest-based [`CardSender`] for the GeWe HTTP API.
#[derive(Debug, Clone)]
pub struct GeweClient {
    client: Client,
    credentials: ApiCredentials,
}

impl GeweClient {
    /// Creates a client whose requests time out after `timeout`.
    pub fn new(credentials: ApiCredentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, credentials))
    }

    pub fn with_client(client: Client, credentials: ApiCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    /// Full endpoint URL; a trailing slash on the base URL is ignored.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.credentials.base_url.trim_end_matches('/'),
            POST_APP_MSG_PATH
        )
    }
}

#[async_trait]
impl CardSender for GeweClient {
    #[instrument(skip(self, payload))]
    async fn deliver(&self, recipient: &str, payload: &CardPayload) -> Result<DeliveryResult> {
        let url = self.endpoint();
        let body = PostAppMsgRequest {
            app_id: &self.credentials.app_id,
            to_wxid: recipient,
            appmsg: payload.as_str(),
        };

        info!(
            to_wxid = %recipient,
            url = %url,
            token = %mask_token(&self.credentials.token),
            "Sending card"
        );
        debug!(request = ?body, "postAppMsg request body");

        let response = match self
            .client
            .post(&url)
            .header(TOKEN_HEADER, &self.credentials.token)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_builder() => return Err(e.into()),
            Err(e) => {
                error!(to_wxid = %recipient, error = %e, "postAppMsg request failed");
                return Ok(DeliveryResult::TransportError {
                    status: e.status().map(|s| s.as_u16()),
                    body: e.to_string(),
                });
            }
        };

        let status = response.status();
        let result = match response.text().await {
            Ok(text) => classify(status.as_u16(), &text),
            Err(e) => DeliveryResult::TransportError {
                status: Some(status.as_u16()),
                body: format!("failed to read response body: {}", e),
            },
        };
        match &result {
            DeliveryResult::Success => {
                info!(to_wxid = %recipient, "Card sent successfully");
            }
            DeliveryResult::ApplicationError { ret, message } => {
                error!(
                    to_wxid = %recipient,
                    ret = ?ret,
                    msg = %message,
                    "Failed to send card"
                );
            }
            DeliveryResult::TransportError { status, body } => {
                error!(
                    to_wxid = %recipient,
                    status = ?status,
                    body = %body,
                    "postAppMsg API request failed"
                );
            }
        }
        Ok(result)
    }
}

/// Classifies an HTTP status and response body. Success needs HTTP 200 and `"ret": 200` in the body.
pub fn classify(status: u16, body: &str) -> DeliveryResult {
    if status != 200 {
        return DeliveryResult::TransportError {
            status: Some(status),
            body: body.to_string(),
        };
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            return DeliveryResult::TransportError {
                status: Some(status),
                body: body.to_string(),
            }
        }
    };

    let ret = value.get("ret").and_then(ret_code);
    if ret == Some(SUCCESS_RET) {
        return DeliveryResult::Success;
    }

    let message = match value.get("msg") {
        Some(Value::String(msg)) => msg.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    DeliveryResult::ApplicationError { ret, message }
}

/// Integral `ret` values, whether encoded as `200` or `200.0`.
fn ret_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Masks a token for safe logging: first 7 + "***" + last 4 chars; tokens of 11 chars or fewer become "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
