//! Records returned by the platform.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{Embed, Snowflake};

/// Metadata describing a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Identifier of the webhook.
    pub id: Snowflake,
    /// Type of the webhook.
    #[serde(rename = "type")]
    pub kind: WebhookType,
    /// Guild the webhook is for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Channel the webhook posts to; null for application-owned webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    /// User that created the webhook; not returned when fetched with the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Default name of the webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Default avatar hash of the webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Secure token, returned for incoming webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Webhook types, encoded as integers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum WebhookType {
    /// Posts messages to channels with a generated token.
    Incoming,
    /// Internal webhook used by channel following to cross-post messages.
    ChannelFollower,
    /// A type this client does not know about yet.
    Other(u8),
}

impl WebhookType {
    /// Returns whether this is an incoming webhook.
    #[inline]
    pub fn is_incoming(self) -> bool {
        matches!(self, Self::Incoming)
    }
}

impl From<u8> for WebhookType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Incoming,
            2 => Self::ChannelFollower,
            other => Self::Other(other),
        }
    }
}

impl From<WebhookType> for u8 {
    fn from(value: WebhookType) -> Self {
        match value {
            WebhookType::Incoming => 1,
            WebhookType::ChannelFollower => 2,
            WebhookType::Other(other) => other,
        }
    }
}

/// The subset of a platform user carried on webhooks and messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Avatar hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

/// A message posted through the webhook.
///
/// Only returned by the platform when the client waits for the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// For webhook messages, a pseudo-user carrying the webhook's name and avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub tts: bool,
    #[serde(default)]
    pub mention_everyone: bool,
    #[serde(default)]
    pub mentions: Vec<User>,
    #[serde(default)]
    pub mention_roles: Vec<Snowflake>,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<Snowflake>,
    /// Message type; 0 for default messages.
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub flags: u64,
}

/// A file attached to a posted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttachment {
    pub id: Snowflake,
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    pub url: String,
    pub proxy_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_webhook_without_user() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "223704706495545344",
            "type": 1,
            "guild_id": "199737254929760256",
            "channel_id": "199737254929760256",
            "name": "test webhook",
            "avatar": null,
            "token": "3d89bb7572e0fb30d8128367b3b1b44fecd1726de135cbe28a41f8b2f777c372ba2939e72279b94526ff5d1bd4358d65cf11"
        }))
        .unwrap();

        assert_eq!(webhook.id, Snowflake::new(223704706495545344));
        assert_eq!(webhook.kind, WebhookType::Incoming);
        assert!(webhook.user.is_none());
        assert!(webhook.avatar.is_none());
        assert!(webhook.token.is_some());
    }

    #[test]
    fn test_webhook_with_user() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "223704706495545344",
            "type": 2,
            "channel_id": "199737254929760256",
            "user": {
                "id": "53908232506183680",
                "username": "Mason",
                "discriminator": "9999",
                "avatar": "a_d5efa99b3eeaa7dd43acca82f5692432"
            }
        }))
        .unwrap();

        assert_eq!(webhook.kind, WebhookType::ChannelFollower);
        assert!(webhook.guild_id.is_none());
        let user = webhook.user.unwrap();
        assert_eq!(user.username, "Mason");
        assert!(!user.bot);
    }

    #[test]
    fn test_webhook_without_channel() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "223704706495545344",
            "type": 1,
            "channel_id": null,
            "name": "app hook"
        }))
        .unwrap();
        assert!(webhook.channel_id.is_none());
        assert_eq!(webhook.name.as_deref(), Some("app hook"));

        let webhook: Webhook = serde_json::from_value(json!({
            "id": "223704706495545344",
            "type": 1,
            "name": "app hook"
        }))
        .unwrap();
        assert!(webhook.channel_id.is_none());
        assert!(serde_json::to_value(&webhook).unwrap().get("channel_id").is_none());
    }

    #[test]
    fn test_unknown_webhook_type_round_trips() {
        let kind: WebhookType = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(kind, WebhookType::Other(3));
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(3));
    }

    #[test]
    fn test_message_from_wait_response() {
        let message: Message = serde_json::from_value(json!({
            "id": "1234567890123456789",
            "type": 0,
            "content": "hello",
            "channel_id": "199737254929760256",
            "author": {
                "id": "223704706495545344",
                "username": "Release Bot",
                "avatar": null,
                "discriminator": "0000",
                "bot": true
            },
            "attachments": [{
                "id": "1234567890123456790",
                "filename": "report.csv",
                "size": 8,
                "url": "https://cdn.example.com/report.csv",
                "proxy_url": "https://media.example.com/report.csv",
                "content_type": "text/csv"
            }],
            "embeds": [],
            "mentions": [],
            "mention_roles": [],
            "pinned": false,
            "mention_everyone": false,
            "tts": false,
            "timestamp": "2024-05-01T12:00:00.123000+00:00",
            "edited_timestamp": null,
            "flags": 0,
            "webhook_id": "223704706495545344"
        }))
        .unwrap();

        assert_eq!(message.id, Snowflake::new(1234567890123456789));
        assert_eq!(message.content, "hello");
        assert_eq!(message.attachments[0].size, 8);
        assert!(message.author.unwrap().bot);
        assert!(message.timestamp.is_some());
        assert!(message.edited_timestamp.is_none());
    }
}
