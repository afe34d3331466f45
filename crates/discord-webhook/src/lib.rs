#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod cancel;
mod error;
mod snowflake;

pub mod embed;
pub mod mentions;
pub mod reqwest;
pub mod request;
pub mod response;

pub use cancel::WithCancellation;
pub use embed::{
    Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, EmbedProvider, EmbedThumbnail,
    EmbedType, EmbedVideo,
};
pub use error::{Error, ErrorKind, Result};
pub use mentions::{AllowedMentions, MentionType};
pub use request::{Attachment, ExecuteParams, ModifyParams};
pub use response::{Message, MessageAttachment, User, Webhook, WebhookType};
pub use snowflake::Snowflake;

/// Tracing target for webhook operations.
pub const TRACING_TARGET: &str = "discord_webhook";

/// Operations available on a single webhook.
///
/// Each call is one request/response round trip with no state carried
/// between calls. Implement this trait to substitute the HTTP client, e.g.
/// in tests of code that posts notifications.
#[async_trait::async_trait]
pub trait WebhookApi: Send + Sync {
    /// Posts a message, optionally with one attached file.
    ///
    /// Returns the created message only when the client waits for it.
    async fn execute(
        &self,
        params: &ExecuteParams,
        attachment: Option<Attachment>,
    ) -> Result<Option<Message>>;

    /// Fetches the webhook's metadata.
    async fn get(&self) -> Result<Webhook>;

    /// Updates the webhook's metadata.
    ///
    /// Returns `None` when the platform reports the webhook as not modified
    /// without sending a body.
    async fn modify(&self, params: &ModifyParams) -> Result<Option<Webhook>>;

    /// Deletes the webhook.
    async fn delete(&self) -> Result<()>;
}
