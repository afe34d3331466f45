//! Outbound webhook payloads.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Body;
use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::{AllowedMentions, Embed, Snowflake};

/// Maximum number of embeds the platform accepts on one message.
pub const MAX_EMBEDS: usize = 10;

/// Maximum message content length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Parameters for executing a webhook.
///
/// At least one of `content`, `embeds` or an attached file must be present;
/// the platform enforces this, not the client. Unset fields are omitted from
/// the JSON payload so the platform applies the webhook's defaults; an empty
/// `content`, `username` or `avatar_url` counts as unset.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteParams {
    /// Message contents, up to [`MAX_CONTENT_LENGTH`] characters.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub content: Option<String>,
    /// Overrides the default username of the webhook.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub username: Option<String>,
    /// Overrides the default avatar of the webhook.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub avatar_url: Option<String>,
    /// Whether this is a text-to-speech message.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,
    /// Up to [`MAX_EMBEDS`] rich embeds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

impl ExecuteParams {
    /// Creates parameters for a plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Sets the message contents.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Overrides the webhook username for this message.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Overrides the webhook avatar for this message.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Marks the message as text-to-speech.
    #[must_use]
    pub fn with_tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    /// Appends an embed.
    #[must_use]
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Sets the mention policy.
    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }
}

/// Partial update of the webhook's metadata.
///
/// Only the fields that are set are sent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyParams {
    /// New default name of the webhook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New default avatar, as an image-data URI (`data:image/png;base64,...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Channel the webhook should be moved to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
}

impl ModifyParams {
    /// Sets the new default name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new default avatar from an already encoded image-data URI.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the new default avatar from raw image bytes.
    #[must_use]
    pub fn with_avatar_image(mut self, content_type: &str, image: impl AsRef<[u8]>) -> Self {
        let encoded = STANDARD.encode(image);
        self.avatar = Some(format!("data:{content_type};base64,{encoded}"));
        self
    }

    /// Moves the webhook to another channel.
    #[must_use]
    pub fn with_channel_id(mut self, channel_id: impl Into<Snowflake>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }
}

/// A file uploaded alongside an executed message.
///
/// The body is streamed into the multipart request without being buffered
/// by the client.
pub struct Attachment {
    filename: String,
    content_type: Option<String>,
    body: Body,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl Attachment {
    /// Creates an attachment from anything convertible into a request body,
    /// such as `Vec<u8>`, `Bytes`, `String` or a `reqwest::Body`.
    pub fn new(filename: impl Into<String>, body: impl Into<Body>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            body: body.into(),
        }
    }

    /// Creates an attachment streamed from an async reader, e.g. a `tokio::fs::File`.
    pub fn from_reader<R>(filename: impl Into<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        Self::new(filename, Body::wrap_stream(ReaderStream::new(reader)))
    }

    /// Sets the MIME type of the file part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the filename the platform will show.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the MIME type of the file part, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Converts the attachment into a multipart form part.
    pub(crate) fn into_part(self) -> reqwest::Result<Part> {
        let part = Part::stream(self.body).file_name(self.filename);
        match self.content_type {
            Some(content_type) => part.mime_str(&content_type),
            None => Ok(part),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{EmbedField, MentionType};

    #[test]
    fn test_unset_content_is_omitted() {
        let params = ExecuteParams::default();
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({}));
        assert!(value.get("content").is_none());

        let decoded: ExecuteParams = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let params = ExecuteParams::text("")
            .with_username("")
            .with_avatar_url("")
            .with_embed(Embed::rich());
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, json!({ "embeds": [{ "type": "rich" }] }));
    }

    #[test]
    fn test_full_execute_payload() {
        let params = ExecuteParams::text("hello <@80351110224678912>")
            .with_username("Release Bot")
            .with_avatar_url("https://example.com/bot.png")
            .with_tts(true)
            .with_embed(Embed::rich().with_field(EmbedField::new("version", "1.2.0")))
            .with_allowed_mentions(AllowedMentions::default().with_parse(MentionType::Users));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "content": "hello <@80351110224678912>",
                "username": "Release Bot",
                "avatar_url": "https://example.com/bot.png",
                "tts": true,
                "embeds": [{
                    "type": "rich",
                    "fields": [{ "name": "version", "value": "1.2.0" }]
                }],
                "allowed_mentions": { "parse": ["users"] }
            })
        );
    }

    #[test]
    fn test_modify_params_omit_unset_fields() {
        let value = serde_json::to_value(ModifyParams::default().with_name("alerts")).unwrap();
        assert_eq!(value, json!({ "name": "alerts" }));

        let value =
            serde_json::to_value(ModifyParams::default().with_channel_id(199737254929760256u64))
                .unwrap();
        assert_eq!(value, json!({ "channel_id": "199737254929760256" }));
    }

    #[test]
    fn test_avatar_image_data_uri() {
        let params = ModifyParams::default().with_avatar_image("image/png", b"\x89PNG");
        assert_eq!(params.avatar.as_deref(), Some("data:image/png;base64,iVBORw=="));
    }

    #[test]
    fn test_attachment_accessors() {
        let attachment = Attachment::new("report.csv", "a,b\n1,2\n").with_content_type("text/csv");
        assert_eq!(attachment.filename(), "report.csv");
        assert_eq!(attachment.content_type(), Some("text/csv"));
        assert!(attachment.into_part().is_ok());
    }

    #[test]
    fn test_attachment_rejects_invalid_mime() {
        let attachment = Attachment::new("a.bin", Vec::<u8>::new()).with_content_type("not a mime");
        assert!(attachment.into_part().is_err());
    }
}
