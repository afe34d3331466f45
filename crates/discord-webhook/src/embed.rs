//! Rich embed records attached to webhook messages.
//!
//! Every optional field is omitted from the serialized JSON when unset, so the
//! platform applies its own defaults. Webhook callers can set every field
//! except `type` (always `rich`), `provider`, `video`, and the
//! `height`/`width`/`proxy_*` values, which the platform fills in on responses.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Embedded rich content.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// Title of the embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Type of the embed, always [`EmbedType::Rich`] for caller-built embeds.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EmbedType>,
    /// Description of the embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL the title links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Timestamp shown in the footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Color code of the left border.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedVideo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<EmbedProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    /// Named fields, rendered in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Creates an empty `rich` embed.
    pub fn rich() -> Self {
        Self {
            kind: Some(EmbedType::Rich),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the URL the title links to.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the color code, e.g. `0x5865F2`.
    #[must_use]
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn with_footer(mut self, footer: EmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Sets the image by its source URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(EmbedImage::new(url));
        self
    }

    /// Sets the thumbnail by its source URL.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(EmbedThumbnail::new(url));
        self
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Embed types are loosely defined and not used by clients for rendering.
///
/// Only [`EmbedType::Rich`] may be set by callers; the others are observed
/// on embeds the platform generates from links.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmbedType {
    /// Generic embed rendered from embed attributes.
    #[default]
    Rich,
    Image,
    Video,
    /// Animated gif rendered as a video.
    Gifv,
    Article,
    Link,
}

/// Footer shown under the embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    /// Footer text, required once a footer is present.
    pub text: String,
    /// URL of the footer icon (http(s) and attachments only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Proxied URL of the footer icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

impl EmbedFooter {
    /// Creates a footer with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_url: None,
            proxy_icon_url: None,
        }
    }

    /// Sets the footer icon.
    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

/// Image displayed in the embed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    /// Source URL of the image (http(s) and attachments only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Proxied URL of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl EmbedImage {
    /// Creates an image from its source URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Small image shown in the corner of the embed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedThumbnail {
    /// Source URL of the thumbnail (http(s) and attachments only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Proxied URL of the thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl EmbedThumbnail {
    /// Creates a thumbnail from its source URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Video attached to an embed by the platform.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedVideo {
    /// Source URL of the video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Site that provided a link embed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedProvider {
    /// Name of the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL of the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Author shown at the top of the embed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    /// Name of the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Link opened when the author name is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// URL of the author icon (http(s) and attachments only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Proxied URL of the author icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

impl EmbedAuthor {
    /// Creates an author with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the author link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the author icon.
    #[must_use]
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

/// A named field; `name` and `value` are required by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Name of the field.
    pub name: String,
    /// Value of the field.
    pub value: String,
    /// Whether the field is displayed inline with its neighbours.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

impl EmbedField {
    /// Creates a field displayed on its own line.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    /// Creates a field displayed inline.
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_embed_serializes_to_empty_object() {
        let value = serde_json::to_value(Embed::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_rich_embed_builder() {
        let timestamp: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
        let embed = Embed::rich()
            .with_title("Deploy finished")
            .with_color(0x2ECC71)
            .with_timestamp(timestamp)
            .with_footer(EmbedFooter::new("ci"))
            .with_field(EmbedField::inline("env", "prod"))
            .with_field(EmbedField::new("commit", "abc123"));

        let value = serde_json::to_value(&embed).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Deploy finished",
                "type": "rich",
                "timestamp": "2024-05-01T12:00:00Z",
                "color": 0x2ECC71,
                "footer": { "text": "ci" },
                "fields": [
                    { "name": "env", "value": "prod", "inline": true },
                    { "name": "commit", "value": "abc123" }
                ]
            })
        );
    }

    #[test]
    fn test_required_sub_fields_always_serialized() {
        let value = serde_json::to_value(EmbedFooter::new("")).unwrap();
        assert_eq!(value, json!({ "text": "" }));

        let value = serde_json::to_value(EmbedField::new("", "")).unwrap();
        assert_eq!(value, json!({ "name": "", "value": "" }));
    }

    #[test]
    fn test_decodes_link_embed_from_response() {
        let embed: Embed = serde_json::from_value(json!({
            "type": "link",
            "url": "https://example.com",
            "provider": { "name": "Example" },
            "thumbnail": {
                "url": "https://example.com/a.png",
                "proxy_url": "https://media.example.com/a.png",
                "width": 64,
                "height": 64
            }
        }))
        .unwrap();

        assert_eq!(embed.kind, Some(EmbedType::Link));
        assert_eq!(embed.thumbnail.unwrap().width, Some(64));
        assert_eq!(embed.provider.unwrap().name.as_deref(), Some("Example"));
        assert!(embed.fields.is_empty());
    }

    #[test]
    fn test_embed_type_from_str() {
        assert_eq!(EmbedType::from_str("gifv").unwrap(), EmbedType::Gifv);
        assert_eq!(EmbedType::Article.as_ref(), "article");
        assert!(EmbedType::from_str("poll").is_err());
    }
}
