//! Webhook destination and request URL assembly.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::{Error, Result, Snowflake};

/// Identifies a webhook by its ID and secret token.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookEndpoint {
    id: Snowflake,
    token: String,
}

impl fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl WebhookEndpoint {
    /// Creates an endpoint from its parts.
    pub fn new(id: impl Into<Snowflake>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
        }
    }

    /// Returns the webhook ID.
    pub fn id(&self) -> Snowflake {
        self.id
    }

    /// Returns the secret token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Builds `<base_url>/webhooks/<id>/<token>?wait=<wait>`.
    ///
    /// The token is appended as a single path segment and percent-encoded if
    /// needed, so it can never alter the rest of the URL.
    pub fn request_url(&self, base_url: &str, wait: bool) -> Result<Url> {
        if self.token.is_empty() {
            return Err(Error::Construction("webhook token is empty".into()));
        }

        let mut url = Url::parse(base_url)
            .map_err(|e| Error::Construction(format!("invalid base URL '{base_url}': {e}")))?;

        let id = self.id.to_string();
        url.path_segments_mut()
            .map_err(|()| {
                Error::Construction(format!("base URL '{base_url}' cannot have a path"))
            })?
            .pop_if_empty()
            .extend(["webhooks", id.as_str(), self.token.as_str()]);

        url.query_pairs_mut()
            .clear()
            .append_pair("wait", if wait { "true" } else { "false" });

        Ok(url)
    }
}

impl FromStr for WebhookEndpoint {
    type Err = Error;

    /// Parses a webhook URL as copied from the platform, such as
    /// `https://discord.com/api/webhooks/<id>/<token>`.
    fn from_str(s: &str) -> Result<Self> {
        let url =
            Url::parse(s).map_err(|e| Error::Construction(format!("invalid webhook URL: {e}")))?;

        let mut segments = url
            .path_segments()
            .ok_or_else(|| Error::Construction("webhook URL has no path".into()))?
            .skip_while(|segment| *segment != "webhooks")
            .skip(1);

        let id = segments
            .next()
            .and_then(|id| id.parse::<Snowflake>().ok())
            .ok_or_else(|| Error::Construction("webhook URL has no numeric ID".into()))?;

        let token = segments
            .next()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Construction("webhook URL has no token".into()))?;

        Ok(Self::new(id, token))
    }
}
