//! Reqwest-based HTTP client for a single webhook.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{ReqwestConfig, TRACING_TARGET, WebhookEndpoint};
use crate::{
    Attachment, Error, ExecuteParams, Message, ModifyParams, Result, Snowflake, Webhook,
    WebhookApi, WithCancellation,
};

/// Statuses accepted by each operation.
const EXECUTE_ACCEPTED: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::NO_CONTENT,
];
const GET_ACCEPTED: &[StatusCode] = &[StatusCode::OK];
const MODIFY_ACCEPTED: &[StatusCode] = &[StatusCode::OK, StatusCode::NOT_MODIFIED];
const DELETE_ACCEPTED: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Form field carrying the JSON message payload.
const PAYLOAD_FIELD: &str = "payload_json";

/// Form field carrying the attached file.
const FILE_FIELD: &str = "file";

/// Inner client that holds the HTTP client and the request URL.
struct WebhookClientInner {
    http: Client,
    id: Snowflake,
    url: Url,
    wait: bool,
}

/// Client bound to one webhook.
///
/// The request URL is built once at construction; every operation is a
/// single request against it. Cloning is cheap and clones share the same
/// transport, so one client can serve concurrent callers.
///
/// # Examples
///
/// ```rust,ignore
/// use discord_webhook::reqwest::WebhookClient;
/// use discord_webhook::{Embed, ExecuteParams, WebhookApi};
///
/// let client = WebhookClient::new(223704706495545344u64, token, true, None)?;
///
/// let params = ExecuteParams::text("Deploy finished")
///     .with_embed(Embed::rich().with_title("v1.2.0").with_color(0x2ECC71));
/// let message = client.execute(&params, None).await?;
/// ```
#[derive(Clone)]
pub struct WebhookClient {
    inner: Arc<WebhookClientInner>,
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("id", &self.inner.id)
            .field("wait", &self.inner.wait)
            .finish_non_exhaustive()
    }
}

impl WebhookClient {
    /// Creates a client for the webhook `id` with the default configuration.
    ///
    /// When `http` is `None` a new `reqwest::Client` is built for this
    /// client alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the request URL cannot be built, or
    /// [`Error::Transport`] if the default HTTP client cannot be created.
    pub fn new(
        id: impl Into<Snowflake>,
        token: impl Into<String>,
        wait: bool,
        http: Option<Client>,
    ) -> Result<Self> {
        let endpoint = WebhookEndpoint::new(id, token);
        Self::with_config(endpoint, wait, &ReqwestConfig::default(), http)
    }

    /// Creates a client from a full webhook URL.
    pub fn from_url(webhook_url: &str, wait: bool, http: Option<Client>) -> Result<Self> {
        let endpoint = webhook_url.parse()?;
        Self::with_config(endpoint, wait, &ReqwestConfig::default(), http)
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(
        endpoint: WebhookEndpoint,
        wait: bool,
        config: &ReqwestConfig,
        http: Option<Client>,
    ) -> Result<Self> {
        let url = endpoint.request_url(&config.base_url, wait)?;

        let http = match http {
            Some(http) => http,
            None => {
                let timeout = config.effective_timeout();
                tracing::debug!(
                    target: TRACING_TARGET,
                    timeout_ms = timeout.as_millis(),
                    "Creating reqwest client"
                );

                Client::builder()
                    .timeout(timeout)
                    .user_agent(config.effective_user_agent())
                    .build()?
            }
        };

        let inner = WebhookClientInner {
            http,
            id: endpoint.id(),
            url,
            wait,
        };

        tracing::info!(
            target: TRACING_TARGET,
            webhook_id = %inner.id,
            wait,
            "Webhook client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the webhook ID.
    pub fn id(&self) -> Snowflake {
        self.inner.id
    }

    /// Returns the request URL, including the secret token.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Returns whether executed messages are waited for and returned.
    pub fn wait(&self) -> bool {
        self.inner.wait
    }

    /// Binds every operation of a clone of this client to `token`.
    pub fn with_cancellation(&self, token: CancellationToken) -> WithCancellation<Self> {
        WithCancellation::new(self.clone(), token)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.inner.http.request(method, self.inner.url.clone())
    }

    /// Sends the request and checks the status against `accepted`.
    ///
    /// A status outside `accepted` is returned as [`Error::Protocol`] with
    /// the full response body.
    async fn send(&self, request: RequestBuilder, accepted: &[StatusCode]) -> Result<Response> {
        let started_at = Instant::now();
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(
            target: TRACING_TARGET,
            webhook_id = %self.inner.id,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Received webhook response"
        );

        if accepted.contains(&status) {
            return Ok(response);
        }

        let body = response.text().await?;
        Err(Error::Protocol { status, body })
    }
}

/// Reads the full body and decodes it as `T`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(Error::Decode)
}

#[async_trait::async_trait]
impl WebhookApi for WebhookClient {
    async fn execute(
        &self,
        params: &ExecuteParams,
        attachment: Option<Attachment>,
    ) -> Result<Option<Message>> {
        tracing::debug!(
            target: TRACING_TARGET,
            webhook_id = %self.inner.id,
            embeds = params.embeds.len(),
            has_attachment = attachment.is_some(),
            "Executing webhook"
        );

        let payload = serde_json::to_string(params).map_err(Error::Encode)?;
        let mut form = Form::new().text(PAYLOAD_FIELD, payload);
        if let Some(attachment) = attachment {
            form = form.part(FILE_FIELD, attachment.into_part()?);
        }

        let request = self.request(Method::POST).multipart(form);
        let response = self.send(request, EXECUTE_ACCEPTED).await?;

        if !self.inner.wait {
            return Ok(None);
        }

        decode(response).await.map(Some)
    }

    async fn get(&self) -> Result<Webhook> {
        let response = self.send(self.request(Method::GET), GET_ACCEPTED).await?;
        decode(response).await
    }

    async fn modify(&self, params: &ModifyParams) -> Result<Option<Webhook>> {
        tracing::debug!(
            target: TRACING_TARGET,
            webhook_id = %self.inner.id,
            name = params.name.is_some(),
            avatar = params.avatar.is_some(),
            channel_id = params.channel_id.is_some(),
            "Modifying webhook"
        );

        let body = serde_json::to_vec(params).map_err(Error::Encode)?;
        let request = self
            .request(Method::PATCH)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.send(request, MODIFY_ACCEPTED).await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if status == StatusCode::NOT_MODIFIED && bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(Error::Decode)
    }

    async fn delete(&self) -> Result<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            webhook_id = %self.inner.id,
            "Deleting webhook"
        );

        self.send(self.request(Method::DELETE), DELETE_ACCEPTED).await?;
        Ok(())
    }
}
