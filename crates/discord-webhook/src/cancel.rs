//! Cancellation for webhook operations.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{
    Attachment, Error, ExecuteParams, Message, ModifyParams, Result, TRACING_TARGET, Webhook,
    WebhookApi,
};

/// Wraps a [`WebhookApi`] so that every operation stops when a token fires.
///
/// A cancelled operation drops its in-flight request and fails with
/// [`Error::Cancelled`]. A token that is already cancelled fails operations
/// before any request is sent.
#[derive(Debug, Clone)]
pub struct WithCancellation<A> {
    api: A,
    token: CancellationToken,
}

impl<A> WithCancellation<A> {
    /// Binds `api` to `token`.
    pub fn new(api: A, token: CancellationToken) -> Self {
        Self { api, token }
    }

    /// Returns the cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the wrapped API.
    pub fn into_inner(self) -> A {
        self.api
    }

    async fn run<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!(target: TRACING_TARGET, operation, "Webhook operation cancelled");
                Err(Error::Cancelled)
            }
            result = fut => result,
        }
    }
}

#[async_trait::async_trait]
impl<A: WebhookApi> WebhookApi for WithCancellation<A> {
    async fn execute(
        &self,
        params: &ExecuteParams,
        attachment: Option<Attachment>,
    ) -> Result<Option<Message>> {
        self.run("execute", self.api.execute(params, attachment)).await
    }

    async fn get(&self) -> Result<Webhook> {
        self.run("get", self.api.get()).await
    }

    async fn modify(&self, params: &ModifyParams) -> Result<Option<Webhook>> {
        self.run("modify", self.api.modify(params)).await
    }

    async fn delete(&self) -> Result<()> {
        self.run("delete", self.api.delete()).await
    }
}
