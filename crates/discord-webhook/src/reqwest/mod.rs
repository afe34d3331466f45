//! Reqwest-based HTTP client for a single webhook.
//!
//! This module provides the reqwest-based implementation of the [`WebhookApi`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use discord_webhook::reqwest::{ReqwestConfig, WebhookClient, WebhookEndpoint};
//! use discord_webhook::{ExecuteParams, WebhookApi};
//!
//! // Create a client from the URL copied out of the channel settings
//! let client = WebhookClient::from_url(&webhook_url, false, None)?;
//! client.execute(&ExecuteParams::text("hello"), None).await?;
//!
//! // Or share an existing reqwest client and override the API base URL
//! let config = ReqwestConfig::default().with_base_url("https://canary.discord.com/api");
//! let endpoint = WebhookEndpoint::new(webhook_id, token);
//! let client = WebhookClient::with_config(endpoint, true, &config, Some(http))?;
//! ```
//!
//! [`WebhookApi`]: crate::WebhookApi

mod client;
mod config;
mod endpoint;

pub use client::WebhookClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ReqwestConfig};
pub use endpoint::WebhookEndpoint;

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "discord_webhook::reqwest";
