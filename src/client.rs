use crate::notification::NotificationPayload;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

static USER_AGENT: &str = "lightstep-notifier";
static JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub type Result<T> = std::result::Result<T, Error>;

/// What came back from a webhook call. The body is `None` when it couldn't be read.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    pub status: StatusCode,
    pub body: Option<String>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebhookClient: Send + Sync {
    async fn post_json(&self, url: &str, payload: &NotificationPayload) -> Result<WebhookResponse>;
}

#[derive(Clone)]
pub struct DefaultWebhookClient {
    client: Client,
}

impl DefaultWebhookClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookClient for DefaultWebhookClient {
    async fn post_json(&self, url: &str, payload: &NotificationPayload) -> Result<WebhookResponse> {
        let body = serde_json::to_vec(payload)?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .body(body)
            .send()
            .await?;
        let status = response.status();
        // Consuming the response releases the connection whether or not the read works.
        let body = response.text().await.ok().filter(|body| !body.is_empty());
        Ok(WebhookResponse { status, body })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
