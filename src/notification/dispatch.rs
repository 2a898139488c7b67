use super::NotificationPayload;
use crate::client::{WebhookClient, WebhookResponse};
use log::{error, info};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Debug, PartialEq, Clone)]
pub enum DispatchStatus {
    Delivered,
    Rejected(StatusCode),
    Failed,
    NoUrl,
}

/// Posts payloads to webhooks. Failures are logged and never returned.
pub struct Dispatcher<C> {
    client: Arc<C>,
}

impl<C: WebhookClient> Dispatcher<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn dispatch(&self, url: &str, payload: &NotificationPayload) -> DispatchStatus {
        if url.is_empty() {
            error!("No webhook URL provided");
            return DispatchStatus::NoUrl;
        }
        match self.client.post_json(url, payload).await {
            Ok(WebhookResponse { status, body }) => {
                let body = body.as_deref().unwrap_or("<no body>");
                if status == StatusCode::OK {
                    info!("Webhook invocation successful: {}", body);
                    DispatchStatus::Delivered
                } else {
                    error!("Webhook invocation failed with status {}: {}", status, body);
                    DispatchStatus::Rejected(status)
                }
            }
            Err(e) => {
                error!("Error invoking webhook {}: {}", url, e);
                DispatchStatus::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildOutcomeEvent;
    use crate::client::{self, MockWebhookClient};
    use crate::notification::build_payload;

    fn payload() -> NotificationPayload {
        build_payload(&BuildOutcomeEvent::default(), None, None)
    }

    fn response(status: StatusCode, body: Option<&str>) -> client::Result<WebhookResponse> {
        Ok(WebhookResponse {
            status,
            body: body.map(String::from),
        })
    }

    #[tokio::test]
    async fn empty_url_skips_call() {
        let mut client = MockWebhookClient::new();
        client.expect_post_json().times(0);

        let dispatcher = Dispatcher::new(Arc::new(client));
        assert_eq!(dispatcher.dispatch("", &payload()).await, DispatchStatus::NoUrl);
    }

    #[tokio::test]
    async fn delivered() {
        let mut client = MockWebhookClient::new();
        client
            .expect_post_json()
            .times(1)
            .returning(|_, _| response(StatusCode::OK, Some("ok")));

        let dispatcher = Dispatcher::new(Arc::new(client));
        assert_eq!(
            dispatcher.dispatch("https://x/wh", &payload()).await,
            DispatchStatus::Delivered
        );
    }

    #[tokio::test]
    async fn only_200_counts_as_delivered() {
        let mut client = MockWebhookClient::new();
        client
            .expect_post_json()
            .times(1)
            .returning(|_, _| response(StatusCode::ACCEPTED, None));

        let dispatcher = Dispatcher::new(Arc::new(client));
        assert_eq!(
            dispatcher.dispatch("https://x/wh", &payload()).await,
            DispatchStatus::Rejected(StatusCode::ACCEPTED)
        );
    }

    #[tokio::test]
    async fn rejected_without_body() {
        let mut client = MockWebhookClient::new();
        client
            .expect_post_json()
            .times(1)
            .returning(|_, _| response(StatusCode::INTERNAL_SERVER_ERROR, None));

        let dispatcher = Dispatcher::new(Arc::new(client));
        assert_eq!(
            dispatcher.dispatch("https://x/wh", &payload()).await,
            DispatchStatus::Rejected(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[tokio::test]
    async fn transport_error_is_swallowed() {
        let client = Arc::new(client::DefaultWebhookClient::new(
            client::DefaultWebhookClient::DEFAULT_TIMEOUT,
        )
        .unwrap());
        let dispatcher = Dispatcher::new(client);
        assert_eq!(
            dispatcher.dispatch("http://127.0.0.1:1/wh", &payload()).await,
            DispatchStatus::Failed
        );
    }
}
