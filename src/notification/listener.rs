use super::dispatch::{DispatchStatus, Dispatcher};
use super::payload::build_payload;
use super::policy::{evaluate, JobNotificationConfig};
use crate::build::BuildOutcomeEvent;
use crate::client::WebhookClient;
use log::{error, info};
use std::sync::Arc;

/// Looks up the notification settings stored for a job.
pub trait JobConfigProvider: Send + Sync {
    fn job_config(&self, job_name: &str) -> Option<JobNotificationConfig>;
}

/// Supplies the host's externally visible root URL, if one is configured.
pub trait RootUrlProvider: Send + Sync {
    fn root_url(&self) -> Option<String>;
}

#[derive(Debug, PartialEq, Clone)]
pub enum NotifyOutcome {
    NoConfiguration,
    Skipped,
    Dispatched(DispatchStatus),
}

/// Reacts to build completions by notifying the job's webhook.
pub struct BuildListener<C, J, R> {
    dispatcher: Dispatcher<C>,
    jobs: Arc<J>,
    root_url: Arc<R>,
}

impl<C, J, R> BuildListener<C, J, R>
where
    C: WebhookClient,
    J: JobConfigProvider,
    R: RootUrlProvider,
{
    pub fn new(client: Arc<C>, jobs: Arc<J>, root_url: Arc<R>) -> Self {
        Self {
            dispatcher: Dispatcher::new(client),
            jobs,
            root_url,
        }
    }

    pub async fn on_completed(&self, event: &BuildOutcomeEvent) -> NotifyOutcome {
        let config = match self.jobs.job_config(&event.job_name) {
            Some(config) => config,
            None => {
                error!("No notification configured for job '{}'", event.job_name);
                return NotifyOutcome::NoConfiguration;
            }
        };
        if config.webhook_url.is_empty() {
            error!("No webhook URL provided for job '{}'", event.job_name);
        }
        let decision = match evaluate(&config, event.result.as_ref()) {
            Some(decision) => decision,
            None => return NotifyOutcome::Skipped,
        };
        let root_url = self.root_url.root_url();
        let payload = build_payload(event, root_url.as_deref(), Some(&decision));
        match serde_json::to_string(&payload) {
            Ok(json) => info!("Build payload {}", json),
            Err(e) => error!("Failed to render build payload: {}", e),
        }
        let status = self.dispatcher.dispatch(&config.webhook_url, &payload).await;
        NotifyOutcome::Dispatched(status)
    }
}
