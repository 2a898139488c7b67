use super::policy::Decision;
use crate::build::BuildOutcomeEvent;
use serde_derive::Serialize;

/// The JSON document posted to the webhook.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    #[serde(rename = "buildName")]
    pub build_name: String,

    #[serde(rename = "jobName")]
    pub job_name: String,

    #[serde(rename = "buildUrl")]
    pub build_url: String,

    #[serde(rename = "buildNum")]
    pub build_num: u64,

    #[serde(rename = "buildId")]
    pub build_id: String,

    #[serde(rename = "buildStatusURL")]
    pub build_status_url: String,

    #[serde(rename = "buildStatusSummary")]
    pub build_status_summary: String,

    #[serde(rename = "buildDuration")]
    pub build_duration: String,

    #[serde(rename = "buildTime")]
    pub build_time: String,

    pub source_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<&'static str>,
}

pub fn build_payload(
    event: &BuildOutcomeEvent,
    root_url: Option<&str>,
    decision: Option<&Decision>,
) -> NotificationPayload {
    let build_url = event.build_url(root_url);
    NotificationPayload {
        build_name: event.build_name.clone(),
        job_name: event.job_name.clone(),
        source_url: build_url.clone(),
        build_url,
        build_num: event.build_number,
        build_id: event.build_id.clone(),
        build_status_url: event.build_status_url.clone(),
        build_status_summary: event.build_status_summary.clone(),
        build_duration: event.build_duration.clone(),
        build_time: event.build_time.clone(),
        status: decision.map(|decision| decision.status.as_str()),
        severity: decision.map(|decision| decision.severity.as_str()),
    }
}
