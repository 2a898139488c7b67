use crate::build::BuildResult;
use log::{debug, error};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Incident priority attached to a failure-class notification.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    #[serde(rename = "critical")]
    Critical,

    #[serde(rename = "high")]
    High,

    #[serde(rename = "moderate")]
    Moderate,

    #[serde(rename = "low")]
    Low,

    #[serde(rename = "informational")]
    Informational,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Moderate,
        Severity::Low,
        Severity::Informational,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Moderate => "moderate",
            Severity::Low => "low",
            Severity::Informational => "informational",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "P1-Critical",
            Severity::High => "P2-High",
            Severity::Moderate => "P3-Moderate",
            Severity::Low => "P4-Low",
            Severity::Informational => "P5-Informational",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Ordered `(label, value)` pairs offered by every severity dropdown.
pub fn severity_options() -> [(&'static str, &'static str); 5] {
    Severity::ALL.map(|severity| (severity.label(), severity.value()))
}

/// Per-job notification settings.
///
/// An unset severity selection suppresses the notification for that outcome even
/// when its flag is on.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct JobNotificationConfig {
    pub webhook_url: String,
    pub notify_on_failure: bool,
    pub notify_on_unstable: bool,
    pub notify_on_aborted: bool,
    pub notify_on_resolve: bool,
    pub failure_severity: Option<Severity>,
    pub unstable_severity: Option<Severity>,
    pub aborted_severity: Option<Severity>,
}

impl JobNotificationConfig {
    /// Gates every notification, including resolve ones. `notify_on_resolve` does
    /// not count towards it.
    pub fn any_outcome_enabled(&self) -> bool {
        self.notify_on_failure || self.notify_on_unstable || self.notify_on_aborted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Resolved,
    Failure,
    Unstable,
    Aborted,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Resolved => "resolved",
            Status::Failure => "failure",
            Status::Unstable => "unstable",
            Status::Aborted => "aborted",
        }
    }
}

/// Severity reported alongside a status. Resolutions always clear the incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSeverity {
    Clear,
    Level(Severity),
}

impl DecisionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSeverity::Clear => "clear",
            DecisionSeverity::Level(severity) => severity.value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub status: Status,
    pub severity: DecisionSeverity,
}

impl Decision {
    fn new(status: Status, severity: DecisionSeverity) -> Self {
        Self { status, severity }
    }
}

/// Decides whether a build result should be reported and with what status/severity.
pub fn evaluate(config: &JobNotificationConfig, result: Option<&BuildResult>) -> Option<Decision> {
    let result = match result {
        Some(BuildResult::Unknown) => {
            error!("Build result did not match any known result");
            return None;
        }
        Some(result) => result,
        None => {
            error!("No build result");
            return None;
        }
    };
    if !config.any_outcome_enabled() {
        debug!("No failure-class outcome enabled, skipping {} result", result);
        return None;
    }
    let decision = match result {
        BuildResult::Success if config.notify_on_resolve => {
            Some(Decision::new(Status::Resolved, DecisionSeverity::Clear))
        }
        BuildResult::Failure if config.notify_on_failure => config
            .failure_severity
            .map(|severity| Decision::new(Status::Failure, DecisionSeverity::Level(severity))),
        BuildResult::Unstable if config.notify_on_unstable => config
            .unstable_severity
            .map(|severity| Decision::new(Status::Unstable, DecisionSeverity::Level(severity))),
        BuildResult::Aborted if config.notify_on_aborted => config
            .aborted_severity
            .map(|severity| Decision::new(Status::Aborted, DecisionSeverity::Level(severity))),
        _ => None,
    };
    if decision.is_none() {
        debug!("Notification not enabled for {} result", result);
    }
    decision
}
