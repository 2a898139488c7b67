use crate::notification::{JobConfigProvider, JobNotificationConfig, RootUrlProvider};
use config::{Config, ConfigError, Environment, File};
use serde_derive::Deserialize;
use std::time::Duration;

#[derive(Deserialize, Debug, Default)]
pub struct NotifierConfig {
    #[serde(default)]
    pub root_url: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub jobs: Vec<JobEntry>,
}

#[derive(Deserialize, Debug)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    fn default_timeout_secs() -> u64 {
        30
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct JobEntry {
    pub name: String,
    #[serde(flatten)]
    pub notification: JobNotificationConfig,
}

impl NotifierConfig {
    pub fn new(config_file_path: &str) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        let config_file_path = shellexpand::tilde(config_file_path);
        config.merge(File::with_name(&config_file_path).required(false))?;
        config.merge(Environment::with_prefix("lightstep_notifier").separator("__"))?;
        config.try_into()
    }
}

impl JobConfigProvider for NotifierConfig {
    fn job_config(&self, job_name: &str) -> Option<JobNotificationConfig> {
        self.jobs
            .iter()
            .find(|job| job.name == job_name)
            .map(|job| job.notification.clone())
    }
}

impl RootUrlProvider for NotifierConfig {
    fn root_url(&self) -> Option<String> {
        self.root_url.clone().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Severity;
    use config::FileFormat;

    const YAML: &str = r#"
root_url: "https://ci.example.com/"
http:
  timeout_secs: 5
jobs:
  - name: Backend-Deploy
    webhook_url: "https://events.lightstep.com/wh"
    notify_on_failure: true
    notify_on_resolve: true
    failure_severity: high
  - name: nightly
    webhook_url: ""
"#;

    fn parse(yaml: &str) -> NotifierConfig {
        let mut config = Config::new();
        config.merge(File::from_str(yaml, FileFormat::Yaml)).unwrap();
        config.try_into().unwrap()
    }

    #[test]
    fn jobs_from_yaml() {
        let config = parse(YAML);
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.root_url().as_deref(), Some("https://ci.example.com/"));

        let job = config.job_config("Backend-Deploy").unwrap();
        assert_eq!(job.webhook_url, "https://events.lightstep.com/wh");
        assert!(job.notify_on_failure);
        assert!(job.notify_on_resolve);
        assert!(!job.notify_on_unstable);
        assert_eq!(job.failure_severity, Some(Severity::High));
        assert_eq!(job.unstable_severity, None);

        let nightly = config.job_config("nightly").unwrap();
        assert!(!nightly.any_outcome_enabled());
        assert!(config.job_config("backend-deploy").is_none());
    }

    #[test]
    fn defaults() {
        let config = parse("jobs: []");
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.root_url(), None);
        assert!(config.job_config("anything").is_none());
    }
}
