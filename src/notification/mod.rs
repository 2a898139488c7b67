pub mod dispatch;
pub mod listener;
pub mod payload;
pub mod policy;

pub use dispatch::{DispatchStatus, Dispatcher};
pub use listener::{BuildListener, JobConfigProvider, NotifyOutcome, RootUrlProvider};
pub use payload::{build_payload, NotificationPayload};
pub use policy::{evaluate, severity_options, Decision, JobNotificationConfig, Severity, Status};
