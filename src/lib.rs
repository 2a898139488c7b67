pub mod build;
pub mod client;
pub mod config;
pub mod notification;

pub use crate::config::NotifierConfig;
pub use notification::{BuildListener, JobConfigProvider, RootUrlProvider};
