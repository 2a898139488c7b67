pub mod models;

pub use models::{BuildOutcomeEvent, BuildResult};
