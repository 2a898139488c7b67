use serde::de::{self, Deserializer};
use serde_derive::Deserialize;
use std::fmt;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum BuildResult {
    #[serde(rename = "SUCCESS")]
    Success,

    #[serde(rename = "FAILURE")]
    Failure,

    #[serde(rename = "UNSTABLE")]
    Unstable,

    #[serde(rename = "ABORTED")]
    Aborted,

    #[serde(other)]
    Unknown,
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Failure => "FAILURE",
            BuildResult::Unstable => "UNSTABLE",
            BuildResult::Aborted => "ABORTED",
            BuildResult::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// A completed build, as reported by the job execution host.
///
/// Every descriptive field is optional on the wire: anything the host leaves out
/// degrades to an empty string (or 0 for the build number).
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOutcomeEvent {
    pub result: Option<BuildResult>,
    #[serde(deserialize_with = "null_as_default")]
    pub build_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub build_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_status_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_status_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_time: String,
}

/// Host fields may be explicitly `null`; those degrade like missing ones.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: de::Deserialize<'de> + Default,
{
    let value = <Option<T> as de::Deserialize>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl BuildOutcomeEvent {
    /// The absolute build URL, or just the build path when the host has no root URL.
    pub fn build_url(&self, root_url: Option<&str>) -> String {
        match root_url {
            Some(root_url) => format!("{}{}", root_url, self.build_path),
            None => self.build_path.clone(),
        }
    }
}
