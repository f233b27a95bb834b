//! Normalizer — maps a loosely-typed provider document into `JobSearchResult`.
//!
//! Never fails. Missing or mistyped fields become empty strings; entries of
//! `jobs_results` that are not JSON objects produce no listing.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use crate::models::job::{JobListing, JobSearchResult};

const JOBS_RESULTS: &str = "jobs_results";

// ────────────────────────────────────────────────────────────────────────────
// Raw provider shapes (every field optional, decoded leniently)
// ────────────────────────────────────────────────────────────────────────────

/// One `jobs_results` entry before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawProviderRecord {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub detected_extensions: Option<DetectedExtensions>,
    /// First entry of `extensions`; the provider puts salary there when known.
    #[serde(rename = "extensions", deserialize_with = "lenient_first")]
    pub first_extension: Option<String>,
    #[serde(rename = "apply_options", deserialize_with = "lenient_first")]
    pub first_apply_option: Option<ApplyOption>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetectedExtensions {
    #[serde(deserialize_with = "lenient")]
    pub posted_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub schedule_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplyOption {
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,
}

/// Decodes `T` if the value has the right shape, otherwise `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Like `lenient`, but for the first element of an array.
fn lenient_first<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .and_then(|first| T::deserialize(first).ok()),
        _ => None,
    })
}

impl RawProviderRecord {
    /// Builds the output listing. `position` is the 1-based index of this
    /// record in the raw `jobs_results` array.
    pub fn into_listing(self, position: usize) -> JobListing {
        let detected = self.detected_extensions.unwrap_or_default();

        JobListing {
            id: position.to_string(),
            title: self.title.unwrap_or_default(),
            company: self.company_name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            salary: self.first_extension.unwrap_or_default(),
            employment_type: detected.schedule_type.unwrap_or_default(),
            posted: detected.posted_at.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            url: self
                .first_apply_option
                .and_then(|option| option.link)
                .unwrap_or_default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Converts a raw provider document into listings.
///
/// Ids are the 1-based position in the raw array, assigned before non-object
/// entries are dropped, so a skipped entry leaves a gap in the numbering.
pub fn normalize(document: &Value) -> JobSearchResult {
    let Some(results) = jobs_results(document) else {
        return JobSearchResult::default();
    };

    let jobs = results
        .iter()
        .enumerate()
        .filter_map(|(index, item)| normalize_record(index + 1, item))
        .collect();

    JobSearchResult { jobs }
}

/// Number of raw entries in `jobs_results`, or `None` when the field is
/// absent or not an array.
pub fn raw_result_count(document: &Value) -> Option<usize> {
    jobs_results(document).map(Vec::len)
}

fn jobs_results(document: &Value) -> Option<&Vec<Value>> {
    document.get(JOBS_RESULTS).and_then(Value::as_array)
}

fn normalize_record(position: usize, item: &Value) -> Option<JobListing> {
    if !item.is_object() {
        return None;
    }

    // Every field is lenient, so an object always decodes.
    let job = RawProviderRecord::deserialize(item)
        .unwrap_or_default()
        .into_listing(position);

    Some(job)
}
