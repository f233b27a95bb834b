use serde::{Deserialize, Serialize};

/// One job posting as returned to callers. Every field is a display string;
/// absent data is an empty string, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    /// 1-based position within a single response. Not a persistent key.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub posted: String,
    pub description: String,
    pub url: String,
}

/// Ordered listings for one search, in provider (or mock) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSearchResult {
    pub jobs: Vec<JobListing>,
}
