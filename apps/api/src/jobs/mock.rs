//! Sample listings served when no provider key is configured.

use crate::models::job::{JobListing, JobSearchResult};

/// Three fixed listings with `query` in the titles. Listing 2 is always
/// "Remote"; the others echo `location`.
pub fn mock_jobs(query: &str, location: &str) -> JobSearchResult {
    JobSearchResult {
        jobs: vec![
            JobListing {
                id: "1".to_string(),
                title: format!("Senior {query}"),
                company: "Tech Corp".to_string(),
                location: location.to_string(),
                salary: "Rp 15,000,000 - Rp 25,000,000".to_string(),
                employment_type: "Full-time".to_string(),
                posted: "2 days ago".to_string(),
                description: "Looking for experienced developer with 5+ years experience in modern technologies...".to_string(),
                url: "https://example.com/job/1".to_string(),
            },
            JobListing {
                id: "2".to_string(),
                title: query.to_string(),
                company: "StartupXYZ".to_string(),
                location: "Remote".to_string(),
                salary: "Rp 20,000,000 - Rp 30,000,000".to_string(),
                employment_type: "Full-time".to_string(),
                posted: "1 day ago".to_string(),
                description: "Join our growing team to build scalable applications...".to_string(),
                url: "https://example.com/job/2".to_string(),
            },
            JobListing {
                id: "3".to_string(),
                title: format!("Junior {query}"),
                company: "Digital Agency".to_string(),
                location: location.to_string(),
                salary: "Rp 12,000,000 - Rp 18,000,000".to_string(),
                employment_type: "Contract".to_string(),
                posted: "5 days ago".to_string(),
                description: "We need a versatile developer who can work on various projects...".to_string(),
                url: "https://example.com/job/3".to_string(),
            },
        ],
    }
}
