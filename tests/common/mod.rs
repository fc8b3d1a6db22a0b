//! Shared fixtures for integration tests.

use chrono::{TimeZone, Utc};
use civictrack::models::issue::{Issue, IssueSource, IssueStatus};

/// Build a store-origin issue created on the given September 2025 day.
pub fn store_issue(id: &str, day: u32, status: IssueStatus) -> Issue {
    Issue {
        id: id.to_string(),
        source: IssueSource::Store,
        reporter_name: format!("Reporter {id}"),
        reporter_phone: None,
        description: format!("Complaint {id}"),
        address: "Test Street, Chennai".to_string(),
        image_url: "https://placehold.co/600x400".to_string(),
        status,
        employee: None,
        resolved_image_url: None,
        resolved_at: None,
        created_at: Utc.with_ymd_and_hms(2025, 9, day, 8, 0, 0).unwrap(),
    }
}
