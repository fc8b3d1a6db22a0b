//! Derived dashboard metrics — counts and the resolution percentage.

mod common;

use civictrack::models::issue::IssueStatus;
use civictrack::models::metrics::DashboardMetrics;
use common::store_issue;

#[test]
fn one_resolved_of_three_is_33_percent() {
    let issues = vec![
        store_issue("a", 1, IssueStatus::Active),
        store_issue("b", 2, IssueStatus::InProgress),
        store_issue("c", 3, IssueStatus::Resolved),
    ];
    let m = DashboardMetrics::compute(&issues);
    assert_eq!(m.total, 3);
    assert_eq!(m.pending, 1);
    assert_eq!(m.in_progress, 1);
    assert_eq!(m.resolved, 1);
    assert_eq!(m.resolution_pct, 33);
}

#[test]
fn empty_list_has_zero_percentage() {
    assert_eq!(DashboardMetrics::compute(&[]).resolution_pct, 0);
}

#[test]
fn unknown_statuses_count_toward_total_only() {
    let issues = vec![
        store_issue("a", 1, IssueStatus::Other("escalated".to_string())),
        store_issue("b", 2, IssueStatus::Resolved),
    ];
    let m = DashboardMetrics::compute(&issues);
    assert_eq!(m.total, 2);
    assert_eq!(m.pending, 0);
    assert_eq!(m.in_progress, 0);
    assert_eq!(m.resolved, 1);
    assert_eq!(m.resolution_pct, 50);
}
