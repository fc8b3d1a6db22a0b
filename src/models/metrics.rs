//! Dashboard counters, recomputed from the current snapshot on every render.

use crate::models::issue::{Issue, IssueStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    /// round(100 * resolved / total); 0 when the list is empty.
    pub resolution_pct: u32,
}

impl DashboardMetrics {
    pub fn compute(issues: &[Issue]) -> Self {
        let total = issues.len();
        let pending = issues
            .iter()
            .filter(|i| i.status == IssueStatus::Active)
            .count();
        let in_progress = issues
            .iter()
            .filter(|i| i.status == IssueStatus::InProgress)
            .count();
        let resolved = issues.iter().filter(|i| i.status.is_resolved()).count();
        let resolution_pct = if total == 0 {
            0
        } else {
            (resolved as f64 / total as f64 * 100.0).round() as u32
        };
        Self { total, pending, in_progress, resolved, resolution_pct }
    }
}
