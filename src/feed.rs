//! The local complaint snapshot and the live subscription that keeps it fresh.
//!
//! `IssueFeed` holds two lists: the last snapshot received from the store, and
//! the bundled demonstration records. The store snapshot is replaced wholesale
//! on every change notification; it is never edited in place, so a write's
//! effect only becomes visible once the store echoes it back. The demonstration
//! list is the opposite: it exists purely in memory and is mutated directly.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use sqlx::postgres::PgListener;
use sqlx::PgPool;

use crate::handlers::ws::ClientRegistry;
use crate::models::issue::{self, demo_issues, Employee, Issue, IssueStatus};

pub const CHANGE_CHANNEL: &str = "complaints_changed";

pub struct IssueFeed {
    store: RwLock<Vec<Issue>>,
    demo: RwLock<Vec<Issue>>,
}

impl Default for IssueFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueFeed {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
            demo: RwLock::new(demo_issues()),
        }
    }

    /// Replace the store snapshot atomically. The incoming set is sorted
    /// newest-first here so every reader sees a consistently ordered list.
    pub fn replace(&self, mut snapshot: Vec<Issue>) {
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let mut store = self.store.write().unwrap();
        *store = snapshot;
    }

    /// The list currently on display: the store snapshot, or the demonstration
    /// records when the store is empty.
    pub fn current(&self) -> Vec<Issue> {
        let store = self.store.read().unwrap();
        if store.is_empty() {
            self.demo.read().unwrap().clone()
        } else {
            store.clone()
        }
    }

    /// Whether real store data is on display (false means demo fallback).
    pub fn is_live(&self) -> bool {
        !self.store.read().unwrap().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Issue> {
        self.current().into_iter().find(|i| i.id == id)
    }

    /// Local-only status change for a demonstration record. Returns false if
    /// the id is not in the demo set.
    pub fn set_demo_status(&self, id: &str, status: IssueStatus) -> bool {
        let mut demo = self.demo.write().unwrap();
        match demo.iter_mut().find(|i| i.id == id) {
            Some(issue) => {
                issue.status = status;
                true
            }
            None => false,
        }
    }

    /// Local-only assignment for a demonstration record; forces the status to
    /// "In Progress" exactly like the store path.
    pub fn assign_demo(&self, id: &str, employee: Employee) -> bool {
        let mut demo = self.demo.write().unwrap();
        match demo.iter_mut().find(|i| i.id == id) {
            Some(issue) => {
                issue.employee = Some(employee);
                issue.status = IssueStatus::InProgress;
                true
            }
            None => false,
        }
    }
}

/// Refetch the collection and swap it into the feed, then tell connected
/// browsers to refresh.
async fn refresh(pool: &PgPool, tenant_id: &str, feed: &IssueFeed, clients: &ClientRegistry) {
    match issue::find_all(pool, tenant_id).await {
        Ok(snapshot) => {
            let count = snapshot.len();
            feed.replace(snapshot);
            log::debug!("Snapshot refreshed: {count} complaints");
            let msg = serde_json::json!({
                "type": "snapshot",
                "count": count,
                "at": Utc::now().to_rfc3339(),
            });
            crate::handlers::ws::broadcast(clients, &msg.to_string());
        }
        Err(e) => log::error!("Snapshot refresh failed: {e}"),
    }
}

/// Standing subscription to the complaint collection. Runs until the task is
/// aborted at shutdown. The schema trigger notifies with the tenant id as
/// payload; notifications for other tenants are ignored. PgListener reconnects
/// on its own after a dropped connection, so recv errors are just logged.
pub async fn run_listener(
    pool: PgPool,
    tenant_id: String,
    feed: Arc<IssueFeed>,
    clients: ClientRegistry,
) {
    let mut listener = match PgListener::connect_with(&pool).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Could not open change listener: {e}");
            return;
        }
    };
    if let Err(e) = listener.listen(CHANGE_CHANNEL).await {
        log::error!("Could not subscribe to {CHANGE_CHANNEL}: {e}");
        return;
    }
    log::info!("Subscribed to {CHANGE_CHANNEL} for tenant {tenant_id}");

    // Initial load before any notification arrives.
    refresh(&pool, &tenant_id, &feed, &clients).await;

    loop {
        match listener.recv().await {
            Ok(notification) => {
                if notification.payload() == tenant_id {
                    refresh(&pool, &tenant_id, &feed, &clients).await;
                }
            }
            Err(e) => {
                log::warn!("Change listener interrupted: {e}");
                // A reconnect may have missed notifications; refetch to be safe.
                refresh(&pool, &tenant_id, &feed, &clients).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::models::issue::{IssueSource, DEMO_PREFIX};

    fn store_issue(id: &str, day: u32, status: IssueStatus) -> Issue {
        Issue {
            id: id.to_string(),
            source: IssueSource::Store,
            reporter_name: "Reporter".to_string(),
            reporter_phone: None,
            description: "description".to_string(),
            address: "address".to_string(),
            image_url: String::new(),
            status,
            employee: None,
            resolved_image_url: None,
            resolved_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 9, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_store_falls_back_to_demo_records() {
        let feed = IssueFeed::new();
        let current = feed.current();
        assert_eq!(current.len(), 3);
        assert!(current.iter().all(|i| i.id.starts_with(DEMO_PREFIX)));
    }

    #[test]
    fn replace_sorts_newest_first() {
        let feed = IssueFeed::new();
        feed.replace(vec![
            store_issue("a", 1, IssueStatus::Active),
            store_issue("b", 9, IssueStatus::Active),
            store_issue("c", 4, IssueStatus::Active),
        ]);
        let current = feed.current();
        let ids: Vec<&str> = current.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(current.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }

    #[test]
    fn non_empty_snapshot_hides_demo_records() {
        let feed = IssueFeed::new();
        feed.replace(vec![store_issue("a", 1, IssueStatus::Active)]);
        assert!(feed.is_live());
        assert_eq!(feed.current().len(), 1);
        assert_eq!(feed.current()[0].id, "a");
    }

    #[test]
    fn empty_replace_restores_demo_fallback() {
        let feed = IssueFeed::new();
        feed.replace(vec![store_issue("a", 1, IssueStatus::Active)]);
        feed.replace(Vec::new());
        assert!(!feed.is_live());
        assert_eq!(feed.current().len(), 3);
    }

    #[test]
    fn demo_status_change_stays_local() {
        let feed = IssueFeed::new();
        assert!(feed.set_demo_status("demo-1", IssueStatus::Resolved));
        let updated = feed.get("demo-1").unwrap();
        assert!(updated.status.is_resolved());
        // store snapshot untouched
        assert!(!feed.is_live());
    }

    #[test]
    fn demo_mutation_rejects_unknown_ids() {
        let feed = IssueFeed::new();
        assert!(!feed.set_demo_status("demo-99", IssueStatus::Resolved));
        assert!(!feed.set_demo_status("not-a-demo-id", IssueStatus::Resolved));
    }

    #[test]
    fn demo_assignment_forces_in_progress() {
        let feed = IssueFeed::new();
        // demo-3 starts Resolved; assignment must still move it to In Progress
        let emp = Employee {
            name: "Meena K.".to_string(),
            contact: "Roads Dept.".to_string(),
        };
        assert!(feed.assign_demo("demo-3", emp.clone()));
        let updated = feed.get("demo-3").unwrap();
        assert_eq!(updated.status, IssueStatus::InProgress);
        assert_eq!(updated.employee, Some(emp));
    }
}
