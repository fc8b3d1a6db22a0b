//! The Issue (complaint) entity: status and origin enums, the bundled
//! demonstration records, and all store queries.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Reserved id prefix for the bundled demonstration records. Mutations against
/// these ids are routed to local state, never to the store.
pub const DEMO_PREFIX: &str = "demo-";

/// Placeholder photo attached to issues added manually from the admin form.
pub const ADMIN_PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/600x400/F1F8E8/000000?text=Admin+Added";

/// Complaint status. The dashboard only ever writes the three canonical values;
/// records inserted by external tooling may carry anything, which is preserved
/// verbatim and partitions as not-resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueStatus {
    Active,
    InProgress,
    Resolved,
    Other(String),
}

impl IssueStatus {
    pub fn from_db(s: &str) -> Self {
        match s {
            "active" => IssueStatus::Active,
            "In Progress" => IssueStatus::InProgress,
            "Resolved" => IssueStatus::Resolved,
            other => IssueStatus::Other(other.to_string()),
        }
    }

    /// Parse a status submitted from the admin form surface. Only the three
    /// canonical values are accepted there.
    pub fn parse_canonical(s: &str) -> Option<Self> {
        match s {
            "active" => Some(IssueStatus::Active),
            "In Progress" => Some(IssueStatus::InProgress),
            "Resolved" => Some(IssueStatus::Resolved),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IssueStatus::Active => "active",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Other(s) => s,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, IssueStatus::Resolved)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IssueStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IssueStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(IssueStatus::from_db(&s))
    }
}

/// Where a record lives: the remote collection, or the bundled demonstration
/// set whose mutations stay local. Tagged explicitly on each record rather than
/// re-derived from the id text at every branch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSource {
    Store,
    Demo,
}

impl IssueSource {
    /// The id-prefix convention: demonstration ids carry [`DEMO_PREFIX`],
    /// store-issued ids are UUIDs and never do.
    pub fn of_id(id: &str) -> Self {
        if id.starts_with(DEMO_PREFIX) {
            IssueSource::Demo
        } else {
            IssueSource::Store
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub id: String,
    pub source: IssueSource,
    pub reporter_name: String,
    pub reporter_phone: Option<String>,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub status: IssueStatus,
    pub employee: Option<Employee>,
    pub resolved_image_url: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Issue {
    pub fn created_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn employee_display(&self) -> String {
        match &self.employee {
            Some(emp) => emp.name.clone(),
            None => "N/A".to_string(),
        }
    }
}

/// Row shape of the `complaints` table. `created_at` is nullable on the wire;
/// the mapping coerces a missing value to now instead of failing the snapshot.
#[derive(Debug, sqlx::FromRow)]
pub struct ComplaintRow {
    pub id: String,
    pub reporter_name: String,
    pub reporter_phone: Option<String>,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub status: String,
    pub employee_name: Option<String>,
    pub employee_contact: Option<String>,
    pub resolved_image_url: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ComplaintRow> for Issue {
    fn from(row: ComplaintRow) -> Self {
        let employee = match (row.employee_name, row.employee_contact) {
            (Some(name), contact) => Some(Employee {
                name,
                contact: contact.unwrap_or_default(),
            }),
            _ => None,
        };
        Issue {
            source: IssueSource::of_id(&row.id),
            id: row.id,
            reporter_name: row.reporter_name,
            reporter_phone: row.reporter_phone,
            description: row.description,
            address: row.address,
            image_url: row.image_url,
            status: IssueStatus::from_db(&row.status),
            employee,
            resolved_image_url: row.resolved_image_url,
            resolved_at: row.resolved_at,
            created_at: row.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// The fixed demonstration records shown when the remote collection is empty.
pub fn demo_issues() -> Vec<Issue> {
    vec![
        Issue {
            id: format!("{DEMO_PREFIX}1"),
            source: IssueSource::Demo,
            reporter_name: "Priya S.".to_string(),
            reporter_phone: None,
            description: "Large pothole on Sardar Patel Road near Adyar signal, \
                          causing severe traffic jams."
                .to_string(),
            address: "Sardar Patel Road, Adyar, Chennai".to_string(),
            image_url: "https://placehold.co/600x400/F1F8E8/000000?text=Pothole+Issue"
                .to_string(),
            status: IssueStatus::Active,
            employee: None,
            resolved_image_url: None,
            resolved_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 9, 5, 10, 0, 0).unwrap(),
        },
        Issue {
            id: format!("{DEMO_PREFIX}2"),
            source: IssueSource::Demo,
            reporter_name: "Kumar R.".to_string(),
            reporter_phone: None,
            description: "Streetlight number P-15 is not working for the past week. \
                          It is very dark and unsafe at night."
                .to_string(),
            address: "Thiruvalluvar Salai, T. Nagar, Chennai".to_string(),
            image_url: "https://placehold.co/600x400/F1F8E8/000000?text=Broken+Streetlight"
                .to_string(),
            status: IssueStatus::InProgress,
            employee: Some(Employee {
                name: "Ravi Kumar".to_string(),
                contact: "Electrical Dept.".to_string(),
            }),
            resolved_image_url: None,
            resolved_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 9, 3, 14, 30, 0).unwrap(),
        },
        Issue {
            id: format!("{DEMO_PREFIX}3"),
            source: IssueSource::Demo,
            reporter_name: "Anjali V.".to_string(),
            reporter_phone: None,
            description: "Garbage has been overflowing from the public bin for over \
                          3 days. It is starting to smell."
                .to_string(),
            address: "Velachery Main Road, Velachery, Chennai".to_string(),
            image_url: "https://placehold.co/600x400/F1F8E8/000000?text=Garbage+Overflow"
                .to_string(),
            status: IssueStatus::Resolved,
            employee: Some(Employee {
                name: "Suresh M.".to_string(),
                contact: "Sanitation Dept.".to_string(),
            }),
            resolved_image_url: None,
            resolved_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 9, 1, 9, 15, 0).unwrap(),
        },
    ]
}

pub struct NewIssue {
    pub reporter_name: String,
    pub reporter_phone: Option<String>,
    pub description: String,
    pub address: String,
}

/// Column values for a freshly appended complaint. The caller only supplies
/// the reporter's input; status, employee, and image are fixed here, so every
/// created record starts "active", unassigned, with the placeholder photo.
pub struct InsertComplaint {
    pub reporter_name: String,
    pub reporter_phone: Option<String>,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub status: IssueStatus,
    pub employee: Option<Employee>,
}

impl From<&NewIssue> for InsertComplaint {
    fn from(new: &NewIssue) -> Self {
        Self {
            reporter_name: new.reporter_name.clone(),
            reporter_phone: new.reporter_phone.clone(),
            description: new.description.clone(),
            address: new.address.clone(),
            image_url: ADMIN_PLACEHOLDER_IMAGE.to_string(),
            status: IssueStatus::Active,
            employee: None,
        }
    }
}

const SELECT_COLUMNS: &str = "id, reporter_name, reporter_phone, description, address, \
                              image_url, status, employee_name, employee_contact, \
                              resolved_image_url, resolved_at, created_at";

/// Fetch the full complaint collection for a tenant, newest first.
pub async fn find_all(pool: &PgPool, tenant_id: &str) -> Result<Vec<Issue>, sqlx::Error> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM complaints \
         WHERE tenant_id = $1 \
         ORDER BY created_at DESC NULLS FIRST"
    );
    let rows = sqlx::query_as::<_, ComplaintRow>(&sql)
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Issue::from).collect())
}

pub async fn find_by_id(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
) -> Result<Option<Issue>, sqlx::Error> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM complaints WHERE tenant_id = $1 AND id = $2");
    let row = sqlx::query_as::<_, ComplaintRow>(&sql)
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Issue::from))
}

/// Partial update of the status column only. Returns false if no such record.
pub async fn set_status(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    status: &IssueStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE complaints SET status = $1 WHERE tenant_id = $2 AND id = $3")
        .bind(status.as_str())
        .bind(tenant_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Set the assigned employee and force status to "In Progress" in one write.
pub async fn assign_employee(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    employee: &Employee,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE complaints \
         SET employee_name = $1, employee_contact = $2, status = 'In Progress' \
         WHERE tenant_id = $3 AND id = $4",
    )
    .bind(&employee.name)
    .bind(&employee.contact)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Append a new complaint. The store assigns the id and timestamp; status is
/// forced to "active", the employee to absent, and the image to the admin
/// placeholder.
pub async fn create(
    pool: &PgPool,
    tenant_id: &str,
    new: &NewIssue,
) -> Result<String, sqlx::Error> {
    let row = InsertComplaint::from(new);
    let (employee_name, employee_contact) = match &row.employee {
        Some(emp) => (Some(emp.name.clone()), Some(emp.contact.clone())),
        None => (None, None),
    };
    let id: (String,) = sqlx::query_as(
        "INSERT INTO complaints \
             (tenant_id, reporter_name, reporter_phone, description, address, \
              image_url, status, employee_name, employee_contact, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
         RETURNING id",
    )
    .bind(tenant_id)
    .bind(&row.reporter_name)
    .bind(&row.reporter_phone)
    .bind(&row.description)
    .bind(&row.address)
    .bind(&row.image_url)
    .bind(row.status.as_str())
    .bind(employee_name)
    .bind(employee_contact)
    .fetch_one(pool)
    .await?;
    Ok(id.0)
}

/// Resolve a complaint with a proof photo: status, proof URL, and resolution
/// time move together in a single write.
pub async fn resolve_with_proof(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
    resolved_image_url: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE complaints \
         SET status = 'Resolved', resolved_image_url = $1, resolved_at = now() \
         WHERE tenant_id = $2 AND id = $3",
    )
    .bind(resolved_image_url)
    .bind(tenant_id)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_canonical_values() {
        for s in ["active", "In Progress", "Resolved"] {
            assert_eq!(IssueStatus::from_db(s).as_str(), s);
            assert!(IssueStatus::parse_canonical(s).is_some());
        }
    }

    #[test]
    fn unknown_status_is_preserved_verbatim() {
        let status = IssueStatus::from_db("escalated");
        assert_eq!(status, IssueStatus::Other("escalated".to_string()));
        assert_eq!(status.as_str(), "escalated");
        assert!(!status.is_resolved());
        assert!(IssueStatus::parse_canonical("escalated").is_none());
    }

    #[test]
    fn source_follows_id_prefix() {
        assert_eq!(IssueSource::of_id("demo-1"), IssueSource::Demo);
        assert_eq!(
            IssueSource::of_id("5f7a1c2e-0000-0000-0000-000000000000"),
            IssueSource::Store
        );
    }

    #[test]
    fn demo_set_is_three_prefixed_records() {
        let demos = demo_issues();
        assert_eq!(demos.len(), 3);
        for issue in &demos {
            assert!(issue.id.starts_with(DEMO_PREFIX));
            assert_eq!(issue.source, IssueSource::Demo);
        }
    }

    #[test]
    fn missing_created_at_is_coerced_to_now() {
        let row = ComplaintRow {
            id: "x".to_string(),
            reporter_name: "R".to_string(),
            reporter_phone: None,
            description: "d".to_string(),
            address: "a".to_string(),
            image_url: "".to_string(),
            status: "active".to_string(),
            employee_name: None,
            employee_contact: None,
            resolved_image_url: None,
            resolved_at: None,
            created_at: None,
        };
        let before = Utc::now();
        let issue = Issue::from(row);
        assert!(issue.created_at >= before);
    }

    #[test]
    fn created_issues_start_active_and_unassigned() {
        let new = NewIssue {
            reporter_name: "Priya S.".to_string(),
            reporter_phone: Some("98400 00000".to_string()),
            description: "Pothole near the signal".to_string(),
            address: "Adyar, Chennai".to_string(),
        };
        let row = InsertComplaint::from(&new);
        assert_eq!(row.status, IssueStatus::Active);
        assert!(row.employee.is_none());
        assert_eq!(row.image_url, ADMIN_PLACEHOLDER_IMAGE);
        assert_eq!(row.reporter_name, new.reporter_name);
        assert_eq!(row.reporter_phone, new.reporter_phone);
    }

    #[test]
    fn employee_requires_a_name() {
        let row = ComplaintRow {
            id: "x".to_string(),
            reporter_name: "R".to_string(),
            reporter_phone: None,
            description: "d".to_string(),
            address: "a".to_string(),
            image_url: "".to_string(),
            status: "active".to_string(),
            employee_name: None,
            employee_contact: Some("orphaned contact".to_string()),
            resolved_image_url: None,
            resolved_at: None,
            created_at: Some(Utc::now()),
        };
        assert!(Issue::from(row).employee.is_none());
    }
}
