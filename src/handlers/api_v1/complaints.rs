//! JSON surface over the complaint collection, used by the citizen portal and
//! by admin tooling. Operates on store records only; demonstration ids do not
//! exist at this surface.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::issue::{self, Employee, Issue, IssueStatus, NewIssue};

/// Wire shape of a complaint record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiComplaint {
    pub id: String,
    pub reporter_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_phone: Option<String>,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub status: IssueStatus,
    pub employee: Option<Employee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Issue> for ApiComplaint {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id,
            reporter_name: issue.reporter_name,
            reporter_phone: issue.reporter_phone,
            description: issue.description,
            address: issue.address,
            image_url: issue.image_url,
            status: issue.status,
            employee: issue.employee,
            resolved_image_url: issue.resolved_image_url,
            resolved_at: issue.resolved_at,
            created_at: issue.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaint {
    pub reporter_name: String,
    #[serde(default)]
    pub reporter_phone: Option<String>,
    pub description: String,
    pub address: String,
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    pub name: String,
    pub contact: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveBody {
    pub resolved_image_url: String,
}

/// GET /api/v1/complaints — the full collection, newest first.
pub async fn list(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let issues = issue::find_all(&pool, &cfg.tenant_id).await?;
    let items: Vec<ApiComplaint> = issues.into_iter().map(ApiComplaint::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/v1/complaints/{id}
pub async fn read(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let issue = issue::find_by_id(&pool, &cfg.tenant_id, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ApiComplaint::from(issue)))
}

/// POST /api/v1/complaints — the citizen-portal submission path.
pub async fn create(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    body: web::Json<CreateComplaint>,
) -> Result<HttpResponse, AppError> {
    let mut errors = Vec::new();
    if body.reporter_name.trim().is_empty() {
        errors.push("reporterName is required".to_string());
    }
    if body.description.trim().is_empty() {
        errors.push("description is required".to_string());
    }
    if body.address.trim().is_empty() {
        errors.push("address is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let new = NewIssue {
        reporter_name: body.reporter_name.trim().to_string(),
        reporter_phone: body.reporter_phone.clone(),
        description: body.description.trim().to_string(),
        address: body.address.trim().to_string(),
    };
    let id = issue::create(&pool, &cfg.tenant_id, &new).await?;
    let created = issue::find_by_id(&pool, &cfg.tenant_id, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(ApiComplaint::from(created)))
}

/// PUT /api/v1/complaints/{id}/status
pub async fn update_status(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    path: web::Path<String>,
    body: web::Json<StatusBody>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = IssueStatus::parse_canonical(&body.status).ok_or_else(|| {
        AppError::Validation(vec![
            "status must be one of: active, In Progress, Resolved".to_string(),
        ])
    })?;

    if !issue::set_status(&pool, &cfg.tenant_id, &id, &status).await? {
        return Err(AppError::NotFound);
    }
    let updated = issue::find_by_id(&pool, &cfg.tenant_id, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ApiComplaint::from(updated)))
}

/// PUT /api/v1/complaints/{id}/assign — one write sets the employee and forces
/// status to "In Progress".
pub async fn assign(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    path: web::Path<String>,
    body: web::Json<AssignBody>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if body.name.trim().is_empty() || body.contact.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "name and contact are required".to_string(),
        ]));
    }

    let employee = Employee {
        name: body.name.trim().to_string(),
        contact: body.contact.trim().to_string(),
    };
    if !issue::assign_employee(&pool, &cfg.tenant_id, &id, &employee).await? {
        return Err(AppError::NotFound);
    }
    let updated = issue::find_by_id(&pool, &cfg.tenant_id, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ApiComplaint::from(updated)))
}

/// PUT /api/v1/complaints/{id}/resolve — resolution with a proof photo.
pub async fn resolve(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    path: web::Path<String>,
    body: web::Json<ResolveBody>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if body.resolved_image_url.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "resolvedImageUrl is required".to_string(),
        ]));
    }

    if !issue::resolve_with_proof(&pool, &cfg.tenant_id, &id, body.resolved_image_url.trim())
        .await?
    {
        return Err(AppError::NotFound);
    }
    let updated = issue::find_by_id(&pool, &cfg.tenant_id, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ApiComplaint::from(updated)))
}
