//! Status transitions from the issues and resolved views.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::feed::IssueFeed;
use crate::models::issue::{self, IssueSource, IssueStatus};

#[derive(Deserialize)]
pub struct StatusForm {
    pub csrf_token: String,
    pub status: String,
    /// View to return to; defaults to the issues list.
    pub next: Option<String>,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.to_string()))
        .finish()
}

fn return_path(next: &Option<String>) -> &str {
    match next.as_deref() {
        Some("/resolved") => "/resolved",
        _ => "/issues",
    }
}

/// POST /issues/{id}/status — set the status of one record. Demonstration
/// records are mutated locally; store records get a partial update and the
/// page keeps showing prior state until the subscription echoes the write.
pub async fn update_status(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let status = match IssueStatus::parse_canonical(&form.status) {
        Some(s) => s,
        None => {
            set_flash(&session, "Unknown status value");
            return Ok(see_other(return_path(&form.next)));
        }
    };

    match IssueSource::of_id(&id) {
        IssueSource::Demo => {
            if !feed.set_demo_status(&id, status) {
                return Err(AppError::NotFound);
            }
        }
        IssueSource::Store => {
            match issue::set_status(&pool, &cfg.tenant_id, &id, &status).await {
                Ok(true) => {}
                Ok(false) => return Err(AppError::NotFound),
                Err(e) => {
                    log::error!("Error updating status of {id}: {e}");
                    set_flash(&session, "Could not update status");
                }
            }
        }
    }

    Ok(see_other(return_path(&form.next)))
}
