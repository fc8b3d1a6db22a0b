//! Manual issue entry from the admin form.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::feed::IssueFeed;
use crate::models::issue::{self, NewIssue};
use crate::templates_structs::{NewIssueTemplate, PageContext};
use crate::views::Page;

#[derive(Deserialize)]
pub struct NewIssueForm {
    pub csrf_token: String,
    pub reporter_name: String,
    pub description: String,
    pub address: String,
}

pub fn validate_new_issue_form(form: &NewIssueForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.reporter_name.trim().is_empty() {
        errors.push("Reporter's name is required".to_string());
    }
    if form.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }
    if form.address.trim().is_empty() {
        errors.push("Address is required".to_string());
    }
    errors
}

/// GET /issues/new
pub async fn form(
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, Page::AddIssue, feed.is_live());
    render(NewIssueTemplate { ctx, errors: vec![] })
}

/// POST /issues — always a store append; the server assigns id and timestamp,
/// status starts "active" with no employee and the placeholder photo. Success
/// navigates back to the issues view.
pub async fn submit(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
    form: web::Form<NewIssueForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = validate_new_issue_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, Page::AddIssue, feed.is_live());
        return render(NewIssueTemplate { ctx, errors });
    }

    let new = NewIssue {
        reporter_name: form.reporter_name.trim().to_string(),
        reporter_phone: None,
        description: form.description.trim().to_string(),
        address: form.address.trim().to_string(),
    };

    match issue::create(&pool, &cfg.tenant_id, &new).await {
        Ok(id) => {
            log::info!("Complaint {id} created from the admin form");
            set_flash(&session, "Issue added");
        }
        Err(e) => {
            log::error!("Error adding new issue: {e}");
            set_flash(&session, "Could not add issue");
        }
    }

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/issues"))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_are_required() {
        let form = NewIssueForm {
            csrf_token: String::new(),
            reporter_name: String::new(),
            description: " ".to_string(),
            address: String::new(),
        };
        assert_eq!(validate_new_issue_form(&form).len(), 3);
    }

    #[test]
    fn complete_form_passes() {
        let form = NewIssueForm {
            csrf_token: String::new(),
            reporter_name: "Priya S.".to_string(),
            description: "Pothole near the signal".to_string(),
            address: "Adyar, Chennai".to_string(),
        };
        assert!(validate_new_issue_form(&form).is_empty());
    }
}
