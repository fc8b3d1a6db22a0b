//! Employee assignment: the form page and its submission.

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
use crate::models::issue::{self, Employee, IssueSource};
use crate::templates_structs::{AssignFormTemplate, PageContext};
use crate::views::Page;

#[derive(Deserialize)]
pub struct AssignForm {
    pub csrf_token: String,
    pub name: String,
    pub contact: String,
}

pub fn validate_assign_form(form: &AssignForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push("Employee name is required".to_string());
    }
    if form.contact.trim().is_empty() {
        errors.push("Contact info is required".to_string());
    }
    errors
}

/// GET /issues/{id}/assign — the assignment form. Without a valid selection
/// there is nothing to render, so unknown ids bounce back to the issues list.
pub async fn form(
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let issue = match feed.get(&id) {
        Some(issue) => issue,
        None => {
            return Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/issues"))
                .finish())
        }
    };
    let ctx = PageContext::build(&session, Page::Assign, feed.is_live());
    render(AssignFormTemplate { ctx, issue, errors: vec![] })
}

/// POST /issues/{id}/assign — set the employee and force status to
/// "In Progress" in one write, then navigate back to the issues view.
pub async fn submit(
    pool: web::Data<PgPool>,
    cfg: web::Data<AppConfig>,
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
    path: web::Path<String>,
    form: web::Form<AssignForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let errors = validate_assign_form(&form);
    if !errors.is_empty() {
        let issue = feed.get(&id).ok_or(AppError::NotFound)?;
        let ctx = PageContext::build(&session, Page::Assign, feed.is_live());
        return render(AssignFormTemplate { ctx, issue, errors });
    }

    let employee = Employee {
        name: form.name.trim().to_string(),
        contact: form.contact.trim().to_string(),
    };

    match IssueSource::of_id(&id) {
        IssueSource::Demo => {
            if !feed.assign_demo(&id, employee) {
                return Err(AppError::NotFound);
            }
            set_flash(&session, "Employee assigned");
        }
        IssueSource::Store => {
            match issue::assign_employee(&pool, &cfg.tenant_id, &id, &employee).await {
                Ok(true) => set_flash(&session, "Employee assigned"),
                Ok(false) => return Err(AppError::NotFound),
                Err(e) => {
                    log::error!("Error assigning employee to {id}: {e}");
                    set_flash(&session, "Could not assign employee");
                }
            }
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
    fn blank_fields_are_rejected() {
        let form = AssignForm {
            csrf_token: String::new(),
            name: "  ".to_string(),
            contact: String::new(),
        };
        assert_eq!(validate_assign_form(&form).len(), 2);
    }

    #[test]
    fn filled_form_passes() {
        let form = AssignForm {
            csrf_token: String::new(),
            name: "Ravi Kumar".to_string(),
            contact: "Electrical Dept.".to_string(),
        };
        assert!(validate_assign_form(&form).is_empty());
    }
}
