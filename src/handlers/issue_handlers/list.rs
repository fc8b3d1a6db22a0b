use actix_session::Session;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::errors::{render, AppError};
use crate::feed::IssueFeed;
use crate::templates_structs::{IssueListTemplate, PageContext, ResolvedListTemplate};
use crate::views::Page;

/// Active issues table: everything whose status is not Resolved.
pub async fn issues(
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let issues = feed
        .current()
        .into_iter()
        .filter(|i| !i.status.is_resolved())
        .collect();
    let ctx = PageContext::build(&session, Page::Issues, feed.is_live());
    render(IssueListTemplate { ctx, issues })
}

/// Resolved issues list: the complement of the active table.
pub async fn resolved(
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let issues = feed
        .current()
        .into_iter()
        .filter(|i| i.status.is_resolved())
        .collect();
    let ctx = PageContext::build(&session, Page::Resolved, feed.is_live());
    render(ResolvedListTemplate { ctx, issues })
}
