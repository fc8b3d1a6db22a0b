use actix_session::Session;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::errors::{render, AppError};
use crate::feed::IssueFeed;
use crate::models::metrics::DashboardMetrics;
use crate::templates_structs::{DashboardTemplate, PageContext};
use crate::views::Page;

pub async fn index(
    feed: web::Data<Arc<IssueFeed>>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let issues = feed.current();
    let metrics = DashboardMetrics::compute(&issues);
    let ctx = PageContext::build(&session, Page::Dashboard, feed.is_live());
    render(DashboardTemplate { ctx, metrics })
}
