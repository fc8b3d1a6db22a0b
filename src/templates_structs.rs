use actix_session::Session;
use askama::Template;

use crate::auth::csrf;
use crate::auth::session::take_flash;
use crate::models::issue::Issue;
use crate::models::metrics::DashboardMetrics;
use crate::views::{nav_items, NavItem, Page};

/// Common context shared by all pages.
/// Templates access these as `ctx.nav`, `ctx.flash`, etc.
pub struct PageContext {
    pub title: &'static str,
    pub nav: Vec<NavItem>,
    pub flash: Option<String>,
    pub csrf_token: String,
    /// False when the store snapshot is empty and the demonstration records
    /// are on display.
    pub live: bool,
}

impl PageContext {
    pub fn build(session: &Session, page: Page, live: bool) -> Self {
        Self {
            title: page.title(),
            nav: nav_items(page),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            live,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub metrics: DashboardMetrics,
}

#[derive(Template)]
#[template(path = "issues/list.html")]
pub struct IssueListTemplate {
    pub ctx: PageContext,
    pub issues: Vec<Issue>,
}

#[derive(Template)]
#[template(path = "issues/resolved.html")]
pub struct ResolvedListTemplate {
    pub ctx: PageContext,
    pub issues: Vec<Issue>,
}

#[derive(Template)]
#[template(path = "issues/assign.html")]
pub struct AssignFormTemplate {
    pub ctx: PageContext,
    pub issue: Issue,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "issues/form.html")]
pub struct NewIssueTemplate {
    pub ctx: PageContext,
    pub errors: Vec<String>,
}
