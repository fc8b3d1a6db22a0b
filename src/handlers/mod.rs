pub mod api_v1;
pub mod dashboard;
pub mod issue_handlers;
pub mod ws;
