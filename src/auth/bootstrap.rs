//! One-shot store-session bootstrap.
//!
//! Exactly one attempt is made at startup: a pre-issued token (if configured)
//! is checked against the tenant, otherwise an anonymous session is opened.
//! On failure the caller logs the error and starts no subscription; there is
//! no retry and no user-visible feedback.

use sqlx::PgPool;

use crate::auth::csrf;
use crate::config::AppConfig;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy)]
pub enum SessionKind {
    Token,
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct StoreSession {
    pub id: String,
    pub kind: SessionKind,
}

pub async fn establish(pool: &PgPool, cfg: &AppConfig) -> Result<StoreSession, AppError> {
    let kind = match &cfg.auth_token {
        Some(token) => {
            let matched: Option<(String,)> =
                sqlx::query_as("SELECT id FROM tenants WHERE id = $1 AND api_token = $2")
                    .bind(&cfg.tenant_id)
                    .bind(token)
                    .fetch_optional(pool)
                    .await?;
            if matched.is_none() {
                return Err(AppError::Session(format!(
                    "Pre-issued token rejected for tenant {}",
                    cfg.tenant_id
                )));
            }
            SessionKind::Token
        }
        None => SessionKind::Anonymous,
    };

    let id = csrf::generate_token();
    sqlx::query("INSERT INTO store_sessions (id, tenant_id, kind) VALUES ($1, $2, $3)")
        .bind(&id)
        .bind(&cfg.tenant_id)
        .bind(match kind {
            SessionKind::Token => "token",
            SessionKind::Anonymous => "anonymous",
        })
        .execute(pool)
        .await?;

    log::info!(
        "Store session established for tenant {} ({})",
        cfg.tenant_id,
        match kind {
            SessionKind::Token => "pre-issued token",
            SessionKind::Anonymous => "anonymous",
        }
    );
    Ok(StoreSession { id, kind })
}
