/// Runtime configuration, read once from the environment at startup.
///
/// `.env` is loaded first (dotenvy) so local development does not need exported
/// variables. Absence of `CIVICTRACK_AUTH_TOKEN` selects the anonymous session
/// path during bootstrap.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub tenant_id: String,
    pub auth_token: Option<String>,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = var("DATABASE_URL")
            .unwrap_or_else(|| "postgres://localhost/civictrack".to_string());
        let tenant_id =
            var("CIVICTRACK_TENANT").unwrap_or_else(|| "default-tenant".to_string());
        let auth_token = var("CIVICTRACK_AUTH_TOKEN").filter(|t| !t.is_empty());
        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());

        Self { database_url, tenant_id, auth_token, bind_addr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_environment_yields_defaults() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg.database_url, "postgres://localhost/civictrack");
        assert_eq!(cfg.tenant_id, "default-tenant");
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert!(cfg.auth_token.is_none());
    }

    #[test]
    fn configured_values_are_picked_up() {
        let cfg = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://db/civic".to_string()),
            "CIVICTRACK_TENANT" => Some("chennai".to_string()),
            "CIVICTRACK_AUTH_TOKEN" => Some("issued-token".to_string()),
            "BIND_ADDR" => Some("0.0.0.0:9000".to_string()),
            _ => None,
        });
        assert_eq!(cfg.database_url, "postgres://db/civic");
        assert_eq!(cfg.tenant_id, "chennai");
        assert_eq!(cfg.auth_token.as_deref(), Some("issued-token"));
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn blank_auth_token_selects_the_anonymous_path() {
        let cfg = AppConfig::from_lookup(|key| match key {
            "CIVICTRACK_AUTH_TOKEN" => Some(String::new()),
            _ => None,
        });
        assert!(cfg.auth_token.is_none());
    }
}
