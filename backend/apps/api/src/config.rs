//! Server Settings
//!
//! Read once at startup from the process environment (after `.env`).

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use auth::AuthConfig;
use auth::models::{App, AppId};
use platform::password::HashingParams;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:44044";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub frontend_origins: Vec<String>,
    /// Client applications upserted at startup
    pub apps: Vec<App>,
    pub auth: AuthConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set in environment"))?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?;
        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let apps = match lookup("AUTH_APPS") {
            Some(raw) => parse_apps(&raw)?,
            None => Vec::new(),
        };

        let defaults = AuthConfig::default();
        let token_ttl = parse_or(&lookup, "TOKEN_TTL_SECS", defaults.token_ttl.as_secs())?;
        let request_timeout = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;

        let default_params = HashingParams::default();
        let password_params = HashingParams::new(
            parse_or(&lookup, "ARGON2_MEMORY_KIB", default_params.memory_kib)?,
            parse_or(&lookup, "ARGON2_ITERATIONS", default_params.iterations)?,
            parse_or(&lookup, "ARGON2_PARALLELISM", default_params.parallelism)?,
        );
        password_params
            .validate()
            .map_err(|e| anyhow!("invalid Argon2 parameters: {e}"))?;

        let password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|pepper| !pepper.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            frontend_origins,
            apps,
            auth: AuthConfig {
                token_ttl: Duration::from_secs(token_ttl),
                request_timeout: Duration::from_secs(request_timeout),
                password_params,
                password_pepper,
            },
        })
    }
}

/// `id:name:secret` entries separated by commas
///
/// The secret is everything after the second colon, so it may contain
/// colons but not commas.
fn parse_apps(raw: &str) -> anyhow::Result<Vec<App>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let (Some(id), Some(name), Some(secret)) = (parts.next(), parts.next(), parts.next())
            else {
                bail!("AUTH_APPS entry must be id:name:secret");
            };

            let id = AppId::new(
                id.trim()
                    .parse::<i64>()
                    .with_context(|| format!("AUTH_APPS has an invalid app id: {id:?}"))?,
            );
            if !id.is_valid() {
                bail!("AUTH_APPS app id must be positive, got {id}");
            }
            if name.trim().is_empty() || secret.is_empty() {
                bail!("AUTH_APPS app {id} needs a name and a secret");
            }

            Ok(App::new(id, name.trim(), secret))
        })
        .collect()
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/sso")]).unwrap();
        assert_eq!(s.bind_addr.port(), 44044);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.frontend_origins.len(), 2);
        assert_eq!(s.auth.token_ttl, Duration::from_secs(3600));
        assert_eq!(s.auth.request_timeout, Duration::from_secs(5));
        assert_eq!(s.auth.password_params, HashingParams::default());
        assert!(s.auth.password_pepper.is_none());
        assert!(s.apps.is_empty());
    }

    #[test]
    fn test_database_url_required() {
        assert!(settings(&[]).is_err());
        assert!(settings(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://localhost/sso"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("TOKEN_TTL_SECS", "60"),
            ("ARGON2_MEMORY_KIB", "8192"),
            ("PASSWORD_PEPPER", "pepper"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(s.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(s.auth.token_ttl, Duration::from_secs(60));
        assert_eq!(s.auth.password_params.memory_kib, 8192);
        assert_eq!(s.auth.pepper(), Some(b"pepper".as_slice()));
        assert_eq!(
            s.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_apps_parsed() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://localhost/sso"),
            ("AUTH_APPS", "10:web:web-secret, 11:mobile:a:b:c"),
        ])
        .unwrap();

        assert_eq!(s.apps.len(), 2);
        assert_eq!(s.apps[0].id, AppId::new(10));
        assert_eq!(s.apps[0].name, "web");
        assert_eq!(s.apps[0].secret, "web-secret");
        assert_eq!(s.apps[1].name, "mobile");
        assert_eq!(s.apps[1].secret, "a:b:c");
    }

    #[test]
    fn test_invalid_apps_rejected() {
        let base = ("DATABASE_URL", "postgres://localhost/sso");
        assert!(settings(&[base, ("AUTH_APPS", "10:web")]).is_err());
        assert!(settings(&[base, ("AUTH_APPS", "ten:web:secret")]).is_err());
        assert!(settings(&[base, ("AUTH_APPS", "0:web:secret")]).is_err());
        assert!(settings(&[base, ("AUTH_APPS", "10::secret")]).is_err());
        assert!(settings(&[base, ("AUTH_APPS", "10:web:")]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = ("DATABASE_URL", "postgres://localhost/sso");
        assert!(settings(&[base, ("TOKEN_TTL_SECS", "soon")]).is_err());
        assert!(settings(&[base, ("BIND_ADDR", "nowhere")]).is_err());
        assert!(settings(&[base, ("ARGON2_PARALLELISM", "0")]).is_err());
    }
}
