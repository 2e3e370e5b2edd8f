use advent_core::error::CoreError;

/// Database connection settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Upper bound on pooled connections (default: `20`).
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing (default: `5`).
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `DATABASE_URL`            | required |
    /// | `DB_MAX_CONNECTIONS`      | `20`     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`      |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("DATABASE_URL must be set".into()))?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20u32)?;
        let acquire_timeout_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5u64)?;

        if max_connections == 0 {
            return Err(CoreError::Validation(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, CoreError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| {
                CoreError::Validation(format!("{key} must be a valid number, got {raw:?}"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config =
            DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/advent")]))
                .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/advent");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.acquire_timeout_secs, 5);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/advent"),
            ("DB_MAX_CONNECTIONS", " 4 "),
            ("DB_ACQUIRE_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout_secs, 30);
    }

    #[test]
    fn missing_url_is_rejected() {
        let err = DbConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn blank_url_is_rejected() {
        let err = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/advent"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/advent"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
