use elearn_core::error::CoreError;

/// Default pool size when `DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Database configuration loaded from environment variables.
///
/// | Env Var              | Default    |
/// |----------------------|------------|
/// | `DATABASE_URL`       | (required) |
/// | `DB_MAX_CONNECTIONS` | `20`       |
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| CoreError::Validation("DATABASE_URL must be set".into()))?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS").ok();
        Self::from_parts(database_url, max_connections.as_deref())
    }

    /// Build from raw values, applying defaults and validation.
    pub fn from_parts(
        database_url: String,
        max_connections: Option<&str>,
    ) -> Result<Self, CoreError> {
        if database_url.trim().is_empty() {
            return Err(CoreError::Validation("DATABASE_URL must not be empty".into()));
        }

        let max_connections = match max_connections {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                    ))
                })?,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_max_connections() {
        let config = DbConfig::from_parts("postgres://localhost/elearn".into(), None).unwrap();
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn parses_max_connections() {
        let config =
            DbConfig::from_parts("postgres://localhost/elearn".into(), Some(" 5 ")).unwrap();
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(DbConfig::from_parts("".into(), None).is_err());
        assert!(DbConfig::from_parts("postgres://x".into(), Some("0")).is_err());
        assert!(DbConfig::from_parts("postgres://x".into(), Some("many")).is_err());
    }
}
