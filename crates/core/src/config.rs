//! Connection settings resolved from the process environment.

use crate::{Result, SeedError};

pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Connection parameters for the catalog database.
///
/// Built either from CLI flags or from `POSTGRES_*` environment variables;
/// the storage crate turns these into a live pool.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
    pub database: String,
    pub sslmode: Option<String>,
}

impl ConnectionSettings {
    /// Read settings from `POSTGRES_*` environment variables.
    ///
    /// `POSTGRES_HOST`, `POSTGRES_USERNAME`, and `POSTGRES_DATABASE` are
    /// required. `POSTGRES_PORT` defaults to 5432; a set-but-unparseable
    /// value logs a warning and falls back to the default rather than
    /// silently swallowing the mistake.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SeedError::MissingEnvVar(var.to_owned()))
        };

        let port = match lookup("POSTGRES_PORT") {
            Some(raw) if !raw.is_empty() => match raw.parse() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_POSTGRES_PORT,
                        "invalid POSTGRES_PORT, using default"
                    );
                    DEFAULT_POSTGRES_PORT
                },
            },
            _ => DEFAULT_POSTGRES_PORT,
        };

        Ok(Self {
            host: required("POSTGRES_HOST")?,
            port,
            username: required("POSTGRES_USERNAME")?,
            password: lookup("POSTGRES_PASSWORD").filter(|v| !v.is_empty()),
            database: required("POSTGRES_DATABASE")?,
            sslmode: lookup("POSTGRES_SSLMODE").filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn from_lookup_with_all_vars() {
        let settings = ConnectionSettings::from_lookup(lookup_from(&[
            ("POSTGRES_HOST", "db.example.com"),
            ("POSTGRES_PORT", "5433"),
            ("POSTGRES_USERNAME", "admin"),
            ("POSTGRES_PASSWORD", "hunter2"),
            ("POSTGRES_DATABASE", "catalog"),
            ("POSTGRES_SSLMODE", "require"),
        ]))
        .unwrap();
        assert_eq!(settings.host, "db.example.com");
        assert_eq!(settings.port, 5433);
        assert_eq!(settings.username, "admin");
        assert_eq!(settings.password.as_deref(), Some("hunter2"));
        assert_eq!(settings.database, "catalog");
        assert_eq!(settings.sslmode.as_deref(), Some("require"));
    }

    #[test]
    fn missing_host_is_an_error() {
        let err = ConnectionSettings::from_lookup(lookup_from(&[
            ("POSTGRES_USERNAME", "admin"),
            ("POSTGRES_DATABASE", "catalog"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SeedError::MissingEnvVar(var) if var == "POSTGRES_HOST"));
    }

    #[test]
    fn port_defaults_when_unset_or_invalid() {
        let base = [
            ("POSTGRES_HOST", "localhost"),
            ("POSTGRES_USERNAME", "admin"),
            ("POSTGRES_DATABASE", "catalog"),
        ];
        let settings = ConnectionSettings::from_lookup(lookup_from(&base)).unwrap();
        assert_eq!(settings.port, DEFAULT_POSTGRES_PORT);

        let mut with_bad_port = base.to_vec();
        with_bad_port.push(("POSTGRES_PORT", "not-a-port"));
        let settings = ConnectionSettings::from_lookup(lookup_from(&with_bad_port)).unwrap();
        assert_eq!(settings.port, DEFAULT_POSTGRES_PORT);
    }

    #[test]
    fn optional_vars_may_be_absent() {
        let settings = ConnectionSettings::from_lookup(lookup_from(&[
            ("POSTGRES_HOST", "localhost"),
            ("POSTGRES_USERNAME", "admin"),
            ("POSTGRES_DATABASE", "catalog"),
        ]))
        .unwrap();
        assert!(settings.password.is_none());
        assert!(settings.sslmode.is_none());
    }
}
