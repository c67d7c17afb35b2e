use std::env;
use std::fmt;
use std::sync::Arc;

/// The symmetric key used to sign and verify bearer tokens.
///
/// Loaded once at startup and shared read-only by every request; cloning only
/// bumps a reference count.
#[derive(Clone)]
pub struct SigningSecret(Arc<str>);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    Missing(&'static str),
    /// A variable is set but cannot be parsed.
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{} must be set", var),
            ConfigError::Invalid { var, value } => {
                write!(f, "{} has an invalid value: {:?}", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub struct Config {
    /// Postgres connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: SigningSecret,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = non_empty_var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let server_port = match non_empty_var("SERVER_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "SERVER_PORT",
                value,
            })?,
            None => 8080,
        };

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            server_port,
            server_host: non_empty_var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret: SigningSecret::new(jwt_secret),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::sync::Mutex;

    lazy_static! {
        static ref ENV_LOCK: Mutex<()> = Mutex::new(());
    }

    const VARS: [&str; 4] = ["JWT_SECRET", "DATABASE_URL", "SERVER_PORT", "SERVER_HOST"];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], test_logic: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for var in VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test_logic));

        for var in VARS {
            env::remove_var(var);
        }
        if let Err(panic_payload) = result {
            std::panic::resume_unwind(panic_payload);
        }
    }

    #[test]
    fn test_config_from_env_defaults() {
        with_env(&[("JWT_SECRET", "test-secret")], || {
            let config = Config::from_env().unwrap();

            assert_eq!(config.database_url, None);
            assert_eq!(config.server_port, 8080);
            assert_eq!(config.server_host, "127.0.0.1");
            assert_eq!(config.jwt_secret.as_bytes(), b"test-secret");
            assert_eq!(config.server_url(), "http://127.0.0.1:8080");
        });
    }

    #[test]
    fn test_config_from_env_custom_values() {
        with_env(
            &[
                ("JWT_SECRET", "test-secret"),
                ("DATABASE_URL", "postgres://test"),
                ("SERVER_PORT", "3000"),
                ("SERVER_HOST", "0.0.0.0"),
            ],
            || {
                let config = Config::from_env().unwrap();

                assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
                assert_eq!(config.server_port, 3000);
                assert_eq!(config.server_host, "0.0.0.0");
            },
        );
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        with_env(&[("JWT_SECRET", "")], || {
            assert_eq!(
                Config::from_env().unwrap_err(),
                ConfigError::Missing("JWT_SECRET")
            );
        });
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        with_env(&[("JWT_SECRET", "s"), ("SERVER_PORT", "eighty")], || {
            assert_eq!(
                Config::from_env().unwrap_err(),
                ConfigError::Invalid {
                    var: "SERVER_PORT",
                    value: "eighty".to_string()
                }
            );
        });
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = SigningSecret::new("hunter2");
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }
}
