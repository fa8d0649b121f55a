//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Seed the store with demo content at startup.
    #[serde(default)]
    pub seed_demo: bool,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens (HS256).
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
    /// Password acceptance policy.
    #[serde(default)]
    pub password_policy: PasswordPolicy,
}

/// Password acceptance policy.
///
/// The single source of truth for password rules: every signup and
/// password-change path consults this object, so the rules cannot drift
/// between call sites.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum password length.
    #[serde(default = "default_password_min_length")]
    pub min_length: usize,
    /// Require at least one uppercase letter, one lowercase letter, and one
    /// digit.
    #[serde(default = "default_true")]
    pub require_mixed_case_and_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_password_min_length(),
            require_mixed_case_and_digit: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_token_expiry_hours() -> i64 {
    24 * 7
}

const fn default_password_min_length() -> usize {
    8
}

const fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `QUAERO_ENV`)
    /// 3. Environment variables with `QUAERO` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("QUAERO_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("QUAERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("QUAERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy_defaults() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.min_length, 8);
        assert!(policy.require_mixed_case_and_digit);
    }
}
