//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::borrower::Membership;
use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Loan, renewal and fine rules
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Borrowing limit per membership tier
    #[serde(default)]
    pub membership: MembershipConfig,

    /// Demo credentials and simulated latencies
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.policy.loan_period_days == 0 {
            return Err(AppError::validation("policy.loan_period_days must be > 0"));
        }
        if self.policy.renewal_period_days == 0 {
            return Err(AppError::validation(
                "policy.renewal_period_days must be > 0",
            ));
        }
        for tier in Membership::ALL {
            if self.membership.limit_for(*tier) == 0 {
                return Err(AppError::validation(format!(
                    "membership.{} must be > 0",
                    tier.as_str().to_lowercase()
                )));
            }
        }
        if self.auth.admin_username.trim().is_empty() || self.auth.admin_password.is_empty() {
            return Err(AppError::validation("auth admin credentials are empty"));
        }
        if self.auth.student_id.trim().is_empty() || self.auth.student_password.is_empty() {
            return Err(AppError::validation("auth student credentials are empty"));
        }
        Ok(())
    }
}

/// Circulation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Days between borrowing and the first due date
    #[serde(default = "defaults::loan_period")]
    pub loan_period_days: u32,

    /// Days a renewal pushes the due date back
    #[serde(default = "defaults::renewal_period")]
    pub renewal_period_days: u32,

    #[serde(default = "defaults::max_renewals")]
    pub max_renewals: u32,

    /// Fine charged per day past the due date
    #[serde(default = "defaults::fine_per_day")]
    pub fine_per_day: u32,

    /// Borrowing limit restored when a suspended account is activated
    #[serde(default = "defaults::reactivated_limit")]
    pub reactivated_limit: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            loan_period_days: defaults::loan_period(),
            renewal_period_days: defaults::renewal_period(),
            max_renewals: defaults::max_renewals(),
            fine_per_day: defaults::fine_per_day(),
            reactivated_limit: defaults::reactivated_limit(),
        }
    }
}

/// `maxBooksAllowed` for each tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipConfig {
    #[serde(default = "defaults::standard_limit")]
    pub standard: u32,

    #[serde(default = "defaults::premium_limit")]
    pub premium: u32,

    #[serde(default = "defaults::faculty_limit")]
    pub faculty: u32,
}

impl MembershipConfig {
    pub fn limit_for(&self, membership: Membership) -> u32 {
        match membership {
            Membership::Standard => self.standard,
            Membership::Premium => self.premium,
            Membership::Faculty => self.faculty,
        }
    }
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            standard: defaults::standard_limit(),
            premium: defaults::premium_limit(),
            faculty: defaults::faculty_limit(),
        }
    }
}

/// Demo credentials. Not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "defaults::admin_username")]
    pub admin_username: String,

    #[serde(default = "defaults::admin_password")]
    pub admin_password: String,

    #[serde(default = "defaults::student_id")]
    pub student_id: String,

    #[serde(default = "defaults::student_password")]
    pub student_password: String,

    /// Simulated round trip for the admin login, in milliseconds
    #[serde(default = "defaults::admin_latency")]
    pub admin_login_latency_ms: u64,

    #[serde(default = "defaults::login_latency")]
    pub login_latency_ms: u64,

    #[serde(default = "defaults::register_latency")]
    pub register_latency_ms: u64,
}

impl AuthConfig {
    /// Same credentials with every simulated delay removed.
    pub fn without_latency(mut self) -> Self {
        self.admin_login_latency_ms = 0;
        self.login_latency_ms = 0;
        self.register_latency_ms = 0;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: defaults::admin_username(),
            admin_password: defaults::admin_password(),
            student_id: defaults::student_id(),
            student_password: defaults::student_password(),
            admin_login_latency_ms: defaults::admin_latency(),
            login_latency_ms: defaults::login_latency(),
            register_latency_ms: defaults::register_latency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `local_storage.json`
    #[serde(default = "defaults::storage_dir")]
    pub storage_dir: PathBuf,

    /// Optional TOML seed replacing the built-in sample data
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            storage_dir: defaults::storage_dir(),
            seed_file: None,
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Policy defaults
    pub fn loan_period() -> u32 {
        30
    }
    pub fn renewal_period() -> u32 {
        14
    }
    pub fn max_renewals() -> u32 {
        2
    }
    pub fn fine_per_day() -> u32 {
        40
    }
    pub fn reactivated_limit() -> u32 {
        3
    }

    // Membership defaults
    pub fn standard_limit() -> u32 {
        3
    }
    pub fn premium_limit() -> u32 {
        5
    }
    pub fn faculty_limit() -> u32 {
        10
    }

    // Auth defaults
    pub fn admin_username() -> String {
        "admin".into()
    }
    pub fn admin_password() -> String {
        "admin123".into()
    }
    pub fn student_id() -> String {
        "2021001".into()
    }
    pub fn student_password() -> String {
        "student123".into()
    }
    pub fn admin_latency() -> u64 {
        1000
    }
    pub fn login_latency() -> u64 {
        1500
    }
    pub fn register_latency() -> u64 {
        2000
    }

    pub fn log_level() -> String {
        "info".into()
    }
    pub fn storage_dir() -> PathBuf {
        PathBuf::from("storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_loan_period() {
        let mut config = Config::default();
        config.policy.loan_period_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_membership_limit() {
        let mut config = Config::default();
        config.membership.faculty = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_admin() {
        let mut config = Config::default();
        config.auth.admin_username = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [policy]
            max_renewals = 3

            [auth]
            login_latency_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.policy.max_renewals, 3);
        assert_eq!(config.policy.loan_period_days, 30);
        assert_eq!(config.auth.login_latency_ms, 0);
        assert_eq!(config.auth.admin_password, "admin123");
        assert_eq!(config.membership.premium, 5);
    }

    #[test]
    fn test_without_latency_zeroes_every_delay() {
        let auth = AuthConfig::default().without_latency();
        assert_eq!(auth.admin_login_latency_ms, 0);
        assert_eq!(auth.login_latency_ms, 0);
        assert_eq!(auth.register_latency_ms, 0);
    }

    #[test]
    fn test_load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert_eq!(config.policy.fine_per_day, 40);
    }
}
