//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod otp;

use serde::Deserialize;

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, BootstrapAdminConfig, RequireVerified};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::otp::OtpConfig;

use crate::error::AppError;

/// Upper bound for every configured lifetime: one year.
pub const MAX_TTL_MINUTES: u64 = 366 * 24 * 60;

/// Converts a configured lifetime to a duration, rejecting zero and
/// anything above [`MAX_TTL_MINUTES`].
pub fn ttl_duration(field: &str, minutes: u64) -> Result<chrono::Duration, AppError> {
    if minutes == 0 {
        return Err(AppError::configuration(format!(
            "{field} must be greater than zero"
        )));
    }
    if minutes > MAX_TTL_MINUTES {
        return Err(AppError::configuration(format!(
            "{field} must not exceed {MAX_TTL_MINUTES} minutes"
        )));
    }
    i64::try_from(minutes)
        .ok()
        .and_then(chrono::Duration::try_minutes)
        .ok_or_else(|| AppError::configuration(format!("{field} is out of range")))
}

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Verification code settings.
    #[serde(default)]
    pub otp: OtpConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `FITAUTH__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FITAUTH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Rejects configurations the server cannot safely start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.auth.has_secret() {
            return Err(AppError::configuration("auth.jwt_secret must be set"));
        }
        ttl_duration("auth.app_token_ttl_minutes", self.auth.app_token_ttl_minutes)?;
        ttl_duration(
            "auth.dashboard_token_ttl_minutes",
            self.auth.dashboard_token_ttl_minutes,
        )?;
        ttl_duration("otp.ttl_minutes", self.otp.ttl_minutes)?;
        if let Some(admin) = &self.auth.bootstrap_admin {
            if admin.email.trim().is_empty() {
                return Err(AppError::configuration(
                    "auth.bootstrap_admin.email must not be empty",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize")
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = parse(
            r#"
            [auth]
            jwt_secret = "abc"
            "#,
        );
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.server.port, 8080);
        assert!(!cfg.database.is_configured());
        assert_eq!(cfg.otp.ttl_minutes, 10);
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn test_ttl_bounds_are_enforced() {
        let mut cfg = parse(
            r#"
            [auth]
            jwt_secret = "abc"
            "#,
        );
        cfg.auth.app_token_ttl_minutes = u64::MAX;
        assert_eq!(cfg.validate().unwrap_err().kind, ErrorKind::Configuration);

        cfg.auth.app_token_ttl_minutes = 60;
        cfg.auth.dashboard_token_ttl_minutes = i64::MAX as u64;
        assert_eq!(cfg.validate().unwrap_err().kind, ErrorKind::Configuration);

        cfg.auth.dashboard_token_ttl_minutes = MAX_TTL_MINUTES;
        cfg.otp.ttl_minutes = MAX_TTL_MINUTES + 1;
        assert_eq!(cfg.validate().unwrap_err().kind, ErrorKind::Configuration);

        cfg.otp.ttl_minutes = 0;
        assert_eq!(cfg.validate().unwrap_err().kind, ErrorKind::Configuration);

        cfg.otp.ttl_minutes = 10;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_ttl_duration_converts_in_range_values() {
        assert_eq!(
            ttl_duration("otp.ttl_minutes", 10).unwrap(),
            chrono::Duration::minutes(10)
        );
        assert_eq!(
            ttl_duration("x", MAX_TTL_MINUTES).unwrap(),
            chrono::Duration::minutes(MAX_TTL_MINUTES as i64)
        );
        assert!(ttl_duration("x", u64::MAX).is_err());
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let cfg = parse(
            r#"
            [auth]
            app_token_ttl_minutes = 30
            "#,
        );
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_bootstrap_admin_and_flags() {
        let cfg = parse(
            r#"
            [auth]
            jwt_secret = "abc"
            [auth.require_verified]
            trainee = true
            [auth.bootstrap_admin]
            email = "root@club.test"
            password = "letmein"
            "#,
        );
        assert!(cfg.validate().is_ok());
        assert!(cfg.auth.require_verified.trainee);
        assert!(!cfg.auth.require_verified.manager);
        let admin = cfg.auth.bootstrap_admin.expect("bootstrap admin");
        assert_eq!(admin.email, "root@club.test");
    }
}
