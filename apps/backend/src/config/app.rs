use std::env;

use crate::error::AppError;

/// Server configuration resolved from the environment.
///
/// Environment variables must be set by the runtime environment (docker
/// env_file, or sourced .env files in local dev). Defaults are safe for
/// development only.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            environment,
            host,
            port,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// JWT secret is mandatory; there is no safe default for it.
pub fn jwt_secret_from_env() -> Result<Vec<u8>, AppError> {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret.into_bytes()),
        _ => Err(AppError::config(
            "JWT_SECRET must be set".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::{jwt_secret_from_env, AppConfig};

    fn clear_env() {
        env::remove_var("ENVIRONMENT");
        env::remove_var("BACKEND_HOST");
        env::remove_var("BACKEND_PORT");
        env::remove_var("JWT_SECRET");
    }

    #[test]
    #[serial]
    fn defaults_are_development() {
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.is_production());
    }

    #[test]
    #[serial]
    fn invalid_port_is_a_config_error() {
        clear_env();
        env::set_var("BACKEND_PORT", "not-a-port");
        assert!(AppConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn jwt_secret_is_required() {
        clear_env();
        assert!(jwt_secret_from_env().is_err());

        env::set_var("JWT_SECRET", "super-secret");
        assert_eq!(jwt_secret_from_env().unwrap(), b"super-secret".to_vec());
        clear_env();
    }
}
