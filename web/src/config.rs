//! Environment-driven server configuration.
//!
//! One boolean flag, `LUNAMART_EMULATOR`, selects between the production
//! backend endpoints and the local emulator endpoints for the hosted
//! services, exactly as the panel's build-time flag did. The remaining
//! variables have sensible development defaults.

use std::env;

/// Endpoints of the hosted services backing the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendTargets {
    /// Identity provider endpoint.
    pub auth_url: String,
    /// Real-time database endpoint.
    pub database_url: String,
}

impl BackendTargets {
    /// The hosted production endpoints.
    #[must_use]
    pub fn production() -> Self {
        Self {
            auth_url: env_or("LUNAMART_AUTH_URL", "https://identity.lunamart.example"),
            database_url: env_or("LUNAMART_DATABASE_URL", "https://db.lunamart.example"),
        }
    }

    /// The local emulator endpoints.
    #[must_use]
    pub fn emulator() -> Self {
        Self {
            auth_url: "http://localhost:8001".to_string(),
            database_url: "http://localhost:8003".to_string(),
        }
    }
}

/// Server configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub addr: String,
    /// Whether to target the local emulators instead of production.
    pub emulator: bool,
    /// Admin account email for the bundled identity gateway.
    pub admin_email: String,
    /// Admin account password for the bundled identity gateway.
    pub admin_password: String,
}

impl Config {
    /// Reads the configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            addr: env_or("LUNAMART_ADDR", "0.0.0.0:3000"),
            emulator: env::var("LUNAMART_EMULATOR").is_ok_and(|v| v == "true"),
            admin_email: env_or("LUNAMART_ADMIN_EMAIL", "alpha@gmail.com"),
            admin_password: env_or("LUNAMART_ADMIN_PASSWORD", "Password"),
        }
    }

    /// The backend targets this configuration selects.
    #[must_use]
    pub fn backend(&self) -> BackendTargets {
        if self.emulator {
            BackendTargets::emulator()
        } else {
            BackendTargets::production()
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
