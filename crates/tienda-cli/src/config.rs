//! TOML configuration for the `tienda` binary.
//!
//! Values come from three layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. The config file (`--config`, `TIENDA_CONFIG`, or
//!    `<config_dir>/tienda/config.toml`)
//! 3. `TIENDA_*` environment variables

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use tienda_api::ServerConfig;
use tienda_auth::AuthConfig;
use tienda_core::{Error, Result};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "TIENDA_";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiendaConfig {
    /// Name used for the config directory and in messages
    pub project_name: String,
    /// HTTP listener
    pub server: ServerSection,
    /// Accounts, tokens and write protection
    pub auth: AuthSection,
    /// Log output
    pub logging: LoggingSection,
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

/// `[auth]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// Require bearer tokens on catalogue and order writes
    pub enabled: bool,
    /// Signing secret; read from `secret_file` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// File holding a `SECRET_KEY=` line
    pub secret_file: String,
    /// Access-token lifetime
    pub token_ttl_minutes: u64,
    /// `iss` claim written to and expected on tokens
    pub issuer: String,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for TiendaConfig {
    fn default() -> Self {
        Self {
            project_name: Self::project_name().to_string(),
            server: ServerSection::default(),
            auth: AuthSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            enabled: false,
            secret_key: None,
            secret_file: ".env".to_string(),
            token_ttl_minutes: 30,
            issuer: "tienda".to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TiendaConfig {
    /// Project name used for the config directory.
    pub fn project_name() -> &'static str {
        "tienda"
    }

    /// `<config_dir>/tienda/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// The explicit path if given, otherwise the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load the config file and apply environment overrides.
    ///
    /// A missing file at the default location yields the defaults. A missing
    /// file at an explicit path is an error.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = Self::load_file(explicit)?;
        config.apply_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file without environment overrides.
    pub fn load_file(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Apply `TIENDA_*` overrides from the given variables.
    ///
    /// Unrelated variables are ignored. Values that do not parse are errors.
    pub fn apply_overrides<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "SERVER_HOST" => self.server.host = value,
                "SERVER_PORT" => self.server.port = parse_env(&key, &value)?,
                "AUTH_ENABLED" => self.auth.enabled = parse_env(&key, &value)?,
                "AUTH_SECRET_KEY" => self.auth.secret_key = Some(value),
                "AUTH_SECRET_FILE" => self.auth.secret_file = value,
                "AUTH_TOKEN_TTL_MINUTES" => {
                    self.auth.token_ttl_minutes = parse_env(&key, &value)?;
                }
                "AUTH_ISSUER" => self.auth.issuer = value,
                "LOG_LEVEL" => self.logging.level = value,
                _ => {}
            }
        }
        Ok(())
    }

    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.auth.token_ttl_minutes == 0 {
            return Err(Error::config("auth.token_ttl_minutes must be at least 1"));
        }
        if self.auth.issuer.trim().is_empty() {
            return Err(Error::config("auth.issuer must not be empty"));
        }
        if self.server.host.trim().is_empty() {
            return Err(Error::config("server.host must not be empty"));
        }
        Ok(())
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The configuration as `TIENDA_*` variables, in a stable order.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let mut vars = vec![
            env_var("SERVER_HOST", &self.server.host),
            env_var("SERVER_PORT", self.server.port),
            env_var("AUTH_ENABLED", self.auth.enabled),
            env_var("AUTH_SECRET_FILE", &self.auth.secret_file),
            env_var("AUTH_TOKEN_TTL_MINUTES", self.auth.token_ttl_minutes),
            env_var("AUTH_ISSUER", &self.auth.issuer),
            env_var("LOG_LEVEL", &self.logging.level),
        ];
        if let Some(secret) = &self.auth.secret_key {
            vars.push(env_var("AUTH_SECRET_KEY", secret));
        }
        Ok(vars)
    }

    /// Access-token lifetime.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.token_ttl_minutes.saturating_mul(60))
    }

    /// Listener settings for the API server.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            auth: AuthConfig {
                enabled: self.auth.enabled,
                issuer: self.auth.issuer.clone(),
            },
        }
    }
}

fn env_var(name: &str, value: impl ToString) -> (String, String) {
    (format!("{ENV_PREFIX}{name}"), value.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid value for {key}: '{value}'")))
}
