//! Handler functions for `tienda config` subcommands.
//!
//! Implements `path`, `get`, `set`, `init` and `export` over
//! [`TiendaConfig`]. `set` edits the file through [`ConfigDocument`].

use std::path::PathBuf;

use tienda_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::TiendaConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = TiendaConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match TiendaConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "(file does not exist; run `{} config init` to create it)",
                    TiendaConfig::project_name()
                );
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Get a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = TiendaConfig::load(config_path)?;
    let value = lookup(&config, key)?;
    println!("{value}");
    Ok(())
}

/// Resolve a dotted key against a loaded config, formatted for display.
pub fn lookup(config: &TiendaConfig, key: &str) -> Result<String> {
    let doc = ConfigDocument::from_config(config)?;
    doc.get(key)
        .map(display_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a configuration value by dotted key in the config file.
///
/// The edited file must still parse as a [`TiendaConfig`].
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = TiendaConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    let mut doc = ConfigDocument::open(path)?;
    doc.set(key, value)?;
    doc.save()?;

    println!("Set {key} = {value} in {}", doc.path().display());
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => TiendaConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = TiendaConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

/// Export configuration as environment variables.
pub fn cmd_config_export(config: &TiendaConfig, docker_env: bool) -> Result<()> {
    for line in export_lines(config, docker_env)? {
        println!("{line}");
    }
    Ok(())
}

/// `KEY=VALUE` lines, or `--env KEY=VALUE` for `docker run`.
pub fn export_lines(config: &TiendaConfig, docker_env: bool) -> Result<Vec<String>> {
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect())
}

// ============================================================================
// Config file editing
// ============================================================================

/// A config file held as a raw TOML tree, addressed by dotted keys.
///
/// Unknown keys survive editing; [`ConfigDocument::save`] refuses to write
/// a tree that no longer deserialises into a valid [`TiendaConfig`].
#[derive(Debug)]
pub struct ConfigDocument {
    path: PathBuf,
    root: toml::Table,
}

impl ConfigDocument {
    /// Read and parse an existing config file.
    pub fn open(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file does not exist at {}. Run `{} config init` first.",
                path.display(),
                TiendaConfig::project_name()
            )));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let root = content
            .parse::<toml::Table>()
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(Self { path, root })
    }

    /// Wrap an in-memory tree; nothing is read from `path`.
    pub fn from_table(path: PathBuf, root: toml::Table) -> Self {
        Self { path, root }
    }

    /// The serialised form of `config`, not tied to any file.
    pub fn from_config(config: &TiendaConfig) -> Result<Self> {
        let root = config
            .to_toml_string()?
            .parse::<toml::Table>()
            .map_err(|e| Error::config(e.to_string()))?;
        Ok(Self::from_table(PathBuf::new(), root))
    }

    /// File this document saves to.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Value at a dotted key such as `server.port`.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        let (head, rest) = key.split_once('.').unwrap_or((key, ""));
        let mut current = self.root.get(head)?;
        for part in rest.split('.').filter(|p| !p.is_empty()) {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// Store command-line input at a dotted key.
    ///
    /// String settings, judged by the current or default value at `key`,
    /// keep `raw` verbatim. Anything else is read with [`infer_scalar`] and
    /// falls back to a string when the inferred type does not fit. The
    /// document is left untouched unless the result is a valid config.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let as_string = toml::Value::String(raw.to_string());
        let mut candidates = Vec::with_capacity(2);
        if !self.is_string_setting(key)? {
            candidates.push(infer_scalar(raw));
        }
        if !candidates.contains(&as_string) {
            candidates.push(as_string);
        }

        let mut first_err = None;
        for value in candidates {
            let mut edited = self.root.clone();
            insert_dotted(&mut edited, key, value)?;
            let trial = Self::from_table(self.path.clone(), edited);
            match trial.to_config() {
                Ok(_) => {
                    self.root = trial.root;
                    return Ok(());
                }
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        Err(first_err.unwrap_or_else(|| Error::config(format!("Cannot set '{key}'"))))
    }

    fn is_string_setting(&self, key: &str) -> Result<bool> {
        if let Some(current) = self.get(key) {
            return Ok(current.is_str());
        }
        let defaults = Self::from_config(&TiendaConfig::default())?;
        Ok(defaults.get(key).is_some_and(toml::Value::is_str))
    }

    /// The tree as a typed config, validated.
    pub fn to_config(&self) -> Result<TiendaConfig> {
        Self::check(&self.render()?)
    }

    /// Write the tree back to its file once it checks out as a config.
    pub fn save(&self) -> Result<()> {
        let text = self.render()?;
        Self::check(&text)?;
        std::fs::write(&self.path, text).map_err(|e| Error::io_with_path(e, &self.path))
    }

    fn render(&self) -> Result<String> {
        toml::to_string_pretty(&self.root).map_err(|e| Error::config(e.to_string()))
    }

    fn check(text: &str) -> Result<TiendaConfig> {
        let config: TiendaConfig = toml::from_str(text)
            .map_err(|e| Error::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Store `value` at a dotted key. Missing sections are created; a scalar in
/// the middle of the path is an error.
fn insert_dotted(root: &mut toml::Table, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().unwrap_or_default();
    if leaf.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return Err(Error::config(format!("Invalid config key '{key}'")));
    }

    let mut table = root;
    for section in parts {
        let entry = table
            .entry(section.to_string())
            .or_insert(toml::Value::Table(toml::Table::new()));
        table = match entry {
            toml::Value::Table(inner) => inner,
            _ => {
                return Err(Error::config(format!(
                    "'{section}' in '{key}' is a value, not a section"
                )));
            }
        };
    }
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Read a command-line string as a TOML scalar: bool, then integer, then
/// float, falling back to a string.
pub fn infer_scalar(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(raw.to_string())
    }
}

/// Render a value the way `config get` prints it.
pub fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(t) => toml::to_string_pretty(t).unwrap_or_default(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
