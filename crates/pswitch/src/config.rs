//! pswitch configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use pswitch_pulse::PacmdRunner;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PSWITCH_CONFIG";

/// pswitch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// `pacmd` invocation settings
    #[serde(default)]
    pub pacmd: PacmdConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// How `pacmd` is run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacmdConfig {
    /// Executable to invoke
    #[serde(default = "default_program")]
    pub program: String,
    /// Extra arguments placed before the subcommand
    #[serde(default)]
    pub args: Vec<String>,
    /// Timeout for each invocation, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PacmdConfig {
    fn default() -> Self {
        Self { program: default_program(), args: Vec::new(), timeout_ms: default_timeout_ms() }
    }
}

impl PacmdConfig {
    /// Build a runner from these settings.
    #[must_use]
    pub fn runner(&self) -> PacmdRunner {
        PacmdRunner::new(self.program.clone())
            .with_leading_args(self.args.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

fn default_program() -> String {
    "pacmd".to_string()
}

#[allow(clippy::cast_possible_truncation)]
fn default_timeout_ms() -> u64 {
    PacmdRunner::DEFAULT_TIMEOUT.as_millis() as u64
}

/// Load configuration from file or defaults.
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            debug!("Could not determine config directory, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from a specific file, falling back to defaults if it
/// does not exist.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(?path, "Config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {path:?}"))?;
    validate(&config).with_context(|| format!("Invalid config file: {path:?}"))?;
    debug!(?path, "Config loaded");
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    ensure!(config.pacmd.timeout_ms > 0, "pacmd.timeout_ms must be greater than 0");
    Ok(())
}

/// Get the configuration file path.
fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let dirs = ProjectDirs::from("com", "pswitch", "pswitch")?;
    Some(dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.pacmd.program, "pacmd");
        assert!(config.pacmd.args.is_empty());
        assert_eq!(config.pacmd.timeout_ms, 5000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "[pacmd]\ntimeout_ms = 250").unwrap();

        let config = load_config_from(file.path()).unwrap();

        assert_eq!(config.pacmd.timeout_ms, 250);
        assert_eq!(config.pacmd.program, "pacmd");
        assert_eq!(config.general.log_level, "warn");
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            r#"
[general]
log_level = "debug"

[pacmd]
program = "flatpak-spawn"
args = ["--host", "pacmd"]
timeout_ms = 1000
"#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        let runner = config.pacmd.runner();

        assert_eq!(config.general.log_level, "debug");
        assert_eq!(runner.program(), "flatpak-spawn");
        assert_eq!(runner.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "[pacmd]\ntimeout_ms = 0").unwrap();

        let err = load_config_from(file.path()).unwrap_err();

        assert!(err.to_string().starts_with("Invalid config file"));
        assert!(format!("{err:#}").contains("timeout_ms must be greater than 0"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "[pacmd]\ntimeout_ms = \"soon\"").unwrap();

        assert!(load_config_from(file.path()).is_err());
    }
}
