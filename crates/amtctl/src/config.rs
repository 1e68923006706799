//! TOML-based configuration for the CLI.
//!
//! Reads `AmtConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\amtctl\config.toml`
//! - Linux:    `~/.config/amtctl/config.toml`
//! - macOS:    `~/Library/Application Support/amtctl/config.toml`
//!
//! The file is optional; a missing file yields defaults. It can carry the
//! default port, the TLS certificate policy, and named host entries so a
//! machine can be addressed by alias:
//!
//! ```toml
//! port = 16992
//! accept_invalid_certs = false
//!
//! [hosts.lab1]
//! address = "10.1.2.3"
//! username = "admin"
//! ```
//!
//! Command-line flags always win over file values. Passwords are never
//! stored in the file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default AMT WS-Management port (HTTP; 16993 for TLS).
pub const DEFAULT_PORT: u16 = 16992;

/// Top-level CLI configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmtConfig {
    /// Port used when neither the CLI nor a host entry specifies one.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Skip TLS certificate validation. AMT controllers commonly carry
    /// self-signed certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Use https for the endpoint URL.
    #[serde(default)]
    pub tls: bool,
    /// Named host entries, addressable via `--host <alias>`.
    #[serde(default)]
    pub hosts: BTreeMap<String, HostEntry>,
}

/// One named management controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostEntry {
    pub address: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl Default for AmtConfig {
    fn default() -> Self {
        AmtConfig {
            port: DEFAULT_PORT,
            accept_invalid_certs: false,
            tls: false,
            hosts: BTreeMap::new(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Resolves the full path to the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .ok_or(ConfigError::NoPlatformConfigDir)
        .map(|dir| dir.join("config.toml"))
}

/// Loads the config from disk, returning defaults if the file does not
/// exist (including when no platform config dir can be determined).
pub fn load_config() -> Result<AmtConfig, ConfigError> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(ConfigError::NoPlatformConfigDir) => return Ok(AmtConfig::default()),
        Err(e) => return Err(e),
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: AmtConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AmtConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Resolves the platform config base directory including the `amtctl`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("amtctl"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("amtctl"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("amtctl")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}
