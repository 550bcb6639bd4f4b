//! Server configuration.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! command-line flags and their environment variables.

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Runtime environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path the user routes are nested under; empty mounts them at `/`
    pub api_prefix: String,
    /// Start with the four seed records
    pub seed: bool,
    pub environment: Environment,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_prefix: String::new(),
            seed: true,
            environment: Environment::Production,
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file; missing keys take defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the effective configuration for the binary
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        Ok(config)
    }

    /// Overlay values given on the command line or through the environment
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }

        if let Some(port) = args.port {
            self.port = port;
        } else if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            // Conventional platform variable, lower priority than USERDIR_PORT
            self.port = port;
        }

        if let Some(prefix) = &args.api_prefix {
            self.api_prefix = prefix.clone();
        }
        if args.no_seed {
            self.seed = false;
        }
        if let Some(env) = args.environment {
            self.environment = env;
        }
        if args.log_json {
            self.log_json = true;
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Prefix normalized to `/segment[/segment]` or `None` when routes live at root
    pub fn normalized_prefix(&self) -> Option<String> {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(format!("/{trimmed}"))
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert!(config.seed);
        assert!(!config.is_development());
        assert_eq!(config.normalized_prefix(), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("port = 8080\nenvironment = \"development\"\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.is_development());
        assert!(config.seed);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_prefix = \"/.netlify/functions/api\"").unwrap();
        writeln!(file, "seed = false").unwrap();

        let config = ServerConfig::load_from(file.path()).unwrap();
        assert!(!config.seed);
        assert_eq!(
            config.normalized_prefix().as_deref(),
            Some("/.netlify/functions/api")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServerConfig::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_prefix_normalization() {
        let config = ServerConfig {
            api_prefix: "api/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.normalized_prefix().as_deref(), Some("/api/v1"));

        let config = ServerConfig {
            api_prefix: "/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.normalized_prefix(), None);
    }

    #[test]
    #[serial]
    fn test_args_override_file_values() {
        std::env::remove_var("PORT");
        let mut config = ServerConfig::from_toml("port = 8080").unwrap();
        let args = Args {
            port: Some(9090),
            no_seed: true,
            ..Default::default()
        };
        config.apply_args(&args);
        assert_eq!(config.port, 9090);
        assert!(!config.seed);
    }

    #[test]
    #[serial]
    fn test_platform_port_variable() {
        std::env::set_var("PORT", "4567");
        let mut config = ServerConfig::default();
        config.apply_args(&Args::default());
        std::env::remove_var("PORT");
        assert_eq!(config.port, 4567);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.bind_addr().unwrap().ip().to_string(), "127.0.0.1");
    }
}
