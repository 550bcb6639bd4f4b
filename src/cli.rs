//! Command-line arguments for the userdir binary.

use crate::config::Environment;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "userdir", about = "In-memory user directory REST service")]
pub struct Args {
    #[arg(short, long, value_name = "PATH", help = "TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "USERDIR_HOST", help = "Address to bind")]
    pub host: Option<String>,

    #[arg(short, long, env = "USERDIR_PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(
        long,
        env = "USERDIR_API_PREFIX",
        value_name = "PATH",
        help = "Mount routes under this path (e.g. /.netlify/functions/api)"
    )]
    pub api_prefix: Option<String>,

    #[arg(long, env = "USERDIR_NO_SEED", help = "Start with an empty directory")]
    pub no_seed: bool,

    #[arg(
        long = "env",
        env = "USERDIR_ENV",
        value_enum,
        help = "Runtime environment; development exposes error details"
    )]
    pub environment: Option<Environment>,

    #[arg(long, env = "USERDIR_LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "userdir",
            "--port",
            "8081",
            "--api-prefix",
            "/api",
            "--no-seed",
            "--env",
            "development",
        ])
        .unwrap();
        assert_eq!(args.port, Some(8081));
        assert_eq!(args.api_prefix.as_deref(), Some("/api"));
        assert!(args.no_seed);
        assert_eq!(args.environment, Some(Environment::Development));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Args::try_parse_from(["userdir", "--port", "not-a-port"]).is_err());
    }
}
