//! CLI argument definitions for the Vista chat binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Vista — chat with a rule-based assistant that answers with charts and tables.
#[derive(Parser, Debug)]
#[command(name = "vista", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Reply instantly: no thinking pause, no typewriter effect.
    #[arg(long = "no-delay")]
    pub no_delay: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > VISTA_CONFIG env var > ~/.vista/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VISTA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".vista").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".vista").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["vista", "-c", "/tmp/v.toml", "--log-level", "debug", "--no-delay"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/v.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.no_delay);
    }

    #[test]
    fn test_config_flag_wins() {
        let args = CliArgs::parse_from(["vista", "--config", "explicit.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("explicit.toml"));
    }

    #[test]
    fn test_log_level_falls_back_to_config() {
        let args = CliArgs::parse_from(["vista"]);
        assert_eq!(args.resolve_log_level("warn"), "warn");
        let args = CliArgs::parse_from(["vista", "-l", "trace"]);
        assert_eq!(args.resolve_log_level("warn"), "trace");
    }

    #[test]
    fn test_default_config_path_file_name() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
