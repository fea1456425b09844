//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Campdoc using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Campdoc - camp dossiers and reports
#[derive(Parser, Debug)]
#[command(name = "campdoc")]
#[command(version, about, long_about = None)]
#[command(author = "Campdoc Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "campdoc.toml", env = "CAMPDOC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CAMPDOC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate camp documents and the CSV reports
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show when each camp was last generated
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["campdoc", "export"]);
        assert_eq!(cli.config, "campdoc.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["campdoc", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["campdoc", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "campdoc",
            "export",
            "--force",
            "--camp-id",
            "42",
            "--parallel-modules",
            "4",
            "--no-render",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.force);
                assert_eq!(args.camp_id.as_deref(), Some("42"));
                assert_eq!(args.parallel_modules, Some(4));
                assert!(args.no_render);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["campdoc", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["campdoc", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["campdoc", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
