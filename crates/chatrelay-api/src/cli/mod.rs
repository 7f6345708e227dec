//! CLI command definitions for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chatrelay_observe::tracing_setup::LogFormat;

/// Relay chat messages to an LLM API with per-session transcripts.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML config file (defaults to ./chatrelay.toml if present).
    #[arg(long, global = true, env = "CHATRELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format (pretty or json).
    #[arg(long, global = true, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Interface to bind (overrides [server].host).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides [server].port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration as JSON (API key redacted).
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::parse_from([
            "chatrelay",
            "-v",
            "--log-format",
            "json",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
        ]);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            Commands::Config => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_config_subcommand() {
        let cli = Cli::parse_from(["chatrelay", "config", "--config", "relay.toml"]);
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("relay.toml")));
    }
}
