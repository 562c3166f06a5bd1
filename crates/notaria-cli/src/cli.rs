//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Notaria CLI - Extract parties and terms from notarial sale contracts.
#[derive(Debug, Parser)]
#[command(name = "notaria")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NOTARIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// NER backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    /// HTTP NER service
    Service,
    /// Local gazetteer file
    Gazetteer,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract parties and contract details from text documents
    Extract(ExtractArgs),

    /// Show the REUNIDOS / EXPONEN / CLÁUSULAS sections of a document
    Sections(SectionsArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Plain-text contract files
    pub files: Vec<PathBuf>,

    /// Read one document from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Also print the normalized text of each document
    #[arg(long)]
    pub show_text: bool,

    /// NER backend (overrides the configuration)
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Gazetteer file (implies the gazetteer backend)
    #[arg(short, long)]
    pub gazetteer: Option<PathBuf>,

    /// NER service URL (overrides the configuration)
    #[arg(long, env = "NOTARIA_ENDPOINT")]
    pub endpoint: Option<String>,
}

/// Arguments for the sections command.
#[derive(Debug, Parser)]
pub struct SectionsArgs {
    /// Plain-text contract file
    pub file: Option<PathBuf>,

    /// Read the document from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<BackendArg> for crate::config::Backend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Service => crate::config::Backend::Service,
            BackendArg::Gazetteer => crate::config::Backend::Gazetteer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "notaria",
            "extract",
            "contrato1.txt",
            "contrato2.txt",
            "--format",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.files.len(), 2);
                assert!(!args.stdin);
                assert!(args.backend.is_none());
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_gazetteer_backend() {
        let cli = Cli::parse_from([
            "notaria",
            "extract",
            "--stdin",
            "--backend",
            "gazetteer",
            "--gazetteer",
            "partes.toml",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert!(args.stdin);
                assert_eq!(args.backend, Some(BackendArg::Gazetteer));
                assert_eq!(args.gazetteer, Some(PathBuf::from("partes.toml")));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["notaria", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_backend_conversion() {
        let backend: crate::config::Backend = BackendArg::Gazetteer.into();
        assert_eq!(backend, crate::config::Backend::Gazetteer);
    }
}
