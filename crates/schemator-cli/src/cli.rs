//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schemator CLI - Reshape nested documents with path schemas
///
/// Converts JSON, YAML and TOML documents into new shapes described by a
/// schema of output paths, source paths and filter pipelines.
#[derive(Parser, Debug)]
#[command(
    name = "schemator",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: json-pretty, or the configured format]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path segment delimiter (overrides the configured one)
    #[arg(short, long, global = true, value_name = "DELIMITER")]
    pub delimiter: Option<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a document using a schema
    Convert(ConvertArgs),

    /// Read a single path from a document
    Get(GetArgs),

    /// Check a schema for structural problems
    Check(CheckArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Path to the schema file (JSON, YAML or TOML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Input document (stdin if omitted or '-')
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Treat the input as a list and convert every item
    #[arg(long, conflicts_with = "lines")]
    pub each: bool,

    /// Treat the input as newline-delimited JSON and convert every line
    #[arg(long)]
    pub lines: bool,

    /// Fail on missing paths and filter errors instead of producing null
    #[arg(short, long)]
    pub strict: bool,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Path to read, e.g. 'orders.*.id'
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Input document (stdin if omitted or '-')
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Fail when the path does not exist
    #[arg(short, long, conflicts_with = "default")]
    pub strict: bool,

    /// JSON value returned when the path is missing or null
    #[arg(long, value_name = "JSON")]
    pub default: Option<String>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the schema file (JSON, YAML or TOML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Compact JSON output
    Json,
    /// Pretty-printed JSON output
    #[default]
    JsonPretty,
    /// YAML output
    Yaml,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["schemator", "-vv", "check", "schema.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli {
            quiet: true,
            verbose: 2,
            ..cli
        };
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_convert_arguments() {
        let cli = Cli::parse_from([
            "schemator", "--output", "yaml", "-d", "/", "convert", "schema.yaml", "rows.json",
            "--each", "--strict",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::Yaml));
        assert_eq!(cli.delimiter.as_deref(), Some("/"));
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.schema, PathBuf::from("schema.yaml"));
                assert_eq!(args.input, Some(PathBuf::from("rows.json")));
                assert!(args.each);
                assert!(!args.lines);
                assert!(args.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_each_conflicts_with_lines() {
        let result = Cli::try_parse_from(["schemator", "convert", "s.json", "--each", "--lines"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_default_conflicts_with_strict() {
        let result =
            Cli::try_parse_from(["schemator", "get", "a.b", "--strict", "--default", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_names() {
        let cli = Cli::parse_from(["schemator", "-o", "json-pretty", "check", "s.json"]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        assert_eq!(
            serde_json::to_string(&OutputFormat::JsonPretty).unwrap(),
            "\"json-pretty\""
        );
    }
}
