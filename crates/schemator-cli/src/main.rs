//! Schemator CLI - Command-line interface for schema-driven data conversion
//!
//! This is the main entry point for the Schemator CLI application, providing
//! commands for converting documents, reading paths and checking schemas.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::io::IsTerminal;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(mut config) => {
            config.apply_overrides(cli.delimiter.as_deref(), cli.output, cli.no_color);
            config
        }
        Err(e) => exit_with(e, !cli.no_color && std::io::stderr().is_terminal()),
    };

    control::set_override(config.output.color && std::io::stdout().is_terminal());

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(e, control::SHOULD_COLORIZE.should_colorize()),
    }
}

fn exit_with(e: error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(&e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        config.output.format,
        control::SHOULD_COLORIZE.should_colorize(),
        cli.quiet,
        config.output.progress,
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        delimiter = %config.converter.delimiter,
        "Executing command"
    );

    match cli.command {
        Commands::Convert(args) => handlers::handle_convert(args, &config, &mut output),
        Commands::Get(args) => handlers::handle_get(args, &config, &mut output),
        Commands::Check(args) => handlers::handle_check(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["schemator", "check", "schema.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["schemator", "-vv", "get", "a.b", "doc.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["schemator", "--quiet", "convert", "s.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
