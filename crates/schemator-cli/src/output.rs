//! Output formatting and writing utilities
//!
//! Converted data goes to stdout in the selected format. Status lines and
//! progress bars go to stderr so they never mix with the data stream.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use tracing::trace;

/// Trait for formatting serializable values
pub trait OutputFormatter {
    /// Format a value as one document
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a value as one record of a stream
    fn format_record<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_record<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            // NDJSON keeps one record per line whatever the JSON flavour
            OutputFormat::Json | OutputFormat::JsonPretty => Ok(serde_json::to_string(value)?),
            OutputFormat::Yaml => Ok(format!("---\n{}", serde_yaml::to_string(value)?)),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer over stdout and stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
            status: Box::new(io::stderr()),
        }
    }

    /// Create an output writer with custom data and status writers
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        status: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
            status,
        }
    }

    /// Write a line of output
    fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content.trim_end_matches('\n'))?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Writing document");
        self.writeln(&formatted)
    }

    /// Write one record of a stream
    pub fn record<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format_record(value)?;
        self.writeln(&formatted)
    }

    fn status_line(&mut self, content: &str) -> Result<()> {
        writeln!(self.status, "{}", content)?;
        self.status.flush()?;
        Ok(())
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            self.status_line(&format!("{} {}", "✓".green().bold(), message))
        } else {
            self.status_line(&format!("OK: {}", message))
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            self.status_line(&format!("{} {}", "!".yellow().bold(), message.yellow()))
        } else {
            self.status_line(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.status_line(&format!("{} {}", "✗".red().bold(), message))
        } else {
            self.status_line(&format!("ERROR: {}", message))
        }
    }

    /// Create a progress bar for mass conversion
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        if let Some(style) = default_progress_style() {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Progress bar style used for mass conversion
pub fn default_progress_style() -> Option<ProgressStyle> {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .ok()
        .map(|style| style.progress_chars("#>-"))
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
