//! Check command handler

use super::utils;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use schemator_core::SchemaIssue;
use serde::Serialize;
use tracing::{instrument, warn};

/// Machine-readable result of a schema check
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub schema: String,
    pub entries: usize,
    pub valid: bool,
    pub issues: Vec<SchemaIssue>,
}

/// Handle the check command
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let schema = utils::load_schema(&args.schema)?;
    let converter = utils::build_converter(config)?;
    let issues = converter.check_schema(&schema);

    let report = CheckReport {
        schema: args.schema.display().to_string(),
        entries: schema.len(),
        valid: issues.is_empty(),
        issues,
    };
    output.data(&report)?;

    if report.valid {
        output.success(&format!("Schema is valid ({} entries)", report.entries))?;
        return Ok(());
    }

    warn!(issues = report.issues.len(), "Schema check failed");
    for issue in &report.issues {
        output.error(&issue.to_string())?;
    }
    Err(Error::SchemaCheck {
        count: report.issues.len(),
    })
}
