//! Get command handler

use super::utils::{self, Input};
use crate::cli::GetArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use schemator_core::{NestedReader, PathParser, Value};
use tracing::{debug, instrument};

/// Handle the get command
#[instrument(skip(config, output), fields(path = %args.path))]
pub fn handle_get(args: GetArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let default = args
        .default
        .as_deref()
        .map(|raw| {
            serde_json::from_str::<Value>(raw)
                .map_err(|e| Error::invalid_args(format!("--default is not valid JSON: {}", e)))
        })
        .transpose()?;

    let document = utils::read_document(&Input::from_arg(args.input.as_deref()))?;
    let parser = PathParser::new(config.converter.delimiter.as_str())?;
    let reader = NestedReader::with_parser(&document, parser)?;

    let strict = args.strict || config.converter.strict;
    let value = match default {
        Some(default) => reader.get_or(args.path.as_str(), default)?,
        None => reader.get(args.path.as_str(), strict)?,
    };
    debug!(found = value.type_name(), "Path resolved");

    output.data(&value)
}
