//! Convert command handler

use super::utils::{self, Input};
use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemator_core::{Schema, SchemaConverter, Value};
use tracing::{debug, info, instrument};

/// Handle the convert command
#[instrument(skip(config, output), fields(schema = %args.schema.display(), each = args.each, lines = args.lines))]
pub fn handle_convert(args: ConvertArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("convert_command", &args.schema.display().to_string());

    let schema = utils::load_schema(&args.schema)?;
    let converter = utils::build_converter(config)?;
    let strict = args.strict || config.converter.strict;
    let input = Input::from_arg(args.input.as_deref());

    for issue in converter.check_schema(&schema) {
        output.warning(&format!("Schema issue {}", issue))?;
    }

    if args.lines {
        let items = read_lines(&input)?;
        info!(items = items.len(), strict, "Converting lines");
        return convert_each(&converter, &items, &schema, strict, output, |output, value| {
            output.record(value)
        });
    }

    let source = utils::read_document(&input)?;
    if args.each {
        let Value::List(items) = &source else {
            return Err(Error::invalid_args(format!(
                "--each expects a list at the top of {}, found {}",
                input.display_path().display(),
                source.type_name()
            )));
        };
        info!(items = items.len(), strict, "Converting each item");
        let mut converted = Vec::with_capacity(items.len());
        convert_each(&converter, items, &schema, strict, output, |_, value| {
            converted.push(value.clone());
            Ok(())
        })?;
        return output.data(&Value::List(converted));
    }

    info!(strict, "Converting document");
    let converted = converter.convert(&source, &schema, strict)?;
    output.data(&converted)
}

/// Run mass conversion, handing every converted item to `emit`
///
/// Stops at the first failing item.
fn convert_each<F>(
    converter: &SchemaConverter,
    items: &[Value],
    schema: &Schema,
    strict: bool,
    output: &mut OutputWriter,
    mut emit: F,
) -> Result<()>
where
    F: FnMut(&mut OutputWriter, &Value) -> Result<()>,
{
    let progress = output.progress_bar(items.len() as u64, "converting");

    for (index, result) in converter.convert_all(items, schema, strict).enumerate() {
        let value = result.map_err(|source| Error::Item { index, source })?;
        emit(output, &value)?;
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    output.success(&format!("Converted {} item(s)", items.len()))
}

/// Parse newline-delimited JSON, skipping blank lines
fn read_lines(input: &Input) -> Result<Vec<Value>> {
    let content = input.read_to_string()?;
    let mut items = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(line).map_err(|e| Error::InvalidFormat {
            path: input.display_path(),
            expected: format!("JSON on line {}", number + 1),
            message: e.to_string(),
        })?;
        items.push(item);
    }
    debug!(items = items.len(), "Lines parsed");
    Ok(items)
}
