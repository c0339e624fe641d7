//! Built-in filters
//!
//! Every filter reads the running value from [`FilterContext::source`] and
//! its arguments from the step list (`["name", arg0, arg1, ...]`). A `null`
//! running value passes through untouched unless stated otherwise.
//!
//! | name      | arguments                         | result                                   |
//! |-----------|-----------------------------------|------------------------------------------|
//! | `const`   | `value`                           | `value`, ignoring the running value      |
//! | `path`    | `[strict]`                        | running value used as a path into root   |
//! | `default` | `value`                           | `value` when the running value is null   |
//! | `sum`     |                                   | sum of a list of numbers                 |
//! | `average` |                                   | mean of a list of numbers, null if empty |
//! | `count`   |                                   | element count of a container or string   |
//! | `join`    | `[separator = ","]`               | list of scalars joined into a string     |
//! | `split`   | `[separator = ","]`               | string split into a list of strings      |
//! | `sort`    | `["asc" \| "desc"]`               | list of numbers or strings, sorted       |
//! | `unique`  |                                   | list without repeated elements           |
//! | `date`    | `[output = "%Y-%m-%d", input]`    | date reformatted                         |
//! | `replace` | `pattern, replacement`            | regex replacement on a string            |

use super::{FilterContext, FilterRegistry};
use crate::value::Value;
use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::Write as _;

/// Register every built-in filter in `registry`
pub fn register_all(registry: &mut FilterRegistry) {
    registry
        .register("const", constant)
        .register("path", path)
        .register("default", default)
        .register("sum", sum)
        .register("average", average)
        .register("count", count)
        .register("join", join)
        .register("split", split)
        .register("sort", sort)
        .register("unique", unique)
        .register("date", date)
        .register("replace", replace);
}

fn string_arg<'v>(args: &'v [Value], index: usize, default: &'v str) -> anyhow::Result<&'v str> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) => Ok(s),
        Some(other) => bail!("argument {index} must be a string, found {}", other.type_name()),
    }
}

fn list<'v>(ctx: &FilterContext<'v>) -> anyhow::Result<Option<&'v Vec<Value>>> {
    match ctx.source {
        Value::Null => Ok(None),
        Value::List(items) => Ok(Some(items)),
        other => bail!("expected a list, found {}", other.type_name()),
    }
}

fn numbers(items: &[Value]) -> anyhow::Result<Vec<f64>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64()
                .ok_or_else(|| anyhow!("element {i} is {}, not a number", item.type_name()))
        })
        .collect()
}

fn constant(_ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    Ok(args.first().cloned().unwrap_or_default())
}

/// The running value is itself a path, resolved against the root input
fn path(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    let strict = match args.first() {
        Some(Value::Bool(strict)) => *strict,
        _ => ctx.strict,
    };
    match ctx.source {
        Value::Null => Ok(Value::Null),
        key @ (Value::String(_) | Value::List(_)) => {
            let value = ctx.converter.get_value(ctx.root_source, key, strict)?;
            Ok(value)
        }
        other => bail!("expected a path, found {}", other.type_name()),
    }
}

fn default(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    if ctx.source.is_null() {
        return Ok(args.first().cloned().unwrap_or_default());
    }
    Ok(ctx.source.clone())
}

fn sum(ctx: &FilterContext<'_>, _args: &[Value]) -> anyhow::Result<Value> {
    let Some(items) = list(ctx)? else {
        return Ok(Value::Null);
    };
    let integers: Option<Vec<i64>> = items.iter().map(Value::as_i64).collect();
    if let Some(total) = integers.and_then(|ints| ints.into_iter().try_fold(0i64, i64::checked_add)) {
        return Ok(Value::from(total));
    }
    Ok(Value::from_f64(numbers(items)?.into_iter().sum()))
}

fn average(ctx: &FilterContext<'_>, _args: &[Value]) -> anyhow::Result<Value> {
    let Some(items) = list(ctx)? else {
        return Ok(Value::Null);
    };
    if items.is_empty() {
        return Ok(Value::Null);
    }
    let values = numbers(items)?;
    Ok(Value::from_f64(values.iter().sum::<f64>() / values.len() as f64))
}

fn count(ctx: &FilterContext<'_>, _args: &[Value]) -> anyhow::Result<Value> {
    let n = match ctx.source {
        Value::Null => 0,
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        Value::Object(object) => object.values().len(),
        Value::String(s) => s.chars().count(),
        other => bail!("cannot count a {}", other.type_name()),
    };
    Ok(Value::from(n))
}

fn join(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    let Some(items) = list(ctx)? else {
        return Ok(Value::Null);
    };
    let separator = string_arg(args, 0, ",")?;
    let parts = items
        .iter()
        .map(|item| {
            if item.is_container() {
                bail!("cannot join a nested {}", item.type_name());
            }
            Ok(item.to_plain_string())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Value::from(parts.join(separator)))
}

fn split(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    let separator = string_arg(args, 0, ",")?;
    match ctx.source {
        Value::Null => Ok(Value::Null),
        Value::String(s) if s.is_empty() => Ok(Value::List(Vec::new())),
        Value::String(s) => Ok(s.split(separator).map(Value::from).collect()),
        other => bail!("expected a string, found {}", other.type_name()),
    }
}

fn sort(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    let Some(items) = list(ctx)? else {
        return Ok(Value::Null);
    };
    let descending = match string_arg(args, 0, "asc")? {
        "asc" => false,
        "desc" => true,
        other => bail!("unknown sort order '{other}', expected 'asc' or 'desc'"),
    };

    let mut sorted = items.clone();
    if sorted.iter().all(|item| matches!(item, Value::String(_))) {
        sorted.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    } else {
        numbers(&sorted).context("sort needs all numbers or all strings")?;
        sorted.sort_by(|a, b| {
            let (a, b) = (a.as_f64().unwrap_or_default(), b.as_f64().unwrap_or_default());
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });
    }
    if descending {
        sorted.reverse();
    }
    Ok(Value::List(sorted))
}

fn unique(ctx: &FilterContext<'_>, _args: &[Value]) -> anyhow::Result<Value> {
    let Some(items) = list(ctx)? else {
        return Ok(Value::Null);
    };
    let mut seen: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(item) {
            seen.push(item.clone());
        }
    }
    Ok(Value::List(seen))
}

fn midnight(date: NaiveDate) -> anyhow::Result<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("{date} has no midnight"))
}

fn parse_datetime(value: &Value, input: Option<&str>) -> anyhow::Result<NaiveDateTime> {
    match (value, input) {
        (Value::String(text), Some(format)) => {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(parsed);
            }
            let date = NaiveDate::parse_from_str(text, format)
                .with_context(|| format!("'{text}' does not match '{format}'"))?;
            midnight(date)
        }
        (Value::String(text), None) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Ok(parsed.naive_utc());
            }
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .with_context(|| format!("'{text}' is not an RFC 3339 date"))?;
            midnight(date)
        }
        (Value::Number(_), _) => {
            let seconds = value
                .as_i64()
                .ok_or_else(|| anyhow!("timestamp {value} is not an integer"))?;
            DateTime::<Utc>::from_timestamp(seconds, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| anyhow!("timestamp {seconds} is out of range"))
        }
        (other, _) => bail!("expected a date string or timestamp, found {}", other.type_name()),
    }
}

fn date(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    if ctx.source.is_null() {
        return Ok(Value::Null);
    }
    let output = string_arg(args, 0, "%Y-%m-%d")?;
    let input = match args.get(1) {
        None | Some(Value::Null) => None,
        Some(_) => Some(string_arg(args, 1, "")?),
    };
    let parsed = parse_datetime(ctx.source, input)?;

    let mut rendered = String::new();
    write!(rendered, "{}", parsed.format(output))
        .map_err(|_| anyhow!("invalid date format '{output}'"))?;
    Ok(Value::from(rendered))
}

fn replace(ctx: &FilterContext<'_>, args: &[Value]) -> anyhow::Result<Value> {
    let pattern = match args.first() {
        Some(Value::String(pattern)) => pattern,
        _ => bail!("replace needs a pattern string as its first argument"),
    };
    let replacement = string_arg(args, 1, "")?;
    let regex = Regex::new(pattern).with_context(|| format!("invalid pattern '{pattern}'"))?;
    match ctx.source {
        Value::Null => Ok(Value::Null),
        Value::String(text) => Ok(Value::from(regex.replace_all(text, replacement).into_owned())),
        other => bail!("expected a string, found {}", other.type_name()),
    }
}
