//! # Classify Subcommand
//!
//! Tags raw values given on the command line. By default every value is a
//! string; with `--json` each value is a JSON literal, so `42` is a number
//! and `'"42"'` a string. The bare word `undefined` stands for an absent
//! value under `--json`.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use fieldtype_core::{explain, RuleId, TypeTag};
use serde::Serialize;
use serde_json::Value;

use crate::output::{write_structured, OutputFormat};

/// Arguments for the classify subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Parse each value as a JSON literal.
    #[arg(long)]
    pub json: bool,

    /// Report the rules that fired for each value.
    #[arg(long)]
    pub explain: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Values to classify.
    #[arg(required = true)]
    pub values: Vec<String>,
}

/// One classified value.
#[derive(Debug, Serialize)]
struct Report<'a> {
    value: &'a str,
    tag: TypeTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules: Option<Vec<RuleId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_format: Option<&'static str>,
}

/// Run the classify subcommand, writing results to `out`.
pub fn run(args: &ClassifyArgs, out: &mut impl Write) -> Result<()> {
    let mut reports = Vec::with_capacity(args.values.len());
    for raw in &args.values {
        let cell = parse_cell(raw, args.json)?;
        let classification = explain(cell.as_ref());
        tracing::debug!(value = %raw, tag = %classification.tag, "classified");
        let (rules, matched_format) = if args.explain {
            (Some(classification.fired), classification.matched_format)
        } else {
            (None, None)
        };
        reports.push(Report {
            value: raw,
            tag: classification.tag,
            rules,
            matched_format,
        });
    }

    match args.output {
        OutputFormat::Text => write_text(&reports, out),
        format => write_structured(format, &reports, out),
    }
}

/// Turn one argument into a dataset cell. `None` is an absent value.
fn parse_cell(raw: &str, json: bool) -> Result<Option<Value>> {
    if !json {
        return Ok(Some(Value::String(raw.to_string())));
    }
    if raw == "undefined" {
        return Ok(None);
    }
    let value = serde_json::from_str(raw).with_context(|| format!("invalid JSON literal {raw:?}"))?;
    Ok(Some(value))
}

fn write_text(reports: &[Report<'_>], out: &mut impl Write) -> Result<()> {
    for report in reports {
        write!(out, "{}\t{}", report.value, report.tag)?;
        if let Some(rules) = &report.rules {
            let names: Vec<_> = rules.iter().map(RuleId::as_str).collect();
            write!(out, "\t{}", names.join(","))?;
        }
        if let Some(format) = report.matched_format {
            write!(out, "\t{format}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
