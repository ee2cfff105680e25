//! # Output Formats
//!
//! Shared `--output` handling for the subcommands.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// How a subcommand renders its results.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated lines.
    #[default]
    Text,
    /// A pretty-printed JSON array.
    Json,
    /// A YAML sequence.
    Yaml,
}

/// Write `rows` as JSON or YAML. Text rendering is subcommand-specific.
pub fn write_structured<T: Serialize>(format: OutputFormat, rows: &[T], out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, rows)?,
        OutputFormat::Text => anyhow::bail!("text output is rendered by the subcommand"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_structured(OutputFormat::Json, &[Row { name: "a" }], &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([{"name": "a"}]));
    }

    #[test]
    fn test_yaml_output() {
        let mut out = Vec::new();
        write_structured(OutputFormat::Yaml, &[Row { name: "a" }], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "- name: a\n");
    }

    #[test]
    fn test_text_is_not_structured() {
        let mut out = Vec::new();
        assert!(write_structured(OutputFormat::Text, &[Row { name: "a" }], &mut out).is_err());
    }
}
