//! # Inspect Subcommand
//!
//! Reads a JSON dataset from a file or stdin and lists its fields with
//! their tags and filter widgets. Options come from an optional YAML file
//! (`--config`); command-line flags override it.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fieldtype_core::{inspect, FieldOption, InspectOptions};
use serde_json::Value;

use crate::output::{write_structured, OutputFormat};

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub path: PathBuf,

    /// YAML file with inspection options.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// First path segment of every field.
    #[arg(long)]
    pub root_label: Option<String>,

    /// Number of object levels to walk, counting the root.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

impl InspectArgs {
    /// Resolve the effective options: defaults, then the config file, then flags.
    pub fn options(&self) -> Result<InspectOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                InspectOptions::from_yaml(&source)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => InspectOptions::default(),
        };
        if let Some(label) = &self.root_label {
            options.root_label = label.clone();
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        Ok(options)
    }
}

/// Run the inspect subcommand, writing results to `out`.
pub fn run(args: &InspectArgs, out: &mut impl Write) -> Result<()> {
    let options = args.options()?;
    let source = read_source(&args.path)?;
    let dataset: Value = serde_json::from_str(&source)
        .with_context(|| format!("{} is not valid JSON", args.path.display()))?;
    let fields = inspect(&dataset, &options)?;
    tracing::info!(fields = fields.len(), path = %args.path.display(), "inspected dataset");

    match args.output {
        OutputFormat::Text => write_text(&fields, out),
        format => write_structured(format, &fields, out),
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read dataset from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_text(fields: &[FieldOption], out: &mut impl Write) -> Result<()> {
    for field in fields {
        writeln!(out, "{}\t{}\t{}", field.field, field.tag, field.widget)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(path: PathBuf) -> InspectArgs {
        InspectArgs {
            path,
            config: None,
            root_label: None,
            max_depth: None,
            output: OutputFormat::Text,
        }
    }

    fn run_to_string(args: &InspectArgs) -> String {
        let mut out = Vec::new();
        run(args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rows.json", r#"[{"when": "2023-05-17", "who": "ada"}]"#);
        assert_eq!(
            run_to_string(&args(path)),
            "root[].when\tdate\tdate_picker\nroot[].who\tstring\ttext_input\n"
        );
    }

    #[test]
    fn test_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "doc.json", r#"{"n": 1}"#);
        let mut a = args(path);
        a.output = OutputFormat::Json;
        let parsed: Value = serde_json::from_str(&run_to_string(&a)).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{"field": "root.n", "tag": "number", "widget": "text_input"}])
        );
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(&dir, "opts.yaml", "root_label: rows\nmax_depth: 1\n");
        let dataset = write_file(&dir, "doc.json", r#"{"a": {"b": 1}, "n": 2}"#);

        let mut a = args(dataset);
        a.config = Some(config);
        assert_eq!(run_to_string(&a), "rows.n\tnumber\ttext_input\n");

        a.max_depth = Some(2);
        a.root_label = Some("data".to_string());
        assert_eq!(
            run_to_string(&a),
            "data.a.b\tnumber\ttext_input\ndata.n\tnumber\ttext_input\n"
        );
    }

    #[test]
    fn test_errors_carry_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        let missing = args(dir.path().join("missing.json"));
        let err = run(&missing, &mut out).unwrap_err();
        assert!(err.to_string().contains("failed to read"));

        let bad = args(write_file(&dir, "bad.json", "{"));
        let err = run(&bad, &mut out).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));

        let scalar = args(write_file(&dir, "scalar.json", "42"));
        let err = run(&scalar, &mut out).unwrap_err();
        assert!(err.to_string().contains("invalid dataset"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(write_file(&dir, "doc.json", "{}"));
        a.config = Some(write_file(&dir, "opts.yaml", "max_depth: [1]\n"));
        assert!(a.options().is_err());
    }
}
