//! # Dataset Field Inspection
//!
//! Walks a JSON dataset and produces one [`FieldOption`] per leaf field,
//! tagged with [`classify`] and paired with the filter widget a UI should
//! offer for it.
//!
//! ## Paths
//!
//! Field paths start at a configurable root label (`root` by default):
//!
//! - a root object yields `root.key`, `root.key.nested`, ...
//! - a root array is sampled from its first element and yields
//!   `root[].key`, ...
//! - an array whose first element is an object extends the path with `[]`
//!   and is walked through that element: `root.items[].sku`.
//!
//! Every other value is a leaf. Arrays of scalars are `array` leaves and
//! `null` leaves are `undetermined`. Objects below `max_depth` are not
//! filterable and are left out.
//!
//! Fields are listed in the dataset's own key order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::classifier::classify;
use crate::error::FieldTypeError;
use crate::tag::TypeTag;

/// The filter control offered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterWidget {
    /// A calendar picker, offered for `date` fields.
    DatePicker,
    /// A free-text input, offered for everything else.
    TextInput,
}

impl FilterWidget {
    /// The widget for a field of the given tag.
    pub fn for_tag(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Date => Self::DatePicker,
            _ => Self::TextInput,
        }
    }

    /// Returns the snake_case name of this widget.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DatePicker => "date_picker",
            Self::TextInput => "text_input",
        }
    }
}

impl std::fmt::Display for FilterWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filterable field of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Dotted path of the field, starting at the root label.
    pub field: String,
    /// Classification of the sampled value.
    pub tag: TypeTag,
    /// Filter control for the field.
    pub widget: FilterWidget,
}

impl FieldOption {
    fn new(field: String, value: &Value) -> Self {
        let tag = classify(value);
        Self {
            field,
            tag,
            widget: FilterWidget::for_tag(tag),
        }
    }
}

/// Inspection settings, loadable from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    /// First path segment of every field.
    pub root_label: String,
    /// Number of object levels walked, counting the root. Objects below
    /// this depth are skipped. The root is always walked.
    pub max_depth: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            root_label: "root".to_string(),
            max_depth: 8,
        }
    }
}

impl InspectOptions {
    /// Parse options from a YAML document. Missing keys take their defaults.
    pub fn from_yaml(source: &str) -> Result<Self, FieldTypeError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// List the fields of `dataset` with their inferred tags.
///
/// # Errors
///
/// Returns [`FieldTypeError::InvalidDataset`] if the root is neither an
/// object nor an array of objects.
pub fn inspect(dataset: &Value, options: &InspectOptions) -> Result<Vec<FieldOption>, FieldTypeError> {
    let mut fields = Vec::new();
    match dataset {
        Value::Object(map) => walk(map, &options.root_label, 1, options, &mut fields),
        Value::Array(items) => match items.first() {
            None => debug!("empty root array, no fields"),
            Some(Value::Object(map)) => {
                let prefix = format!("{}[]", options.root_label);
                walk(map, &prefix, 1, options, &mut fields);
            }
            Some(other) => {
                return Err(FieldTypeError::InvalidDataset(format!(
                    "root array holds {} values, expected objects",
                    classify(other)
                )));
            }
        },
        other => {
            return Err(FieldTypeError::InvalidDataset(format!(
                "root is {}, expected an object or an array of objects",
                classify(other)
            )));
        }
    }
    debug!(count = fields.len(), "inspected dataset");
    Ok(fields)
}

fn walk(
    map: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    options: &InspectOptions,
    out: &mut Vec<FieldOption>,
) {
    let descend = depth < options.max_depth;
    for (key, value) in map {
        let path = format!("{prefix}.{key}");
        match value {
            Value::Object(nested) if descend => walk(nested, &path, depth + 1, options, out),
            Value::Object(_) => trace!(field = %path, "object below max depth skipped"),
            Value::Array(items) if descend => match items.first() {
                Some(Value::Object(nested)) => {
                    walk(nested, &format!("{path}[]"), depth + 1, options, out);
                }
                _ => out.push(FieldOption::new(path, value)),
            },
            _ => out.push(FieldOption::new(path, value)),
        }
    }
}
