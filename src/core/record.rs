//! Definition record model
//!
//! A connection type document has a handful of fields the generator reads
//! (`id`, `inherit_from`, `parameters`, `+parameters`, `visible`) and any number of
//! descriptive attributes that are carried through verbatim. The known fields are
//! typed; everything else lands in an ordered attribute map so documents round-trip
//! in their authored key order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::FILE_PATH_KEY;

/// One configurable field of a connection type.
///
/// Two parameters occupy the same slot when their [`ParameterSlot`]s are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Primary identity component. Required whenever parameters are merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_param_name: Option<String>,

    /// Secondary identity component, `false` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_extra: Option<bool>,

    /// Example value. Always a string once normalized. An explicit `null` is kept
    /// as `Some(Value::Null)` so it can be told apart from a missing example.
    #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Remaining descriptive attributes.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Composite identity of a [`Parameter`]: `(airflow_param_name, is_in_extra)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterSlot<'a> {
    /// The `airflow_param_name`
    pub name: &'a str,
    /// `is_in_extra`, defaulted to `false`
    pub in_extra: bool,
}

impl Parameter {
    /// Create a parameter with just a name, mostly useful in tests and fixtures.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            airflow_param_name: Some(name.into()),
            is_in_extra: None,
            example: None,
            attributes: Map::new(),
        }
    }

    /// Builder-style setter for `is_in_extra`.
    #[must_use]
    pub fn in_extra(mut self, in_extra: bool) -> Self {
        self.is_in_extra = Some(in_extra);
        self
    }

    /// Builder-style setter for `example`.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// The merge identity, or `None` when `airflow_param_name` is missing.
    pub fn slot(&self) -> Option<ParameterSlot<'_>> {
        self.airflow_param_name.as_deref().map(|name| ParameterSlot {
            name,
            in_extra: self.is_in_extra.unwrap_or(false),
        })
    }

    /// Rewrite `example` as a string.
    ///
    /// Values are rendered the way the published API has always received them:
    /// booleans as `True`/`False`, null as `None`, and lists and maps in their
    /// `['a', 'b']` / `{'k': 1}` form. Strings and numbers keep their literal text.
    pub fn normalize_example(&mut self) {
        self.example = self.example.take().map(|value| match value {
            Value::String(text) => Value::String(text),
            other => Value::String(render_example(&other)),
        });
    }
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn render_example(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_nested).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", quote(key), render_nested(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Inside a list or map, strings are quoted.
fn render_nested(value: &Value) -> String {
    match value {
        Value::String(text) => quote(text),
        other => render_example(other),
    }
}

fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// A connection type document as parsed, before inheritance is applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub id: String,

    #[serde(default)]
    pub inherit_from: Option<String>,

    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,

    /// The `+parameters` list extending the parent's parameters.
    #[serde(default, rename = "+parameters")]
    pub supplemental_parameters: Option<Vec<Parameter>>,

    #[serde(default)]
    pub visible: Option<bool>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RawRecord {
    /// Create an empty record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inherit_from: None,
            parameters: None,
            supplemental_parameters: None,
            visible: None,
            attributes: Map::new(),
        }
    }

    /// Normalize every `example` in both parameter lists.
    pub fn normalize_examples(&mut self) {
        for parameter in self.parameters.iter_mut().flatten() {
            parameter.normalize_example();
        }
        for parameter in self.supplemental_parameters.iter_mut().flatten() {
            parameter.normalize_example();
        }
    }

    /// Split into the typed lifecycle state.
    ///
    /// The `+parameters` list stays with the pending record; for a record without a
    /// parent it is returned separately so the caller can fold it in.
    pub fn into_parts(self) -> (ConnectionType, Option<String>, Option<Vec<Parameter>>) {
        let record = ConnectionType {
            id: self.id,
            attributes: self.attributes,
            parameters: self.parameters,
            visible: self.visible,
        };
        (record, self.inherit_from, self.supplemental_parameters)
    }
}

/// A fully resolved connection type.
///
/// Carries no `inherit_from` and no `+parameters`; the type has nowhere to put them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionType {
    pub id: String,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ConnectionType {
    /// `visible` defaults to true.
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Look up a verbatim attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Where the record came from, for error messages.
    pub fn origin(&self) -> String {
        self.attributes
            .get(FILE_PATH_KEY)
            .and_then(Value::as_str)
            .map_or_else(|| format!("<connection {}>", self.id), str::to_string)
    }
}

/// A record that still has to be merged with its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecord {
    /// Id of the parent record
    pub inherit_from: String,
    /// The record's own fields
    pub own: ConnectionType,
    /// `+parameters` to merge onto the parent's parameter list
    pub supplemental_parameters: Option<Vec<Parameter>>,
}

/// Lifecycle state of a store entry.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordState {
    Unresolved(PendingRecord),
    Resolved(ConnectionType),
}

impl RecordState {
    pub fn id(&self) -> &str {
        match self {
            Self::Unresolved(pending) => &pending.own.id,
            Self::Resolved(record) => &record.id,
        }
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
