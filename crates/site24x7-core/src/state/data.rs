// # Resource Data
//
// The flat key-value representation the host hands to a mapper: an ID
// (empty until the remote service assigns one) plus attributes keyed by the
// declared field names.
//
// ## Zero values
//
// Getters never fail. An absent or `null` field reads as the zero value of
// its kind (`""`, `0`, `false`, empty list/map); [`ResourceData::get_ok`]
// tells a supplied non-zero value apart from an absent one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::schema::Schema;
use crate::error::{Error, Result};

/// Managed state of one resource instance
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Build resource data for a new instance from raw attributes.
    ///
    /// Declared defaults are filled in; missing required fields, values of
    /// the wrong kind and undeclared keys are rejected.
    pub fn new(schema: &Schema, attributes: Map<String, Value>) -> Result<Self> {
        Self {
            id: String::new(),
            attributes,
        }
        .validated(schema)
    }

    /// Check previously stored data against `schema` and fill in defaults
    pub fn validated(mut self, schema: &Schema) -> Result<Self> {
        for key in self.attributes.keys() {
            if schema.field(key).is_none() {
                return Err(Error::invalid_input(format!(
                    "{}: unknown field {:?}",
                    schema.type_name, key
                )));
            }
        }

        for field in schema.fields {
            if let Some(value) = self.get(field.name) {
                if !field.kind.accepts(value) {
                    return Err(Error::invalid_input(format!(
                        "{}: field {:?} must be a {}",
                        schema.type_name, field.name, field.kind
                    )));
                }
                continue;
            }

            if field.required {
                return Err(Error::invalid_input(format!(
                    "{}: missing required field {:?}",
                    schema.type_name, field.name
                )));
            }
            if let Some(default) = field.default {
                self.attributes
                    .insert(field.name.to_string(), default.to_value());
            }
        }

        Ok(self)
    }

    /// Set the ID (builder style)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The remote-assigned ID; empty before creation
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Forget the ID, marking the instance as absent
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Raw value of a field, `None` when absent or `null`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Whether the field holds a non-zero value
    pub fn get_ok(&self, key: &str) -> bool {
        match self.get(key) {
            None => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_i64() != Some(0),
            Some(Value::Bool(b)) => *b,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(entries)) => !entries.is_empty(),
            Some(Value::Null) => false,
        }
    }

    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or_default()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or_default()
    }

    pub fn get_str_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// String map, ordered by key
    pub fn get_str_map(&self, key: &str) -> BTreeMap<String, String> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    pub fn set_str_map(&mut self, key: &str, map: BTreeMap<String, String>) {
        let object: Map<String, Value> = map
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        self.attributes.insert(key.to_string(), Value::Object(object));
    }
}

// Attribute values may hold credentials; only names are printed.
impl std::fmt::Debug for ResourceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceData")
            .field("id", &self.id)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}
