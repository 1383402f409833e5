//! Field declarations for flat resource data
//!
//! Each resource kind declares its field names, their value kinds, whether
//! they are required, and their defaults. [`super::ResourceData`] uses the
//! table to fill in defaults and to reject malformed input before a mapper
//! ever reads a field.

use serde_json::Value;

/// Value kind of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
    Bool,
    StringList,
    StringMap,
}

impl FieldKind {
    /// Whether `value` has this kind. `null` never matches.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Int => value.as_i64().is_some(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldKind::StringMap => value
                .as_object()
                .is_some_and(|entries| entries.values().all(Value::is_string)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "integer",
            FieldKind::Bool => "bool",
            FieldKind::StringList => "list of strings",
            FieldKind::StringMap => "map of strings",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Default applied when an optional field is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Str(&'static str),
    Int(i64),
    Bool(bool),
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Str(s) => Value::from(s),
            FieldDefault::Int(i) => Value::from(i),
            FieldDefault::Bool(b) => Value::from(b),
        }
    }
}

/// One declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
        }
    }

    pub const fn defaulted(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

/// Field table of one resource kind
#[derive(Debug)]
pub struct Schema {
    /// Host type name, e.g. `site24x7_website_monitor`
    pub type_name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    /// Look up a declared field
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
