//! Declarative document schemas and generic frontmatter validation.
//!
//! Each document kind is described by data: a list of fields with a type, a
//! required marker and an optional default. [`DocumentSchema::validate`] walks
//! that description against the raw YAML mapping and yields typed [`Fields`].

use crate::frontmatter::value_kind;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use gazette_types::{EntityKind, FieldType};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Field `{field}` should be {expected}, found {found}")]
    InvalidType {
        field: String,
        expected: FieldType,
        found: &'static str,
    },

    #[error("Field `{field}` has malformed date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    #[error("Field `{field}` has invalid value `{value}`: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// A typed field value after validation
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Date(NaiveDate),
    Number(f64),
    Boolean(bool),
    StringList(Vec<String>),
}

/// Declaration of one frontmatter field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            default: None,
        }
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// Schema for one document kind
#[derive(Debug, Clone)]
pub struct DocumentSchema {
    pub kind: EntityKind,
    pub fields: Vec<FieldSpec>,
}

/// Validated fields of a single document, keyed by field name
#[derive(Debug, Clone, Default)]
pub struct Fields {
    values: HashMap<&'static str, FieldValue>,
    unknown: Vec<String>,
}

impl DocumentSchema {
    pub fn article() -> Self {
        use FieldType::*;
        Self {
            kind: EntityKind::Article,
            fields: vec![
                FieldSpec::required("title", String),
                FieldSpec::required("slug", String),
                FieldSpec::required("date", Date),
                FieldSpec::optional("updatedAt", Date),
                FieldSpec::required("category", String),
                FieldSpec::optional("subcategory", String),
                FieldSpec::optional("dek", String),
                FieldSpec::required("authors", StringList),
                FieldSpec::optional("tags", StringList)
                    .with_default(FieldValue::StringList(Vec::new())),
                FieldSpec::optional("featuredImage", String),
                FieldSpec::optional("featuredImageCaption", String),
                FieldSpec::optional("featuredImageCredit", String),
                FieldSpec::optional("sport", String),
                FieldSpec::optional("opponent", String),
                FieldSpec::optional("homeTeam", String),
                FieldSpec::optional("awayTeam", String),
                FieldSpec::optional("homeScore", Number),
                FieldSpec::optional("awayScore", Number),
                FieldSpec::optional("isOpinion", Boolean).with_default(FieldValue::Boolean(false)),
                FieldSpec::optional("featured", Boolean).with_default(FieldValue::Boolean(false)),
                FieldSpec::optional("status", String),
            ],
        }
    }

    pub fn author() -> Self {
        use FieldType::*;
        Self {
            kind: EntityKind::Author,
            fields: vec![
                FieldSpec::required("name", String),
                FieldSpec::required("slug", String),
                FieldSpec::optional("role", String),
                FieldSpec::optional("bio", String),
                FieldSpec::optional("avatar", String),
                FieldSpec::optional("twitter", String),
            ],
        }
    }

    pub fn category() -> Self {
        use FieldType::*;
        Self {
            kind: EntityKind::Category,
            fields: vec![
                FieldSpec::required("name", String),
                FieldSpec::required("slug", String),
                FieldSpec::optional("parent", String),
                FieldSpec::optional("description", String),
            ],
        }
    }

    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Article => Self::article(),
            EntityKind::Author => Self::author(),
            EntityKind::Category => Self::category(),
        }
    }

    /// Validate a raw frontmatter mapping against this schema
    ///
    /// Null values count as absent. Required strings and lists must be
    /// non-empty. Fields the schema does not declare are kept aside in
    /// [`Fields::unknown`] so the caller can report them.
    pub fn validate(&self, raw: &Mapping) -> Result<Fields, SchemaError> {
        let mut fields = Fields::default();

        for spec in &self.fields {
            let value = match raw.get(spec.name) {
                None | Some(Value::Null) => None,
                Some(value) => Some(coerce(spec, value)?),
            };

            let value = match value {
                Some(v) if spec.required && is_blank(&v) => None,
                other => other,
            };

            match value.or_else(|| spec.default.clone()) {
                Some(v) => {
                    fields.values.insert(spec.name, v);
                }
                None if spec.required => {
                    return Err(SchemaError::MissingField(spec.name.to_string()));
                }
                None => {}
            }
        }

        for key in raw.keys() {
            let name = match key {
                Value::String(s) => s.clone(),
                other => format!("{:?}", other),
            };
            if !self.fields.iter().any(|spec| spec.name == name) {
                fields.unknown.push(name);
            }
        }

        Ok(fields)
    }
}

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::String(s) => s.trim().is_empty(),
        FieldValue::StringList(items) => items.is_empty(),
        _ => false,
    }
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<FieldValue, SchemaError> {
    let invalid = || SchemaError::InvalidType {
        field: spec.name.to_string(),
        expected: spec.ty,
        found: value_kind(value),
    };

    match spec.ty {
        FieldType::String => scalar_string(value).map(FieldValue::String).ok_or_else(invalid),
        FieldType::Date => {
            let raw = value.as_str().ok_or_else(invalid)?;
            parse_date(raw)
                .map(FieldValue::Date)
                .ok_or_else(|| SchemaError::InvalidDate {
                    field: spec.name.to_string(),
                    value: raw.to_string(),
                })
        }
        FieldType::Number => value.as_f64().map(FieldValue::Number).ok_or_else(invalid),
        FieldType::Boolean => value.as_bool().map(FieldValue::Boolean).ok_or_else(invalid),
        FieldType::StringList => {
            let items = value.as_sequence().ok_or_else(invalid)?;
            items
                .iter()
                .map(|item| scalar_string(item).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::StringList)
        }
    }
}

/// Strings, plus bare numbers and booleans YAML would otherwise type (e.g. `tags: [2024]`)
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a frontmatter date: `YYYY-MM-DD`, or an RFC 3339 / ISO datetime whose date part is kept
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

impl Fields {
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn owned_string(&self, name: &str) -> Option<String> {
        self.string(name).map(str::to_string)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.values.get(name) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(FieldValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(FieldValue::StringList(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Frontmatter keys not declared by the schema
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    /// Fetch a field the schema marks required
    ///
    /// Validation guarantees presence, but a mismatched schema should still
    /// surface as a missing field rather than a panic.
    pub fn require_string(&self, name: &str) -> Result<String, SchemaError> {
        self.owned_string(name)
            .ok_or_else(|| SchemaError::MissingField(name.to_string()))
    }

    pub fn require_date(&self, name: &str) -> Result<NaiveDate, SchemaError> {
        self.date(name)
            .ok_or_else(|| SchemaError::MissingField(name.to_string()))
    }
}
