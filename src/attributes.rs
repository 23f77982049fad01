//! Raw attributes supplied to entity creation.
//!
//! Two keys are reserved:
//! - `class`: the BEM class query, a string or a list of strings
//! - `bemID`: when truthy, the composed attributes gain `id` = entity name
//!
//! Every other key is a plain HTML attribute and passes through verbatim.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::BemError;

pub const CLASS_KEY: &str = "class";
pub const BEM_ID_KEY: &str = "bemID";

/// Class attribute as handed over by the template layer.
///
/// Attribute merging upstream may produce a list (`["BUTTON Btn", "_primary"]`)
/// instead of a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValue {
    Text(String),
    List(Vec<String>),
}

impl ClassValue {
    /// Flatten into one space-split token sequence. Empty pieces are skipped.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => split_classes(text).collect(),
            Self::List(items) => items.iter().flat_map(|item| split_classes(item)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAttributes {
    pub class: Option<ClassValue>,
    pub bem_id: bool,
    pub rest: BTreeMap<String, String>,
}

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(ClassValue::Text(class.into()));
        self
    }

    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class = Some(ClassValue::List(
            classes.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn bem_id(mut self, bem_id: bool) -> Self {
        self.bem_id = bem_id;
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.rest.insert(key.into(), value.into());
        self
    }

    /// Build from string key/value pairs, splitting out the reserved keys.
    ///
    /// `bemID` is a string here, so only the empty string is false.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attrs = Self::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                CLASS_KEY => attrs.class = Some(ClassValue::Text(value)),
                BEM_ID_KEY => attrs.bem_id = !value.is_empty(),
                _ => {
                    attrs.rest.insert(key, value);
                }
            }
        }
        attrs
    }

    /// Build from a JSON object such as `{"class": "LI Item _1-label", "bemID": true}`.
    pub fn from_json(value: &Value) -> Result<Self, BemError> {
        let Value::Object(map) = value else {
            return Err(BemError::InvalidAttributes(format!(
                "expected an object, got {}",
                value
            )));
        };

        let mut attrs = Self::default();
        for (key, value) in map {
            match key.as_str() {
                CLASS_KEY => attrs.class = class_from_json(value)?,
                BEM_ID_KEY => attrs.bem_id = is_truthy(value),
                _ => match value {
                    Value::Null => {
                        log::trace!("Dropping null attribute '{}'", key);
                    }
                    Value::String(s) => {
                        attrs.rest.insert(key.clone(), s.clone());
                    }
                    Value::Number(n) => {
                        attrs.rest.insert(key.clone(), n.to_string());
                    }
                    Value::Bool(b) => {
                        attrs.rest.insert(key.clone(), b.to_string());
                    }
                    Value::Array(_) | Value::Object(_) => {
                        return Err(BemError::InvalidAttributes(format!(
                            "attribute '{}' must be a scalar value",
                            key
                        )));
                    }
                },
            }
        }
        Ok(attrs)
    }

    /// Class tokens after normalization. Absent class yields no tokens.
    pub fn class_tokens(&self) -> Vec<&str> {
        self.class.as_ref().map(ClassValue::tokens).unwrap_or_default()
    }
}

fn split_classes(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|piece| !piece.is_empty())
}

fn class_from_json(value: &Value) -> Result<Option<ClassValue>, BemError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(ClassValue::Text(s.clone()))),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(BemError::InvalidAttributes(format!(
                    "class list entries must be strings, got {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(ClassValue::List(items))),
        other => Err(BemError::InvalidAttributes(format!(
            "class must be a string or a list of strings, got {}",
            other
        ))),
    }
}

/// Template-runtime truthiness: `false`, `null`, `0` and `""` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
