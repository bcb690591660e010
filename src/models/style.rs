use crate::core::errors::{Error, Result};
use crate::models::color::Color;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Color(Color),
    Opacity(f64),
    Integer(i64),
    Flag(bool),
    /// `[x, y]` coordinate pair.
    Offset(i32, i32),
}

/// One entry of a `.sublime-theme` document: a target class and its
/// properties.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub class: &'static str,
    pub properties: BTreeMap<&'static str, StyleValue>,
}

impl StyleRule {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: StyleValue) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.properties.get(key)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Field<'a> {
    Class(&'a str),
    Value(&'a StyleValue),
}

impl Serialize for StyleRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // `class` sorts in with the properties
        let mut fields: BTreeMap<&str, Field<'_>> = self
            .properties
            .iter()
            .map(|(key, value)| (*key, Field::Value(value)))
            .collect();
        fields.insert("class", Field::Class(self.class));

        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in &fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered list of style rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StyleDocument {
    pub rules: Vec<StyleRule>,
}

impl StyleDocument {
    /// Render with sorted keys and four-space indentation so the same input
    /// always produces the same bytes.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| Error::Other(e.to_string()))
    }

    pub fn rule(&self, class: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|rule| rule.class == class)
    }
}
