use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::key::comment_key;

pub type Section = IndexMap<String, String>;

/// Parsed INI data: sections of raw string values plus the comments that annotated them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    sections: IndexMap<String, Section>,
    section_comments: IndexMap<String, String>,
    key_comments: IndexMap<String, String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    pub fn insert(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.ensure_section(section).insert(key.into(), value.into());
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries))
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn set_section_comment(&mut self, section: &str, comment: impl Into<String>) {
        self.section_comments
            .insert(section.to_string(), comment.into());
    }

    pub fn set_key_comment(&mut self, section: &str, key: &str, comment: impl Into<String>) {
        self.key_comments
            .insert(comment_key(section, key), comment.into());
    }

    pub fn section_comment(&self, section: &str) -> Option<&str> {
        self.section_comments.get(section).map(String::as_str)
    }

    pub fn key_comment(&self, section: &str, key: &str) -> Option<&str> {
        self.key_comments
            .get(&comment_key(section, key))
            .map(String::as_str)
    }

    /// Folds `other` into `self`; values and comments from `other` overwrite.
    pub fn merge(&mut self, other: Store) {
        for (name, entries) in other.sections {
            self.ensure_section(&name).extend(entries);
        }
        self.section_comments.extend(other.section_comments);
        self.key_comments.extend(other.key_comments);
    }

    pub fn to_value(&self) -> Value {
        let sections = self
            .sections
            .iter()
            .map(|(name, entries)| (name.clone(), section_to_value(entries)))
            .collect::<Map<String, Value>>();
        Value::Object(sections)
    }
}

pub(crate) fn section_to_value(entries: &Section) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}
