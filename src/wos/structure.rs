//! Web of Science intermediate data structures.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A flat tag → value record, as read from a Web of Science export.
///
/// Tags keep the order they were first seen in. A tag seen more than once
/// has its values joined with `"; "` in line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedRecord {
    fields: Vec<(CompactString, String)>,
}

impl TaggedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `content` under `tag`, joining onto an existing value.
    pub fn append(&mut self, tag: &str, content: &str) {
        match self.fields.iter_mut().find(|(t, _)| t == tag) {
            Some((_, value)) => {
                value.push_str("; ");
                value.push_str(content);
            }
            None => self
                .fields
                .push((CompactString::from(tag), content.to_string())),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

/// Everything read from one Web of Science export.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawWosData {
    /// Tagged lines seen before the first `PT` line (`FN`, `VR`).
    pub(crate) header: TaggedRecord,
    pub(crate) records: Vec<TaggedRecord>,
    /// Non-blank lines that carried no tag, with their line numbers.
    pub(crate) ignored_lines: Vec<(usize, String)>,
}
