//! Normalized bibliographic records.
//!
//! Both input paths end here: Web of Science tagged records are renamed
//! through a [`FieldMap`], Scopus rows through header aliases, and in both
//! cases `Year` and `Citations` are coerced to numbers (or `None`).

use crate::utils::{parse_count, parse_year};
use crate::wos::TaggedRecord;
use crate::wos::tags::WosTag;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

/// The semantic fields of a normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Authors,
    Title,
    Source,
    Year,
    Abstract,
    #[serde(rename = "Author_Keywords")]
    AuthorKeywords,
    Citations,
    References,
    Affiliations,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Authors,
        Field::Title,
        Field::Source,
        Field::Year,
        Field::Abstract,
        Field::AuthorKeywords,
        Field::Citations,
        Field::References,
        Field::Affiliations,
    ];

    /// Column name of the field in result tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Authors => "Authors",
            Field::Title => "Title",
            Field::Source => "Source",
            Field::Year => "Year",
            Field::Abstract => "Abstract",
            Field::AuthorKeywords => "Author_Keywords",
            Field::Citations => "Citations",
            Field::References => "References",
            Field::Affiliations => "Affiliations",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default tag mappings for Web of Science exports.
const DEFAULT_TAGS: &[(WosTag, Field)] = &[
    (WosTag::Authors, Field::Authors),
    (WosTag::Title, Field::Title),
    (WosTag::SourceTitle, Field::Source),
    (WosTag::PublicationYear, Field::Year),
    (WosTag::Abstract, Field::Abstract),
    (WosTag::AuthorKeywords, Field::AuthorKeywords),
    (WosTag::TimesCited, Field::Citations),
    (WosTag::CitedReferences, Field::References),
    (WosTag::Addresses, Field::Affiliations),
];

/// Tag to field configuration used by the normalizer.
///
/// Tags that are not mapped are kept on the record in
/// [`Record::extra_fields`] instead of being discarded.
///
/// # Examples
///
/// ```
/// use bibliometrix::{Field, FieldMap};
///
/// let mut map = FieldMap::new();
/// // Use the ISO source abbreviation instead of the full source title.
/// map.insert("J9", Field::Source).remove("SO");
/// assert_eq!(map.field_for("J9"), Some(Field::Source));
/// assert_eq!(map.field_for("SO"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(CompactString, Field)>,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMap {
    /// Creates the default Web of Science mapping
    /// (`AU`, `TI`, `SO`, `PY`, `AB`, `DE`, `TC`, `CR`, `C1`).
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_TAGS
                .iter()
                .map(|(tag, field)| (CompactString::from(tag.as_tag()), *field))
                .collect(),
        }
    }

    /// Creates a mapping with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Maps `tag` to `field`, replacing any previous mapping for `tag`.
    pub fn insert(&mut self, tag: &str, field: Field) -> &mut Self {
        match self.entries.iter_mut().find(|(t, _)| t == tag) {
            Some(entry) => entry.1 = field,
            None => self.entries.push((CompactString::from(tag), field)),
        }
        self
    }

    /// Removes the mapping for `tag`.
    pub fn remove(&mut self, tag: &str) -> &mut Self {
        self.entries.retain(|(t, _)| t != tag);
        self
    }

    pub fn field_for(&self, tag: &str) -> Option<Field> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, field)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Field)> {
        self.entries.iter().map(|(t, f)| (t.as_str(), *f))
    }
}

/// One row of the working table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Raw `;`-joined author list
    pub authors: Option<String>,
    pub title: Option<String>,
    /// Journal, book or proceedings title
    pub source: Option<String>,
    /// Publication year, `None` when missing or unparsable
    pub year: Option<i32>,
    pub abstract_text: Option<String>,
    /// Raw `;`-joined author keywords
    pub author_keywords: Option<String>,
    /// Times cited, `None` when missing or unparsable
    pub citations: Option<u64>,
    pub references: Option<String>,
    pub affiliations: Option<String>,
    /// Fields the mapping does not name, keyed by tag or header
    pub extra_fields: BTreeMap<String, String>,
}

impl Record {
    /// Stores `value` under `field`, coercing numeric fields.
    ///
    /// When a field is set twice the first value is kept, so several tags
    /// or headers can feed one field in priority order.
    pub(crate) fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Year => {
                if self.year.is_none() {
                    self.year = parse_year(value);
                }
                return;
            }
            Field::Citations => {
                if self.citations.is_none() {
                    self.citations = parse_count(value);
                }
                return;
            }
            Field::Authors => &mut self.authors,
            Field::Title => &mut self.title,
            Field::Source => &mut self.source,
            Field::Abstract => &mut self.abstract_text,
            Field::AuthorKeywords => &mut self.author_keywords,
            Field::References => &mut self.references,
            Field::Affiliations => &mut self.affiliations,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    /// The raw text of a string field. Always `None` for `Year` and `Citations`.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Authors => self.authors.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Source => self.source.as_deref(),
            Field::Abstract => self.abstract_text.as_deref(),
            Field::AuthorKeywords => self.author_keywords.as_deref(),
            Field::References => self.references.as_deref(),
            Field::Affiliations => self.affiliations.as_deref(),
            Field::Year | Field::Citations => None,
        }
    }

    /// Whether the record carries a usable value for `field`.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Year => self.year.is_some(),
            Field::Citations => self.citations.is_some(),
            _ => self.text(field).is_some(),
        }
    }

    /// Builds a record from a tagged record using `map`.
    pub fn from_tagged(tagged: &TaggedRecord, map: &FieldMap) -> Self {
        let mut record = Record::default();
        for (tag, value) in tagged.iter() {
            match map.field_for(tag) {
                Some(field) => record.set(field, value),
                None => {
                    record
                        .extra_fields
                        .insert(tag.to_string(), value.to_string());
                }
            }
        }
        record
    }
}

/// The normalized table every analysis runs on.
///
/// Dereferences to a slice of [`Record`], so it can be indexed and iterated
/// directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Whether at least one record has a value for `field`.
    ///
    /// A field that no record carries is treated as an absent column.
    pub fn has_field(&self, field: Field) -> bool {
        self.records.iter().any(|r| r.has(field))
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl Deref for RecordSet {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Applies `map` to every tagged record, preserving order.
pub fn normalize(tagged: &[TaggedRecord], map: &FieldMap) -> RecordSet {
    tagged
        .iter()
        .map(|record| Record::from_tagged(record, map))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tagged(pairs: &[(&str, &str)]) -> TaggedRecord {
        let mut record = TaggedRecord::new();
        for (tag, value) in pairs {
            record.append(tag, value);
        }
        record
    }

    #[test]
    fn test_default_mapping() {
        let raw = tagged(&[
            ("PT", "J"),
            ("AU", "Smith J"),
            ("AU", "Doe A"),
            ("TI", "A Title"),
            ("SO", "JOURNAL OF TESTS"),
            ("PY", "2021"),
            ("TC", "12"),
            ("C1", "Aff1"),
            ("C1", "Aff2"),
            ("UT", "WOS:000123"),
        ]);
        let record = Record::from_tagged(&raw, &FieldMap::new());
        assert_eq!(record.authors.as_deref(), Some("Smith J; Doe A"));
        assert_eq!(record.title.as_deref(), Some("A Title"));
        assert_eq!(record.source.as_deref(), Some("JOURNAL OF TESTS"));
        assert_eq!(record.year, Some(2021));
        assert_eq!(record.citations, Some(12));
        assert_eq!(record.affiliations.as_deref(), Some("Aff1; Aff2"));
        assert_eq!(record.extra_fields.get("PT").map(String::as_str), Some("J"));
        assert_eq!(
            record.extra_fields.get("UT").map(String::as_str),
            Some("WOS:000123")
        );
    }

    #[test]
    fn test_bad_numbers_become_none() {
        let raw = tagged(&[("PY", "forthcoming"), ("TC", "many")]);
        let record = Record::from_tagged(&raw, &FieldMap::new());
        assert_eq!(record.year, None);
        assert_eq!(record.citations, None);
        assert!(!record.has(Field::Year));
    }

    #[test]
    fn test_zero_citations_is_a_value() {
        let raw = tagged(&[("TC", "0")]);
        let record = Record::from_tagged(&raw, &FieldMap::new());
        assert_eq!(record.citations, Some(0));
        assert!(record.has(Field::Citations));
    }

    #[test]
    fn test_custom_mapping_first_value_wins() {
        let mut map = FieldMap::new();
        map.insert("J9", Field::Source);
        let raw = tagged(&[("J9", "J TESTS"), ("SO", "JOURNAL OF TESTS")]);
        let record = Record::from_tagged(&raw, &map);
        assert_eq!(record.source.as_deref(), Some("J TESTS"));
    }

    #[test]
    fn test_insert_replaces_existing_tag() {
        let mut map = FieldMap::empty();
        map.insert("ID", Field::AuthorKeywords)
            .insert("ID", Field::Title);
        assert_eq!(map.iter().count(), 1);
        assert_eq!(map.field_for("ID"), Some(Field::Title));
    }

    #[test]
    fn test_record_set_has_field() {
        let set = normalize(
            &[tagged(&[("TI", "One")]), tagged(&[("TI", "Two"), ("PY", "x")])],
            &FieldMap::new(),
        );
        assert_eq!(set.len(), 2);
        assert!(set.has_field(Field::Title));
        assert!(!set.has_field(Field::Year));
        assert!(!set.has_field(Field::Authors));
    }
}
