//! Web of Science plain-text parser implementation.
//!
//! Provides functionality to parse Web of Science tagged exports into
//! normalized records.
//!
//! # Example
//!
//! ```
//! use bibliometrix::{RecordParser, WosParser};
//!
//! let input = r#"FN Clarivate Analytics Web of Science
//! VR 1.0
//! PT J
//! AU Smith, J
//!    Doe, A
//! TI Example Title
//! SO JOURNAL OF EXAMPLES
//! PY 2023
//! TC 7
//! ER
//!
//! EF"#;
//!
//! let records = WosParser::new().parse(input).unwrap();
//! assert_eq!(records[0].title.as_deref(), Some("Example Title"));
//! assert_eq!(records[0].citations, Some(7));
//! ```
//!
//! Continuation lines (such as the indented second author above) carry no
//! tag and are not part of the record.

mod parse;
mod structure;
pub mod tags;

use crate::record::{FieldMap, RecordSet, normalize};
use crate::{RecordParser, Result};
use parse::wos_parse;
pub use structure::TaggedRecord;
use tracing::debug;

/// Parser for Web of Science tagged plain-text exports.
///
/// Each line starts with a two-character tag and a space, and every record
/// starts with a `PT` line.
#[derive(Debug, Clone, Default)]
pub struct WosParser {
    field_map: FieldMap,
}

impl WosParser {
    /// Creates a parser with the default tag mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibliometrix::WosParser;
    /// let parser = WosParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tag to field mapping.
    #[must_use]
    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }
}

/// Parses `input` into tagged records without normalizing them.
///
/// The number of records equals the number of `PT` lines, or one when the
/// input has tagged lines but no `PT` line at all.
pub fn parse_tagged(input: &str) -> Vec<TaggedRecord> {
    wos_parse(input).records
}

impl RecordParser for WosParser {
    /// Parses a Web of Science export into a normalized record set.
    ///
    /// Never fails: malformed lines are skipped and bad numbers become `None`.
    fn parse(&self, input: &str) -> Result<RecordSet> {
        let raw = wos_parse(input);
        if !raw.ignored_lines.is_empty() {
            debug!(
                ignored = raw.ignored_lines.len(),
                first_line = raw.ignored_lines[0].0,
                "skipped untagged lines"
            );
        }
        if let Some(version) = raw.header.get(tags::WosTag::Version.as_tag()) {
            debug!(version, "web of science export header");
        }
        Ok(normalize(&raw.records, &self.field_map))
    }
}
