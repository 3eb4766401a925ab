//! Scopus CSV parser implementation.
//!
//! Scopus exports are already tabular, so parsing is a header lookup plus the
//! same numeric coercion the Web of Science path uses.
//!
//! # Example
//!
//! ```
//! use bibliometrix::{RecordParser, ScopusParser};
//!
//! let input = "Authors,Title,Year,Source title,Cited by\n\"Smith J.; Doe A.\",Example Paper,2023,Test Journal,5";
//!
//! let records = ScopusParser::new().parse(input).unwrap();
//! assert_eq!(records[0].title.as_deref(), Some("Example Paper"));
//! assert_eq!(records[0].citations, Some(5));
//! ```

use csv::ReaderBuilder;

use crate::record::{Field, Record, RecordSet};
use crate::{RecordParser, Result};

/// Default header aliases for Scopus column names.
const DEFAULT_HEADERS: &[(Field, &[&str])] = &[
    (Field::Authors, &["authors", "author"]),
    (Field::Title, &["title", "document title"]),
    (Field::Source, &["source title", "journal"]),
    (Field::Year, &["year", "publication year"]),
    (Field::Abstract, &["abstract"]),
    (Field::AuthorKeywords, &["author keywords", "keywords"]),
    (Field::Citations, &["cited by", "times cited", "citations"]),
    (Field::References, &["references"]),
    (
        Field::Affiliations,
        &["affiliations", "authors with affiliations"],
    ),
];

/// Configuration for Scopus CSV parsing with custom header mappings.
///
/// # Examples
///
/// ```
/// use bibliometrix::Field;
/// use bibliometrix::scopus::ScopusConfig;
///
/// let mut config = ScopusConfig::new();
/// config.set_header_mapping(Field::Source, vec!["Journal Name".to_string()]);
/// config.set_delimiter(b';');
/// ```
#[derive(Debug, Clone)]
pub struct ScopusConfig {
    header_map: Vec<(Field, Vec<String>)>,
    delimiter: u8,
}

impl Default for ScopusConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopusConfig {
    /// Creates a configuration with the default Scopus header aliases.
    #[must_use]
    pub fn new() -> Self {
        Self {
            header_map: DEFAULT_HEADERS
                .iter()
                .map(|(field, aliases)| (*field, aliases.iter().map(|s| s.to_string()).collect()))
                .collect(),
            delimiter: b',',
        }
    }

    /// Replaces the header aliases for `field`.
    pub fn set_header_mapping(&mut self, field: Field, aliases: Vec<String>) -> &mut Self {
        match self.header_map.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = aliases,
            None => self.header_map.push((field, aliases)),
        }
        self
    }

    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Finds the field for a header, ignoring case and surrounding whitespace.
    fn field_for_header(&self, header: &str) -> Option<Field> {
        let header = header.trim().to_lowercase();
        self.header_map
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a.to_lowercase() == header))
            .map(|(field, _)| *field)
    }
}

/// Parser for Scopus CSV exports.
#[derive(Debug, Clone, Default)]
pub struct ScopusParser {
    config: ScopusConfig,
}

impl ScopusParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: ScopusConfig) -> Self {
        self.config = config;
        self
    }
}

impl RecordParser for ScopusParser {
    /// # Errors
    ///
    /// Returns `BibliometricError::InvalidFormat` when the CSV itself is
    /// malformed (for example a row with an unterminated quote).
    fn parse(&self, input: &str) -> Result<RecordSet> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .flexible(true)
            .from_reader(input.as_bytes());

        let headers: Vec<(String, Option<Field>)> = reader
            .headers()?
            .iter()
            .map(|h| (h.trim().to_string(), self.config.field_for_header(h)))
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record = Record::default();
            for ((header, field), value) in headers.iter().zip(row.iter()) {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                match field {
                    Some(field) => record.set(*field, value),
                    None => {
                        record.extra_fields.insert(header.clone(), value.to_string());
                    }
                }
            }
            records.push(record);
        }

        Ok(RecordSet::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_scopus() {
        let input = "\
Authors,Title,Year,Source title,Cited by,Author Keywords,Affiliations,EID
\"Smith J.; Doe A.\",Test Paper,2023,Test Journal,12,Bibliometrics; Scopus,\"Univ A, Bangkok, Thailand\",2-s2.0-1
Lee K.,Another Paper,2022,Other Journal,,,,2-s2.0-2";

        let records = ScopusParser::new().parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].authors.as_deref(), Some("Smith J.; Doe A."));
        assert_eq!(records[0].year, Some(2023));
        assert_eq!(records[0].citations, Some(12));
        assert_eq!(
            records[0].author_keywords.as_deref(),
            Some("Bibliometrics; Scopus")
        );
        assert_eq!(
            records[0].extra_fields.get("EID").map(String::as_str),
            Some("2-s2.0-1")
        );
        assert_eq!(records[1].citations, None);
        assert_eq!(records[1].affiliations, None);
    }

    #[test]
    fn test_custom_headers_and_delimiter() {
        let input = "Writers;Published;Journal Name\nSmith J.;2019;J Tests";

        let mut config = ScopusConfig::new();
        config
            .set_header_mapping(Field::Authors, vec!["Writers".to_string()])
            .set_header_mapping(Field::Year, vec!["Published".to_string()])
            .set_header_mapping(Field::Source, vec!["Journal Name".to_string()])
            .set_delimiter(b';');

        let records = ScopusParser::new().with_config(config).parse(input).unwrap();
        assert_eq!(records[0].authors.as_deref(), Some("Smith J."));
        assert_eq!(records[0].year, Some(2019));
        assert_eq!(records[0].source.as_deref(), Some("J Tests"));
    }

    #[test]
    fn test_non_numeric_year() {
        let input = "Title,Year\nPaper,in press";
        let records = ScopusParser::new().parse(input).unwrap();
        assert_eq!(records[0].year, None);
    }

    #[test]
    fn test_bom_header() {
        let input = "\u{feff}Authors,Title\nSmith J.,Paper";
        let records = ScopusParser::new().parse(input).unwrap();
        assert_eq!(records[0].authors.as_deref(), Some("Smith J."));
    }
}
