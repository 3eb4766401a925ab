//! A library for turning bibliographic exports into bibliometric statistics.
//!
//! `bibliometrix` reads Web of Science tagged plain-text exports and Scopus CSV
//! exports into one normalized record set, then derives production counts,
//! citation distributions and rankings from it.
//!
//! # Key Features
//!
//! - **Input formats**:
//!   - Web of Science tagged plain text (`PT J`, `AU Smith J`, ...)
//!   - Scopus CSV with configurable header mappings
//!
//! - **Analyses**:
//!   - Main information (documents, time span, authors, citations)
//!   - Annual production and compound annual growth rate
//!   - Most cited documents with citations per year
//!   - Most productive authors
//!   - Most relevant sources with Bradford's law zones
//!   - Author keyword frequencies
//!   - Country production from affiliations
//!
//! # Basic Usage
//!
//! ```rust
//! use bibliometrix::{RecordParser, WosParser};
//! use bibliometrix::analysis;
//!
//! let input = "PT J\nAU Smith J\nTI Example Article\nSO JOURNAL OF TESTS\nPY 2021\nTC 4\nER\n";
//!
//! let records = WosParser::new().parse(input).unwrap();
//! assert_eq!(records.len(), 1);
//!
//! let stats = analysis::statistics(&records);
//! assert_eq!(stats.total_documents, 1);
//! ```
//!
//! # Running Every Analysis
//!
//! ```rust
//! use bibliometrix::{AnalysisKind, SourceFormat, load_str, run_all};
//! use bibliometrix::analysis::AnalysisConfig;
//!
//! let input = "PT J\nAU Smith J; Doe A\nPY 2020\nER\nPT J\nAU Smith J\nPY 2021\nER\n";
//! let records = load_str(input, SourceFormat::Wos).unwrap();
//!
//! let report = run_all(&records, &AnalysisConfig::default());
//! assert!(report.get(AnalysisKind::Trends).is_some());
//! // No `SO` lines, so there is nothing to rank sources by.
//! assert!(report.get(AnalysisKind::TopSources).is_none());
//! ```
//!
//! # Error Handling
//!
//! Only file access and configuration problems are errors. Malformed lines and
//! unparsable numbers inside a record are absorbed (ignored or turned into
//! `None`), and an analysis whose input field is missing from every record
//! reports [`BibliometricError::Unavailable`] without affecting the others.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub mod analysis;
pub mod record;
pub mod report;
#[cfg(feature = "csv")]
pub mod scopus;
pub mod split;
mod utils;
pub mod wos;

// Reexports
pub use analysis::AnalysisConfig;
pub use record::{Field, FieldMap, Record, RecordSet};
pub use report::{AnalysisKind, AnalysisOutput, Report, run_all};
#[cfg(feature = "csv")]
pub use scopus::ScopusParser;
pub use wos::WosParser;

/// A specialized Result type for bibliometric operations.
pub type Result<T> = std::result::Result<T, BibliometricError>;

/// Errors surfaced to the caller.
#[derive(Error, Debug)]
pub enum BibliometricError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not valid UTF-8 text: {}", path.display())]
    Encoding { path: PathBuf },

    #[error("Unsupported format: {0} (expected \"wos\" or \"scopus\")")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Data unavailable for {analysis}: no record has a value for {field}")]
    Unavailable {
        analysis: AnalysisKind,
        field: Field,
    },
}

#[cfg(feature = "csv")]
impl From<csv::Error> for BibliometricError {
    fn from(err: csv::Error) -> Self {
        BibliometricError::InvalidFormat(err.to_string())
    }
}

/// The export format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Web of Science tagged plain text
    Wos,
    /// Scopus CSV
    Scopus,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Wos => "wos",
            SourceFormat::Scopus => "scopus",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = BibliometricError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wos" => Ok(SourceFormat::Wos),
            "scopus" => Ok(SourceFormat::Scopus),
            _ => Err(BibliometricError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Trait for implementing record parsers.
pub trait RecordParser {
    /// Parse a string containing one or more bibliographic records.
    ///
    /// # Errors
    ///
    /// Returns `BibliometricError` if the input is structurally unreadable.
    /// Individual malformed lines or values are never errors.
    fn parse(&self, input: &str) -> Result<RecordSet>;
}

/// Parses already-decoded text with the default parser for `format`.
pub fn load_str(input: &str, format: SourceFormat) -> Result<RecordSet> {
    let records = match format {
        SourceFormat::Wos => WosParser::new().parse(input)?,
        #[cfg(feature = "csv")]
        SourceFormat::Scopus => ScopusParser::new().parse(input)?,
        #[cfg(not(feature = "csv"))]
        SourceFormat::Scopus => {
            return Err(BibliometricError::UnsupportedFormat(
                "scopus (built without the \"csv\" feature)".to_string(),
            ));
        }
    };
    info!(format = %format, records = records.len(), "loaded records");
    Ok(records)
}

/// Reads `path` as UTF-8 text and parses it as `format`.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid UTF-8.
pub fn load_file<P: AsRef<Path>>(path: P, format: SourceFormat) -> Result<RecordSet> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| BibliometricError::Encoding {
        path: path.to_path_buf(),
    })?;
    load_str(&text, format)
}
