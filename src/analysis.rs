//! Aggregation and ranking over a normalized [`RecordSet`].
//!
//! Every analysis is a pure function of the record set. None of them mutate
//! the records or depend on another analysis' output, so they can be run in
//! any order (or in parallel, see [`crate::run_all`]).
//!
//! An analysis whose input field is missing from every record returns
//! [`BibliometricError::Unavailable`]. [`statistics`] is the exception: it
//! always succeeds and leaves the affected figures as `None`.
//!
//! Rankings are deterministic: ties keep the order in which entities were
//! first seen (or, for [`top_cited`], the original record order).
//!
//! # Example
//!
//! ```
//! use bibliometrix::{RecordParser, WosParser};
//! use bibliometrix::analysis::{top_authors, trends};
//!
//! let input = "PT J\nAU Smith J; Doe A\nPY 2018\nER\nPT J\nAU Smith J\nPY 2020\nER\n";
//! let records = WosParser::new().parse(input).unwrap();
//!
//! let authors = top_authors(&records, 10).unwrap();
//! assert_eq!(authors[0].author, "Smith J");
//! assert_eq!(authors[0].documents, 2);
//!
//! let trend = trends(&records).unwrap();
//! assert_eq!(trend.yearly.len(), 2);
//! ```

mod authors;
mod cited;
mod countries;
mod keywords;
mod sources;
mod statistics;
mod trends;

pub use authors::{AuthorRank, h_index_approx, top_authors};
pub use cited::{CitedDocument, top_cited};
pub use countries::{CountryPattern, CountryRank, CountryTable, top_countries};
pub use keywords::{KeywordRank, KeywordRanking, top_keywords};
pub use sources::{
    BradfordZone, CORE_THRESHOLD, SourceRank, SourceRanking, ZONE2_THRESHOLD, bradford_cumulative,
    top_sources,
};
pub use statistics::{Statistics, statistics};
pub use trends::{Trends, YearCount, compound_annual_growth_rate, trends};

use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::{BibliometricError, Result};
use chrono::{Datelike, Utc};
use compact_str::CompactString;
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Options shared by the analyses.
///
/// # Examples
///
/// ```
/// use bibliometrix::analysis::{AnalysisConfig, CountryTable};
///
/// let config = AnalysisConfig {
///     top_keywords: 50,
///     countries: CountryTable::new().with_country("Japan", &["Japan"]),
///     ..AnalysisConfig::default()
/// }
/// .with_reference_year(2024);
/// assert_eq!(config.reference_year, 2024);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Rows kept by [`top_cited`]
    pub top_cited: usize,
    /// Rows kept by [`top_authors`]
    pub top_authors: usize,
    /// Rows kept by [`top_sources`]
    pub top_sources: usize,
    /// Rows kept by [`top_keywords`]
    pub top_keywords: usize,
    /// Rows kept by [`top_countries`]
    pub top_countries: usize,
    /// Year that citations per year are measured up to.
    /// Defaults to the current calendar year (UTC).
    pub reference_year: i32,
    /// Ordered country match list for [`top_countries`]
    pub countries: CountryTable,
    /// Whether [`crate::run_all`] computes the analyses on the rayon pool.
    pub run_in_parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_cited: 10,
            top_authors: 15,
            top_sources: 15,
            top_keywords: 30,
            top_countries: 15,
            reference_year: Utc::now().year(),
            countries: CountryTable::new(),
            run_in_parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Fixes the reference year, making citations per year reproducible.
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    #[must_use]
    pub fn with_countries(mut self, countries: CountryTable) -> Self {
        self.countries = countries;
        self
    }
}

/// Fails with `Unavailable` if no record carries `field`.
pub(crate) fn require(records: &RecordSet, field: Field, analysis: AnalysisKind) -> Result<()> {
    if records.has_field(field) {
        Ok(())
    } else {
        Err(BibliometricError::Unavailable { analysis, field })
    }
}

/// Counts tokens, keeping entities in first-seen order.
pub(crate) fn tally<I, S>(tokens: I) -> Vec<(CompactString, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut positions: HashMap<CompactString, usize> = HashMap::new();
    let mut counts: Vec<(CompactString, usize)> = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        match positions.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(CompactString::from(token), counts.len());
                counts.push((CompactString::from(token), 1));
            }
        }
    }
    counts
}

/// Sorts counts descending. The sort is stable, so equal counts keep their
/// first-seen order.
pub(crate) fn ranked(counts: Vec<(CompactString, usize)>) -> Vec<(CompactString, usize)> {
    counts
        .into_iter()
        .sorted_by_key(|(_, count)| Reverse(*count))
        .collect()
}
