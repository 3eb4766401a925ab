use crate::analysis::{ranked, require, tally};
use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::Result;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Default country match list, in priority order.
const DEFAULT_COUNTRIES: &[(&str, &[&str])] = &[
    ("USA", &["USA", "United States"]),
    ("China", &["China", "Peoples R China"]),
    ("UK", &["UK", "England"]),
    ("Germany", &["Germany"]),
    ("Thailand", &["Thailand"]),
];

/// A country and the substrings that attribute an affiliation to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPattern {
    pub country: String,
    pub patterns: Vec<String>,
}

/// Ordered country lookup list.
///
/// An affiliation string is attributed to the first country whose patterns
/// it contains (case-sensitive substring match). This is a coarse heuristic:
/// one country per record, no parsing of the address structure.
///
/// # Examples
///
/// ```
/// use bibliometrix::analysis::CountryTable;
///
/// let table = CountryTable::new().with_country("Japan", &["Japan"]);
/// assert_eq!(table.match_country("Univ Tokyo, Tokyo, Japan"), Some("Japan"));
/// assert_eq!(table.match_country("Harvard Univ, Cambridge, MA USA"), Some("USA"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTable {
    entries: Vec<CountryPattern>,
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryTable {
    /// The default list: USA, China, UK, Germany, Thailand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_COUNTRIES
                .iter()
                .map(|(country, patterns)| CountryPattern {
                    country: country.to_string(),
                    patterns: patterns.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a country at the lowest priority.
    #[must_use]
    pub fn with_country(mut self, country: &str, patterns: &[&str]) -> Self {
        self.entries.push(CountryPattern {
            country: country.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    /// The first country in list order whose patterns occur in `affiliation`.
    pub fn match_country(&self, affiliation: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.patterns.iter().any(|p| affiliation.contains(p.as_str())))
            .map(|entry| entry.country.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryPattern> {
        self.entries.iter()
    }
}

/// One row of the country production table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRank {
    pub country: CompactString,
    pub documents: usize,
}

/// Counts records per country and keeps the `top_n` countries.
///
/// Each record counts for at most one country; records whose affiliations
/// match no country are left out.
pub fn top_countries(
    records: &RecordSet,
    table: &CountryTable,
    top_n: usize,
) -> Result<Vec<CountryRank>> {
    require(records, Field::Affiliations, AnalysisKind::TopCountries)?;

    let counts = tally(
        records
            .iter()
            .filter_map(|r| r.affiliations.as_deref())
            .filter_map(|affiliation| table.match_country(affiliation)),
    );
    Ok(ranked(counts)
        .into_iter()
        .take(top_n)
        .map(|(country, documents)| CountryRank { country, documents })
        .collect())
}
