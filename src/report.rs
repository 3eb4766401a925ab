//! Running analyses by name and collecting their results.
//!
//! Each analysis is independent of the others: one being unavailable (its
//! input field is missing from every record) never stops the rest.

use crate::analysis::{
    self, AnalysisConfig, AuthorRank, CitedDocument, CountryRank, KeywordRanking, SourceRanking,
    Statistics, Trends,
};
use crate::record::{Field, RecordSet};
use crate::{BibliometricError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// The analyses the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Statistics,
    Trends,
    TopCited,
    TopAuthors,
    TopSources,
    TopKeywords,
    TopCountries,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 7] = [
        AnalysisKind::Statistics,
        AnalysisKind::Trends,
        AnalysisKind::TopCited,
        AnalysisKind::TopAuthors,
        AnalysisKind::TopSources,
        AnalysisKind::TopKeywords,
        AnalysisKind::TopCountries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Statistics => "statistics",
            AnalysisKind::Trends => "trends",
            AnalysisKind::TopCited => "top_cited",
            AnalysisKind::TopAuthors => "top_authors",
            AnalysisKind::TopSources => "top_sources",
            AnalysisKind::TopKeywords => "top_keywords",
            AnalysisKind::TopCountries => "top_countries",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = BibliometricError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        AnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| BibliometricError::InvalidConfig(format!("unknown analysis: {s}")))
    }
}

/// The result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysis", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutput {
    Statistics(Statistics),
    Trends(Trends),
    TopCited(Vec<CitedDocument>),
    TopAuthors(Vec<AuthorRank>),
    TopSources(SourceRanking),
    TopKeywords(KeywordRanking),
    TopCountries(Vec<CountryRank>),
}

impl AnalysisOutput {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisOutput::Statistics(_) => AnalysisKind::Statistics,
            AnalysisOutput::Trends(_) => AnalysisKind::Trends,
            AnalysisOutput::TopCited(_) => AnalysisKind::TopCited,
            AnalysisOutput::TopAuthors(_) => AnalysisKind::TopAuthors,
            AnalysisOutput::TopSources(_) => AnalysisKind::TopSources,
            AnalysisOutput::TopKeywords(_) => AnalysisKind::TopKeywords,
            AnalysisOutput::TopCountries(_) => AnalysisKind::TopCountries,
        }
    }
}

/// Runs a single analysis with the row limits from `config`.
pub fn run(
    kind: AnalysisKind,
    records: &RecordSet,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput> {
    Ok(match kind {
        AnalysisKind::Statistics => AnalysisOutput::Statistics(analysis::statistics(records)),
        AnalysisKind::Trends => AnalysisOutput::Trends(analysis::trends(records)?),
        AnalysisKind::TopCited => AnalysisOutput::TopCited(analysis::top_cited(
            records,
            config.top_cited,
            config.reference_year,
        )?),
        AnalysisKind::TopAuthors => {
            AnalysisOutput::TopAuthors(analysis::top_authors(records, config.top_authors)?)
        }
        AnalysisKind::TopSources => {
            AnalysisOutput::TopSources(analysis::top_sources(records, config.top_sources)?)
        }
        AnalysisKind::TopKeywords => {
            AnalysisOutput::TopKeywords(analysis::top_keywords(records, config.top_keywords)?)
        }
        AnalysisKind::TopCountries => AnalysisOutput::TopCountries(analysis::top_countries(
            records,
            &config.countries,
            config.top_countries,
        )?),
    })
}

/// Results of every analysis over one record set.
#[derive(Debug, Default)]
pub struct Report {
    results: BTreeMap<AnalysisKind, AnalysisOutput>,
    errors: BTreeMap<AnalysisKind, BibliometricError>,
}

impl Report {
    pub fn get(&self, kind: AnalysisKind) -> Option<&AnalysisOutput> {
        self.results.get(&kind)
    }

    /// Why `kind` has no result, if it has none.
    pub fn error(&self, kind: AnalysisKind) -> Option<&BibliometricError> {
        self.errors.get(&kind)
    }

    /// Analyses that could not run, with the field they were missing.
    pub fn unavailable(&self) -> impl Iterator<Item = (AnalysisKind, Field)> + '_ {
        self.errors.iter().filter_map(|(kind, err)| match err {
            BibliometricError::Unavailable { field, .. } => Some((*kind, *field)),
            _ => None,
        })
    }

    /// Successful results in [`AnalysisKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisOutput> {
        self.results.values()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn insert(&mut self, kind: AnalysisKind, outcome: Result<AnalysisOutput>) {
        match outcome {
            Ok(output) => {
                self.results.insert(kind, output);
            }
            Err(err) => {
                warn!(analysis = %kind, "{err}");
                self.errors.insert(kind, err);
            }
        }
    }
}

/// Runs every analysis.
///
/// With the `parallel` feature and `config.run_in_parallel` set, the analyses
/// are computed on the rayon pool. The report is the same either way.
pub fn run_all(records: &RecordSet, config: &AnalysisConfig) -> Report {
    debug!(
        records = records.len(),
        parallel = config.run_in_parallel,
        "running analyses"
    );

    let outcomes = if config.run_in_parallel {
        run_parallel(records, config)
    } else {
        run_sequential(records, config)
    };

    let mut report = Report::default();
    for (kind, outcome) in outcomes {
        report.insert(kind, outcome);
    }
    report
}

#[cfg(feature = "parallel")]
fn run_parallel(
    records: &RecordSet,
    config: &AnalysisConfig,
) -> Vec<(AnalysisKind, Result<AnalysisOutput>)> {
    use rayon::prelude::*;

    AnalysisKind::ALL
        .par_iter()
        .map(|&kind| (kind, run(kind, records, config)))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    records: &RecordSet,
    config: &AnalysisConfig,
) -> Vec<(AnalysisKind, Result<AnalysisOutput>)> {
    run_sequential(records, config)
}

fn run_sequential(
    records: &RecordSet,
    config: &AnalysisConfig,
) -> Vec<(AnalysisKind, Result<AnalysisOutput>)> {
    AnalysisKind::ALL
        .into_iter()
        .map(|kind| (kind, run(kind, records, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            Record {
                authors: Some("Smith J; Doe A".to_string()),
                title: Some("First".to_string()),
                source: Some("J TESTS".to_string()),
                year: Some(2019),
                citations: Some(12),
                author_keywords: Some("Bibliometrics".to_string()),
                ..Default::default()
            },
            Record {
                authors: Some("Smith J".to_string()),
                title: Some("Second".to_string()),
                source: Some("J TESTS".to_string()),
                year: Some(2021),
                citations: Some(3),
                ..Default::default()
            },
        ])
    }

    #[rstest]
    #[case("statistics", AnalysisKind::Statistics)]
    #[case("top_cited", AnalysisKind::TopCited)]
    #[case("Top_Countries", AnalysisKind::TopCountries)]
    fn test_kind_from_str(#[case] input: &str, #[case] expected: AnalysisKind) {
        assert_eq!(input.parse::<AnalysisKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), expected.as_str());
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            "h_index".parse::<AnalysisKind>(),
            Err(BibliometricError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_all_partial_availability() {
        let config = AnalysisConfig::default().with_reference_year(2025);
        let report = run_all(&sample(), &config);

        assert_eq!(report.len(), 6);
        assert!(report.get(AnalysisKind::TopCountries).is_none());
        assert_eq!(
            report.unavailable().collect::<Vec<_>>(),
            vec![(AnalysisKind::TopCountries, Field::Affiliations)]
        );
        for output in report.iter() {
            assert_eq!(report.get(output.kind()), Some(output));
        }
    }

    #[test]
    fn test_run_is_idempotent() {
        let records = sample();
        let config = AnalysisConfig::default().with_reference_year(2025);
        for kind in AnalysisKind::ALL {
            let first = run(kind, &records, &config).ok();
            let second = run(kind, &records, &config).ok();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_run_all_on_empty_set() {
        let report = run_all(&RecordSet::default(), &AnalysisConfig::default());
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.get(AnalysisKind::Statistics),
            Some(AnalysisOutput::Statistics(stats)) if stats.total_documents == 0
        ));
        assert_eq!(report.unavailable().count(), 6);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let records = sample();
        let sequential = AnalysisConfig::default().with_reference_year(2025);
        let parallel = AnalysisConfig {
            run_in_parallel: true,
            ..sequential.clone()
        };

        let a = run_all(&records, &sequential);
        let b = run_all(&records, &parallel);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
        assert_eq!(
            a.unavailable().collect::<Vec<_>>(),
            b.unavailable().collect::<Vec<_>>()
        );
    }
}
