use crate::analysis::require;
use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::Result;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One row of the most-cited table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedDocument {
    /// Index of the record in the record set
    pub position: usize,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub year: Option<i32>,
    pub source: Option<String>,
    pub citations: u64,
    /// `None` when the year is unknown or after the reference year
    pub citations_per_year: Option<f64>,
}

/// The `top_n` most cited records, most cited first.
///
/// Equal counts keep the original record order. Records without a citation
/// count are not ranked.
pub fn top_cited(
    records: &RecordSet,
    top_n: usize,
    reference_year: i32,
) -> Result<Vec<CitedDocument>> {
    require(records, Field::Citations, AnalysisKind::TopCited)?;

    Ok(records
        .iter()
        .enumerate()
        .filter_map(|(position, r)| r.citations.map(|c| (position, r, c)))
        .sorted_by_key(|(_, _, citations)| Reverse(*citations))
        .take(top_n)
        .map(|(position, r, citations)| CitedDocument {
            position,
            title: r.title.clone(),
            authors: r.authors.clone(),
            year: r.year,
            source: r.source.clone(),
            citations,
            citations_per_year: r
                .year
                .and_then(|year| citations_per_year(citations, year, reference_year)),
        })
        .collect())
}

/// `citations / (reference_year - year + 1)`.
fn citations_per_year(citations: u64, year: i32, reference_year: i32) -> Option<f64> {
    let age = i64::from(reference_year) - i64::from(year) + 1;
    (age > 0).then(|| citations as f64 / age as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BibliometricError;
    use crate::record::Record;
    use pretty_assertions::assert_eq;

    fn record(title: &str, year: Option<i32>, citations: Option<u64>) -> Record {
        Record {
            title: Some(title.to_string()),
            year,
            citations,
            ..Default::default()
        }
    }

    #[test]
    fn test_ranking_and_ties() {
        let records = RecordSet::new(vec![
            record("a", Some(2020), Some(5)),
            record("b", Some(2021), Some(50)),
            record("c", None, None),
            record("d", Some(2016), Some(5)),
            record("e", Some(2022), Some(20)),
        ]);
        let top = top_cited(&records, 3, 2025).unwrap();
        let titles: Vec<_> = top.iter().map(|d| d.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["b", "e", "a"]);
        assert_eq!(top[0].position, 1);
        assert_eq!(top[0].citations_per_year, Some(10.0));
        assert_eq!(top[1].citations_per_year, Some(5.0));
    }

    #[test]
    fn test_missing_year_has_no_rate() {
        let records = RecordSet::new(vec![record("a", None, Some(8))]);
        let top = top_cited(&records, 10, 2025).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].citations_per_year, None);
    }

    #[test]
    fn test_future_year_has_no_rate() {
        assert_eq!(citations_per_year(10, 2030, 2025), None);
        assert_eq!(citations_per_year(10, 2025, 2025), Some(10.0));
    }

    #[test]
    fn test_unavailable_without_citations() {
        let records = RecordSet::new(vec![record("a", Some(2020), None)]);
        assert!(matches!(
            top_cited(&records, 10, 2025),
            Err(BibliometricError::Unavailable {
                analysis: AnalysisKind::TopCited,
                ..
            })
        ));
    }
}
