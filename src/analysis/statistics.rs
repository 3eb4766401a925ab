use crate::record::{Field, RecordSet};
use crate::split::{keyword_tokens, non_blank};
use crate::utils::{mean, median_sorted};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main information about a record set.
///
/// Figures whose input field no record carries are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_documents: usize,
    /// Earliest and latest publication year, ignoring records without one
    pub year_span: Option<(i32, i32)>,
    pub mean_year: Option<f64>,
    /// Distinct author names
    pub total_authors: Option<usize>,
    /// Author name occurrences divided by the number of documents
    pub authors_per_document: Option<f64>,
    pub total_sources: Option<usize>,
    /// Distinct author keywords after lower-casing
    pub total_keywords: Option<usize>,
    /// Sum of citations, saturating at `u64::MAX`; records without a count
    /// add nothing
    pub total_citations: Option<u64>,
    /// Mean over records that have a citation count
    pub mean_citations: Option<f64>,
    /// Median over records that have a citation count
    pub median_citations: Option<f64>,
}

impl Statistics {
    /// The statistics as (metric, value) rows, skipping unavailable figures.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Total Documents", self.total_documents.to_string())];
        if let Some((min, max)) = self.year_span {
            rows.push(("Time Span", format!("{min}-{max}")));
        }
        if let Some(mean_year) = self.mean_year {
            rows.push(("Average Year", format!("{mean_year:.1}")));
        }
        if let Some(authors) = self.total_authors {
            rows.push(("Total Authors", authors.to_string()));
        }
        if let Some(per_doc) = self.authors_per_document {
            rows.push(("Authors per Document", format!("{per_doc:.2}")));
        }
        if let Some(sources) = self.total_sources {
            rows.push(("Total Sources", sources.to_string()));
        }
        if let Some(keywords) = self.total_keywords {
            rows.push(("Total Keywords", keywords.to_string()));
        }
        if let Some(total) = self.total_citations {
            rows.push(("Total Citations", total.to_string()));
        }
        if let Some(avg) = self.mean_citations {
            rows.push(("Average Citations", format!("{avg:.2}")));
        }
        if let Some(median) = self.median_citations {
            rows.push(("Median Citations", format!("{median:.1}")));
        }
        rows
    }
}

/// Computes the main information table.
pub fn statistics(records: &RecordSet) -> Statistics {
    let total_documents = records.len();

    let years: Vec<i32> = records.iter().filter_map(|r| r.year).collect();
    let year_span = years
        .iter()
        .min()
        .copied()
        .zip(years.iter().max().copied());
    let mean_year = mean(years.iter().map(|&y| f64::from(y)));

    let (total_authors, authors_per_document) = if records.has_field(Field::Authors) {
        let authors: Vec<&str> = records
            .iter()
            .flat_map(|r| non_blank(r.authors.as_deref()))
            .collect();
        let distinct: HashSet<&str> = authors.iter().copied().collect();
        (
            Some(distinct.len()),
            Some(authors.len() as f64 / total_documents as f64),
        )
    } else {
        (None, None)
    };

    let total_sources = records.has_field(Field::Source).then(|| {
        records
            .iter()
            .filter_map(|r| r.source.as_deref())
            .collect::<HashSet<_>>()
            .len()
    });

    let total_keywords = records.has_field(Field::AuthorKeywords).then(|| {
        records
            .iter()
            .flat_map(|r| keyword_tokens(r.author_keywords.as_deref()))
            .collect::<HashSet<_>>()
            .len()
    });

    let (total_citations, mean_citations, median_citations) =
        if records.has_field(Field::Citations) {
            let mut citations: Vec<u64> = records.iter().filter_map(|r| r.citations).collect();
            citations.sort_unstable();
            (
                Some(citations.iter().fold(0u64, |acc, &c| acc.saturating_add(c))),
                mean(citations.iter().map(|&c| c as f64)),
                median_sorted(&citations),
            )
        } else {
            (None, None, None)
        };

    Statistics {
        total_documents,
        year_span,
        mean_year,
        total_authors,
        authors_per_document,
        total_sources,
        total_keywords,
        total_citations,
        mean_citations,
        median_citations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use pretty_assertions::assert_eq;

    fn record(authors: Option<&str>, year: Option<i32>, citations: Option<u64>) -> Record {
        Record {
            authors: authors.map(String::from),
            year,
            citations,
            ..Default::default()
        }
    }

    #[test]
    fn test_null_citations_excluded() {
        let records = RecordSet::new(vec![
            record(None, Some(2018), Some(5)),
            record(None, None, None),
            record(None, Some(2020), Some(15)),
        ]);
        let stats = statistics(&records);
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.total_citations, Some(20));
        assert_eq!(stats.mean_citations, Some(10.0));
        assert_eq!(stats.median_citations, Some(10.0));
        assert_eq!(stats.year_span, Some((2018, 2020)));
        assert_eq!(stats.mean_year, Some(2019.0));
    }

    #[test]
    fn test_true_zero_counts() {
        let records = RecordSet::new(vec![
            record(None, None, Some(0)),
            record(None, None, Some(0)),
            record(None, None, Some(9)),
        ]);
        let stats = statistics(&records);
        assert_eq!(stats.mean_citations, Some(3.0));
        assert_eq!(stats.median_citations, Some(0.0));
    }

    #[test]
    fn test_authors() {
        let records = RecordSet::new(vec![
            record(Some("Smith J; Doe A"), None, None),
            record(Some("Smith J; Lee K; "), None, None),
        ]);
        let stats = statistics(&records);
        assert_eq!(stats.total_authors, Some(3));
        assert_eq!(stats.authors_per_document, Some(2.0));
    }

    #[test]
    fn test_keywords_case_folded() {
        let records = RecordSet::new(vec![
            Record {
                author_keywords: Some("Bibliometrics; Scopus".to_string()),
                ..Default::default()
            },
            Record {
                author_keywords: Some("bibliometrics".to_string()),
                ..Default::default()
            },
        ]);
        assert_eq!(statistics(&records).total_keywords, Some(2));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let records = RecordSet::new(vec![Record {
            title: Some("Only a title".to_string()),
            ..Default::default()
        }]);
        let stats = statistics(&records);
        assert_eq!(stats.total_documents, 1);
        assert_eq!(stats.year_span, None);
        assert_eq!(stats.total_authors, None);
        assert_eq!(stats.total_sources, None);
        assert_eq!(stats.total_citations, None);
        assert_eq!(stats.rows(), vec![("Total Documents", "1".to_string())]);
    }

    #[test]
    fn test_empty_record_set() {
        let stats = statistics(&RecordSet::default());
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.mean_year, None);
        assert_eq!(stats.authors_per_document, None);
    }

    #[test]
    fn test_total_citations_saturates() {
        let huge = i64::MAX as u64;
        let records = RecordSet::new(vec![
            record(None, None, Some(huge)),
            record(None, None, Some(huge)),
            record(None, None, Some(huge)),
        ]);
        assert_eq!(statistics(&records).total_citations, Some(u64::MAX));
    }

    #[test]
    fn test_sources_and_mean_year_skip_missing() {
        let records = RecordSet::new(vec![
            Record {
                source: Some("SCIENTOMETRICS".to_string()),
                year: Some(2018),
                ..Default::default()
            },
            Record {
                source: Some("J INFORMETR".to_string()),
                year: None,
                ..Default::default()
            },
            Record {
                source: Some("SCIENTOMETRICS".to_string()),
                year: Some(2021),
                ..Default::default()
            },
            Record::default(),
        ]);
        let stats = statistics(&records);
        assert_eq!(stats.total_sources, Some(2));
        assert_eq!(stats.mean_year, Some(2019.5));
        assert_eq!(stats.year_span, Some((2018, 2021)));
        assert!(stats.rows().contains(&("Total Sources", "2".to_string())));
        assert!(stats.rows().contains(&("Average Year", "2019.5".to_string())));
    }

    #[test]
    fn test_rows() {
        let records = RecordSet::new(vec![
            record(Some("Smith J"), Some(2018), Some(5)),
            record(Some("Doe A"), Some(2020), Some(15)),
        ]);
        let rows = statistics(&records).rows();
        assert_eq!(rows[1], ("Time Span", "2018-2020".to_string()));
        assert!(rows.contains(&("Average Citations", "10.00".to_string())));
    }
}
