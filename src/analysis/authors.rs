use crate::analysis::{ranked, require, tally};
use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::split::non_blank;
use crate::Result;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One row of the most-productive-authors table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRank {
    pub author: CompactString,
    /// Occurrences of the author name across all records
    pub documents: usize,
    /// Approximate h-index, see [`h_index_approx`]. Not a real h-index.
    pub h_index_approx: usize,
}

/// `min(n, floor(sqrt(n)))` for an author with `n` documents.
///
/// This is an approximation derived from the document count alone; it does
/// not look at per-paper citations.
pub fn h_index_approx(documents: usize) -> usize {
    documents.min(documents.isqrt())
}

/// The `top_n` authors by number of documents.
///
/// Names are compared exactly (case-sensitive, after trimming). Equal counts
/// keep first-seen order.
pub fn top_authors(records: &RecordSet, top_n: usize) -> Result<Vec<AuthorRank>> {
    require(records, Field::Authors, AnalysisKind::TopAuthors)?;

    let counts = tally(
        records
            .iter()
            .flat_map(|r| non_blank(r.authors.as_deref())),
    );
    Ok(ranked(counts)
        .into_iter()
        .take(top_n)
        .map(|(author, documents)| AuthorRank {
            author,
            documents,
            h_index_approx: h_index_approx(documents),
        })
        .collect())
}
