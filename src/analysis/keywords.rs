use crate::analysis::{ranked, require, tally};
use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::split::keyword_tokens;
use crate::Result;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRank {
    pub keyword: CompactString,
    pub occurrences: usize,
}

/// Ranked keywords plus the frequency of every keyword (word cloud input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRanking {
    pub top: Vec<KeywordRank>,
    pub frequencies: BTreeMap<CompactString, usize>,
}

/// Counts lower-cased author keywords and keeps the `top_n` most frequent.
pub fn top_keywords(records: &RecordSet, top_n: usize) -> Result<KeywordRanking> {
    require(records, Field::AuthorKeywords, AnalysisKind::TopKeywords)?;

    let counts = tally(
        records
            .iter()
            .flat_map(|r| keyword_tokens(r.author_keywords.as_deref())),
    );
    let frequencies = counts.iter().cloned().collect();
    let top = ranked(counts)
        .into_iter()
        .take(top_n)
        .map(|(keyword, occurrences)| KeywordRank {
            keyword,
            occurrences,
        })
        .collect();

    Ok(KeywordRanking { top, frequencies })
}
