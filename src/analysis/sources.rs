use crate::analysis::{ranked, require, tally};
use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::Result;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Upper bound (cumulative % of documents) of the Bradford core zone.
pub const CORE_THRESHOLD: f64 = 33.3;
/// Upper bound (cumulative % of documents) of Bradford zone 2.
pub const ZONE2_THRESHOLD: f64 = 66.6;

/// Bradford's law zone of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BradfordZone {
    Core,
    Zone2,
    Zone3,
}

impl BradfordZone {
    pub fn from_cumulative(cumulative_percentage: f64) -> Self {
        if cumulative_percentage <= CORE_THRESHOLD {
            BradfordZone::Core
        } else if cumulative_percentage <= ZONE2_THRESHOLD {
            BradfordZone::Zone2
        } else {
            BradfordZone::Zone3
        }
    }
}

/// One row of the most-relevant-sources table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRank {
    pub source: CompactString,
    pub documents: usize,
    /// Share of all records
    pub percentage: f64,
    /// Running share of all records down to and including this source
    pub cumulative_percentage: f64,
    pub zone: BradfordZone,
}

/// Most relevant sources plus the full Bradford curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRanking {
    /// Number of distinct sources
    pub total_sources: usize,
    /// The top sources, most documents first
    pub top: Vec<SourceRank>,
    /// Cumulative percentage over every source, in rank order
    pub bradford_curve: Vec<f64>,
}

/// Running sum of `counts` as a percentage of `total`.
///
/// `counts` should already be sorted descending.
pub fn bradford_cumulative(counts: &[usize], total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .scan(0usize, |running, &count| {
            *running += count;
            Some(*running as f64 * 100.0 / total as f64)
        })
        .collect()
}

/// Ranks sources by number of records.
///
/// Percentages are relative to every record in the set, including records
/// without a source. The Bradford curve is computed over the full ranking,
/// not just the `top_n` rows returned.
pub fn top_sources(records: &RecordSet, top_n: usize) -> Result<SourceRanking> {
    require(records, Field::Source, AnalysisKind::TopSources)?;

    let total = records.len();
    let ranking = ranked(tally(records.iter().filter_map(|r| r.source.as_deref())));
    let counts: Vec<usize> = ranking.iter().map(|(_, count)| *count).collect();
    let bradford_curve = bradford_cumulative(&counts, total);

    let top = ranking
        .into_iter()
        .zip(bradford_curve.iter())
        .take(top_n)
        .map(|((source, documents), &cumulative_percentage)| SourceRank {
            source,
            documents,
            percentage: documents as f64 * 100.0 / total as f64,
            cumulative_percentage,
            zone: BradfordZone::from_cumulative(cumulative_percentage),
        })
        .collect();

    Ok(SourceRanking {
        total_sources: counts.len(),
        top,
        bradford_curve,
    })
}
