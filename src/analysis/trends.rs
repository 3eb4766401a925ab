use crate::analysis::require;
use crate::record::{Field, RecordSet};
use crate::report::AnalysisKind;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Documents published in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub documents: usize,
}

/// Annual scientific production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    /// One entry per year that has documents, ascending
    pub yearly: Vec<YearCount>,
    /// Compound annual growth rate as a fraction (0.25 is 25%)
    pub growth_rate: Option<f64>,
}

impl Trends {
    pub fn growth_rate_percent(&self) -> Option<f64> {
        self.growth_rate.map(|rate| rate * 100.0)
    }
}

/// Counts documents per year and derives the growth rate.
///
/// Records without a year are left out.
pub fn trends(records: &RecordSet) -> Result<Trends> {
    require(records, Field::Year, AnalysisKind::Trends)?;

    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.year) {
        *per_year.entry(year).or_insert(0) += 1;
    }
    let yearly: Vec<YearCount> = per_year
        .into_iter()
        .map(|(year, documents)| YearCount { year, documents })
        .collect();
    let growth_rate = compound_annual_growth_rate(&yearly);

    Ok(Trends {
        yearly,
        growth_rate,
    })
}

/// `(last / first) ^ (1 / (n - 1)) - 1` over the `n` year buckets.
///
/// `n` counts buckets, not calendar years, so gaps between years do not
/// lengthen the period. `None` with fewer than two buckets or a zero first
/// count.
pub fn compound_annual_growth_rate(yearly: &[YearCount]) -> Option<f64> {
    let (first, last) = match yearly {
        [first, .., last] => (first, last),
        _ => return None,
    };
    if first.documents == 0 {
        return None;
    }
    let periods = (yearly.len() - 1) as f64;
    Some((last.documents as f64 / first.documents as f64).powf(1.0 / periods) - 1.0)
}
