/// Parses a publication year, returning `None` for anything that is not a
/// whole number.
///
/// Accepts integral floats such as `"2020.0"`, which spreadsheet tools tend to
/// write into exported year columns.
pub(crate) fn parse_year(value: &str) -> Option<i32> {
    parse_whole_number(value).and_then(|n| i32::try_from(n).ok())
}

/// Parses a citation count. Negative or non-numeric values become `None`
/// rather than a stand-in zero.
pub(crate) fn parse_count(value: &str) -> Option<u64> {
    parse_whole_number(value).and_then(|n| u64::try_from(n).ok())
}

fn parse_whole_number(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Median of an already sorted slice.
pub(crate) fn median_sorted(sorted: &[u64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2] as f64),
        _ => Some((sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0),
    }
}

/// Arithmetic mean, `None` for an empty input.
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
