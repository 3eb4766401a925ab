//! Splitting of `;`-delimited multi-value fields.
//!
//! Authors, keywords and affiliations are stored as one string per record.
//! Every token-based analysis goes through these functions so they all agree
//! on what a token is.

/// Splits a field on `;` and trims each token.
///
/// Empty tokens are kept, so `"A;;B"` yields three tokens. `None` yields an
/// empty vector.
///
/// ```
/// use bibliometrix::split::split;
///
/// assert_eq!(split(Some("Smith J ;  Doe A")), vec!["Smith J", "Doe A"]);
/// assert!(split(None).is_empty());
/// ```
pub fn split(value: Option<&str>) -> Vec<&str> {
    tokens(value).collect()
}

/// Like [`split`], but also lower-cases each token.
pub fn split_keywords(value: Option<&str>) -> Vec<String> {
    tokens(value).map(str::to_lowercase).collect()
}

/// The tokens of a field that are not blank after trimming.
///
/// Counting analyses use this so that a trailing `;` does not produce an
/// empty author or keyword.
pub fn non_blank(value: Option<&str>) -> impl Iterator<Item = &str> {
    tokens(value).filter(|t| !t.is_empty())
}

/// Non-blank keyword tokens, lower-cased.
pub fn keyword_tokens(value: Option<&str>) -> impl Iterator<Item = String> {
    non_blank(value).map(str::to_lowercase)
}

fn tokens(value: Option<&str>) -> impl Iterator<Item = &str> {
    value.into_iter().flat_map(|v| v.split(';')).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(Some("Smith J; Doe A; Lee K"), &["Smith J", "Doe A", "Lee K"])]
    #[case(Some("Smith J ;  Doe A"), &["Smith J", "Doe A"])]
    #[case(Some("Smith J"), &["Smith J"])]
    #[case(Some("A;;B"), &["A", "", "B"])]
    #[case(Some("A; "), &["A", ""])]
    #[case(Some(""), &[""])]
    #[case(None, &[])]
    fn test_split(#[case] input: Option<&str>, #[case] expected: &[&str]) {
        assert_eq!(split(input), expected);
    }

    #[test]
    fn test_split_keywords_case_folds() {
        assert_eq!(
            split_keywords(Some("Machine Learning; BIBLIOMETRICS ")),
            vec!["machine learning", "bibliometrics"]
        );
    }

    #[test]
    fn test_keyword_tokens_skip_blanks() {
        let tokens: Vec<_> = keyword_tokens(Some("Scopus;  ; WoS;")).collect();
        assert_eq!(tokens, vec!["scopus", "wos"]);
    }

    #[test]
    fn test_non_blank_keeps_duplicates() {
        let tokens: Vec<_> = non_blank(Some("Smith J; ; Smith J;")).collect();
        assert_eq!(tokens, vec!["Smith J", "Smith J"]);
    }
}
