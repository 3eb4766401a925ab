use crate::wos::structure::{RawWosData, TaggedRecord};
use crate::wos::tags::WosTag;
use either::{Either, Left, Right};
use itertools::Itertools;

/// Parse the content of a Web of Science plain-text export into tagged records.
///
/// A `PT` line closes the open record and starts a new one. Any other tagged
/// line is added to the open record. Lines without a tag are collected as
/// ignored lines and otherwise have no effect.
pub(crate) fn wos_parse<S: AsRef<str>>(wos_text: S) -> RawWosData {
    let text = wos_text.as_ref();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (ignored_lines, entries): (Vec<_>, Vec<_>) = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .partition_map(|(line_number, line)| parse_tagged_line(line_number, line));

    let mut header = TaggedRecord::new();
    let mut records = Vec::new();
    let mut current: Option<TaggedRecord> = None;

    for (tag, content) in entries {
        if tag == WosTag::PublicationType.as_tag() {
            if let Some(open) = current.take().filter(|r| !r.is_empty()) {
                records.push(open);
            }
            current = Some(TaggedRecord::new());
        }
        match current.as_mut() {
            Some(record) => record.append(tag, content),
            None => header.append(tag, content),
        }
    }

    if let Some(open) = current.filter(|r| !r.is_empty()) {
        records.push(open);
    }

    // Without any PT line everything accumulated into the header.
    if records.is_empty() && !header.is_empty() {
        records.push(std::mem::take(&mut header));
    }

    RawWosData {
        header,
        records,
        ignored_lines,
    }
}

/// Split a trimmed line into its tag and content.
///
/// A line is tagged when it is longer than three characters and its third
/// character is a space; the first two characters are the tag and everything
/// after the space is the content.
fn parse_tagged_line(line_number: usize, line: &str) -> Either<(usize, String), (&str, &str)> {
    match split_tag(line) {
        Some(pair) => Right(pair),
        None => Left((line_number, line.to_string())),
    }
}

fn split_tag(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.char_indices().skip(2);
    let (space_at, third) = chars.next()?;
    let (content_at, _) = chars.next()?;
    (third == ' ').then(|| (&line[..space_at], &line[content_at..]))
}
