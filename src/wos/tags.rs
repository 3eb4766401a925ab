//! Web of Science field tags.
//!
//! See https://images.webofknowledge.com/images/help/WOS/hs_wos_fieldtags.html

/// Web of Science field tags.
///
/// Only the tags the crate gives meaning to are listed; any other
/// two-character tag is still parsed and kept on the record as-is.
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum WosTag {
    /// VR - Version number: export preamble
    Version,
    /// PT - Publication type: starts every record
    PublicationType,
    /// AU - Authors
    Authors,
    /// TI - Document title
    Title,
    /// SO - Full source title
    SourceTitle,
    /// DE - Author keywords
    AuthorKeywords,
    /// AB - Abstract
    Abstract,
    /// C1 - Author address
    Addresses,
    /// CR - Cited references
    CitedReferences,
    /// TC - Web of Science core collection times cited count
    TimesCited,
    /// PY - Year published
    PublicationYear,
}

impl WosTag {
    pub fn as_tag(&self) -> &'static str {
        match self {
            WosTag::Version => "VR",
            WosTag::PublicationType => "PT",
            WosTag::Authors => "AU",
            WosTag::Title => "TI",
            WosTag::SourceTitle => "SO",
            WosTag::AuthorKeywords => "DE",
            WosTag::Abstract => "AB",
            WosTag::Addresses => "C1",
            WosTag::CitedReferences => "CR",
            WosTag::TimesCited => "TC",
            WosTag::PublicationYear => "PY",
        }
    }
}
