//! Marker-delimited section search and removal
//!
//! Sections are delimited by a pair of literal marker strings. The search is
//! deliberately simple: the first occurrence of each marker is taken
//! independently, with no nesting awareness and no support for repeated
//! regions of the same name.

/// Outcome of a section search.
///
/// `start` and `end` are the byte offsets of the start and end markers in the
/// scanned text, each `None` when that marker is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    /// Offset of the start marker
    pub start: Option<usize>,
    /// Offset of the end marker
    pub end: Option<usize>,
    /// Text strictly between the markers, excluding the markers themselves
    pub content: String,
}

impl SectionMatch {
    fn not_found() -> Self {
        Self {
            start: None,
            end: None,
            content: String::new(),
        }
    }

    /// Whether both markers were located
    pub fn is_found(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether the section content has zero length
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Locate the first occurrence of each marker and the content between them.
///
/// The markers are searched independently, so a result can carry the offset
/// of one marker while the other is `None`. When the end marker begins before
/// the start marker's content does, the pair is unusable and the result
/// degrades to not-found instead of panicking on the inverted range.
pub fn find_section(text: &str, start_marker: &str, end_marker: &str) -> SectionMatch {
    let start = text.find(start_marker);
    let end = text.find(end_marker);

    if let (Some(start_at), Some(end_at)) = (start, end) {
        return match text.get(start_at + start_marker.len()..end_at) {
            Some(content) => SectionMatch {
                start,
                end,
                content: content.to_string(),
            },
            None => SectionMatch::not_found(),
        };
    }

    SectionMatch {
        start,
        end,
        content: String::new(),
    }
}

/// Locate a section and remove its content from the text.
///
/// When the section is found and non-empty, everything from just after the
/// start marker through just before the end marker is removed, leaving the
/// two markers adjacent. The search result is returned as a byproduct either
/// way; an absent or empty section leaves the text untouched.
pub fn extract_section(text: &mut String, start_marker: &str, end_marker: &str) -> SectionMatch {
    let section = find_section(text, start_marker, end_marker);

    if let (Some(start_at), Some(end_at)) = (section.start, section.end) {
        if !section.is_empty() {
            // Range validity was established by find_section's content slice.
            text.replace_range(start_at + start_marker.len()..end_at, "");
        }
    }

    section
}
