//! Low-level text scanning for declaration spans

use std::ops::Range;

use super::header::RoutineKind;

/// Earliest match among a set of needles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Nearest {
    /// Index of the winning needle in the searched set
    pub(crate) index: usize,
    /// Byte offset of the match
    pub(crate) position: usize,
}

/// Find the needle with the earliest occurrence in `text`.
///
/// Ties go to the needle listed first; `None` when no needle occurs at all.
pub(crate) fn find_nearest(text: &str, needles: &[&str]) -> Option<Nearest> {
    let mut nearest: Option<Nearest> = None;

    for (index, needle) in needles.iter().enumerate() {
        if let Some(position) = text.find(needle) {
            if nearest.map_or(true, |found| position < found.position) {
                nearest = Some(Nearest { index, position });
            }
        }
    }

    nearest
}

/// Locate the span of the next routine declaration in `text`.
///
/// The span starts at the nearest declaration keyword and runs up to the
/// following keyword, or to the end of the text when none follows. The search
/// for the following keyword resumes after the consumed one, so the span
/// always has nonzero width.
pub(crate) fn next_routine_span(text: &str) -> Option<Range<usize>> {
    let keywords = RoutineKind::keywords();
    let first = find_nearest(text, &keywords)?;

    let resume_at = first.position + keywords[first.index].len();
    let rest = text.get(resume_at..).unwrap_or_default();
    let end = find_nearest(rest, &keywords)
        .map_or(text.len(), |next| resume_at + next.position);

    Some(first.position..end)
}
