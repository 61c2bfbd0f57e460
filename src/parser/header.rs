//! Routine declaration descriptors and per-declaration field extraction

use crate::section::find_section;

use super::scanner::find_nearest;

/// Kind of a parsed routine declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutineKind {
    /// Declaration did not start with a recognized keyword
    #[default]
    Unknown,
    Function,
    Procedure,
}

/// Keyword table serving both lookup directions and the scanner's needle set
const KEYWORD_TABLE: [(RoutineKind, &str); 2] = [
    (RoutineKind::Function, "function"),
    (RoutineKind::Procedure, "procedure"),
];

impl RoutineKind {
    /// Map a declaration keyword to its kind, case-sensitively.
    ///
    /// Anything outside the keyword table yields `Unknown`.
    pub fn from_keyword(keyword: &str) -> Self {
        KEYWORD_TABLE
            .iter()
            .find(|(_, kw)| *kw == keyword)
            .map(|(kind, _)| *kind)
            .unwrap_or(Self::Unknown)
    }

    /// The lowercase declaration keyword; empty string for `Unknown`
    pub fn keyword(self) -> &'static str {
        KEYWORD_TABLE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, kw)| *kw)
            .unwrap_or("")
    }

    /// All declaration keywords, in table order
    pub(crate) fn keywords() -> [&'static str; 2] {
        KEYWORD_TABLE.map(|(_, kw)| kw)
    }
}

/// One parsed routine declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutineHeader {
    pub kind: RoutineKind,
    /// Like this: `sio_ioctl`
    pub name: String,
    /// Like this: `(port, baud, mode: Longint): Longint; stdcall;`
    pub tail: String,
    /// Like this: `port, baud, mode` (derived from `tail`, never set directly)
    pub arguments: String,
}

impl RoutineHeader {
    /// Build a header, deriving `arguments` from `tail`.
    pub fn new(kind: RoutineKind, name: impl Into<String>, tail: impl Into<String>) -> Self {
        let name = name.into();
        let tail = tail.into();
        let arguments = if tail.is_empty() {
            String::new()
        } else {
            clean_arguments(&tail)
        };

        Self {
            kind,
            name,
            tail,
            arguments,
        }
    }
}

/// Terminators ending the routine name inside a declaration
const NAME_TERMINATORS: [&str; 4] = [" ", "(", ":", ";"];

/// Extract kind, name and tail from one trimmed declaration span.
///
/// The span is split at its first space to read the keyword; the name then
/// runs up to the nearest of space, `(`, `:` or `;`, and everything from that
/// terminator on becomes the tail. A span without any space stays in its
/// zero-value state, a known degenerate input rather than an error.
pub fn parse_routine_header(text: &str) -> RoutineHeader {
    let space_at = match text.find(' ') {
        Some(at) => at,
        None => return RoutineHeader::default(),
    };

    let kind = RoutineKind::from_keyword(&text[..space_at]);
    let remainder = text[space_at + 1..].trim();

    match find_nearest(remainder, &NAME_TERMINATORS) {
        Some(terminator) => RoutineHeader::new(
            kind,
            remainder[..terminator.position].trim(),
            remainder[terminator.position..].trim(),
        ),
        None => RoutineHeader::new(kind, remainder, ""),
    }
}

/// Reduce a routine tail to its bare comma-joined parameter names.
///
/// `;` separates Pascal parameter groups inside the parentheses; each entry
/// may carry a modifier prefix (`var`, `const`, `out`) and a `: Type`
/// annotation, both of which are stripped.
pub fn clean_arguments(tail: &str) -> String {
    let inner = find_section(tail, "(", ")").content;
    let cleaned: Vec<String> = inner
        .replace(';', ",")
        .split(',')
        .map(clean_argument)
        .collect();
    cleaned.join(", ")
}

/// Strip one parameter entry down to its bare name
fn clean_argument(entry: &str) -> String {
    let mut argument = entry.trim();

    if let Some(colon_at) = argument.find(':') {
        argument = argument[..colon_at].trim();
    }
    // Modifier prefixes stack (`const var x` is not legal Pascal, but the
    // scanner stays lenient): strip word-plus-space until no space remains.
    while let Some(space_at) = argument.find(' ') {
        argument = argument[space_at + 1..].trim();
    }

    argument.to_string()
}
