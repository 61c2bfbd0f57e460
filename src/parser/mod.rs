//! Heuristic parser for `function` / `procedure` declaration headers
//!
//! This is deliberately a keyword scanner over semi-structured text, not a
//! grammar: declarations are located by nearest-keyword search and split on a
//! small terminator set. Malformed spans degrade to partially filled headers
//! instead of failing the run.

mod header;
mod scanner;

pub use header::{clean_arguments, parse_routine_header, RoutineHeader, RoutineKind};

use scanner::next_routine_span;

/// Parse every routine declaration in the header-list text, in source order.
///
/// Duplicates are kept as separate entries. A span that cannot be sliced ends
/// the loop with the headers collected so far.
pub fn parse_routine_headers(text: &str) -> Vec<RoutineHeader> {
    let mut headers = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let span = match next_routine_span(rest) {
            Some(span) => span,
            None => break,
        };
        let declaration = match rest.get(span.clone()) {
            Some(declaration) => declaration,
            None => break,
        };

        headers.push(parse_routine_header(declaration.trim()));
        rest = rest.get(span.end..).unwrap_or_default();
    }

    headers
}
