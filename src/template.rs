//! Loader template expansion
//!
//! The loader template is plain text carrying five fixed placeholder tokens.
//! Substitution is literal, with no escaping and no delimiter pairing, so
//! template text must not contain a token it does not intend to expand.

use crate::parser::{RoutineHeader, RoutineKind};

/// Expands to the declaration keyword (`function` / `procedure`)
pub const KIND_PLACEHOLDER: &str = "$routineKind$";
/// Expands to the routine name
pub const NAME_PLACEHOLDER: &str = "$routineName$";
/// Expands to the raw declaration tail
pub const TAIL_PLACEHOLDER: &str = "$routineTail$";
/// Expands to the result-assignment prefix for functions, empty otherwise
pub const RESULT_PREFIX_PLACEHOLDER: &str = "$resultAssignmentPrefixIfFunction$";
/// Expands to the cleaned argument list
pub const ARGUMENTS_PLACEHOLDER: &str = "$routineArguments$";

/// Terminator between expanded fragments, fixed regardless of host platform
pub const LINE_TERMINATOR: &str = "\r\n";

/// Expand the loader template for a single routine.
///
/// Every occurrence of every placeholder is replaced; text outside the tokens
/// passes through untouched.
pub fn expand_loader(template: &str, routine: &RoutineHeader, result_prefix: &str) -> String {
    let result_assignment = if routine.kind == RoutineKind::Function {
        result_prefix
    } else {
        ""
    };

    template
        .replace(KIND_PLACEHOLDER, routine.kind.keyword())
        .replace(NAME_PLACEHOLDER, &routine.name)
        .replace(TAIL_PLACEHOLDER, &routine.tail)
        .replace(RESULT_PREFIX_PLACEHOLDER, result_assignment)
        .replace(ARGUMENTS_PLACEHOLDER, &routine.arguments)
}

/// Expand the template for every routine, in order, joined by line
/// terminators.
///
/// A terminator is appended only when a fragment does not already end with
/// one, so templates with trailing newlines do not produce blank lines.
pub fn expand_loaders(template: &str, routines: &[RoutineHeader], result_prefix: &str) -> String {
    let mut loaders = String::new();

    for routine in routines {
        let fragment = expand_loader(template, routine, result_prefix);
        loaders.push_str(&fragment);
        if !fragment.ends_with(LINE_TERMINATOR) {
            loaders.push_str(LINE_TERMINATOR);
        }
    }

    loaders
}
