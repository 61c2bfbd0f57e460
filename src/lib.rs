//! defergen - deferred-loader generation for Pascal API units
//!
//! A unit that binds DLL routines through deferred loading carries three
//! marker-delimited regions: a list of routine headers, a loader template,
//! and a deferred-functions block that is regenerated from the first two.
//! This library rewrites the deferred block: it parses every `function` /
//! `procedure` header, expands the template once per routine, and splices
//! the fragments back between the deferred markers.
//!
//! # Example
//!
//! ```rust
//! use defergen::generate;
//!
//! let generation = generate(r#"
//!     {$region function headers}
//!     procedure sio_close(port: Longint); stdcall;
//!     {$endRegion function headers}
//!     {$region function loader template}
//!     procedure Do_$routineName$$routineTail$
//!     {$endRegion function loader template}
//!     {$region deferred functions}{$endRegion deferred functions}
//! "#);
//!
//! assert!(generation.is_complete());
//! assert!(generation.text.contains("procedure Do_sio_close(port: Longint); stdcall;"));
//! ```

pub mod diagnostics;
pub mod dialect;
pub mod parser;
pub mod section;
pub mod template;

pub use diagnostics::Diagnostic;
pub use dialect::{Dialect, DialectError, MarkerPair, Region};
pub use parser::{parse_routine_headers, RoutineHeader, RoutineKind};
pub use section::{extract_section, find_section, SectionMatch};
pub use template::{expand_loader, expand_loaders, LINE_TERMINATOR};

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Marker strings and the result prefix
    pub dialect: Dialect,
    /// Debug mode: dump the loader template and the routine count to stderr
    pub debug: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            debug: false,
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Outcome of one generation run
#[derive(Debug, Clone)]
pub struct Generation {
    /// The rewritten unit, or the passed-through input when regions are missing
    pub text: String,
    /// One entry per region that could not be located
    pub diagnostics: Vec<Diagnostic>,
    /// Number of routines expanded into the deferred block
    pub routines: usize,
}

impl Generation {
    /// Whether all three regions were found and the deferred block was rebuilt
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Rewrite the deferred-functions block of a unit with default configuration
///
/// This is the main entry point for the library. It locates the three
/// regions, parses the routine headers, and splices the expanded loaders
/// between the deferred markers.
pub fn generate(source: &str) -> Generation {
    generate_with_config(source, GenerateConfig::default())
}

/// Rewrite the deferred-functions block of a unit with custom configuration
///
/// Each missing region is reported as a diagnostic and skips generation:
/// the input passes through with at most the stale placeholder content
/// removed. Only when all three regions are present does the pipeline parse,
/// expand and splice.
///
/// # Example
///
/// ```rust
/// use defergen::{generate_with_config, Dialect, GenerateConfig};
///
/// let config = GenerateConfig::new()
///     .with_dialect(Dialect::default())
///     .with_debug(false);
///
/// let generation = generate_with_config("unit U; end.", config);
/// assert_eq!(generation.diagnostics.len(), 3);
/// assert_eq!(generation.text, "unit U; end.");
/// ```
pub fn generate_with_config(source: &str, config: GenerateConfig) -> Generation {
    let dialect = &config.dialect;
    let mut diagnostics = Vec::new();

    let headers = find_section(source, &dialect.headers.start, &dialect.headers.end);
    if !headers.is_found() {
        diagnostics.push(Diagnostic::missing(Region::Headers, &dialect.headers));
    }

    let loader_template = find_section(
        source,
        &dialect.loader_template.start,
        &dialect.loader_template.end,
    );
    if !loader_template.is_found() {
        diagnostics.push(Diagnostic::missing(
            Region::LoaderTemplate,
            &dialect.loader_template,
        ));
    }

    // The stale placeholder content is removed even when another region is
    // missing, leaving the deferred markers adjacent. Pass-through output
    // keeps that removal.
    let mut text = source.to_string();
    let deferred = extract_section(&mut text, &dialect.deferred.start, &dialect.deferred.end);
    if !deferred.is_found() {
        diagnostics.push(Diagnostic::missing(Region::Deferred, &dialect.deferred));
    }

    if !diagnostics.is_empty() {
        return Generation {
            text,
            diagnostics,
            routines: 0,
        };
    }

    if config.debug {
        eprintln!("Debug: loader template = '{}'", loader_template.content);
    }

    let routines = parse_routine_headers(&headers.content);
    let loaders = expand_loaders(&loader_template.content, &routines, &dialect.result_prefix);

    let collapsed = format!("{}{}", dialect.deferred.start, dialect.deferred.end);
    let rebuilt = format!(
        "{}{}{}{}{}",
        dialect.deferred.start,
        LINE_TERMINATOR,
        loaders,
        LINE_TERMINATOR,
        dialect.deferred.end
    );
    let text = text.replace(&collapsed, &rebuilt);

    if config.debug {
        eprintln!("Debug: routine headers found: {}", routines.len());
    }

    Generation {
        text,
        diagnostics,
        routines: routines.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dialect::{
        DEFERRED_END_MARKER, DEFERRED_START_MARKER, HEADERS_END_MARKER, HEADERS_START_MARKER,
        LOADER_TEMPLATE_END_MARKER, LOADER_TEMPLATE_START_MARKER,
    };

    /// Assemble a unit from region bodies, using the default markers
    fn unit(headers: &str, template: &str, placeholder: &str) -> String {
        format!(
            "unit Api;\r\n{}{}{}\r\n{}{}{}\r\n{}{}{}\r\nend.\r\n",
            HEADERS_START_MARKER,
            headers,
            HEADERS_END_MARKER,
            LOADER_TEMPLATE_START_MARKER,
            template,
            LOADER_TEMPLATE_END_MARKER,
            DEFERRED_START_MARKER,
            placeholder,
            DEFERRED_END_MARKER,
        )
    }

    #[test]
    fn test_generate_complete_unit() {
        let source = unit(
            "\r\nfunction sio_open(port: Longint): Longint; stdcall;\r\n",
            "\r\n$routineKind$ Do_$routineName$$routineTail$\r\n",
            "",
        );
        let generation = generate(&source);

        assert!(generation.is_complete());
        assert_eq!(generation.routines, 1);
        assert!(generation
            .text
            .contains("function Do_sio_open(port: Longint): Longint; stdcall;"));
    }

    #[test]
    fn test_generate_prefix_only_for_functions() {
        let source = unit(
            "\r\nprocedure p1;\r\nfunction f1: Longint;\r\nprocedure p2;\r\n",
            "\r\nbind $routineName$: $resultAssignmentPrefixIfFunction$invoke($routineArguments$);\r\n",
            "",
        );
        let generation = generate(&source);

        assert_eq!(generation.routines, 3);
        assert!(generation.text.contains("bind p1: invoke();"));
        assert!(generation.text.contains("bind f1: result := invoke();"));
        assert!(generation.text.contains("bind p2: invoke();"));
        assert!(!generation.text.contains("p1: result :="));
        assert!(!generation.text.contains("p2: result :="));
    }

    #[test]
    fn test_generate_preserves_declaration_order() {
        let source = unit(
            "\r\nprocedure p1;\r\nfunction f1: Longint;\r\nprocedure p2;\r\n",
            "bind $routineName$;",
            "",
        );
        let text = generate(&source).text;

        let p1 = text.find("bind p1").expect("Should expand p1");
        let f1 = text.find("bind f1").expect("Should expand f1");
        let p2 = text.find("bind p2").expect("Should expand p2");
        assert!(p1 < f1 && f1 < p2);
    }

    #[test]
    fn test_generate_rebuilt_block_shape() {
        let source = unit("\r\nprocedure tick;\r\n", "bind $routineName$;", "");
        let text = generate(&source).text;

        let rebuilt = format!(
            "{}\r\nbind tick;\r\n\r\n{}",
            DEFERRED_START_MARKER, DEFERRED_END_MARKER
        );
        assert!(text.contains(&rebuilt));
    }

    #[test]
    fn test_generate_empty_headers_region() {
        let source = unit("", "bind $routineName$;", "");
        let generation = generate(&source);

        assert!(generation.is_complete());
        assert_eq!(generation.routines, 0);
        let rebuilt = format!("{}\r\n\r\n{}", DEFERRED_START_MARKER, DEFERRED_END_MARKER);
        assert!(generation.text.contains(&rebuilt));
    }

    #[test]
    fn test_generate_missing_headers_region_passes_through() {
        let source = format!(
            "unit Api;\r\n{}tpl{}\r\n{}STALE{}\r\nend.\r\n",
            LOADER_TEMPLATE_START_MARKER,
            LOADER_TEMPLATE_END_MARKER,
            DEFERRED_START_MARKER,
            DEFERRED_END_MARKER,
        );
        let generation = generate(&source);

        assert_eq!(generation.diagnostics.len(), 1);
        assert_eq!(generation.diagnostics[0].region, Region::Headers);
        assert_eq!(generation.routines, 0);
        // Stale placeholder content is still removed from the pass-through.
        assert_eq!(generation.text, source.replace("STALE", ""));
    }

    #[test]
    fn test_generate_missing_deferred_region_passes_through_unchanged() {
        let source = format!(
            "unit Api;\r\n{}h{}\r\n{}tpl{}\r\nend.\r\n",
            HEADERS_START_MARKER,
            HEADERS_END_MARKER,
            LOADER_TEMPLATE_START_MARKER,
            LOADER_TEMPLATE_END_MARKER,
        );
        let generation = generate(&source);

        assert_eq!(generation.diagnostics.len(), 1);
        assert_eq!(generation.diagnostics[0].region, Region::Deferred);
        assert_eq!(generation.text, source);
    }

    #[test]
    fn test_generate_reports_all_missing_regions_in_scan_order() {
        let generation = generate("unit U; end.");

        let regions: Vec<Region> = generation.diagnostics.iter().map(|d| d.region).collect();
        assert_eq!(
            regions,
            vec![Region::Headers, Region::LoaderTemplate, Region::Deferred]
        );
        assert_eq!(generation.text, "unit U; end.");
    }

    #[test]
    fn test_config_builders() {
        let config = GenerateConfig::new()
            .with_dialect(Dialect::default())
            .with_debug(true);
        assert!(config.debug);
        assert_eq!(config.dialect.result_prefix, "result := ");
    }
}
