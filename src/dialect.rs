//! Dialect configuration for region markers and the result prefix
//!
//! This module carries the marker strings delimiting the three generated-unit
//! regions, plus the assignment prefix substituted for function results. The
//! defaults match the classic `{$region ...}` unit layout; a TOML dialect
//! file can replace individual marker pairs for units that spell their
//! directives differently. Placeholder tokens are fixed and not part of a
//! dialect.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or validating a dialect
#[derive(Error, Debug)]
pub enum DialectError {
    #[error("Failed to read dialect file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse dialect TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A marker pair with an empty start or end string
    #[error("empty marker for the {} region", region.label())]
    EmptyMarker { region: Region },
    /// An empty prefix would leave function results unassigned
    #[error("empty result-prefix in [template]")]
    EmptyResultPrefix,
}

/// The three marker-delimited regions of a generated unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Routine declarations consumed by the parser
    Headers,
    /// Code template expanded once per routine
    LoaderTemplate,
    /// Placeholder block rebuilt on every run
    Deferred,
}

impl Region {
    /// All regions, in scan order
    pub const ALL: [Region; 3] = [Region::Headers, Region::LoaderTemplate, Region::Deferred];

    /// Human-readable region name, as used in markers and diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Region::Headers => "function headers",
            Region::LoaderTemplate => "function loader template",
            Region::Deferred => "deferred functions",
        }
    }
}

/// Start and end marker strings delimiting one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    /// Build a pair from start and end marker strings
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

pub const HEADERS_START_MARKER: &str = "{$region function headers}";
pub const HEADERS_END_MARKER: &str = "{$endRegion function headers}";
pub const LOADER_TEMPLATE_START_MARKER: &str = "{$region function loader template}";
pub const LOADER_TEMPLATE_END_MARKER: &str = "{$endRegion function loader template}";
pub const DEFERRED_START_MARKER: &str = "{$region deferred functions}";
pub const DEFERRED_END_MARKER: &str = "{$endRegion deferred functions}";

/// Prefix substituted for `$resultAssignmentPrefixIfFunction$` on functions
pub const DEFAULT_RESULT_PREFIX: &str = "result := ";

/// A dialect mapping each region to its marker pair
#[derive(Debug, Clone)]
pub struct Dialect {
    /// Optional name for the dialect
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Markers of the function headers region
    pub headers: MarkerPair,
    /// Markers of the function loader template region
    pub loader_template: MarkerPair,
    /// Markers of the deferred functions region
    pub deferred: MarkerPair,
    /// Assignment prefix used when the expanded routine is a function
    pub result_prefix: String,
}

/// TOML structure for deserializing dialects
#[derive(Deserialize)]
struct TomlDialect {
    metadata: Option<TomlMetadata>,
    markers: Option<TomlMarkers>,
    template: Option<TomlTemplate>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlMarkers {
    headers: Option<TomlPair>,
    #[serde(rename = "loader-template")]
    loader_template: Option<TomlPair>,
    deferred: Option<TomlPair>,
}

#[derive(Deserialize)]
struct TomlPair {
    start: String,
    end: String,
}

impl From<TomlPair> for MarkerPair {
    fn from(pair: TomlPair) -> Self {
        MarkerPair::new(pair.start, pair.end)
    }
}

#[derive(Deserialize)]
struct TomlTemplate {
    #[serde(rename = "result-prefix")]
    result_prefix: Option<String>,
}

impl Dialect {
    /// Load a dialect from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DialectError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a dialect from a TOML string
    ///
    /// Omitted marker pairs and the omitted result prefix keep their default
    /// values, so a dialect file only spells out what it changes.
    pub fn from_str(content: &str) -> Result<Self, DialectError> {
        let parsed: TomlDialect = toml::from_str(content)?;
        let mut dialect = Self::default();

        if let Some(metadata) = parsed.metadata {
            dialect.name = metadata.name;
            dialect.description = metadata.description;
        }
        if let Some(markers) = parsed.markers {
            if let Some(pair) = markers.headers {
                dialect.headers = pair.into();
            }
            if let Some(pair) = markers.loader_template {
                dialect.loader_template = pair.into();
            }
            if let Some(pair) = markers.deferred {
                dialect.deferred = pair.into();
            }
        }
        if let Some(template) = parsed.template {
            if let Some(prefix) = template.result_prefix {
                dialect.result_prefix = prefix;
            }
        }

        dialect.validate()?;
        Ok(dialect)
    }

    /// The marker pair delimiting `region`
    pub fn markers(&self, region: Region) -> &MarkerPair {
        match region {
            Region::Headers => &self.headers,
            Region::LoaderTemplate => &self.loader_template,
            Region::Deferred => &self.deferred,
        }
    }

    fn validate(&self) -> Result<(), DialectError> {
        for region in Region::ALL {
            let markers = self.markers(region);
            if markers.start.is_empty() || markers.end.is_empty() {
                return Err(DialectError::EmptyMarker { region });
            }
        }
        if self.result_prefix.is_empty() {
            return Err(DialectError::EmptyResultPrefix);
        }
        Ok(())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            headers: MarkerPair::new(HEADERS_START_MARKER, HEADERS_END_MARKER),
            loader_template: MarkerPair::new(
                LOADER_TEMPLATE_START_MARKER,
                LOADER_TEMPLATE_END_MARKER,
            ),
            deferred: MarkerPair::new(DEFERRED_START_MARKER, DEFERRED_END_MARKER),
            result_prefix: DEFAULT_RESULT_PREFIX.to_string(),
        }
    }
}
