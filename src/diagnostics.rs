//! Missing-region diagnostics

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::dialect::{MarkerPair, Region};

/// Report for one region whose marker pair could not be located
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Region the failed search was for
    pub region: Region,
    pub start_marker: String,
    pub end_marker: String,
}

impl Diagnostic {
    /// Build the report for a region missing from the scanned text
    pub fn missing(region: Region, markers: &MarkerPair) -> Self {
        Self {
            region,
            start_marker: markers.start.clone(),
            end_marker: markers.end.clone(),
        }
    }

    /// Format the diagnostic with source context using ariadne
    ///
    /// When exactly one marker of the pair occurs in the source, the label
    /// points at it and names the missing one. An inverted pair (end before
    /// start) labels the start marker; with neither marker present the label
    /// degrades to the start of the text.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let start_at = source.find(&self.start_marker);
        let end_at = source.find(&self.end_marker);

        let (span, note) = match (start_at, end_at) {
            (Some(at), None) => (
                at..at + self.start_marker.len(),
                format!("start marker is here, but '{}' never follows", self.end_marker),
            ),
            (None, Some(at)) => (
                at..at + self.end_marker.len(),
                format!("end marker is here, but '{}' is missing", self.start_marker),
            ),
            (Some(at), Some(_)) => (
                at..at + self.start_marker.len(),
                "the end marker occurs before this start marker".to_string(),
            ),
            (None, None) => (0..0, "neither marker occurs in this text".to_string()),
        };

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(note)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} section not found; section markers are: '{}', '{}'",
            self.region.label(),
            self.start_marker,
            self.end_marker
        )
    }
}
