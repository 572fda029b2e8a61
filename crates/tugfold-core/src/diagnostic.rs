//! Diagnostic descriptors, diagnostics, and sinks.
//!
//! A [`DiagnosticDescriptor`] is the static identity of a rule's report: a
//! stable id, a title, a message template, and a default [`Severity`]. Each
//! validated match produces exactly one [`Diagnostic`] carrying the primary
//! span plus zero or more *fade-out* spans: code that a fix would delete.
//!
//! A diagnostic is delivered to a [`DiagnosticSink`] as one value, so the
//! primary span and its fade-outs always arrive together. Sinks that want a
//! flat stream can call [`Diagnostic::entries`], which yields the primary
//! entry first and the fade-outs after it in report order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::Span;
use crate::types::Location;

/// How prominently a diagnostic is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not shown, but still available to fixers.
    Hidden,
    /// A suggestion.
    Info,
    /// A warning.
    Warning,
    /// An error.
    Error,
}

impl Severity {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hidden => "hidden",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of a family of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// Stable identifier, e.g. `FOLD001`.
    pub id: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Message template; `{0}` is replaced by the first message argument.
    pub message_format: &'static str,
    /// Category used for grouping.
    pub category: &'static str,
    /// Severity used unless configuration overrides it.
    pub default_severity: Severity,
}

impl DiagnosticDescriptor {
    /// Render the message template with positional arguments.
    pub fn format_message(&self, args: &[&str]) -> String {
        let mut message = self.message_format.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", i), arg);
        }
        message
    }
}

/// Role of a span within a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticTag {
    /// The anchor of the report.
    Primary,
    /// Code that the fix removes; rendered faded.
    Unnecessary,
}

/// One flattened entry of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticEntry<'d> {
    /// Descriptor id of the owning diagnostic.
    pub descriptor_id: &'d str,
    /// The located span.
    pub span: Span,
    /// Primary or fade-out.
    pub tag: DiagnosticTag,
}

/// A located report for one validated match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Descriptor id, e.g. `FOLD001`.
    pub descriptor_id: String,
    /// Effective severity.
    pub severity: Severity,
    /// Rendered message.
    pub message: String,
    /// Primary location.
    pub location: Location,
    /// Spans that a fix would remove, in report order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fade_outs: Vec<Span>,
}

impl Diagnostic {
    /// Start building a diagnostic for `descriptor` at `location`.
    pub fn new(descriptor: &DiagnosticDescriptor, location: Location, message: String) -> Self {
        Diagnostic {
            descriptor_id: descriptor.id.to_string(),
            severity: descriptor.default_severity,
            message,
            location,
            fade_outs: Vec::new(),
        }
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Append a fade-out span.
    pub fn with_fade_out(mut self, span: Span) -> Self {
        self.fade_outs.push(span);
        self
    }

    /// The primary span.
    pub fn span(&self) -> Span {
        self.location.span()
    }

    /// Flatten into entries: primary first, then fade-outs in order.
    pub fn entries(&self) -> impl Iterator<Item = DiagnosticEntry<'_>> + '_ {
        let primary = DiagnosticEntry {
            descriptor_id: &self.descriptor_id,
            span: self.span(),
            tag: DiagnosticTag::Primary,
        };
        std::iter::once(primary).chain(self.fade_outs.iter().map(move |span| DiagnosticEntry {
            descriptor_id: &self.descriptor_id,
            span: *span,
            tag: DiagnosticTag::Unnecessary,
        }))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.descriptor_id, self.message
        )
    }
}

/// Receiver of diagnostics.
///
/// Sinks are owned by the host; ordering across sinks is not guaranteed.
pub trait DiagnosticSink {
    /// Accept one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
        id: "TEST001",
        title: "Test",
        message_format: "'{0}' can be simplified",
        category: "Style",
        default_severity: Severity::Info,
    };

    fn sample() -> Diagnostic {
        let location = Location::from_span("t.cs", "int x = 0;", Span::new(4, 5));
        Diagnostic::new(&DESCRIPTOR, location, DESCRIPTOR.format_message(&["x"]))
            .with_fade_out(Span::new(5, 9))
            .with_fade_out(Span::new(9, 10))
    }

    #[test]
    fn formats_message_arguments() {
        assert_eq!(DESCRIPTOR.format_message(&["x"]), "'x' can be simplified");
    }

    #[test]
    fn entries_yield_primary_first() {
        let diagnostic = sample();
        let entries: Vec<_> = diagnostic.entries().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tag, DiagnosticTag::Primary);
        assert_eq!(entries[0].span, Span::new(4, 5));
        assert_eq!(entries[1].tag, DiagnosticTag::Unnecessary);
        assert_eq!(entries[1].span, Span::new(5, 9));
        assert_eq!(entries[2].span, Span::new(9, 10));
        assert!(entries.iter().all(|e| e.descriptor_id == "TEST001"));
    }

    #[test]
    fn severity_override() {
        let diagnostic = sample().with_severity(Severity::Warning);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(
            diagnostic.to_string(),
            "t.cs:1:5: warning TEST001: 'x' can be simplified"
        );
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(sample());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn serializes_without_empty_fade_outs() {
        let location = Location::from_span("t.cs", "int x;", Span::new(4, 5));
        let diagnostic = Diagnostic::new(&DESCRIPTOR, location, "m".to_string());
        let json = serde_json::to_string(&diagnostic).unwrap();
        assert!(!json.contains("fade_outs"));
        assert!(json.contains("\"severity\":\"info\""));
    }
}
