//! Non-fatal conditions found during assembly.

use std::fmt::{Display, Formatter, Result as FmtResult};

use log::warn;

/// Kinds of conditions that mark an object incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// `f` with fewer than 3 vertices.
    DegenerateFace,

    /// `mtllib` or `usemtl`.
    UnsupportedMaterial,

    /// Any other unknown keyword
    UnrecognizedLine,

    /// A record that failed to parse and was skipped.
    MalformedRecord,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DiagnosticKind::DegenerateFace => {
                write!(f, "a face with less than 3 vertices was detected")
            }
            DiagnosticKind::UnsupportedMaterial => write!(f, "MTL features not supported"),
            DiagnosticKind::UnrecognizedLine => {
                write!(f, "unrecognized line, result may be faulty")
            }
            DiagnosticKind::MalformedRecord => write!(f, "malformed record skipped"),
        }
    }
}

/// A recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Receives diagnostics. Presentation is up to the implementor.
pub trait DiagnosticSink {
    fn record(&mut self, kind: DiagnosticKind, message: &str);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn record(&mut self, kind: DiagnosticKind, message: &str) {
        self.push(Diagnostic {
            kind,
            message: message.to_owned(),
        });
    }
}

/// Forwards diagnostics to `log` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, _kind: DiagnosticKind, message: &str) {
        warn!("{}", message);
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _kind: DiagnosticKind, _message: &str) {}
}
