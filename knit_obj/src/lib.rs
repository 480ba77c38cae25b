//! Parses the Wavefront OBJ format into a single mesh object.

mod diagnostic;
mod face;
mod object;
mod options;
mod record;
pub mod text;

pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, LogSink, NullSink};
pub use face::{parse_face, resolve_index, Face, FaceLayout, IndexContext};
pub use object::{classify, FaceVertices, LineKind, Object, RecordCounts};
pub use options::{NumericMode, ParseOptions, RelativeIndexing};
pub use record::{parse_normal, parse_texture, parse_vertex, NormalVertex, TextureVertex, Vertex};

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
    io::Error as IoError,
};

/// Represents an error in parsing OBJ.
#[derive(Debug)]
pub enum Error {
    /// The source could not be opened or read.
    Io(IoError),

    /// Not enough values defined in `v`, `vt`, `vn`.
    NotEnoughData { found: usize, expected: usize },

    /// Too many values defined in `v`, `vt`, `vn`.
    TooMuchData { found: usize, expected: usize },

    /// A numeric field could not be parsed.
    InvalidNumber(Box<str>),

    /// Fields separated by tabs instead of single spaces.
    TabSeparated(Box<str>),

    /// An `f` index group lacks a component declared by the first group.
    InvalidFaceVertex(Box<str>),

    /// Invalid `f` index detected (zero index).
    InvalidIndex(Box<str>),

    /// A record failed to parse at the given line (1-based).
    Line { number: usize, source: Box<Error> },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Error::Io(e) => write!(f, "Could not read OBJ source: {}", e),
            Error::NotEnoughData { found, expected } => write!(
                f,
                "Not enough data (found {}, expected {})",
                found, expected
            ),
            Error::TooMuchData { found, expected } => write!(
                f,
                "Too much data (found {}, expected at most {})",
                found, expected
            ),
            Error::InvalidNumber(s) => write!(f, "Invalid number '{}'", s),
            Error::TabSeparated(s) => write!(f, "Tab between fields in '{}'", s),
            Error::InvalidFaceVertex(s) => write!(f, "Invalid face vertex definition '{}'", s),
            Error::InvalidIndex(s) => write!(f, "Invalid index definition '{}'", s),
            Error::Line { number, source } => write!(f, "line {}: {}", number, source),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Line { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Error {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
