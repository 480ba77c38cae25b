//! Options controlling number leniency and relative face indices.

use serde::Deserialize;

/// How malformed numeric fields are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericMode {
    /// Malformed numbers read as zero, missing trailing fields take defaults.
    Permissive,

    /// Malformed numbers and short `v` records are errors.
    Strict,
}

impl Default for NumericMode {
    fn default() -> NumericMode {
        NumericMode::Permissive
    }
}

/// What a negative face index counts back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelativeIndexing {
    /// Records of the same kind defined so far in the file.
    Conventional,

    /// The vertex count of the face itself.
    FaceLocal,
}

impl Default for RelativeIndexing {
    fn default() -> RelativeIndexing {
        RelativeIndexing::Conventional
    }
}

/// Options for `Object` assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    pub numeric: NumericMode,
    pub relative_indices: RelativeIndexing,
}

impl ParseOptions {
    /// Permissive numbers, conventional relative indices.
    pub fn new() -> ParseOptions {
        Default::default()
    }

    pub fn strict(self) -> ParseOptions {
        ParseOptions {
            numeric: NumericMode::Strict,
            ..self
        }
    }

    pub fn face_local_indices(self) -> ParseOptions {
        ParseOptions {
            relative_indices: RelativeIndexing::FaceLocal,
            ..self
        }
    }
}
