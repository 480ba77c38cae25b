//! Parser for `f` records.

use crate::{
    options::{NumericMode, ParseOptions, RelativeIndexing},
    record::parse_number,
    text::{check_separators, count_char, field_count, fields},
    Error, Result,
};

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which optional indices every group of a face carries.
/// Inferred once from the first index group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceLayout {
    pub has_textures: bool,
    pub has_normals: bool,
}

impl FaceLayout {
    /// `v/t/n` and `v//n` carry normals, `v/t` and `v/t/n` carry textures.
    pub fn infer(payload: &str) -> FaceLayout {
        let first = payload.split(' ').next().unwrap_or("");
        let has_normals = count_char(first, '/') == 2;
        let has_textures = match first.find('/') {
            Some(slash) => !first[slash + 1..].starts_with('/'),
            None => false,
        };

        FaceLayout {
            has_textures,
            has_normals,
        }
    }
}

/// Polygon defined by `f`, holding zero-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    vertices: Vec<i64>,
    textures: Option<Vec<i64>>,
    normals: Option<Vec<i64>>,
}

impl Face {
    pub fn vertices(&self) -> &[i64] {
        &self.vertices
    }

    /// Texture indices, parallel to `vertices`.
    pub fn textures(&self) -> Option<&[i64]> {
        self.textures.as_deref()
    }

    /// Normal indices, parallel to `vertices`.
    pub fn normals(&self) -> Option<&[i64]> {
        self.normals.as_deref()
    }

    pub fn has_textures(&self) -> bool {
        self.textures.is_some()
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn layout(&self) -> FaceLayout {
        FaceLayout {
            has_textures: self.has_textures(),
            has_normals: self.has_normals(),
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_triangle(&self) -> bool {
        self.vertices.len() == 3
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", vertex)?;
            match (&self.textures, &self.normals) {
                (Some(t), Some(n)) => write!(f, "/{}/{}", t[i], n[i])?,
                (Some(t), None) => write!(f, "/{}", t[i])?,
                (None, Some(n)) => write!(f, "//{}", n[i])?,
                (None, None) => (),
            }
        }
        Ok(())
    }
}

/// What the face parser needs to know about the records before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexContext {
    pub options: ParseOptions,

    /// `v` records parsed so far.
    pub vertices: usize,

    /// `vt` records parsed so far.
    pub texture_vertices: usize,

    /// `vn` records parsed so far.
    pub normals: usize,
}

/// Parses the payload of an `f` record.
pub fn parse_face(payload: &str, context: &IndexContext) -> Result<Face> {
    check_separators(payload)?;
    let layout = FaceLayout::infer(payload);
    let count = field_count(payload);
    let options = context.options;

    let (vertex_base, texture_base, normal_base) = match options.relative_indices {
        RelativeIndexing::Conventional => {
            (context.vertices, context.texture_vertices, context.normals)
        }
        RelativeIndexing::FaceLocal => (count, count, count),
    };

    let mut vertices = Vec::with_capacity(count);
    let mut textures = if layout.has_textures {
        Some(Vec::with_capacity(count))
    } else {
        None
    };
    let mut normals = if layout.has_normals {
        Some(Vec::with_capacity(count))
    } else {
        None
    };

    for group in fields(payload) {
        let invalid = || Error::InvalidFaceVertex(group.into());
        let mut parts = group.split('/');
        let vertex = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let texture = parts.next().filter(|s| !s.is_empty());
        let normal = parts.next().filter(|s| !s.is_empty());
        if parts.next().is_some() {
            return Err(invalid());
        }

        vertices.push(resolve_index(vertex, vertex_base, options)?);
        match (textures.as_mut(), texture) {
            (Some(indices), Some(token)) => indices.push(resolve_index(token, texture_base, options)?),
            (None, None) => (),
            _ => return Err(invalid()),
        }
        match (normals.as_mut(), normal) {
            (Some(indices), Some(token)) => indices.push(resolve_index(token, normal_base, options)?),
            (None, None) => (),
            _ => return Err(invalid()),
        }
    }

    Ok(Face {
        vertices,
        textures,
        normals,
    })
}

/// Converts a 1-based index token into a zero-based index.
///
/// A negative token counts back from `base`: the records of its kind parsed
/// so far under `RelativeIndexing::Conventional`, or the face's own vertex
/// count under `RelativeIndexing::FaceLocal`.
/// Strict mode rejects `0` and anything resolving below zero.
pub fn resolve_index(token: &str, base: usize, options: ParseOptions) -> Result<i64> {
    let index: i64 = parse_number(token, options.numeric)?;
    let base = base as i64;
    let resolved = if index < 0 {
        match options.relative_indices {
            RelativeIndexing::Conventional => base + index,
            RelativeIndexing::FaceLocal => base + index - 1,
        }
    } else {
        index - 1
    };

    if options.numeric == NumericMode::Strict && (index == 0 || resolved < 0) {
        return Err(Error::InvalidIndex(token.into()));
    }
    Ok(resolved)
}
