//! Parsers for the numeric records `v`, `vn` and `vt`.

use crate::{
    options::NumericMode,
    text::{check_separators, field_count, fields},
    Error, Result,
};

use std::str::FromStr;

use ultraviolet::{Vec3, Vec4};

/// Position defined by `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// Weight, 1.0 unless given.
    pub w: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Vertex {
        Vertex { x, y, z, w }
    }

    /// Returns the `index`-th component in `x, y, z, w` order.
    pub fn component(&self, index: usize) -> Option<f64> {
        self.to_array().get(index).copied()
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Returns `x, y, z` without the weight.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<Vertex> for Vec4 {
    fn from(v: Vertex) -> Vec4 {
        Vec4::new(v.x as f32, v.y as f32, v.z as f32, v.w as f32)
    }
}

/// Normal defined by `vn`. Not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl NormalVertex {
    pub fn new(x: f64, y: f64, z: f64) -> NormalVertex {
        NormalVertex { x, y, z }
    }

    pub fn component(&self, index: usize) -> Option<f64> {
        self.to_array().get(index).copied()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<NormalVertex> for Vec3 {
    fn from(n: NormalVertex) -> Vec3 {
        Vec3::new(n.x as f32, n.y as f32, n.z as f32)
    }
}

/// Texture coordinate defined by `vt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureVertex {
    pub u: f64,

    /// 0.0 unless given.
    pub v: f64,

    /// 0.0 unless given.
    pub w: f64,
}

impl TextureVertex {
    pub fn new(u: f64, v: f64, w: f64) -> TextureVertex {
        TextureVertex { u, v, w }
    }

    pub fn component(&self, index: usize) -> Option<f64> {
        self.to_array().get(index).copied()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.u, self.v, self.w]
    }
}

impl From<TextureVertex> for Vec3 {
    fn from(t: TextureVertex) -> Vec3 {
        Vec3::new(t.u as f32, t.v as f32, t.w as f32)
    }
}

/// Parses the payload of a `v` record.
/// Permissive mode accepts 1 to 4 fields, strict mode 3 or 4.
pub fn parse_vertex(payload: &str, mode: NumericMode) -> Result<Vertex> {
    let required = match mode {
        NumericMode::Permissive => 1,
        NumericMode::Strict => 3,
    };
    let [x, y, z, w] = take_fields(payload, mode, [1.0; 4], required)?;
    Ok(Vertex { x, y, z, w })
}

/// Parses the payload of a `vn` record. Exactly 3 fields.
pub fn parse_normal(payload: &str, mode: NumericMode) -> Result<NormalVertex> {
    let [x, y, z] = take_fields(payload, mode, [0.0; 3], 3)?;
    Ok(NormalVertex { x, y, z })
}

/// Parses the payload of a `vt` record. 1 to 3 fields.
pub fn parse_texture(payload: &str, mode: NumericMode) -> Result<TextureVertex> {
    let [u, v, w] = take_fields(payload, mode, [0.0; 3], 1)?;
    Ok(TextureVertex { u, v, w })
}

/// Fills `values` from the left with the fields of `payload`.
fn take_fields<const N: usize>(
    payload: &str,
    mode: NumericMode,
    mut values: [f64; N],
    required: usize,
) -> Result<[f64; N]> {
    check_separators(payload)?;
    let found = field_count(payload);
    if found < required {
        return Err(Error::NotEnoughData {
            found,
            expected: required,
        });
    }
    if found > N {
        return Err(Error::TooMuchData { found, expected: N });
    }

    for (value, field) in values.iter_mut().zip(fields(payload)) {
        *value = parse_number(field, mode)?;
    }
    Ok(values)
}

/// Parses a single number. Permissive mode reads garbage as zero.
pub(crate) fn parse_number<T: FromStr + Default>(field: &str, mode: NumericMode) -> Result<T> {
    match field.parse() {
        Ok(value) => Ok(value),
        Err(_) if mode == NumericMode::Permissive => Ok(T::default()),
        Err(_) => Err(Error::InvalidNumber(field.into())),
    }
}
