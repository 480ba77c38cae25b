//! Two-pass assembly of an `Object` from OBJ text.

use crate::{
    diagnostic::{DiagnosticKind, DiagnosticSink, LogSink},
    face::{parse_face, Face, FaceLayout, IndexContext},
    options::{NumericMode, ParseOptions},
    record::{parse_normal, parse_texture, parse_vertex, NormalVertex, TextureVertex, Vertex},
    text::{split_lines, split_tag, trim_record},
    Error, Result,
};

use std::{convert::TryFrom, fs::read_to_string, io::prelude::*, path::Path, str::FromStr};

use log::{debug, trace};

/// Category of a trimmed OBJ line, decided by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Blank or comment-only
    Empty,

    /// `v`
    Vertex,

    /// `vn`
    Normal,

    /// `vt`
    Texture,

    /// `f`
    Face,

    /// `o`
    ObjectName,

    /// `g`
    GroupName,

    /// `s`
    SmoothingGroup,

    /// `mtllib`, `usemtl`
    Material,

    /// Any other unknown keyword
    Unrecognized,
}

/// Classifies a line already passed through `trim_record`.
pub fn classify(line: &str) -> LineKind {
    let (tag, _) = split_tag(line);
    match tag {
        "" => LineKind::Empty,
        "v" => LineKind::Vertex,
        "vn" => LineKind::Normal,
        "vt" => LineKind::Texture,
        "f" => LineKind::Face,
        "o" => LineKind::ObjectName,
        "g" => LineKind::GroupName,
        "s" => LineKind::SmoothingGroup,
        "mtllib" | "usemtl" => LineKind::Material,
        _ => LineKind::Unrecognized,
    }
}

/// Number of lines per category, counted before records are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RecordCounts {
    pub vertices: usize,
    pub normals: usize,
    pub texture_vertices: usize,
    pub faces: usize,
    pub object_names: usize,
    pub group_names: usize,
    pub smoothing_groups: usize,
    pub materials: usize,
    pub unrecognized: usize,
}

impl RecordCounts {
    fn tally(&mut self, kind: LineKind) {
        match kind {
            LineKind::Empty => (),
            LineKind::Vertex => self.vertices += 1,
            LineKind::Normal => self.normals += 1,
            LineKind::Texture => self.texture_vertices += 1,
            LineKind::Face => self.faces += 1,
            LineKind::ObjectName => self.object_names += 1,
            LineKind::GroupName => self.group_names += 1,
            LineKind::SmoothingGroup => self.smoothing_groups += 1,
            LineKind::Material => self.materials += 1,
            LineKind::Unrecognized => self.unrecognized += 1,
        }
    }
}

/// A line after pass 1. Borrows the source buffer.
#[derive(Debug, Clone, Copy)]
struct ClassifiedLine<'a> {
    number: usize,
    kind: LineKind,
    text: &'a str,
    payload: &'a str,
}

/// A mesh parsed from one OBJ source.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    vertices: Vec<Vertex>,
    normals: Vec<NormalVertex>,
    texture_vertices: Vec<TextureVertex>,
    faces: Vec<Face>,

    /// Layout of the first face; the whole file is assumed to share it.
    first_face: Option<FaceLayout>,

    is_complete: bool,
    triangulated: bool,
    counts: RecordCounts,
}

impl Object {
    /// Parses OBJ text. Only strict mode fails on malformed records.
    pub fn parse(
        text: &str,
        options: ParseOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Object> {
        let mut counts = RecordCounts::default();
        let mut lines = vec![];
        for (i, raw) in split_lines(text).into_iter().enumerate() {
            let trimmed = trim_record(raw);
            let kind = classify(trimmed);
            counts.tally(kind);
            if kind != LineKind::Empty {
                lines.push(ClassifiedLine {
                    number: i + 1,
                    kind,
                    text: trimmed,
                    payload: split_tag(trimmed).1,
                });
            }
        }
        debug!(
            "Counted {} vertices, {} normals, {} texture vertices, {} faces",
            counts.vertices, counts.normals, counts.texture_vertices, counts.faces
        );

        let mut object = Object::with_counts(counts);
        for line in &lines {
            object.process_line(line, options, sink)?;
        }
        Ok(object)
    }

    /// Reads the whole source, then parses it.
    pub fn from_reader(
        mut reader: impl Read,
        options: ParseOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Object> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Object::parse(&text, options, sink)
    }

    /// Reads and parses the file at `path`.
    pub fn read_file(
        path: impl AsRef<Path>,
        options: ParseOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Object> {
        let text = read_to_string(path.as_ref())?;
        Object::parse(&text, options, sink)
    }

    fn with_counts(counts: RecordCounts) -> Object {
        Object {
            vertices: Vec::with_capacity(counts.vertices),
            normals: Vec::with_capacity(counts.normals),
            texture_vertices: Vec::with_capacity(counts.texture_vertices),
            faces: Vec::with_capacity(counts.faces),
            first_face: None,
            is_complete: true,
            triangulated: true,
            counts,
        }
    }

    fn process_line(
        &mut self,
        line: &ClassifiedLine,
        options: ParseOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let mode = options.numeric;
        let result = match line.kind {
            LineKind::Vertex => parse_vertex(line.payload, mode).map(|v| self.vertices.push(v)),
            LineKind::Normal => parse_normal(line.payload, mode).map(|n| self.normals.push(n)),
            LineKind::Texture => {
                parse_texture(line.payload, mode).map(|t| self.texture_vertices.push(t))
            }
            LineKind::Face => {
                let context = IndexContext {
                    options,
                    vertices: self.vertices.len(),
                    texture_vertices: self.texture_vertices.len(),
                    normals: self.normals.len(),
                };
                parse_face(line.payload, &context).map(|face| self.add_face(face, line, sink))
            }
            // TODO: keep names and smoothing groups once objects are split into groups
            LineKind::ObjectName | LineKind::GroupName | LineKind::SmoothingGroup => Ok(()),
            LineKind::Empty => Ok(()),
            LineKind::Material => {
                self.mark_incomplete(sink, DiagnosticKind::UnsupportedMaterial, line);
                Ok(())
            }
            LineKind::Unrecognized => {
                self.mark_incomplete(sink, DiagnosticKind::UnrecognizedLine, line);
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) if mode == NumericMode::Strict => Err(Error::Line {
                number: line.number,
                source: Box::new(e),
            }),
            Err(e) => {
                // placeholders keep later indices aligned with the file
                match line.kind {
                    LineKind::Vertex => self.vertices.push(Vertex::new(0.0, 0.0, 0.0, 1.0)),
                    LineKind::Normal => self.normals.push(NormalVertex::new(0.0, 0.0, 0.0)),
                    LineKind::Texture => {
                        self.texture_vertices.push(TextureVertex::new(0.0, 0.0, 0.0))
                    }
                    _ => (),
                }
                self.is_complete = false;
                let message = format!(
                    "{}: '{}' (line {}): {}",
                    DiagnosticKind::MalformedRecord,
                    line.text,
                    line.number,
                    e
                );
                sink.record(DiagnosticKind::MalformedRecord, &message);
                Ok(())
            }
        }
    }

    fn add_face(&mut self, face: Face, line: &ClassifiedLine, sink: &mut dyn DiagnosticSink) {
        trace!("Face at line {}: {}", line.number, face);
        if !face.is_triangle() {
            self.triangulated = false;
        }
        if face.len() < 3 {
            self.mark_incomplete(sink, DiagnosticKind::DegenerateFace, line);
        }
        self.first_face.get_or_insert(face.layout());
        self.faces.push(face);
    }

    fn mark_incomplete(
        &mut self,
        sink: &mut dyn DiagnosticSink,
        kind: DiagnosticKind,
        line: &ClassifiedLine,
    ) {
        self.is_complete = false;
        let message = format!("{}: '{}' (line {})", kind, line.text, line.number);
        sink.record(kind, &message);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn normals(&self) -> &[NormalVertex] {
        &self.normals
    }

    pub fn texture_vertices(&self) -> &[TextureVertex] {
        &self.texture_vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Whether the first face carries normal indices. `false` without faces.
    pub fn has_normals(&self) -> bool {
        self.first_face.map_or(false, |l| l.has_normals)
    }

    /// Whether the first face carries texture indices. `false` without faces.
    pub fn has_textures(&self) -> bool {
        self.first_face.map_or(false, |l| l.has_textures)
    }

    /// `false` once a degenerate face or an unsupported line was seen.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Whether every face has exactly 3 vertices.
    pub fn is_triangulated(&self) -> bool {
        self.triangulated
    }

    /// Line counts from the classification pass.
    pub fn counts(&self) -> &RecordCounts {
        &self.counts
    }

    /// Resolves the indices of `face` against this object's records.
    pub fn face_vertices<'a>(&'a self, face: &'a Face) -> FaceVertices<'a> {
        FaceVertices(self, face, 0)
    }
}

impl FromStr for Object {
    type Err = Error;

    /// Parses with default options, reporting to `log`.
    fn from_str(s: &str) -> Result<Object> {
        Object::parse(s, ParseOptions::default(), &mut LogSink)
    }
}

/// Records referenced by each corner of a face.
/// Out-of-range indices yield `None`.
#[derive(Debug)]
pub struct FaceVertices<'a>(&'a Object, &'a Face, usize);

impl<'a> Iterator for FaceVertices<'a> {
    type Item = (
        Option<&'a Vertex>,
        Option<&'a TextureVertex>,
        Option<&'a NormalVertex>,
    );

    fn next(&mut self) -> Option<Self::Item> {
        let (object, face, i) = (self.0, self.1, self.2);
        let vertex = *face.vertices().get(i)?;
        let result = (
            lookup(&object.vertices, vertex),
            face.textures()
                .and_then(|t| lookup(&object.texture_vertices, t[i])),
            face.normals().and_then(|n| lookup(&object.normals, n[i])),
        );
        self.2 += 1;
        Some(result)
    }
}

fn lookup<T>(items: &[T], index: i64) -> Option<&T> {
    usize::try_from(index).ok().and_then(|i| items.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Diagnostic, NullSink};

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn parse_with(text: &str, options: ParseOptions) -> (Object, Vec<Diagnostic>) {
        let mut diagnostics: Vec<Diagnostic> = vec![];
        let object = Object::parse(text, options, &mut diagnostics).unwrap();
        (object, diagnostics)
    }

    fn parse(text: &str) -> (Object, Vec<Diagnostic>) {
        parse_with(text, ParseOptions::default())
    }

    #[test]
    fn classifies_by_tag() {
        assert_eq!(classify("v 1 2 3"), LineKind::Vertex);
        assert_eq!(classify("vn 0 0 1"), LineKind::Normal);
        assert_eq!(classify("vt 0.5"), LineKind::Texture);
        assert_eq!(classify("f 1 2 3"), LineKind::Face);
        assert_eq!(classify("o Cube"), LineKind::ObjectName);
        assert_eq!(classify("g top"), LineKind::GroupName);
        assert_eq!(classify("s off"), LineKind::SmoothingGroup);
        assert_eq!(classify("usemtl Material"), LineKind::Material);
        assert_eq!(classify("mtllib cube.mtl"), LineKind::Material);
        assert_eq!(classify("vp 0.1 0.2"), LineKind::Unrecognized);
        assert_eq!(classify("l 1 2"), LineKind::Unrecognized);
        assert_eq!(classify(""), LineKind::Empty);
    }

    #[test]
    fn assembles_single_triangle() {
        let (object, diagnostics) = parse(TRIANGLE);
        assert_eq!(object.vertices().len(), 3);
        assert_eq!(object.faces().len(), 1);
        assert!(!object.has_normals());
        assert!(!object.has_textures());
        assert!(object.is_triangulated());
        assert!(object.is_complete());
        assert_eq!(object.faces()[0].vertices(), &[0, 1, 2]);
        assert_eq!(object.vertices()[1], Vertex::new(1.0, 0.0, 0.0, 1.0));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn short_face_marks_object_incomplete() {
        let (object, diagnostics) = parse("v 0 0 0\nv 1 0 0\nf 1 2\nv 0 1 0\nf 1 2 3\n");
        assert!(!object.is_complete());
        assert!(!object.is_triangulated());
        assert_eq!(object.faces().len(), 2);
        assert_eq!(object.faces()[0].len(), 2);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::DegenerateFace);
        assert!(diagnostics[0].message.contains("'f 1 2'"));
        assert!(diagnostics[0].message.contains("line 3"));
    }

    #[test]
    fn quads_clear_triangulated_but_stay_complete() {
        let (object, _) = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 2 3 4\nf 2 3 4\n");
        assert!(!object.is_triangulated());
        assert!(object.is_complete());
    }

    #[test]
    fn object_flags_follow_first_face() {
        let (object, _) = parse("v 0 0 0\nvn 0 0 1\nf 1//1 1//1 1//1\nf 1 1 1\n");
        assert!(object.has_normals());
        assert!(!object.has_textures());

        let (object, _) = parse("v 0 0 0\nvt 0 0\nf 1/1 1/1 1/1\n");
        assert!(object.has_textures());
        assert!(!object.has_normals());
    }

    #[test]
    fn no_faces_means_no_features() {
        let (object, _) = parse("v 0 0 0\nvn 0 0 1\nvt 0 0\n");
        assert!(object.faces().is_empty());
        assert!(!object.has_normals());
        assert!(!object.has_textures());
        assert!(object.is_triangulated());
        assert!(object.is_complete());
    }

    #[test]
    fn names_and_smoothing_groups_are_skipped() {
        let (object, diagnostics) = parse("o Cube\ng side\ns 1\n# comment\n\n   \n");
        assert!(object.is_complete());
        assert!(diagnostics.is_empty());
        assert_eq!(object.counts().object_names, 1);
        assert_eq!(object.counts().group_names, 1);
        assert_eq!(object.counts().smoothing_groups, 1);
    }

    #[test]
    fn material_and_unknown_lines_are_reported() {
        let (object, diagnostics) = parse("mtllib cube.mtl\nusemtl Red\nl 1 2\n");
        assert!(!object.is_complete());
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnsupportedMaterial,
                DiagnosticKind::UnsupportedMaterial,
                DiagnosticKind::UnrecognizedLine,
            ]
        );
        assert_eq!(object.counts().materials, 2);
        assert_eq!(object.counts().unrecognized, 1);
    }

    #[test]
    fn malformed_records_become_placeholders_when_permissive() {
        let (object, diagnostics) = parse("v 0 0 0\nvn 0 1\nvn 0 1 0\n");
        assert_eq!(object.normals().len(), 2);
        assert_eq!(object.normals()[0], NormalVertex::new(0.0, 0.0, 0.0));
        assert_eq!(object.normals()[1], NormalVertex::new(0.0, 1.0, 0.0));
        assert!(!object.is_complete());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedRecord);
        assert!(diagnostics[0].message.contains("line 2"));
    }

    #[test]
    fn malformed_records_keep_file_numbering() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0\nvn 0 0 1\nf 1//2 2//2 3//-1\n";
        let (object, diagnostics) = parse(text);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(object.normals().len(), 2);
        assert_eq!(object.faces()[0].normals(), Some(&[1, 1, 1][..]));

        let up = NormalVertex::new(0.0, 0.0, 1.0);
        for corner in object.face_vertices(&object.faces()[0]) {
            assert_eq!(corner.2, Some(&up));
        }

        let (object, _) = parse("v 1 2 3 4 5\nv 0 0 0\nvt\nvt 0.5\nf 2/2 2/2 2/2\n");
        assert_eq!(object.vertices()[0], Vertex::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(object.texture_vertices()[1], TextureVertex::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn tab_separated_fields_are_reported() {
        let (object, diagnostics) = parse("v 1\t2\t3\nv 0 0 0\n");
        assert_eq!(object.vertices().len(), 2);
        assert_eq!(object.vertices()[0], Vertex::new(0.0, 0.0, 0.0, 1.0));
        assert!(!object.is_complete());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedRecord);
    }

    #[test]
    fn malformed_records_fail_when_strict() {
        let mut sink = NullSink;
        let err = Object::parse("v 0 0 0\nv 0 zero 0\n", ParseOptions::new().strict(), &mut sink)
            .unwrap_err();
        match err {
            Error::Line { number, source } => {
                assert_eq!(number, 2);
                assert!(matches!(*source, Error::InvalidNumber(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn comments_and_crlf_are_ignored() {
        let (object, diagnostics) =
            parse("# header\r\nv 0 0 0 # origin\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3 # tri\r\n");
        assert_eq!(object.vertices().len(), 3);
        assert!(object.is_complete());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn relative_indices_follow_options() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf -1 -2 -3\n";
        let (object, _) = parse(text);
        assert_eq!(object.faces()[0].vertices(), &[3, 2, 1]);

        let (object, _) = parse_with(text, ParseOptions::new().face_local_indices());
        assert_eq!(object.faces()[0].vertices(), &[1, 0, -1]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\nf 1 2\n";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn face_vertices_resolve_records() {
        let (object, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 9//1\n");
        let corners: Vec<_> = object.face_vertices(&object.faces()[0]).collect();
        assert_eq!(corners.len(), 3);
        assert_eq!(corners[1].0, Some(&Vertex::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(corners[1].1, None);
        assert_eq!(corners[1].2, Some(&NormalVertex::new(0.0, 0.0, 1.0)));
        assert_eq!(corners[2].0, None);
    }

    #[test]
    fn reserves_per_category() {
        let (object, _) = parse("vn 0 0 1\nvn 0 1 0\nvt 0 0\nv 0 0 0\nf 1 1 1\n");
        assert_eq!(object.counts().normals, 2);
        assert!(object.normals.capacity() >= 2);
        assert_eq!(object.counts().faces, 1);
    }

    #[test]
    fn parses_from_str_and_reader() {
        let object: Object = TRIANGLE.parse().unwrap();
        assert_eq!(object.faces().len(), 1);

        let mut sink = NullSink;
        let from_reader =
            Object::from_reader(TRIANGLE.as_bytes(), ParseOptions::default(), &mut sink).unwrap();
        assert_eq!(object, from_reader);
    }
}
