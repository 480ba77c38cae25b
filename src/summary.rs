use std::{
    io::{prelude::*, Result},
    path::Path,
};

use knit_obj::Object;

const RULE: &str = "────────────────────────────────────────────────────────";

/// Writes the human readable summary of `object`.
pub fn write_summary(out: &mut impl Write, path: &Path, object: &Object) -> Result<()> {
    writeln!(out, "┌{}", RULE)?;
    writeln!(out, "│ Read '{}'", path.display())?;
    writeln!(out, "│")?;
    writeln!(out, "│ has normals: {}", object.has_normals())?;
    writeln!(out, "│ has textures: {}", object.has_textures())?;
    writeln!(out, "│ is only triangles: {}", object.is_triangulated())?;
    writeln!(out, "│ is complete: {}", object.is_complete())?;
    writeln!(out, "│")?;
    writeln!(out, "│ object has {} faces", object.faces().len())?;
    writeln!(out, "│")?;
    writeln!(out, "│ object has {} vertices", object.vertices().len())?;
    writeln!(out, "│ object has {} normals", object.normals().len())?;
    writeln!(
        out,
        "│ object has {} texture vertices",
        object.texture_vertices().len()
    )?;
    writeln!(out, "└{}", RULE)?;
    Ok(())
}
