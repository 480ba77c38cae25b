use std::path::PathBuf;

use clap::Parser;

/// Reads a Wavefront OBJ file and summarizes its mesh.
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Arguments {
    /// Specifies the OBJ file path.
    pub path: PathBuf,

    /// Specifies a TOML file with parse options.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Fails on malformed numbers and short records instead of warning.
    #[clap(long)]
    pub strict: bool,

    /// Resolves negative face indices against the face's own vertex count.
    #[clap(long)]
    pub face_local_indices: bool,

    /// Exits with failure when the object is incomplete.
    #[clap(long)]
    pub deny_incomplete: bool,
}
