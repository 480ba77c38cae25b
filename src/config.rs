//! Contains the struct for the options file.

use crate::cli::Arguments;

use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use knit_obj::ParseOptions;
use serde::Deserialize;
use toml::from_str;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    parse: ParseOptions,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = from_str(&text).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Parse options with command line flags applied on top.
    pub fn parse_options(&self, args: &Arguments) -> ParseOptions {
        let mut options = self.parse;
        if args.strict {
            options = options.strict();
        }
        if args.face_local_indices {
            options = options.face_local_indices();
        }
        options
    }
}
