mod cli;
mod config;
mod summary;

use crate::{cli::Arguments, config::Config, summary::write_summary};

use std::io::stdout;

use anyhow::{bail, Context, Result};
use clap::Parser;
use knit_obj::{LogSink, Object};
use log::info;

fn main() -> Result<()> {
    pretty_env_logger::init();
    let arguments = Arguments::parse();

    let config = match &arguments.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let options = config.parse_options(&arguments);
    info!("Reading {} with {:?}", arguments.path.display(), options);

    let object = Object::read_file(&arguments.path, options, &mut LogSink)
        .with_context(|| format!("Could not read '{}'", arguments.path.display()))?;

    let stdout = stdout();
    write_summary(&mut stdout.lock(), &arguments.path, &object)?;

    if arguments.deny_incomplete && !object.is_complete() {
        bail!("'{}' is incomplete", arguments.path.display());
    }
    Ok(())
}
