//! This is the module handling the `config` sub-command.
//!

use std::path::Path;

use eyre::Result;
use tracing::trace;

use fcbox_common::Config;
use fcbox_engine::Session;

/// Print the active configuration as JSON, with the file it came from.
///
pub fn show_config(session: &Session, fname: Option<&Path>) -> Result<()> {
    trace!("enter");

    let loc = match fname {
        Some(p) => p.to_path_buf(),
        None => Config::default_file()?,
    };
    println!("Configuration from {}:", loc.display());
    println!("{}", serde_json::to_string_pretty(session.config())?);

    Ok(())
}
