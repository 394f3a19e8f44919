//! All the commands.
//!

use std::path::PathBuf;

use eyre::{eyre, Result};

use fcbox_common::makepath;
use fcbox_engine::Session;

pub use accuracy::*;
pub use config::*;
pub use extract::*;
pub use open::*;
pub use rates::*;

mod accuracy;
mod config;
mod extract;
mod open;
mod rates;

/// Pick the dump to work on: the argument, or the one remembered from the
/// previous run.
///
pub fn resolve_dump(session: &Session, dump: &Option<PathBuf>) -> Result<PathBuf> {
    match dump {
        Some(d) => Ok(d.clone()),
        None => {
            let of = &session.config().open_file;
            match &of.file {
                Some(file) if !of.path.is_empty() => Ok(makepath!(&of.path, file)),
                Some(file) => Ok(PathBuf::from(file)),
                None => Err(eyre!("No log dump given and none remembered, run open first.")),
            }
        }
    }
}
