//! This library shares some common code amongst all fcbox modules.
//!
//! Configuration file handling and logging setup live here, the rest of the
//! workspace only deals with flight data.
//!

use clap::{crate_name, crate_version};

/// Re-export
///
pub use config::*;
pub use logging::*;

mod config;
mod logging;
mod macros;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
