//! Library part of the `fcboxctl` utility.
//!
//! Command line driver around `fcbox-engine`: open ArduPilot log dumps,
//! extract the flight box out of them and write it in the format the
//! scoring program expects.  Log parsing lives in `fcbox-formats`, the
//! detectors and the session in `fcbox-engine`.
//!

/// Re-export
///
pub use cli::*;
pub use cmds::*;

mod cli;
mod cmds;
