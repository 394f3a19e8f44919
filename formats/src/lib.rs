//! Data model for parsed flight-controller logs.
//!
//! The binary log itself is decoded by an external tool (`mavlogdump.py` or
//! similar) into a dump directory with one CSV file per message type.  This
//! crate loads such a dump into a set of named tabular [`Stream`]s, picks the
//! best position source out of the recognized ones and exposes it as a
//! [`PositionSeries`], and holds the extracted flight box as an [`F3aZone`]
//! with its fixed-format writer.
//!

// Re-export for convenience
//
pub use error::*;
pub use log::*;
pub use position::*;
pub use zone::*;

mod error;
mod log;
mod position;
mod zone;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
