//! Flight box extraction engine.
//!
//! Everything between a parsed log and a written box file lives here: the
//! 3D geodesic metric, the two candidate detectors (RC switch transitions
//! and stationary periods), candidate clustering and the [`Session`] that
//! strings them together.  Log parsing itself is `fcbox-formats` territory.
//!

pub use cluster::*;
pub use distance::*;
pub use error::*;
pub use session::*;
pub use stationary::*;
pub use stats::*;
pub use switch::*;

mod cluster;
mod distance;
mod error;
mod session;
mod stationary;
mod stats;
mod switch;

/// Returns the library version.
///
pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
