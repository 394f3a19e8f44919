//! All the ways an analysis can refuse to proceed.
//!

use thiserror::Error;

/// Analysis-level errors.
///
#[derive(Debug, Error)]
pub enum Status {
    #[error("Please open a log dump to be analysed.")]
    NoLogLoaded,
    #[error("Log does not contain POS, XKF1 or GPS position messages, please open a valid log.")]
    NoPositionSource,
    #[error("Log is missing RCIN messages for channel {0}.")]
    MissingRcChannel(String),
    #[error("Log is missing {0} entries.")]
    MissingStream(String),
    #[error("No usable box available to be written.")]
    NoZoneToWrite,
}
