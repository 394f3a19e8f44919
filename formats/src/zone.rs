//! F3A zone box store and writer.
//!
//! The box is two ground positions, pilot and centre, written in the fixed
//! format the F3A Zone Pro scoring tool imports: a header line, then six data
//! lines, a literal `1`, lat/lng at 7 decimal places and the pilot altitude
//! at 2.
//!

use std::fmt;
use std::fs;
use std::path::Path;

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Pos, Status};

/// First line of the zone file, checked by the consuming tool.
const HEADER: &str = "Emailed box data for F3A Zone Pro - please DON'T modify!";

/// The extracted flight box, or nothing.
///
/// Set only by a successful extraction, explicitly unset by a failed one,
/// and kept across log loads until either happens again.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct F3aZone {
    pilot: Option<Pos>,
    centre: Option<Pos>,
}

impl F3aZone {
    pub fn new() -> Self {
        F3aZone::default()
    }

    /// Both positions set?
    ///
    #[inline]
    pub fn valid(&self) -> bool {
        self.pilot.is_some() && self.centre.is_some()
    }

    pub fn set(&mut self, pilot: Pos, centre: Pos) {
        self.pilot = Some(pilot);
        self.centre = Some(centre);
    }

    pub fn unset(&mut self) {
        self.pilot = None;
        self.centre = None;
    }

    #[inline]
    pub fn pilot(&self) -> Option<Pos> {
        self.pilot
    }

    #[inline]
    pub fn centre(&self) -> Option<Pos> {
        self.centre
    }

    /// Write the box out in the fixed zone file format.
    ///
    /// Requires a valid box, anything else is a caller error.
    ///
    #[tracing::instrument(skip(self))]
    pub fn write(&self, path: &Path) -> Result<()> {
        trace!("enter");

        let (pilot, centre) = match (self.pilot, self.centre) {
            (Some(p), Some(c)) => (p, c),
            _ => return Err(Status::NoZone.into()),
        };

        let content = format!(
            "{}\n1\n{:.7}\n{:.7}\n{:.7}\n{:.7}\n{:.2}\n",
            HEADER, pilot.lat, pilot.lng, centre.lat, centre.lng, pilot.alt
        );
        fs::write(path, content)?;
        Ok(())
    }
}

impl fmt::Display for F3aZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.pilot, self.centre) {
            (Some(pilot), Some(centre)) => {
                write!(f, "Pilot:  {}\nCentre: {}", pilot, centre)
            }
            _ => write!(f, "F3A zone position has not been set."),
        }
    }
}
