//! # GBM detector catalog
//!
//! The Gamma-ray Burst Monitor carries twelve sodium iodide (NaI) scintillators and two bismuth
//! germanate (BGO) calorimeters. Their boresights are fixed in the spacecraft body frame and are
//! listed here once, as an immutable table.
//!
//! ## Convention
//!
//! `azimuth` is measured in the body X–Y plane from +X towards +Y and `zenith` is measured from
//! the body +Z axis, both in degrees. These are the published boresight values
//! (Meegan et al. 2009, ApJ 702, 791, table 1); callers pass them unchanged to
//! [`spacecraft_to_radec`](crate::ref_system::spacecraft_to_radec).
//!
//! | code | name   | az (°) | zen (°) |
//! |------|--------|--------|---------|
//! | n0   | NAI_00 | 45.89  | 20.58   |
//! | …    | …      | …      | …       |
//! | b1   | BGO_01 | 180.00 | 90.00   |

use std::fmt;

use nalgebra::Vector3;

use crate::{
    constants::{AngleUnit, Degree},
    conversion::azzen_to_cartesian,
    poshist_errors::PoshistError,
};

/// Number of detectors on board.
pub const DETECTOR_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    /// Sodium iodide scintillator, 8 keV – 1 MeV
    NaI,
    /// Bismuth germanate scintillator, 200 keV – 40 MeV
    Bgo,
}

/// One entry of the detector catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detector {
    /// Short code used in GBM file names (`n0` … `nb`, `b0`, `b1`)
    pub code: &'static str,
    /// Canonical name (`NAI_00` … `BGO_01`)
    pub name: &'static str,
    /// Position in the catalog, 0 – 13
    pub index: usize,
    pub kind: DetectorKind,
    /// Boresight azimuth in the body frame
    pub azimuth: Degree,
    /// Boresight zenith from the body +Z axis
    pub zenith: Degree,
}

const fn entry(
    code: &'static str,
    name: &'static str,
    index: usize,
    kind: DetectorKind,
    azimuth: Degree,
    zenith: Degree,
) -> Detector {
    Detector {
        code,
        name,
        index,
        kind,
        azimuth,
        zenith,
    }
}

/// The fourteen GBM detectors, in index order.
pub static DETECTORS: [Detector; DETECTOR_COUNT] = [
    entry("n0", "NAI_00", 0, DetectorKind::NaI, 45.89, 20.58),
    entry("n1", "NAI_01", 1, DetectorKind::NaI, 45.11, 45.31),
    entry("n2", "NAI_02", 2, DetectorKind::NaI, 58.44, 90.21),
    entry("n3", "NAI_03", 3, DetectorKind::NaI, 314.87, 45.24),
    entry("n4", "NAI_04", 4, DetectorKind::NaI, 303.15, 90.27),
    entry("n5", "NAI_05", 5, DetectorKind::NaI, 3.35, 89.79),
    entry("n6", "NAI_06", 6, DetectorKind::NaI, 224.93, 20.43),
    entry("n7", "NAI_07", 7, DetectorKind::NaI, 224.62, 46.18),
    entry("n8", "NAI_08", 8, DetectorKind::NaI, 236.61, 89.97),
    entry("n9", "NAI_09", 9, DetectorKind::NaI, 135.19, 45.55),
    entry("na", "NAI_10", 10, DetectorKind::NaI, 123.73, 90.42),
    entry("nb", "NAI_11", 11, DetectorKind::NaI, 183.74, 90.32),
    entry("b0", "BGO_00", 12, DetectorKind::Bgo, 0.00, 90.00),
    entry("b1", "BGO_01", 13, DetectorKind::Bgo, 180.00, 90.00),
];

impl Detector {
    /// Look up a detector by short code (`"n0"`) or canonical name (`"NAI_00"`).
    ///
    /// The lookup ignores ASCII case and surrounding whitespace.
    ///
    /// Return
    /// ----------
    /// * The catalog entry, or [`PoshistError::UnknownDetector`].
    pub fn from_code(code: &str) -> Result<&'static Detector, PoshistError> {
        let key = code.trim();
        DETECTORS
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(key) || d.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| PoshistError::UnknownDetector(code.to_string()))
    }

    pub fn from_index(index: usize) -> Option<&'static Detector> {
        DETECTORS.get(index)
    }

    /// Boresight as a body-frame unit vector.
    pub fn boresight(&self) -> Vector3<f64> {
        azzen_to_cartesian(self.azimuth, self.zenith, AngleUnit::Degrees)
    }

    /// Boresight elevation above the body X–Y plane, `90° − zenith`.
    pub fn elevation(&self) -> Degree {
        90.0 - self.zenith
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Iterate over the detectors of one kind, in index order.
pub fn detectors_of_kind(kind: DetectorKind) -> impl Iterator<Item = &'static Detector> {
    DETECTORS.iter().filter(move |d| d.kind == kind)
}
