//! # Constants and type definitions for gbm-poshist
//!
//! This module centralizes the **numerical constants**, **conversion factors**, and **common type
//! definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians) and the [`AngleUnit`] flag carried by every
//!   transform call
//! - Numerical tolerances used by the frame transform
//! - Fermi mission elapsed time (MET) reference values
//! - Core type aliases

use serde::{Deserialize, Serialize};

// -------------------------------------------------------------------------------------------------
// Angle constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Below this magnitude on both x and y, an inertial direction is treated as a pole and its
/// right ascension is set to exactly zero.
pub const POLE_EPS: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// Time constants
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Modified Julian Date (UTC) of the Fermi MET origin, 2001-01-01T00:00:00 UTC
pub const FERMI_MET_EPOCH_MJD: f64 = 51910.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Fermi mission elapsed time, in seconds since [`FERMI_MET_EPOCH_MJD`]
pub type Met = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

/// Unit of the angles given to, and returned by, the coordinate transforms.
///
/// Every public transform takes an explicit `AngleUnit`; the default is [`AngleUnit::Degrees`],
/// the unit of the detector catalog and of the POSHIST products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Convert an angle expressed in `self` to radians.
    #[inline]
    pub fn to_radians(self, angle: f64) -> Radian {
        match self {
            AngleUnit::Degrees => angle * RADEG,
            AngleUnit::Radians => angle,
        }
    }

    /// Convert an angle in radians to `self`.
    #[inline]
    pub fn from_radians(self, angle: Radian) -> f64 {
        match self {
            AngleUnit::Degrees => angle * DEGRAD,
            AngleUnit::Radians => angle,
        }
    }

    /// Express an angle given in degrees in `self`.
    #[inline]
    pub fn from_degrees(self, angle: Degree) -> f64 {
        match self {
            AngleUnit::Degrees => angle,
            AngleUnit::Radians => angle * RADEG,
        }
    }

    /// One full turn in this unit (360 or 2π).
    #[inline]
    pub fn full_turn(self) -> f64 {
        match self {
            AngleUnit::Degrees => 360.0,
            AngleUnit::Radians => DPI,
        }
    }
}
