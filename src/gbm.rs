//! # GbmPointing: configured entry point
//!
//! [`GbmPointing`] bundles the two knobs a caller usually wants to fix once, the angle unit and
//! the interpolation method, and exposes the pointing operations with those settings applied.
//!
//! The settings live in [`PointingConfig`], which is `serde`-friendly so it can be read from the
//! configuration file of a larger pipeline. Missing fields fall back to their defaults
//! (degrees, next-sample interpolation).
//!
//! ```rust
//! use gbm_poshist::constants::AngleUnit;
//! use gbm_poshist::gbm::{GbmPointing, PointingConfig};
//! use nalgebra::Quaternion;
//!
//! let gbm = GbmPointing::new(PointingConfig::default().with_unit(AngleUnit::Degrees));
//! let pointings = gbm.all_detectors_radec(&Quaternion::identity()).unwrap();
//! assert_eq!(pointings["b0"].ra, 0.0);
//! ```
//!
//! ## See also
//! ------------
//! * [`pointing`](crate::pointing) – The unit-explicit functions wrapped here.
//! * [`interpolate_attitude`](crate::poshist::interpolation::interpolate_attitude) – Attitude at arbitrary times.

use nalgebra::Quaternion;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    attitude::fermi_quaternion,
    batch::Batch,
    constants::{AngleUnit, Met},
    pointing::{self, DetectorPointingMap},
    poshist::{
        attitude_history::AttitudeHistory,
        interpolation::{interpolate_attitude, InterpolatedAttitude, InterpolationMethod},
    },
    poshist_errors::PoshistError,
};

/// Settings shared by every [`GbmPointing`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointingConfig {
    /// Unit of the returned sky angles
    pub unit: AngleUnit,
    /// How attitudes are estimated between POSHIST rows
    pub interpolation: InterpolationMethod,
}

impl PointingConfig {
    pub fn with_unit(mut self, unit: AngleUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct GbmPointing {
    config: PointingConfig,
}

impl GbmPointing {
    pub fn new(config: PointingConfig) -> Self {
        GbmPointing { config }
    }

    pub fn config(&self) -> &PointingConfig {
        &self.config
    }

    /// RA/Dec of one detector, see [`pointing::detector_radec`].
    pub fn detector_radec(
        &self,
        code: &str,
        quat: &Batch<Quaternion<f64>>,
    ) -> Result<(Batch<f64>, Batch<f64>), PoshistError> {
        pointing::detector_radec(code, quat, self.config.unit)
    }

    /// RA/Dec of all fourteen detectors, see [`pointing::all_detectors_radec`].
    pub fn all_detectors_radec(
        &self,
        quat: &Quaternion<f64>,
    ) -> Result<DetectorPointingMap, PoshistError> {
        pointing::all_detectors_radec(quat, self.config.unit)
    }

    /// Attitudes at `times` using the configured interpolation method.
    pub fn interpolate(&self, history: &AttitudeHistory, times: &[Met]) -> Vec<InterpolatedAttitude> {
        interpolate_attitude(history, times, self.config.interpolation)
    }

    /// Detector pointings at arbitrary times.
    ///
    /// The attitude is first interpolated at each time, then every detector is resolved for that
    /// attitude. Times where no attitude is available (outside the history, or `NaN`) give a map
    /// whose angles are all `NaN`.
    ///
    /// Arguments
    /// ---------
    /// * `history`: POSHIST rows, in any order.
    /// * `times`: query times (MET).
    ///
    /// Return
    /// ----------
    /// * One map per query time, in query order.
    pub fn detector_pointings_at(
        &self,
        history: &AttitudeHistory,
        times: &[Met],
    ) -> Result<Vec<DetectorPointingMap>, PoshistError> {
        let attitudes = self.interpolate(history, times);

        debug!(
            times = times.len(),
            undefined = attitudes.iter().filter(|a| !a.is_defined()).count(),
            "Resolving detector pointings"
        );

        attitudes
            .iter()
            .map(|a| {
                let [q1, q2, q3, q4] = a.components();
                pointing::all_detectors_radec(&fermi_quaternion(q1, q2, q3, q4), self.config.unit)
            })
            .collect()
    }
}
