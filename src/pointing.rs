//! # Detector sky pointing
//!
//! Resolve where the GBM detectors look on the sky for one or many spacecraft attitudes. Every
//! function here is a thin layer over
//! [`spacecraft_to_radec`](crate::ref_system::spacecraft_to_radec), fed with the fixed
//! boresights of the [detector catalog](crate::detectors).
//!
//! | function                    | detectors | attitudes | result                          |
//! |-----------------------------|-----------|-----------|---------------------------------|
//! | [`detector_radec`]          | one       | 1 or N    | (RA, Dec) batch                 |
//! | [`all_detectors_radec`]     | all 14    | 1         | code → [`DetectorPointing`]     |
//! | [`spacecraft_pointing`]     | body +Z   | 1 or N    | (RA, Dec) batch                 |
//! | [`detector_orientation`]    | all 14    | N         | J2000 unit vectors per attitude |

use std::collections::BTreeMap;

use nalgebra::{Quaternion, Vector3};

use crate::{
    attitude::direction_cosines,
    batch::Batch,
    constants::AngleUnit,
    detectors::{Detector, DETECTORS, DETECTOR_COUNT},
    poshist::attitude_history::AttitudeHistory,
    poshist_errors::PoshistError,
    ref_system::spacecraft_to_radec,
};

/// Sky position of one detector boresight for one attitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorPointing {
    pub ra: f64,
    pub dec: f64,
    /// Catalog index of the detector
    pub index: usize,
}

/// Detector short code → pointing, for the fourteen detectors.
pub type DetectorPointingMap = BTreeMap<&'static str, DetectorPointing>;

/// Express the catalog angles of `detector` in `unit`.
fn boresight_angles(detector: &Detector, unit: AngleUnit) -> (f64, f64) {
    (
        unit.from_degrees(detector.azimuth),
        unit.from_degrees(detector.zenith),
    )
}

/// RA/Dec of one detector boresight.
///
/// Arguments
/// ---------
/// * `code`: detector short code or canonical name (see [`Detector::from_code`]).
/// * `quat`: one attitude or a batch of attitudes.
/// * `unit`: unit of the returned angles.
///
/// Return
/// ----------
/// * `(ra, dec)`, scalar for a single attitude, batch otherwise.
/// * [`PoshistError::UnknownDetector`] if `code` is not in the catalog.
pub fn detector_radec(
    code: &str,
    quat: &Batch<Quaternion<f64>>,
    unit: AngleUnit,
) -> Result<(Batch<f64>, Batch<f64>), PoshistError> {
    let detector = Detector::from_code(code)?;
    let (az, zen) = boresight_angles(detector, unit);
    spacecraft_to_radec(&az.into(), &zen.into(), quat, unit)
}

/// RA/Dec of every detector for one attitude.
///
/// Return
/// ----------
/// * A map with exactly fourteen entries, keyed by short code, each carrying the detector index.
pub fn all_detectors_radec(
    quat: &Quaternion<f64>,
    unit: AngleUnit,
) -> Result<DetectorPointingMap, PoshistError> {
    let (az, zen): (Vec<f64>, Vec<f64>) = DETECTORS
        .iter()
        .map(|d| boresight_angles(d, unit))
        .unzip();
    let (az, zen) = (Batch::Many(az), Batch::Many(zen));

    let (ra, dec) = spacecraft_to_radec(&az, &zen, &Batch::Scalar(*quat), unit)?;

    Ok(DETECTORS
        .iter()
        .zip(ra.iter().zip(dec.iter()))
        .map(|(d, (&ra, &dec))| {
            (
                d.code,
                DetectorPointing {
                    ra,
                    dec,
                    index: d.index,
                },
            )
        })
        .collect())
}

/// RA/Dec of the spacecraft +Z axis.
pub fn spacecraft_pointing(
    quat: &Batch<Quaternion<f64>>,
    unit: AngleUnit,
) -> Result<(Batch<f64>, Batch<f64>), PoshistError> {
    spacecraft_to_radec(&0.0.into(), &0.0.into(), quat, unit)
}

/// J2000 unit vectors of the fourteen detector boresights, for every row of a history.
///
/// Rows are kept in history order and detectors in catalog order. Rows with missing quaternion
/// components produce `NaN` vectors.
pub fn detector_orientation(history: &AttitudeHistory) -> Vec<[Vector3<f64>; DETECTOR_COUNT]> {
    let boresights = DETECTORS.map(|d| d.boresight());

    history
        .iter()
        .map(|sample| {
            let dcm = direction_cosines(&sample.quaternion());
            boresights.map(|b| dcm * b)
        })
        .collect()
}
