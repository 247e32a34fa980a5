//! # Spherical ↔ Cartesian conversions
//!
//! Directions on the unit sphere are handled in two frames:
//!
//! * **spacecraft body**: azimuth measured in the X–Y plane from +X towards +Y, zenith measured
//!   from the +Z axis (the convention of the published GBM detector table);
//! * **J2000 equatorial**: right ascension and declination.
//!
//! Angles cross this module with an explicit [`AngleUnit`]; internal computations are in
//! radians.

use nalgebra::Vector3;

use crate::{
    batch::Batch,
    constants::{AngleUnit, DPI, POLE_EPS},
    poshist_errors::PoshistError,
};

/// Convert a body-frame azimuth/zenith pair to a unit Cartesian vector.
///
/// With the elevation `el = π/2 − zen` above the body X–Y plane:
///
/// ```text
/// x = cos(el)·cos(az)
/// y = cos(el)·sin(az)
/// z = sin(el)
/// ```
///
/// Arguments
/// ---------
/// * `az`: azimuth, in `unit`.
/// * `zen`: zenith angle from the body +Z axis, in `unit`.
/// * `unit`: unit of `az` and `zen`.
///
/// Return
/// ----------
/// * The unit vector pointing towards (`az`, `zen`).
pub fn azzen_to_cartesian(az: f64, zen: f64, unit: AngleUnit) -> Vector3<f64> {
    let az = unit.to_radians(az);
    let el = std::f64::consts::FRAC_PI_2 - unit.to_radians(zen);

    let (sin_az, cos_az) = az.sin_cos();
    let (sin_el, cos_el) = el.sin_cos();

    Vector3::new(cos_el * cos_az, cos_el * sin_az, sin_el)
}

/// [`azzen_to_cartesian`] over batches of azimuths and zeniths.
///
/// A scalar paired with a batch is repeated over the batch; two batches are paired element-wise.
///
/// Return
/// ----------
/// * One vector per resolved element, or [`PoshistError::AngleBatchMismatch`] when both inputs
///   are batches of different sizes.
pub fn azzen_to_cartesian_batch(
    az: &Batch<f64>,
    zen: &Batch<f64>,
    unit: AngleUnit,
) -> Result<Vec<Vector3<f64>>, PoshistError> {
    let (az, zen) = (az.as_slice(), zen.as_slice());

    let positions = match (az, zen) {
        ([a], zeniths) => zeniths
            .iter()
            .map(|&z| azzen_to_cartesian(*a, z, unit))
            .collect(),
        (azimuths, [z]) => azimuths
            .iter()
            .map(|&a| azzen_to_cartesian(a, *z, unit))
            .collect(),
        (azimuths, zeniths) if azimuths.len() == zeniths.len() => azimuths
            .iter()
            .zip(zeniths)
            .map(|(&a, &z)| azzen_to_cartesian(a, z, unit))
            .collect(),
        (azimuths, zeniths) => {
            return Err(PoshistError::AngleBatchMismatch {
                azimuths: azimuths.len(),
                zeniths: zeniths.len(),
            })
        }
    };

    Ok(positions)
}

/// Convert a body-frame Cartesian vector back to azimuth and zenith.
///
/// The azimuth is wrapped into [0, 2π) and is set to 0 when the vector lies on the Z axis,
/// where it is undefined.
///
/// Return
/// ----------
/// * `(az, zen)` in `unit`, or `(0, 0)` for the null vector.
pub fn cartesian_to_azzen(position: &Vector3<f64>, unit: AngleUnit) -> (f64, f64) {
    let norm = position.norm();
    if norm == 0. {
        return (0.0, 0.0);
    }

    let zen = (position.z / norm).clamp(-1.0, 1.0).acos();
    let az = unit.from_radians(wrapped_longitude(position.x, position.y));
    let az = if az >= unit.full_turn() { 0.0 } else { az };

    (az, unit.from_radians(zen))
}

/// Convert a J2000 Cartesian direction to right ascension and declination.
///
/// The vector is expected to be (close to) unit-norm: it comes out of a rotation of a unit
/// vector, so only floating-point overshoot is corrected.
///
/// * `z` is clamped into [-1, 1] before `asin`, so the declination is always defined.
/// * When both `|x|` and `|y|` are below [`POLE_EPS`] the right ascension is exactly 0.
/// * The right ascension is wrapped into [0, 2π).
///
/// Return
/// ----------
/// * `(ra, dec)` in `unit`.
pub fn cartesian_to_radec(position: &Vector3<f64>, unit: AngleUnit) -> (f64, f64) {
    let z = position.z.clamp(-1.0, 1.0);
    let dec = z.asin();
    let ra = unit.from_radians(wrapped_longitude(position.x, position.y));
    // the unit change can round just below a full turn up to it
    let ra = if ra >= unit.full_turn() { 0.0 } else { ra };

    (ra, unit.from_radians(dec))
}

/// `atan2(y, x)` wrapped into [0, 2π), with the pole rule applied.
fn wrapped_longitude(x: f64, y: f64) -> f64 {
    if x.abs() < POLE_EPS && y.abs() < POLE_EPS {
        return 0.0;
    }

    let lon = y.atan2(x);
    let lon = if lon < 0.0 { lon + DPI } else { lon };
    // tiny negative angles round up to exactly 2π
    if lon >= DPI {
        0.0
    } else {
        lon
    }
}
