//! # Spacecraft body → J2000 frame transform
//!
//! This is the engine that turns body-frame directions (azimuth/zenith) and spacecraft attitude
//! quaternions into J2000 right ascension and declination.
//!
//! ## Broadcasting
//!
//! With `P` positions and `Q` quaternions:
//!
//! | P      | Q      | pairs | pairing                                   |
//! |--------|--------|-------|-------------------------------------------|
//! | 1      | any    | Q     | the position is seen through every attitude |
//! | any    | 1      | P     | every position is seen through one attitude |
//! | P == Q |        | P     | element-wise                              |
//! | other  | other  | none  | [`PoshistError::BatchSizeMismatch`]       |
//!
//! Each pair is rotated with its own matrix (`v_J2000 = R_i · v_i`), then converted to angles
//! with [`cartesian_to_radec`](crate::conversion::cartesian_to_radec).

use nalgebra::{Matrix3, Quaternion, Vector3};
use tracing::debug;

use crate::{
    attitude::direction_cosines_batch,
    batch::Batch,
    constants::AngleUnit,
    conversion::{azzen_to_cartesian_batch, cartesian_to_radec},
    poshist_errors::PoshistError,
};

/// Number of (position, attitude) pairs produced by a transform.
///
/// Arguments
/// ---------
/// * `positions`: number of body-frame positions (P).
/// * `quaternions`: number of attitude quaternions (Q).
///
/// Return
/// ----------
/// * `Q` when `P == 1`, `P` when `Q == 1`, `P` when `P == Q`, otherwise
///   [`PoshistError::BatchSizeMismatch`].
pub fn pair_count(positions: usize, quaternions: usize) -> Result<usize, PoshistError> {
    match (positions, quaternions) {
        (1, q) => Ok(q),
        (p, 1) => Ok(p),
        (p, q) if p == q => Ok(p),
        (p, q) => Err(PoshistError::BatchSizeMismatch {
            positions: p,
            quaternions: q,
        }),
    }
}

/// Rotate body-frame vectors into J2000, one rotation per pair.
///
/// Arguments
/// ---------
/// * `positions`: body-frame unit vectors.
/// * `dcms`: direction cosine matrices, body → J2000.
///
/// Return
/// ----------
/// * The rotated vectors, broadcast as described in [`pair_count`].
pub fn body_to_j2000(
    positions: &[Vector3<f64>],
    dcms: &[Matrix3<f64>],
) -> Result<Vec<Vector3<f64>>, PoshistError> {
    let count = pair_count(positions.len(), dcms.len())?;

    let rotated = (0..count)
        .map(|i| {
            let position = if positions.len() == 1 {
                &positions[0]
            } else {
                &positions[i]
            };
            let dcm = if dcms.len() == 1 { &dcms[0] } else { &dcms[i] };
            dcm * position
        })
        .collect();

    Ok(rotated)
}

/// Convert a spacecraft-frame position (Az/Zen) to J2000 RA/Dec.
///
/// Arguments
/// ---------
/// * `az`: body azimuth, scalar or batch.
/// * `zen`: body zenith from +Z, scalar or batch (broadcast against `az`).
/// * `quat`: attitude quaternion(s), scalar or batch.
/// * `unit`: unit of the input angles and of the returned ones.
///
/// Return
/// ----------
/// * `(ra, dec)`, each a [`Batch::Scalar`] when a single pair is resolved and a
///   [`Batch::Many`] otherwise. RA lies in [0, 360) degrees (or [0, 2π) radians), Dec in
///   [-90, 90] degrees.
/// * [`PoshistError::BatchSizeMismatch`] when there are more than one position and more than
///   one quaternion and the counts differ.
///
/// Example
/// -----------------
/// ```rust
/// use gbm_poshist::{batch::Batch, constants::AngleUnit, ref_system::spacecraft_to_radec};
/// use nalgebra::Quaternion;
///
/// let (ra, dec) = spacecraft_to_radec(
///     &Batch::Scalar(0.0),
///     &Batch::Scalar(90.0),
///     &Batch::Scalar(Quaternion::identity()),
///     AngleUnit::Degrees,
/// )
/// .unwrap();
/// assert_eq!(ra, Batch::Scalar(0.0));
/// assert_eq!(dec, Batch::Scalar(0.0));
/// ```
pub fn spacecraft_to_radec(
    az: &Batch<f64>,
    zen: &Batch<f64>,
    quat: &Batch<Quaternion<f64>>,
    unit: AngleUnit,
) -> Result<(Batch<f64>, Batch<f64>), PoshistError> {
    let positions = azzen_to_cartesian_batch(az, zen, unit)?;
    let dcms = direction_cosines_batch(quat.as_slice());

    let j2000 = body_to_j2000(&positions, &dcms)?;
    debug!(
        positions = positions.len(),
        quaternions = dcms.len(),
        pairs = j2000.len(),
        "Transformed spacecraft positions to J2000"
    );

    let (ra, dec): (Vec<f64>, Vec<f64>) = j2000
        .iter()
        .map(|v| cartesian_to_radec(v, unit))
        .unzip();

    Ok((Batch::squeeze(ra), Batch::squeeze(dec)))
}
