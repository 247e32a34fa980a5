//! # Spacecraft attitude quaternions
//!
//! Fermi stores its attitude as four columns `QSJ_1 … QSJ_4`, ordered **(x, y, z, w)** with the
//! scalar part last. This module maps that layout onto [`nalgebra::Quaternion`] (whose
//! constructor takes the scalar part first) and builds the direction cosine matrix (DCM) that
//! rotates spacecraft-body vectors into the J2000 equatorial frame.
//!
//! No normalization is performed: callers must supply unit quaternions, otherwise the DCM is not
//! orthonormal and the downstream angles are meaningless.

use nalgebra::{Matrix3, Quaternion};

use crate::poshist_errors::PoshistError;

/// Build a quaternion from the Fermi `QSJ_1 … QSJ_4` columns (x, y, z, w).
#[inline]
pub fn fermi_quaternion(q1: f64, q2: f64, q3: f64, q4: f64) -> Quaternion<f64> {
    Quaternion::new(q4, q1, q2, q3)
}

/// Build a quaternion from a slice in Fermi order (x, y, z, w).
///
/// Return
/// ----------
/// * The quaternion, or [`PoshistError::InvalidQuaternionLength`] if `qsj` does not hold exactly
///   four components.
pub fn quaternion_from_slice(qsj: &[f64]) -> Result<Quaternion<f64>, PoshistError> {
    match *qsj {
        [q1, q2, q3, q4] => Ok(fermi_quaternion(q1, q2, q3, q4)),
        _ => Err(PoshistError::InvalidQuaternionLength(qsj.len())),
    }
}

/// Components of a quaternion back in Fermi order (x, y, z, w).
#[inline]
pub fn fermi_components(quat: &Quaternion<f64>) -> [f64; 4] {
    [quat.i, quat.j, quat.k, quat.w]
}

/// Direction cosine matrix of a spacecraft attitude quaternion.
///
/// With `(x, y, z, w)` the Fermi components:
///
/// ```text
/// R = [[1-2(y²+z²), 2(xy-wz),   2(xz+wy)],
///      [2(xy+wz),   1-2(x²+z²), 2(yz-wx)],
///      [2(xz-wy),   2(yz+wx),   1-2(x²+y²)]]
/// ```
///
/// so that `v_J2000 = R · v_body`.
///
/// Arguments
/// ---------
/// * `quat`: the attitude quaternion, assumed unit-norm.
///
/// Return
/// ----------
/// * The 3×3 rotation matrix. It is orthonormal only if `quat` is a unit quaternion.
pub fn direction_cosines(quat: &Quaternion<f64>) -> Matrix3<f64> {
    let (x, y, z, w) = (quat.i, quat.j, quat.k, quat.w);

    Matrix3::new(
        1. - 2. * (y * y + z * z),
        2. * (x * y - w * z),
        2. * (x * z + w * y),
        2. * (x * y + w * z),
        1. - 2. * (x * x + z * z),
        2. * (y * z - w * x),
        2. * (x * z - w * y),
        2. * (y * z + w * x),
        1. - 2. * (x * x + y * y),
    )
}

/// [`direction_cosines`] over a batch of quaternions, one matrix per quaternion.
pub fn direction_cosines_batch(quats: &[Quaternion<f64>]) -> Vec<Matrix3<f64>> {
    quats.iter().map(direction_cosines).collect()
}
