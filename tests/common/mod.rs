#![allow(dead_code)]

use approx::assert_relative_eq;
use gbm_poshist::{attitude::fermi_quaternion, pointing::DetectorPointingMap};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

pub const POSHIST_SAMPLE: &str = "tests/data/poshist_sample.csv";

/// Unit quaternion for a rotation of `angle` radians about `axis`.
pub fn rotation(axis: Vector3<f64>, angle: f64) -> Quaternion<f64> {
    let axis = axis.normalize();
    let half = 0.5 * angle;
    fermi_quaternion(
        axis.x * half.sin(),
        axis.y * half.sin(),
        axis.z * half.sin(),
        half.cos(),
    )
}

/// Normalize an arbitrary (non-null) quaternion given in Fermi order.
pub fn unit_fermi_quaternion(qsj: [f64; 4]) -> Quaternion<f64> {
    UnitQuaternion::from_quaternion(fermi_quaternion(qsj[0], qsj[1], qsj[2], qsj[3])).into_inner()
}

/// Angular distance (degrees) between two sky positions given in degrees.
///
/// Vincenty form, accurate for both tiny and near-antipodal separations.
pub fn angular_separation(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let (dec1, dec2) = (dec1.to_radians(), dec2.to_radians());
    let dra = (ra2 - ra1).to_radians();

    let num = ((dec2.cos() * dra.sin()).powi(2)
        + (dec1.cos() * dec2.sin() - dec1.sin() * dec2.cos() * dra.cos()).powi(2))
    .sqrt();
    let den = dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * dra.cos();
    num.atan2(den).to_degrees()
}

/// Angle (degrees) between two vectors.
pub fn vector_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b)).to_degrees()
}

pub fn assert_pointings_close(
    actual: &DetectorPointingMap,
    expected: &DetectorPointingMap,
    epsilon: f64,
) {
    assert_eq!(actual.len(), expected.len());
    for (code, p) in actual {
        let e = &expected[code];
        assert_eq!(p.index, e.index, "detector {code}");
        assert_relative_eq!(
            angular_separation(p.ra, p.dec, e.ra, e.dec),
            0.0,
            epsilon = epsilon
        );
    }
}
