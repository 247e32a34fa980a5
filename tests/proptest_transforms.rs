//! Property-based tests for the frame transforms.
//!
//! Run with: cargo test --test proptest_transforms

use approx::assert_relative_eq;
use gbm_poshist::{
    attitude::direction_cosines,
    batch::Batch,
    constants::AngleUnit,
    conversion::azzen_to_cartesian,
    detectors::DETECTORS,
    pointing::all_detectors_radec,
    ref_system::spacecraft_to_radec,
    PoshistError,
};
use nalgebra::{Matrix3, Quaternion, Vector3};
use proptest::prelude::*;

mod common;
use common::{angular_separation, unit_fermi_quaternion, vector_angle};

// =============================================================================
// Strategies
// =============================================================================

/// A random unit attitude quaternion.
fn arb_attitude() -> impl Strategy<Value = Quaternion<f64>> {
    prop::array::uniform4(-1.0..1.0f64)
        .prop_filter("quaternion too close to zero", |q| {
            q.iter().map(|c| c * c).sum::<f64>() > 1e-2
        })
        .prop_map(unit_fermi_quaternion)
}

/// A random body-frame direction (degrees).
fn arb_azzen() -> impl Strategy<Value = (f64, f64)> {
    (0.0..360.0f64, 0.0..=180.0f64)
}

fn sky_vector(ra: f64, dec: f64) -> Vector3<f64> {
    let (ra, dec) = (ra.to_radians(), dec.to_radians());
    Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn dcm_is_a_rotation(q in arb_attitude()) {
        let dcm = direction_cosines(&q);
        assert_relative_eq!(dcm * dcm.transpose(), Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(dcm.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn opposite_quaternions_agree(q in arb_attitude()) {
        assert_relative_eq!(direction_cosines(&q), direction_cosines(&-q), epsilon = 1e-15);
    }

    #[test]
    fn radec_in_range((az, zen) in arb_azzen(), q in arb_attitude()) {
        let (ra, dec) = spacecraft_to_radec(&az.into(), &zen.into(), &q.into(), AngleUnit::Degrees)
            .unwrap();
        let (ra, dec) = (*ra.as_scalar().unwrap(), *dec.as_scalar().unwrap());
        prop_assert!((0.0..360.0).contains(&ra), "ra = {}", ra);
        prop_assert!((-90.0..=90.0).contains(&dec), "dec = {}", dec);
    }

    #[test]
    fn radec_matches_rotated_vector((az, zen) in arb_azzen(), q in arb_attitude()) {
        let (ra, dec) = spacecraft_to_radec(&az.into(), &zen.into(), &q.into(), AngleUnit::Degrees)
            .unwrap();
        let expected = direction_cosines(&q) * azzen_to_cartesian(az, zen, AngleUnit::Degrees);
        let actual = sky_vector(*ra.as_scalar().unwrap(), *dec.as_scalar().unwrap());
        // near a pole the right ascension is pinned to zero
        assert_relative_eq!(actual, expected, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn radians_and_degrees_agree((az, zen) in arb_azzen(), q in arb_attitude()) {
        let (ra_deg, dec_deg) =
            spacecraft_to_radec(&az.into(), &zen.into(), &q.into(), AngleUnit::Degrees).unwrap();
        let (ra_rad, dec_rad) = spacecraft_to_radec(
            &az.to_radians().into(),
            &zen.to_radians().into(),
            &q.into(),
            AngleUnit::Radians,
        )
        .unwrap();
        let sep = angular_separation(
            *ra_deg.as_scalar().unwrap(),
            *dec_deg.as_scalar().unwrap(),
            ra_rad.as_scalar().unwrap().to_degrees(),
            dec_rad.as_scalar().unwrap().to_degrees(),
        );
        prop_assert!(sep < 1e-8, "separation = {}", sep);
    }

    #[test]
    fn rotation_preserves_detector_separations(q in arb_attitude()) {
        let map = all_detectors_radec(&q, AngleUnit::Degrees).unwrap();
        for a in DETECTORS.iter() {
            for b in DETECTORS.iter().filter(|b| b.index > a.index) {
                let body = vector_angle(&a.boresight(), &b.boresight());
                let (pa, pb) = (map[a.code], map[b.code]);
                let sky = angular_separation(pa.ra, pa.dec, pb.ra, pb.dec);
                prop_assert!((body - sky).abs() < 1e-8, "{} / {}: {} vs {}", a, b, body, sky);
            }
        }
    }

    #[test]
    fn broadcast_sizes(p in 0usize..6, n in 0usize..6) {
        let az: Batch<f64> = Batch::Many(vec![10.0; p]);
        let quats: Batch<Quaternion<f64>> = Batch::Many(vec![Quaternion::identity(); n]);

        match spacecraft_to_radec(&az, &45.0.into(), &quats, AngleUnit::Degrees) {
            Ok((ra, dec)) => {
                prop_assert!(p == n || p == 1 || n == 1);
                let expected = if p == 1 { n } else { p };
                prop_assert_eq!(ra.len(), expected);
                prop_assert_eq!(dec.len(), expected);
                prop_assert_eq!(ra.is_scalar(), expected == 1);
            }
            Err(err) => {
                prop_assert!(p != n && p != 1 && n != 1);
                prop_assert_eq!(
                    err,
                    PoshistError::BatchSizeMismatch { positions: p, quaternions: n }
                );
            }
        }
    }
}
