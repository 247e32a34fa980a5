//! # Attitude interpolation at arbitrary times
//!
//! POSHIST attitudes are sampled on the spacecraft clock, while the quantities of interest
//! (trigger times, event times) fall anywhere in between. [`interpolate_attitude`] produces one
//! attitude per query time in three steps:
//!
//! 1. sort the history by time ([`AttitudeHistory::sorted`]);
//! 2. fill missing components ([`densify`]): linear in time between known values, nearest known
//!    value before the first and after the last one;
//! 3. look each query up with a leftmost binary search and emit a row according to the
//!    [`InterpolationMethod`].
//!
//! Queries past the last sample are not errors: they produce an [`InterpolatedAttitude`] whose
//! four components are `NaN`.

use nalgebra::Quaternion;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    attitude::{fermi_components, fermi_quaternion},
    constants::Met,
    poshist::attitude_history::{AttitudeHistory, AttitudeSample},
};

/// How a query time is turned into an attitude once the bracketing samples are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Take the first sample at or after the query time.
    #[default]
    NextSample,
    /// Normalized linear interpolation between the samples before and after the query time.
    Linear,
}

/// Attitude estimated at one query time, components in Fermi order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedAttitude {
    pub time: Met,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
}

impl InterpolatedAttitude {
    fn from_components(time: Met, [q1, q2, q3, q4]: [f64; 4]) -> Self {
        InterpolatedAttitude {
            time,
            q1,
            q2,
            q3,
            q4,
        }
    }

    /// Out-of-range marker: every component is `NaN`.
    pub fn undefined(time: Met) -> Self {
        Self::from_components(time, [f64::NAN; 4])
    }

    pub fn components(&self) -> [f64; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }

    /// `true` when no component is `NaN`.
    pub fn is_defined(&self) -> bool {
        self.components().iter().all(|q| !q.is_nan())
    }

    /// The attitude as a quaternion, or `None` if any component is missing.
    pub fn quaternion(&self) -> Option<Quaternion<f64>> {
        self.is_defined()
            .then(|| fermi_quaternion(self.q1, self.q2, self.q3, self.q4))
    }
}

/// Sort a history and fill its missing quaternion components.
///
/// For each of the four components independently, a `NaN` lying between two known values is
/// replaced by the linear interpolation of those values against time; a `NaN` before the first
/// known value takes that value, and one after the last known value takes that value. A component
/// that is never known stays `NaN`.
///
/// Return
/// ----------
/// * A new, time-sorted history with the same number of rows.
pub fn densify(history: &AttitudeHistory) -> AttitudeHistory {
    let sorted = history.sorted();
    let times = sorted.times();
    let mut rows: Vec<[f64; 4]> = sorted.iter().map(|s| s.qsj).collect();

    let mut filled = 0usize;
    for col in 0..4 {
        let known: Vec<usize> = (0..rows.len())
            .filter(|&i| !rows[i][col].is_nan())
            .collect();
        let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
            continue;
        };

        let mut next_known = 0usize;
        for i in 0..rows.len() {
            if !rows[i][col].is_nan() {
                continue;
            }
            filled += 1;

            rows[i][col] = if i < first {
                rows[first][col]
            } else if i > last {
                rows[last][col]
            } else {
                while known[next_known] < i {
                    next_known += 1;
                }
                let (a, b) = (known[next_known - 1], known[next_known]);
                lerp_at(times[a], rows[a][col], times[b], rows[b][col], times[i])
            };
        }
    }

    if filled > 0 {
        debug!(filled, rows = rows.len(), "Filled missing attitude components");
    }

    times
        .into_iter()
        .zip(rows)
        .map(|(t, qsj)| AttitudeSample::new(t, qsj))
        .collect()
}

/// Estimate the attitude at each query time.
///
/// Arguments
/// ---------
/// * `history`: attitude samples, in any order.
/// * `query_times`: times to estimate, in any order.
/// * `method`: see [`InterpolationMethod`].
///
/// Return
/// ----------
/// * One [`InterpolatedAttitude`] per query, in query order. Queries after the last sample,
///   `NaN` queries, and every query on an empty history yield [`InterpolatedAttitude::undefined`].
///
/// Example
/// -----------------
/// ```rust
/// use gbm_poshist::poshist::{
///     attitude_history::{AttitudeHistory, AttitudeSample},
///     interpolation::{interpolate_attitude, InterpolationMethod},
/// };
///
/// let history = AttitudeHistory::new(vec![
///     AttitudeSample::new(20.0, [0.0, 0.0, 0.0, 1.0]),
///     AttitudeSample::new(10.0, [1.0, 0.0, 0.0, 0.0]),
/// ]);
///
/// let rows = interpolate_attitude(&history, &[10.0, 15.0, 25.0], InterpolationMethod::NextSample);
/// assert_eq!(rows[0].q1, 1.0);
/// assert_eq!(rows[1].q4, 1.0);
/// assert!(!rows[2].is_defined());
/// ```
pub fn interpolate_attitude(
    history: &AttitudeHistory,
    query_times: &[Met],
    method: InterpolationMethod,
) -> Vec<InterpolatedAttitude> {
    let dense = densify(history);
    let times = dense.times();
    let samples = dense.samples();

    debug!(
        samples = samples.len(),
        queries = query_times.len(),
        ?method,
        "Interpolating attitude"
    );

    let estimates: Vec<InterpolatedAttitude> = query_times
        .iter()
        .map(|&query| {
            if query.is_nan() {
                return InterpolatedAttitude::undefined(query);
            }

            let idx = times.partition_point(|&t| t < query);
            if idx >= samples.len() {
                return InterpolatedAttitude::undefined(query);
            }

            let components = match method {
                InterpolationMethod::NextSample => samples[idx].qsj,
                InterpolationMethod::Linear => {
                    if idx == 0 || times[idx] == query {
                        samples[idx].qsj
                    } else {
                        nlerp(&samples[idx - 1], &samples[idx], query)
                    }
                }
            };
            InterpolatedAttitude::from_components(query, components)
        })
        .collect();

    let out_of_range = estimates.iter().filter(|e| !e.is_defined()).count();
    if out_of_range > 0 {
        warn!(
            out_of_range,
            queries = query_times.len(),
            "Attitude undefined for some query times"
        );
    }

    estimates
}

#[inline]
fn lerp_at(t0: f64, v0: f64, t1: f64, v1: f64, t: f64) -> f64 {
    if t1 == t0 {
        return v0;
    }
    v0 + (v1 - v0) * (t - t0) / (t1 - t0)
}

/// Normalized linear interpolation between two attitude samples at time `t`.
///
/// The second quaternion is flipped into the hemisphere of the first (q and −q are the same
/// attitude) before interpolating.
fn nlerp(before: &AttitudeSample, after: &AttitudeSample, t: Met) -> [f64; 4] {
    let q0 = before.quaternion();
    let mut q1 = after.quaternion();
    if q0.dot(&q1) < 0.0 {
        q1 = -q1;
    }

    let s = if after.time == before.time {
        0.0
    } else {
        (t - before.time) / (after.time - before.time)
    };
    let q = q0.lerp(&q1, s);

    if q.norm() > 0.0 {
        fermi_components(&q.normalize())
    } else {
        fermi_components(&q)
    }
}

#[cfg(test)]
mod interpolation_test {
    use super::*;
    use approx::assert_relative_eq;

    fn z_rotation(time: f64, angle: f64) -> AttitudeSample {
        let half = angle / 2.0;
        AttitudeSample::new(time, [0.0, 0.0, half.sin(), half.cos()])
    }

    fn history() -> AttitudeHistory {
        AttitudeHistory::new(vec![
            z_rotation(30.0, 0.3),
            z_rotation(10.0, 0.1),
            z_rotation(20.0, 0.2),
        ])
    }

    #[test]
    fn test_exact_hit_returns_sample() {
        let rows = interpolate_attitude(&history(), &[20.0], InterpolationMethod::NextSample);
        assert_eq!(rows[0].components(), z_rotation(20.0, 0.2).qsj);
        assert_eq!(rows[0].time, 20.0);

        let rows = interpolate_attitude(&history(), &[20.0], InterpolationMethod::Linear);
        assert_eq!(rows[0].components(), z_rotation(20.0, 0.2).qsj);
    }

    #[test]
    fn test_next_sample_selection() {
        let rows = interpolate_attitude(
            &history(),
            &[12.0, 5.0, 29.9, 30.0],
            InterpolationMethod::NextSample,
        );
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].components(), z_rotation(20.0, 0.2).qsj);
        assert_eq!(rows[1].components(), z_rotation(10.0, 0.1).qsj);
        assert_eq!(rows[2].components(), z_rotation(30.0, 0.3).qsj);
        assert_eq!(rows[3].components(), z_rotation(30.0, 0.3).qsj);
        assert_eq!(
            rows.iter().map(|r| r.time).collect::<Vec<_>>(),
            vec![12.0, 5.0, 29.9, 30.0]
        );
    }

    #[test]
    fn test_beyond_last_is_undefined() {
        for method in [InterpolationMethod::NextSample, InterpolationMethod::Linear] {
            let rows = interpolate_attitude(&history(), &[30.5, f64::NAN], method);
            for row in rows {
                assert!(!row.is_defined());
                assert!(row.components().iter().all(|q| q.is_nan()));
                assert!(row.quaternion().is_none());
            }
        }
    }

    #[test]
    fn test_empty_history() {
        let rows = interpolate_attitude(
            &AttitudeHistory::default(),
            &[1.0, 2.0],
            InterpolationMethod::NextSample,
        );
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_defined()));
    }

    #[test]
    fn test_linear_interpolation() {
        let rows = interpolate_attitude(&history(), &[15.0, 0.0], InterpolationMethod::Linear);

        let q = rows[0].quaternion().unwrap();
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
        // nlerp of two close z rotations lands on the intermediate angle
        let angle = 2.0 * q.k.atan2(q.w);
        assert_relative_eq!(angle, 0.15, epsilon = 1e-6);

        // before the first sample, the first sample is used
        assert_eq!(rows[1].components(), z_rotation(10.0, 0.1).qsj);
    }

    #[test]
    fn test_linear_handles_hemisphere_flip() {
        let a = z_rotation(0.0, 0.2);
        let mut b = z_rotation(10.0, 0.4);
        b.qsj = b.qsj.map(|q| -q);
        let history = AttitudeHistory::new(vec![a, b]);

        let rows = interpolate_attitude(&history, &[5.0], InterpolationMethod::Linear);
        let q = rows[0].quaternion().unwrap();
        assert_relative_eq!(2.0 * q.k.atan2(q.w), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_densify_fills_gaps_and_edges() {
        let history = AttitudeHistory::new(vec![
            AttitudeSample::new(3.0, [f64::NAN, 0.3, 0.0, 1.0]),
            AttitudeSample::new(0.0, [f64::NAN, 0.0, 0.0, 1.0]),
            AttitudeSample::new(1.0, [0.2, f64::NAN, 0.0, 1.0]),
            AttitudeSample::new(2.0, [0.4, f64::NAN, f64::NAN, 1.0]),
            AttitudeSample::new(5.0, [0.8, 0.5, 0.0, f64::NAN]),
        ]);

        let dense = densify(&history);
        assert_eq!(dense.times(), vec![0.0, 1.0, 2.0, 3.0, 5.0]);

        let col = |c: usize| dense.iter().map(|s| s.qsj[c]).collect::<Vec<_>>();

        // leading gap back-filled, inner gap interpolated against time
        let q1 = col(0);
        assert_eq!(q1[0], 0.2);
        assert_relative_eq!(q1[3], 0.4 + (0.8 - 0.4) * (3.0 - 2.0) / (5.0 - 2.0));

        let q2 = col(1);
        assert_relative_eq!(q2[1], 0.1, epsilon = 1e-15);
        assert_relative_eq!(q2[2], 0.2, epsilon = 1e-15);

        assert_eq!(col(2)[2], 0.0);
        // trailing gap forward-filled
        assert_eq!(col(3)[4], 1.0);
    }

    #[test]
    fn test_densify_all_missing_column() {
        let history = AttitudeHistory::new(vec![
            AttitudeSample::new(0.0, [f64::NAN, 0.0, 0.0, 1.0]),
            AttitudeSample::new(1.0, [f64::NAN, 0.0, 0.0, 1.0]),
        ]);
        let dense = densify(&history);
        assert!(dense.iter().all(|s| s.qsj[0].is_nan()));
    }
}
