//! # Count rates from event times
//!
//! Time-tagged event (TTE) data is a list of photon arrival times. [`CountRate`] bins those
//! times on a regular grid and turns counts into rates, which is the numeric content of a GBM
//! light curve. Rendering is left to the caller.
//!
//! Binning follows the half-open convention `[e[i], e[i+1])` on `bins` linearly spaced edges
//! from the earliest to the latest event, which yields `bins − 1` rates. An event falling exactly
//! on the last edge (the latest event) lies outside every bin and is not counted.

use itertools::{Itertools, MinMaxResult};
use tracing::debug;

use crate::poshist_errors::PoshistError;

/// Binned count rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CountRate {
    /// Right edge of each bin
    pub bin_ends: Vec<f64>,
    /// Counts per unit time in each bin
    pub rates: Vec<f64>,
    /// Width of one bin
    pub bin_size: f64,
}

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        stop
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

impl CountRate {
    /// Bin event times into a count rate.
    ///
    /// Arguments
    /// ---------
    /// * `times`: event times, in any order. `NaN` values are ignored.
    /// * `bins`: number of bin edges (at least 2).
    ///
    /// Return
    /// ----------
    /// * The count rate, or
    ///   - [`PoshistError::InvalidBinCount`] when `bins < 2`,
    ///   - [`PoshistError::EmptyEventList`] when there is no event,
    ///   - [`PoshistError::DegenerateTimeSpan`] when all events share one time.
    pub fn from_event_times(times: &[f64], bins: usize) -> Result<Self, PoshistError> {
        if bins < 2 {
            return Err(PoshistError::InvalidBinCount(bins));
        }

        let (min, max) = match times
            .iter()
            .copied()
            .filter(|t| !t.is_nan())
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => return Err(PoshistError::EmptyEventList),
            MinMaxResult::OneElement(t) => (t, t),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        if max <= min {
            return Err(PoshistError::DegenerateTimeSpan);
        }

        let edges = linspace(min, max, bins);
        let bin_size = edges[1] - edges[0];

        let mut counts = vec![0usize; bins - 1];
        for &t in times.iter().filter(|t| !t.is_nan()) {
            // index of the first edge strictly greater than t
            let right = edges.partition_point(|&e| e <= t);
            if (1..bins).contains(&right) {
                counts[right - 1] += 1;
            }
        }

        debug!(
            events = times.len(),
            bins = bins - 1,
            bin_size,
            "Binned event times"
        );

        Ok(CountRate {
            bin_ends: edges[1..].to_vec(),
            rates: counts.iter().map(|&c| c as f64 / bin_size).collect(),
            bin_size,
        })
    }

    /// Mean rate over all bins, used as the background level of a light curve.
    pub fn baseline(&self) -> f64 {
        if self.rates.is_empty() {
            return f64::NAN;
        }
        self.rates.iter().sum::<f64>() / self.rates.len() as f64
    }

    /// Rates with the baseline removed.
    pub fn subtract_baseline(&self) -> Vec<f64> {
        let baseline = self.baseline();
        self.rates.iter().map(|r| r - baseline).collect()
    }

    /// Total number of counted events.
    pub fn total_counts(&self) -> f64 {
        self.rates.iter().sum::<f64>() * self.bin_size
    }
}

#[cfg(test)]
mod lightcurve_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_count_rate() {
        let times = [0.0, 0.5, 1.0, 1.2, 2.5, 3.9, 4.0];
        let rate = CountRate::from_event_times(&times, 5).unwrap();

        assert_eq!(rate.bin_ends, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(rate.bin_size, 1.0);
        // the event at the last edge is not counted
        assert_eq!(rate.rates, vec![2.0, 2.0, 1.0, 1.0]);
        assert_relative_eq!(rate.total_counts(), 6.0);
        assert_relative_eq!(rate.baseline(), 1.5);
        assert_eq!(rate.subtract_baseline(), vec![0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn test_count_rate_scales_with_bin_size() {
        let times: Vec<f64> = (0..=100).map(|i| i as f64 * 0.1).collect();
        let rate = CountRate::from_event_times(&times, 11).unwrap();
        assert_relative_eq!(rate.bin_size, 1.0, epsilon = 1e-12);
        assert_eq!(rate.rates.len(), 10);
        assert_relative_eq!(rate.total_counts(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_count_rate_errors() {
        assert_eq!(
            CountRate::from_event_times(&[0.0, 1.0], 1),
            Err(PoshistError::InvalidBinCount(1))
        );
        assert_eq!(
            CountRate::from_event_times(&[], 10),
            Err(PoshistError::EmptyEventList)
        );
        assert_eq!(
            CountRate::from_event_times(&[f64::NAN], 10),
            Err(PoshistError::EmptyEventList)
        );
        assert_eq!(
            CountRate::from_event_times(&[3.0, 3.0], 10),
            Err(PoshistError::DegenerateTimeSpan)
        );
    }
}
