//! # Attitude time series
//!
//! An [`AttitudeHistory`] is the in-memory form of the POSHIST attitude table: one
//! [`AttitudeSample`] per row, holding a timestamp (Fermi MET seconds) and the four quaternion
//! columns `QSJ_1 … QSJ_4` in Fermi order (x, y, z, w).
//!
//! Rows may arrive unsorted and individual components may be missing (`NaN`); both are dealt
//! with by the [interpolator](crate::poshist::interpolation), not here.
//!
//! ## Ingestion
//!
//! The FITS-to-table step lives outside this crate. Its tabular output can be handed over
//! either as Rust values ([`AttitudeHistory::new`], [`AttitudeHistory::from_quaternions`]) or
//! as CSV text with [`AttitudeHistory::from_csv_reader`]:
//!
//! ```text
//! Time,QSJ_1,QSJ_2,QSJ_3,QSJ_4
//! 500000000.0,0.1,0.2,0.3,0.927
//! ```
//!
//! `TSTART` is accepted in place of `Time`, additional columns are ignored and empty cells are
//! read as missing components.

use std::io::Read;

use itertools::Itertools;
use nalgebra::Quaternion;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    attitude::{fermi_components, fermi_quaternion},
    constants::Met,
    lightcurve::linspace,
    poshist_errors::PoshistError,
};

/// One row of the attitude table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeSample {
    pub time: Met,
    /// `QSJ_1 … QSJ_4`, i.e. (x, y, z, w)
    pub qsj: [f64; 4],
}

impl AttitudeSample {
    pub fn new(time: Met, qsj: [f64; 4]) -> Self {
        AttitudeSample { time, qsj }
    }

    pub fn from_quaternion(time: Met, quat: &Quaternion<f64>) -> Self {
        AttitudeSample {
            time,
            qsj: fermi_components(quat),
        }
    }

    pub fn quaternion(&self) -> Quaternion<f64> {
        let [q1, q2, q3, q4] = self.qsj;
        fermi_quaternion(q1, q2, q3, q4)
    }

    /// `true` when none of the four components is missing.
    pub fn is_complete(&self) -> bool {
        self.qsj.iter().all(|q| !q.is_nan())
    }
}

/// Ordered collection of attitude samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttitudeHistory {
    samples: Vec<AttitudeSample>,
}

#[derive(Debug, Deserialize)]
struct CsvAttitudeRow {
    #[serde(rename = "Time", alias = "TSTART", deserialize_with = "csv::invalid_option")]
    time: Option<f64>,
    #[serde(rename = "QSJ_1", deserialize_with = "csv::invalid_option")]
    q1: Option<f64>,
    #[serde(rename = "QSJ_2", deserialize_with = "csv::invalid_option")]
    q2: Option<f64>,
    #[serde(rename = "QSJ_3", deserialize_with = "csv::invalid_option")]
    q3: Option<f64>,
    #[serde(rename = "QSJ_4", deserialize_with = "csv::invalid_option")]
    q4: Option<f64>,
}

impl AttitudeHistory {
    pub fn new(samples: Vec<AttitudeSample>) -> Self {
        AttitudeHistory { samples }
    }

    /// Build a history from parallel timestamp and quaternion slices.
    ///
    /// Extra elements of the longer slice are ignored.
    pub fn from_quaternions(times: &[Met], quats: &[Quaternion<f64>]) -> Self {
        let samples = times
            .iter()
            .zip(quats)
            .map(|(&t, q)| AttitudeSample::from_quaternion(t, q))
            .collect();
        AttitudeHistory { samples }
    }

    /// Read a history from CSV text.
    ///
    /// Arguments
    /// ---------
    /// * `reader`: CSV source with a header row containing `Time` (or `TSTART`) and
    ///   `QSJ_1 … QSJ_4`.
    ///
    /// Return
    /// ----------
    /// * The history in file order. Rows whose time cannot be read are skipped; unreadable
    ///   quaternion cells become `NaN`. Malformed CSV (e.g. a missing header) is reported as
    ///   [`PoshistError::CsvError`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PoshistError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        let mut skipped = 0usize;
        for row in csv_reader.deserialize::<CsvAttitudeRow>() {
            let row = row?;
            let Some(time) = row.time else {
                skipped += 1;
                continue;
            };
            let component = |q: Option<f64>| q.unwrap_or(f64::NAN);
            samples.push(AttitudeSample::new(
                time,
                [
                    component(row.q1),
                    component(row.q2),
                    component(row.q3),
                    component(row.q4),
                ],
            ));
        }

        if skipped > 0 {
            warn!(skipped, "Skipped attitude rows without a readable time");
        }
        debug!(rows = samples.len(), "Read attitude table");

        Ok(AttitudeHistory { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn push(&mut self, sample: AttitudeSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[AttitudeSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttitudeSample> {
        self.samples.iter()
    }

    pub fn times(&self) -> Vec<Met> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn quaternions(&self) -> Vec<Quaternion<f64>> {
        self.samples.iter().map(AttitudeSample::quaternion).collect()
    }

    /// `true` if the timestamps are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.samples
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.time.total_cmp(&b.time).is_le())
    }

    /// Copy of the history sorted by ascending time.
    ///
    /// The sort is stable, so rows sharing a timestamp keep their relative order. `NaN`
    /// timestamps sort last.
    pub fn sorted(&self) -> AttitudeHistory {
        let mut samples = self.samples.clone();
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        AttitudeHistory { samples }
    }

    /// Keep at most `sample_size` evenly spaced rows.
    ///
    /// Row indices are `floor(i · (len − 1) / (n − 1))` for `i` in `0..n`, with
    /// `n = min(sample_size, len)`: the first and the last rows are always kept.
    ///
    /// Return
    /// ----------
    /// * The decimated history, or [`PoshistError::InvalidSampleSize`] when `sample_size` is 0.
    pub fn decimate(&self, sample_size: usize) -> Result<AttitudeHistory, PoshistError> {
        if sample_size == 0 {
            return Err(PoshistError::InvalidSampleSize(sample_size));
        }

        let len = self.samples.len();
        let n = sample_size.min(len);
        let samples = match n {
            0 => Vec::new(),
            // linspace ends exactly on `len - 1`
            _ => linspace(0.0, (len - 1) as f64, n)
                .into_iter()
                .map(|idx| self.samples[(idx as usize).min(len - 1)])
                .collect(),
        };

        Ok(AttitudeHistory { samples })
    }
}

impl FromIterator<AttitudeSample> for AttitudeHistory {
    fn from_iter<I: IntoIterator<Item = AttitudeSample>>(iter: I) -> Self {
        AttitudeHistory {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttitudeHistory {
    type Item = &'a AttitudeSample;
    type IntoIter = std::slice::Iter<'a, AttitudeSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
