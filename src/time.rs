//! # Fermi mission elapsed time
//!
//! POSHIST rows (and GBM event lists) are stamped with the Fermi mission elapsed time (MET):
//! SI seconds elapsed since 2001-01-01T00:00:00 UTC. These helpers move between MET and
//! [`hifitime::Epoch`].

use hifitime::{Duration, Epoch};

use crate::constants::{Met, FERMI_MET_EPOCH_MJD, MJD};

/// The MET origin, 2001-01-01T00:00:00 UTC.
pub fn fermi_met_epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2001, 1, 1)
}

/// Transformation from Fermi MET to an epoch
///
/// Argument
/// --------
/// * `met`: seconds since the MET origin
///
/// Return
/// ------
/// * the corresponding epoch
pub fn met_to_epoch(met: Met) -> Epoch {
    fermi_met_epoch() + Duration::from_seconds(met)
}

/// Transformation from an epoch to Fermi MET
pub fn epoch_to_met(epoch: Epoch) -> Met {
    (epoch - fermi_met_epoch()).to_seconds()
}

/// Transformation from Fermi MET to modified julian date (MJD) in the UTC frame
///
/// Argument
/// --------
/// * `met`: a slice of MET values
///
/// Return
/// ------
/// * a vector of MJD (UTC)
pub fn met_to_mjd(met: &[Met]) -> Vec<MJD> {
    met.iter().map(|&t| met_to_epoch(t).to_mjd_utc_days()).collect()
}

/// Approximate MET → MJD conversion ignoring leap seconds.
///
/// Cheap enough for plotting axes; use [`met_to_mjd`] when seconds matter.
pub fn met_to_mjd_approx(met: Met) -> MJD {
    FERMI_MET_EPOCH_MJD + met / crate::constants::SECONDS_PER_DAY
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_met_origin() {
        assert_relative_eq!(
            met_to_epoch(0.0).to_mjd_utc_days(),
            FERMI_MET_EPOCH_MJD,
            epsilon = 1e-9
        );
        assert_relative_eq!(epoch_to_met(fermi_met_epoch()), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_met_one_day() {
        // no leap second during 2001
        let mjd = met_to_mjd(&[86_400.0, 43_200.0]);
        assert_relative_eq!(mjd[0], 51911.0, epsilon = 1e-9);
        assert_relative_eq!(mjd[1], 51910.5, epsilon = 1e-9);
        assert_relative_eq!(met_to_mjd_approx(86_400.0), 51911.0);
    }

    #[test]
    fn test_round_trip() {
        let met = 500_000_123.25;
        assert_relative_eq!(epoch_to_met(met_to_epoch(met)), met, epsilon = 1e-6);
    }
}
