//! # gbm-poshist
//!
//! Sky pointing of the Fermi Gamma-ray Burst Monitor (GBM) detectors from the spacecraft
//! attitude history (POSHIST).
//!
//! The crate turns spacecraft-frame directions (azimuth, zenith) into J2000 right ascension and
//! declination using the attitude quaternions, resolves the fourteen GBM detector boresights,
//! interpolates the attitude at arbitrary mission elapsed times, and bins event times into count
//! rates.
//!
//! ## Modules
//!
//! * [`attitude`] – Fermi quaternion layout and direction cosine matrices.
//! * [`conversion`] – Spherical ↔ Cartesian conversions.
//! * [`ref_system`] – Spacecraft frame → J2000 RA/Dec, with batch broadcasting.
//! * [`detectors`] – The fixed GBM detector catalog.
//! * [`pointing`] – Detector and spacecraft pointing on the sky.
//! * [`poshist`] – Attitude history rows, CSV ingestion and interpolation.
//! * [`lightcurve`] – Count rates from event times.
//! * [`gbm`] – Configured façade over the above.
//!
//! ## Quick start
//!
//! ```rust
//! use gbm_poshist::{batch::Batch, constants::AngleUnit, pointing::detector_radec};
//! use nalgebra::Quaternion;
//!
//! let (ra, dec) = detector_radec("b1", &Batch::Scalar(Quaternion::identity()), AngleUnit::Degrees)
//!     .unwrap();
//! assert!((ra.as_scalar().unwrap() - 180.0).abs() < 1e-9);
//! assert!(dec.as_scalar().unwrap().abs() < 1e-9);
//! ```

pub mod attitude;
pub mod batch;
pub mod constants;
pub mod conversion;
pub mod detectors;
pub mod gbm;
pub mod lightcurve;
pub mod pointing;
pub mod poshist;
pub mod poshist_errors;
pub mod ref_system;
pub mod time;

pub use gbm::{GbmPointing, PointingConfig};
pub use poshist_errors::PoshistError;
