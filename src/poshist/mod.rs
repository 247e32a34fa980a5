//! # POSHIST attitude history
//!
//! In-memory attitude tables ([`attitude_history`]) and their interpolation to arbitrary query
//! times ([`interpolation`]).

pub mod attitude_history;
pub mod interpolation;
