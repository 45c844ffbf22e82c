// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for boundary validation.
//!
//! Numerical routines never fail: a solver that does not converge reports it
//! through [`SolverState`](crate::SolverState) instead. Errors only arise
//! when raw user input (a civil date, a solar-term spacing, a Julian Day)
//! is turned into one of the crate's validated types.

use thiserror::Error;

/// Validation failures raised when building inputs for the calendar core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KoyomiError {
    /// The civil date does not exist in the proleptic Gregorian calendar.
    #[error("invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        message: String,
    },

    /// Hour, minute or second outside its range.
    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// Solar-term boundaries are only solved on 15°, 30° or 90° grids.
    #[error("unsupported solar-term spacing {0}°; expected 15, 30 or 90")]
    UnsupportedSpacing(u32),

    /// A Julian Day that is NaN or infinite.
    #[error("Julian Day {0} is not finite")]
    NonFiniteJulianDay(f64),
}

/// Convenience alias for `Result<T, KoyomiError>`.
pub type Result<T> = std::result::Result<T, KoyomiError>;

impl KoyomiError {
    /// Creates an [`InvalidDate`](Self::InvalidDate) error.
    pub fn invalid_date(year: i32, month: u32, day: u32, reason: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: reason.to_string(),
        }
    }
}
