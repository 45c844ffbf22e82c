// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Longitude series for the Sun and the Moon
//!
//! Truncated periodic series giving apparent ecliptic longitudes in degrees,
//! precise to a few hundredths of a degree between ≈1800 and ≈2100. Two
//! coefficient editions are shipped:
//!
//! | Edition | Argument | Form |
//! |---------|----------|------|
//! | [`SeriesEdition::CenturyCosine`] | Julian centuries | `A cos(rate·t + phase)` |
//! | [`SeriesEdition::YearSine`] | Julian years | `A sin(phase + rate·y)` |
//!
//! Every public entry point takes a [`TimeArgument`] and reads it in the
//! edition's own [`Convention`].

mod moon;
mod sun;

use crate::time_argument::{Convention, TimeArgument};

/// Reduce an angle in degrees to `[0, 360)`.
///
/// Negative inputs and exact multiples of 360 are handled; a remainder that
/// rounds up to 360 maps to 0.
#[inline]
pub fn normalize_angle(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// One periodic term: amplitude (°), rate (° per argument unit), phase (°).
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Term {
    pub(crate) amplitude: f64,
    pub(crate) rate: f64,
    pub(crate) phase: f64,
}

impl Term {
    pub(crate) const fn new(amplitude: f64, rate: f64, phase: f64) -> Self {
        Self {
            amplitude,
            rate,
            phase,
        }
    }

    #[inline]
    fn angle(&self, x: f64) -> f64 {
        normalize_angle(self.rate * x + self.phase).to_radians()
    }

    #[inline]
    pub(crate) fn cosine(&self, x: f64) -> f64 {
        self.amplitude * self.angle(x).cos()
    }

    #[inline]
    pub(crate) fn sine(&self, x: f64) -> f64 {
        self.amplitude * self.angle(x).sin()
    }
}

/// Coefficient table selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeriesEdition {
    /// Cosine series in Julian centuries; used by the calendar reckoning.
    #[default]
    CenturyCosine,
    /// Sine series in Julian years, with a decaying solar equation of
    /// centre and a perturbed lunar one.
    YearSine,
}

impl SeriesEdition {
    /// The argument unit this edition is tabulated in.
    pub const fn convention(self) -> Convention {
        match self {
            SeriesEdition::CenturyCosine => Convention::JulianCenturies,
            SeriesEdition::YearSine => Convention::JulianYears,
        }
    }
}

/// Apparent ecliptic longitude of the Sun in degrees, `[0, 360)`.
pub fn sun_longitude(edition: SeriesEdition, t: &TimeArgument) -> f64 {
    let x = t.value_in(edition.convention());
    match edition {
        SeriesEdition::CenturyCosine => sun::cosine_series(x),
        SeriesEdition::YearSine => sun::sine_series(x),
    }
}

/// Apparent ecliptic longitude of the Moon in degrees, `[0, 360)`.
pub fn moon_longitude(edition: SeriesEdition, t: &TimeArgument) -> f64 {
    let x = t.value_in(edition.convention());
    match edition {
        SeriesEdition::CenturyCosine => moon::cosine_series(x),
        SeriesEdition::YearSine => moon::sine_series(x),
    }
}
