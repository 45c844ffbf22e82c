// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Elapsed time from J2000.0 as fed to the longitude series.
//!
//! A [`TimeArgument`] remembers how it was produced: the unit it counts in
//! ([`Convention`]) and the [`DeltaTModel`] that shifted the civil instant
//! onto the dynamical axis. The series read it back through
//! [`TimeArgument::value_in`], so a caller can never hand centuries to a
//! table that expects years without the conversion being spelled out.
//!
//! Civil instants are split into whole and fractional day before the epoch
//! is subtracted. The fraction carries the zone offset and ΔT, which keeps
//! sub-second resolution in the fraction near JD 2.4e6.

use qtty::{Centuries, Day, JulianYears, Seconds};

use crate::civil::CivilDate;
use crate::delta_t::DeltaTModel;
use crate::instant::Time;
use crate::scales::{Civil, JD};

/// Unit of a [`TimeArgument`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convention {
    /// Julian centuries of 36 525 days.
    JulianCenturies,
    /// Julian years of 365.25 days.
    JulianYears,
}

impl Convention {
    /// Length of one unit in days.
    pub const fn days_per_unit(self) -> f64 {
        match self {
            Convention::JulianCenturies => 36_525.0,
            Convention::JulianYears => 365.25,
        }
    }
}

/// Elapsed time from J2000.0 with provenance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeArgument {
    value: f64,
    convention: Convention,
    delta_t: Option<DeltaTModel>,
}

impl TimeArgument {
    /// Argument for a local civil instant.
    ///
    /// The integer day and the fraction (zone offset and ΔT applied) are
    /// divided separately and then summed.
    pub fn from_civil<const M: i32>(
        instant: Time<Civil<M>>,
        convention: Convention,
        delta_t: DeltaTModel,
        dut1: Seconds,
    ) -> Self {
        SplitDay::from_civil(instant).argument(convention, delta_t, dut1)
    }

    /// Argument for an instant already on the TT axis.
    pub fn from_tt(jd: Time<JD>, convention: Convention) -> Self {
        let value = match convention {
            Convention::JulianCenturies => jd.julian_centuries().value(),
            Convention::JulianYears => jd.julian_years().value(),
        };
        Self {
            value,
            convention,
            delta_t: None,
        }
    }

    /// Raw value in the argument's own unit.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub const fn convention(&self) -> Convention {
        self.convention
    }

    /// ΔT model applied, or `None` when built from a TT instant.
    #[inline]
    pub const fn delta_t(&self) -> Option<DeltaTModel> {
        self.delta_t
    }

    /// Value re-expressed in `convention`.
    #[inline]
    pub fn value_in(&self, convention: Convention) -> f64 {
        if convention == self.convention {
            self.value
        } else {
            self.value * self.convention.days_per_unit() / convention.days_per_unit()
        }
    }

    #[inline]
    pub fn centuries(&self) -> Centuries {
        Centuries::new(self.value_in(Convention::JulianCenturies))
    }

    #[inline]
    pub fn julian_years(&self) -> JulianYears {
        JulianYears::new(self.value_in(Convention::JulianYears))
    }

    /// The TT instant this argument stands for.
    pub fn to_julian_day(&self) -> Time<JD> {
        Time::<JD>::J2000 + qtty::Days::new(self.value * self.convention.days_per_unit())
    }
}

// ── Split day ─────────────────────────────────────────────────────────────

/// A civil instant held as a whole day plus a fraction on the UT axis.
///
/// `civil = whole + fraction + offset`. Corrections are subtracted from the
/// two parts separately and a negative fraction borrows one day from the
/// whole part, so `fraction` stays in `[0, 1)` once a step has been taken.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct SplitDay {
    whole: f64,
    fraction: f64,
}

impl SplitDay {
    pub(crate) fn from_civil<const M: i32>(instant: Time<Civil<M>>) -> Self {
        let whole = instant.value().trunc();
        Self {
            whole,
            fraction: instant.value() - whole - Civil::<M>::UTC_OFFSET.value(),
        }
    }

    /// Local midnight of `day`, taken as the start of a new estimate.
    pub(crate) fn at_day(day: f64) -> Self {
        Self {
            whole: day.trunc(),
            fraction: 0.0,
        }
    }

    pub(crate) fn to_civil<const M: i32>(self) -> Time<Civil<M>> {
        Time::new(self.fraction + self.whole + Civil::<M>::UTC_OFFSET.value())
    }

    /// Subtract a correction in days, split into whole and fractional parts.
    pub(crate) fn retreat(&mut self, days: f64) {
        let whole = days.trunc();
        self.whole -= whole;
        self.fraction -= days - whole;
        if self.fraction < 0.0 {
            self.fraction += 1.0;
            self.whole -= 1.0;
        }
    }

    pub(crate) fn argument(
        self,
        convention: Convention,
        delta_t: DeltaTModel,
        dut1: Seconds,
    ) -> TimeArgument {
        let date = CivilDate::from_day_number(self.whole as i64);
        let dt = delta_t.seconds(date, dut1).to::<Day>().value();
        let unit = convention.days_per_unit();
        let epoch = Time::<JD>::J2000.value();
        TimeArgument {
            value: (self.fraction + dt + 0.5) / unit + (self.whole - epoch) / unit,
            convention,
            delta_t: Some(delta_t),
        }
    }
}
