// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunisolar calendar reckoning.
//!
//! This crate reconstructs dates of the traditional East-Asian lunisolar
//! calendar from first principles: truncated longitude series for the Sun
//! and the Moon, a fixed-point solver for new moons and solar terms, and
//! the month-numbering rules that turn those events into old-calendar dates.
//!
//! # Core types
//!
//! - [`Time<S>`]: generic instant parameterised by a [`TimeScale`] marker.
//! - [`CivilDate`] / [`CivilDateTime`]: validated Gregorian readings.
//! - [`TimeArgument`]: elapsed Julian centuries or years with provenance.
//! - [`Reckoning`]: ΔT model, series edition and solver limits.
//! - [`Solution`]: a solved event instant and how the search ended.
//! - [`OldCalendarDate`]: year, leap flag, month and day.
//! - [`Period<S>`]: a time interval, used for [`LunarMonth`] spans.
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date (TT) |
//! | [`UT`] | Universal Time (Earth rotation) |
//! | [`Civil<M>`](Civil) | Local midnight-based day count, `M` minutes east of UTC |
//! | [`Jst`] | Japan Standard Time, `Civil<540>` |
//!
//! # ΔT (Delta T)
//!
//! **ΔT = TT − UT** is applied by the [`UT`] scale and, according to
//! [`Reckoning::delta_t`], when civil instants are turned into
//! [`TimeArgument`]s. The raw value is available via [`delta_t_seconds`].
//!
//! # Example
//!
//! ```
//! use koyomi::{reconstruct, Jst, Reckoning, Time};
//!
//! let day = Time::<Jst>::from_ymd(2020, 5, 23).unwrap();
//! let date = reconstruct(day, &Reckoning::default());
//! assert!(date.leap);
//! assert_eq!((date.month, date.day), (4, 1));
//! ```

mod civil;
mod config;
mod delta_t;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
mod lunation;
mod lunisolar;
mod period;
pub(crate) mod scales;
mod series;
mod solver;
mod time_argument;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use civil::{
    days_in_month, gregorian_to_julian_day, is_leap_year, julian_day_to_gregorian, CivilDate,
    CivilDateTime,
};
pub use config::{Reckoning, SolverSettings};
pub use delta_t::{delta_t_seconds, delta_t_seconds_with_dut1, tai_minus_utc, DeltaTModel};
pub use error::{KoyomiError, Result};
pub use instant::{Time, TimeInstant, TimeScale};
pub use lunation::{
    longitudes, moon_age, moon_age_at_noon, moon_phase, solar_term_on, DayAlmanac, MoonPhase,
    PHASE_STEPS,
};
pub use lunisolar::{
    month_table, reconstruct, reconstruct_civil, LunarMonth, MonthRow, OldCalendarDate,
};
pub use period::{Interval, Period};
pub use scales::{Civil, Jst, JD, UT};
pub use series::{moon_longitude, normalize_angle, sun_longitude, SeriesEdition};
pub use solver::{
    find_new_moon, find_solar_term, iterate, Elongation, EventTarget, SolarTerm, Solution,
    SolverState, TermSpacing, WrapPolicy, SYNODIC_MONTH, TROPICAL_YEAR,
};
pub use time_argument::{Convention, TimeArgument};

/// Julian Date on the TT axis.
pub type JulianDate = Time<JD>;

/// Julian Day on the Earth-rotation axis.
pub type UniversalTime = Time<UT>;

/// Local day count in Japan Standard Time.
pub type JstDay = Time<Jst>;
