// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-day almanac figures: moon age, lunar phase and the solar term that
//! begins on a day.

use qtty::Days;

use crate::civil::CivilDate;
use crate::config::Reckoning;
use crate::instant::Time;
use crate::lunisolar::{reconstruct, OldCalendarDate};
use crate::scales::Civil;
use crate::series::{moon_longitude, normalize_angle, sun_longitude};
use crate::solver::{find_new_moon, TermSpacing};
use crate::time_argument::TimeArgument;

/// Number of named phases in a lunation.
pub const PHASE_STEPS: u32 = 28;

const NOON: Days = Days::new(0.5);
const ONE_DAY: Days = Days::new(1.0);

/// Sun and Moon longitudes (°) at `instant`.
pub fn longitudes<const M: i32>(instant: Time<Civil<M>>, reckoning: &Reckoning) -> (f64, f64) {
    let t = TimeArgument::from_civil(instant, reckoning.convention(), reckoning.delta_t, reckoning.dut1);
    (
        sun_longitude(reckoning.edition, &t),
        moon_longitude(reckoning.edition, &t),
    )
}

/// Days elapsed at `instant` since the preceding new moon.
pub fn moon_age<const M: i32>(instant: Time<Civil<M>>, reckoning: &Reckoning) -> Days {
    let new_moon = find_new_moon(instant, reckoning);
    if !new_moon.is_converged() {
        log::warn!("moon age at {instant} uses an unconverged new moon");
    }
    instant - new_moon.instant
}

/// Moon age at local noon of the day holding `day`.
pub fn moon_age_at_noon<const M: i32>(day: Time<Civil<M>>, reckoning: &Reckoning) -> Days {
    moon_age(day.start_of_day() + NOON, reckoning)
}

/// Elongation of the Moon and its index on a 28-step phase wheel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MoonPhase {
    /// Moon minus Sun longitude, `[0, 360)`.
    pub elongation: f64,
    /// 0 = new, 7 = first quarter, 14 = full, 21 = last quarter.
    pub index: u32,
}

pub fn moon_phase<const M: i32>(instant: Time<Civil<M>>, reckoning: &Reckoning) -> MoonPhase {
    let (sun, moon) = longitudes(instant, reckoning);
    let elongation = normalize_angle(moon - sun);
    let index = (elongation / 360.0 * PHASE_STEPS as f64).round() as u32 % PHASE_STEPS;
    MoonPhase { elongation, index }
}

/// Solar longitude of the 15° term that begins during the local day holding
/// `day`, if any.
pub fn solar_term_on<const M: i32>(day: Time<Civil<M>>, reckoning: &Reckoning) -> Option<f64> {
    let step = TermSpacing::Term.degrees();
    let grid = |instant: Time<Civil<M>>| (longitudes(instant, reckoning).0 / step).trunc() * step;

    let midnight = day.start_of_day();
    let today = grid(midnight);
    let tomorrow = grid(midnight + ONE_DAY);
    (today != tomorrow).then_some(tomorrow)
}

/// Everything the almanac prints for one day.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DayAlmanac {
    pub date: CivilDate,
    /// Sun longitude at local midnight (°).
    pub sun_longitude: f64,
    /// Moon longitude at local midnight (°).
    pub moon_longitude: f64,
    pub moon_age: Days,
    pub phase: MoonPhase,
    pub old_date: OldCalendarDate,
    pub solar_term: Option<f64>,
}

impl DayAlmanac {
    /// Figures for the local day holding `day`.
    ///
    /// `calendar` drives the old-date reconstruction; `ephemeris` drives
    /// the longitudes, moon age, phase and solar term.
    pub fn compute<const M: i32>(
        day: Time<Civil<M>>,
        calendar: &Reckoning,
        ephemeris: &Reckoning,
    ) -> Self {
        let midnight = day.start_of_day();
        let (sun_longitude, moon_longitude) = longitudes(midnight, ephemeris);
        Self {
            date: midnight.date(),
            sun_longitude,
            moon_longitude,
            moon_age: moon_age_at_noon(midnight, ephemeris),
            phase: moon_phase(midnight + NOON, ephemeris),
            old_date: reconstruct(midnight, calendar),
            solar_term: solar_term_on(midnight, ephemeris),
        }
    }

    /// [`compute`](Self::compute) with the traditional calendar reckoning and
    /// the [`almanac`](Reckoning::almanac) ephemeris.
    pub fn for_day<const M: i32>(day: Time<Civil<M>>) -> Self {
        Self::compute(day, &Reckoning::default(), &Reckoning::almanac())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::CivilDateTime;
    use crate::scales::Jst;

    fn day(y: i32, m: u32, d: u32) -> Time<Jst> {
        Time::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn age_on_new_moon_day() {
        for reckoning in [Reckoning::default(), Reckoning::almanac()] {
            let age = moon_age_at_noon(day(2023, 1, 22), &reckoning).value();
            assert!((0.2..0.3).contains(&age), "age {age}");
        }
    }

    #[test]
    fn age_grows_by_a_day() {
        let r = Reckoning::almanac();
        let a = moon_age_at_noon(day(2023, 1, 30), &r);
        let b = moon_age_at_noon(day(2023, 1, 31), &r);
        assert!(((b - a).value() - 1.0).abs() < 2e-5);
    }

    #[test]
    fn phase_near_new_moon() {
        let noon = Time::<Jst>::from_civil(&CivilDateTime::new(2023, 1, 22, 12, 0, 0.0).unwrap());
        let phase = moon_phase(noon, &Reckoning::default());
        assert_eq!(phase.index, 0);
        assert!(phase.elongation > 2.0 && phase.elongation < 6.0);
    }

    #[test]
    fn phase_near_full_moon() {
        // Full moon 2023-02-06 03:28 JST.
        let phase = moon_phase(day(2023, 2, 6), &Reckoning::almanac());
        assert_eq!(phase.index, 14);
    }

    #[test]
    fn equinox_day_starts_a_term() {
        let r = Reckoning::default();
        assert_eq!(solar_term_on(day(2023, 3, 21), &r), Some(0.0));
        assert_eq!(solar_term_on(day(2023, 3, 20), &r), None);
        assert_eq!(solar_term_on(day(2023, 2, 4), &r), Some(315.0));
    }

    #[test]
    fn almanac_for_leap_month_start() {
        let almanac = DayAlmanac::for_day(day(2023, 3, 22));
        assert_eq!(almanac.date.to_string(), "2023-03-22");
        assert!(almanac.old_date.leap);
        assert_eq!((almanac.old_date.month, almanac.old_date.day), (2, 1));
        assert!(almanac.moon_age.value() < 1.0);
        assert_eq!(almanac.solar_term, None);
        assert!((0.0..360.0).contains(&almanac.sun_longitude));
    }
}
