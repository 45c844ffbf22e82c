// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gregorian civil dates and their midnight-based day counts.
//!
//! The day count is Fliegel's: January and February are months 13 and 14 of
//! the previous year, and
//!
//! ```text
//! N = ⌊365.25 y⌋ + ⌊y/400⌋ − ⌊y/100⌋ + ⌊30.59 (m − 2)⌋ + d + 1 721 088
//! ```
//!
//! with every bracket truncating toward zero. `N` labels the whole local
//! day; the time of day is added as a fraction. The result sits half a day
//! behind the astronomical Julian Day of the same wall-clock instant in the
//! same zone, which is what [`Civil`] encodes.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{KoyomiError, Result};
use crate::instant::Time;
use crate::scales::Civil;

/// Fliegel's constant: the day count of 0000-03-01 minus one.
const FLIEGEL_EPOCH: i64 = 1_721_088;

/// Proleptic Gregorian leap-year rule.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or `None` for an invalid month.
pub const fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

// ── CivilDate ─────────────────────────────────────────────────────────────

/// A validated proleptic Gregorian date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    /// Validate and build a date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let last = days_in_month(year, month)
            .ok_or_else(|| KoyomiError::invalid_date(year, month, day, "month out of range"))?;
        if day == 0 || day > last {
            return Err(KoyomiError::invalid_date(
                year,
                month,
                day,
                "day out of range",
            ));
        }
        Ok(Self { year, month, day })
    }

    /// Build without validation; callers guarantee the fields are in range.
    pub(crate) const fn new_unchecked(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Fliegel day number of this date (the integer part of the day count).
    pub fn day_number(&self) -> i64 {
        let (y, m) = if self.month < 3 {
            (self.year as i64 - 1, self.month as i64 + 12)
        } else {
            (self.year as i64, self.month as i64)
        };
        // Integer division in Rust truncates toward zero, as the formula wants.
        1461 * y / 4 + y / 400 - y / 100
            + (30.59 * (m - 2) as f64).trunc() as i64
            + self.day as i64
            + FLIEGEL_EPOCH
    }

    /// Inverse of [`day_number`](Self::day_number).
    pub fn from_day_number(n: i64) -> Self {
        let x0 = (n + 68_570) as f64;
        let x1 = (x0 / 36_524.25).trunc();
        let x2 = x0 - (36_524.25 * x1 + 0.75).trunc();
        let x3 = ((x2 + 1.0) / 365.242_5).trunc();
        let x4 = x2 - (365.25 * x3).trunc() + 31.0;
        let x5 = (x4 / 30.59).trunc();
        let x6 = (x5 / 11.0).trunc();

        let year = (100.0 * (x1 - 49.0) + x3 + x6) as i32;
        let month = (x5 - 12.0 * x6 + 2.0) as u32;
        let mut day = (x4 - (30.59 * x5).trunc()) as u32;

        // The arithmetic can land on Feb 29/30 in any year.
        if month == 2 && day > 28 {
            day = if is_leap_year(year) { 29 } else { 28 };
        }
        Self::new_unchecked(year, month, day)
    }
}

impl std::fmt::Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(date: NaiveDate) -> Self {
        Self::new_unchecked(date.year(), date.month(), date.day())
    }
}

// ── CivilDateTime ─────────────────────────────────────────────────────────

/// A validated Gregorian date with a wall-clock time of day.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilDateTime {
    date: CivilDate,
    hour: u32,
    minute: u32,
    second: f64,
}

impl CivilDateTime {
    /// Validate and build a date-time. `second` may carry a fraction.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        let date = CivilDate::new(year, month, day)?;
        if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
            return Err(KoyomiError::InvalidTime {
                hour,
                minute,
                second: second.max(0.0) as u32,
            });
        }
        Ok(Self {
            date,
            hour,
            minute,
            second,
        })
    }

    /// Local midnight at the start of `date`.
    pub const fn midnight(date: CivilDate) -> Self {
        Self {
            date,
            hour: 0,
            minute: 0,
            second: 0.0,
        }
    }

    #[inline]
    pub const fn date(&self) -> CivilDate {
        self.date
    }

    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> f64 {
        self.second
    }

    /// Fraction of the day elapsed since local midnight.
    pub fn day_fraction(&self) -> f64 {
        (self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3_600.0) / 24.0
    }

    /// Convert to a `chrono::NaiveDateTime`.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let whole = self.second.trunc();
        let nanos = ((self.second - whole) * 1e9) as u32;
        NaiveDate::from_ymd_opt(self.date.year, self.date.month, self.date.day)?
            .and_hms_nano_opt(self.hour, self.minute, whole as u32, nanos)
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:06.3}",
            self.date, self.hour, self.minute, self.second
        )
    }
}

impl From<NaiveDateTime> for CivilDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        // chrono encodes a leap second as nanos ≥ 1e9; fold it into :59.
        let nanos = dt.nanosecond().min(999_999_999);
        Self {
            date: dt.date().into(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second() as f64 + nanos as f64 / 1e9,
        }
    }
}

// ── Gregorian ↔ day count ─────────────────────────────────────────────────

/// Gregorian date-time to the midnight-based day count of the same zone.
pub fn gregorian_to_julian_day(dt: &CivilDateTime) -> f64 {
    dt.date.day_number() as f64 + dt.day_fraction()
}

/// Midnight-based day count back to a Gregorian date-time.
///
/// The time of day is split into whole hours and minutes; seconds keep the
/// remaining fraction.
pub fn julian_day_to_gregorian(jd: f64) -> CivilDateTime {
    let whole = jd.trunc();
    let date = CivilDate::from_day_number(whole as i64);

    let tm = 86_400.0 * (jd - whole);
    let hour = (tm / 3_600.0).trunc();
    let minute = ((tm - 3_600.0 * hour) / 60.0).trunc();
    let second = (tm - 3_600.0 * hour - 60.0 * minute).max(0.0);

    CivilDateTime {
        date,
        hour: hour as u32,
        minute: minute as u32,
        second,
    }
}

// ── Time<Civil<M>> helpers ────────────────────────────────────────────────

impl<const M: i32> Time<Civil<M>> {
    /// Instant of a local civil date-time.
    #[inline]
    pub fn from_civil(dt: &CivilDateTime) -> Self {
        Self::new(gregorian_to_julian_day(dt))
    }

    /// Local midnight of a validated date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let date = CivilDate::new(year, month, day)?;
        Ok(Self::from_civil(&CivilDateTime::midnight(date)))
    }

    /// Local wall-clock reading of a `chrono` value.
    #[inline]
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self::from_civil(&dt.into())
    }

    /// Validated construction from a raw day count.
    pub fn try_new(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self::new(value))
        } else {
            Err(KoyomiError::NonFiniteJulianDay(value))
        }
    }

    /// Local civil date-time of this instant.
    #[inline]
    pub fn to_civil(&self) -> CivilDateTime {
        julian_day_to_gregorian(self.value())
    }

    /// Local civil date of this instant.
    #[inline]
    pub fn date(&self) -> CivilDate {
        CivilDate::from_day_number(self.day_number())
    }

    /// Local midnight that starts this instant's day.
    #[inline]
    pub fn start_of_day(&self) -> Self {
        Self::new(self.value().trunc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::Jst;
    use proptest::prelude::*;

    #[test]
    fn fliegel_reference_days() {
        let d = CivilDate::new(2000, 1, 1).unwrap();
        assert_eq!(d.day_number(), 2_451_544);
        let d = CivilDate::new(2023, 1, 22).unwrap();
        assert_eq!(d.day_number(), 2_459_966);
    }

    #[test]
    fn january_and_february_count_as_previous_year() {
        let feb28 = CivilDate::new(2024, 2, 28).unwrap().day_number();
        let feb29 = CivilDate::new(2024, 2, 29).unwrap().day_number();
        let mar1 = CivilDate::new(2024, 3, 1).unwrap().day_number();
        assert_eq!(feb29 - feb28, 1);
        assert_eq!(mar1 - feb29, 1);

        let feb28 = CivilDate::new(2023, 2, 28).unwrap().day_number();
        let mar1 = CivilDate::new(2023, 3, 1).unwrap().day_number();
        assert_eq!(mar1 - feb28, 1);
    }

    #[test]
    fn inverse_fixes_february_overflow() {
        for year in [1900, 2000, 2023, 2024, 2100] {
            let last = days_in_month(year, 2).unwrap();
            let date = CivilDate::new(year, 2, last).unwrap();
            assert_eq!(CivilDate::from_day_number(date.day_number()), date);
            let march = CivilDate::new(year, 3, 1).unwrap();
            assert_eq!(CivilDate::from_day_number(march.day_number()), march);
        }
    }

    #[test]
    fn inverse_splits_time_of_day() {
        let dt = julian_day_to_gregorian(2_459_966.75);
        assert_eq!(dt.date(), CivilDate::new(2023, 1, 22).unwrap());
        assert_eq!(dt.hour(), 18);
        assert_eq!(dt.minute(), 0);
        assert!(dt.second() < 1e-3);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(CivilDate::new(2023, 2, 29).is_err());
        assert!(CivilDate::new(2023, 13, 1).is_err());
        assert!(CivilDate::new(2023, 4, 0).is_err());
        assert!(CivilDateTime::new(2023, 4, 1, 24, 0, 0.0).is_err());
        assert!(CivilDateTime::new(2023, 4, 1, 12, 60, 0.0).is_err());
        assert!(CivilDateTime::new(2023, 4, 1, 12, 0, 60.0).is_err());
        assert!(matches!(
            Time::<Jst>::try_new(f64::NAN),
            Err(KoyomiError::NonFiniteJulianDay(_))
        ));
    }

    #[test]
    fn chrono_interop_roundtrip() {
        let naive = NaiveDate::from_ymd_opt(2020, 5, 23)
            .unwrap()
            .and_hms_milli_opt(2, 39, 12, 500)
            .unwrap();
        let civil = CivilDateTime::from(naive);
        assert_eq!(civil.hour(), 2);
        assert!((civil.second() - 12.5).abs() < 1e-9);
        assert_eq!(civil.to_naive(), Some(naive));

        let local = Time::<Jst>::from_naive(naive);
        assert_eq!(local.date(), CivilDate::new(2020, 5, 23).unwrap());
    }

    #[test]
    fn jst_start_of_day() {
        let noon = Time::<Jst>::from_civil(&CivilDateTime::new(2023, 1, 22, 12, 0, 0.0).unwrap());
        assert_eq!(noon.start_of_day(), Time::<Jst>::from_ymd(2023, 1, 22).unwrap());
    }

    fn any_civil_datetime() -> impl Strategy<Value = CivilDateTime> {
        (1800i32..2100, 1u32..=12, 1u32..=31, 0u32..24, 0u32..60, 0.0f64..60.0)
            .prop_filter_map("valid Gregorian date", |(y, m, d, h, mi, s)| {
                CivilDateTime::new(y, m, d, h, mi, s).ok()
            })
    }

    proptest! {
        #[test]
        fn gregorian_roundtrip(dt in any_civil_datetime()) {
            let jd = gregorian_to_julian_day(&dt);
            let back = gregorian_to_julian_day(&julian_day_to_gregorian(jd));
            prop_assert!((back - jd).abs() < 1e-6, "jd={jd} back={back}");
        }

        #[test]
        fn consecutive_days_are_consecutive(n in 2_378_496i64..2_488_069) {
            let date = CivilDate::from_day_number(n);
            prop_assert_eq!(date.day_number(), n);
        }
    }
}
