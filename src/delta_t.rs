// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): TT − UT1
//!
//! Three models are available through [`DeltaTModel`]:
//!
//! * [`Ignored`](DeltaTModel::Ignored): ΔT = 0. The lunisolar reckoning has
//!   traditionally been computed this way.
//! * [`Heuristic`](DeltaTModel::Heuristic): the linear rule of thumb
//!   `57 + 0.8 (year − 1990)` seconds.
//! * [`Piecewise`](DeltaTModel::Piecewise): the long-term NASA polynomial
//!   expressions (Espenak & Meeus), replaced between 1972-01-01 and
//!   2019-06-30 by the exact value `32.184 + (TAI − UTC) − DUT1`.
//!
//! The piecewise model is keyed by civil date, not by Julian Day, so the
//! leap-second steps fall exactly on their announced dates.
//!
//! ## Valid Time Range
//! The polynomials extrapolate beyond 2150 with the parabola
//! `−20 + 32 u²`, `u = (year − 1820)/100`. Outside ≈1800–2100 the values
//! are no better than a few tens of seconds.

use qtty::{Days, Seconds};

use crate::civil::{julian_day_to_gregorian, CivilDate};

/// `TT − TAI`.
const TT_MINUS_TAI: Seconds = Seconds::new(32.184);

/// Cumulative TAI − UTC, keyed by the civil date it takes effect.
#[rustfmt::skip]
const LEAP_SECONDS: [((i32, u32, u32), f64); 28] = [
    ((1972, 1, 1), 10.0), ((1972, 7, 1), 11.0), ((1973, 1, 1), 12.0),
    ((1974, 1, 1), 13.0), ((1975, 1, 1), 14.0), ((1976, 1, 1), 15.0),
    ((1977, 1, 1), 16.0), ((1978, 1, 1), 17.0), ((1979, 1, 1), 18.0),
    ((1980, 1, 1), 19.0), ((1981, 7, 1), 20.0), ((1982, 7, 1), 21.0),
    ((1983, 7, 1), 22.0), ((1985, 7, 1), 23.0), ((1988, 1, 1), 24.0),
    ((1990, 1, 1), 25.0), ((1991, 1, 1), 26.0), ((1992, 7, 1), 27.0),
    ((1993, 7, 1), 28.0), ((1994, 7, 1), 29.0), ((1996, 1, 1), 30.0),
    ((1997, 7, 1), 31.0), ((1999, 1, 1), 32.0), ((2006, 1, 1), 33.0),
    ((2009, 1, 1), 34.0), ((2012, 7, 1), 35.0), ((2015, 7, 1), 36.0),
    ((2017, 1, 1), 37.0),
];

/// First date after the leap-second span; polynomials resume here.
const LEAP_TABLE_END: (i32, u32, u32) = (2019, 7, 1);

/// One polynomial era: `ΔT = Σ cᵢ uⁱ`, `u = (year − origin) / scale`.
struct Era {
    start: i32,
    end: i32,
    origin: f64,
    scale: f64,
    coefficients: &'static [f64],
}

#[rustfmt::skip]
const ERAS: [Era; 11] = [
    Era { start: -500, end: 500, origin: 0.0, scale: 100.0, coefficients: &[
        10_583.6, -1_014.41, 33.783_11, -5.952_053, -0.179_845_2, 0.022_174_192, 0.009_031_652_1] },
    Era { start: 500, end: 1600, origin: 1000.0, scale: 100.0, coefficients: &[
        1_574.2, -556.01, 71.234_72, 0.319_781, -0.850_346_3, -0.005_050_998, 0.008_357_207_3] },
    Era { start: 1600, end: 1700, origin: 1600.0, scale: 1.0, coefficients: &[
        120.0, -0.980_8, -0.015_32, 1.0 / 7_129.0] },
    Era { start: 1700, end: 1800, origin: 1700.0, scale: 1.0, coefficients: &[
        8.83, 0.160_3, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0] },
    Era { start: 1800, end: 1860, origin: 1800.0, scale: 1.0, coefficients: &[
        13.72, -0.332_447, 0.006_861_2, 0.004_111_6, -0.000_374_36,
        0.000_012_127_2, -0.000_000_169_9, 0.000_000_000_875] },
    Era { start: 1860, end: 1900, origin: 1860.0, scale: 1.0, coefficients: &[
        7.62, 0.573_7, -0.251_754, 0.016_806_68, -0.000_447_362_4, 1.0 / 233_174.0] },
    Era { start: 1900, end: 1920, origin: 1900.0, scale: 1.0, coefficients: &[
        -2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197] },
    Era { start: 1920, end: 1941, origin: 1920.0, scale: 1.0, coefficients: &[
        21.20, 0.844_93, -0.076_100, 0.002_093_6] },
    Era { start: 1941, end: 1961, origin: 1950.0, scale: 1.0, coefficients: &[
        29.07, 0.407, -1.0 / 233.0, 1.0 / 2_547.0] },
    // Dates from 1972 onwards are caught by the leap-second table first.
    Era { start: 1961, end: 1986, origin: 1975.0, scale: 1.0, coefficients: &[
        45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0] },
    // Only reached after LEAP_TABLE_END.
    Era { start: 2005, end: 2050, origin: 2000.0, scale: 1.0, coefficients: &[
        62.92, 0.322_17, 0.005_589] },
];

impl Era {
    fn evaluate(&self, year: i32) -> f64 {
        let u = (year as f64 - self.origin) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * u + c)
    }
}

#[inline]
fn date_key(date: CivilDate) -> (i32, u32, u32) {
    (date.year(), date.month(), date.day())
}

/// Long-term parabola used before −500 and after 2150.
#[inline]
fn parabola(year: i32) -> f64 {
    let u = (year as f64 - 1_820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Cumulative leap seconds **TAI − UTC** in effect on `date`.
///
/// Before 1972-01-01 the conventional initial offset of 10 s is returned;
/// from 2017-01-01 on, 37 s.
pub fn tai_minus_utc(date: CivilDate) -> Seconds {
    let key = date_key(date);
    let idx = LEAP_SECONDS.partition_point(|(start, _)| *start <= key);
    match idx {
        0 => Seconds::new(LEAP_SECONDS[0].1),
        i => Seconds::new(LEAP_SECONDS[i - 1].1),
    }
}

/// Piecewise **ΔT** in seconds for a civil date, with DUT1 = 0.
pub fn delta_t_seconds(date: CivilDate) -> Seconds {
    delta_t_seconds_with_dut1(date, Seconds::new(0.0))
}

/// Piecewise **ΔT** with an explicit DUT1 (UT1 − UTC) for the leap-second
/// span. Outside that span DUT1 has no effect.
pub fn delta_t_seconds_with_dut1(date: CivilDate, dut1: Seconds) -> Seconds {
    let key = date_key(date);
    if key >= LEAP_SECONDS[0].0 && key < LEAP_TABLE_END {
        return TT_MINUS_TAI + tai_minus_utc(date) - dut1;
    }

    let year = date.year();
    let seconds = match year {
        y if y < -500 => parabola(y),
        y if (2050..=2150).contains(&y) => parabola(y) - 0.562_8 * (2_150 - y) as f64,
        y if y > 2150 => parabola(y),
        y => ERAS
            .iter()
            .find(|era| era.start <= y && y < era.end)
            .map(|era| era.evaluate(y))
            .unwrap_or_else(|| parabola(y)),
    };
    Seconds::new(seconds)
}

/// **ΔT** for a Julian Day on the UT axis (civil date taken at Greenwich).
#[inline]
pub(crate) fn delta_t_seconds_from_ut(jd_ut: Days) -> Seconds {
    let date = julian_day_to_gregorian(jd_ut.value() - 0.5).date();
    delta_t_seconds(date)
}

// ── Model selection ───────────────────────────────────────────────────────

/// Which ΔT correction turns a civil instant into the dynamical time the
/// longitude series expect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaTModel {
    /// ΔT = 0: the civil instant is fed to the series unchanged.
    #[default]
    Ignored,
    /// `57 + 0.8 (year − 1990)` seconds.
    Heuristic,
    /// [`delta_t_seconds_with_dut1`].
    Piecewise,
}

impl DeltaTModel {
    /// ΔT in seconds on `date` under this model.
    pub fn seconds(self, date: CivilDate, dut1: Seconds) -> Seconds {
        match self {
            DeltaTModel::Ignored => Seconds::new(0.0),
            DeltaTModel::Heuristic => Seconds::new(57.0 + 0.8 * (date.year() - 1_990) as f64),
            DeltaTModel::Piecewise => delta_t_seconds_with_dut1(date, dut1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CivilDate {
        CivilDate::new(y, m, d).unwrap()
    }

    fn dt(y: i32, m: u32, d: u32) -> f64 {
        delta_t_seconds(date(y, m, d)).value()
    }

    #[test]
    fn polynomial_before_first_leap_second() {
        // u = −4: 45.45 − 4.268 − 16/260 + 64/718
        let expected = 45.45 - 4.268 - 16.0 / 260.0 + 64.0 / 718.0;
        assert!((dt(1971, 12, 31) - expected).abs() < 1e-9);
        assert!((dt(1972, 1, 1) - 42.184).abs() < 1e-9);
    }

    #[test]
    fn every_leap_boundary_is_exact() {
        for window in LEAP_SECONDS.windows(2) {
            let ((y, m, d), before) = window[0];
            let ((ny, nm, nd), after) = window[1];
            let start = date(y, m, d);
            let next = date(ny, nm, nd);
            let eve = CivilDate::from_day_number(next.day_number() - 1);
            assert!((delta_t_seconds(start).value() - (32.184 + before)).abs() < 1e-9);
            assert!((delta_t_seconds(eve).value() - (32.184 + before)).abs() < 1e-9);
            assert!((delta_t_seconds(next).value() - (32.184 + after)).abs() < 1e-9);
        }
    }

    #[test]
    fn named_boundaries() {
        assert!((dt(1998, 12, 31) - 63.184).abs() < 1e-9);
        assert!((dt(1999, 1, 1) - 64.184).abs() < 1e-9);
        assert!((dt(2005, 12, 31) - 64.184).abs() < 1e-9);
        assert!((dt(2006, 1, 1) - 65.184).abs() < 1e-9);
        assert!((dt(2016, 12, 31) - 68.184).abs() < 1e-9);
        assert!((dt(2017, 1, 1) - 69.184).abs() < 1e-9);
    }

    #[test]
    fn polynomial_resumes_after_table() {
        assert!((dt(2019, 6, 30) - 69.184).abs() < 1e-9);
        let expected = 62.92 + 0.32217 * 19.0 + 0.005589 * 361.0;
        assert!((dt(2019, 7, 1) - expected).abs() < 1e-9);
    }

    #[test]
    fn long_term_branches() {
        assert!((dt(-600, 1, 1) - parabola(-600)).abs() < 1e-9);
        assert!((dt(2200, 1, 1) - parabola(2200)).abs() < 1e-9);
        assert!((dt(2150, 1, 1) - parabola(2150)).abs() < 1e-9);
        assert!((dt(2050, 1, 1) - (parabola(2050) - 0.5628 * 100.0)).abs() < 1e-9);
        assert!((dt(1000, 6, 1) - 1_574.2).abs() < 1e-9);
        assert!((dt(0, 6, 1) - 10_583.6).abs() < 1e-9);
        assert!((dt(1950, 6, 1) - 29.07).abs() < 1e-9);
    }

    #[test]
    fn eras_are_contiguous_where_they_should_be() {
        // A gap would fall through to the parabola and jump by minutes.
        for year in 1600..1972 {
            let a = dt(year, 6, 1);
            let b = dt(year + 1, 6, 1);
            assert!((a - b).abs() < 5.0, "jump between {year} and {}", year + 1);
        }
    }

    #[test]
    fn tai_minus_utc_edges() {
        assert_eq!(tai_minus_utc(date(1960, 1, 1)).value(), 10.0);
        assert_eq!(tai_minus_utc(date(1972, 6, 30)).value(), 10.0);
        assert_eq!(tai_minus_utc(date(1972, 7, 1)).value(), 11.0);
        assert_eq!(tai_minus_utc(date(2030, 1, 1)).value(), 37.0);
    }

    #[test]
    fn dut1_only_inside_leap_span() {
        let dut1 = Seconds::new(0.3);
        let inside = delta_t_seconds_with_dut1(date(2000, 1, 1), dut1).value();
        assert!((inside - (64.184 - 0.3)).abs() < 1e-9);
        let outside = delta_t_seconds_with_dut1(date(1950, 1, 1), dut1).value();
        assert!((outside - dt(1950, 1, 1)).abs() < 1e-12);
    }

    #[test]
    fn model_selection() {
        let d = date(2000, 1, 1);
        let zero = Seconds::new(0.0);
        assert_eq!(DeltaTModel::Ignored.seconds(d, zero).value(), 0.0);
        assert!((DeltaTModel::Heuristic.seconds(d, zero).value() - 65.0).abs() < 1e-12);
        assert!((DeltaTModel::Piecewise.seconds(d, zero).value() - 64.184).abs() < 1e-9);
        assert_eq!(DeltaTModel::default(), DeltaTModel::Ignored);
    }

    #[test]
    fn ut_axis_uses_greenwich_date() {
        // JD(UT) 2451179.5 is 1999-01-01 00:00 UT.
        let after = delta_t_seconds_from_ut(Days::new(2_451_179.5)).value();
        let before = delta_t_seconds_from_ut(Days::new(2_451_179.49)).value();
        assert!((after - 64.184).abs() < 1e-9);
        assert!((before - 63.184).abs() < 1e-9);
    }
}
