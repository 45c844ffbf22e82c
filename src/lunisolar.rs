// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Old-calendar reconstruction
//!
//! Maps a civil day to its date in the lunisolar calendar: year, month,
//! leap flag and day of month.
//!
//! ## Method
//!
//! Around the query day a window of astronomical events is solved:
//!
//! 1. the last solstice or equinox at or before the query (90° grid), then
//!    three further principal terms (30° grid), each searched from 32 days
//!    after the previous one;
//! 2. five consecutive new moons, the first at or before that solstice or
//!    equinox.
//!
//! Each new moon opens a month. Month numbers follow from the solar
//! longitude of the first principal term (`⌊λ/30⌋ + 2`, so the month that
//! holds the winter solstice is the 11th). If the window holds five new
//! moons but only four principal terms, one month lacks a principal term;
//! the first such month is a leap month and repeats the number of the
//! month before it.
//!
//! All comparisons are on whole local days.

use crate::civil::{CivilDate, CivilDateTime};
use crate::config::Reckoning;
use crate::instant::Time;
use crate::period::Period;
use crate::scales::{Civil, Jst};
use crate::solver::{find_new_moon, find_solar_term, TermSpacing};
use qtty::Days;

/// Principal terms per window.
const CHU: usize = 4;
/// New moons per window.
const SAKU: usize = 5;

/// Step from one principal term to the search start of the next.
const TERM_STEP: Days = Days::new(32.0);
/// First step from one new moon towards the next.
const LUNATION_STEP: Days = Days::new(30.0);
/// Step used when [`LUNATION_STEP`] lands back on the same new moon.
const LUNATION_RETRY: Days = Days::new(35.0);
/// Step back to the new moon preceding the window.
const LUNATION_BACK: Days = Days::new(27.0);
/// Two new moons closer than this many days are the same one.
const SAME_LUNATION_DAYS: i64 = 26;

// ═══════════════════════════════════════════════════════════════════════════
// Result types
// ═══════════════════════════════════════════════════════════════════════════

/// A date in the lunisolar calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OldCalendarDate {
    pub year: i32,
    pub leap: bool,
    /// 1..=12.
    pub month: u32,
    /// 1..=30.
    pub day: u32,
}

impl std::fmt::Display for OldCalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let leap = if self.leap { "L" } else { "" };
        write!(f, "{:04}-{}{:02}-{:02}", self.year, leap, self.month, self.day)
    }
}

/// One row of the month table: the month opened by a new moon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MonthRow {
    /// 1..=12.
    pub month: u32,
    pub leap: bool,
    /// Local day number of the new moon.
    pub first_day: i64,
}

/// A lunar month with its span, from the day of its new moon to the day
/// of the next.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LunarMonth<const M: i32> {
    pub month: u32,
    pub leap: bool,
    pub span: Period<Civil<M>>,
}

impl<const M: i32> LunarMonth<M> {
    /// 29 or 30.
    pub fn length(&self) -> u32 {
        self.span.duration_days().value().round() as u32
    }
}

/// A principal term: instant and the solar longitude it marks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ChuEntry<const M: i32> {
    pub(crate) instant: Time<Civil<M>>,
    pub(crate) longitude: f64,
}

/// A new moon opening a month.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct SakuEntry<const M: i32> {
    pub(crate) instant: Time<Civil<M>>,
}

impl<const M: i32> SakuEntry<M> {
    fn day(&self) -> i64 {
        self.instant.day_number()
    }
}

/// Events solved around one query day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Window<const M: i32> {
    pub(crate) chu: [ChuEntry<M>; CHU],
    pub(crate) saku: [SakuEntry<M>; SAKU],
}

// ═══════════════════════════════════════════════════════════════════════════
// Event window
// ═══════════════════════════════════════════════════════════════════════════

fn new_moon<const M: i32>(start: Time<Civil<M>>, reckoning: &Reckoning) -> SakuEntry<M> {
    SakuEntry {
        instant: find_new_moon(start, reckoning).instant,
    }
}

fn principal_terms<const M: i32>(query: Time<Civil<M>>, reckoning: &Reckoning) -> [ChuEntry<M>; CHU] {
    let first = find_solar_term(query, TermSpacing::Quarter, reckoning);
    let mut chu = [ChuEntry {
        instant: first.instant(),
        longitude: first.longitude,
    }; CHU];
    for i in 1..CHU {
        let term = find_solar_term(chu[i - 1].instant + TERM_STEP, TermSpacing::Principal, reckoning);
        chu[i] = ChuEntry {
            instant: term.instant(),
            longitude: term.longitude,
        };
    }
    chu
}

/// The new moon after `previous`, skipping a search that falls back onto it.
fn next_new_moon<const M: i32>(previous: SakuEntry<M>, reckoning: &Reckoning) -> SakuEntry<M> {
    let next = new_moon(previous.instant + LUNATION_STEP, reckoning);
    if (previous.day() - next.day()).abs() <= SAME_LUNATION_DAYS {
        new_moon(previous.instant + LUNATION_RETRY, reckoning)
    } else {
        next
    }
}

pub(crate) fn solve_window<const M: i32>(query: Time<Civil<M>>, reckoning: &Reckoning) -> Window<M> {
    let chu = principal_terms(query, reckoning);

    let mut saku = [new_moon(chu[0].instant, reckoning); SAKU];
    for i in 1..SAKU {
        saku[i] = next_new_moon(saku[i - 1], reckoning);
    }

    // The first month must open on or before the first principal term and
    // the second after it.
    let chu0 = chu[0].instant.day_number();
    if saku[1].day() <= chu0 {
        let last = saku[SAKU - 1];
        saku.rotate_left(1);
        saku[SAKU - 1] = new_moon(last.instant + LUNATION_RETRY, reckoning);
        log::debug!("window shifted forward one lunation");
    } else if saku[0].day() > chu0 {
        let first = saku[0];
        saku.rotate_right(1);
        saku[0] = new_moon(first.instant - LUNATION_BACK, reckoning);
        log::debug!("window shifted back one lunation");
    }

    Window { chu, saku }
}

// ═══════════════════════════════════════════════════════════════════════════
// Month numbering
// ═══════════════════════════════════════════════════════════════════════════

#[inline]
fn wrap_month(month: u32) -> u32 {
    if month > 12 {
        month - 12
    } else {
        month
    }
}

/// Number the five months opened by `saku_days`.
///
/// When the window holds a leap month (the fifth new moon does not come
/// after the fourth principal term) the first month from row 1 whose
/// principal term does not fall strictly inside it becomes the leap month
/// and repeats the previous number. The leap is assigned at most once.
pub(crate) fn assign_months(
    first_month: u32,
    chu_days: [i64; CHU],
    saku_days: [i64; SAKU],
) -> [MonthRow; SAKU] {
    let mut leap_pending = saku_days[SAKU - 1] <= chu_days[CHU - 1];
    let mut rows = [MonthRow {
        month: wrap_month(first_month),
        leap: false,
        first_day: saku_days[0],
    }; SAKU];

    for i in 1..SAKU {
        let previous = rows[i - 1].month;
        let lacks_term =
            i < CHU && (chu_days[i] <= saku_days[i] || chu_days[i] >= saku_days[i + 1]);
        let leap = leap_pending && lacks_term;
        if leap {
            leap_pending = false;
        }
        rows[i] = MonthRow {
            month: if leap { previous } else { wrap_month(previous + 1) },
            leap,
            first_day: saku_days[i],
        };
    }
    rows
}

fn month_rows<const M: i32>(window: &Window<M>) -> [MonthRow; SAKU] {
    let first_month = (window.chu[0].longitude / 30.0).trunc() as u32 + 2;
    assign_months(
        first_month,
        window.chu.map(|c| c.instant.day_number()),
        window.saku.map(|s| s.day()),
    )
}

/// Row holding `day`: the last row starting on or before it.
fn locate(rows: &[MonthRow; SAKU], day: i64) -> &MonthRow {
    match rows.iter().position(|row| day <= row.first_day) {
        Some(i) if rows[i].first_day == day => &rows[i],
        Some(i) => &rows[i.saturating_sub(1)],
        None => &rows[SAKU - 1],
    }
}

/// 1-based day of `day` within the month starting on `row.first_day`.
fn day_of_month(row: &MonthRow, day: i64) -> u32 {
    debug_assert!(
        day >= row.first_day,
        "day {day} precedes the month starting on {}",
        row.first_day
    );
    u32::try_from(day - row.first_day + 1).unwrap_or_else(|_| {
        log::error!("day {day} precedes the month starting on {}", row.first_day);
        1
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Public entry points
// ═══════════════════════════════════════════════════════════════════════════

/// Lunisolar date of the local day holding `query`.
///
/// ```
/// use koyomi::{reconstruct, Jst, Reckoning, Time};
///
/// let query = Time::<Jst>::from_ymd(2023, 3, 22).unwrap();
/// let date = reconstruct(query, &Reckoning::default());
/// assert_eq!((date.leap, date.month, date.day), (true, 2, 1));
/// ```
pub fn reconstruct<const M: i32>(query: Time<Civil<M>>, reckoning: &Reckoning) -> OldCalendarDate {
    let window = solve_window(query, reckoning);
    let rows = month_rows(&window);
    let day = query.day_number();
    let row = locate(&rows, day);

    let civil: CivilDate = query.date();
    let mut year = civil.year();
    if row.month > 9 && row.month > civil.month() {
        year -= 1;
    }

    let date = OldCalendarDate {
        year,
        leap: row.leap,
        month: row.month,
        day: day_of_month(row, day),
    };
    log::trace!("{civil} -> {date}");
    date
}

/// [`reconstruct`] for a wall-clock reading in Japan Standard Time.
pub fn reconstruct_civil(datetime: &CivilDateTime, reckoning: &Reckoning) -> OldCalendarDate {
    reconstruct(Time::<Jst>::from_civil(datetime), reckoning)
}

/// The five months solved around `query`, with their spans.
pub fn month_table<const M: i32>(query: Time<Civil<M>>, reckoning: &Reckoning) -> [LunarMonth<M>; SAKU] {
    let window = solve_window(query, reckoning);
    let rows = month_rows(&window);
    let following = next_new_moon(window.saku[SAKU - 1], reckoning);

    std::array::from_fn(|i| {
        let end = window.saku.get(i + 1).copied().unwrap_or(following);
        LunarMonth {
            month: rows[i].month,
            leap: rows[i].leap,
            span: Period::new(
                window.saku[i].instant.start_of_day(),
                end.instant.start_of_day(),
            ),
        }
    })
}
