use chrono::NaiveDate;
use koyomi::{
    find_new_moon, find_solar_term, month_table, reconstruct, reconstruct_civil, CivilDateTime,
    DeltaTModel, Jst, OldCalendarDate, Reckoning, SeriesEdition, SolverState, TermSpacing, Time,
};

fn day(y: i32, m: u32, d: u32) -> Time<Jst> {
    Time::from_ymd(y, m, d).unwrap()
}

fn old(year: i32, leap: bool, month: u32, day: u32) -> OldCalendarDate {
    OldCalendarDate {
        year,
        leap,
        month,
        day,
    }
}

#[test]
fn lunar_new_year_2023() {
    let date = reconstruct(day(2023, 1, 22), &Reckoning::default());
    assert_eq!(date, old(2023, false, 1, 1));
}

#[test]
fn leap_second_month_of_2023() {
    let r = Reckoning::default();
    assert_eq!(reconstruct(day(2023, 3, 22), &r), old(2023, true, 2, 1));
    assert_eq!(reconstruct(day(2023, 4, 20), &r), old(2023, false, 3, 1));
}

#[test]
fn leap_fourth_month_of_2020() {
    let r = Reckoning::default();
    assert_eq!(reconstruct(day(2020, 5, 22), &r), old(2020, false, 4, 30));
    assert_eq!(reconstruct(day(2020, 5, 23), &r), old(2020, true, 4, 1));
    assert_eq!(reconstruct(day(2020, 6, 21), &r), old(2020, false, 5, 1));
}

#[test]
fn leap_fifth_month_of_2017() {
    let r = Reckoning::default();
    assert_eq!(reconstruct(day(2017, 6, 24), &r), old(2017, true, 5, 1));
    assert_eq!(reconstruct(day(2017, 7, 23), &r), old(2017, false, 6, 1));
}

#[test]
fn days_run_consecutively_through_a_month() {
    let r = Reckoning::default();
    let first = day(2023, 4, 20);
    for offset in 0..29 {
        let date = reconstruct(first + qtty::Days::new(offset as f64), &r);
        assert_eq!((date.leap, date.month), (false, 3));
        assert_eq!(date.day, offset + 1);
    }
}

#[test]
fn time_of_day_does_not_change_the_date() {
    let r = Reckoning::default();
    let morning = CivilDateTime::new(2023, 3, 22, 0, 0, 0.0).unwrap();
    let evening = CivilDateTime::new(2023, 3, 22, 23, 59, 59.0).unwrap();
    assert_eq!(reconstruct_civil(&morning, &r), reconstruct_civil(&evening, &r));
}

#[test]
fn chrono_input_matches_ymd() {
    let naive = NaiveDate::from_ymd_opt(2020, 5, 23)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let r = Reckoning::default();
    assert_eq!(
        reconstruct(Time::<Jst>::from_naive(naive), &r),
        reconstruct(day(2020, 5, 23), &r)
    );
}

#[test]
fn year_rolls_back_for_late_months() {
    // 2023-01-21 is the last day of the 12th month of the previous year.
    let date = reconstruct(day(2023, 1, 21), &Reckoning::default());
    assert_eq!((date.year, date.month), (2022, 12));
    assert!(date.day == 29 || date.day == 30);
}

#[test]
fn twelve_or_thirteen_months_per_year() {
    let r = Reckoning::default();
    let mut firsts = 0;
    let mut leaps = 0;
    let start = day(2023, 1, 22);
    for offset in 0..384 {
        let date = reconstruct(start + qtty::Days::new(offset as f64), &r);
        if date.day == 1 {
            firsts += 1;
            leaps += date.leap as u32;
        }
    }
    assert_eq!(firsts, 13);
    assert_eq!(leaps, 1);
}

#[test]
fn month_table_matches_reconstruction() {
    let r = Reckoning::default();
    let query = day(2020, 5, 23);
    let table = month_table(query, &r);
    let holding = table
        .iter()
        .find(|m| m.span.contains(&query))
        .expect("query inside the table");
    let date = reconstruct(query, &r);
    assert_eq!((holding.month, holding.leap), (date.month, date.leap));
}

#[test]
fn new_moon_and_equinox_with_almanac_reckoning() {
    let r = Reckoning::almanac();
    let nm = find_new_moon(day(2023, 1, 25), &r);
    assert_eq!(nm.state, SolverState::Converged);
    assert_eq!(nm.instant.date().to_string(), "2023-01-22");

    let equinox = find_solar_term(day(2023, 3, 25), TermSpacing::Quarter, &r);
    assert_eq!(equinox.longitude, 0.0);
    assert_eq!(equinox.instant().date().to_string(), "2023-03-21");
}

#[test]
fn delta_t_models_agree_on_calendar_dates() {
    let base = Reckoning::default();
    let variants = [
        base.with_delta_t(DeltaTModel::Heuristic),
        base.with_delta_t(DeltaTModel::Piecewise),
        base.with_edition(SeriesEdition::YearSine),
    ];
    for query in [day(2023, 3, 22), day(2020, 5, 23), day(2017, 6, 24)] {
        let expected = reconstruct(query, &base);
        for r in &variants {
            assert_eq!(reconstruct(query, r), expected);
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn old_date_serializes() {
    let date = old(2023, true, 2, 1);
    let json = serde_json::to_string(&date).unwrap();
    assert_eq!(json, r#"{"year":2023,"leap":true,"month":2,"day":1}"#);
    let back: OldCalendarDate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, date);
}
