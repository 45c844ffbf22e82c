// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::instant::Time;
use super::scales::JD;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0, the argument of the cosine series.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Julian years since J2000.0, the argument of the sine series.
    #[inline]
    pub fn julian_years(&self) -> JulianYears {
        JulianYears::new(
            ((*self - Self::J2000) / Self::JULIAN_YEAR)
                .simplify()
                .value(),
        )
    }
}

impl From<Centuries> for Time<JD> {
    fn from(centuries: Centuries) -> Self {
        Self::J2000 + Days::new(centuries.value() * Self::JULIAN_CENTURY.value())
    }
}

impl From<Time<JD>> for Centuries {
    fn from(jd: Time<JD>) -> Self {
        jd.julian_centuries()
    }
}

impl From<JulianYears> for Time<JD> {
    fn from(years: JulianYears) -> Self {
        Self::J2000 + Days::new(years.value() * Self::JULIAN_YEAR.value())
    }
}

impl From<Time<JD>> for JulianYears {
    fn from(jd: Time<JD>) -> Self {
        jd.julian_years()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_is_origin() {
        assert_eq!(Time::<JD>::J2000.julian_centuries().value(), 0.0);
        assert_eq!(Time::<JD>::J2000.julian_years().value(), 0.0);
    }

    #[test]
    fn centuries_and_years_agree() {
        let jd = Time::<JD>::new(2_460_000.5);
        let c = jd.julian_centuries().value();
        let y = jd.julian_years().value();
        assert!((c * 100.0 - y).abs() < 1e-9);
    }

    #[test]
    fn conversions_roundtrip() {
        let jd: Time<JD> = Centuries::new(0.23).into();
        let back: Centuries = jd.into();
        assert!((back - Centuries::new(0.23)).abs() < Centuries::new(1e-12));

        let jd: Time<JD> = JulianYears::new(-12.5).into();
        let back: JulianYears = jd.into();
        assert!((back - JulianYears::new(-12.5)).abs() < JulianYears::new(1e-12));
    }
}
