// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! | Marker | Description | Axis |
//! |--------|-------------|------|
//! | [`JD`] | Julian Date | TT |
//! | [`UT`] | Universal Time Julian Date | UT1 |
//! | [`Civil<M>`](Civil) | Local day count, midnight-based, offset `M` minutes from UTC | UT1 |
//! | [`Jst`] | `Civil<540>`, Japan Standard Time | UT1 |
//!
//! The civil scales carry the value produced by Fliegel's formula: the
//! integer part labels the local calendar day and the fraction is the local
//! time of day. `JD(UT) = civil + 0.5 − offset`.

use super::instant::{Time, TimeScale};
use qtty::{Day, Days};

// ---------------------------------------------------------------------------
// Julian Date (TT)
// ---------------------------------------------------------------------------

/// Julian Date, the identity scale.
///
/// `to_jd_tt(v) = v`, i.e. the quantity *is* a Julian Day number on TT.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

// ---------------------------------------------------------------------------
// Universal Time (Earth-rotation based)
// ---------------------------------------------------------------------------

/// Universal Time: a Julian Day on the Earth-rotation axis.
///
/// The conversion to JD(TT) adds the piecewise **ΔT** of
/// [`delta_t_seconds`](crate::delta_t_seconds), keyed by the UT calendar
/// date. The inverse uses a three-iteration fixed-point solver.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        let dt_secs = super::delta_t::delta_t_seconds_from_ut(ut_value);
        ut_value + dt_secs.to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        // ΔT changes by at most a second across a leap boundary, so three
        // passes settle except within a second of the step itself.
        let mut ut = jd_tt;
        for _ in 0..3 {
            let dt_days = super::delta_t::delta_t_seconds_from_ut(ut).to::<Day>();
            ut = jd_tt - dt_days;
        }
        ut
    }
}

// ---------------------------------------------------------------------------
// Civil (local, midnight-based) day counts
// ---------------------------------------------------------------------------

/// Local civil day count for a zone `UTC_OFFSET_MINUTES` east of Greenwich.
///
/// This is the time axis of the lunisolar calendar: event instants and query
/// dates are compared by their integer (local) day number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Civil<const UTC_OFFSET_MINUTES: i32>;

impl<const M: i32> Civil<M> {
    /// Zone offset from UTC as a fraction of a day.
    pub const UTC_OFFSET: Days = Days::new(M as f64 / 1_440.0);

    /// Shift between the midnight-based civil count and the noon-based JD.
    const NOON_SHIFT: Days = Days::new(0.5);
}

impl<const M: i32> TimeScale for Civil<M> {
    const LABEL: &'static str = "Civil JD";

    #[inline]
    fn to_jd_tt(value: Days) -> Days {
        UT::to_jd_tt(value + Self::NOON_SHIFT - Self::UTC_OFFSET)
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        UT::from_jd_tt(jd_tt) - Self::NOON_SHIFT + Self::UTC_OFFSET
    }
}

/// Japan Standard Time (UTC+09:00), the zone of the traditional reckoning.
pub type Jst = Civil<540>;

// ---------------------------------------------------------------------------
// Cross-scale From/Into (generated by macro)
// ---------------------------------------------------------------------------

/// Generate pairwise `From<Time<A>> for Time<B>` implementations.
macro_rules! impl_time_conversions {
    ($single:ty) => {};

    ($first:ty, $($rest:ty),+ $(,)?) => {
        $(
            impl From<Time<$first>> for Time<$rest> {
                #[inline]
                fn from(t: Time<$first>) -> Self {
                    t.to::<$rest>()
                }
            }

            impl From<Time<$rest>> for Time<$first> {
                #[inline]
                fn from(t: Time<$rest>) -> Self {
                    t.to::<$first>()
                }
            }
        )+

        impl_time_conversions!($($rest),+);
    };
}

impl_time_conversions!(JD, UT);

impl<const M: i32> From<Time<Civil<M>>> for Time<UT> {
    #[inline]
    fn from(t: Time<Civil<M>>) -> Self {
        Time::<UT>::from_days(t.quantity() + Civil::<M>::NOON_SHIFT - Civil::<M>::UTC_OFFSET)
    }
}

impl<const M: i32> From<Time<UT>> for Time<Civil<M>> {
    #[inline]
    fn from(t: Time<UT>) -> Self {
        Time::from_days(t.quantity() - Civil::<M>::NOON_SHIFT + Civil::<M>::UTC_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Second, Seconds};

    #[test]
    fn jst_offset_is_nine_hours() {
        assert!((Jst::UTC_OFFSET - Days::new(0.375)).abs() < Days::new(1e-15));
        assert!((Civil::<-300>::UTC_OFFSET + Days::new(5.0 / 24.0)).abs() < Days::new(1e-15));
    }

    #[test]
    fn civil_to_ut_is_a_pure_shift() {
        // 2023-01-22 00:00 JST is 2023-01-21 15:00 UT.
        let local = Time::<Jst>::new(2_459_966.0);
        let ut: Time<UT> = local.into();
        assert!((ut.value() - 2_459_966.125).abs() < 1e-9);
        let back: Time<Jst> = ut.into();
        assert!((back.value() - local.value()).abs() < 1e-9);
    }

    #[test]
    fn ut_to_jd_applies_delta_t() {
        let ut = Time::<UT>::new(2_451_545.0);
        let jd: Time<JD> = ut.to::<JD>();
        let offset_secs = (jd.quantity() - ut.quantity()).to::<Second>();
        assert!(
            (offset_secs - Seconds::new(64.184)).abs() < Seconds::new(1e-3),
            "UT→JD offset = {} s",
            offset_secs
        );
    }

    #[test]
    fn ut_jd_roundtrip() {
        let jd = Time::<JD>::new(2_451_545.0);
        let ut: Time<UT> = jd.into();
        let back: Time<JD> = ut.into();
        assert!((back.quantity() - jd.quantity()).abs() < Days::new(1e-9));
    }

    #[test]
    fn civil_roundtrip_through_tt() {
        let local = Time::<Jst>::new(2_459_966.5);
        let tt = local.to::<JD>();
        let back = tt.to::<Jst>();
        assert!((back.value() - local.value()).abs() < 1e-8);
    }
}
