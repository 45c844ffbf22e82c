// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time intervals.
//!
//! - [`Interval<T>`]: half-open `[start, end)` range over any [`TimeInstant`]
//! - [`Period<S>`]: scale-based alias for `Interval<Time<S>>`, used for the
//!   span of a lunar month

use super::{Time, TimeInstant, TimeScale};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Represents an interval between two instants.
///
/// # Examples
///
/// ```
/// use koyomi::{Interval, Jst, Time};
///
/// let start = Time::<Jst>::new(2_459_966.0);
/// let end = Time::<Jst>::new(2_459_996.0);
/// let month = Interval::new(start, end);
///
/// assert!(month.contains(&Time::<Jst>::new(2_459_970.5)));
/// assert!(!month.contains(&end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Time-scale period alias: `Period<Jst>`, `Period<JD>`, ...
pub type Period<S> = Interval<Time<S>>;

impl<T: TimeInstant> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `end − start`.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: &T) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl<S: TimeScale> Interval<Time<S>> {
    /// Length in days.
    #[inline]
    pub fn duration_days(&self) -> Days {
        self.duration()
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Interval<Time<S>> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut s = serializer.serialize_struct("Period", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Interval<Time<S>> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: f64,
            end: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Interval::new(Time::new(raw.start), Time::new(raw.end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::Jst;

    fn month() -> Period<Jst> {
        Period::new(Time::new(2_459_966.0), Time::new(2_459_996.0))
    }

    #[test]
    fn duration_in_days() {
        assert_eq!(month().duration_days(), Days::new(30.0));
    }

    #[test]
    fn half_open_containment() {
        let m = month();
        assert!(m.contains(&m.start));
        assert!(!m.contains(&m.end));
        assert!(m.contains(&Time::new(2_459_995.999)));
    }

    #[test]
    fn display() {
        let text = month().to_string();
        assert!(text.contains(" to "));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fields() {
        let json = serde_json::to_string(&month()).unwrap();
        assert_eq!(json, r#"{"start":2459966.0,"end":2459996.0}"#);
        let back: Period<Jst> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month());
    }
}
