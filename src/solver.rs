// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Event solver
//!
//! Fixed-point search for the instant at which an angular separation hits a
//! target: the Moon catching the Sun (new moon) or the Sun crossing a
//! multiple of 15°, 30° or 90° (solar terms).
//!
//! Each step samples the longitudes, turns the angular error into days with
//! the event's mean period and steps the estimate back by that amount. The
//! estimate is a [`SplitDay`]: whole and fractional days are corrected
//! separately.
//!
//! ## Termination
//!
//! The loop stops when a correction is no larger than
//! [`SolverSettings::tolerance`]. An unconverged new-moon search is
//! restarted once, at [`SolverSettings::restart_after`], from 26 days
//! before the start; a search still unconverged after
//! [`SolverSettings::max_iterations`] is abandoned and the unrefined start
//! is returned flagged [`SolverState::ForcedExit`]. Nothing here panics or
//! returns an error.

use qtty::Days;

use crate::config::{Reckoning, SolverSettings};
use crate::error::{KoyomiError, Result};
use crate::instant::Time;
use crate::scales::Civil;
use crate::series::{moon_longitude, normalize_angle, sun_longitude};
use crate::time_argument::{SplitDay, TimeArgument};

/// Mean synodic month in days.
pub const SYNODIC_MONTH: Days = Days::new(29.530_589);

/// Period used to turn a solar longitude error into days.
pub const TROPICAL_YEAR: Days = Days::new(365.2);

/// Distance back from the start at which a stuck new-moon search restarts.
const NEW_MOON_RESTART: Days = Days::new(26.0);

// ═══════════════════════════════════════════════════════════════════════════
// Targets and results
// ═══════════════════════════════════════════════════════════════════════════

/// How the raw angular error is folded before it is turned into days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WrapPolicy {
    /// Fold into `(-180, 180]`.
    HalfTurn,
    /// New-moon rules: keep the error positive on the first step so the
    /// search runs backwards to the preceding conjunction, and fold errors
    /// that straddle the 0°/360° seam.
    Syzygy,
}

/// One solve's target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EventTarget {
    /// Separation (°) at which the event happens.
    pub reference_angle: f64,
    /// Time needed for the separation to grow by 360°.
    pub period: Days,
    pub wrap: WrapPolicy,
    /// Where to restart from, measured back from the start, if the search
    /// stalls.
    pub restart: Option<Days>,
}

impl EventTarget {
    /// Moon–Sun conjunction.
    pub const NEW_MOON: Self = Self {
        reference_angle: 0.0,
        period: SYNODIC_MONTH,
        wrap: WrapPolicy::Syzygy,
        restart: Some(NEW_MOON_RESTART),
    };

    /// Sun crossing `longitude`.
    pub const fn solar_longitude(longitude: f64) -> Self {
        Self {
            reference_angle: longitude,
            period: TROPICAL_YEAR,
            wrap: WrapPolicy::HalfTurn,
            restart: None,
        }
    }
}

/// Longitudes sampled at one estimate: the moving body and the one it is
/// measured from, in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Elongation {
    pub body: f64,
    pub from: f64,
}

/// How a search ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SolverState {
    Converged,
    /// Converged after the single restart.
    ConvergedAfterRestart,
    /// Iteration cap reached; the instant is the start, unrefined.
    ForcedExit,
}

/// Result of a search.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Solution<const M: i32> {
    pub instant: Time<Civil<M>>,
    pub state: SolverState,
    pub iterations: u32,
}

impl<const M: i32> Solution<M> {
    /// `true` unless the search was abandoned.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.state != SolverState::ForcedExit
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// The primitive
// ═══════════════════════════════════════════════════════════════════════════

/// Run the fixed-point search from `start`.
///
/// `sample` receives the time argument of the current estimate, built with
/// the reckoning's ΔT model and edition convention, and returns the two
/// longitudes whose difference is driven to `target.reference_angle`.
pub fn iterate<const M: i32, F>(
    start: Time<Civil<M>>,
    target: &EventTarget,
    reckoning: &Reckoning,
    mut sample: F,
) -> Solution<M>
where
    F: FnMut(&TimeArgument) -> Elongation,
{
    let SolverSettings {
        tolerance,
        restart_after,
        max_iterations,
    } = reckoning.solver;
    let tolerance = tolerance.value();
    let period = target.period.value();

    let mut estimate = SplitDay::from_civil(start);
    let mut restarted = false;
    let mut iterations = 0;

    loop {
        iterations += 1;
        let t = estimate.argument(reckoning.convention(), reckoning.delta_t, reckoning.dut1);
        let sampled = sample(&t);
        let error = fold(
            sampled.body - sampled.from - target.reference_angle,
            &sampled,
            target,
            iterations == 1,
            tolerance,
        );

        let correction = error * period / 360.0;
        estimate.retreat(correction);
        log::trace!("iteration {iterations}: error {error:.6}°, step {correction:.9} d");

        if correction.abs() <= tolerance {
            let state = if restarted {
                SolverState::ConvergedAfterRestart
            } else {
                SolverState::Converged
            };
            return Solution {
                instant: estimate.to_civil(),
                state,
                iterations,
            };
        }

        match target.restart {
            Some(back) if iterations == restart_after => {
                log::debug!(
                    "no convergence after {iterations} iterations from {start}; restarting {back} earlier"
                );
                estimate = SplitDay::at_day((start - back).value());
                restarted = true;
            }
            _ if iterations > max_iterations => {
                log::warn!(
                    "search from {start} abandoned after {iterations} iterations; last step {correction:.3e} d"
                );
                return Solution {
                    instant: start,
                    state: SolverState::ForcedExit,
                    iterations,
                };
            }
            _ => {}
        }
    }
}

fn fold(
    error: f64,
    sampled: &Elongation,
    target: &EventTarget,
    first: bool,
    tolerance: f64,
) -> f64 {
    match target.wrap {
        WrapPolicy::HalfTurn => {
            if error > 180.0 {
                error - 360.0
            } else if error < -180.0 {
                error + 360.0
            } else {
                error
            }
        }
        WrapPolicy::Syzygy => {
            // A start that already sits on the event is left alone rather
            // than pushed back a whole lunation.
            let beyond_tolerance = (error * target.period.value() / 360.0).abs() > tolerance;
            if first && error < 0.0 && beyond_tolerance {
                normalize_angle(error)
            } else if (0.0..=20.0).contains(&sampled.from) && sampled.body >= 300.0 {
                360.0 - normalize_angle(error)
            } else if error.abs() > 40.0 {
                normalize_angle(error)
            } else {
                error
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// New moon
// ═══════════════════════════════════════════════════════════════════════════

/// Instant of the new moon at or before `start` (or shortly after it, when
/// `start` falls within a second of the next one).
pub fn find_new_moon<const M: i32>(start: Time<Civil<M>>, reckoning: &Reckoning) -> Solution<M> {
    let edition = reckoning.edition;
    iterate(start, &EventTarget::NEW_MOON, reckoning, |t| Elongation {
        body: moon_longitude(edition, t),
        from: sun_longitude(edition, t),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Solar terms
// ═══════════════════════════════════════════════════════════════════════════

/// Grid of solar longitudes searched by [`find_solar_term`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TermSpacing {
    /// All 24 solar terms (15°).
    Term,
    /// The 12 principal terms (30°).
    Principal,
    /// Equinoxes and solstices (90°).
    Quarter,
}

impl TermSpacing {
    pub const fn degrees(self) -> f64 {
        match self {
            TermSpacing::Term => 15.0,
            TermSpacing::Principal => 30.0,
            TermSpacing::Quarter => 90.0,
        }
    }
}

impl TryFrom<u32> for TermSpacing {
    type Error = KoyomiError;

    fn try_from(degrees: u32) -> Result<Self> {
        match degrees {
            15 => Ok(TermSpacing::Term),
            30 => Ok(TermSpacing::Principal),
            90 => Ok(TermSpacing::Quarter),
            other => Err(KoyomiError::UnsupportedSpacing(other)),
        }
    }
}

/// A solved solar-term boundary and the solar longitude it marks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarTerm<const M: i32> {
    pub solution: Solution<M>,
    /// Multiple of the spacing, `[0, 360)`.
    pub longitude: f64,
}

impl<const M: i32> SolarTerm<M> {
    #[inline]
    pub fn instant(&self) -> Time<Civil<M>> {
        self.solution.instant
    }
}

/// Last instant at or before `start` at which the Sun crossed a multiple of
/// `spacing`.
pub fn find_solar_term<const M: i32>(
    start: Time<Civil<M>>,
    spacing: TermSpacing,
    reckoning: &Reckoning,
) -> SolarTerm<M> {
    let edition = reckoning.edition;
    let step = spacing.degrees();
    let t = TimeArgument::from_civil(start, reckoning.convention(), reckoning.delta_t, reckoning.dut1);
    let longitude = step * (sun_longitude(edition, &t) / step).trunc();

    let solution = iterate(
        start,
        &EventTarget::solar_longitude(longitude),
        reckoning,
        |t| Elongation {
            body: sun_longitude(edition, t),
            from: 0.0,
        },
    );
    SolarTerm {
        solution,
        longitude,
    }
}
