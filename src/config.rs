// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reckoning configuration.
//!
//! A [`Reckoning`] bundles every tunable that affects a result: which ΔT
//! model turns civil time into dynamical time, which coefficient edition
//! evaluates the longitudes, and how hard the event solver tries. The
//! default reproduces the traditional calendar computation.

use qtty::{Days, Seconds};

use crate::delta_t::DeltaTModel;
use crate::series::SeriesEdition;
use crate::time_argument::Convention;

/// Iteration limits of the event solver.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverSettings {
    /// Convergence threshold on the per-step correction.
    #[cfg_attr(feature = "serde", serde(with = "days_as_f64"))]
    pub tolerance: Days,
    /// Iteration at which an unconverged new-moon search is restarted.
    pub restart_after: u32,
    /// Iteration after which the search gives up.
    pub max_iterations: u32,
}

impl SolverSettings {
    /// One second, expressed in days.
    pub const ONE_SECOND: Days = Days::new(1.0 / 86_400.0);
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: Self::ONE_SECOND,
            restart_after: 15,
            max_iterations: 30,
        }
    }
}

/// Everything a computation needs besides the instant itself.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reckoning {
    pub delta_t: DeltaTModel,
    /// UT1 − UTC, used by [`DeltaTModel::Piecewise`] between 1972 and 2019.
    #[cfg_attr(feature = "serde", serde(with = "seconds_as_f64"))]
    pub dut1: Seconds,
    pub edition: SeriesEdition,
    pub solver: SolverSettings,
}

impl Default for Reckoning {
    fn default() -> Self {
        Self {
            delta_t: DeltaTModel::Ignored,
            dut1: Seconds::new(0.0),
            edition: SeriesEdition::CenturyCosine,
            solver: SolverSettings::default(),
        }
    }
}

impl Reckoning {
    /// Sine edition with the piecewise ΔT, as used for almanac figures such
    /// as moon age.
    pub fn almanac() -> Self {
        Self::default()
            .with_edition(SeriesEdition::YearSine)
            .with_delta_t(DeltaTModel::Piecewise)
    }

    pub fn with_delta_t(mut self, model: DeltaTModel) -> Self {
        self.delta_t = model;
        self
    }

    pub fn with_dut1(mut self, dut1: Seconds) -> Self {
        self.dut1 = dut1;
        self
    }

    pub fn with_edition(mut self, edition: SeriesEdition) -> Self {
        self.edition = edition;
        self
    }

    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    /// Argument unit of the selected edition.
    #[inline]
    pub fn convention(&self) -> Convention {
        self.edition.convention()
    }
}

// ── serde helpers ─────────────────────────────────────────────────────────

/// Quantities travel as bare `f64` in their own unit.
#[cfg(feature = "serde")]
macro_rules! quantity_as_f64 {
    ($module:ident, $quantity:ty) => {
        mod $module {
            use serde::{Deserialize, Deserializer, Serializer};

            pub fn serialize<S: Serializer>(q: &$quantity, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_f64(q.value())
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<$quantity, D::Error> {
                f64::deserialize(deserializer).map(<$quantity>::new)
            }
        }
    };
}

#[cfg(feature = "serde")]
quantity_as_f64!(days_as_f64, qtty::Days);
#[cfg(feature = "serde")]
quantity_as_f64!(seconds_as_f64, qtty::Seconds);
