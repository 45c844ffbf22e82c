// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent ecliptic longitude of the Sun.

use super::{normalize_angle, Term};

// ── Cosine edition (Julian centuries) ─────────────────────────────────────

#[rustfmt::skip]
const COSINE_TERMS: [Term; 15] = [
    Term::new(0.0004, 31557.0, 161.0),
    Term::new(0.0004, 29930.0, 48.0),
    Term::new(0.0005, 2281.0, 221.0),
    Term::new(0.0005, 155.0, 118.0),
    Term::new(0.0006, 33718.0, 316.0),
    Term::new(0.0007, 9038.0, 64.0),
    Term::new(0.0007, 3035.0, 110.0),
    Term::new(0.0007, 65929.0, 45.0),
    Term::new(0.0013, 22519.0, 352.0),
    Term::new(0.0015, 45038.0, 254.0),
    Term::new(0.0018, 445267.0, 208.0),
    Term::new(0.0018, 19.0, 159.0),
    Term::new(0.0020, 32964.0, 158.0),
    Term::new(0.0200, 71998.1, 265.1),
    Term::new(1.9147, 35999.05, 267.52),
];

/// Equation-of-centre term whose amplitude shrinks linearly with `t`.
const COSINE_SECULAR: Term = Term::new(-0.0048, 35999.05, 267.52);

const COSINE_MEAN_RATE: f64 = 36_000.769_5;
const COSINE_MEAN_AT_EPOCH: f64 = 280.465_9;

pub(super) fn cosine_series(t: f64) -> f64 {
    let periodic: f64 = COSINE_TERMS.iter().map(|term| term.cosine(t)).sum();
    let secular = t * COSINE_SECULAR.cosine(t);
    let mean = normalize_angle(normalize_angle(COSINE_MEAN_RATE * t) + COSINE_MEAN_AT_EPOCH);
    normalize_angle(periodic + secular + mean)
}

// ── Sine edition (Julian years) ───────────────────────────────────────────

#[rustfmt::skip]
const SINE_TERMS: [Term; 18] = [
    Term::new(0.0003, 44.43, 329.7),
    Term::new(0.0003, 1079.97, 352.5),
    Term::new(0.0004, 720.02, 21.1),
    Term::new(0.0004, 299.30, 157.3),
    Term::new(0.0004, 315.56, 234.9),
    Term::new(0.0005, 22.81, 291.2),
    Term::new(0.0005, 1.50, 207.4),
    Term::new(0.0006, 337.18, 29.8),
    Term::new(0.0007, 30.35, 206.8),
    Term::new(0.0007, 90.38, 153.3),
    Term::new(0.0008, 659.29, 132.5),
    Term::new(0.0013, 225.18, 81.4),
    Term::new(0.0015, 450.37, 343.2),
    Term::new(0.0018, 0.20, 251.3),
    Term::new(0.0018, 4452.67, 297.8),
    Term::new(0.0020, 329.64, 247.1),
    Term::new(0.0048, 19.341, 234.95),
    Term::new(0.0200, 719.981, 355.05),
];

/// Equation of centre; its amplitude decays by [`SINE_CENTRE_DECAY`] per year.
const SINE_CENTRE: Term = Term::new(1.9146, 359.991, 357.538);
const SINE_CENTRE_DECAY: f64 = 0.000_05;

const SINE_MEAN_RATE: f64 = 360.007_69;
const SINE_MEAN_AT_EPOCH: f64 = 280.460_3;

pub(super) fn sine_series(jy: f64) -> f64 {
    let periodic: f64 = SINE_TERMS.iter().map(|term| term.sine(jy)).sum();
    let centre = Term {
        amplitude: SINE_CENTRE.amplitude - SINE_CENTRE_DECAY * jy,
        ..SINE_CENTRE
    }
    .sine(jy);
    let mean = normalize_angle(SINE_MEAN_AT_EPOCH + SINE_MEAN_RATE * jy);
    normalize_angle(periodic + centre + mean)
}
