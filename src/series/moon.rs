// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent ecliptic longitude of the Moon.

use super::{normalize_angle, Term};

// ── Cosine edition (Julian centuries) ─────────────────────────────────────

#[rustfmt::skip]
const COSINE_TERMS: [Term; 61] = [
    Term::new(0.0003, 2322131.0, 191.0),
    Term::new(0.0003, 4067.0, 70.0),
    Term::new(0.0003, 549197.0, 220.0),
    Term::new(0.0003, 1808933.0, 58.0),
    Term::new(0.0003, 349472.0, 337.0),
    Term::new(0.0003, 381404.0, 354.0),
    Term::new(0.0003, 958465.0, 340.0),
    Term::new(0.0004, 12006.0, 187.0),
    Term::new(0.0004, 39871.0, 223.0),
    Term::new(0.0005, 509131.0, 242.0),
    Term::new(0.0005, 1745069.0, 24.0),
    Term::new(0.0005, 1908795.0, 90.0),
    Term::new(0.0006, 2258267.0, 156.0),
    Term::new(0.0006, 111869.0, 38.0),
    Term::new(0.0007, 27864.0, 127.0),
    Term::new(0.0007, 485333.0, 186.0),
    Term::new(0.0007, 405201.0, 50.0),
    Term::new(0.0007, 790672.0, 114.0),
    Term::new(0.0008, 1403732.0, 98.0),
    Term::new(0.0009, 858602.0, 129.0),
    Term::new(0.0011, 1920802.0, 186.0),
    Term::new(0.0012, 1267871.0, 249.0),
    Term::new(0.0016, 1856938.0, 152.0),
    Term::new(0.0018, 401329.0, 274.0),
    Term::new(0.0021, 341337.0, 16.0),
    Term::new(0.0021, 71998.0, 85.0),
    Term::new(0.0021, 990397.0, 357.0),
    Term::new(0.0022, 818536.0, 151.0),
    Term::new(0.0023, 922466.0, 163.0),
    Term::new(0.0024, 99863.0, 122.0),
    Term::new(0.0026, 1379739.0, 17.0),
    Term::new(0.0027, 918399.0, 182.0),
    Term::new(0.0028, 1934.0, 145.0),
    Term::new(0.0037, 541062.0, 259.0),
    Term::new(0.0038, 1781068.0, 21.0),
    Term::new(0.0040, 133.0, 29.0),
    Term::new(0.0040, 1844932.0, 56.0),
    Term::new(0.0040, 1331734.0, 283.0),
    Term::new(0.0050, 481266.0, 205.0),
    Term::new(0.0052, 31932.0, 107.0),
    Term::new(0.0068, 926533.0, 323.0),
    Term::new(0.0079, 449334.0, 188.0),
    Term::new(0.0085, 826671.0, 111.0),
    Term::new(0.0100, 1431597.0, 315.0),
    Term::new(0.0107, 1303870.0, 246.0),
    Term::new(0.0110, 489205.0, 142.0),
    Term::new(0.0125, 1443603.0, 52.0),
    Term::new(0.0154, 75870.0, 41.0),
    Term::new(0.0304, 513197.9, 222.5),
    Term::new(0.0347, 445267.1, 27.9),
    Term::new(0.0409, 441199.8, 47.4),
    Term::new(0.0458, 854535.2, 148.2),
    Term::new(0.0533, 1367733.1, 280.7),
    Term::new(0.0571, 377336.3, 13.2),
    Term::new(0.0588, 63863.5, 124.2),
    Term::new(0.1144, 966404.0, 276.5),
    Term::new(0.1851, 35999.05, 87.53),
    Term::new(0.2136, 954397.74, 179.93),
    Term::new(0.6583, 890534.22, 145.7),
    Term::new(1.2740, 413335.35, 10.74),
    Term::new(6.2888, 477198.868, 44.963),
];

const COSINE_MEAN_RATE: f64 = 481_267.880_9;
const COSINE_MEAN_AT_EPOCH: f64 = 218.316_2;

pub(super) fn cosine_series(t: f64) -> f64 {
    let periodic: f64 = COSINE_TERMS.iter().map(|term| term.cosine(t)).sum();
    let mean = normalize_angle(normalize_angle(COSINE_MEAN_RATE * t) + COSINE_MEAN_AT_EPOCH);
    normalize_angle(periodic + mean)
}

// ── Sine edition (Julian years) ───────────────────────────────────────────

/// Small sub-series added to the phase of [`SINE_CENTRE`].
#[rustfmt::skip]
const SINE_AUXILIARY: [Term; 4] = [
    Term::new(0.0006, 19.3, 54.0),
    Term::new(0.0006, 0.2, 71.0),
    Term::new(0.0020, 19.34, 55.0),
    Term::new(0.0040, 1.33, 119.5),
];

#[rustfmt::skip]
const SINE_TERMS: [Term; 62] = [
    Term::new(0.0003, 23221.3, 280.0),
    Term::new(0.0003, 40.7, 161.0),
    Term::new(0.0003, 5492.0, 311.0),
    Term::new(0.0003, 18089.3, 147.0),
    Term::new(0.0003, 3494.7, 66.0),
    Term::new(0.0003, 3814.0, 83.0),
    Term::new(0.0004, 720.0, 20.0),
    Term::new(0.0004, 9584.7, 71.0),
    Term::new(0.0004, 120.1, 278.0),
    Term::new(0.0004, 398.7, 313.0),
    Term::new(0.0005, 5091.3, 332.0),
    Term::new(0.0005, 17450.7, 114.0),
    Term::new(0.0005, 19088.0, 181.0),
    Term::new(0.0005, 22582.7, 247.0),
    Term::new(0.0006, 1118.7, 128.0),
    Term::new(0.0007, 278.6, 216.0),
    Term::new(0.0007, 4853.3, 275.0),
    Term::new(0.0007, 4052.0, 140.0),
    Term::new(0.0008, 7906.7, 204.0),
    Term::new(0.0008, 14037.3, 188.0),
    Term::new(0.0009, 8586.0, 218.0),
    Term::new(0.0011, 19208.02, 276.5),
    Term::new(0.0012, 12678.71, 339.0),
    Term::new(0.0016, 18569.38, 242.2),
    Term::new(0.0018, 4013.29, 4.1),
    Term::new(0.0020, 19.34, 55.0),
    Term::new(0.0021, 3413.37, 105.6),
    Term::new(0.0021, 719.98, 175.1),
    Term::new(0.0021, 9903.97, 87.5),
    Term::new(0.0022, 8185.36, 240.6),
    Term::new(0.0024, 9224.66, 252.8),
    Term::new(0.0024, 988.63, 211.9),
    Term::new(0.0026, 13797.39, 107.2),
    Term::new(0.0027, 9183.99, 272.5),
    Term::new(0.0037, 5410.62, 349.1),
    Term::new(0.0039, 17810.68, 111.3),
    Term::new(0.0040, 1.33, 119.5),
    Term::new(0.0040, 18449.32, 145.6),
    Term::new(0.0040, 13317.34, 13.2),
    Term::new(0.0048, 19.34, 235.0),
    Term::new(0.0050, 4812.66, 295.4),
    Term::new(0.0052, 319.32, 197.2),
    Term::new(0.0068, 9265.33, 53.2),
    Term::new(0.0079, 4493.34, 278.2),
    Term::new(0.0085, 8266.71, 201.5),
    Term::new(0.0100, 14315.966, 44.89),
    Term::new(0.0107, 13038.696, 336.44),
    Term::new(0.0110, 4892.052, 231.59),
    Term::new(0.0125, 14436.029, 141.51),
    Term::new(0.0153, 758.698, 130.84),
    Term::new(0.0305, 5131.979, 312.49),
    Term::new(0.0348, 4452.671, 117.84),
    Term::new(0.0410, 4411.998, 137.43),
    Term::new(0.0459, 8545.352, 238.18),
    Term::new(0.0533, 13677.331, 10.66),
    Term::new(0.0572, 3773.363, 103.21),
    Term::new(0.0588, 638.635, 214.22),
    Term::new(0.1143, 9664.0404, 6.546),
    Term::new(0.1856, 359.9905, 177.525),
    Term::new(0.2136, 9543.9773, 269.926),
    Term::new(0.6583, 8905.3422, 235.700),
    Term::new(1.2740, 4133.3536, 100.738),
];

/// Equation of centre, phase-perturbed by [`SINE_AUXILIARY`].
const SINE_CENTRE: Term = Term::new(6.2887, 4771.9886, 134.961);

const SINE_MEAN_RATE: f64 = 4_812.678_81;
const SINE_MEAN_AT_EPOCH: f64 = 218.316_1;

pub(super) fn sine_series(jy: f64) -> f64 {
    let auxiliary: f64 = SINE_AUXILIARY.iter().map(|term| term.sine(jy)).sum();
    let periodic: f64 = SINE_TERMS.iter().map(|term| term.sine(jy)).sum();
    let centre = SINE_CENTRE.amplitude
        * normalize_angle(SINE_CENTRE.phase + SINE_CENTRE.rate * jy + auxiliary)
            .to_radians()
            .sin();
    let mean = normalize_angle(SINE_MEAN_AT_EPOCH + SINE_MEAN_RATE * jy);
    normalize_angle(periodic + centre + mean)
}
