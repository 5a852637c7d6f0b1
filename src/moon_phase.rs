// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Lunar phases
//!
//! Instants of New Moon, First Quarter, Full Moon and Last Quarter from the
//! periodic-term solution of Meeus, *Astronomical Algorithms* ch. 49.
//!
//! Phases are indexed by a *lunation number* `k`: `k = 0` is the New Moon
//! of 2000-01-06, integer `k` are New Moons and `k + 0.25`, `k + 0.5`,
//! `k + 0.75` the following First Quarter, Full Moon and Last Quarter.
//! The series gives the instant as a Julian Ephemeris Day; the ΔT source
//! turns it into Universal Time.
//!
//! ```rust
//! use ephemera::{lunar_phase_for_lunation, DeltaTModel, LunarPhaseKind};
//!
//! let phase = lunar_phase_for_lunation(-283.0, &DeltaTModel::Nasa)?;
//! assert_eq!(phase.kind, LunarPhaseKind::NewMoon);
//! assert!((phase.terrestrial.value() - 2_443_192.651_18).abs() < 1e-5);
//! # Ok::<(), ephemera::EphemerisError>(())
//! ```

use crate::angle::reduced_radians;
use crate::convert::tt_to_ut1;
use crate::delta_t::DeltaTSource;
use crate::errors::{EphemerisError, EphemerisResult};
use crate::instant::Time;
use crate::period::Period;
use crate::scales::{JDE, TT, UT};
use qtty::{Days, Simplify};
use std::fmt;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean length of the synodic month in days.
pub const MEAN_SYNODIC_MONTH: Days = Days::new(29.530_588_861);

/// New Moon of lunation 0: 2000-01-06T18:14 UT.
pub const LUNATION_EPOCH: Time<UT> = Time::new(2_451_551.259_722);

/// Years accepted by [`lunar_phases_in_year`].
pub const PHASE_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

// ── Phase kinds ───────────────────────────────────────────────────────────

/// The four principal phases, in lunation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LunarPhaseKind {
    NewMoon,
    FirstQuarter,
    FullMoon,
    ThirdQuarter,
}

impl LunarPhaseKind {
    pub const ALL: [LunarPhaseKind; 4] = [
        Self::NewMoon,
        Self::FirstQuarter,
        Self::FullMoon,
        Self::ThirdQuarter,
    ];

    /// Position within the lunation, 0…=3.
    pub const fn index(self) -> usize {
        match self {
            Self::NewMoon => 0,
            Self::FirstQuarter => 1,
            Self::FullMoon => 2,
            Self::ThirdQuarter => 3,
        }
    }

    pub fn from_index(index: usize) -> EphemerisResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            EphemerisError::invalid_argument(
                "phase",
                format!("phase index must be within 0..=3, got {index}"),
            )
        })
    }

    /// Kind targeted by a quarter-lunation index `round(4k)`.
    fn of_quarter(quarter: i64) -> Self {
        Self::ALL[quarter.rem_euclid(4) as usize]
    }
}

impl fmt::Display for LunarPhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NewMoon => "New Moon",
            Self::FirstQuarter => "First Quarter",
            Self::FullMoon => "Full Moon",
            Self::ThirdQuarter => "Third Quarter",
        };
        f.write_str(name)
    }
}

/// A solved lunar phase.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarPhase {
    pub kind: LunarPhaseKind,
    /// Instant on the UT axis.
    pub instant: Time<UT>,
    /// Lunation number `k`, a multiple of 0.25.
    pub lunation: f64,
    /// The series result before ΔT was removed.
    pub terrestrial: Time<JDE>,
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (k = {}) at {}", self.kind, self.lunation, self.instant)
    }
}

// ── Periodic terms ────────────────────────────────────────────────────────

/// `(coefficient, power of E, multiple of M, of M′, of F)`.
type PhaseTerm = (f64, i32, f64, f64, f64);

#[rustfmt::skip]
const NEW_MOON: [PhaseTerm; 24] = [
    (-0.407_20, 0,  0.0, 1.0,  0.0),
    ( 0.172_41, 1,  1.0, 0.0,  0.0),
    ( 0.016_08, 0,  0.0, 2.0,  0.0),
    ( 0.010_39, 0,  0.0, 0.0,  2.0),
    ( 0.007_39, 1, -1.0, 1.0,  0.0),
    (-0.005_14, 1,  1.0, 1.0,  0.0),
    ( 0.002_08, 2,  2.0, 0.0,  0.0),
    (-0.001_11, 0,  0.0, 1.0, -2.0),
    (-0.000_57, 0,  0.0, 1.0,  2.0),
    ( 0.000_56, 1,  1.0, 2.0,  0.0),
    (-0.000_42, 0,  0.0, 3.0,  0.0),
    ( 0.000_42, 1,  1.0, 0.0,  2.0),
    ( 0.000_38, 1,  1.0, 0.0, -2.0),
    (-0.000_24, 1, -1.0, 2.0,  0.0),
    (-0.000_07, 0,  2.0, 1.0,  0.0),
    ( 0.000_04, 0,  0.0, 2.0, -2.0),
    ( 0.000_04, 0,  3.0, 0.0,  0.0),
    ( 0.000_03, 0,  1.0, 1.0, -2.0),
    ( 0.000_03, 0,  0.0, 2.0,  2.0),
    (-0.000_03, 0,  1.0, 1.0,  2.0),
    ( 0.000_03, 0, -1.0, 1.0,  2.0),
    (-0.000_02, 0, -1.0, 1.0, -2.0),
    (-0.000_02, 0,  1.0, 3.0,  0.0),
    ( 0.000_02, 0,  0.0, 4.0,  0.0),
];

#[rustfmt::skip]
const FULL_MOON: [PhaseTerm; 24] = [
    (-0.406_14, 0,  0.0, 1.0,  0.0),
    ( 0.173_02, 1,  1.0, 0.0,  0.0),
    ( 0.016_14, 0,  0.0, 2.0,  0.0),
    ( 0.010_43, 0,  0.0, 0.0,  2.0),
    ( 0.007_34, 1, -1.0, 1.0,  0.0),
    (-0.005_15, 1,  1.0, 1.0,  0.0),
    ( 0.002_09, 2,  2.0, 0.0,  0.0),
    (-0.001_11, 0,  0.0, 1.0, -2.0),
    (-0.000_57, 0,  0.0, 1.0,  2.0),
    ( 0.000_56, 1,  1.0, 2.0,  0.0),
    (-0.000_42, 0,  0.0, 3.0,  0.0),
    ( 0.000_42, 1,  1.0, 0.0,  2.0),
    ( 0.000_38, 1,  1.0, 0.0, -2.0),
    (-0.000_24, 1, -1.0, 2.0,  0.0),
    (-0.000_07, 0,  2.0, 1.0,  0.0),
    ( 0.000_04, 0,  0.0, 2.0, -2.0),
    ( 0.000_04, 0,  3.0, 0.0,  0.0),
    ( 0.000_03, 0,  1.0, 1.0, -2.0),
    ( 0.000_03, 0,  0.0, 2.0,  2.0),
    (-0.000_03, 0,  1.0, 1.0,  2.0),
    ( 0.000_03, 0, -1.0, 1.0,  2.0),
    (-0.000_02, 0, -1.0, 1.0, -2.0),
    (-0.000_02, 0,  1.0, 3.0,  0.0),
    ( 0.000_02, 0,  0.0, 4.0,  0.0),
];

#[rustfmt::skip]
const QUARTER: [PhaseTerm; 24] = [
    (-0.628_01, 0,  0.0, 1.0,  0.0),
    ( 0.171_72, 1,  1.0, 0.0,  0.0),
    (-0.011_83, 1,  1.0, 1.0,  0.0),
    ( 0.008_62, 0,  0.0, 2.0,  0.0),
    ( 0.008_04, 0,  0.0, 0.0,  2.0),
    ( 0.004_54, 1, -1.0, 1.0,  0.0),
    ( 0.002_04, 2,  2.0, 0.0,  0.0),
    (-0.001_80, 0,  0.0, 1.0, -2.0),
    (-0.000_70, 0,  0.0, 1.0,  2.0),
    (-0.000_40, 0,  0.0, 3.0,  0.0),
    (-0.000_34, 1, -1.0, 2.0,  0.0),
    ( 0.000_32, 1,  1.0, 0.0,  2.0),
    ( 0.000_32, 1,  1.0, 0.0, -2.0),
    (-0.000_28, 2,  2.0, 1.0,  0.0),
    ( 0.000_27, 1,  1.0, 2.0,  0.0),
    (-0.000_05, 0, -1.0, 1.0, -2.0),
    ( 0.000_04, 0,  0.0, 2.0,  2.0),
    (-0.000_04, 0,  1.0, 1.0,  2.0),
    ( 0.000_04, 0, -2.0, 1.0,  0.0),
    ( 0.000_03, 0,  1.0, 1.0, -2.0),
    ( 0.000_03, 0,  3.0, 0.0,  0.0),
    ( 0.000_02, 0,  0.0, 2.0, -2.0),
    ( 0.000_02, 0, -1.0, 1.0,  2.0),
    (-0.000_02, 0,  1.0, 3.0,  0.0),
];

/// Planetary arguments `(A₀°, A₁°/lunation, amplitude days)`; A₁ also
/// carries `−0.009173·T²`.
#[rustfmt::skip]
const PLANETARY: [(f64, f64, f64); 14] = [
    (299.77,  0.107_408, 0.000_325),
    (251.88,  0.016_321, 0.000_165),
    (251.83, 26.651_886, 0.000_164),
    (349.42, 36.412_478, 0.000_126),
    ( 84.66, 18.206_239, 0.000_110),
    (141.74, 53.303_771, 0.000_062),
    (207.14,  2.453_732, 0.000_060),
    (154.84,  7.306_860, 0.000_056),
    ( 34.52, 27.261_239, 0.000_047),
    (207.19,  0.121_824, 0.000_042),
    (291.34,  1.844_379, 0.000_040),
    (161.72, 24.198_154, 0.000_037),
    (239.56, 25.513_099, 0.000_035),
    (331.55,  3.592_518, 0.000_023),
];

/// Corrected JDE of the phase with quarter index `quarter = 4k`.
fn phase_jde(quarter: i64) -> Time<JDE> {
    let k = quarter as f64 / 4.0;
    let kind = LunarPhaseKind::of_quarter(quarter);
    let t = k / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = 2_451_550.097_66 + 29.530_588_861 * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = 2.553_4 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3;
    let m_prime = 201.564_3 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4;
    let f = 160.710_8 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4;
    let omega = 124.774_6 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3;

    let terms: &[PhaseTerm] = match kind {
        LunarPhaseKind::NewMoon => &NEW_MOON,
        LunarPhaseKind::FullMoon => &FULL_MOON,
        LunarPhaseKind::FirstQuarter | LunarPhaseKind::ThirdQuarter => &QUARTER,
    };
    let periodic: f64 = terms
        .iter()
        .map(|&(coef, e_power, a, b, c)| {
            coef * e.powi(e_power) * reduced_radians(a * m + b * m_prime + c * f).sin()
        })
        .sum::<f64>()
        - 0.000_17 * reduced_radians(omega).sin();

    let planetary: f64 = PLANETARY
        .iter()
        .enumerate()
        .map(|(i, &(a0, a1, amplitude))| {
            let mut angle = a0 + a1 * k;
            if i == 0 {
                angle -= 0.009_173 * t2;
            }
            amplitude * reduced_radians(angle).sin()
        })
        .sum();

    let quarter_correction = match kind {
        LunarPhaseKind::FirstQuarter | LunarPhaseKind::ThirdQuarter => {
            let (m, m_prime, f) = (reduced_radians(m), reduced_radians(m_prime), reduced_radians(f));
            let w = 0.003_06 - 0.000_38 * e * m.cos() + 0.000_26 * m_prime.cos()
                - 0.000_02 * (m_prime - m).cos()
                + 0.000_02 * (m_prime + m).cos()
                + 0.000_02 * (2.0 * f).cos();
            if kind == LunarPhaseKind::FirstQuarter {
                w
            } else {
                -w
            }
        }
        _ => 0.0,
    };

    Time::new(mean + periodic + planetary + quarter_correction)
}

fn solve_quarter<D>(quarter: i64, delta_t: &D) -> EphemerisResult<LunarPhase>
where
    D: DeltaTSource + ?Sized,
{
    let terrestrial = phase_jde(quarter);
    let instant = tt_to_ut1(terrestrial.to::<TT>(), delta_t)?;
    Ok(LunarPhase {
        kind: LunarPhaseKind::of_quarter(quarter),
        instant,
        lunation: quarter as f64 / 4.0,
        terrestrial,
    })
}

/// Quarter index of the mean phase nearest `instant`.
fn nearest_quarter(instant: Time<UT>) -> i64 {
    let lunations = ((instant - LUNATION_EPOCH) / MEAN_SYNODIC_MONTH)
        .simplify()
        .value();
    (lunations * 4.0).round() as i64
}

// ── Public finders ────────────────────────────────────────────────────────

/// Solves the phase of lunation `k` (a multiple of 0.25).
pub fn lunar_phase_for_lunation<D>(k: f64, delta_t: &D) -> EphemerisResult<LunarPhase>
where
    D: DeltaTSource + ?Sized,
{
    let scaled = k * 4.0;
    if !scaled.is_finite() || scaled.fract() != 0.0 {
        return Err(EphemerisError::invalid_argument(
            "k",
            format!("lunation number must be a multiple of 0.25, got {k}"),
        ));
    }
    solve_quarter(scaled as i64, delta_t)
}

/// The principal phase nearest `instant`.
///
/// The mean lunation picks a target phase; that phase and its two
/// neighbours are solved and the one closest to `instant` wins, since the
/// periodic terms can shift a phase by more than half the mean spacing
/// away from its mean instant.
pub fn lunar_phase_near<D>(instant: Time<UT>, delta_t: &D) -> EphemerisResult<LunarPhase>
where
    D: DeltaTSource + ?Sized,
{
    let quarter = nearest_quarter(instant);
    let mut best = solve_quarter(quarter, delta_t)?;
    for neighbour in [quarter - 1, quarter + 1] {
        let candidate = solve_quarter(neighbour, delta_t)?;
        if (candidate.instant - instant).abs() < (best.instant - instant).abs() {
            best = candidate;
        }
    }
    debug!(
        target_k = quarter as f64 / 4.0,
        k = best.lunation,
        kind = %best.kind,
        "selected nearest lunar phase"
    );
    Ok(best)
}

/// Every principal phase in `[period.start, period.end)`, in time order.
///
/// An inverted period fails with
/// [`InvalidArgument`](EphemerisError::InvalidArgument).
pub fn lunar_phases_in_period<D>(
    period: Period<UT>,
    delta_t: &D,
) -> EphemerisResult<Vec<LunarPhase>>
where
    D: DeltaTSource + ?Sized,
{
    period.validate()?;
    let mut phases = Vec::new();
    if period.start == period.end {
        return Ok(phases);
    }

    let first = lunar_phase_near(period.start, delta_t)?;
    let mut quarter = (first.lunation * 4.0).round() as i64;
    if first.instant < period.start {
        quarter += 1;
    }
    loop {
        let phase = solve_quarter(quarter, delta_t)?;
        if phase.instant >= period.end {
            break;
        }
        phases.push(phase);
        quarter += 1;
    }
    debug!(count = phases.len(), %period, "lunar phases collected");
    Ok(phases)
}

/// Every principal phase of calendar year `year` (UT).
///
/// Years outside 1…=9999 fail with
/// [`OutOfRange`](EphemerisError::OutOfRange).
pub fn lunar_phases_in_year<D>(year: i32, delta_t: &D) -> EphemerisResult<Vec<LunarPhase>>
where
    D: DeltaTSource + ?Sized,
{
    if !PHASE_YEAR_RANGE.contains(&year) {
        return Err(EphemerisError::out_of_range(
            "lunar phase year",
            f64::from(year),
            f64::from(*PHASE_YEAR_RANGE.start()),
            f64::from(*PHASE_YEAR_RANGE.end()),
        ));
    }
    lunar_phases_in_period(Period::<UT>::calendar_year(year)?, delta_t)
}
