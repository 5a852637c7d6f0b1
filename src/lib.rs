// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ephemera
//!
//! Astronomical time scales and the ephemeris calculations built on them.
//!
//! # Time
//!
//! - [`Time<S>`]: generic instant parameterised by a [`TimeScale`] marker.
//! - [`JulianDate`], [`JulianEphemerisDay`], [`ModifiedJulianDate`],
//!   [`UniversalTime`]: aliases for the common scales.
//! - [`Period<S>`] / [`Interval<T>`]: half-open time intervals.
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date (TT axis) |
//! | [`JDE`] | Julian Ephemeris Day |
//! | [`MJD`] | Modified Julian Date |
//! | [`TT`] | Terrestrial Time |
//! | [`TAI`] | International Atomic Time |
//! | [`UT`] | Universal Time (Earth rotation) |
//!
//! # ΔT and leap seconds
//!
//! [`delta_t`] evaluates ΔT = TT − UT1 under a [`DeltaTModel`]. Any
//! [`DeltaTSource`] can be handed to the explicit converters
//! [`ut1_to_tt`] / [`tt_to_ut1`] and to the phase and season finders.
//! [`LeapSecondTable`] gives TAI − UTC.
//!
//! # Ephemerides
//!
//! - [`SeriesCoefficientSet`]: VSOP87D series evaluation, with a bundled
//!   truncated Earth set in [`vsop87::earth`].
//! - [`solar_position`]: apparent geocentric Sun.
//! - [`lunar_phase_near`], [`lunar_phases_in_period`], [`lunar_phases_in_year`].
//! - [`seasonal_marker_approx`], [`seasonal_marker`]: equinoxes and solstices.
//! - [`geodesic_distance`]: Andoyer distance on a [`Spheroid`].
//!
//! ```rust
//! use ephemera::{lunar_phase_near, DeltaTModel, LunarPhaseKind, UniversalTime};
//! use chrono::{TimeZone, Utc};
//!
//! let start = UniversalTime::from_utc(Utc.with_ymd_and_hms(1977, 2, 15, 0, 0, 0).unwrap());
//! let phase = lunar_phase_near(start, &DeltaTModel::Nasa)?;
//! assert_eq!(phase.kind, LunarPhaseKind::NewMoon);
//! # Ok::<(), ephemera::EphemerisError>(())
//! ```
//!
//! The library emits [`tracing`] events and never installs a subscriber.

mod angle;
mod convert;
mod delta_t;
mod errors;
mod geodesy;
pub(crate) mod instant;
mod julian_date_ext;
mod leap_seconds;
mod moon_phase;
mod period;
mod polynomial;
pub(crate) mod scales;
mod seasons;
mod sun;
pub mod vsop87;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use angle::{normalize_pi, normalize_tau, ARCSEC_TO_RAD};
pub use convert::{
    earth_rotation_angle, tai_minus_utc, tai_to_tt, tt_to_tai, tt_to_ut1, ut1_minus_utc,
    ut1_to_tt, UT1_MINUS_UTC_NOMINAL_BOUND,
};
pub use delta_t::{
    decimal_year, delta_t, lunar_ephemeris_correction, DeltaTFn, DeltaTModel, DeltaTSample,
    DeltaTSource, DeltaTTable,
};
pub use errors::{EphemerisError, EphemerisResult};
pub use geodesy::{geodesic_distance, GeographicPoint, Spheroid};
pub use instant::{Time, TimeInstant, TimeScale};
pub use leap_seconds::{LeapSecondEvent, LeapSecondTable, INITIAL_TAI_MINUS_UTC};
pub use moon_phase::{
    lunar_phase_for_lunation, lunar_phase_near, lunar_phases_in_period, lunar_phases_in_year,
    LunarPhase, LunarPhaseKind, LUNATION_EPOCH, MEAN_SYNODIC_MONTH, PHASE_YEAR_RANGE,
};
pub use period::{Interval, Period};
pub use polynomial::evaluate_polynomial;
pub use scales::{JD, JDE, MJD, TAI, TT, TT_MINUS_TAI, UT};
pub use seasons::{
    mean_marker_instant, seasonal_marker, seasonal_marker_approx, seasonal_markers_in_year,
    SeasonalMarker, SeasonalMarkerKind, CONVERGENCE_TOLERANCE, MARKER_YEAR_RANGE, MAX_ITERATIONS,
};
pub use sun::{
    apparent_solar_longitude, geometric_solar_position, nutation_in_longitude, solar_position,
    SolarPosition,
};
pub use vsop87::{
    body_position, Body, BundledSeries, CoefficientProvider, HeliocentricPosition, PeriodicTerm,
    SeriesCoefficientSet, SeriesVariable, ASTRONOMICAL_UNIT,
};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Date on the TT axis, [`Time<JD>`].
pub type JulianDate = Time<JD>;

/// Julian Ephemeris Day, [`Time<JDE>`].
pub type JulianEphemerisDay = Time<JDE>;

/// Modified Julian Date, `JD − 2 400 000.5`.
pub type ModifiedJulianDate = Time<MJD>;

/// Universal Time, [`Time<UT>`].
pub type UniversalTime = Time<UT>;
