//! # Astronomical Arguments
//!
//! Converts a date and an hour of that day into the resultant amplitude and
//! phase of every species.
//!
//! ## Method
//! 1. **Day number**: days elapsed since the reference epoch, using the
//!    March-based calendar trick (January and February count as months 13 and
//!    14 of the previous year) so leap days fall at the end of the year
//! 2. **Mean longitudes**: five slowly varying angles, each affine in the day
//!    number: solar `h`, lunar `s`, lunar perigee `p`, lunar node `N` and
//!    solar perigee `p1`, plus the fixed reference phase `D = 90°`
//! 3. **Arguments**: each constituent's argument is a fixed integer
//!    combination of those angles (tables `N1`..`N6`) plus the species'
//!    rotation of `15°·j` per hour
//! 4. **Resultant**: the constituents of one species are summed as vectors,
//!    giving one amplitude `R[j]` and phase `φ[j]`
//!
//! Predictions only ever evaluate this at hour 0 and hour 24 of a day; the
//! [`crate::interpolate`] module fills in the hours between.

use crate::date::TideDate;
use crate::harmonic::HarmonicConstants;
use crate::{SpeciesResultants, SLOTS, SPECIES, UNUSED_SPECIES};

/// Day number of the reference epoch (1980-01-01) in the March-based count.
const EPOCH_DAY: f64 = 723_258.0;

/// Reference phase `D`, degrees.
const REFERENCE_PHASE: f64 = 90.0;

/// Phase returned for a species whose resultant vanishes.
const DEGENERATE_PHASE: f64 = 90.0;

/// Multipliers of the mean lunar longitude `s`.
const N1: [[i8; SLOTS]; SPECIES] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, -2, -3, 0, -2, 0, 0, 0, 0, 0, 0],
    [-2, -3, 0, -4, -4, -3, -1, 0, 0, -2, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [-5, -4, -2, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Multipliers of the mean solar longitude `h`.
const N2: [[i8; SLOTS]; SPECIES] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, -1, 1, 1, 0, 0, 0, 0, 0],
    [2, 2, 0, 2, 4, 4, 2, 2, -1, 2, 2],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 4, 2, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Multipliers of the lunar perigee `p`.
const N3: [[i8; SLOTS]; SPECIES] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 0, 2, 0, -1, -1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Multipliers of the lunar node `N`.
const N4: [[i8; SLOTS]; SPECIES] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, -1, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, -1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Multipliers of the solar perigee `p1` (none of the modelled terms use it).
const N5: [[i8; SLOTS]; SPECIES] = [[0; SLOTS]; SPECIES];

/// Multipliers of the reference phase `D`.
const N6: [[i8; SLOTS]; SPECIES] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, -1, -1, 1, -1, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Mean longitudes (degrees) at one instant. Not reduced modulo 360.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanLongitudes {
    /// Mean longitude of the sun
    pub h: f64,
    /// Mean longitude of the moon
    pub s: f64,
    /// Longitude of the lunar perigee
    pub p: f64,
    /// Longitude of the moon's ascending node
    pub n: f64,
    /// Longitude of the solar perigee
    pub p1: f64,
}

impl MeanLongitudes {
    /// Longitudes `day_number` days after the epoch.
    pub fn at(day_number: f64) -> Self {
        MeanLongitudes {
            h: 279.82 + 0.98564734 * day_number,
            s: 78.16 + 13.17639673 * day_number,
            p: 349.5 + 0.11140408 * day_number,
            n: 208.1 + 0.05295392 * day_number,
            p1: 282.6 + 0.000047069 * day_number,
        }
    }
}

/// Days from the epoch to `hours` past midnight of `date`.
///
/// January and February are folded into the previous year as months 13
/// and 14 before the day count is taken.
pub fn day_number(date: &TideDate, hours: f64) -> f64 {
    let year = f64::from(date.year());
    let month = f64::from(date.month());
    let day = f64::from(date.day());

    // 1 for January and February, 0 otherwise
    let early = (1.0 / (month + 1.0) + 0.7).floor();

    (30.6001 * (1.0 + month + 12.0 * early)).floor() + (365.25 * (year - early)).floor() + day
        + hours / 24.0
        - EPOCH_DAY
}

/// Argument `V` (degrees) of constituent `slot` of `species`, `hours` into
/// the day.
pub fn constituent_argument(
    species: usize,
    slot: usize,
    hours: f64,
    longitudes: &MeanLongitudes,
) -> f64 {
    let m = |table: &[[i8; SLOTS]; SPECIES]| f64::from(table[species][slot]);

    15.0 * species as f64 * hours
        + m(&N1) * longitudes.s
        + m(&N2) * longitudes.h
        + m(&N3) * longitudes.p
        + m(&N4) * longitudes.n
        + m(&N5) * longitudes.p1
        + m(&N6) * REFERENCE_PHASE
}

/// Resultant amplitude and phase of every species, `hours` into `date`.
///
/// # Example
/// ```
/// use tide_predictor_lib::astro::species_resultants;
/// use tide_predictor_lib::{HarmonicConstants, StationCatalog, TideDate};
///
/// let catalog = StationCatalog::bundled().unwrap();
/// let constants = HarmonicConstants::from_station(catalog.get("BREST").unwrap()).unwrap();
/// let date = TideDate::new(1982, 1, 1).unwrap();
///
/// let resultants = species_resultants(&constants, &date, 0.0);
/// // The long-period species has a single term, so R equals its amplitude
/// assert!((resultants.amplitude[0] - constants.amplitude[0][0]).abs() < 1e-9);
/// ```
pub fn species_resultants(
    constants: &HarmonicConstants,
    date: &TideDate,
    hours: f64,
) -> SpeciesResultants {
    let longitudes = MeanLongitudes::at(day_number(date, hours));
    let mut resultants = SpeciesResultants::default();

    for species in (0..SPECIES).filter(|&j| j != UNUSED_SPECIES) {
        let mut x = 0.0;
        let mut y = 0.0;
        for slot in 0..SLOTS {
            let angle = (constituent_argument(species, slot, hours, &longitudes)
                - constants.phase[species][slot])
                .to_radians();
            let amplitude = constants.amplitude[species][slot];
            x += amplitude * angle.cos();
            y += amplitude * angle.sin();
        }

        let (amplitude, phase) = resultant(x, y);
        resultants.amplitude[species] = amplitude;
        resultants.phase[species] = phase;
    }

    resultants
}

/// Polar form of the in-phase `x` and quadrature `y` sums.
///
/// The phase lies in [-180, 180]; its sign follows `y` (a negative zero
/// counts as negative). A zero vector has phase 90°.
pub fn resultant(x: f64, y: f64) -> (f64, f64) {
    let amplitude = (x.powi(2) + y.powi(2)).sqrt();
    if amplitude == 0.0 {
        return (amplitude, DEGENERATE_PHASE);
    }

    // Rounding can push the ratios a hair past ±1
    let cos_ratio = (x / amplitude).clamp(-1.0, 1.0);
    let sin_ratio = (y / amplitude).clamp(-1.0, 1.0);
    let sign = sin_ratio.asin().to_degrees().signum();

    (amplitude, cos_ratio.acos().to_degrees() * sign)
}
