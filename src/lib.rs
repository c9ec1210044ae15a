//! # Harmonic Tide Predictor
//!
//! This library predicts the height of the tide at a coastal station for any
//! time of a given day. A station's tide is described by a small set of
//! harmonic constituents (lunar and solar forcing terms), each with a
//! station-specific amplitude and phase lag. The height at an instant is the
//! station's mean level plus the sum of those constituents, modulated by slowly
//! varying astronomical arguments derived from the calendar date.
//!
//! ## Data Flow
//! 1. **Catalog**: a [`StationCatalog`] is loaded once (bundled table or file)
//!    and shared read-only between predictors
//! 2. **Constants**: selecting a station folds its raw fields into two `5 × 11`
//!    matrices of amplitudes and phase lags ([`HarmonicConstants`])
//! 3. **Day boundary**: selecting a date evaluates the astronomical arguments
//!    at 00:00 and 24:00 and reduces each species to a resultant amplitude and
//!    phase ([`SpeciesResultants`])
//! 4. **Height**: any query inside (or outside) the day interpolates those two
//!    states and sums one cosine per species
//!
//! ## Species
//! Constituents are grouped by species, the number of cycles per day:
//! - `0`: long period (Sa)
//! - `1`: diurnal (K1, O1, Q1 and derived terms)
//! - `2`: semidiurnal (M2, N2, S2 and derived terms)
//! - `3`: unused placeholder, always zero
//! - `4`: quarter-diurnal (MN4, M4, MS4)
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use tide_predictor_lib::{StationCatalog, TidePredictor};
//!
//! let catalog = Arc::new(StationCatalog::bundled().unwrap());
//! let tide = TidePredictor::new(catalog, Some("CONCARNEAU"), Some((1982, 1, 1))).unwrap();
//! assert_eq!(tide.height(0.0) as i64, 2302);
//! ```


pub mod astro;
pub mod catalog;
pub mod config;
pub mod date;
pub mod error;
pub mod harmonic;
pub mod interpolate;
pub mod predictor;
pub mod renderer;


pub use catalog::{StationCatalog, StationRecord};
pub use date::TideDate;
pub use error::{CatalogError, DateFault, TideError};
pub use harmonic::HarmonicConstants;
pub use interpolate::DayBoundary;
pub use predictor::{StationInfo, TidePredictor};

/// Number of species rows in the harmonic matrices.
pub const SPECIES: usize = 5;

/// Number of constituent slots per species.
pub const SLOTS: usize = 11;

/// Species row kept for layout compatibility; it never carries a term.
pub const UNUSED_SPECIES: usize = 3;

/// Fixed-shape `[species][slot]` matrix of amplitudes or phase lags.
pub type HarmonicMatrix = [[f64; SLOTS]; SPECIES];

/// Resultant amplitude (mm) and phase (degrees) of every species at one
/// instant.
///
/// Entry [`UNUSED_SPECIES`] is always zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeciesResultants {
    /// Resultant amplitude `R[j]`
    pub amplitude: [f64; SPECIES],
    /// Resultant phase `φ[j]` in degrees, within [-180, 180]
    pub phase: [f64; SPECIES],
}

/// A tide height at a given minute of the prediction day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Minutes since 00:00 local station time (0 to 1440)
    pub minute: u16,
    /// Height above chart datum in millimetres
    pub height_mm: f64,
}

/// Heights sampled at a fixed step across one prediction day.
///
/// # Example
/// ```
/// use tide_predictor_lib::{Sample, TideCurve};
///
/// let curve = TideCurve {
///     samples: vec![
///         Sample { minute: 0, height_mm: 2100.0 },
///         Sample { minute: 720, height_mm: 4300.0 },
///         Sample { minute: 1440, height_mm: 2250.0 },
///     ],
///     step_minutes: 720,
/// };
///
/// assert_eq!(curve.samples.len(), 3);
/// assert_eq!(curve.range_mm(), Some((2100.0, 4300.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TideCurve {
    /// Samples from minute 0 through minute 1440 inclusive
    pub samples: Vec<Sample>,
    /// Spacing between consecutive samples
    pub step_minutes: u16,
}

impl TideCurve {
    /// Lowest and highest sampled heights, or `None` for an empty curve.
    pub fn range_mm(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), sample| (min.min(sample.height_mm), max.max(sample.height_mm)),
        ))
    }
}
