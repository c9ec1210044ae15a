//! # Height Interpolation
//!
//! The astronomical arguments drift slowly, so a day is summarised by the
//! species resultants at its two ends. Between them each species amplitude is
//! interpolated linearly, and each phase advances by `j` full turns plus the
//! small drift between the two ends. The height is the station mean level
//! plus one cosine per species.
//!
//! Hours outside `[0, 24]` are not rejected: they extrapolate the same
//! straight lines, which stays close to the truth for a few hours either side.

use crate::astro::species_resultants;
use crate::date::TideDate;
use crate::harmonic::HarmonicConstants;
use crate::{SpeciesResultants, SPECIES, UNUSED_SPECIES};

/// Species resultants at 00:00 and 24:00 of one day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayBoundary {
    /// `R0`, `φ0`
    pub start: SpeciesResultants,
    /// `R24`, `φ24`
    pub end: SpeciesResultants,
}

impl DayBoundary {
    /// Evaluate the resultants of `constants` at both ends of `date`.
    pub fn compute(constants: &HarmonicConstants, date: &TideDate) -> Self {
        DayBoundary {
            start: species_resultants(constants, date, 0.0),
            end: species_resultants(constants, date, 24.0),
        }
    }

    /// Height in millimetres, `hours` after 00:00.
    ///
    /// `mean_level_cm` is the station's `Z0`, stored in centimetres.
    pub fn height_mm(&self, mean_level_cm: f64, hours: f64) -> f64 {
        let fraction = hours / 24.0;
        let mut height = mean_level_cm * 10.0;

        for species in (0..SPECIES).filter(|&j| j != UNUSED_SPECIES) {
            let r0 = self.start.amplitude[species];
            let phi0 = self.start.phase[species];
            let amplitude = r0 + fraction * (self.end.amplitude[species] - r0);

            let delta = normalize_phase_delta(self.end.phase[species] - phi0);
            let phase = phi0 + fraction * (species as f64 * 360.0 + delta);

            height += amplitude * phase.to_radians().cos();
        }

        height
    }
}

/// Bring a phase difference back into [-180, 180] with at most one turn.
///
/// Inputs are differences of two phases that each lie in [-180, 180], so a
/// single correction is always enough.
pub fn normalize_phase_delta(delta: f64) -> f64 {
    if delta < -180.0 {
        delta + 360.0
    } else if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
