//! # Harmonic Constant Model
//!
//! Folds a station's raw table fields into two `5 × 11` matrices, amplitudes
//! `A` and phase lags `G`, indexed by species and constituent slot.
//!
//! Slots 0-2 of each active species hold the primary constituents read from
//! the table. The remaining diurnal and semidiurnal slots are secondary
//! constituents that the table does not carry: their amplitude is a fixed
//! fraction of a primary's and their phase lag is the primary's, shifted in
//! one case. The whole derivation is the single [`CONSTITUENT_RULES`] table.

use crate::catalog::StationRecord;
use crate::error::TideError;
use crate::{HarmonicMatrix, SLOTS, SPECIES};

/// Field holding the mean level above chart datum, in centimetres.
const MEAN_LEVEL_FIELD: &str = "Z0";

/// How one matrix cell is filled from the station table.
#[derive(Clone, Copy, Debug)]
pub struct ConstituentRule {
    pub species: usize,
    pub slot: usize,
    /// Field the amplitude is read from
    pub amplitude: &'static str,
    /// Factor applied to that amplitude
    pub scale: f64,
    /// Field the phase lag is read from
    pub phase: &'static str,
    /// Degrees added to that phase lag
    pub phase_offset: f64,
}

const fn primary(
    species: usize,
    slot: usize,
    amplitude: &'static str,
    phase: &'static str,
) -> ConstituentRule {
    ConstituentRule {
        species,
        slot,
        amplitude,
        scale: 1.0,
        phase,
        phase_offset: 0.0,
    }
}

const fn derived(
    species: usize,
    slot: usize,
    scale: f64,
    amplitude: &'static str,
    phase: &'static str,
    phase_offset: f64,
) -> ConstituentRule {
    ConstituentRule {
        species,
        slot,
        amplitude,
        scale,
        phase,
        phase_offset,
    }
}

/// Every non-zero cell of the `A` and `G` matrices.
pub const CONSTITUENT_RULES: [ConstituentRule; 21] = [
    // Long period
    primary(0, 0, "ASa", "GSa"),
    // Diurnal
    primary(1, 0, "AK1", "GK1"),
    primary(1, 1, "AO1", "GO1"),
    primary(1, 2, "AQ1", "GQ1"),
    derived(1, 3, -1.0 / 3.0, "AK1", "GK1", 0.0),
    derived(1, 4, 1.0 / 5.3, "AO1", "GO1", 0.0),
    derived(1, 5, 1.0 / 7.4, "AK1", "GK1", 0.0),
    // Semidiurnal
    primary(2, 0, "AM2", "GM2"),
    primary(2, 1, "AN2", "GN2"),
    primary(2, 2, "AS2", "GS2"),
    derived(2, 3, 1.0 / 7.6, "AN2", "GN2", 0.0),
    derived(2, 4, 1.0 / 6.3, "AN2", "GN2", 0.0),
    derived(2, 5, 1.0 / 5.3, "AN2", "GN2", 0.0),
    derived(2, 6, -1.0 / 35.0, "AM2", "GM2", 0.0),
    derived(2, 7, 1.0 / 3.7, "AS2", "GS2", 0.0),
    derived(2, 8, 1.0 / 17.0, "AS2", "GS2", -283.0),
    derived(2, 9, -1.0 / 27.0, "AM2", "GM2", 0.0),
    derived(2, 10, 1.0 / 12.0, "AS2", "GS2", 0.0),
    // Quarter-diurnal
    primary(4, 0, "AMN4", "GMN4"),
    primary(4, 1, "AM4", "GM4"),
    primary(4, 2, "AMS4", "GMS4"),
];

/// Harmonic constants of one station.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicConstants {
    /// Mean level above chart datum, centimetres
    pub mean_level_cm: f64,
    /// Amplitudes `A[species][slot]`, millimetres
    pub amplitude: HarmonicMatrix,
    /// Phase lags `G[species][slot]`, degrees
    pub phase: HarmonicMatrix,
}

impl HarmonicConstants {
    /// Build the matrices for `station`.
    ///
    /// Fails on the first required field that is missing or not a number.
    pub fn from_station(station: &StationRecord) -> Result<Self, TideError> {
        let mut amplitude = [[0.0; SLOTS]; SPECIES];
        let mut phase = [[0.0; SLOTS]; SPECIES];

        for rule in CONSTITUENT_RULES.iter() {
            amplitude[rule.species][rule.slot] = rule.scale * station.number(rule.amplitude)?;
            phase[rule.species][rule.slot] = station.number(rule.phase)? + rule.phase_offset;
        }

        Ok(HarmonicConstants {
            mean_level_cm: station.number(MEAN_LEVEL_FIELD)?,
            amplitude,
            phase,
        })
    }
}
