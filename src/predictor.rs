//! # Tide Predictor
//!
//! [`TidePredictor`] ties a shared [`StationCatalog`] to one selected station
//! and one date, and keeps the derived state consistent:
//! - Changing the station rebuilds the harmonic constants, then the day
//!   boundary
//! - Changing the date rebuilds only the day boundary
//!
//! Every change is validated and computed into locals first and stored only
//! when it fully succeeds, so a refused change leaves the predictor exactly
//! as it was.
//!
//! A predictor is plain owned data. Share the catalog between threads, not
//! the predictor; give each caller its own instance.

use crate::catalog::{StationCatalog, StationRecord};
use crate::date::TideDate;
use crate::error::TideError;
use crate::harmonic::HarmonicConstants;
use crate::interpolate::DayBoundary;
use crate::{Sample, TideCurve};
use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Minutes in one prediction day.
const MINUTES_PER_DAY: u16 = 1440;

/// Auxiliary station metadata read alongside the constants.
#[derive(Clone, Debug, PartialEq)]
pub struct StationInfo {
    pub name: String,
    /// Decimal degrees, north positive
    pub latitude: f64,
    /// Decimal degrees, east positive
    pub longitude: f64,
    /// Offset of the station's reference time from UTC, hours
    pub utc_offset: f64,
    /// `UTC` cell as written in the table, e.g. `+1.0`
    utc_offset_label: String,
}

impl StationInfo {
    fn from_station(station: &StationRecord) -> Result<Self, TideError> {
        let utc_offset = station.number("UTC")?;
        Ok(StationInfo {
            name: station.name().to_string(),
            latitude: station.number("LA")?,
            longitude: station.number("LO")?,
            utc_offset,
            utc_offset_label: station.field("UTC").unwrap_or_default().to_string(),
        })
    }
}

/// Harmonic tide prediction for one station on one day.
#[derive(Clone, Debug)]
pub struct TidePredictor {
    catalog: Arc<StationCatalog>,
    station: StationInfo,
    constants: HarmonicConstants,
    date: TideDate,
    boundary: DayBoundary,
}

impl TidePredictor {
    /// Create a predictor.
    ///
    /// `station` defaults to the catalog's default station and `date` to
    /// today's local date. The date is a full `(year, month, day)` triple or
    /// nothing.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use tide_predictor_lib::{StationCatalog, TidePredictor};
    ///
    /// let catalog = Arc::new(StationCatalog::bundled().unwrap());
    /// let tide = TidePredictor::new(catalog, Some("CONCARNEAU"), Some((2014, 1, 1))).unwrap();
    /// assert_eq!(tide.station_name(), "CONCARNEAU");
    /// assert_eq!((tide.date().year(), tide.date().month(), tide.date().day()), (2014, 1, 1));
    /// ```
    pub fn new(
        catalog: Arc<StationCatalog>,
        station: Option<&str>,
        date: Option<(i32, u32, u32)>,
    ) -> Result<Self, TideError> {
        let name = station.unwrap_or_else(|| catalog.default_station());
        let (station, constants) = Self::load_station(&catalog, name)?;
        let date = match date {
            Some((year, month, day)) => TideDate::new(year, month, day)?,
            None => TideDate::today()?,
        };

        let boundary = DayBoundary::compute(&constants, &date);
        debug!(station = %station.name, %date, "tide predictor created");

        Ok(TidePredictor {
            catalog,
            station,
            constants,
            date,
            boundary,
        })
    }

    /// Default station, today's date.
    pub fn with_defaults(catalog: Arc<StationCatalog>) -> Result<Self, TideError> {
        Self::new(catalog, None, None)
    }

    /// Select another station from the catalog.
    ///
    /// # Errors
    /// [`TideError::UnknownStation`] if the name is not in the catalog, or a
    /// data-integrity error if its row is incomplete. The predictor is left
    /// unchanged in both cases.
    pub fn set_station(&mut self, name: &str) -> Result<(), TideError> {
        let (station, constants) = Self::load_station(&self.catalog, name)?;
        let boundary = DayBoundary::compute(&constants, &self.date);

        self.station = station;
        self.constants = constants;
        self.boundary = boundary;
        debug!(station = name, date = %self.date, "station changed");
        Ok(())
    }

    /// Select another prediction date.
    ///
    /// # Errors
    /// [`TideError::InvalidDate`] for a malformed date or one outside
    /// 1900-03-01 .. 2100-02-28 (both excluded). The predictor is left
    /// unchanged.
    pub fn set_date(&mut self, year: i32, month: u32, day: u32) -> Result<(), TideError> {
        let date = TideDate::new(year, month, day)?;
        self.boundary = DayBoundary::compute(&self.constants, &date);
        self.date = date;
        debug!(station = %self.station.name, date = %self.date, "date changed");
        Ok(())
    }

    /// Tide height in millimetres above chart datum, `hours` after 00:00.
    ///
    /// `hours` may be fractional (9.5 is 09:30) and may fall outside
    /// `[0, 24]`, in which case the day's trend is extrapolated.
    pub fn height(&self, hours: f64) -> f64 {
        self.boundary.height_mm(self.constants.mean_level_cm, hours)
    }

    /// Tide height in millimetres at a wall-clock time of the prediction day.
    pub fn height_at(&self, time: NaiveTime) -> f64 {
        let hours = f64::from(time.num_seconds_from_midnight()) / 3600.0;
        self.height(hours)
    }

    /// Heights from 00:00 to 24:00 inclusive, every `step_minutes`.
    ///
    /// The step is clamped to `1..=1440`.
    pub fn curve(&self, step_minutes: u16) -> TideCurve {
        let step = step_minutes.clamp(1, MINUTES_PER_DAY);
        let samples = (0..=MINUTES_PER_DAY)
            .step_by(usize::from(step))
            .map(|minute| Sample {
                minute,
                height_mm: self.height(f64::from(minute) / 60.0),
            })
            .collect();

        TideCurve {
            samples,
            step_minutes: step,
        }
    }

    /// Timezone offset of the station as written in the table, e.g. `+1.0`.
    pub fn timezone_offset(&self) -> &str {
        &self.station.utc_offset_label
    }

    /// Timezone offset of the station in hours.
    pub fn utc_offset_hours(&self) -> f64 {
        self.station.utc_offset
    }

    pub fn station_name(&self) -> &str {
        &self.station.name
    }

    pub fn station(&self) -> &StationInfo {
        &self.station
    }

    pub fn date(&self) -> TideDate {
        self.date
    }

    pub fn constants(&self) -> &HarmonicConstants {
        &self.constants
    }

    pub fn day_boundary(&self) -> &DayBoundary {
        &self.boundary
    }

    pub fn catalog(&self) -> &Arc<StationCatalog> {
        &self.catalog
    }

    fn load_station(
        catalog: &StationCatalog,
        name: &str,
    ) -> Result<(StationInfo, HarmonicConstants), TideError> {
        let record = catalog
            .get(name)
            .ok_or_else(|| TideError::UnknownStation(name.to_string()))?;
        let constants = HarmonicConstants::from_station(record)?;
        let station = StationInfo::from_station(record)?;
        Ok((station, constants))
    }
}

impl fmt::Display for TidePredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tide prediction for {} on {}",
            self.station.name, self.date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<StationCatalog> {
        Arc::new(StationCatalog::bundled().unwrap())
    }

    #[test]
    fn test_display() {
        let tide = TidePredictor::new(catalog(), Some("CONCARNEAU"), Some((1982, 1, 1))).unwrap();
        assert_eq!(tide.to_string(), "Tide prediction for CONCARNEAU on 01 Jan 1982");
    }

    #[test]
    fn test_station_metadata() {
        let tide = TidePredictor::new(catalog(), Some("BREST"), Some((2014, 1, 1))).unwrap();
        assert_eq!(tide.timezone_offset(), "+1.0");
        assert_eq!(tide.utc_offset_hours(), 1.0);
        assert!((tide.station().latitude - 48.383).abs() < 1e-9);
        assert!(tide.station().longitude < 0.0);
    }

    #[test]
    fn test_height_at_matches_fractional_hours() {
        let tide = TidePredictor::new(catalog(), Some("BREST"), Some((2014, 1, 1))).unwrap();
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(tide.height_at(time), tide.height(9.5));
    }

    #[test]
    fn test_curve_spans_the_day() {
        let tide = TidePredictor::new(catalog(), Some("BREST"), Some((2014, 1, 1))).unwrap();
        let curve = tide.curve(10);
        assert_eq!(curve.samples.len(), 145);
        assert_eq!(curve.samples.first().map(|s| s.minute), Some(0));
        assert_eq!(curve.samples.last().map(|s| s.minute), Some(1440));
        assert_eq!(curve.samples[0].height_mm, tide.height(0.0));

        // Zero is clamped to one-minute steps
        assert_eq!(tide.curve(0).samples.len(), 1441);
        // Steps longer than a day leave only midnight
        assert_eq!(tide.curve(u16::MAX).samples.len(), 2);
    }

    #[test]
    fn test_incomplete_station_is_refused() {
        let table = "NAME,Z0,LA,LO,UTC\nBROKEN,300,47.0,-3.0,+1.0\n";
        let broken = StationCatalog::from_reader(table.as_bytes()).unwrap();
        let err = TidePredictor::new(Arc::new(broken), Some("BROKEN"), Some((2014, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, TideError::MissingField { .. }));
    }

    #[test]
    fn test_station_is_resolved_before_date() {
        let err = TidePredictor::new(catalog(), Some("ATLANTIS"), Some((1899, 12, 31))).unwrap_err();
        assert_eq!(err, TideError::UnknownStation("ATLANTIS".to_string()));

        let err = TidePredictor::new(catalog(), Some("BREST"), Some((1899, 12, 31))).unwrap_err();
        assert!(matches!(err, TideError::InvalidDate { .. }));
    }
}
