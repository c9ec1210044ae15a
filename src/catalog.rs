//! # Station Catalog
//!
//! An immutable table of tide stations keyed by their upper-case name. Each
//! row keeps its raw text cells; numeric interpretation happens later, when a
//! predictor selects the station, so a damaged row only fails the station it
//! belongs to.
//!
//! ## Table Format
//! - Comma separated, first non-comment line is the header
//! - Lines starting with `#` are dropped before CSV parsing
//! - A `NAME` column is mandatory, every other column becomes a named field
//!   (`Z0`, `AM2`, `GM2`, `LA`, `LO`, `UTC`, ...)
//!
//! ## Sharing
//! A catalog is loaded once and wrapped in an `Arc` by the caller. Predictors
//! only ever read it, so any number of them can share one instance.

use crate::error::{CatalogError, TideError};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Station table compiled into the crate.
const BUNDLED: &str = include_str!("../data/stations.csv");

/// Lines starting with this marker are comments.
const COMMENT_MARKER: char = '#';

/// Column holding the station key.
const NAME_COLUMN: &str = "NAME";

/// Station selected when the caller does not name one.
pub const DEFAULT_STATION: &str = "BREST";

/// One row of the station table.
#[derive(Clone, Debug, PartialEq)]
pub struct StationRecord {
    name: String,
    fields: BTreeMap<String, String>,
}

impl StationRecord {
    /// Build a record from a name and its raw field cells.
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        StationRecord {
            name: name.into(),
            fields,
        }
    }

    /// Station key, e.g. `CONCARNEAU`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw cell text for `field`, if the column exists.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Cell `field` parsed as a finite real number.
    ///
    /// A missing or unparseable cell is a data-integrity failure of this
    /// station and is reported as such rather than defaulted.
    pub fn number(&self, field: &str) -> Result<f64, TideError> {
        let raw = self.field(field).ok_or_else(|| TideError::MissingField {
            station: self.name.clone(),
            field: field.to_string(),
        })?;

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(TideError::MalformedField {
                station: self.name.clone(),
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

/// Immutable mapping from station name to [`StationRecord`].
#[derive(Clone, Debug)]
pub struct StationCatalog {
    stations: BTreeMap<String, StationRecord>,
    default_station: String,
}

impl StationCatalog {
    /// Load the station table bundled with the crate.
    ///
    /// The bundled constants are illustrative values of realistic magnitude,
    /// not published harmonic data, and must not be used for navigation. Load
    /// an authoritative table with [`StationCatalog::from_path`] instead.
    ///
    /// # Example
    /// ```
    /// use tide_predictor_lib::StationCatalog;
    ///
    /// let catalog = StationCatalog::bundled().unwrap();
    /// assert_eq!(catalog.default_station(), "BREST");
    /// assert!(catalog.get("CONCARNEAU").is_some());
    /// ```
    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::parse(BUNDLED)?;
        info!(stations = catalog.len(), source = "bundled", "station catalog loaded");
        Ok(catalog)
    }

    /// Load a station table from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(&path)?;
        let catalog = Self::parse(&text)?;
        info!(
            stations = catalog.len(),
            source = %path.as_ref().display(),
            "station catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a station table from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Use `name` as the default station instead of the one picked at load.
    pub fn with_default(mut self, name: &str) -> Result<Self, CatalogError> {
        if !self.stations.contains_key(name) {
            return Err(CatalogError::UnknownDefault(name.to_string()));
        }
        self.default_station = name.to_string();
        Ok(self)
    }

    /// Station names in sorted order. Never empty.
    pub fn list_stations(&self) -> Vec<&str> {
        self.stations.keys().map(String::as_str).collect()
    }

    /// Exact-match lookup.
    pub fn get(&self, name: &str) -> Option<&StationRecord> {
        self.stations.get(name)
    }

    /// Name used when a predictor is created without one.
    pub fn default_station(&self) -> &str {
        &self.default_station
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    fn parse(text: &str) -> Result<Self, CatalogError> {
        let data = text
            .lines()
            .filter(|line| !line.starts_with(COMMENT_MARKER))
            .collect::<Vec<_>>()
            .join("\n");

        // Short rows load; their absent cells surface when the station is selected
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let headers = reader.headers()?.clone();
        let name_column = headers
            .iter()
            .position(|header| header == NAME_COLUMN)
            .ok_or(CatalogError::MissingNameColumn)?;

        let mut stations = BTreeMap::new();
        for row in reader.records() {
            let row = row?;
            let mut name = String::new();
            let mut fields = BTreeMap::new();

            for (column, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
                if column == name_column {
                    name = cell.to_string();
                } else {
                    fields.insert(header.to_string(), cell.to_string());
                }
            }

            if stations.contains_key(&name) {
                return Err(CatalogError::DuplicateStation(name));
            }
            stations.insert(name.clone(), StationRecord::new(name, fields));
        }

        // BREST when present, otherwise the first name in order
        let default_station = if stations.contains_key(DEFAULT_STATION) {
            DEFAULT_STATION.to_string()
        } else {
            let first = stations.keys().next().cloned().ok_or(CatalogError::Empty)?;
            warn!(default = %first, "catalog has no BREST row, using first station as default");
            first
        };

        Ok(StationCatalog {
            stations,
            default_station,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL_TABLE: &str = "\
# two stations
NAME,Z0,AM2,GM2
# comment between rows
ALPHA,100,1500,90
BETA, 250.5 ,abc,12
";

    #[test]
    fn test_bundled_catalog_contains_default() {
        let catalog = StationCatalog::bundled().unwrap();
        let names = catalog.list_stations();
        assert!(!names.is_empty());
        assert!(names.contains(&"BREST"));
        assert!(names.contains(&"CONCARNEAU"));
        assert_eq!(catalog.default_station(), DEFAULT_STATION);
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let catalog = StationCatalog::from_reader(SMALL_TABLE.as_bytes()).unwrap();
        assert_eq!(catalog.list_stations(), vec!["ALPHA", "BETA"]);
        // No BREST in this table, so the first name becomes the default
        assert_eq!(catalog.default_station(), "ALPHA");
    }

    #[test]
    fn test_name_column_is_not_a_field() {
        let catalog = StationCatalog::from_reader(SMALL_TABLE.as_bytes()).unwrap();
        let alpha = catalog.get("ALPHA").unwrap();
        assert_eq!(alpha.name(), "ALPHA");
        assert_eq!(alpha.field("NAME"), None);
        assert_eq!(alpha.field("AM2"), Some("1500"));
    }

    #[test]
    fn test_number_parsing_and_integrity_errors() {
        let catalog = StationCatalog::from_reader(SMALL_TABLE.as_bytes()).unwrap();
        let beta = catalog.get("BETA").unwrap();

        // Cells are trimmed
        assert_eq!(beta.number("Z0").unwrap(), 250.5);
        assert_eq!(
            beta.number("AM2"),
            Err(TideError::MalformedField {
                station: "BETA".to_string(),
                field: "AM2".to_string(),
                value: "abc".to_string(),
            })
        );
        assert_eq!(
            beta.number("AS2"),
            Err(TideError::MissingField {
                station: "BETA".to_string(),
                field: "AS2".to_string(),
            })
        );
    }

    #[test]
    fn test_signed_offsets_parse() {
        let catalog = StationCatalog::bundled().unwrap();
        let brest = catalog.get("BREST").unwrap();
        assert_eq!(brest.field("UTC"), Some("+1.0"));
        assert_eq!(brest.number("UTC").unwrap(), 1.0);
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = StationCatalog::bundled().unwrap();
        assert!(catalog.get("brest").is_none());
        assert!(catalog.get("BREST ").is_none());
    }

    #[test]
    fn test_with_default() {
        let catalog = StationCatalog::from_reader(SMALL_TABLE.as_bytes()).unwrap();
        let catalog = catalog.with_default("BETA").unwrap();
        assert_eq!(catalog.default_station(), "BETA");

        let err = catalog.with_default("GAMMA").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDefault(name) if name == "GAMMA"));
    }

    #[test]
    fn test_load_errors() {
        let no_name = StationCatalog::from_reader("STATION,Z0\nX,1\n".as_bytes());
        assert!(matches!(no_name, Err(CatalogError::MissingNameColumn)));

        let empty = StationCatalog::from_reader("# nothing\nNAME,Z0\n".as_bytes());
        assert!(matches!(empty, Err(CatalogError::Empty)));

        let duplicate = StationCatalog::from_reader("NAME,Z0\nX,1\nX,2\n".as_bytes());
        assert!(matches!(duplicate, Err(CatalogError::DuplicateStation(name)) if name == "X"));

    }

    #[test]
    fn test_ragged_rows_load() {
        let catalog = StationCatalog::from_reader("NAME,Z0,AM2\nLONG,1,2,3\nSHORT,4\n".as_bytes())
            .unwrap();
        assert_eq!(catalog.list_stations(), vec!["LONG", "SHORT"]);

        // Cells beyond the header are ignored
        let long = catalog.get("LONG").unwrap();
        assert_eq!(long.field("Z0"), Some("1"));
        assert_eq!(long.field("AM2"), Some("2"));

        // Absent cells only fail the row they are missing from
        let short = catalog.get("SHORT").unwrap();
        assert_eq!(short.number("Z0"), Ok(4.0));
        assert!(matches!(
            short.number("AM2"),
            Err(TideError::MissingField { station, field }) if station == "SHORT" && field == "AM2"
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SMALL_TABLE.as_bytes()).unwrap();

        let catalog = StationCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let missing = StationCatalog::from_path("/nonexistent/stations.csv");
        assert!(matches!(missing, Err(CatalogError::Io(_))));
    }
}
