//! # Error Types
//!
//! Two families of failure exist:
//! - [`CatalogError`]: the one-time load of a station table failed. Without a
//!   catalog nothing else can run, so callers usually abort on it.
//! - [`TideError`]: a request against a loaded catalog was refused. Every
//!   variant is raised before any predictor state changes, so a predictor
//!   always stays in its last valid configuration.

use std::io;
use thiserror::Error;

/// Why a calendar triple was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFault {
    /// Not a real calendar date (e.g. 31 April, 29 February 2023)
    #[error("the date is not valid")]
    NotACalendarDate,
    /// Outside the open window 1900-03-01 .. 2100-02-28
    #[error("the date is out of bounds, it must be between 1900-03-01 and 2100-02-28 (exclusive)")]
    OutOfRange,
}

/// Errors raised while selecting a station or a date.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TideError {
    /// The station name is not a key of the catalog
    #[error("station name not recognized: {0}")]
    UnknownStation(String),

    /// The calendar triple is malformed or outside the supported window
    #[error("invalid date {year:04}-{month:02}-{day:02}: {fault}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        fault: DateFault,
    },

    /// A field the harmonic model needs is absent from the station row
    #[error("station {station}: missing field {field}")]
    MissingField { station: String, field: String },

    /// A field is present but does not parse as a real number
    #[error("station {station}: field {field} is not a number ({value:?})")]
    MalformedField {
        station: String,
        field: String,
        value: String,
    },
}

/// Errors raised while loading a station table.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The table could not be read from storage
    #[error("catalog IO: {0}")]
    Io(#[from] io::Error),

    /// The table is not well-formed CSV
    #[error("catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row has no `NAME` column
    #[error("catalog has no NAME column")]
    MissingNameColumn,

    /// Two rows share the same station name
    #[error("duplicate station {0}")]
    DuplicateStation(String),

    /// No station rows remain after comment lines are removed
    #[error("catalog contains no stations")]
    Empty,

    /// The requested default station is not in the table
    #[error("default station {0} is not in the catalog")]
    UnknownDefault(String),
}
