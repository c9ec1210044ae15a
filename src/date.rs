//! # Prediction Date
//!
//! Harmonic constants are only meaningful within two centuries of the epoch
//! the astronomical arguments are referred to. A [`TideDate`] can only be
//! built for a real calendar day strictly between 1 March 1900 and
//! 28 February 2100; both bounds are themselves rejected.

use crate::error::{DateFault, TideError};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// A validated prediction date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TideDate(NaiveDate);

impl TideDate {
    /// Validate a calendar triple.
    ///
    /// # Example
    /// ```
    /// use tide_predictor_lib::{DateFault, TideDate, TideError};
    ///
    /// assert!(TideDate::new(1982, 1, 1).is_ok());
    ///
    /// let err = TideDate::new(2100, 3, 1).unwrap_err();
    /// assert!(matches!(err, TideError::InvalidDate { fault: DateFault::OutOfRange, .. }));
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TideError> {
        let invalid = |fault| TideError::InvalidDate {
            year,
            month,
            day,
            fault,
        };

        let date =
            NaiveDate::from_ymd_opt(year, month, day).ok_or(invalid(DateFault::NotACalendarDate))?;

        if Self::lower_bound() < date && date < Self::upper_bound() {
            Ok(TideDate(date))
        } else {
            Err(invalid(DateFault::OutOfRange))
        }
    }

    /// Today's date on the local clock.
    pub fn today() -> Result<Self, TideError> {
        let now = Local::now().date_naive();
        Self::new(now.year(), now.month(), now.day())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The following calendar day, if it is still inside the window.
    pub fn succ(&self) -> Option<Self> {
        self.0
            .succ_opt()
            .filter(|next| *next < Self::upper_bound())
            .map(TideDate)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    // Both bounds are excluded
    fn lower_bound() -> NaiveDate {
        NaiveDate::from_ymd_opt(1900, 3, 1).unwrap_or(NaiveDate::MIN)
    }

    fn upper_bound() -> NaiveDate {
        NaiveDate::from_ymd_opt(2100, 2, 28).unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for TideDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d %b %Y"))
    }
}
