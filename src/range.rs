use std::{cmp::Ordering, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AriaLabel, DateError, RANGE_SEPARATOR, prelude::*};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A hotel stay: check-in date up to (but not including) check-out date.
///
/// The aria labels are derived from the dates when the range is built and
/// are never set independently, so they always name the same calendar cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{check_in}/{check_out}")]
pub struct BookingDateRange {
    check_in:        NaiveDate,
    check_out:       NaiveDate,
    check_in_label:  AriaLabel,
    check_out_label: AriaLabel,
}

/// Error type for booking range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Check-out isn't after check-in.
    #[error("Invalid stay: check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidRange { check_in: NaiveDate, check_out: NaiveDate },

    /// Error computing one of the dates.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl BookingDateRange {
    /// Creates a stay of at least one night.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, RangeError> {
        if check_out <= check_in {
            return Err(RangeError::InvalidRange { check_in, check_out });
        }
        Ok(Self {
            check_in,
            check_out,
            check_in_label: AriaLabel::for_date(check_in),
            check_out_label: AriaLabel::for_date(check_out),
        })
    }

    /// Returns the check-in date
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Aria label of the check-in calendar cell
    pub const fn check_in_label(&self) -> &AriaLabel {
        &self.check_in_label
    }

    /// Aria label of the check-out calendar cell
    pub const fn check_out_label(&self) -> &AriaLabel {
        &self.check_out_label
    }

    /// Returns both dates as a tuple
    pub const fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.check_in, self.check_out)
    }

    /// Number of nights booked
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Checks if the guest is staying on the night of `date`.
    /// The check-out day itself is not a night of the stay.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Checks if two stays share at least one night.
    /// Back-to-back stays (one checks out the day the other checks in) don't overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Checks if every night of this stay is also a night of `other`
    pub fn is_within(&self, other: &Self) -> bool {
        other.check_in <= self.check_in && self.check_out <= other.check_out
    }

    /// Every night of the stay, in order
    pub fn iter_nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.check_in
            .iter_days()
            .take_while(move |night| *night < self.check_out)
    }
}

impl FromStr for BookingDateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (check_in, check_out) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                Self::new(parse_iso_date(check_in)?, parse_iso_date(check_out)?)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, RangeError> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|e| RangeError::InvalidFormat(format!("{trimmed}: {e}")))
}

impl PartialOrd for BookingDateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BookingDateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare check-in dates first, then check-out dates
        match self.check_in.cmp(&other.check_in) {
            Ordering::Equal => self.check_out.cmp(&other.check_out),
            ord => ord,
        }
    }
}

impl Serialize for BookingDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BookingDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
