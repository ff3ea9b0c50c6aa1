mod clock;
mod config;
mod consts;
mod fixtures;
mod logging;
mod pages;
mod prelude;
mod range;
mod scenario;
#[cfg(test)]
mod testkit;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use self::config::SuiteConfig;
pub use consts::*;
pub use fixtures::{AddOnFixture, Address, CardDetails, FixtureError, GuestDetails, RoomFixture, TestData};
pub use logging::init_tracing;
pub use pages::{BookingSummaryPage, CheckoutPage, HomePage, Locator, Page, PageError};
pub use range::{BookingDateRange, RangeError};
pub use scenario::{BookingScenario, Condition, ScenarioError, ScenarioReport, Step, Timeouts};
pub use types::AriaLabel;

use crate::prelude::*;
use chrono::{Days, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Date {days} days from {from} is outside the supported calendar")]
    OutOfRange { from: NaiveDate, days: i64 },
    #[display(fmt = "Not a calendar aria label: {_0:?}")]
    InvalidLabel(String),
    #[display(fmt = "Empty label string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

/// Computes booking dates relative to "today" as reported by a [`Clock`].
///
/// Every call re-reads the clock, so a long-running suite that crosses
/// midnight still targets the right calendar cells. Nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateGenerator<C = SystemClock> {
    clock: C,
}

impl DateGenerator<SystemClock> {
    /// Generator backed by the local wall clock
    pub const fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> DateGenerator<C> {
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Current local date according to the clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Returns today's date shifted by `days_from_today` whole calendar days.
    ///
    /// Zero and negative offsets are allowed.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` only if the result falls outside the
    /// calendar chrono can represent.
    pub fn future_date(&self, days_from_today: i64) -> Result<NaiveDate, DateError> {
        offset_date(self.today(), days_from_today)
    }

    /// Aria label of the check-in cell (tomorrow)
    ///
    /// # Errors
    /// See [`DateGenerator::future_date`].
    pub fn tomorrow_aria_label(&self) -> Result<String, DateError> {
        self.future_date(CHECK_IN_LEAD_DAYS)
            .map(format_for_aria_label)
    }

    /// Aria label of the check-out cell
    ///
    /// # Errors
    /// See [`DateGenerator::future_date`].
    pub fn check_out_aria_label(&self) -> Result<String, DateError> {
        self.future_date(CHECK_OUT_OFFSET_DAYS)
            .map(format_for_aria_label)
    }

    /// Check-in and check-out dates of the standard stay, with their labels.
    ///
    /// "Today" is read once so both dates come from the same calendar day.
    ///
    /// # Errors
    /// Returns `RangeError::Date` if either date is out of range.
    pub fn booking_date_range(&self) -> Result<BookingDateRange, RangeError> {
        let today = self.today();
        let check_in = offset_date(today, CHECK_IN_LEAD_DAYS)?;
        let check_out = offset_date(today, CHECK_OUT_OFFSET_DAYS)?;
        BookingDateRange::new(check_in, check_out)
    }
}

fn offset_date(from: NaiveDate, days: i64) -> Result<NaiveDate, DateError> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        from.checked_add_days(magnitude)
    } else {
        from.checked_sub_days(magnitude)
    };
    shifted.ok_or(DateError::OutOfRange { from, days })
}

/// Renders `date` exactly as the calendar widget's accessible label,
/// e.g. `Friday, June 21, 2024`.
pub fn format_for_aria_label(date: NaiveDate) -> String {
    date.format(ARIA_LABEL_FORMAT).to_string()
}

/// Renders `date` in the short display form, e.g. `Fri, Jun 21, 2024`.
pub fn format_for_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Reads a calendar aria label back into a date.
///
/// Only the canonical rendering is accepted: abbreviated names, zero-padded
/// days and a weekday that doesn't match the date are all rejected.
///
/// # Errors
/// Returns `DateError::EmptyInput` for blank input and
/// `DateError::InvalidLabel` for anything else that isn't a canonical label.
pub fn parse_aria_label(label: &str) -> Result<NaiveDate, DateError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(DateError::EmptyInput);
    }

    let date = NaiveDate::parse_from_str(trimmed, "%A, %B %d, %Y")
        .map_err(|_| DateError::InvalidLabel(trimmed.to_owned()))?;

    // chrono's parser is lenient about name length and padding
    if format_for_aria_label(date) != trimmed {
        return Err(DateError::InvalidLabel(trimmed.to_owned()));
    }
    Ok(date)
}

/// [`DateGenerator::future_date`] against the local clock
///
/// # Errors
/// See [`DateGenerator::future_date`].
pub fn future_date(days_from_today: i64) -> Result<NaiveDate, DateError> {
    DateGenerator::system().future_date(days_from_today)
}

/// [`DateGenerator::tomorrow_aria_label`] against the local clock
///
/// # Errors
/// See [`DateGenerator::future_date`].
pub fn tomorrow_aria_label() -> Result<String, DateError> {
    DateGenerator::system().tomorrow_aria_label()
}

/// [`DateGenerator::check_out_aria_label`] against the local clock
///
/// # Errors
/// See [`DateGenerator::future_date`].
pub fn check_out_aria_label() -> Result<String, DateError> {
    DateGenerator::system().check_out_aria_label()
}

/// [`DateGenerator::booking_date_range`] against the local clock
///
/// # Errors
/// See [`DateGenerator::booking_date_range`].
pub fn booking_date_range() -> Result<BookingDateRange, RangeError> {
    DateGenerator::system().booking_date_range()
}
