use crate::prelude::*;
use crate::{DateError, format_for_aria_label, parse_aria_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accessible label of a calendar day cell, e.g. `Friday, June 21, 2024`.
///
/// Always holds the canonical rendering of some date, so it can be used to
/// locate a cell by its `aria-label` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, Into, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AriaLabel(String);

impl AriaLabel {
    /// Label of the calendar cell for `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self(format_for_aria_label(date))
    }

    /// Validates a label read from the page
    ///
    /// # Errors
    /// Returns `DateError` if `label` isn't a canonical aria label.
    pub fn new(label: &str) -> Result<Self, DateError> {
        parse_aria_label(label).map(Self::for_date)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for AriaLabel {
    fn from(date: NaiveDate) -> Self {
        Self::for_date(date)
    }
}

impl TryFrom<String> for AriaLabel {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl AsRef<str> for AriaLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
