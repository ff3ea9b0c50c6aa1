//! Page-object contracts for the booking site.
//!
//! A browser driver implements these traits; the scenario only ever talks to
//! the site through them. Every method is awaited to completion before the
//! scenario moves on, so implementations don't need to guard against
//! overlapping calls from one scenario.

use std::{fmt, future::Future, time::Duration};

use crate::{Address, AriaLabel, BookingDateRange, CardDetails, GuestDetails};

/// How a page object finds an element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS selector
    Css(String),
    /// `data-testid` attribute
    TestId(String),
    /// Visible text, optionally requiring an exact match
    Text { text: String, exact: bool },
    /// `aria-label` attribute, used for calendar day cells
    AriaLabel(AriaLabel),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    pub fn exact_text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            exact: false,
        }
    }
}

impl From<AriaLabel> for Locator {
    fn from(label: AriaLabel) -> Self {
        Self::AriaLabel(label)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css={selector}"),
            Self::TestId(id) => write!(f, "[data-testid={id:?}]"),
            Self::Text { text, exact: true } => write!(f, "text={text:?} (exact)"),
            Self::Text { text, exact: false } => write!(f, "text={text:?}"),
            Self::AriaLabel(label) => write!(f, "[aria-label={:?}]", label.as_str()),
        }
    }
}

/// Failure reported by a page object
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("no element matches {0}")]
    NotFound(Locator),

    #[error("element {0} can't be interacted with")]
    NotInteractable(Locator),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("driver error: {0}")]
    Driver(String),
}

/// Operations every page object supports
pub trait Page {
    /// Whether the element is attached and visible right now
    fn is_visible(&self, locator: &Locator) -> impl Future<Output = Result<bool, PageError>> + Send;

    /// Whether the element is visible and not disabled right now
    fn is_enabled(&self, locator: &Locator) -> impl Future<Output = Result<bool, PageError>> + Send;

    fn click(&self, locator: &Locator) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Unconditional pause
    fn wait_for_timeout(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Landing page: date search, room list and cart
pub trait HomePage: Page {
    fn calendar_icon(&self) -> Locator;

    fn navigate_to_home_page(&self) -> impl Future<Output = Result<(), PageError>> + Send;

    fn click_calendar_icon(&self) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Picks both dates in the open calendar by their aria labels, then
    /// starts the search
    fn perform_booking_search(
        &self,
        dates: &BookingDateRange,
    ) -> impl Future<Output = Result<(), PageError>> + Send;

    fn click_see_prices_button(&self, room_item_id: &str) -> impl Future<Output = Result<(), PageError>> + Send;

    fn add_bed_and_breakfast_to_cart(
        &self,
        room_item_id: &str,
        add_on_name: &str,
    ) -> impl Future<Output = Result<(), PageError>> + Send;
}

/// Guest details, address and payment
pub trait CheckoutPage: Page {
    fn complete_reservation_text(&self) -> Locator;

    fn pay_deposit_button(&self) -> Locator;

    fn payment_container(&self) -> Locator;

    fn fill_guest_details(&self, guest: &GuestDetails) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Types the address and picks the matching autocomplete suggestion
    fn fill_address_and_select(&self, address: &Address) -> impl Future<Output = Result<(), PageError>> + Send;

    fn click_pay_deposit_button(&self) -> impl Future<Output = Result<(), PageError>> + Send;

    fn fill_payment_form(&self, card: &CardDetails) -> impl Future<Output = Result<(), PageError>> + Send;

    fn click_pay_button(&self) -> impl Future<Output = Result<(), PageError>> + Send;
}

/// Confirmation shown after payment
pub trait BookingSummaryPage: Page {
    fn booking_successful_text(&self) -> Locator;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_locator_display() {
        let label = AriaLabel::for_date(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
        let cases = [
            (Locator::css("#calendar"), "css=#calendar"),
            (Locator::test_id("cartContentComponent"), "[data-testid=\"cartContentComponent\"]"),
            (Locator::exact_text("Available"), "text=\"Available\" (exact)"),
            (Locator::text("Book"), "text=\"Book\""),
            (Locator::from(label), "[aria-label=\"Friday, June 21, 2024\"]"),
        ];

        for (locator, expected) in &cases {
            assert_eq!(locator.to_string(), *expected, "{locator:?}");
        }
    }

    #[test]
    fn test_page_error_display() {
        let err = PageError::NotFound(Locator::test_id("btnCheckoutOnCart"));
        assert_eq!(err.to_string(), "no element matches [data-testid=\"btnCheckoutOnCart\"]");

        let err = PageError::Navigation {
            url: "https://hotel.test/".to_owned(),
            reason: "connection refused".to_owned(),
        };
        assert_eq!(err.to_string(), "navigation to https://hotel.test/ failed: connection refused");
    }
}
