use std::time::Duration;

/// Days between "today" and the check-in date
pub const CHECK_IN_LEAD_DAYS: i64 = 1;

/// Length of the booked stay, in nights
pub const STAY_LENGTH_NIGHTS: i64 = 7;

/// Days between "today" and the check-out date
pub const CHECK_OUT_OFFSET_DAYS: i64 = CHECK_IN_LEAD_DAYS + STAY_LENGTH_NIGHTS;

const _: () = assert!(CHECK_OUT_OFFSET_DAYS == 8);

/// Locale the calendar widget renders its labels in
pub const LABEL_LOCALE: &str = "en-US";

/// Accessible label of a calendar day cell, e.g. `Friday, June 21, 2024`
pub const ARIA_LABEL_FORMAT: &str = "%A, %B %-d, %Y";

/// Short human-readable form, e.g. `Fri, Jun 21, 2024`
pub const DISPLAY_FORMAT: &str = "%a, %b %-d, %Y";

/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Exact text shown once search results are loaded
pub const AVAILABLE_TEXT: &str = "Available";
/// Test id of the cart panel
pub const CART_CONTENT_TEST_ID: &str = "cartContentComponent";
/// Test id of the cart's checkout button
pub const CHECKOUT_ON_CART_TEST_ID: &str = "btnCheckoutOnCart";

/// Budget for an expectation that doesn't name its own
pub const DEFAULT_EXPECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Budget for the payment container and the booking confirmation
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(10);
/// Fixed pause after the checkout page renders, before typing into it
pub const CHECKOUT_SETTLE: Duration = Duration::from_secs(5);
/// How often an expectation re-probes the page
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
