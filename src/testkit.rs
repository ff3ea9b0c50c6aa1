//! In-memory booking site for exercising the scenario without a browser.

use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use crate::{
    Address, BookingDateRange, BookingSummaryPage, CardDetails, CheckoutPage, Condition, GuestDetails, HomePage,
    Locator, Page, PageError,
};

/// Every element is visible and enabled unless told otherwise. Actions are
/// logged in call order; probes are counted per locator.
#[derive(Default)]
pub(crate) struct FakeSite {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    actions:       Vec<String>,
    probes:        HashMap<Locator, u32>,
    hidden:        HashSet<Locator>,
    disabled:      HashSet<Locator>,
    late:          HashMap<Locator, u32>,
    failures:      HashMap<&'static str, PageError>,
    broken_probes: HashMap<Locator, PageError>,
}

impl FakeSite {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn actions(&self) -> Vec<String> {
        self.lock().actions.clone()
    }

    pub(crate) fn probes(&self, locator: &Locator) -> u32 {
        self.lock().probes.get(locator).copied().unwrap_or(0)
    }

    /// Element never becomes visible
    pub(crate) fn hide(&self, locator: Locator) {
        self.lock().hidden.insert(locator);
    }

    /// Element is visible but never enabled
    pub(crate) fn disable(&self, locator: Locator) {
        self.lock().disabled.insert(locator);
    }

    /// Element reports false for the first `probes` probes
    pub(crate) fn appear_after(&self, locator: Locator, probes: u32) {
        self.lock().late.insert(locator, probes);
    }

    /// Named action fails instead of running
    pub(crate) fn fail_on(&self, action: &'static str, error: PageError) {
        self.lock().failures.insert(action, error);
    }

    /// Probing the element fails
    pub(crate) fn break_probe(&self, locator: Locator, error: PageError) {
        self.lock().broken_probes.insert(locator, error);
    }

    fn act(&self, name: &'static str, detail: Option<String>) -> Result<(), PageError> {
        let mut state = self.lock();
        if let Some(error) = state.failures.get(name) {
            return Err(error.clone());
        }
        let entry = match detail {
            Some(detail) => format!("{name}({detail})"),
            None => name.to_owned(),
        };
        state.actions.push(entry);
        Ok(())
    }

    fn probe(&self, locator: &Locator, condition: Condition) -> Result<bool, PageError> {
        let mut state = self.lock();
        if let Some(error) = state.broken_probes.get(locator) {
            return Err(error.clone());
        }

        let count = {
            let count = state.probes.entry(locator.clone()).or_default();
            *count += 1;
            *count
        };

        if state.hidden.contains(locator) {
            return Ok(false);
        }
        if state.late.get(locator).is_some_and(|after| count <= *after) {
            return Ok(false);
        }
        Ok(match condition {
            Condition::Visible => true,
            Condition::Enabled => !state.disabled.contains(locator),
        })
    }
}

impl Page for FakeSite {
    async fn is_visible(&self, locator: &Locator) -> Result<bool, PageError> {
        self.probe(locator, Condition::Visible)
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, PageError> {
        self.probe(locator, Condition::Enabled)
    }

    async fn click(&self, locator: &Locator) -> Result<(), PageError> {
        self.act("click", Some(locator.to_string()))
    }

    async fn wait_for_timeout(&self, duration: Duration) {
        self.lock()
            .actions
            .push(format!("wait_for_timeout({}ms)", duration.as_millis()));
        tokio::time::sleep(duration).await;
    }
}

impl HomePage for FakeSite {
    fn calendar_icon(&self) -> Locator {
        Locator::test_id("calendarIcon")
    }

    async fn navigate_to_home_page(&self) -> Result<(), PageError> {
        self.act("navigate_to_home_page", None)
    }

    async fn click_calendar_icon(&self) -> Result<(), PageError> {
        self.act("click_calendar_icon", None)
    }

    async fn perform_booking_search(&self, dates: &BookingDateRange) -> Result<(), PageError> {
        let detail = format!("{} -> {}", dates.check_in_label(), dates.check_out_label());
        self.act("perform_booking_search", Some(detail))
    }

    async fn click_see_prices_button(&self, room_item_id: &str) -> Result<(), PageError> {
        self.act("click_see_prices_button", Some(room_item_id.to_owned()))
    }

    async fn add_bed_and_breakfast_to_cart(&self, room_item_id: &str, add_on_name: &str) -> Result<(), PageError> {
        self.act("add_bed_and_breakfast_to_cart", Some(format!("{room_item_id}, {add_on_name}")))
    }
}

impl CheckoutPage for FakeSite {
    fn complete_reservation_text(&self) -> Locator {
        Locator::exact_text("Complete your reservation")
    }

    fn pay_deposit_button(&self) -> Locator {
        Locator::css("button.pay-deposit")
    }

    fn payment_container(&self) -> Locator {
        Locator::test_id("paymentContainer")
    }

    async fn fill_guest_details(&self, guest: &GuestDetails) -> Result<(), PageError> {
        self.act(
            "fill_guest_details",
            Some(format!("{} {}", guest.first_name, guest.last_name)),
        )
    }

    async fn fill_address_and_select(&self, address: &Address) -> Result<(), PageError> {
        self.act("fill_address_and_select", Some(address.postcode.clone()))
    }

    async fn click_pay_deposit_button(&self) -> Result<(), PageError> {
        self.act("click_pay_deposit_button", None)
    }

    async fn fill_payment_form(&self, card: &CardDetails) -> Result<(), PageError> {
        self.act("fill_payment_form", Some(card.masked_number()))
    }

    async fn click_pay_button(&self) -> Result<(), PageError> {
        self.act("click_pay_button", None)
    }
}

impl BookingSummaryPage for FakeSite {
    fn booking_successful_text(&self) -> Locator {
        Locator::exact_text("Booking Successful")
    }
}
