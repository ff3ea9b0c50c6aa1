//! The end-to-end booking journey.
//!
//! Search, room selection, checkout, payment and confirmation run as one
//! strictly ordered sequence against the page objects. The first step that
//! fails ends the run; nothing is retried.

use std::time::Duration;

use crate::prelude::*;
use crate::{
    AVAILABLE_TEXT, BookingDateRange, BookingSummaryPage, CART_CONTENT_TEST_ID, CHECKOUT_ON_CART_TEST_ID,
    CHECKOUT_SETTLE, CONFIRMATION_TIMEOUT, CheckoutPage, Clock, DEFAULT_EXPECT_TIMEOUT, DateGenerator, HomePage,
    LABEL_LOCALE, Locator, POLL_INTERVAL, Page, PageError, RangeError, SystemClock, TestData,
};

/// One step of the booking journey, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Step {
    #[display(fmt = "navigate to home page")]
    NavigateHome,
    #[display(fmt = "calendar icon visible")]
    CalendarIconVisible,
    #[display(fmt = "open calendar")]
    OpenCalendar,
    #[display(fmt = "search dates")]
    SearchDates,
    #[display(fmt = "rooms available")]
    RoomsAvailable,
    #[display(fmt = "see prices")]
    SeePrices,
    #[display(fmt = "add bed and breakfast")]
    AddBedAndBreakfast,
    #[display(fmt = "cart visible")]
    CartVisible,
    #[display(fmt = "checkout from cart")]
    CheckoutFromCart,
    #[display(fmt = "checkout page rendered")]
    CheckoutRendered,
    #[display(fmt = "checkout settle")]
    CheckoutSettle,
    #[display(fmt = "fill guest details")]
    FillGuestDetails,
    #[display(fmt = "fill address")]
    FillAddress,
    #[display(fmt = "pay deposit enabled")]
    PayDepositEnabled,
    #[display(fmt = "pay deposit")]
    PayDeposit,
    #[display(fmt = "payment form visible")]
    PaymentFormVisible,
    #[display(fmt = "fill payment form")]
    FillPaymentForm,
    #[display(fmt = "submit payment")]
    SubmitPayment,
    #[display(fmt = "booking confirmed")]
    BookingConfirmed,
}

impl Step {
    /// Every step of a successful run, in order
    pub const ALL: [Self; 19] = [
        Self::NavigateHome,
        Self::CalendarIconVisible,
        Self::OpenCalendar,
        Self::SearchDates,
        Self::RoomsAvailable,
        Self::SeePrices,
        Self::AddBedAndBreakfast,
        Self::CartVisible,
        Self::CheckoutFromCart,
        Self::CheckoutRendered,
        Self::CheckoutSettle,
        Self::FillGuestDetails,
        Self::FillAddress,
        Self::PayDepositEnabled,
        Self::PayDeposit,
        Self::PaymentFormVisible,
        Self::FillPaymentForm,
        Self::SubmitPayment,
        Self::BookingConfirmed,
    ];
}

/// State an expectation waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Condition {
    #[display(fmt = "visible")]
    Visible,
    #[display(fmt = "enabled")]
    Enabled,
}

/// Time budgets for the scenario's waits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Expectations without a budget of their own
    pub default_expect:  Duration,
    /// Payment container and booking confirmation
    pub confirmation:    Duration,
    /// Fixed pause once the checkout page renders
    pub checkout_settle: Duration,
    pub poll_interval:   Duration,
}

impl Timeouts {
    pub const DEFAULT: Self = Self {
        default_expect:  DEFAULT_EXPECT_TIMEOUT,
        confirmation:    CONFIRMATION_TIMEOUT,
        checkout_settle: CHECKOUT_SETTLE,
        poll_interval:   POLL_INTERVAL,
    };
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("could not compute booking dates: {0}")]
    Dates(#[from] RangeError),

    #[error("step '{step}' failed: {source}")]
    Page {
        step:   Step,
        #[source]
        source: PageError,
    },

    #[error("step '{step}': {locator} was not {condition} within {budget:?}")]
    Timeout {
        step:      Step,
        locator:   Locator,
        condition: Condition,
        budget:    Duration,
    },
}

impl ScenarioError {
    /// The step that failed, if the run got as far as the site
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Dates(_) => None,
            Self::Page { step, .. } | Self::Timeout { step, .. } => Some(*step),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Stay that was searched for and booked
    pub dates:     BookingDateRange,
    /// Steps in the order they completed
    pub completed: Vec<Step>,
}

/// The booking journey, wired to its page objects and test data.
pub struct BookingScenario<'a, H, C, S, K = SystemClock> {
    home:     &'a H,
    checkout: &'a C,
    summary:  &'a S,
    data:     &'a TestData,
    dates:    DateGenerator<K>,
    timeouts: Timeouts,
}

impl<'a, H, C, S> BookingScenario<'a, H, C, S>
where
    H: HomePage,
    C: CheckoutPage,
    S: BookingSummaryPage,
{
    /// Scenario with the local clock and default timeouts
    pub const fn new(home: &'a H, checkout: &'a C, summary: &'a S, data: &'a TestData) -> Self {
        Self {
            home,
            checkout,
            summary,
            data,
            dates: DateGenerator::system(),
            timeouts: Timeouts::DEFAULT,
        }
    }
}

impl<'a, H, C, S, K> BookingScenario<'a, H, C, S, K>
where
    H: HomePage,
    C: CheckoutPage,
    S: BookingSummaryPage,
    K: Clock,
{
    /// Uses `clock` for "today" when picking the stay
    pub fn with_clock<K2: Clock>(self, clock: K2) -> BookingScenario<'a, H, C, S, K2> {
        BookingScenario {
            home:     self.home,
            checkout: self.checkout,
            summary:  self.summary,
            data:     self.data,
            dates:    DateGenerator::new(clock),
            timeouts: self.timeouts,
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub const fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Runs the whole journey, from the home page to the confirmation text.
    ///
    /// # Errors
    /// Returns the first failure: a page-object error, an expectation that
    /// ran out of time, or dates that couldn't be computed.
    #[tracing::instrument(
        name = "booking_scenario",
        skip_all,
        fields(room = %self.data.deluxe_king.room_item_id)
    )]
    pub async fn run(&self) -> Result<ScenarioReport, ScenarioError> {
        let dates = self.dates.booking_date_range()?;
        tracing::info!(
            check_in = %dates.check_in_label(),
            check_out = %dates.check_out_label(),
            locale = LABEL_LOCALE,
            "searching for stay"
        );

        let data = self.data;
        let timeouts = self.timeouts;
        let mut completed = Vec::with_capacity(Step::ALL.len());

        // Search
        act(Step::NavigateHome, self.home.navigate_to_home_page().await, &mut completed)?;
        self.expect(
            self.home,
            Step::CalendarIconVisible,
            self.home.calendar_icon(),
            Condition::Visible,
            timeouts.default_expect,
        )
        .await?;
        completed.push(Step::CalendarIconVisible);
        act(Step::OpenCalendar, self.home.click_calendar_icon().await, &mut completed)?;
        act(Step::SearchDates, self.home.perform_booking_search(&dates).await, &mut completed)?;
        self.expect(
            self.home,
            Step::RoomsAvailable,
            Locator::exact_text(AVAILABLE_TEXT),
            Condition::Visible,
            timeouts.default_expect,
        )
        .await?;
        completed.push(Step::RoomsAvailable);

        // Room and add-on
        let room = &data.deluxe_king.room_item_id;
        act(Step::SeePrices, self.home.click_see_prices_button(room).await, &mut completed)?;
        act(
            Step::AddBedAndBreakfast,
            self.home.add_bed_and_breakfast_to_cart(room, &data.bed_and_breakfast.name).await,
            &mut completed,
        )?;
        self.expect(
            self.home,
            Step::CartVisible,
            Locator::test_id(CART_CONTENT_TEST_ID),
            Condition::Visible,
            timeouts.default_expect,
        )
        .await?;
        completed.push(Step::CartVisible);
        act(
            Step::CheckoutFromCart,
            self.home.click(&Locator::test_id(CHECKOUT_ON_CART_TEST_ID)).await,
            &mut completed,
        )?;

        // Checkout
        self.expect(
            self.checkout,
            Step::CheckoutRendered,
            self.checkout.complete_reservation_text(),
            Condition::Visible,
            timeouts.default_expect,
        )
        .await?;
        completed.push(Step::CheckoutRendered);
        self.checkout.wait_for_timeout(timeouts.checkout_settle).await;
        tracing::info!(step = %Step::CheckoutSettle, settle = ?timeouts.checkout_settle, "step completed");
        completed.push(Step::CheckoutSettle);
        act(
            Step::FillGuestDetails,
            self.checkout.fill_guest_details(&data.guest_details).await,
            &mut completed,
        )?;
        act(
            Step::FillAddress,
            self.checkout.fill_address_and_select(&data.guest_details.address).await,
            &mut completed,
        )?;

        // Payment
        self.expect(
            self.checkout,
            Step::PayDepositEnabled,
            self.checkout.pay_deposit_button(),
            Condition::Enabled,
            timeouts.default_expect,
        )
        .await?;
        completed.push(Step::PayDepositEnabled);
        act(Step::PayDeposit, self.checkout.click_pay_deposit_button().await, &mut completed)?;
        self.expect(
            self.checkout,
            Step::PaymentFormVisible,
            self.checkout.payment_container(),
            Condition::Visible,
            timeouts.confirmation,
        )
        .await?;
        completed.push(Step::PaymentFormVisible);
        tracing::debug!(card = %data.card_details.masked_number(), "filling payment form");
        act(
            Step::FillPaymentForm,
            self.checkout.fill_payment_form(&data.card_details).await,
            &mut completed,
        )?;
        act(Step::SubmitPayment, self.checkout.click_pay_button().await, &mut completed)?;

        // Confirmation
        self.expect(
            self.summary,
            Step::BookingConfirmed,
            self.summary.booking_successful_text(),
            Condition::Visible,
            timeouts.confirmation,
        )
        .await?;
        completed.push(Step::BookingConfirmed);

        tracing::info!(stay = %dates, nights = dates.nights(), "booking confirmed");
        Ok(ScenarioReport { dates, completed })
    }

    /// Waits until `locator` meets `condition` on `page`, or `budget` runs out
    async fn expect<P: Page>(
        &self,
        page: &P,
        step: Step,
        locator: Locator,
        condition: Condition,
        budget: Duration,
    ) -> Result<(), ScenarioError> {
        let waited = tokio::time::timeout(
            budget,
            poll_until(page, &locator, condition, self.timeouts.poll_interval),
        )
        .await;

        match waited {
            Ok(Ok(())) => {
                tracing::info!(%step, %locator, %condition, "expectation met");
                Ok(())
            },
            Ok(Err(source)) => {
                tracing::warn!(%step, %locator, error = %source, "probe failed");
                Err(ScenarioError::Page { step, source })
            },
            Err(_) => {
                tracing::warn!(%step, %locator, %condition, ?budget, "expectation timed out");
                Err(ScenarioError::Timeout {
                    step,
                    locator,
                    condition,
                    budget,
                })
            },
        }
    }
}

fn act(step: Step, outcome: Result<(), PageError>, completed: &mut Vec<Step>) -> Result<(), ScenarioError> {
    match outcome {
        Ok(()) => {
            tracing::info!(%step, "step completed");
            completed.push(step);
            Ok(())
        },
        Err(source) => {
            tracing::warn!(%step, error = %source, "step failed");
            Err(ScenarioError::Page { step, source })
        },
    }
}

async fn poll_until<P: Page>(
    page: &P,
    locator: &Locator,
    condition: Condition,
    poll_interval: Duration,
) -> Result<(), PageError> {
    loop {
        let met = match condition {
            Condition::Visible => page.is_visible(locator).await?,
            Condition::Enabled => page.is_enabled(locator).await?,
        };
        if met {
            return Ok(());
        }
        tracing::trace!(%locator, %condition, "not yet");
        tokio::time::sleep(poll_interval).await;
    }
}
