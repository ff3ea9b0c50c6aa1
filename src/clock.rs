use chrono::{Local, NaiveDate};

/// Source of "today" for date calculations.
///
/// Implementations are read on every call; none of the date helpers hold on
/// to a value between calls.
pub trait Clock {
    /// The current calendar date in local time
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Reads the process's local wall clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub const fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for FixedClock {
    fn from(today: NaiveDate) -> Self {
        Self::new(today)
    }
}
