// Test fixtures - reusable test data
// Dates, adapters and callback recorders shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

use rust_picker::models::action::ChangeContext;
use rust_picker::services::validation::{DateRangeValidator, DateValidator};
use rust_picker::{
    ChronoAdapter, DateAdapter, PickerBuilder, PickerDate, PickerValueController,
    RangeValueManager, SingleValueManager,
};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns the given day of October 2025 at noon UTC
    pub fn oct(day: u32) -> PickerDate {
        Tz::UTC.with_ymd_and_hms(2025, 10, day, 12, 0, 0).unwrap()
    }

    /// Returns the given day of October 2025 at midnight UTC
    pub fn oct_midnight(day: u32) -> PickerDate {
        Tz::UTC.with_ymd_and_hms(2025, 10, day, 0, 0, 0).unwrap()
    }

    /// The instant every fixture adapter treats as "now": Oct 1, 2025 09:00 UTC
    pub fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap()
    }
}

/// Adapter pinned to [`dates::now`]
pub fn adapter() -> Rc<dyn DateAdapter> {
    Rc::new(ChronoAdapter::default().with_fixed_now(dates::now()))
}

pub fn single_picker() -> PickerBuilder<SingleValueManager> {
    let adapter = adapter();
    PickerValueController::builder(
        SingleValueManager,
        Rc::clone(&adapter),
        DateValidator::new(adapter),
    )
}

pub fn range_picker() -> PickerBuilder<RangeValueManager> {
    let adapter = adapter();
    PickerValueController::builder(
        RangeValueManager,
        Rc::clone(&adapter),
        DateRangeValidator::new(adapter),
    )
}

/// Records every value handed to a callback.
pub struct Recorder<V> {
    calls: Rc<RefCell<Vec<V>>>,
}

impl<V: Clone + 'static> Recorder<V> {
    pub fn new() -> Self {
        Self {
            calls: Rc::default(),
        }
    }

    /// Callback suitable for `on_change` and `on_accept`.
    pub fn value_sink<E: 'static>(&self) -> impl FnMut(&V, &ChangeContext<E>) + 'static {
        let calls = Rc::clone(&self.calls);
        move |value, _| calls.borrow_mut().push(value.clone())
    }

    pub fn calls(&self) -> Vec<V> {
        self.calls.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

/// Counts `on_open` / `on_close` invocations.
#[derive(Clone, Default)]
pub struct Counter(Rc<RefCell<usize>>);

impl Counter {
    pub fn sink(&self) -> impl FnMut() + 'static {
        let count = Rc::clone(&self.0);
        move || *count.borrow_mut() += 1
    }

    pub fn get(&self) -> usize {
        *self.0.borrow()
    }
}
