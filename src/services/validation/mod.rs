// Validation service
// Injected rules that turn a value into its error state

use std::rc::Rc;

use crate::models::error::{RangeError, SingleError, ValidationReason};
use crate::models::value::{DateRange, RangeValue, SingleValue};
use crate::utils::date::{DateAdapter, PickerDate};

/// Constraints shared by the built-in validators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationProps {
    pub min_date: Option<PickerDate>,
    pub max_date: Option<PickerDate>,
    pub disable_past: bool,
    pub disable_future: bool,
}

/// Pure function from a value to its error, shaped like the value.
pub trait Validator<V, E> {
    fn validate(&self, value: &V, props: &ValidationProps) -> E;
}

impl<V, E, F> Validator<V, E> for F
where
    F: Fn(&V, &ValidationProps) -> E,
{
    fn validate(&self, value: &V, props: &ValidationProps) -> E {
        self(value, props)
    }
}

/// Validator for single-date pickers. Bounds are compared by calendar day.
#[derive(Clone)]
pub struct DateValidator {
    adapter: Rc<dyn DateAdapter>,
}

impl DateValidator {
    pub fn new(adapter: Rc<dyn DateAdapter>) -> Self {
        Self { adapter }
    }

    /// First failing rule for one date, in display priority order.
    pub fn validate_date(&self, date: &PickerDate, props: &ValidationProps) -> Option<ValidationReason> {
        let adapter = self.adapter.as_ref();
        if !adapter.is_valid(date) {
            return Some(ValidationReason::InvalidDate);
        }

        let now = adapter.now(adapter.get_timezone(date));
        if props.disable_past && adapter.is_before_day(date, &now) {
            return Some(ValidationReason::DisablePast);
        }
        if props.disable_future && adapter.is_after_day(date, &now) {
            return Some(ValidationReason::DisableFuture);
        }
        if let Some(min) = props.min_date.as_ref() {
            if adapter.is_before_day(date, min) {
                return Some(ValidationReason::MinDate);
            }
        }
        if let Some(max) = props.max_date.as_ref() {
            if adapter.is_after_day(date, max) {
                return Some(ValidationReason::MaxDate);
            }
        }
        None
    }
}

impl Validator<SingleValue, SingleError> for DateValidator {
    fn validate(&self, value: &SingleValue, props: &ValidationProps) -> SingleError {
        value
            .as_ref()
            .and_then(|date| self.validate_date(date, props))
    }
}

/// Validator for range pickers: per-end date rules plus ordering.
#[derive(Clone)]
pub struct DateRangeValidator {
    dates: DateValidator,
}

impl DateRangeValidator {
    pub fn new(adapter: Rc<dyn DateAdapter>) -> Self {
        Self {
            dates: DateValidator::new(adapter),
        }
    }
}

impl Validator<RangeValue, RangeError> for DateRangeValidator {
    fn validate(&self, value: &RangeValue, props: &ValidationProps) -> RangeError {
        let errors = value.map(|slot| slot.and_then(|date| self.dates.validate_date(&date, props)));
        if errors.either(Option::is_some) {
            return errors;
        }

        match (value.start, value.end) {
            (Some(start), Some(end)) if start > end => DateRange::new(
                Some(ValidationReason::InvalidRange),
                Some(ValidationReason::InvalidRange),
            ),
            _ => errors,
        }
    }
}
