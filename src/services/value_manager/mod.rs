// Value manager
// Shape-specific policy (single date vs. range) injected into the controller

mod range;
mod single;

pub use range::RangeValueManager;
pub use single::SingleValueManager;

use std::fmt::Debug;

use chrono_tz::Tz;

use crate::models::error::PickerError;
use crate::models::value::PickerValueType;
use crate::services::validation::ValidationProps;
use crate::utils::date::{DateAdapter, PickerDate};

/// Inputs for building the date views open on when there is no usable value.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceValueParams<'a, V> {
    pub value: &'a V,
    pub props: &'a ValidationProps,
    pub value_type: PickerValueType,
    pub timezone: Tz,
    pub reference_date: Option<PickerDate>,
}

/// Everything the reducer and controller need to know about a value shape.
///
/// Equality used for change and commit detection always goes through
/// [`ValueManager::are_values_equal`], never `PartialEq`.
pub trait ValueManager {
    type Value: Clone + Debug;
    type Error: Clone + Debug;

    fn empty_value(&self) -> Self::Value;

    fn are_values_equal(&self, adapter: &dyn DateAdapter, a: &Self::Value, b: &Self::Value)
        -> bool;

    fn get_today_value(
        &self,
        adapter: &dyn DateAdapter,
        timezone: Tz,
        value_type: PickerValueType,
    ) -> Self::Value;

    fn get_initial_reference_value(
        &self,
        adapter: &dyn DateAdapter,
        params: ReferenceValueParams<'_, Self::Value>,
    ) -> Self::Value;

    /// Drop dates the adapter cannot represent.
    fn clean_value(&self, adapter: &dyn DateAdapter, value: &Self::Value) -> Self::Value;

    /// Transform a candidate before the reducer adopts it. Identity by default.
    fn value_reducer(
        &self,
        _adapter: &dyn DateAdapter,
        _last_value: &Self::Value,
        candidate: Self::Value,
    ) -> Self::Value {
        candidate
    }

    fn is_same_error(&self, a: &Self::Error, b: &Self::Error) -> bool;

    fn has_error(&self, error: &Self::Error) -> bool;

    fn default_error_state(&self) -> Self::Error;

    /// Zone carried by the value, `None` when it carries no date.
    fn get_timezone(
        &self,
        adapter: &dyn DateAdapter,
        value: &Self::Value,
    ) -> Result<Option<Tz>, PickerError>;

    fn set_timezone(&self, adapter: &dyn DateAdapter, timezone: Tz, value: &Self::Value)
        -> Self::Value;
}

pub(crate) fn are_dates_equal(
    adapter: &dyn DateAdapter,
    a: &Option<PickerDate>,
    b: &Option<PickerDate>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => adapter.is_equal(a, b),
        _ => false,
    }
}

pub(crate) fn clean_date(adapter: &dyn DateAdapter, date: &Option<PickerDate>) -> Option<PickerDate> {
    date.filter(|d| adapter.is_valid(d))
}

pub(crate) fn today(adapter: &dyn DateAdapter, timezone: Tz, value_type: PickerValueType) -> PickerDate {
    adapter.round_to_granularity(&adapter.now(timezone), value_type)
}

/// Reference date shared by both shapes: explicit reference, else today at
/// the value type's granularity, clamped into the allowed window.
pub(crate) fn reference_date<V>(
    adapter: &dyn DateAdapter,
    params: &ReferenceValueParams<'_, V>,
) -> PickerDate {
    let base = params
        .reference_date
        .map(|d| adapter.set_timezone(&d, params.timezone))
        .unwrap_or_else(|| today(adapter, params.timezone, params.value_type));

    if let Some(min) = params.props.min_date.as_ref() {
        if adapter.is_before_day(&base, min) {
            return adapter.start_of_day(&adapter.set_timezone(min, params.timezone));
        }
    }
    if let Some(max) = params.props.max_date.as_ref() {
        if adapter.is_after_day(&base, max) {
            return adapter.start_of_day(&adapter.set_timezone(max, params.timezone));
        }
    }
    base
}
