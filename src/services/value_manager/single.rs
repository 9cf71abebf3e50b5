use chrono_tz::Tz;

use super::{are_dates_equal, clean_date, reference_date, today, ReferenceValueParams, ValueManager};
use crate::models::error::{PickerError, SingleError};
use crate::models::value::{PickerValueType, SingleValue};
use crate::utils::date::DateAdapter;

/// Value manager for pickers holding one nullable date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleValueManager;

impl ValueManager for SingleValueManager {
    type Value = SingleValue;
    type Error = SingleError;

    fn empty_value(&self) -> SingleValue {
        None
    }

    fn are_values_equal(&self, adapter: &dyn DateAdapter, a: &SingleValue, b: &SingleValue) -> bool {
        are_dates_equal(adapter, a, b)
    }

    fn get_today_value(
        &self,
        adapter: &dyn DateAdapter,
        timezone: Tz,
        value_type: PickerValueType,
    ) -> SingleValue {
        Some(today(adapter, timezone, value_type))
    }

    fn get_initial_reference_value(
        &self,
        adapter: &dyn DateAdapter,
        params: ReferenceValueParams<'_, SingleValue>,
    ) -> SingleValue {
        match clean_date(adapter, params.value) {
            Some(date) => Some(date),
            None => Some(reference_date(adapter, &params)),
        }
    }

    fn clean_value(&self, adapter: &dyn DateAdapter, value: &SingleValue) -> SingleValue {
        clean_date(adapter, value)
    }

    fn is_same_error(&self, a: &SingleError, b: &SingleError) -> bool {
        a == b
    }

    fn has_error(&self, error: &SingleError) -> bool {
        error.is_some()
    }

    fn default_error_state(&self) -> SingleError {
        None
    }

    fn get_timezone(
        &self,
        adapter: &dyn DateAdapter,
        value: &SingleValue,
    ) -> Result<Option<Tz>, PickerError> {
        Ok(value.as_ref().map(|date| adapter.get_timezone(date)))
    }

    fn set_timezone(&self, adapter: &dyn DateAdapter, timezone: Tz, value: &SingleValue) -> SingleValue {
        value.as_ref().map(|date| adapter.set_timezone(date, timezone))
    }
}
