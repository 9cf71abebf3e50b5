use chrono_tz::Tz;

use super::{are_dates_equal, clean_date, reference_date, today, ReferenceValueParams, ValueManager};
use crate::models::error::{PickerError, RangeError};
use crate::models::value::{DateRange, PickerValueType, RangeValue};
use crate::utils::date::DateAdapter;

/// Value manager for pickers holding a (start, end) pair of nullable dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeValueManager;

impl ValueManager for RangeValueManager {
    type Value = RangeValue;
    type Error = RangeError;

    fn empty_value(&self) -> RangeValue {
        DateRange::new(None, None)
    }

    fn are_values_equal(&self, adapter: &dyn DateAdapter, a: &RangeValue, b: &RangeValue) -> bool {
        are_dates_equal(adapter, &a.start, &b.start) && are_dates_equal(adapter, &a.end, &b.end)
    }

    fn get_today_value(
        &self,
        adapter: &dyn DateAdapter,
        timezone: Tz,
        value_type: PickerValueType,
    ) -> RangeValue {
        let today = today(adapter, timezone, value_type);
        DateRange::new(Some(today), Some(today))
    }

    fn get_initial_reference_value(
        &self,
        adapter: &dyn DateAdapter,
        params: ReferenceValueParams<'_, RangeValue>,
    ) -> RangeValue {
        let shared = reference_date(adapter, &params);
        params
            .value
            .map(|slot| Some(clean_date(adapter, &slot).unwrap_or(shared)))
    }

    fn clean_value(&self, adapter: &dyn DateAdapter, value: &RangeValue) -> RangeValue {
        value.map(|slot| clean_date(adapter, &slot))
    }

    /// Keeps ranges ordered: a start placed after the end swaps the two.
    fn value_reducer(
        &self,
        _adapter: &dyn DateAdapter,
        _last_value: &RangeValue,
        candidate: RangeValue,
    ) -> RangeValue {
        match (candidate.start, candidate.end) {
            (Some(start), Some(end)) if start > end => DateRange::new(Some(end), Some(start)),
            _ => candidate,
        }
    }

    fn is_same_error(&self, a: &RangeError, b: &RangeError) -> bool {
        a.start == b.start && a.end == b.end
    }

    fn has_error(&self, error: &RangeError) -> bool {
        error.either(Option::is_some)
    }

    fn default_error_state(&self) -> RangeError {
        DateRange::new(None, None)
    }

    /// Fails when both ends are set but live in different zones.
    fn get_timezone(
        &self,
        adapter: &dyn DateAdapter,
        value: &RangeValue,
    ) -> Result<Option<Tz>, PickerError> {
        let start = value.start.as_ref().map(|d| adapter.get_timezone(d));
        let end = value.end.as_ref().map(|d| adapter.get_timezone(d));
        match (start, end) {
            (Some(start), Some(end)) if start != end => {
                Err(PickerError::MixedRangeTimezones { start, end })
            }
            (start, end) => Ok(start.or(end)),
        }
    }

    fn set_timezone(&self, adapter: &dyn DateAdapter, timezone: Tz, value: &RangeValue) -> RangeValue {
        value.map(|slot| slot.map(|d| adapter.set_timezone(&d, timezone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::ValidationReason;
    use crate::services::validation::ValidationProps;
    use crate::utils::date::{ChronoAdapter, PickerDate};
    use chrono::{TimeZone, Utc};
    use chrono_tz::{Asia::Tokyo, Europe::Paris};

    fn day(d: u32) -> PickerDate {
        Tz::UTC.with_ymd_and_hms(2025, 5, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_equality_is_element_wise() {
        let adapter = ChronoAdapter::default();
        let manager = RangeValueManager;
        let a = DateRange::new(Some(day(1)), Some(day(5)));

        assert!(manager.are_values_equal(&adapter, &a, &a.clone()));
        assert!(!manager.are_values_equal(&adapter, &a, &DateRange::new(Some(day(1)), None)));
        assert!(!manager.are_values_equal(&adapter, &a, &DateRange::new(Some(day(2)), Some(day(5)))));
    }

    #[test]
    fn test_value_reducer_orders_the_range() {
        let adapter = ChronoAdapter::default();
        let manager = RangeValueManager;
        let reversed = DateRange::new(Some(day(9)), Some(day(3)));

        let reduced = manager.value_reducer(&adapter, &manager.empty_value(), reversed);
        assert_eq!(reduced, DateRange::new(Some(day(3)), Some(day(9))));

        let open_ended = DateRange::new(Some(day(9)), None);
        assert_eq!(manager.value_reducer(&adapter, &reduced, open_ended), open_ended);
    }

    #[test]
    fn test_get_timezone_rejects_mixed_zones() {
        let adapter = ChronoAdapter::default();
        let manager = RangeValueManager;
        let mixed = DateRange::new(
            Some(adapter.set_timezone(&day(1), Paris)),
            Some(adapter.set_timezone(&day(2), Tokyo)),
        );

        assert_eq!(
            manager.get_timezone(&adapter, &mixed).unwrap_err(),
            PickerError::MixedRangeTimezones {
                start: Paris,
                end: Tokyo
            }
        );
    }

    #[test]
    fn test_get_timezone_uses_whichever_end_is_set() {
        let adapter = ChronoAdapter::default();
        let manager = RangeValueManager;
        let half = DateRange::new(None, Some(adapter.set_timezone(&day(2), Tokyo)));

        assert_eq!(manager.get_timezone(&adapter, &half).unwrap(), Some(Tokyo));
        assert_eq!(manager.get_timezone(&adapter, &manager.empty_value()).unwrap(), None);
    }

    #[test]
    fn test_reference_value_fills_missing_ends() {
        let adapter = ChronoAdapter::default().with_fixed_now(Utc.with_ymd_and_hms(2025, 5, 20, 10, 0, 0).unwrap());
        let props = ValidationProps::default();
        let value = DateRange::new(Some(day(3)), None);

        let reference = RangeValueManager.get_initial_reference_value(
            &adapter,
            ReferenceValueParams {
                value: &value,
                props: &props,
                value_type: PickerValueType::Date,
                timezone: Tz::UTC,
                reference_date: None,
            },
        );

        assert_eq!(reference, DateRange::new(Some(day(3)), Some(day(20))));
    }

    #[test]
    fn test_has_error_checks_both_ends() {
        let manager = RangeValueManager;
        assert!(!manager.has_error(&manager.default_error_state()));
        assert!(manager.has_error(&DateRange::new(None, Some(ValidationReason::MaxDate))));
    }
}
