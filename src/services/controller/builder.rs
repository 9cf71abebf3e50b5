use std::rc::Rc;

use super::{ErrorCallback, PickerValueController, ValueCallback};
use crate::models::action::ChangeContext;
use crate::models::error::PickerError;
use crate::models::settings::PickerSettings;
use crate::models::state::PickerState;
use crate::models::value::{PickerValueType, PickerVariant, TimezoneSetting};
use crate::services::open_state::{OpenCallback, OpenStateController};
use crate::services::store::PickerStateStore;
use crate::services::validation::{ValidationProps, Validator};
use crate::services::value_manager::{ReferenceValueParams, ValueManager};
use crate::utils::date::{DateAdapter, PickerDate};

/// Builder for [`PickerValueController`].
///
/// Supplying [`value`](Self::value) makes the picker controlled; otherwise
/// [`default_value`](Self::default_value) seeds it, and without either the
/// picker starts on the value manager's reference value.
pub struct PickerBuilder<M: ValueManager> {
    manager: M,
    adapter: Rc<dyn DateAdapter>,
    validator: Box<dyn Validator<M::Value, M::Error>>,
    value: Option<M::Value>,
    default_value: Option<M::Value>,
    open: Option<bool>,
    default_open: bool,
    variant: PickerVariant,
    close_on_select: Option<bool>,
    value_type: PickerValueType,
    timezone: TimezoneSetting,
    validation_props: ValidationProps,
    reference_date: Option<PickerDate>,
    on_change: Option<ValueCallback<M::Value, M::Error>>,
    on_accept: Option<ValueCallback<M::Value, M::Error>>,
    on_error: Option<ErrorCallback<M::Value, M::Error>>,
    on_open: Option<OpenCallback>,
    on_close: Option<OpenCallback>,
}

impl<M: ValueManager> PickerBuilder<M> {
    pub fn new(
        manager: M,
        adapter: Rc<dyn DateAdapter>,
        validator: impl Validator<M::Value, M::Error> + 'static,
    ) -> Self {
        Self {
            manager,
            adapter,
            validator: Box::new(validator),
            value: None,
            default_value: None,
            open: None,
            default_open: false,
            variant: PickerVariant::default(),
            close_on_select: None,
            value_type: PickerValueType::default(),
            timezone: TimezoneSetting::default(),
            validation_props: ValidationProps::default(),
            reference_date: None,
            on_change: None,
            on_accept: None,
            on_error: None,
            on_open: None,
            on_close: None,
        }
    }

    /// Controlled value.
    pub fn value(mut self, value: M::Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn default_value(mut self, value: M::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Controlled open flag.
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    pub fn variant(mut self, variant: PickerVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn close_on_select(mut self, close_on_select: bool) -> Self {
        self.close_on_select = Some(close_on_select);
        self
    }

    pub fn value_type(mut self, value_type: PickerValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn timezone(mut self, timezone: TimezoneSetting) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn validation_props(mut self, props: ValidationProps) -> Self {
        self.validation_props = props;
        self
    }

    pub fn reference_date(mut self, date: PickerDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Apply variant, value type, close-on-select and timezone from settings.
    pub fn settings(mut self, settings: &PickerSettings) -> Result<Self, PickerError> {
        self.variant = settings.variant;
        self.value_type = settings.value_type;
        self.timezone = settings.timezone_setting()?;
        if let Some(close_on_select) = settings.close_on_select {
            self.close_on_select = Some(close_on_select);
        }
        Ok(self)
    }

    pub fn on_change(mut self, callback: impl FnMut(&M::Value, &ChangeContext<M::Error>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_accept(mut self, callback: impl FnMut(&M::Value, &ChangeContext<M::Error>) + 'static) -> Self {
        self.on_accept = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnMut(&M::Error, &M::Value) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn on_open(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(callback));
        self
    }

    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Fails when the supplied value carries inconsistent timezones.
    pub fn build(self) -> Result<PickerValueController<M>, PickerError> {
        let PickerBuilder {
            manager,
            adapter,
            validator,
            value,
            default_value,
            open,
            default_open,
            variant,
            close_on_select,
            value_type,
            timezone,
            validation_props,
            reference_date,
            on_change,
            on_accept,
            on_error,
            on_open,
            on_close,
        } = self;

        let is_controlled = value.is_some();
        let supplied = value.or(default_value);
        let input_timezone = match supplied.as_ref() {
            Some(v) => manager.get_timezone(adapter.as_ref(), v)?,
            None => None,
        };
        let render_timezone = timezone.resolve(input_timezone, adapter.system_timezone());

        let reference_for = |value: &M::Value| {
            let cleaned = manager.clean_value(adapter.as_ref(), value);
            manager.get_initial_reference_value(
                adapter.as_ref(),
                ReferenceValueParams {
                    value: &cleaned,
                    props: &validation_props,
                    value_type,
                    timezone: render_timezone,
                    reference_date,
                },
            )
        };
        let initial = match supplied.as_ref() {
            Some(v) => manager.set_timezone(adapter.as_ref(), render_timezone, v),
            None => reference_for(&manager.empty_value()),
        };
        let reference_value = reference_for(&initial);

        let controlled_snapshot = if is_controlled { supplied } else { None };
        let open_state = match open {
            Some(open) => OpenStateController::controlled(open),
            None => OpenStateController::uncontrolled(default_open),
        }
        .with_callbacks(on_open, on_close);
        let current_error = manager.default_error_state();

        log::debug!(
            "building picker: controlled={} timezone={} close_on_select={:?}",
            is_controlled,
            render_timezone,
            close_on_select
        );

        let mut controller = PickerValueController {
            store: PickerStateStore::new(PickerState::new(initial, controlled_snapshot)),
            manager,
            adapter,
            validator,
            validation_props,
            open_state,
            is_controlled,
            close_on_select: close_on_select.unwrap_or_else(|| variant.default_close_on_select()),
            value_type,
            timezone_setting: timezone,
            input_timezone,
            render_timezone,
            reference_date,
            reference_value,
            current_error,
            on_change,
            on_accept,
            on_error,
        };
        controller.track_validation();
        Ok(controller)
    }
}
