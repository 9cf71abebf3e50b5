// Picker value controller
// Shell around the reducer: owns the state store and the open state, applies
// directives, keeps controlled values and timezones in sync

mod builder;

pub use builder::PickerBuilder;

use std::rc::Rc;

use chrono_tz::Tz;

use crate::models::action::{
    ActionName, ChangeContext, ChangeImportance, FieldChangeContext, PickerAction,
    PickerActionKind, PickerShortcut, SelectionState,
};
use crate::models::error::PickerError;
use crate::models::state::PickerState;
use crate::models::value::{PickerValueType, TimezoneSetting};
use crate::services::open_state::OpenStateController;
use crate::services::reducer::{reduce, Directive, ReducerEnv};
use crate::services::store::PickerStateStore;
use crate::services::validation::{ValidationProps, Validator};
use crate::services::value_manager::{ReferenceValueParams, ValueManager};
use crate::utils::date::{DateAdapter, PickerDate};

pub type ValueCallback<V, E> = Box<dyn FnMut(&V, &ChangeContext<E>)>;
pub type ErrorCallback<V, E> = Box<dyn FnMut(&E, &V)>;

/// What a dispatch did, for callers that need more than the callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub action: ActionName,
    pub has_changed: bool,
    pub published: bool,
    pub committed: bool,
    pub close_requested: bool,
}

pub struct PickerValueController<M: ValueManager> {
    manager: M,
    adapter: Rc<dyn DateAdapter>,
    validator: Box<dyn Validator<M::Value, M::Error>>,
    validation_props: ValidationProps,
    store: PickerStateStore<M::Value>,
    open_state: OpenStateController,
    is_controlled: bool,
    close_on_select: bool,
    value_type: PickerValueType,
    timezone_setting: TimezoneSetting,
    input_timezone: Option<Tz>,
    render_timezone: Tz,
    reference_date: Option<PickerDate>,
    reference_value: M::Value,
    current_error: M::Error,
    on_change: Option<ValueCallback<M::Value, M::Error>>,
    on_accept: Option<ValueCallback<M::Value, M::Error>>,
    on_error: Option<ErrorCallback<M::Value, M::Error>>,
}

impl<M: ValueManager> PickerValueController<M> {
    pub fn builder(
        manager: M,
        adapter: Rc<dyn DateAdapter>,
        validator: impl Validator<M::Value, M::Error> + 'static,
    ) -> PickerBuilder<M> {
        PickerBuilder::new(manager, adapter, validator)
    }

    pub fn state(&self) -> &PickerState<M::Value> {
        self.store.state()
    }

    /// Value currently shown by the field and the views.
    pub fn draft(&self) -> &M::Value {
        &self.store.state().draft
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn is_controlled(&self) -> bool {
        self.is_controlled
    }

    pub fn is_open(&self) -> bool {
        self.open_state.is_open()
    }

    pub fn open_state(&self) -> &OpenStateController {
        &self.open_state
    }

    pub fn close_on_select(&self) -> bool {
        self.close_on_select
    }

    pub fn value_type(&self) -> PickerValueType {
        self.value_type
    }

    /// Zone the draft is expressed in.
    pub fn timezone(&self) -> Tz {
        self.render_timezone
    }

    /// Zone of the supplied value, used for values handed to callbacks.
    pub fn input_timezone(&self) -> Option<Tz> {
        self.input_timezone
    }

    /// Date the views open on when the draft is empty.
    pub fn reference_value(&self) -> &M::Value {
        &self.reference_value
    }

    /// Error of the current draft.
    pub fn validation_error(&self) -> &M::Error {
        &self.current_error
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn adapter(&self) -> &dyn DateAdapter {
        self.adapter.as_ref()
    }

    pub fn validate(&self, value: &M::Value) -> M::Error {
        self.validator.validate(value, &self.validation_props)
    }

    pub fn is_valid(&self, value: &M::Value) -> bool {
        !self.manager.has_error(&self.validate(value))
    }

    /// Run one action through the reducer and apply its directives.
    pub fn dispatch(&mut self, action: PickerAction<M::Value, M::Error>) -> DispatchOutcome {
        let transition = {
            let env = ReducerEnv {
                manager: &self.manager,
                adapter: self.adapter.as_ref(),
                validator: self.validator.as_ref(),
                validation_props: &self.validation_props,
                is_controlled: self.is_controlled,
                close_on_select: self.close_on_select,
            };
            reduce(self.store.state(), action, &env)
        };

        let outcome = DispatchOutcome {
            action: transition.action,
            has_changed: transition.has_changed,
            published: transition.publishes(),
            committed: transition.commits(),
            close_requested: transition.closes(),
        };
        log::debug!(
            "{}: changed={} publish={} commit={} close={}",
            outcome.action,
            outcome.has_changed,
            outcome.published,
            outcome.committed,
            outcome.close_requested
        );

        self.store.replace(transition.state, transition.has_changed);
        for directive in transition.directives {
            self.apply(directive);
        }
        self.track_validation();
        outcome
    }

    fn apply(&mut self, directive: Directive<M::Value, M::Error>) {
        match directive {
            Directive::EmitChange { value, context } => {
                let value = self.to_input_timezone(&value);
                if let Some(on_change) = self.on_change.as_mut() {
                    on_change(&value, &context);
                }
            }
            Directive::EmitCommit { value, context } => {
                let value = self.to_input_timezone(&value);
                if let Some(on_accept) = self.on_accept.as_mut() {
                    on_accept(&value, &context);
                }
            }
            Directive::RequestClose => {
                self.open_state.close();
            }
        }
    }

    fn to_input_timezone(&self, value: &M::Value) -> M::Value {
        match self.input_timezone {
            Some(tz) if tz != self.render_timezone => {
                self.manager.set_timezone(self.adapter.as_ref(), tz, value)
            }
            _ => value.clone(),
        }
    }

    fn track_validation(&mut self) {
        let error = self.validate(&self.store.state().draft);
        if self.manager.is_same_error(&error, &self.current_error) {
            return;
        }
        log::debug!("validation error changed: {:?}", error);
        let value = self.to_input_timezone(&self.store.state().draft);
        if let Some(on_error) = self.on_error.as_mut() {
            on_error(&error, &value);
        }
        self.current_error = error;
    }

    /// Views open on the usable part of `value`, falling back to the reference date.
    fn reference_for(&self, value: &M::Value) -> M::Value {
        let cleaned = self.manager.clean_value(self.adapter.as_ref(), value);
        self.manager.get_initial_reference_value(
            self.adapter.as_ref(),
            ReferenceValueParams {
                value: &cleaned,
                props: &self.validation_props,
                value_type: self.value_type,
                timezone: self.render_timezone,
                reference_date: self.reference_date,
            },
        )
    }

    /// Reconcile with the latest controlled value.
    ///
    /// Resets the draft and both notification snapshots when the value differs
    /// from the last one supplied. The value is adopted as supplied, dates the
    /// adapter rejects included; they surface through `on_error`. Fires no
    /// value callbacks. Returns whether anything changed.
    pub fn sync_value(&mut self, value: &M::Value) -> Result<bool, PickerError> {
        if !self.is_controlled {
            log::warn!("ignoring controlled value on an uncontrolled picker");
            return Ok(false);
        }

        let adapter = self.adapter.as_ref();
        let input_timezone = self.manager.get_timezone(adapter, value)?;
        let render_timezone = self
            .timezone_setting
            .resolve(input_timezone, adapter.system_timezone());
        let rendered = self.manager.set_timezone(adapter, render_timezone, value);

        if !self
            .store
            .sync_controlled(&self.manager, adapter, value, rendered)
        {
            return Ok(false);
        }

        log::trace!("controlled value synced: {:?}", value);
        self.input_timezone = input_timezone;
        self.render_timezone = render_timezone;
        self.reference_value = self.reference_for(&self.store.state().draft);
        self.track_validation();
        Ok(true)
    }

    /// Adopt the latest controlled `open` prop.
    pub fn sync_open(&mut self, open: bool) {
        self.open_state.sync_controlled(open);
    }

    pub fn set_open(&mut self, open: bool) -> bool {
        self.open_state.set_open(open)
    }

    pub fn update_open(&mut self, f: impl FnOnce(bool) -> bool) -> bool {
        self.open_state.update_open(f)
    }

    pub fn request_open(&mut self) -> bool {
        self.open_state.open()
    }

    /// Close the picker without discarding edits the user has not accepted:
    /// a pending draft is committed first, like an accept, even when it fails
    /// validation. Without pending edits the picker is simply dismissed.
    pub fn dismiss_views(&mut self) -> DispatchOutcome {
        let state = self.store.state();
        let pending = !self.manager.are_values_equal(
            self.adapter.as_ref(),
            &state.draft,
            &state.last_committed_value,
        );
        let action = if pending {
            PickerAction::from_action(state.draft.clone(), PickerActionKind::Accept)
        } else {
            PickerAction::from_action(state.last_committed_value.clone(), PickerActionKind::Dismiss)
        };
        self.dispatch(action)
    }

    pub fn request_close(&mut self) -> DispatchOutcome {
        self.dismiss_views()
    }

    pub fn set_value_from_view(
        &mut self,
        value: M::Value,
        selection_state: SelectionState,
    ) -> DispatchOutcome {
        self.dispatch(PickerAction::from_view(value, selection_state))
    }

    pub fn set_value_from_field(
        &mut self,
        value: M::Value,
        context: FieldChangeContext<M::Error>,
    ) -> DispatchOutcome {
        self.dispatch(PickerAction::from_field(value, context))
    }

    pub fn select_shortcut(
        &mut self,
        value: M::Value,
        change_importance: ChangeImportance,
        shortcut: PickerShortcut,
    ) -> DispatchOutcome {
        self.dispatch(PickerAction::from_shortcut(value, change_importance, shortcut))
    }

    pub fn clear_value(&mut self) -> DispatchOutcome {
        let empty = self.manager.empty_value();
        self.dispatch(PickerAction::from_action(empty, PickerActionKind::Clear))
    }

    pub fn set_value_to_today(&mut self) -> DispatchOutcome {
        let today =
            self.manager
                .get_today_value(self.adapter.as_ref(), self.render_timezone, self.value_type);
        self.dispatch(PickerAction::from_action(today, PickerActionKind::Today))
    }

    pub fn accept_value_changes(&mut self) -> DispatchOutcome {
        let draft = self.store.state().draft.clone();
        self.dispatch(PickerAction::from_action(draft, PickerActionKind::Accept))
    }

    pub fn cancel_value_changes(&mut self) -> DispatchOutcome {
        let committed = self.store.state().last_committed_value.clone();
        self.dispatch(PickerAction::from_action(committed, PickerActionKind::Cancel))
    }
}
