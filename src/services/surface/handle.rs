use std::cell::RefCell;
use std::rc::Rc;

use crate::models::action::PickerAction;
use crate::models::error::PickerError;
use crate::services::controller::{DispatchOutcome, PickerValueController};
use crate::services::value_manager::ValueManager;

/// Shared, single-threaded handle to one mounted picker.
///
/// Callbacks run while the controller is mutably borrowed, so a callback
/// that dispatches back into the same picker gets
/// [`PickerError::ReentrantDispatch`] instead of interleaving with the action
/// being processed. Reads such as [`draft`](Self::draft), validity checks and
/// surface builds fail the same way inside a callback; the value and context
/// passed to the callback carry what it needs.
pub struct PickerHandle<M: ValueManager> {
    inner: Rc<RefCell<PickerValueController<M>>>,
}

impl<M: ValueManager> Clone for PickerHandle<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M: ValueManager> PickerHandle<M> {
    pub fn new(controller: PickerValueController<M>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&PickerValueController<M>) -> R) -> Result<R, PickerError> {
        let controller = self
            .inner
            .try_borrow()
            .map_err(|_| PickerError::ReentrantDispatch)?;
        Ok(f(&controller))
    }

    pub fn with_mut<R>(
        &self,
        f: impl FnOnce(&mut PickerValueController<M>) -> R,
    ) -> Result<R, PickerError> {
        let mut controller = self.inner.try_borrow_mut().map_err(|_| {
            log::warn!("rejected re-entrant picker dispatch");
            PickerError::ReentrantDispatch
        })?;
        Ok(f(&mut controller))
    }

    pub fn dispatch(
        &self,
        action: PickerAction<M::Value, M::Error>,
    ) -> Result<DispatchOutcome, PickerError> {
        self.with_mut(|controller| controller.dispatch(action))
    }

    /// Render-phase reconciliation with the consumer's controlled value.
    pub fn sync_value(&self, value: &M::Value) -> Result<bool, PickerError> {
        self.with_mut(|controller| controller.sync_value(value))?
    }

    pub fn sync_open(&self, open: bool) -> Result<(), PickerError> {
        self.with_mut(|controller| controller.sync_open(open))
    }

    pub fn draft(&self) -> Result<M::Value, PickerError> {
        self.with(|controller| controller.draft().clone())
    }

    pub fn is_open(&self) -> Result<bool, PickerError> {
        self.with(|controller| controller.is_open())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
