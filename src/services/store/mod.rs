// State store
// Owns the picker state and the revision counter the public surface keys on

use crate::models::state::PickerState;
use crate::services::value_manager::ValueManager;
use crate::utils::date::DateAdapter;

#[derive(Debug, Clone)]
pub struct PickerStateStore<V> {
    state: PickerState<V>,
    revision: u64,
}

impl<V: Clone> PickerStateStore<V> {
    pub fn new(state: PickerState<V>) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &PickerState<V> {
        &self.state
    }

    /// Bumped whenever the draft may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adopt the state produced by the reducer.
    pub fn replace(&mut self, next: PickerState<V>, draft_changed: bool) {
        self.state = next;
        if draft_changed {
            self.revision += 1;
        }
    }

    /// Reconcile with an externally supplied value.
    ///
    /// `controlled` is the value as supplied, `rendered` the same value in the
    /// render zone. Returns false when the supplied value matches the last one
    /// seen, in which case nothing is touched.
    pub fn sync_controlled<M>(
        &mut self,
        manager: &M,
        adapter: &dyn DateAdapter,
        controlled: &V,
        rendered: V,
    ) -> bool
    where
        M: ValueManager<Value = V>,
    {
        let unchanged = self
            .state
            .last_controlled_value
            .as_ref()
            .is_some_and(|last| manager.are_values_equal(adapter, last, controlled));
        if unchanged {
            return false;
        }

        self.state.reset_to_external(rendered, controlled.clone());
        self.revision += 1;
        true
    }
}
