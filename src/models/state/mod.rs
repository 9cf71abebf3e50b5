// State module
// The reconciliation record a picker keeps between actions

/// Authoritative value state of one mounted picker.
///
/// `draft`, `last_published_value` and `last_committed_value` always share the
/// picker's value shape. Only the reducer and controlled-value sync mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerState<V> {
    /// Value shown by the field and the views.
    pub draft: V,
    /// Value passed to the most recent `on_change`.
    pub last_published_value: V,
    /// Value passed to the most recent `on_accept`.
    pub last_committed_value: V,
    /// Last externally supplied value; `None` for uncontrolled pickers.
    pub last_controlled_value: Option<V>,
    pub has_been_modified_since_mount: bool,
}

impl<V: Clone> PickerState<V> {
    /// Fresh state where every slot holds `initial`.
    pub fn new(initial: V, controlled: Option<V>) -> Self {
        Self {
            draft: initial.clone(),
            last_published_value: initial.clone(),
            last_committed_value: initial,
            last_controlled_value: controlled,
            has_been_modified_since_mount: false,
        }
    }

    /// Overwrite every value slot after an external update. Not a user edit,
    /// so the modification flag is left alone.
    pub fn reset_to_external(&mut self, value: V, controlled: V) {
        self.draft = value.clone();
        self.last_published_value = value.clone();
        self.last_committed_value = value;
        self.last_controlled_value = Some(controlled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_fills_every_slot() {
        let state = PickerState::new(Some(3), None);
        assert_eq!(state.draft, Some(3));
        assert_eq!(state.last_published_value, Some(3));
        assert_eq!(state.last_committed_value, Some(3));
        assert!(state.last_controlled_value.is_none());
        assert!(!state.has_been_modified_since_mount);
    }

    #[test]
    fn test_reset_to_external_keeps_modified_flag() {
        let mut state = PickerState::new(1, Some(1));
        state.has_been_modified_since_mount = true;
        state.draft = 7;

        state.reset_to_external(2, 2);

        assert_eq!(state.draft, 2);
        assert_eq!(state.last_published_value, 2);
        assert_eq!(state.last_committed_value, 2);
        assert_eq!(state.last_controlled_value, Some(2));
        assert!(state.has_been_modified_since_mount);
    }
}
