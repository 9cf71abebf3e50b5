use crate::models::action::{ActionName, ChangeImportance, PickerActionKind, SelectionState};

/// Facts about an action the publish/commit/close table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyInput {
    pub action: ActionName,
    /// Candidate differs from the last value sent to `on_change`.
    pub changed_since_publish: bool,
    /// Candidate differs from the last value sent to `on_accept`.
    pub changed_since_commit: bool,
    /// Uncontrolled picker still showing its default value.
    pub is_default_value: bool,
    pub close_on_select: bool,
    /// `Some` for field edits: complete and error-free.
    pub field_is_finished: Option<bool>,
}

/// What the reducer does with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelPolicy {
    pub publish: bool,
    pub commit: bool,
    pub close: bool,
    pub marks_modified: bool,
}

impl ChannelPolicy {
    pub fn decide(input: PolicyInput) -> Self {
        let changed = input.changed_since_publish;
        match input.action {
            ActionName::View(selection_state) => {
                let finished = selection_state == SelectionState::Finish;
                Self {
                    publish: changed,
                    commit: finished && input.changed_since_commit,
                    close: finished && input.close_on_select,
                    marks_modified: true,
                }
            }
            ActionName::Field => Self {
                publish: changed,
                commit: input.field_is_finished.unwrap_or(false) && input.changed_since_commit,
                close: false,
                marks_modified: true,
            },
            ActionName::Button(kind) if kind.is_accept_like() => Self {
                // Default values are published on the first accept so they
                // become observable.
                publish: changed || input.is_default_value,
                commit: true,
                close: true,
                marks_modified: true,
            },
            ActionName::Button(kind) => Self {
                publish: false,
                commit: false,
                close: true,
                marks_modified: kind == PickerActionKind::Cancel,
            },
            ActionName::Shortcut(importance) => Self {
                publish: changed,
                commit: importance == ChangeImportance::Accept && input.changed_since_commit,
                close: false,
                marks_modified: true,
            },
        }
    }
}
