// Action module
// User-originated edits fed to the reducer, tagged by where they came from

use std::fmt;

use serde::{Deserialize, Serialize};

/// How far a view interaction has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// One step of a multi-step selection (e.g. the hour of a time).
    Partial,
    /// Navigation-like change that should not count as a selection.
    Shallow,
    /// The last step; the selection is complete.
    Finish,
}

/// Control buttons a picker exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerActionKind {
    Accept,
    Today,
    Cancel,
    Dismiss,
    Clear,
}

impl PickerActionKind {
    /// Accept-like buttons always commit and surface default values.
    pub fn is_accept_like(self) -> bool {
        matches!(
            self,
            PickerActionKind::Accept | PickerActionKind::Today | PickerActionKind::Clear
        )
    }

    /// Revert-like buttons restore the last committed value.
    pub fn is_revert_like(self) -> bool {
        matches!(self, PickerActionKind::Cancel | PickerActionKind::Dismiss)
    }
}

/// How final a shortcut selection is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeImportance {
    /// Publish only.
    #[default]
    Set,
    /// Publish and commit.
    Accept,
}

/// Preset the user picked from the shortcut list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerShortcut {
    pub label: String,
    pub id: Option<String>,
}

impl PickerShortcut {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// What the text field knows about the entry it just produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChangeContext<E> {
    /// Error computed by the field for the parsed value.
    pub validation_error: E,
    /// Every section of the field is filled in.
    pub is_complete: bool,
}

/// Second argument of `on_change` and `on_accept`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeContext<E> {
    pub validation_error: E,
    pub shortcut: Option<PickerShortcut>,
    pub change_importance: Option<ChangeImportance>,
}

impl<E> ChangeContext<E> {
    pub fn new(validation_error: E) -> Self {
        Self {
            validation_error,
            shortcut: None,
            change_importance: None,
        }
    }
}

/// A candidate value tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerAction<V, E> {
    SetValueFromView {
        value: V,
        selection_state: SelectionState,
    },
    SetValueFromField {
        value: V,
        context: FieldChangeContext<E>,
    },
    SetValueFromAction {
        value: V,
        picker_action: PickerActionKind,
    },
    SetValueFromShortcut {
        value: V,
        change_importance: ChangeImportance,
        shortcut: PickerShortcut,
    },
}

impl<V, E> PickerAction<V, E> {
    pub fn from_view(value: V, selection_state: SelectionState) -> Self {
        PickerAction::SetValueFromView {
            value,
            selection_state,
        }
    }

    pub fn from_field(value: V, context: FieldChangeContext<E>) -> Self {
        PickerAction::SetValueFromField { value, context }
    }

    pub fn from_action(value: V, picker_action: PickerActionKind) -> Self {
        PickerAction::SetValueFromAction {
            value,
            picker_action,
        }
    }

    pub fn from_shortcut(
        value: V,
        change_importance: ChangeImportance,
        shortcut: PickerShortcut,
    ) -> Self {
        PickerAction::SetValueFromShortcut {
            value,
            change_importance,
            shortcut,
        }
    }

    pub fn value(&self) -> &V {
        match self {
            PickerAction::SetValueFromView { value, .. }
            | PickerAction::SetValueFromField { value, .. }
            | PickerAction::SetValueFromAction { value, .. }
            | PickerAction::SetValueFromShortcut { value, .. } => value,
        }
    }

    pub fn name(&self) -> ActionName {
        match self {
            PickerAction::SetValueFromView {
                selection_state, ..
            } => ActionName::View(*selection_state),
            PickerAction::SetValueFromField { .. } => ActionName::Field,
            PickerAction::SetValueFromAction { picker_action, .. } => {
                ActionName::Button(*picker_action)
            }
            PickerAction::SetValueFromShortcut {
                change_importance, ..
            } => ActionName::Shortcut(*change_importance),
        }
    }
}

/// Value-free tag of an action, used in logs and dispatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionName {
    View(SelectionState),
    Field,
    Button(PickerActionKind),
    Shortcut(ChangeImportance),
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionName::View(state) => write!(f, "setValueFromView({:?})", state),
            ActionName::Field => f.write_str("setValueFromField"),
            ActionName::Button(kind) => write!(f, "setValueFromAction({:?})", kind),
            ActionName::Shortcut(importance) => {
                write!(f, "setValueFromShortcut({:?})", importance)
            }
        }
    }
}
