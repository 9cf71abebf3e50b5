// Action reducer
// Pure mapping from (state, action) to the next state and the side effects
// the controller must apply

mod policy;

pub use policy::{ChannelPolicy, PolicyInput};

use crate::models::action::{ActionName, ChangeContext, PickerAction};
use crate::models::state::PickerState;
use crate::services::validation::{ValidationProps, Validator};
use crate::services::value_manager::ValueManager;
use crate::utils::date::DateAdapter;

/// Collaborators and flags the reducer reads but never mutates.
pub struct ReducerEnv<'a, M: ValueManager> {
    pub manager: &'a M,
    pub adapter: &'a dyn DateAdapter,
    pub validator: &'a dyn Validator<M::Value, M::Error>,
    pub validation_props: &'a ValidationProps,
    pub is_controlled: bool,
    pub close_on_select: bool,
}

/// Side effect requested by a transition, applied in order by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive<V, E> {
    EmitChange { value: V, context: ChangeContext<E> },
    EmitCommit { value: V, context: ChangeContext<E> },
    RequestClose,
}

/// Result of reducing one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<V, E> {
    pub state: PickerState<V>,
    pub directives: Vec<Directive<V, E>>,
    /// Candidate differed from the previous draft.
    pub has_changed: bool,
    pub action: ActionName,
}

impl<V, E> Transition<V, E> {
    pub fn publishes(&self) -> bool {
        self.directives
            .iter()
            .any(|d| matches!(d, Directive::EmitChange { .. }))
    }

    pub fn commits(&self) -> bool {
        self.directives
            .iter()
            .any(|d| matches!(d, Directive::EmitCommit { .. }))
    }

    pub fn closes(&self) -> bool {
        self.directives
            .iter()
            .any(|d| matches!(d, Directive::RequestClose))
    }
}

/// Reduce one action. Never fails: invalid candidates are adopted and their
/// error travels in the change context.
pub fn reduce<M: ValueManager>(
    state: &PickerState<M::Value>,
    action: PickerAction<M::Value, M::Error>,
    env: &ReducerEnv<'_, M>,
) -> Transition<M::Value, M::Error> {
    let name = action.name();
    let (candidate, field_context, shortcut) = match action {
        PickerAction::SetValueFromAction {
            picker_action,
            ..
        } if picker_action.is_revert_like() => (state.last_committed_value.clone(), None, None),
        PickerAction::SetValueFromField { value, context } => (
            env.manager.value_reducer(env.adapter, &state.draft, value),
            Some(context),
            None,
        ),
        PickerAction::SetValueFromShortcut {
            value,
            change_importance,
            shortcut,
        } => (
            env.manager.value_reducer(env.adapter, &state.draft, value),
            None,
            Some((shortcut, change_importance)),
        ),
        PickerAction::SetValueFromView { value, .. }
        | PickerAction::SetValueFromAction { value, .. } => (
            env.manager.value_reducer(env.adapter, &state.draft, value),
            None,
            None,
        ),
    };

    let differs = |reference: &M::Value| !env.manager.are_values_equal(env.adapter, &candidate, reference);
    let has_changed = differs(&state.draft);
    let field_is_finished = field_context
        .as_ref()
        .map(|context| context.is_complete && !env.manager.has_error(&context.validation_error));

    let policy = ChannelPolicy::decide(PolicyInput {
        action: name,
        changed_since_publish: differs(&state.last_published_value),
        changed_since_commit: differs(&state.last_committed_value),
        is_default_value: !env.is_controlled && !state.has_been_modified_since_mount,
        close_on_select: env.close_on_select,
        field_is_finished,
    });

    let mut directives = Vec::new();
    if policy.publish || policy.commit {
        let mut context = ChangeContext::new(field_context.map(|c| c.validation_error).unwrap_or_else(|| {
            env.validator.validate(&candidate, env.validation_props)
        }));
        if let Some((shortcut, importance)) = shortcut {
            context.shortcut = Some(shortcut);
            context.change_importance = Some(importance);
        }
        if policy.publish {
            directives.push(Directive::EmitChange {
                value: candidate.clone(),
                context: context.clone(),
            });
        }
        if policy.commit {
            directives.push(Directive::EmitCommit {
                value: candidate.clone(),
                context,
            });
        }
    }
    if policy.close {
        directives.push(Directive::RequestClose);
    }

    let next = PickerState {
        last_published_value: if policy.publish {
            candidate.clone()
        } else {
            state.last_published_value.clone()
        },
        last_committed_value: if policy.commit {
            candidate.clone()
        } else {
            state.last_committed_value.clone()
        },
        last_controlled_value: state.last_controlled_value.clone(),
        has_been_modified_since_mount: state.has_been_modified_since_mount || policy.marks_modified,
        draft: candidate,
    };

    Transition {
        state: next,
        directives,
        has_changed,
        action: name,
    }
}

#[cfg(test)]
mod tests;
