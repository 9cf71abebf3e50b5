use super::*;
use crate::models::action::{
    ChangeImportance, FieldChangeContext, PickerActionKind, PickerShortcut, SelectionState,
};
use crate::models::error::{SingleError, ValidationReason};
use crate::models::value::{DateRange, RangeValue, SingleValue};
use crate::services::value_manager::{RangeValueManager, SingleValueManager};
use crate::utils::date::{ChronoAdapter, PickerDate};
use chrono::TimeZone;
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn day(d: u32) -> PickerDate {
    Tz::UTC.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap()
}

fn no_errors(_: &SingleValue, _: &ValidationProps) -> SingleError {
    None
}

fn reduce_single(
    state: &PickerState<SingleValue>,
    action: PickerAction<SingleValue, SingleError>,
    is_controlled: bool,
) -> Transition<SingleValue, SingleError> {
    let adapter = ChronoAdapter::default();
    let props = ValidationProps::default();
    let env = ReducerEnv {
        manager: &SingleValueManager,
        adapter: &adapter,
        validator: &no_errors,
        validation_props: &props,
        is_controlled,
        close_on_select: true,
    };
    reduce(state, action, &env)
}

fn modified_state(value: SingleValue) -> PickerState<SingleValue> {
    let mut state = PickerState::new(value, None);
    state.has_been_modified_since_mount = true;
    state
}

fn input(action: ActionName, changed: bool) -> PolicyInput {
    PolicyInput {
        action,
        changed_since_publish: changed,
        changed_since_commit: changed,
        is_default_value: false,
        close_on_select: true,
        field_is_finished: None,
    }
}

#[test_case(SelectionState::Partial, true, false, false ; "partial publishes only")]
#[test_case(SelectionState::Shallow, true, false, false ; "shallow publishes only")]
#[test_case(SelectionState::Finish, true, true, true ; "finish commits and closes")]
fn test_view_policy(state: SelectionState, publish: bool, commit: bool, close: bool) {
    let policy = ChannelPolicy::decide(input(ActionName::View(state), true));
    assert_eq!((policy.publish, policy.commit, policy.close), (publish, commit, close));
}

#[test_case(PickerActionKind::Accept ; "accept")]
#[test_case(PickerActionKind::Today ; "today")]
#[test_case(PickerActionKind::Clear ; "clear")]
fn test_accept_like_buttons_always_commit(kind: PickerActionKind) {
    let policy = ChannelPolicy::decide(input(ActionName::Button(kind), false));
    assert!(!policy.publish);
    assert!(policy.commit);
    assert!(policy.close);
}

#[test_case(PickerActionKind::Cancel, true ; "cancel marks modified")]
#[test_case(PickerActionKind::Dismiss, false ; "dismiss keeps flag")]
fn test_revert_buttons_never_notify(kind: PickerActionKind, marks_modified: bool) {
    let policy = ChannelPolicy::decide(input(ActionName::Button(kind), true));
    assert_eq!(
        policy,
        ChannelPolicy {
            publish: false,
            commit: false,
            close: true,
            marks_modified,
        }
    );
}

#[test_case(ChangeImportance::Set, false ; "set importance")]
#[test_case(ChangeImportance::Accept, true ; "accept importance")]
fn test_shortcut_policy(importance: ChangeImportance, commit: bool) {
    let policy = ChannelPolicy::decide(input(ActionName::Shortcut(importance), true));
    assert!(policy.publish);
    assert_eq!(policy.commit, commit);
    assert!(!policy.close);
}

#[test]
fn test_view_finish_without_close_on_select_stays_open() {
    let mut policy_input = input(ActionName::View(SelectionState::Finish), true);
    policy_input.close_on_select = false;
    let policy = ChannelPolicy::decide(policy_input);
    assert!(policy.commit);
    assert!(!policy.close);
}

#[test]
fn test_view_partial_publishes_and_keeps_commit() {
    let state = modified_state(Some(day(1)));
    let transition = reduce_single(
        &state,
        PickerAction::from_view(Some(day(2)), SelectionState::Partial),
        false,
    );

    assert!(transition.has_changed);
    assert_eq!(transition.state.draft, Some(day(2)));
    assert_eq!(transition.state.last_published_value, Some(day(2)));
    assert_eq!(transition.state.last_committed_value, Some(day(1)));
    assert_eq!(
        transition.directives,
        vec![Directive::EmitChange {
            value: Some(day(2)),
            context: ChangeContext::new(None),
        }]
    );
}

#[test]
fn test_view_finish_emits_change_commit_close_in_order() {
    let state = modified_state(None);
    let transition = reduce_single(
        &state,
        PickerAction::from_view(Some(day(4)), SelectionState::Finish),
        false,
    );

    assert_eq!(
        transition.directives,
        vec![
            Directive::EmitChange {
                value: Some(day(4)),
                context: ChangeContext::new(None),
            },
            Directive::EmitCommit {
                value: Some(day(4)),
                context: ChangeContext::new(None),
            },
            Directive::RequestClose,
        ]
    );
    assert_eq!(transition.state.last_committed_value, Some(day(4)));
}

#[test]
fn test_unchanged_view_selection_is_silent() {
    let state = modified_state(Some(day(4)));
    let transition = reduce_single(
        &state,
        PickerAction::from_view(Some(day(4)), SelectionState::Partial),
        false,
    );
    assert!(!transition.has_changed);
    assert!(transition.directives.is_empty());
}

#[test]
fn test_accept_commits_even_when_unchanged() {
    let state = modified_state(Some(day(7)));
    let transition = reduce_single(
        &state,
        PickerAction::from_action(Some(day(7)), PickerActionKind::Accept),
        true,
    );

    assert!(!transition.publishes());
    assert!(transition.commits());
    assert!(transition.closes());
}

#[test]
fn test_cancel_reverts_to_committed_value() {
    let mut state = modified_state(Some(day(1)));
    state.draft = Some(day(9));
    state.last_published_value = Some(day(9));

    let transition = reduce_single(
        &state,
        PickerAction::from_action(Some(day(20)), PickerActionKind::Cancel),
        false,
    );

    assert_eq!(transition.state.draft, Some(day(1)));
    assert_eq!(transition.state.last_published_value, Some(day(9)));
    assert_eq!(transition.directives, vec![Directive::RequestClose]);
}

#[test]
fn test_dismiss_without_edits_keeps_unmodified_flag() {
    let state = PickerState::new(None, None);
    let transition = reduce_single(
        &state,
        PickerAction::from_action(None, PickerActionKind::Dismiss),
        false,
    );
    assert!(!transition.state.has_been_modified_since_mount);
    assert_eq!(transition.directives, vec![Directive::RequestClose]);
}

#[test]
fn test_today_on_untouched_default_publishes_and_commits() {
    let state = PickerState::new(None, None);
    let transition = reduce_single(
        &state,
        PickerAction::from_action(Some(day(15)), PickerActionKind::Today),
        false,
    );

    assert!(transition.publishes());
    assert!(transition.commits());
    assert!(transition.closes());
    assert!(transition.state.has_been_modified_since_mount);
}

#[test]
fn test_accept_on_untouched_default_surfaces_unchanged_value() {
    let state = PickerState::new(Some(day(3)), None);
    let transition = reduce_single(
        &state,
        PickerAction::from_action(Some(day(3)), PickerActionKind::Accept),
        false,
    );

    assert!(transition.publishes());
    assert!(transition.commits());
}

#[test]
fn test_field_commits_only_complete_valid_entries() {
    let state = modified_state(None);

    let incomplete = reduce_single(
        &state,
        PickerAction::from_field(
            Some(day(5)),
            FieldChangeContext {
                validation_error: None,
                is_complete: false,
            },
        ),
        false,
    );
    assert!(incomplete.publishes());
    assert!(!incomplete.commits());

    let invalid = reduce_single(
        &state,
        PickerAction::from_field(
            Some(day(5)),
            FieldChangeContext {
                validation_error: Some(ValidationReason::MinDate),
                is_complete: true,
            },
        ),
        false,
    );
    assert!(!invalid.commits());
    assert_eq!(
        invalid.directives,
        vec![Directive::EmitChange {
            value: Some(day(5)),
            context: ChangeContext::new(Some(ValidationReason::MinDate)),
        }]
    );

    let finished = reduce_single(
        &state,
        PickerAction::from_field(
            Some(day(5)),
            FieldChangeContext {
                validation_error: None,
                is_complete: true,
            },
        ),
        false,
    );
    assert!(finished.commits());
    assert!(!finished.closes());
}

#[test]
fn test_shortcut_context_carries_descriptor() {
    let state = modified_state(None);
    let shortcut = PickerShortcut::new("Next week").with_id("next-week");
    let transition = reduce_single(
        &state,
        PickerAction::from_shortcut(Some(day(10)), ChangeImportance::Accept, shortcut.clone()),
        false,
    );

    let expected_context = ChangeContext {
        validation_error: None,
        shortcut: Some(shortcut),
        change_importance: Some(ChangeImportance::Accept),
    };
    assert_eq!(
        transition.directives,
        vec![
            Directive::EmitChange {
                value: Some(day(10)),
                context: expected_context.clone(),
            },
            Directive::EmitCommit {
                value: Some(day(10)),
                context: expected_context,
            },
        ]
    );
}

#[test]
fn test_validator_error_travels_in_context() {
    let adapter = ChronoAdapter::default();
    let props = ValidationProps::default();
    let always_max = |_: &SingleValue, _: &ValidationProps| Some(ValidationReason::MaxDate);
    let env = ReducerEnv {
        manager: &SingleValueManager,
        adapter: &adapter,
        validator: &always_max,
        validation_props: &props,
        is_controlled: false,
        close_on_select: true,
    };

    let transition = reduce(
        &modified_state(None),
        PickerAction::from_view(Some(day(30)), SelectionState::Partial),
        &env,
    );

    // Invalid candidates are still adopted.
    assert_eq!(transition.state.draft, Some(day(30)));
    assert_eq!(
        transition.directives,
        vec![Directive::EmitChange {
            value: Some(day(30)),
            context: ChangeContext::new(Some(ValidationReason::MaxDate)),
        }]
    );
}

#[test]
fn test_value_reducer_runs_before_change_detection() {
    let adapter = ChronoAdapter::default();
    let props = ValidationProps::default();
    let no_range_errors =
        |_: &RangeValue, _: &ValidationProps| DateRange::<Option<ValidationReason>>::new(None, None);
    let env = ReducerEnv {
        manager: &RangeValueManager,
        adapter: &adapter,
        validator: &no_range_errors,
        validation_props: &props,
        is_controlled: true,
        close_on_select: true,
    };
    let mut state = PickerState::new(DateRange::new(Some(day(2)), Some(day(8))), None);
    state.has_been_modified_since_mount = true;

    // Reversed candidate equals the current range once ordered.
    let transition = reduce(
        &state,
        PickerAction::from_view(DateRange::new(Some(day(8)), Some(day(2))), SelectionState::Partial),
        &env,
    );

    assert!(!transition.has_changed);
    assert!(transition.directives.is_empty());
    assert_eq!(transition.state.draft, DateRange::new(Some(day(2)), Some(day(8))));
}
