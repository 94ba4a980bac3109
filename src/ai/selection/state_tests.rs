//! Tests for selection state management

use super::*;
use proptest::prelude::*;

#[test]
fn test_new_has_no_selection() {
    let state = SelectionState::new();
    assert_eq!(state.selected(), None);
    assert!(!state.is_navigating());
}

#[test]
fn test_direct_select_leaves_navigation_off() {
    let mut state = SelectionState::new();
    state.next(3);
    state.select(2);
    assert_eq!(state.selected(), Some(2));
    assert!(!state.is_navigating());
}

#[test]
fn test_clear_resets_everything() {
    let mut state = SelectionState::new();
    state.next(3);
    state.clear();
    assert_eq!(state, SelectionState::new());
}

#[test]
fn test_next_starts_at_first_and_wraps() {
    let mut state = SelectionState::new();
    state.next(3);
    assert_eq!(state.selected(), Some(0));
    assert!(state.is_navigating());
    state.next(3);
    state.next(3);
    assert_eq!(state.selected(), Some(2));
    state.next(3);
    assert_eq!(state.selected(), Some(0));
}

#[test]
fn test_previous_starts_at_last_and_wraps() {
    let mut state = SelectionState::new();
    state.previous(3);
    assert_eq!(state.selected(), Some(2));
    state.select(0);
    state.previous(3);
    assert_eq!(state.selected(), Some(2));
}

#[test]
fn test_navigation_with_no_suggestions_is_noop() {
    let mut state = SelectionState::new();
    state.next(0);
    state.previous(0);
    assert_eq!(state.selected(), None);
    assert!(!state.is_navigating());
}

#[test]
fn test_resolved_defaults_to_first() {
    let state = SelectionState::new();
    assert_eq!(state.resolved(3), Some(0));
    assert_eq!(state.resolved(0), None);
}

#[test]
fn test_resolved_ignores_out_of_range_selection() {
    let mut state = SelectionState::new();
    state.select(5);
    assert_eq!(state.resolved(3), Some(0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_navigation_stays_in_bounds(
        count in 1usize..10,
        moves in prop::collection::vec(any::<bool>(), 1..40),
    ) {
        let mut state = SelectionState::new();
        for forward in moves {
            if forward { state.next(count) } else { state.previous(count) }
            let selected = state.selected().unwrap();
            prop_assert!(selected < count);
        }
    }

    #[test]
    fn prop_next_then_previous_returns(count in 1usize..10, start in 0usize..10) {
        let start = start % count;
        let mut state = SelectionState::new();
        state.select(start);
        state.next(count);
        state.previous(count);
        prop_assert_eq!(state.selected(), Some(start));
    }
}
