use newsdesk_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_dirty_state() {
    let (mut next, effects) = update(AppState::new(), Msg::Tick);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn dirty_flag_is_reported_once() {
    let (mut next, _) = update(AppState::new(), Msg::KeywordInputChanged("a".to_string()));

    assert!(next.consume_dirty());
    assert!(!next.consume_dirty());
}
