//! Property-based tests for the dialog state machine
//!
//! These verify the transition invariants across arbitrary inputs: restart
//! always wins, unmatched events never move the state, payload parsing is
//! total, and transitions are deterministic.

use super::*;
use crate::runtime::testing::{MockCommerceApi, RecordingPresenter};
use proptest::prelude::*;
use std::sync::Arc;

fn arb_state() -> impl Strategy<Value = DialogState> {
    prop_oneof![
        Just(DialogState::Start),
        Just(DialogState::Menu),
        Just(DialogState::Description),
        Just(DialogState::Cart),
        Just(DialogState::AwaitingEmail),
    ]
}

fn arb_browsing_state() -> impl Strategy<Value = DialogState> {
    prop_oneof![
        Just(DialogState::Menu),
        Just(DialogState::Description),
        Just(DialogState::Cart),
    ]
}

fn arb_selection_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("cart".to_string()),
        Just("back".to_string()),
        Just("checkout".to_string()),
        "[a-z0-9-]{1,12}",
        "[a-z0-9-]{1,8},[0-9]{1,3}",
    ]
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

async fn run_transition(state: DialogState, event: &Event) -> Result<DialogState, crate::commerce::CommerceError> {
    let commerce = Arc::new(MockCommerceApi::new());
    let presenter = Arc::new(RecordingPresenter::default());
    let engine = DialogEngine::new(commerce, presenter);
    engine
        .transition(&SessionContext::new("prop-session"), state, event)
        .await
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn restart_always_yields_menu(state in arb_state()) {
        let event = Event::from_payload(EventKind::Command, RESTART_COMMAND);
        let next = block_on(run_transition(state, &event)).unwrap();
        prop_assert_eq!(next, DialogState::Menu);
    }

    /// Free text (never an email, never the restart command) is a mismatch
    /// in every browsing state and must not move the session.
    #[test]
    fn free_text_never_moves_a_browsing_state(
        state in arb_browsing_state(),
        text in "[a-zA-Z ]{1,24}",
    ) {
        let event = Event::from_payload(EventKind::Command, &text);
        prop_assert!(!event.is_restart());
        let next = block_on(run_transition(state, &event)).unwrap();
        prop_assert_eq!(next, state);
    }

    /// Payload parsing is total and structured fields are validated.
    #[test]
    fn selection_parsing_is_total(token in ".{0,30}") {
        match Selection::parse(&token) {
            Selection::AddItem { product_id, quantity } => {
                prop_assert!(token.contains(','));
                prop_assert!(!product_id.is_empty());
                prop_assert!(Quantity::PRESETS.contains(&quantity.units()));
            }
            Selection::Cart => prop_assert_eq!(token.as_str(), "cart"),
            Selection::Back => prop_assert_eq!(token.as_str(), "back"),
            Selection::Checkout => prop_assert_eq!(token.as_str(), "checkout"),
            Selection::Item(raw) => prop_assert_eq!(raw, token),
        }
    }

    #[test]
    fn add_item_tokens_round_trip(
        product_id in "[a-z0-9-]{1,12}",
        quantity in proptest::sample::select(Quantity::PRESETS.to_vec()),
    ) {
        let token = format!("{product_id},{quantity}");
        let parsed = Selection::parse(&token);
        prop_assert_eq!(
            parsed,
            Selection::AddItem {
                product_id,
                quantity: Quantity::parse(&quantity.to_string()).unwrap(),
            }
        );
    }

    /// Same state + same event + same backend data -> same next state.
    /// No hidden counters influence the transition.
    #[test]
    fn transitions_are_deterministic(
        state in arb_state(),
        token in arb_selection_token(),
    ) {
        let event = Event::from_payload(EventKind::Selection, &token);
        let first = block_on(run_transition(state, &event));
        let second = block_on(run_transition(state, &event));
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.kind, b.kind),
            (a, b) => prop_assert!(false, "diverging outcomes: {a:?} vs {b:?}"),
        }
    }
}
