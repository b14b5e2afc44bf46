// Host-side tests for the screen panel's markup and action parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}
mod dom {
    include!("../src/dom.rs");
}
#[path = "../src/screen.rs"]
mod screen;

use kiosk_core::{next_state, FlowState, FlowTrigger, ProximitySnapshot, UserAction};
use screen::*;

// Every `data-action="..."` value in a chunk of markup.
fn actions_in(html: &str) -> Vec<Option<UserAction>> {
    let needle = format!("{}=\"", constants::ACTION_ATTR);
    html.match_indices(&needle)
        .map(|(i, _)| {
            let rest = &html[i + needle.len()..];
            let end = rest.find('"').unwrap_or(rest.len());
            action_for_attr(Some(&rest[..end]))
        })
        .collect()
}

#[test]
fn every_button_names_a_known_action() {
    for state in FlowState::ALL {
        for action in actions_in(&markup(state)) {
            assert!(action.is_some(), "unparsable action in {state}");
        }
    }
}

#[test]
fn buttons_only_offer_accepted_actions() {
    for state in FlowState::ALL {
        for action in actions_in(&markup(state)).into_iter().flatten() {
            assert!(
                next_state(state, FlowTrigger::Action(action)).is_some(),
                "{state} offers `{}` which it ignores",
                action.name()
            );
        }
    }
}

#[test]
fn waiting_screens_have_no_buttons() {
    assert!(actions_in(&markup(FlowState::Payment)).is_empty());
    assert!(actions_in(&markup(FlowState::Processing)).is_empty());
}

#[test]
fn options_offers_payment_and_back() {
    let actions: Vec<_> = actions_in(&markup(FlowState::Options))
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(actions, vec![UserAction::ChoosePayment, UserAction::Back]);
}

#[test]
fn action_attr_parsing() {
    assert_eq!(action_for_attr(Some("start")), Some(UserAction::Start));
    assert_eq!(action_for_attr(Some("nope")), None);
    assert_eq!(action_for_attr(None), None);
}

#[test]
fn proximity_readout_reports_range() {
    assert_eq!(proximity_text(&ProximitySnapshot::IDLE), "Card not detected");
    let near = ProximitySnapshot {
        distance: 0.5,
        intensity: 0.75,
        is_near: true,
    };
    assert_eq!(proximity_text(&near), "Card in range | 0.50 m | signal 75%");
    let far = ProximitySnapshot {
        distance: 3.0,
        intensity: 0.0,
        is_near: false,
    };
    assert!(proximity_text(&far).starts_with("Card out of range"));
}
