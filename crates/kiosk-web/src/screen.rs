//! The kiosk's touchscreen, drawn as a DOM panel over the 3D screen face.

use crate::constants::ACTION_ATTR;
use crate::input;
use kiosk_core::{FlowState, ProximitySnapshot, ScreenRect, UserAction, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

fn button(action: UserAction, label: &str, class: &str) -> String {
    format!(
        "<button class=\"{class}\" {ACTION_ATTR}=\"{}\">{label}</button>",
        action.name()
    )
}

/// Panel markup for one flow state.
pub fn markup(state: FlowState) -> String {
    match state {
        FlowState::Welcome => format!(
            "<div class=\"title\">Tap to begin</div>{}",
            button(UserAction::Start, "Start", "primary")
        ),
        FlowState::Options => format!(
            "<div class=\"title\">Choose an option</div>{}{}",
            button(UserAction::ChoosePayment, "&#x1F4B3; Payment", "primary wide"),
            button(UserAction::Back, "&larr; Back", "secondary wide")
        ),
        FlowState::Payment => "<div class=\"icon\">&#x1F4B3;</div>\
             <div class=\"title\">Hold your card near the reader</div>\
             <div class=\"hint\">Drag the card onto the glowing reader</div>\
             <div class=\"spinner\"></div>"
            .to_string(),
        FlowState::Processing => {
            "<div class=\"spinner\"></div><div class=\"title\">Processing...</div>".to_string()
        }
        FlowState::Success => format!(
            "<div class=\"icon\">&#x2705;</div><div class=\"title\">Payment approved!</div>{}",
            button(UserAction::Back, "Back to start", "primary")
        ),
    }
}

/// Readout shown under the reader while the payment screen is up.
pub fn proximity_text(p: &ProximitySnapshot) -> String {
    if !p.distance.is_finite() {
        return "Card not detected".to_string();
    }
    let label = if p.is_near { "in range" } else { "out of range" };
    format!(
        "Card {label} | {:.2} m | signal {:.0}%",
        p.distance,
        p.intensity * 100.0
    )
}

/// Action named by a clicked element's `data-action`, if it carries one.
#[inline]
pub fn action_for_attr(value: Option<&str>) -> Option<UserAction> {
    value.and_then(UserAction::from_name)
}

/// Resolve a click inside the panel to the button's action.
pub fn action_from_event(ev: &web::Event) -> Option<UserAction> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let el = target.closest(&format!("[{ACTION_ATTR}]")).ok()??;
    action_for_attr(el.get_attribute(ACTION_ATTR).as_deref())
}

/// Keeps the panel's content and placement in step with the session.
pub struct ScreenPanel {
    el: web::HtmlElement,
    shown: Option<FlowState>,
}

impl ScreenPanel {
    pub fn new(el: web::HtmlElement) -> Self {
        Self { el, shown: None }
    }

    pub fn sync(&mut self, state: FlowState, rect: Option<ScreenRect>, viewport: &Viewport) {
        if self.shown != Some(state) {
            self.el.set_inner_html(&markup(state));
            _ = self.el.set_attribute("data-state", state.name());
            self.shown = Some(state);
        }
        match rect {
            Some(r) => {
                crate::dom::set_box(&self.el, &input::box_style(viewport, r.origin, r.size));
                crate::dom::set_hidden(&self.el, false);
            }
            None => crate::dom::set_hidden(&self.el, true),
        }
    }
}
