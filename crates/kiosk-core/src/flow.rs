//! The kiosk screen's payment flow.
//!
//! ```text
//! Welcome --start--> Options --payment--> Payment --card--> Processing --timer--> Success
//!    ^                  |                                                          |
//!    +-------back-------+---------------------------back---------------------------+
//! ```
//!
//! Anything not drawn above is ignored.

use crate::constants::PROCESSING_DELAY_MS;
use crate::feedback::ConfirmationSink;
use crate::timer::SingleShot;
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowState {
    #[default]
    Welcome,
    Options,
    Payment,
    Processing,
    Success,
}

impl FlowState {
    pub const ALL: [FlowState; 5] = [
        FlowState::Welcome,
        FlowState::Options,
        FlowState::Payment,
        FlowState::Processing,
        FlowState::Success,
    ];

    /// Only the payment screen listens for the card.
    pub fn enables_detection(self) -> bool {
        self == FlowState::Payment
    }

    pub fn name(self) -> &'static str {
        match self {
            FlowState::Welcome => "welcome",
            FlowState::Options => "options",
            FlowState::Payment => "payment",
            FlowState::Processing => "processing",
            FlowState::Success => "success",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic taps issued by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Start,
    ChoosePayment,
    Back,
}

impl UserAction {
    pub const ALL: [UserAction; 3] = [UserAction::Start, UserAction::ChoosePayment, UserAction::Back];

    /// Parse the `data-action` names used by the screen markup.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(UserAction::Start),
            "payment" => Some(UserAction::ChoosePayment),
            "back" => Some(UserAction::Back),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UserAction::Start => "start",
            UserAction::ChoosePayment => "payment",
            UserAction::Back => "back",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowTrigger {
    Action(UserAction),
    CardDetected,
    TimerElapsed,
}

impl FlowTrigger {
    pub const ALL: [FlowTrigger; 5] = [
        FlowTrigger::Action(UserAction::Start),
        FlowTrigger::Action(UserAction::ChoosePayment),
        FlowTrigger::Action(UserAction::Back),
        FlowTrigger::CardDetected,
        FlowTrigger::TimerElapsed,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: FlowState,
    pub to: FlowState,
}

/// The transition table. `None` means the trigger is ignored in `state`.
pub fn next_state(state: FlowState, trigger: FlowTrigger) -> Option<FlowState> {
    use FlowState::*;
    use FlowTrigger::*;
    match (state, trigger) {
        (Welcome, Action(UserAction::Start)) => Some(Options),
        (Options, Action(UserAction::ChoosePayment)) => Some(Payment),
        (Options, Action(UserAction::Back)) => Some(Welcome),
        (Payment, CardDetected) => Some(Processing),
        (Processing, TimerElapsed) => Some(Success),
        (Success, Action(UserAction::Back)) => Some(Welcome),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct KioskFlow {
    state: FlowState,
    timer: SingleShot<FlowTrigger>,
    processing_delay: Duration,
}

impl Default for KioskFlow {
    fn default() -> Self {
        Self::new(Duration::from_millis(PROCESSING_DELAY_MS))
    }
}

impl KioskFlow {
    pub fn new(processing_delay: Duration) -> Self {
        Self {
            state: FlowState::Welcome,
            timer: SingleShot::new(),
            processing_delay,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn hotspot_active(&self) -> bool {
        self.state.enables_detection()
    }

    pub fn timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn processing_delay(&self) -> Duration {
        self.processing_delay
    }

    fn fire(&mut self, trigger: FlowTrigger) -> Option<Transition> {
        let to = next_state(self.state, trigger)?;
        let t = Transition {
            from: self.state,
            to,
        };
        self.state = to;
        log::info!("[flow] {} -> {}", t.from, t.to);
        Some(t)
    }

    pub fn apply(&mut self, action: UserAction) -> Option<Transition> {
        let t = self.fire(FlowTrigger::Action(action));
        if t.is_none() {
            log::debug!("[flow] ignored `{}` in {}", action.name(), self.state);
        }
        t
    }

    /// Honored only on the payment screen: plays the confirmation cue and
    /// arms the delayed move to Success.
    pub fn card_detected(&mut self, sink: &mut dyn ConfirmationSink) -> Option<Transition> {
        if self.state != FlowState::Payment {
            return None;
        }
        if let Err(e) = sink.play_confirmation() {
            log::warn!("[flow] confirmation feedback failed: {e:#}");
        }
        let t = self.fire(FlowTrigger::CardDetected)?;
        self.start_processing_timer();
        Some(t)
    }

    fn start_processing_timer(&mut self) {
        self.timer
            .schedule(self.processing_delay, FlowTrigger::TimerElapsed);
    }

    /// Advance the pending timer by one frame's worth of time.
    pub fn advance(&mut self, dt: Duration) -> Option<Transition> {
        let trigger = self.timer.advance(dt)?;
        self.fire(trigger)
    }

    /// Back to the welcome screen with nothing pending (teardown / restart).
    pub fn reset(&mut self) {
        self.timer.cancel();
        if self.state != FlowState::Welcome {
            log::info!("[flow] reset from {}", self.state);
        }
        self.state = FlowState::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Counting;

    struct Broken;

    impl ConfirmationSink for Broken {
        fn play_confirmation(&mut self) -> anyhow::Result<()> {
            anyhow::bail!("no audio device")
        }
    }

    fn at_payment() -> KioskFlow {
        let mut flow = KioskFlow::default();
        flow.apply(UserAction::Start);
        flow.apply(UserAction::ChoosePayment);
        flow
    }

    #[test]
    fn starts_at_welcome() {
        let flow = KioskFlow::default();
        assert_eq!(flow.state(), FlowState::Welcome);
        assert!(!flow.hotspot_active());
    }

    #[test]
    fn options_back_returns_to_welcome() {
        let mut flow = KioskFlow::default();
        flow.apply(UserAction::Start);
        let t = flow.apply(UserAction::Back).unwrap();
        assert_eq!(t, Transition { from: FlowState::Options, to: FlowState::Welcome });
    }

    #[test]
    fn card_outside_payment_is_ignored() {
        let mut flow = KioskFlow::default();
        let mut sink = Counting::default();
        assert!(flow.card_detected(&mut sink).is_none());
        assert_eq!(sink.played, 0);
        assert!(!flow.timer_pending());
    }

    #[test]
    fn failing_feedback_does_not_block_the_flow() {
        let mut flow = at_payment();
        assert!(flow.card_detected(&mut Broken).is_some());
        assert_eq!(flow.state(), FlowState::Processing);
        assert!(flow.timer_pending());
    }

    #[test]
    fn rescheduled_timer_fires_once_from_second_schedule() {
        let mut flow = at_payment();
        flow.card_detected(&mut Counting::default());
        flow.advance(Duration::from_millis(1000));
        flow.start_processing_timer();
        assert!(flow.advance(Duration::from_millis(1000)).is_none());
        assert_eq!(flow.state(), FlowState::Processing);
        let t = flow.advance(Duration::from_millis(500)).unwrap();
        assert_eq!(t.to, FlowState::Success);
        assert!(flow.advance(Duration::from_millis(5000)).is_none());
        assert_eq!(flow.state(), FlowState::Success);
    }

    #[test]
    fn reset_cancels_pending_success() {
        let mut flow = at_payment();
        flow.card_detected(&mut Counting::default());
        flow.reset();
        assert!(flow.advance(Duration::from_secs(10)).is_none());
        assert_eq!(flow.state(), FlowState::Welcome);
    }

    #[test]
    fn action_names_round_trip() {
        for a in UserAction::ALL {
            assert_eq!(UserAction::from_name(a.name()), Some(a));
        }
        assert_eq!(UserAction::from_name("checkout"), None);
    }
}
