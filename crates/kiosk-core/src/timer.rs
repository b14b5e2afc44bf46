use std::time::Duration;

/// Cancellable single-shot timer advanced by the frame clock.
///
/// Only one payload can be pending; scheduling again replaces it and
/// restarts the countdown.
#[derive(Clone, Debug)]
pub struct SingleShot<T> {
    pending: Option<(Duration, T)>,
}

impl<T> Default for SingleShot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> SingleShot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, payload: T) {
        self.pending = Some((delay, payload));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, p)| p)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Count down by `dt`; yields the payload on the tick the delay runs out.
    pub fn advance(&mut self, dt: Duration) -> Option<T> {
        let (remaining, _) = self.pending.as_mut()?;
        *remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            self.pending.take().map(|(_, p)| p)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_once_after_delay() {
        let mut t = SingleShot::new();
        t.schedule(ms(100), 'a');
        assert_eq!(t.advance(ms(60)), None);
        assert_eq!(t.advance(ms(39)), None);
        assert_eq!(t.advance(ms(1)), Some('a'));
        assert_eq!(t.advance(ms(500)), None);
        assert!(!t.is_pending());
    }

    #[test]
    fn reschedule_restarts_countdown() {
        let mut t = SingleShot::new();
        t.schedule(ms(100), 1);
        t.advance(ms(90));
        t.schedule(ms(100), 2);
        assert_eq!(t.advance(ms(90)), None);
        assert_eq!(t.advance(ms(10)), Some(2));
    }

    #[test]
    fn cancel_drops_pending() {
        let mut t = SingleShot::new();
        t.schedule(ms(10), ());
        assert_eq!(t.cancel(), Some(()));
        assert_eq!(t.advance(ms(20)), None);
    }
}
