use crate::constants::{
    BEEP_FIRST_HZ, BEEP_FIRST_SEC, BEEP_GAIN, BEEP_GAIN_FLOOR, BEEP_SECOND_DELAY_SEC,
    BEEP_SECOND_HZ, BEEP_SECOND_SEC,
};

/// Fire-and-forget confirmation cue (the beep on card detection).
///
/// Implementations may fail (no audio device, suspended context); callers
/// log the error and carry on.
pub trait ConfirmationSink {
    fn play_confirmation(&mut self) -> anyhow::Result<()>;
}

/// Sink that does nothing; used headless and before audio is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl ConfirmationSink for Silent {
    fn play_confirmation(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Counts confirmations instead of playing them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counting {
    pub played: usize,
}

impl ConfirmationSink for Counting {
    fn play_confirmation(&mut self) -> anyhow::Result<()> {
        self.played += 1;
        Ok(())
    }
}

/// One sine tone of the confirmation cue, offsets relative to the cue start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub start_sec: f64,
    pub duration_sec: f64,
}

/// Two rising tones, the second starting shortly after the first.
pub const CONFIRMATION_TONES: [Tone; 2] = [
    Tone {
        frequency_hz: BEEP_FIRST_HZ,
        start_sec: 0.0,
        duration_sec: BEEP_FIRST_SEC,
    },
    Tone {
        frequency_hz: BEEP_SECOND_HZ,
        start_sec: BEEP_SECOND_DELAY_SEC,
        duration_sec: BEEP_SECOND_SEC,
    },
];

impl Tone {
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }

    /// Envelope `t` seconds into the tone: exponential fall from
    /// `BEEP_GAIN` to `BEEP_GAIN_FLOOR` over the tone's duration, silent
    /// outside it.
    pub fn gain_at(&self, t: f64) -> f32 {
        if t < 0.0 || t >= self.duration_sec || self.duration_sec <= 0.0 {
            return 0.0;
        }
        let ratio = (BEEP_GAIN_FLOOR / BEEP_GAIN) as f64;
        (BEEP_GAIN as f64 * ratio.powf(t / self.duration_sec)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_tone_overlaps_the_first() {
        let [a, b] = CONFIRMATION_TONES;
        assert!(b.start_sec < a.end_sec());
        assert!(b.frequency_hz > a.frequency_hz);
        assert!((b.end_sec() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn envelope_decays_to_floor() {
        let t = CONFIRMATION_TONES[0];
        assert!((t.gain_at(0.0) - BEEP_GAIN).abs() < 1e-6);
        let near_end = t.gain_at(t.duration_sec * 0.999);
        assert!((near_end - BEEP_GAIN_FLOOR).abs() < 1e-3);
        assert!(t.gain_at(0.05) > t.gain_at(0.1));
        assert_eq!(t.gain_at(t.duration_sec), 0.0);
        assert_eq!(t.gain_at(-0.01), 0.0);
    }
}
