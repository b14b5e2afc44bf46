// ---------------- Native audio (cpal) ----------------
//
// A small mixer behind the output stream: `play_confirmation` queues one sine
// oscillator per cue tone and the stream callback renders and retires them.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use kiosk_core::{ConfirmationSink, Tone, CONFIRMATION_TONES};
use std::f32::consts::TAU;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
struct ActiveOscillator {
    tone: Tone,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    delay_samples: u32,
    total_samples: u32,
    samples_emitted: u32,
    sample_rate: f32,
}

impl ActiveOscillator {
    fn new(tone: Tone, sample_rate: f32) -> Self {
        Self {
            tone,
            phase: 0.0,
            phase_inc: TAU * tone.frequency_hz / sample_rate,
            delay_samples: (tone.start_sec * sample_rate as f64) as u32,
            total_samples: ((tone.duration_sec * sample_rate as f64) as u32).max(1),
            samples_emitted: 0,
            sample_rate,
        }
    }
}

struct AudioState {
    sample_rate: f32,
    oscillators: Vec<ActiveOscillator>,
}

// A poisoned lock only means another callback panicked mid-mix; the
// oscillator list is still usable.
fn lock(state: &Mutex<AudioState>) -> MutexGuard<'_, AudioState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Mono sample; finished oscillators are removed.
fn mix_sample(oscillators: &mut Vec<ActiveOscillator>) -> f32 {
    let mut out = 0.0f32;
    let mut i = 0usize;
    while i < oscillators.len() {
        let osc = &mut oscillators[i];
        if osc.delay_samples > 0 {
            osc.delay_samples -= 1;
            i += 1;
            continue;
        }
        let t = osc.samples_emitted as f64 / osc.sample_rate as f64;
        out += osc.phase.sin() * osc.tone.gain_at(t);
        osc.phase += osc.phase_inc;
        if osc.phase > TAU {
            osc.phase -= TAU;
        }
        osc.samples_emitted += 1;
        if osc.samples_emitted >= osc.total_samples {
            oscillators.swap_remove(i);
            continue;
        }
        i += 1;
    }
    out.tanh()
}

/// Fill an interleaved buffer, one mixed sample copied to every channel.
fn fill<T: Copy>(
    data: &mut [T],
    channels: usize,
    state: &Mutex<AudioState>,
    convert: impl Fn(f32) -> T,
) {
    let mut guard = lock(state);
    for frame in data.chunks_mut(channels.max(1)) {
        let v = convert(mix_sample(&mut guard.oscillators));
        for s in frame.iter_mut() {
            *s = v;
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    state: Arc<Mutex<AudioState>>,
    convert: fn(f32) -> T,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + Send + 'static,
{
    let channels = config.channels as usize;
    device.build_output_stream(
        config,
        move |data: &mut [T], _| fill(data, channels, &state, convert),
        |err| log::error!("[audio] stream error: {err}"),
        None,
    )
}

fn to_i16(v: f32) -> i16 {
    (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

fn to_u16(v: f32) -> u16 {
    ((v * 0.5 + 0.5).clamp(0.0, 1.0) * u16::MAX as f32) as u16
}

/// Confirmation beep on the default output device.
pub struct CpalBeep {
    state: Arc<Mutex<AudioState>>,
    _stream: cpal::Stream,
}

impl CpalBeep {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("no output device"))?;
        let supported = device.default_output_config()?;
        let sample_rate = supported.sample_rate().0 as f32;
        let format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let state = Arc::new(Mutex::new(AudioState {
            sample_rate,
            oscillators: Vec::new(),
        }));
        let stream = match format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, Arc::clone(&state), |v| v)?
            }
            cpal::SampleFormat::I16 => build_stream(&device, &config, Arc::clone(&state), to_i16)?,
            cpal::SampleFormat::U16 => build_stream(&device, &config, Arc::clone(&state), to_u16)?,
            other => anyhow::bail!("unsupported sample format {other:?}"),
        };
        stream.play()?;
        log::info!(
            "[audio] output {} Hz, {} ch, {:?}",
            sample_rate,
            config.channels,
            format
        );
        Ok(Self {
            state,
            _stream: stream,
        })
    }
}

impl ConfirmationSink for CpalBeep {
    fn play_confirmation(&mut self) -> anyhow::Result<()> {
        let mut guard = lock(&self.state);
        let sr = guard.sample_rate;
        guard
            .oscillators
            .extend(CONFIRMATION_TONES.iter().map(|t| ActiveOscillator::new(*t, sr)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 8_000.0;

    fn queued() -> Vec<ActiveOscillator> {
        CONFIRMATION_TONES
            .iter()
            .map(|t| ActiveOscillator::new(*t, SR))
            .collect()
    }

    #[test]
    fn cue_plays_out_and_retires() {
        let mut oscs = queued();
        let last_end = CONFIRMATION_TONES
            .iter()
            .map(|t| t.end_sec())
            .fold(0.0, f64::max);
        let n = (last_end * SR as f64) as usize + 2;
        let mut peak = 0.0f32;
        for _ in 0..n {
            peak = peak.max(mix_sample(&mut oscs).abs());
        }
        assert!(oscs.is_empty());
        assert!(peak > 0.1);
        assert!(peak <= 1.0);
    }

    #[test]
    fn second_tone_waits_for_its_delay() {
        let mut oscs = queued();
        let delay = (CONFIRMATION_TONES[1].start_sec * SR as f64) as u32;
        for _ in 0..delay {
            mix_sample(&mut oscs);
        }
        let second = oscs
            .iter()
            .find(|o| o.tone == CONFIRMATION_TONES[1])
            .map(|o| o.samples_emitted);
        assert_eq!(second, Some(0));
    }

    #[test]
    fn sample_conversions_stay_in_range() {
        assert_eq!(to_i16(2.0), i16::MAX);
        assert_eq!(to_i16(0.0), 0);
        assert_eq!(to_u16(-1.0), 0);
        assert_eq!(to_u16(1.0), u16::MAX);
    }
}
