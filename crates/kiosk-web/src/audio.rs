use kiosk_core::constants::{BEEP_GAIN, BEEP_GAIN_FLOOR};
use kiosk_core::{ConfirmationSink, Tone, CONFIRMATION_TONES};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// WebAudio confirmation beep. The context is created on first use and can
/// be primed from a user gesture so it is not born suspended.
#[derive(Clone, Default)]
pub struct WebBeep {
    ctx: Rc<RefCell<Option<web::AudioContext>>>,
}

impl WebBeep {
    fn context(&self) -> anyhow::Result<web::AudioContext> {
        let mut slot = self.ctx.borrow_mut();
        if let Some(ctx) = slot.as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = web::AudioContext::new().map_err(js_err)?;
        log::info!("[audio] context created at {:.0} Hz", ctx.sample_rate());
        *slot = Some(ctx.clone());
        Ok(ctx)
    }

    /// Create/resume the context; call from a pointer or click handler.
    pub fn prime(&self) {
        match self.context() {
            Ok(ctx) => {
                _ = ctx.resume();
            }
            Err(e) => log::warn!("[audio] unavailable: {e:#}"),
        }
    }
}

fn schedule_tone(ctx: &web::AudioContext, tone: &Tone, t0: f64) -> anyhow::Result<()> {
    let osc = web::OscillatorNode::new(ctx).map_err(js_err)?;
    osc.set_type(web::OscillatorType::Sine);
    osc.frequency().set_value(tone.frequency_hz);
    let gain = web::GainNode::new(ctx).map_err(js_err)?;
    let start = t0 + tone.start_sec;
    let end = t0 + tone.end_sec();
    let g = gain.gain();
    g.set_value_at_time(BEEP_GAIN, start).map_err(js_err)?;
    g.exponential_ramp_to_value_at_time(BEEP_GAIN_FLOOR, end)
        .map_err(js_err)?;
    osc.connect_with_audio_node(&gain).map_err(js_err)?;
    gain.connect_with_audio_node(&ctx.destination())
        .map_err(js_err)?;
    osc.start_with_when(start).map_err(js_err)?;
    osc.stop_with_when(end).map_err(js_err)?;
    Ok(())
}

impl ConfirmationSink for WebBeep {
    fn play_confirmation(&mut self) -> anyhow::Result<()> {
        let ctx = self.context()?;
        _ = ctx.resume();
        let t0 = ctx.current_time();
        for tone in &CONFIRMATION_TONES {
            schedule_tone(&ctx, tone, t0)?;
        }
        Ok(())
    }
}
