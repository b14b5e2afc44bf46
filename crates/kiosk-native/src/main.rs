use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use glam::Vec2;
use kiosk_core::{
    markers, model, ConfigError, ConfirmationSink, FrameSnapshot, KioskConfig, KioskSession,
    MarkerInstance, Silent, Viewport,
};

mod audio;
mod gpu;
mod keys;

use keys::KeyCommand;

// Longest step fed to the session after a stall
const MAX_FRAME_DT: Duration = Duration::from_millis(100);
const ENV_PREFIX: &str = "KIOSK_";
// Pixel scroll per zoom step (touchpads)
const SCROLL_PIXELS_PER_STEP: f64 = 100.0;

/// `KIOSK_DETECTION_DISTANCE=1.5` and friends; other variables are ignored.
fn config_from_env<I>(vars: I) -> Result<KioskConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let pairs: Vec<(String, String)> = vars
        .into_iter()
        .filter_map(|(k, v)| Some((k.strip_prefix(ENV_PREFIX)?.to_ascii_lowercase(), v)))
        .collect();
    KioskConfig::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

fn viewport_of(window: &Window) -> Viewport {
    let size: LogicalSize<f32> = window.inner_size().to_logical(window.scale_factor());
    Viewport::new(size.width, size.height)
}

/// Zoom steps for a wheel event; positive moves the camera away.
fn wheel_steps(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(p) => (-p.y / SCROLL_PIXELS_PER_STEP) as f32,
    }
}

fn title_for(snap: &FrameSnapshot) -> String {
    if snap.hotspot_visible && snap.proximity.distance.is_finite() {
        format!(
            "Kiosk | {} | d={:.2} i={:.0}%",
            snap.flow,
            snap.proximity.distance,
            snap.proximity.intensity * 100.0
        )
    } else {
        format!("Kiosk | {}", snap.flow)
    }
}

struct App {
    session: KioskSession,
    cursor: Vec2,
    // Right button held on the scene
    orbiting: bool,
    markers: Vec<MarkerInstance>,
    last_frame: Instant,
    title: String,
}

impl App {
    fn on_key(&mut self, cmd: KeyCommand) {
        match cmd {
            KeyCommand::Action(action) => {
                self.session.user_action(action);
            }
            KeyCommand::Reset => {
                let ended_drag = self.session.reset();
                log::info!("[keys] reset (drag ended: {ended_drag})");
            }
        }
    }

    fn frame(&mut self, window: &Window) {
        let now = Instant::now();
        let dt = (now - self.last_frame).min(MAX_FRAME_DT);
        self.last_frame = now;

        let snap = self.session.update(dt);
        let title = title_for(&snap);
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }

        let s = &self.session;
        match (s.bounds(), s.layout()) {
            (Some(bounds), Some(layout)) => {
                let radius = s.config().hotspot_radius;
                markers::build(&snap, bounds, layout, radius, &mut self.markers);
            }
            _ => self.markers.clear(),
        }
        // No DOM here, so the grab target is drawn into the scene.
        if !snap.dragging {
            let hud = s.drag().hud();
            if let Some(m) = markers::hud_card(&hud, s.viewport(), s.camera(), &s.drag().plane()) {
                self.markers.push(m);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = config_from_env(std::env::vars()).unwrap_or_else(|e| {
        log::warn!("[config] {e}; using defaults");
        KioskConfig::default()
    });
    let scale = config.model_scale;

    let feedback: Box<dyn ConfirmationSink> = match audio::CpalBeep::new() {
        Ok(beep) => Box::new(beep),
        Err(e) => {
            log::warn!("[audio] unavailable: {e:#}");
            Box::new(Silent)
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("Kiosk")
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let mut session = KioskSession::new(config, viewport_of(&window), feedback);
    let mut kiosk = model::placeholder_kiosk(scale);
    if let Err(e) = session.on_model_loaded(&mut kiosk) {
        log::error!("[model] {e}");
    }

    let mut state = pollster::block_on(gpu::GpuState::new(&window))?;
    let mut app = App {
        session,
        cursor: Vec2::ZERO,
        orbiting: false,
        markers: Vec::new(),
        last_frame: Instant::now(),
        title: String::new(),
    };

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                app.session.set_viewport(viewport_of(state.window));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                app.session.set_viewport(viewport_of(state.window));
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let p: winit::dpi::LogicalPosition<f32> =
                    position.to_logical(state.window.scale_factor());
                let cursor = Vec2::new(p.x, p.y);
                let delta = cursor - app.cursor;
                app.cursor = cursor;
                if app.session.drag().is_dragging() {
                    app.session.pointer_move(cursor);
                } else if app.orbiting {
                    app.session.orbit(delta);
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => {
                    app.session.pointer_down(app.cursor);
                }
                ElementState::Released => {
                    app.session.pointer_up();
                }
            },
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Right,
                ..
            } => {
                app.orbiting = button_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                app.session.zoom(wheel_steps(&delta));
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                if let Some(cmd) = keys::command_for_key(&event.logical_key) {
                    app.on_key(cmd);
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            app.frame(state.window);
            match state.render(app.session.camera(), &app.markers) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[gpu] {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::TriggerPolicy;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = config_from_env(vars(&[
            ("KIOSK_DETECTION_DISTANCE", "1.25"),
            ("KIOSK_TRIGGER", "approach"),
            ("KIOSK_PROCESSING_MS", "900"),
            ("HOME", "/root"),
        ]))
        .unwrap();
        assert_eq!(cfg.detection_distance, 1.25);
        assert_eq!(cfg.trigger, TriggerPolicy::OnApproach);
        assert_eq!(cfg.processing_delay, Duration::from_millis(900));
        assert_eq!(cfg.hotspot_radius, KioskConfig::default().hotspot_radius);
    }

    #[test]
    fn unknown_kiosk_variable_is_an_error() {
        let err = config_from_env(vars(&[("KIOSK_COLOUR", "red")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownKey("colour".into()));
    }

    #[test]
    fn scrolling_up_zooms_in() {
        assert_eq!(wheel_steps(&MouseScrollDelta::LineDelta(0.0, 2.0)), -2.0);
        let px = winit::dpi::PhysicalPosition::new(0.0, -150.0);
        assert_eq!(wheel_steps(&MouseScrollDelta::PixelDelta(px)), 1.5);
    }

    #[test]
    fn title_shows_proximity_only_while_the_hotspot_is_up() {
        let mut snap = FrameSnapshot::idle(kiosk_core::FlowState::Payment);
        assert_eq!(title_for(&snap), "Kiosk | payment");
        snap.hotspot_visible = true;
        snap.proximity.distance = 1.5;
        snap.proximity.intensity = 0.25;
        assert_eq!(title_for(&snap), "Kiosk | payment | d=1.50 i=25%");
    }
}
