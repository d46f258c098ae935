use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowBuilder;

use super::input::{InputEvent, Key, KeyState, KeyStates};
use super::metrics::MetricsAccumulator;
use super::rendering::{OverlayData, Renderer};
use super::{InputSnapshot, LoopMetricsSnapshot, Scene, SceneCommand};

pub const SLOW_FRAME_ENV_VAR: &str = "DINO_SLOW_FRAME_MS";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub field_width: u32,
    pub field_height: u32,
    pub target_fps: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub overlay_visible: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Dino Run".to_string(),
            window_width: 800,
            window_height: 300,
            field_width: 800,
            field_height: 300,
            target_fps: 60,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            overlay_visible: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to resize render surface: {0}")]
    ResizeRenderer(#[source] PixelsError),
    #[error("failed to present frame: {0}")]
    Present(#[source] PixelsError),
}

/// Opens the window, then runs poll -> update -> render -> wait until the
/// scene asks to quit or the window closes. The scene is always unloaded
/// before returning, including on collaborator failure.
pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let mut event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window), config.field_width, config.field_height)
        .map_err(AppError::CreateRenderer)?;

    let frame_target = target_frame_duration(config.target_fps);
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));

    info!(
        target_fps = config.target_fps,
        field_width = config.field_width,
        field_height = config.field_height,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        "loop_config"
    );

    let mut input_collector = InputCollector::default();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut latest_metrics = LoopMetricsSnapshot::default();
    let mut overlay_visible = config.overlay_visible;
    let mut last_applied_title: Option<String> = None;
    let mut last_frame_instant = Instant::now();

    scene.load();

    let result = loop {
        let frame_start = Instant::now();
        let frame_dt = frame_start.saturating_duration_since(last_frame_instant);
        last_frame_instant = frame_start;

        let mut pending_resize = None;
        let status = event_loop.pump_events(Some(Duration::ZERO), |event, _window_target| {
            let Event::WindowEvent { event, .. } = event else {
                return;
            };
            match event {
                WindowEvent::CloseRequested => input_collector.mark_quit_requested(),
                WindowEvent::Resized(size) => pending_resize = Some((size.width, size.height)),
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    pending_resize = Some((size.width, size.height));
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                }
                _ => {}
            }
        });

        if let PumpStatus::Exit(code) = status {
            info!(code, reason = "event_loop_exit", "shutdown_requested");
            break Ok(());
        }
        if let Some((width, height)) = pending_resize {
            if let Err(error) = renderer.resize(width, height) {
                break Err(AppError::ResizeRenderer(error));
            }
        }
        if input_collector.take_overlay_toggle_pressed() {
            overlay_visible = !overlay_visible;
            info!(overlay_visible, "overlay_toggled");
        }

        let input_snapshot = input_collector.snapshot_for_frame();
        if input_snapshot.quit_requested() {
            info!(reason = "window_close", "shutdown_requested");
            break Ok(());
        }

        if slow_frame_delay > Duration::ZERO {
            // Explicit debug perturbation only; this is not the frame pacing.
            thread::sleep(slow_frame_delay);
        }

        let command = scene.update(&input_snapshot);
        metrics_accumulator.record_update();
        if command == SceneCommand::Quit {
            info!(reason = "quit_command", "shutdown_requested");
            break Ok(());
        }

        let overlay = overlay_visible.then(|| OverlayData {
            metrics: latest_metrics,
            target_fps: config.target_fps,
            slow_frame_delay_ms: slow_frame_delay.as_millis() as u64,
            entity_count: scene.debug_entity_count(),
        });
        if let Err(error) = renderer.render_frame(&*scene, overlay.as_ref()) {
            break Err(AppError::Present(error));
        }

        let next_title = scene.debug_title();
        if next_title != last_applied_title {
            window.set_title(next_title.as_deref().unwrap_or(&config.window_title));
            last_applied_title = next_title;
        }

        metrics_accumulator.record_frame(frame_dt);
        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(Instant::now()) {
            latest_metrics = snapshot;
            info!(
                fps = snapshot.fps,
                tps = snapshot.tps,
                frame_time_ms = snapshot.frame_time_ms,
                worst_frame_ms = snapshot.worst_frame_ms,
                entity_count = scene.debug_entity_count(),
                "loop_metrics"
            );
        }

        // Single pacing point: block until the next frame is due.
        let elapsed = Instant::now().saturating_duration_since(frame_start);
        let cap_sleep = compute_cap_sleep(elapsed, frame_target);
        if cap_sleep > Duration::ZERO {
            thread::sleep(cap_sleep);
        }
    };

    if let Err(error) = &result {
        warn!(error = %error, "loop_aborted");
    }
    scene.unload();
    info!("shutdown");
    result
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    key_states: KeyStates,
    pending_events: Vec<InputEvent>,
    overlay_toggle_is_down: bool,
    overlay_toggle_pressed_edge: bool,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        self.handle_overlay_toggle_key_state(is_overlay_toggle_key(key_event), key_event.state);
        self.handle_physical_key(key_event.physical_key, key_event.state);
    }

    fn handle_physical_key(&mut self, physical_key: PhysicalKey, state: ElementState) {
        let Some(key) = key_from_physical(physical_key) else {
            return;
        };
        let state = match state {
            ElementState::Pressed => KeyState::Pressed,
            ElementState::Released => KeyState::Released,
        };
        if self.key_states.transition(key, state) {
            self.pending_events.push(InputEvent { key, state });
        }
    }

    fn handle_overlay_toggle_key_state(&mut self, is_toggle_key: bool, state: ElementState) {
        if !is_toggle_key {
            return;
        }

        match state {
            ElementState::Pressed => {
                if !self.overlay_toggle_is_down {
                    self.overlay_toggle_pressed_edge = true;
                }
                self.overlay_toggle_is_down = true;
            }
            ElementState::Released => self.overlay_toggle_is_down = false,
        }
    }

    fn take_overlay_toggle_pressed(&mut self) -> bool {
        let was_pressed = self.overlay_toggle_pressed_edge;
        self.overlay_toggle_pressed_edge = false;
        was_pressed
    }

    /// Drains the events queued since the previous frame.
    fn snapshot_for_frame(&mut self) -> InputSnapshot {
        InputSnapshot::new(self.quit_requested, std::mem::take(&mut self.pending_events))
    }
}

fn key_from_physical(physical_key: PhysicalKey) -> Option<Key> {
    match physical_key {
        PhysicalKey::Code(KeyCode::Space) => Some(Key::Space),
        PhysicalKey::Code(KeyCode::ArrowUp) => Some(Key::ArrowUp),
        PhysicalKey::Code(KeyCode::ArrowDown) => Some(Key::ArrowDown),
        PhysicalKey::Code(KeyCode::Escape) => Some(Key::Escape),
        _ => None,
    }
}

fn is_overlay_toggle_key(key_event: &KeyEvent) -> bool {
    matches!(key_event.physical_key, PhysicalKey::Code(KeyCode::F3))
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn target_frame_duration(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    parse_slow_frame_delay(env::var(SLOW_FRAME_ENV_VAR), config_slow_frame_ms)
}

fn parse_slow_frame_delay(
    raw: Result<String, env::VarError>,
    config_slow_frame_ms: u64,
) -> Duration {
    match raw {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(
                    env_var = SLOW_FRAME_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-frame env var value; falling back to config"
                );
                Duration::from_millis(config_slow_frame_ms)
            }
        },
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}
