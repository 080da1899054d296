//! Windowed snow globe host.
//!
//! Wraps a [`SnowGlobe`] in a winit window and renders it with wgpu. The
//! window's own position on screen is the shake signal: drag the window around
//! and the snow swirls.
//!
//! Controls: left-drag orbits the camera, the wheel zooms, `Space` pauses,
//! `R` re-seeds the snowfall.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::SnowConfig;
use crate::error::RunError;
use crate::globe::{FrameInputs, SnowGlobe};
use crate::gpu::{Camera, GpuState};
use crate::input::{ViewportSample, ViewportSource};
use crate::time::FrameClock;
use crate::SnowCore;

const TITLE_REFRESH_TICKS: u64 = 30;

/// Reads the window's outer position and inner size.
///
/// Platforms that cannot report a window position (Wayland, the web) yield
/// NaN coordinates, which the sampler turns into a zero delta.
#[derive(Debug, Default)]
pub struct WindowViewport {
    window: Option<Arc<Window>>,
}

impl WindowViewport {
    /// A viewport with no window yet. Samples as invalid until attached.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Start sampling `window`.
    pub fn attach(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }
}

impl ViewportSource for WindowViewport {
    fn sample(&mut self) -> ViewportSample {
        let Some(window) = &self.window else {
            return ViewportSample::INVALID;
        };
        let position = window
            .outer_position()
            .map(|p| Vec2::new(p.x as f32, p.y as f32))
            .unwrap_or(Vec2::NAN);
        let size = window.inner_size();
        ViewportSample::new(position, Vec2::new(size.width as f32, size.height as f32))
    }
}

/// A snow globe window builder.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Simulation {
    config: SnowConfig,
    title: String,
    glitter: f32,
}

impl Simulation {
    /// Create a simulation with the default globe.
    pub fn new() -> Self {
        Self {
            config: SnowConfig::default(),
            title: "Snow Globe".to_string(),
            glitter: 0.6,
        }
    }

    /// Replace the particle configuration.
    pub fn with_config(mut self, config: SnowConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title. FPS is appended while running.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Strength of the flake sparkle, `0.0` disables it.
    pub fn with_glitter(mut self, glitter: f32) -> Self {
        self.glitter = glitter.max(0.0);
        self
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        let globe = SnowGlobe::new(&self.config, WindowViewport::detached())?;
        let camera = Camera::framing(self.config.sphere_center, self.config.sphere_radius);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(globe, camera, self.title, self.glitter);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    // Handed to the GPU state once it exists.
    camera: Option<Camera>,
    globe: SnowGlobe<WindowViewport>,
    clock: FrameClock,
    title: String,
    glitter: f32,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<RunError>,
}

impl App {
    fn new(globe: SnowGlobe<WindowViewport>, camera: Camera, title: String, glitter: f32) -> Self {
        Self {
            window: None,
            gpu_state: None,
            camera: Some(camera),
            globe,
            clock: FrameClock::new(),
            title,
            glitter,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(900, 900));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.globe.source_mut().attach(window.clone());

        let camera = self.camera.take().unwrap_or_else(|| {
            let boundary = self.globe.pool().boundary();
            Camera::framing(boundary.center(), boundary.radius())
        });
        let mut gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.globe.transforms(),
            camera,
        ))?;
        gpu_state.glitter = self.glitter;

        log::info!(
            "snow globe running: {} particles, {}x{}",
            self.globe.pool().len(),
            gpu_state.config.width,
            gpu_state.config.height
        );

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    /// Re-seed the snowfall. The new transforms are uploaded right away,
    /// since a paused clock skips the per-tick upload.
    fn reseed(&mut self) {
        self.globe.initialize();
        self.clock.reset();
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.upload(self.globe.transforms());
        }
        log::info!("snowfall re-seeded");
    }

    fn advance(&mut self) {
        let Some(tick) = self.clock.tick() else {
            return;
        };
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        let inputs = FrameInputs::new(Some(gpu_state.camera.basis()), self.clock.elapsed());
        let transforms = self.globe.step(tick, &inputs);
        gpu_state.upload(transforms);

        if tick % TITLE_REFRESH_TICKS == 0 {
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {:.0} FPS", self.title, self.clock.fps()));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init_window(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Space) => {
                        self.clock.toggle_pause();
                        log::info!("paused: {}", self.clock.is_paused());
                    }
                    PhysicalKey::Code(KeyCode::KeyR) => self.reseed(),
                    _ => {}
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;

                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.orbit(dx as f32, dy as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.advance();

                if let Some(gpu_state) = &mut self.gpu_state {
                    match gpu_state.render(self.clock.elapsed()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu_state.resize(winit::dpi::PhysicalSize {
                                width: gpu_state.config.width,
                                height: gpu_state.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                        }
                        Err(e) => log::error!("render error: {e:?}"),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
