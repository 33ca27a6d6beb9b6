#![deny(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use life_controller::{Controller, LifeConfig, PointerPos};
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const WINDOW_TITLE: &str = "Game of Life";
const INITIAL_WINDOW_SIZE: LogicalSize<u32> = LogicalSize::new(1280, 800);
const BACKGROUND_COLOR: Color = Color::WHITE;

fn main() -> Result<(), EventLoopError> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new(LifeConfig::default()))
}

fn log_error(method_name: &str, err: &anyhow::Error) {
    for line in error_report(method_name, err) {
        error!("{line}");
    }
}

fn error_report(method_name: &str, err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("{method_name}() failed: {err}")];
    lines.extend(err.chain().skip(1).map(|cause| format!("  Caused by: {cause}")));
    lines
}

struct App {
    controller: Controller,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    fn new(event_loop: &ActiveEventLoop, config: LifeConfig) -> Result<Self> {
        let window = Arc::new(Self::build_window(event_loop)?);
        let window_size = window.inner_size();
        let mut controller = Controller::new(config);
        let (width, height) = controller.on_resize(window_size.width, window_size.height);
        let pixels = Self::build_pixels(&window, width, height)?;
        Ok(Self {
            controller,
            window,
            pixels,
            cursor: None,
        })
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Result<Window> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(INITIAL_WINDOW_SIZE)
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_visible(false);
        event_loop
            .create_window(window_attributes)
            .context("window creation failed")
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .with_context(|| format!("pixel buffer {width}x{height} failed"))
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        if size.width == 0 || size.height == 0 {
            // Minimized; keep the current grid until the window comes back.
            return Ok(());
        }
        self.pixels
            .resize_surface(size.width, size.height)
            .with_context(|| format!("surface resize to {}x{} failed", size.width, size.height))?;
        let (width, height) = self.controller.on_resize(size.width, size.height);
        self.pixels
            .resize_buffer(width, height)
            .with_context(|| format!("buffer resize to {width}x{height} failed"))?;
        Ok(())
    }

    fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Space => self.controller.on_start_stop(Instant::now()),
            KeyCode::KeyC => self.controller.on_clear(),
            KeyCode::KeyM => self.controller.on_color_mode_changed(),
            KeyCode::KeyR => self.controller.on_randomize(),
            _ => (),
        }
    }

    fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
        if let Some(pos) = self.pointer_pos() {
            self.controller.on_pointer_move(pos);
        }
    }

    fn on_mouse_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if let Some(pos) = self.pointer_pos() {
                    self.controller.on_pointer_down(pos);
                }
            }
            ElementState::Released => self.controller.on_pointer_up(),
        }
    }

    /// The cursor in raster pixels, clamped onto the raster when it is over
    /// the margin around it.
    fn pointer_pos(&self) -> Option<PointerPos> {
        let cursor = self.cursor?;
        let (x, y) = self
            .pixels
            .window_pos_to_pixel((cursor.x as f32, cursor.y as f32))
            .unwrap_or_else(|pos| self.pixels.clamp_pixel_pos(pos));
        Some(PointerPos::new(x as f64, y as f64))
    }

    fn on_time_step(&mut self) {
        self.controller.on_wakeup(Instant::now());
    }

    fn request_redraw_if_needed(&mut self) {
        if self.controller.take_needs_present() {
            self.window.request_redraw();
        }
    }

    fn on_redraw(&mut self) -> Result<()> {
        if let Some(raster) = self.controller.raster() {
            let frame = self.pixels.frame_mut();
            debug_assert_eq!(frame.len(), raster.as_bytes().len());
            frame.copy_from_slice(raster.as_bytes());
        }
        self.pixels.render().context("render failed")
    }
}

struct AppEventHandler {
    config: LifeConfig,
    app: Option<App>,
}

impl AppEventHandler {
    fn new(config: LifeConfig) -> Self {
        Self { config, app: None }
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, self.config.clone()) {
            Ok(mut app) => {
                info!("space: start/stop, c: clear, m: color mode, r: random, q: quit");
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => {
                log_error("App::new", &err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Err(err) = app.on_resize(size) {
                    log_error("on_resize", &err);
                    event_loop.exit();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => app.on_key(code),
            },
            WindowEvent::CursorMoved { position, .. } => {
                app.on_cursor_moved(position);
            }
            WindowEvent::CursorLeft { .. } => {
                app.cursor = None;
                app.controller.on_pointer_up();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                app.on_mouse_button(state);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = app.on_redraw() {
                    log_error("on_redraw", &err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        app.request_redraw_if_needed();
        let control_flow = match app.controller.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(control_flow);
    }
}
