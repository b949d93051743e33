//! winit shell around the playback transport.
//!
//! The event loop owns the window and GPU; every timing decision is
//! delegated to [`Transport`], and every frame is a CPU crop of the
//! display buffer handed to [`Gpu::present`].

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::control::PlaybackSignals;
use crate::pan::PanController;
use crate::playback::{TILED_POLL, Tick, Timing, Transport};
use crate::render::gpu::Gpu;
use crate::session::Mode;
use crate::viewport::{self, ViewportState};

/// Everything the session hands to the presentation layer.
pub struct RunParams {
    pub mode: Mode,
    pub composite: RgbaImage,
    pub timing: Timing,
    pub signals: PlaybackSignals,
    pub background: Rgba<u8>,
    pub initial_size: (u32, u32),
    pub title: String,
}

/// Run the window until the stop signal, Escape/Q, or window close.
///
/// # Errors
/// Returns an error if the event loop or GPU fails to initialize.
pub fn run(params: RunParams) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = PlayerApp::new(params);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct PlayerApp {
    mode: Mode,
    composite: RgbaImage,
    signals: PlaybackSignals,
    background: Rgba<u8>,
    initial_size: (u32, u32),
    title: String,

    transport: Transport,
    viewport: ViewportState,
    pan: PanController,
    /// Composite rescaled to the current window; replaced, never mutated.
    display: RgbaImage,
    /// Window size at the last rebuild of `display`.
    last_rescale: (u32, u32),
    cursor: (f64, f64),

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    error: Option<anyhow::Error>,
}

impl PlayerApp {
    fn new(params: RunParams) -> Self {
        let (w, h) = params.initial_size;
        Self {
            mode: params.mode,
            signals: params.signals,
            background: params.background,
            initial_size: params.initial_size,
            title: params.title,
            transport: Transport::new(params.timing, Instant::now()),
            viewport: ViewportState::new(w, h),
            pan: PanController::default(),
            display: params.composite.clone(),
            composite: params.composite,
            last_rescale: (0, 0),
            cursor: (0.0, 0.0),
            window: None,
            gpu: None,
            error: None,
        }
    }

    /// Rebuild the display buffer for the given window size and clamp the
    /// offsets to the new bounds.
    fn rebuild_display(&mut self, win_w: u32, win_h: u32) {
        let scale = match self.mode {
            Mode::Scroll => viewport::scroll_scale(self.composite.width(), win_w),
            Mode::Tiled => viewport::tiled_scale(
                self.composite.width(),
                self.composite.height(),
                win_w,
                win_h,
            ),
        };
        match viewport::rescale(&self.composite, scale) {
            Ok(buffer) => {
                debug!(
                    win_w,
                    win_h,
                    buf_w = buffer.width(),
                    buf_h = buffer.height(),
                    "rebuilt display buffer"
                );
                self.display = buffer;
                self.last_rescale = (win_w, win_h);
            }
            Err(err) => warn!("display rescale failed, keeping previous buffer: {err:#}"),
        }
        self.viewport.win_w = win_w.max(1);
        self.viewport.win_h = win_h.max(1);
        self.viewport
            .clamp_to(self.display.width(), self.display.height());
    }

    fn stop_and_exit(&self, event_loop: &ActiveEventLoop) {
        self.signals.stop.set();
        event_loop.exit();
    }

    fn draw(&mut self) {
        let Some(gpu) = &mut self.gpu else { return };
        let frame = viewport::crop_frame(
            &self.display,
            self.viewport.win_w,
            self.viewport.win_h,
            self.viewport.x,
            self.viewport.y,
            self.background,
        );
        if let Err(err) = gpu.present(&frame) {
            // Transient surface trouble; a terminal failure surfaces as a
            // close event on a later frame.
            warn!("frame present failed: {err:#}");
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (w, h) = self.initial_size;
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(w.max(1), h.max(1)));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.error = Some(err.into());
                event_loop.exit();
                return;
            }
        };

        match Gpu::new(window.clone()) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
                return;
            }
        }

        let PhysicalSize { width, height } = window.inner_size();
        self.rebuild_display(width.max(1), height.max(1));
        if self.mode == Mode::Tiled {
            self.viewport
                .center_on(self.display.width(), self.display.height());
        }
        info!(mode = ?self.mode, width, height, "playback window ready");

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(win) = self.window.clone() else {
            return;
        };
        if win.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.stop_and_exit(event_loop),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Released {
                    use winit::keyboard::{KeyCode, PhysicalKey};
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ) => {
                            self.stop_and_exit(event_loop);
                        }
                        PhysicalKey::Code(KeyCode::Space) => {
                            if self.signals.pause.is_set() {
                                self.signals.signal_resume();
                            } else {
                                self.signals.signal_pause();
                            }
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width == 0 || height == 0 {
                    return;
                }
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(width, height);
                }
                // Track the size every time; only rescale past the threshold.
                if viewport::needs_rescale(self.last_rescale, (width, height)) {
                    self.rebuild_display(width, height);
                } else {
                    self.viewport.win_w = width;
                    self.viewport.win_h = height;
                    self.viewport
                        .clamp_to(self.display.width(), self.display.height());
                }
                win.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                if self.mode == Mode::Tiled {
                    let moved = self.pan.on_pointer_move(
                        position.x,
                        position.y,
                        &mut self.viewport,
                        self.display.width(),
                        self.display.height(),
                    );
                    if moved {
                        win.request_redraw();
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } if self.mode == Mode::Tiled => match state {
                ElementState::Pressed => self.pan.on_pointer_down(self.cursor.0, self.cursor.1),
                ElementState::Released => self.pan.on_pointer_up(),
            },
            WindowEvent::RedrawRequested => self.draw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }
        if self.signals.stop.is_set() {
            event_loop.exit();
            return;
        }
        let now = Instant::now();

        match self.mode {
            Mode::Scroll => {
                // Bottom check against the current display buffer, in the
                // same tick as any rescale.
                let at_bottom = self.viewport.y + self.viewport.win_h >= self.display.height();
                let tick = self
                    .transport
                    .tick(now, self.signals.pause.is_set(), at_bottom);
                match tick {
                    Tick::Advance { px, .. } => {
                        self.viewport.y = self.viewport.y.saturating_add(px);
                        self.viewport
                            .clamp_to(self.display.width(), self.display.height());
                    }
                    Tick::Restart { .. } => {
                        debug!("scroll pass complete, restarting from the top");
                        self.viewport.y = 0;
                    }
                    Tick::Hold { .. } => {}
                }
                event_loop.set_control_flow(ControlFlow::WaitUntil(tick.next_wake()));
            }
            Mode::Tiled => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(now + TILED_POLL));
            }
        }

        if let Some(win) = &self.window {
            win.request_redraw();
        }
    }
}
