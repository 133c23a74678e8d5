//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the game host.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌─────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                       │
//  │   ↓                                                     │
//  │  InputProcessor ── converts keys, tracks modifiers      │
//  │   ↓                                                     │
//  │  InputBuffer ───── Vec<InputEvent>, deduped             │
//  │   ↓                                                     │
//  │  RedrawRequested                                        │
//  │   ├─ flush ──► bounded channel ──► GameHost::run_frame  │
//  │   └─ request next redraw                   ↓            │
//  │                                     PixelsPresenter     │
//  └─────────────────────────────────────────────────────────┘
// ```
//
// Frame Boundary: RedrawRequested
//   → All buffered input sent as one batch before the host runs
//   → Empty buffers NOT sent
//
// The platform and the host share one thread, so every send is a
// `try_send`: a full channel drops the message with a warning instead
// of blocking the only thread that could drain it.
//
// Responsibilities:
// - Create and manage the OS window and its pixel surface
// - Convert Winit key events → engine InputEvents
// - Forward resize, focus loss and close requests to the host
// - Drive one host frame per redraw and stop the loop on exit or error
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod surface;

//=== External Crates =====================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::EngineConfig;
use crate::core::geometry::Size;
use crate::core::platform_bridge::{PlatformEvent, TickControl};
use crate::core::state::GameState;
use crate::engine::{GameHost, HostServices};
use crate::error::EngineError;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use surface::PixelsPresenter;

//=== PlatformError =======================================================

/// Window, surface and event loop failures.
///
/// All of these are fatal for the run.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("pixel surface creation failed: {0}")]
    Surface(#[from] pixels::Error),

    #[error("pixel surface resize failed: {0}")]
    SurfaceResize(#[source] pixels::TextureError),
}

impl From<PlatformError> for EngineError {
    fn from(err: PlatformError) -> Self {
        EngineError::Platform(err.to_string())
    }
}

//=== Launch ==============================================================

/// Everything the host needs, held until the window exists.
struct Launch {
    config: EngineConfig,
    services: HostServices,
    initial: Box<dyn GameState>,
    events: Receiver<PlatformEvent>,
}

//=== Platform ============================================================

/// Window owner and frame driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` stores config, services and
///    the initial state
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Resume**: the window, surface and host are created and the
///    initial state is switched in
/// 4. **Shutdown**: quit, window close or a fatal error stops the loop;
///    the active state is unloaded before `run()` returns
///
/// This type is NOT Send/Sync and must stay on the main thread.
pub(crate) struct Platform {
    /// Consumed on the first `resumed()`.
    launch: Option<Launch>,

    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    host: Option<GameHost<PixelsPresenter>>,

    /// Buffers key events until the frame boundary.
    buffer: InputBuffer,

    /// Platform side of the host's event channel.
    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,

    /// Latest window size the host has not been told about yet.
    pending_resize: Option<Size>,

    last_frame: Option<Instant>,

    /// First fatal error, returned from `run()`.
    failure: Option<EngineError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance. The window is created lazily in
    /// `resumed()`.
    pub(crate) fn new(
        config: EngineConfig,
        services: HostServices,
        initial: Box<dyn GameState>,
        event_sender: Sender<PlatformEvent>,
        events: Receiver<PlatformEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            launch: Some(Launch {
                config,
                services,
                initial,
                events,
            }),
            window: None,
            host: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            pending_resize: None,
            last_frame: None,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the game quits or the window closes.
    ///
    /// # Errors
    ///
    /// Event loop and window failures, plus the first error raised by the
    /// host while switching, updating or presenting.
    pub(crate) fn run(mut self) -> Result<(), EngineError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        self.stop_host();

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Startup ----------------------------------------------------------

    fn start(&mut self, event_loop: &ActiveEventLoop, launch: Launch) -> Result<(), EngineError> {
        let Launch {
            config,
            services,
            initial,
            events,
        } = launch;

        let design = config.design_size();
        let attrs = WindowAttributes::default()
            .with_title(config.window.title.clone())
            .with_inner_size(LogicalSize::new(design.width, design.height))
            .with_resizable(config.window.resizable);

        let window = Arc::new(event_loop.create_window(attrs).map_err(PlatformError::from)?);
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        let presenter = PixelsPresenter::new(Arc::clone(&window))?;
        let mut host = GameHost::new(config, services, presenter, events);
        host.switch_state(initial)?;

        window.request_redraw();
        self.window = Some(window);
        self.host = Some(host);
        Ok(())
    }

    //--- Frame ------------------------------------------------------------

    /// Flushes input and runs one host frame.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_resize();
        self.flush_input_buffer();

        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_frame = Some(now);

        let Some(host) = self.host.as_mut() else {
            return;
        };

        match host.run_frame(dt) {
            Ok(TickControl::Continue) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Ok(TickControl::Exit) => {
                info!(target: "platform", "Host requested exit");
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        error!(target: "platform", "Fatal: {}", err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.stop_host();
        event_loop.exit();
    }

    fn stop_host(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.shutdown();
        }
    }

    //--- Channel ----------------------------------------------------------

    /// Sends buffered input as one batch. Empty buffers are not sent.
    fn flush_input_buffer(&mut self) {
        if let Some(events) = self.buffer.drain() {
            trace!(target: "platform::input", "Flushing {} key events", events.len());
            self.forward(PlatformEvent::Inputs(events));
        }
    }

    /// Records `size` as the latest window size and tries to send it.
    fn queue_resize(&mut self, size: Size) {
        self.pending_resize = Some(size);
        self.flush_resize();
    }

    /// Sends the pending size. A size the channel refused stays pending
    /// and is retried on the next redraw.
    fn flush_resize(&mut self) {
        let Some(size) = self.pending_resize.take() else {
            return;
        };

        if !self.forward(PlatformEvent::Resized(size)) {
            self.pending_resize = Some(size);
        }
    }

    /// Non-blocking send; returns whether the host will see `event`.
    fn forward(&self, event: PlatformEvent) -> bool {
        match self.event_sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(target: "platform", "Event channel full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                warn!(target: "platform", "Event channel disconnected, dropping {:?}", event);
                false
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(launch) = self.launch.take() else {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        };

        if let Err(err) = self.start(event_loop, launch) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                // The host exits at the start of its next frame.
                if self.forward(PlatformEvent::WindowClosed) {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                } else {
                    self.stop_host();
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.queue_resize(Size::new(size.width, size.height));
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform", "Focus lost");
                self.input_processor.reset_modifiers();
                self.flush_input_buffer();
                self.forward(PlatformEvent::FocusLost);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Event loop exiting");
        self.stop_host();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
