//=========================================================================
// Game Host
//=========================================================================
//
// Owns the single active game state and drives the frame loop.
//
// Frame order (`run_frame`):
// ```text
//   1. collect platform events      (window closed → shutdown, Exit)
//   2. apply pending resize         (recompute scale region)
//   3. handle_input(snapshot)
//   4. update_game_state + soundtrack
//   5. clear target, render objects
//   6. present into scale region    (skipped when region is empty)
//   7. drain state signals          (events, switch requests)
//   8. quit requested → shutdown, Exit
//   9. apply queued switch
// ```
//
// State switching:
//   unsubscribe old → unload_content → release core
//   → initialize new → set_input_mapper → load_content → subscribe
//
// A switch requested mid-frame is queued and applied after the frame has
// been presented. If a state asks more than once in one frame, the last
// request wins.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::scaling::compute_scale_region;
use super::HostServices;
use crate::config::EngineConfig;
use crate::core::geometry::{Rect, Size};
use crate::core::input::KeyboardState;
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};
use crate::core::render::{Canvas, Presenter, Renderer};
use crate::core::state::{self, GameState, Lifecycle, StateSignal};
use crate::core::time::FrameClock;
use crate::error::{EngineError, LifecyclePhase};

//=== ActiveState =========================================================

struct ActiveState {
    state: Box<dyn GameState>,
    signals: Receiver<StateSignal>,
}

//=== GameHost ============================================================

/// Single-threaded host for one active [`GameState`] at a time.
///
/// Built through [`EngineBuilder::build_host`](super::EngineBuilder::build_host)
/// for headless use, or internally by [`Engine::run`](super::Engine::run).
pub struct GameHost<P: Presenter> {
    config: EngineConfig,
    services: HostServices,
    presenter: P,

    //--- Render Pipeline --------------------------------------------------
    target: Canvas,
    design_aspect: f64,
    window_size: Size,
    scale_region: Rect,

    //--- Input ------------------------------------------------------------
    events: EventCollector,
    keyboard: KeyboardState,
    clock: FrameClock,

    //--- State Management -------------------------------------------------
    active: Option<ActiveState>,
    pending: Option<Box<dyn GameState>>,
    quit_requested: bool,
    shut_down: bool,
}

impl<P: Presenter> GameHost<P> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: EngineConfig,
        services: HostServices,
        presenter: P,
        platform_events: Receiver<PlatformEvent>,
    ) -> Self {
        let design = config.design_size();
        let design_aspect = design.aspect_ratio().unwrap_or(1.0);
        let window_size = presenter.surface_size();
        let scale_region = compute_scale_region(window_size, design_aspect);

        info!(
            target: "host",
            "Host ready: design {}x{}, window {}x{}, region {:?}",
            design.width,
            design.height,
            window_size.width,
            window_size.height,
            scale_region
        );

        Self {
            events: EventCollector::new(platform_events, config.input.max_events_per_frame),
            target: Canvas::new(design),
            config,
            services,
            presenter,
            design_aspect,
            window_size,
            scale_region,
            keyboard: KeyboardState::new(),
            clock: FrameClock::new(),
            active: None,
            pending: None,
            quit_requested: false,
            shut_down: false,
        }
    }

    //--- State Switching --------------------------------------------------

    /// Replaces the active state with `next`.
    ///
    /// Rejected with [`EngineError::InvalidTransition`] (leaving the active
    /// state untouched) when `next` has the same concrete type as the
    /// active state or has already been initialized. A `load_content`
    /// failure unloads `next` and leaves the host without an active state.
    pub fn switch_state(&mut self, next: Box<dyn GameState>) -> Result<(), EngineError> {
        if self.shut_down {
            return Err(EngineError::InvalidTransition(format!(
                "host is shut down, cannot switch to `{}`",
                next.kind()
            )));
        }

        if let Some(active) = &self.active {
            if state::state_type(&*active.state) == state::state_type(&*next) {
                return Err(EngineError::InvalidTransition(format!(
                    "`{}` is already the active state",
                    next.kind()
                )));
            }
        }

        if next.core().lifecycle() != Lifecycle::Created {
            return Err(EngineError::InvalidTransition(format!(
                "`{}` has already been initialized",
                next.kind()
            )));
        }

        self.release_active();
        self.activate(next)
    }

    fn activate(&mut self, mut next: Box<dyn GameState>) -> Result<(), EngineError> {
        let kind = next.kind();
        info!(target: "host", "Entering state `{}`", kind);

        let assets = (self.services.asset_loader)();
        let audio = (self.services.audio_output)();
        next.core_mut()
            .initialize(self.config.design_size(), assets, audio)?;
        next.core_mut().set_debug(self.config.render.debug_overlay);
        next.set_input_mapper();

        if let Err(err) = next.load_content() {
            error!(target: "host", "State `{}` failed to load: {}", kind, err);
            state::teardown(&mut *next);
            return Err(in_phase(kind, LifecyclePhase::LoadContent, err));
        }
        next.core_mut().mark_loaded();

        let signals = next.core_mut().signals_mut().subscribe();
        self.active = Some(ActiveState { state: next, signals });
        Ok(())
    }

    /// Unsubscribes and unloads the active state, if any.
    fn release_active(&mut self) {
        if let Some(ActiveState { mut state, signals }) = self.active.take() {
            drop(signals);
            info!(target: "host", "Leaving state `{}`", state.kind());
            state::teardown(&mut *state);
        }
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one frame. `dt` is the time since the previous frame.
    ///
    /// Any error shuts the host down (unloading the active state) before
    /// it is returned.
    pub fn run_frame(&mut self, dt: Duration) -> Result<TickControl, EngineError> {
        if self.shut_down {
            return Ok(TickControl::Exit);
        }

        match self.step(dt) {
            Ok(TickControl::Exit) => {
                self.shutdown();
                Ok(TickControl::Exit)
            }
            Ok(TickControl::Continue) => Ok(TickControl::Continue),
            Err(err) => {
                error!(target: "host", "Frame failed: {}", err);
                self.shutdown();
                Err(err)
            }
        }
    }

    fn step(&mut self, dt: Duration) -> Result<TickControl, EngineError> {
        //--- 1. Platform events -------------------------------------------
        if self.events.collect_frame(&mut self.keyboard) == TickControl::Exit {
            info!(target: "host", "Window closed");
            return Ok(TickControl::Exit);
        }

        //--- 2. Resize ----------------------------------------------------
        if let Some(size) = self.events.take_resize() {
            self.resize(size)?;
        }

        let active = self.active.as_mut().ok_or(EngineError::NoActiveState)?;
        let time = self.clock.advance(dt);

        //--- 3. Input -----------------------------------------------------
        let snapshot = self.keyboard.snapshot();
        active.state.handle_input(&snapshot, time);

        //--- 4. Update ----------------------------------------------------
        let kind = active.state.kind();
        state::update(&mut *active.state, time).map_err(|err| in_phase(kind, LifecyclePhase::Update, err))?;

        //--- 5. Render ----------------------------------------------------
        self.target.clear(self.config.render.clear_color);
        active.state.core().render(&mut self.target);

        //--- 6. Present ---------------------------------------------------
        self.present()?;
        self.keyboard.end_frame();

        //--- 7. Signals ---------------------------------------------------
        self.drain_signals();

        //--- 8. Quit ------------------------------------------------------
        if self.quit_requested {
            info!(target: "host", "Quit requested by `{}`", kind);
            return Ok(TickControl::Exit);
        }

        //--- 9. Queued switch ---------------------------------------------
        if let Some(next) = self.pending.take() {
            match self.switch_state(next) {
                Ok(()) => {}
                Err(EngineError::InvalidTransition(reason)) => {
                    warn!(target: "host", "Switch rejected: {}", reason);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(TickControl::Continue)
    }

    fn present(&mut self) -> Result<(), EngineError> {
        if self.scale_region.is_empty() {
            debug!(
                target: "host",
                "Skipping present: window {}x{} has no drawable area",
                self.window_size.width,
                self.window_size.height
            );
            return Ok(());
        }

        self.presenter.present(&self.target, self.scale_region)
    }

    fn drain_signals(&mut self) {
        let Some(active) = &self.active else {
            return;
        };

        for signal in active.signals.try_iter() {
            match signal {
                StateSignal::Event(event) => {
                    if event.is_quit() {
                        self.quit_requested = true;
                    }
                }
                StateSignal::SwitchState(next) => {
                    if let Some(dropped) = self.pending.replace(next) {
                        warn!(
                            target: "host",
                            "Switch to `{}` superseded by a later request this frame",
                            dropped.kind()
                        );
                    }
                }
            }
        }
    }

    //--- Window -----------------------------------------------------------

    /// Applies a new window size and recomputes the scale region.
    pub fn resize(&mut self, size: Size) -> Result<(), EngineError> {
        self.window_size = size;
        self.presenter.resize(size)?;
        self.scale_region = compute_scale_region(size, self.design_aspect);

        debug!(
            target: "host",
            "Resized to {}x{}, scale region {:?}",
            size.width,
            size.height,
            self.scale_region
        );
        Ok(())
    }

    //--- Shutdown ---------------------------------------------------------

    /// Unloads the active state and drops any queued switch. Idempotent.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }

        self.release_active();
        self.pending = None;
        self.shut_down = true;
        info!(target: "host", "Host shut down");
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scale_region(&self) -> Rect {
        self.scale_region
    }

    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// Frame rendered by the last `run_frame`, at design resolution.
    pub fn frame(&self) -> &Canvas {
        &self.target
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn active_kind(&self) -> Option<&'static str> {
        self.active.as_ref().map(|active| active.state.kind())
    }

    /// Typed view of the active state.
    pub fn active_state<T: GameState>(&self) -> Option<&T> {
        self.active
            .as_ref()
            .and_then(|active| state::downcast_state::<T>(&*active.state))
    }
}

impl<P: Presenter> Drop for GameHost<P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Tags a state failure with the lifecycle step it happened in.
fn in_phase(kind: &'static str, phase: LifecyclePhase, err: EngineError) -> EngineError {
    match err {
        EngineError::State { .. } => err,
        other => EngineError::state(kind, phase, other),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
