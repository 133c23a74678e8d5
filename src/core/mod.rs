//=========================================================================
// Core Systems
//
// Everything a game state is built from, independent of the window.
//
// Responsibilities:
// - Keyboard input, snapshots and per-state command mapping
// - Game states, their shared core and signal channel
// - Game objects, assets, sound and the software render target
// - The platform → host event contract
//
// Notes:
// Nothing in here touches winit or the GPU surface; the host can run
// all of it headless against a `HeadlessPresenter`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod event;
pub mod geometry;
pub mod input;
pub mod object;
pub mod platform_bridge;
pub mod render;
pub mod sound;
pub mod state;
pub mod time;
