//=========================================================================
// Keyboard Commander: Library Root
//
// A fixed-resolution 2D game-state framework.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`) and the host
// - Keep the winit/pixels integration (`platform`) hidden from users
// - Re-export the game-facing building blocks through `prelude`
//
// Typical usage:
// ```no_run
// use keyboard_commander::prelude::*;
// # fn title_screen() -> Box<dyn GameState> { unimplemented!() }
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new(800, 600).build()?.run(title_screen())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds game states, objects, input, assets and rendering. It is
// public so games can reach every type, though most code only needs the
// prelude.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window, the pixels surface and the event
// loop, and is not part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{
    compute_scale_region, AssetLoaderFactory, AudioOutputFactory, Engine, EngineBuilder,
    GameHost, HostServices,
};
