//=========================================================================
// Celestial Portfolio — Library Root
//
// Scene navigation and transition controller for an interactive
// star/planet portfolio.
//
// Responsibilities:
// - Expose the scene controller and its parts (`core`)
// - Expose configuration (`config`)
// - Provide the windowed runtime facade (`PortfolioBuilder`)
// - Keep winit integration (`platform`) private
//
// Typical usage:
// ```no_run
// use celestial_portfolio::{LogSurface, PortfolioBuilder};
//
// fn main() {
//     PortfolioBuilder::new().build().run(LogSurface::new()).ok();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene controller, path model, camera rig and input
// mapping. It can be driven headless without the runtime.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::config::{ConfigError, PortfolioConfig};
pub use crate::core::platform_bridge::PlatformError;
pub use crate::core::surface::{LogSurface, RenderSurface};
pub use engine::{Portfolio, PortfolioBuilder};
