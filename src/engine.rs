//=========================================================================
// Portfolio Runtime
//=========================================================================
//
// Entry point that wires the platform, the core thread and a render
// surface together.
//
// Architecture:
// ```text
//     PortfolioBuilder  ──build()──>  Portfolio  ──run(surface)──>  [Runtime]
//         │                              │
//         ├─ with_tps()                  ├─ spawns core thread
//         ├─ with_channel_capacity()     ├─ runs platform (main thread)
//         ├─ with_config()               └─ joins on exit
//         └─ with_bindings()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::PortfolioConfig;
use crate::core::input::{InputBindings, InputSystem};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::scene::SceneController;
use crate::core::surface::RenderSurface;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

//=== PortfolioBuilder ====================================================

/// Builder for configuring and constructing a [`Portfolio`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (controller ticks per second)
/// - **Channel capacity**: 128 events
/// - **Config**: [`PortfolioConfig::default`]
/// - **Bindings**: [`InputBindings::default`]
///
/// # Examples
///
/// ```no_run
/// use celestial_portfolio::{LogSurface, PortfolioBuilder};
///
/// PortfolioBuilder::new()
///     .with_tps(120.0)
///     .build()
///     .run(LogSurface::new())
///     .ok();
/// ```
pub struct PortfolioBuilder {
    tps: f64,
    channel_capacity: usize,
    config: PortfolioConfig,
    bindings: InputBindings,
}

impl PortfolioBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: PortfolioConfig::default(),
            bindings: InputBindings::default(),
        }
    }

    /// Sets the target ticks per second for the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_config(mut self, config: PortfolioConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_bindings(mut self, bindings: InputBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Builds the runtime.
    ///
    /// A malformed waypoint path is logged and replaced by the static
    /// scene without an interior.
    pub fn build(self) -> Portfolio {
        info!(
            "Building portfolio (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        Portfolio {
            controller: SceneController::with_fallback(&self.config),
            input: InputSystem::new(self.bindings),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for PortfolioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Portfolio ===========================================================

/// Portfolio runtime.
///
/// ```text
/// Portfolio (Main Thread)
///   ├─► CoreSystemsOrchestrator (Core Thread @ TPS)
///   │     └─► SceneController → RenderSurface
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Portfolio {
    controller: SceneController,
    input: InputSystem,
    tps: f64,
    channel_capacity: usize,
}

impl Portfolio {
    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    /// Runs until the window closes, presenting every tick to `surface`.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel
    /// 2. Spawns the core thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: core thread exits and is joined
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop could not be created or
    /// failed while running. The core thread is joined either way.
    pub fn run<R: RenderSurface + 'static>(self, surface: R) -> Result<(), PlatformError> {
        info!("Starting portfolio runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core thread -------------------------------------
        let orchestrator = CoreSystemsOrchestrator::new(self.controller, self.input, surface);
        let core_handle = orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let result = Platform::new(tx).run();
        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the core thread --------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Portfolio shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::scene::SceneAction;

    #[test]
    fn builder_defaults() {
        let builder = PortfolioBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.config, PortfolioConfig::default());
    }

    #[test]
    fn builder_with_tps() {
        let builder = PortfolioBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        PortfolioBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        PortfolioBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = PortfolioBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        PortfolioBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let portfolio = PortfolioBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build();

        assert_eq!(portfolio.tps, 120.0);
        assert_eq!(portfolio.channel_capacity, 256);
    }

    #[test]
    fn build_uses_config_path() {
        let mut config = PortfolioConfig::default();
        config.navigation.waypoints.truncate(3);
        let portfolio = PortfolioBuilder::new().with_config(config).build();
        assert_eq!(portfolio.controller().path().len(), 3);
    }

    #[test]
    fn build_falls_back_on_malformed_path() {
        let mut config = PortfolioConfig::default();
        config.navigation.waypoints.truncate(1);
        let portfolio = PortfolioBuilder::new().with_config(config).build();
        assert!(!portfolio.controller().path().is_ready());
        assert!(!portfolio.controller().focus().interior_enabled());
    }

    #[test]
    fn build_keeps_custom_bindings() {
        let mut bindings = InputBindings::empty();
        bindings.bind_key(KeyCode::Tab, SceneAction::Advance);
        let portfolio = PortfolioBuilder::new().with_bindings(bindings).build();
        assert_eq!(portfolio.input.bindings().len(), 1);
    }
}
