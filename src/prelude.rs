//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use celestial_portfolio::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Portfolio, PortfolioBuilder};

// Configuration
pub use crate::config::{ConfigError, PortfolioConfig};

// Scene
pub use crate::core::scene::{FocusState, SceneAction, SceneController};

// Path and content
pub use crate::core::content::{Section, SectionPayload};
pub use crate::core::path::{PathError, PathModel, Waypoint};

// Rendering boundary
pub use crate::core::camera::CameraPose;
pub use crate::core::surface::{Frame, FrameTime, LogSurface, OverlayState, RenderSurface};

// Input
pub use crate::core::input::{InputBindings, KeyCode, Modifiers, MouseButton};
