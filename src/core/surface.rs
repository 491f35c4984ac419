//=========================================================================
// Render Surface
//=========================================================================
//
// Boundary between the scene controller and whatever draws the scene.
//
// The controller produces one Frame per tick; a RenderSurface consumes it.
// Meshes, materials, lighting and overlay markup live entirely on the
// surface side.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;
use log::{info, trace};

//=== Internal Dependencies ===============================================

use super::camera::CameraPose;
use super::content::Section;
use super::scene::focus::FocusState;
use super::visuals::{SceneVisuals, VesselPose};

//=== FrameTime ===========================================================

/// Clock input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Monotonic time since the controller started.
    pub elapsed: Duration,

    /// Seconds since the previous tick.
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: Duration, delta: f32) -> Self {
        Self { elapsed, delta }
    }
}

//=== OverlayState ========================================================

/// UI overlay flags published each frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    pub can_advance: bool,
    pub can_retreat: bool,
    pub show_return_control: bool,
    pub return_label: Option<&'static str>,

    /// Experience key whose detail overlay is open.
    pub selected_detail: Option<String>,

    /// Section at the current waypoint while inside the planet.
    pub current_section: Option<Section>,

    /// Pointer is over the planet (hover cursor).
    pub primary_hovered: bool,
}

//=== Frame ===============================================================

/// Everything the renderer needs to draw one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: FrameTime,
    pub focus: FocusState,
    pub camera: CameraPose,
    pub fov: f32,
    pub orbit_position: Vec3,
    pub visuals: SceneVisuals,

    /// Present only while inside the planet.
    pub vessel: Option<VesselPose>,

    pub overlay: OverlayState,
}

//=== RenderSurface =======================================================

/// Consumer of computed frames.
pub trait RenderSurface: Send {
    /// Called once per tick with the frame to draw.
    fn present(&mut self, frame: &Frame);
}

//=== LogSurface ==========================================================

/// Surface that logs frames instead of drawing them.
///
/// Logs every frame at trace level and mode changes at info level.
#[derive(Debug, Default)]
pub struct LogSurface {
    last_focus: Option<FocusState>,
    last_section: Option<Section>,
    frames: u64,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSurface for LogSurface {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;

        let mode_changed = self.last_focus.map_or(true, |last| {
            std::mem::discriminant(&last) != std::mem::discriminant(&frame.focus)
        });
        if mode_changed {
            info!(target: "scene", "Mode: {:?}", frame.focus);
            self.last_focus = Some(frame.focus);
        }

        if frame.overlay.current_section != self.last_section {
            if let Some(section) = &frame.overlay.current_section {
                info!(target: "scene", "Section: {}", section);
            }
            self.last_section = frame.overlay.current_section.clone();
        }

        trace!(
            target: "scene",
            "Frame {} camera {:?} → {:?}",
            self.frames,
            frame.camera.position,
            frame.camera.look_at
        );
    }
}
