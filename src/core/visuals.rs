//=========================================================================
// Scene Visuals
//=========================================================================
//
// Per-frame animation state the renderer draws but the controller owns:
// the orbiting planet, star fade, hub label, enter-animation shrink and
// the vessel that carries the viewer along the interior path.
//
// All values are derived from the focus mode and frame delta; none of
// them feed back into navigation or focus decisions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::camera::{ease_in_out_cubic, lerp_f32};
use super::path::PathModel;
use super::scene::navigation::NavigationController;
use crate::config::OrbitConfig;

//=== Constants ===========================================================

/// Resting height of the hub label above the planet.
pub const LABEL_BASE_HEIGHT: f32 = 1.2;

/// Total label rise over the enter animation.
const LABEL_RISE: f32 = 3.0;
const BOB_AMPLITUDE: f32 = 0.1;
const BOB_FREQUENCY: f32 = 2.0;
const ROLL_AMPLITUDE: f32 = 0.05;
const ROLL_FREQUENCY: f32 = 1.5;

//=== OrbitTracker ========================================================

/// Planet position on its circular orbit around the star.
#[derive(Debug, Clone)]
pub struct OrbitTracker {
    angle: f32,
    radius: f32,
    angular_speed: f32,
    hold_frames: u8,
}

impl OrbitTracker {
    pub fn new(config: &OrbitConfig) -> Self {
        Self {
            angle: 0.0,
            radius: config.radius,
            angular_speed: config.angular_speed,
            hold_frames: 0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(self.radius * cos, 0.0, self.radius * sin)
    }

    /// Keeps the planet where it is for the next update.
    pub fn hold_one_frame(&mut self) {
        self.hold_frames = 1;
    }

    /// Advances the orbit by `delta_secs` when `moving`.
    pub fn update(&mut self, delta_secs: f32, moving: bool) -> Vec3 {
        if self.hold_frames > 0 {
            self.hold_frames -= 1;
        } else if moving && delta_secs.is_finite() {
            self.angle = (self.angle + self.angular_speed * delta_secs) % std::f32::consts::TAU;
        }
        self.position()
    }
}

//=== VisualInput =========================================================

/// Focus facts the visuals react to this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualInput {
    pub free_roam: bool,
    pub focused: bool,

    /// Elapsed fraction of the enter animation, `None` when not entering.
    pub enter_progress: Option<f32>,
    pub interior: bool,
    pub in_cooldown: bool,
    pub delta_secs: f32,
}

//=== SceneVisuals ========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SceneVisuals {
    pub star_opacity: f32,
    pub planet_scale: f32,
    pub planet_rotation: f32,
    pub cloud_rotation: f32,
    pub label_opacity: f32,
    pub label_height: f32,
    pub label_visible: bool,
}

impl Default for SceneVisuals {
    fn default() -> Self {
        Self {
            star_opacity: 1.0,
            planet_scale: 1.0,
            planet_rotation: 0.0,
            cloud_rotation: 0.0,
            label_opacity: 1.0,
            label_height: LABEL_BASE_HEIGHT,
            label_visible: false,
        }
    }
}

impl SceneVisuals {
    /// Snaps the planet back to full size after leaving the interior.
    pub fn reset_after_return(&mut self) {
        self.planet_scale = 1.0;
        self.label_opacity = 1.0;
        self.label_height = LABEL_BASE_HEIGHT;
    }

    pub fn update(&mut self, input: VisualInput, config: &OrbitConfig) {
        let delta = if input.delta_secs.is_finite() {
            input.delta_secs.max(0.0)
        } else {
            0.0
        };

        //--- Star --------------------------------------------------------
        let star_target = if input.free_roam { 1.0 } else { 0.0 };
        self.star_opacity += (star_target - self.star_opacity) * config.star_fade;

        let entering = input.enter_progress.is_some();

        //--- Planet ------------------------------------------------------
        if entering {
            self.planet_scale = lerp_f32(self.planet_scale, config.shrink_scale, config.scale_lerp);
            self.planet_rotation += delta * 2.0;
            self.cloud_rotation += delta * 1.5;
        } else if !input.interior {
            self.planet_scale = 1.0;
            self.planet_rotation += delta * config.planet_spin;
            self.cloud_rotation += delta * config.cloud_spin;
        }

        //--- Hub label ---------------------------------------------------
        match input.enter_progress {
            Some(progress) => {
                self.label_opacity = (self.label_opacity - delta * config.label_fade_rate).max(0.0);
                self.label_height = LABEL_BASE_HEIGHT + progress.clamp(0.0, 1.0) * LABEL_RISE;
            }
            None => {
                self.label_opacity = 1.0;
                self.label_height = LABEL_BASE_HEIGHT;
            }
        }

        // The click that starts the animation hides the label; opacity only
        // drives the fade-out drawn behind it.
        self.label_visible = input.focused && !entering && !input.in_cooldown;
    }
}

//=== VesselPose ==========================================================

/// The boat carrying the viewer through the interior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselPose {
    pub position: Vec3,

    /// Yaw in radians, from the path tangent.
    pub heading: f32,

    pub roll: f32,
}

impl Default for VesselPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: 0.0,
            roll: 0.0,
        }
    }
}

impl VesselPose {
    /// Moves the vessel one frame along the path.
    ///
    /// Eased between waypoints while a transition is in flight, otherwise
    /// chasing the current waypoint at `rate · delta`. `elapsed_secs`
    /// drives the bobbing.
    pub fn update(
        &mut self,
        path: &PathModel,
        navigation: &NavigationController,
        now: Duration,
        delta_secs: f32,
        rate: f32,
    ) {
        if !path.is_ready() {
            return;
        }

        let t = match navigation.progress(now) {
            Some(progress) => lerp_f32(
                path.param_for_index(progress.from),
                path.param_for_index(progress.to),
                ease_in_out_cubic(progress.progress),
            ),
            None => path.param_for_index(navigation.current_index()),
        };

        let target = path.sample_position(t);
        let base = match navigation.progress(now) {
            Some(_) => target,
            None => {
                let factor = (delta_secs.max(0.0) * rate).min(1.0);
                let current = Vec3::new(self.position.x, target.y, self.position.z);
                current.lerp(target, factor)
            }
        };

        let elapsed = now.as_secs_f32();
        let tangent = path.sample_tangent(t);

        self.position = Vec3::new(
            base.x,
            target.y + (elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE,
            base.z,
        );
        self.heading = tangent.x.atan2(tangent.z);
        self.roll = (elapsed * ROLL_FREQUENCY).sin() * ROLL_AMPLITUDE;
    }
}

//=== Tests ===============================================================
