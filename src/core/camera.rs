//=========================================================================
// Camera Rig
//=========================================================================
//
// Computes the camera pose each frame from the focus mode and, inside
// the planet, from the navigation state and the path.
//
// Flow:
//   RigMode ──► target pose ──► smoothing (lerp by factor) ──► pose
//
// The rig never jumps to a target. Every mode change is absorbed by the
// per-frame smoothing toward the new target.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::path::PathModel;
use super::scene::navigation::NavigationController;
use crate::config::{CameraConfig, NavigationConfig};

//=== Easing ==============================================================

/// Cubic ease-in-out on [0, 1]; input is clamped.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

//=== CameraPose ==========================================================

/// Camera position and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn lerp(&self, target: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(target.position, t),
            look_at: self.look_at.lerp(target.look_at, t),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }
}

//=== RigMode =============================================================

/// What the rig is following this frame.
#[derive(Debug, Clone, Copy)]
pub enum RigMode<'a> {
    FreeRoam,
    Focused {
        orbit_position: Vec3,
    },
    Interior {
        path: &'a PathModel,
        navigation: &'a NavigationController,
        now: Duration,
    },
}

//=== CameraRig ===========================================================

#[derive(Debug, Clone)]
pub struct CameraRig {
    pose: CameraPose,
    camera: CameraConfig,
    navigation: NavigationConfig,
}

impl CameraRig {
    /// Creates a rig resting at the free roam pose.
    pub fn new(camera: &CameraConfig, navigation: &NavigationConfig) -> Self {
        Self {
            pose: CameraPose::new(camera.default_position, camera.default_look_at),
            camera: camera.clone(),
            navigation: navigation.clone(),
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn fov(&self) -> f32 {
        self.camera.fov
    }

    //--- Targets ----------------------------------------------------------

    pub fn free_roam_target(&self) -> CameraPose {
        CameraPose::new(self.camera.default_position, self.camera.default_look_at)
    }

    /// Viewer-side close-up of the planet at `orbit_position`.
    pub fn focused_target(&self, orbit_position: Vec3) -> CameraPose {
        let position = Vec3::new(
            orbit_position.x,
            self.camera.focus_height,
            orbit_position.z + self.camera.focus_distance,
        );
        let look_at = Vec3::new(orbit_position.x, 0.0, orbit_position.z);
        CameraPose::new(position, look_at)
    }

    /// Pose used inside the planet when no path exists.
    pub fn static_target(&self) -> CameraPose {
        CameraPose::new(
            self.navigation.static_position,
            self.navigation.static_look_at,
        )
    }

    /// Parked pose at waypoint `index`.
    pub fn waypoint_pose(&self, path: &PathModel, index: usize) -> CameraPose {
        if !path.is_ready() {
            return self.static_target();
        }

        let rotation = path.waypoint(index).map_or(0.0, |w| w.rotation_hint);
        self.pose_on_path(path.sample_position(path.param_for_index(index)), rotation)
    }

    /// Interior target: parked at the current waypoint, or an eased blend
    /// along the path while a transition is in flight.
    pub fn interior_target(
        &self,
        path: &PathModel,
        navigation: &NavigationController,
        now: Duration,
    ) -> CameraPose {
        if !path.is_ready() {
            return self.static_target();
        }

        let Some(progress) = navigation.progress(now) else {
            return self.waypoint_pose(path, navigation.current_index());
        };

        let eased = ease_in_out_cubic(progress.progress);
        let t = lerp_f32(
            path.param_for_index(progress.from),
            path.param_for_index(progress.to),
            eased,
        );
        let rotation = lerp_f32(
            path.waypoint(progress.from).map_or(0.0, |w| w.rotation_hint),
            path.waypoint(progress.to).map_or(0.0, |w| w.rotation_hint),
            eased,
        );

        self.pose_on_path(path.sample_position(t), rotation)
    }

    fn pose_on_path(&self, anchor: Vec3, rotation: f32) -> CameraPose {
        let (sin, cos) = rotation.sin_cos();
        let nav = &self.navigation;

        let offset = Vec3::new(
            -sin * nav.camera_distance,
            nav.camera_height,
            -cos * nav.camera_distance,
        );
        let ahead = Vec3::new(sin * nav.look_ahead, nav.camera_tilt, cos * nav.look_ahead);

        CameraPose::new(anchor + offset, anchor + ahead)
    }

    //--- Update -----------------------------------------------------------

    /// Moves the camera one frame toward the target for `mode`.
    pub fn update(&mut self, mode: RigMode<'_>, delta_secs: f32) -> CameraPose {
        let (target, factor) = match mode {
            RigMode::FreeRoam => (self.free_roam_target(), self.camera.lerp_factor),
            RigMode::Focused { orbit_position } => (
                self.focused_target(orbit_position),
                self.camera.focused_lerp_factor,
            ),
            RigMode::Interior {
                path,
                navigation,
                now,
            } => {
                let boost = if navigation.is_transitioning() {
                    self.navigation.transition_boost
                } else {
                    1.0
                };
                (
                    self.interior_target(path, navigation, now),
                    delta_secs.max(0.0) * self.navigation.interior_rate * boost,
                )
            }
        };

        if target.is_finite() {
            self.pose = self.pose.lerp(&target, factor.clamp(0.0, 1.0));
        }
        self.pose
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::{PathModel, WaypointConfig};

    const EPS: f32 = 1e-3;

    fn default_rig() -> (CameraRig, PathModel) {
        let nav = NavigationConfig::default();
        let path = PathModel::from_config(&nav.waypoints).unwrap();
        (CameraRig::new(&CameraConfig::default(), &nav), path)
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=100 {
            let v = ease_in_out_cubic(step as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn waypoint_pose_sits_behind_and_above() {
        let (rig, path) = default_rig();
        let pose = rig.waypoint_pose(&path, 2);

        // Waypoint 2 is (0, -0.4, 0), heading +x
        assert!(close(pose.position, Vec3::new(-6.0, 3.6, 0.0)));
        assert!(close(pose.look_at, Vec3::new(2.0, 1.1, 0.0)));
    }

    #[test]
    fn eased_blend_matches_endpoint_poses() {
        let (rig, path) = default_rig();
        let mut nav = NavigationController::new(path.len(), Duration::from_millis(2000));
        nav.advance(Duration::ZERO);

        let start = rig.interior_target(&path, &nav, Duration::ZERO);
        assert!(close(start.position, rig.waypoint_pose(&path, 0).position));

        let end = rig.interior_target(&path, &nav, Duration::from_millis(2000));
        assert!(close(end.position, rig.waypoint_pose(&path, 1).position));
        assert!(close(end.look_at, rig.waypoint_pose(&path, 1).look_at));
    }

    #[test]
    fn focused_target_offsets_toward_viewer() {
        let (rig, _) = default_rig();
        let target = rig.focused_target(Vec3::new(3.0, 0.0, 1.0));
        assert_eq!(target.position, Vec3::new(3.0, 0.8, 5.0));
        assert_eq!(target.look_at, Vec3::new(3.0, 0.0, 1.0));
    }

    #[test]
    fn free_roam_smoothing_never_teleports() {
        let (mut rig, _) = default_rig();
        rig.update(
            RigMode::Focused {
                orbit_position: Vec3::new(3.0, 0.0, 0.0),
            },
            0.016,
        );
        let before = rig.pose();
        let after = rig.update(RigMode::FreeRoam, 0.016);

        let target = rig.free_roam_target();
        let expected = before.position.lerp(target.position, 0.05);
        assert!(close(after.position, expected));
        assert!(!close(after.position, target.position));
    }

    #[test]
    fn interior_factor_scales_with_delta() {
        let (mut rig, path) = default_rig();
        let nav = NavigationController::new(path.len(), Duration::from_millis(2000));
        let start = rig.pose();
        let target = rig.interior_target(&path, &nav, Duration::ZERO);

        let pose = rig.update(
            RigMode::Interior {
                path: &path,
                navigation: &nav,
                now: Duration::ZERO,
            },
            0.1,
        );
        assert!(close(pose.position, start.position.lerp(target.position, 0.1)));
    }

    #[test]
    fn interior_factor_is_capped() {
        let (mut rig, path) = default_rig();
        let nav = NavigationController::new(path.len(), Duration::from_millis(2000));
        let pose = rig.update(
            RigMode::Interior {
                path: &path,
                navigation: &nav,
                now: Duration::ZERO,
            },
            10.0,
        );
        assert!(close(pose.position, rig.waypoint_pose(&path, 0).position));
    }

    #[test]
    fn missing_path_uses_static_pose() {
        let nav_config = NavigationConfig::default();
        let rig = CameraRig::new(&CameraConfig::default(), &nav_config);
        let path = PathModel::empty();
        let nav = NavigationController::new(0, Duration::from_millis(2000));

        let target = rig.interior_target(&path, &nav, Duration::ZERO);
        assert_eq!(target, CameraPose::new(Vec3::new(0.0, 3.5, 7.0), Vec3::ZERO));
    }

    #[test]
    fn rotation_hint_turns_the_offset() {
        let nav_config = NavigationConfig::default();
        let rig = CameraRig::new(&CameraConfig::default(), &nav_config);
        let path = PathModel::from_config(&[
            WaypointConfig::new([0.0, 0.0, 0.0], "start", 0.0),
            WaypointConfig::new([0.0, 0.0, 8.0], "about", 0.0),
        ])
        .unwrap();

        let pose = rig.waypoint_pose(&path, 0);
        assert!(close(pose.position, Vec3::new(0.0, 4.0, -6.0)));
        assert!(close(pose.look_at, Vec3::new(0.0, 1.5, 2.0)));
    }
}
