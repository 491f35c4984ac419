//=========================================================================
// Scene Controller
//=========================================================================
//
// Top-level owner of the portfolio scene state.
//
// Architecture:
//   SceneController
//     ├─ FocusMachine          (FreeRoam / Focused / Interior)
//     ├─ NavigationController  (waypoint index, timed transitions)
//     ├─ PathModel             (waypoint curve)
//     ├─ CameraRig             (smoothed camera pose)
//     ├─ OrbitTracker + SceneVisuals + VesselPose
//     └─ ContentProvider + selected detail
//
// Flow:
//   handle_action() / callbacks → state transitions (applied immediately)
//   tick(FrameTime)
//     1. fire due focus steps, then due navigation steps
//     2. orbit, camera, visuals, vessel
//     3. assemble Frame
//
// Commands arriving between ticks are stamped with the time of the last
// tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::focus::{ClickOutcome, FocusMachine, FocusState};
use super::navigation::NavigationController;
use crate::config::{NavigationConfig, OrbitConfig, PortfolioConfig};
use crate::core::camera::{CameraRig, RigMode};
use crate::core::content::{ContentProvider, Section};
use crate::core::path::{PathError, PathModel};
use crate::core::surface::{Frame, FrameTime, OverlayState};
use crate::core::visuals::{OrbitTracker, SceneVisuals, VesselPose, VisualInput};

//=== SceneAction =========================================================

/// User intent delivered to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneAction {
    /// Click on the planet.
    PrimaryClick,
    Advance,
    Retreat,
    Return,

    /// Open the detail overlay for an experience key or tag.
    SelectDetail(String),

    /// Open the detail overlay for the n-th experience (0-based).
    SelectDetailAt(usize),

    ClearDetail,
    PointerOver,
    PointerOut,
}

//=== SceneController =====================================================

#[derive(Debug)]
pub struct SceneController {
    path: PathModel,
    navigation: NavigationController,
    focus: FocusMachine,
    rig: CameraRig,
    orbit: OrbitTracker,
    visuals: SceneVisuals,
    vessel: VesselPose,
    content: ContentProvider,

    /// Experience keys as the path visits them; `SelectDetailAt` indexes this.
    detail_order: Vec<String>,
    selected_detail: Option<String>,
    hovered: bool,
    now: Duration,
    orbit_config: OrbitConfig,
    navigation_config: NavigationConfig,
}

impl SceneController {
    //--- Construction -----------------------------------------------------

    /// Creates a controller; fails if the waypoint configuration is malformed.
    pub fn new(config: &PortfolioConfig) -> Result<Self, PathError> {
        let path = PathModel::from_config(&config.navigation.waypoints)?;
        let focus = FocusMachine::new(config.timing.animation_duration());
        Ok(Self::assemble(config, path, focus))
    }

    /// Creates a controller, degrading to a static scene without an
    /// interior when the waypoint configuration is malformed.
    pub fn with_fallback(config: &PortfolioConfig) -> Self {
        match Self::new(config) {
            Ok(controller) => controller,
            Err(err) => {
                error!(target: "scene", "Invalid waypoint path, interior disabled: {}", err);
                let focus =
                    FocusMachine::new(config.timing.animation_duration()).without_interior();
                Self::assemble(config, PathModel::empty(), focus)
            }
        }
    }

    fn assemble(config: &PortfolioConfig, path: PathModel, focus: FocusMachine) -> Self {
        info!(
            target: "scene",
            "Scene controller ready ({} waypoints, interior {})",
            path.len(),
            if focus.interior_enabled() { "enabled" } else { "disabled" }
        );

        let content = ContentProvider::new(config.content.clone());
        let detail_order =
            content.experience_order(path.waypoints().iter().map(|waypoint| &waypoint.section));

        Self {
            navigation: NavigationController::new(
                path.len(),
                config.navigation.transition_duration(),
            ),
            path,
            focus,
            rig: CameraRig::new(&config.camera, &config.navigation),
            orbit: OrbitTracker::new(&config.orbit),
            visuals: SceneVisuals::default(),
            vessel: VesselPose::default(),
            content,
            detail_order,
            selected_detail: None,
            hovered: false,
            now: Duration::ZERO,
            orbit_config: config.orbit.clone(),
            navigation_config: config.navigation.clone(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    pub fn focus(&self) -> &FocusMachine {
        &self.focus
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn content(&self) -> &ContentProvider {
        &self.content
    }

    pub fn selected_detail(&self) -> Option<&str> {
        self.selected_detail.as_deref()
    }

    /// Time of the last tick.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Section at the current waypoint while inside the planet.
    pub fn current_section(&self) -> Option<&Section> {
        if !self.focus.state().is_interior() {
            return None;
        }
        self.path
            .waypoint(self.navigation.current_index())
            .map(|w| &w.section)
    }

    //--- Commands ---------------------------------------------------------

    pub fn handle_action(&mut self, action: SceneAction) {
        debug!(target: "scene", "Action: {:?}", action);
        match action {
            SceneAction::PrimaryClick => {
                self.on_primary_click();
            }
            SceneAction::Advance => {
                self.advance();
            }
            SceneAction::Retreat => {
                self.retreat();
            }
            SceneAction::Return => {
                self.on_return();
            }
            SceneAction::SelectDetail(id) => {
                self.select_detail(&id);
            }
            SceneAction::SelectDetailAt(index) => {
                match self.detail_order.get(index).cloned() {
                    Some(key) => {
                        self.select_detail(&key);
                    }
                    None => warn!(target: "scene", "No experience detail at position {}", index),
                }
            }
            SceneAction::ClearDetail => self.clear_detail(),
            SceneAction::PointerOver => self.pointer_over(),
            SceneAction::PointerOut => self.pointer_out(),
        }
    }

    pub fn on_primary_click(&mut self) -> ClickOutcome {
        self.focus.on_primary_click(self.now, self.orbit.position())
    }

    /// Leaves the planet (or the close-up) for free roam.
    pub fn on_return(&mut self) -> bool {
        if !self.focus.on_return(self.now) {
            return false;
        }

        self.navigation.reset();
        self.selected_detail = None;
        self.hovered = false;
        self.orbit.hold_one_frame();
        self.visuals.reset_after_return();
        true
    }

    pub fn advance(&mut self) -> bool {
        if !self.focus.state().is_interior() {
            debug!(target: "scene", "Ignoring advance outside the interior");
            return false;
        }
        self.navigation.advance(self.now)
    }

    pub fn retreat(&mut self) -> bool {
        if !self.focus.state().is_interior() {
            debug!(target: "scene", "Ignoring retreat outside the interior");
            return false;
        }
        self.navigation.retreat(self.now)
    }

    /// Opens the detail overlay. Unknown ids leave the selection unchanged.
    pub fn select_detail(&mut self, id: &str) -> bool {
        match self.content.resolve_experience_key(id) {
            Some(key) => {
                debug!(target: "scene", "Selected detail {}", key);
                self.selected_detail = Some(key);
                true
            }
            None => {
                warn!(target: "scene", "Unknown experience detail {:?}", id);
                false
            }
        }
    }

    pub fn clear_detail(&mut self) {
        self.selected_detail = None;
    }

    pub fn pointer_over(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_out(&mut self) {
        self.hovered = false;
    }

    //--- Tick -------------------------------------------------------------

    /// Fires due steps, advances animation state and returns the frame.
    pub fn tick(&mut self, time: FrameTime) -> Frame {
        self.now = self.now.max(time.elapsed);
        let now = self.now;
        let delta = if time.delta.is_finite() { time.delta.max(0.0) } else { 0.0 };

        //--- Step 1: Scheduled steps -------------------------------------
        if self.focus.update(now) {
            self.navigation.reset();
        }
        self.navigation.update(now);

        let state = self.focus.state();

        //--- Step 2: Orbit and camera ------------------------------------
        let tracked = self.orbit.update(delta, state.is_free_roam());
        let orbit_position = state.orbit_position().unwrap_or(tracked);

        let mode = match state {
            FocusState::FreeRoam => RigMode::FreeRoam,
            FocusState::Focused { orbit_position } => RigMode::Focused { orbit_position },
            FocusState::Interior { .. } => RigMode::Interior {
                path: &self.path,
                navigation: &self.navigation,
                now,
            },
        };
        let camera = self.rig.update(mode, delta);

        //--- Step 3: Visuals ---------------------------------------------
        self.visuals.update(
            VisualInput {
                free_roam: state.is_free_roam(),
                focused: matches!(state, FocusState::Focused { .. }),
                enter_progress: self.focus.enter_progress(now),
                interior: state.is_interior(),
                in_cooldown: self.focus.in_cooldown(now),
                delta_secs: delta,
            },
            &self.orbit_config,
        );

        let vessel = if state.is_interior() && self.path.is_ready() {
            self.vessel.update(
                &self.path,
                &self.navigation,
                now,
                delta,
                self.navigation_config.vessel_rate,
            );
            Some(self.vessel)
        } else {
            None
        };

        //--- Step 4: Frame -----------------------------------------------
        Frame {
            time: FrameTime::new(now, delta),
            focus: state,
            camera,
            fov: self.rig.fov(),
            orbit_position,
            visuals: self.visuals.clone(),
            vessel,
            overlay: self.overlay(),
        }
    }

    fn overlay(&self) -> OverlayState {
        let interior = self.focus.state().is_interior();
        OverlayState {
            can_advance: interior && self.navigation.can_advance(),
            can_retreat: interior && self.navigation.can_retreat(),
            show_return_control: self.focus.show_return_control(),
            return_label: self.focus.return_label(),
            selected_detail: self.selected_detail.clone(),
            current_section: self.current_section().cloned(),
            primary_hovered: self.hovered,
        }
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path::WaypointConfig;
    use crate::core::scene::focus::{RETURN_TO_SPACE, RETURN_TO_STAR};

    const DELTA: f32 = 1.0 / 60.0;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn tick_at(controller: &mut SceneController, at: u64) -> Frame {
        controller.tick(FrameTime::new(ms(at), DELTA))
    }

    /// Controller inside the planet at t = 1500ms.
    fn interior_controller() -> SceneController {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        tick_at(&mut controller, 0);
        assert_eq!(controller.on_primary_click(), ClickOutcome::Focused);
        assert_eq!(controller.on_primary_click(), ClickOutcome::EnterStarted);
        tick_at(&mut controller, 1500);
        assert!(controller.focus_state().is_interior());
        controller
    }

    #[test]
    fn three_advances_reach_first_experience() {
        let mut controller = interior_controller();
        let mut now = 1500;

        for _ in 0..3 {
            assert!(controller.advance());
            now += 2000;
            tick_at(&mut controller, now);
        }

        let frame = tick_at(&mut controller, now);
        assert_eq!(controller.navigation().current_index(), 3);
        assert_eq!(
            frame.overlay.current_section,
            Some(Section::Experience("qube".into()))
        );
        assert!(frame.overlay.can_advance);
        assert!(frame.overlay.can_retreat);
        assert!(frame.vessel.is_some());
    }

    #[test]
    fn double_advance_is_one_transition() {
        let mut controller = interior_controller();
        assert!(controller.advance());
        assert!(!controller.advance());

        let frame = tick_at(&mut controller, 6000);
        assert_eq!(controller.navigation().current_index(), 1);
        assert!(frame.overlay.can_advance);
    }

    #[test]
    fn overlay_hides_navigation_while_transitioning() {
        let mut controller = interior_controller();
        controller.advance();
        let frame = tick_at(&mut controller, 2000);
        assert!(!frame.overlay.can_advance);
        assert!(!frame.overlay.can_retreat);
    }

    #[test]
    fn return_clears_interior_state_and_blocks_reentry() {
        let mut controller = interior_controller();
        controller.advance();
        tick_at(&mut controller, 3500);
        controller.select_detail("qube");

        assert!(controller.on_return());
        let frame = tick_at(&mut controller, 3600);
        assert_eq!(frame.focus, FocusState::FreeRoam);
        assert!(!frame.overlay.show_return_control);
        assert_eq!(frame.overlay.return_label, None);
        assert_eq!(frame.overlay.selected_detail, None);
        assert_eq!(controller.navigation().current_index(), 0);

        assert_eq!(controller.on_primary_click(), ClickOutcome::Ignored);
        let frame = tick_at(&mut controller, 4000);
        assert_eq!(frame.focus, FocusState::FreeRoam);
        assert!(!frame.visuals.label_visible);
    }

    #[test]
    fn return_labels_follow_mode() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        tick_at(&mut controller, 0);
        controller.on_primary_click();
        let frame = tick_at(&mut controller, 16);
        assert_eq!(frame.overlay.return_label, Some(RETURN_TO_STAR));

        controller.on_primary_click();
        let frame = tick_at(&mut controller, 1600);
        assert_eq!(frame.overlay.return_label, Some(RETURN_TO_SPACE));
    }

    #[test]
    fn entering_freezes_captured_orbit_position() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        for step in 0..10 {
            tick_at(&mut controller, step * 16);
        }
        let captured = controller.orbit.position();
        controller.on_primary_click();
        controller.on_primary_click();

        let frame = tick_at(&mut controller, 5000);
        assert_eq!(
            frame.focus,
            FocusState::Interior {
                orbit_position: captured
            }
        );
        assert_eq!(frame.orbit_position, captured);
    }

    #[test]
    fn orbit_holds_one_frame_after_return() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        tick_at(&mut controller, 0);
        controller.on_primary_click();
        let focused = tick_at(&mut controller, 16).orbit_position;

        controller.on_return();
        let held = tick_at(&mut controller, 32).orbit_position;
        let moving = tick_at(&mut controller, 48).orbit_position;
        assert_eq!(held, focused);
        assert_ne!(moving, focused);
    }

    #[test]
    fn navigation_ignored_outside_interior() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        assert!(!controller.advance());
        let frame = tick_at(&mut controller, 0);
        assert!(!frame.overlay.can_advance);
        assert_eq!(frame.overlay.current_section, None);
    }

    #[test]
    fn detail_selection_by_id_and_position() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        assert!(controller.select_detail("experience-zoho"));
        assert_eq!(controller.selected_detail(), Some("zoho"));

        assert!(!controller.select_detail("acme"));
        assert_eq!(controller.selected_detail(), Some("zoho"));

        controller.handle_action(SceneAction::SelectDetailAt(0));
        assert_eq!(controller.selected_detail(), Some("qube"));

        controller.handle_action(SceneAction::ClearDetail);
        assert_eq!(controller.selected_detail(), None);
    }

    #[test]
    fn detail_positions_follow_the_path() {
        let mut config = PortfolioConfig::default();
        config.navigation.waypoints[3].section = "experience-zoho".into();
        config.navigation.waypoints[4].section = "experience-qube".into();
        let mut controller = SceneController::new(&config).unwrap();

        controller.handle_action(SceneAction::SelectDetailAt(0));
        assert_eq!(controller.selected_detail(), Some("zoho"));
        controller.handle_action(SceneAction::SelectDetailAt(1));
        assert_eq!(controller.selected_detail(), Some("qube"));

        controller.handle_action(SceneAction::SelectDetailAt(2));
        assert_eq!(controller.selected_detail(), Some("qube"));
    }

    #[test]
    fn pointer_hover_is_published() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        controller.handle_action(SceneAction::PointerOver);
        assert!(tick_at(&mut controller, 0).overlay.primary_hovered);
        controller.handle_action(SceneAction::PointerOut);
        assert!(!tick_at(&mut controller, 16).overlay.primary_hovered);
    }

    #[test]
    fn camera_moves_smoothly_on_focus() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        let before = tick_at(&mut controller, 0).camera;
        controller.on_primary_click();
        let after = tick_at(&mut controller, 16).camera;
        let distance = (after.position - before.position).length();
        assert!(distance > 0.0 && distance < 2.0);
    }

    #[test]
    fn malformed_path_is_fatal_for_new() {
        let mut config = PortfolioConfig::default();
        config.navigation.waypoints = vec![WaypointConfig::new([0.0, 0.0, 0.0], "start", 0.0)];
        assert_eq!(
            SceneController::new(&config).unwrap_err(),
            PathError::TooFewWaypoints(1)
        );
    }

    #[test]
    fn fallback_runs_static_scene_without_interior() {
        let mut config = PortfolioConfig::default();
        config.navigation.waypoints.clear();
        let mut controller = SceneController::with_fallback(&config);

        tick_at(&mut controller, 0);
        assert_eq!(controller.on_primary_click(), ClickOutcome::Focused);
        assert_eq!(controller.on_primary_click(), ClickOutcome::Ignored);

        let frame = tick_at(&mut controller, 5000);
        assert!(matches!(frame.focus, FocusState::Focused { .. }));
        assert!(frame.camera.is_finite());
        assert!(!frame.overlay.can_advance);
    }

    #[test]
    fn time_never_runs_backwards() {
        let mut controller = SceneController::new(&PortfolioConfig::default()).unwrap();
        tick_at(&mut controller, 1000);
        let frame = tick_at(&mut controller, 500);
        assert_eq!(frame.time.elapsed, ms(1000));
    }
}
