//=========================================================================
// Focus State Machine
//=========================================================================
//
// Mode switch between free roaming around the star, focusing on the
// orbiting planet and exploring its interior.
//
// States:
//   FreeRoam ──click──► Focused ──click──► (entering) ──► Interior
//       ▲                  │                                  │
//       └──────return──────┴───────────────return─────────────┘
//
// The enter animation runs for a fixed duration before the interior
// takes over. A return bumps the generation so an in-flight enter never
// lands, and starts a cooldown during which clicks are ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec3;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::schedule::{Generation, Scheduler};

//=== Constants ===========================================================

pub const RETURN_TO_SPACE: &str = "Return to Space";
pub const RETURN_TO_STAR: &str = "Return to Star";

//=== FocusState ==========================================================

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FocusState {
    #[default]
    FreeRoam,

    /// Camera closes in on the planet captured at `orbit_position`.
    Focused { orbit_position: Vec3 },

    /// Inside the planet. `orbit_position` stays frozen until return.
    Interior { orbit_position: Vec3 },
}

impl FocusState {
    pub fn orbit_position(&self) -> Option<Vec3> {
        match self {
            Self::FreeRoam => None,
            Self::Focused { orbit_position } | Self::Interior { orbit_position } => {
                Some(*orbit_position)
            }
        }
    }

    pub fn is_free_roam(&self) -> bool {
        matches!(self, Self::FreeRoam)
    }

    pub fn is_interior(&self) -> bool {
        matches!(self, Self::Interior { .. })
    }
}

//=== ClickOutcome ========================================================

/// What a primary click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Focused,
    EnterStarted,
    Ignored,
}

//--- FocusStep -----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusStep {
    EnterComplete,
}

//=== FocusMachine ========================================================

#[derive(Debug)]
pub struct FocusMachine {
    state: FocusState,
    animation_duration: Duration,
    interior_enabled: bool,
    entering_since: Option<Duration>,
    cooldown_until: Option<Duration>,
    generation: Generation,
    scheduler: Scheduler<FocusStep>,
}

impl FocusMachine {
    pub fn new(animation_duration: Duration) -> Self {
        Self {
            state: FocusState::FreeRoam,
            animation_duration,
            interior_enabled: true,
            entering_since: None,
            cooldown_until: None,
            generation: Generation::default(),
            scheduler: Scheduler::new(),
        }
    }

    /// Disables the Focused → Interior step (static fallback scene).
    pub fn without_interior(mut self) -> Self {
        self.interior_enabled = false;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    pub fn interior_enabled(&self) -> bool {
        self.interior_enabled
    }

    pub fn is_entering(&self) -> bool {
        self.entering_since.is_some()
    }

    /// Elapsed fraction of the enter animation, `None` when not entering.
    pub fn enter_progress(&self, now: Duration) -> Option<f32> {
        self.entering_since.map(|since| {
            if self.animation_duration.is_zero() {
                1.0
            } else {
                let elapsed = now.saturating_sub(since).as_secs_f32();
                (elapsed / self.animation_duration.as_secs_f32()).clamp(0.0, 1.0)
            }
        })
    }

    /// True while clicks are suppressed after a return.
    pub fn in_cooldown(&self, now: Duration) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    pub fn show_return_control(&self) -> bool {
        !self.state.is_free_roam()
    }

    pub fn return_label(&self) -> Option<&'static str> {
        match self.state {
            FocusState::FreeRoam => None,
            FocusState::Focused { .. } => Some(RETURN_TO_STAR),
            FocusState::Interior { .. } => Some(RETURN_TO_SPACE),
        }
    }

    //--- Commands ---------------------------------------------------------

    /// Handles a click on the planet; `orbit_position` is its current position.
    pub fn on_primary_click(&mut self, now: Duration, orbit_position: Vec3) -> ClickOutcome {
        if self.in_cooldown(now) {
            debug!(target: "scene", "Ignoring click: return cooldown");
            return ClickOutcome::Ignored;
        }

        match self.state {
            FocusState::FreeRoam => {
                self.state = FocusState::Focused { orbit_position };
                info!(target: "scene", "Focused on planet at {:?}", orbit_position);
                ClickOutcome::Focused
            }
            FocusState::Focused { .. } if !self.interior_enabled => {
                debug!(target: "scene", "Ignoring click: interior unavailable");
                ClickOutcome::Ignored
            }
            FocusState::Focused { .. } if !self.is_entering() => {
                self.generation = self.generation.next();
                self.entering_since = Some(now);
                self.scheduler.schedule(
                    now + self.animation_duration,
                    self.generation,
                    FocusStep::EnterComplete,
                );
                debug!(target: "scene", "Enter animation started");
                ClickOutcome::EnterStarted
            }
            FocusState::Focused { .. } => {
                debug!(target: "scene", "Ignoring click: already entering");
                ClickOutcome::Ignored
            }
            FocusState::Interior { .. } => {
                trace!(target: "scene", "Ignoring click: already inside");
                ClickOutcome::Ignored
            }
        }
    }

    /// Returns to free roam. Returns false if already roaming.
    pub fn on_return(&mut self, now: Duration) -> bool {
        if self.state.is_free_roam() {
            debug!(target: "scene", "Ignoring return: already free roaming");
            return false;
        }

        self.generation = self.generation.next();
        self.entering_since = None;
        self.cooldown_until = Some(now + self.animation_duration);
        self.state = FocusState::FreeRoam;
        info!(target: "scene", "Returned to free roam");
        true
    }

    /// Fires due steps. Returns true if the interior was entered.
    pub fn update(&mut self, now: Duration) -> bool {
        let mut entered = false;

        for scheduled in self.scheduler.take_due(now) {
            if scheduled.generation != self.generation {
                trace!(target: "scene", "Dropping stale {:?}", scheduled.task);
                continue;
            }

            match (scheduled.task, self.state) {
                (FocusStep::EnterComplete, FocusState::Focused { orbit_position }) => {
                    self.entering_since = None;
                    self.state = FocusState::Interior { orbit_position };
                    info!(target: "scene", "Entered planet interior");
                    entered = true;
                }
                (step, state) => {
                    trace!(target: "scene", "Dropping {:?} in {:?}", step, state);
                }
            }
        }

        if self.cooldown_until.is_some_and(|until| now >= until) {
            self.cooldown_until = None;
        }

        entered
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ANIMATION: Duration = Duration::from_millis(1500);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn click_from_free_roam_focuses_immediately() {
        let mut focus = FocusMachine::new(ANIMATION);
        let orbit = Vec3::new(3.0, 0.0, 0.0);

        assert_eq!(focus.on_primary_click(ms(0), orbit), ClickOutcome::Focused);
        assert_eq!(focus.state(), FocusState::Focused { orbit_position: orbit });
        assert!(focus.show_return_control());
        assert_eq!(focus.return_label(), Some(RETURN_TO_STAR));
    }

    #[test]
    fn second_click_enters_after_animation() {
        let mut focus = FocusMachine::new(ANIMATION);
        let orbit = Vec3::new(0.0, 0.0, 3.0);
        focus.on_primary_click(ms(0), orbit);

        assert_eq!(
            focus.on_primary_click(ms(100), Vec3::ZERO),
            ClickOutcome::EnterStarted
        );
        assert!(focus.is_entering());

        assert!(!focus.update(ms(1599)));
        assert!(!focus.state().is_interior());

        assert!(focus.update(ms(1600)));
        assert_eq!(focus.state(), FocusState::Interior { orbit_position: orbit });
        assert!(!focus.is_entering());
        assert_eq!(focus.return_label(), Some(RETURN_TO_SPACE));
    }

    #[test]
    fn clicks_while_entering_or_inside_are_ignored() {
        let mut focus = FocusMachine::new(ANIMATION);
        focus.on_primary_click(ms(0), Vec3::X);
        focus.on_primary_click(ms(0), Vec3::X);

        assert_eq!(focus.on_primary_click(ms(10), Vec3::X), ClickOutcome::Ignored);
        focus.update(ms(1500));
        assert_eq!(focus.on_primary_click(ms(2000), Vec3::X), ClickOutcome::Ignored);
    }

    #[test]
    fn return_cancels_in_flight_enter() {
        let mut focus = FocusMachine::new(ANIMATION);
        focus.on_primary_click(ms(0), Vec3::X);
        focus.on_primary_click(ms(0), Vec3::X);

        assert!(focus.on_return(ms(500)));
        assert!(!focus.update(ms(1500)));
        assert_eq!(focus.state(), FocusState::FreeRoam);
        assert!(!focus.show_return_control());
        assert_eq!(focus.return_label(), None);
    }

    #[test]
    fn clicks_during_cooldown_do_not_reenter() {
        let mut focus = FocusMachine::new(ANIMATION);
        focus.on_primary_click(ms(0), Vec3::X);
        focus.on_primary_click(ms(0), Vec3::X);
        focus.update(ms(1500));

        assert!(focus.on_return(ms(2000)));
        assert!(focus.in_cooldown(ms(2000)));
        assert_eq!(focus.on_primary_click(ms(2100), Vec3::X), ClickOutcome::Ignored);
        assert_eq!(focus.state(), FocusState::FreeRoam);

        focus.update(ms(3500));
        assert!(!focus.in_cooldown(ms(3500)));
        assert_eq!(focus.on_primary_click(ms(3500), Vec3::X), ClickOutcome::Focused);
    }

    #[test]
    fn return_from_free_roam_is_noop() {
        let mut focus = FocusMachine::new(ANIMATION);
        assert!(!focus.on_return(ms(0)));
        assert!(!focus.in_cooldown(ms(0)));
    }

    #[test]
    fn enter_progress_tracks_animation() {
        let mut focus = FocusMachine::new(ANIMATION);
        assert_eq!(focus.enter_progress(ms(0)), None);
        focus.on_primary_click(ms(0), Vec3::X);
        focus.on_primary_click(ms(1000), Vec3::X);
        let p = focus.enter_progress(ms(1750)).unwrap();
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn disabled_interior_stays_focused() {
        let mut focus = FocusMachine::new(ANIMATION).without_interior();
        focus.on_primary_click(ms(0), Vec3::X);
        assert_eq!(focus.on_primary_click(ms(10), Vec3::X), ClickOutcome::Ignored);
        focus.update(ms(5000));
        assert!(matches!(focus.state(), FocusState::Focused { .. }));
    }
}
