//=========================================================================
// Navigation Controller
//=========================================================================
//
// Owns the current waypoint index and the two-phase timed transition
// between neighbouring waypoints.
//
// Flow:
//   advance()/retreat() → Transitioning{from, to, started_at}
//     ├─ now + duration/2 → Commit  (current_index = to)
//     └─ now + duration   → Finish  (Idle)
//
// Input arriving while a transition is in flight, or at either end of
// the path, is ignored. Steps scheduled by a transition that was reset
// away are dropped on fire.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::schedule::{Generation, Scheduler};

//=== NavPhase ============================================================

/// Whether the controller is parked or moving between waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavPhase {
    #[default]
    Idle,
    Transitioning {
        from: usize,
        to: usize,
        started_at: Duration,
    },
}

impl NavPhase {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }
}

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

//--- NavStep -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavStep {
    Commit { to: usize },
    Finish,
}

//=== TransitionProgress ==================================================

/// Snapshot of an in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionProgress {
    pub from: usize,
    pub to: usize,

    /// Elapsed fraction of the transition, clamped to [0, 1].
    pub progress: f32,
}

//=== NavigationController ================================================

/// Index-based navigation along the waypoint path.
#[derive(Debug)]
pub struct NavigationController {
    waypoint_count: usize,
    current_index: usize,
    phase: NavPhase,
    duration: Duration,
    generation: Generation,
    scheduler: Scheduler<NavStep>,
}

impl NavigationController {
    /// Creates a controller parked at index 0.
    pub fn new(waypoint_count: usize, duration: Duration) -> Self {
        Self {
            waypoint_count,
            current_index: 0,
            phase: NavPhase::Idle,
            duration,
            generation: Generation::default(),
            scheduler: Scheduler::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoint_count
    }

    pub fn transition_duration(&self) -> Duration {
        self.duration
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase.is_transitioning()
    }

    pub fn can_advance(&self) -> bool {
        !self.is_transitioning() && self.current_index + 1 < self.waypoint_count
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_transitioning() && self.current_index > 0
    }

    /// Progress of the in-flight transition, `None` while idle.
    pub fn progress(&self, now: Duration) -> Option<TransitionProgress> {
        match self.phase {
            NavPhase::Idle => None,
            NavPhase::Transitioning {
                from,
                to,
                started_at,
            } => {
                let progress = if self.duration.is_zero() {
                    1.0
                } else {
                    let elapsed = now.saturating_sub(started_at);
                    (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
                };
                Some(TransitionProgress { from, to, progress })
            }
        }
    }

    //--- Commands ---------------------------------------------------------

    /// Starts a transition to the next waypoint. Returns whether accepted.
    pub fn advance(&mut self, now: Duration) -> bool {
        self.begin(Direction::Forward, now)
    }

    /// Starts a transition to the previous waypoint. Returns whether accepted.
    pub fn retreat(&mut self, now: Duration) -> bool {
        self.begin(Direction::Backward, now)
    }

    /// Parks at index 0 and invalidates every pending step.
    pub fn reset(&mut self) {
        let dropped = self.scheduler.len();
        self.scheduler.clear();
        self.generation = self.generation.next();
        self.current_index = 0;
        self.phase = NavPhase::Idle;
        debug!(
            target: "scene",
            "Navigation reset (generation {}, {} pending steps dropped)",
            self.generation.value(),
            dropped
        );
    }

    /// Applies every step due at `now`.
    pub fn update(&mut self, now: Duration) {
        for scheduled in self.scheduler.take_due(now) {
            if scheduled.generation != self.generation {
                trace!(
                    target: "scene",
                    "Dropping stale navigation step {:?} (generation {} != {})",
                    scheduled.task,
                    scheduled.generation.value(),
                    self.generation.value()
                );
                continue;
            }

            match scheduled.task {
                NavStep::Commit { to } => {
                    self.current_index = to;
                    debug!(target: "scene", "Navigation committed index {}", to);
                }
                NavStep::Finish => {
                    self.phase = NavPhase::Idle;
                    debug!(target: "scene", "Navigation idle at index {}", self.current_index);
                }
            }
        }
    }

    //--- Internal ---------------------------------------------------------

    fn begin(&mut self, direction: Direction, now: Duration) -> bool {
        if self.is_transitioning() {
            debug!(target: "scene", "Ignoring {:?}: transition in flight", direction);
            return false;
        }

        let to = match direction {
            Direction::Forward if self.can_advance() => self.current_index + 1,
            Direction::Backward if self.can_retreat() => self.current_index - 1,
            _ => {
                debug!(
                    target: "scene",
                    "Ignoring {:?}: at boundary (index {} of {})",
                    direction,
                    self.current_index,
                    self.waypoint_count
                );
                return false;
            }
        };

        let from = self.current_index;
        self.generation = self.generation.next();
        self.phase = NavPhase::Transitioning {
            from,
            to,
            started_at: now,
        };

        self.scheduler
            .schedule(now + self.duration / 2, self.generation, NavStep::Commit { to });
        self.scheduler
            .schedule(now + self.duration, self.generation, NavStep::Finish);

        debug!(target: "scene", "Navigation {:?}: {} → {}", direction, from, to);
        true
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(2000);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Runs one complete advance starting at `now`, returns the finish time.
    fn complete_advance(nav: &mut NavigationController, now: Duration) -> Duration {
        assert!(nav.advance(now));
        let end = now + DURATION;
        nav.update(end);
        end
    }

    #[test]
    fn starts_idle_at_first_waypoint() {
        let nav = NavigationController::new(6, DURATION);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.phase(), NavPhase::Idle);
        assert!(nav.can_advance());
        assert!(!nav.can_retreat());
    }

    #[test]
    fn advance_commits_halfway_and_idles_at_end() {
        let mut nav = NavigationController::new(6, DURATION);
        assert!(nav.advance(ms(0)));
        assert!(!nav.can_advance());
        assert!(!nav.can_retreat());

        nav.update(ms(999));
        assert_eq!(nav.current_index(), 0);

        nav.update(ms(1000));
        assert_eq!(nav.current_index(), 1);
        assert!(nav.is_transitioning());

        nav.update(ms(2000));
        assert_eq!(nav.phase(), NavPhase::Idle);
        assert!(nav.can_advance());
        assert!(nav.can_retreat());
    }

    #[test]
    fn advancing_to_the_end_then_no_op() {
        let mut nav = NavigationController::new(4, DURATION);
        let mut now = ms(0);
        for _ in 0..3 {
            now = complete_advance(&mut nav, now);
        }
        assert_eq!(nav.current_index(), 3);
        assert!(!nav.can_advance());
        assert!(!nav.advance(now));
        assert_eq!(nav.phase(), NavPhase::Idle);
    }

    #[test]
    fn retreat_is_symmetric() {
        let mut nav = NavigationController::new(3, DURATION);
        let mut now = complete_advance(&mut nav, ms(0));
        now = complete_advance(&mut nav, now);

        for expected in [1, 0] {
            assert!(nav.retreat(now));
            now += DURATION;
            nav.update(now);
            assert_eq!(nav.current_index(), expected);
        }
        assert!(!nav.retreat(now));
    }

    #[test]
    fn double_advance_moves_one_step() {
        let mut nav = NavigationController::new(6, DURATION);
        assert!(nav.advance(ms(0)));
        assert!(!nav.advance(ms(0)));
        nav.update(ms(5000));
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn reset_drops_pending_steps() {
        let mut nav = NavigationController::new(6, DURATION);
        let now = complete_advance(&mut nav, ms(0));
        assert!(nav.advance(now));
        nav.reset();
        assert!(nav.scheduler.is_empty());

        nav.update(now + DURATION);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.phase(), NavPhase::Idle);
    }

    #[test]
    fn stale_finish_does_not_end_new_transition() {
        let mut nav = NavigationController::new(6, DURATION);
        assert!(nav.advance(ms(0)));
        nav.reset();
        assert!(nav.advance(ms(500)));

        // Old finish (2000) must not idle the transition started at 500
        nav.update(ms(2000));
        assert!(nav.is_transitioning());
        assert_eq!(nav.current_index(), 1);

        nav.update(ms(2500));
        assert_eq!(nav.phase(), NavPhase::Idle);
    }

    #[test]
    fn progress_is_clamped_fraction() {
        let mut nav = NavigationController::new(6, DURATION);
        assert_eq!(nav.progress(ms(0)), None);
        nav.advance(ms(1000));

        let p = nav.progress(ms(1500)).unwrap();
        assert_eq!((p.from, p.to), (0, 1));
        assert!((p.progress - 0.25).abs() < 1e-6);

        assert_eq!(nav.progress(ms(500)).unwrap().progress, 0.0);
        assert_eq!(nav.progress(ms(9000)).unwrap().progress, 1.0);
    }

    #[test]
    fn zero_duration_completes_on_next_update() {
        let mut nav = NavigationController::new(2, Duration::ZERO);
        assert!(nav.advance(ms(10)));
        assert_eq!(nav.progress(ms(10)).unwrap().progress, 1.0);
        nav.update(ms(10));
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.phase(), NavPhase::Idle);
    }

    #[test]
    fn empty_path_never_moves() {
        let mut nav = NavigationController::new(0, DURATION);
        assert!(!nav.can_advance());
        assert!(!nav.advance(ms(0)));
        assert!(!nav.retreat(ms(0)));
    }
}
