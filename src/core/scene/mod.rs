//=========================================================================
// Scene System
//=========================================================================
//
// Focus, navigation and the controller that owns them.
//
// Architecture:
//   SceneController
//     ├─ FocusMachine          ─┐
//     └─ NavigationController  ─┴─ Scheduler<T> (generation-tagged steps)
//
// Flow:
//   tick() → FocusMachine::update() → NavigationController::update()
//          → camera / visuals → Frame
//
//=========================================================================

//=== Module Declarations =================================================

pub mod controller;
pub mod focus;
pub mod navigation;
pub mod schedule;

//=== Public API ==========================================================

pub use controller::{SceneAction, SceneController};
pub use focus::{ClickOutcome, FocusMachine, FocusState};
pub use navigation::{NavPhase, NavigationController, TransitionProgress};
pub use schedule::{Generation, Scheduled, Scheduler};
