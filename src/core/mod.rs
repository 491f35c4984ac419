//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Drives the scene controller on the logic (non-platform) thread.
//
// Architecture:
// ```text
//   EventCollector ──batches──► InputSystem ──actions──► SceneController
//                                                             │ tick()
//                                                             ▼
//                                                  RenderSurface::present()
// ```
//
// The orchestrator owns the controller, the bindings and the surface. It
// ticks at a fixed rate and talks to the platform thread only through
// the channel behind the EventCollector.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod content;
pub mod input;
pub mod path;
pub(crate) mod platform_bridge;
pub mod scene;
pub mod surface;
pub mod visuals;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Dependencies ===============================================

use input::{InputEvent, InputSystem};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use scene::SceneController;
use surface::{FrameTime, RenderSurface};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<R: RenderSurface> {
    controller: SceneController,
    input: InputSystem,
    surface: R,
}

impl<R: RenderSurface + 'static> CoreSystemsOrchestrator<R> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(controller: SceneController, input: InputSystem, surface: R) -> Self {
        Self {
            controller,
            input,
            surface,
        }
    }

    //--- step() -----------------------------------------------------------
    //
    // One logic tick: apply bound actions in arrival order, advance the
    // controller and hand the frame to the surface.
    //
    pub(crate) fn step(&mut self, batches: &[Vec<InputEvent>], time: FrameTime) {
        for action in self.input.resolve(batches) {
            self.controller.handle_action(action);
        }

        let frame = self.controller.tick(time);
        self.surface.present(&frame);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (exits on window close / disconnect)
    //  2. Steps the controller with the elapsed clock
    //  3. Sleeps to maintain fixed pacing
    //
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            let start = Instant::now();
            let mut last = start;

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting.");
                    break;
                }

                //--- Step 2: Tick the scene --------------------------------
                let now = Instant::now();
                let time = FrameTime::new(now - start, (now - last).as_secs_f32());
                last = now;
                self.step(collector.batches(), time);

                //--- Step 3: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
