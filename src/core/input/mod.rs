//=========================================================================
// Input System
//=========================================================================
//
// Turns platform input batches into scene actions.
//
// Architecture:
//   Vec<Vec<InputEvent>> (per tick, from EventCollector)
//     → InputBindings::map_event()
//     → Vec<SceneAction> (in arrival order)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bindings;
pub mod event;

//=== Public API ==========================================================

pub use bindings::InputBindings;
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneAction;

//=== InputSystem =========================================================

/// Owns the bindings and resolves each tick's input batches.
#[derive(Debug, Clone, Default)]
pub struct InputSystem {
    bindings: InputBindings,
}

impl InputSystem {
    pub fn new(bindings: InputBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut InputBindings {
        &mut self.bindings
    }

    /// Maps every bound press in `batches`, preserving arrival order.
    pub fn resolve(&self, batches: &[Vec<InputEvent>]) -> Vec<SceneAction> {
        batches
            .iter()
            .flatten()
            .filter_map(|event| {
                let action = self.bindings.map_event(event);
                if action.is_none() && event.is_discrete() {
                    trace!(target: "platform::input", "Unbound input {:?}", event);
                }
                action
            })
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_arrival_order_across_batches() {
        let input = InputSystem::default();
        let batches = vec![
            vec![
                InputEvent::KeyDown {
                    key: KeyCode::Enter,
                    modifiers: Modifiers::NONE,
                },
                InputEvent::KeyUp {
                    key: KeyCode::Enter,
                    modifiers: Modifiers::NONE,
                },
            ],
            vec![InputEvent::MouseMoved { x: 4.0, y: 2.0 }],
            vec![InputEvent::KeyDown {
                key: KeyCode::Escape,
                modifiers: Modifiers::NONE,
            }],
        ];

        assert_eq!(
            input.resolve(&batches),
            vec![SceneAction::PrimaryClick, SceneAction::Return]
        );
    }

    #[test]
    fn custom_bindings_are_used() {
        let mut input = InputSystem::new(InputBindings::empty());
        input.bindings_mut().bind_key(KeyCode::ArrowUp, SceneAction::Advance);

        let batches = vec![vec![InputEvent::KeyDown {
            key: KeyCode::ArrowUp,
            modifiers: Modifiers::NONE,
        }]];
        assert_eq!(input.resolve(&batches), vec![SceneAction::Advance]);
    }
}
