//=========================================================================
// Input Bindings
//=========================================================================
//
// Maps input events to scene actions.
//
// Architecture:
//   (key/button, modifiers) → HashMap → SceneAction
//
// Only presses resolve; releases and cursor motion never do. Modifiers
// must match exactly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};
use crate::core::scene::SceneAction;

//=== InputBindings =======================================================

#[derive(Debug, Clone)]
pub struct InputBindings {
    key_bindings: HashMap<(KeyCode, Modifiers), SceneAction>,
    mouse_bindings: HashMap<(MouseButton, Modifiers), SceneAction>,
}

impl InputBindings {
    /// Creates an empty binding table.
    pub fn empty() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key (no modifiers).
    pub fn bind_key(&mut self, key: KeyCode, action: SceneAction) {
        self.bind_key_with_mods(key, Modifiers::NONE, action);
    }

    pub fn bind_key_with_mods(&mut self, key: KeyCode, modifiers: Modifiers, action: SceneAction) {
        self.key_bindings.insert((key, modifiers), action);
    }

    /// Binds a mouse button (no modifiers).
    pub fn bind_mouse(&mut self, button: MouseButton, action: SceneAction) {
        self.bind_mouse_with_mods(button, Modifiers::NONE, action);
    }

    pub fn bind_mouse_with_mods(
        &mut self,
        button: MouseButton,
        modifiers: Modifiers,
        action: SceneAction,
    ) {
        self.mouse_bindings.insert((button, modifiers), action);
    }

    /// Removes the unmodified binding for `key`.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_bindings.remove(&(key, Modifiers::NONE));
    }

    /// Removes the unmodified binding for `button`.
    pub fn unbind_mouse(&mut self, button: MouseButton) {
        self.mouse_bindings.remove(&(button, Modifiers::NONE));
    }

    pub fn len(&self) -> usize {
        self.key_bindings.len() + self.mouse_bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps a press to its bound action.
    pub fn map_event(&self, event: &InputEvent) -> Option<SceneAction> {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.key_bindings.get(&(*key, *modifiers)).cloned()
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.mouse_bindings.get(&(*button, *modifiers)).cloned()
            }
            _ => None,
        }
    }
}

impl Default for InputBindings {
    /// Portfolio bindings.
    ///
    /// - Left click, Enter, Space: click the planet
    /// - ArrowRight / ArrowLeft: next / previous waypoint
    /// - Escape, Backspace: return
    /// - Digit1..Digit9: open the n-th experience detail
    /// - Delete: close the detail overlay
    fn default() -> Self {
        let mut bindings = Self::empty();

        bindings.bind_mouse(MouseButton::Left, SceneAction::PrimaryClick);
        bindings.bind_key(KeyCode::Enter, SceneAction::PrimaryClick);
        bindings.bind_key(KeyCode::Space, SceneAction::PrimaryClick);

        bindings.bind_key(KeyCode::ArrowRight, SceneAction::Advance);
        bindings.bind_key(KeyCode::ArrowLeft, SceneAction::Retreat);

        bindings.bind_key(KeyCode::Escape, SceneAction::Return);
        bindings.bind_key(KeyCode::Backspace, SceneAction::Return);

        for key in [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
        ] {
            if let Some(slot) = key.digit_slot() {
                bindings.bind_key(key, SceneAction::SelectDetailAt(slot));
            }
        }
        bindings.bind_key(KeyCode::Delete, SceneAction::ClearDetail);

        bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
