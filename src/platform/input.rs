//! Keyboard and on-screen button input
//!
//! Movement is level-triggered (held keys). Jump is edge-triggered: a press
//! latches one request that the next frame consumes, and holding the key
//! (or browser key-repeat) never re-arms it. Pressing a different jump key
//! while one is held is a new press.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Logical game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Jump,
}

/// Map a `KeyboardEvent.key` value to a control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key.to_lowercase().as_str() {
        "a" | "arrowleft" => Some(Control::Left),
        "d" | "arrowright" => Some(Control::Right),
        "w" | " " | "arrowup" => Some(Control::Jump),
        _ => None,
    }
}

/// Current held keys plus the latched jump request
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Held sources per control, so two keys for one control release cleanly
    held: HashSet<(Control, String)>,
    jump_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_held(&self, control: Control) -> bool {
        self.held.iter().any(|(c, _)| *c == control)
    }

    /// A key or button went down; `source` identifies it
    ///
    /// A second jump key is a fresh edge; only a repeat of a source that is
    /// already down is ignored.
    pub fn press(&mut self, control: Control, source: &str) {
        let newly_down = self.held.insert((control, source.to_string()));
        if control == Control::Jump && newly_down {
            self.jump_requested = true;
        }
    }

    pub fn release(&mut self, control: Control, source: &str) {
        self.held.remove(&(control, source.to_string()));
    }

    /// Raw keydown; returns false for keys the game ignores
    pub fn key_down(&mut self, key: &str) -> bool {
        match control_for_key(key) {
            Some(control) => {
                self.press(control, &key.to_lowercase());
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match control_for_key(key) {
            Some(control) => {
                self.release(control, &key.to_lowercase());
                true
            }
            None => false,
        }
    }

    /// One-shot jump (click on the jump button)
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Drop every held key (window blur loses keyup events)
    pub fn clear(&mut self) {
        self.held.clear();
        self.jump_requested = false;
    }

    /// Input for the next frame; consumes the jump request
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Control::Left),
            right: self.is_held(Control::Right),
            jump: std::mem::take(&mut self.jump_requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(control_for_key("ArrowLeft"), Some(Control::Left));
        assert_eq!(control_for_key("A"), Some(Control::Left));
        assert_eq!(control_for_key("d"), Some(Control::Right));
        assert_eq!(control_for_key(" "), Some(Control::Jump));
        assert_eq!(control_for_key("ArrowUp"), Some(Control::Jump));
        assert_eq!(control_for_key("Escape"), None);
    }

    #[test]
    fn test_movement_is_held() {
        let mut input = InputState::new();
        input.key_down("ArrowRight");
        assert!(input.take_tick_input().right);
        assert!(input.take_tick_input().right);
        input.key_up("ArrowRight");
        assert!(!input.take_tick_input().right);
    }

    #[test]
    fn test_two_keys_for_one_control() {
        let mut input = InputState::new();
        input.key_down("a");
        input.key_down("ArrowLeft");
        input.key_up("a");
        assert!(input.take_tick_input().left);
        input.key_up("arrowleft");
        assert!(!input.take_tick_input().left);
    }

    #[test]
    fn test_jump_is_rising_edge() {
        let mut input = InputState::new();
        input.key_down("w");
        assert!(input.take_tick_input().jump);

        // Held and key-repeat: no new request
        input.key_down("w");
        input.key_down("w");
        assert!(!input.take_tick_input().jump);

        input.key_up("w");
        input.key_down(" ");
        assert!(input.take_tick_input().jump);
    }

    #[test]
    fn test_second_jump_key_is_a_new_press() {
        let mut input = InputState::new();
        input.key_down("w");
        assert!(input.take_tick_input().jump);

        input.key_down(" ");
        assert!(input.take_tick_input().jump);

        // Repeats of either held key stay quiet
        input.key_down("w");
        input.key_down(" ");
        assert!(!input.take_tick_input().jump);
    }

    #[test]
    fn test_button_jump_and_clear() {
        let mut input = InputState::new();
        input.request_jump();
        input.press(Control::Right, "btn-right");
        input.clear();
        let tick = input.take_tick_input();
        assert!(!tick.jump);
        assert!(!tick.right);
    }
}
