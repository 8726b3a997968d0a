//! Raw input to tick intents
//!
//! Keys and touches are level-held. Clicks and taps are instantaneous, so a
//! jump from one is queued until the next sample. A touch only strafes once
//! it has outlived the sample that saw it start, so a tap is just a jump.

use crate::sim::TickInput;

#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    jump_key: bool,
    left_key: bool,
    right_key: bool,
    touch_left: bool,
    touch_right: bool,
    /// Touch began since the last sample
    touch_fresh: bool,
    queued_jump: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `KeyboardEvent.code` went down. Returns true if the key is bound.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_key(code, false)
    }

    fn set_key(&mut self, code: &str, down: bool) -> bool {
        match code {
            "Space" | "ArrowUp" | "KeyW" => {
                if down && !self.jump_key {
                    self.queued_jump = true;
                }
                self.jump_key = down;
            }
            "ArrowLeft" | "KeyA" => self.left_key = down,
            "ArrowRight" | "KeyD" => self.right_key = down,
            _ => return false,
        }
        true
    }

    /// Click/tap on the canvas
    pub fn pointer_down(&mut self) {
        self.queued_jump = true;
    }

    /// Finger down at `x` on a surface `width` wide: jump, and strafe toward
    /// that half if still held later
    pub fn touch_start(&mut self, x: f32, width: f32) {
        self.queued_jump = true;
        self.touch_fresh = true;
        self.set_touch_half(x, width);
    }

    /// Held finger moved; left half strafes left
    pub fn touch_move(&mut self, x: f32, width: f32) {
        self.set_touch_half(x, width);
    }

    pub fn touch_end(&mut self) {
        self.touch_left = false;
        self.touch_right = false;
        self.touch_fresh = false;
    }

    fn set_touch_half(&mut self, x: f32, width: f32) {
        let left = x < width / 2.0;
        self.touch_left = left;
        self.touch_right = !left;
    }

    /// Drop everything held (e.g. on focus loss)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Intents for the next tick. A queued jump is reported once, then a
    /// release, so each press yields a fresh edge.
    pub fn sample(&mut self) -> TickInput {
        let jump_pressed = self.queued_jump;
        self.queued_jump = false;
        let touch_held = !self.touch_fresh;
        self.touch_fresh = false;
        TickInput {
            jump_pressed,
            move_left: self.left_key || (touch_held && self.touch_left),
            move_right: self.right_key || (touch_held && self.touch_right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_jump_key_is_one_press() {
        let mut latch = InputLatch::new();
        assert!(latch.key_down("Space"));
        assert!(latch.sample().jump_pressed);
        // Auto-repeat keydowns while held do not re-queue
        latch.key_down("Space");
        assert!(!latch.sample().jump_pressed);
        latch.key_up("Space");
        latch.key_down("ArrowUp");
        assert!(latch.sample().jump_pressed);
    }

    #[test]
    fn test_click_queues_jump_until_sampled() {
        let mut latch = InputLatch::new();
        latch.pointer_down();
        assert!(latch.sample().jump_pressed);
        assert!(!latch.sample().jump_pressed);
    }

    #[test]
    fn test_strafe_from_keys_and_held_touch() {
        let mut latch = InputLatch::new();
        latch.key_down("KeyA");
        let input = latch.sample();
        assert!(input.move_left && !input.move_right);
        latch.key_up("KeyA");

        latch.touch_start(300.0, 400.0);
        // First sample sees only the jump
        let input = latch.sample();
        assert!(input.jump_pressed && !input.move_right);
        // Still held: now it strafes
        let input = latch.sample();
        assert!(input.move_right && !input.move_left && !input.jump_pressed);
        latch.touch_move(50.0, 400.0);
        assert!(latch.sample().move_left);
        latch.touch_end();
        assert_eq!(latch.sample(), TickInput::default());
    }

    #[test]
    fn test_tap_jumps_without_strafing() {
        let mut latch = InputLatch::new();
        latch.touch_start(10.0, 400.0);
        latch.touch_end();
        let input = latch.sample();
        assert!(input.jump_pressed);
        assert!(!input.move_left && !input.move_right);
        assert_eq!(latch.sample(), TickInput::default());
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut latch = InputLatch::new();
        assert!(!latch.key_down("Escape"));
        assert_eq!(latch.sample(), TickInput::default());
    }
}
