//! Input latching
//!
//! Key events arrive between ticks; the latch turns them into one
//! `TickInput` per tick. Movement keys act while held. Turning and firing
//! act once per press. Quit never clears.

use crate::sim::TickInput;

/// Logical game buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held_up: bool,
    held_down: bool,
    pending: TickInput,
    quit: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::Up => self.held_up = true,
            Button::Down => self.held_down = true,
            Button::Left => self.pending.turn_left = true,
            Button::Right => self.pending.turn_right = true,
            Button::Fire => self.pending.fire = true,
            Button::Quit => {
                if !self.quit {
                    log::debug!("Quit requested");
                }
                self.quit = true;
            }
        }
    }

    /// Releasing a one-shot button does not cancel a press not yet consumed
    pub fn release(&mut self, button: Button) {
        match button {
            Button::Up => self.held_up = false,
            Button::Down => self.held_down = false,
            Button::Left | Button::Right | Button::Fire | Button::Quit => {}
        }
    }

    /// Commands for the next tick; one-shot presses are consumed
    pub fn take(&mut self) -> TickInput {
        let one_shot = std::mem::take(&mut self.pending);
        TickInput {
            forward: self.held_up,
            backward: self.held_down,
            ..one_shot
        }
    }

    pub fn quit(&self) -> bool {
        self.quit
    }
}
