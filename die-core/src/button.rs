//! Release debouncing for the roll button.
//!
//! The line is sampled on every loop pass, so a press is never missed and is
//! acted on immediately. Only the release is filtered: the button reads as
//! released once it has stayed up for the debounce window.

use crate::tick::{Tick, Ticks};

/// Debounced state of the button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    #[default]
    NotPressed,
    Pressed,
    /// Released, waiting out contact bounce.
    Debouncing,
}

/// What a sample of the button line means for this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Button is up.
    None,
    /// First pass of a new press after a settled release.
    Edge,
    /// Button is down and was already down (or bouncing) before.
    Held,
}

/// Tracks presses and filters contact bounce after release.
#[derive(Debug)]
pub struct Debouncer {
    state: ButtonState,
    released_at: Tick,
    window: Ticks,
}

impl Debouncer {
    /// Debouncer for a button that starts released.
    ///
    /// # Arguments
    ///
    /// * `window` - Ticks the button must stay up before it reads as released
    pub const fn new(window: Ticks) -> Self {
        Self {
            state: ButtonState::NotPressed,
            released_at: Tick::from_raw(0),
            window,
        }
    }

    /// Current debounced state.
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// `true` once the release has settled.
    pub const fn is_released(&self) -> bool {
        matches!(self.state, ButtonState::NotPressed)
    }

    /// Feeds one sample of the button line taken at `now`.
    pub fn update(&mut self, pressed: bool, now: Tick) -> Press {
        if pressed {
            let press = match self.state {
                ButtonState::NotPressed => Press::Edge,
                ButtonState::Pressed | ButtonState::Debouncing => Press::Held,
            };
            self.state = ButtonState::Pressed;
            return press;
        }

        match self.state {
            ButtonState::Pressed => {
                self.released_at = now;
                self.state = ButtonState::Debouncing;
            }
            ButtonState::Debouncing if now.since(self.released_at) >= self.window => {
                self.state = ButtonState::NotPressed;
            }
            _ => {}
        }
        Press::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Ticks = 3;

    fn at(raw: u8) -> Tick {
        Tick::from_raw(raw)
    }

    #[test]
    fn press_is_immediate() {
        let mut button = Debouncer::new(WINDOW);
        assert_eq!(button.update(true, at(0)), Press::Edge);
        assert_eq!(button.state(), ButtonState::Pressed);
        assert_eq!(button.update(true, at(1)), Press::Held);
    }

    #[test]
    fn release_settles_after_window() {
        let mut button = Debouncer::new(WINDOW);
        button.update(true, at(10));
        assert_eq!(button.update(false, at(11)), Press::None);
        assert_eq!(button.state(), ButtonState::Debouncing);
        button.update(false, at(13));
        assert_eq!(button.state(), ButtonState::Debouncing);
        button.update(false, at(14));
        assert!(button.is_released());
    }

    #[test]
    fn bounce_during_release_is_not_a_new_edge() {
        let mut button = Debouncer::new(WINDOW);
        button.update(true, at(0));
        button.update(false, at(1));
        assert_eq!(button.update(true, at(2)), Press::Held);
        assert_eq!(button.state(), ButtonState::Pressed);
    }

    #[test]
    fn release_window_spans_wraparound() {
        let mut button = Debouncer::new(WINDOW);
        button.update(true, at(250));
        button.update(false, at(254));
        button.update(false, at(0));
        assert_eq!(button.state(), ButtonState::Debouncing);
        button.update(false, at(1));
        assert!(button.is_released());
        assert_eq!(button.update(true, at(2)), Press::Edge);
    }
}
