//! Timer shared by whichever state machine currently owns the display.
//!
//! Rolling, settling, holding and the low-battery warning are never in
//! control of the display at the same moment, so they share one mark and one
//! set of blink counters. A fresh button press restarts it.

use crate::tick::Tick;

/// Which half of a blink the display is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Blink {
    /// No blink has happened since the timer was restarted.
    #[default]
    Start,
    Lit,
    Dark,
}

/// Mark and blink counters of the current display phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTimer {
    /// Start of the current sub-phase.
    pub mark: Tick,
    /// Completed blink cycles.
    pub cycles: u8,
    /// Half of the blink currently shown.
    pub blink: Blink,
}

impl PhaseTimer {
    /// Timer marked at tick zero with no blinks.
    pub const fn new() -> Self {
        Self {
            mark: Tick::from_raw(0),
            cycles: 0,
            blink: Blink::Start,
        }
    }

    /// Marks `now` and clears the blink counters.
    pub fn restart(&mut self, now: Tick) {
        self.mark = now;
        self.clear_blinks();
    }

    /// Resets the blink counters, keeping the mark.
    pub fn clear_blinks(&mut self) {
        self.cycles = 0;
        self.blink = Blink::Start;
    }
}
