//! Tick source scheduling.
//!
//! The tick source is the only thing that wakes the die periodically, so it is
//! the main power cost while the die sits on a table. It is switched off as
//! soon as nothing time-based is running and switched back on the first pass
//! after a button wake. With it off, the die sleeps until the next button edge.

use crate::battery::BatteryMonitor;
use crate::hal::DieHal;

/// State of the periodic wake source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickSource {
    Enabled,
    Disabled,
}

/// Snapshot of everything that needs ticks to make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    /// Button line is physically down right now.
    pub button_down: bool,
    /// Debouncer has settled on released.
    pub button_settled: bool,
    /// Animation is somewhere other than idle.
    pub animating: bool,
    /// Low-battery warning is playing.
    pub battery_warning: bool,
}

impl Activity {
    /// `true` when nothing needs the tick source.
    pub const fn is_idle(&self) -> bool {
        !self.button_down && self.button_settled && !self.animating && !self.battery_warning
    }
}

/// Switches the tick source on and off as the die becomes busy or idle.
#[derive(Debug)]
pub struct PowerScheduler {
    source: TickSource,
}

impl Default for PowerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerScheduler {
    /// Assumes the tick source is off until [`enable`](Self::enable) is called.
    pub const fn new() -> Self {
        Self {
            source: TickSource::Disabled,
        }
    }

    /// State the tick source was last switched to.
    pub const fn tick_source(&self) -> TickSource {
        self.source
    }

    /// Turns the tick source on unless it already is.
    pub fn enable<H: DieHal>(&mut self, hal: &mut H) {
        if self.source == TickSource::Disabled {
            hal.enable_tick_source();
            self.source = TickSource::Enabled;
            trace!("tick source on");
        }
    }

    fn disable<H: DieHal>(&mut self, hal: &mut H) {
        if self.source == TickSource::Enabled {
            hal.disable_tick_source();
            self.source = TickSource::Disabled;
            trace!("tick source off");
        }
    }

    /// Decides whether the tick source stays on for the coming sleep.
    ///
    /// While fully idle the battery check is re-armed so the next wake reads
    /// the battery before any roll can start.
    pub fn evaluate<H: DieHal>(
        &mut self,
        activity: Activity,
        battery: &mut BatteryMonitor,
        hal: &mut H,
    ) -> TickSource {
        if activity.is_idle() {
            self.disable(hal);
            battery.rearm();
        } else {
            self.enable(hal);
        }
        self.source
    }
}
