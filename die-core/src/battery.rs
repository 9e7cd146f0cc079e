//! Low-battery policy.
//!
//! The battery is checked once per activation: the power scheduler re-arms the
//! check every time the die goes fully idle, and the first pass after the next
//! wake takes a reading. A low reading plays a short warning blink that
//! overrides the roll animation, then the monitor goes quiet until the next
//! activation. A battery that stays low repeats the warning on every wake and
//! never escalates further.

use crate::config::Config;
use crate::face::Face;
use crate::phase::{Blink, PhaseTimer};
use crate::tick::{Tick, Ticks};

/// Battery check progress for the current activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryState {
    Ok,
    /// A reading is due on the next pass.
    PendingCheck,
    /// Playing the warning blink; owns the display.
    WarnBlinking,
    /// Warning done for this activation.
    Low,
}

/// Decides when to read the battery and plays the low-battery warning.
#[derive(Debug)]
pub struct BatteryMonitor {
    state: BatteryState,
    threshold: u8,
    interval: Ticks,
    max_cycles: u8,
    warning_face: Face,
}

impl BatteryMonitor {
    /// Starts with a check pending so the battery is read at power-up.
    pub const fn new(config: &Config) -> Self {
        Self {
            state: BatteryState::PendingCheck,
            threshold: config.low_battery_threshold,
            interval: config.warn_interval,
            max_cycles: config.warn_cycles,
            warning_face: config.warning_face,
        }
    }

    /// Current state.
    pub const fn state(&self) -> BatteryState {
        self.state
    }

    /// `true` when the next pass should take a reading.
    pub const fn needs_check(&self) -> bool {
        matches!(self.state, BatteryState::PendingCheck)
    }

    /// `true` while the warning blink owns the display.
    pub const fn is_warning(&self) -> bool {
        matches!(self.state, BatteryState::WarnBlinking)
    }

    /// `true` when `proxy` indicates a low supply.
    pub const fn is_low(&self, proxy: u8) -> bool {
        proxy > self.threshold
    }

    /// Resolves a pending check with a fresh proxy reading.
    pub fn classify(&mut self, proxy: u8) {
        if !self.needs_check() {
            return;
        }
        self.state = if self.is_low(proxy) {
            warn!("battery low (proxy {=u8} > {=u8})", proxy, self.threshold);
            BatteryState::WarnBlinking
        } else {
            debug!("battery ok (proxy {=u8})", proxy);
            BatteryState::Ok
        };
    }

    /// Schedules a reading for the next activation.
    pub fn rearm(&mut self) {
        if !self.is_warning() {
            self.state = BatteryState::PendingCheck;
        }
    }

    /// Advances the warning blink. Returns the face to show when the display
    /// has to change.
    pub fn blink(&mut self, now: Tick, phase: &mut PhaseTimer) -> Option<Face> {
        if !self.is_warning() || now.since(phase.mark) < self.interval {
            return None;
        }
        phase.mark = now;

        match phase.blink {
            Blink::Dark => {
                phase.blink = Blink::Lit;
                Some(self.warning_face)
            }
            Blink::Start | Blink::Lit => {
                phase.blink = Blink::Dark;
                phase.cycles += 1;
                if phase.cycles > self.max_cycles {
                    phase.clear_blinks();
                    self.state = BatteryState::Low;
                    info!("battery warning done");
                }
                Some(Face::BLANK)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> BatteryMonitor {
        BatteryMonitor::new(&Config::new().with_low_battery_threshold(120))
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut battery = monitor();
        battery.classify(120);
        assert_eq!(battery.state(), BatteryState::Ok);

        battery.rearm();
        battery.classify(121);
        assert_eq!(battery.state(), BatteryState::WarnBlinking);
    }

    #[test]
    fn classify_only_acts_when_pending() {
        let mut battery = monitor();
        battery.classify(10);
        battery.classify(250);
        assert_eq!(battery.state(), BatteryState::Ok);
    }

    #[test]
    fn warning_runs_six_cycles_then_goes_low() {
        let mut battery = monitor();
        battery.classify(200);
        let mut phase = PhaseTimer::default();

        let mut toggles = 0;
        let mut counted = 0;
        let mut last_toggle = Tick::from_raw(0);
        let mut now = Tick::from_raw(0);
        while battery.is_warning() {
            now = now.wrapping_add(1);
            if let Some(face) = battery.blink(now, &mut phase) {
                assert!(now.since(last_toggle) >= 2);
                last_toggle = now;
                toggles += 1;
                if face.is_blank() {
                    counted += 1;
                } else {
                    assert_eq!(face, Face::ONE);
                }
            }
            assert!(toggles <= 11);
        }

        assert_eq!(toggles, 11);
        assert_eq!(counted, 6);
        assert_eq!(battery.state(), BatteryState::Low);
        assert_eq!(phase.cycles, 0);
        assert_eq!(phase.blink, Blink::Start);
    }

    #[test]
    fn low_is_inert_until_rearmed() {
        let mut battery = monitor();
        battery.classify(200);
        let mut phase = PhaseTimer::default();
        for raw in 0..100 {
            battery.blink(Tick::from_raw(raw), &mut phase);
        }
        assert_eq!(battery.state(), BatteryState::Low);
        assert_eq!(battery.blink(Tick::from_raw(200), &mut phase), None);

        battery.rearm();
        assert!(battery.needs_check());
    }

    #[test]
    fn rearm_does_not_cut_a_warning_short() {
        let mut battery = monitor();
        battery.classify(200);
        battery.rearm();
        assert!(battery.is_warning());
    }
}
