//! The control loop.
//!
//! One [`Die`] owns every piece of state. Each [`step`](Die::step) is one pass
//! of the loop followed by the single suspension point, the sleep call.

use crate::animator::{DieAnimator, RollPhase};
use crate::battery::{BatteryMonitor, BatteryState};
use crate::button::{ButtonState, Debouncer, Press};
use crate::config::Config;
use crate::face::Face;
use crate::hal::{DieHal, Wake};
use crate::phase::PhaseTimer;
use crate::power::{Activity, PowerScheduler, TickSource};
use crate::rng::Rng;
use crate::tick::{Tick, TickClock};

/// What drives the display this pass, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayOwner {
    BatteryWarning,
    Rolling,
    Settling,
    Steady,
    Idle,
}

/// The whole die: button, battery, animation and power state driven by one
/// loop over a [`DieHal`].
#[derive(Debug)]
pub struct Die {
    clock: TickClock,
    rng: Rng,
    button: Debouncer,
    battery: BatteryMonitor,
    animator: DieAnimator,
    timer: PhaseTimer,
    power: PowerScheduler,
}

impl Die {
    /// Creates a die at tick zero with a battery check pending.
    ///
    /// Nothing touches the hardware until [`start`](Self::start).
    ///
    /// # Arguments
    ///
    /// * `config` - Timings and low-battery threshold
    pub const fn new(config: Config) -> Self {
        Self {
            clock: TickClock::new(),
            rng: Rng::new(),
            button: Debouncer::new(config.debounce),
            battery: BatteryMonitor::new(&config),
            animator: DieAnimator::new(&config),
            timer: PhaseTimer::new(),
            power: PowerScheduler::new(),
        }
    }

    /// Power-up: blanks the display, stirs the generator with an analog
    /// reading and starts the tick source.
    pub async fn start<H: DieHal>(&mut self, hal: &mut H) {
        hal.set_display(Face::BLANK);
        let rounds = hal.battery_proxy().await;
        self.rng.warm_up(rounds);
        self.power.enable(hal);
        info!("die ready (warm-up {=u8})", rounds);
    }

    /// Runs the die forever.
    pub async fn run<H: DieHal>(&mut self, hal: &mut H) {
        self.start(hal).await;
        loop {
            self.step(hal).await;
        }
    }

    /// One loop pass, the power decision, then sleep until the next wake.
    pub async fn step<H: DieHal>(&mut self, hal: &mut H) -> Wake {
        self.pass(hal).await;
        self.schedule(hal);

        let wake = hal.sleep_until_wake().await;
        if wake == Wake::Tick {
            self.clock.advance();
        }
        wake
    }

    /// Updates the button, battery and animation without sleeping.
    pub async fn pass<H: DieHal>(&mut self, hal: &mut H) {
        let now = self.clock.now();

        let pressed = hal.button_pressed();
        match self.button.update(pressed, now) {
            Press::Edge => {
                self.timer.restart(now);
                self.animator.press();
            }
            Press::Held => self.animator.press(),
            Press::None => {}
        }

        if self.battery.needs_check() {
            let proxy = hal.battery_proxy().await;
            self.battery.classify(proxy);
        }

        let face = match self.display_owner() {
            DisplayOwner::BatteryWarning => self.battery.blink(now, &mut self.timer),
            DisplayOwner::Rolling | DisplayOwner::Settling | DisplayOwner::Steady => {
                self.animator.advance(now, &mut self.timer, &mut self.rng)
            }
            DisplayOwner::Idle => None,
        };
        if let Some(face) = face {
            hal.set_display(face);
        }
    }

    /// Switches the tick source for the coming sleep.
    pub fn schedule<H: DieHal>(&mut self, hal: &mut H) -> TickSource {
        let activity = Activity {
            button_down: hal.button_pressed(),
            button_settled: self.button.is_released(),
            animating: !self.animator.is_idle(),
            battery_warning: self.battery.is_warning(),
        };
        self.power.evaluate(activity, &mut self.battery, hal)
    }

    /// State machine that drives the display on the next pass.
    pub const fn display_owner(&self) -> DisplayOwner {
        if self.battery.is_warning() {
            return DisplayOwner::BatteryWarning;
        }
        match self.animator.phase() {
            RollPhase::Rolling => DisplayOwner::Rolling,
            RollPhase::Settling => DisplayOwner::Settling,
            RollPhase::Steady => DisplayOwner::Steady,
            RollPhase::Idle => DisplayOwner::Idle,
        }
    }

    /// Current tick. Frozen while the tick source is off.
    pub const fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Phase of the roll animation.
    pub const fn roll_phase(&self) -> RollPhase {
        self.animator.phase()
    }

    /// Index of the roll delay currently being waited out.
    pub const fn roll_step(&self) -> usize {
        self.animator.step()
    }

    /// Last face animated or rolled.
    pub const fn face(&self) -> Face {
        self.animator.face()
    }

    /// Low-battery monitor state.
    pub const fn battery(&self) -> BatteryState {
        self.battery.state()
    }

    /// Debounced button state.
    pub const fn button(&self) -> ButtonState {
        self.button.state()
    }

    /// Whether the tick source is on for the coming sleep.
    pub const fn tick_source(&self) -> TickSource {
        self.power.tick_source()
    }
}
