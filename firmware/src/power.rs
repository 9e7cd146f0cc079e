//! Wake sources for the die loop.
//!
//! The die sleeps between loop passes. Two things can end a sleep:
//!
//! - the 16 ms tick, an embassy-time [`Ticker`] that only exists while the
//!   control loop has the tick source enabled
//! - any edge on the button's EXTI line
//!
//! With the ticker dropped there is no pending timer, so the executor stays in
//! its low-power wait until the button moves. That is where the battery life
//! comes from.

use die_core::{TICK_MS, Wake};
use embassy_futures::select::{Either, select};
use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Ticker};

/// Period of the tick source.
const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS as u64);

/// Tick source plus the sleep that waits on it and the button.
#[derive(Default)]
pub struct WakeSources {
    /// Present while the tick source is enabled
    ticker: Option<Ticker>,
}

impl WakeSources {
    /// Creates the wake sources with the tick source disabled.
    pub const fn new() -> Self {
        Self { ticker: None }
    }

    /// Starts ticking, one period from now. Does nothing if already ticking.
    pub fn enable_tick(&mut self) {
        if self.ticker.is_none() {
            #[cfg(feature = "debug-mode")]
            defmt::debug!("Tick source enabled");

            self.ticker = Some(Ticker::every(TICK_PERIOD));
        }
    }

    /// Stops ticking. Only a button edge can wake the die afterwards.
    pub fn disable_tick(&mut self) {
        #[cfg(feature = "debug-mode")]
        defmt::debug!("Tick source disabled");

        self.ticker = None;
    }

    /// Sleeps until the next tick or button edge.
    ///
    /// A tick that came due while the loop was busy completes immediately,
    /// since [`Ticker`] keeps its schedule rather than restarting on each wait.
    ///
    /// Without a ticker the die is idle, which implies the button was up when
    /// the loop last sampled it. The EXTI line is only armed on the first poll,
    /// so a press landing before that would leave no edge to wait for. Waiting
    /// on the low level instead returns at once for a press already down.
    ///
    /// # Arguments
    ///
    /// * `button` - Button EXTI input whose edges wake the die
    pub async fn wait(&mut self, button: &mut ExtiInput<'static>) -> Wake {
        match self.ticker.as_mut() {
            Some(ticker) => match select(ticker.next(), button.wait_for_any_edge()).await {
                Either::First(()) => Wake::Tick,
                Either::Second(()) => Wake::Button,
            },
            None => {
                button.wait_for_low().await;
                Wake::Button
            }
        }
    }
}
