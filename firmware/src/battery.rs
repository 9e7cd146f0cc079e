//! Battery proxy measurement.
//!
//! The die runs straight off a coin cell with no divider, so the supply can't
//! be measured directly. Instead the ADC converts the fixed internal reference
//! (VREFINT, about 1.224 V) using the supply itself as its full-scale
//! reference. As the cell sags, the same 1.224 V becomes a larger fraction of
//! full scale:
//!
//! ```text
//! reading = 255 * VREFINT / VDDA
//! ```
//!
//! so higher readings mean a weaker battery. The reading is taken at 8-bit
//! resolution to match the control loop's proxy threshold.

use embassy_stm32::adc::{self, Adc, Resolution, SampleTime, Vref};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::{Peri, bind_interrupts};

bind_interrupts!(struct Irqs {
    ADC1_COMP => adc::InterruptHandler<ADC1>;
});

/// ADC configured to sample VREFINT against the supply.
pub struct BatteryProbe {
    adc: Adc<'static, ADC1>,
    vref: Vref,
}

impl BatteryProbe {
    /// Configures ADC1 for 8-bit VREFINT conversions.
    ///
    /// Uses the longest sample time, as the reference channel needs it.
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC1 peripheral
    pub fn new(adc: Peri<'static, ADC1>) -> Self {
        let mut adc = Adc::new(adc, Irqs);
        adc.set_resolution(Resolution::BITS8);
        adc.set_sample_time(SampleTime::CYCLES160_5);
        let vref = adc.enable_vref();
        Self { adc, vref }
    }

    /// Takes one proxy reading.
    pub async fn sample(&mut self) -> u8 {
        let raw = self.adc.read(&mut self.vref).await;

        #[cfg(feature = "debug-mode")]
        defmt::debug!("VREFINT reading {=u16}", raw);

        // 8-bit conversions never exceed 255.
        raw.min(u8::MAX.into()) as u8
    }
}
