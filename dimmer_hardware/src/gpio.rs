//! Raspberry Pi GPIO backends (feature `hardware`).

use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};

use crate::error::HwError;
use dimmer_traits::TriggerLine;

/// TRIAC gate drive on a GPIO output pin, active high.
pub struct GpioTriggerLine {
    pin: OutputPin,
}

impl GpioTriggerLine {
    pub fn new(pin: u8) -> Result<Self, HwError> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut pin = gpio
            .get(pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_output();
        pin.set_low();
        Ok(Self { pin })
    }
}

impl TriggerLine for GpioTriggerLine {
    #[inline]
    fn set_active(&mut self) {
        self.pin.set_high();
    }

    #[inline]
    fn set_inactive(&mut self) {
        self.pin.set_low();
    }
}

/// Zero-crossing input: runs `on_edge` from the GPIO interrupt callback on
/// each falling edge of the detector signal. Dropping this releases the
/// interrupt registration.
pub struct ZeroCrossInput {
    _pin: InputPin,
}

impl ZeroCrossInput {
    pub fn new<F>(pin: u8, mut on_edge: F) -> Result<Self, HwError>
    where
        F: FnMut() + Send + 'static,
    {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut pin = gpio
            .get(pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_input();
        pin.set_async_interrupt(Trigger::FallingEdge, move |_level| on_edge())
            .map_err(|e| HwError::Gpio(e.to_string()))?;
        Ok(Self { _pin: pin })
    }
}
