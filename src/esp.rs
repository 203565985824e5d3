use crate::clock::Clock;
use crate::pin::{Direction, SwitchPin};
use embedded_hal::digital::v2::InputPin;
use esp_idf_hal::gpio::{GpioPin, Input, Pin};
use esp_idf_sys::{
    esp, esp_timer_get_time, gpio_mode_t_GPIO_MODE_INPUT, gpio_pull_mode_t_GPIO_FLOATING,
    gpio_pull_mode_t_GPIO_PULLUP_ONLY, gpio_set_direction, gpio_set_pull_mode, EspError,
    ESP_ERR_NOT_SUPPORTED,
};

/// A switch pin driven through the ESP-IDF gpio driver
///
/// Taking a `GpioPin<Input>` means the pin number was already validated by esp-idf-hal.
/// The pin stays an input, asking for an output is refused with `ESP_ERR_NOT_SUPPORTED`.
pub struct EspSwitchPin {
    gpio: GpioPin<Input>,
}

impl EspSwitchPin {
    pub fn new(gpio: GpioPin<Input>) -> Self {
        Self { gpio }
    }

    pub fn free(self) -> GpioPin<Input> {
        self.gpio
    }
}

impl SwitchPin for EspSwitchPin {
    type Error = EspError;

    fn configure_direction(&mut self, direction: Direction) -> Result<(), EspError> {
        match direction {
            Direction::Input => {
                esp!(unsafe { gpio_set_direction(self.gpio.pin(), gpio_mode_t_GPIO_MODE_INPUT) })
            }
            Direction::Output => esp!(ESP_ERR_NOT_SUPPORTED),
        }
    }

    // no output latch doubles as pull-up on esp, map it to the pull mode
    fn set_output_level(&mut self, high: bool) -> Result<(), EspError> {
        let pull = match high {
            true => gpio_pull_mode_t_GPIO_PULLUP_ONLY,
            false => gpio_pull_mode_t_GPIO_FLOATING,
        };

        esp!(unsafe { gpio_set_pull_mode(self.gpio.pin(), pull) })
    }

    fn read_input(&mut self) -> Result<bool, EspError> {
        self.gpio.is_high()
    }
}

/// Milliseconds since boot from the esp high resolution timer, wraps at `u32::MAX`
pub struct EspClock;

impl Clock for EspClock {
    fn now_ms(&self) -> u32 {
        (unsafe { esp_timer_get_time() } / 1000) as u32
    }
}

// runs on target only, needs a free gpio4
#[cfg(test)]
mod tests {
    use super::*;
    use esp_idf_hal::prelude::Peripherals;

    #[test]
    fn stays_an_input_and_reads_through_the_hal() {
        let pins = Peripherals::take().unwrap().pins;
        let mut pin = EspSwitchPin::new(pins.gpio4.into_input().unwrap().degrade());

        assert!(pin.configure_direction(Direction::Input).is_ok());
        assert!(pin.configure_direction(Direction::Output).is_err());
        assert!(pin.set_output_level(true).is_ok());

        let level = pin.read_input().unwrap();
        assert_eq!(level, pin.free().is_high().unwrap());
    }
}
