use embedded_hal::digital::v2::InputPin;

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// The GPIO capability a switch monitor needs from its pin.
///
/// An implementation owns exactly one physical pin. Resolving and validating
/// the pin happens when the implementation is constructed, not here.
pub trait SwitchPin {
    type Error;

    fn configure_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;

    /// Drive the output latch.
    /// While the pin is an input this enables (`true`) or disables the pull-up.
    fn set_output_level(&mut self, high: bool) -> Result<(), Self::Error>;

    fn read_input(&mut self) -> Result<bool, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalPinError<E> {
    /// The wrapped pin is an input by type, it cannot become an output
    Unsupported,
    Pin(E),
}

/// Adapts any `embedded-hal` input pin.
///
/// Direction and pull resistors are fixed by the HAL's type state, so configure
/// the pull-up on the HAL side before wrapping an active-low switch.
pub struct HalInputPin<P> {
    pin: P,
}

impl<P: InputPin> HalInputPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: InputPin> SwitchPin for HalInputPin<P> {
    type Error = HalPinError<P::Error>;

    fn configure_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Input => Ok(()),
            Direction::Output => Err(HalPinError::Unsupported),
        }
    }

    fn set_output_level(&mut self, _high: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn read_input(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high().map_err(HalPinError::Pin)
    }
}
