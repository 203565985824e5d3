use crate::clock::Clock;
use crate::debounce::{SettleTimer, DEFAULT_DEBOUNCE};
use crate::pin::{Direction, SwitchPin};
use core::time::Duration;
use log::{debug, trace};

/// A borrowed notification, called with no arguments
pub type Callback<'a> = &'a mut dyn FnMut();

/// A polled, debounced switch on a single pin
pub struct SwitchMonitor<'a, P, C>
where
    P: SwitchPin,
    C: Clock,
{
    pin: P,
    clock: C,
    invert: bool,
    enabled: bool,
    state: bool,
    held: bool,
    hold_time: u32,
    timer: SettleTimer,
    on_key_down: Option<Callback<'a>>,
    on_key_up: Option<Callback<'a>>,
    on_pressed: Option<Callback<'a>>,
    on_key_held: Option<Callback<'a>>,
}

impl<'a, P, C> SwitchMonitor<'a, P, C>
where
    P: SwitchPin,
    C: Clock,
{
    /// Create a new monitor with the default 25 ms debounce window.
    /// invert: `true` for active-low wiring, the pull-up is enabled on `begin`
    ///
    /// Nothing touches the hardware until `begin` is called.
    ///
    /// # Example - count presses of an active-low button
    /// ```ignore
    /// let mut presses = 0;
    /// let mut count = || presses += 1;
    ///
    /// let mut switch = SwitchMonitor::new(EspSwitchPin::new(gpio), EspClock, true);
    /// switch.on_key_down(Some(&mut count));
    /// switch.begin()?;
    ///
    /// loop {
    ///     switch.update()?;
    /// }
    /// ```
    pub fn new(pin: P, clock: C, invert: bool) -> Self {
        Self::with_debounce(pin, clock, invert, DEFAULT_DEBOUNCE)
    }

    /// Same as `new` with a custom debounce window
    pub fn with_debounce(pin: P, clock: C, invert: bool, debounce: Duration) -> Self {
        Self {
            pin,
            clock,
            invert,
            enabled: false,
            state: false,
            held: false,
            hold_time: 0,
            timer: SettleTimer::new(debounce),
            on_key_down: None,
            on_key_up: None,
            on_pressed: None,
            on_key_held: None,
        }
    }

    /// Configure the pin and take the initial sample.
    pub fn begin(&mut self) -> Result<(), P::Error> {
        self.pin.configure_direction(Direction::Input)?;
        if self.invert {
            self.pin.set_output_level(true)?;
        }

        let raw = self.read_raw()?;
        self.state = raw;
        self.timer.arm(raw, self.clock.now_ms());
        self.enabled = true;

        trace!("switch monitor enabled, initial state {}", raw);
        Ok(())
    }

    /// Sample the pin once and fire whatever callbacks are due.
    /// Does nothing until `begin` was called.
    pub fn update(&mut self) -> Result<(), P::Error> {
        if !self.enabled {
            return Ok(());
        }

        let raw = self.read_raw()?;
        let now = self.clock.now_ms();

        let elapsed = match self.timer.sample(raw, now) {
            Some(elapsed) => elapsed,
            None => return Ok(()),
        };

        if raw != self.state {
            self.state = raw;

            if self.state {
                debug!("switch down");
                notify(&mut self.on_key_down);
            } else {
                debug!("switch up");
                self.held = false;
                notify(&mut self.on_key_up);
            }
        }

        if self.state {
            notify(&mut self.on_pressed);
        }

        // held is timed from the last raw change, same base as the debounce window
        if elapsed >= self.hold_time && raw != self.held {
            self.held = raw;

            if self.held {
                debug!("switch held for {} ms", elapsed);
                notify(&mut self.on_key_held);
            }
        }

        Ok(())
    }

    pub fn is_key_down(&self) -> bool {
        self.state
    }

    pub fn is_key_up(&self) -> bool {
        !self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.state
    }

    pub fn is_key_held(&self) -> bool {
        self.held
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hold_time(&self) -> u32 {
        self.hold_time
    }

    /// Called once when the switch settles pressed
    pub fn on_key_down(&mut self, callback: Option<Callback<'a>>) {
        self.on_key_down = callback;
    }

    /// Called once when the switch settles released
    pub fn on_key_up(&mut self, callback: Option<Callback<'a>>) {
        self.on_key_up = callback;
    }

    /// Called on every settled poll while the switch is pressed
    pub fn on_pressed(&mut self, callback: Option<Callback<'a>>) {
        self.on_pressed = callback;
    }

    /// Called once when the switch has been down for `hold_time` ms
    pub fn on_key_held(&mut self, callback: Option<Callback<'a>>, hold_time: u32) {
        self.on_key_held = callback;
        self.hold_time = hold_time;
    }

    /// Give back the pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn read_raw(&mut self) -> Result<bool, P::Error> {
        let level = self.pin.read_input()?;
        Ok(level != self.invert)
    }
}

fn notify(callback: &mut Option<Callback<'_>>) {
    if let Some(callback) = callback.as_deref_mut() {
        callback();
    }
}
