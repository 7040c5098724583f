use crate::constants::{DIGIT_BRIGHTNESS_REGS, LED_BRIGHTNESS_REGS, MAX_BRIGHTNESS, MAX_DIGITS};

/// Local mirror of the chip memory the driver writes to.
///
/// The LED data and brightness registers cannot be read back, so every
/// update to them is a read-modify-write on this copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayBuffer {
    digits: [u8; MAX_DIGITS as usize],
    dp_mask: u8,
    led_state: u8,
    digit_brightness: [u8; DIGIT_BRIGHTNESS_REGS],
    led_brightness: [u8; LED_BRIGHTNESS_REGS],
}

impl DisplayBuffer {
    pub const fn new() -> Self {
        Self {
            digits: [0; MAX_DIGITS as usize],
            dp_mask: 0,
            led_state: 0,
            digit_brightness: [0; DIGIT_BRIGHTNESS_REGS],
            led_brightness: [0; LED_BRIGHTNESS_REGS],
        }
    }

    pub fn digits(&self) -> &[u8; MAX_DIGITS as usize] {
        &self.digits
    }

    pub fn digit(&self, index: usize) -> u8 {
        self.digits[index]
    }

    /// Stores `pattern` for digit `index`, forcing on the DP line if that
    /// digit's decimal point is set.
    pub fn set_digit(&mut self, index: usize, pattern: u8, dp: u8) {
        self.digits[index] = if self.dp_mask & (1 << index) != 0 {
            pattern | dp
        } else {
            pattern
        };
    }

    pub fn set_dp(&mut self, index: usize, state: bool, dp: u8) {
        if state {
            self.dp_mask |= 1 << index;
            self.digits[index] |= dp;
        } else {
            self.dp_mask &= !(1 << index);
            self.digits[index] &= !dp;
        }
    }

    pub fn dp_mask(&self) -> u8 {
        self.dp_mask
    }

    /// Blanks every digit. The decimal point mask is kept and comes back with
    /// the next content write.
    pub fn clear(&mut self) {
        self.digits = [0; MAX_DIGITS as usize];
    }

    pub fn led_state(&self) -> u8 {
        self.led_state
    }

    /// Switches the LEDs selected by `mask` and returns the new register value.
    pub fn update_leds(&mut self, mask: u8, state: bool) -> u8 {
        if state {
            self.led_state |= mask;
        } else {
            self.led_state &= !mask;
        }
        self.led_state
    }

    pub fn digit_brightness(&self) -> &[u8; DIGIT_BRIGHTNESS_REGS] {
        &self.digit_brightness
    }

    pub fn led_brightness(&self) -> &[u8; LED_BRIGHTNESS_REGS] {
        &self.led_brightness
    }

    /// Sets the level of one output in a paired brightness bank, or all of
    /// them when `output` is `None`. Outputs are 0-based; even outputs use the
    /// low nibble of their register.
    pub fn set_digit_brightness(&mut self, output: Option<usize>, level: u8) {
        set_nibble(&mut self.digit_brightness, output, level);
    }

    pub fn set_led_brightness(&mut self, output: Option<usize>, level: u8) {
        set_nibble(&mut self.led_brightness, output, level);
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn set_nibble(bank: &mut [u8], output: Option<usize>, level: u8) {
    let level = level & MAX_BRIGHTNESS;
    match output {
        None => bank.fill(level << 4 | level),
        Some(output) => {
            let Some(reg) = bank.get_mut(output / 2) else {
                return;
            };
            *reg = if output % 2 == 0 {
                (*reg & 0xF0) | level
            } else {
                level << 4 | (*reg & 0x0F)
            };
        }
    }
}
