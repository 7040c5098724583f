pub const MAX_DIGITS: u8 = 6;
pub const MAX_LEDS: u8 = 8;
pub const MAX_BRIGHTNESS: u8 = 7; // 3 bits
pub const DEFAULT_BRIGHTNESS: u8 = 2;
/// Longest framed operation: command byte followed by all six digit registers.
pub const MAX_FRAME_LEN: usize = 1 + MAX_DIGITS as usize;
/// Brightness registers hold two outputs each, one per nibble.
pub const DIGIT_BRIGHTNESS_REGS: usize = MAX_DIGITS as usize / 2;
pub const LED_BRIGHTNESS_REGS: usize = MAX_LEDS as usize / 2;

pub mod command {
    pub const DISPLAY_ON: u8 = 0x0D;
    pub const DISPLAY_OFF: u8 = 0x0E;

    pub const DATA_WRITE: u8 = 0x00; // bit 6 clear: write to the chip
    pub const DATA_READ: u8 = 0x40; // bit 6 set: read from the chip
    pub const ADDR_INCREMENT: u8 = 0x00; // bit 5 clear: pointer advances after each byte
    pub const ADDR_FIXED: u8 = 0x20; // bit 5 set: pointer stays on one register
    pub const PAGE_MASK: u8 = 0x18; // bits 4:3
    pub const ADDRESS_MASK: u8 = 0x07; // bits 2:0
}

pub mod page {
    pub const DIGIT: u8 = 0x00;
    pub const LED: u8 = 0x08;
    pub const CONFIG: u8 = 0x10;
    pub const LED_BRIGHTNESS: u8 = 0x18;
    pub const READ: u8 = 0x08;
}

#[allow(dead_code)]
pub mod register {
    pub const DIGIT_OFFSET: u8 = 0x00; // Digit1 - Digit6 on the digit page
    pub const LED_DATA: u8 = 0x00; // discrete LEDs on the LED page
    pub const CONFIG: u8 = 0x00; // configuration byte, then DIG12, DIG34, DIG56 brightness

    // read page
    pub const READ_LED_DATA: u8 = 0x00;
    pub const KEY_DATA1: u8 = 0x01;
    pub const KEY_DATA2: u8 = 0x02;

    pub mod config {
        pub const BRIGHTNESS_CONSTANT: u8 = 0x18; // bits 4:3 set: one level for every digit
        pub const BRIGHTNESS_VARIABLE: u8 = 0x00; // bits 4:3 clear: per-digit levels
        pub const BRIGHTNESS_SHIFT: u8 = 5; // bits 7:5: constant brightness level
        pub const DIGITS_MASK: u8 = 0x07; // bits 2:0: number of digits - 1
    }
}

/// Output lines SEG1 - SEG8 as they appear in a digit register.
pub mod segment {
    pub const SEG1: u8 = 0x01;
    pub const SEG2: u8 = 0x02;
    pub const SEG3: u8 = 0x04;
    pub const SEG4: u8 = 0x08;
    pub const SEG5: u8 = 0x10;
    pub const SEG6: u8 = 0x20;
    pub const SEG7: u8 = 0x40;
    pub const SEG8: u8 = 0x80;
}
