#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use stled316s::{Frame, ReadTransport, Transport};

/// Records every framed write and answers reads from a fixed register set.
#[derive(Default)]
pub struct RecordingTransport {
    pub frames: Vec<Vec<u8>>,
    pub reads: Vec<u8>,
    pub inits: usize,
    pub registers: [u8; 3],
}

impl RecordingTransport {
    pub fn take_frames(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.frames)
    }
}

impl Transport for RecordingTransport {
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.inits += 1;
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.frames.push(frame.as_bytes().to_vec());
        Ok(())
    }
}

impl ReadTransport for RecordingTransport {
    fn read(&mut self, command: u8) -> Result<u8, Self::Error> {
        self.reads.push(command);
        Ok(self.registers[(command & 0x07) as usize])
    }
}

/// Bus-level model of the chip side of the 3-wire interface.
///
/// Bits are latched LSB first on rising clock edges while strobe is low. A
/// read command switches the chip to driving the data line, one bit per
/// falling clock edge.
#[derive(Default)]
pub struct Chip {
    pub frames: Vec<Vec<u8>>,
    pub registers: [u8; 3],
    pub fail_data: bool,
    pub strobe_low: bool,
    current: Vec<u8>,
    shift: u8,
    bits: u8,
    clk_high: bool,
    dio_host: bool,
    reply: Option<u8>,
    reply_bit: u8,
    dio_chip: bool,
}

impl Chip {
    fn strobe(&mut self, low: bool) {
        if low && !self.strobe_low {
            self.current.clear();
            self.shift = 0;
            self.bits = 0;
            self.reply = None;
        } else if !low && self.strobe_low {
            self.frames.push(std::mem::take(&mut self.current));
        }
        self.strobe_low = low;
    }

    fn clock(&mut self, high: bool) {
        let rising = high && !self.clk_high;
        let falling = !high && self.clk_high;
        self.clk_high = high;
        if !self.strobe_low {
            return;
        }

        if let Some(reply) = self.reply {
            if falling {
                self.dio_chip = reply & (1 << self.reply_bit) != 0;
                self.reply_bit += 1;
            }
        } else if rising {
            if self.dio_host {
                self.shift |= 1 << self.bits;
            }
            self.bits += 1;
            if self.bits == 8 {
                let byte = self.shift;
                self.current.push(byte);
                self.shift = 0;
                self.bits = 0;
                if self.current.len() == 1 && byte & 0x40 != 0 {
                    self.reply = Some(self.registers[(byte & 0x07) as usize]);
                    self.reply_bit = 0;
                }
            }
        }
    }

    fn data_level(&self) -> bool {
        match self.reply {
            Some(_) => self.dio_host && self.dio_chip,
            None => self.dio_host,
        }
    }
}

pub type SharedChip = Rc<RefCell<Chip>>;

pub struct StbPin(pub SharedChip);
pub struct ClkPin(pub SharedChip);
pub struct DioPin(pub SharedChip);

impl ErrorType for StbPin {
    type Error = ErrorKind;
}

impl ErrorType for ClkPin {
    type Error = ErrorKind;
}

impl ErrorType for DioPin {
    type Error = ErrorKind;
}

impl OutputPin for StbPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().strobe(true);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().strobe(false);
        Ok(())
    }
}

impl OutputPin for ClkPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().clock(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().clock(true);
        Ok(())
    }
}

impl DioPin {
    fn drive(&mut self, level: bool) -> Result<(), ErrorKind> {
        let mut chip = self.0.borrow_mut();
        if chip.fail_data {
            return Err(ErrorKind::Other);
        }
        chip.dio_host = level;
        Ok(())
    }
}

impl OutputPin for DioPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

impl InputPin for DioPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow().data_level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().data_level())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub fn pins(chip: &SharedChip) -> (StbPin, ClkPin, DioPin, NoDelay) {
    (
        StbPin(chip.clone()),
        ClkPin(chip.clone()),
        DioPin(chip.clone()),
        NoDelay,
    )
}
