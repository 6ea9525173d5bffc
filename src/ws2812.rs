//! Bit-banged WS2812 transmission
//!
//! Each bit is one 1.25 µs period, high then low. The share of the period
//! spent high carries the bit: about a third for `0`, about two thirds for
//! `1`. After the last bit the line must idle low for the latch interval
//! before the strip shows the frame.
//!
//! The whole frame is sent inside a critical section. Any interrupt mid-frame
//! stretches a pulse and corrupts every LED after it.
//!
//! The pulse widths assume `delay` and the pin writes are cycle-exact on the
//! target. On a part where they are not, the timing has to be re-checked with
//! a logic analyzer, or a peripheral driver used through
//! [`SmartLedsOutput`](crate::output::SmartLedsOutput).

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::OutputDriver;
use crate::color::wire_order;
use crate::frame::Frame;

/// Length of one bit on the wire
pub const BIT_PERIOD_NS: u32 = 1250;

/// High time of a `0` bit (32% of the period)
pub const ZERO_HIGH_NS: u32 = 400;

/// High time of a `1` bit (64% of the period)
pub const ONE_HIGH_NS: u32 = 800;

/// Minimum low time after a frame
pub const LATCH_US: u32 = 50;

/// [`LATCH_US`] as a duration
#[allow(clippy::cast_lossless)]
pub const LATCH_INTERVAL: Duration = Duration::from_micros(LATCH_US as u64);

/// High time used to send `bit`
#[inline(always)]
pub const fn high_time_ns(bit: bool) -> u32 {
    if bit { ONE_HIGH_NS } else { ZERO_HIGH_NS }
}

/// WS2812 strip on a single GPIO line
pub struct Ws2812<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Ws2812<P, D> {
    /// Take the line and drive it low
    pub fn new(mut pin: P, delay: D) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin, delay })
    }

    /// Give the line and delay back
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    #[inline(always)]
    fn write_bit(&mut self, bit: bool) -> Result<(), P::Error> {
        let high = high_time_ns(bit);
        self.pin.set_high()?;
        self.delay.delay_ns(high);
        self.pin.set_low()?;
        self.delay.delay_ns(BIT_PERIOD_NS - high);
        Ok(())
    }

    #[inline(always)]
    fn write_byte(&mut self, mut data: u8) -> Result<(), P::Error> {
        for _ in 0..8 {
            self.write_bit(data & 0x80 != 0)?;
            data <<= 1;
        }
        Ok(())
    }

    /// Every LED, first LED first, three wire-order bytes each
    fn write_pixels(&mut self, frame: &Frame) -> Result<(), P::Error> {
        for pixel in frame.pixels() {
            for byte in wire_order(pixel) {
                self.write_byte(byte)?;
            }
        }
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> OutputDriver for Ws2812<P, D> {
    type Error = P::Error;

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        critical_section::with(|_| self.write_pixels(frame))?;

        // Latch with interrupts back on
        self.pin.set_low()?;
        self.delay.delay_us(LATCH_US);
        Ok(())
    }
}
