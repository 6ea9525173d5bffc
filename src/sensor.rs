//! Accelerometer collaborator
//!
//! The core only consumes one `(x, y, tilted)` triple per tick. The
//! [`I2cAccelerometer`] reader talks to the hoop's 2-axis part directly; any
//! other source can implement [`Accelerometer`].

use embedded_hal::i2c::I2c;

/// Bus address of the hoop's accelerometer
pub const ACCEL_I2C_ADDR: u8 = 0x15;

/// First output register; x, y and status follow it
const REG_XOUT: u8 = 0x00;

/// Status bit set by the part while it detects a shake or free-fall
const STATUS_TILT: u8 = 0x10;

/// One reading from the accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelSample {
    /// Acceleration along the x-axis
    pub x: i8,
    /// Acceleration along the y-axis
    pub y: i8,
    /// The reading should not be trusted as a gravity direction
    pub tilted: bool,
}

impl AccelSample {
    pub const fn new(x: i8, y: i8, tilted: bool) -> Self {
        Self { x, y, tilted }
    }

    /// Decode the raw `[x, y, status]` register block
    #[allow(clippy::cast_possible_wrap)]
    pub const fn from_registers(raw: [u8; 3]) -> Self {
        Self {
            x: raw[0] as i8,
            y: raw[1] as i8,
            tilted: raw[2] & STATUS_TILT != 0,
        }
    }
}

/// Source of acceleration samples
///
/// The core performs no retries. A short or malformed read is the
/// implementation's problem to report through `Error`.
pub trait Accelerometer {
    type Error;

    /// Read one sample
    fn sample(&mut self) -> Result<AccelSample, Self::Error>;
}

/// Register-level reader for the hoop's accelerometer
pub struct I2cAccelerometer<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cAccelerometer<I> {
    /// Reader at the default bus address
    pub const fn new(i2c: I) -> Self {
        Self::with_address(i2c, ACCEL_I2C_ADDR)
    }

    pub const fn with_address(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> Accelerometer for I2cAccelerometer<I> {
    type Error = I::Error;

    fn sample(&mut self) -> Result<AccelSample, Self::Error> {
        let mut raw = [0u8; 3];
        self.i2c.write_read(self.address, &[REG_XOUT], &mut raw)?;
        Ok(AccelSample::from_registers(raw))
    }
}
