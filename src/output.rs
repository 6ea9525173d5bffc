//! Output through an existing `smart-leds` driver
//!
//! Peripheral-driven strips (PIO, SPI, RMT) keep their own timing, so the
//! frame is expanded to one color per LED and handed over as is.

use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::Rgb;
use crate::frame::Frame;

/// Adapter from any [`SmartLedsWrite`] driver to [`OutputDriver`]
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn release(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    type Error = W::Error;

    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.writer.write(frame.pixels())
    }
}
