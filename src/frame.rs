//! One frame of LED data
//!
//! The strip only ever shows one color, so a frame is a packed on/off flag
//! per LED plus a single shared color instead of three bytes per LED.

use heapless::Vec;

use crate::angle::{Angle, TURN};
use crate::color::{BLACK, Rgb};
use crate::config::{DEFAULT_COLOR, FLAG_BYTES, MAX_LIT_LEDS, N_LEDS};

/// Outcome of [`Frame::mark`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// The LED was switched on
    Lit(usize),
    /// The LED was already on; nothing counted
    AlreadyLit(usize),
    /// The lit budget is used up; the request was ignored
    Dropped(usize),
}

/// LED nearest to `angle`
///
/// Rounds to the nearest LED by adding half a pitch before truncating, and
/// wraps the index that rounds past the last LED back to 0.
#[allow(clippy::cast_possible_truncation)]
pub const fn led_index(angle: Angle) -> usize {
    let scaled = (angle as u32 * N_LEDS as u32 + TURN / 2) >> 16;
    scaled as usize % N_LEDS
}

/// Packed lit flags and the shared color
#[derive(Debug, Clone)]
pub struct Frame {
    flags: [u8; FLAG_BYTES],
    lit: Vec<u8, MAX_LIT_LEDS>,
    color: Rgb,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Empty frame with the default color
    pub const fn new() -> Self {
        Self::with_color(DEFAULT_COLOR)
    }

    pub const fn with_color(color: Rgb) -> Self {
        Self {
            flags: [0; FLAG_BYTES],
            lit: Vec::new(),
            color,
        }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Change the color shown by every lit LED
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Switch every LED off
    pub fn clear(&mut self) {
        self.flags = [0; FLAG_BYTES];
        self.lit.clear();
    }

    /// Light the LED nearest to `angle`
    pub fn mark(&mut self, angle: Angle) -> Mark {
        self.mark_led(led_index(angle))
    }

    /// Light LED `index`
    ///
    /// Out-of-range indices and requests past the lit budget are dropped
    /// without touching the flags.
    #[allow(clippy::cast_possible_truncation)]
    pub fn mark_led(&mut self, index: usize) -> Mark {
        if index >= N_LEDS {
            return Mark::Dropped(index);
        }
        if self.is_lit(index) {
            return Mark::AlreadyLit(index);
        }
        if self.lit.push(index as u8).is_err() {
            return Mark::Dropped(index);
        }
        self.flags[index / 8] |= 1 << (index % 8);
        Mark::Lit(index)
    }

    pub fn is_lit(&self, index: usize) -> bool {
        index < N_LEDS && self.flags[index / 8] & (1 << (index % 8)) != 0
    }

    /// Number of LEDs currently on
    pub fn lit_count(&self) -> usize {
        self.lit.len()
    }

    /// Lit LED indices in the order they were marked
    pub fn lit(&self) -> impl Iterator<Item = usize> + '_ {
        self.lit.iter().map(|&index| usize::from(index))
    }

    /// Color of LED `index` as it goes on the wire
    pub fn pixel(&self, index: usize) -> Rgb {
        if self.is_lit(index) { self.color } else { BLACK }
    }

    /// Every LED's color in physical order
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        (0..N_LEDS).map(|index| self.pixel(index))
    }
}
