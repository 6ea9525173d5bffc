//! Compile-time tunables
//!
//! The hoop has no runtime configuration. Everything that shapes the
//! simulation or the strip lives here.

use crate::color::Rgb;

/// Number of LEDs on the ring
pub const N_LEDS: usize = 60;

/// Bytes needed to pack one on/off flag per LED
pub const FLAG_BYTES: usize = N_LEDS.div_ceil(8);

/// Number of simulated particles
pub const N_PARTICLES: usize = 5;

/// Most LEDs that may be lit in a single frame.
///
/// The regulator on the hoop cannot supply more than this, so extra
/// requests are dropped.
pub const MAX_LIT_LEDS: usize = 8;

/// Color sent to every lit LED after power-on (very low white)
pub const DEFAULT_COLOR: Rgb = Rgb {
    r: 0x10,
    g: 0x10,
    b: 0x10,
};

/// Consecutive samples needed to enter or leave the fully tilted state
pub const MAX_TILT_COUNT: u8 = 10;

/// Scale applied to a raw 8-bit sample before it enters an accumulator
///
/// 256 maps the sample onto the full `i16` range, the extra 1/4 is the
/// moving average weight of the new sample.
pub const ACCEL_SAMPLE_SCALE: i16 = 64;

/// Velocity bound in both directions
pub const MAX_VELOCITY: i16 = 10_000;

/// Right shift applied to the angular distance to the down-angle
pub const GRAVITY_SHIFT: u32 = 8;

/// Right shift applied to a velocity before it moves a position
pub const VELOCITY_SHIFT: u32 = 4;

/// Energy kept by both particles after a collision, Q15 (0.8)
pub const COLLISION_DAMPING_Q15: i16 = 26_214;

/// Rate of the sense, step and render loop
pub const TICK_RATE_HZ: u64 = 60;
