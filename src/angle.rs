//! Turn-scaled angles
//!
//! One full turn is 65536 units ("brads"), so the whole `u16` range is one
//! revolution and plain wrapping arithmetic is modular arithmetic.

/// Fraction of one full turn, wrapping at 65536
pub type Angle = u16;

/// Signed angular rate in the same units as [`Angle`]
pub type Velocity = i16;

/// Units in one full turn
pub const TURN: u32 = 1 << 16;

/// Units in half a turn
pub const HALF_TURN: Angle = 1 << 15;

/// Units in a quarter turn
pub const QUARTER_TURN: Angle = 1 << 14;

/// Angular spacing of two adjacent LEDs on a ring of `leds` LEDs
#[allow(clippy::cast_possible_truncation)]
pub const fn led_pitch(leds: usize) -> Angle {
    (TURN / leds as u32) as Angle
}

/// Signed distance along the shorter arc from `from` to `to`
///
/// Positive means counting up from `from` reaches `to` first. Exactly half a
/// turn is ambiguous and reported as zero.
#[allow(clippy::cast_possible_wrap)]
pub const fn shorter_arc(from: Angle, to: Angle) -> i32 {
    let forward = to.wrapping_sub(from);
    if forward == HALF_TURN {
        0
    } else if forward > HALF_TURN {
        -((TURN - forward as u32) as i32)
    } else {
        forward as i32
    }
}

