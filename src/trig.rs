//! Fixed-point four-quadrant arctangent
//!
//! Uses the polynomial approximation
//!
//! ```text
//! atan(r) ~= r * (pi/4 + 0.273 * (1 - |r|))        radians, |r| <= 1
//!         ~= r * (K2 + K1 * -|r|)                  turns * 65536
//! ```
//!
//! with `K1 = 0.273 / 2pi` and `K2 = 1/8 + K1`, both scaled so that one
//! full turn is 65536. Ratios are Q15.

use crate::angle::{Angle, HALF_TURN, QUARTER_TURN};

/// `0.273 / 2pi` of a turn
const K1: i16 = 2847;
/// `1/8 + 0.273 / 2pi` of a turn
const K2: i16 = K1 + 8192;

/// 1/8 turn
const EIGHTH_TURN: Angle = 8192;
/// 5/8 turn
const FIVE_EIGHTHS_TURN: Angle = 40960;
/// 3/4 turn
const THREE_QUARTER_TURN: Angle = 49152;

/// Negative absolute value
///
/// Never overflows, unlike `abs` at `i16::MIN`.
#[inline]
pub const fn nabs(x: i16) -> i16 {
    if x < 0 { x } else { -x }
}

/// Q15 quotient `num / den`
///
/// Callers keep `|num| <= |den|` and `den != 0`. The narrowing cast wraps
/// like any two's-complement fixed-point register would: `num == den`
/// gives `-1.0` because `+1.0` is not representable.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn q15_div(num: i16, den: i16) -> i16 {
    (((num as i32) << 15) / den as i32) as i16
}

/// Q15 product, truncated back to 16 bits
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn q15_mul(a: i16, b: i16) -> i16 {
    ((a as i32 * b as i32) >> 15) as i16
}

/// Approximate `atan(ratio)` in turn units for a Q15 `ratio` in `[-1, 1)`
#[inline]
const fn atan_unit(ratio: i16) -> i16 {
    let correction = q15_mul(K1, nabs(ratio));
    q15_mul(K2 + correction, ratio)
}

/// Angle of the vector `(x, y)` measured from the positive x-axis
///
/// The result is in 1/65536ths of a turn: `0x0000` is 0 rad, `0x8000` is pi
/// rad. Magnitude does not matter, so any signed 16-bit fixed-point format
/// works for the inputs.
///
/// `x == y` never divides (the ratio would be `+1.0`). `(0, 0)` is `0`.
#[allow(clippy::cast_sign_loss)]
pub const fn atan2(x: i16, y: i16) -> Angle {
    if x == y {
        return if y > 0 {
            EIGHTH_TURN
        } else if y < 0 {
            FIVE_EIGHTHS_TURN
        } else {
            0
        };
    }

    if nabs(x) < nabs(y) {
        // |x| > |y|: octants around the x-axis
        if x == 0 {
            return 0;
        }
        let unrotated = atan_unit(q15_div(y, x)) as Angle;
        if x > 0 {
            unrotated
        } else {
            HALF_TURN.wrapping_add(unrotated)
        }
    } else {
        // |y| >= |x|: octants around the y-axis
        if y == 0 {
            return 0;
        }
        let unrotated = atan_unit(q15_div(x, y)) as Angle;
        if y > 0 {
            QUARTER_TURN.wrapping_sub(unrotated)
        } else {
            THREE_QUARTER_TURN.wrapping_sub(unrotated)
        }
    }
}
