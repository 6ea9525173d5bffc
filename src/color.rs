use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Color sent to unlit LEDs
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Channel bytes in the order the strip expects them on the wire
#[inline]
pub const fn wire_order(color: Rgb) -> [u8; 3] {
    [color.g, color.r, color.b]
}
