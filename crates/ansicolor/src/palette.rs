//! Reference colors for the 16 and 256 indexed colors and the nearest-color
//! searches behind [`Color::downgrade`](crate::Color::downgrade).
//!
//! The 16 ANSI colors have no intrinsic values, since every terminal theme
//! picks its own. Matching nevertheless needs fixed reference values and
//! this module uses the colors of VGA text mode. In contrast, the 240 cube and
//! gray colors have the same values across xterm-compatible terminals.

use crate::termco::{AnsiColor, EmbeddedRgb, GrayGradient, Rgb};

/// The colors of [VGA text
/// mode](https://en.wikipedia.org/wiki/ANSI_escape_code#3-bit_and_4-bit).
const VGA_COLORS: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // Black
    Rgb::new(170, 0, 0),     // Red
    Rgb::new(0, 170, 0),     // Green
    Rgb::new(170, 85, 0),    // Yellow(ish)
    Rgb::new(0, 0, 170),     // Blue
    Rgb::new(170, 0, 170),   // Magenta
    Rgb::new(0, 170, 170),   // Cyan
    Rgb::new(170, 170, 170), // White
    Rgb::new(85, 85, 85),    // Bright Black
    Rgb::new(255, 85, 85),   // Bright Red
    Rgb::new(85, 255, 85),   // Bright Green
    Rgb::new(255, 255, 85),  // Bright Yellow
    Rgb::new(85, 85, 255),   // Bright Blue
    Rgb::new(255, 85, 255),  // Bright Magenta
    Rgb::new(85, 255, 255),  // Bright Cyan
    Rgb::new(255, 255, 255), // Bright White
];

/// Get the reference value for the ANSI color.
pub fn basic16_rgb(color: AnsiColor) -> Rgb {
    VGA_COLORS[color as usize]
}

/// Get the reference value for the 8-bit color.
///
/// The first 16 indices are the ANSI colors and use [`basic16_rgb`]. The
/// remaining indices have the standard xterm values.
pub fn xterm256_rgb(index: u8) -> Rgb {
    if let Ok(color) = AnsiColor::try_from(index) {
        basic16_rgb(color)
    } else if let Ok(color) = EmbeddedRgb::try_from(index) {
        color.into()
    } else if let Ok(color) = GrayGradient::try_from(index) {
        color.into()
    } else {
        // All 256 values are covered by the three conversions.
        Rgb::default()
    }
}

/// Map a channel value onto the closest coordinate of the 6x6x6 cube.
fn cube_coordinate(value: u8) -> u8 {
    if value < 48 {
        0
    } else if value < 114 {
        1
    } else {
        (value - 35) / 40
    }
}

/// Find the closest 8-bit color for the 24-bit color.
///
/// This function only considers the 6x6x6 cube and the gray gradient. It
/// determines the closest cube color and the closest gray by arithmetic and
/// then picks the gray only if it is strictly closer.
pub fn to_xterm256(rgb: &Rgb) -> u8 {
    let [r, g, b] = *rgb.as_ref();

    let cube = [cube_coordinate(r), cube_coordinate(g), cube_coordinate(b)];
    let cube_index = 16 + 36 * cube[0] + 6 * cube[1] + cube[2];
    let cube_rgb = Rgb::new(
        EmbeddedRgb::channel(cube[0]),
        EmbeddedRgb::channel(cube[1]),
        EmbeddedRgb::channel(cube[2]),
    );

    let average = (r as u16 + g as u16 + b as u16) / 3;
    let level = if average < 8 {
        0
    } else if 238 < average {
        23
    } else {
        ((average - 8) / 10) as u8
    };
    let gray_value = 8 + 10 * level;
    let gray_rgb = Rgb::new(gray_value, gray_value, gray_value);

    if rgb.distance_squared(&gray_rgb) < rgb.distance_squared(&cube_rgb) {
        232 + level
    } else {
        cube_index
    }
}

/// Find the closest ANSI color for the 8-bit color.
///
/// Indices below 16 already are ANSI colors. For all others, this function
/// picks the reference value with the smallest squared Euclidian distance,
/// with ties going to the lower index.
pub fn to_basic16(index: u8) -> AnsiColor {
    if let Ok(color) = AnsiColor::try_from(index) {
        return color;
    }

    let target = xterm256_rgb(index);
    let mut min_distance = u32::MAX;
    let mut min_color = AnsiColor::Black;

    for color in AnsiColor::all() {
        let distance = target.distance_squared(&basic16_rgb(color));
        if distance < min_distance {
            min_distance = distance;
            min_color = color;
        }
    }

    min_color
}
