//! Terminal color representations.
//!
//! A terminal [`Color`] is one of four variants, one per tier of terminal
//! color support. The 16 extended ANSI colors are [`AnsiColor`]s, the 256
//! indexed colors are plain `u8` codes that may be broken down further into
//! [`EmbeddedRgb`] and [`GrayGradient`], and 24-bit colors are [`Rgb`]s.
//! [`ColorTier`] names the tiers and [`Color::downgrade`] moves colors from
//! higher to lower tiers.

use crate::error::OutOfBoundsError;
use crate::palette;

// ====================================================================================================================
// Ansi Color
// ====================================================================================================================

/// The 16 extended ANSI colors.
///
/// Rust code converts between 8-bit color codes and enumeration variants with
/// [`AnsiColor as
/// TryFrom<u8>`](enum.AnsiColor.html#impl-TryFrom%3Cu8%3E-for-AnsiColor) and
/// [`u8 as
/// From<AnsiColor>`](enum.AnsiColor.html#impl-From%3CAnsiColor%3E-for-u8).
///
/// The ANSI colors are ordered because they are ordered as indexed colors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnsiColor {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Get an iterator over all ANSI colors in order.
    pub fn all() -> AnsiColorIterator {
        AnsiColorIterator::new()
    }

    /// Determine whether this ANSI color is bright.
    pub fn is_bright(&self) -> bool {
        8 <= *self as u8
    }

    /// Get the base version of this ANSI color.
    ///
    /// If this color is bright, this method returns its non-bright version.
    /// Otherwise, it returns the same color.
    pub fn to_base(&self) -> AnsiColor {
        Self::from_index_lossy(*self as u8 & 7)
    }

    /// Get this ANSI color's name, e.g., `"bright green"`.
    pub fn name(&self) -> &'static str {
        use AnsiColor::*;

        match *self {
            Black => "black",
            Red => "red",
            Green => "green",
            Yellow => "yellow",
            Blue => "blue",
            Magenta => "magenta",
            Cyan => "cyan",
            White => "white",
            BrightBlack => "bright black",
            BrightRed => "bright red",
            BrightGreen => "bright green",
            BrightYellow => "bright yellow",
            BrightBlue => "bright blue",
            BrightMagenta => "bright magenta",
            BrightCyan => "bright cyan",
            BrightWhite => "bright white",
        }
    }

    /// Convert the index to an ANSI color, using only its lower four bits.
    pub fn from_index_lossy(index: u8) -> Self {
        use AnsiColor::*;

        match index & 0xf {
            0 => Black,
            1 => Red,
            2 => Green,
            3 => Yellow,
            4 => Blue,
            5 => Magenta,
            6 => Cyan,
            7 => White,
            8 => BrightBlack,
            9 => BrightRed,
            10 => BrightGreen,
            11 => BrightYellow,
            12 => BrightBlue,
            13 => BrightMagenta,
            14 => BrightCyan,
            _ => BrightWhite,
        }
    }
}

impl TryFrom<u8> for AnsiColor {
    type Error = OutOfBoundsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 16 {
            Ok(Self::from_index_lossy(value))
        } else {
            Err(OutOfBoundsError::new(value, 0..=15))
        }
    }
}

impl From<AnsiColor> for u8 {
    fn from(value: AnsiColor) -> u8 {
        value as u8
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A helper for iterating over ANSI colors.
///
/// This iterator is fused, i.e., after returning `None` once, it will keep
/// returning `None`. This iterator also is exact, i.e., its `size_hint()`
/// returns the exact number of remaining items.
#[derive(Debug)]
pub struct AnsiColorIterator {
    index: u8,
}

impl AnsiColorIterator {
    fn new() -> Self {
        Self { index: 0 }
    }
}

impl Iterator for AnsiColorIterator {
    type Item = AnsiColor;

    fn next(&mut self) -> Option<Self::Item> {
        if 16 <= self.index {
            None
        } else {
            let index = self.index;
            self.index += 1;
            Some(AnsiColor::from_index_lossy(index))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AnsiColorIterator {
    fn len(&self) -> usize {
        16 - self.index as usize
    }
}

impl core::iter::FusedIterator for AnsiColorIterator {}

// ====================================================================================================================
// The Embedded 6x6x6 RGB Cube
// ====================================================================================================================

/// The 6x6x6 RGB cube embedded in 8-bit terminal colors.
///
/// ```
/// # use ansicolor::termco::{EmbeddedRgb, Rgb};
/// # use ansicolor::OutOfBoundsError;
/// let orange = EmbeddedRgb::new(5, 2, 0)?;
/// assert_eq!(orange, EmbeddedRgb::try_from(208)?);
/// assert_eq!(u8::from(orange), 208);
/// assert_eq!(Rgb::from(orange), Rgb::new(255, 135, 0));
/// # Ok::<(), OutOfBoundsError>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmbeddedRgb([u8; 3]);

impl EmbeddedRgb {
    /// Create a new embedded RGB value from its coordinates `0..=5`.
    pub fn new(r: u8, g: u8, b: u8) -> Result<Self, OutOfBoundsError> {
        for c in [r, g, b] {
            if 6 <= c {
                return Err(OutOfBoundsError::new(c, 0..=5));
            }
        }

        Ok(Self([r, g, b]))
    }

    /// Convert a coordinate `0..=5` to its 24-bit channel value.
    pub const fn channel(coordinate: u8) -> u8 {
        if coordinate == 0 {
            0
        } else {
            55 + 40 * coordinate
        }
    }
}

impl TryFrom<u8> for EmbeddedRgb {
    type Error = OutOfBoundsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if !(16..=231).contains(&value) {
            return Err(OutOfBoundsError::new(value, 16..=231));
        }

        let offset = value - 16;
        Self::new(offset / 36, offset / 6 % 6, offset % 6)
    }
}

impl AsRef<[u8; 3]> for EmbeddedRgb {
    fn as_ref(&self) -> &[u8; 3] {
        &self.0
    }
}

impl core::ops::Index<usize> for EmbeddedRgb {
    type Output = u8;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<EmbeddedRgb> for u8 {
    fn from(value: EmbeddedRgb) -> u8 {
        let [r, g, b] = value.0;
        16 + 36 * r + 6 * g + b
    }
}

impl From<EmbeddedRgb> for Rgb {
    fn from(value: EmbeddedRgb) -> Self {
        let [r, g, b] = value.0;
        Rgb::new(
            EmbeddedRgb::channel(r),
            EmbeddedRgb::channel(g),
            EmbeddedRgb::channel(b),
        )
    }
}

// ====================================================================================================================
// Gray Gradient
// ====================================================================================================================

/// The 24-step gray gradient embedded in 8-bit terminal colors.
///
/// ```
/// # use ansicolor::termco::{GrayGradient, Rgb};
/// # use ansicolor::OutOfBoundsError;
/// let midgray = GrayGradient::try_from(243)?;
/// assert_eq!(midgray.level(), 11);
/// assert_eq!(Rgb::from(midgray), Rgb::new(118, 118, 118));
/// # Ok::<(), OutOfBoundsError>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrayGradient(u8);

impl GrayGradient {
    /// Instantiate a new gray gradient from its level `0..=23`.
    pub fn new(value: u8) -> Result<Self, OutOfBoundsError> {
        if value <= 23 {
            Ok(Self(value))
        } else {
            Err(OutOfBoundsError::new(value, 0..=23))
        }
    }

    /// Access the gray level `0..=23`.
    pub const fn level(&self) -> u8 {
        self.0
    }

    /// Get the 24-bit channel value for this gray level.
    pub const fn channel(&self) -> u8 {
        8 + 10 * self.0
    }
}

impl TryFrom<u8> for GrayGradient {
    type Error = OutOfBoundsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 231 {
            Err(OutOfBoundsError::new(value, 232..=255))
        } else {
            Self::new(value - 232)
        }
    }
}

impl From<GrayGradient> for u8 {
    fn from(value: GrayGradient) -> u8 {
        232 + value.0
    }
}

impl From<GrayGradient> for Rgb {
    fn from(value: GrayGradient) -> Rgb {
        let level = value.channel();
        Rgb::new(level, level, level)
    }
}

// ====================================================================================================================
// Rgb
// ====================================================================================================================

/// A 24-bit color.
///
/// Its [`Display`](core::fmt::Display) implementation uses hashed hexadecimal
/// notation, e.g., `#ff8700`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb([u8; 3]);

impl Rgb {
    /// Create a new true color from its coordinates.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Compute the squared Euclidian distance to the other color.
    pub fn distance_squared(&self, other: &Rgb) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let delta = (*a as i32) - (*b as i32);
                (delta * delta) as u32
            })
            .sum()
    }
}

impl AsRef<[u8; 3]> for Rgb {
    fn as_ref(&self) -> &[u8; 3] {
        &self.0
    }
}

impl core::ops::Index<usize> for Rgb {
    type Output = u8;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        value.0
    }
}

impl core::fmt::Display for Rgb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [r, g, b] = self.0;
        f.write_fmt(format_args!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}

// ====================================================================================================================
// Color Tier
// ====================================================================================================================

/// The levels of color support.
///
/// Tiers are ordered from least to most capable, which makes comparisons
/// such as `tier < ColorTier::TrueColor` meaningful.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorTier {
    /// No colors at all. Decorations may still work.
    None,
    /// The 16 extended ANSI colors.
    Colors16,
    /// The 256 indexed colors.
    Colors256,
    /// 24-bit colors.
    #[default]
    TrueColor,
}

impl ColorTier {
    /// Determine whether colors of this tier are left alone by downgrading.
    pub fn covers(&self, color: Color) -> bool {
        color.tier() <= *self
    }

    /// Determine the color tier from the process environment.
    ///
    /// A return value of `None` means that the terminal should receive plain
    /// text without any escape sequences, whereas `Some(ColorTier::None)`
    /// means that escape sequences are fine but colors are not.
    pub fn from_environment(has_tty: bool) -> Option<Self> {
        crate::style::tier_from_environment(&crate::util::ProcessEnv, has_tty)
    }
}

// ====================================================================================================================
// Color
// ====================================================================================================================

/// A terminal color.
///
/// Each variant corresponds to one [`ColorTier`], with [`Color::Default`]
/// standing for the terminal's default foreground or background color.
/// Validated factories guard the index ranges:
///
/// ```
/// # use ansicolor::{Color, OutOfBoundsError};
/// # use ansicolor::termco::AnsiColor;
/// assert_eq!(Color::basic16(9)?, Color::Basic16(AnsiColor::BrightRed));
/// assert!(Color::basic16(16).is_err());
/// assert!(Color::indexed256(256).is_err());
/// assert_eq!(Color::rgb(1, 2, 3).rgb_components(), [1, 2, 3]);
/// # Ok::<(), OutOfBoundsError>(())
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Default,
    Basic16(AnsiColor),
    Indexed256(u8),
    Rgb(Rgb),
}

impl Color {
    /// Create a new 16-color value from its index `0..=15`.
    pub fn basic16(index: u32) -> Result<Self, OutOfBoundsError> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i < 16)
            .map(|i| Self::Basic16(AnsiColor::from_index_lossy(i)))
            .ok_or_else(|| OutOfBoundsError::new(index, 0..=15))
    }

    /// Create a new 256-color value from its index `0..=255`.
    pub fn indexed256(index: u32) -> Result<Self, OutOfBoundsError> {
        u8::try_from(index)
            .map(Self::Indexed256)
            .map_err(|_| OutOfBoundsError::new(index, 0..=255))
    }

    /// Create a new 24-bit color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Get the index of a 16-color or 256-color value. Other variants
    /// report zero.
    pub fn index(&self) -> u8 {
        match *self {
            Self::Basic16(c) => c as u8,
            Self::Indexed256(i) => i,
            _ => 0,
        }
    }

    /// Get the components of a 24-bit color. Other variants report zeros.
    pub fn rgb_components(&self) -> [u8; 3] {
        match *self {
            Self::Rgb(rgb) => rgb.into(),
            _ => [0; 3],
        }
    }

    /// Get the lowest tier that can represent this color as is.
    pub fn tier(&self) -> ColorTier {
        match *self {
            Self::Default => ColorTier::None,
            Self::Basic16(_) => ColorTier::Colors16,
            Self::Indexed256(_) => ColorTier::Colors256,
            Self::Rgb(_) => ColorTier::TrueColor,
        }
    }

    /// Downgrade this color to the given tier.
    ///
    /// The default color stays the default color and every color becomes
    /// the default color for [`ColorTier::None`]. Colors already covered by
    /// the tier are returned unchanged. 24-bit colors map onto the closest
    /// of the 240 cube and gray colors. Anything else targeting the 16
    /// colors goes through the 256 colors first and then maps onto the
    /// closest ANSI color.
    ///
    /// ```
    /// # use ansicolor::{Color, ColorTier};
    /// # use ansicolor::termco::AnsiColor;
    /// let red = Color::rgb(255, 0, 0);
    /// assert_eq!(red.downgrade(ColorTier::Colors256), Color::Indexed256(196));
    /// assert_eq!(red.downgrade(ColorTier::Colors16), Color::Basic16(AnsiColor::Red));
    /// assert_eq!(red.downgrade(ColorTier::None), Color::Default);
    /// ```
    pub fn downgrade(&self, tier: ColorTier) -> Color {
        if tier.covers(*self) {
            return *self;
        }

        match (tier, *self) {
            (ColorTier::None, _) => Color::Default,
            (ColorTier::Colors256, Color::Rgb(rgb)) => Color::Indexed256(palette::to_xterm256(&rgb)),
            (ColorTier::Colors16, Color::Indexed256(index)) => {
                Color::Basic16(palette::to_basic16(index))
            }
            (ColorTier::Colors16, Color::Rgb(rgb)) => {
                Color::Basic16(palette::to_basic16(palette::to_xterm256(&rgb)))
            }
            // Covered above.
            (_, color) => color,
        }
    }
}

impl From<AnsiColor> for Color {
    fn from(value: AnsiColor) -> Self {
        Self::Basic16(value)
    }
}

impl From<EmbeddedRgb> for Color {
    fn from(value: EmbeddedRgb) -> Self {
        Self::Indexed256(value.into())
    }
}

impl From<GrayGradient> for Color {
    fn from(value: GrayGradient) -> Self {
        Self::Indexed256(value.into())
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Self::Rgb(value)
    }
}

#[cfg(test)]
mod test {
    use super::{AnsiColor, Color, ColorTier, EmbeddedRgb, GrayGradient, OutOfBoundsError, Rgb};

    #[test]
    fn test_conversion() -> Result<(), OutOfBoundsError> {
        let magenta = AnsiColor::Magenta;
        assert_eq!(magenta as u8, 5);
        assert_eq!(AnsiColor::BrightMagenta.to_base(), magenta);
        assert!(AnsiColor::BrightMagenta.is_bright());
        assert_eq!(AnsiColor::BrightGreen.name(), "bright green");

        let green = EmbeddedRgb::new(0, 4, 0)?;
        assert_eq!(green.as_ref(), &[0, 4, 0]);
        assert_eq!(Rgb::from(green), Rgb::new(0, 215, 0));
        assert_eq!(Color::from(green), Color::Indexed256(40));

        let gray = GrayGradient::new(12)?;
        assert_eq!(gray.level(), 12);
        assert_eq!(Rgb::from(gray), Rgb::new(128, 128, 128));
        assert_eq!(Color::from(gray), Color::Indexed256(244));

        assert_eq!(format!("{}", Rgb::new(255, 135, 0)), "#ff8700");
        Ok(())
    }

    #[test]
    fn test_limits() -> Result<(), OutOfBoundsError> {
        let black_ansi = AnsiColor::try_from(0)?;
        assert_eq!(black_ansi, AnsiColor::Black);
        let white_ansi = AnsiColor::try_from(15)?;
        assert_eq!(u8::from(white_ansi), 15);
        assert_eq!(
            AnsiColor::try_from(16),
            Err(OutOfBoundsError::new(16_u8, 0..=15))
        );

        let black_rgb = EmbeddedRgb::try_from(16)?;
        assert_eq!(*black_rgb.as_ref(), [0_u8, 0_u8, 0_u8]);
        let white_rgb = EmbeddedRgb::try_from(231)?;
        assert_eq!(*white_rgb.as_ref(), [5_u8, 5_u8, 5_u8]);
        assert_eq!(u8::from(white_rgb), 231);
        assert!(EmbeddedRgb::try_from(232).is_err());
        assert!(EmbeddedRgb::new(0, 6, 0).is_err());

        let black_gray = GrayGradient::try_from(232)?;
        assert_eq!(black_gray.level(), 0);
        let white_gray = GrayGradient::try_from(255)?;
        assert_eq!(white_gray.level(), 23);
        assert_eq!(u8::from(white_gray), 255);
        assert!(GrayGradient::new(24).is_err());

        assert_eq!(AnsiColor::all().len(), 16);
        assert_eq!(AnsiColor::all().last(), Some(AnsiColor::BrightWhite));
        Ok(())
    }

    #[test]
    fn test_factories() -> Result<(), OutOfBoundsError> {
        assert_eq!(Color::basic16(1)?, Color::Basic16(AnsiColor::Red));
        assert_eq!(
            Color::basic16(16),
            Err(OutOfBoundsError::new(16_u32, 0..=15))
        );
        assert_eq!(Color::indexed256(255)?, Color::Indexed256(255));
        assert_eq!(
            Color::indexed256(256),
            Err(OutOfBoundsError::new(256_u32, 0..=255))
        );
        assert!(Color::basic16(u32::MAX).is_err());

        assert_eq!(Color::Default.index(), 0);
        assert_eq!(Color::Default.rgb_components(), [0, 0, 0]);
        assert_eq!(Color::rgb(9, 8, 7).index(), 0);
        assert_eq!(Color::Basic16(AnsiColor::BrightBlue).index(), 12);
        assert_eq!(Color::Basic16(AnsiColor::BrightBlue).rgb_components(), [0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_downgrade() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.downgrade(ColorTier::TrueColor), red);
        assert_eq!(red.downgrade(ColorTier::Colors256), Color::Indexed256(196));
        assert_eq!(red.downgrade(ColorTier::Colors16), Color::Basic16(AnsiColor::Red));
        assert_eq!(red.downgrade(ColorTier::None), Color::Default);

        assert_eq!(
            Color::rgb(128, 128, 128).downgrade(ColorTier::Colors256),
            Color::Indexed256(244)
        );
        assert_eq!(
            Color::rgb(128, 128, 128).downgrade(ColorTier::Colors16),
            Color::Basic16(AnsiColor::White)
        );
        assert_eq!(
            Color::rgb(0, 255, 0).downgrade(ColorTier::Colors16),
            Color::Basic16(AnsiColor::Green)
        );
        assert_eq!(
            Color::rgb(255, 255, 255).downgrade(ColorTier::Colors16),
            Color::Basic16(AnsiColor::BrightWhite)
        );

        let blue = Color::Basic16(AnsiColor::Blue);
        assert_eq!(blue.downgrade(ColorTier::Colors256), blue);
        assert_eq!(blue.downgrade(ColorTier::Colors16), blue);
        assert_eq!(Color::Indexed256(4).downgrade(ColorTier::Colors16), blue);
    }

    #[test]
    fn test_downgrade_properties() {
        let tiers = [
            ColorTier::None,
            ColorTier::Colors16,
            ColorTier::Colors256,
            ColorTier::TrueColor,
        ];

        let mut colors = vec![Color::Default];
        colors.extend(AnsiColor::all().map(Color::Basic16));
        colors.extend((0..=255).map(Color::Indexed256));
        for v in (0..=255).step_by(17) {
            colors.push(Color::rgb(v, 255 - v, v / 2));
            colors.push(Color::rgb(v, v, v));
        }

        for tier in tiers {
            assert_eq!(Color::Default.downgrade(tier), Color::Default);
            for color in colors.iter() {
                let once = color.downgrade(tier);
                assert_eq!(once.downgrade(tier), once);
                assert!(once.tier() <= tier);
                assert_eq!(tier.covers(*color), once == *color);
            }
        }

        for color in colors.iter() {
            assert_eq!(color.downgrade(ColorTier::None), Color::Default);
        }
    }
}
