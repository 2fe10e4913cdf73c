//! Helper module with the SGR operations both directions of the codec agree
//! on.
//!
//! The tokenizer decodes the parameters of `CSI ... m` sequences into
//! [`SgrOp`]s with [`decode`], whereas the writer encodes colors and
//! decorations back into parameters. Replaying the decoded operations onto a
//! [`Style`] with [`SgrOp::apply_to`] yields the style a terminal would
//! display.

use core::fmt;

use ansicolor::style::{Decoration, Layer, Style};
use ansicolor::termco::AnsiColor;
use ansicolor::Color;

/// A select-graphic-rendition operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SgrOp {
    /// Restore the default style.
    Reset,
    /// Set the foreground color.
    SetForeground(Color),
    /// Set the background color.
    SetBackground(Color),
    /// Enable or disable a decoration.
    SetDecoration(Decoration, bool),
}

impl SgrOp {
    /// Replay this operation onto the style.
    pub fn apply_to(&self, style: &mut Style) {
        match *self {
            Self::Reset => *style = Style::DEFAULT,
            Self::SetForeground(color) => style.foreground = Some(color),
            Self::SetBackground(color) => style.background = Some(color),
            Self::SetDecoration(decoration, true) => {
                style.decorations = style.decorations + decoration
            }
            Self::SetDecoration(decoration, false) => {
                style.decorations = style.decorations - decoration
            }
        }
    }
}

/// Replay all operations onto the style.
pub fn replay<'a, I>(ops: I, style: &mut Style)
where
    I: IntoIterator<Item = &'a SgrOp>,
{
    for op in ops {
        op.apply_to(style);
    }
}

// ------------------------------------------------------------------------------------------------

fn decoration_for(param: u32) -> Option<(Decoration, bool)> {
    use self::Decoration::*;

    Some(match param {
        1 => (Bold, true),
        2 => (Dim, true),
        3 => (Italic, true),
        4 => (Underline, true),
        5 => (Blink, true),
        7 => (Invert, true),
        8 => (Hidden, true),
        9 => (Strikethrough, true),
        23 => (Italic, false),
        24 => (Underline, false),
        25 => (Blink, false),
        27 => (Invert, false),
        28 => (Hidden, false),
        29 => (Strikethrough, false),
        _ => return None,
    })
}

fn basic(layer: Layer, index: u32) -> SgrOp {
    // Callers only pass 0..=15.
    let color = Color::Basic16(AnsiColor::from_index_lossy(index as u8));
    layered(layer, color)
}

fn layered(layer: Layer, color: Color) -> SgrOp {
    if layer.is_foreground() {
        SgrOp::SetForeground(color)
    } else {
        SgrOp::SetBackground(color)
    }
}

/// Decode the extended color starting at the `38` or `48` parameter.
///
/// This function returns the color, if valid, and the number of parameters
/// consumed after the leading `38` or `48`.
fn decode_extended(params: &[u32]) -> (Option<Color>, usize) {
    match *params {
        [] => (None, 0),
        [5] => (None, 1),
        [5, index, ..] => (u8::try_from(index).ok().map(Color::Indexed256), 2),
        [2, r, g, b, ..] => {
            let color = match (u8::try_from(r), u8::try_from(g), u8::try_from(b)) {
                (Ok(r), Ok(g), Ok(b)) => Some(Color::rgb(r, g, b)),
                _ => None,
            };
            (color, 4)
        }
        _ => (None, 1),
    }
}

/// Decode SGR parameters into operations.
///
/// An empty parameter list is the same as a single `0`, i.e., a reset.
/// Unknown parameters are ignored. Extended colors with out-of-range
/// components are dropped, though the parameters they span are still
/// consumed. If an extended color has too few parameters, only its mode is
/// consumed.
///
/// ```
/// # use ansicodec::sgr::{decode, SgrOp};
/// # use ansicolor::Color;
/// let ops = decode(&[38, 5, 208, 49]);
/// assert_eq!(ops, vec![
///     SgrOp::SetForeground(Color::Indexed256(208)),
///     SgrOp::SetBackground(Color::Default),
/// ]);
/// ```
pub fn decode(params: &[u32]) -> Vec<SgrOp> {
    if params.is_empty() {
        return vec![SgrOp::Reset];
    }

    let mut ops = Vec::with_capacity(params.len());
    let mut index = 0;

    while let Some(&param) = params.get(index) {
        index += 1;

        match param {
            0 => ops.push(SgrOp::Reset),
            22 => {
                ops.push(SgrOp::SetDecoration(Decoration::Bold, false));
                ops.push(SgrOp::SetDecoration(Decoration::Dim, false));
            }
            30..=37 => ops.push(basic(Layer::Foreground, param - 30)),
            39 => ops.push(SgrOp::SetForeground(Color::Default)),
            40..=47 => ops.push(basic(Layer::Background, param - 40)),
            49 => ops.push(SgrOp::SetBackground(Color::Default)),
            90..=97 => ops.push(basic(Layer::Foreground, param - 82)),
            100..=107 => ops.push(basic(Layer::Background, param - 92)),
            38 | 48 => {
                let layer = if param == 38 {
                    Layer::Foreground
                } else {
                    Layer::Background
                };
                let rest = params.get(index..).unwrap_or(&[]);
                let (color, consumed) = decode_extended(rest);
                index += consumed;
                if let Some(color) = color {
                    ops.push(layered(layer, color));
                }
            }
            _ => {
                if let Some((decoration, enable)) = decoration_for(param) {
                    ops.push(SgrOp::SetDecoration(decoration, enable));
                }
            }
        }
    }

    ops
}

// ------------------------------------------------------------------------------------------------

/// The SGR parameters for a color in a layer.
///
/// Colors take between one and five parameters. The [`Display`](fmt::Display)
/// implementation separates them with semicolons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorParams {
    data: [u32; 5],
    len: usize,
}

impl ColorParams {
    /// Determine the parameters for the color. This function does not
    /// downgrade colors.
    pub fn new(color: Color, layer: Layer) -> Self {
        let offset = u32::from(layer.offset());
        let (data, len) = match color {
            Color::Default => ([39 + offset, 0, 0, 0, 0], 1),
            Color::Basic16(c) => {
                let index = u32::from(u8::from(c));
                if index < 8 {
                    ([30 + offset + index, 0, 0, 0, 0], 1)
                } else {
                    ([82 + offset + index, 0, 0, 0, 0], 1)
                }
            }
            Color::Indexed256(index) => ([38 + offset, 5, u32::from(index), 0, 0], 3),
            Color::Rgb(rgb) => (
                [
                    38 + offset,
                    2,
                    u32::from(rgb[0]),
                    u32::from(rgb[1]),
                    u32::from(rgb[2]),
                ],
                5,
            ),
        };

        Self { data, len }
    }

    /// Get the parameters as a slice.
    pub fn as_slice(&self) -> &[u32] {
        self.data.get(..self.len).unwrap_or(&[])
    }
}

impl fmt::Display for ColorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, param) in self.as_slice().iter().enumerate() {
            if 0 < index {
                f.write_str(";")?;
            }
            write!(f, "{}", param)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{decode, replay, ColorParams, SgrOp};
    use ansicolor::style::{Decoration, Layer, Style};
    use ansicolor::termco::AnsiColor;
    use ansicolor::Color;

    #[test]
    fn test_decode_basics() {
        assert_eq!(decode(&[]), vec![SgrOp::Reset]);
        assert_eq!(decode(&[0]), vec![SgrOp::Reset]);
        assert_eq!(
            decode(&[31]),
            vec![SgrOp::SetForeground(Color::Basic16(AnsiColor::Red))]
        );
        assert_eq!(
            decode(&[1, 97, 104]),
            vec![
                SgrOp::SetDecoration(Decoration::Bold, true),
                SgrOp::SetForeground(Color::Basic16(AnsiColor::BrightWhite)),
                SgrOp::SetBackground(Color::Basic16(AnsiColor::BrightBlue)),
            ]
        );
        assert_eq!(
            decode(&[22]),
            vec![
                SgrOp::SetDecoration(Decoration::Bold, false),
                SgrOp::SetDecoration(Decoration::Dim, false),
            ]
        );
        assert_eq!(
            decode(&[29, 6, 665, 39]),
            vec![
                SgrOp::SetDecoration(Decoration::Strikethrough, false),
                SgrOp::SetForeground(Color::Default),
            ]
        );
    }

    #[test]
    fn test_decode_extended() {
        assert_eq!(
            decode(&[48, 2, 1, 2, 3, 4]),
            vec![
                SgrOp::SetBackground(Color::rgb(1, 2, 3)),
                SgrOp::SetDecoration(Decoration::Underline, true),
            ]
        );

        // Out-of-range components are dropped, yet consumed.
        assert_eq!(
            decode(&[38, 5, 256, 1]),
            vec![SgrOp::SetDecoration(Decoration::Bold, true)]
        );
        assert_eq!(
            decode(&[38, 2, 300, 0, 0, 3]),
            vec![SgrOp::SetDecoration(Decoration::Italic, true)]
        );

        // Too few parameters consume the mode only.
        assert!(decode(&[38]).is_empty());
        assert!(decode(&[38, 5]).is_empty());
        assert_eq!(
            decode(&[48, 2, 1, 4]),
            vec![
                SgrOp::SetDecoration(Decoration::Bold, true),
                SgrOp::SetDecoration(Decoration::Underline, true),
            ]
        );
        assert_eq!(
            decode(&[38, 7, 1]),
            vec![SgrOp::SetDecoration(Decoration::Bold, true)]
        );
    }

    #[test]
    fn test_replay() {
        let mut style = Style::DEFAULT.bold().dim();
        replay(&decode(&[22, 3, 31, 48, 5, 17]), &mut style);
        assert_eq!(
            style,
            Style::DEFAULT
                .italic()
                .with_foreground(AnsiColor::Red)
                .with_background(Color::Indexed256(17))
        );

        replay(&decode(&[]), &mut style);
        assert_eq!(style, Style::DEFAULT);
    }

    #[test]
    fn test_color_params() {
        let params = |c: Color, l: Layer| format!("{}", ColorParams::new(c, l));

        assert_eq!(params(Color::Default, Layer::Foreground), "39");
        assert_eq!(params(Color::Default, Layer::Background), "49");
        assert_eq!(params(AnsiColor::Red.into(), Layer::Foreground), "31");
        assert_eq!(params(AnsiColor::BrightRed.into(), Layer::Background), "101");
        assert_eq!(params(Color::Indexed256(208), Layer::Foreground), "38;5;208");
        assert_eq!(params(Color::rgb(1, 22, 255), Layer::Background), "48;2;1;22;255");

        for color in AnsiColor::all() {
            for layer in [Layer::Foreground, Layer::Background] {
                let op = if layer.is_foreground() {
                    SgrOp::SetForeground(color.into())
                } else {
                    SgrOp::SetBackground(color.into())
                };
                assert_eq!(
                    decode(ColorParams::new(color.into(), layer).as_slice()),
                    vec![op]
                );
            }
        }
    }
}
