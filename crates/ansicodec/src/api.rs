use core::fmt;

use crate::sgr::SgrOp;
use crate::util::{nicely, nicely_char};

/// A command for the terminal.
///
/// Commands provide instructions to the terminal and are communicated in-band
/// by writing ANSI escape codes. Doing so is the responsibility of the
/// [`Display`](fmt::Display) implementation, whereas the
/// [`Debug`](fmt::Debug) implementation should simply identify the command.
///
/// Commands ignore [`Capabilities`](crate::opt::Capabilities). Use a
/// [`Writer`](crate::Writer) when output must adapt to the sink.
///
/// This trait is object-safe.
pub trait Command: fmt::Debug + fmt::Display {}

/// A borrowed command is a command.
impl<C: Command + ?Sized> Command for &C {}

/// A boxed command is a command.
impl<C: Command + ?Sized> Command for Box<C> {}

/// Combine several commands into a single new command.
///
/// The new command preserves the order of its component commands. Upon display,
/// it emits as many ANSI escape sequence as it has component commands. Upon
/// debug, it reveals the macro's source arguments.
///
/// When fusing only SGR commands, prefer [`fuse_sgr!`](crate::fuse_sgr), which
/// generates commands that emit a single ANSI escape sequence only.
///
/// # Example
///
/// ```
/// # use ansicodec::{cmd::{MoveDown, MoveRight}, fuse};
/// let move_down_right_twice = fuse!(MoveDown(2), MoveRight(2));
/// assert_eq!(format!("{}", move_down_right_twice), "\x1b[2B\x1b[2C");
/// ```
#[macro_export]
macro_rules! fuse {
    ($($command:expr),+ $(,)?) => {{
        /// One or more combined commands.
        #[derive(Copy, Clone, PartialEq, Eq)]
        struct Fused;

        impl $crate::Command for Fused {}

        impl ::core::fmt::Debug for Fused {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                f.write_str(concat!(stringify!(fuse!), "(", stringify!($($command),+), ")"))
            }
        }

        impl ::core::fmt::Display for Fused {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                $(::core::fmt::Display::fmt(&$command, f)?;)*
                Ok(())
            }
        }

        Fused
    }}
}

// ------------------------------------------------------------------------------------------------

/// A command using select-graphic-rendition ANSI escape sequences.
///
/// To facilitate composition, SGR commands implement [`Sgr::write_param`],
/// which writes the parameter(s) without the leading `CSI` and the trailing
/// `m`. Declaring `out` to be a formatter keeps the trait object-safe.
pub trait Sgr: Command {
    /// Write the parameter(s) for this SGR command.
    fn write_param(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// A borrowed SGR is an SGR.
impl<S: Sgr + ?Sized> Sgr for &S {
    fn write_param(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).write_param(out)
    }
}

/// A boxed SGR is an SGR.
impl<S: Sgr + ?Sized> Sgr for Box<S> {
    fn write_param(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).write_param(out)
    }
}

/// Combine several SGR commands into a single new SGR command.
///
/// The new SGR command preserves the order of its component commands. Upon
/// display, it emits only one ANSI escape sequence. Upon debug, it reveals the
/// macro's source arguments.
///
/// ```
/// # use ansicodec::{cmd::{Decorate, SetForeground}, fuse_sgr};
/// # use ansicolor::Color;
/// # use ansicolor::style::Decoration;
/// let cmd = fuse_sgr!(Decorate(Decoration::Bold), SetForeground(Color::Indexed256(208)));
/// assert_eq!(format!("{}", cmd), "\x1b[1;38;5;208m");
/// ```
///
/// To fuse commands other than SGR commands, use [`fuse!`].
#[macro_export]
macro_rules! fuse_sgr {
    ( $sgr:expr, $( $sgr2:expr ),* $(,)? ) => {{
        /// One or more SGR commands fused into one.
        #[derive(Copy, Clone, PartialEq, Eq)]
        struct FusedSgr;

        impl ::core::fmt::Debug for FusedSgr {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                f.write_str(concat!(stringify!(fuse_sgr!), "(", stringify!($sgr, $($sgr2),*), ")"))
            }
        }

        impl ::core::fmt::Display for FusedSgr {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str("\x1b[")?;
                $crate::Sgr::write_param(self, f)?;
                f.write_str("m")
            }
        }

        impl $crate::Command for FusedSgr {}
        impl $crate::Sgr for FusedSgr {
            fn write_param(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::Sgr::write_param(&$sgr, f)?;
                $(
                    f.write_str(";")?;
                    $crate::Sgr::write_param(&$sgr2, f)?;
                )*
                Ok(())
            }
        }

        FusedSgr
    }};
}

// ------------------------------------------------------------------------------------------------

/// Control codes that start or end ANSI escape sequences.
///
/// Each control has a 7-bit form starting with `ESC` and, except for `BEL`
/// and `ESC`, a single-character C1 form. The [`Display`](fmt::Display)
/// implementation writes the 7-bit form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Bell (C0)
    BEL = 0x07,
    /// Escape (C0)
    ESC = 0x1b,
    /// Device control string: `ESC P` (C0) or U+0090 (C1)
    DCS = 0x90,
    /// Start of String: `ESC X` (C0) or U+0098 (C1)
    SOS = 0x98,
    /// Single Shift 3: `ESC O` (C0) or U+008F (C1)
    SS3 = 0x8f,
    /// Control Sequence Introducer: `ESC [` (C0) or U+009B (C1)
    CSI = 0x9b,
    /// String Terminator: `ESC \\` (C0) or U+009C (C1)
    ST = 0x9c,
    /// Operating System Command: `ESC ]` (C0) or U+009D (C1)
    OSC = 0x9d,
    /// Privacy Message: `ESC ^` (C0) or U+009E (C1)
    PM = 0x9e,
    /// Application Program Command: `ESC _` (C0) or U+009F (C1)
    APC = 0x9f,
}

impl Control {
    /// Get the 7-bit form of this control.
    pub const fn as_7bit(&self) -> &'static str {
        use self::Control::*;

        match *self {
            BEL => "\x07",
            ESC => "\x1b",
            DCS => "\x1bP",
            SOS => "\x1bX",
            SS3 => "\x1bO",
            CSI => "\x1b[",
            ST => "\x1b\\",
            OSC => "\x1b]",
            PM => "\x1b^",
            APC => "\x1b_",
        }
    }

    /// Get the single-character C1 form of this control.
    pub const fn as_8bit(&self) -> &'static str {
        use self::Control::*;

        match *self {
            BEL => "\x07",
            ESC => "\x1b",
            DCS => "\u{90}",
            SOS => "\u{98}",
            SS3 => "\u{8f}",
            CSI => "\u{9b}",
            ST => "\u{9c}",
            OSC => "\u{9d}",
            PM => "\u{9e}",
            APC => "\u{9f}",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_7bit())
    }
}

// ------------------------------------------------------------------------------------------------

/// A generic control sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Csi {
    /// The intermediate characters in `0x20..=0x2f`.
    pub intermediates: String,
    /// The numeric parameters, saturated at `u32::MAX`.
    pub params: Vec<u32>,
    /// The final character in `0x40..=0x7e`.
    pub final_char: char,
    /// One of `<`, `=`, `>`, or `?` if it was the first parameter character.
    pub private_marker: Option<char>,
}

impl Csi {
    /// Determine whether this control sequence has the final character and
    /// neither intermediates nor a private marker.
    pub fn is_plain(&self, final_char: char) -> bool {
        self.final_char == final_char
            && self.intermediates.is_empty()
            && self.private_marker.is_none()
    }
}

/// A text or control sequence token.
///
/// Tokens are plain values owned by the caller. Malformed and deliberately
/// unmodeled sequences are never dropped but become
/// [`Token::UnknownEscape`]s.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Plain text.
    Text(String),
    /// One of the C0 controls CR, LF, TAB, and BEL.
    Control(char),
    /// A control sequence other than a decoded SGR sequence.
    Csi(Csi),
    /// A decoded SGR sequence.
    Sgr(Vec<SgrOp>),
    /// An escape sequence with optional intermediates and final character.
    Esc {
        intermediates: String,
        final_char: char,
    },
    /// An operating system command with its numeric code, which is -1 if
    /// missing, and the rest of the payload.
    Osc { code: i64, data: String },
    /// A single shift 3 followed by its final character.
    Ss3(char),
    /// A malformed sequence or a sequence without semantic decoding, such as
    /// a device control string, with its raw characters.
    UnknownEscape(String),
}

impl Token {
    /// Get this token's text, if it is a text token.
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            Self::Text(ref text) => Some(text),
            _ => None,
        }
    }

    /// Determine whether this token is a text or control token.
    pub fn is_text_or_control(&self) -> bool {
        matches!(*self, Self::Text(_) | Self::Control(_))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Text(ref text) => f.debug_tuple("Text").field(&nicely(text)).finish(),
            Self::Control(c) => f.debug_tuple("Control").field(&nicely_char(c)).finish(),
            Self::Csi(ref csi) => {
                let mut debug = f.debug_struct("Csi");
                if let Some(marker) = csi.private_marker {
                    debug.field("private_marker", &marker);
                }
                debug.field("params", &csi.params);
                if !csi.intermediates.is_empty() {
                    debug.field("intermediates", &nicely(&csi.intermediates));
                }
                debug.field("final_char", &csi.final_char).finish()
            }
            Self::Sgr(ref ops) => f.debug_tuple("Sgr").field(ops).finish(),
            Self::Esc {
                ref intermediates,
                final_char,
            } => f
                .debug_struct("Esc")
                .field("intermediates", &nicely(intermediates))
                .field("final_char", &final_char)
                .finish(),
            Self::Osc { code, ref data } => f
                .debug_struct("Osc")
                .field("code", &code)
                .field("data", &nicely(data))
                .finish(),
            Self::Ss3(c) => f.debug_tuple("Ss3").field(&c).finish(),
            Self::UnknownEscape(ref raw) => {
                f.debug_tuple("UnknownEscape").field(&nicely(raw)).finish()
            }
        }
    }
}

fn _assert_traits_are_object_safe() {
    fn is_object_safe<T: ?Sized>() {}

    is_object_safe::<dyn Command>();
    is_object_safe::<dyn Sgr>();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmd::{Decorate, SetBackground, SetForeground};
    use ansicolor::style::Decoration;
    use ansicolor::termco::AnsiColor;
    use ansicolor::Color;

    #[test]
    fn test_fuse() {
        let s = format!(
            "{}",
            fuse!(
                Decorate(Decoration::Bold),
                SetForeground(Color::Basic16(AnsiColor::Black)),
                SetBackground(Color::Basic16(AnsiColor::BrightWhite))
            )
        );
        assert_eq!(s, "\x1b[1m\x1b[30m\x1b[107m");

        let cmd = fuse!(Decorate(Decoration::Blink), SetBackground(Color::Indexed256(219)));
        assert_eq!(format!("{}", cmd), "\x1b[5m\x1b[48;5;219m");
        assert_eq!(
            format!("{:?}", cmd),
            "fuse!(Decorate(Decoration::Blink), SetBackground(Color::Indexed256(219)))"
        );

        let copy = cmd;
        assert_eq!(format!("{}{}", cmd, copy), format!("{}{}", cmd, cmd));
        assert_eq!(cmd, copy);
    }

    #[test]
    fn test_fuse_sgr() {
        let cmd = fuse_sgr!(
            Decorate(Decoration::Bold),
            SetForeground(Color::Basic16(AnsiColor::Black)),
            SetBackground(Color::Basic16(AnsiColor::BrightWhite))
        );
        assert_eq!(format!("{}", cmd), "\x1b[1;30;107m");
        assert!(format!("{:?}", cmd).starts_with("fuse_sgr!(Decorate(Decoration::Bold), "));
    }

    #[test]
    fn test_control() {
        assert_eq!(format!("{}", Control::CSI), "\x1b[");
        assert_eq!(Control::OSC.as_8bit(), "\u{9d}");
        assert_eq!(Control::ST.as_7bit(), "\x1b\\");
    }

    #[test]
    fn test_token_debug() {
        let token = Token::Text("a\x1bb".to_string());
        assert_eq!(format!("{:?}", token), "Text(\"a‹𝖾𝗌𝖼›b\")");

        let token = Token::Control('\n');
        assert_eq!(format!("{:?}", token), "Control('‹𝗅𝖿›')");

        let token = Token::Csi(Csi {
            intermediates: String::new(),
            params: vec![6],
            final_char: 'n',
            private_marker: Some('?'),
        });
        assert_eq!(
            format!("{:?}", token),
            "Csi { private_marker: '?', params: [6], final_char: 'n' }"
        );

        let token = Token::UnknownEscape("\x1bP1\x1b\\".to_string());
        assert_eq!(format!("{:?}", token), "UnknownEscape(\"‹𝖾𝗌𝖼›P1‹𝖾𝗌𝖼›\\\")");
        assert!(Token::Control('\t').is_text_or_control());
        assert_eq!(Token::Text("x".to_string()).as_text(), Some("x"));
    }
}
