//! A library of useful terminal commands.
//!
//! This module provides a number of straight-forward struct types that
//! implement the [`Command`] trait and, for styling, also the [`Sgr`] trait.
//! Organized by topic, this library covers the following commands:
//!
//!   * Styling content:
//!       * [`ResetStyle`]
//!       * [`Decorate`] and [`Undecorate`]
//!       * [`SetForeground`] and [`SetBackground`]
//!   * Screen management:
//!       * [`EnterAlternateScreen`] and [`ExitAlternateScreen`]
//!       * [`EraseScreen`], [`EraseLine`], and [`EraseRestOfLine`]
//!   * Scrolling:
//!       * [`ScrollUp`] and [`ScrollDown`]
//!       * [`SetScrollRegion`] and [`ResetScrollRegion`]
//!   * Cursor management:
//!       * [`SetCursor`]
//!       * [`HideCursor`] and [`ShowCursor`]
//!       * [`RequestCursorPosition`]
//!       * Relative [`MoveUp`], [`MoveDown`], [`MoveLeft`], and [`MoveRight`]
//!       * Absolute [`MoveToColumn`], [`MoveToRow`], and [`MoveTo`]
//!       * [`SaveCursorPosition`] and [`RestoreCursorPosition`]
//!   * Window management:
//!       * [`SetWindowTitle`]
//!   * Hyperlinks:
//!       * [`Link`]
//!
//! Commands always emit 7-bit controls and never downgrade colors. They are
//! meant for the many cases where output is known to go to a capable
//! terminal. Otherwise, use a [`Writer`](crate::Writer), which consults the
//! sink's [`Capabilities`](crate::opt::Capabilities).
//!
//! You can easily combine several commands into a compound command with the
//! [`fuse!`](crate::fuse) and [`fuse_sgr!`](crate::fuse_sgr) macros.
//!
//!
//! # Example
//!
//! Executing a command is as simple as writing its display:
//! ```
//! # use ansicodec::{fuse_sgr, cmd::{Decorate, ResetStyle, SetForeground}};
//! # use ansicolor::{style::Decoration, Color};
//! let wow = format!(
//!     "{}Wow!{}",
//!     fuse_sgr!(
//!         Decorate(Decoration::Bold),
//!         Decorate(Decoration::Underline),
//!         SetForeground(Color::Indexed256(124))
//!     ),
//!     ResetStyle
//! );
//! assert_eq!(wow, "\x1b[1;4;38;5;124mWow!\x1b[0m");
//! ```

use ansicolor::style::{Decoration, Layer};
use ansicolor::Color;

use crate::event::CursorStyle;
use crate::sgr::ColorParams;
use crate::Command;

macro_rules! declare_unit_struct {
    ($name:ident) => {
        #[doc = concat!("The unit `",stringify!($name),"` command.")]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name;
    };
}

macro_rules! declare_n_struct {
    ($name:ident( $( $arg:ident : $typ:ty ),+ $(,)? )) => {
        #[doc = concat!("The `",stringify!($name),"(",stringify!($($arg),+),")` command.")]
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name( $( pub $typ ),+ );
    };
}

macro_rules! implement_command {
    ($name:ident : $selfish:ident ; $output:ident $body:block) => {
        impl $crate::Command for $name {}

        impl ::core::fmt::Display for $name {
            #[inline]
            fn fmt(&$selfish, $output: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $body
            }
        }
    };
}

macro_rules! define_unit_command {
    ($name:ident, $ansi:tt) => {
        declare_unit_struct!($name);
        implement_command!($name: self; f { f.write_str($ansi) });
    };
}

macro_rules! define_cmd_1 {
    ($name:ident($arg:ident : $typ:ty), $prefix:literal, $suffix:literal) => {
        declare_n_struct!($name($arg : $typ));
        implement_command!($name: self; f {
            f.write_str($prefix)?;
            <_ as ::core::fmt::Display>::fmt(&self.0, f)?;
            f.write_str($suffix)
        });
    };
}

macro_rules! define_cmd_2 {
    ($name:ident($arg1:ident : $typ1:ty, $arg2:ident : $typ2:ty), $prefix:literal, $suffix:literal) => {
        declare_n_struct!($name($arg1 : $typ1, $arg2 : $typ2));
        implement_command!($name: self; f {
            f.write_str($prefix)?;
            <_ as ::core::fmt::Display>::fmt(&self.0, f)?;
            f.write_str(";")?;
            <_ as ::core::fmt::Display>::fmt(&self.1, f)?;
            f.write_str($suffix)
        });
    };
}

macro_rules! implement_sgr {
    ($name:ident : $selfish:ident ; $output:ident $body:block) => {
        impl $crate::Command for $name {}

        impl $crate::Sgr for $name {
            #[inline]
            fn write_param(&$selfish, $output: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $body
            }
        }

        impl ::core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str("\x1b[")?;
                $crate::Sgr::write_param(self, f)?;
                f.write_str("m")
            }
        }
    };
}

// ====================================== Library ======================================

// ------------------------------------- Styling ---------------------------------------

declare_unit_struct!(ResetStyle);
implement_sgr!(ResetStyle: self; f { f.write_str("0") });

declare_n_struct!(Decorate(decoration: Decoration));
implement_sgr!(Decorate: self; f {
    <_ as ::core::fmt::Display>::fmt(&self.0.enable_sgr(), f)
});

declare_n_struct!(Undecorate(decoration: Decoration));
implement_sgr!(Undecorate: self; f {
    <_ as ::core::fmt::Display>::fmt(&self.0.disable_sgr(), f)
});

declare_n_struct!(SetForeground(color: Color));
implement_sgr!(SetForeground: self; f {
    <_ as ::core::fmt::Display>::fmt(&ColorParams::new(self.0, Layer::Foreground), f)
});

declare_n_struct!(SetBackground(color: Color));
implement_sgr!(SetBackground: self; f {
    <_ as ::core::fmt::Display>::fmt(&ColorParams::new(self.0, Layer::Background), f)
});

// --------------------------------- Screen Management ---------------------------------

define_unit_command!(EnterAlternateScreen, "\x1b[?1049h");
define_unit_command!(ExitAlternateScreen, "\x1b[?1049l");

define_unit_command!(EraseScreen, "\x1b[2J");
define_unit_command!(EraseLine, "\x1b[2K");
define_unit_command!(EraseRestOfLine, "\x1b[K");

// ------------------------------------- Scrolling -------------------------------------

define_cmd_1!(ScrollUp(rows: u16), "\x1b[", "S");
define_cmd_1!(ScrollDown(rows: u16), "\x1b[", "T");

define_cmd_2!(SetScrollRegion(top: u16, bottom: u16), "\x1b[", "r");
define_unit_command!(ResetScrollRegion, "\x1b[r");

// --------------------------------- Cursor Management ---------------------------------

declare_n_struct!(SetCursor(style: CursorStyle));
implement_command!(SetCursor: self; f {
    f.write_str("\x1b[")?;
    <_ as ::core::fmt::Display>::fmt(&(self.0 as u8), f)?;
    f.write_str(" q")
});

define_unit_command!(HideCursor, "\x1b[?25l");
define_unit_command!(ShowCursor, "\x1b[?25h");

define_cmd_1!(MoveUp(rows: u16), "\x1b[", "A");
define_cmd_1!(MoveDown(rows: u16), "\x1b[", "B");
define_cmd_1!(MoveRight(columns: u16), "\x1b[", "C");
define_cmd_1!(MoveLeft(columns: u16), "\x1b[", "D");

define_cmd_2!(MoveTo(row: u16, column: u16), "\x1b[", "H");

define_cmd_1!(MoveToColumn(column: u16), "\x1b[", "G");
define_cmd_1!(MoveToRow(row: u16), "\x1b[", "d");

define_unit_command!(SaveCursorPosition, "\x1b7");
define_unit_command!(RestoreCursorPosition, "\x1b8");

/// The unit `RequestCursorPosition` command.
///
/// The terminal responds with a cursor position report, which the tokenizer
/// surfaces as a control sequence and
/// [`CursorPosition`](crate::event::CursorPosition) decodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestCursorPosition;
implement_command!(RequestCursorPosition: self; f { f.write_str("\x1b[6n") });

// --------------------------------- Window Management ---------------------------------

/// The `SetWindowTitle(String)` command.
///
/// This command cannot be copied, only cloned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetWindowTitle(pub String);
implement_command!(SetWindowTitle: self; f {
    f.write_str("\x1b]2;")?;
    f.write_str(self.0.as_str())?;
    f.write_str("\x1b\\")
});

// ------------------------------------ Hyperlinks -------------------------------------

/// The `Link(ID, HREF, TEXT)` command.
///
/// This command cannot be copied, only cloned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link(Option<String>, String, String);

impl Link {
    /// Create a new hyperlink with the given URL and text.
    pub fn new<H, T>(href: H, text: T) -> Self
    where
        H: Into<String>,
        T: Into<String>,
    {
        Self(None, href.into(), text.into())
    }

    /// Create a new hyperlink with the given ID, URL, and text.
    pub fn with_id<I, H, T>(id: Option<I>, href: H, text: T) -> Self
    where
        I: Into<String>,
        H: Into<String>,
        T: Into<String>,
    {
        Self(id.map(core::convert::Into::into), href.into(), text.into())
    }
}

implement_command!(Link: self; f {
    if let Some(ref id) = self.0 {
        f.write_str("\x1b]8;id=")?;
        f.write_str(id)?;
        f.write_str(";")?;
    } else {
        f.write_str("\x1b]8;;")?;
    }

    f.write_str(self.1.as_str())?;
    f.write_str("\x1b\\")?;
    f.write_str(self.2.as_str())?;
    f.write_str("\x1b]8;;\x1b\\")
});

fn _assert_commands_are_commands() {
    fn is_command<C: Command>() {}

    is_command::<Link>();
    is_command::<SetWindowTitle>();
}
