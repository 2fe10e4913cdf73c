//! Keyboard, mouse, and cursor events.
//!
//! Where [`Token`]s are a syntactic representation of terminal input, events
//! are a semantic one. Each event type implements `TryFrom<&Token>`, failing
//! with [`ErrorKind::NotAnEvent`] if the token does not encode the event.
//! Conversely, [`Writer`](crate::Writer) encodes events, which is useful for
//! testing applications and for relaying input.
//!
//! # Keyboard Input
//!
//! Terminals encode keyboard input with several overlapping conventions.
//! This module recognizes the legacy xterm encodings for the cursor keys,
//! <code>CSI&nbsp;1&nbsp;;&nbsp;<em>P<sub>mod</sub></em>&nbsp;<em>key</em></code>
//! and <code>SS3&nbsp;<em>key</em></code>, as well as for the editing and
//! function keys,
//! <code>CSI&nbsp;<em>P<sub>key</sub></em>&nbsp;;&nbsp;<em>P<sub>mod</sub></em>&nbsp;~</code>.
//! The modifier parameter is one plus the bit set of [`Modifier`]s.
//!
//! # Mouse Input
//!
//! Mouse events use the SGR encoding enabled by private mode 1006, i.e.,
//! <code>CSI&nbsp;&lt;&nbsp;<em>P<sub>b</sub></em>&nbsp;;&nbsp;<em>P<sub>x</sub></em>&nbsp;;&nbsp;<em>P<sub>y</sub></em>&nbsp;M</code>,
//! with a trailing `m` for button releases.

use crate::err::{Error, ErrorKind};
use crate::Token;

/// A logical modifier of keys and mouse button presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// The <kbd>shift</kbd> key.
    Shift = 0x01,
    /// The <kbd>alt</kbd> or <kbd>option</kbd> key.
    Alt = 0x02,
    /// The <kbd>control</kbd> key.
    Control = 0x04,
}

impl Modifier {
    const fn successor(&self) -> Option<Self> {
        use self::Modifier::*;

        Some(match *self {
            Shift => Alt,
            Alt => Control,
            Control => return None,
        })
    }

    /// Get the bit for the mouse button parameter.
    const fn mouse_bit(&self) -> u32 {
        (*self as u32) << 2
    }
}

impl From<Modifier> for Modifiers {
    fn from(value: Modifier) -> Self {
        Self(value as u8)
    }
}

impl<M: Into<Modifiers>> core::ops::Add<M> for Modifier {
    type Output = Modifiers;

    fn add(self, rhs: M) -> Self::Output {
        Modifiers(self as u8 | rhs.into().0)
    }
}

impl<M: Into<Modifiers>> core::ops::Add<M> for Modifiers {
    type Output = Modifiers;

    fn add(self, rhs: M) -> Self::Output {
        Self(self.0 | rhs.into().0)
    }
}

impl<M: Into<Modifiers>> core::ops::Sub<M> for Modifiers {
    type Output = Modifiers;

    fn sub(self, rhs: M) -> Self::Output {
        Self(self.0 & !rhs.into().0)
    }
}

/// A set of logical modifiers.
///
/// This struct defaults to no modifiers.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);

    /// Decode an xterm modifier parameter.
    ///
    /// The parameter is one plus the bit set of modifiers, with 1 denoting
    /// no modifiers and 8 denoting all three. Other values also denote no
    /// modifiers.
    pub const fn from_xterm(value: u32) -> Self {
        match value {
            2..=8 => Self((value - 1) as u8),
            _ => Self::NONE,
        }
    }

    /// Encode as an xterm modifier parameter.
    pub const fn to_xterm(&self) -> u32 {
        1 + self.0 as u32
    }

    /// Determine whether there are no active modifiers.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Get the number of active modifiers.
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Determine whether the given modifier is active.
    pub const fn has(&self, modifier: Modifier) -> bool {
        self.0 & modifier as u8 != 0
    }

    /// Get an iterator over the active modifiers.
    pub fn modifiers(&self) -> ModifierIter {
        ModifierIter {
            modifiers: *self,
            cursor: Some(Modifier::Shift),
            remaining: self.len(),
        }
    }

    fn from_mouse(cb: u32) -> Self {
        [Modifier::Shift, Modifier::Alt, Modifier::Control]
            .into_iter()
            .filter(|modifier| cb & modifier.mouse_bit() != 0)
            .fold(Self::NONE, |modifiers, modifier| modifiers + modifier)
    }

    fn to_mouse(self) -> u32 {
        self.modifiers()
            .fold(0, |cb, modifier| cb | modifier.mouse_bit())
    }
}

impl core::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.modifiers()).finish()
    }
}

/// An iterator over modifiers.
#[derive(Debug)]
pub struct ModifierIter {
    modifiers: Modifiers,
    cursor: Option<Modifier>,
    remaining: usize,
}

impl Iterator for ModifierIter {
    type Item = Modifier;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(modifier) = self.cursor {
            self.cursor = modifier.successor();
            if self.modifiers.has(modifier) {
                self.remaining -= 1;
                return Some(modifier);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ModifierIter {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl core::iter::FusedIterator for ModifierIter {}

// ------------------------------------------------------------------------------------------------

/// A key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    /// A function key between F1 and F12.
    F(u8),
    Escape,
    Enter,
    Tab,
    BackTab,
    Backspace,
}

impl Key {
    /// Get the key corresponding to SS3 and the given character.
    pub fn with_ss3(c: char) -> Option<Self> {
        use self::Key::*;

        Some(match c {
            'P' => F(1),
            'Q' => F(2),
            'R' => F(3),
            'S' => F(4),
            _ => return Self::with_cursor_final(c),
        })
    }

    /// Get the cursor key corresponding to the final character of a control
    /// sequence.
    fn with_cursor_final(c: char) -> Option<Self> {
        use self::Key::*;

        Some(match c {
            'A' => Up,
            'B' => Down,
            'C' => Right,
            'D' => Left,
            'H' => Home,
            'F' => End,
            _ => return None,
        })
    }

    /// Get the key corresponding to the code of a
    /// <code>CSI&nbsp;<em>code</em>&nbsp;~</code> sequence.
    pub fn with_tilde_code(code: u32) -> Option<Self> {
        use self::Key::*;

        Some(match code {
            2 => Insert,
            3 => Delete,
            5 => PageUp,
            6 => PageDown,
            15 => F(5),
            17..=21 => F((code - 11) as u8), // F6..=F10
            23 | 24 => F((code - 12) as u8), // F11, F12
            _ => return None,
        })
    }

    /// Get the final character for cursor keys.
    pub(crate) fn cursor_final(&self) -> Option<char> {
        use self::Key::*;

        Some(match *self {
            Up => 'A',
            Down => 'B',
            Right => 'C',
            Left => 'D',
            Home => 'H',
            End => 'F',
            _ => return None,
        })
    }

    /// Get the SS3 final character for F1 through F4.
    pub(crate) fn ss3_final(&self) -> Option<char> {
        match *self {
            Self::F(1) => Some('P'),
            Self::F(2) => Some('Q'),
            Self::F(3) => Some('R'),
            Self::F(4) => Some('S'),
            _ => None,
        }
    }

    /// Get the code for keys encoded as <code>CSI&nbsp;<em>code</em>&nbsp;~</code>.
    pub(crate) fn tilde_code(&self) -> Option<u32> {
        use self::Key::*;

        Some(match *self {
            Insert => 2,
            Delete => 3,
            PageUp => 5,
            PageDown => 6,
            F(5) => 15,
            F(n @ 6..=10) => u32::from(n) + 11,
            F(n @ 11..=12) => u32::from(n) + 12,
            _ => return None,
        })
    }
}

/// A key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event without modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a new key event with modifiers.
    pub fn with_modifiers<M: Into<Modifiers>>(key: Key, modifiers: M) -> Self {
        Self {
            key,
            modifiers: modifiers.into(),
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(value: Key) -> Self {
        Self::new(value)
    }
}

impl TryFrom<&Token> for KeyEvent {
    type Error = Error;

    fn try_from(value: &Token) -> Result<Self, Self::Error> {
        let event = match *value {
            Token::Csi(ref csi) if csi.private_marker.is_none() && csi.intermediates.is_empty() => {
                match (csi.final_char, csi.params.as_slice()) {
                    ('A' | 'B' | 'C' | 'D' | 'H' | 'F', &[]) => {
                        Key::with_cursor_final(csi.final_char).map(KeyEvent::new)
                    }
                    ('A' | 'B' | 'C' | 'D' | 'H' | 'F', &[1, modifier, ..]) => {
                        Key::with_cursor_final(csi.final_char).map(|key| {
                            KeyEvent::with_modifiers(key, Modifiers::from_xterm(modifier))
                        })
                    }
                    ('P' | 'Q' | 'R' | 'S', &[1, modifier, ..]) => Key::with_ss3(csi.final_char)
                        .map(|key| KeyEvent::with_modifiers(key, Modifiers::from_xterm(modifier))),
                    ('Z', &[]) => Some(KeyEvent::new(Key::BackTab)),
                    ('~', &[code]) => Key::with_tilde_code(code).map(KeyEvent::new),
                    ('~', &[code, modifier, ..]) => Key::with_tilde_code(code)
                        .map(|key| KeyEvent::with_modifiers(key, Modifiers::from_xterm(modifier))),
                    _ => None,
                }
            }
            Token::Ss3(c) => Key::with_ss3(c).map(KeyEvent::new),
            Token::Control('\t') => Some(KeyEvent::new(Key::Tab)),
            Token::Control('\r' | '\n') => Some(KeyEvent::new(Key::Enter)),
            Token::Text(ref text) if text == "\x7f" => Some(KeyEvent::new(Key::Backspace)),
            Token::UnknownEscape(ref raw) if raw == "\x1b" => Some(KeyEvent::new(Key::Escape)),
            _ => None,
        };

        event.ok_or_else(|| ErrorKind::NotAnEvent.into())
    }
}

// ------------------------------------------------------------------------------------------------

/// The kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Pressing a mouse button.
    Press,
    /// Releasing a mouse button.
    Release,
    /// Moving the mouse, possibly with a pressed button.
    Move,
    /// Turning the mouse wheel.
    Wheel,
}

/// The mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
    None = 3,
}

impl MouseButton {
    fn with_code(code: u32) -> Self {
        match code & 3 {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::None,
        }
    }
}

/// A mouse event.
///
/// Coordinates are 1-based. The wheel delta is positive when scrolling up
/// and negative when scrolling down. It is zero for other actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub column: u32,
    pub row: u32,
    pub button: MouseButton,
    pub wheel_delta: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event without button, wheel delta, and modifiers.
    pub const fn new(action: MouseAction, column: u32, row: u32) -> Self {
        Self {
            action,
            column,
            row,
            button: MouseButton::None,
            wheel_delta: 0,
            modifiers: Modifiers::NONE,
        }
    }

    /// Encode the button parameter of the SGR mouse encoding.
    pub(crate) fn button_code(&self) -> u32 {
        let cb = self.modifiers.to_mouse();
        match self.action {
            MouseAction::Move => cb | 32 | self.button as u32,
            MouseAction::Wheel => cb | 64 | u32::from(self.wheel_delta < 0),
            MouseAction::Press | MouseAction::Release => cb | self.button as u32,
        }
    }
}

impl TryFrom<&Token> for MouseEvent {
    type Error = Error;

    fn try_from(value: &Token) -> Result<Self, Self::Error> {
        let Token::Csi(ref csi) = *value else {
            return Err(ErrorKind::NotAnEvent.into());
        };

        if csi.private_marker != Some('<')
            || !csi.intermediates.is_empty()
            || !matches!(csi.final_char, 'M' | 'm')
        {
            return Err(ErrorKind::NotAnEvent.into());
        }

        let &[cb, column, row] = csi.params.as_slice() else {
            return Err(ErrorKind::NotAnEvent.into());
        };
        if column < 1 || row < 1 {
            return Err(ErrorKind::NotAnEvent.into());
        }

        let mut event = MouseEvent::new(MouseAction::Press, column, row);
        event.modifiers = Modifiers::from_mouse(cb);

        if cb & 64 != 0 {
            event.action = MouseAction::Wheel;
            event.wheel_delta = match cb & 3 {
                0 => 1,
                1 => -1,
                _ => 0,
            };
        } else {
            event.button = MouseButton::with_code(cb);
            if csi.final_char == 'm' {
                event.action = MouseAction::Release;
            } else if cb & 32 != 0 {
                event.action = MouseAction::Move;
            }
        }

        Ok(event)
    }
}

// ------------------------------------------------------------------------------------------------

/// A cursor position report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    pub row: u32,
    pub column: u32,
}

impl TryFrom<&Token> for CursorPosition {
    type Error = Error;

    fn try_from(value: &Token) -> Result<Self, Self::Error> {
        match *value {
            Token::Csi(ref csi) if csi.is_plain('R') => match *csi.params.as_slice() {
                [row, column] if 1 <= row && 1 <= column => Ok(Self { row, column }),
                _ => Err(ErrorKind::NotAnEvent.into()),
            },
            _ => Err(ErrorKind::NotAnEvent.into()),
        }
    }
}

/// The cursor style set with DECSCUSR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    #[default]
    Default = 0,
    BlinkingBlock = 1,
    SteadyBlock = 2,
    BlinkingUnderline = 3,
    SteadyUnderline = 4,
    BlinkingBar = 5,
    SteadyBar = 6,
}

impl TryFrom<u32> for CursorStyle {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        use self::CursorStyle::*;

        Ok(match value {
            0 => Default,
            1 => BlinkingBlock,
            2 => SteadyBlock,
            3 => BlinkingUnderline,
            4 => SteadyUnderline,
            5 => BlinkingBar,
            6 => SteadyBar,
            _ => return Err(ErrorKind::OutOfRange.into()),
        })
    }
}

impl TryFrom<&Token> for CursorStyle {
    type Error = Error;

    fn try_from(value: &Token) -> Result<Self, Self::Error> {
        match *value {
            Token::Csi(ref csi)
                if csi.final_char == 'q'
                    && csi.intermediates == " "
                    && csi.private_marker.is_none() =>
            {
                match *csi.params.as_slice() {
                    [] => Ok(Self::Default),
                    [style] => {
                        Self::try_from(style).map_err(|_| Error::from(ErrorKind::NotAnEvent))
                    }
                    _ => Err(ErrorKind::NotAnEvent.into()),
                }
            }
            _ => Err(ErrorKind::NotAnEvent.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Tokenizer;

    fn token(input: &str) -> Token {
        let mut tokens = Tokenizer::default()
            .tokenize(input, true)
            .expect("default options are valid");
        assert_eq!(tokens.len(), 1, "input is one token");
        tokens.remove(0)
    }

    fn key(input: &str) -> Option<KeyEvent> {
        KeyEvent::try_from(&token(input)).ok()
    }

    #[test]
    fn test_modifiers() {
        let modifiers = Modifier::Shift + Modifier::Control;
        assert_eq!(modifiers.len(), 2);
        assert!(modifiers.has(Modifier::Control));
        assert!(!modifiers.has(Modifier::Alt));
        assert_eq!(modifiers.to_xterm(), 6);
        assert_eq!(Modifiers::from_xterm(6), modifiers);
        assert_eq!(Modifiers::from_xterm(1), Modifiers::NONE);
        assert_eq!(Modifiers::from_xterm(9), Modifiers::NONE);
        assert_eq!(
            modifiers.modifiers().collect::<Vec<_>>(),
            vec![Modifier::Shift, Modifier::Control]
        );
        assert_eq!(format!("{:?}", modifiers), "{Shift, Control}");
        assert_eq!(modifiers - Modifier::Shift, Modifier::Control.into());

        for value in 1..=8 {
            assert_eq!(Modifiers::from_xterm(value).to_xterm(), value);
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(key("\x1b[A"), Some(KeyEvent::new(Key::Up)));
        assert_eq!(
            key("\x1b[1;5D"),
            Some(KeyEvent::with_modifiers(Key::Left, Modifier::Control))
        );
        assert_eq!(key("\x1b[2A"), None);
        assert_eq!(key("\x1bOH"), Some(KeyEvent::new(Key::Home)));
        assert_eq!(key("\x1bOS"), Some(KeyEvent::new(Key::F(4))));
        assert_eq!(key("\x1bOx"), None);
        assert_eq!(
            key("\x1b[1;2P"),
            Some(KeyEvent::with_modifiers(Key::F(1), Modifier::Shift))
        );
        assert_eq!(
            key("\x1b[1;7S"),
            Some(KeyEvent::with_modifiers(
                Key::F(4),
                Modifier::Alt + Modifier::Control
            ))
        );
        assert_eq!(key("\x1b[P"), None);
        assert_eq!(key("\x1b[Z"), Some(KeyEvent::new(Key::BackTab)));
        assert_eq!(key("\x1b[3~"), Some(KeyEvent::new(Key::Delete)));
        assert_eq!(
            key("\x1b[24;2~"),
            Some(KeyEvent::with_modifiers(Key::F(12), Modifier::Shift))
        );
        assert_eq!(key("\x1b[16~"), None);
        assert_eq!(key("\x1b[?3~"), None);
        assert_eq!(key("\t"), Some(KeyEvent::new(Key::Tab)));
        assert_eq!(key("\r"), Some(KeyEvent::new(Key::Enter)));
        assert_eq!(key("\x7f"), Some(KeyEvent::new(Key::Backspace)));
        assert_eq!(key("\x1b"), Some(KeyEvent::new(Key::Escape)));
        assert_eq!(key("x"), None);

        let error = KeyEvent::try_from(&token("x")).expect_err("text is not a key");
        assert_eq!(error.kind(), ErrorKind::NotAnEvent);

        for code in [2, 3, 5, 6, 15, 17, 18, 19, 20, 21, 23, 24] {
            let key = Key::with_tilde_code(code).expect("code is valid");
            assert_eq!(key.tilde_code(), Some(code));
        }
    }

    #[test]
    fn test_mouse() {
        let event = MouseEvent::try_from(&token("\x1b[<0;10;5M")).expect("valid mouse event");
        assert_eq!(event.action, MouseAction::Press);
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!((event.column, event.row), (10, 5));

        let event = MouseEvent::try_from(&token("\x1b[<22;1;1m")).expect("valid mouse event");
        assert_eq!(event.action, MouseAction::Release);
        assert_eq!(event.button, MouseButton::Right);
        assert_eq!(event.modifiers, Modifier::Shift + Modifier::Control);

        let event = MouseEvent::try_from(&token("\x1b[<35;3;4M")).expect("valid mouse event");
        assert_eq!(event.action, MouseAction::Move);
        assert_eq!(event.button, MouseButton::None);

        let event = MouseEvent::try_from(&token("\x1b[<65;3;4M")).expect("valid mouse event");
        assert_eq!(event.action, MouseAction::Wheel);
        assert_eq!(event.wheel_delta, -1);
        assert_eq!(event.button, MouseButton::None);
        assert_eq!(event.button_code(), 65);

        for input in ["\x1b[<0;0;5M", "\x1b[<0;1M", "\x1b[0;1;1M", "\x1b[<0;1;1q"] {
            assert!(MouseEvent::try_from(&token(input)).is_err(), "{:?}", input);
        }
    }

    #[test]
    fn test_cursor() {
        assert_eq!(
            CursorPosition::try_from(&token("\x1b[12;80R")).ok(),
            Some(CursorPosition { row: 12, column: 80 })
        );
        assert!(CursorPosition::try_from(&token("\x1b[0;80R")).is_err());
        assert!(CursorPosition::try_from(&token("\x1b[12R")).is_err());

        assert_eq!(
            CursorStyle::try_from(&token("\x1b[5 q")).ok(),
            Some(CursorStyle::BlinkingBar)
        );
        assert_eq!(
            CursorStyle::try_from(&token("\x1b[ q")).ok(),
            Some(CursorStyle::Default)
        );
        assert!(CursorStyle::try_from(&token("\x1b[7 q")).is_err());
        assert!(CursorStyle::try_from(&token("\x1b[5q")).is_err());
        assert_eq!(
            CursorStyle::try_from(9).map_err(|e| e.kind()),
            Err(ErrorKind::OutOfRange)
        );
    }
}
