use core::fmt;

use ansicolor::style::{Decoration, Decorations, Layer, Style};
use ansicolor::termco::Rgb;
use ansicolor::{Color, ColorTier};

use crate::err::{Error, ErrorKind, Result};
use crate::event::{CursorStyle, Key, KeyEvent, MouseAction, MouseEvent};
use crate::opt::{Capabilities, OscTerminator};
#[cfg(feature = "tracing")]
use crate::opt::Volume;
use crate::sgr::ColorParams;

/// An output sink.
///
/// A sink accepts string slices and formatted output. This crate implements
/// the trait for `String` as well as for the [`FmtSink`] and [`IoSink`]
/// adapters, which wrap any [`fmt::Write`] and [`std::io::Write`],
/// respectively.
pub trait Sink {
    /// Write the string slice.
    fn write_str(&mut self, s: &str) -> Result<()>;

    /// Write the formatted arguments. This method makes the sink usable
    /// with the `write!` macro.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()>;

    /// Write the character.
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut buffer = [0; 4];
        self.write_str(c.encode_utf8(&mut buffer))
    }

    /// Flush the sink.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Sink for String {
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        fmt::Write::write_fmt(self, args).map_err(Error::from)
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_str(&mut self, s: &str) -> Result<()> {
        (**self).write_str(s)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        (**self).write_fmt(args)
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        (**self).write_char(c)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// An adapter from [`fmt::Write`] to [`Sink`].
#[derive(Debug, Default)]
pub struct FmtSink<W>(pub W);

impl<W: fmt::Write> Sink for FmtSink<W> {
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.0.write_str(s).map_err(Error::from)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.0.write_fmt(args).map_err(Error::from)
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        self.0.write_char(c).map_err(Error::from)
    }
}

/// An adapter from [`std::io::Write`] to [`Sink`].
#[derive(Debug, Default)]
pub struct IoSink<W>(pub W);

impl<W: std::io::Write> Sink for IoSink<W> {
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.0.write_all(s.as_bytes()).map_err(Error::from)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.0.write_fmt(args).map_err(Error::from)
    }

    fn flush(&mut self) -> Result<()> {
        self.0.flush().map_err(Error::from)
    }
}

// ================================================================================================

fn csi_for(prefer_7bit: bool) -> &'static str {
    if prefer_7bit {
        "\x1b["
    } else {
        "\u{9b}"
    }
}

fn osc_for(prefer_7bit: bool) -> &'static str {
    if prefer_7bit {
        "\x1b]"
    } else {
        "\u{9d}"
    }
}

fn check_position(row: u32, column: u32) -> Result<()> {
    if row < 1 || column < 1 {
        Err(ErrorKind::OutOfRange.into())
    } else {
        Ok(())
    }
}

/// A writer of text and ANSI escape sequences to a [`Sink`].
///
/// Unlike [`Command`](crate::Command)s, a writer adapts its output to the
/// sink's [`Capabilities`]: It downgrades colors to the sink's color tier,
/// introduces sequences with 7-bit or C1 controls, terminates operating
/// system commands with the configured terminator, and omits hyperlinks if
/// unsupported. If escape sequences are disabled altogether, only
/// [`Writer::text`] produces output. Requesting an unsupported feature is
/// not an error.
///
/// All methods return the writer again, so that calls can be chained:
///
/// ```
/// # use ansicodec::{opt::Capabilities, Writer};
/// # use ansicolor::{style::Style, termco::AnsiColor};
/// let mut writer = Writer::new(String::new(), Capabilities::default());
/// writer
///     .style(&Style::default().bold().with_foreground(AnsiColor::Red))?
///     .text("Alert!")?
///     .reset()?;
/// assert_eq!(writer.sink(), "\x1b[22;1;31mAlert!\x1b[0m");
/// # Ok::<(), ansicodec::err::Error>(())
/// ```
///
/// # Style Transitions
///
/// [`Writer::transition`] computes the shortest SGR sequence that changes
/// the terminal's appearance from one style to another. Since SGR 22
/// disables both bold and dim, any change to either of them starts with 22,
/// even when only enabling one, followed by re-enabling whichever of bold
/// and dim the target style has. Then come the disabling and enabling parameters for the other
/// decorations, followed by changed colors. All parameters are combined into
/// a single escape sequence. If the styles are the same, the writer writes
/// nothing. In safe mode, every transition instead starts with a full reset
/// and then explicitly establishes the target style.
pub struct Writer<S> {
    sink: S,
    caps: Capabilities,
    codes: Vec<u32>,
}

impl<S: Sink> Writer<S> {
    /// Create a new writer for the sink with the capabilities.
    pub fn new(sink: S, caps: Capabilities) -> Self {
        Self {
            sink,
            caps,
            codes: Vec::with_capacity(16),
        }
    }

    /// Get the capabilities.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Get the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get the sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the writer and return its sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> Result<&mut Self> {
        self.sink.flush()?;
        Ok(self)
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Low-level output

    #[inline]
    fn enabled(&self) -> bool {
        self.caps.ansi_enabled()
    }

    fn write_csi(&mut self) -> Result<()> {
        self.sink.write_str(csi_for(self.caps.prefer_7bit_c1()))
    }

    /// Write a control sequence with a fixed body.
    fn csi(&mut self, body: &str) -> Result<&mut Self> {
        if self.enabled() {
            self.write_csi()?;
            self.sink.write_str(body)?;
        }
        Ok(self)
    }

    /// Write a control sequence with one count parameter.
    ///
    /// A count of zero is written as one, unless `omit_zero` is set, in
    /// which case the parameter is left out.
    fn csi_count(&mut self, n: u32, final_char: char, omit_zero: bool) -> Result<&mut Self> {
        if self.enabled() {
            self.write_csi()?;
            if n != 0 || !omit_zero {
                write!(self.sink, "{}", n.max(1))?;
            }
            self.sink.write_char(final_char)?;
        }
        Ok(self)
    }

    /// Write an escape sequence with a fixed body.
    fn esc(&mut self, body: &str) -> Result<&mut Self> {
        if self.enabled() {
            self.sink.write_char('\x1b')?;
            self.sink.write_str(body)?;
        }
        Ok(self)
    }

    fn write_osc(&mut self) -> Result<()> {
        self.sink.write_str(osc_for(self.caps.prefer_7bit_c1()))
    }

    fn write_osc_terminator(&mut self) -> Result<()> {
        let terminator = match self.caps.osc_terminator() {
            OscTerminator::Bell => "\x07",
            OscTerminator::StringTerminator if self.caps.prefer_7bit_c1() => "\x1b\\",
            OscTerminator::StringTerminator => "\u{9c}",
        };
        self.sink.write_str(terminator)
    }

    /// Write the SGR codes as a single escape sequence, unless there are no
    /// codes.
    fn write_codes(&mut self, prefer_7bit: bool) -> Result<()> {
        if self.codes.is_empty() {
            return Ok(());
        }

        self.sink.write_str(csi_for(prefer_7bit))?;
        for (index, code) in self.codes.iter().enumerate() {
            if 0 < index {
                self.sink.write_char(';')?;
            }
            write!(self.sink, "{}", code)?;
        }
        self.sink.write_char('m')
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Text and style

    /// Write the text verbatim, even if escape sequences are disabled.
    pub fn text(&mut self, text: &str) -> Result<&mut Self> {
        self.sink.write_str(text)?;
        Ok(self)
    }

    /// Reset the style with `CSI 0 m`.
    pub fn reset(&mut self) -> Result<&mut Self> {
        self.csi("0m")
    }

    /// Set the foreground color, downgrading it as necessary.
    pub fn foreground(&mut self, color: Color) -> Result<&mut Self> {
        self.color(color, Layer::Foreground)
    }

    /// Set the background color, downgrading it as necessary.
    pub fn background(&mut self, color: Color) -> Result<&mut Self> {
        self.color(color, Layer::Background)
    }

    fn color(&mut self, color: Color, layer: Layer) -> Result<&mut Self> {
        if !self.enabled() || self.caps.color_tier() == ColorTier::None {
            return Ok(self);
        }

        self.codes.clear();
        push_color(color, layer, &self.caps, &mut self.codes);
        self.write_codes(self.caps.prefer_7bit_c1())?;
        Ok(self)
    }

    /// Establish the style, starting from the default style.
    pub fn style(&mut self, style: &Style) -> Result<&mut Self> {
        self.transition(&Style::DEFAULT, &style.resolve_missing_from(&Style::DEFAULT))
    }

    /// Transition from one style to another.
    ///
    /// Missing colors of the source style are the default colors. Missing
    /// colors of the target style are the same as the source's colors.
    pub fn transition(&mut self, from: &Style, to: &Style) -> Result<&mut Self> {
        let caps = self.caps.clone();
        self.transition_with(from, to, &caps)
    }

    /// Transition from one style to another using the given capabilities
    /// instead of the writer's.
    pub fn transition_with(
        &mut self,
        from: &Style,
        to: &Style,
        caps: &Capabilities,
    ) -> Result<&mut Self> {
        if !caps.ansi_enabled() {
            return Ok(self);
        }

        transition_codes(from, to, caps, &mut self.codes);
        self.write_codes(caps.prefer_7bit_c1())?;
        Ok(self)
    }

    /// Enable the decorations.
    pub fn decorate<D: Into<Decorations>>(&mut self, decorations: D) -> Result<&mut Self> {
        if self.enabled() {
            self.codes.clear();
            push_enable(decorations.into(), &mut self.codes);
            self.write_codes(self.caps.prefer_7bit_c1())?;
        }
        Ok(self)
    }

    /// Disable the decorations.
    ///
    /// Since bold and dim share the same SGR parameter, disabling either
    /// disables both.
    pub fn undecorate<D: Into<Decorations>>(&mut self, decorations: D) -> Result<&mut Self> {
        if self.enabled() {
            self.codes.clear();
            push_disable(decorations.into(), &mut self.codes);
            self.write_codes(self.caps.prefer_7bit_c1())?;
        }
        Ok(self)
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Cursor motion

    /// Move the cursor up by n rows.
    pub fn cursor_up(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'A', false)
    }

    /// Move the cursor down by n rows.
    pub fn cursor_down(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'B', false)
    }

    /// Move the cursor right by n columns.
    pub fn cursor_forward(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'C', false)
    }

    /// Move the cursor left by n columns.
    pub fn cursor_back(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'D', false)
    }

    /// Move the cursor to the beginning of the n-th next line.
    pub fn next_line(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'E', false)
    }

    /// Move the cursor to the beginning of the n-th previous line.
    pub fn previous_line(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'F', false)
    }

    /// Move the cursor to the 1-based column.
    pub fn column(&mut self, column: u32) -> Result<&mut Self> {
        check_position(1, column)?;
        self.csi_count(column, 'G', false)
    }

    /// Move the cursor to the 1-based row.
    pub fn row(&mut self, row: u32) -> Result<&mut Self> {
        check_position(row, 1)?;
        self.csi_count(row, 'd', false)
    }

    /// Move the cursor forward by n tab stops.
    pub fn forward_tab(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'I', false)
    }

    /// Move the cursor back by n tab stops.
    pub fn back_tab(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'Z', false)
    }

    /// Move the cursor to the 1-based row and column with CUP.
    pub fn cursor_position(&mut self, row: u32, column: u32) -> Result<&mut Self> {
        self.position(row, column, 'H')
    }

    /// Move the cursor to the 1-based row and column with HVP.
    pub fn hv_position(&mut self, row: u32, column: u32) -> Result<&mut Self> {
        self.position(row, column, 'f')
    }

    fn position(&mut self, row: u32, column: u32, final_char: char) -> Result<&mut Self> {
        check_position(row, column)?;
        if self.enabled() {
            self.write_csi()?;
            write!(self.sink, "{};{}{}", row, column, final_char)?;
        }
        Ok(self)
    }

    /// Move the cursor up one line, scrolling if necessary.
    pub fn reverse_index(&mut self) -> Result<&mut Self> {
        self.esc("M")
    }

    /// Save cursor position and attributes with DECSC.
    pub fn save_cursor(&mut self) -> Result<&mut Self> {
        self.esc("7")
    }

    /// Restore cursor position and attributes with DECRC.
    pub fn restore_cursor(&mut self) -> Result<&mut Self> {
        self.esc("8")
    }

    /// Save the cursor position with `CSI s`.
    pub fn save_cursor_position(&mut self) -> Result<&mut Self> {
        self.csi("s")
    }

    /// Restore the cursor position with `CSI u`.
    pub fn restore_cursor_position(&mut self) -> Result<&mut Self> {
        self.csi("u")
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Tabs, character sets, keypad

    /// Set a tab stop at the current column.
    pub fn tab_set(&mut self) -> Result<&mut Self> {
        self.esc("H")
    }

    /// Clear the tab stop at the cursor's column.
    pub fn clear_tab_stop(&mut self) -> Result<&mut Self> {
        self.csi("0g")
    }

    /// Clear all tab stops.
    pub fn clear_all_tab_stops(&mut self) -> Result<&mut Self> {
        self.csi("3g")
    }

    /// Switch to the DEC line drawing character set or back to ASCII.
    pub fn line_drawing(&mut self, on: bool) -> Result<&mut Self> {
        self.esc(if on { "(0" } else { "(B" })
    }

    /// Switch the keypad to application or numeric mode.
    pub fn keypad_application(&mut self, on: bool) -> Result<&mut Self> {
        self.esc(if on { "=" } else { ">" })
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Erasing, editing, scrolling

    /// Erase in line. Mode 0 erases to the end, 1 to the beginning, and 2
    /// the whole line.
    pub fn erase_in_line(&mut self, mode: u32) -> Result<&mut Self> {
        self.csi_count(mode, 'K', true)
    }

    /// Erase in display. Mode 0 erases to the end, 1 to the beginning, 2
    /// the whole screen, and 3 the scrollback.
    pub fn erase_in_display(&mut self, mode: u32) -> Result<&mut Self> {
        self.csi_count(mode, 'J', true)
    }

    /// Erase the scrollback buffer.
    pub fn erase_scrollback(&mut self) -> Result<&mut Self> {
        self.csi("3J")
    }

    /// Erase n characters starting at the cursor, without moving it.
    pub fn erase_chars(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'X', false)
    }

    /// Insert n blank characters at the cursor.
    pub fn insert_chars(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, '@', false)
    }

    /// Delete n characters starting at the cursor.
    pub fn delete_chars(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'P', false)
    }

    /// Insert n blank lines at the cursor.
    pub fn insert_lines(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'L', false)
    }

    /// Delete n lines starting with the cursor line.
    pub fn delete_lines(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'M', false)
    }

    /// Scroll the scroll region up by n lines.
    pub fn scroll_up(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'S', false)
    }

    /// Scroll the scroll region down by n lines.
    pub fn scroll_down(&mut self, n: u32) -> Result<&mut Self> {
        self.csi_count(n, 'T', false)
    }

    /// Set the scroll region to the 1-based, inclusive rows.
    pub fn scroll_region(&mut self, top: u32, bottom: u32) -> Result<&mut Self> {
        if top < 1 || bottom < top {
            return Err(ErrorKind::OutOfRange.into());
        }

        if self.enabled() {
            self.write_csi()?;
            write!(self.sink, "{};{}r", top, bottom)?;
        }
        Ok(self)
    }

    /// Reset the scroll region to the full screen.
    pub fn reset_scroll_region(&mut self) -> Result<&mut Self> {
        self.csi("r")
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Modes

    /// Set or reset an ANSI mode.
    pub fn mode(&mut self, mode: u32, on: bool) -> Result<&mut Self> {
        if self.enabled() {
            self.write_csi()?;
            write!(self.sink, "{}{}", mode, if on { 'h' } else { 'l' })?;
        }
        Ok(self)
    }

    /// Set or reset a DEC private mode.
    pub fn private_mode(&mut self, mode: u32, on: bool) -> Result<&mut Self> {
        if self.enabled() {
            self.write_csi()?;
            write!(self.sink, "?{}{}", mode, if on { 'h' } else { 'l' })?;
        }
        Ok(self)
    }

    /// Toggle application cursor keys (DECCKM).
    pub fn cursor_keys_application(&mut self, on: bool) -> Result<&mut Self> {
        self.private_mode(1, on)
    }

    /// Toggle between 132 and 80 columns (DECCOLM).
    pub fn columns_132(&mut self, on: bool) -> Result<&mut Self> {
        self.private_mode(3, on)
    }

    /// Toggle cursor blinking.
    pub fn cursor_blinking(&mut self, on: bool) -> Result<&mut Self> {
        self.private_mode(12, on)
    }

    /// Show or hide the cursor (DECTCEM).
    pub fn show_cursor(&mut self, on: bool) -> Result<&mut Self> {
        self.private_mode(25, on)
    }

    /// Switch to or from the alternate screen, saving and restoring the cursor.
    pub fn alternate_screen(&mut self, on: bool) -> Result<&mut Self> {
        self.private_mode(1049, on)
    }

    /// Set the cursor style with DECSCUSR.
    pub fn cursor_style(&mut self, style: CursorStyle) -> Result<&mut Self> {
        if self.enabled() {
            self.write_csi()?;
            write!(self.sink, "{} q", style as u8)?;
        }
        Ok(self)
    }

    /// Perform a soft terminal reset with DECSTR.
    pub fn soft_reset(&mut self) -> Result<&mut Self> {
        self.csi("!p")
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Queries

    /// Request a cursor position report.
    pub fn request_cursor_position(&mut self) -> Result<&mut Self> {
        self.csi("6n")
    }

    /// Request the primary device attributes.
    pub fn request_device_attributes(&mut self) -> Result<&mut Self> {
        self.csi("c")
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Operating system commands

    fn osc(&mut self, code: u32, data: &str) -> Result<&mut Self> {
        if self.enabled() {
            self.write_osc()?;
            write!(self.sink, "{};", code)?;
            self.sink.write_str(data)?;
            self.write_osc_terminator()?;
        }
        Ok(self)
    }

    /// Set the window title.
    pub fn window_title(&mut self, title: &str) -> Result<&mut Self> {
        self.osc(2, title)
    }

    /// Set both icon name and window title.
    pub fn icon_and_window_title(&mut self, title: &str) -> Result<&mut Self> {
        self.osc(0, title)
    }

    /// Change a palette entry with OSC 4.
    pub fn palette_color(&mut self, index: u8, color: Rgb) -> Result<&mut Self> {
        if self.enabled() {
            self.write_osc()?;
            write!(
                self.sink,
                "4;{};rgb:{:02x}/{:02x}/{:02x}",
                index, color[0], color[1], color[2]
            )?;
            self.write_osc_terminator()?;
        }
        Ok(self)
    }

    /// Start a hyperlink with OSC 8. An empty ID is the same as no ID.
    pub fn begin_link(&mut self, uri: &str, id: Option<&str>) -> Result<&mut Self> {
        if self.enabled() && self.caps.supports_hyperlinks() {
            self.write_osc()?;
            self.sink.write_str("8;")?;
            if let Some(id) = id.filter(|id| !id.is_empty()) {
                self.sink.write_str("id=")?;
                self.sink.write_str(id)?;
            }
            self.sink.write_char(';')?;
            self.sink.write_str(uri)?;
            self.write_osc_terminator()?;
        }
        Ok(self)
    }

    /// End the current hyperlink.
    pub fn end_link(&mut self) -> Result<&mut Self> {
        if self.enabled() && self.caps.supports_hyperlinks() {
            self.write_osc()?;
            self.sink.write_str("8;;")?;
            self.write_osc_terminator()?;
        }
        Ok(self)
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Input events
    //
    // These methods produce terminal input, e.g., for testing applications.
    // Since terminals always use 7-bit controls for input, they ignore the
    // capabilities.

    /// Write a cursor position report.
    pub fn cursor_position_report(&mut self, row: u32, column: u32) -> Result<&mut Self> {
        check_position(row, column)?;
        write!(self.sink, "\x1b[{};{}R", row, column)?;
        Ok(self)
    }

    /// Write SS3 followed by the character.
    pub fn ss3(&mut self, final_char: char) -> Result<&mut Self> {
        self.sink.write_str("\x1bO")?;
        self.sink.write_char(final_char)?;
        Ok(self)
    }

    /// Write the mouse event in SGR encoding.
    pub fn mouse_event(&mut self, event: &MouseEvent) -> Result<&mut Self> {
        check_position(event.row, event.column)?;
        let final_char = if event.action == MouseAction::Release {
            'm'
        } else {
            'M'
        };
        write!(
            self.sink,
            "\x1b[<{};{};{}{}",
            event.button_code(),
            event.column,
            event.row,
            final_char
        )?;
        Ok(self)
    }

    /// Write the key event.
    ///
    /// With application cursor keys, unmodified cursor keys use SS3 instead
    /// of CSI. Unmodified F1 through F4 always use SS3, while modified ones
    /// use <code>CSI&nbsp;1;<em>modifiers</em>&nbsp;P</code> through `S`.
    pub fn key_event(&mut self, event: &KeyEvent, app_cursor_keys: bool) -> Result<&mut Self> {
        let modifiers = event.modifiers;

        match event.key {
            Key::Escape => return self.text("\x1b"),
            Key::Enter => return self.text("\r"),
            Key::Tab => return self.text("\t"),
            Key::BackTab => return self.text("\x1b[Z"),
            Key::Backspace => return self.text("\x7f"),
            _ => {}
        }

        if let Some(final_char) = event.key.cursor_final() {
            if !modifiers.is_empty() {
                write!(self.sink, "\x1b[1;{}{}", modifiers.to_xterm(), final_char)?;
            } else if app_cursor_keys {
                self.ss3(final_char)?;
            } else {
                write!(self.sink, "\x1b[{}", final_char)?;
            }
        } else if let Some(final_char) = event.key.ss3_final() {
            if modifiers.is_empty() {
                self.ss3(final_char)?;
            } else {
                write!(self.sink, "\x1b[1;{}{}", modifiers.to_xterm(), final_char)?;
            }
        } else if let Some(code) = event.key.tilde_code() {
            if modifiers.is_empty() {
                write!(self.sink, "\x1b[{}~", code)?;
            } else {
                write!(self.sink, "\x1b[{};{}~", code, modifiers.to_xterm())?;
            }
        }

        Ok(self)
    }
}

impl<S: fmt::Debug> fmt::Debug for Writer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("sink", &self.sink)
            .field("caps", &self.caps)
            .finish_non_exhaustive()
    }
}

// ================================================================================================
// SGR parameters

const INTENSITY: Decorations = Decorations::INTENSITY;

fn push_enable(decorations: Decorations, codes: &mut Vec<u32>) {
    codes.extend(decorations.iter().map(|d| u32::from(d.enable_sgr())));
}

fn push_disable(decorations: Decorations, codes: &mut Vec<u32>) {
    if !decorations.intersection(INTENSITY).is_empty() {
        codes.push(u32::from(Decoration::Bold.disable_sgr()));
    }
    codes.extend(
        (decorations - INTENSITY)
            .iter()
            .map(|d| u32::from(d.disable_sgr())),
    );
}

/// Push the parameters for the color, downgrading it to the color tier.
fn push_color(color: Color, layer: Layer, caps: &Capabilities, codes: &mut Vec<u32>) {
    let target = color.downgrade(caps.color_tier());

    #[cfg(feature = "tracing")]
    if target != color && matches!(caps.volume(), Volume::Detailed) {
        tracing::trace!(
            ?color,
            ?target,
            tier = ?caps.color_tier(),
            "downgraded color"
        );
    }

    codes.extend_from_slice(ColorParams::new(target, layer).as_slice());
}

/// Compute the SGR parameters for transitioning between styles.
fn transition_codes(from: &Style, to: &Style, caps: &Capabilities, codes: &mut Vec<u32>) {
    let from = from.resolve_missing_from(&Style::DEFAULT);
    let to = to.resolve_missing_from(&from);
    let has_color = caps.color_tier() != ColorTier::None;

    codes.clear();

    if caps.safe_mode() {
        codes.push(0);
        push_enable(to.decorations, codes);
        if has_color {
            if let Some(color) = to.foreground {
                push_color(color, Layer::Foreground, caps, codes);
            }
            if let Some(color) = to.background {
                push_color(color, Layer::Background, caps, codes);
            }
        }
        return;
    }

    // Bold and dim share SGR 22, so disable both before enabling either.
    if from.decorations.intersection(INTENSITY) != to.decorations.intersection(INTENSITY) {
        codes.push(22);
        push_enable(to.decorations.intersection(INTENSITY), codes);
    }

    push_disable(from.decorations - to.decorations - INTENSITY, codes);
    push_enable(to.decorations - from.decorations - INTENSITY, codes);

    if has_color {
        if from.foreground != to.foreground {
            if let Some(color) = to.foreground {
                push_color(color, Layer::Foreground, caps, codes);
            }
        }
        if from.background != to.background {
            if let Some(color) = to.background {
                push_color(color, Layer::Background, caps, codes);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{IoSink, Sink, Writer};
    use crate::err::ErrorKind;
    use crate::event::{
        CursorPosition, CursorStyle, Key, KeyEvent, Modifier, Modifiers, MouseAction,
        MouseButton, MouseEvent,
    };
    use crate::opt::{Capabilities, OscTerminator};
    use crate::sgr::replay;
    use crate::{Token, Tokenizer};
    use ansicolor::style::{Decoration, Decorations, Style};
    use ansicolor::termco::{AnsiColor, Rgb};
    use ansicolor::{Color, ColorTier};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Bernoulli, Uniform};

    fn writer() -> Writer<String> {
        Writer::new(String::new(), Capabilities::default())
    }

    fn writer_with(caps: Capabilities) -> Writer<String> {
        Writer::new(String::new(), caps)
    }

    fn tokenize(s: &str) -> Vec<Token> {
        Tokenizer::default()
            .tokenize(s, true)
            .expect("default options are valid")
    }

    #[test]
    fn test_transitions() {
        let red = Color::Basic16(AnsiColor::Red);
        let mut w = writer();

        w.transition(&Style::DEFAULT, &Style::DEFAULT.with_foreground(red))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[31m");

        let mut w = writer();
        let from = Style::DEFAULT.with_foreground(red).bold();
        let to = Style::DEFAULT.with_foreground(red);
        w.transition(&from, &to).expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[22m");

        let mut w = writer();
        let from = Style::DEFAULT.bold().italic();
        let to = Style::DEFAULT.dim().underline();
        w.transition(&from, &to).expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[22;2;23;4m");

        // A missing target color means no change.
        let mut w = writer();
        let from = Style::DEFAULT.with_background(red);
        let to = Style::default().blink();
        w.transition(&from, &to).expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[5m");

        let mut w = writer();
        let style = Style::DEFAULT
            .bold()
            .with_foreground(Color::rgb(1, 2, 3))
            .with_background(Color::Indexed256(17));
        w.transition(&style, &style).expect("writing to string succeeds");
        w.style(&Style::default()).expect("writing to string succeeds");
        assert!(w.sink().is_empty());
    }

    #[test]
    fn test_safe_mode() {
        let mut w = writer_with(Capabilities::builder().safe_mode(true).build());
        let to = Style::DEFAULT.bold().with_foreground(AnsiColor::Red);
        w.transition(&Style::DEFAULT, &to)
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[0;1;31;49m");
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let flag = Bernoulli::new(0.3).expect("probability is valid");
        let kind = Uniform::new(0_u8, 5).expect("range is valid");
        let byte = Uniform::new_inclusive(0_u8, 255).expect("range is valid");

        let color = |rng: &mut StdRng| -> Option<Color> {
            match rng.sample(&kind) {
                0 => None,
                1 => Some(Color::Default),
                2 => Some(Color::Basic16(AnsiColor::from_index_lossy(rng.sample(&byte)))),
                3 => Some(Color::Indexed256(rng.sample(&byte))),
                _ => Some(Color::rgb(rng.sample(&byte), rng.sample(&byte), rng.sample(&byte))),
            }
        };

        let style = |rng: &mut StdRng| -> Style {
            let decorations = [
                Decoration::Bold,
                Decoration::Dim,
                Decoration::Italic,
                Decoration::Underline,
                Decoration::Blink,
                Decoration::Invert,
                Decoration::Hidden,
                Decoration::Strikethrough,
            ]
            .into_iter()
            .filter(|_| rng.sample(&flag))
            .collect::<Decorations>();

            Style {
                foreground: color(rng),
                background: color(rng),
                decorations,
            }
        };

        for safe_mode in [false, true] {
            let caps = Capabilities::builder().safe_mode(safe_mode).build();

            for _ in 0..2_000 {
                let from = style(&mut rng).resolve_missing_from(&Style::DEFAULT);
                let to = style(&mut rng);
                let expected = to.resolve_missing_from(&from);

                let mut w = writer_with(caps.clone());
                w.transition(&from, &to).expect("writing to string succeeds");

                let mut actual = from;
                for token in tokenize(w.sink()) {
                    let Token::Sgr(ops) = token else {
                        panic!("unexpected token {:?}", token);
                    };
                    replay(&ops, &mut actual);
                }

                assert_eq!(actual, expected, "{:?} -> {:?}", from, to);
                if !safe_mode && from == expected {
                    assert!(w.sink().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_capabilities() {
        let red = Color::rgb(255, 0, 0);

        let mut w = writer_with(Capabilities::builder().color_tier(ColorTier::Colors16).build());
        w.foreground(red).expect("writing to string succeeds");
        w.background(Color::Indexed256(196)).expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[31m\x1b[41m");

        let mut w = writer_with(Capabilities::builder().color_tier(ColorTier::Colors256).build());
        w.style(&Style::DEFAULT.with_foreground(red))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[38;5;196m");

        let mut w = writer_with(Capabilities::builder().color_tier(ColorTier::None).build());
        w.foreground(red)
            .and_then(|w| w.style(&Style::DEFAULT.bold().with_background(red)))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[22;1m");

        let mut w = writer_with(Capabilities::no_ansi());
        w.style(&Style::DEFAULT.bold())
            .and_then(|w| w.cursor_position(1, 1))
            .and_then(|w| w.text("plain"))
            .and_then(|w| w.window_title("title"))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "plain");

        let mut w = writer_with(Capabilities::builder().prefer_7bit_c1(false).build());
        w.reset()
            .and_then(|w| w.window_title("x"))
            .and_then(|w| w.decorate(Decoration::Bold + Decoration::Italic))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\u{9b}0m\u{9d}2;x\u{9c}\u{9b}1;3m");
        assert_eq!(
            tokenize(w.sink())[1],
            Token::Osc {
                code: 2,
                data: "x".to_string()
            }
        );

        let mut w = writer_with(Capabilities::builder().supports_hyperlinks(false).build());
        w.begin_link("https://example.com", None)
            .and_then(|w| w.end_link())
            .expect("writing to string succeeds");
        assert!(w.sink().is_empty());
    }

    #[test]
    fn test_decorations() {
        let mut w = writer();
        w.decorate(Decoration::Underline)
            .and_then(|w| w.undecorate(Decoration::Bold + Decoration::Dim + Decoration::Hidden))
            .and_then(|w| w.undecorate(Decorations::NONE))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[4m\x1b[22;28m");
    }

    #[test]
    fn test_cursor_and_screen() {
        let mut w = writer();
        w.cursor_up(0)
            .and_then(|w| w.cursor_down(2))
            .and_then(|w| w.cursor_forward(3))
            .and_then(|w| w.cursor_back(4))
            .and_then(|w| w.column(5))
            .and_then(|w| w.row(6))
            .and_then(|w| w.cursor_position(7, 8))
            .and_then(|w| w.hv_position(9, 10))
            .expect("writing to string succeeds");
        assert_eq!(
            w.sink(),
            "\x1b[1A\x1b[2B\x1b[3C\x1b[4D\x1b[5G\x1b[6d\x1b[7;8H\x1b[9;10f"
        );

        let mut w = writer();
        w.erase_in_line(0)
            .and_then(|w| w.erase_in_display(2))
            .and_then(|w| w.erase_scrollback())
            .and_then(|w| w.insert_lines(0))
            .and_then(|w| w.scroll_region(2, 20))
            .and_then(|w| w.reset_scroll_region())
            .and_then(|w| w.scroll_down(1))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[K\x1b[2J\x1b[3J\x1b[1L\x1b[2;20r\x1b[r\x1b[1T");

        let mut w = writer();
        w.reverse_index()
            .and_then(|w| w.save_cursor())
            .and_then(|w| w.line_drawing(true))
            .and_then(|w| w.keypad_application(false))
            .and_then(|w| w.show_cursor(false))
            .and_then(|w| w.alternate_screen(true))
            .and_then(|w| w.mode(4, true))
            .and_then(|w| w.cursor_style(CursorStyle::SteadyUnderline))
            .and_then(|w| w.soft_reset())
            .and_then(|w| w.request_device_attributes())
            .expect("writing to string succeeds");
        assert_eq!(
            w.sink(),
            "\x1bM\x1b7\x1b(0\x1b>\x1b[?25l\x1b[?1049h\x1b[4h\x1b[4 q\x1b[!p\x1b[c"
        );

        let mut w = writer();
        for result in [
            w.cursor_position(0, 1).map(|_| ()),
            w.hv_position(1, 0).map(|_| ()),
            w.column(0).map(|_| ()),
            w.scroll_region(0, 5).map(|_| ()),
            w.scroll_region(5, 4).map(|_| ()),
            w.cursor_position_report(1, 0).map(|_| ()),
        ] {
            assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::OutOfRange));
        }
        assert!(w.sink().is_empty());
    }

    #[test]
    fn test_osc() {
        let mut w = writer();
        w.palette_color(1, Rgb::new(255, 0, 171))
            .and_then(|w| w.icon_and_window_title("hi"))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b]4;1;rgb:ff/00/ab\x1b\\\x1b]0;hi\x1b\\");

        let mut w = writer_with(
            Capabilities::builder()
                .osc_terminator(OscTerminator::Bell)
                .build(),
        );
        w.begin_link("https://example.com", Some("ex"))
            .and_then(|w| w.text("example"))
            .and_then(|w| w.end_link())
            .and_then(|w| w.begin_link("x", Some("")))
            .expect("writing to string succeeds");
        assert_eq!(
            w.sink(),
            "\x1b]8;id=ex;https://example.com\x07example\x1b]8;;\x07\x1b]8;;x\x07"
        );
    }

    #[test]
    fn test_input_events() {
        let keys = [
            KeyEvent::new(Key::Up),
            KeyEvent::with_modifiers(Key::End, Modifier::Alt + Modifier::Control),
            KeyEvent::new(Key::F(1)),
            KeyEvent::with_modifiers(Key::F(2), Modifier::Control),
            KeyEvent::new(Key::F(7)),
            KeyEvent::with_modifiers(Key::PageDown, Modifier::Shift),
            KeyEvent::new(Key::Escape),
            KeyEvent::new(Key::Enter),
            KeyEvent::new(Key::Tab),
            KeyEvent::new(Key::BackTab),
            KeyEvent::new(Key::Backspace),
        ];

        for app_cursor_keys in [false, true] {
            for key in keys {
                let mut w = writer();
                w.key_event(&key, app_cursor_keys)
                    .expect("writing to string succeeds");
                let tokens = tokenize(w.sink());
                assert_eq!(tokens.len(), 1, "{:?}", key);
                assert_eq!(KeyEvent::try_from(&tokens[0]).ok(), Some(key));
            }
        }

        let mut w = writer();
        w.key_event(&KeyEvent::new(Key::Left), true)
            .and_then(|w| w.key_event(&KeyEvent::new(Key::Left), false))
            .and_then(|w| w.key_event(&KeyEvent::new(Key::Insert), false))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1bOD\x1b[D\x1b[2~");

        let ctrl_f2 = KeyEvent::with_modifiers(Key::F(2), Modifier::Control);
        let shift_f4 = KeyEvent::with_modifiers(Key::F(4), Modifier::Shift);
        let mut w = writer();
        w.key_event(&KeyEvent::new(Key::F(3)), false)
            .and_then(|w| w.key_event(&ctrl_f2, true))
            .and_then(|w| w.key_event(&shift_f4, false))
            .expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1bOR\x1b[1;5Q\x1b[1;2S");

        let mut press = MouseEvent::new(MouseAction::Press, 5, 7);
        press.button = MouseButton::Left;
        press.modifiers = Modifier::Control.into();
        let mut release = MouseEvent::new(MouseAction::Release, 1, 1);
        release.button = MouseButton::Right;
        let motion = MouseEvent::new(MouseAction::Move, 80, 24);
        let mut wheel = MouseEvent::new(MouseAction::Wheel, 3, 3);
        wheel.wheel_delta = -1;
        wheel.modifiers = Modifiers::from_xterm(2);

        for event in [press, release, motion, wheel] {
            let mut w = writer();
            w.mouse_event(&event).expect("writing to string succeeds");
            let tokens = tokenize(w.sink());
            assert_eq!(tokens.len(), 1, "{:?}", event);
            assert_eq!(MouseEvent::try_from(&tokens[0]).ok(), Some(event));
        }

        let mut w = writer();
        w.mouse_event(&press).expect("writing to string succeeds");
        assert_eq!(w.sink(), "\x1b[<16;5;7M");
        assert!(w.mouse_event(&MouseEvent::new(MouseAction::Press, 0, 1)).is_err());

        let mut w = writer();
        w.cursor_position_report(3, 9)
            .expect("writing to string succeeds");
        assert_eq!(
            CursorPosition::try_from(&tokenize(w.sink())[0]).ok(),
            Some(CursorPosition { row: 3, column: 9 })
        );
    }

    #[test]
    fn test_sinks() {
        let mut w = Writer::new(IoSink(Vec::new()), Capabilities::default());
        w.reset()
            .and_then(|w| w.text("ok"))
            .and_then(|w| w.flush())
            .expect("writing to vector succeeds");
        assert_eq!(w.into_inner().0, b"\x1b[0mok".to_vec());

        let mut s = String::new();
        let mut w = Writer::new(&mut s, Capabilities::default());
        w.text("borrowed").expect("writing to string succeeds");
        w.sink_mut().write_char('!').expect("writing to string succeeds");
        drop(w);
        assert_eq!(s, "borrowed!");
    }
}
