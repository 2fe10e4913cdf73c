//! Helper module with utilities for strings containing controls.

use core::fmt;

/// Nicely format a character.
fn format_nicely<W>(c: char, output: &mut W) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    if (' '..='~').contains(&c) || '\u{a0}' <= c {
        return output.write_char(c);
    }

    let replacement = match c {
        // Letters are math sans-serif Unicode letters and at least one letter
        // is not a hexadecimal digit.
        '\x00' => "‹𝗇𝗎𝗅›",
        '\x07' => "‹𝖻𝖾𝗅›",
        '\x08' => "‹𝖻s›",
        '\x09' => "‹𝗁𝗍›",
        '\x0a' => "‹𝗅𝖿›",
        '\x0b' => "‹𝗏𝗍›",
        '\x0d' => "‹𝖼𝗋›",

        '\x18' => "‹𝖼𝖺𝗇›",
        '\x1a' => "‹𝗌𝗎𝖻›",
        '\x1b' => "‹𝖾𝗌𝖼›",

        '\x7f' => "‹𝖽𝖾𝗅›",

        '\u{90}' => "‹𝖽𝖼𝗌›",
        '\u{98}' => "‹𝗌𝗈𝗌›",
        '\u{9b}' => "‹𝖼𝗌𝗂›",
        '\u{9c}' => "‹𝗌𝗍›",
        '\u{9d}' => "‹𝗈𝗌𝖼›",
        '\u{9e}' => "‹𝗉𝗆›",
        '\u{9f}' => "‹𝖺𝗉𝖼›",

        _ => "",
    };
    if !replacement.is_empty() {
        return output.write_str(replacement);
    }

    output.write_fmt(format_args!("‹{:02x}›", c as u32))
}

/// A newtype for nicely formatting a string.
struct StringNicely<'a>(&'a str);

impl fmt::Display for StringNicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            if c == '"' {
                f.write_str("\\\"")?;
            } else {
                format_nicely(c, f)?;
            }
        }
        f.write_str("\"")
    }
}

impl fmt::Debug for StringNicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A newtype for nicely formatting a character.
struct CharNicely(char);

impl fmt::Display for CharNicely {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("'")?;
        format_nicely(self.0, f)?;
        f.write_str("'")
    }
}

impl fmt::Debug for CharNicely {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Turn the string into a value that displays nicely.
///
/// Printable characters display as is, common C0 and C1 controls display as
/// two- or three-letter mnemonics, e.g., `‹𝖾𝗌𝖼›`, and all other controls
/// display as two-digit hexadecimal numbers, e.g., `‹17›`.
///
/// ```
/// # use ansicodec::util::nicely;
/// assert_eq!(format!("{}", nicely("\x1b[1m\x07")), "\"‹𝖾𝗌𝖼›[1m‹𝖻𝖾𝗅›\"");
/// ```
pub fn nicely(s: &str) -> impl fmt::Debug + fmt::Display + '_ {
    StringNicely(s)
}

/// Turn the character into a value that displays nicely.
pub fn nicely_char(c: char) -> impl fmt::Debug + fmt::Display {
    CharNicely(c)
}

// ------------------------------------------------------------------------------------------------

/// Determine whether the character is a semi colon, i.e., semicolon or colon.
pub(crate) fn is_semi_colon(c: char) -> bool {
    c == ';' || c == ':'
}

/// Parse the leading decimal digits of the string, saturating at
/// `u32::MAX`. Other characters are ignored.
pub(crate) fn parse_saturating(s: &str) -> u32 {
    s.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0_u32, |n, d| n.saturating_mul(10).saturating_add(d))
}
