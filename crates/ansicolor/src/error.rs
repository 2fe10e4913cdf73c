//! Utility module with the color crate's error.

/// An out-of-bounds error.
///
/// This error indicates an index value that is out of bounds for some range.
/// The ranges used by this crate include:
///
///   * `0..=5` for coordinates of [`EmbeddedRgb`](crate::termco::EmbeddedRgb);
///   * `0..=15` for index values of [`AnsiColor`](crate::termco::AnsiColor);
///   * `0..=23` for the gray levels of [`GrayGradient`](crate::termco::GrayGradient);
///   * `0..=255` for index values of [`Color::Indexed256`](crate::Color::Indexed256);
///   * `16..=231` for index values of [`EmbeddedRgb`](crate::termco::EmbeddedRgb);
///   * `232..=255` for index values of [`GrayGradient`](crate::termco::GrayGradient).
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutOfBoundsError {
    pub value: u32,
    pub expected: core::ops::RangeInclusive<u32>,
}

impl OutOfBoundsError {
    /// Create a new out-of-bounds error.
    pub fn new<V: Into<u32>>(value: V, expected: core::ops::RangeInclusive<u32>) -> Self {
        Self {
            value: value.into(),
            expected,
        }
    }
}

impl core::fmt::Display for OutOfBoundsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "{} does not fit into range {}..={}",
            self.value,
            self.expected.start(),
            self.expected.end()
        ))
    }
}

impl std::error::Error for OutOfBoundsError {}

#[cfg(test)]
mod test {
    use super::OutOfBoundsError;

    #[test]
    fn test_display() {
        let error = OutOfBoundsError::new(16_u8, 0..=15);
        assert_eq!(format!("{}", error), "16 does not fit into range 0..=15");

        let error = OutOfBoundsError::new(300_u32, 0..=255);
        assert_eq!(error.value, 300);
        assert_eq!(error.expected, 0..=255);
    }
}
