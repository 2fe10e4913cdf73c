use crate::util::{is_semi_colon, parse_saturating};

/// A tokenizer's buffer for the escape sequence being recognized.
///
/// The buffer retains the raw characters of the sequence, which become the
/// payload of unknown escapes and operating system commands, as well as the
/// parameters, intermediates, and private marker of control sequences. All
/// strings are cleared but never shrunk, so that their capacity is reused
/// across sequences.
#[derive(Default)]
pub(super) struct SequenceBuffer {
    raw: String,
    params: String,
    intermediates: String,
    marker: Option<char>,
}

impl SequenceBuffer {
    /// Clear this buffer.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.params.clear();
        self.intermediates.clear();
        self.marker = None;
    }

    /// Start a new sequence with the given introducer.
    pub fn start(&mut self, c: char) {
        self.clear();
        self.raw.push(c);
    }

    /// Retain a character of the raw sequence.
    pub fn retain(&mut self, c: char) {
        self.raw.push(c);
    }

    /// Retain a parameter character.
    ///
    /// A private marker is recognized only as the very first character after
    /// the introducer.
    pub fn retain_param(&mut self, c: char) {
        self.raw.push(c);
        if self.params.is_empty()
            && self.intermediates.is_empty()
            && self.marker.is_none()
            && matches!(c, '<'..='?')
        {
            self.marker = Some(c);
        } else {
            self.params.push(c);
        }
    }

    /// Retain an intermediate character.
    pub fn retain_intermediate(&mut self, c: char) {
        self.raw.push(c);
        self.intermediates.push(c);
    }

    /// Get the length of the raw sequence in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Get the raw sequence.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Get the private marker.
    pub fn marker(&self) -> Option<char> {
        self.marker
    }

    /// Get the intermediates.
    pub fn intermediates(&self) -> &str {
        &self.intermediates
    }

    /// Parse the parameters.
    ///
    /// Parameters are separated by semicolons or colons. Empty parameters
    /// are zero, and parameters too large for `u32` saturate. Since a lone
    /// private marker is not a parameter, a sequence without parameter
    /// characters has no parameters.
    pub fn params(&self) -> Vec<u32> {
        if self.params.is_empty() {
            return Vec::new();
        }

        self.params.split(is_semi_colon).map(parse_saturating).collect()
    }

    /// Take the raw sequence, clearing the buffer.
    pub fn take_raw(&mut self) -> String {
        let raw = self.raw.clone();
        self.clear();
        raw
    }
}

impl core::fmt::Debug for SequenceBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SequenceBuffer")
            .field("raw", &crate::util::nicely(&self.raw))
            .field("params", &self.params)
            .field("intermediates", &self.intermediates)
            .field("marker", &self.marker)
            .field("capacity", &self.raw.capacity())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::SequenceBuffer;

    #[test]
    fn test_params() {
        let mut buffer = SequenceBuffer::default();
        buffer.start('\u{9b}');
        assert_eq!(buffer.params(), Vec::<u32>::new());

        for c in "?1;;4:99999999999".chars() {
            buffer.retain_param(c);
        }
        assert_eq!(buffer.marker(), Some('?'));
        assert_eq!(buffer.params(), vec![1, 0, 4, u32::MAX]);

        buffer.start('\x1b');
        buffer.retain('[');
        for c in "1?".chars() {
            buffer.retain_param(c);
        }
        buffer.retain_intermediate(' ');
        assert_eq!(buffer.marker(), None);
        assert_eq!(buffer.params(), vec![1]);
        assert_eq!(buffer.intermediates(), " ");
        assert_eq!(buffer.raw(), "\x1b[1? ");
        assert_eq!(buffer.len(), 5);

        assert_eq!(buffer.take_raw(), "\x1b[1? ");
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.intermediates(), "");
    }
}
