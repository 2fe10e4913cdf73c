mod buffer;
mod machine;

use self::buffer::SequenceBuffer;
use self::machine::{transition, Action, State};

use crate::api::{Csi, Token};
use crate::err::{ErrorKind, Result};
use crate::opt::TokenizerOptions;
#[cfg(feature = "tracing")]
use crate::opt::Volume;
use crate::sgr;

// ================================================================================================

/// A streaming tokenizer for text and ANSI escape sequences.
///
/// This struct implements a state machine modelled after Paul Flo Williams'
/// [parser for DEC's ANSI-compatible
/// terminals](https://vt100.net/emu/dec_ansi_parser), though it recognizes
/// sequences at the granularity of characters and is considerably more
/// lenient. [`Tokenizer::tokenize`] turns a chunk of input into owned
/// [`Token`]s. When the chunk is not final, a partial escape sequence at its
/// end is retained and completed by the next chunk. Hence splitting the input
/// into chunks does not change the tokens, with the exception of text, which
/// may be split into several text tokens.
///
/// The tokenizer never fails on malformed input. Instead, it surfaces
/// malformed sequences as [`Token::UnknownEscape`]. It also enforces the
/// configurable limits of [`TokenizerOptions`]: Sequences that grow too long
/// are flushed as unknown escapes, and a chunk that produces too many tokens
/// is cut short, with its remaining input surfaced as text. The token limit is
/// approximate and may be exceeded by up to two tokens. In both cases,
/// the tokenizer resets itself.
///
/// # Example
///
/// ```
/// # use ansicodec::{SgrOp, Token, Tokenizer};
/// # use ansicolor::{Color, termco::AnsiColor};
/// let mut tokenizer = Tokenizer::default();
/// let mut tokens = tokenizer.tokenize("a\x1b[", false)?;
/// tokens.extend(tokenizer.tokenize("31mb", true)?);
///
/// assert_eq!(tokens, vec![
///     Token::Text("a".to_string()),
///     Token::Sgr(vec![SgrOp::SetForeground(Color::Basic16(AnsiColor::Red))]),
///     Token::Text("b".to_string()),
/// ]);
/// # Ok::<(), ansicodec::err::Error>(())
/// ```
pub struct Tokenizer {
    /// The options.
    options: TokenizerOptions,
    /// The state machine state for the escape sequence being recognized.
    state: State,
    /// The escape sequence being recognized.
    buffer: SequenceBuffer,
}

impl core::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

impl Tokenizer {
    /// Create a new tokenizer with the given options.
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            state: State::Ground,
            buffer: SequenceBuffer::default(),
        }
    }

    /// Get this tokenizer's options.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Determine whether this tokenizer is in the middle of an escape
    /// sequence.
    pub fn in_flight(&self) -> bool {
        !matches!(self.state, State::Ground)
    }

    /// Reset this tokenizer, discarding any buffered partial sequence.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.buffer.clear();
    }

    /// Tokenize the chunk and return the tokens.
    ///
    /// If `is_final` is `false`, a partial escape sequence at the end of the
    /// chunk is retained for the next invocation. Otherwise, it is flushed as
    /// an unknown escape.
    ///
    /// This method only fails if one of the limits in the tokenizer's options
    /// is zero.
    pub fn tokenize(&mut self, chunk: &str, is_final: bool) -> Result<Vec<Token>> {
        let mut tokens = Vec::with_capacity(4);
        self.tokenize_into(chunk, is_final, &mut tokens)?;
        Ok(tokens)
    }

    /// Tokenize the chunk and append the tokens to the given vector.
    ///
    /// This method behaves like [`Tokenizer::tokenize`], but reuses the
    /// caller's vector. The limit on tokens per chunk only counts tokens
    /// appended by this invocation.
    pub fn tokenize_into(
        &mut self,
        chunk: &str,
        is_final: bool,
        tokens: &mut Vec<Token>,
    ) -> Result<()> {
        if !self.options.is_valid() {
            return Err(ErrorKind::InvalidOption.into());
        }

        let base = tokens.len();
        let max_tokens = self.options.max_tokens_per_chunk();
        let mut text_start = 0;

        for (index, c) in chunk.char_indices() {
            if max_tokens <= tokens.len() - base {
                self.flush_remaining(chunk, text_start, tokens);
                return Ok(());
            }

            let (state, action) = transition(self.state, c);
            let next = index + c.len_utf8();

            match action {
                Action::Print => continue,
                Action::EmitControl => {
                    flush_text(chunk, text_start, index, tokens);
                    tokens.push(Token::Control(c));
                }
                Action::StartSequence => {
                    flush_text(chunk, text_start, index, tokens);
                    self.buffer.start(c);
                }
                Action::RetainParam => self.buffer.retain_param(c),
                Action::RetainIntermediate => self.buffer.retain_intermediate(c),
                _ => self.buffer.retain(c),
            }

            text_start = next;

            if self.exceeds_limit() {
                self.trip_limit(tokens);
                continue;
            }

            if action.is_dispatch() {
                let token = self.dispatch(action, c);
                tokens.push(token);
                self.buffer.clear();
            }
            self.state = state;
        }

        if matches!(self.state, State::Ground) {
            flush_text(chunk, text_start, chunk.len(), tokens);
        } else if is_final {
            tokens.push(Token::UnknownEscape(self.buffer.take_raw()));
            self.reset();
        }

        #[cfg(feature = "tracing")]
        if matches!(self.options.volume(), Volume::Detailed) {
            tracing::trace!(
                state = ?self.state,
                buffered = self.buffer.len(),
                tokens = tokens.len() - base,
                is_final,
                "end of chunk"
            );
        }

        Ok(())
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Safety limits

    /// Determine whether the buffered sequence exceeds its maximum length.
    fn exceeds_limit(&self) -> bool {
        let limit = if self.state.is_osc() {
            self.options.max_osc_length()
        } else {
            self.options.max_escape_length()
        };

        limit < self.buffer.len()
    }

    /// Flush the oversized sequence as an unknown escape and reset.
    fn trip_limit(&mut self, tokens: &mut Vec<Token>) {
        #[cfg(feature = "tracing")]
        if !matches!(self.options.volume(), Volume::Silent) {
            tracing::debug!(
                state = ?self.state,
                length = self.buffer.len(),
                "flushing oversized escape sequence"
            );
        }

        tokens.push(Token::UnknownEscape(self.buffer.take_raw()));
        self.reset();
    }

    /// Flush the buffered sequence and the rest of the chunk as text, then
    /// reset.
    fn flush_remaining(&mut self, chunk: &str, start: usize, tokens: &mut Vec<Token>) {
        #[cfg(feature = "tracing")]
        if !matches!(self.options.volume(), Volume::Silent) {
            tracing::debug!(
                max_tokens = self.options.max_tokens_per_chunk(),
                remaining = chunk.len() - start,
                "too many tokens, flushing remaining input as text"
            );
        }

        let mut text = self.buffer.take_raw();
        text.push_str(chunk.get(start..).unwrap_or(""));
        if !text.is_empty() {
            tokens.push(Token::Text(text));
        }
        self.reset();
    }

    // ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~
    // Token creation

    /// Create the token for the completed sequence ending with the character.
    fn dispatch(&self, action: Action, c: char) -> Token {
        match action {
            Action::DispatchEscape => Token::Esc {
                intermediates: self.buffer.intermediates().to_owned(),
                final_char: c,
            },
            Action::DispatchSingleShift => Token::Ss3(c),
            Action::DispatchCsi => self.new_csi_token(c),
            Action::DispatchOsc => new_osc_token(self.buffer.raw()),
            _ => Token::UnknownEscape(self.buffer.raw().to_owned()),
        }
    }

    /// Create a control sequence or SGR token.
    fn new_csi_token(&self, final_char: char) -> Token {
        let params = self.buffer.params();
        let intermediates = self.buffer.intermediates();
        let marker = self.buffer.marker();

        if final_char == 'm'
            && intermediates.is_empty()
            && marker.is_none()
            && self.options.decode_sgr()
        {
            return Token::Sgr(sgr::decode(&params));
        }

        Token::Csi(Csi {
            intermediates: intermediates.to_owned(),
            params,
            final_char,
            private_marker: marker,
        })
    }
}

// ------------------------------------------------------------------------------------------------

/// Push the text between the two byte offsets, unless it is empty.
fn flush_text(chunk: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
    if start < end {
        if let Some(text) = chunk.get(start..end) {
            tokens.push(Token::Text(text.to_owned()));
        }
    }
}

/// Create an OSC token from the raw sequence.
///
/// The payload sits between the introducer and terminator. Its code is the
/// number before the first semicolon, or -1 if there is no number.
fn new_osc_token(raw: &str) -> Token {
    let payload = raw
        .strip_prefix('\u{9d}')
        .or_else(|| raw.strip_prefix("\x1b]"))
        .unwrap_or(raw);
    let payload = payload
        .strip_suffix('\x07')
        .or_else(|| payload.strip_suffix("\x1b\\"))
        .or_else(|| payload.strip_suffix("\x1b\u{9c}"))
        .or_else(|| payload.strip_suffix('\u{9c}'))
        .unwrap_or(payload);

    let (code, data) = payload.split_once(';').unwrap_or((payload, ""));
    Token::Osc {
        code: parse_code(code),
        data: data.to_owned(),
    }
}

fn parse_code(s: &str) -> i64 {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        -1
    } else {
        i64::from(crate::util::parse_saturating(s))
    }
}

// ================================================================================================
