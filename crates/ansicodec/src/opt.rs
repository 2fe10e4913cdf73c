//! Helper module with the options for tokenizers and writers.
//!
//! This module provides the [`TokenizerOptions`] for reading and the
//! [`Capabilities`] for writing, each with a corresponding builder.
//!
//!
//! # Example
//!
//! ```
//! # use ansicodec::opt::{Capabilities, OscTerminator, TokenizerOptions};
//! # use ansicolor::ColorTier;
//! let options = TokenizerOptions::builder()
//!     .max_osc_length(1_024)
//!     .build();
//! assert_eq!(options.max_osc_length(), 1_024);
//! assert!(options.decode_sgr());
//!
//! let caps = Capabilities::builder()
//!     .color_tier(ColorTier::Colors256)
//!     .osc_terminator(OscTerminator::Bell)
//!     .build();
//! assert_eq!(caps.color_tier(), ColorTier::Colors256);
//! assert!(caps.ansi_enabled());
//! ```

use ansicolor::ColorTier;

/// The diagnostic logging volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Volume {
    #[default]
    Silent,
    Regular,
    Detailed,
}

/// The terminator for operating system commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OscTerminator {
    /// The BEL control, which many terminals accept as a terminator.
    Bell,
    /// The string terminator, as specified by ECMA-48.
    #[default]
    StringTerminator,
}

// ====================================================================================================================
// Tokenizer Options
// ====================================================================================================================

#[derive(Clone, Debug)]
struct TokenizerData {
    volume: Volume,
    decode_sgr: bool,
    max_escape_length: usize,
    max_osc_length: usize,
    max_tokens_per_chunk: usize,
}

impl TokenizerData {
    pub const fn new() -> Self {
        Self {
            volume: Volume::Silent,
            decode_sgr: true,
            max_escape_length: 65_536,
            max_osc_length: 65_536,
            max_tokens_per_chunk: 16_384,
        }
    }
}

/// A builder of tokenizer options.
#[derive(Debug)]
pub struct TokenizerOptionBuilder(TokenizerData);

impl TokenizerOptionBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Enable or disable decoding of SGR sequences into operations.
    pub fn decode_sgr(&mut self, decode: bool) -> &mut Self {
        self.0.decode_sgr = decode;
        self
    }

    /// Set the maximum length in bytes for escape sequences other than
    /// operating system commands.
    pub fn max_escape_length(&mut self, length: usize) -> &mut Self {
        self.0.max_escape_length = length;
        self
    }

    /// Set the maximum length in bytes for operating system commands.
    pub fn max_osc_length(&mut self, length: usize) -> &mut Self {
        self.0.max_osc_length = length;
        self
    }

    /// Set the maximum number of tokens produced by a single call to
    /// [`Tokenizer::tokenize`](crate::Tokenizer::tokenize).
    ///
    /// The tokenizer checks the limit before each character. Since a single
    /// character may complete pending text as well as its own token, and the
    /// rest of the chunk becomes one more text token, a call may produce up
    /// to two tokens more than the limit.
    pub fn max_tokens_per_chunk(&mut self, count: usize) -> &mut Self {
        self.0.max_tokens_per_chunk = count;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> TokenizerOptions {
        TokenizerOptions(self.0.clone())
    }
}

/// Options for tokenizing.
///
/// All three limits must be positive. Since the builder does not validate
/// them, a zero limit is reported as an
/// [`ErrorKind::InvalidOption`](crate::err::ErrorKind::InvalidOption) when
/// first tokenizing.
#[derive(Clone, Debug)]
pub struct TokenizerOptions(TokenizerData);

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions(TokenizerData::new())
    }
}

impl TokenizerOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> TokenizerOptionBuilder {
        TokenizerOptionBuilder(TokenizerData::new())
    }

    /// Instantiate the default options but with regular debugging output
    /// enabled.
    pub fn with_log() -> TokenizerOptions {
        Self::builder().volume(Volume::Regular).build()
    }

    /// Instantiate the default options but with detailed debugging output
    /// enabled.
    pub fn with_detailed_log() -> TokenizerOptions {
        Self::builder().volume(Volume::Detailed).build()
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Determine whether SGR sequences are decoded.
    pub fn decode_sgr(&self) -> bool {
        self.0.decode_sgr
    }

    /// Get the maximum escape sequence length.
    pub fn max_escape_length(&self) -> usize {
        self.0.max_escape_length
    }

    /// Get the maximum operating system command length.
    pub fn max_osc_length(&self) -> usize {
        self.0.max_osc_length
    }

    /// Get the maximum number of tokens per chunk.
    pub fn max_tokens_per_chunk(&self) -> usize {
        self.0.max_tokens_per_chunk
    }

    /// Determine whether all limits are positive.
    pub(crate) fn is_valid(&self) -> bool {
        0 < self.0.max_escape_length
            && 0 < self.0.max_osc_length
            && 0 < self.0.max_tokens_per_chunk
    }
}

// ====================================================================================================================
// Capabilities
// ====================================================================================================================

#[derive(Clone, Debug)]
struct CapabilityData {
    volume: Volume,
    ansi_enabled: bool,
    color_tier: ColorTier,
    supports_hyperlinks: bool,
    prefer_7bit_c1: bool,
    safe_mode: bool,
    osc_terminator: OscTerminator,
}

impl CapabilityData {
    pub const fn new() -> Self {
        Self {
            volume: Volume::Silent,
            ansi_enabled: true,
            color_tier: ColorTier::TrueColor,
            supports_hyperlinks: true,
            prefer_7bit_c1: true,
            safe_mode: false,
            osc_terminator: OscTerminator::StringTerminator,
        }
    }
}

/// A builder of capabilities.
#[derive(Debug)]
pub struct CapabilityBuilder(CapabilityData);

impl CapabilityBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Enable or disable escape sequences altogether.
    pub fn ansi_enabled(&mut self, enabled: bool) -> &mut Self {
        self.0.ansi_enabled = enabled;
        self
    }

    /// Set the color tier.
    pub fn color_tier(&mut self, tier: ColorTier) -> &mut Self {
        self.0.color_tier = tier;
        self
    }

    /// Enable or disable hyperlinks.
    pub fn supports_hyperlinks(&mut self, supported: bool) -> &mut Self {
        self.0.supports_hyperlinks = supported;
        self
    }

    /// Prefer 7-bit `ESC`-prefixed controls over single-character C1
    /// controls.
    pub fn prefer_7bit_c1(&mut self, prefer: bool) -> &mut Self {
        self.0.prefer_7bit_c1 = prefer;
        self
    }

    /// Enable or disable safe mode, which always resets before styling.
    pub fn safe_mode(&mut self, safe: bool) -> &mut Self {
        self.0.safe_mode = safe;
        self
    }

    /// Set the terminator for operating system commands.
    pub fn osc_terminator(&mut self, terminator: OscTerminator) -> &mut Self {
        self.0.osc_terminator = terminator;
        self
    }

    /// Instantiate the capabilities.
    pub fn build(&self) -> Capabilities {
        Capabilities(self.0.clone())
    }
}

/// A description of what an output sink supports.
///
/// Writers consult the capabilities before emitting escape sequences.
/// Requesting a feature that is not supported is not an error; the request
/// simply has no effect.
#[derive(Clone, Debug)]
pub struct Capabilities(CapabilityData);

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities(CapabilityData::new())
    }
}

impl Capabilities {
    /// Create a new builder with the default capabilities.
    pub fn builder() -> CapabilityBuilder {
        CapabilityBuilder(CapabilityData::new())
    }

    /// Instantiate capabilities that disable all escape sequences.
    pub fn no_ansi() -> Capabilities {
        Self::builder()
            .ansi_enabled(false)
            .color_tier(ColorTier::None)
            .supports_hyperlinks(false)
            .build()
    }

    /// Instantiate capabilities based on the process environment.
    ///
    /// If the environment calls for plain text, the capabilities disable all
    /// escape sequences. Otherwise, they use the detected color tier.
    pub fn from_environment(has_tty: bool) -> Capabilities {
        match ColorTier::from_environment(has_tty) {
            Some(tier) => Self::builder().color_tier(tier).build(),
            None => Self::no_ansi(),
        }
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Determine whether escape sequences are enabled.
    pub fn ansi_enabled(&self) -> bool {
        self.0.ansi_enabled
    }

    /// Get the color tier.
    pub fn color_tier(&self) -> ColorTier {
        self.0.color_tier
    }

    /// Determine whether hyperlinks are supported.
    pub fn supports_hyperlinks(&self) -> bool {
        self.0.supports_hyperlinks
    }

    /// Determine whether 7-bit controls are preferred.
    pub fn prefer_7bit_c1(&self) -> bool {
        self.0.prefer_7bit_c1
    }

    /// Determine whether safe mode is enabled.
    pub fn safe_mode(&self) -> bool {
        self.0.safe_mode
    }

    /// Get the terminator for operating system commands.
    pub fn osc_terminator(&self) -> OscTerminator {
        self.0.osc_terminator
    }
}

#[cfg(test)]
mod test {
    use super::{Capabilities, ColorTier, OscTerminator, TokenizerOptions, Volume};

    #[test]
    fn test_defaults() {
        let options = TokenizerOptions::default();
        assert!(options.decode_sgr());
        assert_eq!(options.max_escape_length(), 65_536);
        assert_eq!(options.max_osc_length(), 65_536);
        assert_eq!(options.max_tokens_per_chunk(), 16_384);
        assert_eq!(options.volume(), Volume::Silent);
        assert!(options.is_valid());
        assert_eq!(TokenizerOptions::with_log().volume(), Volume::Regular);

        let options = TokenizerOptions::builder().max_tokens_per_chunk(0).build();
        assert!(!options.is_valid());

        let caps = Capabilities::default();
        assert!(caps.ansi_enabled());
        assert_eq!(caps.color_tier(), ColorTier::TrueColor);
        assert!(caps.supports_hyperlinks());
        assert!(caps.prefer_7bit_c1());
        assert!(!caps.safe_mode());
        assert_eq!(caps.osc_terminator(), OscTerminator::StringTerminator);

        let caps = Capabilities::no_ansi();
        assert!(!caps.ansi_enabled());
        assert_eq!(caps.color_tier(), ColorTier::None);
    }
}
