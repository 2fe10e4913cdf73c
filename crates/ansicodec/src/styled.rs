//! Helper module turning ANSI text into styled runs.
//!
//! A [`StyledTextParser`] interprets the SGR and hyperlink sequences of its
//! input and attaches the resulting style and link to each run of text. It
//! does not emulate a terminal. Cursor motion and other sequences are
//! ignored, and runs appear in input order.

use ansicolor::style::Style;

use crate::api::Token;
use crate::err::Result;
use crate::opt::TokenizerOptions;
use crate::scan::Tokenizer;
use crate::sgr;

/// A hyperlink established with OSC 8.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hyperlink {
    pub uri: String,
    pub id: Option<String>,
}

impl Hyperlink {
    /// Parse the data of an OSC 8 sequence.
    ///
    /// The data comprises colon-separated parameters and the URI, separated
    /// by a semicolon. This function returns `None` if the semicolon is
    /// missing, `Some(None)` for an empty URI, which ends the current link,
    /// and `Some(Some(link))` otherwise.
    fn parse(data: &str) -> Option<Option<Self>> {
        let (params, uri) = data.split_once(';')?;
        if uri.is_empty() {
            return Some(None);
        }

        let id = params
            .split(':')
            .find_map(|param| param.strip_prefix("id="))
            .map(str::to_string);

        Some(Some(Self {
            uri: uri.to_string(),
            id,
        }))
    }
}

/// A run of text with uniform style and hyperlink.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyledRun {
    pub text: String,
    pub style: Style,
    pub hyperlink: Option<Hyperlink>,
}

/// A parser from ANSI text to styled runs.
///
/// The parser starts with the default style and no hyperlink. Since the
/// style and hyperlink carry over between chunks, a stream can be parsed
/// chunk by chunk:
///
/// ```
/// # use ansicodec::styled::StyledTextParser;
/// # use ansicolor::{style::Style, termco::AnsiColor};
/// let mut parser = StyledTextParser::default();
/// let mut runs = parser.parse("a\x1b[1;3", false)?;
/// runs.extend(parser.parse("1mb", true)?);
///
/// assert_eq!(runs.len(), 2);
/// assert_eq!(runs[0].style, Style::DEFAULT);
/// assert_eq!(runs[1].text, "b");
/// assert_eq!(runs[1].style, Style::DEFAULT.bold().with_foreground(AnsiColor::Red));
/// # Ok::<(), ansicodec::err::Error>(())
/// ```
#[derive(Debug)]
pub struct StyledTextParser {
    tokenizer: Tokenizer,
    tokens: Vec<Token>,
    style: Style,
    hyperlink: Option<Hyperlink>,
}

impl Default for StyledTextParser {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

impl StyledTextParser {
    /// Create a new parser whose tokenizer uses the options.
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(options),
            tokens: Vec::new(),
            style: Style::DEFAULT,
            hyperlink: None,
        }
    }

    /// Get the current style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Get the current hyperlink.
    pub fn hyperlink(&self) -> Option<&Hyperlink> {
        self.hyperlink.as_ref()
    }

    /// Restore the default style, drop the hyperlink, and discard any
    /// partial escape sequence.
    pub fn reset(&mut self) {
        self.tokenizer.reset();
        self.style = Style::DEFAULT;
        self.hyperlink = None;
    }

    /// Parse the chunk into styled runs.
    ///
    /// This method fails only if the tokenizer options are invalid.
    pub fn parse(&mut self, chunk: &str, is_final: bool) -> Result<Vec<StyledRun>> {
        self.tokens.clear();
        self.tokenizer
            .tokenize_into(chunk, is_final, &mut self.tokens)?;

        let mut runs = Vec::with_capacity(self.tokens.len());
        for token in self.tokens.drain(..) {
            match token {
                Token::Text(text) => {
                    if !text.is_empty() {
                        runs.push(StyledRun {
                            text,
                            style: self.style,
                            hyperlink: self.hyperlink.clone(),
                        });
                    }
                }
                Token::Control(c) => runs.push(StyledRun {
                    text: c.to_string(),
                    style: self.style,
                    hyperlink: self.hyperlink.clone(),
                }),
                Token::Sgr(ops) => sgr::replay(&ops, &mut self.style),
                // The tokenizer leaves SGR undecoded when so configured.
                Token::Csi(csi) if csi.is_plain('m') => {
                    sgr::replay(&sgr::decode(&csi.params), &mut self.style);
                }
                Token::Osc { code: 8, data } => {
                    if let Some(link) = Hyperlink::parse(&data) {
                        self.hyperlink = link;
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }
}
