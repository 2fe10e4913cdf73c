//! # ANSI Codec
//!
//! This crate converts between text with embedded ANSI escape sequences and
//! a structured representation thereof. It has two directions:
//!
//!   * A streaming [`Tokenizer`] turns chunks of terminal output (or input)
//!     into owned [`Token`]s. It never fails on malformed input, retains
//!     partial escape sequences between chunks, and enforces configurable
//!     limits on sequence length and tokens per chunk. SGR sequences are
//!     decoded into [`SgrOp`]s.
//!   * A [`Writer`] encodes text, styles, and many other control sequences
//!     into a [`Sink`]. It adapts its output to the sink's
//!     [`Capabilities`](opt::Capabilities) and computes minimal style
//!     transitions, so that unchanged attributes are never rewritten.
//!
//! On top of these, the crate provides:
//!
//!   * The [`styled`] module's parser, which folds tokens into runs of
//!     uniformly styled and linked text.
//!   * The [`event`] module's key, mouse, and cursor report events, which
//!     can be recovered from tokens and encoded by the writer.
//!   * The [`cmd`] module's library of [`Command`]s, which display as fixed
//!     escape sequences independent of capabilities.
//!
//! Colors and styles come from the [`ansicolor`] crate.
//!
//!
//! # Example
//!
//! ```
//! # use ansicodec::{opt::Capabilities, SgrOp, Token, Tokenizer, Writer};
//! # use ansicolor::{ColorTier, style::Style, termco::AnsiColor};
//! let caps = Capabilities::builder()
//!     .color_tier(ColorTier::Colors256)
//!     .build();
//! let mut writer = Writer::new(String::new(), caps);
//!
//! let from = Style::DEFAULT.with_foreground(AnsiColor::Red).bold();
//! let to = Style::DEFAULT.with_foreground(AnsiColor::Red);
//! writer.transition(&from, &to)?.text("plain red")?;
//! assert_eq!(writer.sink(), "\x1b[22mplain red");
//!
//! let tokens = Tokenizer::default().tokenize(writer.sink(), true)?;
//! assert_eq!(tokens[0], Token::Sgr(vec![
//!     SgrOp::SetDecoration(ansicolor::style::Decoration::Bold, false),
//!     SgrOp::SetDecoration(ansicolor::style::Decoration::Dim, false),
//! ]));
//! # Ok::<(), ansicodec::err::Error>(())
//! ```
//!
//!
//! # Logging
//!
//! With the default `tracing` feature, the tokenizer and writer report
//! noteworthy events through the [`tracing`](https://docs.rs/tracing) crate,
//! if so configured with their options' [`Volume`](opt::Volume).

mod api;
pub mod cmd;
pub mod err;
pub mod event;
pub mod opt;
mod scan;
pub mod sgr;
pub mod styled;
pub mod util;
mod writer;

pub use api::{Command, Control, Csi, Sgr, Token};
pub use scan::Tokenizer;
pub use sgr::SgrOp;
pub use writer::{FmtSink, IoSink, Sink, Writer};
