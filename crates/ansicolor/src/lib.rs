//! # ANSI Color
//!
//! Terminal colors come in tiers. Some terminals only do the 16 extended ANSI
//! colors, others add the 256 indexed colors, and many modern terminals
//! accept 24-bit colors, too. This crate models colors in all four tiers,
//! counting the terminal's default color as the lowest tier, and downgrades
//! colors from higher to lower tiers.
//!
//! Its main abstractions are:
//!
//!   * [`Color`] is one of [`Color::Default`], [`Color::Basic16`],
//!     [`Color::Indexed256`], or [`Color::Rgb`].
//!   * [`ColorTier`] orders the tiers and [`Color::downgrade`] converts colors
//!     to lower tiers by picking the closest color in the lower tier.
//!   * The [`termco`] module has the supporting color representations
//!     [`AnsiColor`](termco::AnsiColor), [`EmbeddedRgb`](termco::EmbeddedRgb),
//!     [`GrayGradient`](termco::GrayGradient), and [`Rgb`](termco::Rgb).
//!   * The [`palette`] module has the reference values and nearest-color
//!     searches.
//!   * The [`style`] module defines [`Style`](style::Style) as a set of
//!     [`Decorations`](style::Decorations) combined with optional foreground
//!     and background colors.
//!
//! ```
//! # use ansicolor::{Color, ColorTier};
//! # use ansicolor::termco::AnsiColor;
//! let orange = Color::rgb(255, 135, 0);
//! assert_eq!(orange.downgrade(ColorTier::Colors256), Color::Indexed256(208));
//! assert_eq!(orange.downgrade(ColorTier::Colors16), Color::Basic16(AnsiColor::Yellow));
//! ```

mod error;
pub mod palette;
pub mod style;
pub mod termco;
mod util;

pub use error::OutOfBoundsError;
pub use termco::{Color, ColorTier};
