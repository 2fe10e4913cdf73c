//! Text decorations and terminal styles.
//!
//! This module supports styling terminal appearance through [`Style`]s,
//! which combine [`Decorations`] with an optional foreground
//! [`Color`](crate::Color) and an optional background
//! [`Color`](crate::Color). It also defines [`Layer`] to distinguish between
//! foreground and background colors.
//!
//! Styles are plain values. Turning them into escape sequences is the job of
//! a writer that knows the terminal's capabilities.

mod context;
mod format;
mod styling;

pub(crate) use context::tier_from_environment;
pub use context::Layer;
pub use format::{Decoration, DecorationIter, Decorations};
pub use styling::Style;
