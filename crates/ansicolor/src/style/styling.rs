use super::{Decoration, Decorations};
use crate::termco::Color;

/// A terminal style.
///
/// A terminal style comprises text decorations, a foreground color, and a
/// background color. A missing color means "leave as is" and only makes
/// sense for the target of a style transition. The current state of a
/// terminal always is a resolved style, i.e., has both colors, with
/// [`Style::DEFAULT`] as the initial state.
///
/// Hence [`Style::default()`] and [`Style::DEFAULT`] differ: The former is
/// the empty, unresolved style without colors, which changes nothing when
/// used as a transition target. The latter is the terminal's initial
/// appearance with both colors set to [`Color::Default`].
///
/// ```
/// # use ansicolor::Color;
/// # use ansicolor::style::{Decoration, Style};
/// let style = Style::default()
///     .bold()
///     .with_foreground(Color::rgb(215, 40, 39))
///     .underline();
///
/// assert_eq!(style.decorations, Decoration::Bold + Decoration::Underline);
/// assert_eq!(style.foreground, Some(Color::rgb(215, 40, 39)));
/// assert_eq!(style.background, None);
///
/// let resolved = style.resolve_missing_from(&Style::DEFAULT);
/// assert_eq!(resolved.background, Some(Color::Default));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub decorations: Decorations,
}

impl Style {
    /// The default terminal appearance.
    pub const DEFAULT: Style = Style {
        foreground: Some(Color::Default),
        background: Some(Color::Default),
        decorations: Decorations::NONE,
    };

    /// Create a new style with the given foreground color.
    pub fn with_foreground<C: Into<Color>>(&self, color: C) -> Self {
        Self {
            foreground: Some(color.into()),
            ..*self
        }
    }

    /// Create a new style with the given background color.
    pub fn with_background<C: Into<Color>>(&self, color: C) -> Self {
        Self {
            background: Some(color.into()),
            ..*self
        }
    }

    /// Create a new style with the given decorations replacing the current
    /// ones.
    pub fn with_decorations<D: Into<Decorations>>(&self, decorations: D) -> Self {
        Self {
            decorations: decorations.into(),
            ..*self
        }
    }

    /// Create a new style with the added decoration.
    pub fn with(&self, decoration: Decoration) -> Self {
        Self {
            decorations: self.decorations + decoration,
            ..*self
        }
    }

    /// Create a new style with added bold decoration.
    pub fn bold(&self) -> Self {
        self.with(Decoration::Bold)
    }

    /// Create a new style with added dim decoration.
    pub fn dim(&self) -> Self {
        self.with(Decoration::Dim)
    }

    /// Create a new style with added italic decoration.
    pub fn italic(&self) -> Self {
        self.with(Decoration::Italic)
    }

    /// Create a new style with added underline decoration.
    pub fn underline(&self) -> Self {
        self.with(Decoration::Underline)
    }

    /// Create a new style with added blink decoration.
    pub fn blink(&self) -> Self {
        self.with(Decoration::Blink)
    }

    /// Create a new style with added invert decoration.
    pub fn invert(&self) -> Self {
        self.with(Decoration::Invert)
    }

    /// Create a new style with added hidden decoration.
    pub fn hidden(&self) -> Self {
        self.with(Decoration::Hidden)
    }

    /// Create a new style with added strikethrough decoration.
    pub fn strikethrough(&self) -> Self {
        self.with(Decoration::Strikethrough)
    }

    /// Determine whether both colors are present.
    pub fn is_resolved(&self) -> bool {
        self.foreground.is_some() && self.background.is_some()
    }

    /// Fill in missing colors.
    ///
    /// A missing color is taken from the fallback style. If the fallback
    /// lacks the color, too, it becomes [`Color::Default`]. Decorations are
    /// this style's.
    pub fn resolve_missing_from(&self, fallback: &Style) -> Style {
        Style {
            foreground: Some(
                self.foreground
                    .or(fallback.foreground)
                    .unwrap_or(Color::Default),
            ),
            background: Some(
                self.background
                    .or(fallback.background)
                    .unwrap_or(Color::Default),
            ),
            decorations: self.decorations,
        }
    }
}

impl From<Decoration> for Style {
    fn from(value: Decoration) -> Self {
        Style::default().with(value)
    }
}

// ----------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::termco::AnsiColor;

    #[test]
    fn test_style() {
        use super::Decoration::*;

        let style = Style::default();
        assert_eq!(style.decorations, Decorations::NONE);
        assert_eq!(style.foreground, None);
        assert!(!style.is_resolved());

        let style = style.bold().underline().dim();
        assert_eq!(style.decorations, Bold + Underline + Dim);

        let style = style.with_foreground(AnsiColor::Red);
        assert_eq!(style.foreground, Some(Color::Basic16(AnsiColor::Red)));
        assert_eq!(style.background, None);

        let style = style.with_decorations(Italic);
        assert_eq!(style.decorations, Italic.into());
        assert_eq!(Style::from(Hidden), Style::default().hidden());
        assert!(Style::DEFAULT.is_resolved());
    }

    #[test]
    fn test_default_versus_constant() {
        let empty = Style::default();
        assert_ne!(empty, Style::DEFAULT);
        assert_eq!((empty.foreground, empty.background), (None, None));
        assert_eq!(
            (Style::DEFAULT.foreground, Style::DEFAULT.background),
            (Some(Color::Default), Some(Color::Default))
        );
        assert_eq!(empty.decorations, Style::DEFAULT.decorations);
        assert_eq!(empty.resolve_missing_from(&Style::DEFAULT), Style::DEFAULT);
    }

    #[test]
    fn test_resolution() {
        let target = Style::default().with_background(Color::Indexed256(33));
        let current = Style::DEFAULT.with_foreground(Color::rgb(1, 2, 3)).bold();

        let resolved = target.resolve_missing_from(&current);
        assert_eq!(resolved.foreground, Some(Color::rgb(1, 2, 3)));
        assert_eq!(resolved.background, Some(Color::Indexed256(33)));
        assert!(resolved.decorations.is_empty());

        let resolved = target.resolve_missing_from(&Style::default());
        assert_eq!(resolved.foreground, Some(Color::Default));
        assert_eq!(resolved, resolved.resolve_missing_from(&current));
    }
}
