/// A text decoration.
///
/// This enumeration models decorations that differ from the default
/// appearance. Discriminants are powers of two and hence can be combined into
/// a bit vector, i.e., [`Decorations`]. Unlike with some other terminal
/// libraries, bold and dim are independent of each other, even though they
/// share the same SGR parameter for disabling them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Bold = 0x1,
    Dim = 0x2,
    Italic = 0x4,
    Underline = 0x8,
    Blink = 0x10,
    Invert = 0x20,
    Hidden = 0x40,
    Strikethrough = 0x80,
}

impl Decoration {
    #[inline]
    const fn bits(&self) -> u8 {
        *self as u8
    }

    const fn successor(&self) -> Option<Self> {
        use self::Decoration::*;

        Some(match *self {
            Bold => Dim,
            Dim => Italic,
            Italic => Underline,
            Underline => Blink,
            Blink => Invert,
            Invert => Hidden,
            Hidden => Strikethrough,
            Strikethrough => return None,
        })
    }

    /// Get the SGR parameter for enabling this decoration.
    pub const fn enable_sgr(&self) -> u8 {
        use self::Decoration::*;

        match *self {
            Bold => 1,
            Dim => 2,
            Italic => 3,
            Underline => 4,
            Blink => 5,
            Invert => 7,
            Hidden => 8,
            Strikethrough => 9,
        }
    }

    /// Get the SGR parameter for disabling this decoration.
    ///
    /// Bold and dim both use 22, which disables both of them.
    pub const fn disable_sgr(&self) -> u8 {
        use self::Decoration::*;

        match *self {
            Bold => 22,
            Dim => 22,
            Italic => 23,
            Underline => 24,
            Blink => 25,
            Invert => 27,
            Hidden => 28,
            Strikethrough => 29,
        }
    }

    /// Determine whether this decoration is bold or dim, i.e., shares the
    /// disable parameter 22.
    pub const fn is_intensity(&self) -> bool {
        matches!(*self, Self::Bold | Self::Dim)
    }
}

// ----------------------------------------------------------------------------------------------------------

/// A set of text decorations.
///
/// Set union is `+` and set difference is `-`, with individual
/// [`Decoration`]s automatically promoted:
///
/// ```
/// # use ansicolor::style::{Decoration::*, Decorations};
/// let ds = Bold + Underline + Italic - Underline;
/// assert_eq!(ds, Bold + Italic);
/// assert_eq!(ds.len(), 2);
/// assert!(ds.contains(Italic));
/// assert_eq!(ds.iter().collect::<Vec<_>>(), vec![Bold, Italic]);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Decorations(u8);

impl Decorations {
    /// The empty set of decorations.
    pub const NONE: Self = Self(0);

    /// The set with the two intensity decorations bold and dim.
    pub const INTENSITY: Self = Self(Decoration::Bold.bits() | Decoration::Dim.bits());

    /// Create a set of decorations from its bit representation.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get the bit representation.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Determine whether this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Get the number of decorations in this set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Determine whether this set contains the decoration.
    #[inline]
    pub const fn contains(&self, decoration: Decoration) -> bool {
        self.0 & decoration.bits() != 0
    }

    /// Get the intersection of the two sets.
    pub const fn intersection(&self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Get an iterator over the decorations in bit order.
    #[inline]
    pub const fn iter(&self) -> DecorationIter {
        DecorationIter {
            decorations: *self,
            cursor: None,
            remaining: self.len(),
        }
    }
}

impl core::fmt::Debug for Decorations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl IntoIterator for Decorations {
    type Item = Decoration;
    type IntoIter = DecorationIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Decoration> for Decorations {
    fn from_iter<T: IntoIterator<Item = Decoration>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, |ds, d| ds + d)
    }
}

// ----------------------------------------------------------------------------------------------------------

/// An iterator over text decorations.
#[derive(Debug)]
pub struct DecorationIter {
    decorations: Decorations,
    cursor: Option<Decoration>,
    remaining: usize,
}

impl Iterator for DecorationIter {
    type Item = Decoration;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let decoration = match self.cursor {
                None => Decoration::Bold,
                Some(decoration) => decoration.successor()?,
            };
            self.cursor = Some(decoration);

            if self.decorations.contains(decoration) {
                self.remaining -= 1;
                return Some(decoration);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for DecorationIter {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl core::iter::FusedIterator for DecorationIter {}

// ----------------------------------------------------------------------------------------------------------
// From, Add, Sub

impl From<Decoration> for Decorations {
    fn from(value: Decoration) -> Self {
        Self(value.bits())
    }
}

impl core::ops::Add for Decoration {
    type Output = Decorations;

    fn add(self, other: Self) -> Self::Output {
        Decorations(self.bits() | other.bits())
    }
}

impl core::ops::Add<Decorations> for Decoration {
    type Output = Decorations;

    fn add(self, other: Decorations) -> Self::Output {
        Decorations(self.bits() | other.0)
    }
}

impl core::ops::Add<Decoration> for Decorations {
    type Output = Decorations;

    fn add(self, other: Decoration) -> Self::Output {
        Decorations(self.0 | other.bits())
    }
}

impl core::ops::Add for Decorations {
    type Output = Decorations;

    fn add(self, other: Self) -> Self::Output {
        Decorations(self.0 | other.0)
    }
}

impl core::ops::Sub<Decoration> for Decorations {
    type Output = Decorations;

    fn sub(self, other: Decoration) -> Self::Output {
        Decorations(self.0 & !other.bits())
    }
}

impl core::ops::Sub for Decorations {
    type Output = Decorations;

    fn sub(self, other: Self) -> Self::Output {
        Decorations(self.0 & !other.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decoration_arithmetic() {
        use super::Decoration::*;

        let bold_dim = Bold + Dim;
        assert_eq!(bold_dim, Decorations::INTENSITY);
        assert_eq!(bold_dim.len(), 2);
        assert!(bold_dim.contains(Bold));
        assert!(bold_dim.contains(Dim));

        let all = Bold + Dim + Italic + Underline + Blink + Invert + Hidden + Strikethrough;
        assert_eq!(all.bits(), 0xff);
        assert_eq!((all - bold_dim).len(), 6);
        assert_eq!(all - all, Decorations::NONE);
        assert!((Italic + Bold - Italic - Bold).is_empty());
        assert_eq!((all - Italic).intersection(Italic.into()), Decorations::NONE);
    }

    #[test]
    fn test_iteration() {
        use super::Decoration::*;

        let ds = Strikethrough + Bold + Invert;
        let mut iter = ds.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(Bold));
        assert_eq!(iter.next(), Some(Invert));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(Strikethrough));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        assert_eq!(Decorations::NONE.iter().next(), None);
        assert_eq!([Hidden, Dim].into_iter().collect::<Decorations>(), Dim + Hidden);
        assert_eq!(format!("{:?}", Bold + Italic), "{Bold, Italic}");
    }

    #[test]
    fn test_sgr_parameters() {
        use super::Decoration::*;

        let enable: Vec<_> = Decorations::from_bits(0xff)
            .iter()
            .map(|d| d.enable_sgr())
            .collect();
        assert_eq!(enable, vec![1, 2, 3, 4, 5, 7, 8, 9]);

        let disable: Vec<_> = Decorations::from_bits(0xff)
            .iter()
            .map(|d| d.disable_sgr())
            .collect();
        assert_eq!(disable, vec![22, 22, 23, 24, 25, 27, 28, 29]);

        assert!(Bold.is_intensity());
        assert!(!Italic.is_intensity());
    }
}
