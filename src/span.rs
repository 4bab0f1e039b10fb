//! Spans and the span combinator.
//!
//! When the parser folds child tokens into a parent construct, the parent's
//! location is the earliest start among its children. The combinator never
//! invents the parent's value; the caller supplies it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::StencilError;
use crate::location::SourceLocation;
use crate::tagged::Tagged;

/// A range of source positions: `start` inclusive, `end` exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    start: SourceLocation,
    end: SourceLocation,
}

impl Span {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        debug_assert!(
            start.absolute_index <= end.absolute_index,
            "span ends before it starts: {start:#} > {end:#}"
        );
        Self { start, end }
    }

    /// The span a piece of text covers, starting at its tagged location.
    pub fn of_text<S: AsRef<str>>(tagged: &Tagged<S>) -> Self {
        let start = tagged.location();
        Self::new(start, start.advance(tagged.value().as_ref()))
    }

    pub fn start(&self) -> SourceLocation {
        self.start
    }

    pub fn end(&self) -> SourceLocation {
        self.end
    }

    /// Length in characters. A deserialized span that ends before it starts
    /// has length zero.
    pub fn len(&self) -> usize {
        self.end
            .absolute_index
            .saturating_sub(self.start.absolute_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, location: &SourceLocation) -> bool {
        self.start.absolute_index <= location.absolute_index
            && location.absolute_index < self.end.absolute_index
    }

    /// The smallest span covering both.
    pub fn merge(self, other: Span) -> Span {
        let start = min_by_offset(self.start, other.start);
        let end = if other.end.absolute_index > self.end.absolute_index {
            other.end
        } else {
            self.end
        };
        Span::new(start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write!(f, "{:#}-{:#}", self.start, self.end);
        }
        write!(f, "{}-{}", self.start, self.end)
    }
}

fn min_by_offset(a: SourceLocation, b: SourceLocation) -> SourceLocation {
    if b.absolute_index < a.absolute_index {
        b
    } else {
        a
    }
}

// ============================================================================
// COMBINATOR
// ============================================================================

/// The earliest of `locations`.
pub fn covering_location<'a, I>(locations: I) -> Result<SourceLocation, StencilError>
where
    I: IntoIterator<Item = &'a SourceLocation>,
{
    locations
        .into_iter()
        .copied()
        .reduce(min_by_offset)
        .ok_or(StencilError::EmptyCombination)
}

/// The smallest span covering every span in `spans`.
pub fn covering_span<I>(spans: I) -> Result<Span, StencilError>
where
    I: IntoIterator<Item = Span>,
{
    spans
        .into_iter()
        .reduce(Span::merge)
        .ok_or(StencilError::EmptyCombination)
}

/// Tags `value` with the start of the region its `parts` cover.
///
/// ```rust
/// use stencil::{span, Tagged};
/// let a = Tagged::at("a", 0, 0, 0);
/// let b = Tagged::at("b", 1, 0, 1);
/// let ab = span::combine("ab", [&a, &b]).unwrap();
/// assert_eq!(ab, Tagged::at("ab", 0, 0, 0));
/// ```
pub fn combine<'a, V, U, I>(value: V, parts: I) -> Result<Tagged<V>, StencilError>
where
    U: 'a,
    I: IntoIterator<Item = &'a Tagged<U>>,
{
    let locations: Vec<SourceLocation> = parts.into_iter().map(Tagged::location).collect();
    let location = covering_location(&locations)?;
    Ok(Tagged::new(value, location))
}

/// Concatenates the plain text of `parts`, in the order given, and tags it
/// with their covering location.
pub fn concat<'a, U, I>(parts: I) -> Result<Tagged<String>, StencilError>
where
    U: fmt::Display + 'a,
    I: IntoIterator<Item = &'a Tagged<U>>,
{
    let parts: Vec<&Tagged<U>> = parts.into_iter().collect();
    let text: String = parts.iter().map(|part| part.value().to_string()).collect();
    combine(text, parts)
}
