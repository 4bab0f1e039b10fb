//! The location-tagged value.
//!
//! [`Tagged`] pairs any value with the [`SourceLocation`] it came from. It is
//! the unit the lexer hands to the parser and the parser folds into syntax
//! nodes. Two tagged values are equal only when both the value and the
//! location match: `"x"` at offset 3 and `"x"` at offset 9 are different
//! parse artifacts.

use std::any::Any;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::errors::StencilError;
use crate::location::SourceLocation;
use crate::render::{self, LocalizedDisplay, Locale, RenderFormat};

/// An immutable value bound to its source location.
///
/// # Examples
///
/// ```rust
/// use stencil::Tagged;
/// let token = Tagged::at("ab", 0, 0, 0);
/// assert_eq!(token.to_string(), "ab");
/// assert_eq!(format!("{token:#}"), "ab@(0,0)");
/// assert_eq!(token.len(), 2); // derefs to the bare value
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tagged<V> {
    location: SourceLocation,
    value: V,
}

impl<V> Tagged<V> {
    pub fn new(value: V, location: SourceLocation) -> Self {
        Self { location, value }
    }

    /// Builds the location from its three indices.
    pub fn at(value: V, absolute_index: usize, line_index: usize, character_index: usize) -> Self {
        Self::new(
            value,
            SourceLocation::new(absolute_index, line_index, character_index),
        )
    }

    /// Tags a value that may be absent. `None` is rejected: a location with
    /// nothing at it is a caller bug.
    pub fn try_new(value: Option<V>, location: SourceLocation) -> Result<Self, StencilError> {
        let value = value.ok_or(StencilError::AbsentValue { what: "value" })?;
        Ok(Self::new(value, location))
    }

    pub fn try_at(
        value: Option<V>,
        absolute_index: usize,
        line_index: usize,
        character_index: usize,
    ) -> Result<Self, StencilError> {
        Self::try_new(
            value,
            SourceLocation::new(absolute_index, line_index, character_index),
        )
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Drops the location and returns the bare value.
    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (V, SourceLocation) {
        (self.value, self.location)
    }

    /// Borrowing view, useful for handing tagged slices to the combinator
    /// without cloning payloads.
    pub fn by_ref(&self) -> Tagged<&V> {
        Tagged::new(&self.value, self.location)
    }
}

impl<V: PartialEq + 'static> Tagged<V> {
    /// Compares against an arbitrary value. Anything that is not a
    /// `Tagged<V>` compares unequal.
    pub fn eq_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Tagged<V>>()
            .is_some_and(|other| other == self)
    }
}

impl<V: LocalizedDisplay> Tagged<V> {
    /// Renders with a format code: `"F"` gives `value@location`, anything
    /// else (or no code) gives the bare value as `Display` writes it. Full
    /// output uses `locale`, or the ambient one when none is given.
    ///
    /// Any `Display` type can opt in with an empty `impl LocalizedDisplay`.
    pub fn render(&self, format: Option<&str>, locale: Option<&Locale>) -> String {
        render::render(self, RenderFormat::parse(format), locale)
    }
}

impl<V> Deref for Tagged<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V> AsRef<V> for Tagged<V> {
    fn as_ref(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Display> fmt::Display for Tagged<V> {
    /// The bare value; `{:#}` adds `@location`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write!(f, "{}@{}", self.value, self.location);
        }
        fmt::Display::fmt(&self.value, f)
    }
}
