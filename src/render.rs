//! Diagnostic rendering of tagged values.
//!
//! This is the only place locale-sensitive formatting enters the core.
//! Plain rendering is the bare value exactly as `Display` writes it; full
//! rendering is `value@location` under a locale.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::location::SourceLocation;
use crate::span::Span;
use crate::tagged::Tagged;

// ============================================================================
// RENDER FORMAT
// ============================================================================

/// How a tagged value is rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// The bare value only.
    #[default]
    Plain,
    /// `value@location`.
    Full,
}

impl RenderFormat {
    /// Interprets a format code. `"F"` (any case) selects full rendering;
    /// no code, `"P"` and every unrecognized code fall back to plain.
    pub fn parse(code: Option<&str>) -> RenderFormat {
        match code.map(str::to_uppercase).as_deref() {
            Some("F") => RenderFormat::Full,
            _ => RenderFormat::Plain,
        }
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    /// Strict parsing for user input, unlike [`RenderFormat::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "plain" => Ok(RenderFormat::Plain),
            "f" | "full" => Ok(RenderFormat::Full),
            other => Err(format!("unknown render format '{other}' (expected plain or full)")),
        }
    }
}

// ============================================================================
// LOCALE
// ============================================================================

/// Languages that write decimals with a comma.
const COMMA_DECIMAL_LANGUAGES: &[&str] = &[
    "bg", "cs", "da", "de", "el", "es", "fi", "fr", "hr", "hu", "id", "it", "lt", "lv", "nb",
    "nl", "nn", "no", "pl", "pt", "ro", "ru", "sk", "sl", "sr", "sv", "tr", "uk", "vi",
];

static CURRENT: Lazy<Locale> = Lazy::new(|| {
    ["LC_ALL", "LC_NUMERIC", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .map(|value| Locale::from_env_value(&value))
        .unwrap_or_else(Locale::invariant)
});

/// The numeric conventions used when rendering a value for a reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
    decimal_separator: char,
}

impl Locale {
    /// Culture-neutral formatting: `.` decimals, empty tag.
    pub fn invariant() -> Self {
        Self {
            tag: String::new(),
            decimal_separator: '.',
        }
    }

    /// Builds a locale from a BCP 47 style tag such as `de-DE` or `en`.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().replace('_', "-");
        let language = tag.split('-').next().unwrap_or_default().to_ascii_lowercase();
        let decimal_separator = if COMMA_DECIMAL_LANGUAGES.contains(&language.as_str()) {
            ','
        } else {
            '.'
        };
        Self {
            tag,
            decimal_separator,
        }
    }

    /// Parses a POSIX locale variable value like `de_DE.UTF-8@euro`.
    pub fn from_env_value(value: &str) -> Self {
        let tag = value
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        match tag {
            "" | "C" | "POSIX" => Self::invariant(),
            tag => Self::new(tag),
        }
    }

    /// The ambient locale of the process, read once from the environment.
    pub fn current() -> &'static Locale {
        &CURRENT
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

// ============================================================================
// LOCALIZED DISPLAY
// ============================================================================

/// Display under an explicit locale.
///
/// Types whose text does not depend on the locale only need an empty impl:
///
/// ```rust
/// use std::fmt;
/// use stencil::render::LocalizedDisplay;
/// use stencil::{Locale, Tagged};
///
/// struct Keyword(&'static str);
///
/// impl fmt::Display for Keyword {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(self.0)
///     }
/// }
///
/// impl LocalizedDisplay for Keyword {}
///
/// let tagged = Tagged::at(Keyword("if"), 3, 0, 3);
/// assert_eq!(tagged.render(Some("F"), Some(&Locale::invariant())), "if@(0,3)");
/// ```
pub trait LocalizedDisplay: fmt::Display {
    fn fmt_localized(&self, f: &mut fmt::Formatter<'_>, _locale: &Locale) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Adapter that lets a [`LocalizedDisplay`] value sit in `format!`.
pub struct Localized<'a, T: ?Sized> {
    value: &'a T,
    locale: &'a Locale,
}

impl<'a, T: ?Sized> Localized<'a, T> {
    pub fn new(value: &'a T, locale: &'a Locale) -> Self {
        Self { value, locale }
    }
}

impl<T: LocalizedDisplay + ?Sized> fmt::Display for Localized<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt_localized(f, self.locale)
    }
}

macro_rules! locale_neutral {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LocalizedDisplay for $ty {}
        )*
    };
}

locale_neutral!(
    str, String, char, bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);

macro_rules! locale_decimal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LocalizedDisplay for $ty {
                fn fmt_localized(&self, f: &mut fmt::Formatter<'_>, locale: &Locale) -> fmt::Result {
                    let text = self.to_string();
                    if locale.decimal_separator == '.' {
                        return f.write_str(&text);
                    }
                    f.write_str(&text.replace('.', &locale.decimal_separator.to_string()))
                }
            }
        )*
    };
}

locale_decimal!(f32, f64);

macro_rules! forward_localized {
    ($($wrapper:ident),*) => {
        $(
            impl<T: LocalizedDisplay + ?Sized> LocalizedDisplay for $wrapper<T> {
                fn fmt_localized(&self, f: &mut fmt::Formatter<'_>, locale: &Locale) -> fmt::Result {
                    (**self).fmt_localized(f, locale)
                }
            }
        )*
    };
}

forward_localized!(Box, Rc, Arc);

impl<T: LocalizedDisplay + ?Sized> LocalizedDisplay for &T {
    fn fmt_localized(&self, f: &mut fmt::Formatter<'_>, locale: &Locale) -> fmt::Result {
        (**self).fmt_localized(f, locale)
    }
}

impl<B> LocalizedDisplay for Cow<'_, B>
where
    B: LocalizedDisplay + ToOwned + ?Sized,
    B::Owned: fmt::Display,
{
    fn fmt_localized(&self, f: &mut fmt::Formatter<'_>, locale: &Locale) -> fmt::Result {
        (**self).fmt_localized(f, locale)
    }
}

impl LocalizedDisplay for SourceLocation {}

impl LocalizedDisplay for Span {}

/// A nested tagged value renders as its own plain value.
impl<V: LocalizedDisplay> LocalizedDisplay for Tagged<V> {
    fn fmt_localized(&self, f: &mut fmt::Formatter<'_>, locale: &Locale) -> fmt::Result {
        self.value().fmt_localized(f, locale)
    }
}

// ============================================================================
// FORMATTER
// ============================================================================

/// Renders `tagged` in `format`. Plain output is the value's own `Display`
/// text and never looks at a locale; full output uses `locale`, or the
/// ambient locale when none is given.
pub fn render<V: LocalizedDisplay>(
    tagged: &Tagged<V>,
    format: RenderFormat,
    locale: Option<&Locale>,
) -> String {
    match format {
        RenderFormat::Plain => tagged.value().to_string(),
        RenderFormat::Full => {
            let locale = locale.unwrap_or_else(|| Locale::current());
            format!(
                "{}@{}",
                Localized::new(tagged.value(), locale),
                Localized::new(&tagged.location(), locale)
            )
        }
    }
}
