//! Front-end configuration.
//!
//! Explicit flags win over environment variables, which win over defaults.

use crate::render::{Locale, RenderFormat};

pub const LOCALE_ENV: &str = "STENCIL_LOCALE";
pub const FORMAT_ENV: &str = "STENCIL_FORMAT";

/// Settings shared by the CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontEndConfig {
    /// Name diagnostics use for the document.
    pub source_name: String,
    pub locale: Locale,
    pub format: RenderFormat,
    pub json: bool,
}

/// Flag values as given on the command line, before defaults apply.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub locale: Option<String>,
    pub format: Option<RenderFormat>,
    pub json: bool,
}

impl FrontEndConfig {
    /// Resolves against the process environment.
    pub fn resolve(source_name: impl Into<String>, overrides: ConfigOverrides) -> Self {
        Self::resolve_with(source_name, overrides, |key| std::env::var(key).ok())
    }

    /// Resolves against an arbitrary variable lookup.
    pub fn resolve_with<F>(source_name: impl Into<String>, overrides: ConfigOverrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale = overrides
            .locale
            .or_else(|| lookup(LOCALE_ENV))
            .filter(|tag| !tag.is_empty())
            .map(|tag| Locale::from_env_value(&tag))
            .unwrap_or_else(|| Locale::current().clone());

        let format = overrides.format.unwrap_or_else(|| {
            lookup(FORMAT_ENV)
                .and_then(|code| code.parse().ok())
                .unwrap_or_default()
        });

        Self {
            source_name: source_name.into(),
            locale,
            format,
            json: overrides.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_flags_win_over_environment() {
        let overrides = ConfigOverrides {
            locale: Some("fr-FR".into()),
            format: Some(RenderFormat::Plain),
            json: true,
        };
        let config = FrontEndConfig::resolve_with(
            "page.cshtml",
            overrides,
            env(&[(LOCALE_ENV, "en-US"), (FORMAT_ENV, "full")]),
        );
        assert_eq!(config.locale.tag(), "fr-FR");
        assert_eq!(config.format, RenderFormat::Plain);
        assert!(config.json);
        assert_eq!(config.source_name, "page.cshtml");
    }

    #[test]
    fn test_environment_fills_missing_flags() {
        let config = FrontEndConfig::resolve_with(
            "page",
            ConfigOverrides::default(),
            env(&[(LOCALE_ENV, "de_DE.UTF-8"), (FORMAT_ENV, "F")]),
        );
        assert_eq!(config.locale.decimal_separator(), ',');
        assert_eq!(config.format, RenderFormat::Full);
    }

    #[test]
    fn test_bad_format_variable_falls_back_to_plain() {
        let config = FrontEndConfig::resolve_with(
            "page",
            ConfigOverrides::default(),
            env(&[(FORMAT_ENV, "sideways")]),
        );
        assert_eq!(config.format, RenderFormat::Plain);
    }
}
