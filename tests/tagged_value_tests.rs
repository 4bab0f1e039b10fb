// tests/tagged_value_tests.rs

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use stencil::render::LocalizedDisplay;
use stencil::{Locale, RenderFormat, SourceLocation, StencilError, Tagged};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn locations() -> Vec<SourceLocation> {
    vec![
        SourceLocation::ZERO,
        SourceLocation::new(3, 0, 3),
        SourceLocation::new(9, 0, 9),
        SourceLocation::new(9, 1, 0),
        SourceLocation::new(120, 7, 14),
    ]
}

// ---
// Construction
// ---

#[test]
fn test_absent_payloads_are_rejected() {
    for location in locations() {
        let err = Tagged::<&str>::try_new(None, location).unwrap_err();
        assert!(matches!(err, StencilError::AbsentValue { .. }));
        assert!(err.is_illegal_argument());
    }
    assert!(Tagged::<u32>::try_at(None, 1, 0, 1).is_err());
}

#[test]
fn test_present_payloads_are_accepted() {
    for location in locations() {
        let tagged = Tagged::try_new(Some("x"), location).unwrap();
        assert_eq!(tagged.location(), location);
        assert_eq!(*tagged.value(), "x");
    }
}

// ---
// Equality and hashing
// ---

#[test]
fn test_equality_is_joint_on_value_and_location() {
    let values = ["x", "y"];
    for a in values {
        for b in values {
            for la in locations() {
                for lb in locations() {
                    let equal = Tagged::new(a, la) == Tagged::new(b, lb);
                    assert_eq!(equal, a == b && la == lb, "{a}{la:#} vs {b}{lb:#}");
                }
            }
        }
    }
}

#[test]
fn test_separately_built_values_are_equal_and_hash_alike() {
    let first = Tagged::at(String::from("token"), 9, 1, 0);
    let second = Tagged::new(String::from("token"), SourceLocation::new(9, 1, 0));
    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
}

#[test]
fn test_usable_as_set_and_map_keys() {
    let mut seen = HashSet::new();
    assert!(seen.insert(Tagged::at("x", 3, 0, 3)));
    assert!(!seen.insert(Tagged::at("x", 3, 0, 3)));
    assert!(seen.insert(Tagged::at("x", 9, 0, 9)));
    assert_eq!(seen.len(), 2);

    let mut counts: HashMap<Tagged<&str>, usize> = HashMap::new();
    for token in [Tagged::at("a", 0, 0, 0), Tagged::at("a", 0, 0, 0), Tagged::at("a", 1, 0, 1)] {
        *counts.entry(token).or_default() += 1;
    }
    assert_eq!(counts[&Tagged::at("a", 0, 0, 0)], 2);
    assert_eq!(counts[&Tagged::at("a", 1, 0, 1)], 1);
}

#[test]
fn test_comparing_against_other_types_is_false() {
    let tagged = Tagged::at(7_i64, 2, 0, 2);
    assert!(tagged.eq_any(&Tagged::at(7_i64, 2, 0, 2)));
    assert!(!tagged.eq_any(&7_i64));
    assert!(!tagged.eq_any(&Tagged::at(7_i32, 2, 0, 2)));
    assert!(!tagged.eq_any(&"7"));
}

// ---
// Unwrapping
// ---

#[test]
fn test_unwrap_is_a_pure_projection() {
    let payload = Arc::new(String::from("shared buffer"));
    let tagged = Tagged::at(Arc::clone(&payload), 4, 0, 4);

    for _ in 0..3 {
        assert!(Arc::ptr_eq(tagged.value(), &payload));
    }
    assert_eq!(tagged.len(), "shared buffer".len());
    assert!(Arc::ptr_eq(&tagged.into_value(), &payload));
}

// ---
// Rendering
// ---

#[test]
fn test_plain_rendering_ignores_location() {
    for la in locations() {
        for lb in locations() {
            assert_eq!(Tagged::new("v", la).to_string(), Tagged::new("v", lb).to_string());
            assert_eq!(
                Tagged::new(2.5, la).render(None, None),
                Tagged::new(2.5, lb).render(None, None)
            );
        }
    }
}

#[test]
fn test_full_rendering_contains_value_and_location() {
    let invariant = Locale::invariant();
    for location in locations() {
        let tagged = Tagged::new("value", location);
        let full = tagged.render(Some("F"), Some(&invariant));
        assert!(full.contains("value"));
        assert!(full.contains(&location.to_string()));
        assert_eq!(full, format!("{tagged:#}"));
    }
}

#[test]
fn test_unknown_format_codes_fall_back_to_plain() {
    let tagged = Tagged::at("v", 1, 0, 1);
    for code in ["", "P", "p", "G", "N2", "full"] {
        assert_eq!(tagged.render(Some(code), Some(&Locale::invariant())), "v");
    }
    assert_eq!(RenderFormat::parse(Some("f")), RenderFormat::Full);
}

#[test]
fn test_full_rendering_respects_locale() {
    let tagged = Tagged::at(0.25_f64, 0, 0, 0);
    assert_eq!(tagged.render(Some("F"), Some(&Locale::new("fr-FR"))), "0,25@(0,0)");
    assert_eq!(tagged.render(Some("F"), Some(&Locale::new("en-GB"))), "0.25@(0,0)");
}

#[test]
fn test_plain_rendering_ignores_locale() {
    let tagged = Tagged::at(3.5_f64, 0, 0, 0);
    let german = Locale::new("de-DE");
    assert_eq!(tagged.render(Some("P"), Some(&german)), tagged.to_string());
    assert_eq!(tagged.render(None, Some(&german)), "3.5");
    assert_eq!(tagged.render(Some("F"), Some(&german)), "3,5@(0,0)");
}

struct Keyword(&'static str);

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl LocalizedDisplay for Keyword {}

#[test]
fn test_display_types_opt_into_rendering() {
    let invariant = Locale::invariant();
    let keyword = Tagged::at(Keyword("while"), 12, 2, 4);
    assert_eq!(keyword.render(None, Some(&invariant)), "while");
    assert_eq!(keyword.render(Some("F"), Some(&invariant)), "while@(2,4)");

    let text: Tagged<Cow<str>> = Tagged::at(Cow::Owned(String::from("ab")), 0, 0, 0);
    assert_eq!(text.render(Some("F"), Some(&invariant)), "ab@(0,0)");
}
