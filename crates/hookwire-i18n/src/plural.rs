//! Plural rules for count-dependent labels.
//!
//! # Invariants
//!
//! 1. Every rule maps any count to exactly one [`PluralCategory`].
//! 2. [`PluralCategory::Other`] is the catch-all; a missing form falls back
//!    to `other`.

use core::fmt;

/// CLDR plural categories used by the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::One => "one",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Label variants keyed by plural category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms {
    pub one: String,
    pub few: Option<String>,
    pub many: Option<String>,
    pub other: String,
}

impl PluralForms {
    /// Forms for languages with a singular/plural split only.
    #[must_use]
    pub fn one_other(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self {
            one: one.into(),
            other: other.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn select(&self, category: PluralCategory) -> &str {
        match category {
            PluralCategory::One => &self.one,
            PluralCategory::Few => self.few.as_deref().unwrap_or(&self.other),
            PluralCategory::Many => self.many.as_deref().unwrap_or(&self.other),
            PluralCategory::Other => &self.other,
        }
    }
}

/// Maps a count to a plural category.
#[derive(Clone, Copy)]
pub enum PluralRule {
    /// `one` for exactly 1, `other` otherwise.
    English,
    /// `one` for 0 and 1, `other` otherwise.
    French,
    /// `one` / `few` / `many` on the last two digits.
    Russian,
    /// No plural distinction.
    Invariant,
    Custom(fn(u64) -> PluralCategory),
}

impl PluralRule {
    #[must_use]
    pub fn categorize(&self, count: u64) -> PluralCategory {
        match self {
            Self::English if count == 1 => PluralCategory::One,
            Self::English => PluralCategory::Other,
            Self::French if count <= 1 => PluralCategory::One,
            Self::French => PluralCategory::Other,
            Self::Russian => russian(count),
            Self::Invariant => PluralCategory::Other,
            Self::Custom(rule) => rule(count),
        }
    }

    /// Rule for a locale tag such as `en-US` or `ru`; English when unknown.
    #[must_use]
    pub fn for_locale(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        match primary.to_ascii_lowercase().as_str() {
            "fr" | "hi" => Self::French,
            "ru" | "uk" | "be" | "sr" | "hr" => Self::Russian,
            "zh" | "ja" | "ko" | "vi" | "th" => Self::Invariant,
            _ => Self::English,
        }
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::French => write!(f, "French"),
            Self::Russian => write!(f, "Russian"),
            Self::Invariant => write!(f, "Invariant"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn russian(n: u64) -> PluralCategory {
    let (tens, units) = (n % 100, n % 10);
    if units == 1 && tens != 11 {
        PluralCategory::One
    } else if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
        PluralCategory::Few
    } else {
        PluralCategory::Many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn english_singular_only_for_one() {
        let rule = PluralRule::English;
        assert_eq!(rule.categorize(0), PluralCategory::Other);
        assert_eq!(rule.categorize(1), PluralCategory::One);
        assert_eq!(rule.categorize(2), PluralCategory::Other);
    }

    #[test]
    fn french_treats_zero_as_singular() {
        assert_eq!(PluralRule::French.categorize(0), PluralCategory::One);
        assert_eq!(PluralRule::French.categorize(2), PluralCategory::Other);
    }

    #[test]
    fn russian_last_digits() {
        let rule = PluralRule::Russian;
        assert_eq!(rule.categorize(1), PluralCategory::One);
        assert_eq!(rule.categorize(3), PluralCategory::Few);
        assert_eq!(rule.categorize(11), PluralCategory::Many);
        assert_eq!(rule.categorize(22), PluralCategory::Few);
        assert_eq!(rule.categorize(25), PluralCategory::Many);
    }

    #[test]
    fn locale_lookup_uses_primary_subtag() {
        assert!(matches!(PluralRule::for_locale("fr-CA"), PluralRule::French));
        assert!(matches!(PluralRule::for_locale("ja_JP"), PluralRule::Invariant));
        assert!(matches!(PluralRule::for_locale("xx"), PluralRule::English));
    }

    #[test]
    fn missing_forms_fall_back_to_other() {
        let forms = PluralForms::one_other("{count} record", "{count} records");
        assert_eq!(forms.select(PluralCategory::Few), "{count} records");
        assert_eq!(forms.select(PluralCategory::One), "{count} record");
    }

    #[test]
    fn custom_rule() {
        let rule = PluralRule::Custom(|n| if n > 100 { PluralCategory::Many } else { PluralCategory::Other });
        assert_eq!(rule.categorize(101), PluralCategory::Many);
    }

    proptest! {
        #[test]
        fn russian_depends_on_last_two_digits(n in any::<u64>()) {
            let rule = PluralRule::Russian;
            prop_assert_eq!(rule.categorize(n), rule.categorize(n % 100 + 100));
        }

        #[test]
        fn english_one_only_for_exactly_one(n in any::<u64>()) {
            let one = PluralRule::English.categorize(n) == PluralCategory::One;
            prop_assert_eq!(one, n == 1);
            prop_assert_eq!(PluralRule::Invariant.categorize(n), PluralCategory::Other);
        }

        #[test]
        fn locale_tags_never_panic(tag in "\\PC{0,12}") {
            let rule = PluralRule::for_locale(&tag);
            let _ = rule.categorize(7);
        }
    }
}
