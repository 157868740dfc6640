//! Placeholder and plural normalization.
//!
//! Translations use named `{name}` placeholders. Each target has its own
//! convention for them:
//! - Android: positional `%1$s` / `%1$d` specifiers, numbered by first appearance.
//! - ICU JSON: a single `{count, plural, ...}` clause with `#` as the count marker.
//! - String catalogs: `%lld` inside either a substitution argument or plain variations.
//!
//! Nothing here mutates a `TranslationMap`; every function returns derived text.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::types::PluralForms;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{([^}]+)\}").unwrap();
}

/// Placeholder names that always receive a numeric format specifier.
pub const NUMERIC_VARIABLES: [&str; 3] = ["count", "found_count", "total_count"];

/// The placeholder a plural phrase switches on.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Marker that stands for the count inside an ICU plural clause.
pub const ICU_COUNT_MARKER: &str = "#";

/// Integer specifier used for counts in string catalogs.
pub const CATALOG_COUNT_SPECIFIER: &str = "%lld";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Numeric,
    Generic,
}

impl PlaceholderKind {
    pub fn classify(name: &str) -> Self {
        if NUMERIC_VARIABLES.contains(&name) {
            PlaceholderKind::Numeric
        } else {
            PlaceholderKind::Generic
        }
    }

    fn conversion(&self) -> char {
        match self {
            PlaceholderKind::Numeric => 'd',
            PlaceholderKind::Generic => 's',
        }
    }
}

/// Distinct placeholder names of `text` in order of first appearance.
pub fn placeholder_names(text: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Rewrites `{name}` placeholders as positional printf specifiers.
///
/// The first distinct name becomes position 1, the next position 2, and a
/// repeated name keeps the position it was first given.
pub fn to_positional(text: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            let position = match seen.iter().position(|existing| existing == name) {
                Some(index) => index + 1,
                None => {
                    seen.push(name.to_string());
                    seen.len()
                }
            };
            format!(
                "%{}${}",
                position,
                PlaceholderKind::classify(name).conversion()
            )
        })
        .into_owned()
}

/// Builds one ICU plural clause from `forms`, in their insertion order.
///
/// `{count}` becomes `#` and each phrase is run through `finish` afterwards.
pub fn to_icu_plural(forms: &PluralForms, finish: impl Fn(&str) -> String) -> String {
    let clauses = forms
        .iter()
        .map(|(category, value)| {
            format!(
                "{} [{}]",
                category,
                finish(&value.replace(COUNT_PLACEHOLDER, ICU_COUNT_MARKER))
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{{count, plural, {}}}", clauses)
}

/// How a plural group is exposed in a string catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPluralStyle {
    /// Some form mentions `{count}`: forms hang off a `%lld` substitution argument.
    Standard,
    /// No form mentions `{count}`: each form is a whole-phrase variation.
    Custom,
}

impl CatalogPluralStyle {
    pub fn of(forms: &PluralForms) -> Self {
        if forms.any_contains(COUNT_PLACEHOLDER) {
            CatalogPluralStyle::Standard
        } else {
            CatalogPluralStyle::Custom
        }
    }
}

/// Replaces `{count}` with the catalog's integer specifier.
pub fn to_catalog_count(text: &str) -> String {
    text.replace(COUNT_PLACEHOLDER, CATALOG_COUNT_SPECIFIER)
}
