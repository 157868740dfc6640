//! Core, target-agnostic types for xliffgen.
//! The XLIFF parser decodes into these; the target encoders serialize these.

use std::{
    collections::{BTreeMap, btree_map},
    fmt::Display,
    fs,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Translations of one locale, keyed and ordered by `resname`.
///
/// Built once per parsed document and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationMap(BTreeMap<String, TranslationValue>);

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, resname: &str) -> Option<&TranslationValue> {
        self.0.get(resname)
    }

    pub fn contains_key(&self, resname: &str) -> bool {
        self.0.contains_key(resname)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in ascending `resname` order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, TranslationValue> {
        self.0.iter()
    }

    /// Inserts unless the key is already present. Returns whether it was inserted.
    pub(crate) fn insert_if_absent(&mut self, resname: String, value: TranslationValue) -> bool {
        match self.0.entry(resname) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }
}

impl FromIterator<(String, TranslationValue)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (String, TranslationValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TranslationMap {
    type Item = (&'a String, &'a TranslationValue);
    type IntoIter = btree_map::Iter<'a, String, TranslationValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationValue {
    /// A single translation without plural forms.
    Simple(String),

    /// A translation with plural forms.
    Plural(PluralForms),
}

impl TranslationValue {
    pub fn is_plural(&self) -> bool {
        matches!(self, TranslationValue::Plural(_))
    }
}

impl Display for TranslationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationValue::Simple(value) => write!(f, "{}", value),
            TranslationValue::Plural(forms) => write!(
                f,
                "{}",
                forms
                    .iter()
                    .map(|(category, value)| format!("{}: {}", category, value))
                    .collect::<Vec<_>>()
                    .join(" | ")
            ),
        }
    }
}

/// Plural forms of one message, in the order the categories were first seen.
///
/// Inserting a category that is already present replaces its text in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluralForms {
    forms: Vec<(PluralCategory, String)>,
}

impl PluralForms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: PluralCategory, value: impl Into<String>) {
        let value = value.into();
        match self.forms.iter_mut().find(|(existing, _)| *existing == category) {
            Some((_, slot)) => *slot = value,
            None => self.forms.push((category, value)),
        }
    }

    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.forms
            .iter()
            .find(|(existing, _)| *existing == category)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> {
        self.forms
            .iter()
            .map(|(category, value)| (*category, value.as_str()))
    }

    pub fn categories(&self) -> impl Iterator<Item = PluralCategory> + '_ {
        self.forms.iter().map(|(category, _)| *category)
    }

    /// Whether any form's raw text contains `token`.
    pub fn any_contains(&self, token: &str) -> bool {
        self.forms.iter().any(|(_, value)| value.contains(token))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(PluralCategory, S)> for PluralForms {
    fn from_iter<I: IntoIterator<Item = (PluralCategory, S)>>(iter: I) -> Self {
        let mut forms = PluralForms::new();
        for (category, value) in iter {
            forms.insert(category, value);
        }
        forms
    }
}

/// CLDR plural categories plus the gettext `exact`/`fractional` extensions.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
    Exact,
    Fractional,
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
            PluralCategory::Exact => "exact",
            PluralCategory::Fractional => "fractional",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(PluralCategory::Zero),
            "one" => Ok(PluralCategory::One),
            "two" => Ok(PluralCategory::Two),
            "few" => Ok(PluralCategory::Few),
            "many" => Ok(PluralCategory::Many),
            "other" => Ok(PluralCategory::Other),
            "exact" => Ok(PluralCategory::Exact),
            "fractional" => Ok(PluralCategory::Fractional),
            _ => Err(format!("Unknown plural category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// A language as described by the translation service's project payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleDescriptor {
    /// BCP-47-like tag, e.g. `es-419` or `pt-BR`.
    pub locale: String,

    #[serde(alias = "twoLetterCode")]
    pub two_letters_code: String,

    #[serde(default)]
    pub text_direction: TextDirection,
}

impl LocaleDescriptor {
    pub fn new(locale: &str, two_letters_code: &str, text_direction: TextDirection) -> Self {
        Self {
            locale: locale.to_string(),
            two_letters_code: two_letters_code.to_string(),
            text_direction,
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.text_direction == TextDirection::Rtl
    }
}

/// The parsed translations of one locale, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTranslations {
    pub locale: LocaleDescriptor,

    /// The `target-language` attribute of the document's `file` element, if any.
    pub target_language: Option<String>,

    pub translations: TranslationMap,
}

/// Name of the glossary key that carries the application name.
pub const APP_NAME_KEY: &str = "APP_NAME";

/// A non-translatable term shared verbatim by every locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlossaryEntry {
    pub key: String,
    pub text: String,
}

/// Ordered, non-translatable terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Glossary {
    pub entries: Vec<GlossaryEntry>,
}

impl Glossary {
    pub fn new(entries: Vec<GlossaryEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlossaryEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The text of the `APP_NAME` entry, matched case-insensitively.
    pub fn app_name(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.eq_ignore_ascii_case(APP_NAME_KEY))
            .map(|entry| entry.text.as_str())
    }
}

impl FromIterator<(String, String)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, text)| GlossaryEntry { key, text })
                .collect(),
        }
    }
}

/// One encoded file, addressed relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Writes the file below `output_dir`, creating missing directories.
    /// Returns the full path written.
    pub fn write_under(&self, output_dir: &Path) -> io::Result<PathBuf> {
        let path = output_dir.join(&self.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_forms_keep_insertion_order() {
        let forms: PluralForms = vec![
            (PluralCategory::Other, "{count} files"),
            (PluralCategory::One, "{count} file"),
        ]
        .into_iter()
        .collect();

        let categories: Vec<_> = forms.categories().collect();
        assert_eq!(categories, vec![PluralCategory::Other, PluralCategory::One]);
    }

    #[test]
    fn test_plural_forms_replace_in_place() {
        let mut forms = PluralForms::new();
        forms.insert(PluralCategory::One, "first");
        forms.insert(PluralCategory::Other, "others");
        forms.insert(PluralCategory::One, "replaced");

        assert_eq!(forms.len(), 2);
        assert_eq!(forms.get(PluralCategory::One), Some("replaced"));
        assert_eq!(forms.categories().next(), Some(PluralCategory::One));
    }

    #[test]
    fn test_plural_forms_any_contains() {
        let forms: PluralForms = vec![
            (PluralCategory::One, "One file"),
            (PluralCategory::Other, "{count} files"),
        ]
        .into_iter()
        .collect();
        assert!(forms.any_contains("{count}"));
        assert!(!forms.any_contains("{total_count}"));
    }

    #[test]
    fn test_plural_category_from_str() {
        assert_eq!(PluralCategory::from_str("zero").unwrap(), PluralCategory::Zero);
        assert_eq!(PluralCategory::from_str(" One ").unwrap(), PluralCategory::One);
        assert_eq!(PluralCategory::from_str("FEW").unwrap(), PluralCategory::Few);
        assert_eq!(PluralCategory::from_str("exact").unwrap(), PluralCategory::Exact);
        assert_eq!(
            PluralCategory::from_str("fractional").unwrap(),
            PluralCategory::Fractional
        );
    }

    #[test]
    fn test_plural_category_from_str_invalid() {
        assert!(PluralCategory::from_str("several").is_err());
    }

    #[test]
    fn test_plural_category_display() {
        assert_eq!(PluralCategory::Many.to_string(), "many");
    }

    #[test]
    fn test_translation_map_first_insert_wins() {
        let mut map = TranslationMap::new();
        assert!(map.insert_if_absent("a".into(), TranslationValue::Simple("first".into())));
        assert!(!map.insert_if_absent("a".into(), TranslationValue::Simple("second".into())));
        assert_eq!(map.get("a"), Some(&TranslationValue::Simple("first".into())));
    }

    #[test]
    fn test_translation_map_iterates_sorted() {
        let map: TranslationMap = vec![
            ("zeta".to_string(), TranslationValue::Simple("z".into())),
            ("alpha".to_string(), TranslationValue::Simple("a".into())),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_locale_descriptor_deserialize() {
        let json = r#"{"locale": "ar-SA", "twoLettersCode": "ar", "textDirection": "rtl", "name": "Arabic"}"#;
        let locale: LocaleDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(locale.locale, "ar-SA");
        assert_eq!(locale.two_letters_code, "ar");
        assert!(locale.is_rtl());
    }

    #[test]
    fn test_locale_descriptor_defaults_to_ltr() {
        let json = r#"{"locale": "fr-FR", "twoLetterCode": "fr"}"#;
        let locale: LocaleDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(locale.text_direction, TextDirection::Ltr);
    }

    #[test]
    fn test_glossary_app_name_is_case_insensitive() {
        let glossary: Glossary = vec![
            ("session_download_url".to_string(), "https://getsession.org".to_string()),
            ("app_name".to_string(), "Session".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(glossary.app_name(), Some("Session"));
    }

    #[test]
    fn test_glossary_without_app_name() {
        let glossary = Glossary::default();
        assert!(glossary.app_name().is_none());
    }

    #[test]
    fn test_translation_value_display() {
        let plural = TranslationValue::Plural(
            vec![(PluralCategory::One, "a"), (PluralCategory::Other, "b")]
                .into_iter()
                .collect(),
        );
        assert_eq!(plural.to_string(), "one: a | other: b");
        assert!(plural.is_plural());
    }

    #[test]
    fn test_output_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = OutputFile::new("values-fr/strings.xml", "<resources/>");
        let written = file.write_under(dir.path()).unwrap();
        assert_eq!(written, dir.path().join("values-fr/strings.xml"));
        assert_eq!(fs::read_to_string(written).unwrap(), "<resources/>");

        // Writing again over an existing tree is fine.
        file.write_under(dir.path()).unwrap();
    }
}
