//! Apple String Catalog (`Localizable.xcstrings`) output.
//!
//! One catalog holds every locale. Each `resname` becomes an item whose
//! localizations are keyed by the document's `target-language`.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    codec::Catalog,
    error::Error,
    escape::html_unescape,
    formats::Target,
    placeholder::{CatalogPluralStyle, to_catalog_count},
    traits::Encoder,
    types::{Glossary, OutputFile, PluralForms, TranslationValue},
};

pub const CATALOG_FILE: &str = "Localizable.xcstrings";
pub const CATALOG_VERSION: &str = "1.0";

/// Name of the substitution argument standard plurals hang off.
const COUNT_ARGUMENT: &str = "arg1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringCatalog {
    pub source_language: String,
    pub strings: BTreeMap<String, Item>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub extraction_state: ExtractionState,
    /// Keyed by language, in the order locales were added.
    #[serde(default)]
    pub localizations: IndexMap<String, Localization>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionState {
    #[default]
    Manual,
    ExtractedWithValue,
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_unit: Option<StringUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<BTreeMap<String, Substitution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Variations>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub arg_num: u32,
    pub format_specifier: String,
    pub variations: Variations,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Variations {
    /// Plural categories in the order the document listed them.
    pub plural: IndexMap<String, PluralVariation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluralVariation {
    pub string_unit: StringUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringUnit {
    pub state: String,
    pub value: String,
}

impl StringUnit {
    pub fn translated(value: impl Into<String>) -> Self {
        Self {
            state: "translated".to_string(),
            value: value.into(),
        }
    }
}

/// HTML-unescapes and trims a catalog value.
fn clean(text: &str) -> String {
    html_unescape(text).trim().to_string()
}

fn plural_variations(forms: &PluralForms) -> Variations {
    Variations {
        plural: forms
            .iter()
            .map(|(category, text)| {
                (
                    category.to_string(),
                    PluralVariation {
                        string_unit: StringUnit::translated(clean(&to_catalog_count(text))),
                    },
                )
            })
            .collect(),
    }
}

impl Localization {
    pub fn from_value(value: &TranslationValue) -> Self {
        match value {
            TranslationValue::Simple(text) => Localization {
                string_unit: Some(StringUnit::translated(clean(text))),
                ..Default::default()
            },
            TranslationValue::Plural(forms) => match CatalogPluralStyle::of(forms) {
                CatalogPluralStyle::Standard => Localization {
                    string_unit: Some(StringUnit::translated(format!("%#@{}@", COUNT_ARGUMENT))),
                    substitutions: Some(BTreeMap::from([(
                        COUNT_ARGUMENT.to_string(),
                        Substitution {
                            arg_num: 1,
                            format_specifier: "lld".to_string(),
                            variations: plural_variations(forms),
                        },
                    )])),
                    variations: None,
                },
                CatalogPluralStyle::Custom => Localization {
                    variations: Some(plural_variations(forms)),
                    ..Default::default()
                },
            },
        }
    }
}

impl StringCatalog {
    pub fn new(source_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            strings: BTreeMap::new(),
            version: CATALOG_VERSION.to_string(),
        }
    }

    /// Adds the localization of `resname` for `language`, creating the item
    /// on first sight.
    pub fn insert(&mut self, resname: &str, language: &str, value: &TranslationValue) {
        self.strings
            .entry(resname.to_string())
            .or_insert_with(|| Item {
                extraction_state: ExtractionState::Manual,
                localizations: IndexMap::new(),
            })
            .localizations
            .insert(language.to_string(), Localization::from_value(value));
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringCatalogEncoder;

impl StringCatalogEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, catalog: &Catalog) -> StringCatalog {
        let mut string_catalog = StringCatalog::new(&catalog.source_language().two_letters_code);
        for locale in catalog.locales() {
            let language = locale
                .target_language
                .as_deref()
                .unwrap_or(&locale.locale.locale);
            for (resname, value) in &locale.translations {
                string_catalog.insert(resname, language, value);
            }
            tracing::debug!(locale = %locale.locale.locale, language, "added locale to string catalog");
        }
        string_catalog
    }
}

impl Encoder for StringCatalogEncoder {
    fn target(&self) -> Target {
        Target::Ios
    }

    fn encode(&self, catalog: &Catalog, _glossary: &Glossary) -> Result<Vec<OutputFile>, Error> {
        let contents = self.build(catalog).to_json()?;
        Ok(vec![OutputFile::new(CATALOG_FILE, contents)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        project::ProjectInfo,
        types::{LocaleDescriptor, LocaleTranslations, PluralCategory, TextDirection, TranslationMap},
    };
    use serde_json::{Value, json};

    fn forms(entries: Vec<(PluralCategory, &str)>) -> TranslationValue {
        TranslationValue::Plural(entries.into_iter().collect())
    }

    #[test]
    fn test_simple_value_is_cleaned() {
        let localization =
            Localization::from_value(&TranslationValue::Simple("  Tom &amp; Jerry \n".to_string()));
        assert_eq!(
            serde_json::to_value(&localization).unwrap(),
            json!({"stringUnit": {"state": "translated", "value": "Tom & Jerry"}})
        );
    }

    #[test]
    fn test_standard_plural_uses_substitution() {
        let localization = Localization::from_value(&forms(vec![
            (PluralCategory::One, "{count} file found"),
            (PluralCategory::Other, "{count} files found"),
        ]));
        assert_eq!(
            serde_json::to_value(&localization).unwrap(),
            json!({
                "stringUnit": {"state": "translated", "value": "%#@arg1@"},
                "substitutions": {
                    "arg1": {
                        "argNum": 1,
                        "formatSpecifier": "lld",
                        "variations": {
                            "plural": {
                                "one": {"stringUnit": {"state": "translated", "value": "%lld file found"}},
                                "other": {"stringUnit": {"state": "translated", "value": "%lld files found"}}
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_custom_plural_uses_direct_variations() {
        let localization = Localization::from_value(&forms(vec![
            (PluralCategory::One, "A file"),
            (PluralCategory::Other, "Some files"),
        ]));
        assert_eq!(
            serde_json::to_value(&localization).unwrap(),
            json!({
                "variations": {
                    "plural": {
                        "one": {"stringUnit": {"state": "translated", "value": "A file"}},
                        "other": {"stringUnit": {"state": "translated", "value": "Some files"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_plural_categories_keep_document_order() {
        let localization = Localization::from_value(&forms(vec![
            (PluralCategory::One, "{count} file"),
            (PluralCategory::Few, "{count} files"),
            (PluralCategory::Many, "{count} files!"),
            (PluralCategory::Other, "{count} files?"),
        ]));
        let plural = &localization.substitutions.as_ref().unwrap()["arg1"].variations.plural;
        assert_eq!(
            plural.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["one", "few", "many", "other"]
        );

        let rendered = serde_json::to_string(&localization).unwrap();
        let position = |category: &str| rendered.find(&format!("\"{category}\":")).unwrap();
        assert!(position("one") < position("few"));
        assert!(position("few") < position("many"));
        assert!(position("many") < position("other"));
    }

    #[test]
    fn test_localizations_keep_insertion_order() {
        let mut catalog = StringCatalog::new("en");
        for language in ["en", "fr", "de"] {
            catalog.insert("hello", language, &TranslationValue::Simple("Hi".to_string()));
        }
        let languages: Vec<&str> = catalog.strings["hello"]
            .localizations
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(languages, vec!["en", "fr", "de"]);

        let json = catalog.to_json().unwrap();
        assert!(json.find("\"fr\"").unwrap() < json.find("\"de\"").unwrap());
    }

    #[test]
    fn test_catalog_merges_locales() {
        let source = LocaleDescriptor::new("en-US", "en", TextDirection::Ltr);
        let german = LocaleDescriptor::new("de-DE", "de", TextDirection::Ltr);
        let project = ProjectInfo::new(source.clone(), vec![german.clone()]);
        let translations = |text: &str| -> TranslationMap {
            vec![("hello".to_string(), TranslationValue::Simple(text.to_string()))]
                .into_iter()
                .collect()
        };
        let catalog = Catalog::new(
            project,
            vec![
                LocaleTranslations {
                    locale: source,
                    target_language: Some("en".to_string()),
                    translations: translations("Hello"),
                },
                LocaleTranslations {
                    locale: german,
                    target_language: Some("de".to_string()),
                    translations: translations("Hallo"),
                },
            ],
        );

        let files = StringCatalogEncoder::new()
            .encode(&catalog, &Glossary::default())
            .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.to_str(), Some(CATALOG_FILE));
        assert!(!files[0].contents.ends_with('\n'));

        let value: Value = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(value["sourceLanguage"], "en");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["strings"]["hello"]["extractionState"], "manual");
        assert_eq!(
            value["strings"]["hello"]["localizations"]["de"]["stringUnit"]["value"],
            "Hallo"
        );
        assert_eq!(
            value["strings"]["hello"]["localizations"]["en"]["stringUnit"]["value"],
            "Hello"
        );

        let parsed: StringCatalog = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(parsed.strings["hello"].localizations.len(), 2);
    }
}
