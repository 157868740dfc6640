use proptest::prelude::*;
use xliffgen::escape::{escape_android, html_unescape};
use xliffgen::formats::{AndroidEncoder, DesktopEncoder, xcstrings::Localization};
use xliffgen::placeholder::{placeholder_names, to_icu_plural, to_positional};
use xliffgen::{PluralCategory, PluralForms, TranslationMap, TranslationValue};

/// Named count placeholder that no output format may carry through.
const COUNT_TOKEN: &str = "{count}";

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("count".to_string()),
        Just("found_count".to_string()),
        Just("total_count".to_string()),
        proptest::string::string_regex("[a-z][a-z_]{0,8}").expect("valid name regex"),
    ]
}

fn words_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z ,.!]{0,12}").expect("valid words regex")
}

/// Text made of plain words interleaved with `{name}` placeholders.
fn template_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((words_strategy(), name_strategy()), 0..5).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(words, name)| format!("{words}{{{name}}}"))
            .collect::<String>()
    })
}

fn category_strategy() -> impl Strategy<Value = PluralCategory> {
    prop_oneof![
        Just(PluralCategory::Zero),
        Just(PluralCategory::One),
        Just(PluralCategory::Two),
        Just(PluralCategory::Few),
        Just(PluralCategory::Many),
        Just(PluralCategory::Other),
    ]
}

fn forms_strategy() -> impl Strategy<Value = PluralForms> {
    prop::collection::vec((category_strategy(), template_strategy()), 1..6).prop_map(|forms| {
        let mut plural = PluralForms::new();
        for (category, text) in forms {
            plural.insert(category, format!("{{count}} {text}"));
        }
        plural
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn positional_numbering_removes_every_placeholder(text in template_strategy()) {
        let converted = to_positional(&text);
        prop_assert!(placeholder_names(&converted).is_empty());
        prop_assert!(!converted.contains(COUNT_TOKEN));
    }

    #[test]
    fn positional_numbering_is_idempotent(text in template_strategy()) {
        let once = to_positional(&text);
        prop_assert_eq!(to_positional(&once), once.clone());
    }

    #[test]
    fn positional_numbering_uses_one_position_per_distinct_name(text in template_strategy()) {
        let distinct = placeholder_names(&text).len();
        let converted = to_positional(&text);
        for position in 1..=distinct {
            let specifier_d = format!("%{position}$d");
            let specifier_s = format!("%{position}$s");
            prop_assert!(converted.contains(&specifier_d) || converted.contains(&specifier_s));
        }
        let beyond_d = format!("%{}$d", distinct + 1);
        let beyond_s = format!("%{}$s", distinct + 1);
        prop_assert!(!converted.contains(&beyond_d));
        prop_assert!(!converted.contains(&beyond_s));
    }

    #[test]
    fn html_unescape_is_identity_without_ampersands(text in words_strategy()) {
        prop_assert_eq!(html_unescape(&text), text.as_str());
    }

    #[test]
    fn android_escaping_leaves_plain_words_alone(text in words_strategy()) {
        prop_assert_eq!(escape_android(&text), text);
    }

    #[test]
    fn icu_plural_preserves_categories(forms in forms_strategy()) {
        let clause = to_icu_plural(&forms, str::to_string);
        prop_assert!(!clause.contains(COUNT_TOKEN));
        for category in forms.categories() {
            let label = format!(" {category} [");
            prop_assert!(clause.contains(&label));
        }
        prop_assert_eq!(clause.matches(" [").count(), forms.len());
    }

    #[test]
    fn android_plurals_preserve_categories(forms in forms_strategy()) {
        let translations: TranslationMap =
            vec![("key".to_string(), TranslationValue::Plural(forms.clone()))].into_iter().collect();
        let rendered = AndroidEncoder::default().render(&translations, None).unwrap();
        prop_assert!(!rendered.contains(COUNT_TOKEN));
        prop_assert_eq!(rendered.matches("<item quantity=").count(), forms.len());
        for category in forms.categories() {
            let item = format!("<item quantity=\"{category}\">");
            prop_assert!(rendered.contains(&item));
        }
    }

    #[test]
    fn desktop_messages_never_contain_count(forms in forms_strategy()) {
        let translations: TranslationMap =
            vec![("key".to_string(), TranslationValue::Plural(forms))].into_iter().collect();
        let messages = DesktopEncoder::messages(&translations);
        prop_assert!(!messages["key"].contains(COUNT_TOKEN));
    }

    #[test]
    fn catalog_plurals_preserve_categories(forms in forms_strategy()) {
        let localization = Localization::from_value(&TranslationValue::Plural(forms.clone()));
        let substitutions = localization.substitutions.expect("standard plural");
        let plural = &substitutions["arg1"].variations.plural;
        prop_assert_eq!(plural.len(), forms.len());
        let emitted: Vec<&str> = plural.keys().map(String::as_str).collect();
        let expected: Vec<&str> = forms.categories().map(|category| category.as_str()).collect();
        prop_assert_eq!(emitted, expected);
        for category in forms.categories() {
            let variation = &plural[category.as_str()];
            prop_assert!(!variation.string_unit.value.contains(COUNT_TOKEN));
        }
    }
}
