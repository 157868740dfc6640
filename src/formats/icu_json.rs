//! Desktop `messages.json` catalogs with ICU plural syntax.

use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use crate::{
    codec::Catalog,
    error::Error,
    escape::html_unescape,
    formats::Target,
    locale::LocaleMapping,
    placeholder::to_icu_plural,
    traits::Encoder,
    types::{Glossary, OutputFile, TranslationMap, TranslationValue},
};

pub const MESSAGES_FILE: &str = "messages.json";

#[derive(Debug, Clone, Default)]
pub struct DesktopEncoder {
    mapping: LocaleMapping,
}

impl DesktopEncoder {
    pub fn new(mapping: LocaleMapping) -> Self {
        Self { mapping }
    }

    /// Flattens a translation map into `resname → ICU message`.
    pub fn messages(translations: &TranslationMap) -> BTreeMap<&str, String> {
        translations
            .iter()
            .map(|(resname, value)| {
                let message = match value {
                    TranslationValue::Simple(text) => html_unescape(text).into_owned(),
                    TranslationValue::Plural(forms) => {
                        to_icu_plural(forms, |text| html_unescape(text).into_owned())
                    }
                };
                (resname.as_str(), message)
            })
            .collect()
    }

    /// Renders one `messages.json` document: two-space indentation,
    /// followed by a blank line.
    pub fn render(translations: &TranslationMap) -> Result<String, Error> {
        let mut rendered = serde_json::to_string_pretty(&Self::messages(translations))?;
        rendered.push_str("\n\n");
        Ok(rendered)
    }
}

impl Encoder for DesktopEncoder {
    fn target(&self) -> Target {
        Target::Desktop
    }

    fn encode(&self, catalog: &Catalog, _glossary: &Glossary) -> Result<Vec<OutputFile>, Error> {
        let mut files = Vec::new();
        let mut seen_dirs = HashSet::new();

        for locale in catalog.locales() {
            if catalog.is_source(&locale.locale) {
                continue;
            }
            let dir = self.mapping.output_dir(&locale.locale);
            if !seen_dirs.insert(dir.to_string()) {
                tracing::warn!(
                    locale = %locale.locale.locale,
                    dir,
                    "several locales share an output directory, the last one wins"
                );
            }
            tracing::debug!(locale = %locale.locale.locale, dir, "encoded desktop messages");
            files.push(OutputFile::new(
                PathBuf::from(dir).join(MESSAGES_FILE),
                Self::render(&locale.translations)?,
            ));
        }
        Ok(files)
    }
}
