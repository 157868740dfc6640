//! Locale tag handling: output directory naming for each target.

use std::collections::BTreeMap;

use unic_langid::LanguageIdentifier;

use crate::{error::Error, types::LocaleDescriptor};

/// Explicit locale → output directory table for the desktop target.
///
/// Lookups try the full locale first, then the two-letter code, and finally
/// fall back to the two-letter code itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMapping {
    paths: BTreeMap<String, String>,
}

impl LocaleMapping {
    /// An empty table: every locale maps to its two-letter code.
    pub fn empty() -> Self {
        Self {
            paths: BTreeMap::new(),
        }
    }

    /// The table the desktop client ships with.
    ///
    /// Regional variants that must keep their own directory are listed
    /// explicitly, otherwise they would collapse onto their language.
    pub fn desktop_default() -> Self {
        [
            ("en-US", "en"),
            ("kmr-TR", "kmr"),
            ("es-419", "es-419"),
            ("hy-AM", "hy-AM"),
            ("pt-BR", "pt-BR"),
            ("pt-PT", "pt-PT"),
            ("zh-CN", "zh-CN"),
            ("zh-TW", "zh-TW"),
        ]
        .into_iter()
        .collect()
    }

    /// Adds or replaces entries, keeping the rest of the table.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.paths
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn output_dir<'a>(&'a self, locale: &'a LocaleDescriptor) -> &'a str {
        self.paths
            .get(&locale.locale)
            .or_else(|| self.paths.get(&locale.two_letters_code))
            .map(String::as_str)
            .unwrap_or(&locale.two_letters_code)
    }
}

impl Default for LocaleMapping {
    fn default() -> Self {
        Self::desktop_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::empty().with_overrides(iter)
    }
}

/// Resource directories an Android locale is written to.
///
/// The source locale lives in `values`, every other locale in
/// `values-<lang>`. A region subtag adds `values-<lang>-r<REGION>` with the
/// same content.
pub fn android_value_dirs(locale: &str, is_source: bool) -> Result<Vec<String>, Error> {
    let langid: LanguageIdentifier = locale
        .parse()
        .map_err(|_| Error::InvalidLocale(locale.to_string()))?;
    let language = langid.language.as_str();

    let mut dirs = vec![if is_source {
        "values".to_string()
    } else {
        format!("values-{}", language)
    }];

    if let Some(region) = langid.region {
        dirs.push(format!("values-{}-r{}", language, region.as_str()));
    }

    Ok(dirs)
}
