//! Loading of the JSON payloads saved next to the XLIFF documents.
//!
//! The download step stores the translation service's project response as
//! `_project_info.json` and the non-translatable terms as
//! `_non_translatable_strings.json`; the leading underscore keeps them apart
//! from the `<locale>.xliff` documents in the same directory.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::Error,
    types::{Glossary, GlossaryEntry, LocaleDescriptor},
};

pub const PROJECT_INFO_FILE: &str = "_project_info.json";
pub const GLOSSARY_FILE: &str = "_non_translatable_strings.json";

/// Source and target languages of the translation project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub source_language: LocaleDescriptor,
    /// Sorted by `locale`.
    pub target_languages: Vec<LocaleDescriptor>,
}

#[derive(Deserialize)]
struct ProjectPayload {
    data: ProjectData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectData {
    source_language: LocaleDescriptor,
    #[serde(default)]
    target_languages: Vec<LocaleDescriptor>,
}

impl ProjectInfo {
    pub fn new(source_language: LocaleDescriptor, mut target_languages: Vec<LocaleDescriptor>) -> Self {
        target_languages.sort_by(|a, b| a.locale.cmp(&b.locale));
        Self {
            source_language,
            target_languages,
        }
    }

    pub fn from_str(json: &str) -> Result<Self, Error> {
        let payload: ProjectPayload = serde_json::from_str(json)?;
        Ok(Self::new(payload.data.source_language, payload.data.target_languages))
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::missing_input(path));
        }
        let payload: ProjectPayload = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(Self::new(payload.data.source_language, payload.data.target_languages))
    }

    /// Reads `_project_info.json` from the input directory.
    pub fn read_from_dir(input_dir: &Path) -> Result<Self, Error> {
        Self::read_from(input_dir.join(PROJECT_INFO_FILE))
    }

    pub fn is_source(&self, locale: &LocaleDescriptor) -> bool {
        self.source_language.locale == locale.locale
    }

    /// Two-letter codes of right-to-left target languages, sorted and deduplicated.
    pub fn rtl_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .target_languages
            .iter()
            .filter(|language| language.is_rtl())
            .map(|language| language.two_letters_code.clone())
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

#[derive(Deserialize)]
struct GlossaryPayload {
    data: Vec<GlossaryRecord>,
}

#[derive(Deserialize)]
struct GlossaryRecord {
    data: GlossaryTerm,
}

#[derive(Deserialize)]
struct GlossaryTerm {
    note: String,
    text: String,
}

impl From<GlossaryPayload> for Glossary {
    fn from(payload: GlossaryPayload) -> Self {
        Glossary::new(
            payload
                .data
                .into_iter()
                .map(|record| GlossaryEntry {
                    key: record.data.note,
                    text: record.data.text,
                })
                .collect(),
        )
    }
}

impl Glossary {
    pub fn from_str(json: &str) -> Result<Self, Error> {
        let payload: GlossaryPayload = serde_json::from_str(json)?;
        Ok(payload.into())
    }

    /// Reads a glossary payload, failing with [`Error::MissingGlossaryFile`] if absent.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingGlossaryFile {
                path: path.to_path_buf(),
            });
        }
        let payload: GlossaryPayload = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(payload.into())
    }
}

/// Location of the glossary payload inside the input directory.
pub fn glossary_path(input_dir: &Path) -> PathBuf {
    input_dir.join(GLOSSARY_FILE)
}
