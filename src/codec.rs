//! Loading a raw translations directory and running a full conversion.
//!
//! A run reads `_project_info.json`, renders the constants file from the
//! glossary, parses the `<locale>.xliff` documents the target needs, then
//! encodes and writes every output file. The first error stops the run.

use std::path::{Path, PathBuf};

use crate::{
    constants::{ConstantsOptions, write_constants},
    error::Error,
    formats::{AndroidOptions, Target},
    locale::LocaleMapping,
    project::{ProjectInfo, glossary_path},
    types::{Glossary, LocaleDescriptor, LocaleTranslations},
    xliff::{XliffDocument, document_path},
};

/// The parsed locales of one conversion run, in processing order:
/// the source locale first (when the target uses it), then the targets
/// sorted by locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    project: ProjectInfo,
    locales: Vec<LocaleTranslations>,
}

impl Catalog {
    pub fn new(project: ProjectInfo, locales: Vec<LocaleTranslations>) -> Self {
        Self { project, locales }
    }

    /// Parses every document `target` needs from `input_dir`.
    pub fn load(input_dir: &Path, project: ProjectInfo, target: Target) -> Result<Self, Error> {
        let options = target.read_options();
        let descriptors: Vec<&LocaleDescriptor> = if target.includes_source() {
            std::iter::once(&project.source_language)
                .chain(project.target_languages.iter())
                .collect()
        } else {
            project.target_languages.iter().collect()
        };

        let mut locales = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let path = document_path(input_dir, &descriptor.locale);
            tracing::info!(locale = %descriptor.locale, "reading translations");
            let document = XliffDocument::read_from(&path, options)?;
            locales.push(LocaleTranslations {
                locale: descriptor.clone(),
                target_language: document.target_language,
                translations: document.translations,
            });
        }

        Ok(Self::new(project, locales))
    }

    pub fn source_language(&self) -> &LocaleDescriptor {
        &self.project.source_language
    }

    pub fn locales(&self) -> &[LocaleTranslations] {
        &self.locales
    }

    pub fn is_source(&self, locale: &LocaleDescriptor) -> bool {
        self.project.is_source(locale)
    }
}

/// Options for [`convert`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub android: AndroidOptions,
    pub locale_mapping: LocaleMapping,
    pub constants: ConstantsOptions,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_android(mut self, android: AndroidOptions) -> Self {
        self.android = android;
        self
    }

    pub fn with_locale_mapping(mut self, mapping: LocaleMapping) -> Self {
        self.locale_mapping = mapping;
        self
    }

    pub fn with_constants(mut self, constants: ConstantsOptions) -> Self {
        self.constants = constants;
        self
    }
}

/// What a [`convert`] run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub target: Target,
    /// Locales whose documents were converted, in processing order.
    pub locales: Vec<String>,
    /// Every translation file written, in write order.
    pub files: Vec<PathBuf>,
    pub constants_path: PathBuf,
    pub app_name: Option<String>,
}

/// Converts the raw translations in `input_dir` for `target`.
///
/// Translation files go below `output_dir`, the constants source to
/// `constants_path`.
pub fn convert(
    target: Target,
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    constants_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<ConversionSummary, Error> {
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();
    let constants_path = constants_path.as_ref();

    let project = ProjectInfo::read_from_dir(input_dir)?;
    tracing::info!(
        %target,
        languages = project.target_languages.len(),
        "project info processed"
    );

    let glossary = Glossary::read_from(glossary_path(input_dir))?;
    let app_name = write_constants(
        target,
        &glossary,
        &project.rtl_codes(),
        constants_path,
        &options.constants,
    )?;
    tracing::info!(path = %constants_path.display(), "static string generation complete");

    let catalog = Catalog::load(input_dir, project, target)?;
    let output = target.encoder(options).encode(&catalog, &glossary)?;

    let mut files = Vec::with_capacity(output.len());
    for file in &output {
        let written = file.write_under(output_dir)?;
        tracing::debug!(path = %written.display(), "wrote translations");
        files.push(written);
    }
    tracing::info!(%target, files = files.len(), "all conversions complete");

    Ok(ConversionSummary {
        target,
        locales: catalog
            .locales()
            .iter()
            .map(|locale| locale.locale.locale.clone())
            .collect(),
        files,
        constants_path: constants_path.to_path_buf(),
        app_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextDirection;
    use std::fs;

    #[test]
    fn test_load_reports_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectInfo::new(
            LocaleDescriptor::new("en", "en", TextDirection::Ltr),
            vec![LocaleDescriptor::new("fr", "fr", TextDirection::Ltr)],
        );
        let err = Catalog::load(dir.path(), project, Target::Android).unwrap_err();
        match err {
            Error::MissingInputFile { path } => assert_eq!(path, dir.path().join("en.xliff")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_desktop_load_ignores_source_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("fr.xliff"),
            r#"<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2"><file target-language="fr"><body/></file></xliff>"#,
        )
        .unwrap();
        let project = ProjectInfo::new(
            LocaleDescriptor::new("en", "en", TextDirection::Ltr),
            vec![LocaleDescriptor::new("fr", "fr", TextDirection::Ltr)],
        );
        let catalog = Catalog::load(dir.path(), project, Target::Desktop).unwrap();
        assert_eq!(catalog.locales().len(), 1);
        assert_eq!(catalog.locales()[0].locale.locale, "fr");
        assert!(!catalog.is_source(&catalog.locales()[0].locale));
    }

    #[test]
    fn test_convert_requires_project_info() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(
            Target::Ios,
            dir.path(),
            dir.path().join("out"),
            dir.path().join("Constants.swift"),
            &ConvertOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingInputFile { .. }));
    }
}
