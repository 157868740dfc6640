//! Reader for XLIFF 1.2 documents exported by the translation service.
//!
//! Only the parts of the format the encoders need are understood: the first
//! `file` element's `target-language`, `trans-unit` keys with their `source`
//! and `target` text, and gettext plural groups
//! (`<group restype="x-gettext-plurals">`) whose units carry their category in
//! an `x-plural-form` context.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::Error,
    read_options::ReadOptions,
    types::{PluralCategory, PluralForms, TranslationMap, TranslationValue},
};

pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";
const PLURAL_GROUP_RESTYPE: &str = "x-gettext-plurals";
const PLURAL_FORM_CONTEXT: &str = "x-plural-form";

/// One parsed XLIFF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XliffDocument {
    /// The `target-language` attribute of the first `file` element.
    pub target_language: Option<String>,
    pub translations: TranslationMap,
}

impl XliffDocument {
    /// Parses a document held in memory.
    ///
    /// Errors are reported as [`Error::MalformedDocument`] against the
    /// placeholder path `<inline>`.
    pub fn from_str(content: &str, options: ReadOptions) -> Result<Self, Error> {
        Self::parse(content, options, Path::new("<inline>"))
    }

    /// Reads and parses the document at `path`.
    ///
    /// A UTF-8 or UTF-16 byte order mark is honoured; anything else must be
    /// valid UTF-8.
    pub fn read_from<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::missing_input(path));
        }

        let file = File::open(path).map_err(Error::Io)?;
        // BOM-less input passes through untouched so bad bytes fail below.
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut content = String::new();
        decoder.read_to_string(&mut content).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => Error::malformed(path, "stream is not valid UTF-8"),
            _ => Error::Io(e),
        })?;

        Self::parse(&content, options, path)
    }

    fn parse(content: &str, options: ReadOptions, origin: &Path) -> Result<Self, Error> {
        let raw = RawDocument::parse(content).map_err(|e| match e {
            Error::XmlParse(_) | Error::DataMismatch(_) => Error::malformed(origin, e.to_string()),
            other => other,
        })?;

        if options.require_target_language {
            if !raw.has_file {
                return Err(Error::malformed(origin, "missing `file` element"));
            }
            if raw.target_language.is_none() {
                return Err(Error::malformed(origin, "missing `target-language` attribute"));
            }
        }

        let translations = raw.translations(options, origin);
        Ok(XliffDocument {
            target_language: raw.target_language,
            translations,
        })
    }
}

#[derive(Debug, Default)]
struct TransUnit {
    key: Option<String>,
    source: Option<String>,
    target: Option<String>,
    plural_form: Option<String>,
}

impl TransUnit {
    fn store(&mut self, field: Field, text: String) {
        let slot = match field {
            Field::Source => &mut self.source,
            Field::Target => &mut self.target,
            Field::PluralForm => &mut self.plural_form,
        };
        if slot.is_none() {
            *slot = Some(text);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Source,
    Target,
    PluralForm,
}

struct Capture {
    field: Field,
    text: String,
    depth: usize,
}

/// Flat view of the document before keys are resolved.
#[derive(Debug, Default)]
struct RawDocument {
    has_file: bool,
    target_language: Option<String>,
    /// Every trans-unit in document order.
    units: Vec<TransUnit>,
    /// Indices into `units` of the direct children of each plural group.
    plural_groups: Vec<Vec<usize>>,
}

impl RawDocument {
    fn parse(content: &str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(content);
        let mut raw = RawDocument::default();
        // One slot per open `group`; `Some` for plural groups.
        let mut groups: Vec<Option<Vec<usize>>> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"xliff" => check_namespace(&e)?,
                    b"file" => raw.note_file(&e)?,
                    b"group" => groups.push(is_plural_group(&e)?.then(Vec::new)),
                    b"trans-unit" => {
                        let unit = parse_trans_unit(&mut reader, &e)?;
                        raw.push_unit(unit, groups.last_mut());
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"file" => raw.note_file(&e)?,
                    b"trans-unit" => {
                        let unit = TransUnit {
                            key: unit_key(&e)?,
                            ..TransUnit::default()
                        };
                        raw.push_unit(unit, groups.last_mut());
                    }
                    _ => {}
                },
                Event::End(e) if e.local_name().as_ref() == b"group" => {
                    if let Some(Some(members)) = groups.pop() {
                        raw.plural_groups.push(members);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(raw)
    }

    fn note_file(&mut self, e: &BytesStart<'_>) -> Result<(), Error> {
        if !self.has_file {
            self.has_file = true;
            self.target_language = attribute(e, b"target-language")?;
        }
        Ok(())
    }

    fn push_unit(&mut self, unit: TransUnit, group: Option<&mut Option<Vec<usize>>>) {
        if let Some(Some(members)) = group {
            members.push(self.units.len());
        }
        self.units.push(unit);
    }

    fn translations(&self, options: ReadOptions, origin: &Path) -> TranslationMap {
        let mut translations = TranslationMap::new();

        for members in &self.plural_groups {
            let mut key: Option<&str> = None;
            let mut forms = PluralForms::new();

            for unit in members.iter().filter_map(|&i| self.units.get(i)) {
                if key.is_none() {
                    key = unit.key.as_deref();
                }
                let (Some(target), Some(form)) = (non_empty(&unit.target), unit.plural_form.as_deref())
                else {
                    continue;
                };
                let label = form.rsplit(':').next().unwrap_or(form).trim().to_lowercase();
                match label.parse::<PluralCategory>() {
                    Ok(category) => forms.insert(category, target),
                    Err(_) => {
                        tracing::debug!(form = %form, "Dropping unrecognised plural category");
                    }
                }
            }

            if let Some(key) = key {
                if !forms.is_empty() {
                    translations.insert_if_absent(key.to_string(), TranslationValue::Plural(forms));
                }
            }
        }

        for unit in &self.units {
            let Some(key) = unit.key.as_deref() else {
                continue;
            };
            if translations.contains_key(key) {
                continue;
            }

            if let Some(target) = non_empty(&unit.target) {
                translations.insert_if_absent(key.to_string(), TranslationValue::Simple(target.to_string()));
            } else if options.source_fallback {
                if let Some(source) = non_empty(&unit.source) {
                    tracing::warn!(
                        file = %origin.display(),
                        resname = %key,
                        "Using source text as target is missing or empty"
                    );
                    translations.insert_if_absent(key.to_string(), TranslationValue::Simple(source.to_string()));
                }
            }
        }

        translations
    }
}

fn parse_trans_unit(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<TransUnit, Error> {
    let mut unit = TransUnit {
        key: unit_key(start)?,
        ..TransUnit::default()
    };

    let mut depth = 0usize;
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if capture.is_none() {
                    if let Some(field) = captured_field(&e)? {
                        capture = Some(Capture {
                            field,
                            text: String::new(),
                            depth,
                        });
                    }
                }
            }
            Event::Empty(e) => {
                if capture.is_none() {
                    if let Some(field) = captured_field(&e)? {
                        unit.store(field, String::new());
                    }
                }
            }
            Event::Text(t) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(done) = capture.take() {
                    if done.depth == depth {
                        unit.store(done.field, done.text);
                    } else {
                        capture = Some(done);
                    }
                }
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(Error::DataMismatch(
                    "unexpected end of document inside `trans-unit`".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(unit)
}

fn captured_field(e: &BytesStart<'_>) -> Result<Option<Field>, Error> {
    Ok(match e.local_name().as_ref() {
        b"source" => Some(Field::Source),
        b"target" => Some(Field::Target),
        b"context" => {
            let context_type = attribute(e, b"context-type")?;
            (context_type.as_deref() == Some(PLURAL_FORM_CONTEXT)).then_some(Field::PluralForm)
        }
        _ => None,
    })
}

fn is_plural_group(e: &BytesStart<'_>) -> Result<bool, Error> {
    Ok(attribute(e, b"restype")?.as_deref() == Some(PLURAL_GROUP_RESTYPE))
}

/// `resname`, falling back to `id`.
fn unit_key(e: &BytesStart<'_>) -> Result<Option<String>, Error> {
    match attribute(e, b"resname")?.filter(|key| !key.is_empty()) {
        Some(key) => Ok(Some(key)),
        None => Ok(attribute(e, b"id")?.filter(|key| !key.is_empty())),
    }
}

fn check_namespace(e: &BytesStart<'_>) -> Result<(), Error> {
    if let Some(namespace) = attribute(e, b"xmlns")? {
        if namespace != XLIFF_NAMESPACE {
            tracing::warn!(namespace = %namespace, "Unexpected XLIFF namespace");
        }
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.is_empty())
}

/// Conventional file name of a locale's document inside the input directory.
pub fn document_path(input_dir: &Path, locale: &str) -> PathBuf {
    input_dir.join(format!("{}.xliff", locale))
}
