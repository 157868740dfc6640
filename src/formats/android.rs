//! Android `strings.xml` resources.
//!
//! Output layout, per locale:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <resources>
//!     <string name="app_name" translatable="false">Session</string>
//!     <string name="key">value</string>
//!     <plurals name="key">
//!         <item quantity="one">value</item>
//!     </plurals>
//! </resources>
//! ```
//!
//! Values are written as already-escaped resource text (see
//! [`escape_android`]) so that the `<b>` markup survives.

use std::path::PathBuf;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    codec::Catalog,
    error::Error,
    escape::escape_android,
    formats::Target,
    locale::android_value_dirs,
    placeholder::to_positional,
    traits::Encoder,
    types::{Glossary, OutputFile, TranslationMap, TranslationValue},
};

pub const STRINGS_FILE: &str = "strings.xml";

const ENTRY_INDENT: &str = "\n    ";
const ITEM_INDENT: &str = "\n        ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AndroidOptions {
    /// Leave `{name}` placeholders of simple strings untouched.
    /// Plural items are always numbered.
    pub keep_named_placeholders: bool,
}

impl AndroidOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_named_placeholders(mut self, keep: bool) -> Self {
        self.keep_named_placeholders = keep;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AndroidEncoder {
    options: AndroidOptions,
}

impl AndroidEncoder {
    pub fn new(options: AndroidOptions) -> Self {
        Self { options }
    }

    fn simple_value(&self, value: &str) -> String {
        if self.options.keep_named_placeholders {
            escape_android(value)
        } else {
            escape_android(&to_positional(value))
        }
    }

    /// Renders one `strings.xml` document.
    ///
    /// `app_name` becomes a non-translatable first entry when present.
    pub fn render(&self, translations: &TranslationMap, app_name: Option<&str>) -> Result<String, Error> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new(&mut buffer);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;
        writer.write_event(Event::Start(BytesStart::new("resources")))?;

        if let Some(app_name) = app_name {
            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", "app_name"));
            elem.push_attribute(("translatable", "false"));
            writer.write_event(Event::Text(BytesText::new(ENTRY_INDENT)))?;
            write_element(&mut writer, elem, "string", app_name)?;
        }

        for (resname, value) in translations {
            writer.write_event(Event::Text(BytesText::new(ENTRY_INDENT)))?;
            match value {
                TranslationValue::Simple(text) => {
                    let mut elem = BytesStart::new("string");
                    elem.push_attribute(("name", resname.as_str()));
                    write_element(&mut writer, elem, "string", &self.simple_value(text))?;
                }
                TranslationValue::Plural(forms) => {
                    let mut plurals = BytesStart::new("plurals");
                    plurals.push_attribute(("name", resname.as_str()));
                    writer.write_event(Event::Start(plurals))?;
                    for (category, text) in forms.iter() {
                        let mut item = BytesStart::new("item");
                        item.push_attribute(("quantity", category.as_str()));
                        writer.write_event(Event::Text(BytesText::new(ITEM_INDENT)))?;
                        write_element(&mut writer, item, "item", &escape_android(&to_positional(text)))?;
                    }
                    writer.write_event(Event::Text(BytesText::new(ENTRY_INDENT)))?;
                    writer.write_event(Event::End(BytesEnd::new("plurals")))?;
                }
            }
        }

        writer.write_event(Event::Text(BytesText::new("\n")))?;
        writer.write_event(Event::End(BytesEnd::new("resources")))?;

        String::from_utf8(buffer).map_err(|e| Error::DataMismatch(e.to_string()))
    }
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    name: &str,
    escaped_text: &str,
) -> Result<(), Error> {
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escaped_text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

impl Encoder for AndroidEncoder {
    fn target(&self) -> Target {
        Target::Android
    }

    fn encode(&self, catalog: &Catalog, glossary: &Glossary) -> Result<Vec<OutputFile>, Error> {
        let mut files = Vec::new();
        for locale in catalog.locales() {
            let is_source = catalog.is_source(&locale.locale);
            let app_name = if is_source { glossary.app_name() } else { None };
            let contents = self.render(&locale.translations, app_name)?;

            for dir in android_value_dirs(&locale.locale.locale, is_source)? {
                tracing::debug!(locale = %locale.locale.locale, dir = %dir, "encoded android resources");
                files.push(OutputFile::new(
                    PathBuf::from(dir).join(STRINGS_FILE),
                    contents.clone(),
                ));
            }
        }
        Ok(files)
    }
}
