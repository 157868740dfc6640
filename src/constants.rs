//! Source files declaring the non-translatable glossary terms.

use std::{fs, path::Path};

use chrono::Datelike;
use indoc::formatdoc;

use crate::{
    error::Error,
    escape::{escape_double_quoted, escape_single_quoted},
    formats::Target,
    types::Glossary,
};

/// Names used in the generated constants files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantsOptions {
    pub kotlin_package: String,
    pub kotlin_object: String,
    pub typescript_enum: String,
    pub swift_enum: String,
    pub copyright_holder: String,
    /// Year in the Swift copyright header. `None` uses the current year.
    pub year: Option<i32>,
}

impl Default for ConstantsOptions {
    fn default() -> Self {
        Self {
            kotlin_package: "org.session.libsession.utilities".to_string(),
            kotlin_object: "NonTranslatableStringConstants".to_string(),
            typescript_enum: "LOCALE_DEFAULTS".to_string(),
            swift_enum: "Constants".to_string(),
            copyright_holder: "Rangeproof Pty Ltd".to_string(),
            year: None,
        }
    }
}

impl ConstantsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kotlin_package(mut self, package: impl Into<String>) -> Self {
        self.kotlin_package = package.into();
        self
    }

    pub fn with_kotlin_object(mut self, object: impl Into<String>) -> Self {
        self.kotlin_object = object.into();
        self
    }

    pub fn with_typescript_enum(mut self, name: impl Into<String>) -> Self {
        self.typescript_enum = name.into();
        self
    }

    pub fn with_swift_enum(mut self, name: impl Into<String>) -> Self {
        self.swift_enum = name.into();
        self
    }

    pub fn with_copyright_holder(mut self, holder: impl Into<String>) -> Self {
        self.copyright_holder = holder.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    fn resolved_year(&self) -> i32 {
        self.year.unwrap_or_else(|| chrono::Local::now().year())
    }
}

fn escape_kotlin(text: &str) -> String {
    escape_double_quoted(text).replace('$', r"\$")
}

/// Renders the Kotlin object, one `const val` per entry with keys
/// upper-cased and aligned on the longest key.
pub fn render_kotlin(glossary: &Glossary, options: &ConstantsOptions) -> String {
    let entries: Vec<(String, &str)> = glossary
        .iter()
        .map(|entry| (entry.key.to_uppercase(), entry.text.as_str()))
        .collect();
    let width = entries
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let declarations: String = entries
        .iter()
        .map(|(key, text)| {
            format!(
                "    const val {:<width$} = \"{}\"\n",
                key,
                escape_kotlin(text),
                width = width
            )
        })
        .collect();

    formatdoc! {"
        package {package}

        // Non-translatable strings for use with the UI
        object {object} {{
        {declarations}}}

        ",
        package = options.kotlin_package,
        object = options.kotlin_object,
        declarations = declarations,
    }
}

/// Renders the TypeScript enum and the list of right-to-left locales.
pub fn render_typescript(glossary: &Glossary, rtl_codes: &[String], options: &ConstantsOptions) -> String {
    let members: String = glossary
        .iter()
        .map(|entry| format!("  {} = '{}',\n", entry.key, escape_single_quoted(&entry.text)))
        .collect();

    let mut codes: Vec<&str> = rtl_codes.iter().map(String::as_str).collect();
    codes.sort_unstable();
    codes.dedup();
    let rtl = codes
        .iter()
        .map(|code| format!("'{}'", escape_single_quoted(code)))
        .collect::<Vec<_>>()
        .join(", ");

    formatdoc! {"
        export enum {name} {{
        {members}}}

        export const rtlLocales = [{rtl}] as const;

        ",
        name = options.typescript_enum,
        members = members,
        rtl = rtl,
    }
}

/// Renders the Swift enum behind the generated-file banner.
pub fn render_swift(glossary: &Glossary, options: &ConstantsOptions) -> String {
    let members: String = glossary
        .iter()
        .map(|entry| {
            format!(
                "    public static let {}: String = \"{}\"\n",
                entry.key,
                escape_double_quoted(&entry.text)
            )
        })
        .collect();

    formatdoc! {"
        // Copyright © {year} {holder}. All rights reserved.
        // This file is automatically generated and maintained, do not manually edit it.
        //
        // stringlint:disable

        public enum {name} {{
        {members}}}

        ",
        year = options.resolved_year(),
        holder = options.copyright_holder,
        name = options.swift_enum,
        members = members,
    }
}

/// Renders the constants source for `target`.
pub fn render(target: Target, glossary: &Glossary, rtl_codes: &[String], options: &ConstantsOptions) -> String {
    match target {
        Target::Android => render_kotlin(glossary, options),
        Target::Desktop => render_typescript(glossary, rtl_codes, options),
        Target::Ios => render_swift(glossary, options),
    }
}

/// Writes the constants file for `target` to `path`, creating parent
/// directories as needed.
///
/// Returns the text of the `APP_NAME` entry if the glossary has one.
pub fn write_constants<P: AsRef<Path>>(
    target: Target,
    glossary: &Glossary,
    rtl_codes: &[String],
    path: P,
    options: &ConstantsOptions,
) -> Result<Option<String>, Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(target, glossary, rtl_codes, options))?;
    tracing::debug!(path = %path.display(), %target, "wrote constants file");

    Ok(glossary.app_name().map(str::to_string))
}
