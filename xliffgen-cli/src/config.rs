//! Optional `xliffgen.toml` configuration.
//!
//! ```toml
//! [android]
//! keep_named_placeholders = true
//!
//! [desktop.locale_paths]
//! "pt-BR" = "pt_BR"
//!
//! [constants]
//! kotlin_package = "com.example.strings"
//! copyright_holder = "Example Inc"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use xliffgen::{AndroidOptions, ConstantsOptions, ConvertOptions, LocaleMapping};

pub const DEFAULT_CONFIG_FILE: &str = "xliffgen.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub android: AndroidSection,
    pub desktop: DesktopSection,
    pub constants: ConstantsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AndroidSection {
    pub keep_named_placeholders: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesktopSection {
    /// Merged over the built-in locale → directory table.
    pub locale_paths: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstantsSection {
    pub kotlin_package: Option<String>,
    pub kotlin_object: Option<String>,
    pub typescript_enum: Option<String>,
    pub swift_enum: Option<String>,
    pub copyright_holder: Option<String>,
    pub year: Option<i32>,
}

impl CliConfig {
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Loads `explicit` if given (it must exist), otherwise `xliffgen.toml`
    /// from the working directory when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(format!("Config file not found: {}", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        tracing::debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    pub fn convert_options(&self) -> ConvertOptions {
        let mut constants = ConstantsOptions::default();
        let section = &self.constants;
        if let Some(package) = &section.kotlin_package {
            constants = constants.with_kotlin_package(package);
        }
        if let Some(object) = &section.kotlin_object {
            constants = constants.with_kotlin_object(object);
        }
        if let Some(name) = &section.typescript_enum {
            constants = constants.with_typescript_enum(name);
        }
        if let Some(name) = &section.swift_enum {
            constants = constants.with_swift_enum(name);
        }
        if let Some(holder) = &section.copyright_holder {
            constants = constants.with_copyright_holder(holder);
        }
        if let Some(year) = section.year {
            constants = constants.with_year(year);
        }

        ConvertOptions::new()
            .with_android(
                AndroidOptions::new().with_named_placeholders(self.android.keep_named_placeholders),
            )
            .with_locale_mapping(
                LocaleMapping::desktop_default().with_overrides(self.desktop.locale_paths.clone()),
            )
            .with_constants(constants)
    }
}
