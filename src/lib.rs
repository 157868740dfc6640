//! Convert XLIFF 1.2 translation exports into platform resources.
//!
//! Three targets are supported, each with its own constants source for the
//! non-translatable glossary:
//!
//! | Target    | Translations                         | Constants                |
//! |-----------|--------------------------------------|--------------------------|
//! | `android` | `values*/strings.xml`                | Kotlin `object`          |
//! | `desktop` | `<locale>/messages.json` (ICU)       | TypeScript `enum`        |
//! | `ios`     | `Localizable.xcstrings`              | Swift `enum`             |
//!
//! ```no_run
//! use xliffgen::{ConvertOptions, Target, convert};
//!
//! let summary = convert(
//!     Target::Android,
//!     "raw_translations",
//!     "app/src/main/res",
//!     "NonTranslatableStringConstants.kt",
//!     &ConvertOptions::default(),
//! )?;
//! println!("wrote {} files", summary.files.len());
//! # Ok::<(), xliffgen::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod constants;
pub mod error;
pub mod escape;
pub mod formats;
pub mod locale;
pub mod placeholder;
pub mod project;
pub mod read_options;
pub mod traits;
pub mod types;
pub mod xliff;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Catalog, ConversionSummary, ConvertOptions, convert},
    constants::ConstantsOptions,
    error::Error,
    formats::{AndroidOptions, Target},
    locale::LocaleMapping,
    project::ProjectInfo,
    read_options::ReadOptions,
    traits::Encoder,
    types::{
        Glossary, GlossaryEntry, LocaleDescriptor, LocaleTranslations, OutputFile, PluralCategory,
        PluralForms, TextDirection, TranslationMap, TranslationValue,
    },
    xliff::XliffDocument,
};
