//! The three output platforms and their encoders.
//!
//! Each submodule holds one [`Encoder`](crate::traits::Encoder)
//! implementation; [`Target`] selects among them.

pub mod android;
pub mod icu_json;
pub mod xcstrings;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use android::{AndroidEncoder, AndroidOptions};
pub use icu_json::DesktopEncoder;
pub use xcstrings::StringCatalogEncoder;

use crate::{codec::ConvertOptions, error::Error, read_options::ReadOptions, traits::Encoder};

/// An output platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `values*/strings.xml` resources plus a Kotlin constants object.
    Android,
    /// `<locale>/messages.json` ICU catalogs plus a TypeScript enum.
    Desktop,
    /// A single `Localizable.xcstrings` catalog plus a Swift enum.
    Ios,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Android, Target::Desktop, Target::Ios];

    /// How documents are parsed for this target.
    ///
    /// Only the string catalog needs the `target-language` attribute, and
    /// only it falls back to the source text for untranslated units.
    pub fn read_options(&self) -> ReadOptions {
        match self {
            Target::Ios => ReadOptions::new()
                .with_source_fallback(true)
                .with_required_target_language(true),
            Target::Android | Target::Desktop => ReadOptions::new(),
        }
    }

    /// Whether the source locale's document is converted as well.
    pub fn includes_source(&self) -> bool {
        !matches!(self, Target::Desktop)
    }

    /// Builds the encoder for this target.
    pub fn encoder(&self, options: &ConvertOptions) -> Box<dyn Encoder> {
        match self {
            Target::Android => Box::new(AndroidEncoder::new(options.android)),
            Target::Desktop => Box::new(DesktopEncoder::new(options.locale_mapping.clone())),
            Target::Ios => Box::new(StringCatalogEncoder::new()),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Android => write!(f, "android"),
            Target::Desktop => write!(f, "desktop"),
            Target::Ios => write!(f, "ios"),
        }
    }
}

/// Accepts the target names case-insensitively, plus a few common aliases.
impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Target::Android),
            "desktop" | "electron" => Ok(Target::Desktop),
            "ios" | "apple" => Ok(Target::Ios),
            other => Err(Error::UnknownTarget(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_round_trips_through_display() {
        for target in Target::ALL {
            assert_eq!(target.to_string().parse::<Target>().unwrap(), target);
        }
    }

    #[test]
    fn test_target_parse_is_case_insensitive() {
        assert_eq!("  IOS ".parse::<Target>().unwrap(), Target::Ios);
        assert_eq!("Electron".parse::<Target>().unwrap(), Target::Desktop);
    }

    #[test]
    fn test_unknown_target() {
        let err = "windows".parse::<Target>().unwrap_err();
        assert!(matches!(err, Error::UnknownTarget(name) if name == "windows"));
    }

    #[test]
    fn test_read_options_per_target() {
        assert!(Target::Ios.read_options().source_fallback);
        assert!(Target::Ios.read_options().require_target_language);
        assert!(!Target::Android.read_options().source_fallback);
        assert!(!Target::Desktop.read_options().require_target_language);
    }

    #[test]
    fn test_desktop_skips_source() {
        assert!(Target::Android.includes_source());
        assert!(Target::Ios.includes_source());
        assert!(!Target::Desktop.includes_source());
    }

    #[test]
    fn test_encoder_reports_its_target() {
        let options = ConvertOptions::default();
        for target in Target::ALL {
            assert_eq!(target.encoder(&options).target(), target);
        }
    }
}
