//! UI locales and locale resolution.
//!
//! `kg` is the canonical internal code for Kyrgyz. The UI layer and
//! backend payloads also use the ISO code `ky`; both are mapped here,
//! at the boundary, and nowhere else.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CampusError;

/// Key under which the user's language choice is persisted.
pub const PREFERENCE_KEY: &str = "i18nextLng";

/// Active UI display language.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// Russian, the content baseline.
    #[default]
    Ru,
    En,
    Kg,
}

/// Tag prefixes accepted at the UI boundary, in lookup order.
const ALIASES: &[(&str, Locale)] = &[
    ("ru", Locale::Ru),
    ("en", Locale::En),
    ("kg", Locale::Kg),
    ("ky", Locale::Kg),
];

impl Locale {
    /// Every supported locale, baseline first.
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::En, Locale::Kg];

    /// Canonical internal code, also used as the payload field suffix.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Kg => "kg",
        }
    }

    /// Code sent to the backend (ISO 639-1).
    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Kg => "ky",
        }
    }

    /// Field suffixes that carry text for this locale, canonical first.
    pub fn field_suffixes(&self) -> &'static [&'static str] {
        match self {
            Self::Ru => &["ru"],
            Self::En => &["en"],
            Self::Kg => &["kg", "ky"],
        }
    }

    /// Human-readable language name in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Ru => "Русский",
            Self::En => "English",
            Self::Kg => "Кыргызча",
        }
    }

    /// Parse a UI or browser language tag such as `en-US`, `ky`, or `RU`.
    ///
    /// Region and script subtags are ignored. Returns `None` for tags
    /// outside the supported set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == primary)
            .map(|(_, locale)| *locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| CampusError::Locale(s.to_string()))
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Resolves the active locale from the available signals.
///
/// Precedence: explicit override > persisted preference > browser
/// language > configured default. Unsupported tags at any level are
/// skipped rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct LocaleResolver {
    default: Locale,
}

impl LocaleResolver {
    pub fn new(default: Locale) -> Self {
        Self { default }
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn resolve(
        &self,
        explicit: Option<&str>,
        persisted: Option<&str>,
        browser: Option<&str>,
    ) -> Locale {
        [explicit, persisted, browser]
            .into_iter()
            .flatten()
            .find_map(Locale::from_tag)
            .unwrap_or(self.default)
    }
}

/// Best-effort "browser language" for a terminal host: the POSIX locale
/// environment (`LC_ALL`, `LC_MESSAGES`, `LANG`), e.g. `en_US.UTF-8`.
pub fn environment_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty() && v != "C" && v != "POSIX")
}
