//! Translation lookup for user-facing strings.
//!
//! Translations are compiled-in tables, one per [`Locale`]. A lookup that
//! misses in the requested locale falls back to English, and a key that is
//! unknown everywhere is returned unchanged.
//!
//! ```
//! use eyerest::i18n::{translate, Locale};
//!
//! assert_eq!(translate(Locale::Es, "start"), "Iniciar");
//! assert_eq!(translate(Locale::Zh, "no_such_key"), "no_such_key");
//! ```

mod tables;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Locale
// ============================================================================

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (the fallback locale)
    #[default]
    En,
    /// Spanish
    Es,
    /// Simplified Chinese
    Zh,
}

impl Locale {
    /// All locales in display order.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Zh];

    /// Returns the two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Zh => "zh",
        }
    }

    /// Returns the language's own name for itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
            Locale::Zh => "中文",
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => tables::EN,
            Locale::Es => tables::ES,
            Locale::Zh => tables::ZH,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts bare codes and region-qualified tags such as `es-MX` or `zh_CN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Locale::ALL
            .into_iter()
            .find(|locale| locale.code() == primary)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Looks up `key` in `locale`, falling back to English and then to the key.
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    lookup(locale.table(), key)
        .or_else(|| lookup(Locale::En.table(), key))
        .unwrap_or(key)
}

/// Returns the available locales.
pub fn available_locales() -> &'static [Locale] {
    &Locale::ALL
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_each_locale() {
        assert_eq!(translate(Locale::En, "goodToGo"), "You're good to go!");
        assert_eq!(translate(Locale::Es, "minutes"), "minutos");
        assert_eq!(translate(Locale::Zh, "seconds"), "秒");
    }

    #[test]
    fn test_translate_falls_back_to_english() {
        // The product name is only defined once, in English.
        assert!(lookup(Locale::Es.table(), "appName").is_none());
        assert_eq!(translate(Locale::Es, "appName"), "Eyerest");
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        assert_eq!(translate(Locale::En, "missing.key"), "missing.key");
        assert_eq!(translate(Locale::Zh, ""), "");
    }

    #[test]
    fn test_every_locale_covers_english_keys_except_known_gaps() {
        for (key, _) in tables::EN {
            for locale in [Locale::Es, Locale::Zh] {
                if *key == "appName" {
                    continue;
                }
                assert!(
                    lookup(locale.table(), key).is_some(),
                    "{} missing in {}",
                    key,
                    locale
                );
            }
        }
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" ES ".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::Zh));
        assert_eq!("es_MX".parse::<Locale>(), Ok(Locale::Es));
        assert!("fr".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_display_and_serde() {
        assert_eq!(Locale::Zh.to_string(), "zh");
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), "\"es\"");
        let parsed: Locale = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(parsed, Locale::Zh);
    }

    #[test]
    fn test_available_locales() {
        let codes: Vec<_> = available_locales().iter().map(Locale::code).collect();
        assert_eq!(codes, ["en", "es", "zh"]);
    }
}
