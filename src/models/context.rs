// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// ISO 639 language code, optionally with a region suffix ("en", "pt_BR").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(raw: &str) -> Option<Self> {
        let (lang, region) = match raw.split_once('_') {
            Some((lang, region)) => (lang, Some(region)),
            None => (raw, None),
        };

        let lang_ok = (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_lowercase());
        let region_ok = region.map_or(true, |r| {
            r.len() == 2 && r.chars().all(|c| c.is_ascii_uppercase())
        });

        (lang_ok && region_ok).then(|| LanguageCode(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        LanguageCode("en".to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LanguageCode::parse(&value).ok_or_else(|| format!("'{value}' is not a language code"))
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// ISO 4217 currency code ("USD", "EUR").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Option<Self> {
        (raw.len() == 3 && raw.chars().all(|c| c.is_ascii_uppercase()))
            .then(|| CurrencyCode(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        CurrencyCode("USD".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(&value).ok_or_else(|| format!("'{value}' is not a currency code"))
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Per-request scope handed to the search strategy.
///
/// Locale and currency only affect how results are displayed; they never
/// narrow the set of matching index rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub channel_code: String,
    pub language_code: LanguageCode,
    pub currency_code: CurrencyCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_parse() {
        assert!(LanguageCode::parse("en").is_some());
        assert!(LanguageCode::parse("pt_BR").is_some());
        assert!(LanguageCode::parse("haw").is_some());
        assert!(LanguageCode::parse("EN").is_none());
        assert!(LanguageCode::parse("en_br").is_none());
        assert!(LanguageCode::parse("").is_none());
        assert!(LanguageCode::parse("english").is_none());
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!(CurrencyCode::parse("USD").unwrap().as_str(), "USD");
        assert!(CurrencyCode::parse("usd").is_none());
        assert!(CurrencyCode::parse("US").is_none());
    }

    #[test]
    fn test_codes_serialize_as_plain_strings() {
        let code = CurrencyCode::parse("EUR").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"EUR\"");
        let lang: LanguageCode = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(lang.to_string(), "de");
        assert!(serde_json::from_str::<LanguageCode>("\"German\"").is_err());
    }
}
