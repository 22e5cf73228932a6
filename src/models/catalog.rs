// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Shapes owned by the catalog and channel collaborators.

use crate::models::context::{CurrencyCode, LanguageCode};
use crate::models::ids::Id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Code of the channel every installation has.
pub const DEFAULT_CHANNEL_CODE: &str = "__default_channel__";

/// A sales channel: decides the currency and default language of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub code: String,
    /// Token clients send to select this channel
    pub token: String,
    pub default_language_code: LanguageCode,
    pub currency_code: CurrencyCode,
}

/// Facet a value belongs to, as shown in search responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FacetSummary {
    pub id: Id,
    pub code: String,
    pub name: String,
}

/// A facet value available for filtering the current result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacetValue {
    pub id: Id,
    pub code: String,
    pub name: String,
    pub language_code: LanguageCode,
    pub facet: FacetSummary,
}

/// Stored facet value with its translations, keyed by language code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetValueRecord {
    pub id: Id,
    pub code: String,
    pub name: String,
    pub facet_id: Id,
    pub facet_code: String,
    pub facet_name: String,
    #[serde(default)]
    pub translations: HashMap<String, Translation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub name: String,
    #[serde(default)]
    pub facet_name: Option<String>,
}

impl FacetValueRecord {
    /// Render the record in `language`, falling back to the untranslated names.
    pub fn translate(&self, language: &LanguageCode, fallback: &LanguageCode) -> FacetValue {
        let translation = self.translations.get(language.as_str());
        let (name, facet_name, language_code) = match translation {
            Some(t) => (
                t.name.clone(),
                t.facet_name.clone().unwrap_or_else(|| self.facet_name.clone()),
                language.clone(),
            ),
            None => (self.name.clone(), self.facet_name.clone(), fallback.clone()),
        };

        FacetValue {
            id: self.id.clone(),
            code: self.code.clone(),
            name,
            language_code,
            facet: FacetSummary {
                id: self.facet_id.clone(),
                code: self.facet_code.clone(),
                name: facet_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FacetValueRecord {
        serde_json::from_str(
            r#"{
                "id": "3",
                "code": "blue",
                "name": "Blue",
                "facetId": "1",
                "facetCode": "color",
                "facetName": "Color",
                "translations": { "de": { "name": "Blau", "facetName": "Farbe" } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_translate_uses_requested_language() {
        let de = LanguageCode::parse("de").unwrap();
        let en = LanguageCode::parse("en").unwrap();
        let value = record().translate(&de, &en);

        assert_eq!(value.name, "Blau");
        assert_eq!(value.facet.name, "Farbe");
        assert_eq!(value.language_code, de);
    }

    #[test]
    fn test_translate_falls_back_to_default_names() {
        let fr = LanguageCode::parse("fr").unwrap();
        let en = LanguageCode::parse("en").unwrap();
        let value = record().translate(&fr, &en);

        assert_eq!(value.name, "Blue");
        assert_eq!(value.facet.code, "color");
        assert_eq!(value.language_code, en);
    }
}
