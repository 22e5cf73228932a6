// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Channel resolution and facet value lookup.

use crate::error::{Result, SearchError};
use crate::models::catalog::{Channel, FacetValue, FacetValueRecord, DEFAULT_CHANNEL_CODE};
use crate::models::context::{CurrencyCode, LanguageCode, RequestContext};
use crate::models::ids::{Id, IdList};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Known sales channels, looked up by the token clients send.
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
}

impl ChannelRegistry {
    /// A registry always holds the default channel; one is synthesized
    /// (English, USD) when `channels` lacks it.
    pub fn new(mut channels: Vec<Channel>) -> Self {
        if !channels.iter().any(|c| c.code == DEFAULT_CHANNEL_CODE) {
            channels.insert(0, default_channel());
        }
        Self { channels }
    }

    pub fn default_channel(&self) -> &Channel {
        self.channels
            .iter()
            .find(|c| c.code == DEFAULT_CHANNEL_CODE)
            .unwrap_or(&self.channels[0])
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Resolve a channel from a client token.
    ///
    /// An empty token selects the default channel, as does any token when
    /// the default is the only channel.
    pub fn channel_from_token(&self, token: &str) -> Result<&Channel> {
        if self.channels.len() == 1 || token.is_empty() {
            return Ok(self.default_channel());
        }
        self.channels
            .iter()
            .find(|c| c.token == token)
            .ok_or_else(|| SearchError::ChannelNotFound(token.to_string()))
    }

    /// Build the per-request context. An unparseable or missing language
    /// falls back to the channel's default language.
    pub fn resolve_context(&self, token: &str, language: Option<&str>) -> Result<RequestContext> {
        let channel = self.channel_from_token(token)?;
        let language_code = language
            .and_then(LanguageCode::parse)
            .unwrap_or_else(|| channel.default_language_code.clone());

        Ok(RequestContext {
            channel_code: channel.code.clone(),
            language_code,
            currency_code: channel.currency_code.clone(),
        })
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn default_channel() -> Channel {
    Channel {
        code: DEFAULT_CHANNEL_CODE.to_string(),
        token: String::new(),
        default_language_code: LanguageCode::default(),
        currency_code: CurrencyCode::default(),
    }
}

/// Source of displayable facet values.
#[async_trait]
pub trait FacetCatalog: Send + Sync {
    /// Look up `ids` in the request language. Unknown ids are skipped and the
    /// result keeps the order of `ids`.
    async fn find_facet_values(
        &self,
        ids: &IdList,
        ctx: &RequestContext,
    ) -> Result<Vec<FacetValue>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    facet_values: Vec<FacetValueRecord>,
}

/// Catalog held in memory, loaded from a JSON document:
///
/// ```json
/// {
///   "channels": [{ "code": "eu", "token": "eu-token", "defaultLanguageCode": "de", "currencyCode": "EUR" }],
///   "facetValues": [{ "id": "3", "code": "blue", "name": "Blue",
///                     "facetId": "1", "facetCode": "color", "facetName": "Color",
///                     "translations": { "de": { "name": "Blau", "facetName": "Farbe" } } }]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    channels: ChannelRegistry,
    facet_values: HashMap<Id, FacetValueRecord>,
}

impl StaticCatalog {
    pub fn new(channels: Vec<Channel>, facet_values: Vec<FacetValueRecord>) -> Self {
        Self {
            channels: ChannelRegistry::new(channels),
            facet_values: facet_values
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| SearchError::Catalog(format!("invalid catalog document: {e}")))?;
        Ok(Self::new(file.channels, file.facet_values))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn facet_value_count(&self) -> usize {
        self.facet_values.len()
    }
}

#[async_trait]
impl FacetCatalog for StaticCatalog {
    async fn find_facet_values(
        &self,
        ids: &IdList,
        ctx: &RequestContext,
    ) -> Result<Vec<FacetValue>> {
        let fallback = &self.channels.default_channel().default_language_code;
        Ok(ids
            .iter()
            .filter_map(|id| self.facet_values.get(id))
            .map(|record| record.translate(&ctx.language_code, fallback))
            .collect())
    }
}
