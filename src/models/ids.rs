// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Identifiers and the delimited id sets stored in the search index.
//!
//! The index keeps facet ids and facet value ids in a single text column each,
//! joined by [`ID_DELIMITER`]. [`Id`] only admits characters that can never be
//! confused with the delimiter, so `IdList::to_delimited` and
//! `IdList::parse_delimited` always agree.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// Separator used in the index's `facet_ids` / `facet_value_ids` columns.
pub const ID_DELIMITER: char = ',';

/// Longest identifier accepted from callers or the index.
pub const MAX_ID_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid identifier: {reason}")]
pub struct InvalidId {
    pub value: String,
    pub reason: &'static str,
}

/// Identifier of a product, variant, facet or facet value.
///
/// Non-empty, at most [`MAX_ID_LENGTH`] characters of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    pub fn parse(raw: &str) -> Result<Self, InvalidId> {
        let invalid = |reason| InvalidId {
            value: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("identifier is empty"));
        }
        if raw.len() > MAX_ID_LENGTH {
            return Err(invalid("identifier is longer than 64 characters"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "only ASCII letters, digits, '-' and '_' are allowed",
            ));
        }

        Ok(Id(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Id {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Id::parse(&value)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Ordered, duplicate-free set of identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(Vec<Id>);

impl IdList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the delimited form stored in the index.
    ///
    /// Segments are trimmed, empty segments are discarded (a grouped aggregate of
    /// rows without facets yields `"1,,2"`), and repeated ids keep their first
    /// position.
    pub fn parse_delimited(raw: &str) -> Result<Self, InvalidId> {
        let mut list = IdList::new();
        for segment in raw.split(ID_DELIMITER) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            list.push(Id::parse(segment)?);
        }
        Ok(list)
    }

    pub fn to_delimited(&self) -> String {
        self.0
            .iter()
            .map(Id::as_str)
            .collect::<Vec<_>>()
            .join(&ID_DELIMITER.to_string())
    }

    /// Append `id` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, id: Id) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.0.contains(id)
    }

    /// Add every id of `other` that is not yet present, preserving order.
    pub fn union(&mut self, other: &IdList) {
        for id in other.iter() {
            self.push(id.clone());
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Id> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Id] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Id> {
        self.0
    }
}

impl FromIterator<Id> for IdList {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        let mut list = IdList::new();
        for id in iter {
            list.push(id);
        }
        list
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a Id;
    type IntoIter = std::slice::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
