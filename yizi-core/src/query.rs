//! The seam between the search controller and the remote character table

use std::fmt;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::model::CharacterRecord;

/// Maximum records returned by a single query
pub const RESULT_LIMIT: usize = 10;

/// The two query shapes issued against the character table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterQuery {
    /// Case-insensitive substring match on the glyph column
    GlyphContains { text: String, limit: usize },
    /// Exact match on the radical number column
    RadicalEquals { number: u8, limit: usize },
}

impl CharacterQuery {
    pub fn glyph_contains(text: impl Into<String>) -> Self {
        Self::GlyphContains {
            text: text.into(),
            limit: RESULT_LIMIT,
        }
    }

    pub fn radical_equals(number: u8) -> Self {
        Self::RadicalEquals {
            number,
            limit: RESULT_LIMIT,
        }
    }

    pub fn limit(&self) -> usize {
        match self {
            CharacterQuery::GlyphContains { limit, .. } | CharacterQuery::RadicalEquals { limit, .. } => {
                *limit
            }
        }
    }
}

impl fmt::Display for CharacterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterQuery::GlyphContains { text, limit } => {
                write!(f, "character ILIKE '%{}%' LIMIT {}", text, limit)
            }
            CharacterQuery::RadicalEquals { number, limit } => {
                write!(f, "radical = {} LIMIT {}", number, limit)
            }
        }
    }
}

/// Read-only access to the character table
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Run one query. Records come back in whatever order the store returns them.
    async fn fetch(&self, query: &CharacterQuery) -> Result<Vec<CharacterRecord>, QueryError>;
}

#[async_trait]
impl<S: CharacterStore + ?Sized> CharacterStore for std::sync::Arc<S> {
    async fn fetch(&self, query: &CharacterQuery) -> Result<Vec<CharacterRecord>, QueryError> {
        (**self).fetch(query).await
    }
}
