//! Opening build orders parsed from config tokens
//!
//! Token forms:
//! - `"Probe"`: one item
//! - `"5 SCV"`: the item repeated five times
//! - `"ChronoBoost_Nexus_Probe"`: boost production of `Probe` at a `Nexus`
//!
//! A token that cannot be parsed is logged and skipped; the rest of the
//! build order still loads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CHRONO_BOOST_PREFIX: &str = "ChronoBoost";

/// Largest repeat count a single token may expand to
pub const MAX_ITEM_COUNT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildItem {
    /// Produce one unit, structure or upgrade by type name
    Make(String),
    /// Spend a boost on the `target` building while it produces `production`
    ChronoBoost { target: String, production: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("build order item must be a string, got {0}")]
    NotAString(String),

    #[error("empty build order item")]
    Empty,

    #[error("item count must be at least 1 in '{0}'")]
    ZeroCount(String),

    #[error("item count in '{0}' is above {}", MAX_ITEM_COUNT)]
    CountTooLarge(String),

    #[error("invalid item name '{0}'")]
    BadName(String),

    #[error("chrono boost needs a target and a production in '{0}'")]
    IncompleteChronoBoost(String),
}

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one token into the items it expands to
pub fn parse_token(token: &str) -> Result<Vec<BuildItem>, TokenError> {
    let mut parts = token.split_whitespace();
    let Some(first) = parts.next() else {
        return Err(TokenError::Empty);
    };

    let (count, name) = if first.chars().all(|c| c.is_ascii_digit()) {
        // Digits only, so a parse failure is an overflow
        let count: u32 = first
            .parse()
            .map_err(|_| TokenError::CountTooLarge(token.to_string()))?;
        let name = parts
            .next()
            .ok_or_else(|| TokenError::BadName(token.to_string()))?;
        (count, name)
    } else {
        (1, first)
    };

    if count == 0 {
        return Err(TokenError::ZeroCount(token.to_string()));
    }
    if count > MAX_ITEM_COUNT {
        return Err(TokenError::CountTooLarge(token.to_string()));
    }
    if parts.next().is_some() {
        return Err(TokenError::BadName(token.to_string()));
    }

    if let Some(rest) = name.strip_prefix(CHRONO_BOOST_PREFIX) {
        // Boosts are one-shot; a count is ignored
        let Some(rest) = rest.strip_prefix('_') else {
            return Err(TokenError::IncompleteChronoBoost(token.to_string()));
        };
        let mut fields = rest.splitn(2, '_');
        let target = fields.next().unwrap_or_default();
        let production = fields.next().unwrap_or_default();
        if !valid_name(target) || !valid_name(production) {
            return Err(TokenError::IncompleteChronoBoost(token.to_string()));
        }
        return Ok(vec![BuildItem::ChronoBoost {
            target: target.to_string(),
            production: production.to_string(),
        }]);
    }

    if !valid_name(name) {
        return Err(TokenError::BadName(name.to_string()));
    }
    Ok((0..count).map(|_| BuildItem::Make(name.to_string())).collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOrder {
    items: Vec<BuildItem>,
}

impl BuildOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw config values, skipping malformed tokens with a warning
    pub fn from_tokens(strategy: &str, tokens: &[toml::Value]) -> Self {
        let mut order = Self::new();
        for value in tokens {
            let parsed = match value.as_str() {
                Some(token) => parse_token(token),
                None => Err(TokenError::NotAString(value.to_string())),
            };
            match parsed {
                Ok(items) => order.items.extend(items),
                Err(e) => tracing::warn!("Strategy '{}': skipping build item: {}", strategy, e),
            }
        }
        order
    }

    pub fn add(&mut self, item: BuildItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[BuildItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
