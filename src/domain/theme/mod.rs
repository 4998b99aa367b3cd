//! Theme domain — display metadata for every supported chain and token.
//!
//! The catalog is configuration supplied by the host application. Its key set
//! is the only source of selectable assets, chains and accepted tokens, so a
//! lookup for any option shown to the user always succeeds.

use crate::error::SdkError;
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Background used for an unselected token chip.
pub const UNSELECTED_BACKGROUND: &str = "#f0f0f0";
/// Text color used for an unselected token chip.
pub const UNSELECTED_TEXT_COLOR: &str = "#666";

// ─── ChainTheme ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTheme {
    pub label: String,
    /// CSS background value, usually a gradient.
    pub background: String,
    pub text_color: String,
}

impl ChainTheme {
    pub fn new(label: &str, background: &str, text_color: &str) -> Self {
        Self {
            label: label.to_string(),
            background: background.to_string(),
            text_color: text_color.to_string(),
        }
    }
}

/// Resolved colors for one token chip in the accepted-token selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipStyle<'a> {
    pub label: &'a str,
    pub background: &'a str,
    pub text_color: &'a str,
}

/// One selectable option: identifier plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetOption<'a> {
    pub id: &'a AssetId,
    pub label: &'a str,
}

/// JSON form of a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEntry {
    pub id: AssetId,
    #[serde(flatten)]
    pub theme: ChainTheme,
}

// ─── ThemeCatalog ────────────────────────────────────────────────────────────

/// Ordered mapping from chain/token identifier to its [`ChainTheme`].
///
/// Iteration follows insertion order, which is also the order options are
/// presented in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    entries: Vec<(AssetId, ChainTheme)>,
}

impl ThemeCatalog {
    /// Build a catalog, rejecting empty input and duplicate identifiers.
    pub fn new(entries: Vec<(AssetId, ChainTheme)>) -> Result<Self, SdkError> {
        if entries.is_empty() {
            return Err(SdkError::Validation(
                "Theme catalog must contain at least one entry".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (id, _) in &entries {
            if !seen.insert(id) {
                return Err(SdkError::Validation(format!(
                    "Duplicate theme catalog entry: {}",
                    id
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Load a catalog from a JSON array of `{id, label, background, textColor}`.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let entries: Vec<ThemeEntry> = serde_json::from_str(json)?;
        Self::new(entries.into_iter().map(|e| (e.id, e.theme)).collect())
    }

    /// The chains and tokens supported by the Liquid Nation app.
    pub fn liquid_nation() -> Self {
        let entry = |id: &str, background: &str, text_color: &str| {
            (AssetId::from(id), ChainTheme::new(id, background, text_color))
        };
        Self {
            entries: vec![
                entry("BASE", "linear-gradient(135deg, #1dd3d7, #0b6c8e)", "#f6fbff"),
                entry("BTC", "linear-gradient(135deg, #f59a2e, #c86a12)", "#3b2000"),
                entry("ARB", "linear-gradient(135deg, #0b6c8e, #0b4f72)", "#e4f6ff"),
                entry("CELO", "linear-gradient(135deg, #1dd3d7, #0f92b4)", "#083142"),
                entry("SOL", "linear-gradient(135deg, #0b4f72, #0f92b4)", "#e2f4ff"),
                entry("MATIC", "linear-gradient(135deg, #0f92b4, #1dd3d7)", "#083142"),
                entry("ETH", "linear-gradient(135deg, #e9f6ff, #c9e9f7)", "#0b3c54"),
            ],
        }
    }

    pub fn get(&self, id: &AssetId) -> Option<&ChainTheme> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, theme)| theme)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.get(id).is_some()
    }

    /// Identifiers in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Selectable options in catalog order.
    pub fn options(&self) -> Vec<AssetOption<'_>> {
        self.entries
            .iter()
            .map(|(id, theme)| AssetOption {
                id,
                label: &theme.label,
            })
            .collect()
    }

    /// Chip colors for an accepted-token toggle.
    ///
    /// Selected chips use the token's own theme; unselected chips are neutral.
    pub fn chip_style(&self, id: &AssetId, selected: bool) -> Option<ChipStyle<'_>> {
        let theme = self.get(id)?;
        Some(if selected {
            ChipStyle {
                label: &theme.label,
                background: &theme.background,
                text_color: &theme.text_color,
            }
        } else {
            ChipStyle {
                label: &theme.label,
                background: UNSELECTED_BACKGROUND,
                text_color: UNSELECTED_TEXT_COLOR,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::liquid_nation()
    }
}
