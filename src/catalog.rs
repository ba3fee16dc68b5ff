//! Art styles and the prompt text sent to the image model for each of them.
//!
//! The catalog is built once at startup and only read afterwards. Every
//! [`Style`] must have an entry; [`PromptCatalog::validate`] enforces that.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CatalogError;

/// One of the supported art aesthetics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Warli,
    Pattachitra,
    Bapu,
}

impl Style {
    /// All styles in enumeration order. Auto-tour walks this list.
    pub const ALL: [Style; 3] = [Style::Warli, Style::Pattachitra, Style::Bapu];

    pub fn display_name(self) -> &'static str {
        match self {
            Style::Warli => "Warli Art",
            Style::Pattachitra => "Odisha Pattachitra",
            Style::Bapu => "Bapu Art Style",
        }
    }

    /// Short lowercase key used in config files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Style::Warli => "warli",
            Style::Pattachitra => "pattachitra",
            Style::Bapu => "bapu",
        }
    }

    pub fn index(self) -> usize {
        Style::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// The next style in enumeration order, wrapping from last to first.
    pub fn next(self) -> Style {
        Style::ALL[(self.index() + 1) % Style::ALL.len()]
    }

    /// Placeholder text shown while an image for this style is being made.
    pub fn loading_message(self) -> &'static str {
        match self {
            Style::Warli => "Sketching tribal rhythms...",
            Style::Pattachitra => "Painting divine narratives...",
            Style::Bapu => "Drawing soulful expressions...",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Style {
    type Err = CatalogError;

    /// Accepts the short key, the display name (case-insensitive) or a
    /// 1-based position in [`Style::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if let Ok(n) = needle.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Style::ALL.get(i).copied())
                .ok_or_else(|| CatalogError::UnknownStyle(needle.to_string()));
        }

        Style::ALL
            .iter()
            .copied()
            .find(|style| {
                style.key().eq_ignore_ascii_case(needle)
                    || style.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CatalogError::UnknownStyle(needle.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub style: Style,
    /// Short text shown on the style tile.
    pub description: String,
    /// Full instruction text sent to the image model.
    pub prompt: String,
}

/// Partial replacement for a built-in entry, read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PromptCatalog {
    entries: HashMap<Style, PromptEntry>,
}

impl PromptCatalog {
    /// Build a catalog from arbitrary entries. A later entry for the same
    /// style replaces an earlier one. Completeness is not checked here.
    pub fn new(entries: impl IntoIterator<Item = PromptEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.style, e)).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new([
            PromptEntry {
                style: Style::Warli,
                description: "Tribal stick-figure art with rhythmic symmetry from Maharashtra."
                    .to_string(),
                prompt: WARLI_PROMPT.to_string(),
            },
            PromptEntry {
                style: Style::Pattachitra,
                description: "Intricate cloth-based scroll painting tradition from Odisha."
                    .to_string(),
                prompt: PATTACHITRA_PROMPT.to_string(),
            },
            PromptEntry {
                style: Style::Bapu,
                description: "Minimalist, soulful linework style by the legendary Bapu."
                    .to_string(),
                prompt: BAPU_PROMPT.to_string(),
            },
        ])
    }

    pub fn get(&self, style: Style) -> Option<&PromptEntry> {
        self.entries.get(&style)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails on the first style (in enumeration order) without an entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match Style::ALL.iter().find(|s| !self.entries.contains_key(s)) {
            Some(missing) => Err(CatalogError::MissingPrompt(*missing)),
            None => Ok(()),
        }
    }

    /// Apply config overrides keyed by style name.
    pub fn with_overrides(
        mut self,
        overrides: &HashMap<String, PromptOverride>,
    ) -> Result<Self, CatalogError> {
        for (name, replacement) in overrides {
            let style: Style = name.parse()?;
            let entry = self
                .entries
                .get_mut(&style)
                .ok_or(CatalogError::MissingPrompt(style))?;
            if let Some(description) = &replacement.description {
                entry.description = description.clone();
            }
            if let Some(prompt) = &replacement.prompt {
                entry.prompt = prompt.clone();
            }
        }
        Ok(self)
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const WARLI_PROMPT: &str = "Create a Warli Art–inspired gallery scene in a clean, minimalist vibe-coding style.
Use monochrome lines, geometric shapes, and rhythmic symmetry.
Include traditional Warli elements: tribal stick-figure people, circular dance patterns, animals, huts, trees, ladders, and sun motifs.
Arrange multiple framed artworks on a gallery wall, each with a unique Warli art story—festivals, farming, hunting, dancing, daily village life.
Use white line illustrations on earthy brown and deep red backgrounds.
Maintain hand-painted texture and natural roughness.
Lighting should be warm and soft, like a curated museum exhibition.
Overall atmosphere: culturally rich, serene, elegant, and deeply traditional.";

const PATTACHITRA_PROMPT: &str = "Create a detailed Odisha Pattachitra–style artwork with intricate linework, bold outlines, and vibrant natural colors.
Feature traditional themes such as mythological stories of Jagannath, Balabhadra, Subhadra, Krishna Leela, Dashavatara, village life, or Odissi dance.
Use symmetrical composition, decorative floral borders, and finely patterned backgrounds.
Color palette: bright reds, yellows, indigo blues, black outlines, and earthy tones.
Include ornate motifs—lotus patterns, flowing vines, conch shells, wheels, and stylized animals.
Maintain the classic handcrafted look with fine brush strokes and natural texture.
Visual atmosphere should feel sacred, storytelling-oriented, culturally rich, and traditional to Odisha’s heritage.";

const BAPU_PROMPT: &str = "Create an illustration in the classic Bapu art style.
Use minimal, elegant linework with smooth, flowing curves.
Depict expressive Indian characters with gentle, graceful gestures.
Give the figures big, soulful eyes, soft smiles, and simple yet emotional facial expressions.
Use delicate outlines, light shading, and clean negative space.
Add traditional Indian cultural elements—sarees, turbans, rural scenes, mythological characters, or everyday life moments.
Color palette: soft pastels, warm earthy tones, or simple two-tone ink style.
Overall mood: calm, nostalgic, poetic, and full of warmth.";
