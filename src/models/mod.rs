use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod brand;
pub mod navigation;
pub mod title;
pub mod watchlist;

pub use brand::{builtin_brands, Brand};
pub use navigation::{CategoryFilter, NavigationMode, ALL_CATEGORIES, FILTER_CATEGORIES};
pub use title::{DisplayTitle, Title, TitleKind, AI_ID_PREFIX};
pub use watchlist::WatchlistSet;

// ============================================================================
// Recommendation Types
// ============================================================================

/// Closed vocabulary the AI picks from to describe a title's look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualKey {
    Nature,
    City,
    Space,
    Fantasy,
    Action,
    Romance,
    Horror,
    Cartoon,
}

/// Placeholder image used when the visual key is missing or unknown
pub const FALLBACK_IMAGE_ID: u32 = 10;

impl VisualKey {
    pub const ALL: [VisualKey; 8] = [
        VisualKey::Nature,
        VisualKey::City,
        VisualKey::Space,
        VisualKey::Fantasy,
        VisualKey::Action,
        VisualKey::Romance,
        VisualKey::Horror,
        VisualKey::Cartoon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VisualKey::Nature => "nature",
            VisualKey::City => "city",
            VisualKey::Space => "space",
            VisualKey::Fantasy => "fantasy",
            VisualKey::Action => "action",
            VisualKey::Romance => "romance",
            VisualKey::Horror => "horror",
            VisualKey::Cartoon => "cartoon",
        }
    }

    /// Exact, case-sensitive match against the vocabulary
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == token)
    }

    /// Placeholder image id for this key
    pub fn image_id(self) -> u32 {
        match self {
            VisualKey::Nature => 28,
            VisualKey::City => 44,
            VisualKey::Space => 54,
            VisualKey::Fantasy => 88,
            VisualKey::Action => 200,
            VisualKey::Romance => 320,
            VisualKey::Horror => 666,
            VisualKey::Cartoon => 111,
        }
    }

    /// Image id for a raw token, falling back for anything outside the vocabulary
    pub fn image_id_for(token: &str) -> u32 {
        Self::parse(token).map_or(FALLBACK_IMAGE_ID, Self::image_id)
    }
}

impl Display for VisualKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured payload the AI backend is constrained to return
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationRecord>,
}

/// One AI suggestion before it is mapped into a [`Title`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub title: String,
    pub description: String,
    pub genre: String,
    #[serde(rename = "visualKey")]
    pub visual_key: String,
}

// ============================================================================
// Gemini API Types
// ============================================================================

/// Body of `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: GeminiContent,
    pub contents: Vec<GeminiContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiContent {
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// Raw response from `generateContent`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
