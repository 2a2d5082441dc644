use serde::{Deserialize, Serialize};

/// Id prefix reserved for titles produced by AI search
pub const AI_ID_PREFIX: &str = "ai-";

/// Year shown when a title carries none
pub const DEFAULT_YEAR: i32 = 2024;

/// Duration shown when a title carries none
pub const DEFAULT_DURATION: &str = "2h 10m";

/// Video played when a title has no video reference
pub const FALLBACK_VIDEO_ID: &str = "LXb3EKWsInQ";

/// A movie or series, either from the catalogue or from AI search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Thumbnail image URL
    pub image: String,
    /// Large hero image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Only set on AI-originated titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TitleKind>,
    #[serde(default)]
    pub is_original: bool,
    /// YouTube id used by the player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Series,
}

impl TitleKind {
    pub fn label(self) -> &'static str {
        match self {
            TitleKind::Movie => "Filme",
            TitleKind::Series => "Série",
        }
    }
}

impl Title {
    /// Whether this title came from AI search rather than the catalogue
    pub fn is_ai_generated(&self) -> bool {
        self.id.starts_with(AI_ID_PREFIX)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Video reference to hand to the player
    pub fn playable_video_id(&self) -> &str {
        self.video_id.as_deref().unwrap_or(FALLBACK_VIDEO_ID)
    }
}

/// A title with every optional field resolved for rendering
///
/// Catalogue and AI titles both go through this projection so the
/// presentation layer never applies its own fallbacks.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTitle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub backdrop: String,
    pub category: String,
    pub match_score: Option<u8>,
    pub year: i32,
    pub duration: String,
    pub kind_label: Option<&'static str>,
    pub is_original: bool,
    pub video_id: String,
    pub in_watchlist: bool,
}

impl DisplayTitle {
    pub fn project(title: &Title, in_watchlist: bool) -> Self {
        Self {
            id: title.id.clone(),
            title: title.title.clone(),
            description: title.description.clone(),
            image: title.image.clone(),
            backdrop: title.backdrop.clone().unwrap_or_else(|| title.image.clone()),
            category: title.category.clone().unwrap_or_default(),
            match_score: title.match_score,
            year: title.year.unwrap_or(DEFAULT_YEAR),
            duration: title
                .duration
                .clone()
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            kind_label: title.kind.map(TitleKind::label),
            is_original: title.is_original,
            video_id: title.playable_video_id().to_string(),
            in_watchlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_title() -> Title {
        Title {
            id: "9".to_string(),
            title: "Sem Detalhes".to_string(),
            description: "Um título sem campos opcionais.".to_string(),
            image: "https://picsum.photos/id/1/800/450".to_string(),
            backdrop: None,
            category: None,
            match_score: None,
            year: None,
            duration: None,
            kind: None,
            is_original: false,
            video_id: None,
        }
    }

    #[test]
    fn test_projection_resolves_defaults() {
        let display = DisplayTitle::project(&bare_title(), false);
        assert_eq!(display.backdrop, "https://picsum.photos/id/1/800/450");
        assert_eq!(display.year, DEFAULT_YEAR);
        assert_eq!(display.duration, DEFAULT_DURATION);
        assert_eq!(display.video_id, FALLBACK_VIDEO_ID);
        assert_eq!(display.category, "");
        assert_eq!(display.kind_label, None);
    }

    #[test]
    fn test_projection_keeps_present_fields() {
        let mut title = bare_title();
        title.backdrop = Some("https://picsum.photos/id/1/1600/900".to_string());
        title.year = Some(2021);
        title.duration = Some("50m".to_string());
        title.kind = Some(TitleKind::Series);
        title.video_id = Some("abc".to_string());

        let display = DisplayTitle::project(&title, true);
        assert_eq!(display.backdrop, "https://picsum.photos/id/1/1600/900");
        assert_eq!(display.year, 2021);
        assert_eq!(display.duration, "50m");
        assert_eq!(display.kind_label, Some("Série"));
        assert_eq!(display.video_id, "abc");
        assert!(display.in_watchlist);
    }

    #[test]
    fn test_title_deserializes_catalogue_json() {
        let json = r#"{
            "id": "2",
            "title": "Azul Profundo",
            "description": "Explore as profundezas do oceano.",
            "image": "https://picsum.photos/id/1015/800/450",
            "category": "Natureza",
            "year": 2022,
            "type": "series",
            "isOriginal": true,
            "videoId": "JkaxUblCGz0"
        }"#;

        let title: Title = serde_json::from_str(json).unwrap();
        assert_eq!(title.kind, Some(TitleKind::Series));
        assert!(title.is_original);
        assert!(title.has_category("Natureza"));
        assert!(!title.has_category("natureza"));
        assert_eq!(title.video_id.as_deref(), Some("JkaxUblCGz0"));
    }

    #[test]
    fn test_ai_prefix_detection() {
        let mut title = bare_title();
        assert!(!title.is_ai_generated());
        title.id = "ai-0".to_string();
        assert!(title.is_ai_generated());
    }
}
