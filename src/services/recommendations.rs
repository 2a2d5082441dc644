use crate::{
    error::{AppError, AppResult},
    models::{RecommendationRecord, RecommendationResponse, Title, VisualKey, AI_ID_PREFIX},
    services::providers::RecommendationBackend,
};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Message shown when AI search fails for any reason other than missing setup
pub const SEARCH_FAILED_MESSAGE: &str = "Falha ao obter recomendações. Tente novamente.";

/// Range of the synthetic match score given to AI titles
pub const MATCH_SCORE_RANGE: RangeInclusive<u8> = 90..=98;

/// Terminal result of one AI search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was sent
    Rejected,
    /// The backend answered (possibly with zero titles)
    Completed(Vec<Title>),
    /// The backend failed; carries a user-facing message
    Failed(String),
}

/// Turns free-text queries into catalogue-shaped titles via an AI backend
///
/// Errors never cross this boundary: every call ends in a [`SearchOutcome`].
#[derive(Clone)]
pub struct RecommendationAdapter {
    backend: Arc<dyn RecommendationBackend>,
}

impl RecommendationAdapter {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn recommend(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Rejected;
        }

        let response = match self.backend.recommend(query).await {
            Ok(response) => response,
            Err(AppError::MissingCredential) => {
                tracing::warn!(
                    provider = self.backend.name(),
                    "No API key found, returning empty recommendations"
                );
                return SearchOutcome::Completed(Vec::new());
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    query = %query,
                    provider = self.backend.name(),
                    "Recommendation request failed"
                );
                return SearchOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string());
            }
        };

        if let Err(e) = validate_response(&response) {
            tracing::error!(error = %e, query = %query, "Discarding invalid recommendations");
            return SearchOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string());
        }

        let titles = map_recommendations(response);

        tracing::info!(
            query = %query,
            results = titles.len(),
            provider = self.backend.name(),
            "AI search completed"
        );

        SearchOutcome::Completed(titles)
    }
}

/// Rejects responses carrying records with no usable title
///
/// A single bad record fails the whole response rather than yielding a
/// partial list.
pub fn validate_response(response: &RecommendationResponse) -> AppResult<()> {
    match response
        .recommendations
        .iter()
        .position(|record| record.title.trim().is_empty())
    {
        Some(index) => Err(AppError::ExternalApi(format!(
            "Recommendation {} has an empty title",
            index
        ))),
        None => Ok(()),
    }
}

pub fn map_recommendations(response: RecommendationResponse) -> Vec<Title> {
    response
        .recommendations
        .into_iter()
        .enumerate()
        .map(|(index, record)| map_record(index, record))
        .collect()
}

/// Builds the title for the record at `index` of a response
pub fn map_record(index: usize, record: RecommendationRecord) -> Title {
    let image_id = VisualKey::image_id_for(&record.visual_key);

    Title {
        id: format!("{}{}", AI_ID_PREFIX, index),
        title: record.title,
        description: record.description,
        image: format!("https://picsum.photos/id/{}/500/281", image_id),
        backdrop: Some(format!("https://picsum.photos/id/{}/1200/675", image_id)),
        category: Some(record.genre),
        match_score: Some(pseudo_match_score()),
        year: None,
        duration: None,
        kind: None,
        is_original: false,
        video_id: None,
    }
}

/// Uniform pick from [`MATCH_SCORE_RANGE`] using v4 UUID entropy
///
/// `uuid` is already a dependency and v4 ids are 122 random bits from the OS
/// generator, which is plenty for a cosmetic score without pulling in `rand`.
fn pseudo_match_score() -> u8 {
    let span = MATCH_SCORE_RANGE.end() - MATCH_SCORE_RANGE.start() + 1;
    let entropy = uuid::Uuid::new_v4().as_u128();
    MATCH_SCORE_RANGE.start() + (entropy % u128::from(span)) as u8
}
