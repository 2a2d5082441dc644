//! Recommendation backend abstraction
//!
//! A backend turns one free-text query into a schema-checked
//! [`RecommendationResponse`]. The adapter in
//! [`crate::services::recommendations`] owns mapping and error containment;
//! backends only report what happened.

use crate::{error::AppResult, models::RecommendationResponse};

pub mod gemini;

pub use gemini::GeminiProvider;

/// Trait for generative recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Ask the backend for recommendations matching `query`
    ///
    /// Returns `AppError::MissingCredential` without doing any I/O when the
    /// backend is not configured.
    async fn recommend(&self, query: &str) -> AppResult<RecommendationResponse>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
