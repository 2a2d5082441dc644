/// Gemini recommendation provider
///
/// Calls the `generateContent` REST endpoint with a fixed system instruction
/// and a response schema, so the model answers with a JSON object holding a
/// `recommendations` array.
///
/// API Flow:
/// 1. POST /v1beta/models/{model}:generateContent → candidates[0].content.parts[*].text
/// 2. The text is itself the JSON document constrained by the schema
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        GeminiContent, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        RecommendationResponse, VisualKey,
    },
    services::providers::RecommendationBackend,
};
use reqwest::Client as HttpClient;
use serde_json::json;

/// Number of titles the model is asked for
pub const RECOMMENDATION_COUNT: usize = 6;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, api_url: String, model: String) -> Self {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.credential().map(str::to_string),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url, self.model
        )
    }
}

/// Fixed instruction: domain, answer language and output contract
pub fn system_instruction() -> String {
    let vocabulary = VisualKey::ALL
        .iter()
        .map(|key| format!("'{}'", key))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Você é um motor de recomendação de filmes para o serviço de streaming \"P+\".\n\
         Gere {} recomendações de filmes ou séries (reais ou fictícias) que se encaixem no pedido do usuário.\n\
         Responda APENAS em Português do Brasil.\n\
         Para 'visualKey', escolha EXATAMENTE uma dessas palavras (em inglês) que melhor descreva o estilo visual: {}.",
        RECOMMENDATION_COUNT, vocabulary
    )
}

/// JSON schema the response must satisfy
pub fn response_schema() -> serde_json::Value {
    let vocabulary: Vec<&str> = VisualKey::ALL.iter().map(|key| key.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "genre": { "type": "STRING" },
                        "visualKey": { "type": "STRING", "format": "enum", "enum": vocabulary }
                    },
                    "required": ["title", "description", "genre", "visualKey"]
                }
            }
        },
        "required": ["recommendations"]
    })
}

pub fn build_request(query: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: GeminiContent::text(None, system_instruction()),
        contents: vec![GeminiContent::text(
            Some("user"),
            format!("O usuário perguntou: \"{}\".", query),
        )],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Parses the schema-constrained text out of a `generateContent` body
pub fn parse_response(body: &str) -> AppResult<RecommendationResponse> {
    let envelope: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        AppError::ExternalApi(format!("Failed to parse Gemini response: {}", e))
    })?;

    let text = envelope
        .text()
        .ok_or_else(|| AppError::ExternalApi("Gemini returned an empty response".to_string()))?;

    serde_json::from_str::<RecommendationResponse>(&text).map_err(|e| {
        tracing::error!(error = %e, payload = %text, "Gemini payload violates schema");
        AppError::ExternalApi(format!("Gemini payload violates schema: {}", e))
    })
}

#[async_trait::async_trait]
impl RecommendationBackend for GeminiProvider {
    async fn recommend(&self, query: &str) -> AppResult<RecommendationResponse> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(AppError::MissingCredential);
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&build_request(query))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        tracing::debug!(response = %body, "Raw Gemini API response");

        let recommendations = parse_response(&body)?;

        tracing::info!(
            query = %query,
            results = recommendations.recommendations.len(),
            provider = "gemini",
            model = %self.model,
            "Recommendations received"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn envelope(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    fn horror_payload(count: usize) -> String {
        let records: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("Noite {}", i),
                    "description": "Algo espreita no escuro.",
                    "genre": "Terror",
                    "visualKey": "horror"
                })
            })
            .collect();
        json!({ "recommendations": records }).to_string()
    }

    fn provider_for(server: &MockServer, api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(
            api_key.map(str::to_string),
            server.uri(),
            "gemini-2.5-flash".to_string(),
        )
    }

    #[test]
    fn test_request_shape() {
        let request = serde_json::to_value(build_request("filme de terror")).unwrap();
        assert_eq!(
            request["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(request["contents"][0]["role"], "user");
        assert!(request["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("filme de terror"));
        assert!(request["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Português do Brasil"));
        assert!(request["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_schema_constrains_visual_key() {
        let schema = response_schema();
        let item = &schema["properties"]["recommendations"]["items"];
        assert_eq!(item["required"].as_array().unwrap().len(), 4);
        assert_eq!(
            item["properties"]["visualKey"]["enum"],
            json!(["nature", "city", "space", "fantasy", "action", "romance", "horror", "cartoon"])
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let provider = GeminiProvider::new(
            Some("  ".to_string()),
            "http://test.local/".to_string(),
            "m".to_string(),
        );
        assert!(!provider.has_credential());
        assert_eq!(
            provider.endpoint(),
            "http://test.local/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_parse_response_rejects_bad_payloads() {
        let not_json = envelope("isto não é json").to_string();
        assert!(matches!(
            parse_response(&not_json),
            Err(AppError::ExternalApi(_))
        ));

        let wrong_shape = envelope(r#"{"recommendations": [{"title": "Só título"}]}"#).to_string();
        assert!(parse_response(&wrong_shape).is_err());

        let no_candidates = json!({ "candidates": [] }).to_string();
        assert!(parse_response(&no_candidates).is_err());

        assert!(parse_response("").is_err());
    }

    #[tokio::test]
    async fn test_recommend_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&horror_payload(6))))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("test-key"));
        let response = provider.recommend("filme de terror").await.unwrap();

        assert_eq!(response.recommendations.len(), 6);
        assert!(response
            .recommendations
            .iter()
            .all(|r| r.visual_key == "horror" && r.genre == "Terror"));
    }

    #[tokio::test]
    async fn test_recommend_without_key_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server, None);
        let result = provider.recommend("qualquer coisa").await;

        assert!(matches!(result, Err(AppError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_recommend_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("test-key"));
        let result = provider.recommend("comédia").await;

        match result {
            Err(AppError::ExternalApi(msg)) => assert!(msg.contains("503")),
            other => panic!("expected ExternalApi error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommend_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope("")))
            .mount(&server)
            .await;

        let provider = provider_for(&server, Some("test-key"));
        assert!(provider.recommend("documentário").await.is_err());
    }
}
