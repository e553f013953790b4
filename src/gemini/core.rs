use std::time::Duration;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};

// Generation settings sent with every request. These are the tuning
// the assistant ships with and are not user configurable.
const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Builds the request body for a single combined prompt: one
    /// content block holding one text part.
    pub fn new(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

// Every field is optional because the API omits whole sections of the
// response depending on safety filtering and finish reason.
#[derive(Deserialize, Debug)]
pub struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// The first text part of the first candidate, if the response
    /// contains any usable text.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
    }
}

/// Sends one generation request and parses the response. A
/// non-success status or an unparseable body is an error; extracting
/// text from a parsed response is the caller's concern.
pub async fn generate_content(
    api_hostname: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<GenerateContentResponse, Error> {
    let payload = GenerateContentRequest::new(prompt);
    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        api_hostname.trim_end_matches("/"),
        model,
        api_key
    );
    let response = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest::new("Why did Rome fall?");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "parts": [{
                        "text": "Why did Rome fall?"
                    }]
                }],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 1024
                }
            })
        );
    }

    #[test]
    fn test_first_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Rome fell in 476 CE."},
                        {"text": "It was complicated."}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), Some("Rome fell in 476 CE."));
    }

    #[test]
    fn test_first_text_missing_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_first_text_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_first_text_part_without_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": ""}}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[tokio::test]
    async fn test_generate_content_basic() {
        let mut server = mockito::Server::new_async().await;

        let response_body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "Hello!"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;

        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-1.5-flash-latest:generateContent",
            )
            .match_query(mockito::Matcher::UrlEncoded(
                "key".into(),
                "test-key".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body)
            .create();

        let result = generate_content(
            server.url().as_str(),
            "test-key",
            "gemini-1.5-flash-latest",
            "Hi",
        )
        .await;

        mock.assert();
        assert!(result.is_ok());
        assert_eq!(result.unwrap().first_text(), Some("Hello!"));
    }

    #[tokio::test]
    async fn test_generate_content_non_success_status() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-1.5-flash-latest:generateContent",
            )
            .match_query(mockito::Matcher::UrlEncoded(
                "key".into(),
                "bad-key".into(),
            ))
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 403, "status": "PERMISSION_DENIED"}}"#)
            .create();

        let result = generate_content(
            server.url().as_str(),
            "bad-key",
            "gemini-1.5-flash-latest",
            "Hi",
        )
        .await;

        mock.assert();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generate_content_malformed_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock(
                "POST",
                "/v1beta/models/gemini-1.5-flash-latest:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create();

        let result = generate_content(
            server.url().as_str(),
            "test-key",
            "gemini-1.5-flash-latest",
            "Hi",
        )
        .await;

        mock.assert();
        assert!(result.is_err());
    }
}
