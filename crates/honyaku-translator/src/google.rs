use std::time::Duration;

use serde_json::Value;

use crate::{TranslateError, Translation, Translator};

/// Client for the free `translate_a/single` web endpoint. No API key; the
/// endpoint answers a JSON array of translated segments.
pub struct GoogleWebTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleWebTranslator {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl Translator for GoogleWebTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<Translation, TranslateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(TranslateError::RateLimited);
        }
        if !status.is_success() {
            return Err(TranslateError::Service(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Api(format!("unparseable response: {e}")))?;

        let translation = parse_translate_response(&body)?;
        tracing::debug!(
            "translated {} chars -> {} chars (detected: {:?})",
            text.len(),
            translation.text.len(),
            translation.detected_source
        );
        Ok(translation)
    }

    fn name(&self) -> &'static str {
        "google-web"
    }
}

/// The endpoint returns `[[["segment", "source", ...], ...], null, "ja", ...]`.
/// Segments are concatenated; index 2 carries the detected source language.
fn parse_translate_response(body: &Value) -> Result<Translation, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Api("no segments in response".to_string()))?;

    let mut text = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            text.push_str(piece);
        }
    }

    if text.is_empty() {
        return Err(TranslateError::Api("empty translation".to_string()));
    }

    let detected_source = body
        .get(2)
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    Ok(Translation {
        text,
        detected_source,
    })
}
