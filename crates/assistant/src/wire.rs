//! `generateContent` request and response bodies.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use engine::{AssistantError, ImagePayload, RecordPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateRequest {
    /// Plain prompt, free-form answer.
    pub fn text(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
            generation_config: None,
        }
    }

    /// Prompt answered as JSON following `schema`.
    pub fn structured(prompt: String, schema: Value) -> Self {
        Self::text(prompt).with_schema(schema)
    }

    /// Image followed by its instructions, answered as JSON following `schema`.
    pub fn image(image: &ImagePayload, prompt: String, schema: Value) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: image.media_type.clone(),
                            data: STANDARD.encode(&image.data),
                        }),
                    },
                    Part::text(prompt),
                ],
            }],
            generation_config: None,
        }
        .with_schema(schema)
    }

    fn with_schema(mut self, schema: Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        });
        self
    }
}

impl Part {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Result<String, AssistantError> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(AssistantError::Unavailable(format!("prompt blocked: {reason}")));
        }

        let candidate = self.candidates.first().ok_or(AssistantError::EmptyResponse)?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            tracing::debug!(finish_reason = ?candidate.finish_reason, "candidate without text");
            return Err(AssistantError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Reads the structured answer into a patch.
///
/// Tolerates a markdown code fence around the JSON.
pub(crate) fn patch_from_text(text: &str) -> Result<RecordPatch, AssistantError> {
    let json = strip_fence(text);
    if json.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    let value: Value =
        serde_json::from_str(json).map_err(|err| AssistantError::Malformed(err.to_string()))?;
    RecordPatch::from_value(value).map_err(|err| AssistantError::Malformed(err.to_string()))
}

fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
