//! Capability interface of the generative-AI collaborator.
//!
//! The engine never talks to the network: it only knows the [`Assistant`]
//! trait. Front ends plug in a real client, tests plug in fakes.

use std::{future::Future, path::Path};

use serde::Serialize;

use crate::{AssistantError, PurchaseStatus, RecordPatch, ShoppingRecord};

/// Largest image accepted for parsing.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// An image to extract a record from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: Vec<u8>,
    /// Media type such as `image/png`.
    pub media_type: String,
}

impl ImagePayload {
    /// Checks the media type and size limit.
    pub fn new(data: Vec<u8>, media_type: &str) -> Result<Self, AssistantError> {
        if !media_type.starts_with("image/") {
            return Err(AssistantError::InvalidImage(format!(
                "not an image: {media_type}"
            )));
        }
        if data.is_empty() {
            return Err(AssistantError::InvalidImage("empty file".to_string()));
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(AssistantError::InvalidImage("image too large".to_string()));
        }
        Ok(Self {
            data,
            media_type: media_type.to_string(),
        })
    }

    /// Reads an image file, inferring the media type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, AssistantError> {
        let media_type = media_type_for(path).ok_or_else(|| {
            AssistantError::InvalidImage(format!("unsupported file: {}", path.display()))
        })?;
        let data = std::fs::read(path)
            .map_err(|err| AssistantError::InvalidImage(format!("{}: {err}", path.display())))?;
        Self::new(data, media_type)
    }
}

fn media_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Compact per-record line sent with an advice request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordSummary {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "c")]
    pub category: String,
    #[serde(rename = "s")]
    pub status: PurchaseStatus,
}

impl From<&ShoppingRecord> for RecordSummary {
    fn from(record: &ShoppingRecord) -> Self {
        Self {
            name: record.name.clone(),
            price: record.actual_price.major(),
            category: record.category.label().to_string(),
            status: record.status,
        }
    }
}

/// The generative-AI collaborator.
///
/// Each call is single shot: implementations must not retry, and every
/// failure is reported as a recoverable [`AssistantError`].
pub trait Assistant {
    /// Extracts a partial record from free text.
    fn parse_text(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<RecordPatch, AssistantError>> + Send;

    /// Extracts a partial record from an image, with optional text context.
    fn parse_image(
        &self,
        image: &ImagePayload,
        context: &str,
    ) -> impl Future<Output = Result<RecordPatch, AssistantError>> + Send;

    /// Returns a short natural-language spending summary.
    fn summarize(
        &self,
        records: &[RecordSummary],
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// What the user handed to smart add.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmartInput {
    pub text: String,
    pub image: Option<ImagePayload>,
}

impl SmartInput {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }
}

/// Runs one smart-add parse.
///
/// An image wins over text (text becomes its context). A result that does
/// not name the item and its price counts as [`AssistantError::Unrecognized`].
pub async fn smart_parse<A: Assistant>(
    assistant: &A,
    input: &SmartInput,
) -> Result<RecordPatch, AssistantError> {
    if input.is_empty() {
        return Err(AssistantError::EmptyInput);
    }
    let text = input.text.trim();
    let patch = match &input.image {
        Some(image) => assistant.parse_image(image, text).await?,
        None => assistant.parse_text(text).await?,
    };
    if !patch.is_recognized() {
        tracing::info!("assistant response lacks name or price");
        return Err(AssistantError::Unrecognized);
    }
    Ok(patch)
}

/// Asks for spending advice over the whole collection.
///
/// No request is sent for an empty collection.
pub async fn request_advice<A: Assistant>(
    assistant: &A,
    records: &[ShoppingRecord],
) -> Result<String, AssistantError> {
    if records.is_empty() {
        return Err(AssistantError::NothingToSummarize);
    }
    let summary: Vec<RecordSummary> = records.iter().map(RecordSummary::from).collect();
    let advice = assistant.summarize(&summary).await?;
    let advice = advice.trim();
    if advice.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    Ok(advice.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_payload_checks_type_and_size() {
        assert!(ImagePayload::new(vec![1, 2, 3], "image/png").is_ok());
        assert!(matches!(
            ImagePayload::new(vec![1], "application/pdf"),
            Err(AssistantError::InvalidImage(_))
        ));
        assert!(matches!(
            ImagePayload::new(vec![0; MAX_IMAGE_BYTES + 1], "image/jpeg"),
            Err(AssistantError::InvalidImage(_))
        ));
    }

    #[test]
    fn media_type_follows_extension() {
        assert_eq!(media_type_for(Path::new("a/receipt.JPG")), Some("image/jpeg"));
        assert_eq!(media_type_for(Path::new("cart.png")), Some("image/png"));
        assert_eq!(media_type_for(Path::new("notes.txt")), None);
        assert_eq!(media_type_for(Path::new("noext")), None);
    }

    #[test]
    fn summary_uses_compact_keys() {
        let summary = RecordSummary {
            name: "Tea".to_string(),
            price: 35.5,
            category: "食品/饮料".to_string(),
            status: PurchaseStatus::Bought,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"n":"Tea","p":35.5,"c":"食品/饮料","s":"bought"}"#);
    }
}
