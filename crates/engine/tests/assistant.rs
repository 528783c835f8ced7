use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use serde_json::json;

use engine::{
    Assistant, AssistantError, Category, ImagePayload, MemoryBlobStore, Price, PurchaseStatus,
    RecordDraft, RecordPatch, RecordStore, RecordSummary, SmartInput, request_advice, smart_parse,
};

/// Canned assistant recording what it was asked.
#[derive(Default)]
struct FakeAssistant {
    reply: Option<serde_json::Value>,
    advice: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeAssistant {
    fn replying(reply: serde_json::Value) -> Self {
        Self {
            reply: Some(reply),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<RecordPatch, AssistantError> {
        let value = self.reply.clone().ok_or(AssistantError::EmptyResponse)?;
        RecordPatch::from_value(value).map_err(|err| AssistantError::Malformed(err.to_string()))
    }
}

impl Assistant for FakeAssistant {
    async fn parse_text(&self, text: &str) -> Result<RecordPatch, AssistantError> {
        self.calls.lock().unwrap().push(format!("text:{text}"));
        self.answer()
    }

    async fn parse_image(
        &self,
        image: &ImagePayload,
        context: &str,
    ) -> Result<RecordPatch, AssistantError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("image:{}:{context}", image.media_type));
        self.answer()
    }

    async fn summarize(&self, records: &[RecordSummary]) -> Result<String, AssistantError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("summarize:{}", records.len()));
        self.advice.clone().ok_or(AssistantError::Unavailable("offline".to_string()))
    }
}

fn text_input(text: &str) -> SmartInput {
    SmartInput {
        text: text.to_string(),
        image: None,
    }
}

#[tokio::test]
async fn text_parse_fills_a_draft_that_can_be_saved() {
    let assistant = FakeAssistant::replying(json!({
        "name": "MacBook Pro",
        "actualPrice": 12999,
        "listPrice": 14999,
        "category": "数码/电器",
        "status": "bought",
        "purchaseDate": "2025-05-01",
    }));

    let patch = smart_parse(&assistant, &text_input("MacBook Pro, 12999元, 原价14999"))
        .await
        .unwrap();
    assert_eq!(assistant.calls(), vec!["text:MacBook Pro, 12999元, 原价14999"]);

    let draft = RecordDraft::from_patch(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(), patch);
    assert_eq!(draft.category, Category::Electronics);
    assert_eq!(draft.discount_rate, 13.3);

    let mut store = RecordStore::new(MemoryBlobStore::new());
    let records = store.create(draft, Utc::now()).unwrap();
    assert_eq!(records[0].name, "MacBook Pro");
    assert_eq!(records[0].status, PurchaseStatus::Bought);
    assert_eq!(records[0].actual_price, Price::new(1_299_900));
}

#[tokio::test]
async fn image_takes_precedence_and_text_becomes_context() {
    let assistant = FakeAssistant::replying(json!({"name": "Receipt item", "actualPrice": 42}));
    let input = SmartInput {
        text: "  bought yesterday ".to_string(),
        image: Some(ImagePayload::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png").unwrap()),
    };

    smart_parse(&assistant, &input).await.unwrap();
    assert_eq!(assistant.calls(), vec!["image:image/png:bought yesterday"]);
}

#[tokio::test]
async fn empty_input_sends_nothing() {
    let assistant = FakeAssistant::default();
    let err = smart_parse(&assistant, &text_input("   ")).await.unwrap_err();
    assert_eq!(err, AssistantError::EmptyInput);
    assert!(assistant.calls().is_empty());
}

#[tokio::test]
async fn response_without_price_is_unrecognized() {
    let assistant = FakeAssistant::replying(json!({"name": "Something"}));
    let err = smart_parse(&assistant, &text_input("hmm")).await.unwrap_err();
    assert_eq!(err, AssistantError::Unrecognized);
}

#[tokio::test]
async fn assistant_failure_is_passed_through() {
    let assistant = FakeAssistant::default();
    let err = smart_parse(&assistant, &text_input("tea 30")).await.unwrap_err();
    assert_eq!(err, AssistantError::EmptyResponse);
}

#[tokio::test]
async fn advice_is_not_requested_for_empty_collection() {
    let assistant = FakeAssistant::default();
    let err = request_advice(&assistant, &[]).await.unwrap_err();
    assert_eq!(err, AssistantError::NothingToSummarize);
    assert!(assistant.calls().is_empty());
}

#[tokio::test]
async fn advice_summarizes_every_record() {
    let assistant = FakeAssistant {
        advice: Some("  Spend less on gadgets.\n".to_string()),
        ..FakeAssistant::default()
    };
    let mut store = RecordStore::new(MemoryBlobStore::new());
    let today = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
    for (name, cents) in [("Tea", 3_000), ("Phone", 399_900)] {
        let mut draft = RecordDraft::new(today);
        draft.name = name.to_string();
        draft.actual_price = Some(Price::new(cents));
        store.create(draft, Utc::now()).unwrap();
    }

    let advice = request_advice(&assistant, &store.list_all()).await.unwrap();
    assert_eq!(advice, "Spend less on gadgets.");
    assert_eq!(assistant.calls(), vec!["summarize:2"]);
}

#[tokio::test]
async fn advice_failure_is_recoverable() {
    let assistant = FakeAssistant::default();
    let mut store = RecordStore::new(MemoryBlobStore::new());
    let mut draft = RecordDraft::new(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
    draft.name = "Tea".to_string();
    draft.actual_price = Some(Price::new(100));
    store.create(draft, Utc::now()).unwrap();

    let err = request_advice(&assistant, &store.list_all()).await.unwrap_err();
    assert!(matches!(err, AssistantError::Unavailable(_)));
    assert_eq!(store.list_all().len(), 1);
}
