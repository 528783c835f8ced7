//! Shopping record store and derived statistics.
//!
//! The engine owns the data model ([`ShoppingRecord`] and its enums), the
//! [`RecordStore`] persisting the collection as one JSON blob, the pure
//! [`Statistics`] aggregation and the [`Assistant`] capability used for
//! AI-assisted entry. It performs no network I/O itself.

pub use assistant::{
    Assistant, ImagePayload, MAX_IMAGE_BYTES, RecordSummary, SmartInput, request_advice,
    smart_parse,
};
pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use category::Category;
pub use draft::{RecordDraft, RecordPatch};
pub use error::{AssistantError, EngineError};
pub use price::Price;
pub use record::{
    PurchaseStatus, ShoppingRecord, UnitCostType, UsageStatus, derive_discount,
    parse_purchase_date,
};
pub use statistics::{CategoryTotal, MonthBucket, MonthTotal, Statistics};
pub use store::{RecordStore, STORAGE_KEY, new_id};

mod assistant;
mod blob;
mod category;
mod draft;
mod error;
mod price;
mod record;
mod statistics;
mod store;
pub mod view;

pub type ResultEngine<T> = Result<T, EngineError>;
