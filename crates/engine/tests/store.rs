use chrono::{NaiveDate, TimeZone, Utc};

use engine::{
    BlobStore, Category, FileBlobStore, MemoryBlobStore, Price, PurchaseStatus, RecordDraft,
    RecordStore, STORAGE_KEY, ShoppingRecord, UnitCostType, UsageStatus,
};
use uuid::Uuid;

fn file_store() -> (RecordStore<FileBlobStore>, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/test_stores")
        .join(Uuid::new_v4().to_string());
    (RecordStore::new(FileBlobStore::new(&root)), root)
}

fn record(id: &str, name: &str, created_ms: i64) -> ShoppingRecord {
    ShoppingRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: Category::Electronics,
        status: PurchaseStatus::Bought,
        list_price: Price::new(12_000),
        actual_price: Price::new(10_000),
        discount_rate: 16.7,
        purchase_date: "2025-04-02".to_string(),
        usage_status: UsageStatus::InUse,
        unit_cost_type: UnitCostType::PerUse,
        unit_cost: Price::new(50),
        link: "https://example.com/item".to_string(),
        notes: "second hand".to_string(),
        created_at: Utc.timestamp_millis_opt(created_ms).unwrap(),
    }
}

fn draft(name: &str, cents: u64) -> RecordDraft {
    let mut draft = RecordDraft::new(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    draft.name = name.to_string();
    draft.actual_price = Some(Price::new(cents));
    draft
}

#[test]
fn missing_blob_lists_empty() {
    let (store, _root) = file_store();
    assert!(store.list_all().is_empty());
}

#[test]
fn upsert_new_id_is_prepended_once() {
    let (mut store, root) = file_store();
    store.upsert(record("a", "Phone", 1_000)).unwrap();
    store.upsert(record("b", "Laptop", 2_000)).unwrap();

    let records = store.list_all();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "b");
    assert_eq!(records.iter().filter(|r| r.id == "b").count(), 1);
    assert!(root.join(format!("{STORAGE_KEY}.json")).exists());

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn upsert_existing_id_replaces_in_place() {
    let mut store = RecordStore::new(MemoryBlobStore::new());
    store.upsert(record("a", "Phone", 1_000)).unwrap();
    store.upsert(record("b", "Laptop", 2_000)).unwrap();
    store.upsert(record("c", "Tablet", 3_000)).unwrap();

    let mut edited = record("b", "Laptop Pro", 9_999);
    edited.actual_price = Price::new(9_000);
    let records = store.upsert(edited).unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);
    assert_eq!(records[1].name, "Laptop Pro");
    assert_eq!(records[1].actual_price, Price::new(9_000));
    assert_eq!(records[1].created_at.timestamp_millis(), 2_000);
    assert_eq!(records[1].discount_rate, 25.0);
    assert_eq!(store.list_all(), records);
}

#[test]
fn remove_drops_id_and_ignores_unknown() {
    let mut store = RecordStore::new(MemoryBlobStore::new());
    store.upsert(record("a", "Phone", 1_000)).unwrap();
    store.upsert(record("b", "Laptop", 2_000)).unwrap();

    let records = store.remove("a").unwrap();
    assert!(records.iter().all(|r| r.id != "a"));
    assert!(store.list_all().iter().all(|r| r.id != "a"));

    let before = store.list_all();
    let after = store.remove("does-not-exist").unwrap();
    assert_eq!(before, after);
    assert_eq!(store.list_all(), before);
}

#[test]
fn collection_round_trips_field_for_field() {
    let (mut store, root) = file_store();
    let mut planned = record("p", "Camera", 5_000);
    planned.status = PurchaseStatus::Planned;
    planned.purchase_date = String::new();
    store.upsert(record("a", "Phone", 1_000)).unwrap();
    let written = store.upsert(planned).unwrap();

    let reopened = RecordStore::new(FileBlobStore::new(&root));
    assert_eq!(reopened.list_all(), written);

    let json = serde_json::to_string(&written).unwrap();
    let parsed: Vec<ShoppingRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, written);

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn largest_price_survives_reload() {
    let (mut store, root) = file_store();
    store.create(draft("Tea", 100), Utc::now()).unwrap();

    let mut house = draft("House", 0);
    house.actual_price = Some("10000000000000".parse().unwrap());
    house.list_price = "9999999999999.99".parse().unwrap();
    store.create(house, Utc::now()).unwrap();
    let written = store.create(draft("Coffee", 300), Utc::now()).unwrap();

    let reopened = RecordStore::new(FileBlobStore::new(&root));
    let listed = reopened.list_all();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed, written);
    assert_eq!(listed[1].actual_price, Price::MAX);
    assert_eq!(listed[1].list_price, Price::new(999_999_999_999_999));

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn oversized_price_never_reaches_the_blob() {
    let mut store = RecordStore::new(MemoryBlobStore::new());
    store.upsert(record("a", "Phone", 1_000)).unwrap();

    assert!("100000000000000".parse::<Price>().is_err());

    let mut huge = record("b", "Island", 2_000);
    huge.actual_price = Price::new(Price::MAX.cents() + 1);
    assert!(store.upsert(huge).is_err());

    let records = store.list_all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "a");
}

#[test]
fn upsert_and_create_return_what_is_stored() {
    let (mut store, root) = file_store();

    let mut fresh = record("a", "Phone", 0);
    fresh.created_at = Utc::now();
    let returned = store.upsert(fresh).unwrap();
    assert_eq!(returned, store.list_all());

    let returned = store.create(draft("Tea", 100), Utc::now()).unwrap();
    assert_eq!(returned, store.list_all());

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn corrupt_file_fails_open() {
    let (mut store, root) = file_store();
    store.upsert(record("a", "Phone", 1_000)).unwrap();
    std::fs::write(root.join(format!("{STORAGE_KEY}.json")), "[{\"id\":").unwrap();

    assert!(store.list_all().is_empty());

    std::fs::remove_dir_all(root).unwrap();
}

#[test]
fn reads_blob_written_by_older_clients() {
    let raw = r#"[{"id":"lx1abc","name":"洗面奶","category":"美妆/护肤","status":"bought",
        "listPrice":89,"actualPrice":59.9,"discountRate":32.7,"purchaseDate":"2025-02-14",
        "usageStatus":"in_use","unitCostType":"per_gram","unitCost":0.5,"link":"","notes":"",
        "createdAt":1739500000000}]"#;
    let store = RecordStore::new(MemoryBlobStore::with_blob(STORAGE_KEY, raw));
    let records = store.list_all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, Category::Beauty);
    assert_eq!(records[0].actual_price, Price::new(5_990));
    assert_eq!(records[0].unit_cost_type, UnitCostType::PerUnitMass);
}

#[test]
fn create_then_update_keeps_identity() {
    let mut store = RecordStore::new(MemoryBlobStore::new());
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    store.create(draft("Old", 1_000), now).unwrap();
    let records = store.create(draft("Headphones", 59_900), now).unwrap();
    let created = records[0].clone();
    assert_eq!(created.name, "Headphones");
    assert_eq!(created.created_at, now);

    let mut edit = created.to_draft();
    edit.list_price = Price::new(79_900);
    edit.status = PurchaseStatus::Bought;
    let records = store.update(&created.id, edit).unwrap();

    assert_eq!(records[0].id, created.id);
    assert_eq!(records[0].created_at, created.created_at);
    assert_eq!(records[0].status, PurchaseStatus::Bought);
    assert_eq!(records[0].discount_rate, 25.0);
    assert_eq!(records[1].name, "Old");
}

#[test]
fn clear_deletes_the_blob() {
    let mut store = RecordStore::new(MemoryBlobStore::new());
    store.create(draft("Tea", 100), Utc::now()).unwrap();
    store.clear().unwrap();
    assert_eq!(store.blob().get(STORAGE_KEY).unwrap(), None);
    assert!(store.list_all().is_empty());
}
