use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schedule::WeeklySchedule;

pub const SCHEDULE_COLLECTION: &str = "autoschedule";
pub const NOTIFICATION_COLLECTION: &str = "notifications";
pub const ANNOUNCEMENT_COLLECTION: &str = "announcements";
pub const FACULTY_MESSAGE_COLLECTION: &str = "faculty_messages";

/// Failure talking to the document store, tagged with the collection name
#[derive(Debug)]
pub struct StoreError {
    pub collection: String,
    pub message: String,
}

impl StoreError {
    fn new(collection: &str, message: impl fmt::Display) -> StoreError {
        StoreError {
            collection: collection.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store error on '{}': {}", self.collection, self.message)
    }
}

impl std::error::Error for StoreError {}

/// One stored record: generated id plus the raw document fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Append/list capability over named collections
///
/// Passed explicitly into every call site that persists or reads data;
/// there is no ambient store handle anywhere in the crate.
pub trait DocumentStore {
    fn append(&self, collection: &str, record: Value) -> Result<String, StoreError>;
    fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}

/// Document store backed by one JSON file per collection
///
/// The store is shared across server workers, so every read and every
/// read-modify-rewrite cycle runs under the internal lock; overlapping
/// appends cannot drop records or observe half-written files.
pub struct JsonFileStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> JsonFileStore {
        JsonFileStore {
            root: root.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    fn read_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents =
            fs::read_to_string(&path).map_err(|e| StoreError::new(collection, e))?;
        serde_json::from_str(&contents).map_err(|e| StoreError::new(collection, e))
    }
}

impl DocumentStore for JsonFileStore {
    fn append(&self, collection: &str, record: Value) -> Result<String, StoreError> {
        let _guard = self.lock.lock().unwrap();

        let mut documents = self.read_collection(collection)?;
        let id = new_document_id();
        documents.push(Document {
            id: id.clone(),
            fields: record,
        });

        fs::create_dir_all(&self.root).map_err(|e| StoreError::new(collection, e))?;
        let contents =
            serde_json::to_string_pretty(&documents).map_err(|e| StoreError::new(collection, e))?;
        fs::write(self.collection_path(collection), contents)
            .map_err(|e| StoreError::new(collection, e))?;

        Ok(id)
    }

    fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let _guard = self.lock.lock().unwrap();
        self.read_collection(collection)
    }
}

/// Random 20-character alphanumeric record id
fn new_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}

/// A persisted timetable as read back from the store
///
/// `timetable` is `None` when the stored record is missing or has an
/// unreadable timetable field; readers show it as "no data" instead of
/// failing the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSchedule {
    pub id: String,
    pub timetable: Option<WeeklySchedule>,
    pub created_at: Option<String>,
}

/// Appends a generated schedule to the autoschedule collection
pub fn persist_schedule(
    store: &dyn DocumentStore,
    schedule: &WeeklySchedule,
) -> Result<String, StoreError> {
    let record = serde_json::json!({
        "timetable": schedule,
        "created_at": Utc::now().to_rfc3339(),
    });
    store.append(SCHEDULE_COLLECTION, record)
}

/// Reads every persisted schedule, in store order
pub fn list_schedules(store: &dyn DocumentStore) -> Result<Vec<SavedSchedule>, StoreError> {
    let documents = store.list_all(SCHEDULE_COLLECTION)?;
    let schedules = documents
        .into_iter()
        .map(|doc| {
            let timetable = doc
                .fields
                .get("timetable")
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            if timetable.is_none() {
                log::warn!("Saved schedule {} has no timetable data", doc.id);
            }
            let created_at = doc
                .fields
                .get("created_at")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            SavedSchedule {
                id: doc.id,
                timetable,
                created_at,
            }
        })
        .collect();
    Ok(schedules)
}
