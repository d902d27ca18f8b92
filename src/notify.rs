use chrono::Utc;

use crate::store::{DocumentStore, NOTIFICATION_COLLECTION};

/// Fans out a notification record after a mutation
///
/// Fire-and-forget: a store failure is logged and swallowed so the
/// mutation that triggered it still succeeds from the caller's view.
pub fn add_notification(store: &dyn DocumentStore, message: &str) {
    let record = serde_json::json!({
        "message": message,
        "timestamp": Utc::now().to_rfc3339(),
    });
    if let Err(err) = store.append(NOTIFICATION_COLLECTION, record) {
        log::error!("Error adding notification: {}", err);
    }
}
