/// Current UTC timestamp in Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a random identifier for commands, events and documents
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
