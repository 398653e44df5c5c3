/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh string ID for orders, items and display clients.
///
/// UUIDv4 keeps IDs unique across restarts without any coordination;
/// display clients treat them as opaque strings.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
