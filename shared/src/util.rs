//! Small shared utilities

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Prefix marking an id as client-generated and not yet persisted.
pub const TEMP_ID_PREFIX: &str = "tmp-";

/// Generate a temporary client-side item id.
///
/// Replaced by the backend's stable id once the item is persisted.
pub fn temp_item_id() -> String {
    format!("{}{}", TEMP_ID_PREFIX, uuid::Uuid::new_v4())
}

/// Whether an id is a temporary client-generated one.
pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}
