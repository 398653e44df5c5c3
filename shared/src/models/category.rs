//! Category Model

use serde::{Deserialize, Serialize};

/// Synthetic bucket for dishes without a category.
///
/// A station screen can be addressed by this name like any real category.
pub const OTHER_CATEGORY: &str = "Other";

/// Dish category entity
///
/// A kitchen station is addressed by category name (string key), not by a
/// separate station entity. Station screens filter the flattened item list
/// by this name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub is_active: bool,
}
