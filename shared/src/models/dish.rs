//! Dish Model

use serde::{Deserialize, Serialize};

/// Menu dish entity
///
/// Each dish belongs to exactly one category; a blank category is bucketed
/// under the synthetic "Other" station at projection time rather than
/// dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    /// Course type (e.g. "STARTER", "MAIN", "DESSERT") — filter option source
    pub course_type: String,
    /// Category name, addressing the preparation station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Image reference for card rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Declared cook-time estimate in minutes, drives the long-cook-first
    /// sort on the by-dish view
    pub estimated_cook_minutes: i32,
}
