//! Read-side projections for the kitchen display screens
//!
//! These are derived views, recomputed from the active order set on every
//! read — they have no lifecycle of their own and are never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ItemStatus, OrderItem, OrderStatus};

// ==================== Priority Tier ====================

/// Wait-time urgency tier, drives visual styling only — it never gates a
/// state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    /// 正常
    Normal,
    /// 预警
    Warning,
    /// 严重超时
    Critical,
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

// ==================== By-table view ====================

/// One card on the expeditor by-table screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableGroup {
    /// Resolved heading: table name → reservation table → customer → order type
    pub heading: String,
    /// Quantity-weighted totals across all orders in the group
    pub total_quantity: i32,
    pub done_quantity: i32,
    pub orders: Vec<TableOrder>,
}

/// One order inside a table group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOrder {
    pub order_id: String,
    pub status: OrderStatus,
    pub order_type: String,
    pub created_at: i64,
    pub waiting_minutes: i64,
    pub tier: PriorityTier,
    pub items: Vec<OrderItem>,
}

// ==================== By-dish view ====================

/// One row on the by-dish screen — the view a station "fires" from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishGroup {
    pub dish_id: String,
    pub name: String,
    pub course_type: String,
    /// Blank dish categories bucket under "Other"
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub estimated_cook_minutes: i32,
    /// Total quantity not yet Done across all source items
    pub outstanding_quantity: i32,
    /// Max over each constituent item's individually computed wait — the
    /// group surfaces as urgent the moment any single instance is old
    pub max_waiting_minutes: i64,
    pub tier: PriorityTier,
    pub sources: Vec<DishSource>,
}

/// Originating order/table/wait tuple within a dish group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishSource {
    pub item_id: String,
    pub order_id: String,
    /// Resolved table heading of the originating order
    pub table: String,
    pub quantity: i32,
    pub status: ItemStatus,
    pub urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub waiting_minutes: i64,
    pub tier: PriorityTier,
}

// ==================== By-station view ====================

/// One item on a station screen, with display context attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationItem {
    #[serde(flatten)]
    pub item: OrderItem,
    pub table: String,
    pub waiting_minutes: i64,
    pub tier: PriorityTier,
}

/// Station screen payload
///
/// `cooking_items` is the only list a station may transition to Done — a
/// station cannot silently complete a still-Pending item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationView {
    pub category: String,
    /// Every item in this category regardless of status (at-a-glance load)
    pub all_items: Vec<StationItem>,
    /// Items currently Cooking
    pub cooking_items: Vec<StationItem>,
}
