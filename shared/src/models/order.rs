//! Order and order-item models

use serde::{Deserialize, Serialize};

use super::Reservation;

// ============================================================================
// Status enums
// ============================================================================

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 已下单，等待厨房确认
    #[default]
    Processing,
    /// 厨房制作中
    Preparing,
    /// 全部菜品完成
    Completed,
    /// 已结账
    Paid,
    /// 已取消
    Cancelled,
}

impl OrderStatus {
    /// Active orders are the only ones projected onto kitchen screens
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing | Self::Preparing)
    }
}

/// Preparation status of a single order item
///
/// No transition table restricts which status may follow which: forward
/// progress, urgent re-fire and "send back to Pending" are all allowed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// 待制作
    #[default]
    Pending,
    /// 制作中
    Cooking,
    /// 已完成
    Done,
}

// ============================================================================
// Entities
// ============================================================================

/// Order entity with its owned line items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    /// Raw order-type tag (e.g. "DINE_IN", "TAKEAWAY") — last resort for
    /// the by-table heading fallback chain
    pub order_type: String,
    /// Creation timestamp (UTC millis)
    pub created_at: i64,
    /// Directly bound table name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Reservation linkage (table resolved through it when present)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Resolve the human-readable heading this order renders under on the
    /// by-table view.
    ///
    /// Priority: bound table name → reservation table name → customer name
    /// (order's own, then reservation's) → raw order-type tag. Every order
    /// must render under *some* heading even when table binding is missing.
    pub fn table_heading(&self) -> String {
        if let Some(name) = &self.table_name {
            return name.clone();
        }
        if let Some(res) = &self.reservation {
            if let Some(name) = &res.table_name {
                return name.clone();
            }
        }
        if let Some(name) = &self.customer_name {
            return name.clone();
        }
        if let Some(name) = self.reservation.as_ref().and_then(|r| r.customer_name.as_ref()) {
            return name.clone();
        }
        self.order_type.clone()
    }
}

/// Order line item
///
/// Carries a snapshot of the dish master data (name, course type, category,
/// image, cook estimate) so projections derive from the active order set
/// alone. Quantity and dish reference are immutable after creation; the item
/// creation timestamp doubles as the "fire time" surrogate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub dish_id: String,
    pub name: String,
    pub course_type: String,
    /// Category name snapshot; None buckets under "Other"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: i32,
    pub status: ItemStatus,
    /// Independently settable triage flag, never derived from wait time
    #[serde(default)]
    pub urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Creation timestamp (UTC millis), reference point for wait-time tiers
    pub created_at: i64,
    /// Cook-time estimate snapshot from the dish
    pub estimated_cook_minutes: i32,
}

// ============================================================================
// Submission payloads
// ============================================================================

/// Cart submission payload — the narrow order ingestion point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub order_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub items: Vec<DraftItem>,
}

/// Line item within a cart submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftItem {
    pub dish_id: String,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_order() -> Order {
        Order {
            id: "o1".into(),
            status: OrderStatus::Processing,
            order_type: "TAKEAWAY".into(),
            created_at: 0,
            table_name: None,
            reservation: None,
            customer_name: None,
            items: vec![],
        }
    }

    #[test]
    fn test_heading_prefers_table() {
        let mut order = base_order();
        order.table_name = Some("T5".into());
        order.customer_name = Some("Ana".into());
        assert_eq!(order.table_heading(), "T5");
    }

    #[test]
    fn test_heading_via_reservation() {
        let mut order = base_order();
        order.reservation = Some(Reservation {
            id: "r1".into(),
            table_name: Some("T9".into()),
            customer_name: Some("Luis".into()),
        });
        assert_eq!(order.table_heading(), "T9");
    }

    #[test]
    fn test_heading_falls_back_to_customer_then_type() {
        let mut order = base_order();
        order.customer_name = Some("Ana".into());
        assert_eq!(order.table_heading(), "Ana");

        order.customer_name = None;
        assert_eq!(order.table_heading(), "TAKEAWAY");
    }

    #[test]
    fn test_active_statuses() {
        assert!(OrderStatus::Processing.is_active());
        assert!(OrderStatus::Preparing.is_active());
        assert!(!OrderStatus::Completed.is_active());
        assert!(!OrderStatus::Paid.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }
}
