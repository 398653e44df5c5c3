//! Broadcast channel message types
//!
//! 这些类型在 kds-server 和显示客户端之间共享，承载 WebSocket 广播帧。
//!
//! A notification is purely a trigger to re-fetch current state, never the
//! state itself — clients must tolerate duplicate and out-of-order frames
//! and keep a periodic polling backstop.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{ItemStatus, Order, OrderItem};

/// Change notification published after every successful mutation
///
/// No retention, no replay: an undelivered event is lost and convergence
/// relies on the clients' polling backstop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KitchenEvent {
    /// An item's preparation status changed (also emitted on no-op re-apply;
    /// subscribers must tolerate duplicates)
    ItemStatusChanged {
        item: OrderItem,
        order_id: String,
        status: ItemStatus,
    },
    /// An item's urgent flag was flipped
    ItemUrgentChanged {
        item_id: String,
        order_id: String,
        urgent: bool,
    },
    /// A new order entered the active set
    NewOrderReceived { order: Order },
    /// Every item reached Done and the order was completed
    OrderCompleted { order_id: String },
}

impl KitchenEvent {
    /// Resource family used for version stamping, so clients can detect
    /// missed notifications per resource and re-fetch early.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::ItemStatusChanged { .. } | Self::ItemUrgentChanged { .. } => "item",
            Self::NewOrderReceived { .. } | Self::OrderCompleted { .. } => "order",
        }
    }
}

/// Server → display client WebSocket frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayMessage {
    /// Connection acknowledgement, sent once on connect
    Welcome {
        client_id: String,
        server_version: String,
        /// Current per-resource version counters; lets a reconnecting
        /// client decide whether it missed anything while away
        resource_versions: HashMap<String, u64>,
    },
    /// A broadcast change notification with its stamped version
    Event {
        resource: String,
        version: u64,
        event: KitchenEvent,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_event_equality_after_roundtrip() {
        let item = OrderItem {
            id: "i1".into(),
            order_id: "o1".into(),
            dish_id: "d1".into(),
            name: "Paella".into(),
            course_type: "MAIN".into(),
            category_name: Some("Grill".into()),
            image: None,
            quantity: 2,
            status: ItemStatus::Cooking,
            urgent: false,
            note: None,
            created_at: 1_000,
            estimated_cook_minutes: 20,
        };
        let event = KitchenEvent::ItemStatusChanged {
            order_id: item.order_id.clone(),
            status: item.status,
            item,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: KitchenEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_resource_families() {
        let completed = KitchenEvent::OrderCompleted {
            order_id: "o1".into(),
        };
        assert_eq!(completed.resource(), "order");

        let urgent = KitchenEvent::ItemUrgentChanged {
            item_id: "i1".into(),
            order_id: "o1".into(),
            urgent: true,
        };
        assert_eq!(urgent.resource(), "item");
    }

    #[test]
    fn test_frame_roundtrip() {
        let frame = DisplayMessage::Event {
            resource: "order".into(),
            version: 7,
            event: KitchenEvent::OrderCompleted {
                order_id: "o1".into(),
            },
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"type\":\"event\""));
        assert!(json.contains("\"kind\":\"order_completed\""));

        let back: DisplayMessage = serde_json::from_str(&json).unwrap();
        match back {
            DisplayMessage::Event { version, .. } => assert_eq!(version, 7),
            _ => panic!("expected event frame"),
        }
    }
}
