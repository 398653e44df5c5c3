//! Aggregation engine — the three read-side projections
//!
//! Pure functions over the active order set fetched fresh per call. There is
//! deliberately no cache: each read re-derives from current store state, so a
//! projection can never be stale once a change is durably applied.
//!
//! Zero-item orders are excluded from every projection (not yet orderable);
//! dishes without a category bucket under the synthetic "Other" station.

use std::collections::HashMap;

use shared::kitchen::{
    DishGroup, DishSource, StationItem, StationView, TableGroup, TableOrder,
};
use shared::models::{ItemStatus, Order, OrderItem, OTHER_CATEGORY};

use super::priority::{compare_dish_groups, tier_for, waiting_minutes};

/// Orders that actually render: active status and at least one item
fn presentable(orders: &[Order]) -> impl Iterator<Item = &Order> {
    orders
        .iter()
        .filter(|o| o.status.is_active() && !o.items.is_empty())
}

/// Effective station category of an item
fn item_category(item: &OrderItem) -> &str {
    match item.category_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => OTHER_CATEGORY,
    }
}

// ==================== By-table view ====================

/// Group active orders by resolved table heading for the expeditor screen.
///
/// Groups keep first-seen order (oldest order first, since the store returns
/// orders by creation time); counts are quantity-weighted.
pub fn group_by_table(orders: &[Order], now: i64) -> Vec<TableGroup> {
    let mut groups: Vec<TableGroup> = Vec::new();

    for order in presentable(orders) {
        let heading = order.table_heading();
        let waiting = waiting_minutes(now, order.created_at);

        let card = TableOrder {
            order_id: order.id.clone(),
            status: order.status,
            order_type: order.order_type.clone(),
            created_at: order.created_at,
            waiting_minutes: waiting,
            tier: tier_for(waiting),
            items: order.items.clone(),
        };

        let total: i32 = order.items.iter().map(|i| i.quantity).sum();
        let done: i32 = order
            .items
            .iter()
            .filter(|i| i.status == ItemStatus::Done)
            .map(|i| i.quantity)
            .sum();

        match groups.iter_mut().find(|g| g.heading == heading) {
            Some(group) => {
                group.total_quantity += total;
                group.done_quantity += done;
                group.orders.push(card);
            }
            None => groups.push(TableGroup {
                heading,
                total_quantity: total,
                done_quantity: done,
                orders: vec![card],
            }),
        }
    }

    groups
}

// ==================== By-dish view ====================

/// Flatten all active items and group them by dish identity.
///
/// Outstanding quantity counts everything not yet Done; the group's
/// max-observed wait is the maximum over its outstanding items so one old
/// instance surfaces the whole group. Sorted by the long-cook-first
/// composite rule.
pub fn group_by_dish(orders: &[Order], now: i64) -> Vec<DishGroup> {
    let mut by_dish: HashMap<String, DishGroup> = HashMap::new();

    for order in presentable(orders) {
        let table = order.table_heading();

        for item in &order.items {
            let waiting = waiting_minutes(now, item.created_at);
            let source = DishSource {
                item_id: item.id.clone(),
                order_id: order.id.clone(),
                table: table.clone(),
                quantity: item.quantity,
                status: item.status,
                urgent: item.urgent,
                note: item.note.clone(),
                waiting_minutes: waiting,
                tier: tier_for(waiting),
            };

            let group = by_dish
                .entry(item.dish_id.clone())
                .or_insert_with(|| DishGroup {
                    dish_id: item.dish_id.clone(),
                    name: item.name.clone(),
                    course_type: item.course_type.clone(),
                    category_name: item_category(item).to_string(),
                    image: item.image.clone(),
                    estimated_cook_minutes: item.estimated_cook_minutes,
                    outstanding_quantity: 0,
                    max_waiting_minutes: 0,
                    tier: tier_for(0),
                    sources: Vec::new(),
                });

            if item.status != ItemStatus::Done {
                group.outstanding_quantity += item.quantity;
                group.max_waiting_minutes = group.max_waiting_minutes.max(waiting);
            }
            group.sources.push(source);
        }
    }

    let mut groups: Vec<DishGroup> = by_dish.into_values().collect();
    for group in &mut groups {
        group.tier = tier_for(group.max_waiting_minutes);
        // Oldest instances first within a group
        group
            .sources
            .sort_by(|a, b| b.waiting_minutes.cmp(&a.waiting_minutes));
    }
    groups.sort_by(compare_dish_groups);
    groups
}

// ==================== By-station view ====================

/// Filter the flattened item list down to one station's category.
///
/// Returns two projections of the same list: everything in the category for
/// at-a-glance load, and the Cooking subset — the only items the station
/// screen may transition to Done.
pub fn station_view(orders: &[Order], category: &str, now: i64) -> StationView {
    let mut all_items: Vec<StationItem> = Vec::new();

    for order in presentable(orders) {
        let table = order.table_heading();

        for item in &order.items {
            if !item_category(item).eq_ignore_ascii_case(category) {
                continue;
            }
            let waiting = waiting_minutes(now, item.created_at);
            all_items.push(StationItem {
                item: item.clone(),
                table: table.clone(),
                waiting_minutes: waiting,
                tier: tier_for(waiting),
            });
        }
    }

    // Urgent first, then longest-waiting
    all_items.sort_by(|a, b| {
        b.item
            .urgent
            .cmp(&a.item.urgent)
            .then(b.waiting_minutes.cmp(&a.waiting_minutes))
    });

    let cooking_items: Vec<StationItem> = all_items
        .iter()
        .filter(|si| si.item.status == ItemStatus::Cooking)
        .cloned()
        .collect();

    StationView {
        category: category.to_string(),
        all_items,
        cooking_items,
    }
}
