//! Preparation state machine and read facade
//!
//! Every successful mutation persists first, then publishes a change
//! notification through the [`DisplayHub`]. Operations are idempotent at the
//! data level — re-applying the same status is a no-op effect-wise but still
//! emits, so subscribers must tolerate duplicate notifications.

use std::sync::Arc;

use shared::kitchen::{DishGroup, StationView, TableGroup};
use shared::message::KitchenEvent;
use shared::models::{ItemStatus, Order, OrderDraft, OrderItem, OrderStatus};
use shared::util::{new_id, now_millis};
use shared::ErrorCode;

use crate::kitchen::aggregate;
use crate::live::DisplayHub;
use crate::store::OrderStore;
use crate::utils::{AppError, AppResult};

/// Kitchen command + read service
///
/// Holds the store adapter and the hub; cheap to clone, shared via
/// [`crate::core::ServerState`].
#[derive(Debug, Clone)]
pub struct KitchenService {
    store: Arc<dyn OrderStore>,
    hub: DisplayHub,
}

impl KitchenService {
    pub fn new(store: Arc<dyn OrderStore>, hub: DisplayHub) -> Self {
        Self { store, hub }
    }

    // ==================== Commands ====================

    /// Set an item's preparation status.
    ///
    /// No transition table: any of the three statuses may be set at any time
    /// (forward progress, urgent re-fire, send back to Pending). Fails only
    /// when the item does not exist.
    pub async fn set_item_status(
        &self,
        item_id: &str,
        status: ItemStatus,
    ) -> AppResult<OrderItem> {
        let item = self
            .store
            .set_item_status(item_id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("item {item_id}")))?;

        tracing::info!(item_id, ?status, order_id = %item.order_id, "Item status set");

        self.hub.publish(KitchenEvent::ItemStatusChanged {
            order_id: item.order_id.clone(),
            status,
            item: item.clone(),
        });
        Ok(item)
    }

    /// Complete an order — the single authoritative completion gate.
    ///
    /// Succeeds only when the order has at least one item and every item is
    /// Done; no partial completion is permitted. Idempotent: completing an
    /// already-completed order passes the guard again and re-emits.
    pub async fn complete_order(&self, order_id: &str) -> AppResult<()> {
        let order = self
            .store
            .order(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("order {order_id}")))?;

        if order.items.is_empty() {
            return Err(AppError::precondition(
                ErrorCode::OrderEmpty,
                format!("order {order_id} has no items"),
            ));
        }
        let outstanding = order
            .items
            .iter()
            .filter(|i| i.status != ItemStatus::Done)
            .count();
        if outstanding > 0 {
            return Err(AppError::precondition(
                ErrorCode::OrderItemsNotDone,
                format!("not all items completed ({outstanding} outstanding)"),
            ));
        }

        self.store
            .set_order_status(order_id, OrderStatus::Completed)
            .await?;

        tracing::info!(order_id, "Order completed");

        self.hub.publish(KitchenEvent::OrderCompleted {
            order_id: order_id.to_string(),
        });
        Ok(())
    }

    /// Flip an item's urgent flag.
    ///
    /// Independent of preparation status; used purely for display triage.
    pub async fn set_urgent(&self, item_id: &str, urgent: bool) -> AppResult<OrderItem> {
        let item = self
            .store
            .set_item_urgent(item_id, urgent)
            .await?
            .ok_or_else(|| AppError::not_found(format!("item {item_id}")))?;

        tracing::info!(item_id, urgent, "Item urgent flag set");

        self.hub.publish(KitchenEvent::ItemUrgentChanged {
            item_id: item.id.clone(),
            order_id: item.order_id.clone(),
            urgent,
        });
        Ok(item)
    }

    /// Submit a cart as a new Processing order — the narrow ingestion point.
    ///
    /// Dish snapshots (name, course type, category, image, cook estimate)
    /// are taken at submission so projections never consult master data.
    pub async fn submit_order(&self, draft: OrderDraft) -> AppResult<Order> {
        if draft.items.is_empty() {
            return Err(AppError::Validation(
                "order must contain at least one item".into(),
            ));
        }
        for line in &draft.items {
            if line.quantity <= 0 {
                return Err(AppError::Validation(format!(
                    "invalid quantity {} for dish {}",
                    line.quantity, line.dish_id
                )));
            }
        }

        let order_id = new_id();
        let now = now_millis();
        let mut items = Vec::with_capacity(draft.items.len());

        for line in draft.items {
            let dish = self
                .store
                .dish(&line.dish_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("dish {}", line.dish_id)))?;

            items.push(OrderItem {
                id: new_id(),
                order_id: order_id.clone(),
                dish_id: dish.id,
                name: dish.name,
                course_type: dish.course_type,
                category_name: dish.category_name,
                image: dish.image,
                quantity: line.quantity,
                status: ItemStatus::Pending,
                urgent: false,
                note: line.note,
                created_at: now,
                estimated_cook_minutes: dish.estimated_cook_minutes,
            });
        }

        let order = Order {
            id: order_id,
            status: OrderStatus::Processing,
            order_type: draft.order_type,
            created_at: now,
            table_name: draft.table_name,
            reservation: draft.reservation,
            customer_name: draft.customer_name,
            items,
        };

        self.store.insert_order(order.clone()).await?;

        tracing::info!(order_id = %order.id, items = order.items.len(), "Order received");

        self.hub.publish(KitchenEvent::NewOrderReceived {
            order: order.clone(),
        });
        Ok(order)
    }

    /// Fire a dish: mass-transition every Pending item of it to Cooking.
    ///
    /// The by-dish screen's bulk action; emits one notification per item.
    /// Returns the number of items fired (0 is fine — nothing was pending).
    pub async fn fire_dish(&self, dish_id: &str) -> AppResult<usize> {
        self.store
            .dish(dish_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("dish {dish_id}")))?;

        let pending: Vec<String> = self
            .store
            .active_orders()
            .await?
            .iter()
            .flat_map(|o| o.items.iter())
            .filter(|i| i.dish_id == dish_id && i.status == ItemStatus::Pending)
            .map(|i| i.id.clone())
            .collect();

        let mut fired = 0;
        for item_id in &pending {
            // A racing write may have moved the item; skip silently
            if let Some(item) = self
                .store
                .set_item_status(item_id, ItemStatus::Cooking)
                .await?
            {
                self.hub.publish(KitchenEvent::ItemStatusChanged {
                    order_id: item.order_id.clone(),
                    status: ItemStatus::Cooking,
                    item,
                });
                fired += 1;
            }
        }

        tracing::info!(dish_id, fired, "Dish fired");
        Ok(fired)
    }

    // ==================== Reads ====================

    /// Expeditor by-table projection, recomputed from current store state
    pub async fn orders_by_table(&self) -> AppResult<Vec<TableGroup>> {
        let orders = self.store.active_orders().await?;
        Ok(aggregate::group_by_table(&orders, now_millis()))
    }

    /// By-dish projection with the composite long-cook-first sort
    pub async fn items_by_dish(&self) -> AppResult<Vec<DishGroup>> {
        let orders = self.store.active_orders().await?;
        Ok(aggregate::group_by_dish(&orders, now_millis()))
    }

    /// Station projection for one category name
    pub async fn station_items(&self, category: &str) -> AppResult<StationView> {
        if category.trim().is_empty() {
            return Err(AppError::Validation("category name must not be blank".into()));
        }
        let orders = self.store.active_orders().await?;
        Ok(aggregate::station_view(&orders, category, now_millis()))
    }

    /// Filter option source: distinct course types
    pub async fn course_types(&self) -> AppResult<Vec<String>> {
        Ok(self.store.course_types().await?)
    }

    /// Filter option source: station category names
    pub async fn station_categories(&self) -> AppResult<Vec<String>> {
        let categories = self.store.categories().await?;
        Ok(categories.into_iter().map(|c| c.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOrderStore;
    use shared::message::DisplayMessage;
    use shared::models::{Category as CategoryModel, Dish, DraftItem};

    fn catalog() -> (Vec<Dish>, Vec<CategoryModel>) {
        let dishes = vec![
            Dish {
                id: "d-paella".into(),
                name: "Paella".into(),
                course_type: "MAIN".into(),
                category_name: Some("Grill".into()),
                image: None,
                estimated_cook_minutes: 20,
            },
            Dish {
                id: "d-flan".into(),
                name: "Flan".into(),
                course_type: "DESSERT".into(),
                category_name: Some("Dessert".into()),
                image: None,
                estimated_cook_minutes: 5,
            },
        ];
        let categories = vec![
            CategoryModel {
                id: "c1".into(),
                name: "Grill".into(),
                sort_order: 1,
                is_active: true,
            },
            CategoryModel {
                id: "c2".into(),
                name: "Dessert".into(),
                sort_order: 2,
                is_active: true,
            },
        ];
        (dishes, categories)
    }

    fn service() -> KitchenService {
        let (dishes, categories) = catalog();
        KitchenService::new(
            Arc::new(MemoryOrderStore::with_catalog(dishes, categories)),
            DisplayHub::new(64),
        )
    }

    fn draft(lines: &[(&str, i32)]) -> OrderDraft {
        OrderDraft {
            order_type: "DINE_IN".into(),
            table_name: Some("T1".into()),
            reservation: None,
            customer_name: None,
            items: lines
                .iter()
                .map(|(dish_id, quantity)| DraftItem {
                    dish_id: (*dish_id).into(),
                    quantity: *quantity,
                    note: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_read_after_write_consistency() {
        let svc = service();
        let order = svc.submit_order(draft(&[("d-paella", 1)])).await.unwrap();
        let item_id = order.items[0].id.clone();

        svc.set_item_status(&item_id, ItemStatus::Cooking)
            .await
            .unwrap();

        // Projection read immediately reflects the write, independent of the
        // broadcaster
        let view = svc.station_items("Grill").await.unwrap();
        assert_eq!(view.cooking_items.len(), 1);
        assert_eq!(view.cooking_items[0].item.id, item_id);
    }

    #[tokio::test]
    async fn test_complete_order_guard_and_idempotence() {
        let svc = service();
        let order = svc
            .submit_order(draft(&[("d-paella", 1), ("d-flan", 1)]))
            .await
            .unwrap();

        // Guard: items still outstanding
        let err = svc.complete_order(&order.id).await.unwrap_err();
        match err {
            AppError::Precondition { code, .. } => {
                assert_eq!(code, ErrorCode::OrderItemsNotDone)
            }
            other => panic!("unexpected error: {other:?}"),
        }

        for item in &order.items {
            svc.set_item_status(&item.id, ItemStatus::Done).await.unwrap();
        }

        svc.complete_order(&order.id).await.unwrap();
        // Idempotent: completing again still succeeds
        svc.complete_order(&order.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_unknown_order_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.complete_order("missing").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_set_status_emits_even_on_reapply() {
        let svc = service();
        let mut rx = svc.hub.subscribe();
        let order = svc.submit_order(draft(&[("d-paella", 1)])).await.unwrap();
        let item_id = order.items[0].id.clone();
        // Drain the NewOrderReceived frame
        let _ = rx.recv().await.unwrap();

        svc.set_item_status(&item_id, ItemStatus::Done).await.unwrap();
        svc.set_item_status(&item_id, ItemStatus::Done).await.unwrap();

        // Both applications emitted — subscribers must tolerate duplicates
        for _ in 0..2 {
            match rx.recv().await.unwrap() {
                DisplayMessage::Event { event, .. } => match event {
                    KitchenEvent::ItemStatusChanged { status, .. } => {
                        assert_eq!(status, ItemStatus::Done)
                    }
                    other => panic!("unexpected event: {other:?}"),
                },
                other => panic!("unexpected frame: {other:?}"),
            }
        }

        let fetched = svc.store.find_item(&item_id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ItemStatus::Done);
    }

    #[tokio::test]
    async fn test_send_back_to_pending_allowed() {
        let svc = service();
        let order = svc.submit_order(draft(&[("d-paella", 1)])).await.unwrap();
        let item_id = order.items[0].id.clone();

        svc.set_item_status(&item_id, ItemStatus::Done).await.unwrap();
        let item = svc
            .set_item_status(&item_id, ItemStatus::Pending)
            .await
            .unwrap();
        assert_eq!(item.status, ItemStatus::Pending);
    }

    #[tokio::test]
    async fn test_urgent_flag_independent_of_status() {
        let svc = service();
        let order = svc.submit_order(draft(&[("d-paella", 1)])).await.unwrap();
        let item_id = order.items[0].id.clone();

        let item = svc.set_urgent(&item_id, true).await.unwrap();
        assert!(item.urgent);
        assert_eq!(item.status, ItemStatus::Pending);
    }

    #[tokio::test]
    async fn test_fire_dish_transitions_pending_only() {
        let svc = service();
        let order = svc
            .submit_order(draft(&[("d-paella", 1), ("d-paella", 2), ("d-flan", 1)]))
            .await
            .unwrap();
        // One paella already cooking
        svc.set_item_status(&order.items[0].id, ItemStatus::Cooking)
            .await
            .unwrap();

        let fired = svc.fire_dish("d-paella").await.unwrap();
        assert_eq!(fired, 1);

        let view = svc.station_items("Grill").await.unwrap();
        assert_eq!(view.cooking_items.len(), 2);
        // The flan stays pending
        let dessert = svc.station_items("Dessert").await.unwrap();
        assert!(dessert.cooking_items.is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_cart_and_unknown_dish() {
        let svc = service();
        assert!(matches!(
            svc.submit_order(draft(&[])).await.unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(matches!(
            svc.submit_order(draft(&[("d-nope", 1)])).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            svc.submit_order(draft(&[("d-paella", 0)])).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_filter_option_sources() {
        let svc = service();
        assert_eq!(svc.course_types().await.unwrap(), vec!["DESSERT", "MAIN"]);
        assert_eq!(
            svc.station_categories().await.unwrap(),
            vec!["Grill", "Dessert"]
        );
    }
}
