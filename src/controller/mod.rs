use std::sync::Arc;
use uuid::Uuid;

use crate::domain::order::{
    ActorRef, Order, OrderCommand, OrderError, OrderItem, OrderStatus,
};
use crate::store::OrderStore;

pub mod observers;

pub use observers::{ObserverRegistry, OrderObserver};

// ============================================================================
// Order Lifecycle Controller
// ============================================================================
//
// Owns the order store and the observer registry, and exposes the four
// lifecycle operations: place, transition, assign_partner, cancel. Every
// operation either completes immediately or fails immediately with a typed
// OrderError; no call blocks or suspends.
//
// Observer notification happens after the store lock is released but
// before the operation returns.
//
// ============================================================================

pub struct LifecycleController {
    store: OrderStore,
    observers: ObserverRegistry,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self {
            store: OrderStore::new(),
            observers: ObserverRegistry::new(),
        }
    }

    /// Subscribe an observer to one order's notifications.
    pub fn subscribe(&self, order_id: Uuid, observer: Arc<dyn OrderObserver>) {
        self.observers.subscribe(order_id, observer);
    }

    /// Subscribe an observer to every order's notifications.
    pub fn subscribe_all(&self, observer: Arc<dyn OrderObserver>) {
        self.observers.subscribe_all(observer);
    }

    /// Drop the keyed subscriptions of a closed order.
    pub fn unsubscribe_order(&self, order_id: Uuid) {
        self.observers.unsubscribe_order(order_id);
    }

    /// Create a new order in `Placed` from the customer's cart.
    pub fn place(
        &self,
        customer_id: Uuid,
        store_id: Uuid,
        items: Vec<OrderItem>,
    ) -> Result<Order, OrderError> {
        let (order, event) = Order::place(customer_id, store_id, items)?;
        self.store.insert(order.clone());

        tracing::info!(
            order_id = %order.id,
            customer_id = %customer_id,
            store_id = %store_id,
            total = order.total,
            "🛒 Order placed"
        );

        self.observers.notify(&order, &event);
        Ok(order)
    }

    /// Advance `order_id` to `target` on behalf of `actor`, per the
    /// transition table. Returns the updated order.
    pub fn transition(
        &self,
        order_id: Uuid,
        target: OrderStatus,
        actor: ActorRef,
    ) -> Result<Order, OrderError> {
        let (order, event) = self
            .store
            .apply_command(order_id, &OrderCommand::Transition { target, actor })?;

        tracing::info!(
            order_id = %order.id,
            status = %order.status,
            actor_id = %actor.id,
            role = ?actor.role,
            "Order transitioned"
        );

        self.observers.notify(&order, &event);
        Ok(order)
    }

    /// Record a delivery partner accepting the job. Atomic: of two racing
    /// callers, the first to commit wins and the loser gets
    /// `AlreadyAssigned`.
    pub fn assign_partner(&self, order_id: Uuid, partner_id: Uuid) -> Result<Order, OrderError> {
        let (order, event) = self
            .store
            .apply_command(order_id, &OrderCommand::AssignPartner { partner_id })?;

        tracing::info!(
            order_id = %order.id,
            partner_id = %partner_id,
            "🛵 Delivery partner assigned"
        );

        self.observers.notify(&order, &event);
        Ok(order)
    }

    /// Cancel `order_id` on behalf of `actor`. Only `Placed` and
    /// `Accepted` orders are cancellable.
    pub fn cancel(&self, order_id: Uuid, actor: ActorRef) -> Result<Order, OrderError> {
        let (order, event) = self
            .store
            .apply_command(order_id, &OrderCommand::Cancel { actor })?;

        tracing::info!(
            order_id = %order.id,
            actor_id = %actor.id,
            role = ?actor.role,
            "Order cancelled"
        );

        self.observers.notify(&order, &event);
        Ok(order)
    }

    /// Read-only snapshot of one order.
    pub fn get(&self, order_id: Uuid) -> Result<Order, OrderError> {
        self.store.get(order_id)
    }
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
