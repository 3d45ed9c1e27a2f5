use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::order::{Order, OrderCommand, OrderError, OrderEvent};

// ============================================================================
// Order Store - Single Authoritative Copy of Order State
// ============================================================================
//
// In-memory repository keyed by order id. All mutation goes through
// `apply_command`, which validates and applies under the write lock, so a
// read-modify-write on one order is atomic: two delivery partners racing
// to accept the same job resolve to exactly one winner.
//
// ============================================================================

#[derive(Default)]
pub struct OrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly placed order.
    pub fn insert(&self, order: Order) {
        let mut orders = write_lock(&self.orders);
        orders.insert(order.id, order);
    }

    /// Snapshot of one order.
    pub fn get(&self, order_id: Uuid) -> Result<Order, OrderError> {
        let orders = read_lock(&self.orders);
        orders
            .get(&order_id)
            .cloned()
            .ok_or(OrderError::NotFound(order_id))
    }

    /// Validate `command` against the current state of `order_id` and, if
    /// accepted, apply the resulting event. Returns the updated order and
    /// the event. A rejected command leaves the stored order untouched.
    pub fn apply_command(
        &self,
        order_id: Uuid,
        command: &OrderCommand,
    ) -> Result<(Order, OrderEvent), OrderError> {
        let mut orders = write_lock(&self.orders);
        let order = orders
            .get_mut(&order_id)
            .ok_or(OrderError::NotFound(order_id))?;

        let event = order.handle_command(command)?;
        order.apply_event(&event);

        Ok((order.clone(), event))
    }

    pub fn len(&self) -> usize {
        read_lock(&self.orders).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A poisoned lock only means another thread panicked while holding it;
// the map stays consistent, so recover the guard and continue.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
