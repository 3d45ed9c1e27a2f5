use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::order::{Order, OrderEvent};

// ============================================================================
// Order Observers - Synchronous State-Change Notifications
// ============================================================================
//
// The customer, shop, and delivery views each register an observer. There
// is a single authoritative copy of order state, so notification is
// synchronous: by the time a lifecycle operation returns, every observer
// has already seen the event.
//
// ============================================================================

/// Implemented by anything that wants to re-render on order changes.
pub trait OrderObserver: Send + Sync {
    fn on_order_event(&self, order: &Order, event: &OrderEvent);
}

/// Subscriptions keyed by order id, plus watch-everything subscribers for
/// dashboard-style views.
#[derive(Default)]
pub struct ObserverRegistry {
    by_order: RwLock<HashMap<Uuid, Vec<Arc<dyn OrderObserver>>>>,
    global: RwLock<Vec<Arc<dyn OrderObserver>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one order's notifications.
    pub fn subscribe(&self, order_id: Uuid, observer: Arc<dyn OrderObserver>) {
        let mut by_order = lock_write(&self.by_order);
        by_order.entry(order_id).or_default().push(observer);
    }

    /// Subscribe to every order's notifications.
    pub fn subscribe_all(&self, observer: Arc<dyn OrderObserver>) {
        let mut global = lock_write(&self.global);
        global.push(observer);
    }

    /// Drop all subscriptions for a closed order.
    pub fn unsubscribe_order(&self, order_id: Uuid) {
        let mut by_order = lock_write(&self.by_order);
        by_order.remove(&order_id);
    }

    /// Deliver `event` to every subscriber of `order.id` and every global
    /// subscriber. Called after the store lock is released; observers may
    /// read back into the controller without deadlocking.
    pub fn notify(&self, order: &Order, event: &OrderEvent) {
        let recipients: Vec<Arc<dyn OrderObserver>> = {
            let by_order = lock_read(&self.by_order);
            let global = lock_read(&self.global);
            by_order
                .get(&order.id)
                .into_iter()
                .flatten()
                .chain(global.iter())
                .cloned()
                .collect()
        };

        tracing::debug!(
            order_id = %order.id,
            event_type = %event.event_type(),
            recipients = recipients.len(),
            "Notifying observers"
        );

        for observer in recipients {
            observer.on_order_event(order, event);
        }
    }
}

fn lock_read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn lock_write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
