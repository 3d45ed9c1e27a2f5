// ============================================================================
// local_delivery_core - Order Lifecycle Core
// ============================================================================
//
// In-process order lifecycle state machine for a hyperlocal delivery
// marketplace. A single authoritative in-memory copy of each order is
// advanced through validated transitions (Placed -> Accepted -> Ready ->
// PickedUp -> Delivered, with Cancelled reachable before pickup) and
// observed synchronously by the customer, shop, and delivery views.
//
// ============================================================================

pub mod domain;
pub mod store;
pub mod controller;
pub mod actors;

pub use controller::{LifecycleController, ObserverRegistry, OrderObserver};
pub use domain::order::{
    ActorRef, ActorRole, Order, OrderError, OrderEvent, OrderItem, OrderStatus, DELIVERY_FEE,
};
