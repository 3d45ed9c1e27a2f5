use uuid::Uuid;

use super::value_objects::{ActorRef, OrderItem, OrderStatus};

// ============================================================================
// Order Commands - Represent actor intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Customer places a new order. Handled at creation, not against an
    /// existing aggregate.
    Place {
        customer_id: Uuid,
        store_id: Uuid,
        items: Vec<OrderItem>,
    },
    /// Generic table-driven transition request.
    Transition {
        target: OrderStatus,
        actor: ActorRef,
    },
    /// Delivery partner accepts the job.
    AssignPartner { partner_id: Uuid },
    /// Shorthand for Transition { target: Cancelled }, with its own
    /// error reporting.
    Cancel { actor: ActorRef },
}
