use uuid::Uuid;

use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================
//
// Every failure here is local and immediate: a rejected request that left
// the order untouched. Nothing is retried internally; callers decide
// whether to re-prompt the actor or surface the error.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i32),

    #[error("No transition from {from} to {to} for this actor")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order is closed in terminal state {0}")]
    OrderClosed(OrderStatus),

    #[error("A delivery partner is already assigned: {partner_id}")]
    AlreadyAssigned { partner_id: Uuid },

    #[error("Order in status {0} can no longer be cancelled")]
    NotCancellable(OrderStatus),

    #[error("Unknown order id: {0}")]
    NotFound(Uuid),
}
