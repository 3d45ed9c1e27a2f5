use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use super::value_objects::OrderItem;

// ============================================================================
// Order Events - Notifications for Order State Changes
// ============================================================================
//
// Each successfully applied command emits exactly one of these. Observers
// (customer, shop, delivery views) receive them synchronously, before the
// triggering operation returns.
//
// ============================================================================

/// Order Event - union type for all order lifecycle notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Accepted(OrderAccepted),
    Ready(OrderReady),
    PartnerAssigned(PartnerAssigned),
    PickedUp(OrderPickedUp),
    Delivered(OrderDelivered),
    Cancelled(OrderCancelled),
}

impl OrderEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::Accepted(_) => "OrderAccepted",
            OrderEvent::Ready(_) => "OrderReady",
            OrderEvent::PartnerAssigned(_) => "PartnerAssigned",
            OrderEvent::PickedUp(_) => "OrderPickedUp",
            OrderEvent::Delivered(_) => "OrderDelivered",
            OrderEvent::Cancelled(_) => "OrderCancelled",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::Placed(e) => e.placed_at,
            OrderEvent::Accepted(e) => e.accepted_at,
            OrderEvent::Ready(e) => e.ready_at,
            OrderEvent::PartnerAssigned(e) => e.assigned_at,
            OrderEvent::PickedUp(e) => e.picked_up_at,
            OrderEvent::Delivered(e) => e.delivered_at,
            OrderEvent::Cancelled(e) => e.cancelled_at,
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Placed - first event in the order lifecycle
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPlaced {
    pub customer_id: Uuid,
    pub store_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total: i64,
    pub placed_at: DateTime<Utc>,
}

/// Order Accepted - shop confirmed and started preparing
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderAccepted {
    pub shop_actor_id: Uuid,
    pub accepted_at: DateTime<Utc>,
}

/// Order Ready - shop finished preparing, awaiting pickup
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderReady {
    pub shop_actor_id: Uuid,
    pub ready_at: DateTime<Utc>,
}

/// Partner Assigned - a delivery partner accepted the job
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PartnerAssigned {
    pub partner_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// Order Picked Up - partner collected the order, in transit
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPickedUp {
    pub partner_id: Uuid,
    pub picked_up_at: DateTime<Utc>,
}

/// Order Delivered - terminal success
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDelivered {
    pub partner_id: Uuid,
    pub delivered_at: DateTime<Utc>,
}

/// Order Cancelled - terminal, before pickup only
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderCancelled {
    pub cancelled_by: Uuid,
    pub cancelled_at: DateTime<Utc>,
}

// ============================================================================
// Tests
// ============================================================================
