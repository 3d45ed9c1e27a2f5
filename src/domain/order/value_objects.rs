use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Flat delivery fee added to every order total, in whole rupees.
pub const DELIVERY_FEE: i64 = 25;

/// A single cart line. Immutable once the order is placed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Price per unit in whole rupees, captured at placement time.
    pub unit_price: i64,
}

impl OrderItem {
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }
}

/// Canonical order lifecycle states.
///
/// The happy path is Placed -> Accepted -> Ready -> PickedUp -> Delivered.
/// Cancelled is reachable from Placed or Accepted only. Delivered and
/// Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    Accepted,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further commands.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Cancellation window: before the shop has finished preparing.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::Accepted)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Ready => "READY",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// The three roles authorized to drive order transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    Customer,
    Shop,
    DeliveryPartner,
}

/// A concrete actor: who is asking, and in what role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub role: ActorRole,
    pub id: Uuid,
}

impl ActorRef {
    pub fn customer(id: Uuid) -> Self {
        Self { role: ActorRole::Customer, id }
    }

    pub fn shop(id: Uuid) -> Self {
        Self { role: ActorRole::Shop, id }
    }

    pub fn delivery_partner(id: Uuid) -> Self {
        Self { role: ActorRole::DeliveryPartner, id }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
