use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use super::value_objects::{ActorRole, OrderItem, OrderStatus, DELIVERY_FEE};
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;

// ============================================================================
// Order Aggregate - Lifecycle State Machine
// ============================================================================
//
// Commands are validated against the current state and, when accepted,
// produce exactly one event. Only applying the event mutates the order, so
// a rejected command never leaves partial state behind.
//
// Transition table (from -> to, authorized role):
//   Placed   -> Accepted   shop
//   Placed   -> Cancelled  shop or customer
//   Accepted -> Ready      shop
//   Accepted -> Cancelled  shop
//   Ready    -> PickedUp   assigned delivery partner
//   PickedUp -> Delivered  assigned delivery partner
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // Identity
    pub id: Uuid,

    // Ownership references
    pub customer_id: Uuid,
    pub store_id: Uuid,
    pub partner_id: Option<Uuid>,

    // Contents, frozen at placement
    pub items: Vec<OrderItem>,
    pub total: i64,

    // Current state
    pub status: OrderStatus,

    // Audit trail
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Construct a new order in `Placed`, computing the total from the
    /// cart lines plus the flat delivery fee. Returns the order together
    /// with the placement event to hand to observers.
    pub fn place(
        customer_id: Uuid,
        store_id: Uuid,
        items: Vec<OrderItem>,
    ) -> Result<(Self, OrderEvent), OrderError> {
        validate_items(&items)?;

        let total: i64 = items.iter().map(OrderItem::line_total).sum::<i64>() + DELIVERY_FEE;
        let now = Utc::now();

        let order = Self {
            id: Uuid::new_v4(),
            customer_id,
            store_id,
            partner_id: None,
            items,
            total,
            status: OrderStatus::Placed,
            created_at: now,
            updated_at: now,
        };

        let event = OrderEvent::Placed(OrderPlaced {
            customer_id,
            store_id,
            items: order.items.clone(),
            total,
            placed_at: now,
        });

        Ok((order, event))
    }

    /// Validate a command against the current state and emit the resulting
    /// event. Does not mutate; apply the event with [`Order::apply_event`].
    pub fn handle_command(&self, command: &OrderCommand) -> Result<OrderEvent, OrderError> {
        match command {
            // Placement is handled by `Order::place`; an existing order
            // cannot be placed again.
            OrderCommand::Place { .. } => Err(OrderError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Placed,
            }),

            OrderCommand::Transition { target, actor } => {
                if self.status.is_terminal() {
                    return Err(OrderError::OrderClosed(self.status));
                }

                let now = Utc::now();
                match (self.status, *target, actor.role) {
                    (OrderStatus::Placed, OrderStatus::Accepted, ActorRole::Shop) => {
                        Ok(OrderEvent::Accepted(OrderAccepted {
                            shop_actor_id: actor.id,
                            accepted_at: now,
                        }))
                    }
                    (
                        OrderStatus::Placed,
                        OrderStatus::Cancelled,
                        ActorRole::Shop | ActorRole::Customer,
                    ) => Ok(OrderEvent::Cancelled(OrderCancelled {
                        cancelled_by: actor.id,
                        cancelled_at: now,
                    })),
                    (OrderStatus::Accepted, OrderStatus::Ready, ActorRole::Shop) => {
                        Ok(OrderEvent::Ready(OrderReady {
                            shop_actor_id: actor.id,
                            ready_at: now,
                        }))
                    }
                    (OrderStatus::Accepted, OrderStatus::Cancelled, ActorRole::Shop) => {
                        Ok(OrderEvent::Cancelled(OrderCancelled {
                            cancelled_by: actor.id,
                            cancelled_at: now,
                        }))
                    }
                    (OrderStatus::Ready, OrderStatus::PickedUp, ActorRole::DeliveryPartner)
                        if self.partner_id == Some(actor.id) =>
                    {
                        Ok(OrderEvent::PickedUp(OrderPickedUp {
                            partner_id: actor.id,
                            picked_up_at: now,
                        }))
                    }
                    (OrderStatus::PickedUp, OrderStatus::Delivered, ActorRole::DeliveryPartner)
                        if self.partner_id == Some(actor.id) =>
                    {
                        Ok(OrderEvent::Delivered(OrderDelivered {
                            partner_id: actor.id,
                            delivered_at: now,
                        }))
                    }
                    (from, to, _) => Err(OrderError::InvalidTransition { from, to }),
                }
            }

            OrderCommand::AssignPartner { partner_id } => {
                if self.status.is_terminal() {
                    return Err(OrderError::OrderClosed(self.status));
                }
                if let Some(existing) = self.partner_id {
                    return Err(OrderError::AlreadyAssigned {
                        partner_id: existing,
                    });
                }
                // Partners accept jobs any time before pickup; after Ready
                // the only remaining states are PickedUp and terminal ones,
                // both unreachable without an assignment.
                Ok(OrderEvent::PartnerAssigned(PartnerAssigned {
                    partner_id: *partner_id,
                    assigned_at: Utc::now(),
                }))
            }

            OrderCommand::Cancel { actor } => {
                if self.status.is_terminal() {
                    return Err(OrderError::OrderClosed(self.status));
                }
                if !self.status.is_cancellable() {
                    return Err(OrderError::NotCancellable(self.status));
                }
                // Customers may only back out before the shop accepts.
                if actor.role == ActorRole::Customer && self.status != OrderStatus::Placed {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Cancelled,
                    });
                }
                if actor.role == ActorRole::DeliveryPartner {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Cancelled,
                    });
                }
                Ok(OrderEvent::Cancelled(OrderCancelled {
                    cancelled_by: actor.id,
                    cancelled_at: Utc::now(),
                }))
            }
        }
    }

    /// Apply a previously validated event, advancing status and audit
    /// fields. Items and total are never touched after placement.
    pub fn apply_event(&mut self, event: &OrderEvent) {
        self.updated_at = event.occurred_at();

        match event {
            OrderEvent::Placed(_) => {
                // First event, already applied by `place`.
            }
            OrderEvent::Accepted(_) => self.status = OrderStatus::Accepted,
            OrderEvent::Ready(_) => self.status = OrderStatus::Ready,
            OrderEvent::PartnerAssigned(e) => self.partner_id = Some(e.partner_id),
            OrderEvent::PickedUp(_) => self.status = OrderStatus::PickedUp,
            OrderEvent::Delivered(_) => self.status = OrderStatus::Delivered,
            OrderEvent::Cancelled(_) => self.status = OrderStatus::Cancelled,
        }
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    for item in items {
        if item.quantity <= 0 {
            return Err(OrderError::InvalidQuantity(item.quantity));
        }
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::value_objects::ActorRef;

    fn milk(quantity: i32) -> OrderItem {
        OrderItem {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price: 30,
        }
    }

    fn placed_order() -> Order {
        let (order, _) = Order::place(Uuid::new_v4(), Uuid::new_v4(), vec![milk(2)]).unwrap();
        order
    }

    fn advance(order: &mut Order, command: OrderCommand) -> Result<OrderEvent, OrderError> {
        let event = order.handle_command(&command)?;
        order.apply_event(&event);
        Ok(event)
    }

    #[test]
    fn test_place_computes_total_with_delivery_fee() {
        let order = placed_order();

        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.total, 2 * 30 + DELIVERY_FEE);
        assert_eq!(order.total, 85);
        assert!(order.partner_id.is_none());
    }

    #[test]
    fn test_place_rejects_empty_cart() {
        let result = Order::place(Uuid::new_v4(), Uuid::new_v4(), vec![]);
        assert_eq!(result.unwrap_err(), OrderError::EmptyCart);
    }

    #[test]
    fn test_place_rejects_non_positive_quantity() {
        let result = Order::place(Uuid::new_v4(), Uuid::new_v4(), vec![milk(0)]);
        assert_eq!(result.unwrap_err(), OrderError::InvalidQuantity(0));
    }

    #[test]
    fn test_full_happy_path() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let partner_id = Uuid::new_v4();
        let partner = ActorRef::delivery_partner(partner_id);

        let mut order = placed_order();
        let frozen_total = order.total;
        let frozen_items = order.items.clone();

        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();
        assert_eq!(order.status, OrderStatus::Accepted);

        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Ready, actor: shop }).unwrap();
        assert_eq!(order.status, OrderStatus::Ready);

        advance(&mut order, OrderCommand::AssignPartner { partner_id }).unwrap();
        assert_eq!(order.partner_id, Some(partner_id));
        assert_eq!(order.status, OrderStatus::Ready);

        advance(&mut order, OrderCommand::Transition { target: OrderStatus::PickedUp, actor: partner }).unwrap();
        assert_eq!(order.status, OrderStatus::PickedUp);

        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Delivered, actor: partner }).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);

        // Contents never change across the lifecycle.
        assert_eq!(order.total, frozen_total);
        assert_eq!(order.items, frozen_items);

        // Terminal: every further request is rejected as closed.
        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop })
            .unwrap_err();
        assert_eq!(err, OrderError::OrderClosed(OrderStatus::Delivered));
    }

    #[test]
    fn test_no_state_skipping() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let order = placed_order();

        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::Ready, actor: shop })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Placed,
                to: OrderStatus::Ready,
            }
        );
    }

    #[test]
    fn test_no_reversal() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();

        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::Placed, actor: shop })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Accepted,
                to: OrderStatus::Placed,
            }
        );
    }

    #[test]
    fn test_repeated_transition_is_rejected_not_double_applied() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();

        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Accepted,
                to: OrderStatus::Accepted,
            }
        );
        assert_eq!(order.status, OrderStatus::Accepted);
    }

    #[test]
    fn test_wrong_role_is_rejected() {
        let customer = ActorRef::customer(Uuid::new_v4());
        let order = placed_order();

        // Only the shop may accept.
        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::Accepted, actor: customer })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_pickup_requires_assignment() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let partner = ActorRef::delivery_partner(Uuid::new_v4());
        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Ready, actor: shop }).unwrap();

        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::PickedUp, actor: partner })
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Ready,
                to: OrderStatus::PickedUp,
            }
        );
    }

    #[test]
    fn test_pickup_requires_the_assigned_partner() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let assigned = Uuid::new_v4();
        let impostor = ActorRef::delivery_partner(Uuid::new_v4());

        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Ready, actor: shop }).unwrap();
        advance(&mut order, OrderCommand::AssignPartner { partner_id: assigned }).unwrap();

        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::PickedUp, actor: impostor })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn test_assign_partner_only_once() {
        let first = Uuid::new_v4();
        let mut order = placed_order();
        advance(&mut order, OrderCommand::AssignPartner { partner_id: first }).unwrap();

        let err = order
            .handle_command(&OrderCommand::AssignPartner { partner_id: Uuid::new_v4() })
            .unwrap_err();
        assert_eq!(err, OrderError::AlreadyAssigned { partner_id: first });
        assert_eq!(order.partner_id, Some(first));
    }

    #[test]
    fn test_customer_cancels_while_placed() {
        let customer = ActorRef::customer(Uuid::new_v4());
        let shop = ActorRef::shop(Uuid::new_v4());
        let mut order = placed_order();

        advance(&mut order, OrderCommand::Cancel { actor: customer }).unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        // Closed for good.
        let err = order
            .handle_command(&OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop })
            .unwrap_err();
        assert_eq!(err, OrderError::OrderClosed(OrderStatus::Cancelled));
    }

    #[test]
    fn test_shop_cancels_while_accepted() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();

        advance(&mut order, OrderCommand::Cancel { actor: shop }).unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_customer_cannot_cancel_after_acceptance() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let customer = ActorRef::customer(Uuid::new_v4());
        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();

        let err = order
            .handle_command(&OrderCommand::Cancel { actor: customer })
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        assert_eq!(order.status, OrderStatus::Accepted);
    }

    #[test]
    fn test_not_cancellable_once_ready() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let mut order = placed_order();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Accepted, actor: shop }).unwrap();
        advance(&mut order, OrderCommand::Transition { target: OrderStatus::Ready, actor: shop }).unwrap();

        let err = order
            .handle_command(&OrderCommand::Cancel { actor: shop })
            .unwrap_err();
        assert_eq!(err, OrderError::NotCancellable(OrderStatus::Ready));
        assert_eq!(order.status, OrderStatus::Ready);
    }

    #[test]
    fn test_rejected_command_leaves_order_unchanged() {
        let shop = ActorRef::shop(Uuid::new_v4());
        let order = placed_order();
        let before = serde_json::to_string(&order).unwrap();

        let _ = order.handle_command(&OrderCommand::Transition {
            target: OrderStatus::Delivered,
            actor: shop,
        });

        let after = serde_json::to_string(&order).unwrap();
        assert_eq!(before, after);
    }
}
