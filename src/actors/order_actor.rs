use actix::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::controller::LifecycleController;
use crate::domain::order::{ActorRef, Order, OrderError, OrderItem, OrderStatus};

// ============================================================================
// Actor Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Result<Order, OrderError>")]
pub struct PlaceOrder {
    pub customer_id: Uuid,
    pub store_id: Uuid,
    pub items: Vec<OrderItem>,
}

#[derive(Message)]
#[rtype(result = "Result<Order, OrderError>")]
pub struct TransitionOrder {
    pub order_id: Uuid,
    pub target: OrderStatus,
    pub actor: ActorRef,
}

#[derive(Message)]
#[rtype(result = "Result<Order, OrderError>")]
pub struct AssignPartner {
    pub order_id: Uuid,
    pub partner_id: Uuid,
}

#[derive(Message)]
#[rtype(result = "Result<Order, OrderError>")]
pub struct CancelOrder {
    pub order_id: Uuid,
    pub actor: ActorRef,
}

#[derive(Message)]
#[rtype(result = "Result<Order, OrderError>")]
pub struct GetOrder {
    pub order_id: Uuid,
}

// ============================================================================
// Order Actor - Serialized Front for the Lifecycle Controller
// ============================================================================
//
// One mailbox per process: requests from UI event handlers arrive one at a
// time, matching the single-writer model the controller expects. Handlers
// are synchronous since no controller operation blocks.
//
// ============================================================================

pub struct OrderActor {
    controller: Arc<LifecycleController>,
}

impl OrderActor {
    pub fn new(controller: Arc<LifecycleController>) -> Self {
        Self { controller }
    }
}

impl Actor for OrderActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("OrderActor started");
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<PlaceOrder> for OrderActor {
    type Result = Result<Order, OrderError>;

    fn handle(&mut self, msg: PlaceOrder, _: &mut Self::Context) -> Self::Result {
        let PlaceOrder {
            customer_id,
            store_id,
            items,
        } = msg;

        self.controller
            .place(customer_id, store_id, items)
            .inspect_err(|e| {
                tracing::warn!(customer_id = %customer_id, error = %e, "Placement rejected")
            })
    }
}

impl Handler<TransitionOrder> for OrderActor {
    type Result = Result<Order, OrderError>;

    fn handle(&mut self, msg: TransitionOrder, _: &mut Self::Context) -> Self::Result {
        self.controller
            .transition(msg.order_id, msg.target, msg.actor)
            .inspect_err(|e| {
                tracing::warn!(order_id = %msg.order_id, target = %msg.target, error = %e, "Transition rejected")
            })
    }
}

impl Handler<AssignPartner> for OrderActor {
    type Result = Result<Order, OrderError>;

    fn handle(&mut self, msg: AssignPartner, _: &mut Self::Context) -> Self::Result {
        self.controller
            .assign_partner(msg.order_id, msg.partner_id)
            .inspect_err(|e| {
                tracing::warn!(order_id = %msg.order_id, partner_id = %msg.partner_id, error = %e, "Assignment rejected")
            })
    }
}

impl Handler<CancelOrder> for OrderActor {
    type Result = Result<Order, OrderError>;

    fn handle(&mut self, msg: CancelOrder, _: &mut Self::Context) -> Self::Result {
        self.controller
            .cancel(msg.order_id, msg.actor)
            .inspect_err(|e| {
                tracing::warn!(order_id = %msg.order_id, error = %e, "Cancellation rejected")
            })
    }
}

impl Handler<GetOrder> for OrderActor {
    type Result = Result<Order, OrderError>;

    fn handle(&mut self, msg: GetOrder, _: &mut Self::Context) -> Self::Result {
        self.controller.get(msg.order_id)
    }
}

// ============================================================================
// Tests
// ============================================================================
