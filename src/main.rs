use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use local_delivery_core::actors::{
    AssignPartner, CancelOrder, OrderActor, PlaceOrder, TransitionOrder,
};
use local_delivery_core::{
    ActorRef, ActorRole, LifecycleController, Order, OrderEvent, OrderItem, OrderObserver,
    OrderStatus,
};

use actix::Actor;

// ============================================================================
// Demo: one order through the full lifecycle, one cancellation, one race
// ============================================================================

/// Stand-in for a client view: logs every notification it receives.
struct ViewObserver {
    role: ActorRole,
}

impl OrderObserver for ViewObserver {
    fn on_order_event(&self, order: &Order, event: &OrderEvent) {
        tracing::info!(
            view = ?self.role,
            order_id = %order.id,
            status = %order.status,
            event_type = %event.event_type(),
            "View re-rendered"
        );
    }
}

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,local_delivery_core=debug")),
        )
        .init();

    tracing::info!("🚀 Starting order lifecycle demo");

    let controller = Arc::new(LifecycleController::new());

    // The three client views subscribe to everything.
    for role in [
        ActorRole::Customer,
        ActorRole::Shop,
        ActorRole::DeliveryPartner,
    ] {
        controller.subscribe_all(Arc::new(ViewObserver { role }));
    }

    let order_actor = OrderActor::new(controller.clone()).start();

    let customer_id = Uuid::new_v4();
    let store_id = Uuid::new_v4();
    let shop = ActorRef::shop(Uuid::new_v4());
    let partner_id = Uuid::new_v4();
    let partner = ActorRef::delivery_partner(partner_id);

    // === 1. Customer places an order: 2x Fresh Milk @ 30 + fee 25 = 85 ===
    let order = order_actor
        .send(PlaceOrder {
            customer_id,
            store_id,
            items: vec![OrderItem {
                product_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: 30,
            }],
        })
        .await??;

    tracing::info!("✅ Order placed: {} (total ₹{})", order.id, order.total);

    // === 2. Shop accepts and prepares ===
    pace().await;
    order_actor
        .send(TransitionOrder {
            order_id: order.id,
            target: OrderStatus::Accepted,
            actor: shop,
        })
        .await??;

    pace().await;
    order_actor
        .send(TransitionOrder {
            order_id: order.id,
            target: OrderStatus::Ready,
            actor: shop,
        })
        .await??;

    // === 3. Two partners race to accept the job; one wins ===
    let rival_id = Uuid::new_v4();
    let won = order_actor
        .send(AssignPartner {
            order_id: order.id,
            partner_id,
        })
        .await?;
    let lost = order_actor
        .send(AssignPartner {
            order_id: order.id,
            partner_id: rival_id,
        })
        .await?;
    tracing::info!(
        winner = won.is_ok(),
        loser_error = %lost.unwrap_err(),
        "Partner assignment race resolved"
    );

    // === 4. Pickup and delivery ===
    pace().await;
    order_actor
        .send(TransitionOrder {
            order_id: order.id,
            target: OrderStatus::PickedUp,
            actor: partner,
        })
        .await??;

    pace().await;
    let delivered = order_actor
        .send(TransitionOrder {
            order_id: order.id,
            target: OrderStatus::Delivered,
            actor: partner,
        })
        .await??;
    tracing::info!("✅ Order delivered: {} ({})", delivered.id, delivered.status);

    // === 5. A second order, cancelled by the customer before acceptance ===
    let second = order_actor
        .send(PlaceOrder {
            customer_id,
            store_id,
            items: vec![OrderItem {
                product_id: Uuid::new_v4(),
                quantity: 1,
                unit_price: 150,
            }],
        })
        .await??;

    pace().await;
    let cancelled = order_actor
        .send(CancelOrder {
            order_id: second.id,
            actor: ActorRef::customer(customer_id),
        })
        .await??;
    tracing::info!("✅ Order cancelled: {} ({})", cancelled.id, cancelled.status);

    // A closed order rejects further requests.
    let rejected = order_actor
        .send(TransitionOrder {
            order_id: second.id,
            target: OrderStatus::Accepted,
            actor: shop,
        })
        .await?;
    tracing::info!(error = %rejected.unwrap_err(), "Closed order rejected the shop");

    tracing::info!("🎉 Demo complete!");

    Ok(())
}

// Pacing for readable demo output only; the lifecycle core has no timers.
async fn pace() {
    tokio::time::sleep(tokio::time::Duration::from_millis(300)).await;
}
