// ============================================================================
// Actors - Serialized Request Dispatch
// ============================================================================

pub mod order_actor;

pub use order_actor::{
    AssignPartner, CancelOrder, GetOrder, OrderActor, PlaceOrder, TransitionOrder,
};
