// ============================================================================
// Order Domain - Business Logic for the Order Lifecycle
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderItem, OrderStatus, ActorRole)
// - Events (OrderPlaced, OrderAccepted, etc.)
// - Commands (Place, Transition, AssignPartner, Cancel)
// - Errors (OrderError enum)
// - Aggregate (Order with the transition table)
//
// Storage and observer wiring live outside the domain, in `store` and
// `controller`.
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
