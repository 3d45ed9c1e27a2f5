// ============================================================================
// Store - In-Memory Order Repository
// ============================================================================

pub mod order_store;

pub use order_store::OrderStore;
