// ============================================================================
// Domain Layer - Aggregates and Business Rules
// ============================================================================

pub mod order;
