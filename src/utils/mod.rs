// ============================================================================
// Utilities Module
// Process-level helpers that sit outside the quantity model
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::init_tracing;
