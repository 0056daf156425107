// ============================================================================
// Logging Bootstrap
// Optional tracing-subscriber setup for binaries, demos and benches
// ============================================================================

use tracing::Level;

/// Install a formatting subscriber at `level`. Returns false when a global
/// subscriber was already set.
pub fn init_tracing(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        let _ = init_tracing(Level::DEBUG);
        assert!(!init_tracing(Level::INFO));
    }
}
