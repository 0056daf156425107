// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod elementwise;
mod plot_surface;

pub use elementwise::Elementwise;
pub use plot_surface::{
    LoggingSurface, NoOpSurface, PlotSeries, PlotSurface, RecordingSurface, RenderedSeries,
};
