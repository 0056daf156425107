// ============================================================================
// Plot Surface Interface
// Defines the contract for drawing unit-aware data series
// ============================================================================

use crate::domain::{PhysicalType, Quantity, Unit, UnitError, UnitResult};
use parking_lot::Mutex;

/// Two quantities to be drawn against each other, with optional display
/// units for each axis.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    x: Quantity,
    y: Quantity,
    x_unit: Option<Unit>,
    y_unit: Option<Unit>,
    label: Option<String>,
}

impl PlotSeries {
    /// # Errors
    /// `ShapeMismatch` when the two quantities hold different element counts.
    pub fn new(x: &Quantity, y: &Quantity) -> UnitResult<Self> {
        if x.len() != y.len() {
            return Err(UnitError::ShapeMismatch {
                left: x.shape().to_vec(),
                right: y.shape().to_vec(),
            });
        }
        Ok(Self {
            x: x.clone(),
            y: y.clone(),
            x_unit: None,
            y_unit: None,
            label: None,
        })
    }

    /// Display the x axis in `unit`; must be directly convertible.
    pub fn with_x_unit(mut self, unit: Unit) -> UnitResult<Self> {
        self.x.to(&unit)?;
        self.x_unit = Some(unit);
        Ok(self)
    }

    pub fn with_y_unit(mut self, unit: Unit) -> UnitResult<Self> {
        self.y.to(&unit)?;
        self.y_unit = Some(unit);
        Ok(self)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x_axis_unit(&self) -> &Unit {
        self.x_unit.as_ref().unwrap_or_else(|| self.x.unit())
    }

    pub fn y_axis_unit(&self) -> &Unit {
        self.y_unit.as_ref().unwrap_or_else(|| self.y.unit())
    }

    pub fn x_values(&self) -> UnitResult<Vec<f64>> {
        Ok(self.x.to_value(self.x_axis_unit())?.as_slice().to_vec())
    }

    pub fn y_values(&self) -> UnitResult<Vec<f64>> {
        Ok(self.y.to_value(self.y_axis_unit())?.as_slice().to_vec())
    }

    /// `"<physical type> [<unit>]"`
    pub fn x_label(&self) -> String {
        axis_label(self.x_axis_unit())
    }

    pub fn y_label(&self) -> String {
        axis_label(self.y_axis_unit())
    }
}

fn axis_label(unit: &Unit) -> String {
    let physical_type = PhysicalType::of(unit);
    let symbol = unit.to_string();
    if symbol.is_empty() {
        physical_type.name().to_string()
    } else {
        format!("{} [{}]", physical_type.name(), symbol)
    }
}

/// A series after unit conversion, as a surface receives it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSeries {
    pub label: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl RenderedSeries {
    pub fn from_series(series: &PlotSeries) -> UnitResult<Self> {
        Ok(Self {
            label: series.label.clone(),
            x_label: series.x_label(),
            y_label: series.y_label(),
            x: series.x_values()?,
            y: series.y_values()?,
        })
    }
}

/// Drawing backend for plot series
/// Implementations can render, log, record, etc.
pub trait PlotSurface: Send + Sync {
    fn name(&self) -> &str;

    /// Draw one series
    fn draw(&self, series: &PlotSeries) -> UnitResult<()>;

    /// Draw several series onto the same surface
    fn draw_all(&self, series: &[PlotSeries]) -> UnitResult<()> {
        for s in series {
            self.draw(s)?;
        }
        Ok(())
    }
}

/// Surface that discards everything
pub struct NoOpSurface;

impl PlotSurface for NoOpSurface {
    fn name(&self) -> &str {
        "noop"
    }

    fn draw(&self, _series: &PlotSeries) -> UnitResult<()> {
        Ok(())
    }
}

/// Surface that logs each series
pub struct LoggingSurface;

impl PlotSurface for LoggingSurface {
    fn name(&self) -> &str {
        "logging"
    }

    fn draw(&self, series: &PlotSeries) -> UnitResult<()> {
        let rendered = RenderedSeries::from_series(series)?;
        tracing::info!(
            label = rendered.label.as_deref().unwrap_or(""),
            x_axis = %rendered.x_label,
            y_axis = %rendered.y_label,
            points = rendered.x.len(),
            "Plot series"
        );
        Ok(())
    }
}

/// Surface that keeps every rendered series, for inspection
#[derive(Default)]
pub struct RecordingSurface {
    drawn: Mutex<Vec<RenderedSeries>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> Vec<RenderedSeries> {
        self.drawn.lock().clone()
    }

    pub fn clear(&self) {
        self.drawn.lock().clear();
    }
}

impl PlotSurface for RecordingSurface {
    fn name(&self) -> &str {
        "recording"
    }

    fn draw(&self, series: &PlotSeries) -> UnitResult<()> {
        let rendered = RenderedSeries::from_series(series)?;
        self.drawn.lock().push(rendered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::unit;

    fn series() -> PlotSeries {
        let t = Quantity::new(vec![0.0, 1.0, 2.0], unit("s").unwrap());
        let d = Quantity::new(vec![0.0, 1500.0, 3000.0], unit("m").unwrap());
        PlotSeries::new(&t, &d).unwrap()
    }

    #[test]
    fn test_axis_labels() {
        let s = series().with_y_unit(unit("km").unwrap()).unwrap();
        assert_eq!(s.x_label(), "time [s]");
        assert_eq!(s.y_label(), "length [km]");
        assert_eq!(s.y_values().unwrap(), vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn test_incompatible_axis_unit() {
        assert!(matches!(
            series().with_x_unit(unit("kg").unwrap()),
            Err(UnitError::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let a = Quantity::new(vec![1.0, 2.0], unit("s").unwrap());
        let b = Quantity::new(vec![1.0], unit("m").unwrap());
        assert!(matches!(
            PlotSeries::new(&a, &b),
            Err(UnitError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_noop_and_logging_surfaces() {
        let s = series();
        assert!(NoOpSurface.draw(&s).is_ok());
        assert!(LoggingSurface.draw(&s).is_ok());
    }

    #[test]
    fn test_recording_surface() {
        let surface = RecordingSurface::new();
        surface
            .draw_all(&[series().with_label("ballistic"), series()])
            .unwrap();
        let drawn = surface.drawn();
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].label.as_deref(), Some("ballistic"));
        assert_eq!(drawn[0].x, vec![0.0, 1.0, 2.0]);
        surface.clear();
        assert!(surface.drawn().is_empty());
    }
}
