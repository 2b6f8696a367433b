//! Geometric checks: canvas bounds, sibling overlap and grid alignment

use crate::config::EngineOptions;
use crate::taxonomy::{ErrorRecord, Rule};
use trellis_core::{CanvasBounds, Component, ComponentGraph, Properties};

/// Checks a component's position and size against the canvas and its peers
#[derive(Debug, Clone)]
pub struct GeometryDetector {
    grid_size: f64,
    near_alignment_tolerance: Option<f64>,
}

impl GeometryDetector {
    pub fn new(grid_size: f64) -> Self {
        Self {
            grid_size,
            near_alignment_tolerance: None,
        }
    }

    pub fn from_options(options: &EngineOptions) -> Self {
        Self {
            grid_size: options.grid_size,
            near_alignment_tolerance: options
                .near_alignment_warnings
                .then_some(options.near_alignment_tolerance),
        }
    }

    /// Enable the soft near-alignment signal
    pub fn with_near_alignment(mut self, tolerance: f64) -> Self {
        self.near_alignment_tolerance = Some(tolerance);
        self
    }

    /// Run every geometric check for `component` against the rest of `graph`
    pub fn detect(
        &self,
        component: &Component,
        graph: &ComponentGraph,
        bounds: &CanvasBounds,
    ) -> Vec<ErrorRecord> {
        let mut errors = Vec::new();
        errors.extend(self.check_bounds(component, bounds));
        errors.extend(self.check_overlap(component, graph.others(&component.id)));
        errors.extend(self.check_alignment(component));
        if self.near_alignment_tolerance.is_some() {
            errors.extend(self.check_near_alignment(component, graph.others(&component.id)));
        }
        errors
    }

    pub fn check_bounds(&self, component: &Component, bounds: &CanvasBounds) -> Option<ErrorRecord> {
        if !is_out_of_bounds(&component.properties, bounds) {
            return None;
        }
        Some(
            ErrorRecord::new(Rule::Bounds, "Component positioned outside canvas bounds")
                .for_component(&component.id),
        )
    }

    /// Bounding-box intersection against every other component. One record
    /// counts all overlapping peers. Peers with non-finite geometry are
    /// skipped; they fault on their own detection call.
    pub fn check_overlap<'a, I>(&self, component: &Component, others: I) -> Option<ErrorRecord>
    where
        I: IntoIterator<Item = &'a Component>,
    {
        let rect = component.properties.rect();
        let overlapping = others
            .into_iter()
            .filter(|other| other.id != component.id)
            .map(|other| other.properties.rect())
            .filter(|peer| peer.is_finite() && rect.intersects(peer))
            .count();

        if overlapping == 0 {
            return None;
        }
        Some(
            ErrorRecord::new(
                Rule::Overlap,
                format!("Component overlapping with {} other component(s)", overlapping),
            )
            .for_component(&component.id),
        )
    }

    pub fn check_alignment(&self, component: &Component) -> Option<ErrorRecord> {
        if !is_misaligned(&component.properties, self.grid_size) {
            return None;
        }
        Some(
            ErrorRecord::new(
                Rule::Alignment,
                format!("Component is not aligned to the {}px grid", self.grid_size),
            )
            .for_component(&component.id),
        )
    }

    /// Soft warning for a grid-aligned component sitting within the tolerance
    /// of a neighbor's edge without matching it exactly
    pub fn check_near_alignment<'a, I>(&self, component: &Component, others: I) -> Option<ErrorRecord>
    where
        I: IntoIterator<Item = &'a Component>,
    {
        let tolerance = self.near_alignment_tolerance?;
        let props = &component.properties;
        if is_misaligned(props, self.grid_size) {
            return None;
        }

        let near = |a: f64, b: f64| {
            let diff = (a - b).abs();
            diff > 0.0 && diff <= tolerance
        };
        let count = others
            .into_iter()
            .filter(|other| other.id != component.id)
            .filter(|other| near(props.x, other.properties.x) || near(props.y, other.properties.y))
            .count();

        if count == 0 {
            return None;
        }
        Some(
            ErrorRecord::new(
                Rule::NearAlignment,
                format!("Component is nearly aligned with {} neighbor(s)", count),
            )
            .for_component(&component.id),
        )
    }
}

pub fn is_out_of_bounds(props: &Properties, bounds: &CanvasBounds) -> bool {
    !bounds.contains(&props.rect())
}

pub fn is_misaligned(props: &Properties, grid_size: f64) -> bool {
    props.x % grid_size != 0.0 || props.y % grid_size != 0.0
}

/// Clamp a position so the rectangle starts inside the canvas and, when it
/// fits, ends inside it too.
///
/// Pulling back from the far edge lands on the last grid line that still
/// fits, so a clamped component never becomes misaligned.
pub fn clamp_position(props: &Properties, bounds: &CanvasBounds, grid_size: f64) -> (f64, f64) {
    let x = clamp_axis(props.x, props.width, bounds.width, grid_size);
    let y = clamp_axis(props.y, props.height, bounds.height, grid_size);
    (x, y)
}

fn clamp_axis(position: f64, size: f64, extent: f64, grid_size: f64) -> f64 {
    let far = extent - size;
    if position > far {
        return ((far / grid_size).floor() * grid_size).max(0.0);
    }
    position.max(0.0)
}

/// Nearest grid multiple, rounding halves up
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    (value / grid_size + 0.5).floor() * grid_size
}
