//! Auto-fix transforms for fixable findings

use crate::config::EngineOptions;
use crate::geometry::{clamp_position, is_misaligned, is_out_of_bounds, snap_to_grid};
use crate::property::{
    default_button_text, has_invalid_dimensions, is_invalid_image_src, is_missing_required_text,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use crate::security::{contains_script_pattern, sanitize_text, TEXT_PROPERTIES};
use crate::taxonomy::{ErrorRecord, Rule};
use std::collections::BTreeSet;
use tracing::debug;
use trellis_core::{CanvasBounds, Component, Properties};

/// Order transforms run in. Size before position because clamping depends on
/// the final size; bounds before the grid so bounds wins a conflict.
const FIX_ORDER: [Rule; 6] = [
    Rule::Dimension,
    Rule::Bounds,
    Rule::Alignment,
    Rule::RequiredText,
    Rule::ImageUrl,
    Rule::Xss,
];

/// Result of one fix pass over a component
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// The corrected component. The input is never modified.
    pub component: Component,
    /// Records whose problem no longer holds on `component`
    pub fixed: Vec<ErrorRecord>,
    /// Records still describing a problem on `component`
    pub remaining: Vec<ErrorRecord>,
}

impl FixOutcome {
    /// A pass that leaves the component and its records untouched
    pub fn unchanged(component: &Component, errors: Vec<ErrorRecord>) -> Self {
        Self {
            component: component.clone(),
            fixed: Vec::new(),
            remaining: errors,
        }
    }
}

/// Applies pure, idempotent transforms for auto-fixable records
#[derive(Debug, Clone)]
pub struct AutoFixer {
    grid_size: f64,
    image_placeholder: String,
}

impl AutoFixer {
    pub fn new(grid_size: f64, image_placeholder: impl Into<String>) -> Self {
        Self {
            grid_size,
            image_placeholder: image_placeholder.into(),
        }
    }

    pub fn from_options(options: &EngineOptions) -> Self {
        Self::new(options.grid_size, options.image_placeholder.clone())
    }

    /// Fix what `errors` describe and split them into fixed and remaining.
    ///
    /// Only rules present among the fixable records are transformed. Each
    /// transform changes nothing when its problem is already gone, so running
    /// a pass on its own output is a no-op.
    pub fn apply(
        &self,
        component: &Component,
        errors: Vec<ErrorRecord>,
        bounds: &CanvasBounds,
    ) -> FixOutcome {
        let rules: BTreeSet<Rule> = errors
            .iter()
            .filter(|e| e.auto_fixable)
            .map(|e| e.rule)
            .collect();

        let mut props = component.properties.clone();
        for rule in FIX_ORDER.iter().filter(|r| rules.contains(*r)) {
            match rule {
                Rule::Dimension => self.fix_dimensions(&mut props, bounds),
                Rule::Bounds => self.fix_bounds(&mut props, bounds),
                Rule::Alignment => self.fix_alignment(component, &mut props, bounds),
                Rule::RequiredText => {
                    if is_missing_required_text(&component.with_properties(props.clone())) {
                        props.text = Some(default_button_text(&component.id));
                    }
                }
                Rule::ImageUrl => {
                    if is_invalid_image_src(&component.with_properties(props.clone())) {
                        props.src = Some(self.image_placeholder.clone());
                    }
                }
                Rule::Xss => {
                    for name in xss_targets(&errors) {
                        sanitize_property(&mut props, name);
                    }
                }
                _ => {}
            }
        }

        let fixed_component = component.with_properties(props);
        let (fixed, remaining): (Vec<_>, Vec<_>) = errors
            .into_iter()
            .partition(|e| e.auto_fixable && !self.still_violates(e, &fixed_component, bounds));

        FixOutcome {
            component: fixed_component,
            fixed,
            remaining,
        }
    }

    fn still_violates(
        &self,
        error: &ErrorRecord,
        component: &Component,
        bounds: &CanvasBounds,
    ) -> bool {
        let props = &component.properties;
        match error.rule {
            Rule::Dimension => has_invalid_dimensions(props),
            Rule::Bounds => is_out_of_bounds(props, bounds),
            Rule::Alignment => is_misaligned(props, self.grid_size),
            Rule::RequiredText => is_missing_required_text(component),
            Rule::ImageUrl => is_invalid_image_src(component),
            Rule::Xss => match error.property.as_deref() {
                Some(name) => props.get_str(name).is_some_and(contains_script_pattern),
                None => TEXT_PROPERTIES
                    .iter()
                    .any(|name| props.get_str(name).is_some_and(contains_script_pattern)),
            },
            // No transform exists for the rest
            _ => true,
        }
    }

    fn fix_alignment(&self, component: &Component, props: &mut Properties, bounds: &CanvasBounds) {
        let mut snapped = props.clone();
        snapped.x = snap_to_grid(props.x, self.grid_size);
        snapped.y = snap_to_grid(props.y, self.grid_size);

        if !is_out_of_bounds(props, bounds) && is_out_of_bounds(&snapped, bounds) {
            debug!(component = %component.id, "grid snap skipped, it would leave the canvas");
            return;
        }
        props.x = snapped.x;
        props.y = snapped.y;
    }

    /// Reset non-positive sizes. A component that was inside the canvas
    /// stays inside it after growing.
    fn fix_dimensions(&self, props: &mut Properties, bounds: &CanvasBounds) {
        let was_inside = !is_out_of_bounds(props, bounds);
        if props.width <= 0.0 {
            props.width = DEFAULT_WIDTH;
        }
        if props.height <= 0.0 {
            props.height = DEFAULT_HEIGHT;
        }
        if was_inside {
            self.fix_bounds(props, bounds);
        }
    }

    fn fix_bounds(&self, props: &mut Properties, bounds: &CanvasBounds) {
        if is_out_of_bounds(props, bounds) {
            let (x, y) = clamp_position(props, bounds, self.grid_size);
            props.x = x;
            props.y = y;
        }
    }
}

/// Text properties named by xss records; every text property if a record
/// names none
fn xss_targets(errors: &[ErrorRecord]) -> BTreeSet<&str> {
    let mut targets = BTreeSet::new();
    for error in errors.iter().filter(|e| e.rule == Rule::Xss) {
        match error.property.as_deref() {
            Some(name) => {
                targets.insert(name);
            }
            None => targets.extend(TEXT_PROPERTIES),
        }
    }
    targets
}

fn sanitize_property(props: &mut Properties, name: &str) {
    let Some(value) = props.get_str(name) else {
        return;
    };
    if contains_script_pattern(value) {
        let clean = sanitize_text(value);
        props.set_str(name, clean);
    }
}
