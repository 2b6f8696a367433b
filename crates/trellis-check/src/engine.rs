//! Stateful detection session

use crate::config::EngineOptions;
use crate::fixer::{AutoFixer, FixOutcome};
use crate::geometry::GeometryDetector;
use crate::integrity::GraphIntegrityChecker;
use crate::property::PropertyValidator;
use crate::report::ErrorReport;
use crate::security::SecurityScanner;
use crate::taxonomy::ErrorRecord;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};
use trellis_core::{CanvasBounds, Component, ComponentGraph, ComponentId, Result, TrellisError};
use uuid::Uuid;

/// Which detector produced a group of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Detector {
    Geometry,
    Property,
    Security,
}

impl Detector {
    fn name(&self) -> &'static str {
        match self {
            Detector::Geometry => "geometry",
            Detector::Property => "property",
            Detector::Security => "security",
        }
    }
}

/// Remaining records for one component, one slot per detector.
///
/// A detector call replaces its own slot, so repeating a call on an
/// unchanged component leaves the same records behind.
#[derive(Debug, Clone, Default)]
struct ComponentErrors {
    slots: BTreeMap<Detector, Vec<ErrorRecord>>,
}

impl ComponentErrors {
    fn set(&mut self, detector: Detector, errors: Vec<ErrorRecord>) {
        self.slots.insert(detector, errors);
    }

    fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.slots.values().flatten()
    }

    fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }

    fn remove_ids(&mut self, ids: &HashSet<&str>) {
        for errors in self.slots.values_mut() {
            errors.retain(|e| !ids.contains(e.id.as_str()));
        }
    }
}

/// Result of a full analysis pass
#[derive(Debug, Default)]
pub struct AnalysisOutcome {
    /// Remaining per-component records after the pass
    pub errors: usize,
    pub silent_failures: usize,
    /// Components that could not be analyzed, with the reason
    pub faults: Vec<(ComponentId, TrellisError)>,
}

impl AnalysisOutcome {
    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// One analysis session over a component graph.
///
/// Holds the remaining and fixed records per component plus the graph-level
/// silent failures. Sessions are independent; use one engine per graph being
/// analyzed.
#[derive(Debug)]
pub struct ErrorDetectionEngine {
    options: EngineOptions,
    geometry: GeometryDetector,
    properties: PropertyValidator,
    security: SecurityScanner,
    integrity: GraphIntegrityChecker,
    fixer: AutoFixer,
    session_id: Uuid,
    detected: BTreeMap<ComponentId, ComponentErrors>,
    fixed: BTreeMap<ComponentId, Vec<ErrorRecord>>,
    silent_failures: Vec<ErrorRecord>,
}

impl Default for ErrorDetectionEngine {
    fn default() -> Self {
        Self::build(EngineOptions::default())
    }
}

impl ErrorDetectionEngine {
    /// Create an engine, rejecting invalid options
    pub fn new(options: EngineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: EngineOptions) -> Self {
        Self {
            geometry: GeometryDetector::from_options(&options),
            properties: PropertyValidator::new(),
            security: SecurityScanner::new(),
            integrity: GraphIntegrityChecker::new(),
            fixer: AutoFixer::from_options(&options),
            options,
            session_id: Uuid::new_v4(),
            detected: BTreeMap::new(),
            fixed: BTreeMap::new(),
            silent_failures: Vec::new(),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Identity of the current session. A new one starts on `clear` and on
    /// every `analyze` pass.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Bounds, overlap and alignment checks for a component being moved or
    /// dropped
    pub fn detect_drag_drop_errors(
        &mut self,
        component: &Component,
        graph: &ComponentGraph,
        bounds: &CanvasBounds,
    ) -> Result<Vec<ErrorRecord>> {
        component.validate()?;
        bounds.validate()?;
        let errors = self.geometry.detect(component, graph, bounds);
        self.store(component, Detector::Geometry, &errors);
        Ok(errors)
    }

    /// Dimension, required-text and image-URL checks
    pub fn detect_property_errors(&mut self, component: &Component) -> Result<Vec<ErrorRecord>> {
        component.validate()?;
        let errors = self.properties.validate(component);
        self.store(component, Detector::Property, &errors);
        Ok(errors)
    }

    /// Injection and unsafe-URL scan. Returns nothing when scanning is
    /// disabled.
    pub fn detect_security_issues(&mut self, component: &Component) -> Result<Vec<ErrorRecord>> {
        if !self.options.security_scan_enabled {
            return Ok(Vec::new());
        }
        component.validate()?;
        let errors = self.security.scan(component);
        self.store(component, Detector::Security, &errors);
        Ok(errors)
    }

    /// Orphan and cycle detection over the whole graph. Replaces the
    /// previous silent failures. Returns nothing when reporting is disabled.
    pub fn detect_silent_failures(&mut self, graph: &ComponentGraph) -> Vec<ErrorRecord> {
        if !self.options.report_silent_failures {
            return Vec::new();
        }
        let errors = self.integrity.check(graph);
        debug!(
            components = graph.len(),
            errors = errors.len(),
            "silent failure scan"
        );
        self.silent_failures = errors.clone();
        errors
    }

    /// Fix what was detected for `component` and move resolved records to
    /// the fixed set.
    ///
    /// Returns the corrected component; the host swaps it into its graph.
    /// With auto-fix disabled the component comes back unchanged.
    pub fn auto_fix_errors(
        &mut self,
        component: &Component,
        bounds: &CanvasBounds,
    ) -> Result<FixOutcome> {
        component.validate()?;
        bounds.validate()?;

        let current = self.errors_for(&component.id);
        if !self.options.enable_auto_fix {
            return Ok(FixOutcome::unchanged(component, current));
        }

        let outcome = self.fixer.apply(component, current, bounds);
        debug!(
            component = %component.id,
            fixed = outcome.fixed.len(),
            remaining = outcome.remaining.len(),
            "auto-fix pass"
        );

        if !outcome.fixed.is_empty() {
            let fixed_ids: HashSet<&str> = outcome.fixed.iter().map(|e| e.id.as_str()).collect();
            if let Some(entry) = self.detected.get_mut(&component.id) {
                entry.remove_ids(&fixed_ids);
            }
            self.fixed
                .entry(component.id.clone())
                .or_default()
                .extend(outcome.fixed.iter().cloned());
        }

        Ok(outcome)
    }

    /// Assemble a report from the current session state. Read-only.
    pub fn generate_report(&self) -> ErrorReport {
        let detected = self
            .detected
            .values()
            .flat_map(ComponentErrors::iter)
            .cloned()
            .collect();
        let fixed = self.fixed.values().flatten().cloned().collect();
        ErrorReport::new(self.session_id, detected, fixed, self.silent_failures.clone())
    }

    /// Report limited to one component: its remaining and fixed records and
    /// the silent failures attributed to it. Read-only.
    pub fn generate_component_report(&self, id: &ComponentId) -> ErrorReport {
        let silent_failures = self
            .silent_failures
            .iter()
            .filter(|e| e.component_id.as_ref() == Some(id))
            .cloned()
            .collect();
        ErrorReport::new(
            self.session_id,
            self.errors_for(id),
            self.fixed_for(id).to_vec(),
            silent_failures,
        )
        .for_component(id)
    }

    /// Rebuild the session from scratch: every detector on every component,
    /// then the graph-level scan.
    ///
    /// A component that faults is skipped and listed in the outcome; the
    /// rest of the graph is still analyzed.
    pub fn analyze(
        &mut self,
        graph: &ComponentGraph,
        bounds: &CanvasBounds,
    ) -> Result<AnalysisOutcome> {
        bounds.validate()?;
        self.clear();

        let mut outcome = AnalysisOutcome::default();
        for component in graph.iter() {
            if let Err(err) = self.analyze_component(component, graph, bounds) {
                warn!(component = %component.id, error = %err, "component analysis failed");
                outcome.faults.push((component.id.clone(), err));
            }
        }

        outcome.silent_failures = self.detect_silent_failures(graph).len();
        outcome.errors = self.detected.values().map(|e| e.iter().count()).sum();
        info!(
            components = graph.len(),
            errors = outcome.errors,
            silent_failures = outcome.silent_failures,
            faults = outcome.faults.len(),
            "analysis pass complete"
        );
        Ok(outcome)
    }

    fn analyze_component(
        &mut self,
        component: &Component,
        graph: &ComponentGraph,
        bounds: &CanvasBounds,
    ) -> Result<()> {
        self.detect_drag_drop_errors(component, graph, bounds)?;
        self.detect_property_errors(component)?;
        self.detect_security_issues(component)?;
        Ok(())
    }

    /// Remaining records for a component, in detector order
    pub fn errors_for(&self, id: &ComponentId) -> Vec<ErrorRecord> {
        self.detected
            .get(id)
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Records fixed for a component during this session
    pub fn fixed_for(&self, id: &ComponentId) -> &[ErrorRecord] {
        self.fixed.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop all state for a component the host has deleted
    pub fn forget(&mut self, id: &ComponentId) {
        self.detected.remove(id);
        self.fixed.remove(id);
    }

    /// Reset the session
    pub fn clear(&mut self) {
        self.session_id = Uuid::new_v4();
        self.detected.clear();
        self.fixed.clear();
        self.silent_failures.clear();
    }

    fn store(&mut self, component: &Component, detector: Detector, errors: &[ErrorRecord]) {
        debug!(
            component = %component.id,
            detector = detector.name(),
            errors = errors.len(),
            "detector run"
        );
        let entry = self.detected.entry(component.id.clone()).or_default();
        entry.set(detector, errors.to_vec());
        if entry.is_empty() {
            self.detected.remove(&component.id);
        }
    }
}
