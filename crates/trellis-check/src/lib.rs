//! Trellis Check - Error detection, classification and auto-fix
//!
//! This crate validates the component graph of a drag-and-drop canvas. It
//! classifies each problem with a fixed taxonomy, repairs the ones that can
//! be repaired without asking the user, and aggregates everything into a
//! report.
//!
//! The detectors and the fixer are pure functions over component values.
//! [`ErrorDetectionEngine`] wraps them in a per-session store keyed by
//! component id.

mod config;
mod engine;
mod fixer;
mod geometry;
mod integrity;
mod property;
mod report;
mod security;
mod taxonomy;

pub use config::EngineOptions;
pub use engine::{AnalysisOutcome, Detector, ErrorDetectionEngine};
pub use fixer::{AutoFixer, FixOutcome};
pub use geometry::{snap_to_grid, GeometryDetector};
pub use integrity::GraphIntegrityChecker;
pub use property::{is_absolute_url, PropertyValidator, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use report::{ErrorReport, ReportSummary};
pub use security::{sanitize_text, SecurityScanner, TEXT_PROPERTIES, URL_PROPERTIES};
pub use taxonomy::{Category, ErrorRecord, Rule, RuleDef, Severity};
