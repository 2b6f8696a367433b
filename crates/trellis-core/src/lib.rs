//! Trellis Core - Foundational types for the Trellis canvas checker
//!
//! This crate provides the types every other Trellis crate depends on:
//! - `ComponentId` - Stable component identifiers
//! - `Component`, `Properties` - The host builder's component model
//! - `ComponentGraph` - A canvas snapshot with parent-pointer relationships
//! - `CanvasBounds`, `Rect` - Canvas geometry
//! - Error types and Result alias

mod canvas;
mod component;
mod error;
mod graph;
mod id;
mod types;

pub use canvas::{load_canvas, load_canvas_str, CanvasFile, CanvasHeader};
pub use component::{Component, Properties};
pub use error::{Result, TrellisError};
pub use graph::ComponentGraph;
pub use id::ComponentId;
pub use types::{CanvasBounds, Rect};
