//! Canvas snapshot loading from TOML files

use crate::component::Component;
use crate::error::Result;
use crate::graph::ComponentGraph;
use crate::types::CanvasBounds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root structure of a canvas TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasFile {
    pub canvas: CanvasHeader,
    #[serde(default, rename = "component")]
    pub components: Vec<Component>,
}

/// Canvas dimensions and optional metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasHeader {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl CanvasHeader {
    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.width, self.height)
    }
}

/// Load a canvas snapshot from a TOML file
pub fn load_canvas<P: AsRef<Path>>(path: P) -> Result<(ComponentGraph, CanvasBounds)> {
    let content = fs::read_to_string(path)?;
    load_canvas_str(&content)
}

/// Load a canvas snapshot from a TOML string
pub fn load_canvas_str(content: &str) -> Result<(ComponentGraph, CanvasBounds)> {
    let file: CanvasFile = toml::from_str(content)?;
    let bounds = file.canvas.bounds();
    bounds.validate()?;
    let graph = ComponentGraph::from_components(file.components)?;
    Ok((graph, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrellisError;
    use crate::id::ComponentId;

    fn sample_toml() -> &'static str {
        r#"
[canvas]
width = 800
height = 600
name = "checkout"

[[component]]
id = "root"
type = "container"
[component.properties]
x = 0
y = 0
width = 800
height = 600

[[component]]
id = "c1"
type = "button"
parent = "root"
[component.properties]
x = 16
y = 24.5
width = 100
height = 40
text = "Pay"
placeholder = "ignored for buttons"
"#
    }

    #[test]
    fn test_load_canvas_from_string() {
        let (graph, bounds) = load_canvas_str(sample_toml()).unwrap();
        assert_eq!(bounds, CanvasBounds::new(800.0, 600.0));
        assert_eq!(graph.len(), 2);

        let button = graph.get(&ComponentId::from("c1")).unwrap();
        assert_eq!(button.kind, "button");
        assert_eq!(button.parent, Some(ComponentId::from("root")));
        assert_eq!(button.properties.x, 16.0);
        assert_eq!(button.properties.y, 24.5);
        assert_eq!(button.properties.get_str("text"), Some("Pay"));
        assert_eq!(
            button.properties.get_str("placeholder"),
            Some("ignored for buttons")
        );
    }

    #[test]
    fn test_rejects_degenerate_canvas() {
        let toml_str = r#"
[canvas]
width = 0
height = 600
"#;
        assert!(matches!(
            load_canvas_str(toml_str),
            Err(TrellisError::InvalidCanvasBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            load_canvas_str("[canvas\nwidth = 1"),
            Err(TrellisError::TomlParseError(_))
        ));
    }

    #[test]
    fn test_missing_geometry_is_a_parse_error() {
        let toml_str = r#"
[canvas]
width = 800
height = 600

[[component]]
id = "c1"
type = "button"
[component.properties]
x = 0
"#;
        assert!(matches!(
            load_canvas_str(toml_str),
            Err(TrellisError::TomlParseError(_))
        ));
    }
}
