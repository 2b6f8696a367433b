//! The host builder's component model

use crate::error::{Result, TrellisError};
use crate::id::ComponentId;
use crate::types::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positional and type-specific properties of a component.
///
/// Geometry is always present. `text` and `src` are typed because the checker
/// reasons about them directly; any other property lands in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Properties {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl Properties {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    /// Bounding rectangle of the component
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Read a string-valued property by name.
    ///
    /// Returns `None` when the property is absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match name {
            "text" => self.text.as_deref(),
            "src" => self.src.as_deref(),
            _ => self.extra.get(name).and_then(|v| v.as_str()),
        }
    }

    /// Write a string-valued property by name
    pub fn set_str(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "text" => self.text = Some(value),
            "src" => self.src = Some(value),
            _ => {
                self.extra
                    .insert(name.to_string(), toml::Value::String(value));
            }
        }
    }

    /// Builder-style variant of [`Properties::set_str`]
    pub fn with_str(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_str(name, value);
        self
    }
}

/// A positioned, typed element on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ComponentId>,
}

impl Component {
    pub fn new(id: impl Into<ComponentId>, kind: impl Into<String>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            properties,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ComponentId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Return a copy of this component carrying `properties`
    pub fn with_properties(&self, properties: Properties) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind.clone(),
            properties,
            parent: self.parent.clone(),
        }
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Check the fields every detector relies on.
    ///
    /// Optional properties are never checked here; a missing `text` is a
    /// finding, not a fault.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(TrellisError::EmptyComponentId);
        }

        let p = &self.properties;
        for (field, value) in [
            ("x", p.x),
            ("y", p.y),
            ("width", p.width),
            ("height", p.height),
        ] {
            if !value.is_finite() {
                return Err(TrellisError::NonFiniteGeometry {
                    id: self.id.to_string(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_typed_properties() {
        let mut props = Properties::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(props.get_str("text"), None);

        props.set_str("text", "Save");
        props.set_str("alt", "logo");
        assert_eq!(props.get_str("text"), Some("Save"));
        assert_eq!(props.text.as_deref(), Some("Save"));
        assert_eq!(props.get_str("alt"), Some("logo"));
    }

    #[test]
    fn test_non_string_extra_is_not_a_string() {
        let mut props = Properties::new(0.0, 0.0, 10.0, 10.0);
        props
            .extra
            .insert("title".to_string(), toml::Value::Integer(3));
        assert_eq!(props.get_str("title"), None);
    }

    #[test]
    fn test_with_properties_does_not_touch_original() {
        let original = Component::new("c1", "button", Properties::new(0.0, 0.0, 10.0, 10.0));
        let mut props = original.properties.clone();
        props.x = 16.0;

        let updated = original.with_properties(props);
        assert_eq!(original.properties.x, 0.0);
        assert_eq!(updated.properties.x, 16.0);
        assert_eq!(updated.id, original.id);
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let c = Component::new("", "button", Properties::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(c.validate(), Err(TrellisError::EmptyComponentId)));
    }

    #[test]
    fn test_validate_rejects_nan_geometry() {
        let c = Component::new("c1", "button", Properties::new(f64::NAN, 0.0, 10.0, 10.0));
        assert!(matches!(
            c.validate(),
            Err(TrellisError::NonFiniteGeometry { field: "x", .. })
        ));
    }

    #[test]
    fn test_validate_accepts_negative_geometry() {
        // Negative positions and sizes are findings, not faults
        let c = Component::new("c1", "button", Properties::new(-10.0, 0.0, -5.0, 10.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_json_shape_uses_type_key() {
        let c = Component::new("c1", "image", Properties::new(0.0, 0.0, 10.0, 10.0))
            .with_parent("root");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["parent"], "root");
        assert_eq!(json["properties"]["width"], 10.0);
    }
}
