//! Type-specific property invariants

use crate::taxonomy::{ErrorRecord, Rule};
use regex::Regex;
use std::sync::LazyLock;
use trellis_core::{Component, ComponentId, Properties};

pub const DEFAULT_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT: f64 = 40.0;

static URL_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(\S+)$").unwrap());

static AUTHORITY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^//[^/?#\s]+").unwrap());

/// Whether `value` parses as an absolute URL.
///
/// Hierarchical schemes need an authority (`https://host`); `file:` only
/// needs the `//` prefix. Other schemes (`mailto:`, `data:`) need any
/// non-empty body.
pub fn is_absolute_url(value: &str) -> bool {
    let Some(caps) = URL_SCHEME_REGEX.captures(value) else {
        return false;
    };
    let scheme = caps[1].to_ascii_lowercase();
    let rest = &caps[2];

    match scheme.as_str() {
        "http" | "https" | "ftp" | "ws" | "wss" => AUTHORITY_REGEX.is_match(rest),
        "file" => rest.starts_with("//"),
        _ => true,
    }
}

pub fn has_invalid_dimensions(props: &Properties) -> bool {
    props.width <= 0.0 || props.height <= 0.0
}

pub fn is_missing_required_text(component: &Component) -> bool {
    component.is_kind("button")
        && component
            .properties
            .text
            .as_deref()
            .map_or(true, |text| text.trim().is_empty())
}

/// An image `src` that is neither an absolute URL nor a root-relative path.
/// Absent or empty sources are left to the host.
pub fn is_invalid_image_src(component: &Component) -> bool {
    if !component.is_kind("image") {
        return false;
    }
    match component.properties.src.as_deref() {
        Some(src) if !src.is_empty() => !src.starts_with('/') && !is_absolute_url(src),
        _ => false,
    }
}

/// Label given to buttons whose text is empty
pub fn default_button_text(id: &ComponentId) -> String {
    format!("Button {}", id.prefix(4))
}

/// Checks type-specific property invariants. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyValidator;

impl PropertyValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run every property check for `component`
    pub fn validate(&self, component: &Component) -> Vec<ErrorRecord> {
        let mut errors = Vec::new();
        errors.extend(self.check_dimensions(component));
        errors.extend(self.check_required_text(component));
        errors.extend(self.check_image_url(component));
        errors
    }

    pub fn check_dimensions(&self, component: &Component) -> Option<ErrorRecord> {
        if !has_invalid_dimensions(&component.properties) {
            return None;
        }
        Some(
            ErrorRecord::new(
                Rule::Dimension,
                format!(
                    "Invalid component dimensions: {}x{}",
                    component.properties.width, component.properties.height
                ),
            )
            .for_component(&component.id),
        )
    }

    pub fn check_required_text(&self, component: &Component) -> Option<ErrorRecord> {
        if !is_missing_required_text(component) {
            return None;
        }
        Some(
            ErrorRecord::new(Rule::RequiredText, "Button text is empty")
                .for_component(&component.id)
                .on_property("text"),
        )
    }

    pub fn check_image_url(&self, component: &Component) -> Option<ErrorRecord> {
        if !is_invalid_image_src(component) {
            return None;
        }
        Some(
            ErrorRecord::new(Rule::ImageUrl, "Invalid image URL")
                .for_component(&component.id)
                .on_property("src"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Category, Severity};

    fn button(text: Option<&str>) -> Component {
        let mut props = Properties::new(0.0, 0.0, 100.0, 40.0);
        props.text = text.map(str::to_string);
        Component::new("btn-1234", "button", props)
    }

    fn image(src: &str) -> Component {
        Component::new(
            "img",
            "image",
            Properties::new(0.0, 0.0, 64.0, 64.0).with_str("src", src),
        )
    }

    #[test]
    fn test_absolute_urls() {
        assert!(is_absolute_url("https://example.com/a.png"));
        assert!(is_absolute_url("HTTP://example.com"));
        assert!(is_absolute_url("file:///tmp/a.png"));
        assert!(is_absolute_url("data:image/png;base64,AAAA"));
        assert!(is_absolute_url("mailto:someone@example.com"));

        assert!(!is_absolute_url("images/a.png"));
        assert!(!is_absolute_url("https://"));
        assert!(!is_absolute_url("https:example.com"));
        assert!(!is_absolute_url("not a url"));
        assert!(!is_absolute_url(""));
    }

    #[test]
    fn test_dimensions() {
        let validator = PropertyValidator::new();
        let mut c = button(Some("OK"));
        assert!(validator.check_dimensions(&c).is_none());

        c.properties.height = 0.0;
        let record = validator.check_dimensions(&c).unwrap();
        assert_eq!(record.category, Category::Logic);
        assert_eq!(record.subcategory, "dimension");
        assert_eq!(record.severity, Severity::High);
        assert!(record.auto_fixable);
    }

    #[test]
    fn test_required_text() {
        let validator = PropertyValidator::new();
        assert!(validator.check_required_text(&button(Some("Save"))).is_none());
        assert!(validator.check_required_text(&button(None)).is_some());

        let record = validator.check_required_text(&button(Some("   "))).unwrap();
        assert_eq!(record.subcategory, "property");
        assert_eq!(record.severity, Severity::Medium);
        assert_eq!(record.property.as_deref(), Some("text"));
    }

    #[test]
    fn test_required_text_only_for_buttons() {
        let mut c = button(None);
        c.kind = "label".to_string();
        assert!(PropertyValidator::new().check_required_text(&c).is_none());
    }

    #[test]
    fn test_image_url() {
        let validator = PropertyValidator::new();
        assert!(validator.check_image_url(&image("/assets/logo.png")).is_none());
        assert!(validator.check_image_url(&image("https://cdn.example.com/logo.png")).is_none());
        assert!(validator.check_image_url(&image("")).is_none());

        let record = validator.check_image_url(&image("logo.png")).unwrap();
        assert_eq!(record.subcategory, "property");
        assert_eq!(record.severity, Severity::High);
        assert!(record.auto_fixable);
    }

    #[test]
    fn test_default_button_text() {
        assert_eq!(default_button_text(&ComponentId::from("c1")), "Button c1");
        assert_eq!(default_button_text(&ComponentId::from("btn-1234")), "Button btn-");
    }

    #[test]
    fn test_validate_is_repeatable() {
        let validator = PropertyValidator::new();
        let mut c = button(Some(""));
        c.properties.width = -1.0;

        let first: Vec<String> = validator.validate(&c).iter().map(|e| e.fingerprint()).collect();
        let second: Vec<String> = validator.validate(&c).iter().map(|e| e.fingerprint()).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }
}
