//! Error taxonomy: the closed vocabulary of findings

use serde::{Deserialize, Serialize};
use std::fmt;
use trellis_core::ComponentId;
use uuid::Uuid;

/// Broad classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Ui,
    Logic,
    Integration,
    Security,
    Performance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ui => "UI",
            Category::Logic => "LOGIC",
            Category::Integration => "INTEGRATION",
            Category::Security => "SECURITY",
            Category::Performance => "PERFORMANCE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a finding, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The concrete check that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    Bounds,
    Overlap,
    Alignment,
    NearAlignment,
    Dimension,
    RequiredText,
    ImageUrl,
    Xss,
    UnsafeUrl,
    Orphan,
    CircularDependency,
}

/// Static classification attached to every rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef {
    pub category: Category,
    pub subcategory: &'static str,
    pub severity: Severity,
    pub auto_fixable: bool,
    pub suggested_fix: &'static str,
}

impl Rule {
    pub const ALL: [Rule; 11] = [
        Rule::Bounds,
        Rule::Overlap,
        Rule::Alignment,
        Rule::NearAlignment,
        Rule::Dimension,
        Rule::RequiredText,
        Rule::ImageUrl,
        Rule::Xss,
        Rule::UnsafeUrl,
        Rule::Orphan,
        Rule::CircularDependency,
    ];

    pub fn def(&self) -> RuleDef {
        use Category::*;
        use Severity::*;

        let (category, subcategory, severity, auto_fixable, suggested_fix) = match self {
            Rule::Bounds => (Ui, "bounds", Medium, true, "Reposition component within canvas bounds"),
            Rule::Overlap => (Ui, "overlap", Medium, false, "Adjust component position to prevent overlap"),
            Rule::Alignment => (Ui, "alignment", Low, true, "Snap component to the nearest grid point"),
            Rule::NearAlignment => (Ui, "near-alignment", Low, false, "Line the component up with its neighbor"),
            Rule::Dimension => (Logic, "dimension", High, true, "Reset component to default dimensions"),
            Rule::RequiredText => (Logic, "property", Medium, true, "Set default button text"),
            Rule::ImageUrl => (Logic, "property", High, true, "Reset to default image or fix URL"),
            Rule::Xss => (Security, "xss", Critical, true, "Sanitize text content to remove script tags and event handlers"),
            Rule::UnsafeUrl => (Security, "url", High, false, "Use standard HTTP/HTTPS URLs or image data URLs only"),
            Rule::Orphan => (Logic, "orphan", High, false, "Remove parent reference or create parent component"),
            Rule::CircularDependency => (Logic, "circular-dependency", Critical, false, "Break circular dependency by removing one relationship"),
        };

        RuleDef {
            category,
            subcategory,
            severity,
            auto_fixable,
            suggested_fix,
        }
    }
}

/// A classified description of one detected problem.
///
/// Records are immutable once created. Fixing a problem moves its record
/// from the remaining set to the fixed set; it is never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub id: String,
    pub rule: Rule,
    pub category: Category,
    pub subcategory: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    pub auto_fixable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<ComponentId>,
    /// Property the finding concerns, for per-property text and URL checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl ErrorRecord {
    /// Create a record classified by `rule`
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        let def = rule.def();
        Self {
            id: format!("{}-{}-{}", def.category, def.subcategory, Uuid::new_v4().simple()),
            rule,
            category: def.category,
            subcategory: def.subcategory.to_string(),
            severity: def.severity,
            message: message.into(),
            suggested_fix: Some(def.suggested_fix.to_string()),
            auto_fixable: def.auto_fixable,
            component_id: None,
            property: None,
        }
    }

    pub fn for_component(mut self, id: &ComponentId) -> Self {
        self.component_id = Some(id.clone());
        self
    }

    pub fn on_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Id-free key identifying what was found and where.
    ///
    /// Two passes over an unchanged canvas produce the same fingerprints.
    pub fn fingerprint(&self) -> String {
        let mut key = format!("{}/{}", self.category, self.subcategory);
        if let Some(id) = &self.component_id {
            key.push('@');
            key.push_str(id.as_str());
        }
        if let Some(property) = &self.property {
            key.push('#');
            key.push_str(property);
        }
        key
    }
}
