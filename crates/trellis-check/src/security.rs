//! Injection and unsafe-URL scanning of component properties

use crate::taxonomy::{ErrorRecord, Rule};
use regex::Regex;
use std::sync::LazyLock;
use trellis_core::Component;

/// Properties rendered as text
pub const TEXT_PROPERTIES: [&str; 4] = ["text", "placeholder", "alt", "title"];

/// Properties holding a resource location
pub const URL_PROPERTIES: [&str; 3] = ["src", "href", "url"];

const SCRIPT_PATTERNS: [&str; 3] = ["<script", "javascript:", "onerror="];

static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<\s*script\b[^>]*>.*?<\s*/\s*script\s*>").unwrap());

static SCRIPT_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*/?\s*script[^>]*>?").unwrap());

static JS_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").unwrap());

/// Inline handlers for DOM events. Matched anywhere in the value, since
/// detection looks for `onerror=` as a plain substring.
static EVENT_HANDLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)on(?:error|load|unload|abort|click|dblclick|contextmenu|mouse(?:over|out|down|up|move|enter|leave)|key(?:down|up|press)|focus|blur|change|input|submit|reset|select|scroll|resize|wheel|toggle|pointer(?:down|up|move|over|out)|animation(?:start|end)|transitionend)\s*=",
    )
    .unwrap()
});

/// Whether `value` contains a script-injection pattern (case-insensitive)
pub fn contains_script_pattern(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    SCRIPT_PATTERNS.iter().any(|p| lowered.contains(p))
}

/// A `data:` URL carrying anything other than an image
pub fn is_unsafe_data_url(value: &str) -> bool {
    let lowered = value.trim_start().to_ascii_lowercase();
    lowered.starts_with("data:") && !lowered.starts_with("data:image/")
}

/// Strip script blocks, script tags, `javascript:` schemes and inline event
/// handlers. Not an HTML parser.
///
/// Removal repeats until nothing changes, so fragments that join into a new
/// pattern after one pass are removed too. Every pass that changes the
/// string shortens it, which bounds the loop.
pub fn sanitize_text(value: &str) -> String {
    let mut current = value.to_string();
    loop {
        let mut next = SCRIPT_BLOCK_REGEX.replace_all(&current, "").into_owned();
        next = SCRIPT_TAG_REGEX.replace_all(&next, "").into_owned();
        next = JS_SCHEME_REGEX.replace_all(&next, "").into_owned();
        next = EVENT_HANDLER_REGEX.replace_all(&next, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Scans text and URL properties for injection patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityScanner;

impl SecurityScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, component: &Component) -> Vec<ErrorRecord> {
        let mut errors = self.scan_text_properties(component);
        errors.extend(self.scan_url_properties(component));
        errors
    }

    /// One critical record per text property carrying a script pattern
    pub fn scan_text_properties(&self, component: &Component) -> Vec<ErrorRecord> {
        TEXT_PROPERTIES
            .iter()
            .filter(|name| {
                component
                    .properties
                    .get_str(name)
                    .is_some_and(contains_script_pattern)
            })
            .map(|name| {
                ErrorRecord::new(
                    Rule::Xss,
                    format!("Potential XSS vulnerability detected in '{}' property", name),
                )
                .for_component(&component.id)
                .on_property(*name)
            })
            .collect()
    }

    pub fn scan_url_properties(&self, component: &Component) -> Vec<ErrorRecord> {
        URL_PROPERTIES
            .iter()
            .filter(|name| {
                component
                    .properties
                    .get_str(name)
                    .is_some_and(is_unsafe_data_url)
            })
            .map(|name| {
                ErrorRecord::new(
                    Rule::UnsafeUrl,
                    format!("Potentially unsafe data URL detected in '{}' property", name),
                )
                .for_component(&component.id)
                .on_property(*name)
            })
            .collect()
    }
}
