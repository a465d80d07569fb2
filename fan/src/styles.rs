//! Class names, discovery selectors, and `:hover` rule mirroring.
//!
//! The simulated cursor never triggers the browser's `:hover`, so every
//! `:hover` rule on the page is duplicated with `.hover` in its place and the
//! reconciler toggles that class instead. This module holds the pure string
//! side of that; the host walks the stylesheets and inserts the rules.

#[cfg(test)]
#[path = "styles_test.rs"]
mod styles_test;

use crate::registry::Flag;

/// Elements that are interactive without any stylesheet help.
pub const INTERACTIVE_SELECTOR: &str = r#"a, button, input, [onclick], [role="button"], [tabindex]"#;

/// File name of the fan's own stylesheet; never mirrored.
pub const OWN_STYLESHEET: &str = "stylesFan.css";

pub const HOVER_PSEUDO: &str = ":hover";

/// Class standing in for `:hover`.
pub const HOVER_CLASS: &str = "hover";

/// Class marking a recently activated element.
pub const ACTIVATED_CLASS: &str = "clicked";

/// Class on the fan container while the fan is enabled.
pub const EXPANDED_CLASS: &str = "expanded";

/// Page class for a presentation flag.
#[must_use]
pub fn class_for(flag: Flag) -> &'static str {
    match flag {
        Flag::Hovered => HOVER_CLASS,
        Flag::Activated => ACTIVATED_CLASS,
    }
}

/// Whether a stylesheet with this `href` is the fan's own.
#[must_use]
pub fn is_own_stylesheet(href: Option<&str>) -> bool {
    href.is_some_and(|h| h.contains(OWN_STYLESHEET))
}

/// A `:hover` rule rewritten to use the toggle class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredRule {
    /// Full rule text ready for `insertRule`.
    pub rule: String,
    /// The selector with `:hover` removed, used to discover the elements the
    /// rule styles. `None` when nothing selectable is left.
    pub base_selector: Option<String>,
}

/// Split a selector list on top-level commas, leaving commas inside
/// `(...)` and `[...]` alone.
fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in selector.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selector[start..]);
    parts
}

/// Selector matching the elements a `:hover` selector styles: the pseudo-class
/// and any trailing pseudo-element are dropped from each list entry.
#[must_use]
pub fn base_selector(selector: &str) -> Option<String> {
    let parts: Vec<String> = split_selector_list(selector)
        .into_iter()
        .map(|part| {
            let stripped = part.replace(HOVER_PSEUDO, "");
            let cut = stripped.find("::").map_or(stripped.as_str(), |i| &stripped[..i]);
            cut.trim().to_owned()
        })
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

/// Rewrite a style rule whose selector mentions `:hover`. Returns `None` for
/// rules that have nothing to mirror.
#[must_use]
pub fn mirror_hover_rule(selector: &str, declarations: &str) -> Option<MirroredRule> {
    if !selector.contains(HOVER_PSEUDO) {
        return None;
    }
    let toggled = selector.replace(HOVER_PSEUDO, &format!(".{HOVER_CLASS}"));
    Some(MirroredRule {
        rule: format!("{toggled} {{ {declarations} }}"),
        base_selector: base_selector(selector),
    })
}
