//! Finds interactive elements and keeps the engine's registry in step with
//! the document.
//!
//! Discovery runs once on first enable: `:hover` rules are mirrored to
//! `.hover` rules, then every element matching the interactive selector or a
//! mirrored rule's base selector is registered. A `MutationObserver` on
//! `<body>` handles elements added or removed afterwards.

use fan::error::{PageError, StyleError};
use fan::registry::{Activation, ElementId};
use fan::styles::{INTERACTIVE_SELECTOR, is_own_stylesheet, mirror_hover_rule};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CssStyleRule, CssStyleSheet, Document, Element, MutationObserver, MutationObserverInit, MutationRecord, Node,
    NodeList, SvgElement,
};

use crate::host::Host;
use crate::page::js_err;

/// How an element must be clicked: SVG elements wired through an `onclick`
/// attribute have no `click()` method and need a dispatched event.
fn activation_for(element: &Element) -> Activation {
    if element.is_instance_of::<SvgElement>() && element.has_attribute("onclick") {
        Activation::AttributeDriven
    } else {
        Activation::Standard
    }
}

fn elements_of(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length()).filter_map(|i| list.item(i)).flat_map(|node| node.dyn_into::<Element>())
}

// --- Hover rule mirroring ---

fn mirror_sheet(sheet: &CssStyleSheet, selectors: &mut Vec<String>) -> Result<(), StyleError> {
    let href = sheet.href().unwrap_or_default().unwrap_or_default();
    let rules = sheet
        .css_rules()
        .map_err(|_| StyleError::InaccessibleSheet(href))?;

    // Rules appended below are not revisited.
    let count = rules.length();
    for i in 0..count {
        let Some(rule) = rules.item(i) else {
            continue;
        };
        let Ok(rule) = rule.dyn_into::<CssStyleRule>() else {
            continue;
        };
        let Some(mirrored) = mirror_hover_rule(&rule.selector_text(), &rule.style().css_text()) else {
            continue;
        };
        if let Err(err) = sheet.insert_rule_with_index(&mirrored.rule, rules.length()) {
            let err = StyleError::InsertRejected { rule: mirrored.rule, reason: format!("{err:?}") };
            log::warn!("{err}");
            continue;
        }
        log::debug!("mirrored hover rule: {}", mirrored.rule);
        if let Some(base) = mirrored.base_selector {
            selectors.push(base);
        }
    }
    Ok(())
}

/// Mirror every `:hover` rule in the page's stylesheets, skipping the fan's
/// own. Returns the base selectors of the mirrored rules.
pub fn mirror_hover_rules(document: &Document) -> Vec<String> {
    let mut selectors = Vec::new();
    let sheets = document.style_sheets();
    for i in 0..sheets.length() {
        let Some(sheet) = sheets.item(i) else {
            continue;
        };
        if is_own_stylesheet(sheet.href().unwrap_or_default().as_deref()) {
            continue;
        }
        let Ok(sheet) = sheet.dyn_into::<CssStyleSheet>() else {
            continue;
        };
        if let Err(err) = mirror_sheet(&sheet, &mut selectors) {
            log::warn!("skipping stylesheet: {err}");
        }
    }
    selectors.sort();
    selectors.dedup();
    selectors
}

// --- Registration ---

/// Register elements with the engine, writing generated IDs back to them.
fn register_all(host: &Host, elements: impl IntoIterator<Item = Element>) {
    let registered = host.with_core(|core| {
        let mut count = 0usize;
        for element in elements {
            let existing = element.id();
            let (id, generated) = core.register_element(Some(existing.as_str()), activation_for(&element));
            if generated {
                element.set_id(id.as_str());
            }
            count += 1;
        }
        count
    });
    if let Some(count) = registered {
        log::debug!("registered {count} interactive elements");
    }
}

/// Elements under `root` (inclusive) matched by `selector`.
fn matching(root: &Element, selector: &str) -> Result<Vec<Element>, StyleError> {
    let bad_selector = |_| StyleError::MalformedSelector(selector.to_owned());
    let mut found = Vec::new();
    if root.matches(selector).map_err(bad_selector)? {
        found.push(root.clone());
    }
    let descendants = root.query_selector_all(selector).map_err(bad_selector)?;
    found.extend(elements_of(&descendants));
    Ok(found)
}

/// Every selector that makes an element interactive.
fn selectors(host: &Host) -> Vec<String> {
    let mut all = vec![INTERACTIVE_SELECTOR.to_owned()];
    all.extend(host.hover_selectors.borrow().iter().cloned());
    all
}

fn collect(root: &Element, selectors: &[String]) -> Vec<Element> {
    let mut found = Vec::new();
    for selector in selectors {
        match matching(root, selector) {
            Ok(elements) => found.extend(elements),
            Err(err) => log::warn!("{err}"),
        }
    }
    found
}

/// Mirror hover rules and register every interactive element in the document.
pub fn discover(host: &Host, document: &Document) {
    *host.hover_selectors.borrow_mut() = mirror_hover_rules(document);
    let Some(root) = document.document_element() else {
        log::warn!("document has no root element; nothing to discover");
        return;
    };
    register_all(host, collect(&root, &selectors(host)));
}

// --- Mutations ---

fn on_added(host: &Host, node: Node) {
    let Ok(element) = node.dyn_into::<Element>() else {
        return;
    };
    register_all(host, collect(&element, &selectors(host)));
}

fn on_removed(host: &Host, node: Node) {
    // A node moved elsewhere in the document is removed and re-added.
    if node.is_connected() {
        return;
    }
    let Ok(element) = node.dyn_into::<Element>() else {
        return;
    };
    let mut ids = vec![ElementId::from(element.id().as_str())];
    if let Ok(descendants) = element.query_selector_all("[id]") {
        ids.extend(elements_of(&descendants).map(|e| ElementId::from(e.id().as_str())));
    }
    host.with_core(|core| {
        for id in ids.iter().filter(|id| !id.as_str().is_empty()) {
            core.unregister_element(id);
        }
    });
}

fn on_mutations(host: &Host, records: &js_sys::Array) {
    for record in records.iter() {
        let Ok(record) = record.dyn_into::<MutationRecord>() else {
            continue;
        };
        let removed = record.removed_nodes();
        for i in 0..removed.length() {
            if let Some(node) = removed.item(i) {
                on_removed(host, node);
            }
        }
        let added = record.added_nodes();
        for i in 0..added.length() {
            if let Some(node) = added.item(i) {
                on_added(host, node);
            }
        }
    }
}

/// Watch `<body>` for added and removed elements.
pub fn observe(host: &Host, document: &Document) -> Result<(), PageError> {
    let body = document.body().ok_or_else(|| PageError::Host("document has no <body>".into()))?;
    let weak = host.weak();
    let callback = Closure::wrap(Box::new(move |records: js_sys::Array, _observer: MutationObserver| {
        if let Some(host) = weak.upgrade() {
            on_mutations(&host, &records);
        }
    }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(js_err)?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&body, &options).map_err(js_err)?;
    callback.forget();
    log::debug!("observing document body for element changes");
    Ok(())
}
