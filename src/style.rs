use crate::dom;
use lightningcss::printer::PrinterOptions;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;
use std::collections::HashMap;
use tracing::debug;

// Cascaded presentation values without a rendering engine. Only class
// selectors are honored from <style> blocks; everything else resolves through
// inline style, presentation attributes, and ancestor inheritance.

const FILL_DEFAULT: &str = "#000000";
const STROKE_DEFAULT: &str = "transparent";

// Class rules harvested from every `<style>` block of the document, built
// once per conversion and read-only afterwards.
#[derive(Debug, Default)]
pub struct StyleContext {
    classes: HashMap<String, HashMap<String, String>>,
}

impl StyleContext {
    pub fn build(doc: &roxmltree::Document<'_>) -> Self {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for node in doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case("style"))
        {
            let css = node.text().unwrap_or_default().trim();
            if css.is_empty() {
                continue;
            }
            match StyleSheet::parse(css, ParserOptions::default()) {
                Ok(sheet) => collect_rules(sheet.rules, &mut pairs),
                Err(_) => {
                    debug!("style block did not parse as CSS; using raw rule scan");
                    collect_rules_raw(css, &mut pairs);
                }
            }
        }

        let mut classes: HashMap<String, HashMap<String, String>> = HashMap::new();
        for (selectors, declarations) in pairs {
            let decls = parse_declarations(&declarations);
            if decls.is_empty() {
                continue;
            }
            for selector in selectors.split(',') {
                for class in class_tokens(selector) {
                    let entry = classes.entry(class).or_default();
                    for (k, v) in &decls {
                        entry.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        Self { classes }
    }

    // Cascade lookup: inline style, then the presentation attribute, then
    // class rules in class-list order, then ancestors (inline style and
    // attribute only), stopping before the root `<svg>`.
    pub fn resolve(&self, node: roxmltree::Node<'_, '_>, prop: &str) -> Option<String> {
        if let Some(v) = local_value(node, prop) {
            return Some(v);
        }
        if let Some(v) = self.class_value(node, prop) {
            return Some(v.to_string());
        }
        let mut cursor = dom::parent_element(node);
        while let Some(parent) = cursor {
            if dom::has_tag(parent, "svg") {
                break;
            }
            if let Some(v) = local_value(parent, prop) {
                return Some(v);
            }
            cursor = dom::parent_element(parent);
        }
        None
    }

    // Like [`resolve`] but without the ancestor walk; callers that already
    // iterate ancestors (visibility suppression) use this per node.
    pub fn resolve_local(&self, node: roxmltree::Node<'_, '_>, prop: &str) -> Option<String> {
        local_value(node, prop).or_else(|| self.class_value(node, prop).map(str::to_string))
    }

    pub fn resolve_fill(&self, node: roxmltree::Node<'_, '_>) -> String {
        self.resolve_paint(node, "fill", FILL_DEFAULT)
    }

    pub fn resolve_stroke(&self, node: roxmltree::Node<'_, '_>) -> String {
        self.resolve_paint(node, "stroke", STROKE_DEFAULT)
    }

    // First float token of the resolved value, or `default`. Never fails.
    pub fn resolve_number(&self, node: roxmltree::Node<'_, '_>, prop: &str, default: f64) -> f64 {
        self.resolve(node, prop)
            .and_then(|raw| dom::first_number(&raw))
            .unwrap_or(default)
    }

    fn resolve_paint(&self, node: roxmltree::Node<'_, '_>, prop: &str, default: &str) -> String {
        let mut raw = self.resolve(node, prop).unwrap_or_default();
        if raw.is_empty() || raw.trim().eq_ignore_ascii_case("none") {
            if let Some(v) = self.class_value(node, prop) {
                raw = v.to_string();
            }
        }

        let value = raw.trim();
        if value.eq_ignore_ascii_case("none") {
            return "transparent".to_string();
        }
        if value.is_empty() {
            return default.to_string();
        }
        if let Some(id) = dom::parse_url_ref(value) {
            return match gradient_stop_color(node, &id) {
                Some(color) => color,
                None => {
                    debug!(reference = %id, "paint reference did not resolve; using default");
                    default.to_string()
                }
            };
        }
        value.to_string()
    }

    fn class_value(&self, node: roxmltree::Node<'_, '_>, prop: &str) -> Option<&str> {
        for class in dom::class_list(node) {
            if let Some(v) = self.classes.get(class).and_then(|m| m.get(prop)) {
                return Some(v.as_str());
            }
        }
        None
    }
}

fn local_value(node: roxmltree::Node<'_, '_>, prop: &str) -> Option<String> {
    if let Some(style) = dom::attr(node, "style") {
        if let Some(v) = style_declaration(style, prop) {
            return Some(v.to_string());
        }
    }
    let v = dom::attr(node, prop)?.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

// Last declaration for `prop` in an inline `style` attribute value.
pub(crate) fn style_declaration<'a>(style: &'a str, prop: &str) -> Option<&'a str> {
    let mut out = None;
    for decl in style.split(';') {
        let Some((k, v)) = decl.split_once(':') else {
            continue;
        };
        if !k.trim().eq_ignore_ascii_case(prop) {
            continue;
        }
        let v = v.trim();
        if !v.is_empty() {
            out = Some(v);
        }
    }
    out
}

// `url(#id)` paints resolve to the referenced gradient's first stop color,
// read from the stop's attribute or inline style.
fn gradient_stop_color(node: roxmltree::Node<'_, '_>, id: &str) -> Option<String> {
    let target = dom::element_by_id(node.document(), id)?;
    let stop = target
        .descendants()
        .find(|n| dom::has_tag(*n, "stop"))?;
    if let Some(v) = dom::attr(stop, "stop-color") {
        return Some(v.trim().to_string());
    }
    let style = dom::attr(stop, "style")?;
    style_declaration(style, "stop-color").map(|v| v.to_string())
}

fn collect_rules(rules: lightningcss::rules::CssRuleList, out: &mut Vec<(String, String)>) {
    for rule in rules.0 {
        match rule {
            CssRule::Style(style_rule) => {
                let selectors = style_rule
                    .selectors
                    .to_css_string(PrinterOptions::default())
                    .unwrap_or_default();
                let declarations = style_rule
                    .declarations
                    .to_css_string(PrinterOptions::default())
                    .unwrap_or_default();
                if declarations.trim().is_empty() {
                    continue;
                }
                out.push((selectors, declarations));
            }
            CssRule::Media(media) => {
                collect_rules(media.rules, out);
            }
            _ => {}
        }
    }
}

// Brace scan for style blocks the CSS parser rejects outright.
fn collect_rules_raw(css: &str, out: &mut Vec<(String, String)>) {
    for chunk in css.split('}') {
        let Some((selectors, declarations)) = chunk.split_once('{') else {
            continue;
        };
        if declarations.trim().is_empty() {
            continue;
        }
        out.push((selectors.trim().to_string(), declarations.trim().to_string()));
    }
}

fn parse_declarations(input: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for decl in input.split(';') {
        let Some((k, v)) = decl.split_once(':') else {
            continue;
        };
        let key = k.trim().to_ascii_lowercase();
        let mut value = v.trim();
        if let Some(pos) = value.to_ascii_lowercase().rfind("!important") {
            value = value[..pos].trim();
        }
        if !key.is_empty() && !value.is_empty() {
            out.push((key, value.to_string()));
        }
    }
    out
}

// Every class token of one comma-free selector, combinators and all:
// `.a rect.b > .c` yields a, b, c.
fn class_tokens(selector: &str) -> Vec<String> {
    let mut out = Vec::new();
    for token in selector.split(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~')) {
        let mut rest = token;
        while let Some(pos) = rest.find('.') {
            rest = &rest[pos + 1..];
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(rest.len());
            if end > 0 {
                out.push(rest[..end].to_string());
            }
            rest = &rest[end..];
        }
    }
    out
}
