// Helpers over the roxmltree node tree. Attribute names are matched
// case-insensitively, tag names likewise; exports from design tools disagree
// on casing too often to be strict about it.

pub(crate) fn attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name().eq_ignore_ascii_case(name))
        .map(|a| a.value())
}

pub(crate) fn has_tag(node: roxmltree::Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(tag)
}

pub(crate) fn parent_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
) -> Option<roxmltree::Node<'a, 'input>> {
    let mut cursor = node.parent();
    while let Some(parent) = cursor {
        if parent.is_element() {
            return Some(parent);
        }
        cursor = parent.parent();
    }
    None
}

pub(crate) fn class_list<'a>(node: roxmltree::Node<'a, '_>) -> impl Iterator<Item = &'a str> {
    attr(node, "class").unwrap_or("").split_whitespace()
}

pub(crate) fn element_by_id<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    id: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    doc.descendants()
        .find(|n| n.is_element() && n.attribute("id") == Some(id))
}

pub(crate) fn parse_number(input: &str) -> Option<f64> {
    let s = input.trim();
    // Ignore unit suffixes (treat user units as-is).
    let s = s
        .trim_end_matches("px")
        .trim_end_matches("pt")
        .trim_end_matches("mm")
        .trim_end_matches("cm")
        .trim_end_matches("in")
        .trim();
    s.parse::<f64>().ok()
}

pub(crate) fn first_number(input: &str) -> Option<f64> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .find_map(parse_number)
}

pub(crate) fn number_attr(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    attr(node, name).and_then(parse_number)
}

pub(crate) fn number_attr_or(node: roxmltree::Node<'_, '_>, name: &str, default: f64) -> f64 {
    number_attr(node, name).unwrap_or(default)
}

pub(crate) fn parse_points(input: &str) -> Vec<(f64, f64)> {
    let nums: Vec<f64> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(parse_number)
        .collect();
    let mut out = Vec::new();
    let mut it = nums.into_iter();
    while let (Some(x), Some(y)) = (it.next(), it.next()) {
        out.push((x, y));
    }
    out
}

pub(crate) fn parse_url_ref(input: &str) -> Option<String> {
    let s = input.trim();
    if !s.to_ascii_lowercase().starts_with("url(") {
        return None;
    }
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    if close <= open + 1 {
        return None;
    }
    let inner = s[open + 1..close]
        .trim()
        .trim_matches('"')
        .trim_matches('\'');
    let id = inner.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_is_case_insensitive() {
        let doc = roxmltree::Document::parse(r#"<svg viewBox="0 0 10 10"/>"#).unwrap();
        let root = doc.root_element();
        assert_eq!(attr(root, "viewbox"), Some("0 0 10 10"));
        assert_eq!(attr(root, "VIEWBOX"), Some("0 0 10 10"));
        assert_eq!(attr(root, "width"), None);
    }

    #[test]
    fn numbers_tolerate_units_and_noise() {
        assert_eq!(parse_number(" 12px "), Some(12.0));
        assert_eq!(parse_number("1.5e1"), Some(15.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(first_number("junk 3.5, 7"), Some(3.5));
        assert_eq!(first_number(""), None);
    }

    #[test]
    fn point_lists_pair_up_and_drop_stragglers() {
        assert_eq!(parse_points("0,0 10 0, 10,10"), vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0)
        ]);
        assert_eq!(parse_points("1 2 3"), vec![(1.0, 2.0)]);
    }

    #[test]
    fn url_references_unwrap_to_ids() {
        assert_eq!(parse_url_ref("url(#grad)"), Some("grad".to_string()));
        assert_eq!(parse_url_ref("url('#g')"), Some("g".to_string()));
        assert_eq!(parse_url_ref("#grad"), None);
        assert_eq!(parse_url_ref("url()"), None);
    }
}
