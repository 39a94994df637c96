use crate::dom;
use crate::geometry;
use crate::path::{self, FillRule, Subpath};
use crate::scene::{
    ArrowElement, Arrowhead, Element, ElementBase, ElementFactory, LinearElement, ShapeElement,
    TextElement,
};
use crate::style::StyleContext;
use crate::transform;
use rand::Rng;

// Per-tag synthesis. Each routine reads the node through the style cascade
// and the accumulated transform, and yields zero or more scene elements.
// Rotation and skew collapse into an axis-aligned re-fit of the transformed
// outline; downstream compatibility depends on that exact behavior, so the
// re-fit stays even though it loses true rotated geometry.

const SUPPORTED: &[&str] = &[
    "rect", "circle", "ellipse", "line", "polyline", "polygon", "path", "text",
];

pub(crate) fn supported(tag: &str) -> bool {
    SUPPORTED.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

pub(crate) fn for_node<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    match node.tag_name().name().to_ascii_lowercase().as_str() {
        "rect" => rect(node, ctx, factory),
        "circle" => circle(node, ctx, factory),
        "ellipse" => ellipse(node, ctx, factory),
        "line" => line(node, ctx, factory),
        "polyline" => poly(node, ctx, factory, false),
        "polygon" => poly(node, ctx, factory, true),
        "path" => compound_path(node, ctx, factory),
        "text" => text(node, ctx, factory),
        _ => Vec::new(),
    }
}

struct Paints {
    stroke: String,
    fill: String,
    stroke_width: f64,
    opacity: f64,
    dashed: bool,
}

impl Paints {
    fn resolve(ctx: &StyleContext, node: roxmltree::Node<'_, '_>) -> Self {
        let dashed = ctx
            .resolve(node, "stroke-dasharray")
            .map(|v| {
                let v = v.trim();
                !v.is_empty() && !v.eq_ignore_ascii_case("none")
            })
            .unwrap_or(false);
        Self {
            stroke: ctx.resolve_stroke(node),
            fill: ctx.resolve_fill(node),
            stroke_width: ctx.resolve_number(node, "stroke-width", 1.0),
            opacity: ctx.resolve_number(node, "opacity", 1.0).clamp(0.0, 1.0) * 100.0,
            dashed,
        }
    }

    fn stroke_visible(&self) -> bool {
        !is_transparent(&self.stroke)
    }

    fn fill_visible(&self) -> bool {
        !is_transparent(&self.fill)
    }

    fn stamp(&self, base: &mut ElementBase) {
        base.stroke_color = self.stroke.clone();
        base.background_color = self.fill.clone();
        base.stroke_width = self.stroke_width;
        base.stroke_style = if self.dashed { "dashed" } else { "solid" };
        base.opacity = self.opacity;
    }
}

fn is_transparent(color: &str) -> bool {
    color.eq_ignore_ascii_case("transparent")
}

fn fit_box(base: &mut ElementBase, outline: &[(f64, f64)]) {
    let b = geometry::bounding_box(outline);
    base.x = b.min_x;
    base.y = b.min_y;
    base.width = b.width();
    base.height = b.height();
}

fn rect<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    let x = dom::number_attr_or(node, "x", 0.0);
    let y = dom::number_attr_or(node, "y", 0.0);
    let Some(w) = dom::number_attr(node, "width") else {
        return Vec::new();
    };
    let Some(h) = dom::number_attr(node, "height") else {
        return Vec::new();
    };
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }

    let m = transform::accumulated(node);
    let corners = transform::transform_points(
        &[(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
        m,
    );
    let mut base = factory.base();
    Paints::resolve(ctx, node).stamp(&mut base);
    fit_box(&mut base, &corners);
    if dom::attr(node, "rx").or_else(|| dom::attr(node, "ry")).is_some() {
        base.stroke_sharpness = "rounded";
    }
    vec![Element::Rectangle(ShapeElement { base })]
}

fn circle<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    let Some(r) = dom::number_attr(node, "r") else {
        return Vec::new();
    };
    round_shape(node, ctx, factory, r, r)
}

fn ellipse<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    let (Some(rx), Some(ry)) = (dom::number_attr(node, "rx"), dom::number_attr(node, "ry"))
    else {
        return Vec::new();
    };
    round_shape(node, ctx, factory, rx, ry)
}

fn round_shape<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
    rx: f64,
    ry: f64,
) -> Vec<Element> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    let cx = dom::number_attr_or(node, "cx", 0.0);
    let cy = dom::number_attr_or(node, "cy", 0.0);

    let m = transform::accumulated(node);
    let extremes = transform::transform_points(
        &[(cx + rx, cy), (cx - rx, cy), (cx, cy + ry), (cx, cy - ry)],
        m,
    );
    let mut base = factory.base();
    Paints::resolve(ctx, node).stamp(&mut base);
    fit_box(&mut base, &extremes);
    vec![Element::Ellipse(ShapeElement { base })]
}

fn line<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    let x1 = dom::number_attr_or(node, "x1", 0.0);
    let y1 = dom::number_attr_or(node, "y1", 0.0);
    let x2 = dom::number_attr_or(node, "x2", 0.0);
    let y2 = dom::number_attr_or(node, "y2", 0.0);

    let m = transform::accumulated(node);
    let absolute = transform::transform_points(&[(x1, y1), (x2, y2)], m);
    // Lines never carry an area fill.
    vec![linear(node, ctx, factory, &absolute, Some("transparent"), Vec::new())]
}

fn poly<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
    close: bool,
) -> Vec<Element> {
    let Some(raw) = dom::attr(node, "points") else {
        return Vec::new();
    };
    let mut points = dom::parse_points(raw);
    if points.len() < 2 {
        return Vec::new();
    }
    if close {
        // Implicit closing edge back to the origin point.
        points.push(points[0]);
    }

    let m = transform::accumulated(node);
    let absolute = transform::transform_points(&points, m);
    vec![linear(node, ctx, factory, &absolute, None, Vec::new())]
}

// Shared Line/Arrow synthesis over absolute document-space points. The
// marker cascade decides which of the two comes out.
fn linear<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
    absolute: &[(f64, f64)],
    background: Option<&str>,
    group_ids: Vec<String>,
) -> Element {
    let origin = absolute[0];
    let points: Vec<[f64; 2]> = absolute
        .iter()
        .map(|&(x, y)| [x - origin.0, y - origin.1])
        .collect();

    let mut base = factory.base();
    Paints::resolve(ctx, node).stamp(&mut base);
    if let Some(bg) = background {
        base.background_color = bg.to_string();
    }
    base.x = origin.0;
    base.y = origin.1;
    let b = geometry::bounding_box(absolute);
    base.width = b.width();
    base.height = b.height();
    base.group_ids = group_ids;

    let (start, end) = arrowheads(ctx, node);
    if start.is_some() || end.is_some() {
        Element::Arrow(ArrowElement {
            base,
            points,
            start_arrowhead: start,
            end_arrowhead: end,
        })
    } else {
        Element::Line(LinearElement { base, points })
    }
}

fn compound_path<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    let Some(d) = dom::attr(node, "d") else {
        return Vec::new();
    };
    let m = transform::accumulated(node);
    let mut subpaths = path::decompose(d, m);
    if subpaths.is_empty() {
        return Vec::new();
    }

    let rule = FillRule::from_value(ctx.resolve(node, "fill-rule").as_deref());
    path::classify_holes(&mut subpaths, rule);

    let paints = Paints::resolve(ctx, node);
    let first_winding = subpaths[0].winding;
    let (start, end) = arrowheads(ctx, node);
    // Pieces of one compound path recombine downstream through a shared
    // group id; a lone subpath stays ungrouped.
    let group_ids: Vec<String> = if subpaths.len() > 1 {
        vec![factory.fresh_id()]
    } else {
        Vec::new()
    };

    let mut out = Vec::new();
    for sub in &subpaths {
        if !sub.closed || !paints.fill_visible() {
            if !paints.stroke_visible() {
                continue;
            }
            let mut base = factory.base();
            paints.stamp(&mut base);
            base.background_color = "transparent".to_string();
            place(&mut base, sub, &group_ids);
            let points = relative_points(sub);
            if !sub.closed && (start.is_some() || end.is_some()) {
                out.push(Element::Arrow(ArrowElement {
                    base,
                    points,
                    start_arrowhead: start,
                    end_arrowhead: end,
                }));
            } else {
                out.push(Element::Line(LinearElement { base, points }));
            }
        } else {
            let transparent = match rule {
                FillRule::NonZero => sub.winding != first_winding || sub.hole,
                FillRule::EvenOdd => sub.hole,
            };
            let mut base = factory.base();
            paints.stamp(&mut base);
            if transparent {
                base.background_color = "transparent".to_string();
            }
            if !paints.stroke_visible() {
                base.stroke_width = 0.0;
            }
            place(&mut base, sub, &group_ids);
            out.push(Element::Draw(LinearElement {
                base,
                points: relative_points(sub),
            }));
        }
    }
    out
}

fn place(base: &mut ElementBase, sub: &Subpath, group_ids: &[String]) {
    base.x = sub.origin.0;
    base.y = sub.origin.1;
    base.width = sub.width;
    base.height = sub.height;
    base.group_ids = group_ids.to_vec();
}

fn relative_points(sub: &Subpath) -> Vec<[f64; 2]> {
    sub.points.iter().map(|&(x, y)| [x, y]).collect()
}

fn text<R: Rng>(
    node: roxmltree::Node<'_, '_>,
    ctx: &StyleContext,
    factory: &mut ElementFactory<R>,
) -> Vec<Element> {
    let spans: Vec<roxmltree::Node<'_, '_>> = node
        .children()
        .filter(|n| dom::has_tag(*n, "tspan"))
        .collect();
    let content = if spans.is_empty() {
        node.text().unwrap_or("").trim().to_string()
    } else {
        spans
            .iter()
            .map(|s| s.text().unwrap_or("").trim())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    };
    if content.is_empty() {
        return Vec::new();
    }

    let anchor = text_anchor_point(node, &spans);
    let anchor = transform::accumulated(node).apply(anchor);

    let font_size = ctx.resolve_number(node, "font-size", 20.0).max(1.0);
    let longest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let line_count = content.lines().count().max(1);
    let width = longest as f64 * font_size * 0.6;
    let height = line_count as f64 * font_size * 1.25;

    let align = match ctx.resolve(node, "text-anchor").as_deref().map(str::trim) {
        Some("middle") => "center",
        Some("end") => "right",
        _ => "left",
    };
    let vertical = match ctx
        .resolve(node, "dominant-baseline")
        .as_deref()
        .map(str::trim)
    {
        Some("middle") | Some("central") => "middle",
        _ => "top",
    };

    let mut base = factory.base();
    let paints = Paints::resolve(ctx, node);
    // Glyphs are painted with the SVG fill; the scene schema strokes text.
    base.stroke_color = paints.fill.clone();
    base.background_color = "transparent".to_string();
    base.opacity = paints.opacity;
    base.x = anchor.0
        - match align {
            "center" => width / 2.0,
            "right" => width,
            _ => 0.0,
        };
    base.y = anchor.1 - if vertical == "middle" { height / 2.0 } else { 0.0 };
    base.width = width;
    base.height = height;

    vec![Element::Text(TextElement {
        base,
        text: content,
        font_size,
        text_align: align,
        vertical_align: vertical,
    })]
}

// Anchor precedence: the element's own x/y when both parse, else the first
// span's pair, else the document origin.
fn text_anchor_point(
    node: roxmltree::Node<'_, '_>,
    spans: &[roxmltree::Node<'_, '_>],
) -> (f64, f64) {
    if let (Some(x), Some(y)) = (dom::number_attr(node, "x"), dom::number_attr(node, "y")) {
        return (x, y);
    }
    if let Some(span) = spans.first() {
        if let (Some(x), Some(y)) = (dom::number_attr(*span, "x"), dom::number_attr(*span, "y")) {
            return (x, y);
        }
    }
    (0.0, 0.0)
}

fn arrowheads(
    ctx: &StyleContext,
    node: roxmltree::Node<'_, '_>,
) -> (Option<Arrowhead>, Option<Arrowhead>) {
    (
        marker_kind(ctx.resolve(node, "marker-start")),
        marker_kind(ctx.resolve(node, "marker-end")),
    )
}

fn marker_kind(value: Option<String>) -> Option<Arrowhead> {
    let value = value?;
    let v = value.trim().to_ascii_lowercase();
    if v.is_empty() || v == "none" {
        return None;
    }
    if v.contains("dot") || v.contains("circle") {
        Some(Arrowhead::Dot)
    } else if v.contains("bar") {
        Some(Arrowhead::Bar)
    } else {
        Some(Arrowhead::Arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn synth_first(svg: &str, tag: &str) -> Option<Element> {
        synth_all(svg, tag).into_iter().next()
    }

    fn synth_all(svg: &str, tag: &str) -> Vec<Element> {
        let doc = roxmltree::Document::parse(svg).unwrap();
        let node = doc.descendants().find(|n| n.has_tag_name(tag)).unwrap();
        let ctx = StyleContext::build(&doc);
        let mut factory = ElementFactory::new(StdRng::seed_from_u64(42));
        for_node(node, &ctx, &mut factory)
    }

    #[test]
    fn rect_passes_position_and_size_through() {
        let el = synth_first(
            r#"<svg><rect x="10" y="12" width="30" height="20"/></svg>"#,
            "rect",
        )
        .unwrap();
        let Element::Rectangle(rect) = &el else {
            panic!("expected rectangle, got {el:?}");
        };
        assert_eq!(rect.base.x, 10.0);
        assert_eq!(rect.base.y, 12.0);
        assert_eq!(rect.base.width, 30.0);
        assert_eq!(rect.base.height, 20.0);
        assert_eq!(rect.base.stroke_sharpness, "sharp");
    }

    #[test]
    fn zero_or_negative_dimensions_yield_nothing() {
        assert!(synth_all(r#"<svg><rect width="0" height="5"/></svg>"#, "rect").is_empty());
        assert!(synth_all(r#"<svg><rect width="5" height="-1"/></svg>"#, "rect").is_empty());
        assert!(synth_all(r#"<svg><rect height="5"/></svg>"#, "rect").is_empty());
        assert!(synth_all(r#"<svg><circle cx="1" cy="1" r="0"/></svg>"#, "circle").is_empty());
        assert!(
            synth_all(r#"<svg><ellipse rx="-2" ry="3"/></svg>"#, "ellipse").is_empty()
        );
    }

    #[test]
    fn rounding_radius_marks_sharpness() {
        let el = synth_first(
            r#"<svg><rect width="10" height="10" rx="2"/></svg>"#,
            "rect",
        )
        .unwrap();
        assert_eq!(el.base().stroke_sharpness, "rounded");
    }

    #[test]
    fn transformed_rect_refits_to_axis_aligned_bbox() {
        // 10x10 square rotated 45 degrees about its center re-fits to a
        // bigger axis-aligned box centered at the same spot.
        let el = synth_first(
            r#"<svg><g transform="rotate(45 5 5)"><rect width="10" height="10"/></g></svg>"#,
            "rect",
        )
        .unwrap();
        let b = el.base();
        assert_eq!(b.angle, 0.0);
        let side = 10.0 * std::f64::consts::SQRT_2;
        assert!((b.width - side).abs() < 1e-9);
        assert!((b.height - side).abs() < 1e-9);
        assert!((b.x - (5.0 - side / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn circle_becomes_ellipse_from_extremes() {
        let el = synth_first(r#"<svg><circle cx="5" cy="5" r="3"/></svg>"#, "circle").unwrap();
        let Element::Ellipse(e) = &el else {
            panic!("expected ellipse");
        };
        assert_eq!(e.base.x, 2.0);
        assert_eq!(e.base.y, 2.0);
        assert_eq!(e.base.width, 6.0);
        assert_eq!(e.base.height, 6.0);
    }

    #[test]
    fn line_emits_transparent_fill_and_relative_points() {
        let el = synth_first(
            r##"<svg><line x1="1" y1="2" x2="5" y2="6" stroke="#ff0000"/></svg>"##,
            "line",
        )
        .unwrap();
        let Element::Line(line) = &el else {
            panic!("expected line");
        };
        assert_eq!(line.base.background_color, "transparent");
        assert_eq!(line.points, vec![[0.0, 0.0], [4.0, 4.0]]);
        assert_eq!(line.base.x, 1.0);
        assert_eq!(line.base.y, 2.0);
    }

    #[test]
    fn marker_end_turns_line_into_arrow() {
        let el = synth_first(
            r##"<svg><line x1="0" y1="0" x2="9" y2="0" marker-end="url(#arrow)"/></svg>"##,
            "line",
        )
        .unwrap();
        let Element::Arrow(arrow) = &el else {
            panic!("expected arrow");
        };
        assert_eq!(arrow.end_arrowhead, Some(Arrowhead::Arrow));
        assert_eq!(arrow.start_arrowhead, None);
    }

    #[test]
    fn marker_names_map_to_arrowhead_kinds() {
        assert_eq!(
            marker_kind(Some("url(#bigDot)".to_string())),
            Some(Arrowhead::Dot)
        );
        assert_eq!(
            marker_kind(Some("url(#circleHead)".to_string())),
            Some(Arrowhead::Dot)
        );
        assert_eq!(
            marker_kind(Some("url(#endBar)".to_string())),
            Some(Arrowhead::Bar)
        );
        assert_eq!(
            marker_kind(Some("url(#fancy)".to_string())),
            Some(Arrowhead::Arrow)
        );
        assert_eq!(marker_kind(Some("none".to_string())), None);
        assert_eq!(marker_kind(None), None);
    }

    #[test]
    fn polygon_closes_itself_polyline_stays_open() {
        let closed = synth_first(
            r#"<svg><polygon points="0,0 10,0 10,10"/></svg>"#,
            "polygon",
        )
        .unwrap();
        let Element::Line(line) = &closed else {
            panic!("expected line");
        };
        assert_eq!(line.points.first(), line.points.last());
        assert_eq!(line.points.len(), 4);

        let open = synth_first(
            r#"<svg><polyline points="0,0 10,0 10,10"/></svg>"#,
            "polyline",
        )
        .unwrap();
        let Element::Line(line) = &open else {
            panic!("expected line");
        };
        assert_eq!(line.points.len(), 3);
        assert_ne!(line.points.first(), line.points.last());
    }

    #[test]
    fn too_few_polyline_points_yield_nothing() {
        assert!(synth_all(r#"<svg><polyline points="3,4"/></svg>"#, "polyline").is_empty());
    }

    #[test]
    fn filled_path_subpaths_become_grouped_draws() {
        let els = synth_all(
            r##"<svg><path fill="#ff0000" d="M 0 0 H 20 V 20 H 0 Z M 5 5 V 15 H 15 V 5 Z"/></svg>"##,
            "path",
        );
        assert_eq!(els.len(), 2);
        let group: Vec<_> = els.iter().map(|e| e.base().group_ids.clone()).collect();
        assert_eq!(group[0].len(), 1);
        assert_eq!(group[0], group[1]);

        let Element::Draw(outer) = &els[0] else {
            panic!("expected draw");
        };
        let Element::Draw(inner) = &els[1] else {
            panic!("expected draw");
        };
        assert_eq!(outer.base.background_color, "#ff0000");
        // Opposite winding under nonzero: the inner ring renders hollow.
        assert_eq!(inner.base.background_color, "transparent");
    }

    #[test]
    fn single_subpath_path_has_no_group() {
        let els = synth_all(
            r##"<svg><path fill="#00ff00" d="M 0 0 H 10 V 10 H 0 Z"/></svg>"##,
            "path",
        );
        assert_eq!(els.len(), 1);
        assert!(els[0].base().group_ids.is_empty());
    }

    #[test]
    fn open_subpath_without_stroke_is_dropped() {
        let els = synth_all(
            r##"<svg><path fill="none" d="M 0 0 L 10 10"/></svg>"##,
            "path",
        );
        assert!(els.is_empty());
    }

    #[test]
    fn open_stroked_subpath_becomes_a_line() {
        let els = synth_all(
            r##"<svg><path stroke="#123456" fill="none" d="M 0 0 L 10 10"/></svg>"##,
            "path",
        );
        assert_eq!(els.len(), 1);
        let Element::Line(line) = &els[0] else {
            panic!("expected line");
        };
        assert_eq!(line.base.stroke_color, "#123456");
        assert_eq!(line.base.background_color, "transparent");
    }

    #[test]
    fn closed_fill_only_path_forces_zero_stroke_width() {
        let els = synth_all(
            r##"<svg><path fill="#0000ff" stroke="none" d="M 0 0 H 10 V 10 H 0 Z"/></svg>"##,
            "path",
        );
        assert_eq!(els.len(), 1);
        let Element::Draw(draw) = &els[0] else {
            panic!("expected draw");
        };
        assert_eq!(draw.base.stroke_width, 0.0);
        assert_eq!(draw.base.background_color, "#0000ff");
    }

    #[test]
    fn text_estimates_box_and_centers_on_anchor() {
        let el = synth_first(
            r#"<svg><text x="0" y="0" text-anchor="middle">Hello</text></svg>"#,
            "text",
        )
        .unwrap();
        let Element::Text(text) = &el else {
            panic!("expected text");
        };
        assert_eq!(text.text, "Hello");
        assert_eq!(text.font_size, 20.0);
        let width = 5.0 * 20.0 * 0.6;
        assert_eq!(text.base.width, width);
        assert_eq!(text.base.height, 25.0);
        assert_eq!(text.text_align, "center");
        assert_eq!(text.base.x, -width / 2.0);
        assert_eq!(text.base.y, 0.0);
    }

    #[test]
    fn text_joins_spans_and_uses_span_anchor() {
        let el = synth_first(
            r#"<svg><text><tspan x="3" y="4">one</tspan><tspan x="3" y="20">two</tspan></text></svg>"#,
            "text",
        )
        .unwrap();
        let Element::Text(text) = &el else {
            panic!("expected text");
        };
        assert_eq!(text.text, "one\ntwo");
        assert_eq!(text.base.height, 50.0);
        assert_eq!(text.base.x, 3.0);
        assert_eq!(text.base.y, 4.0);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(synth_all(r#"<svg><text x="1" y="1">   </text></svg>"#, "text").is_empty());
    }

    #[test]
    fn text_color_comes_from_fill() {
        let el = synth_first(
            r##"<svg><text x="0" y="0" fill="#aa00aa">hi</text></svg>"##,
            "text",
        )
        .unwrap();
        assert_eq!(el.base().stroke_color, "#aa00aa");
    }

    #[test]
    fn dasharray_marks_stroke_style_dashed() {
        let el = synth_first(
            r##"<svg><rect width="4" height="4" stroke="#000" stroke-dasharray="4 2"/></svg>"##,
            "rect",
        )
        .unwrap();
        assert_eq!(el.base().stroke_style, "dashed");
    }
}
