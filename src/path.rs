use crate::geometry::{self, Bounds, Winding};
use crate::transform::{self, Matrix};
use tracing::debug;

// Path decomposition: a `d` command string becomes zero or more flattened
// subpaths in document space. Curves (quadratics and arcs normalized to
// cubics first) are sampled into short line segments; no curve survives to
// the output. A command string with unsupported or out-of-place commands
// contributes nothing rather than failing the conversion.

const CLOSE_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("evenodd") => FillRule::EvenOdd,
            _ => FillRule::NonZero,
        }
    }
}

// One contiguous run of a compound path, flattened and transformed.
// `points` are relative to `origin`; the first entry is always (0, 0).
#[derive(Debug, Clone)]
pub struct Subpath {
    pub points: Vec<(f64, f64)>,
    pub origin: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub bounds: Bounds,
    pub area: f64,
    pub winding: Winding,
    pub closed: bool,
    pub hole: bool,
}

pub fn decompose(d: &str, matrix: Matrix) -> Vec<Subpath> {
    let Some(runs) = flatten_path_data(d) else {
        debug!("unparsable path data; path contributes no subpaths");
        return Vec::new();
    };
    runs.into_iter()
        .filter(|run| run.len() >= 2)
        .map(|run| annotate(run, matrix))
        .collect()
}

fn annotate(run: Vec<(f64, f64)>, matrix: Matrix) -> Subpath {
    let absolute = transform::transform_points(&run, matrix);
    let origin = absolute[0];
    let points: Vec<(f64, f64)> = absolute
        .iter()
        .map(|&(x, y)| (x - origin.0, y - origin.1))
        .collect();
    let bounds = geometry::bounding_box(&absolute);
    let &(lx, ly) = points.last().unwrap_or(&(0.0, 0.0));
    Subpath {
        origin,
        width: bounds.width(),
        height: bounds.height(),
        bounds,
        area: geometry::area(&points),
        winding: geometry::winding(&points),
        closed: libm::hypot(lx, ly) < CLOSE_EPSILON,
        hole: false,
        points,
    }
}

// Hole detection over the subpaths of one source path. Only meaningful for
// compound paths; a lone subpath is never a hole. The largest subpath is
// the outer boundary and always stays solid.
pub fn classify_holes(subpaths: &mut [Subpath], rule: FillRule) {
    if subpaths.len() < 2 {
        return;
    }

    let mut largest = 0;
    for i in 1..subpaths.len() {
        if subpaths[i].area > subpaths[largest].area {
            largest = i;
        }
    }

    for i in 0..subpaths.len() {
        if i == largest {
            continue;
        }
        for j in 0..subpaths.len() {
            if j == i {
                continue;
            }
            let inner = &subpaths[i];
            let candidate = &subpaths[j];
            let compatible = rule == FillRule::EvenOdd
                || inner.winding != candidate.winding
                || j == largest;
            if compatible
                && inner.area < candidate.area
                && geometry::contains(inner.bounds, candidate.bounds)
            {
                subpaths[i].hole = true;
                break;
            }
        }
    }
}

fn flatten_path_data(d: &str) -> Option<Vec<Vec<(f64, f64)>>> {
    let mut scanner = PathScanner::new(d);
    let mut subpaths: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut run: Vec<(f64, f64)> = Vec::new();
    let mut cmd = ' ';
    let mut cur = (0.0, 0.0);
    let mut start = (0.0, 0.0);
    let mut last_cubic_ctrl2: Option<(f64, f64)> = None;
    let mut last_quad_ctrl: Option<(f64, f64)> = None;
    let mut last_pos = usize::MAX;

    while let Some(c) = scanner.next_command_or_repeat(&mut cmd) {
        // A repeated command must consume input; a stalled scanner means
        // unparsable bytes.
        if scanner.i == last_pos {
            return None;
        }
        last_pos = scanner.i;
        match c {
            'M' | 'm' => {
                let rel = c == 'm';
                let Some((x, y)) = scanner.next_pair() else {
                    break;
                };
                let p = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                if !run.is_empty() {
                    subpaths.push(std::mem::take(&mut run));
                }
                run.push(p);
                cur = p;
                start = p;
                last_cubic_ctrl2 = None;
                last_quad_ctrl = None;

                // Implicit subsequent pairs are line-tos.
                while let Some((x, y)) = scanner.next_pair() {
                    let p = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                    run.push(p);
                    cur = p;
                }
            }
            'L' | 'l' => {
                let rel = c == 'l';
                while let Some((x, y)) = scanner.next_pair() {
                    let p = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                    ensure_started(&mut run, cur);
                    run.push(p);
                    cur = p;
                }
                last_cubic_ctrl2 = None;
                last_quad_ctrl = None;
            }
            'H' | 'h' => {
                let rel = c == 'h';
                while let Some(x) = scanner.next_number() {
                    let p = (if rel { cur.0 + x } else { x }, cur.1);
                    ensure_started(&mut run, cur);
                    run.push(p);
                    cur = p;
                }
                last_cubic_ctrl2 = None;
                last_quad_ctrl = None;
            }
            'V' | 'v' => {
                let rel = c == 'v';
                while let Some(y) = scanner.next_number() {
                    let p = (cur.0, if rel { cur.1 + y } else { y });
                    ensure_started(&mut run, cur);
                    run.push(p);
                    cur = p;
                }
                last_cubic_ctrl2 = None;
                last_quad_ctrl = None;
            }
            'C' | 'c' => {
                let rel = c == 'c';
                while let (Some(x1), Some(y1), Some(x2), Some(y2), Some(x), Some(y)) = (
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                ) {
                    let (c1, c2, p) = if rel {
                        (
                            (cur.0 + x1, cur.1 + y1),
                            (cur.0 + x2, cur.1 + y2),
                            (cur.0 + x, cur.1 + y),
                        )
                    } else {
                        ((x1, y1), (x2, y2), (x, y))
                    };
                    ensure_started(&mut run, cur);
                    sample_cubic(&mut run, cur, c1, c2, p);
                    cur = p;
                    last_cubic_ctrl2 = Some(c2);
                    last_quad_ctrl = None;
                }
            }
            'S' | 's' => {
                let rel = c == 's';
                while let (Some(x2), Some(y2), Some(x), Some(y)) = (
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                ) {
                    let (c2, p) = if rel {
                        ((cur.0 + x2, cur.1 + y2), (cur.0 + x, cur.1 + y))
                    } else {
                        ((x2, y2), (x, y))
                    };
                    // Reflect the previous cubic's second control point.
                    let c1 = match last_cubic_ctrl2 {
                        Some((px, py)) => (2.0 * cur.0 - px, 2.0 * cur.1 - py),
                        None => cur,
                    };
                    ensure_started(&mut run, cur);
                    sample_cubic(&mut run, cur, c1, c2, p);
                    cur = p;
                    last_cubic_ctrl2 = Some(c2);
                    last_quad_ctrl = None;
                }
            }
            'Q' | 'q' => {
                let rel = c == 'q';
                while let (Some(x1), Some(y1), Some(x), Some(y)) = (
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                ) {
                    let (q, p) = if rel {
                        ((cur.0 + x1, cur.1 + y1), (cur.0 + x, cur.1 + y))
                    } else {
                        ((x1, y1), (x, y))
                    };
                    let (c1, c2) = quad_to_cubic(cur, q, p);
                    ensure_started(&mut run, cur);
                    sample_cubic(&mut run, cur, c1, c2, p);
                    cur = p;
                    last_quad_ctrl = Some(q);
                    last_cubic_ctrl2 = Some(c2);
                }
            }
            'T' | 't' => {
                let rel = c == 't';
                while let Some((x, y)) = scanner.next_pair() {
                    let p = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                    let q = match last_quad_ctrl {
                        Some((px, py)) => (2.0 * cur.0 - px, 2.0 * cur.1 - py),
                        None => cur,
                    };
                    let (c1, c2) = quad_to_cubic(cur, q, p);
                    ensure_started(&mut run, cur);
                    sample_cubic(&mut run, cur, c1, c2, p);
                    cur = p;
                    last_quad_ctrl = Some(q);
                    last_cubic_ctrl2 = Some(c2);
                }
            }
            'A' | 'a' => {
                let rel = c == 'a';
                while let (
                    Some(rx),
                    Some(ry),
                    Some(rot),
                    Some(large),
                    Some(sweep),
                    Some(x),
                    Some(y),
                ) = (
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_number(),
                    scanner.next_arc_flag(),
                    scanner.next_arc_flag(),
                    scanner.next_number(),
                    scanner.next_number(),
                ) {
                    let p = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                    ensure_started(&mut run, cur);
                    let curves = arc_to_cubics(cur, rx, ry, rot, large, sweep, p);
                    if curves.is_empty() {
                        run.push(p);
                    }
                    let mut from = cur;
                    for (c1, c2, end) in &curves {
                        sample_cubic(&mut run, from, *c1, *c2, *end);
                        from = *end;
                    }
                    cur = p;
                    last_cubic_ctrl2 = curves.last().map(|&(_, c2, _)| c2);
                    last_quad_ctrl = None;
                }
            }
            'Z' | 'z' => {
                if !run.is_empty() {
                    run.push(start);
                    subpaths.push(std::mem::take(&mut run));
                }
                cur = start;
                last_cubic_ctrl2 = None;
                last_quad_ctrl = None;
            }
            // Unknown command letters (or leading numbers with no command at
            // all) reject the whole string.
            _ => return None,
        }
    }

    if !run.is_empty() {
        subpaths.push(run);
    }
    Some(subpaths)
}

fn ensure_started(run: &mut Vec<(f64, f64)>, cur: (f64, f64)) {
    if run.is_empty() {
        run.push(cur);
    }
}

// Parametric subdivision: segment count scales with the control-net length
// so long curves stay smooth and short ones stay cheap.
fn sample_cubic(
    run: &mut Vec<(f64, f64)>,
    p0: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    p1: (f64, f64),
) {
    let net = dist(p0, c1) + dist(c1, c2) + dist(c2, p1);
    let steps = (libm::ceil(net / 2.5) as usize).clamp(4, 60);
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        run.push(cubic_point(p0, c1, c2, p1, t));
    }
}

fn cubic_point(
    p0: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    p1: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;
    (
        w0 * p0.0 + w1 * c1.0 + w2 * c2.0 + w3 * p1.0,
        w0 * p0.1 + w1 * c1.1 + w2 * c2.1 + w3 * p1.1,
    )
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    libm::hypot(b.0 - a.0, b.1 - a.1)
}

fn quad_to_cubic(p0: (f64, f64), q: (f64, f64), p1: (f64, f64)) -> ((f64, f64), (f64, f64)) {
    let c1 = (
        p0.0 + (2.0 / 3.0) * (q.0 - p0.0),
        p0.1 + (2.0 / 3.0) * (q.1 - p0.1),
    );
    let c2 = (
        p1.0 + (2.0 / 3.0) * (q.0 - p1.0),
        p1.1 + (2.0 / 3.0) * (q.1 - p1.1),
    );
    (c1, c2)
}

type Cubic = ((f64, f64), (f64, f64), (f64, f64));

// SVG elliptical arc to cubic Béziers via center parameterization (SVG 1.1
// implementation notes), split into segments of at most 90 degrees.
fn arc_to_cubics(
    from: (f64, f64),
    rx_in: f64,
    ry_in: f64,
    x_axis_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: (f64, f64),
) -> Vec<Cubic> {
    use std::f64::consts::PI;

    let (x0, y0) = from;
    let (x1, y1) = to;
    let mut rx = rx_in.abs();
    let mut ry = ry_in.abs();
    if rx == 0.0 || ry == 0.0 || (x0 == x1 && y0 == y1) {
        return Vec::new();
    }

    let phi = x_axis_rotation_deg.to_radians();
    let sin_phi = libm::sin(phi);
    let cos_phi = libm::cos(phi);

    // Step 1: compute (x1', y1')
    let dx2 = (x0 - x1) / 2.0;
    let dy2 = (y0 - y1) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Step 2: ensure radii are large enough
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = libm::sqrt(lambda);
        rx *= s;
        ry *= s;
    }

    // Step 3: compute center (cx', cy')
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let num = rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2;
    let den = rx2 * y1p2 + ry2 * x1p2;
    let mut coef = 0.0;
    if den != 0.0 {
        let sign = if large_arc == sweep { -1.0 } else { 1.0 };
        coef = sign * libm::sqrt((num / den).max(0.0));
    }
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    // Step 4: compute center (cx, cy)
    let cx = cos_phi * cxp - sin_phi * cyp + (x0 + x1) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y0 + y1) / 2.0;

    // Step 5: compute angles
    fn angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
        let dot = ux * vx + uy * vy;
        let det = ux * vy - uy * vx;
        libm::atan2(det, dot)
    }

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let mut theta1 = angle(1.0, 0.0, ux, uy);
    let mut dtheta = angle(ux, uy, vx, vy);

    if !sweep && dtheta > 0.0 {
        dtheta -= 2.0 * PI;
    } else if sweep && dtheta < 0.0 {
        dtheta += 2.0 * PI;
    }

    let segments = libm::ceil(dtheta.abs() / (PI / 2.0)).max(1.0) as i32;
    let delta = dtheta / segments as f64;

    let mut out = Vec::with_capacity(segments as usize);
    for _ in 0..segments {
        out.push(arc_segment_to_cubic(
            cx,
            cy,
            rx,
            ry,
            sin_phi,
            cos_phi,
            theta1,
            theta1 + delta,
        ));
        theta1 += delta;
    }
    out
}

fn arc_segment_to_cubic(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
    t1: f64,
    t2: f64,
) -> Cubic {
    let dt = t2 - t1;
    let k = (4.0 / 3.0) * libm::tan(dt / 4.0);

    let s1 = libm::sin(t1);
    let c1 = libm::cos(t1);
    let s2 = libm::sin(t2);
    let c2 = libm::cos(t2);

    // Unit circle control points, then ellipse -> rotate -> translate.
    let map = |x: f64, y: f64| -> (f64, f64) {
        let x = rx * x;
        let y = ry * y;
        (
            cx + cos_phi * x - sin_phi * y,
            cy + sin_phi * x + cos_phi * y,
        )
    };

    (
        map(c1 - k * s1, s1 + k * c1),
        map(c2 + k * s2, s2 - k * c2),
        map(c2, s2),
    )
}

struct PathScanner<'a> {
    bytes: &'a [u8],
    i: usize,
}

impl<'a> PathScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            i: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b' ' | b'\n' | b'\r' | b'\t' | b',' => self.i += 1,
                _ => break,
            }
        }
    }

    fn next_command_or_repeat(&mut self, current: &mut char) -> Option<char> {
        self.skip_ws();
        if self.i >= self.bytes.len() {
            return None;
        }
        let c = self.bytes[self.i] as char;
        if c.is_ascii_alphabetic() {
            *current = c;
            self.i += 1;
            return Some(c);
        }
        // No new command letter; repeat the previous one. A still-unset
        // command means the string led with numbers, which the caller
        // rejects.
        Some(*current)
    }

    fn next_number(&mut self) -> Option<f64> {
        self.skip_ws();
        if self.i >= self.bytes.len() {
            return None;
        }
        let start = self.i;
        let mut has = false;

        if matches!(self.bytes[self.i], b'+' | b'-') {
            self.i += 1;
        }
        while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
            self.i += 1;
            has = true;
        }
        if self.i < self.bytes.len() && self.bytes[self.i] == b'.' {
            self.i += 1;
            while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
                self.i += 1;
                has = true;
            }
        }
        if has && self.i < self.bytes.len() && matches!(self.bytes[self.i], b'e' | b'E') {
            let mark = self.i;
            self.i += 1;
            if self.i < self.bytes.len() && matches!(self.bytes[self.i], b'+' | b'-') {
                self.i += 1;
            }
            let mut exp_digits = false;
            while self.i < self.bytes.len() && self.bytes[self.i].is_ascii_digit() {
                self.i += 1;
                exp_digits = true;
            }
            if !exp_digits {
                self.i = mark;
            }
        }

        if !has {
            self.i = start;
            return None;
        }

        std::str::from_utf8(&self.bytes[start..self.i])
            .ok()?
            .parse::<f64>()
            .ok()
    }

    // Arc flags may be packed against the following number ("01" = two
    // flags), so a lone leading 0/1 byte is taken as the flag.
    fn next_arc_flag(&mut self) -> Option<bool> {
        self.skip_ws();
        if self.i >= self.bytes.len() {
            return None;
        }
        match self.bytes[self.i] {
            b'0' => {
                self.i += 1;
                Some(false)
            }
            b'1' => {
                self.i += 1;
                Some(true)
            }
            _ => self.next_number().map(|v| v.abs() > 0.5),
        }
    }

    fn next_pair(&mut self) -> Option<(f64, f64)> {
        let x = self.next_number()?;
        let y = self.next_number()?;
        Some((x, y))
    }
}
