use crate::dom;
use tracing::debug;

// 2D affine map in SVG order: | a c e |
//                             | b d f |
// Composition is plain matrix multiplication; `m1.mul(m2)` applies m2 to a
// point first, then m1, matching nested coordinate-system semantics.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: tx,
            f: ty,
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn rotate(deg: f64) -> Self {
        let rad = deg.to_radians();
        let s = libm::sin(rad);
        let c = libm::cos(rad);
        Self {
            a: c,
            b: s,
            c: -s,
            d: c,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn skew_x(deg: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: libm::tan(deg.to_radians()),
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn skew_y(deg: f64) -> Self {
        Self {
            a: 1.0,
            b: libm::tan(deg.to_radians()),
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn mul(self, other: Self) -> Self {
        // [self] * [other]
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

pub fn transform_points(points: &[(f64, f64)], m: Matrix) -> Vec<(f64, f64)> {
    points.iter().map(|&p| m.apply(p)).collect()
}

// The node's own `transform` attribute as one matrix. Absent or malformed
// declarations degrade to identity; a bad function never poisons the rest of
// the list.
pub fn own_transform(node: roxmltree::Node<'_, '_>) -> Matrix {
    match dom::attr(node, "transform") {
        Some(t) => parse_transform_list(t),
        None => Matrix::identity(),
    }
}

pub fn parse_transform_list(input: &str) -> Matrix {
    let mut out = Matrix::identity();
    let mut s = input.trim();

    while !s.is_empty() {
        // Find function name + (...)
        let Some(open) = s.find('(') else {
            debug!(rest = s, "transform list has trailing junk");
            break;
        };
        let name = s[..open].trim();
        let Some(close) = s[open + 1..].find(')') else {
            debug!(rest = s, "transform list has unbalanced parentheses");
            break;
        };
        let args = parse_number_list(&s[open + 1..open + 1 + close]);

        let m = match name {
            "translate" => {
                let tx = args.first().copied().unwrap_or(0.0);
                let ty = args.get(1).copied().unwrap_or(0.0);
                Matrix::translate(tx, ty)
            }
            "scale" => {
                let sx = args.first().copied().unwrap_or(1.0);
                let sy = args.get(1).copied().unwrap_or(sx);
                Matrix::scale(sx, sy)
            }
            "rotate" => {
                let a = args.first().copied().unwrap_or(0.0);
                if args.len() >= 3 {
                    let cx = args[1];
                    let cy = args[2];
                    Matrix::translate(cx, cy)
                        .mul(Matrix::rotate(a))
                        .mul(Matrix::translate(-cx, -cy))
                } else {
                    Matrix::rotate(a)
                }
            }
            "skewX" => Matrix::skew_x(args.first().copied().unwrap_or(0.0)),
            "skewY" => Matrix::skew_y(args.first().copied().unwrap_or(0.0)),
            "matrix" => {
                if args.len() >= 6 {
                    Matrix {
                        a: args[0],
                        b: args[1],
                        c: args[2],
                        d: args[3],
                        e: args[4],
                        f: args[5],
                    }
                } else {
                    Matrix::identity()
                }
            }
            other => {
                debug!(function = other, "unsupported transform function");
                Matrix::identity()
            }
        };

        out = out.mul(m);
        s = s[open + 1 + close + 1..].trim_start();
    }

    out
}

// Composed matrix for rendering a point of `node`: the node's own transform
// applied first, then every ancestor's, outermost last. The walk stops at
// (and excludes) the root `<svg>` coordinate system.
pub fn accumulated(node: roxmltree::Node<'_, '_>) -> Matrix {
    let mut chain = vec![own_transform(node)];
    let mut cursor = dom::parent_element(node);
    while let Some(parent) = cursor {
        if dom::has_tag(parent, "svg") {
            break;
        }
        chain.push(own_transform(parent));
        cursor = dom::parent_element(parent);
    }
    chain
        .into_iter()
        .rev()
        .fold(Matrix::identity(), |acc, m| acc.mul(m))
}

fn parse_number_list(input: &str) -> Vec<f64> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<f64>().ok())
        .collect()
}
