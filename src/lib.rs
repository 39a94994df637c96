mod convert;
mod dom;
mod error;
mod geometry;
mod path;
mod scene;
mod style;
mod synth;
mod transform;

pub use convert::{convert, convert_with};
pub use error::RedrawError;
pub use geometry::{Bounds, Winding};
pub use path::{FillRule, Subpath};
pub use scene::{
    Arrowhead, ArrowElement, DOCUMENT_KIND, DOCUMENT_SOURCE, DOCUMENT_VERSION, Document, Element,
    ElementBase, ElementFactory, LinearElement, ShapeElement, TextElement,
};
pub use style::StyleContext;
pub use transform::Matrix;
