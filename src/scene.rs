use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Serialize;

// The clipboard-facing data model. Field names and envelope constants are
// fixed by the downstream scene schema; serialization must stay bit-exact on
// key names, so everything here is camelCase via serde and the envelope
// constants never change without a schema version bump.

pub const DOCUMENT_KIND: &str = "scene";
pub const DOCUMENT_VERSION: u32 = 2;
pub const DOCUMENT_SOURCE: &str = "redraw";

const ID_LEN: usize = 21;

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub kind: &'static str,
    pub version: u32,
    pub source: &'static str,
    pub elements: Vec<Element>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            kind: DOCUMENT_KIND,
            version: DOCUMENT_VERSION,
            source: DOCUMENT_SOURCE,
            elements,
        }
    }

    // The clipboard text downstream collaborators paste from.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rectangle(ShapeElement),
    Ellipse(ShapeElement),
    Line(LinearElement),
    Arrow(ArrowElement),
    Draw(LinearElement),
    Text(TextElement),
}

impl Element {
    pub fn base(&self) -> &ElementBase {
        match self {
            Element::Rectangle(e) | Element::Ellipse(e) => &e.base,
            Element::Line(e) | Element::Draw(e) => &e.base,
            Element::Arrow(e) => &e.base,
            Element::Text(e) => &e.base,
        }
    }
}

// Attributes every scene element carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: &'static str,
    pub stroke_width: f64,
    pub stroke_style: &'static str,
    pub stroke_sharpness: &'static str,
    pub roughness: u32,
    pub opacity: f64,
    pub seed: u32,
    pub version_nonce: u32,
    pub group_ids: Vec<String>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(flatten)]
    pub base: ElementBase,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub points: Vec<[f64; 2]>,
    pub start_arrowhead: Option<Arrowhead>,
    pub end_arrowhead: Option<Arrowhead>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub text: String,
    pub font_size: f64,
    pub text_align: &'static str,
    pub vertical_align: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    Arrow,
    Dot,
    Bar,
}

// Mints base records with fresh ids and random seeds. The generator is
// injected so tests run on a seeded source and assert on everything else.
pub struct ElementFactory<R: Rng> {
    rng: R,
}

impl<R: Rng> ElementFactory<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn base(&mut self) -> ElementBase {
        ElementBase {
            id: self.fresh_id(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            stroke_color: "#000000".to_string(),
            background_color: "transparent".to_string(),
            fill_style: "solid",
            stroke_width: 1.0,
            stroke_style: "solid",
            stroke_sharpness: "sharp",
            roughness: 0,
            opacity: 100.0,
            seed: self.nonce(),
            version_nonce: self.nonce(),
            group_ids: Vec::new(),
            is_deleted: false,
        }
    }

    pub fn fresh_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| char::from(self.rng.sample(Alphanumeric)))
            .collect()
    }

    fn nonce(&mut self) -> u32 {
        self.rng.gen_range(1..2_000_000_000)
    }
}
