//! Minimized output tree.
//!
//! Every optional field is skipped when absent; absence means "use the
//! documented default" (visible, opacity 1, overflow visible, start alignment).
//! Keys are deliberately short since the consumer is a language model with a
//! limited context window.

use crate::tokens::TokenDictionary;
use crate::types::Num;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Envelope format version.
pub const FORMAT_VERSION: &str = "1.0";

/// The final export document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub version: String,
    pub document_name: String,
    pub tokens: TokenDictionary,
    pub tree: OutputNode,
}

/// Variant-specific node payload, keyed by the `t` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "t", rename_all = "lowercase")]
pub enum NodeKind {
    Frame,
    Text(TextContent),
    Image(ImageContent),
    Rectangle,
    Ellipse,
    Vector,
    Group,
    Instance(InstanceContent),
}

impl NodeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Frame => "frame",
            NodeKind::Text(_) => "text",
            NodeKind::Image(_) => "image",
            NodeKind::Rectangle => "rectangle",
            NodeKind::Ellipse => "ellipse",
            NodeKind::Vector => "vector",
            NodeKind::Group => "group",
            NodeKind::Instance(_) => "instance",
        }
    }
}

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputNode {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub id: String,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "w", skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(rename = "h", skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Num>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Num>,
    #[serde(rename = "rot", skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Num>,
    #[serde(rename = "op", skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Num>,
    #[serde(rename = "vis", skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(rename = "ov", skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend: Option<String>,
    #[serde(rename = "bg", skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(rename = "bd", skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(rename = "sh", skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<Num>,
    #[serde(rename = "bblur", skip_serializing_if = "Option::is_none")]
    pub backdrop_blur: Option<Num>,
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub radius: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<ZOrder>,
    #[serde(rename = "sem", skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternBlock>,
    #[serde(rename = "resp", skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveBlock>,
    #[serde(rename = "ix", skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
    #[serde(rename = "dev", skip_serializing_if = "Option::is_none")]
    pub dev_notes: Option<DevNotes>,
    #[serde(rename = "ch", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutputNode>,
}

impl OutputNode {
    /// Create a node with every optional field absent.
    pub fn new(kind: NodeKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            width: None,
            height: None,
            x: None,
            y: None,
            rotation: None,
            opacity: None,
            visible: None,
            overflow: None,
            blend: None,
            background: None,
            border: None,
            shadow: None,
            blur: None,
            backdrop_blur: None,
            radius: None,
            layout: None,
            z: None,
            semantic: None,
            pattern: None,
            responsive: None,
            interactions: Vec::new(),
            dev_notes: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn text(&self) -> Option<&TextContent> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageContent> {
        match &self.kind {
            NodeKind::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn instance(&self) -> Option<&InstanceContent> {
        match &self.kind {
            NodeKind::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, self included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutputNode::node_count).sum::<usize>()
    }
}

/// Width or height: a pixel size or a symbolic sizing mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Px(Num),
    Hug,
    Fill,
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Px(n) => n.serialize(serializer),
            Dimension::Hug => serializer.serialize_str("hug"),
            Dimension::Fill => serializer.serialize_str("fill"),
        }
    }
}

/// A uniform value or four per-side values.
///
/// Padding sides are `[top, right, bottom, left]`; radius corners are
/// `[top-left, top-right, bottom-right, bottom-left]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Edges {
    Uniform(Num),
    Sides([Num; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Background {
    /// Color literal or token reference.
    Color(String),
    Gradient(Gradient),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
    Conic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub stops: Vec<ColorStop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<Num>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    #[serde(rename = "p")]
    pub position: Num,
    #[serde(rename = "c")]
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    #[serde(rename = "w")]
    pub width: Num,
    #[serde(rename = "c")]
    pub color: String,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    Col,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    Center,
    End,
    Between,
    Baseline,
}

/// Auto-layout parameters of a container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    pub dir: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<Num>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross: Option<Align>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<Num>,
}

/// Position of a node among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZOrder {
    pub order: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_last: Option<bool>,
}

/// UI role inferred for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Button,
    Input,
    Card,
    Nav,
    Header,
    Footer,
    Modal,
    Badge,
    Avatar,
    Icon,
    Link,
    List,
    ListItem,
    Tab,
    Menu,
    Tooltip,
    Dropdown,
}

impl Role {
    /// Roles a user can act on directly.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Role::Button | Role::Input | Role::Link | Role::Tab | Role::Menu | Role::Dropdown | Role::ListItem
        )
    }
}

/// Visual state of a component variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentState {
    Default,
    Hover,
    Active,
    Disabled,
    Focus,
    Selected,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SemanticBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ComponentState>,
}

/// Repeating-layout pattern of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Grid,
    List,
    Carousel,
    Tabs,
    Accordion,
    Form,
    Table,
    Breadcrumbs,
    Pagination,
    Stepper,
    Gallery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBlock {
    pub pattern: PatternKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

impl PatternBlock {
    pub fn new(pattern: PatternKind) -> Self {
        Self {
            pattern,
            item_count: None,
            columns: None,
            rows: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResponsiveBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Breakpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grow: Option<Num>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shrink: Option<Num>,
}

impl ResponsiveBlock {
    pub fn is_empty(&self) -> bool {
        self.breakpoint.is_none() && self.fluid.is_none() && self.grow.is_none() && self.shrink.is_none()
    }
}

/// A prototype interaction attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub on: String,
    #[serde(rename = "do")]
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "tr", skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(rename = "ms", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<Num>,
}

/// Authoring metadata for developers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DevNotes {
    #[serde(rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<IndexMap<String, String>>,
}

/// Line height or letter spacing in the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    Px(Num),
    Percent(Num),
}

impl Serialize for Spacing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Spacing::Px(n) => n.serialize(serializer),
            Spacing::Percent(n) => {
                let value = serde_json::to_string(n).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&format!("{}%", value))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignOut {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decoration {
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Case {
    Upper,
    Lower,
    Title,
    SmallCaps,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextContent {
    pub txt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(rename = "fs", skip_serializing_if = "Option::is_none")]
    pub size: Option<Num>,
    #[serde(rename = "fw", skip_serializing_if = "Option::is_none")]
    pub weight: Option<Num>,
    #[serde(rename = "it", skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "lh", skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Spacing>,
    #[serde(rename = "ls", skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Spacing>,
    #[serde(rename = "ta", skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlignOut>,
    #[serde(rename = "td", skip_serializing_if = "Option::is_none")]
    pub decoration: Option<Decoration>,
    #[serde(rename = "tc", skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trunc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<TextRun>,
}

/// One distinctly styled run of a rich-text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextRun {
    pub txt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(rename = "fs", skip_serializing_if = "Option::is_none")]
    pub size: Option<Num>,
    #[serde(rename = "fw", skip_serializing_if = "Option::is_none")]
    pub weight: Option<Num>,
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "it", skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(rename = "u", skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub strike: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Cover,
    Contain,
    Fill,
    Repeat,
}

/// Visible part of the source image, as fractions of its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRect {
    pub x: Num,
    pub y: Num,
    pub w: Num,
    pub h: Num,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AspectRatio {
    /// A common ratio such as `16:9`.
    Named(String),
    Ratio(Num),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropRect>,
    #[serde(rename = "ar", skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comp_desc: Option<String>,
}
