//! Raw node records.
//!
//! A `RawNode` is a detached snapshot of one design element as produced by
//! the host extraction step. It is a single flat struct whose optional field
//! groups mirror the host plugin API (camelCase on the wire). The pipeline
//! only ever reads it.

use crate::types::{Color, Transform2D};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire marker the host uses for a style value that varies across sub-ranges.
pub const MIXED: &str = "mixed";

/// A value that is either uniform or varies across sub-ranges of the node.
#[derive(Debug, Clone, PartialEq)]
pub enum Mixable<T> {
    Value(T),
    Mixed,
}

impl<T> Mixable<T> {
    /// The uniform value, or `None` when mixed.
    pub fn value(&self) -> Option<&T> {
        match self {
            Mixable::Value(v) => Some(v),
            Mixable::Mixed => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Mixable::Mixed)
    }
}

impl<T> From<T> for Mixable<T> {
    fn from(value: T) -> Self {
        Mixable::Value(value)
    }
}

impl<'de, T: serde::de::DeserializeOwned> Deserialize<'de> for Mixable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_str() == Some(MIXED) {
            return Ok(Mixable::Mixed);
        }
        serde_json::from_value(value)
            .map(Mixable::Value)
            .map_err(serde::de::Error::custom)
    }
}

impl<T: Serialize> Serialize for Mixable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Mixable::Value(v) => v.serialize(serializer),
            Mixable::Mixed => serializer.serialize_str(MIXED),
        }
    }
}

/// Flatten an optional mixable field into its uniform value.
pub fn uniform<T>(field: &Option<Mixable<T>>) -> Option<&T> {
    field.as_ref().and_then(Mixable::value)
}

// Paint

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Video,
    #[serde(other)]
    Unknown,
}

impl PaintType {
    pub fn is_gradient(&self) -> bool {
        matches!(
            self,
            Self::GradientLinear | Self::GradientRadial | Self::GradientAngular | Self::GradientDiamond
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    Fill,
    Fit,
    Crop,
    Tile,
    Stretch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

/// One entry of a fill or stroke list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: PaintType,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gradient_stops: Vec<GradientStop>,
    pub gradient_transform: Option<Transform2D>,
    pub image_hash: Option<String>,
    pub scale_mode: Option<ScaleMode>,
    pub image_transform: Option<Transform2D>,
}

impl Paint {
    fn of(paint_type: PaintType) -> Self {
        Self {
            paint_type,
            visible: None,
            opacity: None,
            color: None,
            gradient_stops: Vec::new(),
            gradient_transform: None,
            image_hash: None,
            scale_mode: None,
            image_transform: None,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::of(PaintType::Solid)
        }
    }

    pub fn gradient(paint_type: PaintType, stops: Vec<GradientStop>) -> Self {
        Self {
            gradient_stops: stops,
            ..Self::of(paint_type)
        }
    }

    pub fn image(hash: impl Into<String>, scale_mode: ScaleMode) -> Self {
        Self {
            image_hash: Some(hash.into()),
            scale_mode: Some(scale_mode),
            ..Self::of(PaintType::Image)
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

// Effects

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    pub visible: Option<bool>,
    #[serde(default)]
    pub radius: f64,
    pub offset: Option<Vector>,
    pub spread: Option<f64>,
    pub color: Option<Color>,
}

impl Effect {
    pub fn shadow(effect_type: EffectType, x: f64, y: f64, radius: f64, color: Option<Color>) -> Self {
        Self {
            effect_type,
            visible: None,
            radius,
            offset: Some(Vector { x, y }),
            spread: None,
            color,
        }
    }

    pub fn blur(effect_type: EffectType, radius: f64) -> Self {
        Self {
            effect_type,
            visible: None,
            radius,
            offset: None,
            spread: None,
            color: None,
        }
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = Some(spread);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn is_shadow(&self) -> bool {
        matches!(self.effect_type, EffectType::DropShadow | EffectType::InnerShadow)
    }
}

// Auto-layout

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    Horizontal,
    Vertical,
    /// No auto-layout. Unknown host modes also land here.
    #[default]
    #[serde(other)]
    None,
}

impl LayoutMode {
    pub fn is_auto(&self) -> bool {
        !matches!(self, LayoutMode::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisSizingMode {
    Fixed,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutSizing {
    Fixed,
    Hug,
    Fill,
}

/// Main- or cross-axis alignment of auto-layout children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    Auto,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    Min,
    Max,
    Center,
    Stretch,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub horizontal: ConstraintType,
    pub vertical: ConstraintType,
}

// Text

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    #[serde(default)]
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureUnit {
    Pixels,
    Percent,
    Auto,
}

/// Line height or letter spacing with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub unit: MeasureUnit,
    pub value: Option<f64>,
}

impl Measure {
    pub fn pixels(value: f64) -> Self {
        Self { unit: MeasureUnit::Pixels, value: Some(value) }
    }

    pub fn percent(value: f64) -> Self {
        Self { unit: MeasureUnit::Percent, value: Some(value) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextTruncation {
    Disabled,
    Ending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    None,
    WidthAndHeight,
    Height,
    Truncate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    #[serde(rename = "type")]
    pub link_type: String,
    pub value: String,
}

/// One uniformly styled run of characters inside a text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    pub characters: String,
    pub font_name: Option<FontName>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    pub text_decoration: Option<TextDecoration>,
    pub hyperlink: Option<Hyperlink>,
}

// Instances and prototyping

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub transition_type: String,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    pub destination_id: Option<String>,
    pub destination_name: Option<String>,
    pub url: Option<String>,
    pub transition: Option<Transition>,
}

/// A prototype reaction. Older hosts report a single `action`, newer ones an
/// `actions` list; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub trigger: Option<Trigger>,
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Reaction {
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.action.iter().chain(self.actions.iter())
    }
}

/// Detached snapshot of one design element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    // Identity
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,

    // Geometry
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub rotation: Option<f64>,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub blend_mode: Option<String>,
    pub clips_content: Option<bool>,

    // Paint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<Mixable<f64>>,
    pub stroke_align: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash_pattern: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,

    // Corner radius
    pub corner_radius: Option<Mixable<f64>>,
    pub top_left_radius: Option<f64>,
    pub top_right_radius: Option<f64>,
    pub bottom_right_radius: Option<f64>,
    pub bottom_left_radius: Option<f64>,

    // Auto-layout
    #[serde(default)]
    pub layout_mode: LayoutMode,
    pub primary_axis_sizing_mode: Option<AxisSizingMode>,
    pub counter_axis_sizing_mode: Option<AxisSizingMode>,
    pub layout_sizing_horizontal: Option<LayoutSizing>,
    pub layout_sizing_vertical: Option<LayoutSizing>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    #[serde(default)]
    pub padding_top: f64,
    #[serde(default)]
    pub padding_right: f64,
    #[serde(default)]
    pub padding_bottom: f64,
    #[serde(default)]
    pub padding_left: f64,
    #[serde(default)]
    pub item_spacing: f64,
    pub counter_axis_spacing: Option<f64>,
    pub layout_wrap: Option<LayoutWrap>,

    // Placement inside the parent
    pub layout_positioning: Option<LayoutPositioning>,
    pub layout_grow: Option<f64>,
    pub layout_align: Option<String>,
    pub constraints: Option<Constraints>,

    // Text
    pub characters: Option<String>,
    pub font_name: Option<Mixable<FontName>>,
    pub font_size: Option<Mixable<f64>>,
    pub font_weight: Option<Mixable<f64>>,
    pub line_height: Option<Mixable<Measure>>,
    pub letter_spacing: Option<Mixable<Measure>>,
    pub text_align_horizontal: Option<TextAlign>,
    pub text_decoration: Option<Mixable<TextDecoration>>,
    pub text_case: Option<Mixable<TextCase>>,
    pub text_truncation: Option<TextTruncation>,
    pub max_lines: Option<u32>,
    pub text_auto_resize: Option<TextAutoResize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styled_segments: Vec<TextSegment>,

    // Component instance linkage
    pub main_component: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variant_properties: IndexMap<String, String>,

    // Prototype
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,

    // Authoring metadata
    pub description: Option<String>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub plugin_data: IndexMap<String, String>,

    /// Set by the extraction step when this subtree could not be snapshotted.
    pub extraction_error: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
}

/// Host tags that belong to the vector family.
pub const VECTOR_FAMILY: &[&str] = &["VECTOR", "LINE", "POLYGON", "STAR", "BOOLEAN_OPERATION"];

/// Host tags with no UI meaning; such nodes are left out of the tree.
pub const UNSUPPORTED_TYPES: &[&str] = &[
    "SLICE",
    "STICKY",
    "CONNECTOR",
    "WIDGET",
    "EMBED",
    "LINK_UNFURL",
    "MEDIA",
    "STAMP",
    "CODE_BLOCK",
    "SHAPE_WITH_TEXT",
    "TABLE",
    "TABLE_CELL",
    "HIGHLIGHT",
    "WASHI_TAPE",
];

pub fn is_supported(node_type: &str) -> bool {
    !UNSUPPORTED_TYPES.contains(&node_type)
}

impl RawNode {
    /// Create a new node record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_stroke(mut self, paint: Paint, weight: f64) -> Self {
        self.strokes.push(paint);
        self.stroke_weight = Some(Mixable::Value(weight));
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(Mixable::Value(radius));
        self
    }

    pub fn with_layout(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    pub fn with_wrap(mut self) -> Self {
        self.layout_wrap = Some(LayoutWrap::Wrap);
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.item_spacing = gap;
        self
    }

    pub fn with_padding(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.padding_top = top;
        self.padding_right = right;
        self.padding_bottom = bottom;
        self.padding_left = left;
        self
    }

    pub fn with_text(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    pub fn with_child(mut self, child: RawNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RawNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn is_text(&self) -> bool {
        self.node_type == "TEXT"
    }

    pub fn is_vector_family(&self) -> bool {
        VECTOR_FAMILY.contains(&self.node_type.as_str())
    }

    /// Children the pipeline emits: visible, successfully extracted, and of a
    /// supported type.
    pub fn visible_children(&self) -> impl Iterator<Item = &RawNode> {
        self.children
            .iter()
            .filter(|c| c.is_visible() && c.extraction_error.is_none() && is_supported(&c.node_type))
    }

    pub fn visible_fills(&self) -> impl Iterator<Item = &Paint> {
        self.fills.iter().filter(|p| p.is_visible())
    }

    pub fn visible_strokes(&self) -> impl Iterator<Item = &Paint> {
        self.strokes.iter().filter(|p| p.is_visible())
    }

    pub fn visible_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(|e| e.is_visible())
    }

    /// First visible image fill, if any.
    pub fn image_fill(&self) -> Option<&Paint> {
        self.visible_fills().find(|p| p.paint_type == PaintType::Image)
    }

    pub fn has_visible_stroke(&self) -> bool {
        self.visible_strokes().next().is_some()
            && uniform(&self.stroke_weight).map_or(true, |w| *w > 0.0)
    }

    /// Largest declared corner radius, uniform or per-corner.
    pub fn max_corner_radius(&self) -> f64 {
        let corners = [
            self.top_left_radius,
            self.top_right_radius,
            self.bottom_right_radius,
            self.bottom_left_radius,
        ];
        let per_corner = corners.iter().flatten().copied().fold(0.0, f64::max);
        uniform(&self.corner_radius).copied().unwrap_or(0.0).max(per_corner)
    }

    /// Width sizing relative to the node's own layout direction.
    ///
    /// An explicit `layoutSizingHorizontal` wins; otherwise an `AUTO` axis
    /// (primary for rows, counter for columns) hugs, as does auto-width text.
    pub fn horizontal_sizing(&self) -> LayoutSizing {
        if let Some(sizing) = self.layout_sizing_horizontal {
            return sizing;
        }
        let axis = match self.layout_mode {
            LayoutMode::Horizontal => self.primary_axis_sizing_mode,
            LayoutMode::Vertical => self.counter_axis_sizing_mode,
            LayoutMode::None => None,
        };
        let auto_text = self.is_text() && self.text_auto_resize == Some(TextAutoResize::WidthAndHeight);
        if axis == Some(AxisSizingMode::Auto) || auto_text {
            LayoutSizing::Hug
        } else {
            LayoutSizing::Fixed
        }
    }

    /// Height sizing, see [`RawNode::horizontal_sizing`].
    pub fn vertical_sizing(&self) -> LayoutSizing {
        if let Some(sizing) = self.layout_sizing_vertical {
            return sizing;
        }
        let axis = match self.layout_mode {
            LayoutMode::Horizontal => self.counter_axis_sizing_mode,
            LayoutMode::Vertical => self.primary_axis_sizing_mode,
            LayoutMode::None => None,
        };
        let auto_text = self.is_text()
            && matches!(
                self.text_auto_resize,
                Some(TextAutoResize::WidthAndHeight | TextAutoResize::Height)
            );
        if axis == Some(AxisSizingMode::Auto) || auto_text {
            LayoutSizing::Hug
        } else {
            LayoutSizing::Fixed
        }
    }

    /// Whether any descendant (or this node) is a text node.
    pub fn has_text_descendant(&self) -> bool {
        self.visible_children()
            .any(|c| c.is_text() || c.has_text_descendant())
    }

    /// Text content of this node or the first text descendant.
    pub fn first_text(&self) -> Option<&str> {
        if self.is_text() {
            return self.characters.as_deref();
        }
        self.visible_children().find_map(|c| c.first_text())
    }

    /// Depth-first iterator over all visible descendants (excluding self).
    pub fn descendants(&self) -> Vec<&RawNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&RawNode> = self.visible_children().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children: Vec<&RawNode> = node.visible_children().collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }
}
