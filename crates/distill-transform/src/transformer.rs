//! Recursive raw-tree → output-tree transformation.
//!
//! The walk is pre-order and follows child order, so token identifiers are
//! issued deterministically. The token registry is the only state shared
//! between nodes.

use crate::{geometry, image, instance, notes, prototype, style, text};
use distill_analyze::Analyzer;
use distill_core::{
    is_supported, ExportError, ExportOptions, LayoutMode, NodeKind, OutputNode, RawNode, Result,
    TokenDictionary, TokenRegistry, ZOrder,
};
use log::{debug, trace, warn};

/// Output variant for a host tag without image or text handling.
fn kind_for(node: &RawNode) -> NodeKind {
    match node.node_type.as_str() {
        "GROUP" => NodeKind::Group,
        "RECTANGLE" => NodeKind::Rectangle,
        "ELLIPSE" => NodeKind::Ellipse,
        "INSTANCE" => NodeKind::Instance(instance::instance_content(node)),
        _ if node.is_vector_family() => NodeKind::Vector,
        // FRAME, COMPONENT, COMPONENT_SET, SECTION and anything unrecognised.
        _ => NodeKind::Frame,
    }
}

/// Walks one raw tree and owns the token registry for that export.
pub struct Transformer<'a> {
    options: &'a ExportOptions,
    analyzer: Analyzer,
    tokens: TokenRegistry,
}

impl<'a> Transformer<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self {
            options,
            analyzer: Analyzer::with_thresholds(&options.thresholds),
            tokens: TokenRegistry::with_extraction(options.extract_tokens),
        }
    }

    /// Transform the selected root.
    ///
    /// A hidden, failed, or unsupported root leaves nothing to export.
    pub fn transform_root(&mut self, root: &RawNode) -> Result<OutputNode> {
        if !root.is_visible() {
            return Err(ExportError::nothing(format!("root {} is hidden", root.id)));
        }
        if let Some(reason) = &root.extraction_error {
            return Err(ExportError::nothing(format!("root {} could not be read: {}", root.id, reason)));
        }
        if !is_supported(&root.node_type) {
            return Err(ExportError::nothing(format!(
                "root {} has unsupported type {}",
                root.id, root.node_type
            )));
        }
        self.transform(root, 0, None, None)
    }

    /// Consume the transformer into the issued token dictionary.
    pub fn finish(self) -> TokenDictionary {
        self.tokens.drain()
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    fn transform(
        &mut self,
        node: &RawNode,
        depth: u32,
        parent_layout: Option<LayoutMode>,
        z: Option<ZOrder>,
    ) -> Result<OutputNode> {
        if let Some(field) = geometry::non_finite_field(node) {
            return Err(ExportError::malformed(&node.id, format!("{} is not a finite number", field)));
        }

        let keep_defaults = !self.options.optimize_size;
        let (display_name, name_note) = notes::split_name(&node.name);

        let kind = if let Some(paint) = node.image_fill() {
            NodeKind::Image(image::image_content(node, paint, &self.options.thresholds))
        } else if node.is_text() {
            NodeKind::Text(text::text_content(node, &mut self.tokens))
        } else {
            kind_for(node)
        };
        let is_text = matches!(kind, NodeKind::Text(_));

        let mut out = OutputNode::new(kind, node.id.clone(), display_name);

        let (width, height) = geometry::dimensions(node);
        out.width = Some(width);
        out.height = Some(height);
        if let Some((x, y)) = geometry::absolute_position(node) {
            out.x = Some(x);
            out.y = Some(y);
        }
        out.rotation = style::rotation(node);
        out.opacity = style::opacity(node);
        out.overflow = style::overflow(node);
        out.blend = style::blend(node);

        // Text fills are the glyph color, already carried by the text payload.
        if !is_text {
            out.background = style::background(node, &mut self.tokens);
        }
        out.border = style::border(node, &mut self.tokens, keep_defaults);
        out.shadow = style::shadow(node, &mut self.tokens);
        (out.blur, out.backdrop_blur) = style::blurs(node);
        out.radius = geometry::radius(node);
        out.layout = geometry::layout(node, keep_defaults);
        out.z = z;

        let annotations = self.analyzer.annotate(node, parent_layout);
        out.semantic = annotations.semantic;
        out.pattern = annotations.pattern;
        out.responsive = annotations.responsive;
        out.interactions = prototype::interactions(node);
        out.dev_notes = notes::dev_notes(node, name_note);

        trace!(
            "node {} ({}) -> {} role={:?} pattern={:?}",
            node.id,
            node.node_type,
            out.tag(),
            out.semantic.and_then(|s| s.role),
            out.pattern.map(|p| p.pattern),
        );

        out.children = self.transform_children(node, depth)?;
        Ok(out)
    }

    fn transform_children(&mut self, node: &RawNode, depth: u32) -> Result<Vec<OutputNode>> {
        if !self.options.include_children || node.children.is_empty() {
            return Ok(Vec::new());
        }
        if !self.options.allows_depth(depth + 1) {
            debug!(
                "max depth {} reached at {}; dropping {} children",
                self.options.max_depth,
                node.id,
                node.children.len()
            );
            return Ok(Vec::new());
        }

        let emitted: Vec<&RawNode> = node
            .children
            .iter()
            .filter(|child| self.should_emit(child))
            .collect();

        let count = emitted.len();
        let keep_defaults = !self.options.optimize_size;
        emitted
            .into_iter()
            .enumerate()
            .map(|(index, child)| {
                let z = geometry::z_order(index, count, keep_defaults);
                self.transform(child, depth + 1, Some(node.layout_mode), z)
            })
            .collect()
    }

    fn should_emit(&self, child: &RawNode) -> bool {
        if !child.is_visible() {
            return false;
        }
        if let Some(reason) = &child.extraction_error {
            warn!("skipping subtree {} ({}): {}", child.id, child.name, reason);
            return false;
        }
        if !is_supported(&child.node_type) {
            debug!("excluding unsupported {} node {}", child.node_type, child.id);
            return false;
        }
        true
    }
}
