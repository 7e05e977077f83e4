//! Responsive sizing hints.

use crate::rules::{first_match, NameRule};
use distill_core::{
    Breakpoint, ConstraintType, LayoutMode, LayoutSizing, Num, RawNode, ResponsiveBlock, Thresholds,
};
use once_cell::sync::Lazy;

static BREAKPOINT_RULES: Lazy<Vec<NameRule<Breakpoint>>> = Lazy::new(|| {
    vec![
        NameRule::new(Breakpoint::Mobile, r"\b(mobile|phone|iphone|i phone|android)\b"),
        NameRule::new(Breakpoint::Tablet, r"\b(tablet|ipad|i pad)\b"),
        NameRule::new(Breakpoint::Desktop, r"\b(desktop|laptop|web)\b"),
        NameRule::new(Breakpoint::Wide, r"\b(wide|widescreen|ultrawide|large ?screen|xl)\b"),
    ]
});

/// Infers breakpoint, fluid width, and flex grow/shrink for a node.
pub struct ResponsiveAnalyzer {
    thresholds: Thresholds,
}

impl ResponsiveAnalyzer {
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Analyze a node placed inside a parent with `parent_layout`.
    ///
    /// Returns `None` when nothing was inferred.
    pub fn analyze(&self, node: &RawNode, parent_layout: Option<LayoutMode>) -> Option<ResponsiveBlock> {
        let in_auto_layout = parent_layout.is_some_and(|l| l.is_auto());

        let block = ResponsiveBlock {
            breakpoint: self.breakpoint(node),
            fluid: self.is_fluid(node).then_some(true),
            grow: node
                .layout_grow
                .filter(|g| in_auto_layout && *g > 0.0)
                .map(Num::dec2),
            shrink: (in_auto_layout && node.layout_grow == Some(0.0)).then_some(Num(0.0)),
        };

        (!block.is_empty()).then_some(block)
    }

    /// Name keyword first, then the absolute width bucket.
    pub fn breakpoint(&self, node: &RawNode) -> Option<Breakpoint> {
        if let Some(named) = first_match(&BREAKPOINT_RULES, &node.name) {
            return Some(named);
        }
        let t = &self.thresholds;
        match node.width {
            w if w >= t.wide_min_width => Some(Breakpoint::Wide),
            w if w >= t.desktop_min_width => Some(Breakpoint::Desktop),
            w if w >= t.tablet_min_width => Some(Breakpoint::Tablet),
            _ => None,
        }
    }

    fn is_fluid(&self, node: &RawNode) -> bool {
        let sizing = node.horizontal_sizing();
        if sizing == LayoutSizing::Hug {
            return false;
        }
        let stretches = node
            .constraints
            .is_some_and(|c| matches!(c.horizontal, ConstraintType::Stretch | ConstraintType::Scale));
        stretches || sizing == LayoutSizing::Fill
    }
}

impl Default for ResponsiveAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
