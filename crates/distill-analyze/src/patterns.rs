//! Repeating-layout pattern recognition.
//!
//! A container is labelled from its name when possible; otherwise structural
//! detectors run in a fixed priority (grid, carousel, tabs, stepper, form,
//! list) and the first hit wins.

use crate::rules::{first_match, words, NameRule};
use distill_core::{LayoutMode, LayoutWrap, PatternBlock, PatternKind, RawNode, Thresholds};
use once_cell::sync::Lazy;
use regex::Regex;

/// Name keywords per pattern, in tie-break order.
static PATTERN_RULES: Lazy<Vec<NameRule<PatternKind>>> = Lazy::new(|| {
    vec![
        NameRule::new(PatternKind::Grid, r"\bgrids?\b"),
        NameRule::new(PatternKind::List, r"\blists?\b").except(r"\blist ?item"),
        NameRule::new(PatternKind::Carousel, r"\b(carousel|slider|slideshow)\b"),
        NameRule::new(PatternKind::Tabs, r"\b(tabs|tab ?bar|tab ?list|tab ?group)\b"),
        NameRule::new(PatternKind::Accordion, r"\b(accordion|collapsible|expandable)\b"),
        NameRule::new(PatternKind::Form, r"\bform\b"),
        NameRule::new(PatternKind::Table, r"\b(table|data ?table)\b"),
        NameRule::new(PatternKind::Breadcrumbs, r"\bbreadcrumbs?\b"),
        NameRule::new(PatternKind::Pagination, r"\b(pagination|pager|paginator)\b"),
        NameRule::new(PatternKind::Stepper, r"\b(stepper|steps|wizard|progress ?steps)\b"),
        NameRule::new(PatternKind::Gallery, r"\bgallery\b"),
    ]
});

static INPUT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(input|field|text ?field|text ?area|textarea|email|password|search)\b")
        .expect("input name pattern")
});

static BUTTON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(button|btn|submit|cta)\b").expect("button name pattern"));

static STEP_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^(\d+|step.*)$").expect("step text pattern"));

/// Recognizes repeating UI patterns among a node's children.
pub struct PatternRecognizer {
    thresholds: Thresholds,
}

impl PatternRecognizer {
    /// Create a new pattern recognizer.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a container; `None` when no pattern applies.
    pub fn recognize(&self, node: &RawNode) -> Option<PatternBlock> {
        let children: Vec<&RawNode> = node.visible_children().collect();

        if let Some(kind) = first_match(&PATTERN_RULES, &node.name) {
            let mut block = PatternBlock::new(kind);
            block.item_count = (!children.is_empty()).then_some(children.len());
            if kind == PatternKind::Grid && wraps(node) {
                self.fill_grid_dimensions(node, &children, &mut block);
            }
            return Some(block);
        }

        let kind = if self.is_grid(node, &children) {
            PatternKind::Grid
        } else if self.is_carousel(node, &children) {
            PatternKind::Carousel
        } else if self.is_tabs(node, &children) {
            PatternKind::Tabs
        } else if self.is_stepper(node, &children) {
            PatternKind::Stepper
        } else if self.is_form(node) {
            PatternKind::Form
        } else if self.is_list(node, &children) {
            PatternKind::List
        } else {
            return None;
        };

        let mut block = PatternBlock::new(kind);
        block.item_count = Some(children.len());
        if kind == PatternKind::Grid {
            self.fill_grid_dimensions(node, &children, &mut block);
        }
        Some(block)
    }

    /// Column estimate from container and first-child widths.
    fn fill_grid_dimensions(&self, node: &RawNode, children: &[&RawNode], block: &mut PatternBlock) {
        let Some(first) = children.first() else {
            return;
        };
        let gap = node.item_spacing.max(0.0);
        let cell = first.width + gap;
        if cell <= 0.0 {
            return;
        }
        let columns = (((node.width + gap) / cell).floor() as usize).max(1);
        block.columns = Some(columns);
        block.rows = Some(children.len().div_ceil(columns));
    }

    fn is_grid(&self, node: &RawNode, children: &[&RawNode]) -> bool {
        wraps(node)
            && children.len() >= self.thresholds.grid_min_children
            && self.similar_share(children) >= self.thresholds.similarity_ratio
    }

    fn is_carousel(&self, node: &RawNode, children: &[&RawNode]) -> bool {
        if node.layout_mode != LayoutMode::Horizontal
            || !node.clips_content.unwrap_or(false)
            || children.len() < 2
            || self.similar_share(children) < self.thresholds.similarity_ratio
        {
            return false;
        }
        let gaps = node.item_spacing * (children.len() - 1) as f64;
        let content: f64 = children.iter().map(|c| c.width).sum::<f64>() + gaps;
        content > node.width * self.thresholds.carousel_overflow
    }

    fn is_tabs(&self, node: &RawNode, children: &[&RawNode]) -> bool {
        if node.layout_mode != LayoutMode::Horizontal
            || children.len() < 2
            || children.len() > self.thresholds.tabs_max_children
        {
            return false;
        }
        let all_text = children.iter().all(|c| c.is_text() || c.has_text_descendant());
        let (min_h, max_h) = children.iter().fold((f64::MAX, f64::MIN), |(lo, hi), c| {
            (lo.min(c.height), hi.max(c.height))
        });
        all_text && max_h - min_h <= self.thresholds.tabs_height_tolerance
    }

    fn is_stepper(&self, node: &RawNode, children: &[&RawNode]) -> bool {
        if node.layout_mode != LayoutMode::Horizontal
            || children.len() < self.thresholds.stepper_min_children
            || children.len() > self.thresholds.stepper_max_children
        {
            return false;
        }
        let steps = children.iter().filter(|c| contains_step_text(c)).count();
        steps >= 2
    }

    fn is_form(&self, node: &RawNode) -> bool {
        if node.layout_mode != LayoutMode::Vertical {
            return false;
        }
        let descendants = node.descendants();
        let inputs = descendants.iter().filter(|d| is_input_like(d)).count();
        let buttons = descendants
            .iter()
            .filter(|d| BUTTON_NAME.is_match(&words(&d.name)))
            .count();
        inputs >= 2 && buttons >= 1
    }

    fn is_list(&self, node: &RawNode, children: &[&RawNode]) -> bool {
        node.layout_mode == LayoutMode::Vertical
            && children.len() >= 2
            && self.similar_share(children) >= self.thresholds.similarity_ratio
    }

    /// Share of children similar to the first child (which counts itself).
    pub fn similar_share(&self, children: &[&RawNode]) -> f64 {
        let Some(reference) = children.first() else {
            return 0.0;
        };
        let similar = children.iter().filter(|c| self.similar(reference, c)).count();
        similar as f64 / children.len() as f64
    }

    /// Same type, near-equal size and near-equal child count.
    pub fn similar(&self, a: &RawNode, b: &RawNode) -> bool {
        let t = &self.thresholds;
        let count_a = a.visible_children().count();
        let count_b = b.visible_children().count();
        a.node_type == b.node_type
            && (a.width - b.width).abs() <= t.size_tolerance
            && (a.height - b.height).abs() <= t.size_tolerance
            && count_a.abs_diff(count_b) <= t.child_count_tolerance
    }
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn wraps(node: &RawNode) -> bool {
    node.layout_wrap == Some(LayoutWrap::Wrap)
}

fn contains_step_text(node: &RawNode) -> bool {
    let own = node.is_text() && node.characters.as_deref().is_some_and(is_step_text);
    own || node
        .descendants()
        .iter()
        .filter(|d| d.is_text())
        .any(|d| d.characters.as_deref().is_some_and(is_step_text))
}

fn is_step_text(text: &str) -> bool {
    STEP_TEXT.is_match(text.trim())
}

fn is_input_like(node: &RawNode) -> bool {
    if INPUT_NAME.is_match(&words(&node.name)) {
        return true;
    }
    node.has_visible_stroke()
        && node.max_corner_radius() > 0.0
        && node.visible_children().count() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_core::{Color, Paint};

    fn cell(i: usize, w: f64, h: f64) -> RawNode {
        RawNode::new(format!("c{}", i), format!("Cell {}", i), "FRAME").with_size(w, h)
    }

    fn text(i: usize, chars: &str) -> RawNode {
        RawNode::new(format!("t{}", i), "Label", "TEXT").with_text(chars)
    }

    #[test]
    fn test_name_hint_overrides_structure() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "ProductGrid", "FRAME")
            .with_layout(LayoutMode::Vertical)
            .with_children((0..3).map(|i| cell(i, 100.0, 100.0)));
        let block = recognizer.recognize(&node).unwrap();
        assert_eq!(block.pattern, PatternKind::Grid);
        assert_eq!(block.item_count, Some(3));
        assert_eq!(block.columns, None);
        assert_eq!(block.rows, None);
    }

    #[test]
    fn test_named_grid_with_wrap_estimates_columns() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Photo Grid", "FRAME")
            .with_size(340.0, 500.0)
            .with_layout(LayoutMode::Horizontal)
            .with_wrap()
            .with_gap(20.0)
            .with_children((0..5).map(|i| cell(i, 100.0, 100.0)));
        let block = recognizer.recognize(&node).unwrap();
        // floor((340 + 20) / (100 + 20)) = 3, ceil(5 / 3) = 2
        assert_eq!(block.columns, Some(3));
        assert_eq!(block.rows, Some(2));
    }

    #[test]
    fn test_grid_columns_use_container_width() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Photo Grid", "FRAME")
            .with_size(340.0, 500.0)
            .with_layout(LayoutMode::Horizontal)
            .with_wrap()
            .with_gap(20.0)
            .with_padding(0.0, 20.0, 0.0, 20.0)
            .with_children((0..6).map(|i| cell(i, 100.0, 100.0)));
        let block = recognizer.recognize(&node).unwrap();
        assert_eq!(block.columns, Some(3));
        assert_eq!(block.rows, Some(2));
    }

    #[test]
    fn test_grid_name_is_a_whole_word() {
        let recognizer = PatternRecognizer::new();
        let named = |name: &str| {
            RawNode::new("1", name, "FRAME")
                .with_layout(LayoutMode::Horizontal)
                .with_child(cell(0, 100.0, 100.0))
        };
        assert_eq!(recognizer.recognize(&named("Image Grids")).unwrap().pattern, PatternKind::Grid);
        assert!(recognizer.recognize(&named("Gridiron Banner")).is_none());
    }

    #[test]
    fn test_structural_grid() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Frame 9", "FRAME")
            .with_size(90.0, 200.0)
            .with_layout(LayoutMode::Horizontal)
            .with_wrap()
            .with_children((0..4).map(|i| cell(i, 100.0, 50.0)));
        let block = recognizer.recognize(&node).unwrap();
        assert_eq!(block.pattern, PatternKind::Grid);
        assert_eq!(block.item_count, Some(4));
        // Container narrower than a cell still yields one column.
        assert_eq!(block.columns, Some(1));
        assert_eq!(block.rows, Some(4));
    }

    #[test]
    fn test_carousel_requires_overflow_and_clipping() {
        let recognizer = PatternRecognizer::new();
        let mut node = RawNode::new("1", "Frame 2", "FRAME")
            .with_size(300.0, 200.0)
            .with_layout(LayoutMode::Horizontal)
            .with_gap(16.0)
            .with_children((0..3).map(|i| cell(i, 200.0, 200.0)));
        node.clips_content = Some(true);
        assert_eq!(recognizer.recognize(&node).unwrap().pattern, PatternKind::Carousel);

        node.clips_content = Some(false);
        assert_ne!(
            recognizer.recognize(&node).map(|b| b.pattern),
            Some(PatternKind::Carousel)
        );
    }

    #[test]
    fn test_tabs() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Frame 4", "FRAME")
            .with_layout(LayoutMode::Horizontal)
            .with_child(RawNode::new("a", "Overview", "FRAME").with_size(80.0, 40.0).with_child(text(0, "Overview")))
            .with_child(RawNode::new("b", "Specs", "FRAME").with_size(60.0, 36.0).with_child(text(1, "Specs")))
            .with_child(RawNode::new("c", "Reviews", "FRAME").with_size(70.0, 40.0).with_child(text(2, "Reviews")));
        assert_eq!(recognizer.recognize(&node).unwrap().pattern, PatternKind::Tabs);
    }

    #[test]
    fn test_stepper() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Frame 5", "FRAME")
            .with_layout(LayoutMode::Horizontal)
            .with_child(RawNode::new("a", "A", "FRAME").with_size(32.0, 32.0).with_child(text(0, "1")))
            .with_child(RawNode::new("b", "B", "RECTANGLE").with_size(80.0, 2.0))
            .with_child(RawNode::new("c", "C", "FRAME").with_size(32.0, 32.0).with_child(text(1, "2")))
            .with_child(RawNode::new("d", "D", "RECTANGLE").with_size(80.0, 2.0))
            .with_child(RawNode::new("e", "E", "FRAME").with_size(32.0, 32.0).with_child(text(2, "Step 3")));
        assert_eq!(recognizer.recognize(&node).unwrap().pattern, PatternKind::Stepper);
    }

    #[test]
    fn test_step_prefixed_labels() {
        assert!(is_step_text("Step1"));
        assert!(is_step_text("STEP2"));
        assert!(is_step_text("Steps"));
        assert!(is_step_text("Step 1\nAccount"));
        assert!(is_step_text(" 12 "));
        assert!(!is_step_text("Next"));

        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Frame 5", "FRAME")
            .with_layout(LayoutMode::Horizontal)
            .with_child(RawNode::new("a", "A", "FRAME").with_size(48.0, 32.0).with_child(text(0, "Step1")))
            .with_child(RawNode::new("b", "B", "RECTANGLE").with_size(80.0, 2.0))
            .with_child(RawNode::new("c", "C", "FRAME").with_size(48.0, 32.0).with_child(text(1, "Step2")))
            .with_child(RawNode::new("d", "D", "RECTANGLE").with_size(80.0, 2.0))
            .with_child(RawNode::new("e", "E", "FRAME").with_size(48.0, 32.0).with_child(text(2, "Step3")));
        assert_eq!(recognizer.recognize(&node).unwrap().pattern, PatternKind::Stepper);
    }

    #[test]
    fn test_form() {
        let recognizer = PatternRecognizer::new();
        let boxed = |id: &str| {
            RawNode::new(id, "Frame", "FRAME")
                .with_stroke(Paint::solid(Color::rgb(0.8, 0.8, 0.8)), 1.0)
                .with_radius(6.0)
                .with_child(text(0, "..."))
        };
        let node = RawNode::new("1", "Frame 6", "FRAME")
            .with_layout(LayoutMode::Vertical)
            .with_child(RawNode::new("e", "Email", "FRAME").with_size(300.0, 40.0))
            .with_child(boxed("p").with_size(300.0, 40.0))
            .with_child(RawNode::new("s", "Submit", "FRAME").with_size(120.0, 40.0));
        assert_eq!(recognizer.recognize(&node).unwrap().pattern, PatternKind::Form);
    }

    #[test]
    fn test_list_similarity_threshold() {
        let recognizer = PatternRecognizer::new();
        let list = RawNode::new("1", "Frame 8", "FRAME")
            .with_layout(LayoutMode::Vertical)
            .with_children((0..3).map(|i| cell(i, 280.0, 48.0)));
        let block = recognizer.recognize(&list).unwrap();
        assert_eq!(block.pattern, PatternKind::List);
        assert_eq!(block.item_count, Some(3));

        let mixed = RawNode::new("2", "Frame 8", "FRAME")
            .with_layout(LayoutMode::Vertical)
            .with_child(cell(0, 280.0, 48.0))
            .with_child(cell(1, 100.0, 300.0))
            .with_child(RawNode::new("x", "Text", "TEXT").with_size(280.0, 48.0));
        assert!(recognizer.recognize(&mixed).is_none());
    }

    #[test]
    fn test_similarity_rules() {
        let recognizer = PatternRecognizer::new();
        let a = cell(0, 100.0, 40.0);
        assert!(recognizer.similar(&a, &cell(1, 110.0, 30.0)));
        assert!(!recognizer.similar(&a, &cell(2, 111.0, 40.0)));
        let b = cell(3, 100.0, 40.0)
            .with_child(cell(4, 1.0, 1.0))
            .with_child(cell(5, 1.0, 1.0));
        assert!(!recognizer.similar(&a, &b));
    }

    #[test]
    fn test_no_pattern() {
        let recognizer = PatternRecognizer::new();
        let node = RawNode::new("1", "Frame", "FRAME").with_child(cell(0, 10.0, 10.0));
        assert!(recognizer.recognize(&node).is_none());
    }
}
