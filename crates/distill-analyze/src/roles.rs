//! Semantic role detection for design nodes.

use crate::rules::{first_match, words, NameRule};
use distill_core::{ComponentState, EffectType, PaintType, RawNode, Role, SemanticBlock, Thresholds};
use once_cell::sync::Lazy;
use regex::Regex;

/// Name keywords per role, in tie-break order.
static ROLE_RULES: Lazy<Vec<NameRule<Role>>> = Lazy::new(|| {
    vec![
        NameRule::new(Role::Button, r"\b(button|btn|cta)s?\b"),
        NameRule::new(
            Role::Input,
            r"\b(input|text ?field|text ?box|text ?area|search ?(bar|box|field)|field)s?\b",
        ),
        NameRule::new(Role::Card, r"\b(card|tile)s?\b"),
        NameRule::new(Role::Nav, r"\b(nav|navbar|navigation|sidebar|side ?nav)\b"),
        NameRule::new(Role::Header, r"\b(header|app ?bar|top ?bar|toolbar)\b"),
        NameRule::new(Role::Footer, r"\b(footer|bottom ?bar)\b"),
        NameRule::new(Role::Modal, r"\b(modal|dialog|popup|pop ?up|sheet)\b"),
        NameRule::new(Role::Badge, r"\b(badge|chip|tag|pill)s?\b"),
        NameRule::new(Role::Avatar, r"\b(avatar|profile ?(pic|picture|photo|image))s?\b"),
        NameRule::new(Role::Icon, r"\b(icon|ico|glyph)s?\b"),
        NameRule::new(Role::Link, r"\b(link|anchor|hyperlink)s?\b"),
        NameRule::new(Role::List, r"\blists?\b").except(r"\blist ?item"),
        NameRule::new(Role::ListItem, r"\b(list ?item|item)s?\b"),
        NameRule::new(Role::Tab, r"\btabs?\b"),
        NameRule::new(Role::Menu, r"\bmenus?\b"),
        NameRule::new(Role::Tooltip, r"\b(tooltip|tool ?tip|hint)s?\b"),
        NameRule::new(Role::Dropdown, r"\b(dropdown|drop ?down|select|combo ?box|picker)s?\b"),
    ]
});

/// Name keywords per visual state, in tie-break order.
static STATE_RULES: Lazy<Vec<NameRule<ComponentState>>> = Lazy::new(|| {
    vec![
        NameRule::new(ComponentState::Default, r"\b(default|normal|rest|idle)\b"),
        NameRule::new(ComponentState::Hover, r"\b(hover|hovered)\b"),
        NameRule::new(ComponentState::Active, r"\b(active|pressed)\b"),
        NameRule::new(ComponentState::Disabled, r"\b(disabled|inactive)\b"),
        NameRule::new(ComponentState::Focus, r"\b(focus|focused)\b"),
        NameRule::new(ComponentState::Selected, r"\b(selected|checked)\b"),
        NameRule::new(ComponentState::Loading, r"\b(loading|busy)\b"),
    ]
});

static INTERACTION_VERBS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(click|tap|press|toggle|submit|open|close|expand|collapse|drag|swipe|clickable)\b")
        .expect("interaction verb pattern")
});

static INPUT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(placeholder|label|hint|value)\b").expect("input label pattern"));

static STATE_PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(state|status|interaction)$").expect("state property pattern"));

/// Detects UI roles, component state and interactivity.
pub struct RoleDetector {
    thresholds: Thresholds,
}

impl RoleDetector {
    /// Create a new role detector.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a node; `None` when nothing was inferred.
    pub fn classify(&self, node: &RawNode) -> Option<SemanticBlock> {
        let role = self.detect_role(node);
        let state = self.detect_state(node).filter(|s| *s != ComponentState::Default);
        let interactive = role.is_some_and(|r| r.is_interactive())
            || INTERACTION_VERBS.is_match(&words(&node.name))
            || !node.reactions.is_empty();

        if role.is_none() && state.is_none() && !interactive {
            return None;
        }

        Some(SemanticBlock {
            role,
            interactive: interactive.then_some(true),
            state,
        })
    }

    /// Role from the name table, falling back to structural heuristics.
    pub fn detect_role(&self, node: &RawNode) -> Option<Role> {
        first_match(&ROLE_RULES, &node.name).or_else(|| self.detect_from_structure(node))
    }

    /// State from the name, then from a `State`-like variant property.
    pub fn detect_state(&self, node: &RawNode) -> Option<ComponentState> {
        first_match(&STATE_RULES, &node.name).or_else(|| {
            node.variant_properties
                .iter()
                .filter(|(key, _)| STATE_PROPERTY.is_match(&words(key)))
                .find_map(|(_, value)| first_match(&STATE_RULES, value))
        })
    }

    fn detect_from_structure(&self, node: &RawNode) -> Option<Role> {
        if self.looks_like_button(node) {
            Some(Role::Button)
        } else if self.looks_like_input(node) {
            Some(Role::Input)
        } else if self.looks_like_card(node) {
            Some(Role::Card)
        } else if self.looks_like_icon(node) {
            Some(Role::Icon)
        } else if self.looks_like_avatar(node) {
            Some(Role::Avatar)
        } else {
            None
        }
    }

    fn looks_like_button(&self, node: &RawNode) -> bool {
        let painted = node
            .visible_fills()
            .any(|p| p.paint_type == PaintType::Solid || p.paint_type.is_gradient());
        painted
            && node.max_corner_radius() > 0.0
            && node.has_text_descendant()
            && node.layout_mode.is_auto()
    }

    fn looks_like_input(&self, node: &RawNode) -> bool {
        node.has_visible_stroke()
            && node.max_corner_radius() > 0.0
            && node
                .visible_children()
                .any(|c| c.is_text() && INPUT_LABEL.is_match(&words(&c.name)))
    }

    fn looks_like_card(&self, node: &RawNode) -> bool {
        let solid = node.visible_fills().any(|p| p.paint_type == PaintType::Solid);
        let shadowed = node
            .visible_effects()
            .any(|e| e.effect_type == EffectType::DropShadow);
        solid && (shadowed || node.max_corner_radius() > 0.0) && node.visible_children().count() > 1
    }

    fn looks_like_icon(&self, node: &RawNode) -> bool {
        if node.is_vector_family() {
            return true;
        }
        let mut children = node.visible_children().peekable();
        children.peek().is_some()
            && self.is_small_square(node, self.thresholds.icon_max_size)
            && children.all(RawNode::is_vector_family)
    }

    fn looks_like_avatar(&self, node: &RawNode) -> bool {
        if !self.is_small_square(node, self.thresholds.avatar_max_size) {
            return false;
        }
        let min_side = node.width.min(node.height);
        let round = node.node_type == "ELLIPSE" || node.max_corner_radius() >= min_side * 0.45;
        node.image_fill().is_some() || round
    }

    fn is_small_square(&self, node: &RawNode, max_size: f64) -> bool {
        let (w, h) = (node.width, node.height);
        w > 0.0
            && h > 0.0
            && w <= max_size
            && h <= max_size
            && (w - h).abs() / w.max(h) <= self.thresholds.square_tolerance
    }
}

impl Default for RoleDetector {
    fn default() -> Self {
        Self::new()
    }
}
