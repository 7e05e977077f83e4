//! Heuristic classification of design nodes.
//!
//! Three independent analyzers read a raw node and attach optional
//! annotation blocks to its output:
//! - [`RoleDetector`]: UI role, interactivity, and visual state
//! - [`PatternRecognizer`]: repeating layouts among children
//! - [`ResponsiveAnalyzer`]: breakpoint, fluid width, flex grow/shrink
//!
//! Name-based tables are ordered; the first matching row wins.

mod patterns;
mod responsive;
mod roles;
mod rules;

pub use patterns::PatternRecognizer;
pub use responsive::ResponsiveAnalyzer;
pub use roles::RoleDetector;
pub use rules::{first_match, words, NameRule};

use distill_core::{LayoutMode, PatternBlock, RawNode, ResponsiveBlock, SemanticBlock, Thresholds};

/// Annotation blocks computed for one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub semantic: Option<SemanticBlock>,
    pub pattern: Option<PatternBlock>,
    pub responsive: Option<ResponsiveBlock>,
}

/// Runs every classifier over a node.
pub struct Analyzer {
    role_detector: RoleDetector,
    pattern_recognizer: PatternRecognizer,
    responsive_analyzer: ResponsiveAnalyzer,
}

impl Analyzer {
    /// Create an analyzer with default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(&Thresholds::default())
    }

    pub fn with_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            role_detector: RoleDetector::with_thresholds(thresholds.clone()),
            pattern_recognizer: PatternRecognizer::with_thresholds(thresholds.clone()),
            responsive_analyzer: ResponsiveAnalyzer::with_thresholds(thresholds.clone()),
        }
    }

    /// Classify a node sitting in a parent with `parent_layout` (`None` for the root).
    pub fn annotate(&self, node: &RawNode, parent_layout: Option<LayoutMode>) -> Annotations {
        Annotations {
            semantic: self.role_detector.classify(node),
            pattern: self.pattern_recognizer.recognize(node),
            responsive: self.responsive_analyzer.analyze(node, parent_layout),
        }
    }

    pub fn roles(&self) -> &RoleDetector {
        &self.role_detector
    }

    pub fn patterns(&self) -> &PatternRecognizer {
        &self.pattern_recognizer
    }

    pub fn responsive(&self) -> &ResponsiveAnalyzer {
        &self.responsive_analyzer
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
