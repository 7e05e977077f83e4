//! Export configuration.

use serde::{Deserialize, Serialize};

/// Caller-supplied export options.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// When false, no node attaches children.
    pub include_children: bool,
    /// When false, literal values are emitted and the token dictionary stays empty.
    pub extract_tokens: bool,
    /// Omit documented-default values and emit compact JSON.
    pub optimize_size: bool,
    /// Maximum depth below the root (root is depth 0). `0` disables the limit.
    pub max_depth: u32,
    /// Name written into the envelope.
    pub document_name: String,
    /// Heuristic tuning constants.
    pub thresholds: Thresholds,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_children: true,
            extract_tokens: true,
            optimize_size: true,
            max_depth: 0,
            document_name: "Untitled".to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_tokens(mut self, extract: bool) -> Self {
        self.extract_tokens = extract;
        self
    }

    pub fn with_children(mut self, include: bool) -> Self {
        self.include_children = include;
        self
    }

    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize_size = optimize;
        self
    }

    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    /// Whether a node at `depth` may be emitted.
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth == 0 || depth <= self.max_depth
    }
}

/// Tuned classification constants, overridable per export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    /// Share of children that must be similar for grid/list/carousel.
    pub similarity_ratio: f64,
    /// Max width/height difference for two siblings to count as similar.
    pub size_tolerance: f64,
    /// Max child-count difference for two siblings to count as similar.
    pub child_count_tolerance: usize,
    /// Content width must exceed this multiple of the container for a carousel.
    pub carousel_overflow: f64,
    pub grid_min_children: usize,
    pub tabs_max_children: usize,
    /// Max height spread among tab children.
    pub tabs_height_tolerance: f64,
    pub stepper_min_children: usize,
    pub stepper_max_children: usize,
    /// Tolerance when snapping an aspect ratio to a common one.
    pub aspect_ratio_tolerance: f64,
    /// Relative scale/offset below which an image transform is not a crop.
    pub crop_tolerance: f64,
    pub icon_max_size: f64,
    pub avatar_max_size: f64,
    /// Relative width/height difference still considered square.
    pub square_tolerance: f64,
    pub tablet_min_width: f64,
    pub desktop_min_width: f64,
    pub wide_min_width: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            similarity_ratio: 0.7,
            size_tolerance: 10.0,
            child_count_tolerance: 1,
            carousel_overflow: 1.2,
            grid_min_children: 4,
            tabs_max_children: 8,
            tabs_height_tolerance: 10.0,
            stepper_min_children: 2,
            stepper_max_children: 7,
            aspect_ratio_tolerance: 0.05,
            crop_tolerance: 0.01,
            icon_max_size: 48.0,
            avatar_max_size: 128.0,
            square_tolerance: 0.15,
            tablet_min_width: 1024.0,
            desktop_min_width: 1280.0,
            wide_min_width: 1920.0,
        }
    }
}
