//! Export pipeline for design trees.
//!
//! Turns a detached raw node tree into the minimized export envelope:
//! - a short-key output tree with documented defaults left out
//! - a deduplicated token dictionary for colors, fonts, and shadows
//! - semantic, pattern, and responsive annotations per node
//!
//! # Example
//!
//! ```
//! use distill_core::{Color, ExportOptions, Paint, RawNode};
//!
//! let root = RawNode::new("1:1", "Card", "FRAME")
//!     .with_size(320.0, 200.0)
//!     .with_fill(Paint::solid(Color::rgb(1.0, 1.0, 1.0)));
//!
//! let envelope = distill_transform::export(Some(&root), &ExportOptions::default()).unwrap();
//! assert_eq!(envelope.tree.tag(), "frame");
//! assert_eq!(envelope.tokens.colors["c0"], "#FFFFFF");
//! ```

pub mod geometry;
pub mod image;
pub mod instance;
pub mod notes;
pub mod prototype;
pub mod style;
pub mod text;
pub mod transformer;

pub use transformer::Transformer;

use distill_core::{ExportEnvelope, ExportError, ExportOptions, RawNode, Result, FORMAT_VERSION};
use log::debug;

/// Export the selected root. `None` means nothing was selected.
pub fn export(root: Option<&RawNode>, options: &ExportOptions) -> Result<ExportEnvelope> {
    let root = root.ok_or_else(|| ExportError::nothing("no selection"))?;
    debug!(
        "exporting {} ({}) as {:?}, tokens {}",
        root.id,
        root.node_type,
        options.document_name,
        if options.extract_tokens { "on" } else { "off" }
    );

    let mut transformer = Transformer::new(options);
    let tree = transformer.transform_root(root)?;
    let tokens = transformer.finish();

    debug!(
        "exported {} nodes; tokens: {} colors, {} fonts, {} shadows",
        tree.node_count(),
        tokens.colors.len(),
        tokens.fonts.len(),
        tokens.shadows.len()
    );

    Ok(ExportEnvelope {
        version: FORMAT_VERSION.to_string(),
        document_name: options.document_name.clone(),
        tokens,
        tree,
    })
}

/// Serialize an envelope, pretty-printed or compact.
pub fn to_json(envelope: &ExportEnvelope, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(envelope)
    } else {
        serde_json::to_string(envelope)
    };
    json.map_err(ExportError::Serialize)
}

/// Export from JSON: the raw tree (`null` for no selection) and the options
/// (an empty string means defaults). Returns the serialized envelope.
pub fn export_json(raw_json: &str, options_json: &str) -> Result<String> {
    let options: ExportOptions = if options_json.trim().is_empty() {
        ExportOptions::default()
    } else {
        serde_json::from_str(options_json).map_err(ExportError::InvalidInput)?
    };
    let root: Option<RawNode> = serde_json::from_str(raw_json).map_err(ExportError::InvalidInput)?;

    let envelope = export(root.as_ref(), &options)?;
    to_json(&envelope, !options.optimize_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_selection() {
        let err = export(None, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::NothingToExport { .. }));
        assert_eq!(err.to_string(), "Nothing to export: no selection");
    }

    #[test]
    fn test_export_json_null_root() {
        assert!(matches!(
            export_json("null", ""),
            Err(ExportError::NothingToExport { .. })
        ));
    }

    #[test]
    fn test_export_json_invalid_input() {
        assert!(matches!(
            export_json("{\"name\": 3}", ""),
            Err(ExportError::InvalidInput(_))
        ));
        assert!(matches!(
            export_json(r#"{"id":"1","type":"FRAME"}"#, "{\"maxDepth\": -1}"),
            Err(ExportError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compact_and_pretty_output() {
        let raw = r#"{"id":"1:1","name":"Root","type":"FRAME","width":10,"height":10}"#;
        let compact = export_json(raw, "").unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with(r#"{"version":"1.0","documentName":"Untitled""#));

        let pretty = export_json(raw, r#"{"optimizeSize": false, "documentName": "Shop"}"#).unwrap();
        assert!(pretty.contains('\n'));
        assert!(pretty.contains("\"documentName\": \"Shop\""));
    }
}
