//! WebAssembly bindings for Distill exports.
//!
//! The design-tool plugin detaches the selected node tree into plain
//! objects and hands it over together with the export options. The result
//! is the serialized export envelope, ready for the clipboard.
//!
//! ## Example
//!
//! ```js
//! import { exportDesign } from 'distill-wasm';
//!
//! const raw = snapshot(figma.currentPage.selection[0]); // or null
//! try {
//!   const text = exportDesign(raw, { extractTokens: true, maxDepth: 0 });
//!   figma.ui.postMessage({ type: 'export', text });
//! } catch (err) {
//!   figma.notify(String(err));
//! }
//! ```

use distill_core::{ExportOptions, RawNode};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the plugin console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Get the version of the exporter.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Export a detached node tree (`null` for no selection).
///
/// `options` may be `undefined`, `null`, or a partial options object.
#[wasm_bindgen(js_name = exportDesign)]
pub fn export_design(raw: JsValue, options: JsValue) -> Result<String, JsError> {
    let root: Option<RawNode> = serde_wasm_bindgen::from_value(raw)
        .map_err(|e| JsError::new(&format!("Invalid design tree: {}", e)))?;

    let options: ExportOptions = if options.is_undefined() || options.is_null() {
        ExportOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
    };

    export_root(root.as_ref(), &options).map_err(|e| JsError::new(&e))
}

/// Export from JSON strings; an empty options string means defaults.
#[wasm_bindgen(js_name = exportDesignFromString)]
pub fn export_design_from_string(raw: &str, options: &str) -> Result<String, JsError> {
    distill_transform::export_json(raw, options).map_err(|e| JsError::new(&e.to_string()))
}

/// Run an export and serialize the envelope, flattening any failure into
/// the single message shown to the user.
pub fn export_root(root: Option<&RawNode>, options: &ExportOptions) -> Result<String, String> {
    let envelope = distill_transform::export(root, options).map_err(|e| e.to_string())?;
    distill_transform::to_json(&envelope, !options.optimize_size).map_err(|e| e.to_string())
}
