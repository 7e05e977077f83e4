//! Developer notes from authoring metadata.

use distill_core::{DevNotes, RawNode};

/// Separator between a layer's display name and an inline note.
pub const NOTE_SEPARATOR: &str = "//";

/// Split `"Card // uses the product API"` into its display name and note.
///
/// A name that is only a note keeps the full text as its display name.
pub fn split_name(name: &str) -> (String, Option<String>) {
    let Some((display, note)) = name.split_once(NOTE_SEPARATOR) else {
        return (name.to_string(), None);
    };
    let note = Some(note.trim().to_string()).filter(|n| !n.is_empty());
    let display = display.trim();
    if display.is_empty() {
        (name.trim().to_string(), note)
    } else {
        (display.to_string(), note)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

/// Description, inline or attached note, and plugin data.
pub fn dev_notes(node: &RawNode, name_note: Option<String>) -> Option<DevNotes> {
    let notes = DevNotes {
        description: non_empty(node.description.as_deref()),
        note: name_note.or_else(|| non_empty(node.notes.as_deref())),
        data: (!node.plugin_data.is_empty()).then(|| node.plugin_data.clone()),
    };
    (notes != DevNotes::default()).then_some(notes)
}
