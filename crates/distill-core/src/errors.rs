//! Error types for Distill exports.

use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that abort a whole export.
///
/// Lookup failures and mixed style values never show up here: the affected
/// field is simply left out of the output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No root was selected, or the selected root is hidden or unsupported.
    #[error("Nothing to export: {reason}")]
    NothingToExport { reason: String },

    /// The raw tree or options could not be decoded.
    #[error("Invalid input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// A node could not be transformed.
    #[error("Malformed node {id}: {reason}")]
    MalformedNode { id: String, reason: String },

    /// The envelope could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ExportError {
    pub fn nothing(reason: impl Into<String>) -> Self {
        ExportError::NothingToExport { reason: reason.into() }
    }

    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        ExportError::MalformedNode {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = ExportError::nothing("no selection");
        assert_eq!(err.to_string(), "Nothing to export: no selection");

        let err = ExportError::malformed("1:2", "width is NaN");
        assert_eq!(err.to_string(), "Malformed node 1:2: width is NaN");
    }
}
