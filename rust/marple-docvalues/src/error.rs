//! Failures of doc-values inspection and how each one is surfaced.
//!
//! None of these abort inspection: each is resolved where it is detected and
//! reported through the [`NoticeSink`](crate::notice::NoticeSink), if at all.

use thiserror::Error;

use crate::notice::Notice;

/// Marker text in backend failures for fields without a doc-values store.
pub const NO_DOC_VALUES_MARKER: &str = "No doc values for";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    /// Degrades to an empty `NONE` result; shown inline, never as a notice.
    #[error("No doc values for field {field}")]
    NoDocValuesForField { field: String },

    /// The backend applied `effective` instead of `requested`.
    #[error("{requested} is not a valid encoding for this field")]
    InvalidEncodingRequested { requested: String, effective: String },

    #[error("unknown doc values type {kind}")]
    UnknownValueKind { kind: String },

    /// Any other backend failure; the last good result stays displayed.
    #[error("{message}")]
    GenericBackendFailure { message: String },
}

impl InspectError {
    /// Classifies a backend failure message for `field`.
    pub fn from_backend_message(field: &str, message: String) -> InspectError {
        if message.contains(NO_DOC_VALUES_MARKER) {
            InspectError::NoDocValuesForField {
                field: field.to_string(),
            }
        } else {
            InspectError::GenericBackendFailure { message }
        }
    }

    /// The notice the operator sees for this failure, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            InspectError::NoDocValuesForField { .. } => None,
            InspectError::InvalidEncodingRequested { .. } => Some(Notice::info(self.to_string())),
            InspectError::UnknownValueKind { .. } | InspectError::GenericBackendFailure { .. } => {
                Some(Notice::fatal(self.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_no_doc_values() {
        let err = InspectError::from_backend_message(
            "title",
            "No doc values for field 'title'".to_string(),
        );
        assert_eq!(
            err,
            InspectError::NoDocValuesForField {
                field: "title".to_string()
            }
        );
        assert_eq!(err.notice(), None);
    }

    #[test]
    fn test_classify_generic_failure() {
        let err = InspectError::from_backend_message("title", "segment closed".to_string());
        assert_eq!(err.notice(), Some(Notice::fatal("segment closed")));
    }

    #[test]
    fn test_invalid_encoding_notice_is_not_fatal() {
        let err = InspectError::InvalidEncodingRequested {
            requested: "long".to_string(),
            effective: "utf8".to_string(),
        };
        assert_eq!(
            err.notice(),
            Some(Notice::info("long is not a valid encoding for this field"))
        );
    }

    #[test]
    fn test_unknown_kind_notice_is_fatal() {
        let err = InspectError::UnknownValueKind {
            kind: "VECTOR".to_string(),
        };
        assert_eq!(
            err.notice(),
            Some(Notice::fatal("unknown doc values type VECTOR"))
        );
    }
}
