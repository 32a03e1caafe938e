//! Negotiation of the display encoding with the backend.
//!
//! An operator-requested encoding is only remembered once the backend has
//! confirmed it by applying it. Otherwise the backend's fallback is displayed
//! and nothing is persisted.

use log::{info, warn};
use serde::Serialize;

use crate::backend::TextEncoding;
use crate::error::InspectError;
use crate::model::DocValuesKind;
use crate::preferences::EncodingPreferences;

/// Where a negotiated encoding is persisted.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceScope<'a> {
    pub index_path: &'a str,
    pub field: &'a str,
    pub category: &'a str,
}

/// Settles a request for `candidate` that the backend answered with `effective`.
///
/// On agreement the candidate is persisted for the scope. On disagreement
/// nothing is persisted and [`InspectError::InvalidEncodingRequested`] is
/// returned; the caller still displays the `effective` encoding.
pub fn settle_encoding(
    preferences: &mut dyn EncodingPreferences,
    scope: PreferenceScope<'_>,
    candidate: &str,
    effective: &str,
) -> Result<(), InspectError> {
    if candidate != effective {
        return Err(InspectError::InvalidEncodingRequested {
            requested: candidate.to_string(),
            effective: effective.to_string(),
        });
    }

    preferences
        .set_field_encoding(scope.index_path, scope.field, scope.category, candidate)
        .map_err(|e| {
            warn!("failed to persist encoding '{candidate}' for '{}': {e}", scope.field);
            InspectError::GenericBackendFailure {
                message: format!(
                    "failed to persist encoding {candidate} for field {}: {e}",
                    scope.field
                ),
            }
        })?;
    info!(
        "persisted {} encoding '{candidate}' for {}:{}",
        scope.category, scope.index_path, scope.field
    );
    Ok(())
}

/// State of the encoding selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingControl {
    pub current: String,
    pub choices: Vec<&'static str>,
}

/// The encoding selector offered for `kind`, or `None` when the kind is not
/// re-encodable.
pub fn encoding_control(kind: &DocValuesKind, current: &str) -> Option<EncodingControl> {
    kind.encoding_applies().then(|| EncodingControl {
        current: current.to_string(),
        choices: TextEncoding::names(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;

    const SCOPE: PreferenceScope<'static> = PreferenceScope {
        index_path: "/idx",
        field: "title",
        category: "docvalues",
    };

    #[test]
    fn test_confirmed_encoding_is_persisted() {
        let mut prefs = MemoryPreferences::new();
        settle_encoding(&mut prefs, SCOPE, "hex", "hex").unwrap();
        assert_eq!(
            prefs.field_encoding("/idx", "title", "docvalues").as_deref(),
            Some("hex")
        );
    }

    #[test]
    fn test_rejected_encoding_is_not_persisted() {
        let mut prefs = MemoryPreferences::new();
        let err = settle_encoding(&mut prefs, SCOPE, "long", "utf8").unwrap_err();
        assert_eq!(err.to_string(), "long is not a valid encoding for this field");
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_encoding_control_availability() {
        for kind in [
            DocValuesKind::Binary,
            DocValuesKind::Sorted,
            DocValuesKind::SortedSet,
        ] {
            let control = encoding_control(&kind, "base64").unwrap();
            assert_eq!(control.current, "base64");
            assert!(control.choices.contains(&"utf8"));
        }
        assert_eq!(encoding_control(&DocValuesKind::Numeric, "utf8"), None);
        assert_eq!(encoding_control(&DocValuesKind::SortedNumeric, "utf8"), None);
    }
}
