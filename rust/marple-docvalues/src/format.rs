//! Display text for individual doc values.

use crate::error::InspectError;
use crate::model::{DocValue, DocValuesKind};

/// Checks that rows of `kind` can be formatted.
///
/// `NONE` passes: a `NONE` result has no rows to format.
pub fn validate_kind(kind: &DocValuesKind) -> Result<(), InspectError> {
    if kind.is_known() {
        Ok(())
    } else {
        Err(InspectError::UnknownValueKind {
            kind: kind.name().to_string(),
        })
    }
}

/// Formats one row as `(<doc_id>) <value>`.
///
/// Single-valued kinds render the scalar in its native form, multi-valued kinds
/// join the sequence with `", "`. A document without a value renders as
/// `(<doc_id>) [no value]`.
pub fn format_doc_value(
    doc_id: &str,
    value: Option<&DocValue>,
    kind: &DocValuesKind,
) -> Result<String, InspectError> {
    let Some(value) = value else {
        return Ok(format!("({doc_id}) [no value]"));
    };
    validate_kind(kind)?;
    Ok(format!("({doc_id}) {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocScalar;

    #[test]
    fn test_scalar_kinds() {
        let v = DocValue::from("hello");
        assert_eq!(
            format_doc_value("7", Some(&v), &DocValuesKind::Binary).unwrap(),
            "(7) hello"
        );
        assert_eq!(
            format_doc_value("7", Some(&v), &DocValuesKind::Sorted).unwrap(),
            "(7) hello"
        );
        let n = DocValue::from(-12i64);
        assert_eq!(
            format_doc_value("0", Some(&n), &DocValuesKind::Numeric).unwrap(),
            "(0) -12"
        );
        let f = DocValue::Scalar(DocScalar::Float(2.5));
        assert_eq!(
            format_doc_value("1", Some(&f), &DocValuesKind::Numeric).unwrap(),
            "(1) 2.5"
        );
    }

    #[test]
    fn test_multi_valued_kinds() {
        let set: DocValue = ["a", "b"].into_iter().collect();
        assert_eq!(
            format_doc_value("3", Some(&set), &DocValuesKind::SortedSet).unwrap(),
            "(3) a, b"
        );
        let nums: DocValue = [1i64, 5, 9].into_iter().collect();
        assert_eq!(
            format_doc_value("4", Some(&nums), &DocValuesKind::SortedNumeric).unwrap(),
            "(4) 1, 5, 9"
        );
        let empty: DocValue = Vec::<i64>::new().into_iter().collect();
        assert_eq!(
            format_doc_value("5", Some(&empty), &DocValuesKind::SortedNumeric).unwrap(),
            "(5) "
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            format_doc_value("11", None, &DocValuesKind::SortedSet).unwrap(),
            "(11) [no value]"
        );
    }

    #[test]
    fn test_unknown_kind() {
        let v = DocValue::from("x");
        let err = format_doc_value("1", Some(&v), &DocValuesKind::from("VECTOR")).unwrap_err();
        assert_eq!(err.to_string(), "unknown doc values type VECTOR");
    }
}
