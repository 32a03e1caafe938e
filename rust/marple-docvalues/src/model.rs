//! Doc-values data model: value kinds, raw values, selections and load requests.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The kind of doc-values store attached to a field.
///
/// The kind is uniform across all documents of a field within a segment and
/// determines the shape of each stored value. Kind names coming from a backend
/// that do not match a known kind are preserved in [`DocValuesKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocValuesKind {
    /// A per-document byte array.
    Binary,
    /// A per-document byte array, deduplicated and sorted across the segment.
    Sorted,
    /// A per-document set of byte arrays.
    SortedSet,
    /// A per-document number.
    Numeric,
    /// A per-document sorted list of numbers.
    SortedNumeric,
    /// The field has no doc-values store.
    None,
    Unknown(String),
}

impl DocValuesKind {
    pub fn name(&self) -> &str {
        match self {
            DocValuesKind::Binary => "BINARY",
            DocValuesKind::Sorted => "SORTED",
            DocValuesKind::SortedSet => "SORTED_SET",
            DocValuesKind::Numeric => "NUMERIC",
            DocValuesKind::SortedNumeric => "SORTED_NUMERIC",
            DocValuesKind::None => "NONE",
            DocValuesKind::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocValuesKind::Unknown(_))
    }

    /// Whether each document holds a sequence of values rather than a scalar.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, DocValuesKind::SortedSet | DocValuesKind::SortedNumeric)
    }

    /// Whether stored bytes may be re-interpreted under an operator-chosen
    /// encoding. Numeric kinds are never re-encoded.
    pub fn encoding_applies(&self) -> bool {
        !self.name().contains("NUMERIC")
    }
}

impl From<&str> for DocValuesKind {
    fn from(name: &str) -> Self {
        match name {
            "BINARY" => DocValuesKind::Binary,
            "SORTED" => DocValuesKind::Sorted,
            "SORTED_SET" => DocValuesKind::SortedSet,
            "NUMERIC" => DocValuesKind::Numeric,
            "SORTED_NUMERIC" => DocValuesKind::SortedNumeric,
            "NONE" => DocValuesKind::None,
            other => DocValuesKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for DocValuesKind {
    fn from(name: String) -> Self {
        DocValuesKind::from(name.as_str())
    }
}

impl From<DocValuesKind> for String {
    fn from(kind: DocValuesKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for DocValuesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single stored value, displayed in its native string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocScalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DocScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocScalar::Integer(v) => write!(f, "{v}"),
            DocScalar::Float(v) => f.write_str(&format_float(*v)),
            DocScalar::Text(s) => f.write_str(s),
        }
    }
}

/// Formats a float the way index tooling prints numbers: `Infinity`, `NaN`,
/// and exponent notation (`1e+21`, `1.5e-7`) outside `[1e-6, 1e21)`.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return v.to_string();
    }
    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

impl From<&str> for DocScalar {
    fn from(s: &str) -> Self {
        DocScalar::Text(s.to_string())
    }
}

impl From<i64> for DocScalar {
    fn from(v: i64) -> Self {
        DocScalar::Integer(v)
    }
}

/// The raw value of one document: a scalar for single-valued kinds, an ordered
/// sequence for `SORTED_SET` and `SORTED_NUMERIC`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocValue {
    Scalar(DocScalar),
    Multi(Vec<DocScalar>),
}

impl DocValue {
    pub fn scalars(&self) -> &[DocScalar] {
        match self {
            DocValue::Scalar(s) => std::slice::from_ref(s),
            DocValue::Multi(v) => v,
        }
    }
}

impl fmt::Display for DocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocValue::Scalar(s) => write!(f, "{s}"),
            DocValue::Multi(v) => write!(f, "{}", v.iter().join(", ")),
        }
    }
}

impl From<DocScalar> for DocValue {
    fn from(v: DocScalar) -> Self {
        DocValue::Scalar(v)
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::Scalar(s.into())
    }
}

impl From<i64> for DocValue {
    fn from(v: i64) -> Self {
        DocValue::Scalar(v.into())
    }
}

impl<T: Into<DocScalar>> FromIterator<T> for DocValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        DocValue::Multi(iter.into_iter().map(Into::into).collect())
    }
}

/// Doc values keyed by document id, in the string form the backend reports.
pub type DocValueMap = BTreeMap<String, DocValue>;

/// The doc values of one field of one segment, as returned by a backend.
///
/// A result is always replaced wholesale; it is never merged with a previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocValuesResult {
    #[serde(rename = "type")]
    pub kind: DocValuesKind,
    /// `None` when `kind` is [`DocValuesKind::None`].
    #[serde(default)]
    pub values: Option<DocValueMap>,
}

impl DocValuesResult {
    pub fn new(kind: DocValuesKind, values: DocValueMap) -> DocValuesResult {
        DocValuesResult {
            kind,
            values: Some(values),
        }
    }

    /// The synthetic result of a field without a doc-values store.
    pub fn none() -> DocValuesResult {
        DocValuesResult {
            kind: DocValuesKind::None,
            values: None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == DocValuesKind::None
    }

    pub fn value(&self, doc_id: &str) -> Option<&DocValue> {
        self.values.as_ref().and_then(|values| values.get(doc_id))
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.values.iter().flat_map(|values| values.keys().map(String::as_str))
    }
}

/// Segment identifier; callers may name segments by ordinal or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SegmentId {
    fn from(s: &str) -> Self {
        SegmentId(s.to_string())
    }
}

impl From<String> for SegmentId {
    fn from(s: String) -> Self {
        SegmentId(s)
    }
}

impl From<u32> for SegmentId {
    fn from(ord: u32) -> Self {
        SegmentId(ord.to_string())
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The segment/field pair being inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub segment: SegmentId,
    pub field: String,
}

impl FieldSelection {
    pub fn new(segment: impl Into<SegmentId>, field: impl Into<String>) -> FieldSelection {
        FieldSelection {
            segment: segment.into(),
            field: field.into(),
        }
    }
}

/// Properties of the index that owns the inspected segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexData {
    pub index_path: String,
    pub num_docs: u64,
}

/// Arguments of a single doc-values fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub segment: SegmentId,
    pub field: String,
    /// Doc list text restricting the documents to load; empty for all.
    pub filter: String,
    pub encoding: String,
}

/// The outcome of a successful fetch: the values together with the encoding
/// the backend actually applied, which may differ from the requested one.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocValues {
    pub values: DocValuesResult,
    pub encoding: String,
}
