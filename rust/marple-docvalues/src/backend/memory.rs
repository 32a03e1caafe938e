//! An in-memory doc-values backend, loadable from a JSON fixture.
//!
//! Fixture layout:
//!
//! ```json
//! {
//!   "index_path": "/data/books",
//!   "num_docs": 100,
//!   "segments": {
//!     "0": {
//!       "title": { "type": "SORTED", "values": { "1": "Dune", "3": "Emma" } },
//!       "tags": { "type": "SORTED_SET", "values": { "1": ["scifi", "classic"] } },
//!       "year": { "type": "NUMERIC", "values": { "1": 1965 } },
//!       "body": { "type": "NONE" }
//!     }
//!   }
//! }
//! ```
//!
//! Textual values are stored as strings and their UTF-8 bytes are what the
//! requested encoding re-interprets.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use marple_common::{Error, Result};
use serde::{Deserialize, Serialize};

use super::DocValuesBackend;
use super::encoding::TextEncoding;
use crate::model::{
    DocScalar, DocValue, DocValueMap, DocValuesKind, DocValuesResult, IndexData, LoadRequest,
    LoadedDocValues, SegmentId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredField {
    #[serde(rename = "type")]
    pub kind: DocValuesKind,
    #[serde(default)]
    pub values: DocValueMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryBackend {
    #[serde(flatten)]
    index: IndexData,
    #[serde(default)]
    segments: BTreeMap<SegmentId, BTreeMap<String, StoredField>>,
}

impl MemoryBackend {
    pub fn new(index: IndexData) -> MemoryBackend {
        MemoryBackend {
            index,
            segments: BTreeMap::new(),
        }
    }

    pub fn with_field(
        mut self,
        segment: impl Into<SegmentId>,
        field: impl Into<String>,
        kind: DocValuesKind,
        values: DocValueMap,
    ) -> MemoryBackend {
        self.segments
            .entry(segment.into())
            .or_default()
            .insert(field.into(), StoredField { kind, values });
        self
    }

    pub fn from_json_str(json: &str) -> Result<MemoryBackend> {
        serde_json::from_str(json).map_err(|e| Error::json("doc values fixture", e))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<MemoryBackend> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        serde_json::from_str(&json).map_err(|e| Error::json(path.display().to_string(), e))
    }

    pub fn index_data(&self) -> &IndexData {
        &self.index
    }

    /// All stored fields as `(segment, field, stored)`, ordered by segment, then field.
    pub fn fields(&self) -> impl Iterator<Item = (&SegmentId, &str, &StoredField)> {
        self.segments.iter().flat_map(|(segment, fields)| {
            fields
                .iter()
                .map(move |(name, stored)| (segment, name.as_str(), stored))
        })
    }

    /// Values whose id falls within `filter`. Row limits are left to the caller.
    fn select(&self, stored: &StoredField, filter: &str) -> DocValueMap {
        if filter.trim().is_empty() {
            return stored.values.clone();
        }
        let ranges = marple_ranges::parse_doc_ranges(filter, self.index.num_docs);
        stored
            .values
            .iter()
            .filter(|(id, _)| {
                id.trim()
                    .parse::<u64>()
                    .is_ok_and(|id| ranges.iter().any(|range| range.contains(&id)))
            })
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }
}

impl DocValuesBackend for MemoryBackend {
    fn load_doc_values(&self, request: &LoadRequest) -> Result<LoadedDocValues> {
        let fields = self
            .segments
            .get(&request.segment)
            .ok_or_else(|| Error::unknown_segment(request.segment.as_str()))?;
        let stored = fields
            .get(&request.field)
            .filter(|stored| stored.kind != DocValuesKind::None)
            .ok_or_else(|| Error::no_doc_values(&request.field))?;

        let selected = self.select(stored, &request.filter);
        if !stored.kind.encoding_applies() {
            return Ok(LoadedDocValues {
                values: DocValuesResult::new(stored.kind.clone(), selected),
                encoding: request.encoding.clone(),
            });
        }

        let requested = request.encoding.parse::<TextEncoding>().ok();
        let decoded = requested.and_then(|encoding| {
            decode_values(&selected, encoding).map(|values| (values, encoding))
        });
        let (values, encoding) = match decoded {
            Some(decoded) => decoded,
            None => {
                debug!(
                    "encoding '{}' does not apply to field '{}', falling back to utf8",
                    request.encoding, request.field
                );
                let values = decode_values(&selected, TextEncoding::Utf8).unwrap_or(selected);
                (values, TextEncoding::Utf8)
            }
        };

        Ok(LoadedDocValues {
            values: DocValuesResult::new(stored.kind.clone(), values),
            encoding: encoding.name().to_string(),
        })
    }
}

/// Decodes every textual scalar of `values`; `None` if any of them does not
/// decode under `encoding`.
fn decode_values(values: &DocValueMap, encoding: TextEncoding) -> Option<DocValueMap> {
    values
        .iter()
        .map(|(id, value)| decode_value(value, encoding).map(|v| (id.clone(), v)))
        .collect()
}

fn decode_value(value: &DocValue, encoding: TextEncoding) -> Option<DocValue> {
    match value {
        DocValue::Scalar(s) => decode_scalar(s, encoding).map(DocValue::Scalar),
        DocValue::Multi(v) => v
            .iter()
            .map(|s| decode_scalar(s, encoding))
            .collect::<Option<Vec<_>>>()
            .map(DocValue::Multi),
    }
}

fn decode_scalar(scalar: &DocScalar, encoding: TextEncoding) -> Option<DocScalar> {
    match scalar {
        DocScalar::Text(s) => encoding.decode(s.as_bytes()),
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> MemoryBackend {
        MemoryBackend::from_json_str(
            r#"{
                "index_path": "/data/books",
                "num_docs": 20,
                "segments": {
                    "0": {
                        "title": { "type": "SORTED", "values": { "1": "Dune", "3": "Emma", "12": "Ulysses" } },
                        "code": { "type": "BINARY", "values": { "2": "abcd", "4": "wxyz" } },
                        "year": { "type": "NUMERIC", "values": { "1": 1965 } },
                        "body": { "type": "NONE" }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn request(field: &str, filter: &str, encoding: &str) -> LoadRequest {
        LoadRequest {
            segment: SegmentId::from("0"),
            field: field.to_string(),
            filter: filter.to_string(),
            encoding: encoding.to_string(),
        }
    }

    #[test]
    fn test_load_all_values() {
        let loaded = backend()
            .load_doc_values(&request("title", "", "utf8"))
            .unwrap();
        assert_eq!(loaded.encoding, "utf8");
        assert_eq!(loaded.values.kind, DocValuesKind::Sorted);
        assert_eq!(loaded.values.doc_ids().count(), 3);
    }

    #[test]
    fn test_load_filtered_values() {
        let loaded = backend()
            .load_doc_values(&request("title", "0-3, 15", "utf8"))
            .unwrap();
        let ids: Vec<_> = loaded.values.doc_ids().collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_reencode_textual_values() {
        let loaded = backend()
            .load_doc_values(&request("code", "", "hex"))
            .unwrap();
        assert_eq!(loaded.encoding, "hex");
        assert_eq!(loaded.values.value("2").unwrap().to_string(), "61626364");

        let loaded = backend()
            .load_doc_values(&request("code", "", "int"))
            .unwrap();
        assert_eq!(loaded.encoding, "int");
        assert_eq!(loaded.values.value("2").unwrap().to_string(), "1633837924");
    }

    #[test]
    fn test_inapplicable_encoding_falls_back_to_utf8() {
        let loaded = backend()
            .load_doc_values(&request("title", "", "long"))
            .unwrap();
        assert_eq!(loaded.encoding, "utf8");
        assert_eq!(loaded.values.value("1").unwrap().to_string(), "Dune");

        let loaded = backend()
            .load_doc_values(&request("title", "", "ebcdic"))
            .unwrap();
        assert_eq!(loaded.encoding, "utf8");
    }

    #[test]
    fn test_numeric_values_echo_requested_encoding() {
        let loaded = backend()
            .load_doc_values(&request("year", "", "base64"))
            .unwrap();
        assert_eq!(loaded.encoding, "base64");
        assert_eq!(loaded.values.value("1").unwrap().to_string(), "1965");
    }

    #[test]
    fn test_missing_doc_values() {
        let backend = backend();
        let err = backend
            .load_doc_values(&request("body", "", "utf8"))
            .unwrap_err();
        assert_eq!(err.to_string(), "No doc values for field 'body'");
        let err = backend
            .load_doc_values(&request("nope", "", "utf8"))
            .unwrap_err();
        assert!(err.to_string().starts_with("No doc values for"));
    }

    #[test]
    fn test_unknown_segment() {
        let mut req = request("title", "", "utf8");
        req.segment = SegmentId::from("7");
        let err = backend().load_doc_values(&req).unwrap_err();
        assert_eq!(err.to_string(), "unknown segment '7'");
    }

    #[test]
    fn test_fields_listing() {
        let backend = backend();
        let fields: Vec<_> = backend
            .fields()
            .map(|(segment, name, stored)| (segment.as_str(), name, stored.kind.name()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("0", "body", "NONE"),
                ("0", "code", "BINARY"),
                ("0", "title", "SORTED"),
                ("0", "year", "NUMERIC"),
            ]
        );
        assert_eq!(backend.index_data().num_docs, 20);
    }
}
