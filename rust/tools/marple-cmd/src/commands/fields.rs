//! Fields command implementation

use anyhow::{Context, Result};
use marple_docvalues::MemoryBackend;
use serde::Serialize;

use crate::utils::validate_file_exists;

#[derive(Serialize)]
struct FieldsSummary {
    index_path: String,
    num_docs: u64,
    fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
struct FieldInfo {
    segment: String,
    field: String,
    #[serde(rename = "type")]
    kind: String,
    value_count: usize,
}

/// Run the fields command
pub fn run(fixture_path: String) -> Result<()> {
    validate_file_exists(&fixture_path)?;
    let backend = MemoryBackend::from_json_file(&fixture_path)
        .with_context(|| format!("Failed to load doc values fixture: {fixture_path}"))?;

    let summary = create_fields_summary(&backend);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn create_fields_summary(backend: &MemoryBackend) -> FieldsSummary {
    FieldsSummary {
        index_path: backend.index_data().index_path.clone(),
        num_docs: backend.index_data().num_docs,
        fields: backend
            .fields()
            .map(|(segment, field, stored)| FieldInfo {
                segment: segment.to_string(),
                field: field.to_string(),
                kind: stored.kind.to_string(),
                value_count: stored.values.len(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_summary() {
        let backend = MemoryBackend::from_json_str(
            r#"{
                "index_path": "/idx",
                "num_docs": 4,
                "segments": {
                    "0": { "a": { "type": "SORTED", "values": { "0": "x", "2": "y" } } },
                    "1": { "b": { "type": "NONE" } }
                }
            }"#,
        )
        .unwrap();
        let summary = serde_json::to_value(create_fields_summary(&backend)).unwrap();
        assert_eq!(
            summary,
            serde_json::json!({
                "index_path": "/idx",
                "num_docs": 4,
                "fields": [
                    { "segment": "0", "field": "a", "type": "SORTED", "value_count": 2 },
                    { "segment": "1", "field": "b", "type": "NONE", "value_count": 0 }
                ]
            })
        );
    }
}
