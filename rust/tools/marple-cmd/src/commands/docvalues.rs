//! Docvalues command implementation

use anyhow::{Context, Result};
use log::debug;
use marple_docvalues::{
    DocValueInspector, EncodingPreferences, FieldSelection, InspectorConfig, InspectorProps,
    InspectorView, JsonFilePreferences, MemoryBackend, MemoryPreferences, Notice, NoticeLog,
};

use crate::utils::validate_file_exists;

pub struct DocValuesArgs {
    pub segment: String,
    pub field: String,
    pub docs: Option<String>,
    pub encoding: Option<String>,
    pub prefs: Option<String>,
    pub config: Option<String>,
    pub json: bool,
    pub fixture_path: String,
}

/// Run the docvalues command
pub fn run(args: DocValuesArgs) -> Result<()> {
    let json = args.json;
    let (view, notices) = inspect(args)?;

    for notice in &notices {
        eprintln!("{notice}");
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

/// Mounts an inspector on the requested field, then applies the doc filter and
/// the encoding request in the order an operator would.
fn inspect(args: DocValuesArgs) -> Result<(InspectorView, Vec<Notice>)> {
    validate_file_exists(&args.fixture_path)?;
    let backend = MemoryBackend::from_json_file(&args.fixture_path)
        .with_context(|| format!("Failed to load doc values fixture: {}", args.fixture_path))?;

    let config = match &args.config {
        Some(path) => InspectorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load inspector config: {path}"))?,
        None => InspectorConfig::default(),
    };

    let preferences: Box<dyn EncodingPreferences> = match &args.prefs {
        Some(path) => Box::new(
            JsonFilePreferences::open(path)
                .with_context(|| format!("Failed to open preferences: {path}"))?,
        ),
        None => Box::new(MemoryPreferences::new()),
    };

    let index = backend.index_data().clone();
    debug!(
        "loaded fixture for '{}' with {} documents",
        index.index_path, index.num_docs
    );

    let mut inspector = DocValueInspector::new(config, backend, preferences, NoticeLog::new());
    inspector.set_props(InspectorProps {
        selection: Some(FieldSelection::new(args.segment, args.field)),
        index,
    });
    if let Some(docs) = &args.docs {
        inspector.edit_filter(docs);
    }
    if let Some(encoding) = &args.encoding {
        inspector.request_encoding(encoding);
    }

    let view = inspector.render();
    let notices = inspector.notices_mut().drain();
    Ok((view, notices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const FIXTURE: &str = r#"{
        "index_path": "/data/books",
        "num_docs": 10,
        "segments": {
            "0": {
                "title": { "type": "SORTED", "values": { "1": "Dune", "3": "Emma" } },
                "body": { "type": "NONE" }
            }
        }
    }"#;

    fn args(dir: &Path, field: &str) -> DocValuesArgs {
        let fixture_path = dir.join("fixture.json");
        std::fs::write(&fixture_path, FIXTURE).unwrap();
        DocValuesArgs {
            segment: "0".to_string(),
            field: field.to_string(),
            docs: None,
            encoding: None,
            prefs: None,
            config: None,
            json: false,
            fixture_path: fixture_path.display().to_string(),
        }
    }

    #[test]
    fn test_inspect_field() {
        let dir = tempfile::tempdir().unwrap();
        let (view, notices) = inspect(args(dir.path(), "title")).unwrap();
        assert_eq!(view.row_texts(), vec!["(1) Dune", "(3) Emma"]);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_inspect_with_filter_and_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let prefs_path = dir.path().join("prefs.json");
        let mut args = args(dir.path(), "title");
        args.docs = Some("3-4".to_string());
        args.encoding = Some("hex".to_string());
        args.prefs = Some(prefs_path.display().to_string());

        let (view, notices) = inspect(args).unwrap();
        assert_eq!(view.row_texts(), vec!["(3) 456d6d61", "(4) [no value]"]);
        assert!(notices.is_empty());

        let prefs = JsonFilePreferences::open(&prefs_path).unwrap();
        assert_eq!(
            prefs
                .field_encoding("/data/books", "title", "docvalues")
                .as_deref(),
            Some("hex")
        );
    }

    #[test]
    fn test_inspect_rejected_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "title");
        args.encoding = Some("double".to_string());
        let (view, notices) = inspect(args).unwrap();
        assert_eq!(view.row_texts(), vec!["(1) Dune", "(3) Emma"]);
        assert_eq!(
            notices,
            vec![Notice::info("double is not a valid encoding for this field")]
        );
    }

    #[test]
    fn test_inspect_field_without_doc_values() {
        let dir = tempfile::tempdir().unwrap();
        let (view, _) = inspect(args(dir.path(), "body")).unwrap();
        assert_eq!(view.to_string(), "[no doc values for field body]\n");
    }

    #[test]
    fn test_missing_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "title");
        args.fixture_path = dir.path().join("missing.json").display().to_string();
        assert!(inspect(args).is_err());
    }
}
