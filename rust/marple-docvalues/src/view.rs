//! The rendered state of an inspector.

use std::fmt;

use serde::Serialize;

use crate::model::DocValuesKind;
use crate::negotiator::EncodingControl;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InspectorView {
    /// No field selected, or nothing loaded yet.
    Empty,
    /// The field has no doc-values store.
    NoDocValues { field: String },
    Values(ValuesView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuesView {
    pub field: String,
    pub kind: DocValuesKind,
    /// The committed doc filter text.
    pub filter: String,
    pub placeholder: &'static str,
    /// Present only for kinds whose values may be re-encoded.
    pub encoding: Option<EncodingControl>,
    pub rows: Vec<DocRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRow {
    pub doc_id: String,
    pub text: String,
}

impl InspectorView {
    pub fn rows(&self) -> &[DocRow] {
        match self {
            InspectorView::Values(values) => &values.rows,
            _ => &[],
        }
    }

    pub fn row_texts(&self) -> Vec<&str> {
        self.rows().iter().map(|row| row.text.as_str()).collect()
    }
}

impl fmt::Display for InspectorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectorView::Empty => Ok(()),
            InspectorView::NoDocValues { field } => {
                writeln!(f, "[no doc values for field {field}]")
            }
            InspectorView::Values(values) => {
                write!(f, "{} [{}]", values.field, values.kind)?;
                if let Some(encoding) = &values.encoding {
                    write!(
                        f,
                        " encoding: {} (one of: {})",
                        encoding.current,
                        encoding.choices.join(", ")
                    )?;
                }
                writeln!(f)?;
                if values.filter.is_empty() {
                    writeln!(f, "docs: all")?;
                } else {
                    writeln!(f, "docs: {}", values.filter)?;
                }
                for row in &values.rows {
                    writeln!(f, "{}", row.text)?;
                }
                Ok(())
            }
        }
    }
}
