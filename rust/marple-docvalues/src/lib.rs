//! Inspection of per-document doc values of index segment fields.
//!
//! The [`DocValueInspector`] loads the doc values of a selected segment/field
//! pair from a [`DocValuesBackend`], lets the operator restrict the displayed
//! documents with a doc list filter (`1, 5, 10-100`), and re-interprets textual
//! values under another encoding. An encoding choice is persisted per index and
//! field through [`EncodingPreferences`], but only after the backend confirmed it
//! by applying it.
//!
//! # Key Types
//!
//! - [`DocValueInspector`] - Selection state, load triggers and rendering
//! - [`DocValuesResult`] - The values of one field, tagged with their [`DocValuesKind`]
//! - [`InspectorView`] - The rendered rows, ready for display
//! - [`MemoryBackend`] - A backend over an in-memory (JSON-loadable) fixture
//!
//! All failures are reported through a [`NoticeSink`]; none of them aborts
//! inspection.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod format;
pub mod inspector;
pub mod model;
pub mod negotiator;
pub mod notice;
pub mod ordering;
pub mod preferences;
pub mod view;

pub use backend::{DocValuesBackend, MemoryBackend, TextEncoding};
pub use config::{InspectorConfig, ResponseOrdering};
pub use controller::{InspectorProps, PendingLoad, Trigger};
pub use error::InspectError;
pub use filter::DocFilterExpression;
pub use inspector::{DocValueInspector, LoadOutcome};
pub use model::{
    DocScalar, DocValue, DocValueMap, DocValuesKind, DocValuesResult, FieldSelection, IndexData,
    LoadRequest, LoadedDocValues, SegmentId,
};
pub use notice::{Notice, NoticeLog, NoticeSink};
pub use ordering::{DocListParser, RangeDocListParser};
pub use preferences::{EncodingPreferences, JsonFilePreferences, MemoryPreferences};
pub use view::{DocRow, InspectorView, ValuesView};
