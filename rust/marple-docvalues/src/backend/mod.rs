//! The doc-values backend seam and an in-memory implementation.

use marple_common::Result;

use crate::model::{LoadRequest, LoadedDocValues};

pub mod encoding;
pub mod memory;

pub use encoding::TextEncoding;
pub use memory::MemoryBackend;

/// Source of doc values for a segment's field.
///
/// A backend reports the encoding it actually applied alongside the values;
/// when it cannot honor the requested encoding it falls back to another one
/// rather than failing. Fields without a doc-values store fail with a message
/// containing `No doc values for`.
pub trait DocValuesBackend {
    fn load_doc_values(&self, request: &LoadRequest) -> Result<LoadedDocValues>;
}

impl<T: DocValuesBackend + ?Sized> DocValuesBackend for Box<T> {
    fn load_doc_values(&self, request: &LoadRequest) -> Result<LoadedDocValues> {
        (**self).load_doc_values(request)
    }
}
