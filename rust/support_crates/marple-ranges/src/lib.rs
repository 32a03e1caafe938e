//! Document id ranges: parsing of operator-entered doc lists and range adapters.
//!
//! - **Doc lists**: text such as `1, 5, 10-100` parsed into ranges of document ids,
//!   clamped to the number of documents in the index, and expanded into an
//!   ordered id sequence
//! - **Range adapters**: iterator adapters over `Range<u64>`
//!
//! # Key Items
//!
//! - [`parse_doclist`] - Lenient parsing into an ordered sequence of id strings
//! - [`parse_doc_ranges`] - Lenient parsing into ranges, without expansion
//! - [`try_parse_doc_ranges`] - Strict parsing into ranges, reporting malformed items
//! - [`RangeIteratorsExt`] - Extension trait providing range transformation methods

pub mod doclist;
pub mod transform;

pub use doclist::{
    DEFAULT_MAX_DOCLIST_LEN, parse_doc_ranges, parse_doclist, parse_doclist_with_limit,
    try_parse_doc_ranges,
};
pub use transform::RangeIteratorsExt;
