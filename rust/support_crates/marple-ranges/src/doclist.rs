//! Parsing of operator-entered document lists such as `1, 5, 10-100`.
//!
//! A doc list is a comma-separated sequence of items. Each item is one of:
//!
//! - `N`: a single document id,
//! - `A-B`: the inclusive range of ids from `A` to `B` (empty when `B < A`),
//! - `A-`: every id from `A` to the last document of the index,
//! - `-B`: every id from `0` to `B`.
//!
//! Whitespace around numbers is ignored, and blank items (e.g. a trailing comma
//! while the operator is still typing) contribute nothing. Ids at or beyond the
//! document count are dropped. The resulting ids keep the order in which the
//! items were entered; duplicates are not removed.

use std::ops::Range;

use marple_common::{Error, Result};

use crate::transform::RangeIteratorsExt;

/// Upper bound on the number of ids produced by [`parse_doclist`].
pub const DEFAULT_MAX_DOCLIST_LEN: usize = 10_000;

/// Parses `text` into an ordered sequence of document id strings, skipping
/// malformed items.
///
/// At most [`DEFAULT_MAX_DOCLIST_LEN`] ids are produced.
pub fn parse_doclist(text: &str, num_docs: u64) -> Vec<String> {
    parse_doclist_with_limit(text, num_docs, DEFAULT_MAX_DOCLIST_LEN)
}

/// Same as [`parse_doclist`], producing at most `max_len` ids.
pub fn parse_doclist_with_limit(text: &str, num_docs: u64, max_len: usize) -> Vec<String> {
    text.split(',')
        .filter_map(|item| parse_item(item, num_docs).ok().flatten())
        .clamp_to(0..num_docs)
        .positions(max_len)
        .map(|id| id.to_string())
        .collect()
}

/// Parses `text` into id ranges (half-open), clamped to `0..num_docs` and
/// skipping malformed items. Unlike [`parse_doclist`] nothing is expanded, so
/// the result is not subject to a length limit.
pub fn parse_doc_ranges(text: &str, num_docs: u64) -> Vec<Range<u64>> {
    text.split(',')
        .filter_map(|item| parse_item(item, num_docs).ok().flatten())
        .clamp_to(0..num_docs)
        .collect()
}

/// Strictly parses `text` into id ranges (half-open), clamped to `0..num_docs`.
///
/// Returns an error naming the first malformed item.
pub fn try_parse_doc_ranges(text: &str, num_docs: u64) -> Result<Vec<Range<u64>>> {
    let mut ranges = Vec::new();
    for item in text.split(',') {
        if let Some(range) = parse_item(item, num_docs)? {
            ranges.push(range);
        }
    }
    Ok(ranges.into_iter().clamp_to(0..num_docs).collect())
}

/// Parses a single doc list item. Blank items yield `Ok(None)`.
fn parse_item(item: &str, num_docs: u64) -> Result<Option<Range<u64>>> {
    let item = item.trim();
    if item.is_empty() {
        return Ok(None);
    }

    let Some((start, end)) = item.split_once('-') else {
        let id = parse_id(item, item)?;
        return Ok(Some(id..id.saturating_add(1)));
    };

    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() && end.is_empty() {
        return Err(malformed(item));
    }
    let start = if start.is_empty() {
        0
    } else {
        parse_id(start, item)?
    };
    let end = if end.is_empty() {
        num_docs
    } else {
        parse_id(end, item)?.saturating_add(1)
    };

    Ok(Some(start..end.max(start)))
}

fn parse_id(s: &str, item: &str) -> Result<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(item));
    }
    s.parse::<u64>().map_err(|_| malformed(item))
}

fn malformed(item: &str) -> Error {
    Error::invalid_format("doclist", format!("malformed item '{item}'"))
}
