//! Selection and ordering of the document ids to display.

use std::cmp::Ordering;

use marple_ranges::parse_doclist_with_limit;

use crate::filter::DocFilterExpression;
use crate::model::DocValuesResult;

/// Expands doc list text into an ordered sequence of document ids.
pub trait DocListParser {
    fn parse_doclist(&self, filter: &str, num_docs: u64) -> Vec<String>;
}

/// [`DocListParser`] over `marple_ranges`, producing at most `max_len` ids.
#[derive(Debug, Clone, Copy)]
pub struct RangeDocListParser {
    pub max_len: usize,
}

impl Default for RangeDocListParser {
    fn default() -> Self {
        RangeDocListParser {
            max_len: marple_ranges::DEFAULT_MAX_DOCLIST_LEN,
        }
    }
}

impl DocListParser for RangeDocListParser {
    fn parse_doclist(&self, filter: &str, num_docs: u64) -> Vec<String> {
        parse_doclist_with_limit(filter, num_docs, self.max_len)
    }
}

/// Document ids to display for `result`.
///
/// With a filter, the parser output is used as is, in its order, including ids
/// that have no value. Without one, every id holding a value is listed in
/// ascending numeric order.
pub fn document_ids(
    filter: &DocFilterExpression,
    result: &DocValuesResult,
    num_docs: u64,
    parser: &dyn DocListParser,
) -> Vec<String> {
    if !filter.is_empty() {
        return parser.parse_doclist(filter.as_str(), num_docs);
    }
    let mut ids: Vec<String> = result.doc_ids().map(str::to_string).collect();
    ids.sort_by(|a, b| compare_doc_ids(a, b));
    ids
}

/// Orders ids by their base-10 value. Ids that do not parse rank after every
/// numeric id and compare lexicographically among themselves.
pub fn compare_doc_ids(a: &str, b: &str) -> Ordering {
    match (parse_doc_id(a), parse_doc_id(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_doc_id(id: &str) -> Option<u64> {
    id.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocValue, DocValueMap, DocValuesKind};

    fn result(ids: &[&str]) -> DocValuesResult {
        let values: DocValueMap = ids
            .iter()
            .map(|id| (id.to_string(), DocValue::from("v")))
            .collect();
        DocValuesResult::new(DocValuesKind::Sorted, values)
    }

    struct FixedParser(Vec<&'static str>);

    impl DocListParser for FixedParser {
        fn parse_doclist(&self, _filter: &str, _num_docs: u64) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn test_numeric_order_without_filter() {
        let ids = document_ids(
            &DocFilterExpression::default(),
            &result(&["10", "2", "1", "100"]),
            200,
            &RangeDocListParser::default(),
        );
        assert_eq!(ids, vec!["1", "2", "10", "100"]);
    }

    #[test]
    fn test_malformed_ids_rank_last() {
        let mut ids = vec!["b", "3", "a", "20"];
        ids.sort_by(|a, b| compare_doc_ids(a, b));
        assert_eq!(ids, vec!["3", "20", "a", "b"]);
    }

    #[test]
    fn test_filter_uses_parser_output_verbatim() {
        let parser = FixedParser(vec!["12", "5", "99"]);
        let ids = document_ids(
            &DocFilterExpression::from_input("5, 12"),
            &result(&["5"]),
            100,
            &parser,
        );
        assert_eq!(ids, vec!["12", "5", "99"]);
    }

    #[test]
    fn test_filter_with_range_parser() {
        let ids = document_ids(
            &DocFilterExpression::from_input("5, 10-12"),
            &result(&["5", "11"]),
            100,
            &RangeDocListParser::default(),
        );
        assert_eq!(ids, vec!["5", "10", "11", "12"]);
    }

    #[test]
    fn test_none_result_has_no_ids() {
        let ids = document_ids(
            &DocFilterExpression::default(),
            &DocValuesResult::none(),
            100,
            &RangeDocListParser::default(),
        );
        assert!(ids.is_empty());
    }
}
