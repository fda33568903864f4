//! Default two-pass search over records.
//!
//! Pass one is precise: a record matches when any of its string fields starts
//! or ends with the query. Only when pass one finds nothing does pass two run,
//! keeping records where any string field contains the query. Matching is
//! case-insensitive and non-string fields never match.

use log::{debug, trace};

use crate::model::Record;

/// Which pass produced a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    /// Prefix or suffix match.
    Precise,
    /// Substring fallback.
    Loose,
    /// Neither pass matched anything.
    None,
}

/// Result of a search: indices into the searched slice, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub indices: Vec<usize>,
    pub pass: MatchPass,
}

impl SearchResult {
    /// Returns `true` if no record matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Clones the matching records out of `data`, which must be the slice
    /// that was searched.
    pub fn records(&self, data: &[Record]) -> Vec<Record> {
        self.indices
            .iter()
            .filter_map(|&index| data.get(index).cloned())
            .collect()
    }
}

/// Searches `data` for `query` and reports which pass matched.
///
/// An empty query matches every record in pass one.
pub fn search_with_pass(data: &[Record], query: &str) -> SearchResult {
    let query = query.to_lowercase();

    let precise = matching_indices(data, |value| {
        value.starts_with(query.as_str()) || value.ends_with(query.as_str())
    });
    if !precise.is_empty() {
        debug!("Search {:?}: {} precise matches", query, precise.len());
        return SearchResult {
            indices: precise,
            pass: MatchPass::Precise,
        };
    }

    let loose = matching_indices(data, |value| value.contains(query.as_str()));
    debug!("Search {:?}: no precise matches, {} loose", query, loose.len());
    let pass = if loose.is_empty() {
        MatchPass::None
    } else {
        MatchPass::Loose
    };
    SearchResult {
        indices: loose,
        pass,
    }
}

/// Returns the records of `data` matching `query`, in input order.
///
/// # Example
///
/// ```
/// use datatable::{Record, search};
///
/// let data = vec![
///     Record::new().set("id", 1).set("name", "Alice"),
///     Record::new().set("id", 2).set("name", "bob"),
/// ];
///
/// // "Alice" neither starts nor ends with "lic", so the substring pass runs.
/// let found = search(&data, "lic");
/// assert_eq!(found, vec![data[0].clone()]);
/// ```
pub fn search(data: &[Record], query: &str) -> Vec<Record> {
    search_with_pass(data, query).records(data)
}

/// Indices into `data` of the records matching `query`, ascending.
pub fn search_indices(data: &[Record], query: &str) -> Vec<usize> {
    search_with_pass(data, query).indices
}

fn matching_indices(data: &[Record], matches: impl Fn(&str) -> bool) -> Vec<usize> {
    data.iter()
        .enumerate()
        .filter(|(index, record)| {
            let hit = record
                .string_values()
                .any(|value| matches(&value.to_lowercase()));
            if hit {
                trace!("Row {} matched", index);
            }
            hit
        })
        .map(|(index, _)| index)
        .collect()
}
