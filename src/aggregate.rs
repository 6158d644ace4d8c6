//! Grouped counting behind every dashboard statistic tile.

use std::collections::HashMap;
use std::hash::Hash;

/// Count records per group key. Pure grouping: each observed key maps to the
/// number of records sharing it, with no ordering guarantee. The counts
/// always sum to the input length.
pub fn group_counts<I, K, F>(records: I, mut key_fn: F) -> HashMap<K, usize>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(key_fn(&record)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_map() {
        let counts = group_counts(Vec::<&str>::new(), |s| s.len());
        assert!(counts.is_empty());
    }

    #[test]
    fn counts_by_extracted_key() {
        let records = vec!["todo", "done", "todo", "in_progress", "todo"];
        let counts = group_counts(records, |s| s.to_string());
        assert_eq!(counts.get("todo"), Some(&3));
        assert_eq!(counts.get("done"), Some(&1));
        assert_eq!(counts.get("in_progress"), Some(&1));
    }

    #[test]
    fn counts_sum_to_input_length() {
        let records: Vec<u32> = (0..97).collect();
        let counts = group_counts(records, |n| n % 7);
        assert_eq!(counts.values().sum::<usize>(), 97);
    }

    #[test]
    fn works_over_struct_fields() {
        struct Row {
            status: &'static str,
        }
        let rows = vec![
            Row { status: "pending" },
            Row { status: "approved" },
            Row { status: "pending" },
        ];
        let counts = group_counts(rows, |r| r.status);
        assert_eq!(counts.get("pending"), Some(&2));
        assert_eq!(counts.get("approved"), Some(&1));
    }
}
