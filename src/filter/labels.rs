use indexmap::IndexMap;

use crate::types::Record;

/// Include/exclude records by label set membership.
///
/// Stage 1 keeps every record sharing at least one label with
/// `include_labels` (`None` = no include-filter, everything passes). When
/// `include_unlabeled` is set, records with an empty label set are
/// additionally unioned in — an OR with stage 1, not an AND. Stage 2 then
/// drops any survivor sharing a label with `exclude_labels`, so exclusion
/// wins over inclusion.
///
/// Union semantics are true set union keyed by record number: a record
/// matching both stages appears exactly once, and the original input order
/// is preserved.
pub fn filter_by_labels<R: Record + Clone>(
    records: &[R],
    include_labels: Option<&[String]>,
    exclude_labels: Option<&[String]>,
    include_unlabeled: bool,
) -> Vec<R> {
    let mut kept: IndexMap<u64, &R> = IndexMap::new();

    match include_labels {
        None => {
            for record in records {
                kept.insert(record.number(), record);
            }
        }
        Some(include) => {
            for record in records {
                if include.iter().any(|name| record.has_label(name)) {
                    kept.insert(record.number(), record);
                }
            }
        }
    }

    if include_unlabeled {
        for record in records {
            if record.is_unlabeled() {
                kept.entry(record.number()).or_insert(record);
            }
        }
    }

    if let Some(exclude) = exclude_labels {
        kept.retain(|_, record| !exclude.iter().any(|name| record.has_label(name)));
    }

    kept.into_values().cloned().collect()
}
