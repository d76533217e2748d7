use super::{Record, RecordId};

/// Relation value meaning "do not filter".
pub const ALL_RELATIONS: RecordId = 0;

/// Keeps the records whose `relation_field` equals `relation_value`.
///
/// [`ALL_RELATIONS`] returns the input unchanged.
pub fn filter_by_relation<T: Record + Clone>(
    items: &[T],
    relation_field: &str,
    relation_value: RecordId,
) -> Vec<T> {
    if relation_value == ALL_RELATIONS {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|record| record.relation_field(relation_field) == Some(relation_value))
        .cloned()
        .collect()
}
