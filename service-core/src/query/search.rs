use super::Record;

/// Case-insensitive substring search over one text field, preserving order.
///
/// An absent or empty `term` matches everything. Records without `field`
/// never match a non-empty term.
pub fn search<T: Record + Clone>(items: &[T], field: &str, term: Option<&str>) -> Vec<T> {
    let needle = match term {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return items.to_vec(),
    };

    items
        .iter()
        .filter(|record| {
            record
                .text_field(field)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
