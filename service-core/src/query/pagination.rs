use super::QueryError;
use serde::Serialize;

/// Page size used when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One fixed-size slice of an ordered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page_number: u64,
    pub page_size: u64,
    /// Length of the collection before slicing.
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        (self.total_items as u64).div_ceil(self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}

/// Slices `items` into the requested page.
///
/// A missing or non-positive `page_number` serves page 1. Pages past the end
/// are empty rather than an error.
pub fn paginate<T: Clone>(
    items: &[T],
    page_number: Option<i64>,
    page_size: i64,
) -> Result<Page<T>, QueryError> {
    if page_size <= 0 {
        return Err(QueryError::InvalidArgument(format!(
            "page_size must be positive, got {}",
            page_size
        )));
    }

    let page_number = match page_number {
        Some(n) if n > 0 => n as u64,
        _ => 1,
    };
    let page_size = page_size as u64;
    let take = usize::try_from(page_size).unwrap_or(usize::MAX);

    let slice = (page_number - 1)
        .checked_mul(page_size)
        .and_then(|offset| usize::try_from(offset).ok())
        .and_then(|offset| items.get(offset..))
        .map(|rest| rest.iter().take(take).cloned().collect())
        .unwrap_or_default();

    Ok(Page {
        items: slice,
        page_number,
        page_size,
        total_items: items.len(),
    })
}
