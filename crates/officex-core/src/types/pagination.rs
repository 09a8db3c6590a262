//! Cursor pagination for list endpoints.
//!
//! Cursors are opaque to clients. Internally a cursor is the decimal
//! offset, in the requested direction, of the first item of a page. Feeding
//! a returned `cursor_down` (or `cursor`) back into the next request yields
//! the following page with no overlap and no omission.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::pagination::PaginationConfig;
use crate::error::AppError;
use crate::result::AppResult;
use crate::types::sorting::SortDirection;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Free-form filter string, interpreted by each list endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    /// Number of items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
    /// Cursor returned by a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Legacy cursor pointing at the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_up: Option<String>,
    /// Legacy cursor pointing at the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_down: Option<String>,
}

impl PageRequest {
    /// Create a first-page request of the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    /// Continue from a previously returned cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set the sort direction.
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// The cursor the page starts from, preferring the current field over
    /// the legacy ones.
    pub fn start_cursor(&self) -> Option<&str> {
        self.cursor
            .as_deref()
            .or(self.cursor_down.as_deref())
            .or(self.cursor_up.as_deref())
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Number of items per page.
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total: usize,
    /// Direction the items were walked in.
    #[serde(default)]
    pub direction: SortDirection,
    /// Cursor for the next page, `None` on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Cursor for the previous page, `None` on the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_up: Option<String>,
    /// Cursor for the next page (legacy name of `cursor`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_down: Option<String>,
}

impl<T> PageResponse<T> {
    /// Create an empty response.
    pub fn empty(page_size: usize, direction: SortDirection) -> Self {
        Self {
            items: Vec::new(),
            page_size,
            total: 0,
            direction,
            cursor: None,
            cursor_up: None,
            cursor_down: None,
        }
    }

    /// Transform every item while keeping the cursors.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page_size: self.page_size,
            total: self.total,
            direction: self.direction,
            cursor: self.cursor,
            cursor_up: self.cursor_up,
            cursor_down: self.cursor_down,
        }
    }

    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Slices ordered collections into pages according to [`PaginationConfig`].
#[derive(Debug, Clone)]
pub struct Paginator {
    default_page_size: usize,
    max_page_size: usize,
}

impl Paginator {
    /// Create a paginator from configuration.
    pub fn new(config: &PaginationConfig) -> Self {
        let max_page_size = config.max_page_size.max(1);
        Self {
            default_page_size: config.default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    /// Resolve the effective page size of a request.
    pub fn page_size(&self, request: &PageRequest) -> usize {
        request
            .page_size
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }

    /// Return the page of `ordered` selected by `request`.
    ///
    /// `ordered` must be sorted ascending by the endpoint's sort key; a
    /// descending request walks it from the end.
    pub fn paginate<T: Clone>(
        &self,
        ordered: &[T],
        request: &PageRequest,
    ) -> AppResult<PageResponse<T>> {
        let page_size = self.page_size(request);
        let start = match request.start_cursor() {
            Some(cursor) => decode_cursor(cursor)?,
            None => 0,
        };
        let total = ordered.len();

        let items: Vec<T> = if request.direction.is_descending() {
            ordered.iter().rev().skip(start).take(page_size).cloned().collect()
        } else {
            ordered.iter().skip(start).take(page_size).cloned().collect()
        };

        let end = start + items.len();
        let next = (end < total).then(|| end.to_string());
        let previous = (start > 0).then(|| start.saturating_sub(page_size).to_string());

        debug!(start, page_size, total, returned = items.len(), "Paginated list");

        Ok(PageResponse {
            items,
            page_size,
            total,
            direction: request.direction,
            cursor: next.clone(),
            cursor_up: previous,
            cursor_down: next,
        })
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(&PaginationConfig::default())
    }
}

fn decode_cursor(cursor: &str) -> AppResult<usize> {
    cursor
        .parse::<usize>()
        .map_err(|_| AppError::validation(format!("Invalid pagination cursor: '{cursor}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(default: usize, max: usize) -> Paginator {
        Paginator::new(&PaginationConfig {
            default_page_size: default,
            max_page_size: max,
        })
    }

    #[test]
    fn test_walk_all_pages_without_overlap() {
        let items: Vec<u32> = (0..23).collect();
        let p = paginator(5, 100);
        let mut seen = Vec::new();
        let mut request = PageRequest::default();
        loop {
            let page = p.paginate(&items, &request).unwrap();
            assert_eq!(page.total, 23);
            seen.extend(page.items.iter().copied());
            match page.cursor_down {
                Some(next) => request = PageRequest::default().with_cursor(next),
                None => break,
            }
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_descending_walk() {
        let items: Vec<u32> = (0..5).collect();
        let p = paginator(2, 100);
        let request = PageRequest::default().with_direction(SortDirection::Desc);
        let first = p.paginate(&items, &request).unwrap();
        assert_eq!(first.items, vec![4, 3]);
        let second = p
            .paginate(&items, &request.clone().with_cursor(first.cursor.unwrap()))
            .unwrap();
        assert_eq!(second.items, vec![2, 1]);
        assert_eq!(second.cursor_up.as_deref(), Some("0"));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let p = paginator(10, 3);
        assert_eq!(p.page_size(&PageRequest::new(50)), 3);
        assert_eq!(p.page_size(&PageRequest::new(0)), 1);
        assert_eq!(p.page_size(&PageRequest::default()), 3);
    }

    #[test]
    fn test_cursor_past_end_is_empty_last_page() {
        let items = vec!["a", "b"];
        let page = paginator(5, 5)
            .paginate(&items, &PageRequest::default().with_cursor("9"))
            .unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_invalid_cursor_is_rejected() {
        let err = Paginator::default()
            .paginate(&[1, 2, 3], &PageRequest::default().with_cursor("abc"))
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_legacy_cursor_down_is_honoured() {
        let request: PageRequest =
            serde_json::from_str(r#"{"page_size": 2, "cursor_down": "2"}"#).unwrap();
        let page = Paginator::default().paginate(&[1, 2, 3, 4, 5], &request).unwrap();
        assert_eq!(page.items, vec![3, 4]);
    }
}
