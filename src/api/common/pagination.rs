//
//  bitbucket-rest-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Bitbucket Server API Responses
//!
//! Bitbucket Server uses offset-based pagination: every list endpoint takes
//! `start` and `limit` query parameters and answers with a page envelope:
//!
//! ```json
//! {
//!     "values": [...],
//!     "size": 25,
//!     "limit": 25,
//!     "isLastPage": false,
//!     "nextPageStart": 25,
//!     "start": 0
//! }
//! ```
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Range`] | The request window (`start`, `limit`) |
//! | [`Page`] | One fetched page plus cursor state |
//! | [`collect_all`] | Walks every page and accumulates the values |
//!
//! # Pagination Strategy
//!
//! 1. Request `start=0` with the resource's default limit
//! 2. Accumulate the page's values
//! 3. While the page is not the last one, request `start=nextPageStart`
//! 4. Stop as soon as a page reports `isLastPage`
//!
//! The server guarantees that `nextPageStart` advances; the traversal relies
//! on that for termination.

use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;

use serde::Serialize;

use super::{ApiError, Result};

/// Describes one page request window.
///
/// # Example
///
/// ```rust
/// use bitbucket_rest_client::api::common::Range;
///
/// let range = Range::new(50, 25)?;
/// assert_eq!(range.start(), 50);
/// assert_eq!(range.limit(), 25);
/// assert!(Range::new(0, 0).is_err());
/// # Ok::<(), bitbucket_rest_client::ApiError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: u32,
    limit: u32,
}

impl Range {
    /// Creates a window starting at `start` holding at most `limit` items.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if `limit` is zero.
    pub fn new(start: u32, limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(ApiError::InvalidArgument(
                "range limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self { start, limit })
    }

    /// Creates the first window (`start = 0`) of the given size.
    pub fn first(limit: u32) -> Result<Self> {
        Self::new(0, limit)
    }

    /// Offset of the first requested item (0-indexed).
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Maximum number of items requested.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// One page of results from a Bitbucket Server list endpoint.
///
/// Pages are produced by the response parsers (or [`Page::empty`]) and are
/// never mutated afterwards.
///
/// # Fields
///
/// | Field | Wire key | Description |
/// |-------|----------|-------------|
/// | `start` | `start` | Offset of the first item in this page |
/// | `limit` | `limit` | Page size that was applied |
/// | `is_last_page` | `isLastPage` | Whether more pages exist |
/// | `size` | `size` | Number of items in this page |
/// | `next_page_start` | `nextPageStart` | Offset of the next page; 0 on the last page |
/// | `values` | `values` | The items, in server order |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub start: u32,
    pub limit: u32,
    pub is_last_page: bool,
    pub size: u32,
    pub next_page_start: u32,
    pub values: Vec<T>,
}

impl<T> Page<T> {
    /// The page returned by listing operations when the server answers 404.
    ///
    /// ```rust
    /// use bitbucket_rest_client::api::common::Page;
    ///
    /// let page: Page<String> = Page::empty();
    /// assert!(page.is_last_page);
    /// assert_eq!((page.start, page.limit, page.size, page.next_page_start), (0, 0, 0, 0));
    /// assert!(page.values.is_empty());
    /// ```
    pub fn empty() -> Self {
        Self {
            start: 0,
            limit: 0,
            is_last_page: true,
            size: 0,
            next_page_start: 0,
            values: Vec::new(),
        }
    }

    /// Returns the start index for the next page, or `None` on the last page.
    pub fn next_start(&self) -> Option<u32> {
        if self.is_last_page {
            None
        } else {
            Some(self.next_page_start)
        }
    }
}

/// Fetches every page through `fetch` and accumulates all values.
///
/// The first request uses `Range(0, limit)`; each following request starts at
/// the previous page's `nextPageStart`. Values equal to one already collected
/// are skipped, so the result holds each distinct value once, in the order it
/// was first seen.
///
/// # Errors
///
/// Any error returned by `fetch` aborts the traversal and is returned as is.
/// A zero `limit` fails with [`ApiError::InvalidArgument`] before fetching.
///
/// # Example
///
/// ```rust
/// use bitbucket_rest_client::api::common::{collect_all, Page, Range};
///
/// # async fn example() -> bitbucket_rest_client::api::common::Result<()> {
/// let all = collect_all(100, |range: Range| async move {
///     Ok(Page {
///         start: range.start(),
///         limit: range.limit(),
///         is_last_page: true,
///         size: 2,
///         next_page_start: 0,
///         values: vec![1, 2],
///     })
/// })
/// .await?;
/// assert_eq!(all, vec![1, 2]);
/// # Ok(())
/// # }
/// ```
pub async fn collect_all<T, F, Fut>(limit: u32, mut fetch: F) -> Result<Vec<T>>
where
    T: Eq + Hash + Clone,
    F: FnMut(Range) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut range = Range::first(limit)?;
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    loop {
        let page = fetch(range).await?;
        tracing::trace!(
            start = range.start,
            received = page.values.len(),
            last = page.is_last_page,
            "fetched page"
        );

        let next_start = page.next_start();
        for value in page.values {
            if seen.insert(value.clone()) {
                items.push(value);
            }
        }

        match next_start {
            Some(start) => range = Range { start, limit },
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn page_of(start: u32, values: Vec<u32>, last: bool, next: u32) -> Page<u32> {
        Page {
            start,
            limit: 100,
            is_last_page: last,
            size: values.len() as u32,
            next_page_start: next,
            values,
        }
    }

    #[tokio::test]
    async fn test_collects_three_pages_in_order() {
        let requested = RefCell::new(Vec::new());
        let all = collect_all(100, |range| {
            requested.borrow_mut().push(range);
            let page = match range.start() {
                0 => page_of(0, (0..100).collect(), false, 100),
                100 => page_of(100, (100..200).collect(), false, 200),
                200 => page_of(200, (200..250).collect(), true, 0),
                other => panic!("unexpected start {other}"),
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(all, (0..250).collect::<Vec<_>>());
        let starts: Vec<u32> = requested.borrow().iter().map(|r| r.start()).collect();
        assert_eq!(starts, vec![0, 100, 200]);
        assert!(requested.borrow().iter().all(|r| r.limit() == 100));
    }

    #[tokio::test]
    async fn test_empty_first_page_fetches_once() {
        let calls = RefCell::new(0);
        let all: Vec<u32> = collect_all(100, |_| {
            *calls.borrow_mut() += 1;
            async { Ok(Page::empty()) }
        })
        .await
        .unwrap();

        assert!(all.is_empty());
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_duplicates_across_pages_collapse() {
        let all = collect_all(2, |range| {
            let page = if range.start() == 0 {
                page_of(0, vec![1, 2], false, 2)
            } else {
                page_of(2, vec![2, 3], true, 0)
            };
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(all, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_error_aborts_traversal() {
        let result: Result<Vec<u32>> = collect_all(100, |range| async move {
            if range.start() == 0 {
                Ok(page_of(0, vec![1], false, 1))
            } else {
                Err(ApiError::ServerError("boom".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(ApiError::ServerError(_))));
    }

    #[test]
    fn test_range_rejects_zero_limit() {
        assert!(matches!(Range::new(10, 0), Err(ApiError::InvalidArgument(_))));
        assert_eq!(Range::first(25).unwrap(), Range::new(0, 25).unwrap());
    }

    #[test]
    fn test_next_start_only_when_more_pages() {
        assert_eq!(page_of(0, vec![], false, 25).next_start(), Some(25));
        assert_eq!(page_of(0, vec![], true, 25).next_start(), None);
    }
}
