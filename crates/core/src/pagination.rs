// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::{QuestionFilter, QuestionStore};
use quizdeck_domain::{DomainError, Question};

/// A validated page request. Both values are 1-based and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Arguments
    ///
    /// * `page` - The 1-based page number
    /// * `page_size` - The number of items per page
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageNumber` or
    /// `DomainError::InvalidPageSize` when either value is zero.
    pub const fn new(page: usize, page_size: usize) -> Result<Self, DomainError> {
        if page < 1 {
            return Err(DomainError::InvalidPageNumber { page });
        }
        if page_size < 1 {
            return Err(DomainError::InvalidPageSize { size: page_size });
        }
        Ok(Self { page, page_size })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page. Empty when the page number lies beyond
    /// the last page; that is not an error.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total_count: usize,
    /// The page size this page was computed with.
    pub page_size: usize,
    /// Total number of pages: `ceil(total_count / page_size)`.
    pub total_pages: usize,
}

/// Slices a full result set into one page.
///
/// Requesting a page beyond the last yields an empty item list with the
/// correct totals.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total_count: usize = items.len();
    let total_pages: usize = total_count.div_ceil(request.page_size);

    let items: Vec<T> = match (request.page - 1).checked_mul(request.page_size) {
        Some(offset) if offset < total_count => items
            .into_iter()
            .skip(offset)
            .take(request.page_size)
            .collect(),
        _ => Vec::new(),
    };

    Page {
        items,
        total_count,
        page_size: request.page_size,
        total_pages,
    }
}

/// Queries the store for questions matching a filter and returns one page.
///
/// Results are ordered by question id ascending so repeated queries page
/// through a stable sequence.
///
/// # Arguments
///
/// * `store` - The question store
/// * `filter` - Approval state / submitter / category constraints
/// * `request` - The page to return
///
/// # Errors
///
/// Returns a `CoreError::Store` error if the store cannot be reached in
/// time.
pub fn query_questions<S>(
    store: &S,
    filter: &QuestionFilter,
    request: &PageRequest,
) -> Result<Page<Question>, CoreError>
where
    S: QuestionStore,
{
    let mut rows: Vec<Question> = store.list_questions(filter)?;
    rows.sort_unstable_by_key(|question| question.id);
    Ok(paginate(rows, request))
}
