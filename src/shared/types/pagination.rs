//! Page slicing over an ordered, filtered source.
//!
//! `PaginatedList::create` issues one count and one range fetch against a
//! [`PageSource`] and keeps only the rows that belong to the requested page.
//! Requested page numbers are normalised (absent, zero or negative → 1) but
//! never clamped against the last page: asking for a page past the end
//! yields an empty page whose `total_pages` still reflects the real count.

use std::num::NonZeroU64;

use async_trait::async_trait;

use crate::shared::errors::DomainError;

/// A sorted, filtered sequence that can be counted and sliced.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Number of rows in the filtered sequence.
    async fn count(&self) -> Result<u64, DomainError>;

    /// Rows `[skip, skip + take)` of the ordered sequence.
    async fn fetch_range(&self, skip: u64, take: u64) -> Result<Vec<Self::Item>, DomainError>;
}

/// One page of results plus the metadata needed for previous/next navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedList<T> {
    items: Vec<T>,
    page_index: u64,
    total_pages: u64,
    total_count: u64,
}

impl<T: Send> PaginatedList<T> {
    /// Count the source, then fetch the slice for `requested_page`.
    pub async fn create<S>(
        source: &S,
        requested_page: Option<i64>,
        page_size: NonZeroU64,
    ) -> Result<Self, DomainError>
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let total_count = source.count().await?;
        let page_index = normalize_page(requested_page);
        let skip = page_index
            .saturating_sub(1)
            .saturating_mul(page_size.get())
            .min(i64::MAX as u64);
        let items = source.fetch_range(skip, page_size.get()).await?;

        Ok(Self::from_parts(items, total_count, page_index, page_size))
    }
}

impl<T> PaginatedList<T> {
    /// Assemble a page from already-fetched rows.
    ///
    /// Rows beyond `page_size` are dropped, and an empty count always
    /// produces an empty page.
    pub fn from_parts(
        mut items: Vec<T>,
        total_count: u64,
        page_index: u64,
        page_size: NonZeroU64,
    ) -> Self {
        let total_pages = total_count.div_ceil(page_size.get());
        if total_pages == 0 {
            items.clear();
        }
        items.truncate(page_size.get() as usize);

        Self {
            items,
            page_index: page_index.max(1),
            total_pages,
            total_count,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based index of this page.
    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Rows in the filtered source across all pages.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages
    }

    /// Convert the items while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> PaginatedList<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedList {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// Absent, zero and negative page numbers all mean the first page.
pub fn normalize_page(requested_page: Option<i64>) -> u64 {
    requested_page.unwrap_or(1).max(1) as u64
}

// ── Tests ──────────────────────────────────────────────────────
