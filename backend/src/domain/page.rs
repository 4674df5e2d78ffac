//! Bounded page-based retrieval for listings.
//!
//! Board and Q&A listings never fetch whole tables; repositories take a
//! [`PageRequest`] and return one [`Page`] of rows in creation order.

/// Fixed number of rows per listing page.
pub const PAGE_SIZE: i64 = 20;

/// A validated 1-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
}

impl PageRequest {
    /// First page.
    pub fn first() -> Self {
        Self { page: 1 }
    }

    /// Construct from a raw query-string value, clamping 0 to the first page.
    pub fn from_query(page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Row offset for the backing query.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * PAGE_SIZE
    }

    /// Row limit for the backing query.
    ///
    /// One extra row is requested so the repository can report whether a
    /// further page exists without a second count query.
    pub fn probe_limit(&self) -> i64 {
        PAGE_SIZE + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of rows plus a marker for whether more follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows on this page, at most [`PAGE_SIZE`].
    pub items: Vec<T>,
    /// The 1-based page number that produced these rows.
    pub page: u32,
    /// Whether a subsequent page exists.
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Build a page from a probe query that fetched [`PageRequest::probe_limit`] rows.
    pub fn from_probe(mut items: Vec<T>, request: PageRequest) -> Self {
        let has_next = items.len() as i64 > PAGE_SIZE;
        if has_next {
            items.truncate(PAGE_SIZE as usize);
        }
        Self {
            items,
            page: request.page(),
            has_next,
        }
    }

    /// Map the row type while preserving paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            has_next: self.has_next,
        }
    }
}
