use crate::data::model::Record;

/// Rows per table page.
pub const TABLE_PAGE_SIZE: usize = 10;

/// Client-side pagination over the resolved selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    /// Zero-based.
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Pager::new(TABLE_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Pager {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Current page, clamped to the last page of `total` rows.
    pub fn page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total).saturating_sub(1))
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn has_prev(&self, total: usize) -> bool {
        self.page(total) > 0
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page(total) + 1 < self.page_count(total)
    }

    pub fn prev(&mut self, total: usize) {
        self.page = self.page(total).saturating_sub(1);
    }

    pub fn next(&mut self, total: usize) {
        if self.has_next(total) {
            self.page = self.page(total) + 1;
        }
    }

    /// The rows shown on the current page.
    pub fn slice<'r, T>(&self, rows: &'r [T]) -> &'r [T] {
        let start = self.page(rows.len()) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        &rows[start.min(end)..end]
    }

    /// `Page X of Y`, or `No data` for an empty table.
    pub fn label(&self, total: usize) -> String {
        if total == 0 {
            "No data".to_string()
        } else {
            format!("Page {} of {}", self.page(total) + 1, self.page_count(total))
        }
    }
}

/// Text cells of the current page.
pub fn page_texts<'a>(pager: &Pager, rows: &[&'a Record]) -> Vec<&'a str> {
    pager.slice(rows).iter().map(|r| r.raw_text.as_str()).collect()
}
