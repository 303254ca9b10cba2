use serde::{Deserialize, Serialize};

/// Pagination descriptor returned alongside paged results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paging {
    #[serde(default)]
    pub total_rows: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
}

impl Paging {
    /// The page after this one, if there is one.
    pub fn next_page(&self) -> Option<u64> {
        let current = self.current_page?;
        if self.is_last_page() {
            None
        } else {
            Some(current + 1)
        }
    }

    pub fn previous_page(&self) -> Option<u64> {
        match self.current_page? {
            0 | 1 => None,
            current => Some(current - 1),
        }
    }

    /// True when no further page can be fetched. Missing page numbers count as last.
    pub fn is_last_page(&self) -> bool {
        match (self.current_page, self.total_pages()) {
            (Some(current), Some(total)) => current >= total,
            _ => true,
        }
    }

    /// `TotalPages` as reported, or derived from `TotalRows` and `PageSize`.
    pub fn total_pages(&self) -> Option<u64> {
        self.total_pages.or_else(|| match (self.total_rows, self.page_size) {
            (Some(rows), Some(size)) if size > 0 => Some(rows.div_ceil(size)),
            _ => None,
        })
    }
}
