//! Query parameters and pagination utilities

use serde::Deserialize;

/// Number of items returned per page by every list endpoint
pub const ITEMS_PER_PAGE: usize = 10;

/// Query parameters shared by list endpoints
///
/// # Example
/// ```rust,ignore
/// pub async fn list_addresses(Query(params): Query<PageQuery>) -> ... {
///     let page = params.page(ITEMS_PER_PAGE);
/// }
///
/// // GET /address?page=2
/// // GET /cinema?page=1&include=address,sessions
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PageQuery {
    /// Page number (starts at 1, values below 1 are read as 1)
    pub page: Option<i64>,

    /// Comma separated relationship names to load and emit
    pub include: Option<String>,
}

impl PageQuery {
    /// Resolve the requested page into an offset/limit window
    pub fn page(&self, per_page: usize) -> Page {
        Page::new(self.page.unwrap_or(1), per_page)
    }

    /// Relationship names requested through `include`
    pub fn includes(&self) -> Vec<String> {
        parse_includes(self.include.as_deref())
    }
}

/// Query parameters for single-entity reads
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IncludeQuery {
    /// Comma separated relationship names to load and emit
    pub include: Option<String>,
}

impl IncludeQuery {
    pub fn includes(&self) -> Vec<String> {
        parse_includes(self.include.as_deref())
    }
}

fn parse_includes(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// An offset/limit window over a key-ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// Maximum number of items in the page
    pub limit: usize,
}

impl Page {
    pub fn new(number: i64, limit: usize) -> Self {
        Self {
            number: number.max(1) as usize,
            limit: limit.max(1),
        }
    }

    /// Number of rows to skip, saturating for absurdly large page numbers
    pub fn offset(&self) -> usize {
        (self.number - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, ITEMS_PER_PAGE)
    }
}
