//! Domain Value Objects
//!
//! Immutable value types for the ads domain.

/// Default page size when `limit` is absent or zero
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum title length (in characters)
pub const TITLE_MAX_LENGTH: usize = 120;

/// Whitelisted sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Price,
    #[default]
    CreatedAt,
}

impl SortBy {
    /// Parse a query-string value (exact match)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(Self::Price),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// Column name; the only way sort keys reach SQL
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a query-string value (exact match)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Raw listing parameters as received from the caller
///
/// Absent values are `None`; numeric values are already parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Validated, defaulted listing query
///
/// # Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_PAGE_SIZE`
/// - price bounds are non-negative and `min_price <= max_price` when both set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub page: i64,
    pub limit: i64,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ListQuery {
    /// Rows to skip: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        if self.page <= 1 {
            return 0;
        }
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            min_price: None,
            max_price: None,
        }
    }
}
