//! Domain Services
//!
//! Pure validation rules for ad creation and ad listing.

use kernel::id::UserId;
use thiserror::Error;

use crate::domain::value_objects::{
    DEFAULT_PAGE_SIZE, ListParams, ListQuery, MAX_PAGE_SIZE, SortBy, SortOrder, TITLE_MAX_LENGTH,
};

/// Ad field rule violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdValidationError {
    #[error("title is required")]
    TitleRequired,

    #[error("title is too long")]
    TitleTooLong,

    #[error("text cannot be empty")]
    TextRequired,

    #[error("user ID is required")]
    UserIdRequired,

    #[error("price must be non-negative")]
    NegativePrice,
}

/// Listing parameter violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid sort_by parameter")]
    SortBy,

    #[error("invalid order parameter")]
    Order,

    #[error("invalid page parameter")]
    Page,

    #[error("invalid limit parameter")]
    Limit,

    #[error("invalid min_price parameter")]
    MinPrice,

    #[error("invalid max_price parameter")]
    MaxPrice,

    #[error("min_price must not exceed max_price")]
    PriceRange,
}

/// Check ad fields in order: title, text, owner, price
pub fn validate_ad_fields(
    title: &str,
    text: &str,
    user_id: UserId,
    price: i64,
) -> Result<(), AdValidationError> {
    if title.is_empty() {
        return Err(AdValidationError::TitleRequired);
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(AdValidationError::TitleTooLong);
    }
    if text.is_empty() {
        return Err(AdValidationError::TextRequired);
    }
    if !user_id.is_set() {
        return Err(AdValidationError::UserIdRequired);
    }
    if price < 0 {
        return Err(AdValidationError::NegativePrice);
    }
    Ok(())
}

/// Apply defaults and validate listing parameters
///
/// Empty strings and zero page/limit count as absent. The first violation
/// is reported.
pub fn validate_list_params(params: &ListParams) -> Result<ListQuery, QueryError> {
    let sort_by = match params.sort_by.as_deref() {
        None | Some("") => SortBy::default(),
        Some(value) => SortBy::parse(value).ok_or(QueryError::SortBy)?,
    };

    let order = match params.order.as_deref() {
        None | Some("") => SortOrder::default(),
        Some(value) => SortOrder::parse(value).ok_or(QueryError::Order)?,
    };

    let page = match params.page {
        None | Some(0) => 1,
        Some(page) if page < 0 => return Err(QueryError::Page),
        Some(page) => page,
    };

    let limit = match params.limit {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(limit) if !(1..=MAX_PAGE_SIZE).contains(&limit) => return Err(QueryError::Limit),
        Some(limit) => limit,
    };

    if params.min_price.is_some_and(|p| p < 0) {
        return Err(QueryError::MinPrice);
    }
    if params.max_price.is_some_and(|p| p < 0) {
        return Err(QueryError::MaxPrice);
    }
    if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
        if min > max {
            return Err(QueryError::PriceRange);
        }
    }

    Ok(ListQuery {
        sort_by,
        order,
        page,
        limit,
        min_price: params.min_price,
        max_price: params.max_price,
    })
}
