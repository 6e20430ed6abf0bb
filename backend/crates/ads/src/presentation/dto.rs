//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{AdId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Ad;
use crate::domain::services::QueryError;
use crate::domain::value_objects::ListParams;

// ============================================================================
// Create
// ============================================================================

/// Create ad request; the owner is the authenticated caller
///
/// Missing fields take their empty value so that field validation reports
/// the specific reason.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: i64,
}

/// Create ad response
#[derive(Debug, Clone, Serialize)]
pub struct CreateAdResponse {
    pub id: AdId,
}

// ============================================================================
// List
// ============================================================================

/// Listing query string
///
/// Numeric fields are kept as text so that a malformed value is reported
/// with the parameter's own message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAdsQuery {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ListAdsQuery {
    pub fn into_params(self) -> Result<ListParams, QueryError> {
        Ok(ListParams {
            page: parse_number(self.page, QueryError::Page)?,
            limit: parse_number(self.limit, QueryError::Limit)?,
            min_price: parse_number(self.min_price, QueryError::MinPrice)?,
            max_price: parse_number(self.max_price, QueryError::MaxPrice)?,
            sort_by: self.sort_by,
            order: self.order,
        })
    }
}

/// Empty means absent
fn parse_number(value: Option<String>, err: QueryError) -> Result<Option<i64>, QueryError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| err),
    }
}

// ============================================================================
// Ad
// ============================================================================

/// Public view of an ad
#[derive(Debug, Clone, Serialize)]
pub struct AdResponse {
    pub id: AdId,
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub price: i64,
    pub author_login: String,
    pub created_at: DateTime<Utc>,
    /// Whether the caller owns the ad; false when anonymous
    pub is_owner: bool,
}

impl AdResponse {
    pub fn from_ad(ad: Ad, viewer: Option<UserId>) -> Self {
        let is_owner = ad.is_owned_by(viewer);
        Self {
            id: ad.id,
            user_id: ad.user_id,
            title: ad.title,
            text: ad.text,
            image_url: ad.image_url,
            price: ad.price,
            author_login: ad.author_login,
            created_at: ad.created_at,
            is_owner,
        }
    }
}
