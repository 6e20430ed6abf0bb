//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::error::store::StoreResult;
use kernel::id::AdId;

use crate::domain::entities::{Ad, NewAd};
use crate::domain::value_objects::ListQuery;

/// Ad repository trait
#[trait_variant::make(AdRepository: Send)]
pub trait LocalAdRepository {
    /// Insert an ad and return its new ID
    async fn create(&self, ad: &NewAd) -> StoreResult<AdId>;

    /// Find ad by ID
    async fn find_by_id(&self, ad_id: AdId) -> StoreResult<Option<Ad>>;

    /// One page of ads, filtered and ordered per `query`
    async fn list(&self, query: &ListQuery) -> StoreResult<Vec<Ad>>;
}
