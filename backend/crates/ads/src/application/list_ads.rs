//! List Ads Use Case

use std::sync::Arc;

use crate::domain::entities::Ad;
use crate::domain::repository::AdRepository;
use crate::domain::services::validate_list_params;
use crate::domain::value_objects::ListParams;
use crate::error::{AdsError, AdsResult};

/// List Ads Use Case
pub struct ListAdsUseCase<A>
where
    A: AdRepository,
{
    ad_repo: Arc<A>,
}

impl<A> ListAdsUseCase<A>
where
    A: AdRepository,
{
    pub fn new(ad_repo: Arc<A>) -> Self {
        Self { ad_repo }
    }

    pub async fn execute(&self, params: ListParams) -> AdsResult<Vec<Ad>> {
        let query = validate_list_params(&params)?;

        let ads = self.ad_repo.list(&query).await.map_err(AdsError::Store)?;

        tracing::debug!(
            sort_by = query.sort_by.as_sql(),
            order = query.order.as_sql(),
            page = query.page,
            limit = query.limit,
            returned = ads.len(),
            "Listed ads"
        );

        Ok(ads)
    }
}
