//! Get Ad Use Case

use std::sync::Arc;

use kernel::id::AdId;

use crate::domain::entities::Ad;
use crate::domain::repository::AdRepository;
use crate::error::{AdsError, AdsResult};

/// Get Ad Use Case
pub struct GetAdUseCase<A>
where
    A: AdRepository,
{
    ad_repo: Arc<A>,
}

impl<A> GetAdUseCase<A>
where
    A: AdRepository,
{
    pub fn new(ad_repo: Arc<A>) -> Self {
        Self { ad_repo }
    }

    pub async fn execute(&self, ad_id: AdId) -> AdsResult<Ad> {
        self.ad_repo
            .find_by_id(ad_id)
            .await
            .map_err(AdsError::Store)?
            .ok_or(AdsError::NotFound)
    }
}
