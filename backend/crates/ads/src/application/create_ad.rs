//! Create Ad Use Case

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use kernel::error::store::StoreError;
use kernel::id::{AdId, UserId};

use crate::domain::entities::NewAd;
use crate::domain::repository::AdRepository;
use crate::domain::services::validate_ad_fields;
use crate::error::{AdsError, AdsResult};

/// Input DTO for create ad
#[derive(Debug, Clone)]
pub struct CreateAdInput {
    pub user_id: UserId,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub price: i64,
}

/// Create Ad Use Case
pub struct CreateAdUseCase<A, U>
where
    A: AdRepository,
    U: UserRepository,
{
    ad_repo: Arc<A>,
    user_repo: Arc<U>,
}

impl<A, U> CreateAdUseCase<A, U>
where
    A: AdRepository,
    U: UserRepository,
{
    pub fn new(ad_repo: Arc<A>, user_repo: Arc<U>) -> Self {
        Self { ad_repo, user_repo }
    }

    pub async fn execute(&self, input: CreateAdInput) -> AdsResult<AdId> {
        validate_ad_fields(&input.title, &input.text, input.user_id, input.price)?;

        // Author login is denormalized onto the ad
        let author = self
            .user_repo
            .find_by_id(input.user_id)
            .await
            .map_err(AdsError::Store)?
            .ok_or_else(|| AdsError::Validation("user not found".to_string()))?;

        let new_ad = NewAd {
            user_id: input.user_id,
            title: input.title,
            text: input.text,
            image_url: input.image_url.filter(|url| !url.is_empty()),
            price: input.price,
            author_login: author.login.into_inner(),
        };

        let ad_id = self.ad_repo.create(&new_ad).await.map_err(|e| match e {
            StoreError::ForeignKeyViolation => {
                AdsError::Validation("invalid data reference".to_string())
            }
            StoreError::UniqueViolation => AdsError::Conflict,
            other => AdsError::Store(other),
        })?;

        tracing::info!(ad_id = %ad_id, user_id = %new_ad.user_id, price = new_ad.price, "Ad created");

        Ok(ad_id)
    }
}
