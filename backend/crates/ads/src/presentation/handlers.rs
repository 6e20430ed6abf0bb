//! HTTP Handlers

use auth::domain::repository::UserRepository;
use auth::middleware::CurrentUser;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::AdId;
use std::sync::Arc;

use crate::application::{CreateAdInput, CreateAdUseCase, GetAdUseCase, ListAdsUseCase};
use crate::domain::repository::AdRepository;
use crate::error::{AdsError, AdsResult};
use crate::presentation::dto::{AdResponse, CreateAdRequest, CreateAdResponse, ListAdsQuery};

/// Shared state for ads handlers
#[derive(Clone)]
pub struct AdsAppState<A, U>
where
    A: AdRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub ads: Arc<A>,
    pub users: Arc<U>,
}

/// POST /v1/ads
pub async fn create_ad<A, U>(
    State(state): State<AdsAppState<A, U>>,
    current_user: CurrentUser,
    payload: Result<Json<CreateAdRequest>, JsonRejection>,
) -> AdsResult<(StatusCode, Json<CreateAdResponse>)>
where
    A: AdRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AdsError::Validation("invalid request body".to_string())
    })?;

    let use_case = CreateAdUseCase::new(state.ads.clone(), state.users.clone());

    let id = use_case
        .execute(CreateAdInput {
            user_id: current_user.user_id,
            title: req.title,
            text: req.text,
            image_url: req.image_url,
            price: req.price,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreateAdResponse { id })))
}

/// GET /v1/ads
pub async fn list_ads<A, U>(
    State(state): State<AdsAppState<A, U>>,
    current_user: Option<CurrentUser>,
    query: Result<Query<ListAdsQuery>, QueryRejection>,
) -> AdsResult<Json<Vec<AdResponse>>>
where
    A: AdRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected query string");
        AdsError::Validation("invalid query parameters".to_string())
    })?;
    let params = query.into_params()?;

    let ads = ListAdsUseCase::new(state.ads.clone())
        .execute(params)
        .await?;

    let viewer = current_user.map(|u| u.user_id);
    Ok(Json(
        ads.into_iter()
            .map(|ad| AdResponse::from_ad(ad, viewer))
            .collect(),
    ))
}

/// GET /v1/ads/{id}
pub async fn get_ad<A, U>(
    State(state): State<AdsAppState<A, U>>,
    current_user: Option<CurrentUser>,
    ad_id: Result<Path<i64>, PathRejection>,
) -> AdsResult<Json<AdResponse>>
where
    A: AdRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let Path(ad_id) = ad_id.map_err(|_| AdsError::Validation("invalid ad id".to_string()))?;

    let ad = GetAdUseCase::new(state.ads.clone())
        .execute(AdId::new(ad_id))
        .await?;

    Ok(Json(AdResponse::from_ad(
        ad,
        current_user.map(|u| u.user_id),
    )))
}
