//! Unit tests for ads crate
//! Use cases and router run against in-memory repositories.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use auth::domain::entity::user::{NewUser, User};
    use auth::domain::repository::UserRepository;
    use auth::domain::value_object::login::Login;
    use auth::domain::value_object::user_password::{RawPassword, UserPassword};
    use chrono::{Duration, Utc};
    use kernel::error::store::{StoreError, StoreResult};
    use kernel::id::{AdId, UserId};

    use crate::domain::entities::{Ad, NewAd};
    use crate::domain::repository::AdRepository;
    use crate::domain::value_objects::{ListQuery, SortBy, SortOrder};

    /// Failure injected into `AdRepository::create`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum CreateFailure {
        #[default]
        None,
        ForeignKey,
        Unique,
        Database,
    }

    #[derive(Clone, Default)]
    pub struct InMemoryAdRepository {
        ads: Arc<Mutex<Vec<Ad>>>,
        failure: Arc<Mutex<CreateFailure>>,
    }

    impl InMemoryAdRepository {
        pub fn fail_create_with(&self, failure: CreateFailure) {
            *self.failure.lock().unwrap() = failure;
        }

        pub fn all(&self) -> Vec<Ad> {
            self.ads.lock().unwrap().clone()
        }

        /// Insert directly, with `created_at` spaced one minute apart
        pub fn seed(&self, user_id: UserId, author: &str, title: &str, price: i64) -> AdId {
            let mut ads = self.ads.lock().unwrap();
            let id = AdId::new(ads.len() as i64 + 1);
            ads.push(Ad {
                id,
                user_id,
                title: title.to_string(),
                text: format!("{title} for sale"),
                image_url: None,
                price,
                author_login: author.to_string(),
                created_at: Utc::now() - Duration::minutes(100 - id.value()),
            });
            id
        }
    }

    impl AdRepository for InMemoryAdRepository {
        async fn create(&self, ad: &NewAd) -> StoreResult<AdId> {
            match *self.failure.lock().unwrap() {
                CreateFailure::None => {}
                CreateFailure::ForeignKey => return Err(StoreError::ForeignKeyViolation),
                CreateFailure::Unique => return Err(StoreError::UniqueViolation),
                CreateFailure::Database => {
                    return Err(StoreError::database(std::io::Error::other("disk full")));
                }
            }
            let mut ads = self.ads.lock().unwrap();
            let id = AdId::new(ads.len() as i64 + 1);
            ads.push(Ad {
                id,
                user_id: ad.user_id,
                title: ad.title.clone(),
                text: ad.text.clone(),
                image_url: ad.image_url.clone(),
                price: ad.price,
                author_login: ad.author_login.clone(),
                created_at: Utc::now(),
            });
            Ok(id)
        }

        async fn find_by_id(&self, ad_id: AdId) -> StoreResult<Option<Ad>> {
            Ok(self
                .ads
                .lock()
                .unwrap()
                .iter()
                .find(|ad| ad.id == ad_id)
                .cloned())
        }

        async fn list(&self, query: &ListQuery) -> StoreResult<Vec<Ad>> {
            let mut ads: Vec<Ad> = self
                .ads
                .lock()
                .unwrap()
                .iter()
                .filter(|ad| query.min_price.is_none_or(|min| ad.price >= min))
                .filter(|ad| query.max_price.is_none_or(|max| ad.price <= max))
                .cloned()
                .collect();

            ads.sort_by(|a, b| {
                let ordering = match query.sort_by {
                    SortBy::Price => a.price.cmp(&b.price),
                    SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
                }
                .then(a.id.value().cmp(&b.id.value()));
                match query.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });

            Ok(ads
                .into_iter()
                .skip(query.offset() as usize)
                .take(query.limit as usize)
                .collect())
        }
    }

    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl InMemoryUserRepository {
        pub fn with_user(login: &str) -> (Self, UserId) {
            let repo = Self::default();
            let id = UserId::new(1);
            repo.users.lock().unwrap().push(User {
                id,
                login: Login::new(login).unwrap(),
                password_hash: UserPassword::from_raw(
                    &RawPassword::new("Secret1!".to_string()).unwrap(),
                )
                .unwrap(),
                created_at: Utc::now(),
            });
            (repo, id)
        }
    }

    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, _user: &NewUser) -> StoreResult<User> {
            Err(StoreError::database(std::io::Error::other("read-only")))
        }

        async fn find_by_login(&self, login: &Login) -> StoreResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| &u.login == login).cloned())
        }

        async fn find_by_id(&self, user_id: UserId) -> StoreResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == user_id).cloned())
        }
    }
}

#[cfg(test)]
mod query_validation_tests {
    use crate::domain::services::{QueryError, validate_list_params};
    use crate::domain::value_objects::{ListParams, ListQuery, SortBy, SortOrder};

    #[test]
    fn test_defaults() {
        let query = validate_list_params(&ListParams::default()).unwrap();
        assert_eq!(query, ListQuery::default());
        assert_eq!(query.sort_by, SortBy::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_empty_strings_and_zeros_default() {
        let params = ListParams {
            sort_by: Some(String::new()),
            order: Some(String::new()),
            page: Some(0),
            limit: Some(0),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params).unwrap(), ListQuery::default());
    }

    #[test]
    fn test_sort_and_order() {
        let params = ListParams {
            sort_by: Some("price".to_string()),
            order: Some("asc".to_string()),
            ..ListParams::default()
        };
        let query = validate_list_params(&params).unwrap();
        assert_eq!(query.sort_by, SortBy::Price);
        assert_eq!(query.order, SortOrder::Asc);

        let params = ListParams {
            sort_by: Some("name".to_string()),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params), Err(QueryError::SortBy));
        assert_eq!(
            QueryError::SortBy.to_string(),
            "invalid sort_by parameter"
        );

        let params = ListParams {
            order: Some("up".to_string()),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params), Err(QueryError::Order));
    }

    #[test]
    fn test_limit_bounds() {
        let with_limit = |limit| ListParams {
            limit: Some(limit),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&with_limit(1)).unwrap().limit, 1);
        assert_eq!(validate_list_params(&with_limit(100)).unwrap().limit, 100);
        assert_eq!(
            validate_list_params(&with_limit(101)),
            Err(QueryError::Limit)
        );
        assert_eq!(validate_list_params(&with_limit(-1)), Err(QueryError::Limit));
    }

    #[test]
    fn test_page_and_offset() {
        let params = ListParams {
            page: Some(1),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params).unwrap().offset(), 0);

        let params = ListParams {
            page: Some(3),
            limit: Some(10),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params).unwrap().offset(), 20);

        let params = ListParams {
            page: Some(-2),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params), Err(QueryError::Page));
    }

    #[test]
    fn test_price_bounds() {
        let with_prices = |min, max| ListParams {
            min_price: min,
            max_price: max,
            ..ListParams::default()
        };

        assert_eq!(
            validate_list_params(&with_prices(Some(500), Some(100))),
            Err(QueryError::PriceRange)
        );
        let query = validate_list_params(&with_prices(Some(100), Some(500))).unwrap();
        assert_eq!((query.min_price, query.max_price), (Some(100), Some(500)));

        assert!(validate_list_params(&with_prices(Some(100), Some(100))).is_ok());
        assert_eq!(
            validate_list_params(&with_prices(Some(-1), None)),
            Err(QueryError::MinPrice)
        );
        assert_eq!(
            validate_list_params(&with_prices(None, Some(-1))),
            Err(QueryError::MaxPrice)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let params = ListParams {
            sort_by: Some("name".to_string()),
            order: Some("up".to_string()),
            page: Some(-1),
            limit: Some(1000),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params), Err(QueryError::SortBy));

        let params = ListParams {
            limit: Some(1000),
            min_price: Some(-1),
            ..ListParams::default()
        };
        assert_eq!(validate_list_params(&params), Err(QueryError::Limit));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let params = ListParams {
            sort_by: Some("price".to_string()),
            page: Some(4),
            limit: Some(25),
            min_price: Some(10),
            ..ListParams::default()
        };
        let first = validate_list_params(&params);
        let second = validate_list_params(&params);
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod create_ad_tests {
    use std::sync::Arc;

    use kernel::id::UserId;
    use tokio_test::assert_ok;

    use super::support::*;
    use crate::application::{CreateAdInput, CreateAdUseCase};
    use crate::error::AdsError;

    fn input(user_id: UserId) -> CreateAdInput {
        CreateAdInput {
            user_id,
            title: "Bike".to_string(),
            text: "Red city bike".to_string(),
            image_url: Some("https://img.example/bike.jpg".to_string()),
            price: 15000,
        }
    }

    fn setup() -> (
        CreateAdUseCase<InMemoryAdRepository, InMemoryUserRepository>,
        Arc<InMemoryAdRepository>,
        UserId,
    ) {
        let ads = Arc::new(InMemoryAdRepository::default());
        let (users, user_id) = InMemoryUserRepository::with_user("alice");
        (
            CreateAdUseCase::new(ads.clone(), Arc::new(users)),
            ads,
            user_id,
        )
    }

    fn validation_message(err: AdsError) -> String {
        match err {
            AdsError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_denormalizes_author() {
        let (use_case, ads, user_id) = setup();

        let id = assert_ok!(use_case.execute(input(user_id)).await);

        let stored = ads.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].author_login, "alice");
        assert_eq!(stored[0].user_id, user_id);
    }

    #[tokio::test]
    async fn test_empty_image_url_is_none() {
        let (use_case, ads, user_id) = setup();

        let mut ad = input(user_id);
        ad.image_url = Some(String::new());
        assert_ok!(use_case.execute(ad).await);

        assert_eq!(ads.all()[0].image_url, None);
    }

    #[tokio::test]
    async fn test_field_validation() {
        let (use_case, ads, user_id) = setup();

        let mut ad = input(user_id);
        ad.title = String::new();
        let err = use_case.execute(ad).await.unwrap_err();
        assert_eq!(validation_message(err), "title is required");

        let mut ad = input(user_id);
        ad.price = -5;
        let err = use_case.execute(ad).await.unwrap_err();
        assert_eq!(validation_message(err), "price must be non-negative");

        let err = use_case.execute(input(UserId::default())).await.unwrap_err();
        assert_eq!(validation_message(err), "user ID is required");

        assert!(ads.all().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_validation_error() {
        let (use_case, ads, _) = setup();

        let err = use_case.execute(input(UserId::new(99))).await.unwrap_err();

        assert_eq!(validation_message(err), "user not found");
        assert!(ads.all().is_empty());
    }

    #[tokio::test]
    async fn test_store_failures_are_translated() {
        let (use_case, ads, user_id) = setup();

        ads.fail_create_with(CreateFailure::ForeignKey);
        let err = use_case.execute(input(user_id)).await.unwrap_err();
        assert_eq!(validation_message(err), "invalid data reference");

        ads.fail_create_with(CreateFailure::Unique);
        let err = use_case.execute(input(user_id)).await.unwrap_err();
        assert!(matches!(err, AdsError::Conflict));

        ads.fail_create_with(CreateFailure::Database);
        let err = use_case.execute(input(user_id)).await.unwrap_err();
        assert!(matches!(err, AdsError::Store(_)));
        assert_eq!(err.to_app_error().message(), "internal server error");
    }
}

#[cfg(test)]
mod list_and_get_tests {
    use std::sync::Arc;

    use kernel::id::{AdId, UserId};

    use super::support::*;
    use crate::application::{GetAdUseCase, ListAdsUseCase};
    use crate::domain::value_objects::ListParams;
    use crate::error::AdsError;

    fn seeded() -> Arc<InMemoryAdRepository> {
        let ads = Arc::new(InMemoryAdRepository::default());
        let owner = UserId::new(1);
        ads.seed(owner, "alice", "Bike", 300);
        ads.seed(owner, "alice", "Lamp", 100);
        ads.seed(owner, "alice", "Sofa", 500);
        ads
    }

    fn titles(ads: &[crate::domain::entities::Ad]) -> Vec<&str> {
        ads.iter().map(|ad| ad.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_newest_first_by_default() {
        let ads = ListAdsUseCase::new(seeded())
            .execute(ListParams::default())
            .await
            .unwrap();
        assert_eq!(titles(&ads), ["Sofa", "Lamp", "Bike"]);
    }

    #[tokio::test]
    async fn test_list_by_price_with_filter_and_paging() {
        let use_case = ListAdsUseCase::new(seeded());

        let params = ListParams {
            sort_by: Some("price".to_string()),
            order: Some("asc".to_string()),
            min_price: Some(100),
            max_price: Some(400),
            ..ListParams::default()
        };
        let ads = use_case.execute(params).await.unwrap();
        assert_eq!(titles(&ads), ["Lamp", "Bike"]);

        let params = ListParams {
            sort_by: Some("price".to_string()),
            page: Some(2),
            limit: Some(2),
            ..ListParams::default()
        };
        let ads = use_case.execute(params).await.unwrap();
        assert_eq!(titles(&ads), ["Lamp"]);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_sort() {
        let params = ListParams {
            sort_by: Some("name".to_string()),
            ..ListParams::default()
        };
        let err = ListAdsUseCase::new(seeded())
            .execute(params)
            .await
            .unwrap_err();
        assert!(matches!(err, AdsError::Validation(ref m) if m == "invalid sort_by parameter"));
    }

    #[tokio::test]
    async fn test_get_ad() {
        let use_case = GetAdUseCase::new(seeded());

        let ad = use_case.execute(AdId::new(2)).await.unwrap();
        assert_eq!(ad.title, "Lamp");

        let err = use_case.execute(AdId::new(42)).await.unwrap_err();
        assert!(matches!(err, AdsError::NotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use auth::AuthConfig;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::presentation::router::ads_router;

    struct Harness {
        app: Router,
        ads: Arc<InMemoryAdRepository>,
        owner: UserId,
        token: String,
    }

    fn harness() -> Harness {
        let config = Arc::new(AuthConfig::new(
            b"router-test-secret".to_vec(),
            Duration::from_secs(900),
        ));
        let (users, owner) = InMemoryUserRepository::with_user("alice");
        let ads = Arc::new(InMemoryAdRepository::default());
        let token = config.token_signer().issue(&owner.to_string()).unwrap();

        Harness {
            app: ads_router(ads.clone(), Arc::new(users), config),
            ads,
            owner,
            token,
        }
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ad_body() -> Value {
        json!({"title": "Bike", "text": "Red city bike", "price": 15000})
    }

    #[tokio::test]
    async fn test_create_requires_token() {
        let h = harness();

        let response = h.app.clone().oneshot(post("/ads", None, ad_body())).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = h
            .app
            .oneshot(post("/ads", Some("not-a-token"), ad_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(h.ads.all().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_token() {
        let h = harness();

        let response = h
            .app
            .oneshot(post("/ads", Some(&h.token), ad_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["id"], 1);
        assert_eq!(h.ads.all()[0].user_id, h.owner);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let h = harness();

        let response = h
            .app
            .oneshot(post(
                "/ads",
                Some(&h.token),
                json!({"title": "", "text": "x", "price": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "title is required");
    }

    #[tokio::test]
    async fn test_create_missing_fields_report_reason() {
        let h = harness();

        let cases = [
            (json!({"text": "x", "price": 1}), "title is required"),
            (json!({"title": "Bike", "price": 1}), "text cannot be empty"),
        ];
        for (body, detail) in cases {
            let response = h
                .app
                .clone()
                .oneshot(post("/ads", Some(&h.token), body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{detail}");
            assert_eq!(body_json(response).await["detail"], detail);
        }
        assert!(h.ads.all().is_empty());
    }

    #[tokio::test]
    async fn test_create_missing_price_is_zero() {
        let h = harness();

        let response = h
            .app
            .oneshot(post(
                "/ads",
                Some(&h.token),
                json!({"title": "Free chair", "text": "Pick up only"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let stored = h.ads.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].price, 0);
        assert_eq!(stored[0].image_url, None);
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let h = harness();

        let response = h
            .app
            .oneshot(post(
                "/ads",
                Some(&h.token),
                json!({"title": "Bike", "text": "x", "price": "cheap"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "invalid request body");
    }

    #[tokio::test]
    async fn test_list_marks_ownership() {
        let h = harness();
        h.ads.seed(h.owner, "alice", "Bike", 300);
        h.ads.seed(UserId::new(2), "bob", "Lamp", 100);

        let anonymous = body_json(h.app.clone().oneshot(get("/ads", None)).await.unwrap()).await;
        let list = anonymous.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|ad| ad["is_owner"] == false));

        let response = h
            .app
            .oneshot(get("/ads?sort_by=price&order=asc", Some(&h.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["title"], "Lamp");
        assert_eq!(body[0]["is_owner"], false);
        assert_eq!(body[1]["title"], "Bike");
        assert_eq!(body[1]["is_owner"], true);
        assert_eq!(body[1]["author_login"], "alice");
        assert!(body[1]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_list_with_invalid_token_is_anonymous() {
        let h = harness();
        h.ads.seed(h.owner, "alice", "Bike", 300);

        let response = h.app.oneshot(get("/ads", Some("garbage"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await[0]["is_owner"], false);
    }

    #[tokio::test]
    async fn test_list_query_errors() {
        let h = harness();

        let cases = [
            ("/ads?sort_by=name", "invalid sort_by parameter"),
            ("/ads?order=sideways", "invalid order parameter"),
            ("/ads?page=abc", "invalid page parameter"),
            ("/ads?limit=101", "invalid limit parameter"),
            ("/ads?min_price=500&max_price=100", "min_price must not exceed max_price"),
        ];
        for (uri, detail) in cases {
            let response = h.app.clone().oneshot(get(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body_json(response).await["detail"], detail, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_get_ad() {
        let h = harness();
        let id = h.ads.seed(h.owner, "alice", "Bike", 300);

        let response = h
            .app
            .clone()
            .oneshot(get(&format!("/ads/{id}"), Some(&h.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Bike");
        assert_eq!(body["is_owner"], true);

        let response = h.app.clone().oneshot(get("/ads/999", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = h.app.oneshot(get("/ads/abc", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
