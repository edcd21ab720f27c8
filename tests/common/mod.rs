#![allow(dead_code)]

use axum_test::TestServer;
use shortlink::domain::entities::{NewUrl, Url};
use shortlink::domain::repositories::UrlRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::InMemoryUrlRepository;
use shortlink::routes::{RouterOptions, app_router};
use shortlink::server::build_state;
use shortlink::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";

pub fn create_test_state() -> (AppState, Arc<InMemoryUrlRepository>) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let state = build_state(repository.clone() as Arc<dyn UrlRepository>, BASE_URL);
    (state, repository)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryUrlRepository>) {
    let (state, repository) = create_test_state();
    let app = app_router(state, &RouterOptions::default());
    (TestServer::new(app).unwrap(), repository)
}

/// Store whose every call fails, for exercising the 500 path.
pub struct FailingUrlRepository;

#[async_trait::async_trait]
impl UrlRepository for FailingUrlRepository {
    async fn create(&self, _new_url: NewUrl) -> Result<Url, AppError> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_short_code(&self, _short_code: &str) -> Result<Option<Url>, AppError> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn increment_clicks(&self, _short_code: &str) -> Result<(), AppError> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn find_all(&self) -> Result<Vec<Url>, AppError> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }
}

pub fn create_failing_test_server() -> TestServer {
    let state = build_state(Arc::new(FailingUrlRepository), BASE_URL);
    let app = app_router(state, &RouterOptions::default());
    TestServer::new(app).unwrap()
}
