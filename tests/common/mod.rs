#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use url_alias::application::services::AliasService;
use url_alias::domain::clock::ManualClock;
use url_alias::domain::repositories::AliasRepository;
use url_alias::infrastructure::persistence::MemoryAliasRepository;
use url_alias::routes::routes;
use url_alias::state::AppState;
use url_alias::utils::code_generator::TimeCodeGenerator;

pub const TEST_HOST: &str = "localhost:8080";

pub struct TestApp {
    pub state: AppState,
    pub repo: Arc<MemoryAliasRepository>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn server(&self) -> TestServer {
        TestServer::new(routes(self.state.clone())).unwrap()
    }

    pub fn service(&self) -> &AliasService<dyn AliasRepository> {
        &self.state.alias_service
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn create_test_app_with(base_url: Option<&str>, suffix_length: usize) -> TestApp {
    let repo = Arc::new(MemoryAliasRepository::new());
    let clock = Arc::new(ManualClock::new(start_time()));
    let generator = Arc::new(TimeCodeGenerator::new(clock.clone(), suffix_length));

    let repository: Arc<dyn AliasRepository> = repo.clone();
    let alias_service = Arc::new(AliasService::new(repository, generator, clock.clone()));

    TestApp {
        state: AppState::new(alias_service, base_url.map(str::to_string)),
        repo,
        clock,
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(None, 4)
}

/// Last path segment of a short URL.
pub fn code_of(short_url: &str) -> String {
    short_url.rsplit('/').next().unwrap().to_string()
}
