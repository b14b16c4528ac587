#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use specref_assistant::{EquationParser, PatternParser};
use specref_data::{DataStore, UNITS_FILE};
use specref_server::{api::create_router, config::Config, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt as _;
use uuid::Uuid;

pub use assertions::*;
pub use fixtures::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    data_dir: PathBuf,
}

impl TestApp {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_parser(Arc::new(PatternParser::new()))
    }

    /// Fixture data with a caller-supplied equation parser.
    pub fn with_parser(parser: Arc<dyn EquationParser>) -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("specref-server-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&data_dir).context("create data dir")?;
        for (name, content) in [
            (UNITS_FILE, UNITS_JSON),
            ("spec-types-master.json", SPEC_TYPES_JSON),
            ("component-spec-mappings.json", MAPPINGS_JSON),
            ("component-types.csv", COMPONENT_TYPES_CSV),
        ] {
            std::fs::write(data_dir.join(name), content)
                .with_context(|| format!("write fixture {name}"))?;
        }

        let mut config = Config::default();
        config.data.directory = data_dir.clone();

        let data = DataStore::load(&config.data.sources()).context("load fixture data")?;
        let state = AppState::from_parts(config, data, parser);
        let router = create_router(state.clone());

        Ok(Self {
            router,
            state,
            data_dir,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder().method(method).uri(path_and_query);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json)?)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, body) = self.request(Method::GET, path_and_query, None).await?;
        Ok((status, serde_json::from_slice(&body).context("parse JSON body")?))
    }

    pub async fn post_json(&self, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, body) = self.request(Method::POST, path, Some(body)).await?;
        Ok((status, serde_json::from_slice(&body).context("parse JSON body")?))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}
