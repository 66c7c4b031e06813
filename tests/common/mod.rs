#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::queries::categories::import_categories;
use trivia_api::db::queries::questions::import_questions;
use trivia_api::db::{in_memory_pool, Category, Question};
use trivia_api::server::app::app;

pub const SEEDED_QUESTIONS: usize = 19;

fn read_seed<T: DeserializeOwned>(file: &str) -> Vec<T> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file);
    csv::Reader::from_path(path)
        .unwrap()
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap()
}

pub async fn empty_pool() -> SqlitePool {
    in_memory_pool().await.unwrap()
}

/// Pool loaded with the 6 categories and 19 questions shipped under `data/`.
pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    let categories: Vec<Category> = read_seed("categories.csv");
    let questions: Vec<Question> = read_seed("questions.csv");
    import_categories(&pool, categories).await.unwrap();
    import_questions(&pool, questions).await.unwrap();
    pool
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn call(
    pool: &SqlitePool,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(&app(pool.clone()), method, uri, body).await;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn question_ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
