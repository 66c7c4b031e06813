use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category_map,
            questions::{self, count_questions, get_questions_page, search_questions},
        },
        NewQuestion, Question,
    },
    server::{app::AppState, deserializers::deserialize_lenient_i64, error::ApiError},
};

use super::{ApiResponse, QUESTIONS_PER_PAGE};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    page: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPageBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

/// Row offset of a 1-indexed page, `None` when the page cannot hold any rows.
fn page_offset(page: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    (page - 1).checked_mul(QUESTIONS_PER_PAGE)
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPageBody>> {
    let page = query.ok().and_then(|Query(q)| q.page).unwrap_or(1);
    let offset = page_offset(page).ok_or(ApiError::NotFound)?;

    let questions = get_questions_page(&pool, QUESTIONS_PER_PAGE, offset).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPageBody {
        success: true,
        questions,
        total_questions: count_questions(&pool).await?,
        current_category: String::new(),
        categories: get_category_map(&pool).await?,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    question_id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<Value>> {
    let Path(question_id) = question_id.map_err(|_| ApiError::NotFound)?;
    questions::delete_question(&pool, question_id)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(question_id, "Question deleted");
    Ok(Json(json!({ "success": true })))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Json<Value>> {
    let Json(data) = payload.map_err(ApiError::unprocessable)?;
    let new_question: NewQuestion =
        serde_json::from_value(data.clone()).map_err(ApiError::unprocessable)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::unprocessable)?;

    tracing::info!(question_id = id, "Question created");
    Ok(Json(json!({ "success": true, "data": data })))
}

async fn search(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<SearchResultsBody>> {
    let Json(body) = payload.map_err(|_| ApiError::BadRequest)?;
    let questions = search_questions(&pool, &body.search_term).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResultsBody {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: String::new(),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{question_id}", delete(delete_question))
        .route("/questions/search", post(search))
        .with_state(state)
}
