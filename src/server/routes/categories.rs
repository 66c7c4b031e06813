use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category_map, questions::get_questions_for_category},
        Question,
    },
    server::{app::AppState, error::ApiError},
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = get_category_map(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesBody {
        success: true,
        categories,
    }))
}

// an unknown category and a category without questions look the same
async fn questions_by_category(
    State(pool): State<SqlitePool>,
    cat_id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let Path(cat_id) = cat_id.map_err(|_| ApiError::NotFound)?;
    let questions = get_questions_for_category(&pool, cat_id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestionsBody {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: cat_id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{cat_id}/questions", get(questions_by_category))
        .with_state(state)
}
