use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_quiz_candidates, Question},
    server::{app::AppState, error::ApiError},
    telemetry::QUIZ_DRAWS_CNTR,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizCategory {
    // browsers send category keys back as strings
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizBody {
    quiz_category: QuizCategory,
    previous_questions: Vec<i64>,
}

/// `question` is null once the pool is exhausted.
#[derive(Serialize)]
struct QuizDraw {
    question: Option<Question>,
}

/// Uniform draw over the candidate pool.
fn draw(mut candidates: Vec<Question>) -> Option<Question> {
    if candidates.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

async fn next_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<Json<QuizDraw>> {
    let Json(body) = payload.map_err(|_| ApiError::BadRequest)?;
    // category 0 means "All"
    let category = match body.quiz_category.id {
        0 => None,
        id => Some(id),
    };
    let candidates = get_quiz_candidates(&pool, category, &body.previous_questions).await?;

    let question = draw(candidates);
    if question.is_some() {
        let label = category.map_or_else(|| "all".to_owned(), |id| id.to_string());
        QUIZ_DRAWS_CNTR.with_label_values(&[label.as_str()]).inc();
    }
    Ok(Json(QuizDraw { question }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
