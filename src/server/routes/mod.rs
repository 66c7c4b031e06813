mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use super::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

pub const QUESTIONS_PER_PAGE: i64 = 10;
