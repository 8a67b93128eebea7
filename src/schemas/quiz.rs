use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::storage::types::ClassLevel;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct QuizQuestionCreate {
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,
    #[validate(length(min = 2, max = 6, message = "a question needs 2 to 6 options"))]
    pub options: Vec<String>,
    #[serde(alias = "correctOption")]
    pub correct_option: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuizCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "classLevel")]
    pub class_level: ClassLevel,
    #[validate(length(min = 1, message = "a quiz needs at least one question"), nested)]
    pub questions: Vec<QuizQuestionCreate>,
    #[serde(alias = "createdBy")]
    #[validate(length(min = 1, message = "created_by must not be empty"))]
    pub created_by: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AttemptAnswerCreate {
    #[serde(alias = "questionId")]
    #[validate(length(min = 1, message = "question_id must not be empty"))]
    pub question_id: String,
    #[serde(alias = "selectedOption")]
    pub selected_option: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuizAttemptCreate {
    #[serde(alias = "quizId")]
    #[validate(length(min = 1, message = "quiz_id must not be empty"))]
    pub quiz_id: String,
    #[serde(alias = "studentId")]
    #[validate(length(min = 1, message = "student_id must not be empty"))]
    pub student_id: String,
    #[serde(alias = "studentName")]
    #[validate(length(min = 1, message = "student_name must not be empty"))]
    pub student_name: String,
    #[validate(nested)]
    pub answers: Vec<AttemptAnswerCreate>,
}
