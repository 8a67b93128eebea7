use std::sync::{Arc, RwLock};

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::core::time::now_utc;
use crate::schemas::describe_validation_errors;
use crate::schemas::content::ContentCreate;
use crate::schemas::quiz::{QuizAttemptCreate, QuizCreate};
use crate::storage::models::{AttemptAnswer, Content, Quiz, QuizAttempt, QuizQuestion};
use crate::storage::types::ClassLevel;
use crate::storage::{keys, load_json, store_json, KeyValueBackend, StorageError};
use crate::stores::{read_lock, seed, write_lock};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("validation failed: {0}")]
    Invalid(String),
    #[error("quiz not found: {0}")]
    UnknownQuiz(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn invalid(errors: &validator::ValidationErrors) -> DataError {
    DataError::Invalid(describe_validation_errors(errors))
}

#[derive(Debug, Default)]
struct Collections {
    contents: Vec<Content>,
    quizzes: Vec<Quiz>,
    attempts: Vec<QuizAttempt>,
}

/// Single source of truth for lesson contents, quizzes, and quiz attempts.
/// Every mutation synchronously re-serializes the affected collection, so a
/// failed write leaves memory ahead of the backend until the next one.
pub struct DataStore {
    backend: Arc<dyn KeyValueBackend>,
    inner: RwLock<Collections>,
}

impl DataStore {
    /// Loads the three collections, seeding the sample catalog for any key
    /// that has never been written. A present key wins over the seed even
    /// when it holds an empty array.
    pub fn open(backend: Arc<dyn KeyValueBackend>) -> Result<Self, StorageError> {
        let stored_contents: Option<Vec<Content>> = load_json(backend.as_ref(), keys::CONTENTS)?;
        let stored_quizzes: Option<Vec<Quiz>> = load_json(backend.as_ref(), keys::QUIZZES)?;
        let stored_attempts: Option<Vec<QuizAttempt>> = load_json(backend.as_ref(), keys::ATTEMPTS)?;

        let seed_contents = stored_contents.is_none();
        let seed_quizzes = stored_quizzes.is_none();

        let collections = Collections {
            contents: stored_contents.unwrap_or_else(seed::sample_contents),
            quizzes: stored_quizzes.unwrap_or_else(seed::sample_quizzes),
            attempts: stored_attempts.unwrap_or_default(),
        };

        if seed_contents {
            store_json(backend.as_ref(), keys::CONTENTS, &collections.contents)?;
        }
        if seed_quizzes {
            store_json(backend.as_ref(), keys::QUIZZES, &collections.quizzes)?;
        }

        tracing::info!(
            contents = collections.contents.len(),
            quizzes = collections.quizzes.len(),
            attempts = collections.attempts.len(),
            seeded = seed_contents || seed_quizzes,
            "data store loaded"
        );

        Ok(Self { backend, inner: RwLock::new(collections) })
    }

    pub fn add_content(&self, payload: ContentCreate) -> Result<Content, DataError> {
        payload.validate().map_err(|errors| invalid(&errors))?;

        let content = Content {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            description: payload.description,
            content_type: payload.content_type,
            url: payload.url,
            class_level: payload.class_level,
            created_at: now_utc(),
            created_by: payload.created_by,
        };

        let mut inner = write_lock(&self.inner);
        inner.contents.push(content.clone());
        store_json(self.backend.as_ref(), keys::CONTENTS, &inner.contents)?;

        tracing::debug!(content_id = %content.id, class = content.class_level.as_str(), "content added");
        Ok(content)
    }

    pub fn add_quiz(&self, payload: QuizCreate) -> Result<Quiz, DataError> {
        payload.validate().map_err(|errors| invalid(&errors))?;

        for (index, question) in payload.questions.iter().enumerate() {
            if question.options.iter().any(|option| option.trim().is_empty()) {
                return Err(DataError::Invalid(format!(
                    "question {}: options must not be empty",
                    index + 1
                )));
            }
            if question.correct_option >= question.options.len() {
                return Err(DataError::Invalid(format!(
                    "question {}: correct option {} is out of range for {} options",
                    index + 1,
                    question.correct_option,
                    question.options.len()
                )));
            }
        }

        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            description: payload.description,
            class_level: payload.class_level,
            questions: payload
                .questions
                .into_iter()
                .map(|question| QuizQuestion {
                    id: Uuid::new_v4().to_string(),
                    question: question.question,
                    options: question.options,
                    correct_option: question.correct_option,
                })
                .collect(),
            created_at: now_utc(),
            created_by: payload.created_by,
        };

        let mut inner = write_lock(&self.inner);
        inner.quizzes.push(quiz.clone());
        store_json(self.backend.as_ref(), keys::QUIZZES, &inner.quizzes)?;

        tracing::debug!(quiz_id = %quiz.id, questions = quiz.questions.len(), "quiz added");
        Ok(quiz)
    }

    /// Scores the submitted answers against the referenced quiz and records
    /// the attempt. Answers must reference questions of that quiz and stay
    /// within each question's option range.
    pub fn add_quiz_attempt(&self, payload: QuizAttemptCreate) -> Result<QuizAttempt, DataError> {
        payload.validate().map_err(|errors| invalid(&errors))?;

        let mut inner = write_lock(&self.inner);
        let quiz = inner
            .quizzes
            .iter()
            .find(|quiz| quiz.id == payload.quiz_id)
            .ok_or_else(|| DataError::UnknownQuiz(payload.quiz_id.clone()))?;

        let mut score: u32 = 0;
        for answer in &payload.answers {
            let question = quiz
                .questions
                .iter()
                .find(|question| question.id == answer.question_id)
                .ok_or_else(|| {
                    DataError::Invalid(format!(
                        "answer references unknown question: {}",
                        answer.question_id
                    ))
                })?;
            if answer.selected_option >= question.options.len() {
                return Err(DataError::Invalid(format!(
                    "selected option {} is out of range for question {}",
                    answer.selected_option, question.id
                )));
            }
            if answer.selected_option == question.correct_option {
                score += 1;
            }
        }

        let attempt = QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: payload.quiz_id,
            student_id: payload.student_id,
            student_name: payload.student_name,
            score,
            total_questions: quiz.questions.len() as u32,
            submitted_at: now_utc(),
            answers: payload
                .answers
                .into_iter()
                .map(|answer| AttemptAnswer {
                    question_id: answer.question_id,
                    selected_option: answer.selected_option,
                })
                .collect(),
        };

        inner.attempts.push(attempt.clone());
        store_json(self.backend.as_ref(), keys::ATTEMPTS, &inner.attempts)?;

        tracing::debug!(
            attempt_id = %attempt.id,
            quiz_id = %attempt.quiz_id,
            score = attempt.score,
            total = attempt.total_questions,
            "quiz attempt recorded"
        );
        Ok(attempt)
    }

    /// Removes the matching content entry. Absent ids are a no-op.
    pub fn delete_content(&self, content_id: &str) -> Result<bool, DataError> {
        let mut inner = write_lock(&self.inner);
        let before = inner.contents.len();
        inner.contents.retain(|content| content.id != content_id);
        if inner.contents.len() == before {
            return Ok(false);
        }

        store_json(self.backend.as_ref(), keys::CONTENTS, &inner.contents)?;
        tracing::debug!(content_id, "content deleted");
        Ok(true)
    }

    /// Removes the quiz and every attempt referencing it. Both collections
    /// are updated in memory before either persistence write happens.
    pub fn delete_quiz(&self, quiz_id: &str) -> Result<bool, DataError> {
        let mut inner = write_lock(&self.inner);
        let before = inner.quizzes.len();
        inner.quizzes.retain(|quiz| quiz.id != quiz_id);
        if inner.quizzes.len() == before {
            return Ok(false);
        }

        let attempts_before = inner.attempts.len();
        inner.attempts.retain(|attempt| attempt.quiz_id != quiz_id);
        let cascaded = attempts_before - inner.attempts.len();

        store_json(self.backend.as_ref(), keys::QUIZZES, &inner.quizzes)?;
        store_json(self.backend.as_ref(), keys::ATTEMPTS, &inner.attempts)?;

        tracing::debug!(quiz_id, cascaded, "quiz deleted");
        Ok(true)
    }

    pub fn contents(&self) -> Vec<Content> {
        read_lock(&self.inner).contents.clone()
    }

    pub fn quizzes(&self) -> Vec<Quiz> {
        read_lock(&self.inner).quizzes.clone()
    }

    pub fn attempts(&self) -> Vec<QuizAttempt> {
        read_lock(&self.inner).attempts.clone()
    }

    pub fn contents_by_class(&self, class_level: ClassLevel) -> Vec<Content> {
        read_lock(&self.inner)
            .contents
            .iter()
            .filter(|content| content.class_level == class_level)
            .cloned()
            .collect()
    }

    pub fn quizzes_by_class(&self, class_level: ClassLevel) -> Vec<Quiz> {
        read_lock(&self.inner)
            .quizzes
            .iter()
            .filter(|quiz| quiz.class_level == class_level)
            .cloned()
            .collect()
    }

    pub fn attempts_by_quiz(&self, quiz_id: &str) -> Vec<QuizAttempt> {
        read_lock(&self.inner)
            .attempts
            .iter()
            .filter(|attempt| attempt.quiz_id == quiz_id)
            .cloned()
            .collect()
    }

    pub fn attempts_by_student(&self, student_id: &str) -> Vec<QuizAttempt> {
        read_lock(&self.inner)
            .attempts
            .iter()
            .filter(|attempt| attempt.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn quiz_by_id(&self, quiz_id: &str) -> Option<Quiz> {
        read_lock(&self.inner).quizzes.iter().find(|quiz| quiz.id == quiz_id).cloned()
    }
}
