use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::core::config::{AuthSettings, UploadSettings};
use crate::schemas::auth::{LoginRequest, SignupRequest};
use crate::schemas::content::ContentCreate;
use crate::schemas::quiz::{AttemptAnswerCreate, QuizAttemptCreate, QuizCreate, QuizQuestionCreate};
use crate::storage::models::Quiz;
use crate::storage::types::{ClassLevel, ContentType, UserRole};

/// Serializes tests that read or mutate process environment variables.
pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn clear_config_env() {
    for key in [
        "EASYEDU_ENV",
        "ENVIRONMENT",
        "EASYEDU_STRICT_CONFIG",
        "EASYEDU_DATA_DIR",
        "AUTH_SIMULATED_LATENCY_MS",
        "DEFAULT_STUDENT_CLASS",
        "MAX_UPLOAD_SIZE_MB",
        "ALLOWED_VIDEO_EXTENSIONS",
        "ALLOWED_DOCUMENT_EXTENSIONS",
        "EASYEDU_LOG_LEVEL",
        "EASYEDU_LOG_JSON",
    ] {
        std::env::remove_var(key);
    }
}

pub(crate) fn test_auth_settings() -> AuthSettings {
    AuthSettings { simulated_latency_ms: 0, default_student_class: ClassLevel::Sixth }
}

pub(crate) fn test_upload_settings() -> UploadSettings {
    UploadSettings {
        max_upload_size_mb: 1,
        allowed_video_extensions: vec!["mp4".to_string(), "webm".to_string()],
        allowed_document_extensions: vec!["pdf".to_string()],
    }
}

pub(crate) fn login_request(email: &str, role: UserRole) -> LoginRequest {
    LoginRequest { email: email.to_string(), password: "pw".to_string(), role }
}

pub(crate) fn signup_request(
    name: &str,
    email: &str,
    role: UserRole,
    class: Option<ClassLevel>,
) -> SignupRequest {
    SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "pw".to_string(),
        role,
        class,
    }
}

pub(crate) fn content_create(title: &str, class_level: ClassLevel) -> ContentCreate {
    ContentCreate {
        title: title.to_string(),
        description: format!("{title} lesson material"),
        content_type: ContentType::Video,
        url: "https://example.com/lesson.mp4".to_string(),
        class_level,
        created_by: "teacher1".to_string(),
    }
}

/// Two-question quiz whose correct options are `[1, 2]`.
pub(crate) fn quiz_create(class_level: ClassLevel) -> QuizCreate {
    QuizCreate {
        title: "Algebra Checkpoint".to_string(),
        description: "Linear equations and simplification".to_string(),
        class_level,
        questions: vec![
            QuizQuestionCreate {
                question: "What is the value of x in 2x + 5 = 15?".to_string(),
                options: vec![
                    "3".to_string(),
                    "5".to_string(),
                    "7".to_string(),
                    "10".to_string(),
                ],
                correct_option: 1,
            },
            QuizQuestionCreate {
                question: "Simplify: 3(x + 2) - 4".to_string(),
                options: vec![
                    "3x + 2".to_string(),
                    "3x + 6 - 4".to_string(),
                    "3x + 6".to_string(),
                ],
                correct_option: 2,
            },
        ],
        created_by: "teacher1".to_string(),
    }
}

/// An attempt at `quiz` selecting `selections[i]` for question `i`.
pub(crate) fn attempt_create(quiz: &Quiz, selections: &[usize]) -> QuizAttemptCreate {
    QuizAttemptCreate {
        quiz_id: quiz.id.clone(),
        student_id: "student1".to_string(),
        student_name: "Jane".to_string(),
        answers: quiz
            .questions
            .iter()
            .zip(selections)
            .map(|(question, selected)| AttemptAnswerCreate {
                question_id: question.id.clone(),
                selected_option: *selected,
            })
            .collect(),
    }
}
