use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use easyedu_rust::schemas::auth::{LoginRequest, SignupRequest};
use easyedu_rust::schemas::content::ContentCreate;
use easyedu_rust::schemas::quiz::{
    AttemptAnswerCreate, QuizAttemptCreate, QuizCreate, QuizQuestionCreate,
};
use easyedu_rust::storage::types::{ClassLevel, ContentType, UserRole};

fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(PoisonError::into_inner)
}

fn set_test_env(data_dir: &std::path::Path) {
    std::env::set_var("EASYEDU_ENV", "test");
    std::env::set_var("EASYEDU_DATA_DIR", data_dir);
    std::env::set_var("AUTH_SIMULATED_LATENCY_MS", "0");
    std::env::set_var("EASYEDU_LOG_LEVEL", "warn");
}

fn quiz_payload(created_by: &str) -> QuizCreate {
    QuizCreate {
        title: "Plant Biology Quiz".to_string(),
        description: "Photosynthesis and plant structure".to_string(),
        class_level: ClassLevel::Seventh,
        questions: vec![
            QuizQuestionCreate {
                question: "Which gas do plants absorb during photosynthesis?".to_string(),
                options: vec![
                    "Oxygen".to_string(),
                    "Carbon dioxide".to_string(),
                    "Nitrogen".to_string(),
                ],
                correct_option: 1,
            },
            QuizQuestionCreate {
                question: "Where does photosynthesis happen?".to_string(),
                options: vec![
                    "Roots".to_string(),
                    "Stem".to_string(),
                    "Leaves".to_string(),
                ],
                correct_option: 2,
            },
        ],
        created_by: created_by.to_string(),
    }
}

#[tokio::test]
async fn full_teacher_and_student_flow_survives_a_restart() -> anyhow::Result<()> {
    let _guard = env_lock();
    let dir = tempfile::tempdir()?;
    set_test_env(dir.path());

    let quiz_id;
    let content_id;
    let upload_path;

    {
        let app = easyedu_rust::init()?;

        // Fresh profile starts with the sample catalog and no session.
        assert!(!app.session().is_authenticated());
        assert_eq!(app.data().contents().len(), 2);
        assert_eq!(app.data().quizzes().len(), 1);

        // Teacher signs in and publishes a lesson backed by an uploaded PDF.
        let teacher = app
            .session()
            .login(LoginRequest {
                email: "rivera@school.edu".to_string(),
                password: "pw".to_string(),
                role: UserRole::Teacher,
            })
            .await?;
        assert_eq!(teacher.name, "rivera");
        assert_eq!(teacher.class, None);

        upload_path = app.files().save_file(
            b"%PDF-1.4 photosynthesis handout",
            ContentType::Pdf,
            "Photosynthesis Handout.pdf",
        )?;

        let content = app.data().add_content(ContentCreate {
            title: "Photosynthesis Handout".to_string(),
            description: "Worksheet for the plant biology unit".to_string(),
            content_type: ContentType::Pdf,
            url: upload_path.clone(),
            class_level: ClassLevel::Seventh,
            created_by: teacher.id.clone(),
        })?;
        content_id = content.id.clone();

        let quiz = app.data().add_quiz(quiz_payload(&teacher.id))?;
        quiz_id = quiz.id.clone();

        // Student takes over the profile and attempts the quiz.
        app.session().logout()?;
        let student = app
            .session()
            .signup(SignupRequest {
                name: "Jane".to_string(),
                email: "jane@x.com".to_string(),
                password: "pw".to_string(),
                role: UserRole::Student,
                class: Some(ClassLevel::Seventh),
            })
            .await?;

        let visible = app.data().quizzes_by_class(ClassLevel::Seventh);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, quiz_id);

        let attempt = app.data().add_quiz_attempt(QuizAttemptCreate {
            quiz_id: quiz_id.clone(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            answers: vec![
                AttemptAnswerCreate {
                    question_id: quiz.questions[0].id.clone(),
                    selected_option: 1,
                },
                AttemptAnswerCreate {
                    question_id: quiz.questions[1].id.clone(),
                    selected_option: 0,
                },
            ],
        })?;
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.total_questions, 2);
    }

    // Reopening the same data directory behaves like a page reload.
    let app = easyedu_rust::init()?;

    let user = app.session().user().expect("restored session");
    assert_eq!(user.name, "Jane");
    assert_eq!(user.role, UserRole::Student);
    assert_eq!(user.class, Some(ClassLevel::Seventh));

    // Persisted state won over the seed: no duplicates were introduced.
    assert_eq!(app.data().contents().len(), 3);
    assert_eq!(app.data().quizzes().len(), 2);
    assert!(app.data().quiz_by_id(&quiz_id).is_some());

    let attempts = app.data().attempts_by_quiz(&quiz_id);
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].student_name, "Jane");

    let handle = app.files().get_file(&upload_path).expect("uploaded file");
    assert_eq!(handle.metadata.mime_type, "application/pdf");

    // Quiz deletion cascades to the attempt; repeated deletes are no-ops.
    assert!(app.data().delete_quiz(&quiz_id)?);
    assert!(app.data().attempts_by_quiz(&quiz_id).is_empty());
    assert!(!app.data().delete_quiz(&quiz_id)?);

    assert!(app.data().delete_content(&content_id)?);
    assert!(app.files().delete_file(&upload_path)?);
    assert!(!app.files().delete_file(&upload_path)?);

    Ok(())
}

#[tokio::test]
async fn an_emptied_catalog_is_not_reseeded() -> anyhow::Result<()> {
    let _guard = env_lock();
    let dir = tempfile::tempdir()?;
    set_test_env(dir.path());

    {
        let app = easyedu_rust::init()?;
        for content in app.data().contents() {
            app.data().delete_content(&content.id)?;
        }
        for quiz in app.data().quizzes() {
            app.data().delete_quiz(&quiz.id)?;
        }
    }

    let app = easyedu_rust::init()?;
    assert!(app.data().contents().is_empty());
    assert!(app.data().quizzes().is_empty());

    Ok(())
}
