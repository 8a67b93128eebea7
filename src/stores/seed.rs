use time::macros::datetime;
use time::OffsetDateTime;

use crate::storage::models::{Content, Quiz, QuizQuestion};
use crate::storage::types::{ClassLevel, ContentType};

// First-load sample catalog. Fixed ids and timestamps keep the seed
// deterministic across profiles.

const SEED_AUTHOR: &str = "teacher1";
const SEED_CREATED_AT: OffsetDateTime = datetime!(2024-09-02 08:00:00 UTC);

pub(crate) fn sample_contents() -> Vec<Content> {
    vec![
        Content {
            id: "c1".to_string(),
            title: "Introduction to Algebra".to_string(),
            description: "Basic concepts of algebra for beginners".to_string(),
            content_type: ContentType::Video,
            url: "https://example.com/algebra-intro.mp4".to_string(),
            class_level: ClassLevel::Sixth,
            created_at: SEED_CREATED_AT,
            created_by: SEED_AUTHOR.to_string(),
        },
        Content {
            id: "c2".to_string(),
            title: "Photosynthesis Explained".to_string(),
            description: "How plants make their own food".to_string(),
            content_type: ContentType::Pdf,
            url: "https://example.com/photosynthesis.pdf".to_string(),
            class_level: ClassLevel::Seventh,
            created_at: SEED_CREATED_AT,
            created_by: SEED_AUTHOR.to_string(),
        },
    ]
}

pub(crate) fn sample_quizzes() -> Vec<Quiz> {
    vec![Quiz {
        id: "q1".to_string(),
        title: "Algebra Basics Quiz".to_string(),
        description: "Test your understanding of basic algebraic concepts".to_string(),
        class_level: ClassLevel::Sixth,
        questions: vec![
            QuizQuestion {
                id: "q1_1".to_string(),
                question: "What is the value of x in 2x + 5 = 15?".to_string(),
                options: vec![
                    "3".to_string(),
                    "5".to_string(),
                    "7".to_string(),
                    "10".to_string(),
                ],
                correct_option: 1,
            },
            QuizQuestion {
                id: "q1_2".to_string(),
                question: "Simplify: 3(x + 2) - 4".to_string(),
                options: vec![
                    "3x + 2".to_string(),
                    "3x + 6 - 4".to_string(),
                    "3x + 6".to_string(),
                    "3x + 2 - 4".to_string(),
                ],
                correct_option: 2,
            },
        ],
        created_at: SEED_CREATED_AT,
        created_by: SEED_AUTHOR.to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_quiz_questions_stay_in_bounds() {
        for quiz in sample_quizzes() {
            for question in &quiz.questions {
                assert!(question.correct_option < question.options.len());
            }
        }
    }
}
