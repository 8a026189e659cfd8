use anyhow::Context;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::security::hash_password;
use crate::core::time::primitive_now_utc;
use crate::db::types::{QuestionType, UserRole};
use crate::repositories::{courses, enrollments, lesson_progress, lessons, quizzes, users};

/// Replaces all data with a small demo dataset: two accounts, two
/// courses, a partially completed enrollment and a lesson quiz. Meant
/// for local development only; config refuses to enable it in
/// production.
pub(crate) async fn seed_database(pool: &PgPool) -> anyhow::Result<()> {
    info!("seeding database with sample data");

    clear_tables(pool).await?;

    let now = primitive_now_utc();

    let student = users::create(
        pool,
        users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            email: "student@example.com",
            hashed_password: hash_password("student123").context("failed to hash seed password")?,
            full_name: "John Student",
            role: UserRole::Student,
            bio: Some("Passionate learner"),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    let instructor = users::create(
        pool,
        users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            email: "instructor@example.com",
            hashed_password: hash_password("instructor123")
                .context("failed to hash seed password")?,
            full_name: "Jane Instructor",
            role: UserRole::Instructor,
            bio: Some("Expert React Developer"),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    let react_course = courses::create(
        pool,
        courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            title: "React Fundamentals",
            description:
                "Learn the basics of React including components, hooks, and state management",
            category: Some("Web Development"),
            price: 49.99,
            instructor_id: &instructor.id,
            thumbnail_url: None,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    courses::create(
        pool,
        courses::CreateCourse {
            id: &Uuid::new_v4().to_string(),
            title: "Advanced TypeScript",
            description: "Master TypeScript for building scalable applications with type safety",
            category: Some("Web Development"),
            price: 59.99,
            instructor_id: &instructor.id,
            thumbnail_url: None,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    // Ratings in the demo catalog are hand-picked; nothing recomputes
    // them at runtime.
    sqlx::query("UPDATE courses SET rating = 4.8, review_count = 320 WHERE id = $1")
        .bind(&react_course.id)
        .execute(pool)
        .await?;
    sqlx::query("UPDATE courses SET rating = 4.9, review_count = 150 WHERE title = $1")
        .bind("Advanced TypeScript")
        .execute(pool)
        .await?;

    let intro_lesson = lessons::create(
        pool,
        lessons::CreateLesson {
            id: &Uuid::new_v4().to_string(),
            course_id: &react_course.id,
            title: "Introduction to React",
            description: Some("Get started with React basics"),
            content: None,
            video_url: None,
            duration_minutes: Some(45),
            position: 1,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    lessons::create(
        pool,
        lessons::CreateLesson {
            id: &Uuid::new_v4().to_string(),
            course_id: &react_course.id,
            title: "Components and Props",
            description: Some("Understand React components and props"),
            content: None,
            video_url: None,
            duration_minutes: Some(60),
            position: 2,
            created_at: now,
            updated_at: now,
        },
    )
    .await?;

    enrollments::enroll(
        pool,
        enrollments::CreateEnrollment {
            id: &Uuid::new_v4().to_string(),
            user_id: &student.id,
            course_id: &react_course.id,
            enrolled_at: now,
        },
    )
    .await?;

    lesson_progress::complete_lesson(
        pool,
        lesson_progress::CompleteLesson {
            id: &Uuid::new_v4().to_string(),
            user_id: &student.id,
            lesson_id: &intro_lesson.id,
            course_id: &react_course.id,
            now,
        },
    )
    .await?;

    seed_react_quiz(pool, &intro_lesson.id).await?;

    info!("database seeding completed");
    info!("sample credentials: student@example.com / student123");
    info!("sample credentials: instructor@example.com / instructor123");
    Ok(())
}

async fn clear_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Delete in dependency order instead of TRUNCATE CASCADE so the
    // seeder also works against databases where the role lacks
    // TRUNCATE rights.
    for table in [
        "quiz_attempts",
        "quiz_questions",
        "quizzes",
        "lesson_progress",
        "enrollments",
        "lessons",
        "courses",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}")).execute(pool).await?;
    }
    Ok(())
}

async fn seed_react_quiz(pool: &PgPool, lesson_id: &str) -> Result<(), sqlx::Error> {
    let now = primitive_now_utc();

    let quiz = quizzes::create(
        pool,
        quizzes::CreateQuiz {
            id: &Uuid::new_v4().to_string(),
            lesson_id,
            title: "React Basics Quiz",
            description: Some("Check your understanding of React fundamentals"),
            passing_score: 70,
            created_at: now,
        },
    )
    .await?;

    let questions: [(&str, QuestionType, Vec<String>, &str); 5] = [
        (
            "What is React?",
            QuestionType::MultipleChoice,
            vec![
                "A JavaScript library for building user interfaces".to_string(),
                "A testing framework".to_string(),
                "A database management system".to_string(),
                "A CSS preprocessor".to_string(),
            ],
            "A JavaScript library for building user interfaces",
        ),
        (
            "What is JSX?",
            QuestionType::MultipleChoice,
            vec![
                "A syntax extension to JavaScript".to_string(),
                "A JavaScript framework".to_string(),
                "A CSS library".to_string(),
                "A backend language".to_string(),
            ],
            "A syntax extension to JavaScript",
        ),
        (
            "Which hook manages local component state?",
            QuestionType::MultipleChoice,
            vec![
                "useState".to_string(),
                "useEffect".to_string(),
                "useContext".to_string(),
                "useRef".to_string(),
            ],
            "useState",
        ),
        (
            "How is data passed from a parent to a child component?",
            QuestionType::MultipleChoice,
            vec![
                "Props".to_string(),
                "Global variables".to_string(),
                "Cookies".to_string(),
                "Local storage".to_string(),
            ],
            "Props",
        ),
        (
            "Hooks can only be used in functional components.",
            QuestionType::TrueFalse,
            vec!["True".to_string(), "False".to_string()],
            "true",
        ),
    ];

    for (position, (question, question_type, options, correct_answer)) in
        questions.into_iter().enumerate()
    {
        quizzes::create_question(
            pool,
            quizzes::CreateQuestion {
                id: &Uuid::new_v4().to_string(),
                quiz_id: &quiz.id,
                question,
                question_type,
                options,
                correct_answer,
                position: position as i32,
                created_at: now,
            },
        )
        .await?;
    }

    Ok(())
}
