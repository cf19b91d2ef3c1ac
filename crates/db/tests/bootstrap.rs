use elearn_db::models::lookup::{CourseCategory, Difficulty, QuestionType, QuizStatus};
use sqlx::PgPool;

/// Connect, migrate, and check that every lookup table is seeded.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    elearn_db::health_check(&pool).await.unwrap();

    let expected = [
        (CourseCategory::TABLE, CourseCategory::ALL.len()),
        (Difficulty::TABLE, Difficulty::ALL.len()),
        (QuizStatus::TABLE, QuizStatus::ALL.len()),
        (QuestionType::TABLE, QuestionType::ALL.len()),
    ];

    for (table, len) in expected {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, len as i64, "{table} seed rows");
    }
}

/// Seeded ids and names agree with the Rust enums.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_seeds_match_enums(pool: PgPool) {
    for category in CourseCategory::ALL {
        let name: String = sqlx::query_scalar("SELECT name FROM course_categories WHERE id = $1")
            .bind(category.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, category.name());
    }

    for status in QuizStatus::ALL {
        let name: String = sqlx::query_scalar("SELECT name FROM quiz_statuses WHERE id = $1")
            .bind(status.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, status.name());
    }
}
