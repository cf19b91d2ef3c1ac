use std::collections::BTreeSet;

use elearn_core::ownership::{edge_for, CASCADE_EDGES};
use sqlx::PgPool;

/// Lookup tables referenced with `ON DELETE RESTRICT`.
const LOOKUP_TABLES: &[&str] = &[
    "course_categories",
    "tutorial_difficulties",
    "quiz_statuses",
    "question_types",
];

/// All `id` columns must be bigint (entity tables) or smallint (lookup tables).
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_correct_type(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, data_type) in &rows {
        let expected = if LOOKUP_TABLES.contains(&table.as_str()) {
            "smallint"
        } else {
            "bigint"
        };
        assert_eq!(data_type, expected, "Table {table}.id");
    }
}

/// Every table carries timestamptz `created_at` and `updated_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let data_type: Option<String> = sqlx::query_scalar(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let data_type = data_type.unwrap_or_else(|| panic!("Table {table} is missing {col}"));
            assert_eq!(data_type, "timestamp with time zone", "Table {table}.{col}");
        }
    }
}

/// Text columns use TEXT with CHECK constraints, never VARCHAR.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "Found VARCHAR columns: {rows:?}");
}

/// Every FK column leads some index on its table.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT tc.table_name, kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, column) in &fk_columns {
        let has_index: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = $1
                  AND (indexdef LIKE '%(' || $2 || ')%'
                       OR indexdef LIKE '%(' || $2 || ',%')
            )",
        )
        .bind(table)
        .bind(column)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index, "FK column {table}.{column} has no leading index");
    }
}

/// FK rows: (table, column, referenced table, delete rule, update rule).
async fn foreign_keys(pool: &PgPool) -> Vec<(String, String, String, String, String)> {
    sqlx::query_as(
        "SELECT kcu.table_name, kcu.column_name, ccu.table_name,
                rc.delete_rule, rc.update_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.key_column_usage kcu
             ON kcu.constraint_name = rc.constraint_name
             AND kcu.constraint_schema = rc.constraint_schema
         JOIN information_schema.constraint_column_usage ccu
             ON ccu.constraint_name = rc.constraint_name
             AND ccu.constraint_schema = rc.constraint_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY kcu.table_name, kcu.column_name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

/// Entity FKs cascade exactly as the ownership tree says; lookup FKs restrict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fks_match_ownership_tree(pool: PgPool) {
    let fks = foreign_keys(&pool).await;
    assert!(!fks.is_empty());

    let mut seen = BTreeSet::new();
    for (table, column, parent, delete_rule, update_rule) in &fks {
        assert_eq!(update_rule, "CASCADE", "{table}.{column} ON UPDATE");

        if LOOKUP_TABLES.contains(&parent.as_str()) {
            assert_eq!(delete_rule, "RESTRICT", "{table}.{column} ON DELETE");
            continue;
        }

        let edge = edge_for(table, column)
            .unwrap_or_else(|| panic!("{table}.{column} is not in the ownership tree"));
        assert_eq!(edge.parent, parent, "{table}.{column} parent");
        assert_eq!(delete_rule, edge.on_delete.sql_name(), "{table}.{column} ON DELETE");
        seen.insert((edge.child, edge.column));
    }

    let declared: BTreeSet<_> = CASCADE_EDGES.iter().map(|e| (e.child, e.column)).collect();
    assert_eq!(seen, declared, "every declared edge exists in the schema");
}

/// Every table except the migration ledger has an `updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_updated_at_trigger(pool: PgPool) {
    let missing: Vec<String> = sqlx::query_scalar(
        "SELECT t.table_name
         FROM information_schema.tables t
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
           AND NOT EXISTS (
               SELECT 1 FROM information_schema.triggers tr
               WHERE tr.event_object_table = t.table_name
                 AND tr.trigger_name = 'trg_' || t.table_name || '_updated_at'
           )",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(missing.is_empty(), "Tables without updated_at trigger: {missing:?}");
}
