//! PostgreSQL schema migrations for querygpt storage.
//!
//! Every statement is idempotent; running them on each startup is safe.

use sqlx::PgPool;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS qa_sessions (
            id BIGSERIAL PRIMARY KEY,
            user_id VARCHAR(255) NOT NULL,
            question TEXT NOT NULL,
            answer TEXT NOT NULL DEFAULT '',
            llm_provider VARCHAR(50) NOT NULL DEFAULT 'deepseek',
            response_time_ms BIGINT NOT NULL DEFAULT 0,
            is_successful BOOLEAN NOT NULL DEFAULT TRUE,
            error_message TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT qa_sessions_error_only_on_failure
                CHECK (NOT is_successful OR error_message IS NULL)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_qa_user_created ON qa_sessions (user_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_qa_user_successful ON qa_sessions (user_id, is_successful)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_qa_created ON qa_sessions (created_at)")
        .execute(pool)
        .await?;

    tracing::debug!("qa_sessions migrations applied");
    Ok(())
}
