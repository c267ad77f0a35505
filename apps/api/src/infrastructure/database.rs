// Database bootstrap: connection pool and embedded migrations

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Opens a PostgreSQL connection pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Applies the migrations under `apps/api/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// True when the error is a PostgreSQL unique-constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
