use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Account;

/// Account lookups and mutations. Lookup is the authoritative source for
/// privilege resolution; nothing here reads role from a token.

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, email, name, role, created_at FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, email, name, role, created_at FROM accounts ORDER BY created_at",
    )
    .fetch_all(pool)
    .await
}

/// Idempotent first-sign-in insert, keyed by email. Returns the new id, or
/// None when the account already existed.
pub async fn ensure(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        "INSERT INTO accounts (email, name) VALUES ($1, $2) ON CONFLICT (email) DO NOTHING RETURNING id",
    )
    .bind(email)
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id,)| id))
}

/// Promote a target account to admin. Returns rows affected (0 = no such
/// account). Route-level admin gating means this is never self-escalation by
/// a member.
pub async fn promote_to_admin(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE accounts SET role = 'admin' WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
