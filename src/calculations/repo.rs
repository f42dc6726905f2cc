use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Calculation, NewCalculation};

pub async fn insert(db: &PgPool, new: &NewCalculation) -> anyhow::Result<Calculation> {
    let calc = sqlx::query_as::<_, Calculation>(
        r#"
        INSERT INTO calculations (id, a, b, type, user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, a, b, type, user_id, created_at
        "#,
    )
    .bind(new.id)
    .bind(new.a)
    .bind(new.b)
    .bind(&new.kind)
    .bind(new.user_id)
    .fetch_one(db)
    .await?;
    Ok(calc)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Calculation>> {
    let calc = sqlx::query_as::<_, Calculation>(
        r#"
        SELECT id, a, b, type, user_id, created_at
        FROM calculations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(calc)
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Calculation>> {
    let rows = sqlx::query_as::<_, Calculation>(
        r#"
        SELECT id, a, b, type, user_id, created_at
        FROM calculations
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Returns false when nothing matched, either missing or owned by someone else.
pub async fn delete_owned(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
    let done = sqlx::query(
        r#"
        DELETE FROM calculations
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(done.rows_affected() > 0)
}
