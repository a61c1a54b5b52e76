use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Administrative totals. Revenue over zero payments is zero, not an error.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: i64,
    pub menu_items: i64,
    pub orders: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

/// Read-only aggregation over historical payments and the catalog. Invoked
/// only behind the admin gate.
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, sqlx::Error> {
        let stats = sqlx::query_as::<_, AdminStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM accounts)                    AS users,
                (SELECT COUNT(*) FROM menu_items)                  AS menu_items,
                (SELECT COUNT(*) FROM payments)                    AS orders,
                (SELECT COALESCE(SUM(amount), 0) FROM payments)    AS revenue
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Per-category order quantity and revenue: expand each payment's line
    /// items and join them back to the catalog by id. Inner-join semantics:
    /// a line item whose catalog entry has since been deleted drops out of
    /// the totals - a documented limitation, not corrected here.
    pub async fn order_stats(&self) -> Result<Vec<CategoryStat>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CategoryStat>(
            r#"
            SELECT
                m.category                   AS category,
                COUNT(*)                     AS quantity,
                COALESCE(SUM(m.price), 0)    AS revenue
            FROM payments p
            CROSS JOIN UNNEST(p.item_ids) AS line(item_id)
            JOIN menu_items m ON m.id = line.item_id
            GROUP BY m.category
            ORDER BY m.category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
