use sqlx::MySqlPool;

use crate::models::{Item, ItemStatus};

/// Baseline rows inserted on first boot when seeding is enabled.
const SEED_ROWS: [(&str, ItemStatus); 3] = [
    ("Módulo CI/CD", ItemStatus::Completed),
    ("Módulo Docker", ItemStatus::InProgress),
    ("Módulo Despliegue", ItemStatus::Pending),
];

/// Thin repository over the `items` table. One pooled connection is
/// acquired per statement and released when the call returns, on every
/// exit path.
#[derive(Clone)]
pub struct ItemStore {
    pool: MySqlPool,
}

impl ItemStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = MySqlPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Build a store without opening a connection. The pool connects on
    /// first use; integration tests rely on this to exercise the router
    /// without a live database.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = MySqlPool::connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create the schema if it does not exist yet. Idempotent.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS items (
                id INT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                status VARCHAR(50) NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Connection verification probe.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert the baseline rows, but only into an empty table. The
    /// existence check makes re-runs no-ops; it is not race-free under a
    /// concurrent first boot, which is out of scope here.
    pub async fn seed_defaults(&self) -> Result<(), sqlx::Error> {
        let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;
        if rows > 0 {
            return Ok(());
        }

        for (name, status) in SEED_ROWS {
            sqlx::query("INSERT INTO items (name, status) VALUES (?, ?)")
                .bind(name)
                .bind(status.as_str())
                .execute(&self.pool)
                .await?;
        }
        tracing::info!("seeded {} baseline items", SEED_ROWS.len());
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>("SELECT id, name, status FROM items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>("SELECT id, name, status FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, name: &str, status: ItemStatus) -> Result<Item, sqlx::Error> {
        let result = sqlx::query("INSERT INTO items (name, status) VALUES (?, ?)")
            .bind(name)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(Item {
            id: result.last_insert_id() as i32,
            name: name.to_string(),
            status: status.as_str().to_string(),
        })
    }

    /// Partial update: only supplied fields change. Returns `None` when
    /// the id is unknown, leaving the store untouched.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        status: Option<ItemStatus>,
    ) -> Result<Option<Item>, sqlx::Error> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };

        let name = name.unwrap_or(&current.name).to_string();
        let status = status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| current.status.clone());

        sqlx::query("UPDATE items SET name = ?, status = ? WHERE id = ?")
            .bind(&name)
            .bind(&status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Some(Item { id, name, status }))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
