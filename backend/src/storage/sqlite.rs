use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shared::{BillingCycle, Subscription};
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use crate::storage::traits::SubscriptionStore;

/// SqliteStore manages subscription persistence in SQLite
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    /// Create a new store against the given database URL
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the store, seeding sample data on first run
    pub async fn init(url: &str) -> Result<Self> {
        let store = Self::new(url).await?;
        store.seed_sample_data().await?;
        Ok(store)
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                cycle TEXT NOT NULL,
                billing_date INTEGER NOT NULL,
                category TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_subscriptions_cycle
            ON subscriptions(cycle);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_subscriptions_billing_date
            ON subscriptions(billing_date);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert starter subscriptions when the table is empty
    async fn seed_sample_data(&self) -> Result<()> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM subscriptions")
            .fetch_one(&*self.pool)
            .await?;
        let count: i64 = row.get("count");
        if count > 0 {
            return Ok(());
        }

        info!("Seeding database with sample subscriptions");
        for subscription in sample_rows() {
            self.insert(&subscription).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriptionStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<Subscription>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, amount, cycle, billing_date, category, icon, color, created_at, updated_at
            FROM subscriptions
            ORDER BY billing_date ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.iter().map(row_to_subscription).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Subscription>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, amount, cycle, billing_date, category, icon, color, created_at, updated_at
            FROM subscriptions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_subscription))
    }

    async fn get_by_day(&self, day: u32) -> Result<Vec<Subscription>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, amount, cycle, billing_date, category, icon, color, created_at, updated_at
            FROM subscriptions
            WHERE billing_date = ?
            "#,
        )
        .bind(day as i64)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.iter().map(row_to_subscription).collect())
    }

    async fn insert(&self, subscription: &Subscription) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, name, amount, cycle, billing_date, category, icon, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subscription.id)
        .bind(&subscription.name)
        .bind(subscription.amount)
        .bind(subscription.cycle.as_str())
        .bind(subscription.billing_date as i64)
        .bind(&subscription.category)
        .bind(&subscription.icon)
        .bind(&subscription.color)
        .bind(&subscription.created_at)
        .bind(&subscription.updated_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET name = ?, amount = ?, cycle = ?, billing_date = ?, category = ?, icon = ?, color = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&subscription.name)
        .bind(subscription.amount)
        .bind(subscription.cycle.as_str())
        .bind(subscription.billing_date as i64)
        .bind(&subscription.category)
        .bind(&subscription.icon)
        .bind(&subscription.color)
        .bind(&subscription.updated_at)
        .bind(&subscription.id)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_subscription(row: &SqliteRow) -> Subscription {
    let cycle = match row.get::<String, _>("cycle").as_str() {
        "YEARLY" => BillingCycle::Yearly,
        _ => BillingCycle::Monthly,
    };

    Subscription {
        id: row.get("id"),
        name: row.get("name"),
        amount: row.get("amount"),
        cycle,
        billing_date: row.get::<i64, _>("billing_date") as u32,
        category: row.get("category"),
        icon: row.get("icon"),
        color: row.get("color"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn sample_rows() -> Vec<Subscription> {
    let seed = |id: &str,
                name: &str,
                amount: f64,
                cycle: BillingCycle,
                billing_date: u32,
                category: &str,
                icon: &str,
                color: &str| {
        let now = Utc::now().to_rfc3339();
        Subscription {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            cycle,
            billing_date,
            category: category.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    };

    vec![
        seed(
            "1",
            "Netflix",
            15.99,
            BillingCycle::Monthly,
            2,
            "Entertainment",
            "fa-brands fa-netflix",
            "#E50914",
        ),
        seed(
            "2",
            "Spotify",
            9.99,
            BillingCycle::Monthly,
            4,
            "Music",
            "fa-solid fa-music",
            "#1DB954",
        ),
        seed(
            "3",
            "Adobe CC",
            52.99,
            BillingCycle::Monthly,
            7,
            "Design",
            "fa-brands fa-adobe",
            "#FF0000",
        ),
        seed(
            "4",
            "iCloud+",
            0.99,
            BillingCycle::Monthly,
            12,
            "Storage",
            "fa-brands fa-apple",
            "#FFFFFF",
        ),
        seed(
            "5",
            "Dropbox",
            120.0,
            BillingCycle::Yearly,
            10,
            "Storage",
            "fa-brands fa-dropbox",
            "#0061FF",
        ),
    ]
}
