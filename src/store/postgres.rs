use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::model::{Block, BlockFields, District, DistrictFields, Id};
use crate::store::error::StoreResult;
use crate::store::traits::{BlockStore, DistrictStore};

const DISTRICT_COLUMNS: &str = "id, name, population, area, headquarters";

const BLOCK_COLUMNS: &str = "id, name, district_id, population, headquarters";

const JOINED_BLOCK_SELECT: &str = r#"
    SELECT b.id, b.name, b.district_id, b.population, b.headquarters, d.name AS district_name
    FROM blocks b
    JOIN districts d ON b.district_id = d.id
"#;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run the embedded migrations in `./migrations`
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Wait for checked-out connections to return and close the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl DistrictStore for PostgresStore {
    async fn list_districts(&self) -> StoreResult<Vec<District>> {
        let query = format!("SELECT {DISTRICT_COLUMNS} FROM districts ORDER BY name");
        let districts = sqlx::query_as::<_, District>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(districts)
    }

    async fn get_district(&self, id: Id) -> StoreResult<Option<District>> {
        let query = format!("SELECT {DISTRICT_COLUMNS} FROM districts WHERE id = $1");
        let district = sqlx::query_as::<_, District>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(district)
    }

    async fn insert_district(&self, fields: &DistrictFields) -> StoreResult<Id> {
        let id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO districts (name, population, area, headquarters)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(fields.population)
        .bind(fields.area)
        .bind(&fields.headquarters)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_district(&self, id: Id, fields: &DistrictFields) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE districts
            SET name = $1, population = $2, area = $3, headquarters = $4
            WHERE id = $5
            "#,
        )
        .bind(&fields.name)
        .bind(fields.population)
        .bind(fields.area)
        .bind(&fields.headquarters)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_district(&self, id: Id) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM districts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_blocks_in_district(&self, district_id: Id) -> StoreResult<Vec<Block>> {
        let query =
            format!("SELECT {BLOCK_COLUMNS} FROM blocks WHERE district_id = $1 ORDER BY name");
        let blocks = sqlx::query_as::<_, Block>(&query)
            .bind(district_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(blocks)
    }
}

#[async_trait::async_trait]
impl BlockStore for PostgresStore {
    async fn list_blocks(&self) -> StoreResult<Vec<Block>> {
        let query = format!("{JOINED_BLOCK_SELECT} ORDER BY d.name, b.name");
        let blocks = sqlx::query_as::<_, Block>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(blocks)
    }

    async fn get_block(&self, id: Id) -> StoreResult<Option<Block>> {
        let query = format!("{JOINED_BLOCK_SELECT} WHERE b.id = $1");
        let block = sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(block)
    }

    async fn find_block(&self, id: Id) -> StoreResult<Option<Block>> {
        let query = format!("SELECT {BLOCK_COLUMNS} FROM blocks WHERE id = $1");
        let block = sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(block)
    }

    async fn insert_block(&self, fields: &BlockFields) -> StoreResult<Id> {
        let id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO blocks (name, district_id, population, headquarters)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&fields.name)
        .bind(fields.district_id)
        .bind(fields.population)
        .bind(&fields.headquarters)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_block(&self, id: Id, fields: &BlockFields) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE blocks
            SET name = $1, district_id = $2, population = $3, headquarters = $4
            WHERE id = $5
            "#,
        )
        .bind(&fields.name)
        .bind(fields.district_id)
        .bind(fields.population)
        .bind(&fields.headquarters)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_block(&self, id: Id) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM blocks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
