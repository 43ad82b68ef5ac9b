use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Product, RecommendationFilter, RecommendationResult, ReferenceKind, ReferenceRecord, PRODUCT_COLUMNS,
};
use crate::database::query_builder::RecommendationQuery;
use crate::database::store::CatalogStore;
use crate::types::{ProductId, RecordId};

/// `CatalogStore` over a bounded Postgres pool.
///
/// Every statement runs directly on the pool, so a connection is checked out
/// for exactly one statement and goes back on drop, error path included.
pub struct PgStore {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgStore {
    pub fn new(pool: PgPool, slow_query_threshold: Option<Duration>) -> Self {
        Self {
            pool,
            slow_query_threshold,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn observe(&self, statement: &str, started: Instant) {
        let elapsed = started.elapsed();
        match self.slow_query_threshold {
            Some(threshold) if elapsed > threshold => {
                warn!("Slow query '{}' took {}ms", statement, elapsed.as_millis());
            }
            _ => debug!("Query '{}' took {}ms", statement, elapsed.as_millis()),
        }
    }

    fn not_found(kind: ReferenceKind, id: i32) -> DatabaseError {
        DatabaseError::NotFound(format!("{} {} not found", kind.display_name(), id))
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {id} AS id, {label} AS label FROM {table} ORDER BY {id}",
            id = kind.id_column(),
            label = kind.label_column(),
            table = kind.table()
        );
        let rows = sqlx::query_as::<_, ReferenceRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError> {
        let sql = format!(
            "INSERT INTO {table} ({id}, {label}) VALUES ($1, $2) RETURNING {id} AS id, {label} AS label",
            id = kind.id_column(),
            label = kind.label_column(),
            table = kind.table()
        );
        let row = sqlx::query_as::<_, ReferenceRecord>(&sql)
            .bind(record.id)
            .bind(&record.label)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError> {
        let sql = format!(
            "UPDATE {table} SET {label} = $2 WHERE {id} = $1 RETURNING {id} AS id, {label} AS label",
            id = kind.id_column(),
            label = kind.label_column(),
            table = kind.table()
        );
        sqlx::query_as::<_, ReferenceRecord>(&sql)
            .bind(record.id)
            .bind(&record.label)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Self::not_found(kind, record.id))
    }

    async fn delete_reference(&self, kind: ReferenceKind, id: RecordId) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", kind.table(), kind.id_column());
        let result = sqlx::query(&sql).bind(id.get()).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found(kind, id.get()));
        }
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError> {
        let sql = format!("SELECT {} FROM Products ORDER BY Product_ID", PRODUCT_COLUMNS);
        let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create_product(&self, product: Product) -> Result<Product, DatabaseError> {
        let sql = format!(
            "INSERT INTO Products ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {cols}",
            cols = PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(product.product_id)
            .bind(&product.product_name)
            .bind(&product.all_ingredients)
            .bind(product.concern_id)
            .bind(product.skin_type_id)
            .bind(product.brand_id)
            .bind(product.product_type_id)
            .bind(product.key_ingredients_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_product(&self, product: Product) -> Result<Product, DatabaseError> {
        let sql = format!(
            "UPDATE Products SET Product_Name = $2, All_Ingredients = $3, Concern_ID = $4, \
             Skin_Type_ID = $5, Brand_ID = $6, Product_Type_ID = $7, Key_Ingredients_ID = $8 \
             WHERE Product_ID = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(product.product_id)
            .bind(&product.product_name)
            .bind(&product.all_ingredients)
            .bind(product.concern_id)
            .bind(product.skin_type_id)
            .bind(product.brand_id)
            .bind(product.product_type_id)
            .bind(product.key_ingredients_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Product {} not found", product.product_id)))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM Products WHERE Product_ID = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    async fn select_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> Result<Vec<RecommendationResult>, DatabaseError> {
        let sql = RecommendationQuery::new(filter).to_sql();
        let started = Instant::now();

        let mut q = sqlx::query_as::<_, RecommendationResult>(&sql.query);
        for p in sql.params.iter() {
            q = q.bind(*p);
        }

        // Any failing row aborts the whole read; nothing accumulated so far escapes.
        let results: Result<Vec<RecommendationResult>, sqlx::Error> =
            q.fetch(&self.pool).try_collect().await;

        self.observe("select_recommendations", started);
        Ok(results?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConcernId, SkinTypeId};
    use sqlx::postgres::PgPoolOptions;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_read_still_reports_its_timing() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // Nothing listens on port 1, so every acquire fails
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(300))
            .connect_lazy("postgres://skinalyze@127.0.0.1:1/skinalyze")
            .unwrap();
        let store = PgStore::new(pool, Some(Duration::ZERO));

        let err = store
            .select_recommendations(&RecommendationFilter::new(ConcernId(1), SkinTypeId(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::QueryFailure(_)));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Slow query 'select_recommendations'"), "{}", output);
    }
}
