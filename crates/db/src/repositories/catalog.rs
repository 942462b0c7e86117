use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use outfitter_core::catalog::{CatalogQuery, CatalogStore};
use outfitter_core::domain::brand::{Brand, BrandId};
use outfitter_core::domain::category::{Category, CategoryId};
use outfitter_core::domain::item::{Item, ItemId, ItemStatus};
use outfitter_core::errors::ApplicationError;

use super::RepositoryError;
use crate::DbPool;

const ITEM_PROJECTION: &str = "
    SELECT i.id AS item_id, i.price, i.status,
           c.id AS category_id, c.name AS category_name,
           b.id AS brand_id, b.name AS brand_name
    FROM item i
    JOIN category c ON c.id = i.category_id
    JOIN brand b ON b.id = i.brand_id";

const MIN_ITEM_PER_CATEGORY_SQL: &str = "
    WITH ranked AS (
        SELECT i.id, i.category_id, i.brand_id, i.price, i.status,
               ROW_NUMBER() OVER (
                   PARTITION BY i.category_id
                   ORDER BY i.price ASC, i.id ASC
               ) AS position
        FROM item i
        WHERE i.status = 'active'
    )
    SELECT r.id AS item_id, r.price, r.status,
           c.id AS category_id, c.name AS category_name,
           b.id AS brand_id, b.name AS brand_name
    FROM ranked r
    JOIN category c ON c.id = r.category_id
    JOIN brand b ON b.id = r.brand_id
    WHERE r.position = 1
    ORDER BY c.id";

const MIN_ITEM_PER_BRAND_CATEGORY_SQL: &str = "
    WITH ranked AS (
        SELECT i.id, i.category_id, i.brand_id, i.price, i.status,
               ROW_NUMBER() OVER (
                   PARTITION BY i.brand_id, i.category_id
                   ORDER BY i.price ASC, i.id ASC
               ) AS position
        FROM item i
        WHERE i.status = 'active'
    )
    SELECT r.id AS item_id, r.price, r.status,
           c.id AS category_id, c.name AS category_name,
           b.id AS brand_id, b.name AS brand_name
    FROM ranked r
    JOIN category c ON c.id = r.category_id
    JOIN brand b ON b.id = r.brand_id
    WHERE r.position = 1
    ORDER BY b.id, c.id";

/// SQLite-backed catalog. Serves both the outfit queries and catalog
/// management from the same pool.
#[derive(Clone)]
pub struct SqlCatalogRepository {
    pool: DbPool,
}

impl SqlCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, sql: &str) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_item).collect()
    }
}

#[async_trait]
impl CatalogQuery for SqlCatalogRepository {
    async fn min_item_per_category(&self) -> Result<Vec<Item>, ApplicationError> {
        Ok(self.fetch_items(MIN_ITEM_PER_CATEGORY_SQL).await?)
    }

    async fn min_item_per_brand_category(&self) -> Result<Vec<Item>, ApplicationError> {
        Ok(self.fetch_items(MIN_ITEM_PER_BRAND_CATEGORY_SQL).await?)
    }

    async fn category_count(&self) -> Result<u64, ApplicationError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM category")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn items_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Item>, ApplicationError> {
        let sql = format!(
            "{ITEM_PROJECTION} WHERE i.category_id = ?1 AND i.status = 'active' ORDER BY i.id"
        );
        let rows = sqlx::query(&sql)
            .bind(category_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(rows.iter().map(row_to_item).collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, ApplicationError> {
        let row = sqlx::query("SELECT id, name FROM category WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(row.as_ref().map(row_to_category).transpose()?)
    }
}

#[async_trait]
impl CatalogStore for SqlCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, ApplicationError> {
        let rows = sqlx::query("SELECT id, name FROM category ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(rows.iter().map(row_to_category).collect::<Result<Vec<_>, _>>()?)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, ApplicationError> {
        let rows = sqlx::query("SELECT id, name FROM brand ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(rows.iter().map(row_to_brand).collect::<Result<Vec<_>, _>>()?)
    }

    async fn list_items(&self) -> Result<Vec<Item>, ApplicationError> {
        let sql = format!("{ITEM_PROJECTION} WHERE i.status <> 'removed' ORDER BY i.id");
        Ok(self.fetch_items(&sql).await?)
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, ApplicationError> {
        let row = sqlx::query("SELECT id, name FROM category WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(row.as_ref().map(row_to_category).transpose()?)
    }

    async fn find_brand(&self, id: BrandId) -> Result<Option<Brand>, ApplicationError> {
        let row = sqlx::query("SELECT id, name FROM brand WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(row.as_ref().map(row_to_brand).transpose()?)
    }

    async fn find_brand_by_name(&self, name: &str) -> Result<Option<Brand>, ApplicationError> {
        let row = sqlx::query("SELECT id, name FROM brand WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(row.as_ref().map(row_to_brand).transpose()?)
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, ApplicationError> {
        let sql = format!("{ITEM_PROJECTION} WHERE i.id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(row.as_ref().map(row_to_item).transpose()?)
    }

    async fn insert_brand(&self, name: &str) -> Result<Brand, ApplicationError> {
        let result = sqlx::query("INSERT INTO brand (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(Brand { id: BrandId(result.last_insert_rowid()), name: name.to_string() })
    }

    async fn update_brand(&self, brand: &Brand) -> Result<(), ApplicationError> {
        let result = sqlx::query("UPDATE brand SET name = ?1 WHERE id = ?2")
            .bind(&brand.name)
            .bind(brand.id.0)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        if result.rows_affected() == 0 {
            return Err(ApplicationError::not_found("brand", brand.id.0));
        }
        Ok(())
    }

    async fn count_live_items(&self, brand_id: BrandId) -> Result<u64, ApplicationError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(1) FROM item WHERE brand_id = ?1 AND status <> 'removed'",
        )
        .bind(brand_id.0)
        .fetch_one(&self.pool)
                .await
                .map_err(RepositoryError::from)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete_brand(&self, brand_id: BrandId) -> Result<(), ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        sqlx::query("DELETE FROM item WHERE brand_id = ?1 AND status = 'removed'")
            .bind(brand_id.0)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
        let result = sqlx::query("DELETE FROM brand WHERE id = ?1")
            .bind(brand_id.0)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;
        if result.rows_affected() == 0 {
            return Err(ApplicationError::not_found("brand", brand_id.0));
        }

        tx.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }

    async fn insert_item(
        &self,
        category: &Category,
        brand: &Brand,
        price: i64,
    ) -> Result<Item, ApplicationError> {
        let result = sqlx::query(
            "INSERT INTO item (category_id, brand_id, price, status) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(category.id.0)
        .bind(brand.id.0)
        .bind(price)
        .bind(ItemStatus::Active.as_str())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(Item::new(
            ItemId(result.last_insert_rowid()),
            category.clone(),
            brand.clone(),
            price,
            ItemStatus::Active,
        )?)
    }

    async fn update_item(&self, item: &Item) -> Result<(), ApplicationError> {
        let result = sqlx::query(
            "UPDATE item SET price = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
        )
        .bind(item.price)
        .bind(item.status.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(item.id.0)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;
        if result.rows_affected() == 0 {
            return Err(ApplicationError::not_found("item", item.id.0));
        }
        Ok(())
    }
}

fn row_to_category(row: &SqliteRow) -> Result<Category, RepositoryError> {
    Ok(Category { id: CategoryId(row.try_get("id")?), name: row.try_get("name")? })
}

fn row_to_brand(row: &SqliteRow) -> Result<Brand, RepositoryError> {
    Ok(Brand { id: BrandId(row.try_get("id")?), name: row.try_get("name")? })
}

fn row_to_item(row: &SqliteRow) -> Result<Item, RepositoryError> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<ItemStatus>()
        .map_err(|error| RepositoryError::Decode(error.to_string()))?;

    Ok(Item {
        id: ItemId(row.try_get("item_id")?),
        category: Category {
            id: CategoryId(row.try_get("category_id")?),
            name: row.try_get("category_name")?,
        },
        brand: Brand { id: BrandId(row.try_get("brand_id")?), name: row.try_get("brand_name")? },
        price: row.try_get("price")?,
        status,
    })
}
