use std::collections::BTreeMap;

use outfitter_core::domain::category::Category;
use serde::Serialize;
use tracing::info;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Demo catalog shipped with the binary: eight categories and nine brands,
/// one item per (brand, category) pair.
pub struct CatalogSeed;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeedOutcome {
    Seeded { categories: usize, brands: usize, items: usize },
    AlreadySeeded { categories: i64 },
}

#[derive(Clone, Debug, Serialize)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

impl CatalogSeed {
    pub const CATEGORIES_JSON: &str = include_str!("../../../config/fixtures/categories.json");
    pub const PRICE_TABLE_JSON: &str = include_str!("../../../config/fixtures/price_table.json");

    pub fn categories() -> Result<Vec<String>, RepositoryError> {
        serde_json::from_str(Self::CATEGORIES_JSON)
            .map_err(|error| RepositoryError::Decode(format!("categories fixture: {error}")))
    }

    /// Brand name to (category name to price).
    pub fn price_table() -> Result<BTreeMap<String, BTreeMap<String, i64>>, RepositoryError> {
        serde_json::from_str(Self::PRICE_TABLE_JSON)
            .map_err(|error| RepositoryError::Decode(format!("price table fixture: {error}")))
    }

    pub async fn load(pool: &DbPool) -> Result<SeedOutcome, RepositoryError> {
        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM category").fetch_one(pool).await?;
        if existing > 0 {
            info!(event_name = "seed.skipped", categories = existing, "catalog already seeded");
            return Ok(SeedOutcome::AlreadySeeded { categories: existing });
        }

        let categories = Self::categories()?;
        let price_table = Self::price_table()?;

        let mut tx = pool.begin().await?;

        let mut category_ids = BTreeMap::new();
        for name in &categories {
            let id = sqlx::query("INSERT INTO category (name) VALUES (?1)")
                .bind(Category::normalize_name(name))
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            category_ids.insert(name.as_str(), id);
        }

        let mut items = 0;
        for (brand, prices) in &price_table {
            let unknown = prices.keys().find(|name| !category_ids.contains_key(name.as_str()));
            if let Some(unknown) = unknown {
                return Err(RepositoryError::Decode(format!(
                    "price table for brand `{brand}` names unknown category `{unknown}`"
                )));
            }

            let existing_brand =
                sqlx::query_scalar::<_, i64>("SELECT id FROM brand WHERE name = ?1")
                    .bind(brand)
                    .fetch_optional(&mut *tx)
                    .await?;
            let brand_id = match existing_brand {
                Some(id) => id,
                None => sqlx::query("INSERT INTO brand (name) VALUES (?1)")
                    .bind(brand)
                    .execute(&mut *tx)
                    .await?
                    .last_insert_rowid(),
            };

            for category in &categories {
                let Some(price) = prices.get(category) else {
                    continue;
                };
                let category_id = category_ids.get(category.as_str()).copied().ok_or_else(|| {
                    RepositoryError::Decode(format!("unknown category `{category}`"))
                })?;

                sqlx::query(
                    "INSERT INTO item (category_id, brand_id, price, status) \
                     VALUES (?1, ?2, ?3, 'active')",
                )
                .bind(category_id)
                .bind(brand_id)
                .bind(*price)
                .execute(&mut *tx)
                .await?;
                items += 1;
            }
        }

        tx.commit().await?;

        let outcome =
            SeedOutcome::Seeded { categories: categories.len(), brands: price_table.len(), items };
        info!(event_name = "seed.loaded", ?outcome, "catalog seeded");
        Ok(outcome)
    }

    /// Verify that every fixture category, brand and item is present.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let categories = Self::categories()?;
        let price_table = Self::price_table()?;
        let expected_items: usize = price_table.values().map(BTreeMap::len).sum();

        let mut checks = Vec::new();

        let mut categories_present = true;
        for name in &categories {
            let exists: i64 =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM category WHERE name = ?1)")
                    .bind(name)
                    .fetch_one(pool)
                    .await?;
            categories_present &= exists == 1;
        }
        checks.push(("categories", categories_present));

        let mut brands_present = true;
        for name in price_table.keys() {
            let exists: i64 =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM brand WHERE name = ?1)")
                    .bind(name)
                    .fetch_one(pool)
                    .await?;
            brands_present &= exists == 1;
        }
        checks.push(("brands", brands_present));

        let item_count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM item WHERE status = 'active'")
                .fetch_one(pool)
                .await?;
        checks.push(("items", usize::try_from(item_count).ok() >= Some(expected_items)));

        let all_present = checks.iter().all(|(_, ok)| *ok);
        Ok(VerificationResult { all_present, checks })
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogSeed, SeedOutcome};
    use crate::{connect_with_settings, migrations};

    #[test]
    fn fixtures_cover_every_category_for_every_brand() {
        let categories = CatalogSeed::categories().expect("categories");
        let table = CatalogSeed::price_table().expect("price table");

        assert_eq!(categories.len(), 8);
        assert_eq!(table.len(), 9);
        for prices in table.values() {
            assert!(categories.iter().all(|category| prices.contains_key(category)));
        }
    }

    #[tokio::test]
    async fn load_is_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        let first = CatalogSeed::load(&pool).await.expect("first load");
        assert_eq!(first, SeedOutcome::Seeded { categories: 8, brands: 9, items: 72 });

        let second = CatalogSeed::load(&pool).await.expect("second load");
        assert_eq!(second, SeedOutcome::AlreadySeeded { categories: 8 });

        let verification = CatalogSeed::verify(&pool).await.expect("verify");
        assert!(verification.all_present, "checks: {:?}", verification.checks);
    }

    #[tokio::test]
    async fn verify_reports_missing_data_on_empty_catalog() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");

        let verification = CatalogSeed::verify(&pool).await.expect("verify");
        assert!(!verification.all_present);
    }
}
