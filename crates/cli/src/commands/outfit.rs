use std::sync::Arc;

use crate::commands::{prepare, CommandResult};
use outfitter_core::errors::{ApplicationError, InterfaceError};
use outfitter_core::service::OutfitQueryService;
use outfitter_db::{connect_with_settings, migrations, SqlCatalogRepository};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

type Failure = (&'static str, String, u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    LowestByCategory,
    LowestByBrand,
    PriceRange { category: String },
}

impl Query {
    fn command_name(&self) -> &'static str {
        match self {
            Self::LowestByCategory => "outfit category",
            Self::LowestByBrand => "outfit brand",
            Self::PriceRange { .. } => "outfit range",
        }
    }
}

pub fn run(query: Query) -> CommandResult {
    let command = query.command_name();
    let (config, runtime) = match prepare(command) {
        Ok(prepared) => prepared,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let service = OutfitQueryService::new(Arc::new(SqlCatalogRepository::new(pool.clone())));
        let answer = answer(&service, &query).await;

        pool.close().await;
        answer
    });

    match result {
        Ok((message, data)) => CommandResult::success_with_data(command, message, Some(data)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure(command, error_class, message, exit_code)
        }
    }
}

async fn answer(service: &OutfitQueryService, query: &Query) -> Result<(String, Value), Failure> {
    match query {
        Query::LowestByCategory => {
            let outfit = service.lowest_by_category().await.map_err(query_failure)?;
            let message = format!(
                "cheapest item in each of {} categories totals {}",
                outfit.items.len(),
                outfit.total_price
            );
            Ok((message, encode(&outfit)?))
        }
        Query::LowestByBrand => {
            let outfit = service.lowest_by_brand().await.map_err(query_failure)?;
            let message = format!(
                "brand {} supplies the cheapest complete outfit at {}",
                outfit.brand, outfit.total_price
            );
            Ok((message, encode(&outfit)?))
        }
        Query::PriceRange { category } => {
            let range = service.price_range(category).await.map_err(query_failure)?;
            let message = format!(
                "{} ranges from {} ({}) to {} ({})",
                range.category,
                range.min_price.price,
                range.min_price.brand,
                range.max_price.price,
                range.max_price.brand
            );
            Ok((message, encode(&range)?))
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, Failure> {
    serde_json::to_value(value).map_err(|error| ("serialization", error.to_string(), 3u8))
}

fn query_failure(error: ApplicationError) -> Failure {
    let interface = error.into_interface(Uuid::new_v4().to_string());
    let (error_class, exit_code) = match &interface {
        InterfaceError::BadRequest { .. } => ("validation", 7u8),
        InterfaceError::NotFound { .. } => ("not_found", 7u8),
        InterfaceError::InsufficientData { .. } => ("insufficient_data", 7u8),
        InterfaceError::ServiceUnavailable { .. } => ("db_connectivity", 4u8),
        InterfaceError::Internal { .. } => ("internal", 3u8),
    };
    let message =
        format!("{} (correlation_id={})", interface.message(), interface.correlation_id());
    (error_class, message, exit_code)
}

#[cfg(test)]
mod tests {
    use outfitter_core::errors::ApplicationError;
    use outfitter_core::outfit::OutfitError;

    use super::{query_failure, Query};

    #[test]
    fn insufficient_data_maps_to_query_exit_code() {
        let (class, message, code) = query_failure(ApplicationError::Outfit(
            OutfitError::InsufficientCombination { required: 8 },
        ));

        assert_eq!(class, "insufficient_data");
        assert_eq!(code, 7);
        assert!(message.contains("correlation_id="));
    }

    #[test]
    fn persistence_failures_reuse_the_connectivity_code() {
        let (class, _, code) =
            query_failure(ApplicationError::Persistence("database is locked".to_string()));
        assert_eq!((class, code), ("db_connectivity", 4));
    }

    #[test]
    fn command_names_follow_the_subcommands() {
        assert_eq!(Query::LowestByBrand.command_name(), "outfit brand");
        assert_eq!(
            Query::PriceRange { category: "top".to_string() }.command_name(),
            "outfit range"
        );
    }
}
