use std::env;
use std::sync::{Mutex, OnceLock};

use outfitter_cli::commands::{migrate, outfit, seed};
use serde_json::Value;
use tempfile::TempDir;

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("OUTFITTER_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_for_unsupported_database() {
    with_env(&[("OUTFITTER_DATABASE_URL", "postgres://localhost/outfitter")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    let dir = TempDir::new().expect("temp dir");
    let url = database_url(&dir);

    with_env(&[("OUTFITTER_DATABASE_URL", url.as_str())], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["command"], "seed");
        assert!(first_payload["message"].as_str().unwrap_or_default().contains("72 items"));

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["status"], "ok");
        assert!(second_payload["message"].as_str().unwrap_or_default().contains("already"));
    });
}

#[test]
fn outfit_queries_answer_from_seeded_database() {
    let dir = TempDir::new().expect("temp dir");
    let url = database_url(&dir);

    with_env(&[("OUTFITTER_DATABASE_URL", url.as_str())], || {
        assert_eq!(seed::run().exit_code, 0, "seed should succeed");

        let by_category = outfit::run(outfit::Query::LowestByCategory);
        assert_eq!(by_category.exit_code, 0);
        let payload = parse_payload(&by_category.output);
        assert_eq!(payload["command"], "outfit category");
        assert_eq!(payload["data"]["totalPrice"], 34100);

        let by_brand = outfit::run(outfit::Query::LowestByBrand);
        let payload = parse_payload(&by_brand.output);
        assert_eq!(payload["data"]["brand"], "D");
        assert_eq!(payload["data"]["totalPrice"], 36100);

        let range = outfit::run(outfit::Query::PriceRange { category: "Top".to_string() });
        let payload = parse_payload(&range.output);
        assert_eq!(payload["data"]["minPrice"]["brand"], "C");
        assert_eq!(payload["data"]["maxPrice"]["brand"], "I");
    });
}

#[test]
fn outfit_query_on_empty_catalog_reports_insufficient_data() {
    with_env(&[("OUTFITTER_DATABASE_URL", "sqlite::memory:")], || {
        let result = outfit::run(outfit::Query::LowestByBrand);
        assert_eq!(result.exit_code, 7);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "insufficient_data");
    });
}

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("outfitter.db").display())
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "OUTFITTER_DATABASE_URL",
        "OUTFITTER_DATABASE_MAX_CONNECTIONS",
        "OUTFITTER_DATABASE_TIMEOUT_SECS",
        "OUTFITTER_SERVER_BIND_ADDRESS",
        "OUTFITTER_SERVER_PORT",
        "OUTFITTER_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "OUTFITTER_LOGGING_LEVEL",
        "OUTFITTER_LOGGING_FORMAT",
        "OUTFITTER_LOG_LEVEL",
        "OUTFITTER_LOG_FORMAT",
        "OUTFITTER_SEED_ON_STARTUP",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
