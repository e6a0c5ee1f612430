//! Offline tests for vibeboard-db. These do not require a live database.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use vibeboard_core::{AppConfig, Environment};
use vibeboard_db::{connect_store, DbError, KvStore, PoolConfig, StoreBackend};

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: database_url.map(str::to_string),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        scrape_delay_ms: 0,
        analysis_delay_ms: 0,
        rate_limit_per_minute: 120,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config(Some("postgres://example")));
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_store_without_url_is_an_error() {
    let err = connect_store(&app_config(None)).await.unwrap_err();
    assert!(matches!(err, DbError::MissingDatabaseUrl));
}

#[test]
fn store_backend_display_names() {
    assert_eq!(StoreBackend::Postgres.to_string(), "postgres");
    assert_eq!(KvStore::memory().backend().to_string(), "memory");
}
