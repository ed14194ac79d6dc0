pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{
    api::{bind_listener, create_router},
    http::{HttpLookupClient, LookupEndpoints},
    storage::InMemoryPersonStore,
};
#[cfg(feature = "postgres")]
pub use adapters::postgres::PostgresPersonStore;
pub use config::{DbArgs, LookupArgs, ServerConfig, StorageBackend};
pub use self::core::{enrich::Enricher, service::PersonService};
pub use utils::error::{AppError, LookupError, Result};
