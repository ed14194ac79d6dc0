use anyhow::Context;
use clap::Parser;
use person_enrich::utils::{logger, validation::Validate};
use person_enrich::{
    bind_listener, create_router, Enricher, HttpLookupClient, InMemoryPersonStore, PersonService,
    ServerConfig, StorageBackend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在時直接使用環境變數
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting person-enrich");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let enricher = Enricher::new(HttpLookupClient::new(config.lookup.endpoints()));
    let app = match config.database.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            create_router(PersonService::new(enricher, InMemoryPersonStore::new()))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            let url = config.database.connection_url()?;
            let store = person_enrich::PostgresPersonStore::connect(&url)
                .await
                .context("failed to connect to database")?;
            store.migrate().await.context("failed to migrate persons table")?;
            tracing::info!("Using PostgreSQL storage");
            create_router(PersonService::new(enricher, store))
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres => {
            anyhow::bail!("PostgreSQL storage requires building with `--features postgres`")
        }
    };

    let listener = bind_listener(config.server_port)
        .await
        .with_context(|| format!("failed to bind port {}", config.server_port))?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
