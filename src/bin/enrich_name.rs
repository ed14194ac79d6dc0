use clap::Parser;
use person_enrich::utils::{logger, validation::Validate};
use person_enrich::{Enricher, HttpLookupClient, LookupArgs};

/// 對單一名字執行一次查詢並輸出 JSON 結果
#[derive(Debug, Parser)]
#[command(name = "enrich_name")]
#[command(about = "Look up age, gender and nationality for one name")]
struct Cli {
    name: String,

    #[command(flatten)]
    lookup: LookupArgs,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    cli.lookup.validate()?;

    let enricher = Enricher::new(HttpLookupClient::new(cli.lookup.endpoints()));
    match enricher.enrich(&cli.name).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Lookup for '{}' failed: {}", cli.name, e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    }
}
