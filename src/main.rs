//! News Brief - console and HTTP front ends

use clap::Parser;
use news_brief::config::{bind_addr, Cli, Command, Settings};
use news_brief::console::chat_loop;
use news_brief::network::{NewsEngine, NewsSource};
use news_brief::web::{run_server, AppState};
use std::error::Error;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);
    let engine = NewsEngine::new()?;
    let source = NewsSource::select(settings.credentials.clone());

    log::info!("Using {} ({})", source.source().name, source.source().source_type);

    match cli.command() {
        Command::Console => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            chat_loop(&engine, &source, settings.limit, stdin, &mut stdout).await?;
        }
        Command::Serve { host, port } => {
            let addr = bind_addr(&host, port)?;
            run_server(addr, AppState::new(engine, source, settings.limit)).await?;
        }
    }

    Ok(())
}
