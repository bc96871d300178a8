use std::{net::TcpListener, sync::Arc, time::Duration};

use env_logger::Env;
use sitefinder::{
    configuration::get_configuration,
    services::{DirectoryClient, LangSearchClient, ReconciliationPipeline, WebsiteChecker},
    startup::run,
};
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let connection_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(configuration.database.connect_options())
        .await
        .expect("Failed to open the company database.");
    sqlx::migrate!()
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the company database.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let search_client =
        LangSearchClient::new(&configuration.search).expect("Failed to set up the search client.");
    let directory_client = DirectoryClient::new(&configuration.directory)
        .expect("Failed to set up the directory client.");
    let pipeline = ReconciliationPipeline::new(WebsiteChecker::new(Arc::new(search_client)));

    log::info!(
        "Checking at most {} companies per run with {} search calls, {} ms apart",
        configuration
            .reconciliation
            .max_companies
            .map_or("all".to_string(), |n| n.to_string()),
        configuration.reconciliation.call_limit,
        configuration.reconciliation.min_delay_ms
    );

    run(
        listener,
        connection_pool,
        directory_client,
        pipeline,
        configuration.reconciliation,
    )?
    .await
}
