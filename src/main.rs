use std::{net::TcpListener, sync::Arc};

use env_logger::Env;
use sqlx::postgres::PgPoolOptions;
use trailmix::{
    configuration::get_configuration,
    dal::PgChatStore,
    domain::{default_sources, validate_sources},
    routes::RevalidationWindow,
    services::{DealScraper, HttpPageFetcher, OpenaiClient, SupabaseAuth},
    startup::{run, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let connection_pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect_lazy_with(configuration.database.with_db());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    let sources = default_sources();
    validate_sources(&sources)?;

    let fetcher = HttpPageFetcher::new(configuration.deals.timeout())?;
    let openai_client = OpenaiClient::new(configuration.api_keys.openai)
        .with_model(configuration.chat.model)
        .with_system_prompt(configuration.chat.system_prompt);
    let supabase = SupabaseAuth::new(
        configuration.supabase.url,
        configuration.supabase.anon_key,
    );

    let state = AppState {
        deals: DealScraper::new(Arc::new(fetcher), sources),
        revalidation: RevalidationWindow(configuration.deals.revalidate()),
        chat: Arc::new(openai_client),
        sessions: Arc::new(supabase),
        store: Arc::new(PgChatStore::new(connection_pool)),
    };

    run(listener, state)?.await?;
    Ok(())
}
