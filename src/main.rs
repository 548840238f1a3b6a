use std::{error::Error, sync::Arc};

use quizmaster::{config::Config, library::Library, schema::schema, state::BankState};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    error_handlers::IgnoringErrorHandlerSafe,
    prelude::*,
    update_listeners::webhooks::{self, Options},
};
use tracing::{info, level_filters::LevelFilter};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from_level(config.log_level))
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    // teloxide logs through `log`
    LogTracer::init()?;

    let bot = Bot::new(&config.token);
    let library = Arc::new(Library::new(config.seed_samples));
    info!(seed_samples = config.seed_samples, "Starting bot...");

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![InMemStorage::<BankState>::new(), library])
        .enable_ctrlc_handler()
        .build();

    match config.webhook {
        Some(webhook) => {
            info!(addr = %webhook.addr, url = %webhook.url, "Listening for webhook updates");
            let listener = webhooks::axum(bot, Options::new(webhook.addr, webhook.url)).await?;
            dispatcher
                .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
                .await
        }
        None => dispatcher.dispatch().await,
    }

    Ok(())
}
