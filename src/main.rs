use std::{error::Error, process::ExitCode, sync::Arc};

use dotenvy::dotenv;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use zooquizbot::{
    commands::Command,
    config::BotConfig,
    content::{ContentStore, RetrieveContent},
    engine::QuizEngine,
    router::Router,
    schema::schema,
    state::QuizState,
    telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init_tracing(&config.log_level) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Bot failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: BotConfig) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let store = ContentStore::new(&config.content_dir);
    let content = store.load()?;
    info!(
        dir = %store.dir().display(),
        animals = content.animals().len(),
        questions = content.questions().len(),
        "Content loaded"
    );

    let router = Arc::new(Router::new(
        QuizEngine::new(Arc::new(content)),
        config.links.clone(),
    ));

    let bot = Bot::new(&config.token);
    info!("Starting bot...");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register commands: {}", e);
    }

    if let Some(admin) = config.admin_chat_id {
        if let Err(e) = bot.send_message(admin, "🦁 Бот викторины запущен").await {
            warn!("Failed to notify admin {}: {}", admin, e);
        }
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![InMemStorage::<QuizState>::new(), router])
        // sessions are per user, so one user's updates must not run concurrently
        .distribution_function(|upd| upd.from().map(|user| user.id))
        .enable_ctrlc_handler()
        .build();

    match config.webhook {
        Some(webhook) => {
            info!("Listening for updates on {}", webhook.addr);
            let listener = webhooks::axum(bot, Options::new(webhook.addr, webhook.url)).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        }
        None => dispatcher.dispatch().await,
    }

    Ok(())
}
