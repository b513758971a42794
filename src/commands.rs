use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::InMemStorage,
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{Message, ParseMode},
    utils::command::BotCommands,
    Bot,
};
use tracing::{info, instrument};

use crate::{
    keyboard::render_keyboard,
    render,
    router::Router,
    state::{user_dialogue, QuizState},
    HandlerResult,
};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "open the main menu.")]
    Start,
    #[command(description = "display help.")]
    Help,
    #[command(description = "reset the current quiz.")]
    Cancel,
}

pub(crate) fn first_name(msg: &Message) -> &str {
    msg.from
        .as_ref()
        .map(|user| user.first_name.as_str())
        .unwrap_or_default()
}

#[instrument(level = "info", skip_all, fields(chat = %msg.chat.id))]
pub(crate) async fn start(bot: Bot, msg: Message, router: Arc<Router>) -> HandlerResult {
    let welcome = router.welcome(first_name(&msg));
    bot.send_message(msg.chat.id, welcome.text.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(render_keyboard(&welcome))
        .await?;
    Ok(())
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

#[instrument(level = "info", skip_all, fields(chat = %msg.chat.id))]
pub(crate) async fn cancel(
    bot: Bot,
    msg: Message,
    storage: Arc<InMemStorage<QuizState>>,
) -> HandlerResult {
    if let Some(user) = &msg.from {
        info!(user = ?user.id, "Discarding quiz session");
        user_dialogue(storage, user.id).update(QuizState::Idle).await?;
    }
    bot.send_message(msg.chat.id, render::cancelled().text)
        .await?;
    Ok(())
}
