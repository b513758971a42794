use std::{error::Error, sync::Arc};

use teloxide::{
    dispatching::{
        dialogue::{GetChatId, InMemStorage},
        UpdateFilterExt, UpdateHandler,
    },
    dptree,
    prelude::*,
    types::{CallbackQuery, Message, ParseMode, Update},
    ApiError, RequestError,
};
use tracing::{debug, info, instrument};

use crate::{
    action::Action,
    commands::{cancel, first_name, help, start, Command},
    keyboard::render_keyboard,
    render::{self, Render},
    router::Router,
    state::{user_dialogue, QuizState},
    HandlerResult,
};

pub fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Cancel].endpoint(cancel));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .endpoint(invalid_input);

    let callback_handler = Update::filter_callback_query().endpoint(take_action);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

#[instrument(level = "info", skip_all, fields(user = ?q.from.id, chat = ?q.chat_id(), data = ?q.data))]
async fn take_action(
    bot: Bot,
    q: CallbackQuery,
    storage: Arc<InMemStorage<QuizState>>,
    router: Arc<Router>,
) -> HandlerResult {
    bot.answer_callback_query(&q.id).await?;

    let action = match q.data.as_deref().map(str::parse::<Action>) {
        Some(Ok(action)) => action,
        Some(Err(e)) => {
            debug!("Ignoring callback: {}", e);
            return Ok(());
        }
        None => return Ok(()),
    };

    let dialogue = user_dialogue(storage, q.from.id);
    let state = dialogue.get_or_default().await?;
    let outcome = router.handle(action, &state, &q.from.first_name)?;

    if let Some(state) = outcome.state {
        dialogue.update(state).await?;
    }
    if let Some(render) = outcome.render {
        deliver(&bot, &q, &render).await?;
    }

    Ok(())
}

/// Replaces the message carrying the pressed button, or sends a new one if it is gone.
async fn deliver(bot: &Bot, q: &CallbackQuery, render: &Render) -> HandlerResult {
    let Some(chat_id) = q.chat_id() else {
        return Ok(());
    };

    let sent = match &q.message {
        Some(message) => bot
            .edit_message_text(chat_id, message.id(), render.text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(render_keyboard(render))
            .await
            .map(|_| ()),
        None => bot
            .send_message(chat_id, render.text.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(render_keyboard(render))
            .await
            .map(|_| ()),
    };

    match sent {
        Err(RequestError::Api(ApiError::MessageNotModified)) => {
            debug!("Message already shows this screen");
            Ok(())
        }
        other => Ok(other?),
    }
}

async fn invalid_input(bot: Bot, msg: Message) -> HandlerResult {
    info!(
        "{}: unrecognized input {:?}",
        first_name(&msg),
        msg.text()
    );
    bot.send_message(msg.chat.id, render::unrecognized().text)
        .await?;
    Ok(())
}
