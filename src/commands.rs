use std::sync::Arc;

use teloxide::{
    payloads::SendMessageSetters, prelude::Requester, types::Message, utils::command::BotCommands,
    Bot,
};
use tracing::{info, instrument};

use crate::{
    keyboard::listing_keyboard, library::Sessions, listing::show_questions, state::BankState,
    HandlerResult, UserDialogue,
};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "display help.")]
    Help,
    #[command(description = "open the question bank.")]
    Start,
    #[command(description = "drop the current edit and go back to the question list.")]
    Cancel,
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn start<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    library: Arc<S>,
) -> HandlerResult {
    info!(chat = %msg.chat.id, "Opening question bank");
    library.with_session(msg.chat.id, |session| {
        session.cancel();
        session.cancel_delete();
    });
    dialogue.update(BankState::Listing).await?;
    bot.send_message(msg.chat.id, "Welcome to QuizMaster! What do you want to do?")
        .reply_markup(listing_keyboard())
        .await?;
    show_questions(&bot, msg.chat.id, library.as_ref()).await
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn cancel<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    library: Arc<S>,
) -> HandlerResult {
    library.with_session(msg.chat.id, |session| {
        session.cancel();
        session.cancel_delete();
    });
    dialogue.update(BankState::Listing).await?;
    bot.send_message(msg.chat.id, "Cancelled. Back to your questions.")
        .reply_markup(listing_keyboard())
        .await?;
    Ok(())
}
