use std::sync::Arc;

use teloxide::{
    payloads::{AnswerCallbackQuerySetters, SendMessageSetters},
    prelude::Requester,
    types::{CallbackQuery, ChatId, Message, ReplyMarkup},
    Bot,
};
use tracing::{info, instrument, warn};

use crate::{
    bank::{Question, QuestionDraft, QuestionId, Session},
    editor::send_editor,
    keyboard::{self, card_keyboard, listing_keyboard, yes_no_keyboard, CardAction},
    library::Sessions,
    message::truncate,
    state::BankState,
    HandlerResult, UserDialogue,
};

/// "3 questions in your library", plus the active search if there is one.
pub(crate) fn library_header(total: usize, query: &str) -> String {
    let noun = if total == 1 { "question" } else { "questions" };
    if query.is_empty() {
        format!("{total} {noun} in your library")
    } else {
        format!("{total} {noun} in your library, searching for '{query}'")
    }
}

fn card_text(question: &Question) -> String {
    truncate(question.to_string())
}

/// Opens a blank draft. The dialogue sits in the listing whenever this runs,
/// so a view left over from an interrupted edit is dropped first.
pub(crate) fn begin_create(session: &mut Session) -> QuestionDraft {
    session.cancel();
    session.start_create();
    QuestionDraft::new()
}

/// Opens `id` for editing, dropping any leftover view first.
pub(crate) fn begin_edit(session: &mut Session, id: &QuestionId) -> Option<QuestionDraft> {
    session.cancel();
    session.start_edit(id).map(QuestionDraft::from_question)
}

/// Sends the header followed by one card per question matching the current search.
pub(crate) async fn show_questions<S: Sessions>(
    bot: &Bot,
    chat: ChatId,
    library: &S,
) -> HandlerResult {
    let (header, cards, empty) = library.with_session(chat, |session| {
        let bank = session.bank();
        let cards: Vec<(QuestionId, String)> = bank
            .visible()
            .into_iter()
            .map(|q| (*q.id(), card_text(q)))
            .collect();
        let header = truncate(library_header(bank.len(), bank.query()));
        (header, cards, bank.is_empty())
    });

    if empty {
        bot.send_message(
            chat,
            "No questions yet. Get started by creating your first question and build your question bank for quizzes, tests, or practice.",
        )
        .reply_markup(listing_keyboard())
        .await?;
        return Ok(());
    }

    bot.send_message(chat, header)
        .reply_markup(listing_keyboard())
        .await?;
    if cards.is_empty() {
        bot.send_message(chat, "No questions match your search.")
            .await?;
    }
    for (id, card) in cards {
        bot.send_message(chat, card)
            .reply_markup(card_keyboard(&id))
            .await?;
    }

    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn handle_listing<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    library: Arc<S>,
) -> HandlerResult {
    match msg.text() {
        Some(keyboard::CREATE) => {
            info!(chat = %msg.chat.id, "Creating a new question");
            let draft = library.with_session(msg.chat.id, begin_create);
            dialogue
                .update(BankState::Composing {
                    draft: draft.clone(),
                })
                .await?;
            send_editor(&bot, msg.chat.id, library.as_ref(), &draft).await?;
        }
        Some(keyboard::SEARCH) => {
            dialogue.update(BankState::ReceiveSearchQuery).await?;
            bot.send_message(msg.chat.id, "What are you looking for?")
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
        Some(keyboard::CLEAR_SEARCH) => {
            library.with_session(msg.chat.id, |session| session.set_query(""));
            show_questions(&bot, msg.chat.id, library.as_ref()).await?;
        }
        Some(keyboard::SHOW) => {
            show_questions(&bot, msg.chat.id, library.as_ref()).await?;
        }
        other => {
            warn!(chat = %msg.chat.id, "Invalid listing input {:?}", other);
            bot.send_message(msg.chat.id, "Invalid input. Please choose an action.")
                .reply_markup(listing_keyboard())
                .await?;
        }
    }

    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn receive_search_query<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    library: Arc<S>,
) -> HandlerResult {
    match msg.text() {
        Some(query) => {
            info!(chat = %msg.chat.id, query, "Searching questions");
            library.with_session(msg.chat.id, |session| session.set_query(query));
            dialogue.update(BankState::Listing).await?;
            show_questions(&bot, msg.chat.id, library.as_ref()).await?;
        }
        None => {
            bot.send_message(msg.chat.id, "Please, send the text to search for.")
                .await?;
        }
    }

    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn confirm_delete<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    library: Arc<S>,
) -> HandlerResult {
    match msg.text() {
        Some(text) if keyboard::is_yes(text) => {
            let deleted = library.with_session(msg.chat.id, |session| session.confirm_delete());
            dialogue.update(BankState::Listing).await?;
            match deleted {
                Some(id) => {
                    info!(chat = %msg.chat.id, %id, "Question deleted");
                    bot.send_message(msg.chat.id, "Question deleted.").await?;
                }
                None => {
                    warn!(chat = %msg.chat.id, "Nothing to delete");
                    bot.send_message(msg.chat.id, "That question no longer exists.")
                        .await?;
                }
            }
        }
        Some(text) if keyboard::is_no(text) => {
            library.with_session(msg.chat.id, |session| session.cancel_delete());
            dialogue.update(BankState::Listing).await?;
            bot.send_message(msg.chat.id, "OK. Nothing was deleted.")
                .await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Please enter a valid answer: Yes or No.")
                .reply_markup(yes_no_keyboard())
                .await?;
            return Ok(());
        }
    }

    show_questions(&bot, msg.chat.id, library.as_ref()).await
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn handle_card_action<S: Sessions>(
    bot: Bot,
    q: CallbackQuery,
    dialogue: UserDialogue,
    library: Arc<S>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;
    let chat = dialogue.chat_id();

    let Some(action) = q.data.as_deref().and_then(|data| data.parse::<CardAction>().ok()) else {
        warn!(%chat, data = ?q.data, "Unknown card action");
        return Ok(());
    };

    match action {
        CardAction::Edit(id) => {
            let draft = library.with_session(chat, |session| begin_edit(session, &id));
            match draft {
                Some(draft) => {
                    info!(%chat, %id, "Editing question");
                    dialogue
                        .update(BankState::Composing {
                            draft: draft.clone(),
                        })
                        .await?;
                    send_editor(&bot, chat, library.as_ref(), &draft).await?;
                }
                None => {
                    bot.send_message(chat, "That question no longer exists.")
                        .await?;
                    show_questions(&bot, chat, library.as_ref()).await?;
                }
            }
        }
        CardAction::Delete(id) => {
            info!(%chat, %id, "Asking to confirm delete");
            library.with_session(chat, |session| session.request_delete(&id));
            dialogue.update(BankState::ConfirmDelete).await?;
            bot.send_message(
                chat,
                "Are you sure you want to delete this question? This action cannot be undone.",
            )
            .reply_markup(yes_no_keyboard())
            .await?;
        }
    }

    Ok(())
}

/// Card buttons only act from the question list.
#[instrument(level = "info", skip(bot))]
pub(crate) async fn card_action_elsewhere(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(q.id.clone())
        .text("Finish or /cancel what you are doing first.")
        .await?;
    Ok(())
}
