use std::sync::Arc;

use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{ChatId, Message, ReplyMarkup},
    Bot,
};
use tracing::{info, instrument, warn};

use crate::{
    bank::{AnswerId, QuestionDraft},
    keyboard::{self, editor_keyboard, parse_slot_choice, slots_keyboard},
    library::Sessions,
    listing::show_questions,
    message,
    state::{BankState, SlotAction},
    HandlerResult, UserDialogue,
};

const TOO_LONG: &str = "That text is too long. Please send a shorter one.";

pub(crate) fn editor_text(heading: &str, draft: &QuestionDraft) -> String {
    format!("{heading}\n\n{draft}")
}

/// Whether the editor message for `draft` still fits in one Telegram message.
fn fits_editor<S: Sessions>(library: &S, chat: ChatId, draft: &QuestionDraft) -> bool {
    let heading = library.with_session(chat, |session| session.view().heading());
    message::fits(&editor_text(heading, draft))
}

/// Renders the draft under the heading of the current view, with the editor keyboard.
pub(crate) async fn send_editor<S: Sessions>(
    bot: &Bot,
    chat: ChatId,
    library: &S,
    draft: &QuestionDraft,
) -> HandlerResult {
    let heading = library.with_session(chat, |session| session.view().heading());
    bot.send_message(chat, message::truncate(editor_text(heading, draft)))
        .reply_markup(editor_keyboard(draft))
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn compose<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    mut draft: QuestionDraft,
    library: Arc<S>,
) -> HandlerResult {
    match msg.text() {
        Some(keyboard::EDIT_TEXT) => {
            dialogue
                .update(BankState::ReceiveQuestionText { draft })
                .await?;
            bot.send_message(msg.chat.id, "Enter your question here...")
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
        Some(keyboard::ADD_ANSWER) => {
            let answer = draft.add_answer();
            let prompt = format!("Answer option {}?", draft.slots().len());
            dialogue
                .update(BankState::ReceiveAnswerText { draft, answer })
                .await?;
            bot.send_message(msg.chat.id, prompt)
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
        }
        Some(keyboard::EDIT_ANSWER) => {
            select_slot(&bot, &msg, &dialogue, draft, SlotAction::EditText).await?;
        }
        Some(keyboard::MARK_CORRECT) => {
            select_slot(&bot, &msg, &dialogue, draft, SlotAction::MarkCorrect).await?;
        }
        Some(keyboard::REMOVE_ANSWER) if draft.can_remove() => {
            select_slot(&bot, &msg, &dialogue, draft, SlotAction::Remove).await?;
        }
        Some(keyboard::SAVE) => {
            let saved =
                library.with_session(msg.chat.id, |session| session.save(draft.into_draft()));
            dialogue.update(BankState::Listing).await?;
            match saved {
                Some(id) => {
                    info!(chat = %msg.chat.id, %id, "Question saved");
                    bot.send_message(msg.chat.id, "Question saved.").await?;
                }
                None => {
                    warn!(chat = %msg.chat.id, "Nothing to save the draft into");
                    bot.send_message(msg.chat.id, "That question no longer exists.")
                        .await?;
                }
            }
            show_questions(&bot, msg.chat.id, library.as_ref()).await?;
        }
        Some(keyboard::CANCEL) => {
            library.with_session(msg.chat.id, |session| session.cancel());
            dialogue.update(BankState::Listing).await?;
            show_questions(&bot, msg.chat.id, library.as_ref()).await?;
        }
        other => {
            warn!(chat = %msg.chat.id, "Invalid editor input {:?}", other);
            bot.send_message(msg.chat.id, "Invalid input. Please choose an action.")
                .reply_markup(editor_keyboard(&draft))
                .await?;
        }
    }

    Ok(())
}

async fn select_slot(
    bot: &Bot,
    msg: &Message,
    dialogue: &UserDialogue,
    draft: QuestionDraft,
    action: SlotAction,
) -> HandlerResult {
    let choices = slots_keyboard(&draft);
    dialogue
        .update(BankState::SelectAnswer { draft, action })
        .await?;
    bot.send_message(msg.chat.id, "Choose an answer option:")
        .reply_markup(choices)
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn receive_question_text<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    mut draft: QuestionDraft,
    library: Arc<S>,
) -> HandlerResult {
    match msg.text() {
        Some(text) => {
            let mut candidate = draft.clone();
            candidate.set_text(text);
            if !fits_editor(library.as_ref(), msg.chat.id, &candidate) {
                warn!(chat = %msg.chat.id, "Question text too long");
                bot.send_message(msg.chat.id, TOO_LONG).await?;
                return Ok(());
            }
            draft = candidate;
            dialogue
                .update(BankState::Composing {
                    draft: draft.clone(),
                })
                .await?;
            send_editor(&bot, msg.chat.id, library.as_ref(), &draft).await?;
        }
        None => {
            bot.send_message(msg.chat.id, "Please, send the question as text.")
                .await?;
        }
    }

    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn receive_answer_text<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    (mut draft, answer): (QuestionDraft, AnswerId),
    library: Arc<S>,
) -> HandlerResult {
    match msg.text() {
        Some(text) => {
            let mut candidate = draft.clone();
            candidate.set_answer_text(&answer, text);
            if !fits_editor(library.as_ref(), msg.chat.id, &candidate) {
                warn!(chat = %msg.chat.id, %answer, "Answer text too long");
                bot.send_message(msg.chat.id, TOO_LONG).await?;
                return Ok(());
            }
            draft = candidate;
            dialogue
                .update(BankState::Composing {
                    draft: draft.clone(),
                })
                .await?;
            send_editor(&bot, msg.chat.id, library.as_ref(), &draft).await?;
        }
        None => {
            bot.send_message(msg.chat.id, "Please, send the answer as text.")
                .await?;
        }
    }

    Ok(())
}

#[instrument(level = "info", skip(bot, dialogue, library))]
pub(crate) async fn select_answer<S: Sessions>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    (mut draft, action): (QuestionDraft, SlotAction),
    library: Arc<S>,
) -> HandlerResult {
    let slot = msg
        .text()
        .and_then(parse_slot_choice)
        .and_then(|index| draft.slot_at(index))
        .map(|slot| *slot.id());

    let Some(answer) = slot else {
        bot.send_message(msg.chat.id, "No such answer option. Try again.")
            .reply_markup(slots_keyboard(&draft))
            .await?;
        return Ok(());
    };

    match action {
        SlotAction::EditText => {
            dialogue
                .update(BankState::ReceiveAnswerText { draft, answer })
                .await?;
            bot.send_message(msg.chat.id, "What's the new answer text?")
                .reply_markup(ReplyMarkup::kb_remove())
                .await?;
            return Ok(());
        }
        SlotAction::MarkCorrect => draft.mark_correct(&answer),
        SlotAction::Remove => draft.remove_answer(&answer),
    }

    dialogue
        .update(BankState::Composing {
            draft: draft.clone(),
        })
        .await?;
    send_editor(&bot, msg.chat.id, library.as_ref(), &draft).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;

    #[test]
    fn editor_text_puts_heading_above_draft() {
        let draft = QuestionDraft::new();
        let text = editor_text("Create New Question", &draft);
        assert!(text.starts_with("Create New Question\n\n"));
        assert!(text.ends_with(&draft.to_string()));
    }

    #[test]
    fn oversized_question_text_does_not_fit_the_editor() {
        let library = Library::new(false);
        let chat = ChatId(7);
        library.with_session(chat, |session| session.start_create());

        let mut draft = QuestionDraft::new();
        draft.set_text("Capital of Italy?");
        assert!(fits_editor(&library, chat, &draft));

        draft.set_text("?".repeat(message::MESSAGE_LIMIT));
        assert!(!fits_editor(&library, chat, &draft));
    }

    #[test]
    fn oversized_answer_text_does_not_fit_the_editor() {
        let library = Library::new(false);
        let chat = ChatId(7);
        let mut draft = QuestionDraft::new();
        let answer = *draft.slots()[0].id();

        draft.set_answer_text(&answer, "Rome");
        assert!(fits_editor(&library, chat, &draft));

        draft.set_answer_text(&answer, "🏛".repeat(message::MESSAGE_LIMIT / 2));
        assert!(!fits_editor(&library, chat, &draft));
    }
}
