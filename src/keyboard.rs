use std::str::FromStr;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::bank::{QuestionDraft, QuestionId};

pub(crate) const CREATE: &str = "Create question➕";
pub(crate) const SEARCH: &str = "Search🔍";
pub(crate) const CLEAR_SEARCH: &str = "Clear search";
pub(crate) const SHOW: &str = "Show questions📋";

pub(crate) const EDIT_TEXT: &str = "Edit text";
pub(crate) const ADD_ANSWER: &str = "Add answer";
pub(crate) const EDIT_ANSWER: &str = "Edit answer";
pub(crate) const MARK_CORRECT: &str = "Mark correct";
pub(crate) const REMOVE_ANSWER: &str = "Remove answer";
pub(crate) const SAVE: &str = "Save💾";
pub(crate) const CANCEL: &str = "Cancel";

pub(crate) fn is_yes(text: &str) -> bool {
    matches!(text, "Yes" | "Yes✔️")
}

pub(crate) fn is_no(text: &str) -> bool {
    matches!(text, "No" | "No❌")
}

pub(crate) fn yes_no_keyboard() -> KeyboardMarkup {
    let keyboard: Vec<Vec<KeyboardButton>> = vec![vec![
        KeyboardButton::new("Yes✔️"),
        KeyboardButton::new("No❌"),
    ]];

    KeyboardMarkup::new(keyboard)
}

pub(crate) fn listing_keyboard() -> KeyboardMarkup {
    let keyboard = vec![
        vec![KeyboardButton::new(CREATE)],
        vec![KeyboardButton::new(SEARCH), KeyboardButton::new(CLEAR_SEARCH)],
        vec![KeyboardButton::new(SHOW)],
    ];

    KeyboardMarkup::new(keyboard)
}

/// The remove button is only offered while a slot can actually be removed.
pub(crate) fn editor_keyboard(draft: &QuestionDraft) -> KeyboardMarkup {
    let mut answer_row = vec![
        KeyboardButton::new(EDIT_ANSWER),
        KeyboardButton::new(MARK_CORRECT),
    ];
    if draft.can_remove() {
        answer_row.push(KeyboardButton::new(REMOVE_ANSWER));
    }

    let keyboard = vec![
        vec![KeyboardButton::new(EDIT_TEXT), KeyboardButton::new(ADD_ANSWER)],
        answer_row,
        vec![KeyboardButton::new(SAVE), KeyboardButton::new(CANCEL)],
    ];

    KeyboardMarkup::new(keyboard)
}

pub(crate) fn slots_keyboard(draft: &QuestionDraft) -> KeyboardMarkup {
    let keyboard = draft
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let label = if slot.text().is_empty() {
                format!("{}. (empty)", i + 1)
            } else {
                format!("{}. {}", i + 1, slot.text())
            };
            vec![KeyboardButton::new(label)]
        });

    KeyboardMarkup::new(keyboard)
}

/// Zero-based slot index from a reply such as "2. Paris" or "2".
pub(crate) fn parse_slot_choice(text: &str) -> Option<usize> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<usize>().ok()?.checked_sub(1)
}

/// Inline button press on a question card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardAction {
    Edit(QuestionId),
    Delete(QuestionId),
}

impl CardAction {
    pub(crate) fn callback_data(&self) -> String {
        match self {
            CardAction::Edit(id) => format!("edit:{id}"),
            CardAction::Delete(id) => format!("delete:{id}"),
        }
    }
}

impl FromStr for CardAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, id) = s.split_once(':').ok_or(())?;
        let id = id.parse::<QuestionId>().map_err(|_| ())?;
        match action {
            "edit" => Ok(CardAction::Edit(id)),
            "delete" => Ok(CardAction::Delete(id)),
            _ => Err(()),
        }
    }
}

pub(crate) fn card_keyboard(id: &QuestionId) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Edit✏️", CardAction::Edit(*id).callback_data()),
        InlineKeyboardButton::callback("Delete🗑️", CardAction::Delete(*id).callback_data()),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_choice_reads_leading_number() {
        assert_eq!(parse_slot_choice("1. Rome"), Some(0));
        assert_eq!(parse_slot_choice(" 3 "), Some(2));
        assert_eq!(parse_slot_choice("12. (empty)"), Some(11));
        assert_eq!(parse_slot_choice("0"), None);
        assert_eq!(parse_slot_choice("Rome"), None);
    }

    #[test]
    fn card_actions_survive_callback_data() {
        let id = QuestionId::generate();
        for action in [CardAction::Edit(id), CardAction::Delete(id)] {
            let data = action.callback_data();
            assert!(data.len() <= 64);
            assert_eq!(data.parse::<CardAction>(), Ok(action));
        }
    }

    #[test]
    fn malformed_callback_data_is_rejected() {
        assert!("edit".parse::<CardAction>().is_err());
        assert!("edit:42".parse::<CardAction>().is_err());
        assert!(format!("rename:{}", QuestionId::generate())
            .parse::<CardAction>()
            .is_err());
    }

    #[test]
    fn remove_button_follows_slot_count() {
        let mut draft = QuestionDraft::new();
        let labels = |markup: &KeyboardMarkup| -> Vec<String> {
            markup
                .keyboard
                .iter()
                .flatten()
                .map(|button| button.text.clone())
                .collect()
        };
        assert!(!labels(&editor_keyboard(&draft)).contains(&REMOVE_ANSWER.to_owned()));

        draft.add_answer();
        assert!(labels(&editor_keyboard(&draft)).contains(&REMOVE_ANSWER.to_owned()));
    }

    #[test]
    fn yes_and_no_accept_plain_and_decorated_replies() {
        assert!(is_yes("Yes") && is_yes("Yes✔️"));
        assert!(is_no("No") && is_no("No❌"));
        assert!(!is_yes("No") && !is_no("maybe"));
    }
}
