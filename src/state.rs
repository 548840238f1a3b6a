use crate::bank::{AnswerId, QuestionDraft};

/// What an answer picked from the slot keyboard is about to have done to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    EditText,
    MarkCorrect,
    Remove,
}

#[derive(Debug, Clone, Default)]
pub enum BankState {
    // PART FOR --- LISTING ---
    #[default]
    Listing,
    ReceiveSearchQuery,
    ConfirmDelete,

    // PART FOR --- EDITING ---
    Composing {
        draft: QuestionDraft,
    },
    ReceiveQuestionText {
        draft: QuestionDraft,
    },
    ReceiveAnswerText {
        draft: QuestionDraft,
        answer: AnswerId,
    },
    SelectAnswer {
        draft: QuestionDraft,
        action: SlotAction,
    },
}
