use tracing::{debug, warn};

use super::question::{Draft, Question, QuestionId};
use super::store::QuestionBank;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Listing,
    Creating,
    Editing {
        question: QuestionId,
    },
}

impl View {
    pub fn heading(&self) -> &'static str {
        match self {
            View::Listing => "Questions",
            View::Creating => "Create New Question",
            View::Editing { .. } => "Edit Question",
        }
    }
}

/// Delete confirmation. Cancelling hides the prompt but keeps the pending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletePrompt {
    pending: Option<QuestionId>,
    shown: bool,
}

impl DeletePrompt {
    pub fn pending(&self) -> Option<&QuestionId> {
        self.pending.as_ref()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

/// One bank plus the view it is being looked at through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    bank: QuestionBank,
    view: View,
    delete: DeletePrompt,
}

impl Session {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            view: View::Listing,
            delete: DeletePrompt::default(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn delete_prompt(&self) -> &DeletePrompt {
        &self.delete
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.bank.set_query(query);
    }

    pub fn start_create(&mut self) {
        if self.view == View::Listing {
            self.view = View::Creating;
        }
    }

    /// Opens `id` for editing. Stays in the listing when the id does not resolve.
    pub fn start_edit(&mut self, id: &QuestionId) -> Option<&Question> {
        if self.view != View::Listing {
            return None;
        }
        if self.bank.get(id).is_none() {
            warn!(%id, "Edit requested for unknown question");
            return None;
        }
        self.view = View::Editing { question: *id };
        self.bank.get(id)
    }

    /// The question under edit; falls back to the listing if it is gone.
    pub fn editing(&mut self) -> Option<&Question> {
        let View::Editing { question } = self.view else {
            return None;
        };
        if self.bank.get(&question).is_none() {
            warn!(%question, "Edited question no longer exists");
            self.view = View::Listing;
            return None;
        }
        self.bank.get(&question)
    }

    /// Creates or updates depending on the view, then returns to the listing.
    /// `None` when there was nothing to save into.
    pub fn save(&mut self, draft: Draft) -> Option<QuestionId> {
        let saved = match self.view {
            View::Listing => return None,
            View::Creating => self.bank.create(draft),
            View::Editing { question } => {
                self.editing()?;
                self.bank.update(&question, draft);
                question
            }
        };
        self.view = View::Listing;
        Some(saved)
    }

    pub fn cancel(&mut self) {
        self.view = View::Listing;
    }

    pub fn request_delete(&mut self, id: &QuestionId) {
        debug!(%id, "Delete requested");
        self.delete = DeletePrompt {
            pending: Some(*id),
            shown: true,
        };
    }

    /// Removes the pending question, if any, and clears the prompt.
    /// `Some` only when a question was actually removed.
    pub fn confirm_delete(&mut self) -> Option<QuestionId> {
        self.delete.shown = false;
        let id = self.delete.pending.take()?;
        if self.bank.get(&id).is_none() {
            warn!(%id, "Confirmed delete of unknown question");
            return None;
        }
        self.bank.remove(&id);
        Some(id)
    }

    pub fn cancel_delete(&mut self) {
        self.delete.shown = false;
    }
}
