use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use teloxide::types::ChatId;
use tracing::debug;

use crate::bank::{samples::starter_questions, QuestionBank, Session};

/// Access to the per-chat sessions handlers work against.
pub trait Sessions {
    /// Runs `f` on the session of `chat`, opening one first if needed.
    fn with_session<R>(&self, chat: ChatId, f: impl FnOnce(&mut Session) -> R) -> R;
}

/// Every chat gets its own session; nothing is shared between chats.
#[derive(Debug, Default)]
pub struct Library {
    sessions: Mutex<HashMap<ChatId, Session>>,
    seed_samples: bool,
}

impl Library {
    pub fn new(seed_samples: bool) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            seed_samples,
        }
    }

    fn open(&self, chat: ChatId) -> Session {
        debug!(%chat, seeded = self.seed_samples, "Opening session");
        if self.seed_samples {
            Session::new(QuestionBank::with_questions(starter_questions()))
        } else {
            Session::default()
        }
    }
}

impl Sessions for Library {
    fn with_session<R>(&self, chat: ChatId, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.entry(chat).or_insert_with(|| self.open(chat));
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Draft;

    #[test]
    fn seeded_sessions_start_with_starter_questions() {
        let library = Library::new(true);
        let count = library.with_session(ChatId(1), |s| s.bank().len());
        assert_eq!(count, 3);

        let empty = Library::new(false);
        assert!(empty.with_session(ChatId(1), |s| s.bank().is_empty()));
    }

    #[test]
    fn chats_do_not_share_banks() {
        let library = Library::new(false);
        library.with_session(ChatId(1), |s| {
            s.start_create();
            s.save(Draft::new("Mine?", vec![]));
        });

        assert_eq!(library.with_session(ChatId(1), |s| s.bank().len()), 1);
        assert_eq!(library.with_session(ChatId(2), |s| s.bank().len()), 0);
    }
}
