//! In-memory question bank: the data model, the store, the answer-set editor
//! and the listing/creating/editing flow around them.

pub mod draft;
pub mod question;
pub mod samples;
pub mod session;
pub mod store;

pub use draft::{AnswerSlot, QuestionDraft, MIN_ANSWERS};
pub use question::{Answer, AnswerId, Draft, Question, QuestionId};
pub use session::{DeletePrompt, Session, View};
pub use store::QuestionBank;
