use state::BankState;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::Dialogue};

pub mod bank;
pub mod config;
pub mod library;
pub mod schema;
pub mod state;

mod commands;
mod editor;
mod keyboard;
mod listing;
mod message;

type UserDialogue = Dialogue<BankState, InMemStorage<BankState>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
