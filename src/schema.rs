use std::error::Error;

use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        DpHandlerDescription, UpdateFilterExt, UpdateHandler,
    },
    dptree::{self, Handler},
    prelude::DependencyMap,
    types::Update,
};
use tracing::{debug, instrument};

use crate::{
    commands::{cancel, help, start, Command},
    editor,
    library::Library,
    listing,
    state::BankState,
};

pub fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Start].endpoint(start::<Library>))
        .branch(case![Command::Cancel].endpoint(cancel::<Library>));

    let handler = Update::filter_message()
        .branch(command_handler)
        .branch(listing_scheme())
        .branch(editor_scheme());

    dialogue::enter::<Update, InMemStorage<BankState>, BankState, _>()
        .branch(handler)
        .branch(callback_query_scheme())
}

#[instrument(level = "debug")]
fn listing_scheme(
) -> Handler<'static, DependencyMap, Result<(), Box<dyn Error + Send + Sync + 'static>>, DpHandlerDescription>
{
    use dptree::case;
    debug!("Building dispatching tree for listing");
    Update::filter_message()
        .branch(case![BankState::Listing].endpoint(listing::handle_listing::<Library>))
        .branch(
            case![BankState::ReceiveSearchQuery]
                .endpoint(listing::receive_search_query::<Library>),
        )
        .branch(case![BankState::ConfirmDelete].endpoint(listing::confirm_delete::<Library>))
}

#[instrument(level = "debug")]
fn editor_scheme(
) -> Handler<'static, DependencyMap, Result<(), Box<dyn Error + Send + Sync + 'static>>, DpHandlerDescription>
{
    use dptree::case;
    debug!("Building dispatching tree for editor");
    Update::filter_message()
        .branch(case![BankState::Composing { draft }].endpoint(editor::compose::<Library>))
        .branch(
            case![BankState::ReceiveQuestionText { draft }]
                .endpoint(editor::receive_question_text::<Library>),
        )
        .branch(
            case![BankState::ReceiveAnswerText { draft, answer }]
                .endpoint(editor::receive_answer_text::<Library>),
        )
        .branch(
            case![BankState::SelectAnswer { draft, action }]
                .endpoint(editor::select_answer::<Library>),
        )
}

#[instrument(level = "debug")]
fn callback_query_scheme(
) -> Handler<'static, DependencyMap, Result<(), Box<dyn Error + Send + Sync + 'static>>, DpHandlerDescription>
{
    use dptree::case;
    debug!("Building dispatching tree for card buttons");
    Update::filter_callback_query()
        .branch(case![BankState::Listing].endpoint(listing::handle_card_action::<Library>))
        .endpoint(listing::card_action_elsewhere)
}
