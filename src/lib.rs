use state::QuizState;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::Dialogue};

pub mod action;
pub mod commands;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod keyboard;
pub mod render;
pub mod router;
pub mod schema;
pub mod state;
pub mod telemetry;

type UserDialogue = Dialogue<QuizState, InMemStorage<QuizState>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
