use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::InMemStorage,
    types::{ChatId, UserId},
};

use crate::{engine::Session, UserDialogue};

/// Per-user dialogue state kept in the dispatcher's storage.
///
/// Begin/restart overwrite whatever is stored, `/cancel` drops back to `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizState {
    #[default]
    Idle,
    InProgress {
        session: Session,
    },
    Completed {
        session: Session,
    },
}

impl QuizState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            QuizState::Idle => None,
            QuizState::InProgress { session } | QuizState::Completed { session } => Some(session),
        }
    }
}

// Storage is keyed by the user, so members of one group chat never share a session.
pub(crate) fn user_dialogue(
    storage: Arc<InMemStorage<QuizState>>,
    user: UserId,
) -> UserDialogue {
    UserDialogue::new(storage, ChatId(user.0 as i64))
}
