use tracing::{debug, info, instrument, warn};

use crate::{
    action::Action,
    content::Animal,
    engine::{Prompt, QuizEngine, Session},
    error::QuizError,
    render::{self, Links, Render},
    state::QuizState,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    // render: None means the action is ignored, state: None keeps what is stored
    pub render: Option<Render>,
    pub state: Option<QuizState>,
}

impl Outcome {
    fn show(render: Render) -> Self {
        Self {
            render: Some(render),
            state: None,
        }
    }

    fn transition(render: Render, state: QuizState) -> Self {
        Self {
            render: Some(render),
            state: Some(state),
        }
    }

    fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    engine: QuizEngine,
    links: Links,
}

impl Router {
    pub fn new(engine: QuizEngine, links: Links) -> Self {
        Self { engine, links }
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn welcome(&self, first_name: &str) -> Render {
        render::welcome(first_name)
    }

    #[instrument(level = "debug", skip(self, state))]
    pub fn handle(
        &self,
        action: Action,
        state: &QuizState,
        first_name: &str,
    ) -> Result<Outcome, QuizError> {
        let outcome = match action {
            Action::BeginQuiz | Action::Restart => self.advance(self.engine.start_quiz())?,
            Action::Answer(answer_idx) => match state {
                QuizState::InProgress { session } => self.answer(session, answer_idx)?,
                _ => {
                    debug!("Answer #{} outside of a running quiz, ignoring", answer_idx);
                    Outcome::ignored()
                }
            },
            Action::ShareResult => match stored_result(state) {
                Some(animal) => Outcome::show(render::share(animal, &self.links)),
                None => Outcome::show(render::redo_quiz()),
            },
            Action::BackToResult => match stored_result(state) {
                Some(animal) => Outcome::show(render::result(animal)),
                None => Outcome::show(render::redo_quiz()),
            },
            Action::Guardian => {
                Outcome::show(render::guardian(stored_result(state), &self.links))
            }
            Action::About => Outcome::show(render::about(&self.links)),
            Action::Contact => Outcome::show(render::contact()),
            Action::BackToStart => Outcome::show(self.welcome(first_name)),
        };

        Ok(outcome)
    }

    fn answer(&self, session: &Session, answer_idx: usize) -> Result<Outcome, QuizError> {
        let mut session = session.clone();
        match session.record_answer(answer_idx) {
            Ok(()) => self.advance(session),
            Err(e @ QuizError::AnswerOutOfRange { .. }) => {
                warn!(session = %session.id(), "Rejected answer: {}", e);
                Ok(match session.current_prompt() {
                    Prompt::Question {
                        number,
                        total,
                        question,
                    } => Outcome::show(render::question(
                        number,
                        total,
                        question,
                        Some("Такого варианта ответа нет, выберите один из предложенных."),
                    )),
                    Prompt::Finished => Outcome::ignored(),
                })
            }
            Err(e) => {
                debug!(session = %session.id(), "Ignoring answer: {}", e);
                Ok(Outcome::ignored())
            }
        }
    }

    /// Shows the next question, or completes the session when none is left.
    fn advance(&self, mut session: Session) -> Result<Outcome, QuizError> {
        if let Prompt::Question {
            number,
            total,
            question,
        } = session.current_prompt()
        {
            debug!(session = %session.id(), "Asking question #{}: {}", number, question);
            let render = render::question(number, total, question, None);
            return Ok(Outcome::transition(
                render,
                QuizState::InProgress { session },
            ));
        }

        let render = render::result(self.engine.compute_result(&mut session)?);
        info!(session = %session.id(), score = session.score(), "Result shown");
        Ok(Outcome::transition(
            render,
            QuizState::Completed { session },
        ))
    }
}

fn stored_result(state: &QuizState) -> Option<&Animal> {
    match state {
        QuizState::Completed { session } => session.selected(),
        _ => None,
    }
}
