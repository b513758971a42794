use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    content::{Animal, Content, Question},
    error::QuizError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    Question {
        number: usize,
        total: usize,
        question: &'a Question,
    },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStatus<'a> {
    InProgress(usize),
    Completed(&'a Animal),
}

/// One user's run through the quiz.
///
/// `current_idx == collected_answers.len()` holds between actions, so the index is
/// derived from the answers instead of being stored twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    question_set: Arc<[Question]>,
    collected_answers: Vec<usize>,
    selected: Option<Animal>,
}

impl Session {
    pub fn new(question_set: Arc<[Question]>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_set,
            collected_answers: vec![],
            selected: None,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn question_set(&self) -> &[Question] {
        &self.question_set
    }

    pub fn current_idx(&self) -> usize {
        self.collected_answers.len()
    }

    pub fn collected_answers(&self) -> &[usize] {
        &self.collected_answers
    }

    pub fn selected(&self) -> Option<&Animal> {
        self.selected.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.current_idx() >= self.question_set.len()
    }

    pub fn status(&self) -> QuizStatus<'_> {
        match &self.selected {
            Some(animal) => QuizStatus::Completed(animal),
            None => QuizStatus::InProgress(self.current_idx()),
        }
    }

    pub fn current_prompt(&self) -> Prompt<'_> {
        match self.question_set.get(self.current_idx()) {
            Some(question) => Prompt::Question {
                number: self.current_idx() + 1,
                total: self.question_set.len(),
                question,
            },
            None => Prompt::Finished,
        }
    }

    /// Appends the chosen answer. On error the session is left untouched.
    pub fn record_answer(&mut self, answer_idx: usize) -> Result<(), QuizError> {
        let question = self
            .question_set
            .get(self.current_idx())
            .ok_or(QuizError::QuizFinished)?;

        if answer_idx >= question.answers().len() {
            return Err(QuizError::AnswerOutOfRange {
                index: answer_idx,
                available: question.answers().len(),
            });
        }

        self.collected_answers.push(answer_idx);
        Ok(())
    }

    pub fn score(&self) -> usize {
        self.collected_answers.iter().sum()
    }

    /// Maps the answer path onto the pool: `sum(answers) mod pool.len()`.
    pub fn compute_result(&mut self, pool: &[Animal]) -> Result<&Animal, QuizError> {
        if pool.is_empty() {
            return Err(QuizError::EmptyResultPool);
        }
        let animal = pool[self.score() % pool.len()].clone();
        Ok(&*self.selected.insert(animal))
    }
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    content: Arc<Content>,
}

impl QuizEngine {
    pub fn new(content: Arc<Content>) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    #[instrument(level = "debug", skip(self))]
    pub fn start_quiz(&self) -> Session {
        let session = Session::new(self.content.question_set());
        info!(session = %session.id(), "Quiz started");
        session
    }

    pub fn compute_result<'s>(&self, session: &'s mut Session) -> Result<&'s Animal, QuizError> {
        let id = *session.id();
        let animal = session.compute_result(self.content.animals())?;
        info!(session = %id, "Quiz completed: {}", animal);
        Ok(animal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::{fallback_animals, fallback_questions};

    fn fallback_engine() -> QuizEngine {
        QuizEngine::new(Arc::new(Content::new(
            fallback_animals(),
            fallback_questions(),
        )))
    }

    fn animals(n: usize) -> Vec<Animal> {
        (0..n)
            .map(|i| Animal::new(format!("Animal {i}"), "", "", vec![], ""))
            .collect()
    }

    fn questions(answer_counts: &[usize]) -> Vec<Question> {
        answer_counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                Question::new(
                    format!("Question {i}"),
                    (0..n).map(|a| format!("Answer {a}")).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn start_quiz_resets_progress() {
        let session = fallback_engine().start_quiz();

        assert_eq!(session.current_idx(), 0);
        assert!(session.collected_answers().is_empty());
        assert!(session.selected().is_none());
        assert_eq!(session.status(), QuizStatus::InProgress(0));
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let engine = fallback_engine();
        assert_ne!(engine.start_quiz().id(), engine.start_quiz().id());
    }

    #[test]
    fn current_prompt_walks_the_question_set() {
        let engine = fallback_engine();
        let mut session = engine.start_quiz();

        match session.current_prompt() {
            Prompt::Question {
                number,
                total,
                question,
            } => {
                assert_eq!((number, total), (1, 2));
                assert_eq!(question, &fallback_questions()[0]);
            }
            Prompt::Finished => panic!("quiz should not be finished"),
        }

        session.record_answer(0).unwrap();
        session.record_answer(3).unwrap();

        assert_eq!(session.current_prompt(), Prompt::Finished);
        assert!(session.is_finished());
    }

    #[test]
    fn valid_answer_advances_by_one() {
        let mut session = fallback_engine().start_quiz();

        session.record_answer(2).unwrap();

        assert_eq!(session.current_idx(), 1);
        assert_eq!(session.collected_answers(), [2]);
    }

    #[test]
    fn out_of_range_answer_leaves_session_unchanged() {
        let mut session = fallback_engine().start_quiz();
        session.record_answer(1).unwrap();
        let before = session.clone();

        let err = session.record_answer(4).unwrap_err();

        assert_eq!(
            err,
            QuizError::AnswerOutOfRange {
                index: 4,
                available: 4
            }
        );
        assert_eq!(session, before);
    }

    #[test]
    fn answer_after_last_question_is_rejected() {
        let mut session = fallback_engine().start_quiz();
        session.record_answer(0).unwrap();
        session.record_answer(0).unwrap();

        assert_eq!(session.record_answer(0), Err(QuizError::QuizFinished));
        assert_eq!(session.current_idx(), 2);
    }

    #[test]
    fn result_is_score_modulo_pool_size() {
        let pool = animals(3);
        let mut session = Session::new(questions(&[2, 2]).into());
        session.record_answer(1).unwrap();
        session.record_answer(0).unwrap();

        let animal = session.compute_result(&pool).unwrap().clone();

        assert_eq!(animal, pool[1]);
        assert_eq!(session.status(), QuizStatus::Completed(&pool[1]));
    }

    #[test]
    fn multiples_of_three_map_to_first_fallback_animal() {
        let engine = fallback_engine();
        for answers in [[0, 0], [0, 3], [3, 0], [1, 2], [2, 1], [3, 3]] {
            let mut session = engine.start_quiz();
            for answer in answers {
                session.record_answer(answer).unwrap();
            }

            let animal = engine.compute_result(&mut session).unwrap();

            assert_eq!(animal, &fallback_animals()[0], "answers {answers:?}");
        }
    }

    #[test]
    fn identical_paths_give_identical_results() {
        let engine = fallback_engine();
        for first in 0..4 {
            for second in 0..4 {
                let mut a = engine.start_quiz();
                let mut b = engine.start_quiz();
                for session in [&mut a, &mut b] {
                    session.record_answer(first).unwrap();
                    session.record_answer(second).unwrap();
                }

                assert_eq!(
                    engine.compute_result(&mut a).unwrap(),
                    engine.compute_result(&mut b).unwrap()
                );
            }
        }
    }

    #[test]
    fn any_score_indexes_the_pool() {
        for size in 1..6 {
            let pool = animals(size);
            let mut session = Session::new(questions(&[40, 40, 40]).into());
            for answer in [39, 17, 5] {
                session.record_answer(answer).unwrap();
            }

            assert!(session.compute_result(&pool).is_ok());
        }
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut session = Session::new(questions(&[1]).into());
        session.record_answer(0).unwrap();

        assert_eq!(session.compute_result(&[]), Err(QuizError::EmptyResultPool));
        assert!(session.selected().is_none());
    }

    #[test]
    fn session_keeps_its_snapshot() {
        let engine = fallback_engine();
        let session = engine.start_quiz();

        assert_eq!(session.question_set(), engine.content().questions());
    }
}
