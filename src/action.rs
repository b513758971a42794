use std::{fmt, str::FromStr};

use crate::error::UnknownAction;

/// Every button the bot can render. Tokens round-trip through callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    BeginQuiz,
    Answer(usize),
    Restart,
    ShareResult,
    About,
    Contact,
    Guardian,
    BackToStart,
    BackToResult,
}

const ANSWER_PREFIX: &str = "answer_";

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::BeginQuiz => f.write_str("start_quiz"),
            Action::Answer(idx) => write!(f, "{ANSWER_PREFIX}{idx}"),
            Action::Restart => f.write_str("restart"),
            Action::ShareResult => f.write_str("share_result"),
            Action::About => f.write_str("about_program"),
            Action::Contact => f.write_str("contact"),
            Action::Guardian => f.write_str("become_guardian"),
            Action::BackToStart => f.write_str("back_to_start"),
            Action::BackToResult => f.write_str("back_to_result"),
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let action = match token {
            "start_quiz" => Action::BeginQuiz,
            "restart" => Action::Restart,
            "share_result" => Action::ShareResult,
            "about_program" => Action::About,
            "contact" => Action::Contact,
            "become_guardian" => Action::Guardian,
            "back_to_start" => Action::BackToStart,
            "back_to_result" => Action::BackToResult,
            other => other
                .strip_prefix(ANSWER_PREFIX)
                .filter(|idx| idx.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|idx| idx.parse().ok())
                .map(Action::Answer)
                .ok_or_else(|| UnknownAction(token.to_string()))?,
        };
        Ok(action)
    }
}
