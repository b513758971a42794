use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading quiz content at startup.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed content in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no animals configured")]
    NoAnimals,

    #[error("no questions configured")]
    NoQuestions,

    #[error("question #{number} '{text}' has no answers")]
    QuestionWithoutAnswers { number: usize, text: String },
}

/// Errors raised by the quiz engine. None of them invalidate a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("answer #{index} is out of range, question has {available} answers")]
    AnswerOutOfRange { index: usize, available: usize },

    #[error("quiz is already finished")]
    QuizFinished,

    #[error("result pool is empty")]
    EmptyResultPool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action token '{0}'")]
pub struct UnknownAction(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN should be set")]
    MissingToken,

    #[error("ADMIN_CHAT_ID '{0}' is not a chat id")]
    InvalidAdminChatId(String),

    #[error("SITE_URL '{0}' can't be parsed")]
    InvalidSiteUrl(String),

    #[error("WEBHOOK_URL '{0}' can't be parsed")]
    InvalidWebhookUrl(String),

    #[error("WEBHOOK_ADDR '{0}' can't be parsed")]
    InvalidWebhookAddr(String),
}
