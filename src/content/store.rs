use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use super::model::{Animal, Content, Question};
use crate::error::ContentError;

pub const ANIMALS_FILE: &str = "animals.json";
pub const QUESTIONS_FILE: &str = "questions.json";

pub trait RetrieveContent {
    fn load_animals(&self) -> Result<Vec<Animal>, ContentError>;

    fn load_questions(&self) -> Result<Vec<Question>, ContentError>;

    /// Loads both lists and checks them before the bot starts serving.
    fn load(&self) -> Result<Content, ContentError> {
        let animals = self.load_animals()?;
        let questions = self.load_questions()?;
        validate(&animals, &questions)?;
        Ok(Content::new(animals, questions))
    }
}

/// Reads content files from a directory, falling back to the built-in set for missing files.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RetrieveContent for ContentStore {
    #[instrument(level = "debug")]
    fn load_animals(&self) -> Result<Vec<Animal>, ContentError> {
        let path = self.dir.join(ANIMALS_FILE);
        Ok(read_json(&path)?.unwrap_or_else(|| {
            warn!("{} not found, using built-in animals", path.display());
            fallback_animals()
        }))
    }

    #[instrument(level = "debug")]
    fn load_questions(&self) -> Result<Vec<Question>, ContentError> {
        let path = self.dir.join(QUESTIONS_FILE);
        Ok(read_json(&path)?.unwrap_or_else(|| {
            warn!("{} not found, using built-in questions", path.display());
            fallback_questions()
        }))
    }
}

/// `Ok(None)` means the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ContentError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ContentError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let parsed = serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {}", path.display());
    Ok(Some(parsed))
}

fn validate(animals: &[Animal], questions: &[Question]) -> Result<(), ContentError> {
    if animals.is_empty() {
        return Err(ContentError::NoAnimals);
    }
    if questions.is_empty() {
        return Err(ContentError::NoQuestions);
    }
    if let Some((i, question)) = questions
        .iter()
        .enumerate()
        .find(|(_, q)| q.answers().is_empty())
    {
        return Err(ContentError::QuestionWithoutAnswers {
            number: i + 1,
            text: question.text().to_string(),
        });
    }
    Ok(())
}

pub fn fallback_animals() -> Vec<Animal> {
    let traits = |list: &[&str]| list.iter().map(|t| t.to_string()).collect();
    vec![
        Animal::new(
            "Амурский тигр",
            "Величественный хищник",
            "",
            traits(&["Сильный", "Независимый"]),
            "",
        ),
        Animal::new(
            "Красная панда",
            "Милый пушистый зверёк",
            "",
            traits(&["Игривый", "Спокойный"]),
            "",
        ),
        Animal::new(
            "Снежный барс",
            "Неуловимый горный хищник",
            "",
            traits(&["Ловкий", "Загадочный"]),
            "",
        ),
    ]
}

pub fn fallback_questions() -> Vec<Question> {
    let answers = |list: &[&str]| list.iter().map(|a| a.to_string()).collect();
    vec![
        Question::new(
            "Какое время дня вам больше нравится?",
            answers(&["🌅 Утро", "☀️ День", "🌙 Вечер", "🌃 Ночь"]),
        ),
        Question::new(
            "Где бы вы хотели жить?",
            answers(&["🏔️ Горы", "🌲 Лес", "🏖️ У воды", "🏜️ Пустыня"]),
        ),
    ]
}
