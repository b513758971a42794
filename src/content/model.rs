use std::{fmt, sync::Arc};

use serde::Deserialize;

/// A quiz outcome. Identity is its position in [`Content::animals`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Animal {
    name: String,
    description: String,
    #[serde(default, alias = "imageRef")]
    image_url: String,
    #[serde(default)]
    traits: Vec<String>,
    #[serde(default, alias = "extraInfo")]
    adoption_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    answers: Vec<String>,
}

/// Everything loaded at startup. Shared read-only between the engine and the router.
#[derive(Debug, Clone)]
pub struct Content {
    animals: Arc<[Animal]>,
    questions: Arc<[Question]>,
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut answers = String::new();
        for (i, answer) in self.answers().iter().enumerate() {
            answers.push_str(&format!("{}) {}\n", i + 1, answer));
        }

        write!(f, "{}\n{}", self.text(), answers)
    }
}

impl Animal {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
        traits: Vec<String>,
        adoption_info: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_url: image_url.into(),
            traits,
            adoption_info: adoption_info.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Empty when the animal has no picture.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    pub fn adoption_info(&self) -> &str {
        &self.adoption_info
    }
}

impl Question {
    pub fn new(text: impl Into<String>, answers: Vec<String>) -> Self {
        Self {
            text: text.into(),
            answers,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }
}

impl Content {
    pub fn new(animals: Vec<Animal>, questions: Vec<Question>) -> Self {
        Self {
            animals: animals.into(),
            questions: questions.into(),
        }
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Cheap snapshot of the question list for a new session.
    pub fn question_set(&self) -> Arc<[Question]> {
        Arc::clone(&self.questions)
    }
}
