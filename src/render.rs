use teloxide::utils::html::escape;
use url::Url;

use crate::{action::Action, content::Animal, content::Question};

pub const SHOWN_TRAITS: usize = 3;

const SHARE_ENDPOINT: &str = "https://t.me/share/url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonTarget {
    Action(Action),
    Link(Url),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub target: ButtonTarget,
}

/// A prompt ready to be delivered: text plus selectable actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    pub text: String,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    site: Url,
    share: Url,
}

impl Button {
    pub fn action(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            target: ButtonTarget::Action(action),
        }
    }

    pub fn link(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            target: ButtonTarget::Link(url),
        }
    }
}

impl Render {
    pub fn new(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self {
            text: text.into(),
            buttons,
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, vec![])
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.buttons.iter().filter_map(|b| match b.target {
            ButtonTarget::Action(action) => Some(action),
            ButtonTarget::Link(_) => None,
        })
    }
}

impl Links {
    pub fn from_site(site: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            site: Url::parse(site)?,
            share: Url::parse(SHARE_ENDPOINT)?,
        })
    }

    pub fn site(&self) -> &Url {
        &self.site
    }

    pub fn share(&self, text: &str) -> Url {
        let mut url = self.share.clone();
        url.query_pairs_mut().append_pair("text", text);
        url
    }
}

pub fn welcome(first_name: &str) -> Render {
    let text = format!(
        "🦁 Добро пожаловать, {}!\n\n\
         🎪 <b>Викторина «Какое ваше тотемное животное?»</b>\n\n\
         Пройдите увлекательную викторину и узнайте, с каким обитателем \
         Московского зоопарка у вас больше всего общего!\n\n\
         🎯 Отвечайте честно на вопросы, и мы подберём для вас идеальное животное.\n\n\
         Готовы начать?",
        escape(first_name)
    );

    Render::new(
        text,
        vec![
            Button::action("🚀 Начать викторину", Action::BeginQuiz),
            Button::action("ℹ️ О программе опеки", Action::About),
            Button::action("📞 Связаться с зоопарком", Action::Contact),
        ],
    )
}

pub fn question(number: usize, total: usize, question: &Question, notice: Option<&str>) -> Render {
    let mut text = String::new();
    if let Some(notice) = notice {
        text.push_str(&format!("⚠️ {}\n\n", escape(notice)));
    }
    text.push_str(&format!(
        "❓ <b>Вопрос {number} из {total}</b>\n\n{}",
        escape(question.text())
    ));

    let buttons = question
        .answers()
        .iter()
        .enumerate()
        .map(|(i, answer)| Button::action(answer.as_str(), Action::Answer(i)))
        .collect();

    Render::new(text, buttons)
}

pub fn result(animal: &Animal) -> Render {
    let mut text = format!(
        "🎯 <b>Ваше тотемное животное: {}!</b>\n\n📖 {}\n\n",
        escape(animal.name()),
        escape(animal.description())
    );

    // href only takes a parsed url, quotes come out percent-encoded
    if let Ok(image) = Url::parse(animal.image_url()) {
        text.push_str(&format!(
            "🖼 <a href=\"{}\">Фото</a>\n\n",
            escape(image.as_str())
        ));
    }

    if !animal.traits().is_empty() {
        text.push_str("✨ <b>Ваши качества:</b>\n");
        for t in animal.traits().iter().take(SHOWN_TRAITS) {
            text.push_str(&format!("• {}\n", escape(t)));
        }
        text.push('\n');
    }

    text.push_str(
        "🤝 <b>Хотите стать опекуном?</b>\n\
         Программа опеки Московского зоопарка позволяет вам поддержать любимое животное!",
    );

    Render::new(
        text,
        vec![
            Button::action("🔄 Пройти ещё раз", Action::Restart),
            Button::action("📤 Поделиться", Action::ShareResult),
            Button::action("🤝 Стать опекуном", Action::Guardian),
        ],
    )
}

pub fn share(animal: &Animal, links: &Links) -> Render {
    let share_text = format!(
        "🎯 Я прошёл викторину зоопарка!\nМоё тотемное животное: {}",
        animal.name()
    );

    Render::new(
        "Поделитесь результатом:",
        vec![
            Button::link("📱 Поделиться", links.share(&share_text)),
            Button::action("◀️ Назад", Action::BackToResult),
        ],
    )
}

pub fn guardian(animal: Option<&Animal>, links: &Links) -> Render {
    let mut text = String::from(
        "🤝 <b>Стать опекуном</b>\n\n\
         Поддержите животных зоопарка!\n\
         Узнайте больше на сайте зоопарка.",
    );

    let mut buttons = vec![Button::link("🌐 Перейти на сайт", links.site().clone())];
    if let Some(animal) = animal {
        if !animal.adoption_info().is_empty() {
            text.push_str(&format!(
                "\n\n🐾 <b>{}</b>\n{}",
                escape(animal.name()),
                escape(animal.adoption_info())
            ));
        }
        buttons.push(Button::action("◀️ Назад", Action::BackToResult));
    } else {
        buttons.push(Button::action("◀️ Назад", Action::BackToStart));
    }

    Render::new(text, buttons)
}

pub fn about(links: &Links) -> Render {
    let text = format!(
        "🤝 <b>Программа опеки Московского зоопарка</b>\n\n\
         Станьте опекуном животного и помогите зоопарку!\n\n\
         <b>Что вы получите:</b>\n\
         🎁 Именной сертификат опекуна\n\
         📱 Эксклюзивные фото и видео\n\
         📧 Регулярные отчёты\n\
         🎟 Льготные билеты\n\
         👥 Закрытые мероприятия\n\n\
         Узнать больше: {}",
        escape(links.site().as_str())
    );

    Render::new(
        text,
        vec![
            Button::action("🚀 Пройти викторину", Action::BeginQuiz),
            Button::action("◀️ Назад", Action::BackToStart),
        ],
    )
}

pub fn contact() -> Render {
    Render::new(
        "📞 <b>Связь с Московским зоопарком</b>\n\n\
         📧 Email: info@moscowzoo.ru\n\
         📱 Телефон: +7 (495) 255-53-75\n\
         🌐 Сайт: moscowzoo.ru\n\
         📍 Адрес: Большая Грузинская ул., 1\n\n\
         🕘 Режим работы: Пн-Вс 9:00-17:00",
        vec![Button::action("◀️ Назад", Action::BackToStart)],
    )
}

pub fn redo_quiz() -> Render {
    Render::new(
        "Ошибка: пройдите викторину заново.",
        vec![Button::action("🚀 Пройти викторину", Action::BeginQuiz)],
    )
}

pub fn cancelled() -> Render {
    Render::text_only("Викторина сброшена. Отправьте /start, чтобы начать заново.")
}

pub fn unrecognized() -> Render {
    Render::text_only("Не понимаю сообщение. Отправьте /start, чтобы открыть меню или /help для списка команд.")
}
